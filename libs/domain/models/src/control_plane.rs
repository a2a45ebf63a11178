// [libs/domain/models/src/control_plane.rs]
/*!
 * =================================================================
 * APARATO: CONTROL-PLANE SSH CONTRACTS (V1.2 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CREDENCIALES DEL HOST DEL PLANO DE CONTROL
 *
 * # Invariante:
 * La lectura pública siempre pasa por 'redacted()'. La versión íntegra
 * solo la consume el orquestador de onboarding para emitir el join token.
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Centinela que sustituye los secretos en lecturas y exportaciones.
pub const REDACTED_SENTINEL: &str = "***REDACTED***";

/// Método de autenticación contra el host del plano de control.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SshAuthMethod {
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "privateKey")]
    PrivateKey,
}

/// Credenciales SSH del host que emite los join tokens.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneSshConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub auth_method: SshAuthMethod,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub private_key: String,
}

impl Default for ControlPlaneSshConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 22,
            user: "root".to_string(),
            auth_method: SshAuthMethod::Password,
            password: String::new(),
            private_key: String::new(),
        }
    }
}

impl ControlPlaneSshConfig {
    /// Copia con los secretos sustituidos por el centinela.
    pub fn redacted(&self) -> Self {
        let mut sanitized = self.clone();
        if !sanitized.password.is_empty() {
            sanitized.password = REDACTED_SENTINEL.to_string();
        }
        if !sanitized.private_key.is_empty() {
            sanitized.private_key = REDACTED_SENTINEL.to_string();
        }
        sanitized
    }
}
