// [apps/control-plane/src/auth.rs]
/*!
 * =================================================================
 * APARATO: TOKEN VAULT (V2.1 - GOLD MASTER)
 * CLASIFICACIÓN: SECURITY STRATUM (ESTRATO L4)
 * RESPONSABILIDAD: CREDENCIALES FIJAS Y TOKENS BEARER CON TTL
 *
 * # Invariante:
 * Los tokens viven solo en memoria; un reinicio del proceso invalida
 * todas las sesiones, por diseño del despliegue.
 * =================================================================
 */

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

/// Vigencia nominal de un token emitido.
const TOKEN_TTL_HOURS: i64 = 24;

pub struct TokenVault {
    admin_username: String,
    admin_password: String,
    /// token -> expiración.
    active_sessions: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl TokenVault {
    /// Hidrata las credenciales fijas desde el entorno del proceso.
    pub fn from_environment() -> Self {
        let admin_username =
            std::env::var("BISON_ADMIN_USER").unwrap_or_else(|_| "admin".to_string());
        let admin_password = std::env::var("BISON_ADMIN_PASSWORD").unwrap_or_else(|_| {
            warn!("🔑 [TOKEN_VAULT]: BISON_ADMIN_PASSWORD undefined; development default active.");
            "bison-admin".to_string()
        });

        Self {
            admin_username,
            admin_password,
            active_sessions: Mutex::new(HashMap::new()),
        }
    }

    /**
     * Intercambio de credenciales fijas por un token bearer.
     *
     * @return (token, ttl_en_segundos) o None ante credenciales inválidas.
     */
    pub fn login(&self, username: &str, password: &str) -> Option<(String, i64)> {
        if username != self.admin_username || password != self.admin_password {
            return None;
        }

        let bearer_token = Uuid::new_v4().to_string();
        let expiry = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
        self.active_sessions
            .lock()
            .expect("token vault lock poisoned")
            .insert(bearer_token.clone(), expiry);

        info!("🔑 [TOKEN_VAULT]: Session issued for [{}].", username);
        Some((bearer_token, TOKEN_TTL_HOURS * 3600))
    }

    /// Verifica el token y retorna el operador; purga lo expirado.
    pub fn verify(&self, bearer_token: &str) -> Option<String> {
        let now = Utc::now();
        let mut sessions = self
            .active_sessions
            .lock()
            .expect("token vault lock poisoned");
        sessions.retain(|_, expiry| *expiry > now);
        sessions
            .contains_key(bearer_token)
            .then(|| self.admin_username.clone())
    }
}
