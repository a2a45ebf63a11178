// [libs/domain/models/src/project.rs]
/*!
 * =================================================================
 * APARATO: PROJECT DOMAIN CONTRACTS (V2.0 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: GRAMÁTICA DEL NAMESPACE GESTIONADO Y SUS MIEMBROS
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Rol de un miembro dentro del proyecto, mapeado a un cluster role predefinido.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Edit,
    View,
}

impl MemberRole {
    /// Nombre del cluster role predefinido que materializa el rol.
    pub fn cluster_role_name(&self) -> &'static str {
        match self {
            MemberRole::Admin => "bison:project-admin",
            MemberRole::Edit => "bison:project-edit",
            MemberRole::View => "bison:project-view",
        }
    }
}

/// Miembro nominal de un proyecto.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectMember {
    pub user: String,
    pub role: MemberRole,
}

/// Namespace gestionado, propiedad de exactamente un equipo.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Nombre único a nivel de cluster (etiqueta DNS).
    pub name: String,
    /// Equipo propietario del namespace.
    pub team: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Miembros con acceso, materializados como role bindings.
    #[serde(default)]
    pub members: Vec<ProjectMember>,
}
