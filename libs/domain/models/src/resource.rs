// [libs/domain/models/src/resource.rs]
/*!
 * =================================================================
 * APARATO: RESOURCE DEFINITION CONTRACTS (V1.4 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CATÁLOGO NOMINAL DE RECURSOS FACTURABLES
 *
 * # Mathematical Proof (Display Scaling):
 * valor_display = valor_crudo / divisor. El divisor es estrictamente
 * positivo; la validación rechaza catálogos con divisor <= 0.
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Familia funcional de un recurso del cluster.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Compute,
    Memory,
    Storage,
    Accelerator,
    Other,
}

/// Definición display + precio de un recurso canónico del cluster.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    /// Nombre canónico ('cpu', 'memory', 'nvidia.com/gpu').
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    /// Unidad de presentación ('cores', 'GiB').
    #[serde(default)]
    pub unit: String,
    /// Factor de escala crudo -> display. Estrictamente positivo.
    pub divisor: f64,
    pub category: ResourceCategory,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub sort_order: i32,
    /// Visibilidad en los formularios de cuota.
    #[serde(default)]
    pub show_in_quota: bool,
    /// Precio por unidad-hora en la moneda configurada.
    #[serde(default)]
    pub price: f64,
}

/**
 * Catálogo sembrado por defecto en la primera ignición del plano de control.
 */
pub fn default_resource_catalog() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition {
            name: "cpu".to_string(),
            display_name: "CPU".to_string(),
            unit: "cores".to_string(),
            divisor: 1.0,
            category: ResourceCategory::Compute,
            enabled: true,
            sort_order: 0,
            show_in_quota: true,
            price: 0.0,
        },
        ResourceDefinition {
            name: "memory".to_string(),
            display_name: "Memory".to_string(),
            unit: "GiB".to_string(),
            divisor: 1024.0 * 1024.0 * 1024.0,
            category: ResourceCategory::Memory,
            enabled: true,
            sort_order: 1,
            show_in_quota: true,
            price: 0.0,
        },
        ResourceDefinition {
            name: "nvidia.com/gpu".to_string(),
            display_name: "GPU".to_string(),
            unit: "cards".to_string(),
            divisor: 1.0,
            category: ResourceCategory::Accelerator,
            enabled: true,
            sort_order: 2,
            show_in_quota: true,
            price: 0.0,
        },
    ]
}
