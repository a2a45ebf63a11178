// [libs/domain/billing/src/pricing.rs]
/*!
 * =================================================================
 * APARATO: PRICE RESOLUTION MATRIX (V2.1 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: RESOLUCIÓN DE PRECIOS POR FAMILIA DE RECURSO
 *
 * # Invariante:
 * Las definiciones de recurso habilitadas mandan; la tabla 'pricing'
 * de la política es respaldo para claves sin definición. Un precio
 * ausente delega en la columna de costo reportada por el oráculo.
 * =================================================================
 */

use bison_domain_models::{BillingConfig, ResourceCategory, ResourceDefinition};
use bison_infra_cost_oracle::NamespaceUsage;

/// Claves de respaldo consultadas para el precio del acelerador.
const ACCELERATOR_FALLBACK_KEYS: [&str; 2] = ["gpu", "nvidia.com/gpu"];

/// Precios por hora resueltos para la pasada de facturación.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceTable {
    pub cpu_core_hour: Option<f64>,
    pub memory_gb_hour: Option<f64>,
    pub accelerator_hour: Option<f64>,
}

impl PriceTable {
    /**
     * Resuelve la tabla desde el catálogo habilitado y la política.
     *
     * # Logic:
     * CPU y memoria salen de las definiciones nominales 'cpu'/'memory';
     * el acelerador, de la primera definición habilitada de su categoría
     * con precio no nulo. La tabla de la política cubre los huecos.
     */
    pub fn resolve(config: &BillingConfig, definitions: &[ResourceDefinition]) -> Self {
        let defined_price = |resource_name: &str| {
            definitions
                .iter()
                .find(|definition| definition.enabled && definition.name == resource_name)
                .map(|definition| definition.price)
                .filter(|price| *price > 0.0)
        };

        let fallback_price = |pricing_key: &str| {
            config
                .pricing
                .get(pricing_key)
                .map(|entry| entry.price)
                .filter(|price| *price > 0.0)
        };

        let accelerator_defined = definitions
            .iter()
            .find(|definition| {
                definition.enabled
                    && definition.category == ResourceCategory::Accelerator
                    && definition.price > 0.0
            })
            .map(|definition| definition.price);

        let accelerator_fallback = ACCELERATOR_FALLBACK_KEYS
            .iter()
            .copied()
            .find_map(|pricing_key| fallback_price(pricing_key));

        Self {
            cpu_core_hour: defined_price("cpu").or_else(|| fallback_price("cpu")),
            memory_gb_hour: defined_price("memory").or_else(|| fallback_price("memory")),
            accelerator_hour: accelerator_defined.or(accelerator_fallback),
        }
    }

    /**
     * Costo de una fila de uso bajo esta tabla.
     *
     * # Logic:
     * Cada familia sin precio resuelto usa tal cual la columna de costo
     * reportada por el oráculo.
     */
    pub fn cost_of(&self, usage_row: &NamespaceUsage) -> f64 {
        let cpu_component = match self.cpu_core_hour {
            Some(price) => usage_row.cpu_core_hours * price,
            None => usage_row.cpu_cost,
        };
        let memory_component = match self.memory_gb_hour {
            Some(price) => usage_row.ram_gb_hours * price,
            None => usage_row.ram_cost,
        };
        let accelerator_component = match self.accelerator_hour {
            Some(price) => usage_row.gpu_hours * price,
            None => usage_row.gpu_cost,
        };
        cpu_component + memory_component + accelerator_component
    }
}

/// Redondeo monetario a dos decimales.
pub fn round_currency(raw_amount: f64) -> f64 {
    (raw_amount * 100.0).round() / 100.0
}
