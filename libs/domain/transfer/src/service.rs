// [libs/domain/transfer/src/service.rs]
/*!
 * =================================================================
 * APARATO: CONFIG TRANSFER SERVICE (V2.3 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: EXPORTACIÓN, PREVIEW Y APLICACIÓN SELECTIVA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. VERSION GATE: Un sobre con versión distinta de la vigente invalida
 *    el preview completo y bloquea la aplicación.
 * 2. PARTIAL APPLY DOCTRINE: El fallo de una sección se degrada a
 *    'skipped' con advertencia; las demás secciones aplican.
 * 3. ROUND-TRIP LAW: export(todo, con secretos) seguido de apply(todo,
 *    sin preservación) reproduce cada blob byte a byte.
 * =================================================================
 */

use crate::errors::TransferError;
use crate::redaction::{is_redacted, is_sensitive_channel_key, mask_value};
use bison_domain_models::resource::default_resource_catalog;
use bison_domain_models::transfer::{
    SECTION_ALERTS, SECTION_BILLING, SECTION_CONTROL_PLANE, SECTION_INIT_SCRIPTS,
    SECTION_RESOURCES,
};
use bison_domain_models::{
    AlertConfig, ApplyOutcome, BillingConfig, ControlPlaneSshConfig, ExportEnvelope, FieldChange,
    ImportPreview, ListChange, ListChangeKind, ResourceDefinition, ScriptGroup, SectionPreview,
    EXPORT_VERSION, KNOWN_SECTIONS,
};
use bison_infra_cluster::{names, BlobVault, ClusterError};
use chrono::Utc;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, instrument, warn};

/// Clave del catálogo de recursos dentro de su blob.
const RESOURCES_KEY: &str = "resources";

/// Clave del catálogo de scripts dentro de su blob.
const GROUPS_KEY: &str = "groups";

#[derive(Clone)]
pub struct ConfigTransfer {
    vault: BlobVault,
}

impl ConfigTransfer {
    pub fn new(vault: BlobVault) -> Self {
        Self { vault }
    }

    // --- LECTURA DE FUENTES DE VERDAD ---

    async fn live_billing(&self) -> Result<BillingConfig, TransferError> {
        Ok(self
            .vault
            .read_document::<BillingConfig>(names::BILLING_CONFIG, names::SINGLETON_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn live_alerts(&self) -> Result<AlertConfig, TransferError> {
        Ok(self
            .vault
            .read_document::<AlertConfig>(names::ALERT_CONFIG, names::SINGLETON_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn live_control_plane(&self) -> Result<ControlPlaneSshConfig, TransferError> {
        Ok(self
            .vault
            .read_document::<ControlPlaneSshConfig>(
                names::CONTROL_PLANE_CONFIG,
                names::SINGLETON_KEY,
            )
            .await?
            .unwrap_or_default())
    }

    async fn live_resources(&self) -> Result<Vec<ResourceDefinition>, TransferError> {
        Ok(self
            .vault
            .read_document::<Vec<ResourceDefinition>>(names::RESOURCE_CONFIG, RESOURCES_KEY)
            .await?
            .unwrap_or_else(default_resource_catalog))
    }

    async fn live_scripts(&self) -> Result<Vec<ScriptGroup>, TransferError> {
        Ok(self
            .vault
            .read_document::<Vec<ScriptGroup>>(names::INIT_SCRIPTS, GROUPS_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn read_section_value(&self, section: &str) -> Result<Value, TransferError> {
        let value = match section {
            SECTION_BILLING => serde_json::to_value(self.live_billing().await?),
            SECTION_ALERTS => serde_json::to_value(self.live_alerts().await?),
            SECTION_CONTROL_PLANE => serde_json::to_value(self.live_control_plane().await?),
            SECTION_RESOURCES => serde_json::to_value(self.live_resources().await?),
            SECTION_INIT_SCRIPTS => serde_json::to_value(self.live_scripts().await?),
            unknown => {
                return Err(TransferError::InvalidEnvelope(format!(
                    "unknown section {}",
                    unknown
                )))
            }
        };
        Ok(value.map_err(ClusterError::Serialization)?)
    }

    // --- EXPORT ---

    /**
     * Exporta las secciones seleccionadas dentro del sobre versionado.
     *
     * # Logic:
     * Las secciones desconocidas se omiten con rastro. Sin
     * 'include_sensitive', los secretos de alerts y controlPlane viajan
     * censurados.
     */
    #[instrument(skip(self, sections))]
    pub async fn export(
        &self,
        sections: &[String],
        include_sensitive: bool,
        exported_by: &str,
    ) -> Result<ExportEnvelope, TransferError> {
        let mut envelope = ExportEnvelope {
            version: EXPORT_VERSION.to_string(),
            exported_at: Utc::now(),
            exported_by: exported_by.to_string(),
            sections: BTreeMap::new(),
        };

        let requested: BTreeSet<&str> = sections.iter().map(String::as_str).collect();
        for section in requested {
            if !KNOWN_SECTIONS.contains(&section) {
                warn!("📦 [TRANSFER_EXPORT]: Unknown section [{}] skipped.", section);
                continue;
            }
            let mut section_value = self.read_section_value(section).await?;
            if !include_sensitive {
                redact_section(section, &mut section_value);
            }
            envelope.sections.insert(section.to_string(), section_value);
        }

        info!(
            "📦 [TRANSFER_EXPORT]: {} sections sealed (sensitive: {}).",
            envelope.sections.len(),
            include_sensitive
        );
        Ok(envelope)
    }

    // --- PREVIEW ---

    /**
     * Valida el sobre y proyecta el diff contra el entorno vivo.
     */
    #[instrument(skip(self, envelope))]
    pub async fn preview(&self, envelope: &ExportEnvelope) -> Result<ImportPreview, TransferError> {
        if envelope.version != EXPORT_VERSION {
            return Ok(ImportPreview {
                valid: false,
                version: envelope.version.clone(),
                sections: Vec::new(),
                warnings: vec![format!(
                    "unsupported envelope version {} (expected {})",
                    envelope.version, EXPORT_VERSION
                )],
            });
        }

        let mut preview = ImportPreview {
            valid: true,
            version: envelope.version.clone(),
            sections: Vec::new(),
            warnings: Vec::new(),
        };

        for (section_name, raw_section) in &envelope.sections {
            let section_preview = match section_name.as_str() {
                SECTION_BILLING => self.preview_billing(raw_section).await?,
                SECTION_ALERTS => self.preview_alerts(raw_section).await?,
                SECTION_CONTROL_PLANE => self.preview_control_plane(raw_section).await?,
                SECTION_RESOURCES => self.preview_resources(raw_section).await?,
                SECTION_INIT_SCRIPTS => self.preview_scripts(raw_section).await?,
                unknown => {
                    preview
                        .warnings
                        .push(format!("unknown section {} ignored", unknown));
                    continue;
                }
            };
            preview.valid = preview.valid && section_preview.valid;
            preview.sections.push(section_preview);
        }

        Ok(preview)
    }

    async fn preview_billing(&self, raw_section: &Value) -> Result<SectionPreview, TransferError> {
        let mut section_preview = blank_preview(SECTION_BILLING);
        let Ok(imported) = serde_json::from_value::<BillingConfig>(raw_section.clone()) else {
            return Ok(invalid_preview(SECTION_BILLING, "unreadable billing payload"));
        };
        if let Err(policy_violation) = imported.validate() {
            return Ok(invalid_preview(SECTION_BILLING, &policy_violation.to_string()));
        }

        let current_value = serde_json::to_value(self.live_billing().await?)
            .map_err(ClusterError::Serialization)?;
        section_preview.changes = diff_flat(&current_value, raw_section, &[]);
        Ok(section_preview)
    }

    async fn preview_alerts(&self, raw_section: &Value) -> Result<SectionPreview, TransferError> {
        let mut section_preview = blank_preview(SECTION_ALERTS);
        let Ok(imported) = serde_json::from_value::<AlertConfig>(raw_section.clone()) else {
            return Ok(invalid_preview(SECTION_ALERTS, "unreadable alerts payload"));
        };

        let live = self.live_alerts().await?;
        if (live.balance_threshold - imported.balance_threshold).abs() > f64::EPSILON {
            section_preview.changes.push(FieldChange {
                field: "balanceThreshold".to_string(),
                current: Value::from(live.balance_threshold),
                imported: Value::from(imported.balance_threshold),
            });
        }

        section_preview.list_changes =
            diff_keyed(&live.channels, &imported.channels, |channel| channel.id.clone());

        let masked_values = imported
            .channels
            .iter()
            .flat_map(|channel| channel.config.values())
            .any(|value| is_redacted(value));
        if masked_values {
            section_preview
                .warnings
                .push("channel secrets are masked; apply with preserveSensitive".to_string());
        }
        Ok(section_preview)
    }

    async fn preview_control_plane(
        &self,
        raw_section: &Value,
    ) -> Result<SectionPreview, TransferError> {
        let mut section_preview = blank_preview(SECTION_CONTROL_PLANE);
        let Ok(imported) = serde_json::from_value::<ControlPlaneSshConfig>(raw_section.clone())
        else {
            return Ok(invalid_preview(SECTION_CONTROL_PLANE, "unreadable control plane payload"));
        };

        let current_value = serde_json::to_value(self.live_control_plane().await?)
            .map_err(ClusterError::Serialization)?;
        section_preview.changes =
            diff_flat(&current_value, raw_section, &["password", "privateKey"]);

        if is_redacted(&imported.password) || is_redacted(&imported.private_key) {
            section_preview
                .warnings
                .push("ssh secrets are masked; apply with preserveSensitive".to_string());
        }
        Ok(section_preview)
    }

    async fn preview_resources(&self, raw_section: &Value) -> Result<SectionPreview, TransferError> {
        let mut section_preview = blank_preview(SECTION_RESOURCES);
        let Ok(imported) = serde_json::from_value::<Vec<ResourceDefinition>>(raw_section.clone())
        else {
            return Ok(invalid_preview(SECTION_RESOURCES, "unreadable resources payload"));
        };
        if imported.iter().any(|definition| definition.divisor <= 0.0) {
            return Ok(invalid_preview(SECTION_RESOURCES, "divisor must be positive"));
        }

        let live = self.live_resources().await?;
        section_preview.list_changes =
            diff_keyed(&live, &imported, |definition| definition.name.clone());
        Ok(section_preview)
    }

    async fn preview_scripts(&self, raw_section: &Value) -> Result<SectionPreview, TransferError> {
        let mut section_preview = blank_preview(SECTION_INIT_SCRIPTS);
        let Ok(imported) = serde_json::from_value::<Vec<ScriptGroup>>(raw_section.clone()) else {
            return Ok(invalid_preview(SECTION_INIT_SCRIPTS, "unreadable scripts payload"));
        };

        let live = self.live_scripts().await?;
        section_preview.list_changes = diff_keyed(&live, &imported, |group| group.id.clone());
        Ok(section_preview)
    }

    // --- APPLY ---

    /**
     * Aplica las secciones elegidas del sobre sobre los blobs vivos.
     *
     * # Logic:
     * Cada sección elegida reemplaza su blob. Con 'preserve_sensitive',
     * los valores censurados de alerts/controlPlane se rehidratan desde
     * el entorno vivo por (canal, clave) o por campo.
     */
    #[instrument(skip(self, envelope, chosen_sections))]
    pub async fn apply(
        &self,
        envelope: &ExportEnvelope,
        chosen_sections: &[String],
        preserve_sensitive: bool,
    ) -> Result<ApplyOutcome, TransferError> {
        let mut outcome = ApplyOutcome {
            message: String::new(),
            applied: Vec::new(),
            skipped: Vec::new(),
            warnings: Vec::new(),
        };

        if envelope.version != EXPORT_VERSION {
            outcome.message = "envelope rejected".to_string();
            outcome.skipped = chosen_sections.to_vec();
            outcome.warnings.push(format!(
                "unsupported envelope version {} (expected {})",
                envelope.version, EXPORT_VERSION
            ));
            return Ok(outcome);
        }

        let chosen: BTreeSet<&str> = chosen_sections.iter().map(String::as_str).collect();
        for section in chosen {
            let Some(raw_section) = envelope.sections.get(section) else {
                outcome.skipped.push(section.to_string());
                outcome
                    .warnings
                    .push(format!("section {} not present in envelope", section));
                continue;
            };

            let section_verdict = self
                .apply_section(section, raw_section, preserve_sensitive)
                .await;
            match section_verdict {
                Ok(()) => outcome.applied.push(section.to_string()),
                Err(section_fault) => {
                    warn!(
                        "📦 [TRANSFER_APPLY]: Section [{}] skipped: {}",
                        section, section_fault
                    );
                    outcome.skipped.push(section.to_string());
                    outcome.warnings.push(format!("{}: {}", section, section_fault));
                }
            }
        }

        outcome.message = format!(
            "{} applied, {} skipped",
            outcome.applied.len(),
            outcome.skipped.len()
        );
        info!("📦 [TRANSFER_APPLY]: {}", outcome.message);
        Ok(outcome)
    }

    async fn apply_section(
        &self,
        section: &str,
        raw_section: &Value,
        preserve_sensitive: bool,
    ) -> Result<(), TransferError> {
        match section {
            SECTION_BILLING => {
                let imported = parse_section::<BillingConfig>(section, raw_section)?;
                imported
                    .validate()
                    .map_err(|violation| TransferError::InvalidEnvelope(violation.to_string()))?;
                self.vault
                    .write_document(names::BILLING_CONFIG, names::SINGLETON_KEY, &imported)
                    .await?;
            }
            SECTION_ALERTS => {
                let mut imported = parse_section::<AlertConfig>(section, raw_section)?;
                if preserve_sensitive {
                    let live = self.live_alerts().await?;
                    for channel in &mut imported.channels {
                        let live_channel =
                            live.channels.iter().find(|candidate| candidate.id == channel.id);
                        for (config_key, config_value) in channel.config.iter_mut() {
                            let should_restore = is_sensitive_channel_key(config_key)
                                && is_redacted(config_value);
                            if should_restore {
                                if let Some(live_value) = live_channel
                                    .and_then(|candidate| candidate.config.get(config_key))
                                {
                                    *config_value = live_value.clone();
                                }
                            }
                        }
                    }
                }
                self.vault
                    .write_document(names::ALERT_CONFIG, names::SINGLETON_KEY, &imported)
                    .await?;
            }
            SECTION_CONTROL_PLANE => {
                let mut imported = parse_section::<ControlPlaneSshConfig>(section, raw_section)?;
                if preserve_sensitive {
                    let live = self.live_control_plane().await?;
                    if is_redacted(&imported.password) {
                        imported.password = live.password;
                    }
                    if is_redacted(&imported.private_key) {
                        imported.private_key = live.private_key;
                    }
                }
                self.vault
                    .write_document(names::CONTROL_PLANE_CONFIG, names::SINGLETON_KEY, &imported)
                    .await?;
            }
            SECTION_RESOURCES => {
                let imported = parse_section::<Vec<ResourceDefinition>>(section, raw_section)?;
                self.vault
                    .write_document(names::RESOURCE_CONFIG, RESOURCES_KEY, &imported)
                    .await?;
            }
            SECTION_INIT_SCRIPTS => {
                let imported = parse_section::<Vec<ScriptGroup>>(section, raw_section)?;
                self.vault
                    .write_document(names::INIT_SCRIPTS, GROUPS_KEY, &imported)
                    .await?;
            }
            unknown => {
                return Err(TransferError::InvalidEnvelope(format!(
                    "unknown section {}",
                    unknown
                )));
            }
        }
        Ok(())
    }
}

// --- AUXILIARES PUROS ---

fn blank_preview(section: &str) -> SectionPreview {
    SectionPreview {
        section: section.to_string(),
        valid: true,
        changes: Vec::new(),
        list_changes: Vec::new(),
        warnings: Vec::new(),
    }
}

fn invalid_preview(section: &str, detail: &str) -> SectionPreview {
    SectionPreview {
        section: section.to_string(),
        valid: false,
        changes: Vec::new(),
        list_changes: Vec::new(),
        warnings: vec![detail.to_string()],
    }
}

fn parse_section<T: serde::de::DeserializeOwned>(
    section: &str,
    raw_section: &Value,
) -> Result<T, TransferError> {
    serde_json::from_value::<T>(raw_section.clone())
        .map_err(|fault| TransferError::InvalidEnvelope(format!("{} payload: {}", section, fault)))
}

/// Diff campo a campo de dos objetos JSON planos.
fn diff_flat(current: &Value, imported: &Value, excluded_fields: &[&str]) -> Vec<FieldChange> {
    let blank = serde_json::Map::new();
    let current_object = current.as_object().unwrap_or(&blank);
    let imported_object = imported.as_object().unwrap_or(&blank);

    let mut field_names: BTreeSet<&String> = current_object.keys().collect();
    field_names.extend(imported_object.keys());

    field_names
        .into_iter()
        .filter(|field| !excluded_fields.contains(&field.as_str()))
        .filter_map(|field| {
            let current_field = current_object.get(field).cloned().unwrap_or(Value::Null);
            let imported_field = imported_object.get(field).cloned().unwrap_or(Value::Null);
            (current_field != imported_field).then(|| FieldChange {
                field: field.clone(),
                current: current_field,
                imported: imported_field,
            })
        })
        .collect()
}

/// Resumen añadir/modificar/retirar de una sección de lista.
fn diff_keyed<T: serde::Serialize, K: Fn(&T) -> String>(
    current_items: &[T],
    imported_items: &[T],
    key_of: K,
) -> Vec<ListChange> {
    let current_index: BTreeMap<String, Value> = current_items
        .iter()
        .map(|item| (key_of(item), serde_json::to_value(item).unwrap_or(Value::Null)))
        .collect();
    let imported_index: BTreeMap<String, Value> = imported_items
        .iter()
        .map(|item| (key_of(item), serde_json::to_value(item).unwrap_or(Value::Null)))
        .collect();

    let mut list_changes = Vec::new();
    for (key, imported_value) in &imported_index {
        match current_index.get(key) {
            None => list_changes.push(ListChange {
                kind: ListChangeKind::Added,
                key: key.clone(),
            }),
            Some(current_value) if current_value != imported_value => {
                list_changes.push(ListChange {
                    kind: ListChangeKind::Modified,
                    key: key.clone(),
                });
            }
            Some(_) => {}
        }
    }
    for key in current_index.keys() {
        if !imported_index.contains_key(key) {
            list_changes.push(ListChange {
                kind: ListChangeKind::Removed,
                key: key.clone(),
            });
        }
    }
    list_changes
}

/// Censura in-place de la sección exportada.
fn redact_section(section: &str, section_value: &mut Value) {
    match section {
        SECTION_ALERTS => {
            let Some(channels) = section_value
                .get_mut("channels")
                .and_then(Value::as_array_mut)
            else {
                return;
            };
            for channel in channels {
                let Some(config) = channel.get_mut("config").and_then(Value::as_object_mut) else {
                    continue;
                };
                for (config_key, config_value) in config.iter_mut() {
                    if !is_sensitive_channel_key(config_key) {
                        continue;
                    }
                    if let Some(raw_value) = config_value.as_str() {
                        if !raw_value.is_empty() {
                            *config_value = Value::from(mask_value(raw_value));
                        }
                    }
                }
            }
        }
        SECTION_CONTROL_PLANE => {
            let Some(config_object) = section_value.as_object_mut() else {
                return;
            };
            for secret_field in ["password", "privateKey"] {
                if let Some(secret_value) = config_object.get_mut(secret_field) {
                    if secret_value.as_str().map_or(false, |raw| !raw.is_empty()) {
                        *secret_value =
                            Value::from(bison_domain_models::REDACTED_SENTINEL.to_string());
                    }
                }
            }
        }
        _ => {}
    }
}
