// [libs/domain/onboarding/src/catalog.rs]
/*!
 * =================================================================
 * APARATO: INIT SCRIPT CATALOG SERVICE (V3.0 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: CRUD DE GRUPOS, ORDEN, SELECCIÓN POR PLATAFORMA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PRIORITY LADDER: exacto > OS con arch comodín > OS comodín con
 *    arch exacta > doble comodín. Las clases son disjuntas, por lo que
 *    no existen empates.
 * 2. LITERAL SUBSTITUTION: El reemplazo de ${KEY} es literal y jamás
 *    evolucionará a un lenguaje de plantillas; corre sobre entrada de
 *    administradores del cluster.
 * 3. BUILT-IN SHIELD: Los grupos de fábrica aceptan edición y apagado
 *    pero rechazan el borrado.
 * =================================================================
 */

use crate::errors::OnboardError;
use bison_domain_models::{InitScript, NodePlatform, ScriptGroup, ScriptPhase, PLATFORM_WILDCARD};
use bison_infra_cluster::{names, BlobVault};
use std::collections::BTreeMap;
use tracing::{info, instrument};
use uuid::Uuid;

/// Clave del catálogo dentro de su blob.
const GROUPS_KEY: &str = "groups";

#[derive(Clone)]
pub struct ScriptCatalog {
    vault: BlobVault,
}

impl ScriptCatalog {
    pub fn new(vault: BlobVault) -> Self {
        Self { vault }
    }

    // --- LECTURA ---

    /// Grupos del catálogo ordenados por posición.
    pub async fn list(&self) -> Result<Vec<ScriptGroup>, OnboardError> {
        let mut groups = self
            .vault
            .read_document::<Vec<ScriptGroup>>(names::INIT_SCRIPTS, GROUPS_KEY)
            .await?
            .unwrap_or_default();
        groups.sort_by_key(|group| group.order);
        Ok(groups)
    }

    pub async fn get(&self, group_id: &str) -> Result<ScriptGroup, OnboardError> {
        self.list()
            .await?
            .into_iter()
            .find(|group| group.id == group_id)
            .ok_or(OnboardError::NotFound)
    }

    /// Grupos habilitados de una fase, en orden de ejecución.
    pub async fn enabled_for_phase(
        &self,
        phase: ScriptPhase,
    ) -> Result<Vec<ScriptGroup>, OnboardError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|group| group.enabled && group.phase == phase)
            .collect())
    }

    // --- ESCRITURA ---

    async fn persist(&self, groups: &[ScriptGroup]) -> Result<(), OnboardError> {
        self.vault
            .write_document(names::INIT_SCRIPTS, GROUPS_KEY, &groups)
            .await?;
        Ok(())
    }

    /// Alta de un grupo custom al final del catálogo.
    #[instrument(skip(self, group), fields(group_name = %group.name))]
    pub async fn create(&self, mut group: ScriptGroup) -> Result<ScriptGroup, OnboardError> {
        if group.name.trim().is_empty() {
            return Err(OnboardError::InvalidRequest("group name required".to_string()));
        }

        let mut groups = self.list().await?;
        group.id = Uuid::new_v4().to_string();
        group.built_in = false;
        group.order = groups.iter().map(|existing| existing.order).max().unwrap_or(-1) + 1;
        for script in &mut group.scripts {
            if script.id.is_empty() {
                script.id = Uuid::new_v4().to_string();
            }
        }

        groups.push(group.clone());
        self.persist(&groups).await?;
        info!("📜 [SCRIPT_CATALOG]: Group [{}] appended at order {}.", group.name, group.order);
        Ok(group)
    }

    /// Edición in-place; la clase built-in y la posición se preservan.
    #[instrument(skip(self, group))]
    pub async fn update(&self, group: ScriptGroup) -> Result<ScriptGroup, OnboardError> {
        let mut groups = self.list().await?;
        let stored = groups
            .iter_mut()
            .find(|candidate| candidate.id == group.id)
            .ok_or(OnboardError::NotFound)?;

        let mut updated = group;
        updated.built_in = stored.built_in;
        updated.order = stored.order;
        for script in &mut updated.scripts {
            if script.id.is_empty() {
                script.id = Uuid::new_v4().to_string();
            }
        }
        *stored = updated.clone();

        self.persist(&groups).await?;
        Ok(updated)
    }

    /// Borrado; los grupos de fábrica están protegidos.
    #[instrument(skip(self))]
    pub async fn delete(&self, group_id: &str) -> Result<(), OnboardError> {
        let mut groups = self.list().await?;
        let target = groups
            .iter()
            .find(|group| group.id == group_id)
            .ok_or(OnboardError::NotFound)?;
        if target.built_in {
            return Err(OnboardError::BuiltInProtected);
        }

        groups.retain(|group| group.id != group_id);
        self.persist(&groups).await
    }

    pub async fn toggle(&self, group_id: &str, enabled: bool) -> Result<(), OnboardError> {
        let mut groups = self.list().await?;
        let target = groups
            .iter_mut()
            .find(|group| group.id == group_id)
            .ok_or(OnboardError::NotFound)?;
        target.enabled = enabled;
        self.persist(&groups).await
    }

    /**
     * Reemplaza el orden completo según la secuencia de ids del llamador.
     *
     * # Logic:
     * Los ids listados toman posiciones 0..n; los grupos no mencionados
     * conservan su orden relativo a continuación.
     */
    #[instrument(skip(self, ordered_ids))]
    pub async fn reorder(&self, ordered_ids: &[String]) -> Result<(), OnboardError> {
        let mut groups = self.list().await?;

        let position_index: BTreeMap<&str, i32> = ordered_ids
            .iter()
            .enumerate()
            .map(|(position, group_id)| (group_id.as_str(), position as i32))
            .collect();

        let listed_count = ordered_ids.len() as i32;
        let mut trailing_position = listed_count;
        for group in &mut groups {
            match position_index.get(group.id.as_str()) {
                Some(assigned_position) => group.order = *assigned_position,
                None => {
                    group.order = trailing_position;
                    trailing_position += 1;
                }
            }
        }

        self.persist(&groups).await
    }

    // --- SELECCIÓN POR PLATAFORMA ---

    /**
     * Mejor script del grupo para la plataforma, por prioridad
     * descendente de especificidad. None si ninguna clase aplica.
     */
    pub fn match_script<'group>(
        group: &'group ScriptGroup,
        platform: &NodePlatform,
    ) -> Option<&'group InitScript> {
        let find_class = |os_selector: &str, arch_selector: &str| {
            group
                .scripts
                .iter()
                .find(|script| script.os == os_selector && script.arch == arch_selector)
        };

        find_class(&platform.os, &platform.arch)
            .or_else(|| find_class(&platform.os, PLATFORM_WILDCARD))
            .or_else(|| find_class(PLATFORM_WILDCARD, &platform.arch))
            .or_else(|| find_class(PLATFORM_WILDCARD, PLATFORM_WILDCARD))
    }

    /// Reemplazo literal de tokens ${KEY} con el mapa del llamador.
    pub fn substitute_variables(content: &str, variables: &BTreeMap<String, String>) -> String {
        let mut rendered = content.to_string();
        for (variable_key, variable_value) in variables {
            rendered = rendered.replace(&format!("${{{}}}", variable_key), variable_value);
        }
        rendered
    }

    // --- SEMBRADO DE FÁBRICA ---

    /// Siembra los grupos de fábrica en la primera ignición.
    pub async fn seed_builtins(&self) -> Result<(), OnboardError> {
        if self
            .vault
            .read_document::<Vec<ScriptGroup>>(names::INIT_SCRIPTS, GROUPS_KEY)
            .await?
            .is_some()
        {
            return Ok(());
        }

        let factory_groups = builtin_groups();
        self.persist(&factory_groups).await?;
        info!("📜 [SCRIPT_CATALOG]: {} factory groups seeded.", factory_groups.len());
        Ok(())
    }
}

/// Grupos de fábrica del aprovisionamiento estándar.
fn builtin_groups() -> Vec<ScriptGroup> {
    vec![
        ScriptGroup {
            id: "builtin-system-prep".to_string(),
            name: "system-prep".to_string(),
            description: "Swap off, kernel modules and sysctl for the runtime".to_string(),
            phase: ScriptPhase::PreJoin,
            enabled: true,
            order: 0,
            built_in: true,
            scripts: vec![InitScript {
                id: "builtin-system-prep-any".to_string(),
                os: PLATFORM_WILDCARD.to_string(),
                arch: PLATFORM_WILDCARD.to_string(),
                content: "#!/usr/bin/env bash\nset -euo pipefail\nswapoff -a\nsed -i '/ swap / s/^/#/' /etc/fstab\nmodprobe overlay\nmodprobe br_netfilter\ncat <<'EOF' >/etc/sysctl.d/99-bison.conf\nnet.bridge.bridge-nf-call-iptables = 1\nnet.ipv4.ip_forward = 1\nEOF\nsysctl --system\n".to_string(),
            }],
        },
        ScriptGroup {
            id: "builtin-container-runtime".to_string(),
            name: "container-runtime".to_string(),
            description: "Containerd provisioning per distribution".to_string(),
            phase: ScriptPhase::PreJoin,
            enabled: true,
            order: 1,
            built_in: true,
            scripts: vec![
                InitScript {
                    id: "builtin-runtime-ubuntu".to_string(),
                    os: "ubuntu".to_string(),
                    arch: PLATFORM_WILDCARD.to_string(),
                    content: "#!/usr/bin/env bash\nset -euo pipefail\napt-get update -q\napt-get install -y containerd\nmkdir -p /etc/containerd\ncontainerd config default >/etc/containerd/config.toml\nsystemctl enable --now containerd\n".to_string(),
                },
                InitScript {
                    id: "builtin-runtime-centos".to_string(),
                    os: "centos".to_string(),
                    arch: PLATFORM_WILDCARD.to_string(),
                    content: "#!/usr/bin/env bash\nset -euo pipefail\nyum install -y containerd\nmkdir -p /etc/containerd\ncontainerd config default >/etc/containerd/config.toml\nsystemctl enable --now containerd\n".to_string(),
                },
            ],
        },
        ScriptGroup {
            id: "builtin-node-labels".to_string(),
            name: "node-verify".to_string(),
            description: "Post-join kubelet health probe".to_string(),
            phase: ScriptPhase::PostJoin,
            enabled: true,
            order: 2,
            built_in: true,
            scripts: vec![InitScript {
                id: "builtin-node-verify-any".to_string(),
                os: PLATFORM_WILDCARD.to_string(),
                arch: PLATFORM_WILDCARD.to_string(),
                content: "#!/usr/bin/env bash\nset -euo pipefail\nsystemctl is-active kubelet\njournalctl -u kubelet --no-pager -n 20\n".to_string(),
            }],
        },
    ]
}
