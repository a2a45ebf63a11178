// [libs/domain/tenancy/src/projects.rs]
/*!
 * =================================================================
 * APARATO: PROJECT LIFECYCLE SERVICE (V2.3 - GOLD MASTER)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PROYECCIÓN NAMESPACE + MIEMBROS + ROLE BINDINGS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE OWNER LAW: Todo namespace gestionado porta exactamente un
 *    equipo en su etiqueta de tenant.
 * 2. BINDING MATERIALIZATION: Cada miembro se materializa como un
 *    binding nominal hacia el cluster role predefinido de su rol; el
 *    borrado del namespace delega la recolección al controlador.
 * =================================================================
 */

use crate::errors::TenancyError;
use bison_domain_models::{Project, ProjectMember, Team};
use bison_infra_cluster::api::{
    ANNOTATION_DESCRIPTION, ANNOTATION_DISPLAY_NAME, ANNOTATION_MEMBERS, LABEL_MANAGED,
    LABEL_PROJECT, LABEL_TENANT,
};
use bison_infra_cluster::{ClusterControlApi, ClusterError, NamespaceObject, RoleBindingSpec};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct ProjectService {
    cluster_uplink: Arc<dyn ClusterControlApi>,
}

impl ProjectService {
    pub fn new(cluster_uplink: Arc<dyn ClusterControlApi>) -> Self {
        Self { cluster_uplink }
    }

    fn binding_name(project_name: &str, member_user: &str) -> String {
        format!("bison-{}-{}", project_name, member_user)
    }

    fn validate_members(members: &[ProjectMember]) -> Result<(), TenancyError> {
        let mut seen_users = BTreeSet::new();
        for member in members {
            if !seen_users.insert(member.user.as_str()) {
                return Err(TenancyError::DuplicateMember(member.user.clone()));
            }
        }
        Ok(())
    }

    // --- CICLO DE VIDA ---

    #[instrument(skip(self, project), fields(project_name = %project.name))]
    pub async fn create(&self, project: &Project) -> Result<(), TenancyError> {
        if !Team::is_valid_name(&project.name) {
            return Err(TenancyError::InvalidName(project.name.clone()));
        }
        Self::validate_members(&project.members)?;

        // El equipo padre debe existir como tenant.
        if self.cluster_uplink.get_tenant(&project.team).await?.is_none() {
            return Err(TenancyError::NotFound);
        }

        let namespace_projection = Self::project_to_namespace(project)?;
        match self.cluster_uplink.create_namespace(namespace_projection).await {
            Ok(()) => {}
            Err(ClusterError::Conflict) => return Err(TenancyError::Conflict),
            Err(uplink_fault) => return Err(uplink_fault.into()),
        }

        self.reconcile_bindings(&project.name, &[], &project.members).await?;
        info!(
            "📁 [PROJECT_CREATE]: Namespace [{}] sealed under team [{}].",
            project.name, project.team
        );
        Ok(())
    }

    pub async fn get(&self, project_name: &str) -> Result<Project, TenancyError> {
        let namespace = self
            .cluster_uplink
            .get_namespace(project_name)
            .await?
            .ok_or(TenancyError::NotFound)?;

        // Solo los namespaces gestionados son proyectos.
        if namespace.labels.get(LABEL_MANAGED).map(String::as_str) != Some("true") {
            return Err(TenancyError::NotFound);
        }
        Ok(Self::namespace_to_project(&namespace))
    }

    /// Proyectos del cluster, opcionalmente filtrados por equipo.
    pub async fn list(&self, team_filter: Option<&str>) -> Result<Vec<Project>, TenancyError> {
        let mut selector = BTreeMap::new();
        selector.insert(LABEL_MANAGED.to_string(), "true".to_string());
        if let Some(team_name) = team_filter {
            selector.insert(LABEL_TENANT.to_string(), team_name.to_string());
        }

        Ok(self
            .cluster_uplink
            .list_namespaces(&selector)
            .await?
            .iter()
            .map(Self::namespace_to_project)
            .collect())
    }

    /// Mapa namespace -> equipo para la atribución de costos.
    pub async fn namespace_team_index(&self) -> Result<BTreeMap<String, String>, TenancyError> {
        Ok(self
            .list(None)
            .await?
            .into_iter()
            .map(|project| (project.name.clone(), project.team))
            .collect())
    }

    #[instrument(skip(self, members))]
    pub async fn update_members(
        &self,
        project_name: &str,
        members: &[ProjectMember],
    ) -> Result<(), TenancyError> {
        Self::validate_members(members)?;

        let mut namespace = self
            .cluster_uplink
            .get_namespace(project_name)
            .await?
            .ok_or(TenancyError::NotFound)?;

        let previous_members: Vec<ProjectMember> = namespace
            .annotations
            .get(ANNOTATION_MEMBERS)
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();

        namespace
            .annotations
            .insert(ANNOTATION_MEMBERS.to_string(), serde_json::to_string(members)?);
        self.cluster_uplink.update_namespace(namespace).await?;

        self.reconcile_bindings(project_name, &previous_members, members).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, project_name: &str) -> Result<(), TenancyError> {
        // El controlador del cluster recolecta los bindings del namespace.
        match self.cluster_uplink.delete_namespace(project_name).await {
            Ok(()) => {
                info!("📁 [PROJECT_DELETE]: Namespace [{}] evicted.", project_name);
                Ok(())
            }
            Err(ClusterError::NotFound) => Err(TenancyError::NotFound),
            Err(uplink_fault) => Err(uplink_fault.into()),
        }
    }

    // --- PROYECCIÓN ---

    fn project_to_namespace(project: &Project) -> Result<NamespaceObject, TenancyError> {
        let mut labels = BTreeMap::new();
        labels.insert(LABEL_MANAGED.to_string(), "true".to_string());
        labels.insert(LABEL_PROJECT.to_string(), project.name.clone());
        labels.insert(LABEL_TENANT.to_string(), project.team.clone());

        let mut annotations = BTreeMap::new();
        annotations.insert(ANNOTATION_DISPLAY_NAME.to_string(), project.display_name.clone());
        annotations.insert(ANNOTATION_DESCRIPTION.to_string(), project.description.clone());
        annotations.insert(ANNOTATION_MEMBERS.to_string(), serde_json::to_string(&project.members)?);

        Ok(NamespaceObject {
            name: project.name.clone(),
            labels,
            annotations,
        })
    }

    fn namespace_to_project(namespace: &NamespaceObject) -> Project {
        let annotation = |key: &str| namespace.annotations.get(key).cloned().unwrap_or_default();
        let members: Vec<ProjectMember> = namespace
            .annotations
            .get(ANNOTATION_MEMBERS)
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();

        Project {
            name: namespace.name.clone(),
            team: namespace.labels.get(LABEL_TENANT).cloned().unwrap_or_default(),
            display_name: annotation(ANNOTATION_DISPLAY_NAME),
            description: annotation(ANNOTATION_DESCRIPTION),
            members,
        }
    }

    /// Reconciliación nominal: purga bindings salientes, sella entrantes.
    async fn reconcile_bindings(
        &self,
        project_name: &str,
        previous_members: &[ProjectMember],
        desired_members: &[ProjectMember],
    ) -> Result<(), TenancyError> {
        let desired_users: BTreeSet<&str> =
            desired_members.iter().map(|member| member.user.as_str()).collect();

        for departed in previous_members
            .iter()
            .filter(|member| !desired_users.contains(member.user.as_str()))
        {
            let stale_binding = Self::binding_name(project_name, &departed.user);
            match self
                .cluster_uplink
                .delete_role_binding(project_name, &stale_binding)
                .await
            {
                // Ya recolectado; nada que purgar.
                Ok(()) | Err(ClusterError::NotFound) => {}
                Err(uplink_fault) => return Err(uplink_fault.into()),
            }
        }

        for member in desired_members {
            self.cluster_uplink
                .upsert_role_binding(RoleBindingSpec {
                    name: Self::binding_name(project_name, &member.user),
                    namespace: project_name.to_string(),
                    subject_kind: "User".to_string(),
                    subject_name: member.user.clone(),
                    role_name: member.role.cluster_role_name().to_string(),
                })
                .await?;
        }
        Ok(())
    }
}
