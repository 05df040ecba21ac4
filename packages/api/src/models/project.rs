use serde::{Deserialize, Serialize};

use super::Entity;

status_enum! {
    /// Lifecycle of a project or one of its modules.
    pub enum ProjectStatus default Planning {
        Planning => "Planning",
        InProgress => "In Progress",
        OnHold => "On Hold",
        Completed => "Completed",
    }
}

/// A client project with its delivery modules.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(alias = "_id", deserialize_with = "crate::de::id")]
    pub id: String,
    #[serde(deserialize_with = "crate::de::opt_text")]
    pub client_id: Option<String>,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub project_name: String,
    #[serde(deserialize_with = "crate::de::number")]
    pub project_value: f64,
    #[serde(deserialize_with = "crate::de::number")]
    pub amount_paid: f64,
    pub initial_payment_date: Option<String>,
    pub second_due_date: Option<String>,
    pub location: String,
    pub description: String,
    pub status: ProjectStatus,
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "crate::de::number")]
    pub progress: f64,
    pub modules: Vec<ProjectModule>,
}

impl Project {
    pub fn balance_due(&self) -> f64 {
        (self.project_value - self.amount_paid).max(0.0)
    }

    pub fn module(&self, module_id: &str) -> Option<&ProjectModule> {
        self.modules.iter().find(|m| m.id == module_id)
    }
}

impl Entity for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A milestone inside a project timeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectModule {
    #[serde(alias = "_id", deserialize_with = "crate::de::id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    #[serde(deserialize_with = "crate::de::number")]
    pub progress: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Entity for ProjectModule {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /admin/projects`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub client_id: String,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub project_name: String,
    pub project_value: String,
    pub amount_paid: String,
    pub initial_payment_date: String,
    pub second_due_date: String,
    pub location: String,
    pub description: String,
    pub status: ProjectStatus,
    pub thumbnail: String,
    pub modules: Vec<NewModule>,
}

/// A module created together with its project.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewModule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub progress: u8,
    pub start_date: String,
    pub end_date: String,
}

/// Body of `PUT /admin/projects/:id/modules/:module_id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleUpdate {
    pub status: ProjectStatus,
    pub progress: u8,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_decodes_sparse_row() {
        let project: Project = serde_json::from_str(
            r#"{
                "_id": "p1",
                "projectName": "Storefront",
                "projectValue": "4500",
                "amountPaid": 1500,
                "status": "In Progress",
                "modules": [{"id": 1, "name": "Design", "status": "Completed", "progress": 100}]
            }"#,
        )
        .unwrap();
        assert_eq!(project.id, "p1");
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.balance_due(), 3000.0);
        assert_eq!(project.modules[0].id, "1");
        assert_eq!(project.module("1").map(|m| m.progress), Some(100.0));
        assert!(project.client_id.is_none());
    }

    #[test]
    fn test_unknown_status_kept() {
        let status: ProjectStatus = serde_json::from_str(r#""Archived""#).unwrap();
        assert_eq!(status, ProjectStatus::Other("Archived".into()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""Archived""#);
    }

    #[test]
    fn test_module_update_wire_shape() {
        let body = ModuleUpdate {
            status: ProjectStatus::OnHold,
            progress: 40,
            description: "Waiting on assets".into(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"status": "On Hold", "progress": 40, "description": "Waiting on assets"})
        );
    }
}
