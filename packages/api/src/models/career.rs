use serde::{Deserialize, Serialize};

use super::Entity;

status_enum! {
    pub enum JobType default FullTime {
        FullTime => "Full-time",
        PartTime => "Part-time",
        Contract => "Contract",
        Internship => "Internship",
    }
}

status_enum! {
    pub enum JobStatus default Active {
        Active => "Active",
        Draft => "Draft",
        Closed => "Closed",
    }
}

status_enum! {
    pub enum ApplicationStatus default New {
        New => "New",
        UnderReview => "Under Review",
        Interview => "Interview",
        Shortlisted => "Shortlisted",
        Rejected => "Rejected",
    }
}

/// A job opening under `/career/jobs`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    #[serde(alias = "_id", deserialize_with = "crate::de::id")]
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub status: JobStatus,
    pub description: String,
    pub requirements: Vec<String>,
}

impl Entity for Job {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /career/jobs` and `PUT /career/jobs/:id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct JobPayload {
    pub title: String,
    pub department: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub status: JobStatus,
    pub description: String,
    pub requirements: Vec<String>,
}

/// A candidate's application for an opening.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobApplication {
    #[serde(alias = "_id", deserialize_with = "crate::de::id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub position: String,
    #[serde(deserialize_with = "crate::de::opt_text")]
    pub experience: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: Option<String>,
    pub resume_url: Option<String>,
}

impl Entity for JobApplication {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_type_field_renamed() {
        let job: Job = serde_json::from_str(
            r#"{"id": "j1", "title": "Engineer", "type": "Contract", "requirements": []}"#,
        )
        .unwrap();
        assert_eq!(job.job_type, JobType::Contract);
        assert_eq!(job.status, JobStatus::Active);
        assert!(job.requirements.is_empty());

        let payload = JobPayload {
            title: job.title.clone(),
            job_type: JobType::PartTime,
            ..Default::default()
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "Part-time");
        assert_eq!(value["status"], "Active");
    }

    #[test]
    fn test_application_status_all() {
        let labels: Vec<&str> = ApplicationStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            labels,
            ["New", "Under Review", "Interview", "Shortlisted", "Rejected"]
        );
    }
}
