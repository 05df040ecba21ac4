use serde::{Deserialize, Serialize};

use super::Entity;

status_enum! {
    pub enum TicketStatus default Active {
        Active => "Active",
        InProgress => "In Progress",
        Resolved => "Resolved",
        Closed => "Closed",
    }
}

status_enum! {
    pub enum TicketPriority default Medium {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Urgent => "Urgent",
    }
}

/// A support request raised by a client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticket {
    #[serde(alias = "_id", deserialize_with = "crate::de::id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "crate::de::opt_text")]
    pub phone: Option<String>,
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created_at: Option<String>,
}

impl Ticket {
    /// Case-insensitive match on subject, name or email.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty()
            || self.subject.to_lowercase().contains(&q)
            || self.name.to_lowercase().contains(&q)
            || self.email.to_lowercase().contains(&q)
    }
}

impl Entity for Ticket {
    fn id(&self) -> &str {
        &self.id
    }
}
