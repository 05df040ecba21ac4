use serde::{Deserialize, Serialize};

use super::Entity;

status_enum! {
    pub enum AppointmentStatus default Pending {
        Pending => "Pending",
        Confirmed => "Confirmed",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

/// A consultation booked through the public site.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Appointment {
    #[serde(alias = "_id", deserialize_with = "crate::de::id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "crate::de::opt_text")]
    pub phone: Option<String>,
    pub date: String,
    pub time: String,
    pub purpose: String,
    pub status: AppointmentStatus,
}

impl Entity for Appointment {
    fn id(&self) -> &str {
        &self.id
    }
}
