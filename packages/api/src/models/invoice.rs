use serde::{Deserialize, Serialize};

use super::Entity;

status_enum! {
    pub enum InvoiceStatus default Pending {
        Paid => "Paid",
        Pending => "Pending",
        Overdue => "Overdue",
    }
}

/// An uploaded invoice document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    #[serde(alias = "_id", deserialize_with = "crate::de::id")]
    pub id: String,
    #[serde(deserialize_with = "crate::de::opt_text")]
    pub client_id: Option<String>,
    pub client_name: String,
    pub project: String,
    #[serde(deserialize_with = "crate::de::number")]
    pub amount: f64,
    pub status: InvoiceStatus,
    pub due_date: Option<String>,
    pub file_url: Option<String>,
    pub created_at: Option<String>,
}

impl Entity for Invoice {
    fn id(&self) -> &str {
        &self.id
    }
}

/// JSON metadata sent in the `invoiceData` field of an invoice upload.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceMeta {
    /// Display number, `INV-` plus four digits.
    pub id: String,
    /// Issue date as shown to the client, e.g. `Oct 19, 2026`.
    pub date: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub amount: String,
    pub status: InvoiceStatus,
    pub due_date: String,
    pub project: String,
}
