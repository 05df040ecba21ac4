use serde::{Deserialize, Serialize};

use super::Entity;

status_enum! {
    pub enum QuoteStatus default Pending {
        Pending => "Pending",
        Reviewed => "Reviewed",
        Accepted => "Accepted",
        Rejected => "Rejected",
    }
}

/// A price-quote request submitted through the public calculator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequest {
    #[serde(alias = "_id", deserialize_with = "crate::de::id")]
    pub id: String,
    pub client_name: String,
    pub client_email: String,
    #[serde(deserialize_with = "crate::de::opt_text")]
    pub client_phone: Option<String>,
    pub project_type: String,
    #[serde(deserialize_with = "crate::de::opt_text")]
    pub business_type: Option<String>,
    #[serde(deserialize_with = "crate::de::opt_text")]
    pub web_type: Option<String>,
    #[serde(deserialize_with = "crate::de::opt_text")]
    pub platform: Option<String>,
    #[serde(deserialize_with = "crate::de::opt_text")]
    pub seo: Option<String>,
    #[serde(deserialize_with = "crate::de::opt_text")]
    pub payment_gateway: Option<String>,
    pub calculated_quote: Option<QuoteTotals>,
    pub status: QuoteStatus,
    pub created_at: Option<String>,
}

impl QuoteRequest {
    /// Case-insensitive match on client name, client email or project type.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty()
            || self.client_name.to_lowercase().contains(&q)
            || self.client_email.to_lowercase().contains(&q)
            || self.project_type.to_lowercase().contains(&q)
    }

    pub fn total_price(&self) -> f64 {
        self.calculated_quote
            .as_ref()
            .map(|q| q.total_price)
            .unwrap_or_default()
    }
}

impl Entity for QuoteRequest {
    fn id(&self) -> &str {
        &self.id
    }
}

/// The calculator's output stored with the request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteTotals {
    #[serde(deserialize_with = "crate::de::number")]
    pub total_price: f64,
    pub breakdown: Vec<QuoteLineItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteLineItem {
    pub item: String,
    #[serde(deserialize_with = "crate::de::number")]
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_totals() {
        let req: QuoteRequest = serde_json::from_str(
            r#"{
                "id": 9,
                "clientName": "Dana",
                "seo": true,
                "calculatedQuote": {"totalPrice": 1250, "breakdown": [{"item": "Base", "price": "1000"}]}
            }"#,
        )
        .unwrap();
        assert_eq!(req.total_price(), 1250.0);
        assert_eq!(req.calculated_quote.unwrap().breakdown[0].price, 1000.0);
        assert_eq!(req.seo.as_deref(), Some("Yes"));
        assert_eq!(req.status, QuoteStatus::Pending);
    }

    #[test]
    fn test_matches_client_or_project_type() {
        let req = QuoteRequest {
            client_name: "Dana Scully".into(),
            client_email: "dana@fbi.gov".into(),
            project_type: "E-commerce".into(),
            ..Default::default()
        };
        assert!(req.matches(""));
        assert!(req.matches("scully"));
        assert!(req.matches("FBI.GOV"));
        assert!(req.matches("commerce"));
        assert!(!req.matches("portfolio"));
    }

    #[test]
    fn test_missing_quote_totals() {
        let req: QuoteRequest = serde_json::from_str(r#"{"id": "q1"}"#).unwrap();
        assert_eq!(req.total_price(), 0.0);
    }
}
