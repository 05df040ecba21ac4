use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Option name to price, in whole rupees.
pub type PriceTable = BTreeMap<String, i64>;

/// The price sheet behind the public quote calculator.
///
/// Categories this client does not edit are carried in `other` so a save
/// writes them back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotePricing {
    #[serde(deserialize_with = "price_table")]
    pub base_prices: PriceTable,
    #[serde(deserialize_with = "price_table")]
    pub platform: PriceTable,
    #[serde(deserialize_with = "price_table")]
    pub payment_gateway: PriceTable,
    #[serde(deserialize_with = "price_table")]
    pub web_type: PriceTable,
    #[serde(deserialize_with = "price_table")]
    pub seo: PriceTable,
    #[serde(deserialize_with = "price_table")]
    pub business_type: PriceTable,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PricingCategory {
    BasePrices,
    Platform,
    PaymentGateway,
    WebType,
    Seo,
    BusinessType,
}

impl PricingCategory {
    pub const ALL: [PricingCategory; 6] = [
        PricingCategory::BasePrices,
        PricingCategory::Platform,
        PricingCategory::PaymentGateway,
        PricingCategory::WebType,
        PricingCategory::Seo,
        PricingCategory::BusinessType,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PricingCategory::BasePrices => "Base Prices (Project Type)",
            PricingCategory::Platform => "Platform Add-ons",
            PricingCategory::PaymentGateway => "Payment Gateway",
            PricingCategory::WebType => "Website Type",
            PricingCategory::Seo => "SEO Add-on",
            PricingCategory::BusinessType => "Business App Types",
        }
    }
}

impl QuotePricing {
    pub fn table(&self, category: PricingCategory) -> &PriceTable {
        match category {
            PricingCategory::BasePrices => &self.base_prices,
            PricingCategory::Platform => &self.platform,
            PricingCategory::PaymentGateway => &self.payment_gateway,
            PricingCategory::WebType => &self.web_type,
            PricingCategory::Seo => &self.seo,
            PricingCategory::BusinessType => &self.business_type,
        }
    }

    fn table_mut(&mut self, category: PricingCategory) -> &mut PriceTable {
        match category {
            PricingCategory::BasePrices => &mut self.base_prices,
            PricingCategory::Platform => &mut self.platform,
            PricingCategory::PaymentGateway => &mut self.payment_gateway,
            PricingCategory::WebType => &mut self.web_type,
            PricingCategory::Seo => &mut self.seo,
            PricingCategory::BusinessType => &mut self.business_type,
        }
    }

    /// Set one price from raw input text. Text that does not start with a
    /// number stores 0.
    pub fn set_price(&mut self, category: PricingCategory, key: &str, raw: &str) {
        self.table_mut(category)
            .insert(key.to_string(), parse_price(raw));
    }
}

/// Leading integer of `raw` (optional sign, then digits), or 0.
pub fn parse_price(raw: &str) -> i64 {
    let raw = raw.trim();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// Prices may arrive as integers, floats or numeric strings.
fn price_table<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PriceTable, D::Error> {
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .map(|(key, value)| {
            let price = match value {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                    .unwrap_or_default(),
                Value::String(s) => parse_price(&s),
                _ => 0,
            };
            (key, price)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_price_like_input_box() {
        assert_eq!(parse_price("2500"), 2500);
        assert_eq!(parse_price(" 12abc"), 12);
        assert_eq!(parse_price("-40"), -40);
        assert_eq!(parse_price("abc"), 0);
        assert_eq!(parse_price(""), 0);
    }

    #[test]
    fn test_set_price_non_numeric_is_zero() {
        let mut pricing = QuotePricing::default();
        pricing.set_price(PricingCategory::Seo, "Basic", "4999");
        assert_eq!(pricing.table(PricingCategory::Seo)["Basic"], 4999);
        pricing.set_price(PricingCategory::Seo, "Basic", "lots");
        assert_eq!(pricing.seo["Basic"], 0);
    }

    #[test]
    fn test_unknown_categories_survive_round_trip() {
        let pricing: QuotePricing = serde_json::from_value(json!({
            "basePrices": {"Website": 15000, "App": "30000"},
            "seo": {"Advanced": 7999.0},
            "maintenance": {"Yearly": 5000}
        }))
        .unwrap();
        assert_eq!(pricing.base_prices["App"], 30000);
        assert_eq!(pricing.seo["Advanced"], 7999);
        assert!(pricing.platform.is_empty());

        let back = serde_json::to_value(&pricing).unwrap();
        assert_eq!(back["maintenance"], json!({"Yearly": 5000}));
        assert_eq!(back["basePrices"]["Website"], json!(15000));
    }
}
