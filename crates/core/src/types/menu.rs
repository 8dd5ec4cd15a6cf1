//! Menu catalog records as served by the upstream menu endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};

use super::id::MenuItemId;
use super::price::Price;

/// One dish on the menu.
///
/// Read-only snapshot of the upstream record. `price` is rejected at decode
/// time when negative, so every `MenuItem` in memory has a valid unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "non_negative_amount")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl MenuItem {
    /// Unit price in the default currency.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::from_amount(self.price)
    }
}

fn non_negative_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(de::Error::custom(format!(
            "price must be non-negative, got {amount}"
        )));
    }
    Ok(amount)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_record() {
        let json = r#"{
            "id": "1",
            "name": "Pizza",
            "description": "Wood-fired margherita",
            "price": 9.5,
            "image": "/static/images/pizza.jpg",
            "category": "mains"
        }"#;

        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_str(), "1");
        assert_eq!(item.price, Decimal::new(95, 1));
        assert_eq!(item.unit_price().display(), "$9.50");
        assert_eq!(item.category.as_deref(), Some("mains"));
    }

    #[test]
    fn test_decode_without_optional_fields() {
        let json = r#"{"id": 3, "name": "Tiramisu", "price": 6}"#;

        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_str(), "3");
        assert!(item.description.is_empty());
        assert!(item.category.is_none());
    }

    #[test]
    fn test_decode_rejects_negative_price() {
        let json = r#"{"id": "x", "name": "Refund", "price": -1.0}"#;
        assert!(serde_json::from_str::<MenuItem>(json).is_err());
    }

    #[test]
    fn test_decode_price_as_string() {
        let json = r#"{"id": "4", "name": "Espresso", "price": "2.25"}"#;

        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.unit_price().display(), "$2.25");
    }
}
