//! Product records and their variant axes.
//!
//! Products serialize in camelCase to match the shape the storefront
//! clients expect. The remote database stores rows in snake_case with a
//! differently named best-seller column; that translation lives at the
//! storage boundary, not here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named color variant with its display hue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub name: String,
    pub hex: String,
}

/// Physical dimensions as display strings (e.g. "17.8cm").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: String,
    pub height: String,
    pub depth: String,
}

/// A catalog product.
///
/// Identifiers are unique within the catalog. Stock and price are
/// non-negative by construction (`u32` / a non-negative `Decimal` from the
/// seed or the remote table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub is_best_seller: bool,
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<ColorOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

/// A merchandising category shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub image: String,
    pub color: String,
    pub tagline: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn minimal_product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Test Headphones".to_string(),
            description: "A test product".to_string(),
            price: Decimal::from(199),
            category: "earphones".to_string(),
            image: "https://example.com/p1.jpg".to_string(),
            is_best_seller: false,
            stock: 5,
            colors: None,
            sizes: None,
            weight: None,
            dimensions: None,
            material: None,
            features: None,
            shape: None,
        }
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product {
            is_best_seller: true,
            ..minimal_product()
        };
        let json = serde_json::to_value(&product).expect("serialize");
        assert_eq!(json["isBestSeller"], true);
        assert!(json.get("is_best_seller").is_none());
        // Absent optional axes are omitted entirely
        assert!(json.get("colors").is_none());
    }

    #[test]
    fn test_product_round_trips_optional_fields() {
        let product = Product {
            colors: Some(vec![ColorOption {
                name: "Matte Black".to_string(),
                hex: "#1a1a1a".to_string(),
            }]),
            sizes: Some(vec!["One Size".to_string()]),
            dimensions: Some(Dimensions {
                width: "17.8cm".to_string(),
                height: "18.5cm".to_string(),
                depth: "7.6cm".to_string(),
            }),
            ..minimal_product()
        };
        let json = serde_json::to_string(&product).expect("serialize");
        let back: Product = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, product);
    }

    #[test]
    fn test_product_deserializes_without_flag() {
        // Rows that never set the merchandising flag default to false
        let json = r#"{
            "id": "x", "name": "n", "description": "d", "price": "10",
            "category": "laptops", "image": "i", "stock": 1
        }"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert!(!product.is_best_seller);
    }
}
