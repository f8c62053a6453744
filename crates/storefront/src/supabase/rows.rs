//! Row shapes for the hosted database and their model conversions.
//!
//! The database names columns in snake_case and calls the merchandising
//! flag `is_best_seller`, while the in-memory model serializes it as
//! `isBestSeller`. Every read and write goes through these types so the
//! naming difference never leaks past this module.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use loop_core::order::{Order, OrderLine, OrderStatus, ShippingAddress};
use loop_core::product::{ColorOption, Dimensions, Product};

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub is_best_seller: bool,
    pub stock: u32,
    #[serde(default)]
    pub colors: Option<Vec<ColorOption>>,
    #[serde(default)]
    pub sizes: Option<Vec<String>>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub shape: Option<String>,
}

impl From<Product> for ProductRow {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            image: product.image,
            is_best_seller: product.is_best_seller,
            stock: product.stock,
            colors: product.colors,
            sizes: product.sizes,
            weight: product.weight,
            dimensions: product.dimensions,
            material: product.material,
            features: product.features,
            shape: product.shape,
        }
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            image: row.image,
            is_best_seller: row.is_best_seller,
            stock: row.stock,
            colors: row.colors,
            sizes: row.sizes,
            weight: row.weight,
            dimensions: row.dimensions,
            material: row.material,
            features: row.features,
            shape: row.shape,
        }
    }
}

/// Insert shape for the `orders` table. The database generates the row
/// identifier; the shipping address is stored as a JSON column.
#[derive(Debug, Clone, Serialize)]
pub struct OrderInsertRow {
    pub email: String,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
}

impl From<&Order> for OrderInsertRow {
    fn from(order: &Order) -> Self {
        Self {
            email: order.email.clone(),
            total_amount: order.total_amount,
            status: order.status,
            shipping_address: order.shipping_address.clone(),
        }
    }
}

/// The slice of a created order row we read back.
#[derive(Debug, Deserialize)]
pub struct OrderCreatedRow {
    pub id: String,
}

/// A row of the `order_items` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineRow {
    pub order_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub price_at_time: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
}

impl OrderLineRow {
    /// Attach an order line to its stored header.
    #[must_use]
    pub fn from_line(order_id: &str, line: &OrderLine) -> Self {
        Self {
            order_id: order_id.to_string(),
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            price_at_time: line.price_at_time,
            selected_color: line.selected_color.clone(),
            selected_size: line.selected_size.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Beats Solo Wireless".to_string(),
            description: "Headphones".to_string(),
            price: Decimal::from(199),
            category: "earphones".to_string(),
            image: "img".to_string(),
            is_best_seller: true,
            stock: 12,
            colors: Some(vec![ColorOption {
                name: "Matte Black".to_string(),
                hex: "#1a1a1a".to_string(),
            }]),
            sizes: Some(vec!["One Size".to_string()]),
            weight: Some("215g".to_string()),
            dimensions: None,
            material: None,
            features: None,
            shape: None,
        }
    }

    #[test]
    fn test_row_uses_snake_case_flag() {
        let row = ProductRow::from(sample_product());
        let json = serde_json::to_value(&row).expect("serialize");
        assert_eq!(json["is_best_seller"], true);
        assert!(json.get("isBestSeller").is_none());
    }

    #[test]
    fn test_model_uses_camel_case_flag() {
        let json = serde_json::to_value(sample_product()).expect("serialize");
        assert_eq!(json["isBestSeller"], true);
        assert!(json.get("is_best_seller").is_none());
    }

    #[test]
    fn test_translation_round_trips() {
        let product = sample_product();
        let row = ProductRow::from(product.clone());
        assert_eq!(Product::from(row), product);
    }

    #[test]
    fn test_row_deserializes_database_shape() {
        let json = r#"{
            "id": "7", "name": "PS5", "description": "console", "price": "449",
            "category": "consoles", "image": "img", "is_best_seller": true,
            "stock": 10, "colors": null, "sizes": null
        }"#;
        let row: ProductRow = serde_json::from_str(json).expect("deserialize");
        assert!(row.is_best_seller);
        assert_eq!(Product::from(row).stock, 10);
    }

    #[test]
    fn test_order_line_row_carries_variant() {
        let line = OrderLine {
            product_id: "p1".to_string(),
            quantity: 2,
            price_at_time: Decimal::from(199),
            selected_color: Some("Matte Black".to_string()),
            selected_size: None,
        };
        let row = OrderLineRow::from_line("order-9", &line);
        let json = serde_json::to_value(&row).expect("serialize");
        assert_eq!(json["order_id"], "order-9");
        assert_eq!(json["selected_color"], "Matte Black");
        assert!(json.get("selected_size").is_none());
    }
}
