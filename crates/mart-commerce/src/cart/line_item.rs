//! Cart line items.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// One entry in the cart.
///
/// Display fields are a snapshot taken when the product was first added and
/// are never refreshed by later adds of the same product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time, in the product's listed currency.
    pub unit_price: f64,
    /// Representative image, may be empty.
    #[serde(default)]
    pub image_url: String,
    /// Category label at add time.
    #[serde(default)]
    pub category: String,
    /// Supplier's given and family name.
    #[serde(default)]
    pub supplier_display_name: String,
    /// Units requested. Always at least 1 inside a cart.
    pub quantity: u32,
    /// Chosen attribute values, e.g. `size -> L`.
    #[serde(default)]
    pub selected_attributes: BTreeMap<String, String>,
}

impl CartLineItem {
    /// Create a line with the required fields; the rest start empty.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            image_url: String::new(),
            category: String::new(),
            supplier_display_name: String::new(),
            quantity,
            selected_attributes: BTreeMap::new(),
        }
    }

    /// Set the image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Set the category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the supplier display name.
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier_display_name = supplier.into();
        self
    }

    /// Record a chosen attribute value.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.selected_attributes.insert(name.into(), value.into());
        self
    }

    /// Check the preconditions for adding this line to a cart.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.product_id.is_blank() {
            return Err(CommerceError::ValidationError(
                "product id must not be empty".to_string(),
            ));
        }
        if self.quantity == 0 {
            return Err(CommerceError::InvalidQuantity(self.quantity));
        }
        if !self.unit_price.is_finite() {
            return Err(CommerceError::ValidationError(format!(
                "unit price for {} is not a finite number",
                self.product_id
            )));
        }
        Ok(())
    }

    /// Unit price rounded to cents, or `None` if it isn't a usable amount.
    pub fn unit_money(&self) -> Option<Money> {
        Money::from_decimal(self.unit_price)
    }

    /// Line total: unit price times quantity, computed in cents.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_money()?.try_multiply(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_wire_field_names() {
        let item = CartLineItem::new("p1", "Widget", 9.99, 2)
            .with_image("https://cdn.example/p1.jpg")
            .with_category("Tools")
            .with_supplier("Ada Lovelace")
            .with_attribute("size", "L");

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["productId"], "p1");
        assert_eq!(json["unitPrice"], 9.99);
        assert_eq!(json["imageUrl"], "https://cdn.example/p1.jpg");
        assert_eq!(json["supplierDisplayName"], "Ada Lovelace");
        assert_eq!(json["selectedAttributes"]["size"], "L");
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn test_optional_fields_default() {
        let item: CartLineItem = serde_json::from_str(
            r#"{"productId":"p1","name":"Widget","unitPrice":1.5,"quantity":1}"#,
        )
        .unwrap();
        assert!(item.image_url.is_empty());
        assert!(item.selected_attributes.is_empty());
    }

    #[test]
    fn test_validate() {
        assert!(CartLineItem::new("p1", "Widget", 1.0, 1).validate().is_ok());
        assert!(matches!(
            CartLineItem::new("", "Widget", 1.0, 1).validate(),
            Err(CommerceError::ValidationError(_))
        ));
        assert!(matches!(
            CartLineItem::new("p1", "Widget", 1.0, 0).validate(),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(CartLineItem::new("p1", "Widget", f64::NAN, 1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_line_total() {
        let item = CartLineItem::new("p1", "Widget", 2.5, 4);
        assert_eq!(item.line_total(), Some(Money::new(1000)));

        let item = CartLineItem::new("p1", "Widget", 0.1, 3);
        assert_eq!(item.line_total(), Some(Money::new(30)));

        assert!(CartLineItem::new("p1", "Widget", f64::NAN, 1)
            .line_total()
            .is_none());
    }
}
