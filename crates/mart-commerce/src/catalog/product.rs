//! Product records as fetched by the product page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cart::CartLineItem;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// The supplier listing a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Supplier {
    /// Create a supplier from given and family name.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "Given Family", with surrounding blanks removed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// A product as returned by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Listed unit price.
    pub base_price: f64,
    /// Currency code of `base_price`.
    #[serde(default)]
    pub currency: String,
    /// Image URLs, first is the representative one.
    #[serde(default)]
    pub images: Vec<String>,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// Subcategory label.
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Supplier listing the product.
    #[serde(default)]
    pub supplier: Supplier,
    /// Offered values per attribute, e.g. `size -> [S, M, L]`.
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,
    /// Minimum order quantity, if the supplier sets one.
    #[serde(default)]
    pub min_order_quantity: Option<u32>,
}

impl ProductRecord {
    /// Create a record with the required fields.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, base_price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_price,
            currency: String::new(),
            images: Vec::new(),
            category: String::new(),
            subcategory: None,
            supplier: Supplier::default(),
            attributes: BTreeMap::new(),
            min_order_quantity: None,
        }
    }

    /// The image shown first in the gallery, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Check chosen attribute values against the offered ones.
    ///
    /// Attributes the product doesn't declare are rejected, as are values
    /// outside the declared list.
    pub fn select_attributes<I, K, V>(
        &self,
        chosen: I,
    ) -> Result<BTreeMap<String, String>, CommerceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut selected = BTreeMap::new();
        for (name, value) in chosen {
            let (name, value) = (name.into(), value.into());
            let offered = self
                .attributes
                .get(&name)
                .is_some_and(|values| values.iter().any(|v| v == &value));
            if !offered {
                return Err(CommerceError::InvalidAttribute { name, value });
            }
            selected.insert(name, value);
        }
        Ok(selected)
    }

    /// Snapshot this product into a cart candidate.
    pub fn to_line_item(
        &self,
        quantity: u32,
        selected_attributes: BTreeMap<String, String>,
    ) -> CartLineItem {
        CartLineItem {
            product_id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.base_price,
            image_url: self.primary_image().unwrap_or_default().to_string(),
            category: self.category.clone(),
            supplier_display_name: self.supplier.display_name(),
            quantity,
            selected_attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> ProductRecord {
        let mut product = ProductRecord::new("p-shirt", "Work Shirt", 14.5);
        product.images = vec!["front.jpg".into(), "back.jpg".into()];
        product.category = "Apparel".into();
        product.supplier = Supplier::new("Grace", "Hopper");
        product
            .attributes
            .insert("size".into(), vec!["S".into(), "M".into(), "L".into()]);
        product
    }

    #[test]
    fn test_to_line_item_maps_fields() {
        let product = shirt();
        let attrs = product.select_attributes([("size", "M")]).unwrap();
        let item = product.to_line_item(3, attrs);

        assert_eq!(item.product_id.as_str(), "p-shirt");
        assert_eq!(item.name, "Work Shirt");
        assert_eq!(item.unit_price, 14.5);
        assert_eq!(item.image_url, "front.jpg");
        assert_eq!(item.category, "Apparel");
        assert_eq!(item.supplier_display_name, "Grace Hopper");
        assert_eq!(item.quantity, 3);
        assert_eq!(item.selected_attributes.get("size").map(String::as_str), Some("M"));
    }

    #[test]
    fn test_no_images_gives_empty_url() {
        let product = ProductRecord::new("p1", "Bare", 1.0);
        assert_eq!(product.to_line_item(1, BTreeMap::new()).image_url, "");
    }

    #[test]
    fn test_select_attributes_rejects_unknown() {
        let product = shirt();
        assert!(matches!(
            product.select_attributes([("size", "XXL")]),
            Err(CommerceError::InvalidAttribute { .. })
        ));
        assert!(product.select_attributes([("color", "red")]).is_err());
    }

    #[test]
    fn test_supplier_display_name_trims() {
        assert_eq!(Supplier::new("Grace", "").display_name(), "Grace");
        assert_eq!(Supplier::new(" ", " Hopper ").display_name(), "Hopper");
        assert_eq!(Supplier::default().display_name(), "");
    }

    #[test]
    fn test_deserialize_api_shape() {
        let json = r#"{
            "id": "p9",
            "name": "Pallet Jack",
            "basePrice": 399.0,
            "currency": "USD",
            "images": ["jack.png"],
            "category": "Warehouse",
            "supplier": {"firstName": "Linus", "lastName": "Torvalds"},
            "attributes": {"capacity": ["2t", "3t"]},
            "minOrderQuantity": 2
        }"#;
        let product: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(product.supplier.display_name(), "Linus Torvalds");
        assert_eq!(product.min_order_quantity, Some(2));
        assert!(product.subcategory.is_none());
    }
}
