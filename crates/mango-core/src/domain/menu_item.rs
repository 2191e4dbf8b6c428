// ============================================================================
// Mango Core - Menu Item Entity
// File: crates/mango-core/src/domain/menu_item.rs
// Description: Catalog entry and its validated mutable fields
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::DomainError;

/// Menu item as stored in the relational store.
///
/// `image` holds the asset reference (e.g. `/Images/<uuid>.jpg`); an empty
/// string means the item has no image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub special_tag: String,
    pub category: String,
    pub price: f64,
    pub image: String,
}

/// Mutable fields supplied by a create or update request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemFields {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    pub description: String,

    #[serde(default)]
    pub special_tag: String,

    pub category: String,

    #[validate(custom(function = "validate_price"))]
    pub price: f64,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name_required").with_message("Name is required.".into()));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::new("price_range")
            .with_message("Price must be a non-negative number.".into()));
    }
    Ok(())
}

impl MenuItemFields {
    /// Validate and normalize (trim) the fields.
    pub fn checked(self) -> Result<Self, DomainError> {
        self.validate()?;
        Ok(Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            special_tag: self.special_tag.trim().to_string(),
            category: self.category.trim().to_string(),
            price: self.price,
        })
    }
}

impl MenuItem {
    /// Build an unsaved record; the store assigns `id` on insert.
    pub fn new(fields: MenuItemFields, image: String) -> Self {
        Self {
            id: 0,
            name: fields.name,
            description: fields.description,
            special_tag: fields.special_tag,
            category: fields.category,
            price: fields.price,
            image,
        }
    }

    pub fn apply(&mut self, fields: MenuItemFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.special_tag = fields.special_tag;
        self.category = fields.category;
        self.price = fields.price;
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, price: f64) -> MenuItemFields {
        MenuItemFields {
            name: name.to_string(),
            description: "Hot".to_string(),
            special_tag: String::new(),
            category: "Beverage".to_string(),
            price,
        }
    }

    #[test]
    fn test_valid_fields_are_trimmed() {
        let checked = fields("  Tea ", 2.5).checked().unwrap();
        assert_eq!(checked.name, "Tea");
        assert_eq!(checked.price, 2.5);
    }

    #[test]
    fn test_zero_price_allowed() {
        assert!(fields("Water", 0.0).checked().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = fields("Tea", -1.0).checked().unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation(vec!["Price must be a non-negative number.".to_string()])
        );
    }

    #[test]
    fn test_price_validator_bounds() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(12.75).is_ok());
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_nan_price_rejected() {
        assert!(fields("Tea", f64::NAN).checked().is_err());
    }

    #[test]
    fn test_blank_name_and_bad_price_report_both() {
        match fields("   ", -3.0).checked() {
            Err(DomainError::Validation(messages)) => assert_eq!(messages.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_keeps_id_and_image() {
        let mut item = MenuItem::new(fields("Tea", 2.5), "/Images/a.png".to_string());
        item.id = 7;
        item.apply(fields("Chai", 3.0));
        assert_eq!(item.id, 7);
        assert_eq!(item.name, "Chai");
        assert_eq!(item.image, "/Images/a.png");
        assert!(item.has_image());
    }

    #[test]
    fn test_serializes_camel_case() {
        let item = MenuItem::new(fields("Tea", 2.5), String::new());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["specialTag"], "");
        assert_eq!(json["image"], "");
        assert!(!item.has_image());
    }
}
