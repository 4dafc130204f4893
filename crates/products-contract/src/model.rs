// crates/products-contract/src/model.rs
// ============================================================================
// Module: Product Model
// Description: Typed product, rating, and creation payload shapes.
// Purpose: Give scenarios strongly typed views over server JSON.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The suite never owns a product: it only observes what the service returns.
//! These types exist so well-formed responses can be decoded and well-formed
//! payloads can be built without hand-written JSON. Malformed shapes stay as
//! [`serde_json::Value`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Product Types
// ============================================================================

/// Aggregate customer rating attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rate in `[0, 5]`.
    pub rate: f64,
    /// Number of ratings.
    pub count: u64,
}

/// Product as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned positive identifier.
    pub id: u64,
    /// Non-empty title.
    pub title: String,
    /// Non-negative price.
    pub price: f64,
    /// Free-form description.
    pub description: String,
    /// Image URI.
    pub image: String,
    /// Category name.
    pub category: String,
    /// Optional rating block (absent on freshly created products).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

/// Body submitted on POST and PUT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    /// Product title.
    pub title: String,
    /// Product price.
    pub price: f64,
    /// Product description.
    pub description: String,
    /// Image URI.
    pub image: String,
    /// Category name.
    pub category: String,
}

impl ProductPayload {
    /// Returns the payload as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// Returns the payload fields as a JSON map.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(PayloadField::Title.as_str().to_string(), Value::from(self.title.clone()));
        map.insert(PayloadField::Price.as_str().to_string(), Value::from(self.price));
        map.insert(
            PayloadField::Description.as_str().to_string(),
            Value::from(self.description.clone()),
        );
        map.insert(PayloadField::Image.as_str().to_string(), Value::from(self.image.clone()));
        map.insert(PayloadField::Category.as_str().to_string(), Value::from(self.category.clone()));
        map
    }

    /// Returns the payload as JSON with one field removed.
    #[must_use]
    pub fn without(&self, field: PayloadField) -> Value {
        let mut map = self.to_map();
        map.remove(field.as_str());
        Value::Object(map)
    }
}

impl From<&Product> for ProductPayload {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: product.price,
            description: product.description.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
        }
    }
}

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Fields a client submits when creating or updating a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadField {
    /// `title`
    Title,
    /// `price`
    Price,
    /// `description`
    Description,
    /// `image`
    Image,
    /// `category`
    Category,
}

impl PayloadField {
    /// Every payload field in wire order.
    pub const ALL: [Self; 5] =
        [Self::Title, Self::Price, Self::Description, Self::Image, Self::Category];

    /// Returns the JSON key for the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Price => "price",
            Self::Description => "description",
            Self::Image => "image",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for PayloadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
