// crates/products-contract/src/generator.rs
// ============================================================================
// Module: Payload Generator
// Description: Randomized and boundary-value product payloads and IDs.
// Purpose: Produce request inputs for equivalence and boundary scenarios.
// Dependencies: rand, serde_json, crate::{fixtures, model}
// ============================================================================

//! ## Overview
//! [`ProductGenerator`] owns an injected random source. Seed it with
//! [`ProductGenerator::seeded`] for reproducible runs, or use
//! [`ProductGenerator::from_entropy`] for the default unseeded behavior where
//! every run sends different titles, prices and categories.
//!
//! Well-formed payloads come back as [`ProductPayload`]; shapes the type
//! system cannot express (missing fields, wrong types) come back as JSON.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;
use rand::SeedableRng;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use serde_json::Value;
use serde_json::json;

use crate::fixtures::BOUNDARY_IDS;
use crate::fixtures::CATEGORIES;
use crate::fixtures::DEFAULT_IMAGE;
use crate::fixtures::INVALID_ID_RANGE;
use crate::fixtures::MIN_PRICE;
use crate::fixtures::PRICE_CEILING;
use crate::fixtures::PRICE_FLOOR;
use crate::fixtures::VALID_ID_RANGE;
use crate::model::PayloadField;
use crate::model::ProductPayload;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Length of the random suffix appended to titles and descriptions.
const SUFFIX_LEN: usize = 8;

/// Length of generated non-numeric IDs.
const NON_NUMERIC_ID_LEN: usize = 8;

/// Alphabet for non-numeric IDs.
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

// ============================================================================
// SECTION: Overrides
// ============================================================================

/// Field overrides applied on top of a generated payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadOverrides {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement price.
    pub price: Option<f64>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement image URI.
    pub image: Option<String>,
    /// Replacement category.
    pub category: Option<String>,
}

impl PayloadOverrides {
    /// Overrides only the price.
    #[must_use]
    pub fn price(price: f64) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }

    /// Overrides only the title.
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Overrides only the category.
    #[must_use]
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }
}

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Product payload and ID generator over an injected random source.
#[derive(Debug, Clone)]
pub struct ProductGenerator<R = StdRng> {
    /// Random source driving every generated value.
    rng: R,
}

impl ProductGenerator<StdRng> {
    /// Creates a reproducible generator from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Creates an unseeded generator; successive runs differ.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ProductGenerator<R> {
    /// Wraps an existing random source.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
        }
    }

    /// Returns a title with a random alphanumeric suffix.
    pub fn title(&mut self) -> String {
        format!("Test Product {}", self.alphanumeric(SUFFIX_LEN))
    }

    /// Returns a description with a random alphanumeric suffix.
    pub fn description(&mut self) -> String {
        format!("Generated product description {}", self.alphanumeric(SUFFIX_LEN))
    }

    /// Returns a price in `[1, 999]` rounded to cents.
    pub fn price(&mut self) -> f64 {
        round_cents(self.rng.gen_range(PRICE_FLOOR ..= PRICE_CEILING))
    }

    /// Returns one of the known categories, chosen uniformly.
    pub fn category(&mut self) -> &'static str {
        CATEGORIES[self.rng.gen_range(0 .. CATEGORIES.len())]
    }

    /// Returns a fully populated, valid payload.
    pub fn payload(&mut self) -> ProductPayload {
        ProductPayload {
            title: self.title(),
            price: self.price(),
            description: self.description(),
            image: DEFAULT_IMAGE.to_string(),
            category: self.category().to_string(),
        }
    }

    /// Returns a valid payload with the given fields replaced.
    pub fn payload_with(&mut self, overrides: PayloadOverrides) -> ProductPayload {
        let mut payload = self.payload();
        if let Some(title) = overrides.title {
            payload.title = title;
        }
        if let Some(price) = overrides.price {
            payload.price = price;
        }
        if let Some(description) = overrides.description {
            payload.description = description;
        }
        if let Some(image) = overrides.image {
            payload.image = image;
        }
        if let Some(category) = overrides.category {
            payload.category = category;
        }
        payload
    }

    /// Payload priced at the smallest positive price (`0.01`).
    pub fn min_price(&mut self) -> ProductPayload {
        self.payload_with(PayloadOverrides::price(MIN_PRICE))
    }

    /// Payload priced at exactly zero.
    pub fn zero_price(&mut self) -> ProductPayload {
        self.payload_with(PayloadOverrides::price(0.0))
    }

    /// Payload with a negative price.
    pub fn negative_price(&mut self) -> ProductPayload {
        let price = -self.price();
        self.payload_with(PayloadOverrides::price(price))
    }

    /// Payload whose title and description are `len` characters long.
    pub fn oversized_strings(&mut self, len: usize) -> ProductPayload {
        let title = self.alphanumeric(len);
        let description = self.alphanumeric(len);
        self.payload_with(PayloadOverrides {
            title: Some(title),
            description: Some(description),
            ..PayloadOverrides::default()
        })
    }

    /// Payload whose title, description and category are empty.
    pub fn empty_strings(&mut self) -> ProductPayload {
        self.payload_with(PayloadOverrides {
            title: Some(String::new()),
            description: Some(String::new()),
            category: Some(String::new()),
            ..PayloadOverrides::default()
        })
    }

    /// Payload JSON with one field deleted.
    pub fn missing_field(&mut self, field: PayloadField) -> Value {
        self.payload().without(field)
    }

    /// Payload JSON where every field carries the wrong JSON type.
    pub fn wrong_types(&mut self) -> Value {
        json!({
            "title": self.rng.gen_range(10_000_u32 .. 99_999),
            "price": format!("{}", self.price()),
            "description": true,
            "image": self.rng.gen_range(1_u32 .. 100),
            "category": [self.category()],
        })
    }

    /// Returns an ID drawn uniformly from the seeded catalogue.
    pub fn valid_id(&mut self) -> u64 {
        self.rng.gen_range(VALID_ID_RANGE)
    }

    /// Returns the first and last catalogue IDs.
    #[must_use]
    pub const fn boundary_ids(&self) -> [u64; 2] {
        BOUNDARY_IDS
    }

    /// Returns an ID drawn uniformly from `[1000, 9999]`.
    pub fn invalid_id(&mut self) -> u64 {
        self.rng.gen_range(INVALID_ID_RANGE)
    }

    /// Returns a lowercase alphabetic ID that never parses as a number.
    pub fn non_numeric_id(&mut self) -> String {
        (0 .. NON_NUMERIC_ID_LEN)
            .map(|_| char::from(LETTERS[self.rng.gen_range(0 .. LETTERS.len())]))
            .collect()
    }

    /// Returns a random alphanumeric string of the given length.
    pub fn alphanumeric(&mut self, len: usize) -> String {
        (0 .. len).map(|_| char::from(self.rng.sample(Alphanumeric))).collect()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Rounds a price to two decimal places.
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
