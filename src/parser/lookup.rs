//! Read-only lookup tables consulted by the markup parser.
//!
//! Both tables are plain values: they are built (or loaded) per load and
//! handed to the parser, never shared between loads.

use chrono::NaiveDate;
use std::collections::HashMap;

/// Brand assigned to models missing from the [`ModelBrandTable`].
pub const UNKNOWN_BRAND: &str = "Unknown";

/// Maps a model name to the brand that makes it.
#[derive(Debug, Clone)]
pub struct ModelBrandTable {
    brands: HashMap<String, String>,
}

impl ModelBrandTable {
    /// Creates an empty table.
    pub fn empty() -> Self {
        ModelBrandTable {
            brands: HashMap::new(),
        }
    }

    pub fn insert(&mut self, model: impl Into<String>, brand: impl Into<String>) {
        self.brands.insert(model.into(), brand.into());
    }

    /// Brand for `model`, or [`UNKNOWN_BRAND`].
    pub fn brand_for(&self, model: &str) -> &str {
        self.brands
            .get(model)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_BRAND)
    }
}

impl Default for ModelBrandTable {
    fn default() -> Self {
        let mut table = ModelBrandTable::empty();
        for (model, brand) in [
            ("RAV4", "Toyota"),
            ("Civic", "Honda"),
            ("F-150", "Ford"),
            ("Model X", "Tesla"),
            ("X5", "BMW"),
            ("A4", "Audi"),
            ("Silverado", "Chevrolet"),
            ("C-Class", "Mercedes-Benz"),
            ("Altima", "Nissan"),
            ("Sonata", "Hyundai"),
        ] {
            table.insert(model, brand);
        }
        table
    }
}

/// Release date per brand, loaded from the brand/date file.
#[derive(Debug, Clone, Default)]
pub struct BrandDates {
    dates: HashMap<String, NaiveDate>,
}

impl BrandDates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a date for `brand`, replacing any earlier entry.
    pub fn insert(&mut self, brand: impl Into<String>, date: NaiveDate) {
        self.dates.insert(brand.into(), date);
    }

    pub fn get(&self, brand: &str) -> Option<NaiveDate> {
        self.dates.get(brand).copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
