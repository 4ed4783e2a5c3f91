//! Canonical car record and its multi-currency price map.

use crate::error::RecordError;
use crate::price::Price;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Currency code → amount.
pub type PriceMap = BTreeMap<String, Price>;

/// A vehicle record.
///
/// # Invariants
///
/// - `brand` is never empty
/// - `prices` is never empty and holds no negative amounts
/// - `preferred_currency` is always a key of `prices`
///
/// Fields are private so the invariants can only be established through the
/// `from_*` constructors and kept by [`Car::set_preferred_currency`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    brand: String,
    model: String,
    category: String,
    prices: PriceMap,
    preferred_currency: String,
    release_date: NaiveDate,
}

impl Car {
    /// Creates a car priced in one currency, with no model.
    ///
    /// This is the shape produced by the canonical five-field and split-date
    /// tabular layouts.
    pub fn from_single_currency(
        brand: impl Into<String>,
        category: impl Into<String>,
        price: Price,
        currency: impl Into<String>,
        release_date: NaiveDate,
    ) -> Result<Self, RecordError> {
        let currency = currency.into();
        let mut prices = PriceMap::new();
        prices.insert(currency.clone(), price);
        Self::from_price_map_with_date(brand, "", category, prices, currency, release_date)
    }

    /// Creates a car from a price map, dated at `processing_date`.
    pub fn from_price_map(
        brand: impl Into<String>,
        model: impl Into<String>,
        category: impl Into<String>,
        prices: PriceMap,
        preferred_currency: impl Into<String>,
        processing_date: NaiveDate,
    ) -> Result<Self, RecordError> {
        Self::from_price_map_with_date(
            brand,
            model,
            category,
            prices,
            preferred_currency,
            processing_date,
        )
    }

    /// Creates a car from a price map with an explicit release date.
    pub fn from_price_map_with_date(
        brand: impl Into<String>,
        model: impl Into<String>,
        category: impl Into<String>,
        prices: PriceMap,
        preferred_currency: impl Into<String>,
        release_date: NaiveDate,
    ) -> Result<Self, RecordError> {
        let brand = brand.into();
        let preferred_currency = preferred_currency.into();

        if brand.trim().is_empty() {
            return Err(RecordError::EmptyBrand);
        }
        if prices.is_empty() {
            return Err(RecordError::NoPrices);
        }
        for (currency, amount) in &prices {
            if currency.trim().is_empty() {
                return Err(RecordError::EmptyCurrency);
            }
            if amount.is_negative() {
                return Err(RecordError::NegativePrice {
                    currency: currency.clone(),
                });
            }
        }
        if !prices.contains_key(&preferred_currency) {
            return Err(RecordError::UnknownPreferredCurrency(preferred_currency));
        }

        Ok(Car {
            brand,
            model: model.into(),
            category: category.into(),
            prices,
            preferred_currency,
            release_date,
        })
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Vehicle classification, e.g. "SUV", "Sedan" or "Truck".
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn prices(&self) -> &PriceMap {
        &self.prices
    }

    pub fn preferred_currency(&self) -> &str {
        &self.preferred_currency
    }

    pub fn release_date(&self) -> NaiveDate {
        self.release_date
    }

    /// Switches the preferred currency.
    ///
    /// Returns `false` and leaves the car unchanged if there is no price in
    /// `currency`.
    pub fn set_preferred_currency(&mut self, currency: &str) -> bool {
        if !self.prices.contains_key(currency) {
            return false;
        }
        self.preferred_currency = currency.to_string();
        true
    }

    /// Amount in the given currency, if priced in it.
    pub fn price_in(&self, currency: &str) -> Option<Price> {
        self.prices.get(currency).copied()
    }

    /// Amount in the preferred currency.
    pub fn preferred_price(&self) -> Price {
        // The invariant guarantees the key exists; zero keeps rendering total.
        self.price_in(&self.preferred_currency).unwrap_or(Price::ZERO)
    }

    /// Largest amount across all currencies.
    pub fn max_price(&self) -> Price {
        self.prices.values().copied().max().unwrap_or(Price::ZERO)
    }

    /// Case-insensitive brand comparison.
    pub fn matches_brand(&self, brand: &str) -> bool {
        self.brand.to_lowercase() == brand.trim().to_lowercase()
    }
}
