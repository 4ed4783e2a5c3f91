//! Filter stage.
//!
//! Callers pick a [`FilterKind`] and pass the raw text inputs once to
//! [`FilterMode::from_inputs`]; the resulting [`FilterMode`] is then applied
//! with [`filter_cars`].

use crate::car::Car;
use crate::error::{PipelineError, Result};
use crate::price::Price;
use chrono::NaiveDate;
use std::str::FromStr;

/// Date pattern accepted for the minimum release date.
pub const FILTER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Which filter the caller selected, before its inputs are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    #[default]
    None,
    Brand,
    BrandAndPrice,
    BrandAndReleaseDate,
}

/// A decoded, ready-to-apply filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Keep everything.
    #[default]
    None,

    /// Keep cars of this brand (case-insensitive).
    ByBrand(String),

    /// Keep cars of this brand priced at or above `min_price` in any currency.
    ByBrandAndMinPrice { brand: String, min_price: Price },

    /// Keep cars of this brand released on or after `min_date`.
    ByBrandAndMinReleaseDate { brand: String, min_date: NaiveDate },
}

impl FilterMode {
    /// Decodes the raw inputs for `kind`.
    ///
    /// Field usage follows the input form:
    ///
    /// | kind                  | `value`       | `brand` | `date`        |
    /// |-----------------------|---------------|---------|---------------|
    /// | `Brand`               | brand         | –       | –             |
    /// | `BrandAndPrice`       | minimum price | brand   | –             |
    /// | `BrandAndReleaseDate` | brand         | –       | `yyyy-MM-dd`  |
    ///
    /// An empty required input yields [`FilterMode::None`]. A price or date
    /// that is present but does not parse is an `InvalidFilterInput` error.
    pub fn from_inputs(kind: FilterKind, value: &str, brand: &str, date: &str) -> Result<Self> {
        let value = value.trim();
        let brand = brand.trim();
        let date = date.trim();

        match kind {
            FilterKind::None => Ok(FilterMode::None),
            FilterKind::Brand => {
                if value.is_empty() {
                    return Ok(FilterMode::None);
                }
                Ok(FilterMode::ByBrand(value.to_string()))
            }
            FilterKind::BrandAndPrice => {
                if value.is_empty() || brand.is_empty() {
                    return Ok(FilterMode::None);
                }
                let min_price =
                    Price::from_str(value).map_err(|_| PipelineError::InvalidFilterInput {
                        field: "price",
                        message: format!("Invalid price format: {:?}", value),
                    })?;
                Ok(FilterMode::ByBrandAndMinPrice {
                    brand: brand.to_string(),
                    min_price,
                })
            }
            FilterKind::BrandAndReleaseDate => {
                if value.is_empty() || date.is_empty() {
                    return Ok(FilterMode::None);
                }
                let min_date = NaiveDate::parse_from_str(date, FILTER_DATE_FORMAT).map_err(|_| {
                    PipelineError::InvalidFilterInput {
                        field: "releaseDate",
                        message: format!("Invalid date format {:?}. Use yyyy-MM-dd", date),
                    }
                })?;
                Ok(FilterMode::ByBrandAndMinReleaseDate {
                    brand: value.to_string(),
                    min_date,
                })
            }
        }
    }

    /// Returns `true` if `car` passes this filter.
    pub fn matches(&self, car: &Car) -> bool {
        match self {
            FilterMode::None => true,
            FilterMode::ByBrand(brand) => brand.trim().is_empty() || car.matches_brand(brand),
            FilterMode::ByBrandAndMinPrice { brand, min_price } => {
                brand.trim().is_empty()
                    || (car.matches_brand(brand) && car.prices().values().any(|p| p >= min_price))
            }
            FilterMode::ByBrandAndMinReleaseDate { brand, min_date } => {
                brand.trim().is_empty()
                    || (car.matches_brand(brand) && car.release_date() >= *min_date)
            }
        }
    }
}

/// Returns the cars that pass `mode`, in their original order.
pub fn filter_cars(cars: &[Car], mode: &FilterMode) -> Vec<Car> {
    cars.iter().filter(|car| mode.matches(car)).cloned().collect()
}
