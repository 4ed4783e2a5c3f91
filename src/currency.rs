//! Category-driven currency normalization.
//!
//! SUVs are shown in EUR, sedans in JPY and trucks in USD, then the
//! collection is grouped in that category order.

use crate::car::Car;
use log::debug;

/// Display currency for a category, if it has one.
pub fn preferred_currency_for(category: &str) -> Option<&'static str> {
    match category.to_lowercase().as_str() {
        "suv" => Some("EUR"),
        "sedan" => Some("JPY"),
        "truck" => Some("USD"),
        _ => None,
    }
}

/// Position of a category in the normalized ordering: SUV, Sedan, Truck, rest.
pub fn category_rank(category: &str) -> u8 {
    match category.to_lowercase().as_str() {
        "suv" => 1,
        "sedan" => 2,
        "truck" => 3,
        _ => 4,
    }
}

/// Reassigns each car's preferred currency by category, then stably reorders
/// the cars by [`category_rank`].
///
/// A car without a price in its category's currency keeps its current
/// preferred currency. Applying this twice is the same as applying it once.
pub fn normalize_currency(cars: &mut [Car]) {
    for car in cars.iter_mut() {
        if let Some(currency) = preferred_currency_for(car.category()) {
            if !car.set_preferred_currency(currency) {
                debug!(
                    "{} {} has no {} price, keeping {}",
                    car.brand(),
                    car.model(),
                    currency,
                    car.preferred_currency()
                );
            }
        }
    }

    cars.sort_by_key(|car| category_rank(car.category()));
}
