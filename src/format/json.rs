//! JSON output.

use super::format_date;
use crate::car::Car;
use crate::error::Result;
use serde::Serialize;
use serde_json::value::RawValue;

#[derive(Serialize)]
struct CarsDocument<'a> {
    cars: Vec<CarEntry<'a>>,
}

/// Field order here is the output key order.
#[derive(Serialize)]
struct CarEntry<'a> {
    brand: &'a str,
    model: &'a str,
    #[serde(rename = "type")]
    category: &'a str,
    price: PriceEntry<'a>,
    #[serde(rename = "releaseDate")]
    release_date: String,
}

#[derive(Serialize)]
struct PriceEntry<'a> {
    /// Number with exactly two decimals, written verbatim.
    value: Box<RawValue>,
    currency: &'a str,
}

impl<'a> CarEntry<'a> {
    fn from_car(car: &'a Car) -> Result<Self> {
        Ok(CarEntry {
            brand: car.brand(),
            model: car.model(),
            category: car.category(),
            price: PriceEntry {
                value: RawValue::from_string(car.preferred_price().to_string())?,
                currency: car.preferred_currency(),
            },
            release_date: format_date(car.release_date()),
        })
    }
}

/// Renders `cars` as a pretty-printed `{"cars": [...]}` document with
/// two-space indentation and a trailing newline.
pub fn format_json(cars: &[Car]) -> Result<String> {
    let document = CarsDocument {
        cars: cars.iter().map(CarEntry::from_car).collect::<Result<_>>()?,
    };
    let mut json = serde_json::to_string_pretty(&document)?;
    json.push('\n');
    Ok(json)
}
