//! Output formats for a car collection.
//!
//! Every format shows a car's preferred currency and its amount with two
//! decimals, and release dates as `yyyy-MM-dd`.

mod json;
mod table;
mod xml;

pub use json::format_json;
pub use table::{render_table, table_grid, Column, TABLE_COLUMNS};
pub use xml::format_xml;

use crate::car::Car;
use crate::error::Result;
use chrono::NaiveDate;

/// Date pattern shared by all output formats.
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Output format selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Xml,
    Json,
}

/// Renders `cars` in the requested format.
pub fn format_cars(cars: &[Car], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(cars)),
        OutputFormat::Xml => Ok(format_xml(cars)),
        OutputFormat::Json => format_json(cars),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(OUTPUT_DATE_FORMAT).to_string()
}
