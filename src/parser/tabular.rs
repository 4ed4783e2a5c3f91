//! Tabular (delimiter-separated) decoders.
//!
//! Two car layouts are supported, both with a header row:
//!
//! ```text
//! split-date:  brand,type,price,year,day,month,currency
//!              Toyota,SUV,30000,2022,15,06,EUR
//! canonical:   brand,type,price,releaseDate,currency
//!              Toyota,SUV,30000,2022-06-15,EUR
//! ```
//!
//! The split-date layout stores the day before the month. That column order
//! is what existing files use and is preserved as-is.
//!
//! The brand/date file (`brand,MM/dd/yyyy`) feeds the markup parser's
//! [`BrandDates`] table.

use crate::car::Car;
use crate::error::{PipelineError, Result};
use crate::parser::lookup::BrandDates;
use crate::price::Price;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Date pattern of the canonical layout's release date column.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date pattern of the brand/date file.
pub const BRAND_DATE_FORMAT: &str = "%m/%d/%Y";

/// Column layout of a tabular car file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularLayout {
    /// Release date split into year, day and month columns.
    SplitDate,

    /// Release date in one `yyyy-MM-dd` column.
    Canonical,
}

impl TabularLayout {
    /// Rows with fewer fields than this are skipped.
    pub fn min_fields(&self) -> usize {
        match self {
            TabularLayout::SplitDate => 7,
            TabularLayout::Canonical => 5,
        }
    }
}

/// Decodes tabular car files into [`Car`]s.
#[derive(Debug, Clone, Copy)]
pub struct TabularParser {
    layout: TabularLayout,
    delimiter: u8,
}

impl TabularParser {
    pub fn new(layout: TabularLayout) -> Self {
        TabularParser {
            layout,
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parses every data row.
    ///
    /// Short rows are logged at warn level and skipped. Any other bad row
    /// aborts the whole parse; no partial result is returned.
    pub fn parse<R: Read>(&self, reader: R) -> Result<Vec<Car>> {
        let mut csv_reader = reader_builder(self.delimiter).from_reader(reader);
        let mut cars = Vec::new();

        for result in csv_reader.records() {
            let record = read_record(result)?;
            let line = line_of(&record);
            let fields = clean_fields(&record);

            if fields.len() < self.layout.min_fields() {
                warn!(
                    "Line {}: expected at least {} fields, found {}, skipping",
                    line,
                    self.layout.min_fields(),
                    fields.len()
                );
                continue;
            }

            let car = match self.layout {
                TabularLayout::SplitDate => SplitDateRow::from_fields(&fields).into_car(line)?,
                TabularLayout::Canonical => CanonicalRow::from_fields(&fields, line)?.into_car(line)?,
            };
            debug!(
                "Line {}: parsed {} {} at {} {}",
                line,
                car.brand(),
                car.category(),
                car.preferred_price(),
                car.preferred_currency()
            );
            cars.push(car);
        }

        info!("Parsed {} car(s) from {:?} tabular input", cars.len(), self.layout);
        Ok(cars)
    }

    /// Opens `path` and parses it.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<Car>> {
        let file = File::open(path.as_ref())?;
        self.parse(BufReader::new(file))
    }
}

/// Raw split-date row, fields already cleaned.
struct SplitDateRow<'a> {
    brand: &'a str,
    category: &'a str,
    price: &'a str,
    year: &'a str,
    day: &'a str,
    month: &'a str,
    currency: &'a str,
}

impl<'a> SplitDateRow<'a> {
    /// Caller guarantees at least seven fields.
    fn from_fields(fields: &'a [String]) -> Self {
        SplitDateRow {
            brand: &fields[0],
            category: &fields[1],
            price: &fields[2],
            year: &fields[3],
            day: &fields[4],
            month: &fields[5],
            currency: &fields[6],
        }
    }

    fn into_car(self, line: u64) -> Result<Car> {
        let price = parse_price(self.price, line)?;
        let year: i32 = parse_number(self.year, "year", line)?;
        let day: u32 = parse_number(self.day, "day", line)?;
        let month: u32 = parse_number(self.month, "month", line)?;

        let release_date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            PipelineError::malformed(
                line,
                format!("invalid date: year {}, month {}, day {}", year, month, day),
            )
        })?;

        Car::from_single_currency(self.brand, self.category, price, self.currency, release_date)
            .map_err(|e| PipelineError::malformed(line, e.to_string()))
    }
}

/// Raw canonical row, deserialized positionally.
#[derive(Debug, Deserialize)]
struct CanonicalRow {
    brand: String,
    category: String,
    price: Price,
    release_date: String,
    currency: String,
}

impl CanonicalRow {
    fn from_fields(fields: &[String], line: u64) -> Result<Self> {
        let record: StringRecord = fields.iter().take(5).collect();
        record
            .deserialize(None)
            .map_err(|e| PipelineError::malformed(line, format!("invalid row: {}", e)))
    }

    fn into_car(self, line: u64) -> Result<Car> {
        let release_date = NaiveDate::parse_from_str(&self.release_date, CANONICAL_DATE_FORMAT)
            .map_err(|e| {
                PipelineError::malformed(
                    line,
                    format!("invalid release date {:?}: {}", self.release_date, e),
                )
            })?;

        Car::from_single_currency(
            self.brand,
            self.category,
            self.price,
            self.currency,
            release_date,
        )
        .map_err(|e| PipelineError::malformed(line, e.to_string()))
    }
}

/// Parses a brand/date file into a fresh [`BrandDates`] table.
///
/// Rows with fewer than two fields are skipped; an unparseable date aborts.
pub fn parse_brand_dates<R: Read>(reader: R) -> Result<BrandDates> {
    let mut csv_reader = reader_builder(b',').from_reader(reader);
    let mut dates = BrandDates::new();

    for result in csv_reader.records() {
        let record = read_record(result)?;
        let line = line_of(&record);
        let fields = clean_fields(&record);

        if fields.len() < 2 {
            warn!("Line {}: brand/date row has {} field(s), skipping", line, fields.len());
            continue;
        }

        let date = NaiveDate::parse_from_str(&fields[1], BRAND_DATE_FORMAT).map_err(|e| {
            PipelineError::malformed(line, format!("invalid date {:?}: {}", fields[1], e))
        })?;
        dates.insert(fields[0].clone(), date);
    }

    info!("Loaded release dates for {} brand(s)", dates.len());
    Ok(dates)
}

/// Opens `path` and parses it as a brand/date file.
pub fn parse_brand_dates_file(path: impl AsRef<Path>) -> Result<BrandDates> {
    let file = File::open(path.as_ref())?;
    parse_brand_dates(BufReader::new(file))
}

/// Quotes are data here, not CSV quoting: they are stripped from each field.
fn reader_builder(delimiter: u8) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(delimiter)
        .quoting(false)
        .flexible(true)
        .has_headers(true)
        .trim(Trim::All);
    builder
}

/// Undecodable rows are malformed records; other reader failures pass through.
fn read_record(result: csv::Result<StringRecord>) -> Result<StringRecord> {
    result.map_err(|e| match e.kind() {
        csv::ErrorKind::Utf8 { pos, err } => PipelineError::malformed(
            pos.as_ref().map(|p| p.line()).unwrap_or(0),
            format!("invalid UTF-8 in field {}", err.field() + 1),
        ),
        _ => PipelineError::from(e),
    })
}

fn clean_fields(record: &StringRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| field.replace('"', "").trim().to_string())
        .collect()
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn parse_price(raw: &str, line: u64) -> Result<Price> {
    Price::from_str(raw)
        .map_err(|e| PipelineError::malformed(line, format!("invalid price {:?}: {}", raw, e)))
}

fn parse_number<T: FromStr>(raw: &str, field: &str, line: u64) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| PipelineError::malformed(line, format!("invalid {} {:?}: {}", field, raw, e)))
}
