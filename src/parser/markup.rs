//! Markup (XML) decoder.
//!
//! Every `car` element becomes one [`Car`]. Two element shapes are accepted
//! and may be mixed in one document:
//!
//! ```xml
//! <!-- vehicle file: brand comes from the model, date from BrandDates -->
//! <car>
//!   <type>SUV</type>
//!   <model>RAV4</model>
//!   <price currency="USD">25000.00</price>
//!   <prices>
//!     <price currency="EUR">23000.00</price>
//!     <price currency="JPY">2800000</price>
//!   </prices>
//! </car>
//!
//! <!-- canonical: explicit brand, currency and release date -->
//! <car>
//!   <brand>Toyota</brand>
//!   <type>SUV</type>
//!   <price>30000</price>
//!   <releaseDate>2022,15,06</releaseDate>
//!   <currency>EUR</currency>
//! </car>
//! ```
//!
//! The XML written by [`crate::format::format_xml`] is also readable here
//! (`brand` child, `currency` attribute, `yyyy-MM-dd` release date).

use crate::car::{Car, PriceMap};
use crate::error::{PipelineError, Result};
use crate::parser::lookup::{BrandDates, ModelBrandTable};
use crate::price::Price;
use chrono::{Local, NaiveDate};
use log::{debug, info};
use roxmltree::{Document, Node, ParsingOptions};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Release date pattern written by the XML formatter.
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Release date pattern of legacy canonical markup (year, day, month).
pub const LEGACY_RELEASE_DATE_FORMAT: &str = "%Y,%d,%m";

/// Decodes markup car documents.
///
/// Holds the lookup tables for one load; build a new parser per load.
#[derive(Debug, Clone)]
pub struct MarkupParser {
    models: ModelBrandTable,
    brand_dates: BrandDates,
    processing_date: NaiveDate,
}

impl MarkupParser {
    /// Creates a parser that dates unmatched brands with today's date.
    pub fn new(models: ModelBrandTable, brand_dates: BrandDates) -> Self {
        MarkupParser {
            models,
            brand_dates,
            processing_date: Local::now().date_naive(),
        }
    }

    /// Overrides the date used for brands with no known release date.
    pub fn with_processing_date(mut self, date: NaiveDate) -> Self {
        self.processing_date = date;
        self
    }

    /// Parses every `car` element in the document.
    ///
    /// A bad element aborts the whole parse; no partial result is returned.
    pub fn parse(&self, xml: &str) -> Result<Vec<Car>> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(xml, options)?;
        let mut cars = Vec::new();

        for node in doc.descendants().filter(|n| n.has_tag_name("car")) {
            let line = u64::from(doc.text_pos_at(node.range().start).row);
            let car = self.parse_car(node, line)?;
            debug!(
                "Line {}: parsed {} {} ({} price(s))",
                line,
                car.brand(),
                car.model(),
                car.prices().len()
            );
            cars.push(car);
        }

        info!("Parsed {} car(s) from markup input", cars.len());
        Ok(cars)
    }

    /// Reads `path` and parses it.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<Car>> {
        let xml = fs::read_to_string(path.as_ref())?;
        self.parse(&xml)
    }

    fn parse_car(&self, node: Node<'_, '_>, line: u64) -> Result<Car> {
        let category = child_text(node, "type").unwrap_or_default();
        let model = child_text(node, "model").unwrap_or_default();
        let brand = match child_text(node, "brand") {
            Some(brand) if !brand.is_empty() => brand,
            _ => self.models.brand_for(&model).to_string(),
        };

        let primary = child(node, "price")
            .ok_or_else(|| PipelineError::malformed(line, "car has no price element"))?;
        let currency = primary
            .attribute("currency")
            .map(|c| c.trim().to_string())
            .or_else(|| child_text(node, "currency"))
            .ok_or_else(|| PipelineError::malformed(line, "price has no currency"))?;

        let mut prices = PriceMap::new();
        prices.insert(currency.clone(), parse_price(primary, line)?);

        if let Some(extra) = child(node, "prices") {
            for price in extra.children().filter(|n| n.has_tag_name("price")) {
                let extra_currency = price.attribute("currency").ok_or_else(|| {
                    PipelineError::malformed(line, "nested price has no currency attribute")
                })?;
                prices.insert(extra_currency.trim().to_string(), parse_price(price, line)?);
            }
        }

        let release_date = match child_text(node, "releaseDate") {
            Some(raw) => parse_release_date(&raw, line)?,
            None => self
                .brand_dates
                .get(&brand)
                .unwrap_or(self.processing_date),
        };

        Car::from_price_map_with_date(brand, model, category, prices, currency, release_date)
            .map_err(|e| PipelineError::malformed(line, e.to_string()))
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        MarkupParser::new(ModelBrandTable::default(), BrandDates::new())
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// All text under `node`, comments and nested markup skipped.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name).map(|n| text_content(n).trim().to_string())
}

fn parse_price(node: Node<'_, '_>, line: u64) -> Result<Price> {
    let text = text_content(node);
    let raw = text.trim();
    Price::from_str(raw)
        .map_err(|e| PipelineError::malformed(line, format!("invalid price {:?}: {}", raw, e)))
}

fn parse_release_date(raw: &str, line: u64) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, RELEASE_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_RELEASE_DATE_FORMAT))
        .map_err(|_| PipelineError::malformed(line, format!("invalid release date {:?}", raw)))
}
