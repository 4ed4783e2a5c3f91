//! # Car Pipeline
//!
//! Loads vehicle records from CSV and XML files into one [`Car`] model, then
//! filters, sorts, normalizes display currency and renders them as a table,
//! XML or JSON.
//!
//! ## Design Principles
//!
//! - **Validated records**: a [`Car`] can only be built through constructors
//!   that enforce its invariants (non-empty prices, preferred currency priced)
//! - **Exact prices**: amounts are `rust_decimal` values shown with two decimals
//! - **Closed modes**: filters, sorts and output formats are enums decoded once
//!   at the boundary
//! - **No hidden state**: lookup tables are built per load and passed in
//!
//! ## Example
//!
//! ```no_run
//! use car_pipeline::{filter_cars, format_json, sort_cars, FilterMode, SortMode};
//! use car_pipeline::{TabularLayout, TabularParser};
//! use std::io::Cursor;
//!
//! let csv = "brand,type,price,releaseDate,currency\nToyota,SUV,30000,2022,15,06,EUR\n";
//! let cars = TabularParser::new(TabularLayout::SplitDate)
//!     .parse(Cursor::new(csv))
//!     .unwrap();
//! let mut toyotas = filter_cars(&cars, &FilterMode::ByBrand("toyota".into()));
//! sort_cars(&mut toyotas, SortMode::ByReleaseDateDescending);
//! println!("{}", format_json(&toyotas).unwrap());
//! ```

pub mod car;
pub mod currency;
pub mod error;
pub mod filter;
pub mod format;
pub mod parser;
pub mod price;
pub mod service;
pub mod sort;

pub use car::{Car, PriceMap};
pub use currency::{category_rank, normalize_currency, preferred_currency_for};
pub use error::{PipelineError, RecordError, Result};
pub use filter::{filter_cars, FilterKind, FilterMode};
pub use format::{format_cars, format_json, format_xml, render_table, table_grid, OutputFormat};
pub use parser::{BrandDates, MarkupParser, ModelBrandTable, TabularLayout, TabularParser};
pub use price::Price;
pub use service::{CarDataService, DataPaths, PipelineRequest};
pub use sort::{sort_cars, SortMode};
