//! Car Pipeline CLI
//!
//! Loads vehicle records, then filters, sorts and renders them to stdout.
//!
//! # Usage
//!
//! ```bash
//! # CarsBrand.csv + carsType.xml from the working directory, as a table
//! car-pipeline
//!
//! # Toyotas released since 2022, latest first, as JSON
//! car-pipeline --filter brand-and-release-date --value Toyota --date 2022-01-01 \
//!     --sort release-date --output json
//!
//! # A single split-date CSV file, currency-normalized, as XML
//! car-pipeline --input cars.csv --layout split-date --normalize-currency --output xml
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use car_pipeline::parser::{parse_brand_dates_file, BrandDates};
use car_pipeline::{
    Car, CarDataService, DataPaths, FilterKind, FilterMode, MarkupParser, ModelBrandTable,
    OutputFormat, PipelineRequest, Result, SortMode, TabularLayout, TabularParser,
};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

/// Filter, sort and render vehicle records from CSV and XML files.
#[derive(Parser, Debug)]
#[command(name = "car-pipeline")]
#[command(version, about)]
struct Args {
    /// Brand/date CSV (`brand,MM/dd/yyyy`). Defaults to CarsBrand.csv.
    #[arg(long)]
    brands: Option<PathBuf>,

    /// Vehicle XML file. Defaults to carsType.xml.
    #[arg(long)]
    vehicles: Option<PathBuf>,

    /// Read cars from this single file instead of the brand and vehicle files.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Layout of the --input file.
    #[arg(long, value_enum, default_value = "split-date", requires = "input")]
    layout: LayoutArg,

    /// Filter to apply.
    #[arg(long, value_enum, default_value = "none")]
    filter: FilterArg,

    /// Brand (brand, brand-and-release-date) or minimum price (brand-and-price).
    #[arg(long, default_value = "")]
    value: String,

    /// Brand for the brand-and-price filter.
    #[arg(long, default_value = "")]
    brand: String,

    /// Minimum release date (yyyy-MM-dd) for the brand-and-release-date filter.
    #[arg(long, default_value = "")]
    date: String,

    /// Sort order.
    #[arg(long, value_enum, default_value = "none")]
    sort: SortArg,

    /// Show SUVs in EUR, sedans in JPY and trucks in USD, grouped in that order.
    #[arg(long)]
    normalize_currency: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// brand,type,price,year,day,month,currency
    SplitDate,
    /// brand,type,price,yyyy-MM-dd,currency
    Canonical,
    /// XML `car` elements
    Markup,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterArg {
    None,
    Brand,
    BrandAndPrice,
    BrandAndReleaseDate,
}

impl From<FilterArg> for FilterKind {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::None => FilterKind::None,
            FilterArg::Brand => FilterKind::Brand,
            FilterArg::BrandAndPrice => FilterKind::BrandAndPrice,
            FilterArg::BrandAndReleaseDate => FilterKind::BrandAndReleaseDate,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    None,
    /// Latest release first.
    ReleaseDate,
    /// Highest price in any currency first.
    MaxPrice,
    /// Category A-Z, then highest price first.
    CategoryThenPrice,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::None => SortMode::None,
            SortArg::ReleaseDate => SortMode::ByReleaseDateDescending,
            SortArg::MaxPrice => SortMode::ByMaxPriceDescending,
            SortArg::CategoryThenPrice => SortMode::ByCategoryThenPriceDescending,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputArg {
    Table,
    Xml,
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Table => OutputFormat::Table,
            OutputArg::Xml => OutputFormat::Xml,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let mut paths = DataPaths::default();
    if let Some(brands) = &args.brands {
        paths.brand_dates = brands.clone();
    }
    if let Some(vehicles) = &args.vehicles {
        paths.vehicles = vehicles.clone();
    }

    let service = match &args.input {
        Some(input) => {
            let cars = load_single_file(input, args.layout, args.brands.as_deref())?;
            CarDataService::new(paths).with_cars(cars)
        }
        None => {
            let mut service = CarDataService::new(paths);
            service.load_data()?;
            service
        }
    };

    let request = PipelineRequest {
        filter: FilterMode::from_inputs(args.filter.into(), &args.value, &args.brand, &args.date)?,
        sort: args.sort.into(),
        normalize_currency: args.normalize_currency,
        output: args.output.into(),
    };
    let rendered = service.process(&request)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        handle.write_all(b"\n")?;
    }
    handle.flush()?;

    Ok(())
}

/// Parses one car file. Markup files use `brands` for release dates when given.
fn load_single_file(path: &Path, layout: LayoutArg, brands: Option<&Path>) -> Result<Vec<Car>> {
    match layout {
        LayoutArg::SplitDate => TabularParser::new(TabularLayout::SplitDate).parse_file(path),
        LayoutArg::Canonical => TabularParser::new(TabularLayout::Canonical).parse_file(path),
        LayoutArg::Markup => {
            let brand_dates = match brands {
                Some(brands) => parse_brand_dates_file(brands)?,
                None => BrandDates::new(),
            };
            MarkupParser::new(ModelBrandTable::default(), brand_dates).parse_file(path)
        }
    }
}
