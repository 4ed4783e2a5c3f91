//! Car data service.
//!
//! Loads the brand/date and vehicle files, keeps the loaded collection, and
//! runs the filter → sort → currency → format pipeline over it.

use crate::car::Car;
use crate::currency::normalize_currency;
use crate::error::Result;
use crate::filter::{filter_cars, FilterKind, FilterMode};
use crate::format::{format_cars, OutputFormat};
use crate::parser::{parse_brand_dates_file, MarkupParser, ModelBrandTable};
use crate::sort::{sort_cars, SortMode};
use log::{debug, info};
use std::path::PathBuf;

/// Default brand/date file name.
pub const DEFAULT_BRAND_DATES_FILE: &str = "CarsBrand.csv";

/// Default vehicle file name.
pub const DEFAULT_VEHICLES_FILE: &str = "carsType.xml";

/// Locations of the two input files read by [`CarDataService::load_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    /// CSV of `brand,MM/dd/yyyy` rows.
    pub brand_dates: PathBuf,

    /// XML vehicle file.
    pub vehicles: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths {
            brand_dates: PathBuf::from(DEFAULT_BRAND_DATES_FILE),
            vehicles: PathBuf::from(DEFAULT_VEHICLES_FILE),
        }
    }
}

/// Everything a caller chooses for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineRequest {
    pub filter: FilterMode,
    pub sort: SortMode,
    pub normalize_currency: bool,
    pub output: OutputFormat,
}

/// Owns the loaded cars.
///
/// A failed load leaves the previously loaded cars untouched.
pub struct CarDataService {
    paths: DataPaths,
    models: ModelBrandTable,
    cars: Vec<Car>,
}

impl CarDataService {
    /// Creates an empty service reading from `paths`.
    pub fn new(paths: DataPaths) -> Self {
        CarDataService {
            paths,
            models: ModelBrandTable::default(),
            cars: Vec::new(),
        }
    }

    /// Replaces the model → brand table used by later loads.
    pub fn with_models(mut self, models: ModelBrandTable) -> Self {
        self.models = models;
        self
    }

    /// Seeds the service with cars parsed elsewhere.
    pub fn with_cars(mut self, cars: Vec<Car>) -> Self {
        self.cars = cars;
        self
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Reads the brand/date file, then the vehicle file.
    ///
    /// Lookup tables are rebuilt on every call.
    pub fn load_data(&mut self) -> Result<()> {
        debug!(
            "Loading brand dates from {} and vehicles from {}",
            self.paths.brand_dates.display(),
            self.paths.vehicles.display()
        );

        let brand_dates = parse_brand_dates_file(&self.paths.brand_dates)?;
        let parser = MarkupParser::new(self.models.clone(), brand_dates);
        let cars = parser.parse_file(&self.paths.vehicles)?;

        info!("Loaded {} car(s)", cars.len());
        self.cars = cars;
        Ok(())
    }

    /// Decodes the raw filter inputs and returns the matching cars.
    ///
    /// See [`FilterMode::from_inputs`] for how `value`, `brand` and `date`
    /// are used by each kind.
    pub fn filter_cars(
        &self,
        kind: FilterKind,
        value: &str,
        brand: &str,
        date: &str,
    ) -> Result<Vec<Car>> {
        let mode = FilterMode::from_inputs(kind, value, brand, date)?;
        Ok(filter_cars(&self.cars, &mode))
    }

    /// Runs the full pipeline over the loaded cars and renders the result.
    pub fn process(&self, request: &PipelineRequest) -> Result<String> {
        let mut cars = filter_cars(&self.cars, &request.filter);
        debug!(
            "{} of {} car(s) passed {:?}",
            cars.len(),
            self.cars.len(),
            request.filter
        );

        sort_cars(&mut cars, request.sort);
        if request.normalize_currency {
            normalize_currency(&mut cars);
        }

        format_cars(&cars, request.output)
    }
}

impl Default for CarDataService {
    fn default() -> Self {
        Self::new(DataPaths::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use std::fs;
    use tempfile::TempDir;

    const BRANDS: &str = "Brand,ReleaseDate
Toyota,01/15/2023
Honda,11/02/2022
Ford,03/20/2021
";

    const VEHICLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cars>
  <car>
    <type>Truck</type>
    <model>F-150</model>
    <price currency="USD">40000</price>
    <prices>
      <price currency="EUR">37000</price>
    </prices>
  </car>
  <car>
    <type>Sedan</type>
    <model>Civic</model>
    <price currency="USD">22000</price>
    <prices>
      <price currency="JPY">3300000</price>
    </prices>
  </car>
  <car>
    <type>SUV</type>
    <model>RAV4</model>
    <price currency="USD">28000</price>
    <prices>
      <price currency="EUR">26000</price>
      <price currency="JPY">4100000</price>
    </prices>
  </car>
</cars>"#;

    fn write_inputs(dir: &TempDir, brands: &str, vehicles: &str) -> DataPaths {
        let paths = DataPaths {
            brand_dates: dir.path().join("CarsBrand.csv"),
            vehicles: dir.path().join("carsType.xml"),
        };
        fs::write(&paths.brand_dates, brands).unwrap();
        fs::write(&paths.vehicles, vehicles).unwrap();
        paths
    }

    fn loaded(dir: &TempDir) -> CarDataService {
        let mut service = CarDataService::new(write_inputs(dir, BRANDS, VEHICLES));
        service.load_data().unwrap();
        service
    }

    #[test]
    fn test_load_data_joins_brand_dates() {
        let dir = TempDir::new().unwrap();
        let service = loaded(&dir);

        assert_eq!(service.cars().len(), 3);
        let ford = &service.cars()[0];
        assert_eq!(ford.brand(), "Ford");
        assert_eq!(ford.release_date().to_string(), "2021-03-20");
        assert_eq!(ford.prices().len(), 2);
    }

    #[test]
    fn test_failed_load_keeps_previous_cars() {
        let dir = TempDir::new().unwrap();
        let mut service = loaded(&dir);

        fs::write(&service.paths().vehicles, "<cars><car><model>X5</model><price currency=\"EUR\">oops</price></car></cars>").unwrap();
        let err = service.load_data().unwrap_err();

        assert!(matches!(err, PipelineError::MalformedRecord { .. }));
        assert_eq!(service.cars().len(), 3);
    }

    #[test]
    fn test_custom_models_apply_on_load() {
        let dir = TempDir::new().unwrap();
        let mut models = ModelBrandTable::empty();
        models.insert("Civic", "Honda");
        let mut service =
            CarDataService::new(write_inputs(&dir, BRANDS, VEHICLES)).with_models(models);
        service.load_data().unwrap();

        let brands: Vec<_> = service.cars().iter().map(|c| c.brand()).collect();
        assert_eq!(brands, ["Unknown", "Honda", "Unknown"]);
        assert_eq!(service.cars()[1].release_date().to_string(), "2022-11-02");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut service = CarDataService::new(DataPaths {
            brand_dates: dir.path().join("missing.csv"),
            vehicles: dir.path().join("missing.xml"),
        });
        assert!(matches!(service.load_data(), Err(PipelineError::Io(_))));
        assert!(service.cars().is_empty());
    }

    #[test]
    fn test_filter_cars_by_brand() {
        let dir = TempDir::new().unwrap();
        let service = loaded(&dir);

        let hondas = service.filter_cars(FilterKind::Brand, "HONDA", "", "").unwrap();
        assert_eq!(hondas.len(), 1);
        assert_eq!(hondas[0].model(), "Civic");

        let all = service.filter_cars(FilterKind::None, "", "", "").unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_filter_cars_reports_invalid_input() {
        let dir = TempDir::new().unwrap();
        let service = loaded(&dir);

        let err = service
            .filter_cars(FilterKind::BrandAndReleaseDate, "Toyota", "", "yesterday")
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidFilterInput { field: "releaseDate", .. }));
    }

    #[test]
    fn test_process_full_pipeline() {
        let dir = TempDir::new().unwrap();
        let service = loaded(&dir);

        let request = PipelineRequest {
            filter: FilterMode::None,
            sort: SortMode::ByMaxPriceDescending,
            normalize_currency: true,
            output: OutputFormat::Xml,
        };
        let xml = service.process(&request).unwrap();

        let suv = xml.find("<model>RAV4</model>").unwrap();
        let sedan = xml.find("<model>Civic</model>").unwrap();
        let truck = xml.find("<model>F-150</model>").unwrap();
        assert!(suv < sedan && sedan < truck);
        assert!(xml.contains("<price currency=\"EUR\">26000.00</price>"));
        assert!(xml.contains("<price currency=\"JPY\">3300000.00</price>"));
        assert!(xml.contains("<price currency=\"USD\">40000.00</price>"));
    }

    #[test]
    fn test_process_does_not_touch_loaded_cars() {
        let dir = TempDir::new().unwrap();
        let service = loaded(&dir);
        let before = service.cars().to_vec();

        let request = PipelineRequest {
            sort: SortMode::ByReleaseDateDescending,
            normalize_currency: true,
            ..PipelineRequest::default()
        };
        service.process(&request).unwrap();

        assert_eq!(service.cars(), before.as_slice());
    }
}
