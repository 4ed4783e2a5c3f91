//! Input decoders.
//!
//! - [`tabular`]: delimiter-separated car files and the brand/date file
//! - [`markup`]: XML car files
//! - [`lookup`]: the model → brand and brand → date tables used by `markup`

pub mod lookup;
pub mod markup;
pub mod tabular;

pub use lookup::{BrandDates, ModelBrandTable, UNKNOWN_BRAND};
pub use markup::MarkupParser;
pub use tabular::{parse_brand_dates, parse_brand_dates_file, TabularLayout, TabularParser};
