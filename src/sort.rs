//! Sort stage.

use crate::car::Car;

/// Ordering applied by [`sort_cars`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    None,

    /// Latest release first.
    ByReleaseDateDescending,

    /// Highest price first, using each car's largest price in any currency.
    ByMaxPriceDescending,

    /// Category A→Z, then highest price first within a category.
    ByCategoryThenPriceDescending,
}

/// Sorts `cars` in place. All modes are stable: ties keep their input order.
pub fn sort_cars(cars: &mut [Car], mode: SortMode) {
    match mode {
        SortMode::None => {}
        SortMode::ByReleaseDateDescending => {
            cars.sort_by(|a, b| b.release_date().cmp(&a.release_date()));
        }
        SortMode::ByMaxPriceDescending => {
            cars.sort_by(|a, b| b.max_price().cmp(&a.max_price()));
        }
        SortMode::ByCategoryThenPriceDescending => {
            cars.sort_by(|a, b| {
                a.category()
                    .cmp(b.category())
                    .then_with(|| b.max_price().cmp(&a.max_price()))
            });
        }
    }
}
