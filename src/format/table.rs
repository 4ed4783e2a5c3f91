//! Fixed-width text table.

use super::format_date;
use crate::car::Car;

/// A table column and the minimum width its cells are padded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub width: usize,
}

/// Columns in display order.
pub const TABLE_COLUMNS: [Column; 6] = [
    Column { title: "Brand", width: 15 },
    Column { title: "Model", width: 15 },
    Column { title: "Type", width: 10 },
    Column { title: "Price", width: 12 },
    Column { title: "Currency", width: 10 },
    Column { title: "Release Date", width: 12 },
];

/// One row of cell strings per car, in [`TABLE_COLUMNS`] order.
pub fn table_grid(cars: &[Car]) -> Vec<Vec<String>> {
    cars.iter()
        .map(|car| {
            vec![
                car.brand().to_string(),
                car.model().to_string(),
                car.category().to_string(),
                car.preferred_price().to_string(),
                car.preferred_currency().to_string(),
                format_date(car.release_date()),
            ]
        })
        .collect()
}

/// Renders a header, a dash rule and one line per car.
///
/// Cells are left-justified and padded to their column's width; longer values
/// are not truncated.
pub fn render_table(cars: &[Car]) -> String {
    let header: Vec<String> = TABLE_COLUMNS.iter().map(|c| c.title.to_string()).collect();
    let header_line = render_row(&header);

    let mut out = String::new();
    out.push_str(&header_line);
    out.push('\n');
    out.push_str(&"-".repeat(header_line.len()));
    out.push('\n');

    for row in table_grid(cars) {
        out.push_str(&render_row(&row));
        out.push('\n');
    }
    out
}

fn render_row(cells: &[String]) -> String {
    cells
        .iter()
        .zip(TABLE_COLUMNS.iter())
        .map(|(cell, column)| format!("{:<width$}", cell, width = column.width))
        .collect::<Vec<_>>()
        .join(" ")
}
