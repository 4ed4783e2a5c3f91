//! XML output.

use super::format_date;
use crate::car::Car;
use std::fmt::{self, Write};

/// Renders `cars` as a `cars` document with one `car` element per car.
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <cars>
///   <car>
///     <brand>Toyota</brand>
///     <model>RAV4</model>
///     <type>SUV</type>
///     <price currency="EUR">23000.00</price>
///     <releaseDate>2023-01-15</releaseDate>
///   </car>
/// </cars>
/// ```
///
/// The document has no trailing newline.
pub fn format_xml(cars: &[Car]) -> String {
    let mut xml = String::new();
    // Writing into a String never fails.
    let _ = write_document(&mut xml, cars);
    xml
}

fn write_document(xml: &mut String, cars: &[Car]) -> fmt::Result {
    writeln!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(xml, "<cars>")?;
    for car in cars {
        write_car(xml, car)?;
    }
    write!(xml, "</cars>")
}

fn write_car(xml: &mut String, car: &Car) -> fmt::Result {
    writeln!(xml, "  <car>")?;
    writeln!(xml, "    <brand>{}</brand>", escape(car.brand()))?;
    writeln!(xml, "    <model>{}</model>", escape(car.model()))?;
    writeln!(xml, "    <type>{}</type>", escape(car.category()))?;
    writeln!(
        xml,
        "    <price currency=\"{}\">{}</price>",
        escape(car.preferred_currency()),
        car.preferred_price()
    )?;
    writeln!(
        xml,
        "    <releaseDate>{}</releaseDate>",
        format_date(car.release_date())
    )?;
    writeln!(xml, "  </car>")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car::PriceMap;
    use crate::price::Price;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn rav4() -> Car {
        let mut prices = PriceMap::new();
        prices.insert("USD".to_string(), Price::from_str("25000").unwrap());
        prices.insert("EUR".to_string(), Price::from_str("23000").unwrap());
        Car::from_price_map_with_date(
            "Toyota",
            "RAV4",
            "SUV",
            prices,
            "EUR",
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_golden_output() {
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<cars>
  <car>
    <brand>Toyota</brand>
    <model>RAV4</model>
    <type>SUV</type>
    <price currency=\"EUR\">23000.00</price>
    <releaseDate>2023-01-15</releaseDate>
  </car>
</cars>";
        assert_eq!(format_xml(&[rav4()]), expected);
    }

    #[test]
    fn test_empty_collection() {
        assert_eq!(
            format_xml(&[]),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<cars>\n</cars>"
        );
    }

    #[test]
    fn test_escapes_markup_characters() {
        assert_eq!(escape("A&B <C> \"D\""), "A&amp;B &lt;C&gt; &quot;D&quot;");
    }
}
