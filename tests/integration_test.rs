//! Integration tests for the car-pipeline CLI.
//!
//! These tests run the actual binary against the files in `tests/data`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Run the binary against the default brand and vehicle fixtures
fn run_service(extra_args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin("car-pipeline").unwrap();
    let assert = cmd
        .arg("--brands")
        .arg(test_data_path("CarsBrand.csv"))
        .arg("--vehicles")
        .arg(test_data_path("carsType.xml"))
        .args(extra_args)
        .assert()
        .success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

/// Run the binary against a single input file
fn run_single(input: &str, layout: &str, extra_args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin("car-pipeline").unwrap();
    let assert = cmd
        .arg("--input")
        .arg(input)
        .arg("--layout")
        .arg(layout)
        .args(extra_args)
        .assert()
        .success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_default_table_output() {
    let output = run_service(&[]);
    let lines: Vec<&str> = output.lines().collect();

    assert!(lines[0].starts_with("Brand"));
    assert!(lines[0].contains("Release Date"));
    assert!(lines[1].starts_with("-----"));
    assert_eq!(lines.len(), 2 + 5);
    assert!(lines[2].starts_with("Toyota"));
    assert!(lines[2].contains("RAV4"));
    assert!(lines[2].contains("28000.00"));
    assert!(lines[2].contains("2023-01-15"));
}

#[test]
fn test_unknown_model_gets_unknown_brand() {
    let output = run_service(&["--filter", "brand", "--value", "unknown"]);
    assert!(output.contains("Supra"));
    assert_eq!(output.lines().count(), 3);
}

#[test]
fn test_brand_filter_json() {
    let output = run_service(&["--filter", "brand", "--value", "tesla", "--output", "json"]);
    let expected = r#"{
  "cars": [
    {
      "brand": "Tesla",
      "model": "Model X",
      "type": "SUV",
      "price": {
        "value": 90000.00,
        "currency": "USD"
      },
      "releaseDate": "2023-07-04"
    }
  ]
}
"#;
    assert_eq!(output, expected);
}

#[test]
fn test_brand_and_price_filter() {
    let output = run_service(&[
        "--filter",
        "brand-and-price",
        "--brand",
        "honda",
        "--value",
        "3000000",
        "--output",
        "xml",
    ]);
    assert!(output.contains("<model>Civic</model>"));

    let output = run_service(&[
        "--filter",
        "brand-and-price",
        "--brand",
        "honda",
        "--value",
        "5000000",
        "--output",
        "xml",
    ]);
    assert!(!output.contains("<car>"));
}

#[test]
fn test_release_date_filter_and_sort() {
    let output = run_service(&[
        "--filter",
        "brand-and-release-date",
        "--value",
        "Ford",
        "--date",
        "2021-03-20",
        "--sort",
        "release-date",
    ]);
    assert!(output.contains("F-150"));
    assert_eq!(output.lines().count(), 3);
}

#[test]
fn test_currency_normalization_xml() {
    let output = run_service(&["--normalize-currency", "--output", "xml"]);

    let rav4 = output.find("<model>RAV4</model>").unwrap();
    let tesla = output.find("<model>Model X</model>").unwrap();
    let civic = output.find("<model>Civic</model>").unwrap();
    let f150 = output.find("<model>F-150</model>").unwrap();
    let supra = output.find("<model>Supra</model>").unwrap();
    assert!(rav4 < tesla && tesla < civic && civic < f150 && f150 < supra);

    assert!(output.contains("<price currency=\"EUR\">26000.00</price>"));
    assert!(output.contains("<price currency=\"JPY\">3300000.00</price>"));
    assert!(output.contains("<price currency=\"USD\">40000.00</price>"));
    assert!(output.contains("<price currency=\"JPY\">6500000.00</price>"));
}

#[test]
fn test_split_date_input_file() {
    let output = run_single(
        &test_data_path("cars_split_date.csv"),
        "split-date",
        &["--sort", "max-price", "--output", "json"],
    );

    let bmw = output.find("\"BMW\"").unwrap();
    let ford = output.find("\"Ford\"").unwrap();
    let toyota = output.find("\"Toyota\"").unwrap();
    assert!(bmw < ford && ford < toyota);
    assert!(output.contains("\"releaseDate\": \"2022-06-15\""));
    assert!(output.contains("\"releaseDate\": \"2020-04-20\""));
}

#[test]
fn test_canonical_input_file() {
    let output = run_single(
        &test_data_path("cars_canonical.csv"),
        "canonical",
        &["--sort", "category-then-price"],
    );
    let lines: Vec<&str> = output.lines().collect();

    assert!(lines[2].starts_with("BMW"));
    assert!(lines[3].starts_with("Toyota"));
    assert!(lines[4].starts_with("Honda"));
    assert!(lines[5].starts_with("Ford"));
}

#[test]
fn test_xml_output_reads_back_as_markup() {
    let dir = TempDir::new().unwrap();
    let first = run_service(&["--output", "xml"]);
    let path = dir.path().join("round_trip.xml");
    fs::write(&path, &first).unwrap();

    let second = run_single(path.to_str().unwrap(), "markup", &["--output", "xml"]);
    assert_eq!(second.trim_end(), first.trim_end());
}

#[test]
fn test_malformed_input_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "h\nToyota,SUV,lots,2022,15,06,EUR\n").unwrap();

    let mut cmd = Command::cargo_bin("car-pipeline").unwrap();
    cmd.arg("--input")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed record at line 2"));
}

#[test]
fn test_invalid_filter_input_fails() {
    let mut cmd = Command::cargo_bin("car-pipeline").unwrap();
    cmd.arg("--input")
        .arg(test_data_path("cars_split_date.csv"))
        .args(["--filter", "brand-and-price", "--brand", "Ford", "--value", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid filter input for price"));
}

#[test]
fn test_missing_file_error() {
    let mut cmd = Command::cargo_bin("car-pipeline").unwrap();
    cmd.arg("--brands")
        .arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_layout_requires_input() {
    let mut cmd = Command::cargo_bin("car-pipeline").unwrap();
    cmd.args(["--layout", "markup"]).assert().failure();
}
