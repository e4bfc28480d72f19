// src/tests/pipeline_tests.rs
use crate::config::Config;
use crate::domain::mapper::STATUS_UNSET;
use crate::domain::{ListingRecord, MapError, RecordField};
use crate::errors::AppError;
use crate::formats::to_sheet_rows;
use crate::pipeline::Pipeline;
use crate::scraper::{PageSource, ScraperError};
use crate::sinks::{CsvSink, ExportSink, SinkError};
use crate::tests::fixtures::{entry_html, page_html, EntryFixture};
use ::scraper::Html;
use serde_json::json;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use url::Url;

/// Serves a fixed page instead of going to the network.
struct StaticPage(String);

impl PageSource for StaticPage {
    fn fetch(&self, _url: &Url) -> Result<Html, ScraperError> {
        Ok(Html::parse_document(&self.0))
    }
}

/// Keeps every batch it is handed.
#[derive(Clone, Default)]
struct RecordingSink {
    batches: Rc<RefCell<Vec<Vec<ListingRecord>>>>,
}

impl ExportSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn export(&self, records: &[ListingRecord]) -> Result<(), SinkError> {
        self.batches.borrow_mut().push(records.to_vec());
        Ok(())
    }
}

fn config(dir: &Path, level: &str) -> Config {
    let conf = json!({
        "url": "https://matrix.abor.com/Matrix/Public/Portal.aspx?ID=123",
        "csv_file": dir.join("faves.csv"),
        "log_level": level,
        "debug_dir": dir.join("log"),
    });
    Config::from_json(&conf.to_string(), None).unwrap()
}

fn two_entry_page() -> String {
    let second = EntryFixture {
        price: "$389,900",
        mls: "8124567",
        bedrooms: "3",
        bathrooms: "2",
        house_area: "1,610",
        year_built: "2004",
        property_area: "0.18",
        status: None,
        address_line1: "4410 Duval St",
        address_line2: "Austin, TX 78751",
        ..EntryFixture::default()
    };
    page_html(&[entry_html(&EntryFixture::default()), entry_html(&second)])
}

#[test]
fn one_record_per_entry_in_page_order() {
    let dir = tempfile::tempdir().unwrap();
    let sink = RecordingSink::default();
    let pipeline = Pipeline::new(
        &config(dir.path(), "INFO"),
        Box::new(StaticPage(two_entry_page())),
        vec![Box::new(sink.clone()) as Box<dyn ExportSink>],
    )
    .unwrap();

    let records = pipeline.run().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].address, "123 Main St, Austin, TX 78701");
    assert_eq!(records[0].market_status, "Active");
    assert_eq!(records[0].price, 1_234_000);
    assert_eq!(records[0].property_area_ac, 3.5);
    assert_eq!(records[1].address, "4410 Duval St, Austin, TX 78751");
    assert_eq!(records[1].market_status, STATUS_UNSET);
    assert_eq!(records[1].house_area_sqft, 1_610);
    assert_eq!(records[1].mls_number, 8_124_567);

    let batches = sink.batches.borrow();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0], records);
}

#[test]
fn malformed_entry_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let conf = config(dir.path(), "INFO");
    let csv_path = conf.csv.as_ref().unwrap().path.clone();
    let recorder = RecordingSink::default();

    let broken = EntryFixture {
        data_len: 3,
        ..EntryFixture::default()
    };
    let page = page_html(&[entry_html(&EntryFixture::default()), entry_html(&broken)]);

    let sinks: Vec<Box<dyn ExportSink>> = vec![
        Box::new(CsvSink::new(csv_path.clone(), RecordField::csv_schema(false))),
        Box::new(recorder.clone()),
    ];
    let pipeline = Pipeline::new(&conf, Box::new(StaticPage(page)), sinks).unwrap();

    let err = pipeline.run().unwrap_err();

    assert!(matches!(
        err,
        AppError::Scrape(ScraperError::MissingDataField { entry: 2, .. })
    ));
    assert!(!csv_path.exists());
    assert!(recorder.batches.borrow().is_empty());
}

#[test]
fn bad_number_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = RecordingSink::default();
    let bad = EntryFixture {
        bathrooms: "2.5",
        ..EntryFixture::default()
    };

    let pipeline = Pipeline::new(
        &config(dir.path(), "INFO"),
        Box::new(StaticPage(page_html(&[entry_html(&bad)]))),
        vec![Box::new(recorder.clone()) as Box<dyn ExportSink>],
    )
    .unwrap();

    let err = pipeline.run().unwrap_err();

    assert!(matches!(
        err,
        AppError::Map(MapError::InvalidNumber { field: RecordField::Bathrooms, .. })
    ));
    assert!(recorder.batches.borrow().is_empty());
}

#[test]
fn missing_container_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(
        &config(dir.path(), "INFO"),
        Box::new(StaticPage("<html><body><p>Please log in</p></body></html>".into())),
        vec![],
    )
    .unwrap();

    assert!(matches!(
        pipeline.run().unwrap_err(),
        AppError::Scrape(ScraperError::MissingElement(_))
    ));
}

#[test]
fn debug_level_dumps_markup() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(
        &config(dir.path(), "DEBUG"),
        Box::new(StaticPage(two_entry_page())),
        vec![],
    )
    .unwrap();

    pipeline.run().unwrap();

    let log_dir = dir.path().join("log");
    for name in ["webpage.html", "fave_div.html", "entry1.html", "entry2.html"] {
        assert!(log_dir.join(name).exists(), "{name} not written");
    }
    assert!(!log_dir.join("entry3.html").exists());
}

#[test]
fn info_level_dumps_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(
        &config(dir.path(), "INFO"),
        Box::new(StaticPage(two_entry_page())),
        vec![],
    )
    .unwrap();

    pipeline.run().unwrap();

    assert!(!dir.path().join("log").exists());
}

#[test]
fn sheet_rows_from_scraped_page() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(
        &config(dir.path(), "INFO"),
        Box::new(StaticPage(two_entry_page())),
        vec![],
    )
    .unwrap();
    let records = pipeline.run().unwrap();
    let schema: Vec<String> = ["Status", "Address", "MLS", "Price", "Notes"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let rows = to_sheet_rows(&records, &schema);

    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[1],
        vec!["new", "4410 Duval St, Austin, TX 78751", "8124567", "389900", ""]
    );
    assert_eq!(rows[2], vec![""; 5]);
}
