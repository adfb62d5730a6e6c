//! Integration tests for fundscope-ext-file.
//!
//! These tests read and write real files in temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use fundscope_ext_file::*;
use fundscope_holdings::{
    category_records, compute_conviction, summarize_categories, summarize_stocks,
    AggregatorConfig, ConvictionRecord,
};
use tempfile::TempDir;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

const SNAPSHOT: &str = r#"{
    "SBI Small Cap Fund": [
        {"stock": "Kaynes Technology", "percent_aum": 2.8, "sentiment": "Buy"},
        {"stock": "Anant Raj", "percent_aum": "1.1%", "sentiment": "Hold"}
    ],
    "HDFC Small Cap Fund": [
        {"Stock": "Kaynes Technology", "% AUM": 3.2, "Sentiment": "Buy"},
        {"stock": "", "percent_aum": 9.9}
    ]
}"#;

const AXIS_LIST: &str = r#"[
    {"stock": "kaynes technology", "sentiment": "Trimmed"},
    {"stock": "Persistent Systems", "percent_aum": 3.5}
]"#;

const TABLE: &str = "Scheme,Stock,% AUM,Sentiment\n\
                     Kotak Emerging Equity,Persistent Systems,2.5,Hold\n\
                     Kotak Emerging Equity,Anant Raj,,\n";

// =============================================================================
// SOURCES
// =============================================================================

#[test]
fn test_load_mixed_inputs() {
    let dir = TempDir::new().unwrap();
    let snapshot = write(dir.path(), "holdings.json", SNAPSHOT);
    let axis = write(dir.path(), "raw/axis.json", AXIS_LIST);
    let table = write(dir.path(), "export.csv", TABLE);

    let inputs = vec![
        InputSpec::parse(snapshot.to_str().unwrap()).unwrap(),
        InputSpec::parse(&format!("Axis Midcap={}", axis.display())).unwrap(),
        InputSpec::parse(table.to_str().unwrap()).unwrap(),
    ];
    let rows = load_rows(&inputs).unwrap();
    assert_eq!(rows.len(), 8);

    let summaries = summarize_stocks(&rows, None, &AggregatorConfig::default()).unwrap();
    let kaynes = summaries
        .iter()
        .find(|s| s.stock == "Kaynes Technology")
        .unwrap();
    assert_eq!(kaynes.fund_count, 3);
    assert_relative_eq!(kaynes.avg_percent_aum, 3.0);
    assert_relative_eq!(kaynes.conviction_score, 75.0);
}

#[test]
fn test_record_list_defaults_to_file_stem() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "Axis Midcap.json", AXIS_LIST);

    let snapshot = JsonSnapshotSource::new(&path).load_snapshot().unwrap();
    assert_eq!(snapshot.get("Axis Midcap").unwrap().len(), 2);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let source = CsvTableSource::new(dir.path().join("missing.csv"));
    assert!(matches!(source.load().unwrap_err(), FileError::Io { .. }));
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn test_project_config_sources_resolve_relative_to_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "data/holdings.json", SNAPSHOT);
    write(dir.path(), "data/raw/axis.json", AXIS_LIST);
    let config_path = write(
        dir.path(),
        "fundscope.toml",
        r#"
[aggregator]
aum_decimals = 1

[universe]
small_cap = ["Kaynes Technology", "Cholamandalam Financial"]

[[sources]]
path = "data/holdings.json"

[[sources]]
path = "data/raw/axis.json"
scheme = "Axis Midcap"
"#,
    );

    let config = ProjectConfig::from_file(&config_path).unwrap();
    assert_eq!(config.aggregator.aum_decimals, 1);

    let rows = load_rows(&config.inputs().unwrap()).unwrap();
    let summary = summarize_categories(&rows, &config.universe, &config.aggregator).unwrap();
    let records = category_records(&summary);
    let small = &records["small_cap"];
    assert_eq!(small[0].funds_holding, 3);
    assert_eq!(small[1].sentiment, "Not Held");
}

#[test]
fn test_json_project_config_and_universe() {
    let dir = TempDir::new().unwrap();
    let config_path = write(
        dir.path(),
        "project.json",
        r#"{"universe": {"mid_cap": ["Persistent Systems"]}, "sources": []}"#,
    );
    let config = ProjectConfig::from_file(&config_path).unwrap();
    assert_eq!(config.universe.stocks("mid_cap").unwrap().len(), 1);
    assert_eq!(config.aggregator, AggregatorConfig::default());

    let universe_path = write(
        dir.path(),
        "universe.toml",
        "small_cap = [\"Anant Raj\"]\nmid_cap = [\"Persistent Systems\", \"Max Healthcare\"]\n",
    );
    let universe = load_universe(&universe_path).unwrap();
    assert_eq!(universe.len(), 2);
    assert_eq!(universe.stocks("mid_cap").unwrap()[1], "Max Healthcare");
}

// =============================================================================
// EXPORT
// =============================================================================

#[test]
fn test_write_report_files() {
    let dir = TempDir::new().unwrap();
    let snapshot = write(dir.path(), "holdings.json", SNAPSHOT);
    let rows = load_rows(&[InputSpec::Snapshot(snapshot)]).unwrap();
    let conviction = compute_conviction(&rows, &AggregatorConfig::default()).unwrap();
    let records: Vec<ConvictionRecord> = conviction.iter().map(Into::into).collect();

    let csv_path = dir.path().join("out/conviction.csv");
    write_report(&csv_path, &to_csv_string(&records).unwrap()).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("Stock,Total_Appearances"));
    assert!(csv.contains("Kaynes Technology,2,2,100.0,High"));

    let json_path = dir.path().join("out/conviction.json");
    write_report(&json_path, &to_json_string(&records).unwrap()).unwrap();
    let parsed: Vec<ConvictionRecord> =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed, records);
}
