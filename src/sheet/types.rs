// src/sheet/types.rs

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::envelope::Table;
use crate::registry::SourceConfig;

/// `2024-05-01T12:00:00.123Z`
pub fn iso_millis(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One source's table plus fetch metadata, as written to `<source>.json`.
///
/// Field order here is the key order on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTable {
    #[serde(rename = "headers")]
    pub column_labels: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub last_updated: String,
    #[serde(rename = "timestamp")]
    pub epoch_millis: i64,
    #[serde(rename = "source")]
    pub source_description: String,
    #[serde(rename = "url")]
    pub source_locator: String,
    pub row_count: usize,
}

impl NormalizedTable {
    /// Stamp a parsed table with fetch metadata. `fetched_at` feeds both
    /// `lastUpdated` and `timestamp`.
    pub fn new(source: &SourceConfig, table: Table, fetched_at: DateTime<Utc>) -> Self {
        Self {
            column_labels: table.headers,
            row_count: table.rows.len(),
            rows: table.rows,
            last_updated: iso_millis(fetched_at),
            epoch_millis: fetched_at.timestamp_millis(),
            source_description: format!("Google Sheets - {}", source.name),
            source_locator: source.locator.clone(),
        }
    }
}

/// Summary of one run, written last as `unicorn-metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunManifest {
    #[serde(rename = "lastUpdated")]
    pub generated_at: String,
    #[serde(rename = "timestamp")]
    pub epoch_millis: i64,
    #[serde(rename = "sources")]
    pub all_source_names: Vec<String>,
    pub total_sources: usize,
    pub successful_sources: usize,
    #[serde(rename = "savedFiles")]
    pub saved_filenames: Vec<String>,
}

impl RunManifest {
    /// `source_names` in registry order, `saved` in completion order.
    pub fn assemble(source_names: Vec<String>, saved: Vec<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: iso_millis(generated_at),
            epoch_millis: generated_at.timestamp_millis(),
            total_sources: source_names.len(),
            all_source_names: source_names,
            successful_sources: saved.len(),
            saved_filenames: saved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::milliseconds(123)
    }

    fn key_order(json: &str, keys: &[&str]) {
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| json.find(&format!("\"{k}\":")).unwrap_or_else(|| panic!("missing {k}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn iso_has_millis_and_z() {
        assert_eq!(iso_millis(at()), "2024-05-01T12:00:00.123Z");
    }

    #[test]
    fn table_metadata_shares_one_instant() {
        let source = SourceConfig::new("founders", "https://example.com/f", "founders.json");
        let table = Table {
            headers: vec!["Name".into()],
            rows: vec![vec![json!("Ada")], vec![json!("Grace"), json!(1)]],
        };
        let t = NormalizedTable::new(&source, table, at());

        assert_eq!(t.row_count, 2);
        assert_eq!(t.last_updated, "2024-05-01T12:00:00.123Z");
        assert_eq!(t.epoch_millis, 1_714_564_800_123);
        assert_eq!(t.source_description, "Google Sheets - founders");
        assert_eq!(t.source_locator, "https://example.com/f");
    }

    #[test]
    fn table_serializes_with_published_keys() {
        let source = SourceConfig::new("mafia", "https://example.com/m", "mafia.json");
        let t = NormalizedTable::new(&source, Table { headers: vec![], rows: vec![] }, at());
        let out = serde_json::to_string_pretty(&t).unwrap();

        key_order(
            &out,
            &["headers", "rows", "lastUpdated", "timestamp", "source", "url", "rowCount"],
        );
        assert!(out.contains("\n  \"headers\": []"));
    }

    #[test]
    fn manifest_counts_follow_inputs() {
        let m = RunManifest::assemble(
            vec!["companies".into(), "mafia".into(), "founders".into()],
            vec!["founders.json".into(), "companies.json".into()],
            at(),
        );
        assert_eq!(m.total_sources, 3);
        assert_eq!(m.successful_sources, 2);
        assert_eq!(m.saved_filenames, vec!["founders.json", "companies.json"]);
        assert_eq!(m.epoch_millis, 1_714_564_800_123);

        let out = serde_json::to_string(&m).unwrap();
        key_order(
            &out,
            &["lastUpdated", "timestamp", "sources", "totalSources", "successfulSources", "savedFiles"],
        );
    }

    #[test]
    fn empty_run_manifest() {
        let m = RunManifest::assemble(vec!["a".into()], Vec::new(), at());
        assert_eq!(m.successful_sources, 0);
        assert!(m.saved_filenames.is_empty());
        assert_eq!(serde_json::to_value(&m).unwrap()["savedFiles"], json!([]));
    }
}
