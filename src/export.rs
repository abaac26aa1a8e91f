use crate::domain::{Registry, Row};
use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One group of the final arrangement, carrying only the original rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedGroup {
    pub title: String,
    pub rows: Vec<Row>,
}

/// Projects the registry back into source rows, in arrangement order
pub fn export(registry: &Registry) -> Vec<ExportedGroup> {
    registry
        .groups()
        .iter()
        .map(|group| ExportedGroup {
            title: group.title.clone(),
            rows: group.items.iter().map(|item| item.row.clone()).collect(),
        })
        .collect()
}

pub fn to_json_pretty(groups: &[ExportedGroup]) -> Result<String> {
    Ok(serde_json::to_string_pretty(groups)?)
}

pub fn from_json_str(json: &str) -> Result<Vec<ExportedGroup>> {
    Ok(serde_json::from_str(json)?)
}

/// Name for the downloadable export, e.g. `routes-stops-2025-03-14.json`
pub fn export_file_name(source_filename: &str, prefix: &str, date: NaiveDate) -> String {
    let stem = Path::new(source_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.trim().replace(char::is_whitespace, "_"))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "upload".to_string());

    format!("{}-{}-{}.json", prefix, stem, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::ingest::{ingest, UploadPayload};
    use crate::resolver::move_item;
    use serde_json::json;

    fn payload() -> UploadPayload {
        let rows = |values: Vec<serde_json::Value>| -> Vec<Row> {
            values
                .into_iter()
                .map(|v| v.as_object().cloned().unwrap())
                .collect()
        };
        UploadPayload::new(
            "stops.csv",
            vec!["Name".to_string(), "Location".to_string()],
            vec![
                rows(vec![
                    json!({"Name": "Depot", "Location": "1 Main St", "priority": "x"}),
                    json!({"Name": "Bakery", "Location": null}),
                ]),
                rows(vec![]),
            ],
        )
    }

    #[test]
    fn test_export_uses_raw_rows_and_titles() {
        let registry = ingest(&payload(), &BoardConfig::default());
        let exported = export(&registry);

        assert_eq!(exported.len(), 2);
        assert_eq!(exported[0].title, "Route 1");
        assert_eq!(exported[0].rows, payload().groups[0]);
        assert!(exported[1].rows.is_empty());
    }

    #[test]
    fn test_export_follows_arrangement() {
        let registry = ingest(&payload(), &BoardConfig::default());
        let moved = move_item(&registry, "0-1", Some("group-1")).unwrap();

        let exported = export(&moved);

        assert_eq!(exported[0].rows.len(), 1);
        assert_eq!(exported[1].rows[0]["Name"], json!("Bakery"));
    }

    #[test]
    fn test_export_json_has_no_internal_ids() {
        let registry = ingest(&payload(), &BoardConfig::default());
        let json = to_json_pretty(&export(&registry)).unwrap();

        assert!(!json.contains("group-0"));
        assert!(!json.contains("\"0-0\""));
        assert!(!json.contains("\"id\""));
        // Raw rows keep their original column order
        assert!(json.find("\"Name\"").unwrap() < json.find("\"Location\"").unwrap());
    }

    #[test]
    fn test_export_json_parses_back() {
        let registry = ingest(&payload(), &BoardConfig::default());
        let exported = export(&registry);
        let parsed = from_json_str(&to_json_pretty(&exported).unwrap()).unwrap();
        assert_eq!(parsed, exported);
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

        assert_eq!(
            export_file_name("stops.csv", "routes", date),
            "routes-stops-2025-03-14.json"
        );
        assert_eq!(
            export_file_name("/tmp/March Deliveries.xlsx", "routes", date),
            "routes-March_Deliveries-2025-03-14.json"
        );
        assert_eq!(
            export_file_name("", "plan", date),
            "plan-upload-2025-03-14.json"
        );
    }
}
