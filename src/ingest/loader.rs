use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::ingest::records::{flatten_match, RawMatch, Skip};
use crate::state::EventTable;
use crate::types::DeliveryEvent;

#[derive(Debug, Default)]
pub struct IngestStats {
    pub files_total: usize,
    /// Files that were not well-formed JSON at all.
    pub unreadable: usize,
    pub skipped_missing_info: usize,
    pub skipped_not_enough_teams: usize,
    pub matches_loaded: usize,
    pub events: usize,
}

/// Load every `*.json` match record under `dir` and build the event table.
///
/// Malformed records are logged and skipped; only a directory yielding zero
/// events is an error. Files are visited in name order so the table is
/// deterministic across runs.
pub fn load_dir(dir: &Path) -> Result<(EventTable, IngestStats)> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut stats = IngestStats::default();
    let mut matches: Vec<Vec<DeliveryEvent>> = Vec::new();

    for path in &paths {
        stats.files_total += 1;
        let match_id = match_id_from_path(path);

        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                warn!(file = %path.display(), "unreadable match file: {e}");
                stats.unreadable += 1;
                continue;
            }
        };

        let raw: RawMatch = match serde_json::from_str(&text) {
            Ok(m) => m,
            Err(e) => {
                warn!(file = %path.display(), "malformed match record: {e}");
                stats.unreadable += 1;
                continue;
            }
        };

        match flatten_match(&match_id, &raw) {
            Ok((header, events)) => {
                debug!(
                    match_id = %header.match_id,
                    date = %header.date,
                    venue = %header.venue,
                    toss_decision = %header.toss_decision,
                    deliveries = events.len(),
                    "loaded match"
                );
                stats.matches_loaded += 1;
                stats.events += events.len();
                matches.push(events);
            }
            Err(skip) => {
                warn!(file = %path.display(), "skipping match record: {skip}");
                match skip {
                    Skip::MissingInfo => stats.skipped_missing_info += 1,
                    Skip::NotEnoughTeams => stats.skipped_not_enough_teams += 1,
                }
            }
        }
    }

    if stats.events == 0 {
        return Err(AppError::EmptyDataset(dir.display().to_string()));
    }

    let table = EventTable::build(matches.into_iter().flatten());
    info!(
        files = stats.files_total,
        matches = stats.matches_loaded,
        events = stats.events,
        unreadable = stats.unreadable,
        missing_info = stats.skipped_missing_info,
        not_enough_teams = stats.skipped_not_enough_teams,
        "ingest complete: {} events from {} matches",
        stats.events,
        stats.matches_loaded,
    );

    Ok((table, stats))
}

/// Match identifier is the file's basename without extension.
fn match_id_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const GOOD: &str = r#"{
        "info": {"dates": ["2024-03-22"], "season": "2024", "venue": "Eden Gardens",
                 "teams": ["Kolkata Knight Riders", "Sunrisers Hyderabad"]},
        "innings": [{"team": "Kolkata Knight Riders", "overs": [{"over": 0, "deliveries": [
            {"batter": "PD Salt", "bowler": "B Kumar", "runs": {"batter": 4, "extras": 0, "total": 4}}
        ]}]}]
    }"#;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut f = std::fs::File::create(dir.join(name)).expect("create fixture");
        f.write_all(contents.as_bytes()).expect("write fixture");
    }

    #[test]
    fn loads_good_files_and_counts_skips() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "1426262.json", GOOD);
        write_file(dir.path(), "no_info.json", r#"{"innings": []}"#);
        write_file(dir.path(), "garbage.json", "{ not json");
        write_file(dir.path(), "notes.txt", "ignored, wrong extension");

        let (table, stats) = load_dir(dir.path()).expect("one good record");
        assert_eq!(stats.files_total, 3);
        assert_eq!(stats.matches_loaded, 1);
        assert_eq!(stats.unreadable, 1);
        assert_eq!(stats.skipped_missing_info, 1);
        assert_eq!(stats.events, 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn match_id_comes_from_file_stem() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "1426262.json", GOOD);

        let (table, _) = load_dir(dir.path()).expect("one good record");
        assert_eq!(table.rows()[0].event.match_id, "1426262");
    }

    #[test]
    fn skipped_record_emits_no_partial_events() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Record has a full innings but only one team listed.
        write_file(
            dir.path(),
            "half.json",
            r#"{
                "info": {"dates": ["2024-04-01"], "teams": ["A"]},
                "innings": [{"team": "A", "overs": [{"over": 0, "deliveries": [
                    {"batter": "x", "runs": {"total": 1}}
                ]}]}]
            }"#,
        );
        write_file(dir.path(), "good.json", GOOD);

        let (table, stats) = load_dir(dir.path()).expect("good record still loads");
        assert_eq!(stats.skipped_not_enough_teams, 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn empty_dataset_is_terminal() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_file(dir.path(), "no_info.json", r#"{"innings": []}"#);

        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::EmptyDataset(_)));
    }
}
