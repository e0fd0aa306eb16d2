//! Export integration harness.
//!
//! # What this covers
//!
//! - **Filename shape**: `logs-YYYY-MM-DDTHH-MM-SS.txt` — colons and the
//!   sub-second/timezone suffix never reach the filesystem.
//! - **Content fidelity**: the exported file holds the exact output bytes.
//! - **End-to-end**: a concatenated paste extracted through the session
//!   layer and exported lands on disk intact.
//!
//! # Running
//!
//! ```sh
//! cargo test --test export_harness
//! ```

mod common;
use common::*;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use tbx_core::export::{export_filename, write_export};
use tbx_core::{session, ExtractionOutcome};

#[test]
fn filename_is_filesystem_safe() {
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 9).unwrap();
    let name = export_filename(now);
    assert_eq!(name, "logs-2024-01-15T23-59-09.txt");
    assert!(!name.contains(':'));
    assert!(!name.contains('.') || name.ends_with(".txt"));
}

#[test]
fn exported_file_holds_exact_output() {
    let dir = tempfile::tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
    let path = write_export(dir.path(), "a\nbb", now).unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), "a\nbb");
}

#[test]
fn session_output_exports_end_to_end() {
    let outcome = session::run(&concatenated(CORPUS_DOCKER));
    let ExtractionOutcome::Extracted { text, stats } = outcome else {
        panic!("expected Extracted");
    };
    assert_eq!(stats.total_count, CORPUS_DOCKER.len());

    let dir = tempfile::tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
    let path = write_export(dir.path(), &text, now).unwrap();
    let on_disk = std::fs::read_to_string(path).unwrap();
    assert_eq!(on_disk, text);
    assert_eq!(on_disk, docker_logs().join("\n"));
}
