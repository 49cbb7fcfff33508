//! Manifest reconciliation.
//!
//! The manifest is rebuilt from scratch on every run:
//!
//! 1. Read the existing `manifest.json`, if any, and remember each file's
//!    `dateAdded`.
//! 2. Summarize every other `*.json` file in the output directory. Files that
//!    cannot be read or decoded are skipped.
//! 3. Give each entry its remembered date, or today's date if the file is new.
//! 4. Sort newest first, then by topic in reverse alphabetical order, and
//!    overwrite `manifest.json`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::writer::write_atomic;

/// File name of the manifest inside the output directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Summary of one quiz file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Quiz file name, relative to the output directory.
    pub file: String,
    pub topic: String,
    pub question_count: usize,
    /// `YYYY-MM-DD` date the file first appeared in the manifest.
    pub date_added: String,
}

/// Index of every quiz in the output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub quizzes: Vec<ManifestEntry>,
}

/// Rebuild the manifest in `output_dir`, dating new quizzes with today's
/// local date.
pub fn reconcile(output_dir: &Path) -> Result<Manifest> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    reconcile_on(output_dir, &today)
}

/// Rebuild the manifest in `output_dir`, dating new quizzes with `today`.
pub fn reconcile_on(output_dir: &Path, today: &str) -> Result<Manifest> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!("failed to create output directory: {}", output_dir.display())
    })?;

    let manifest_path = output_dir.join(MANIFEST_FILE_NAME);
    let prior_dates = read_prior_dates(&manifest_path);

    let mut quizzes = Vec::new();
    for path in list_quiz_files(output_dir)? {
        let Some(file) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            tracing::warn!("skipping {}: file name is not valid UTF-8", path.display());
            continue;
        };

        match summarize(&path) {
            Ok((topic, question_count)) => {
                let date_added = prior_dates
                    .get(&file)
                    .cloned()
                    .unwrap_or_else(|| today.to_string());
                quizzes.push(ManifestEntry {
                    file,
                    topic,
                    question_count,
                    date_added,
                });
            }
            Err(e) => {
                tracing::warn!("skipping {}: {e:#}", path.display());
            }
        }
    }

    sort_entries(&mut quizzes);

    let manifest = Manifest { quizzes };
    let json = serde_json::to_string_pretty(&manifest)?;
    write_atomic(&manifest_path, &json)
        .with_context(|| format!("failed to write manifest: {}", manifest_path.display()))?;

    tracing::info!(
        path = %manifest_path.display(),
        quizzes = manifest.quizzes.len(),
        "manifest updated"
    );
    Ok(manifest)
}

/// Newest first; same-date entries in reverse alphabetical order by topic.
fn sort_entries(entries: &mut [ManifestEntry]) {
    entries.sort_by(|a, b| (&b.date_added, &b.topic).cmp(&(&a.date_added, &a.topic)));
}

/// Map of quiz file name to its recorded `dateAdded`.
///
/// A missing or malformed manifest yields an empty map.
fn read_prior_dates(manifest_path: &Path) -> HashMap<String, String> {
    let mut dates = HashMap::new();

    let Ok(content) = std::fs::read_to_string(manifest_path) else {
        return dates;
    };
    let value: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("ignoring unreadable manifest {}: {e}", manifest_path.display());
            return dates;
        }
    };

    let entries = value
        .get("quizzes")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for entry in entries {
        let file = entry.get("file").and_then(Value::as_str);
        let date = entry.get("dateAdded").and_then(Value::as_str);
        if let (Some(file), Some(date)) = (file, date) {
            dates.insert(file.to_string(), date.to_string());
        }
    }

    dates
}

/// Every `*.json` file in `dir` except the manifest, sorted by name.
pub fn list_quiz_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let is_manifest = path
            .file_name()
            .is_some_and(|name| name == MANIFEST_FILE_NAME);
        if path.is_file() && is_json && !is_manifest {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Topic and question count of one quiz file.
///
/// The topic falls back to the file stem and the count to zero when the
/// document lacks them.
fn summarize(path: &Path) -> Result<(String, usize)> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    let Value::Object(doc) = value else {
        anyhow::bail!("expected a JSON object");
    };

    let topic = doc
        .get("topic")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_default();
    let question_count = doc
        .get("questions")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    Ok((topic, question_count))
}
