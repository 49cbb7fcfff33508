//! Quiz document output.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use pagequiz_core::model::Quiz;

/// Write `quiz` to `<output_dir>/<topic_name>.json`.
///
/// Creates `output_dir` (and parents) if needed and overwrites any existing
/// file for the topic. The JSON is 2-space indented with non-ASCII text
/// written as-is.
pub fn write_quiz(output_dir: &Path, topic_name: &str, quiz: &Quiz) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!("failed to create output directory: {}", output_dir.display())
    })?;

    let path = output_dir.join(format!("{topic_name}.json"));
    let json = serde_json::to_string_pretty(quiz)?;
    write_atomic(&path, &json)
        .with_context(|| format!("failed to write quiz: {}", path.display()))?;

    tracing::debug!(path = %path.display(), questions = quiz.questions.len(), "wrote quiz");
    Ok(path)
}

/// Replace `path` with `contents` through a temp file in the same directory,
/// so readers see either the old file or the complete new one.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
