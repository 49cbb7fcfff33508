//! The `pagequiz reconcile` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(output_dir: PathBuf) -> Result<()> {
    let manifest = pagequiz_store::reconcile(&output_dir)?;
    println!("Updated manifest with {} quiz(es)", manifest.quizzes.len());
    Ok(())
}
