//! The `pagequiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use pagequiz_core::parser::{parse_quiz_response, validate_quiz};

pub fn execute(output_dir: PathBuf) -> Result<()> {
    let files = pagequiz_store::list_quiz_files(&output_dir)?;

    let mut total_warnings = 0;
    let mut invalid = 0;

    for path in &files {
        let name = path.display();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                println!("{name}: ERROR: {e}");
                invalid += 1;
                continue;
            }
        };

        let quiz = match parse_quiz_response(&content) {
            Ok(quiz) => quiz,
            Err(e) => {
                println!("{name}: ERROR: {e:#}");
                invalid += 1;
                continue;
            }
        };

        println!("{name}: {} ({} questions)", quiz.topic, quiz.questions.len());
        let warnings = validate_quiz(&quiz);
        for w in &warnings {
            let prefix = w
                .question
                .map(|n| format!("  [question {n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if files.is_empty() {
        println!("No quiz files found in {}.", output_dir.display());
    } else if total_warnings == 0 && invalid == 0 {
        println!("All quizzes valid.");
    } else if total_warnings > 0 {
        println!("\n{total_warnings} warning(s) found.");
    }

    anyhow::ensure!(
        invalid == 0,
        "{invalid} of {} quiz file(s) failed to parse",
        files.len()
    );
    Ok(())
}
