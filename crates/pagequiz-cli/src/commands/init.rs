//! The `pagequiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("pagequiz.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new(".env.example"), SAMPLE_ENV)?;

    if Path::new("topics").is_dir() {
        println!("topics/ already exists, skipping.");
    } else {
        std::fs::create_dir_all("topics")?;
        println!("Created topics/");
    }

    println!("\nNext steps:");
    println!("  1. Copy .env.example to .env and fill in GEMINI_API_KEY");
    println!("  2. Add page images to topics/<topic-name>/");
    println!("  3. Run: pagequiz generate <topic-name>");
    println!("  4. Run: pagequiz reconcile");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# pagequiz configuration
#
# The API key is read from GEMINI_API_KEY (environment or .env).

model = "gemini-3-pro-preview"
temperature = 0.7
max_output_tokens = 32768
topics_dir = "topics"
output_dir = "quizzes"
"#;

const SAMPLE_ENV: &str = "GEMINI_API_KEY=\n";
