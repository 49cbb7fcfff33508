//! The `pagequiz generate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::{Cell, Table};

use pagequiz_core::engine::{generate_quiz, parse_failure};
use pagequiz_core::model::Quiz;
use pagequiz_core::prompt::generation_prompt;
use pagequiz_ingest::{discover_images, load_image, SUPPORTED_EXTENSIONS};
use pagequiz_providers::config::load_config_from;
use pagequiz_providers::create_provider;
use pagequiz_store::write_quiz;

pub async fn execute(
    topic: String,
    topics_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    model: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(model) = model {
        config.model = model;
    }
    let topics_dir = topics_dir.unwrap_or_else(|| config.topics_dir.clone());
    let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());

    let topic_dir = topics_dir.join(&topic);
    if !topic_dir.exists() {
        eprintln!("To create a new topic, run:");
        eprintln!("  mkdir -p {}", topic_dir.display());
        eprintln!("  # Then add images of textbook pages to {}/", topic_dir.display());
        anyhow::bail!("topic directory not found: {}", topic_dir.display());
    }
    anyhow::ensure!(
        topic_dir.is_dir(),
        "{} is not a directory",
        topic_dir.display()
    );
    let topic_name = topic_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(&topic)
        .to_string();

    // Fail on a missing credential before doing any work.
    let provider = create_provider(&config)?;

    let images = discover_images(&topic_dir)?;
    if images.is_empty() {
        anyhow::bail!(
            "no images found in {}. Supported formats: {}",
            topic_dir.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }

    println!("Found {} images in {}", images.len(), topic_dir.display());
    for path in &images {
        println!("  - {}", file_name(path));
    }

    let mut parts = Vec::with_capacity(images.len());
    for path in &images {
        println!("Loading {}...", file_name(path));
        parts.push(load_image(path)?);
    }

    println!("\nSending to {} for analysis...", config.model);
    let request = config.generate_request(generation_prompt(), parts);
    let generated = match generate_quiz(provider.as_ref(), &request).await {
        Ok(generated) => generated,
        Err(e) => {
            if let Some(parse) = parse_failure(&e) {
                eprintln!("Raw response:");
                eprintln!("{}", parse.raw());
            }
            return Err(e);
        }
    };

    let path = write_quiz(&output_dir, &topic_name, &generated.quiz)?;
    tracing::info!(
        path = %path.display(),
        model = %generated.model,
        prompt_tokens = generated.token_usage.prompt_tokens,
        completion_tokens = generated.token_usage.completion_tokens,
        latency_ms = generated.latency_ms,
        "quiz written"
    );

    println!("\nGenerated {} questions", generated.quiz.questions.len());
    println!("Saved to: {}", path.display());
    print_breakdown(&generated.quiz);

    if !generated.warnings.is_empty() {
        println!("\n{} warning(s):", generated.warnings.len());
        for w in &generated.warnings {
            match w.question {
                Some(n) => println!("  [question {n}] {}", w.message),
                None => println!("  {}", w.message),
            }
        }
    }

    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn print_breakdown(quiz: &Quiz) {
    let mut table = Table::new();
    table.set_header(vec!["Type", "Count"]);
    for (kind, count) in quiz.type_breakdown() {
        table.add_row(vec![Cell::new(kind), Cell::new(count)]);
    }

    println!("\nQuestion breakdown:");
    println!("{table}");
}
