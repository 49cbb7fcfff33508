//! pagequiz command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "pagequiz",
    version,
    about = "Generate quizzes from textbook page images"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a quiz from a topic's page images
    Generate {
        /// Topic name (directory name under the topics directory)
        topic: String,

        /// Directory containing topic folders [default: topics]
        #[arg(long)]
        topics_dir: Option<PathBuf>,

        /// Output directory for generated quizzes [default: quizzes]
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Model identifier override
        #[arg(long)]
        model: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Rebuild manifest.json from the quiz files
    Reconcile {
        /// Directory holding the quiz files
        #[arg(long, default_value = "quizzes")]
        output_dir: PathBuf,
    },

    /// Check quiz files against the quiz schema
    Validate {
        /// Directory holding the quiz files
        #[arg(long, default_value = "quizzes")]
        output_dir: PathBuf,
    },

    /// Create a starter config, .env template, and topics directory
    Init,
}

#[tokio::main]
async fn main() {
    // Credentials may live in .env; a missing file is fine.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pagequiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            topic,
            topics_dir,
            output_dir,
            model,
            config,
        } => commands::generate::execute(topic, topics_dir, output_dir, model, config).await,
        Commands::Reconcile { output_dir } => commands::reconcile::execute(output_dir),
        Commands::Validate { output_dir } => commands::validate::execute(output_dir),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
