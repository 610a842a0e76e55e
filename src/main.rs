//! idforge CLI: translate building-model documents to IDF.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use idforge::idf;
use idforge::model::load::load_model;
use idforge::options::TranslatorOptions;
use idforge::translate::ForwardTranslator;

#[derive(Parser)]
#[command(name = "idforge", version, about = "Building-model to IDF forward translator")]
struct Cli {
    /// Translator options file (TOML). Defaults are used when absent.
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a model document and write the IDF output.
    Translate {
        /// Path to the model document (JSON).
        #[arg(long)]
        model: PathBuf,

        /// Output IDF path.
        #[arg(long)]
        out: PathBuf,
    },

    /// Load a model document and report whether its graph is traversable.
    Validate {
        /// Path to the model document (JSON).
        #[arg(long)]
        model: PathBuf,
    },

    /// Write a default options file to edit.
    Options {
        /// Destination path for the TOML template.
        #[arg(long, default_value = "idforge.toml")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let options = match &cli.options {
        Some(path) => TranslatorOptions::load(path).into_diagnostic()?,
        None => TranslatorOptions::default(),
    };

    match cli.command {
        Commands::Translate { model, out } => {
            let model = load_model(&model).into_diagnostic()?;
            let mut translator = ForwardTranslator::new(options);
            let workspace = translator.translate(&model).into_diagnostic()?;

            // Always write the output, then report: the caller decides from
            // the diagnostic summary whether the file is fit for use.
            let mut file = std::fs::File::create(&out).into_diagnostic()?;
            idf::write_idf(&workspace, &mut file).into_diagnostic()?;

            let warnings = translator.warnings();
            let errors = translator.errors();
            println!(
                "Wrote {} records to {} ({} warnings, {} errors)",
                workspace.len(),
                out.display(),
                warnings.len(),
                errors.len()
            );
            for diagnostic in warnings.iter().chain(errors.iter()) {
                println!("  {diagnostic}");
            }
            if !errors.is_empty() {
                std::process::exit(1);
            }
        }

        Commands::Validate { model } => {
            let model = load_model(&model).into_diagnostic()?;
            let broken = model.validate();
            if broken.is_empty() {
                println!("Model is traversable: {} objects", model.len());
            } else {
                for error in &broken {
                    println!("  {error}");
                }
                println!("{} broken reference(s)", broken.len());
                std::process::exit(1);
            }
        }

        Commands::Options { out } => {
            TranslatorOptions::default().save(&out).into_diagnostic()?;
            println!("Wrote default options to {}", out.display());
        }
    }

    Ok(())
}
