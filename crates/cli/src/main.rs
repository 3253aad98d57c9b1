use anyhow::Context;
use clap::{Parser, Subcommand};
use encounter_core::config::{content_depth_from_env_value, load_config};
use encounter_core::constants::DEFAULT_CONFIG_FILENAME;
use encounter_core::{canonicalize, AssessmentData, CoreConfig, DiagnosisDraft, DiagnosisRecord};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "encounter")]
#[command(about = "Inspect and migrate diagnosis specialization records")]
struct Cli {
    /// YAML config file (defaults to ENCOUNTER_CONFIG, then ./encounter.yaml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Nested object depth inspected when deciding whether a specialization has content
    #[arg(long, global = true)]
    content_depth: Option<usize>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of specialization identifiers
    Canonicalize {
        /// Raw identifiers
        raw: Vec<String>,
    },
    /// Load a record and print the resulting specialization session
    Hydrate {
        /// Diagnosis record JSON file
        record: PathBuf,
    },
    /// Print the deduplicated "previously worked on" tabs
    Tabs {
        /// Diagnosis record JSON file
        record: PathBuf,
    },
    /// Switch specialization and print the record that would be saved
    Switch {
        /// Diagnosis record JSON file
        record: PathBuf,
        /// Specialization to switch to
        specialty: String,
        /// JSON object shallow-merged into the new active assessment
        #[arg(long)]
        edit: Option<String>,
        /// Resolve aliases against stored specializations before switching
        #[arg(long)]
        canonical: bool,
    },
    /// Rewrite a record in the multi-specialization shape
    Migrate {
        /// Diagnosis record JSON file
        record: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("encounter=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.config, cli.content_depth)?;

    match cli.command {
        Some(Commands::Canonicalize { raw }) => {
            for r in raw {
                println!("{:?} -> {}", r, canonicalize(&r));
            }
        }
        Some(Commands::Hydrate { record }) => {
            let draft = DiagnosisDraft::load(read_record(&record)?);
            let session = draft.session();

            println!("Active: {}", session.active_type());
            println!(
                "Data: {}",
                serde_json::Value::Object(session.active_data().clone())
            );
            println!(
                "Archive: {}",
                session.archive().keys().collect::<Vec<_>>().join(", ")
            );
            if draft.report().legacy_migrated {
                println!("Migrated from legacy single-specialty fields");
            }
            for field in &draft.report().recovered_fields {
                println!("Recovered malformed field: {}", field);
            }
        }
        Some(Commands::Tabs { record }) => {
            let draft = DiagnosisDraft::load(read_record(&record)?);
            let tabs = draft.session().tabs(&config.content_predicate());
            if tabs.is_empty() {
                println!("No specializations worked on.");
            }
            for tab in tabs {
                println!(
                    "{}{} ({} as {})",
                    if tab.is_active { "* " } else { "  " },
                    tab.label,
                    tab.canonical_type,
                    tab.raw_type
                );
            }
        }
        Some(Commands::Switch {
            record,
            specialty,
            edit,
            canonical,
        }) => {
            let mut draft = DiagnosisDraft::load(read_record(&record)?);
            let session = draft.session_mut();
            if canonical {
                session.switch_to_canonical(&specialty);
            } else {
                session.switch_to(specialty);
            }
            if let Some(edit) = edit {
                let partial: AssessmentData =
                    serde_json::from_str(&edit).context("--edit must be a JSON object")?;
                session.edit_active_data(partial);
            }

            println!("{}", serde_json::to_string_pretty(&draft.to_record())?);
        }
        Some(Commands::Migrate { record, output }) => {
            let mut draft = DiagnosisDraft::load(read_record(&record)?);
            let json = serde_json::to_string_pretty(&draft.to_record())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!("wrote migrated record to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        None => {
            println!("Use 'encounter --help' for commands");
        }
    }

    Ok(())
}

/// Resolve configuration once: flag, then environment, then config file, then defaults.
fn resolve_config(
    config_path: Option<PathBuf>,
    content_depth: Option<usize>,
) -> anyhow::Result<CoreConfig> {
    let config_path = config_path
        .or_else(|| std::env::var_os("ENCOUNTER_CONFIG").map(PathBuf::from))
        .or_else(|| {
            let default = PathBuf::from(DEFAULT_CONFIG_FILENAME);
            default.is_file().then_some(default)
        });

    let file_config = match config_path {
        Some(path) => load_config(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CoreConfig::default(),
    };

    let env_depth = content_depth_from_env_value(std::env::var("ENCOUNTER_CONTENT_DEPTH").ok())?;

    match content_depth.or(env_depth) {
        Some(depth) => Ok(CoreConfig::new(depth)?),
        None => Ok(file_config),
    }
}

fn read_record(path: &Path) -> anyhow::Result<DiagnosisRecord> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    DiagnosisRecord::from_json_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))
}
