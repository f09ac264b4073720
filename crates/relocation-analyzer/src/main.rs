//! Global Relocation Analyzer CLI
//!
//! Usage:
//!   relocation-analyzer analyze --from IN --target NL --target CA --target AU
//!   relocation-analyzer analyze -t NL,CH --climate 10 --format json -o report.json
//!   relocation-analyzer compare IN NL
//!   relocation-analyzer countries

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relocation_analyzer::dataset::{PROFESSIONS, VISA_TYPES};
use relocation_analyzer::report::{self, OutputFormat};
use relocation_analyzer::selection::ToggleOutcome;
use relocation_analyzer::{
    analyze, compare, loader, Config, Dataset, PreferenceDimension, ScoreJitter, SelectionState,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "relocation-analyzer",
    about = "Score and rank candidate countries for relocation",
    version
)]
struct Cli {
    /// Config file (TOML)
    #[arg(
        short,
        long,
        global = true,
        env = "RELOCATION_CONFIG",
        default_value = "relocation.toml"
    )]
    config: PathBuf,

    /// Country dataset JSON, replacing the embedded one
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score and rank up to three target countries
    Analyze {
        /// Target country code (repeatable, at most 3)
        #[arg(short, long = "target", value_delimiter = ',', required = true)]
        targets: Vec<String>,

        /// Current country code
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        profession: Option<String>,

        #[arg(long)]
        visa_type: Option<String>,

        /// Economic opportunities weight (1-10)
        #[arg(long)]
        economic: Option<f64>,

        /// Quality of life weight (1-10)
        #[arg(long)]
        quality: Option<f64>,

        /// Safety and security weight (1-10)
        #[arg(long)]
        safety: Option<f64>,

        /// Healthcare quality weight (1-10)
        #[arg(long)]
        healthcare: Option<f64>,

        /// Climate suitability weight (1-10)
        #[arg(long)]
        climate: Option<f64>,

        /// Enable score jitter with this seed
        #[arg(long)]
        jitter_seed: Option<u64>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare every metric of two countries
    Compare {
        source: String,
        target: String,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List available countries
    Countries {
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List selectable professions
    Professions {
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List selectable visa types
    VisaTypes {
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("relocation_analyzer=debug")
    } else {
        EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "relocation_analyzer=info".into()),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_dataset(cli_path: Option<&Path>, config: &Config) -> Result<Dataset> {
    match cli_path.or(config.dataset.path.as_deref()) {
        Some(path) => loader::load_dataset(path)
            .with_context(|| format!("failed to load dataset {}", path.display())),
        None => Ok(Dataset::embedded()?),
    }
}

fn emit(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            info!("Writing report to {:?}", path);
            std::fs::write(path, contents)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => print!("{}", contents),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.config);
    let dataset = load_dataset(cli.dataset.as_deref(), &config)?;
    let default_format = config.output.format;

    match cli.command {
        Commands::Analyze {
            targets,
            from,
            profession,
            visa_type,
            economic,
            quality,
            safety,
            healthcare,
            climate,
            jitter_seed,
            format,
            output,
        } => {
            let mut state = SelectionState::new().with_preferences(config.user_preferences());

            if let Some(code) = from {
                state.set_current_country(&code);
            }
            for code in &targets {
                if state.is_target(code) {
                    warn!("Target {} given twice, keeping the first", code);
                    continue;
                }
                if state.toggle_target(code) == ToggleOutcome::Full {
                    warn!("At most 3 targets are analyzed, ignoring {}", code);
                }
            }
            state.set_profession(profession);
            if let Some(visa) = visa_type {
                state.set_visa_type(visa);
            }

            let overrides = [
                (PreferenceDimension::EconomicOpportunities, economic),
                (PreferenceDimension::QualityOfLife, quality),
                (PreferenceDimension::SafetyAndSecurity, safety),
                (PreferenceDimension::HealthcareQuality, healthcare),
                (PreferenceDimension::ClimateSuitability, climate),
            ];
            for (dimension, value) in overrides {
                if let Some(v) = value {
                    state.set_preference(dimension, v);
                }
            }

            let mut jitter = jitter_seed
                .map(ScoreJitter::new)
                .or_else(|| config.jitter.build());

            let analysis = analyze(&dataset, &state, jitter.as_mut());
            let rendered = report::render_analysis(&analysis, format.unwrap_or(default_format))?;
            emit(&rendered, output.as_deref())?;
        }

        Commands::Compare {
            source,
            target,
            format,
        } => {
            let comparison = compare::compare(&dataset, &source, &target)?;
            let rendered =
                report::render_comparison(&comparison, format.unwrap_or(default_format))?;
            emit(&rendered, None)?;
        }

        Commands::Countries { format } => {
            emit(
                &report::render_countries(&dataset, format.unwrap_or(default_format))?,
                None,
            )?;
        }

        Commands::Professions { format } => {
            emit(
                &report::render_catalog(&PROFESSIONS, format.unwrap_or(default_format))?,
                None,
            )?;
        }

        Commands::VisaTypes { format } => {
            emit(
                &report::render_catalog(&VISA_TYPES, format.unwrap_or(default_format))?,
                None,
            )?;
        }
    }

    Ok(())
}
