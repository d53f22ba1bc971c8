mod generate;
mod probe;
mod watch;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "argallery",
    version,
    about = "Manifest builder and AR launch resolver for static model galleries",
    long_about = "Argallery scans a directory of .usdz/.glb models and thumbnails into a JSON \
                  manifest the gallery page serves as-is, and resolves which AR launch path \
                  (Apple Quick Look or Google Scene Viewer) a given visitor environment gets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the model directory and write the gallery manifest
    #[command(
        long_about = "Scans a flat model directory, groups files by base name and writes the \
                            catalog manifest atomically. Orphan thumbnails are skipped with a warning."
    )]
    Generate {
        /// Directory containing .usdz/.glb models and their thumbnails
        #[arg(value_name = "MODEL_DIR", default_value = "model")]
        model_dir: PathBuf,
        /// Where to write the manifest JSON
        #[arg(short, long, value_name = "FILE", default_value = "data/models.json")]
        output: PathBuf,
    },
    /// Rebuild the manifest whenever the model directory changes
    #[command(
        long_about = "Builds the manifest once, then watches the model directory and rebuilds \
                            after changes settle. Only .usdz/.glb/thumbnail files trigger a rebuild."
    )]
    Watch {
        /// Directory containing .usdz/.glb models and their thumbnails
        #[arg(value_name = "MODEL_DIR", default_value = "model")]
        model_dir: PathBuf,
        /// Where to write the manifest JSON
        #[arg(short, long, value_name = "FILE", default_value = "data/models.json")]
        output: PathBuf,
    },
    /// Resolve AR availability for a device signature against a manifest
    #[command(
        long_about = "Classifies a raw User-Agent string, loads the manifest and prints the \
                            availability decision and launch target for each entry as JSON."
    )]
    Probe {
        /// Raw User-Agent string to classify
        #[arg(long, value_name = "SIGNATURE")]
        user_agent: String,
        /// Manifest to resolve against
        #[arg(long, value_name = "FILE", default_value = "data/models.json")]
        manifest: PathBuf,
        /// Page URL that relative asset paths resolve against
        #[arg(long, value_name = "URL", default_value = "https://localhost:8080/")]
        page: String,
        /// Restrict output to a single model id
        #[arg(long, value_name = "ID")]
        model: Option<String>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // One log file per subcommand under ~/.argallery/logs.
    let component = match &cli.command {
        Commands::Generate { .. } => "generate",
        Commands::Watch { .. } => "watch",
        Commands::Probe { .. } => "probe",
    };
    let stderr_logs = !matches!(cli.command, Commands::Probe { .. });
    let _guard = argallery_core::logging::init_logging(component, stderr_logs);

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Generate { model_dir, output } => rt.block_on(generate::run(model_dir, output)),
        Commands::Watch { model_dir, output } => rt.block_on(watch::run(model_dir, output)),
        Commands::Probe {
            user_agent,
            manifest,
            page,
            model,
        } => rt.block_on(probe::run(user_agent, manifest, page, model)),
    }
}
