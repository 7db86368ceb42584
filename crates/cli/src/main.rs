use anyhow::Result;
use asset_salvage::commands::{
    analyze_command, classify_command, init_config_command, list_detectors_command,
    PipelineOverrides,
};
use asset_salvage::{verbosity_filter, DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_DIR};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Recover SVG and image assets embedded in JavaScript string literals.
///
/// This CLI is a thin wrapper around `salvage-core` (exposed in code as
/// `salvage_core`). All substantive logic lives in the library.
#[derive(Parser, Debug)]
#[command(
    name = "asset-salvage",
    version,
    about = "Recover SVG and image assets from JavaScript string literals",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a JavaScript file, or every `*.js` file in a directory.
    ///
    /// For each source this writes, under `<out>/<name>/`:
    /// - one file per recovered asset (`svg_extracted_N.svg`, `base64_image_N.<ext>`, `inline_svg_N.svg`)
    /// - `uncategorized_literals_<name>.txt` with the leftover literals, longest first
    /// - `analysis.json` with the results record
    Analyze {
        /// Source file or directory.
        input: String,

        /// Output root directory.
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        out: String,

        /// Config file (.json, .yaml or .yml). Flags override its values.
        #[arg(long)]
        config: Option<String>,

        /// viewBox heuristic for path data: min-max-extent or max-square.
        #[arg(long)]
        viewbox: Option<String>,

        /// Keep only the first detector hit per literal.
        #[arg(long, default_value_t = false)]
        first_match: bool,

        /// Process files on a thread pool.
        #[arg(long, default_value_t = false)]
        parallel: bool,

        /// Keep existing files in per-source output directories.
        #[arg(long, default_value_t = false)]
        no_clean: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Classify a single literal and print what would be recovered from it.
    Classify {
        /// The literal text (without surrounding quotes).
        literal: String,

        /// viewBox heuristic for path data: min-max-extent or max-square.
        #[arg(long)]
        viewbox: Option<String>,

        /// Keep only the first detector hit.
        #[arg(long, default_value_t = false)]
        first_match: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List detectors in priority order.
    Detectors {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write a default config file.
    InitConfig {
        /// Destination path; the extension picks JSON or YAML.
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        path: String,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn init_tracing(verbose: u8) {
    let filter = if verbose > 0 {
        EnvFilter::new(verbosity_filter(verbose))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity_filter(0)))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Analyze { input, out, config, viewbox, first_match, parallel, no_clean, json } => {
            let overrides = PipelineOverrides { viewbox, first_match, parallel, no_clean };
            analyze_command(&input, &out, config.as_deref(), &overrides, json)?
        }
        Command::Classify { literal, viewbox, first_match, json } => {
            classify_command(&literal, viewbox.as_deref(), first_match, json)?
        }
        Command::Detectors { json } => list_detectors_command(json)?,
        Command::InitConfig { path, force } => init_config_command(&path, force)?,
    }

    Ok(())
}
