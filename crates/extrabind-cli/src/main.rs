//! extrabind CLI - Generator driver
//!
//! Commands:
//! - `extrabind generate` - Write builders, binders and the navigator
//! - `extrabind check` - Validate an extrabind.toml manifest
//! - `extrabind plan` - Print the lowered plans as JSON

use clap::{Args, Parser, Subcommand};

mod check;
mod generate;
mod overrides;
mod plan;

use overrides::Overrides;

#[derive(Parser)]
#[command(name = "extrabind")]
#[command(author, version, about = "Type-state intent builders and extra binders", long_about = None)]
struct Cli {
    /// Log model construction detail
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every command that reads a manifest
#[derive(Args)]
struct ManifestArgs {
    /// Path to extrabind.toml (default: ./extrabind.toml)
    #[arg(short, long)]
    manifest: Option<String>,

    /// Never carry values through the opaque transport
    #[arg(long)]
    no_wrap: bool,

    /// Namespace of the navigator facade
    #[arg(long)]
    namespace: Option<String>,

    /// Simple name of the navigator facade
    #[arg(long)]
    navigator_name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Java sources
    Generate {
        #[command(flatten)]
        args: ManifestArgs,

        /// Output directory for generated code
        #[arg(short, long)]
        output: String,
    },

    /// Validate a manifest and report diagnostics
    Check {
        #[command(flatten)]
        args: ManifestArgs,
    },

    /// Print builder, binder and navigator plans as JSON
    Plan {
        #[command(flatten)]
        args: ManifestArgs,

        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
}

impl ManifestArgs {
    fn into_parts(self, debug: bool) -> (String, Overrides) {
        let path = self
            .manifest
            .unwrap_or_else(|| "extrabind.toml".to_string());
        let overrides = Overrides {
            debug,
            no_wrap: self.no_wrap,
            namespace: self.namespace,
            navigator_name: self.navigator_name,
        };
        (path, overrides)
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Generate { args, output } => {
            let (path, overrides) = args.into_parts(cli.debug);
            generate::run(&path, &output, &overrides)?;
        }
        Commands::Check { args } => {
            let (path, overrides) = args.into_parts(cli.debug);
            check::run(&path, &overrides)?;
        }
        Commands::Plan { args, compact } => {
            let (path, overrides) = args.into_parts(cli.debug);
            plan::run(&path, &overrides, compact)?;
        }
    }

    Ok(())
}
