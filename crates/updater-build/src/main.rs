use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use updater_build::target::list_targets;
use updater_build::{default_targets, BuildConfig, Toolchain, ToolchainError};

/// Setup logging based on verbose flag or RUST_LOG environment variable
fn setup_logging(verbose: bool) {
    // RUST_LOG env var takes precedence if set
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("updater_build=debug")
    } else {
        EnvFilter::new("updater_build=info")
    };

    // stdout belongs to the toolchain
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(name = "updater-build")]
#[command(version, about = "Cross-compile the updater for every release target", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: BuildConfig,

    /// List the release targets and exit
    #[arg(long)]
    list: bool,
}

fn run(cli: &Cli) -> Result<()> {
    if cli.list {
        list_targets();
        return Ok(());
    }

    let toolchain = Toolchain::from_config(&cli.config);
    toolchain.build_all(&default_targets())?;

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.config.verbose);

    if let Err(err) = run(&cli) {
        error!("{err:#}");
        let code = err
            .downcast_ref::<ToolchainError>()
            .map_or(1, ToolchainError::exit_code);
        std::process::exit(code);
    }
}
