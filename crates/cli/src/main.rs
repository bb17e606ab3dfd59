use anyhow::Result;
use clap::{Parser, Subcommand};

use symbol_sleuth::commands;

/// Crash-telemetry build bisection CLI.
///
/// This CLI is a thin wrapper around `sleuth-core` (exposed in code as
/// `sleuth_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "symbol-sleuth",
    version,
    about = "Locate the build that introduced a native regression by bisecting debug-symbol listings",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize an investigation workspace at the given root.
    ///
    /// This will:
    /// - Create a `.sleuth` metadata directory with an artifacts subdirectory.
    /// - Write a `.sleuth/investigation.json` config file.
    Init {
        /// Workspace root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Product name queried in the crash-report search.
        #[arg(long)]
        product: Option<String>,

        /// Release channel filter.
        #[arg(long)]
        channel: Option<String>,

        /// Inclusive lower bound on build ids considered.
        #[arg(long)]
        min_build_id: Option<String>,

        /// Platform filter.
        #[arg(long)]
        platform: Option<String>,

        /// Debug file name of the module under investigation.
        #[arg(long)]
        module: Option<String>,

        /// Marker substring unique to the regressed code path.
        #[arg(long)]
        marker: Option<String>,

        /// Crash-report API base URL.
        #[arg(long)]
        crash_stats_url: Option<String>,

        /// Symbol-store base URL.
        #[arg(long)]
        symbols_url: Option<String>,
    },

    /// Show the configuration and artifact status of an existing workspace.
    Info {
        /// Workspace root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,
    },

    /// Resolve each build's debug identifier from crash reports and persist
    /// the build map.
    Resolve {
        /// Workspace root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,
    },

    /// Bisect the resolved build series for the first build exhibiting the
    /// marker, then persist both boundary listings.
    Bisect {
        /// Workspace root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Re-evaluate boundary-adjacent builds as a monotonicity diagnostic.
        #[arg(long, default_value_t = false)]
        check: bool,
    },

    /// Diff the persisted boundary listings into candidate function names.
    Diff {
        /// Workspace root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Emit the candidate list as JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init {
            root,
            product,
            channel,
            min_build_id,
            platform,
            module,
            marker,
            crash_stats_url,
            symbols_url,
        } => commands::init_command(
            &root,
            commands::InitOverrides {
                product,
                channel,
                min_build_id,
                platform,
                module,
                marker,
                crash_stats_url,
                symbols_url,
            },
        )?,
        Command::Info { root } => commands::info_command(&root)?,
        Command::Resolve { root } => commands::resolve_command(&root)?,
        Command::Bisect { root, check } => commands::bisect_command(&root, check)?,
        Command::Diff { root, json } => commands::diff_command(&root, json)?,
    }

    Ok(())
}
