mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "showroom",
    about = "Maintain the demo company micro-site directory from issue-tracker events",
    version,
    propagate_version = true
)]
struct Cli {
    /// Site root (default: auto-detect from company-template/ or .git/)
    #[arg(long, global = true, env = "SHOWROOM_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a company micro-site from a creation issue
    Create {
        /// Issue body text
        #[arg(long, env = "ISSUE_BODY", default_value = "")]
        body: String,
    },

    /// Archive or restore a company, as selected by the issue title
    Archive {
        /// Issue title ("Archive company: …" / "Restore company: …")
        #[arg(long, env = "ISSUE_TITLE", default_value = "")]
        title: String,

        /// Issue body carrying `**Company id:** <slug>`
        #[arg(long, env = "ISSUE_BODY", default_value = "")]
        body: String,
    },

    /// Rebuild assets/sites.json from the folders on disk
    Regenerate,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Create { body } => cmd::create::run(&root, &body, cli.json),
        Commands::Archive { title, body } => cmd::archive::run(&root, &title, &body, cli.json),
        Commands::Regenerate => cmd::regenerate::run(&root, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
