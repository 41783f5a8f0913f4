//! Site CLI
//!
//! Command-line interface for the holding site runtime: read content,
//! inspect section designs and manage the admin session.

mod commands;
mod config;
mod display;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use config::CliConfig;

#[derive(Parser)]
#[command(name = "site")]
#[command(version, about = "Holding site content and design runtime")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory (default: platform data dir + /holding-site)
    #[arg(long, global = true, env = "SITE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Hosted database URL
    #[arg(long, global = true, env = "SITE_REMOTE_URL")]
    remote_url: Option<String>,

    /// Public API key
    #[arg(long, global = true, env = "SITE_ANON_KEY", hide_env_values = true)]
    anon_key: Option<String>,

    /// Run without the hosted database
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and edit section content
    #[command(subcommand)]
    Content(ContentCommands),

    /// Inspect section designs
    #[command(subcommand)]
    Design(DesignCommands),

    /// Manage the admin session
    #[command(subcommand)]
    Session(SessionCommands),

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ContentCommands {
    /// Print the content of a section
    Get {
        /// Section key (e.g. "hero", "careers_page")
        key: String,
    },

    /// Replace the content of a section from a JSON file
    Set {
        /// Section key
        key: String,

        /// JSON file with the new content
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum DesignCommands {
    /// Show the active colours of a section
    Colors {
        /// Section key
        section: String,
    },

    /// Show the active layout of a section
    Layout {
        /// Section key
        section: String,
    },

    /// Fetch presets and print the page-wide style variables
    Refresh,
}

#[derive(Subcommand)]
enum SessionCommands {
    /// Show the stored admin session
    Show,

    /// Start an admin session
    Start {
        /// Admin user (e.g. an email address)
        user: String,
    },

    /// End the admin session
    Clear,
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site=info".parse()?)
                .add_directive("site_core=info".parse()?),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "site", &mut io::stdout());
        return Ok(());
    }

    init_logging()?;

    let config = CliConfig::new(cli.data_dir, cli.remote_url, cli.anon_key, cli.offline);
    let mut site = config.open_site()?;
    config::report_gate(&site.start().await);

    match cli.command {
        Commands::Content(cmd) => match cmd {
            ContentCommands::Get { key } => commands::content::get(&site, &key).await?,
            ContentCommands::Set { key, file } => {
                commands::content::set(&site, &key, &file).await?;
            }
        },
        Commands::Design(cmd) => match cmd {
            DesignCommands::Colors { section } => {
                commands::design::colors(&site, &section).await;
            }
            DesignCommands::Layout { section } => {
                commands::design::layout(&site, &section).await;
            }
            DesignCommands::Refresh => commands::design::refresh(&site).await?,
        },
        Commands::Session(cmd) => match cmd {
            SessionCommands::Show => commands::session::show(&site)?,
            SessionCommands::Start { user } => commands::session::start(&site, &user)?,
            SessionCommands::Clear => commands::session::clear(&site)?,
        },
        Commands::Completions { .. } => {}
    }

    Ok(())
}
