//! CLI entry point for folio-rs

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands::theme::ThemeAction;
use folio_rs::ui::{Notification, Theme};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A data-driven personal portfolio page generator", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new portfolio site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate the page
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// Show or change the stored color theme
    Theme {
        #[arg(value_enum, default_value = "show")]
        action: ThemeCommand,

        /// Theme for `set`
        #[arg(value_enum, required_if_eq("action", "set"))]
        value: Option<ThemeValue>,
    },

    /// Send a message through the contact form relay
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,
    },

    /// Display version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeCommand {
    Show,
    Toggle,
    Set,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeValue {
    Dark,
    Light,
}

impl From<ThemeValue> for Theme {
    fn from(value: ThemeValue) -> Self {
        match value {
            ThemeValue::Dark => Theme::Dark,
            ThemeValue::Light => Theme::Light,
        }
    }
}

/// Show a notification the user cannot miss; errors abort the command
fn report(note: Notification) -> Result<()> {
    if note.is_error() {
        anyhow::bail!(note.message);
    }
    println!("{}", note.message);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing portfolio site in {:?}", target_dir);
            folio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized portfolio site in {:?}", target_dir);
        }

        Commands::Generate { watch } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Generating page...");

            let build = folio_rs::commands::generate::run(&folio).await?;
            match folio_rs::commands::generate::notification(&build) {
                // Keep watching even when the content is broken, so it can be fixed
                Some(note) if watch => eprintln!("{}", note.message),
                Some(note) => report(note)?,
                None => println!("Generated successfully!"),
            }

            if watch {
                folio_rs::commands::generate::watch(&folio).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating page...");
            let build = folio_rs::commands::generate::run(&folio).await?;
            if let Some(note) = folio_rs::commands::generate::notification(&build) {
                eprintln!("{}", note.message);
            }

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio_rs::server::start(&folio, build.portfolio, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Theme { action, value } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            let action = match (action, value) {
                (ThemeCommand::Show, _) => ThemeAction::Show,
                (ThemeCommand::Toggle, _) => ThemeAction::Toggle,
                (ThemeCommand::Set, Some(value)) => ThemeAction::Set(value.into()),
                (ThemeCommand::Set, None) => anyhow::bail!("`theme set` needs dark or light"),
            };
            let theme = folio_rs::commands::theme::run(&folio, action)?;
            println!("{}", theme);
        }

        Commands::Contact {
            name,
            email,
            message,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            let note = folio_rs::commands::contact::run(&folio, &name, &email, &message).await;
            report(note)?;
        }

        Commands::Version => {
            println!("folio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
