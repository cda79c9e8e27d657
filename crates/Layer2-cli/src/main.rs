//! Roster CLI - 메인 진입점
//!
//! 서브커맨드가 없으면 대화형 메뉴를 실행한다.

mod cli;
mod console;
mod menu;

use clap::{Parser, Subcommand};
use console::Console;
use roster_foundation::{ConfigOverlay, RecordPatch, RecordStore, RosterConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Roster - apprentice directory backed by a CSV file
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// CSV file to use (overrides config)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add an apprentice as the last record
    Add {
        name: String,
        surname: String,
        address: String,
        /// Phone number (digits only)
        phone: String,
        /// Enrollment group id (digits only)
        ficha: String,
    },
    /// List all apprentices with their index
    List,
    /// Update one column of the apprentice at INDEX
    Update {
        #[arg(allow_negative_numbers = true)]
        index: i64,
        /// Nombre, Apellido, Direccion, Telefono or Ficha
        column: String,
        value: String,
    },
    /// Update every apprentice matching NAME and SURNAME
    UpdateName {
        name: String,
        surname: String,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        ficha: Option<String>,
    },
    /// Interactive menu (default)
    Menu,
    /// Print the effective configuration
    Config {
        /// Also write it to .roster/roster.json in the current directory
        #[arg(long)]
        save: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 설정 로드 (글로벌 → 프로젝트 → CLI 플래그)
    let mut config = RosterConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}", e);
        RosterConfig::default()
    });
    config.apply(ConfigOverlay {
        data_file: args.file,
        color: args.no_color.then_some(false),
        ..Default::default()
    });

    // 로깅 초기화 (RUST_LOG가 우선)
    let log_level = if args.debug {
        "debug".to_string()
    } else {
        config.log_level.clone().unwrap_or_else(|| "warn".to_string())
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let store = RecordStore::new(config.data_path());
    tracing::debug!("Using store {}", store.path().display());

    let mut console = Console::new(std::io::stdout(), config.color);

    let ok = match args.command.unwrap_or(Command::Menu) {
        Command::Add {
            name,
            surname,
            address,
            phone,
            ficha,
        } => cli::add(&store, &mut console, &name, &surname, &address, &phone, &ficha)?,
        Command::List => {
            cli::list(&store, &mut console)?;
            true
        }
        Command::Update {
            index,
            column,
            value,
        } => cli::update_by_index(&store, &mut console, index, &column, &value)?,
        Command::UpdateName {
            name,
            surname,
            address,
            phone,
            ficha,
        } => {
            let patch = RecordPatch {
                address,
                phone: phone.map(Into::into),
                group: ficha.map(Into::into),
            };
            cli::update_by_name(&store, &mut console, &name, &surname, patch)?
        }
        Command::Menu => {
            let stdin = std::io::stdin();
            menu::Menu::new(&store, stdin.lock(), console).run()?;
            true
        }
        Command::Config { save } => {
            cli::show_config(&mut console, &config)?;
            if save {
                let path = config.save_project()?;
                console.success(&format!("Configuration saved to {}", path.display()))?;
            }
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}
