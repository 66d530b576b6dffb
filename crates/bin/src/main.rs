use std::sync::Arc;

use clap::Parser;
use sortable::{Lists, config::SortableConfig};
use tracing_subscriber::EnvFilter;

mod backend;
mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::items::Move;
use output::OutputFormat;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("sortable=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let config = SortableConfig::load(&cli.store.config)?;
    let opened = backend::open_store(&cli.store, &config)?;
    tracing::info!(
        backend = %backend::backend_label(&cli.store),
        tables = config.tables.len(),
        "Opened store"
    );
    let lists = Lists::new(Arc::new(config.registry()?), opened.store.clone());

    match &cli.command {
        Commands::Show(args) => return commands::show::run(&lists, args, format),
        Commands::Create(args) => commands::records::create(&lists, args, format)?,
        Commands::Set(args) => commands::records::set(&lists, args, format)?,
        Commands::Destroy(args) => commands::records::destroy(&lists, args, format)?,
        Commands::InsertAt(args) => {
            commands::items::insert_at(&lists, args, format)?;
        }
        Commands::Append(args) => {
            commands::items::run(&lists, args, Move::Append, format)?;
        }
        Commands::Remove(args) => {
            commands::items::run(&lists, args, Move::Remove, format)?;
        }
        Commands::Up(args) => {
            commands::items::run(&lists, args, Move::Up, format)?;
        }
        Commands::Down(args) => {
            commands::items::run(&lists, args, Move::Down, format)?;
        }
        Commands::Top(args) => {
            commands::items::run(&lists, args, Move::Top, format)?;
        }
        Commands::Bottom(args) => {
            commands::items::run(&lists, args, Move::Bottom, format)?;
        }
    }

    opened.persist()
}
