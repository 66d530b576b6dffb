//! CLI argument definitions for the Sortable binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// SQLite database (default)
    Sqlite,
    /// PostgreSQL database
    Postgres,
    /// In-memory with JSON persistence
    Inmemory,
}

/// Maintain densely ordered, scoped lists over a table store
#[derive(Parser, Debug)]
#[command(name = "sortable")]
#[command(about = "Sortable: scoped, densely ordered lists")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the tables live and which lists they carry.
#[derive(clap::Args, Debug, Clone)]
pub struct StoreArgs {
    /// JSON document describing tables and their lists
    #[arg(short, long, env = "SORTABLE_CONFIG", default_value = "sortable.config.json")]
    pub config: PathBuf,

    /// Storage backend to use
    #[arg(short, long, default_value = "sqlite", env = "SORTABLE_BACKEND")]
    pub backend: Backend,

    /// Data directory for storage files.
    /// For SQLite: stores sortable.db
    /// For InMemory: stores sortable.json
    #[arg(short = 'D', long, env = "SORTABLE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// PostgreSQL connection URL (required when backend=postgres)
    #[arg(long, env = "SORTABLE_POSTGRES_URL")]
    pub postgres_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a list in order
    Show(ShowArgs),
    /// Create a record; it joins the end of every list of its table
    Create(CreateArgs),
    /// Assign fields of a record and save it, moving it if a scope key changed
    Set(SetArgs),
    /// Delete a record and close its gaps
    Destroy(RecordArgs),
    /// Put a record at the end of a list
    Append(ItemArgs),
    /// Take a record out of a list
    Remove(ItemArgs),
    /// Put a record at a position, shifting later items down
    InsertAt(InsertAtArgs),
    /// Swap a record with the item above it
    Up(ItemArgs),
    /// Swap a record with the item below it
    Down(ItemArgs),
    /// Move a record to position 1
    Top(ItemArgs),
    /// Move a record to the last position
    Bottom(ItemArgs),
}

/// Arguments for the show command
///
/// The scope is taken from `--id` if given, otherwise from the `--where`
/// values.
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Table name
    pub table: String,

    /// List name (the default list if omitted)
    #[arg(short, long, default_value = "")]
    pub list: String,

    /// Show the scope this record is in
    #[arg(long, conflicts_with = "filters")]
    pub id: Option<i64>,

    /// Scope values as field=value
    #[arg(short = 'w', long = "where", value_name = "FIELD=VALUE")]
    pub filters: Vec<String>,
}

/// Arguments for the create command
#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Table name
    pub table: String,

    /// Field values as field=value
    #[arg(short, long = "set", value_name = "FIELD=VALUE")]
    pub values: Vec<String>,
}

/// Arguments for the set command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// Field values as field=value
    #[arg(short, long = "set", value_name = "FIELD=VALUE", required = true)]
    pub values: Vec<String>,
}

/// A stored record.
#[derive(clap::Args, Debug)]
pub struct RecordArgs {
    /// Table name
    pub table: String,

    /// Record id
    pub id: i64,
}

/// A stored record and one of its table's lists.
#[derive(clap::Args, Debug)]
pub struct ItemArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// List name (the default list if omitted)
    #[arg(short, long, default_value = "")]
    pub list: String,
}

/// Arguments for the insert-at command
#[derive(clap::Args, Debug)]
pub struct InsertAtArgs {
    #[command(flatten)]
    pub item: ItemArgs,

    /// Target position, starting at 1
    #[arg(short, long)]
    pub position: i64,
}
