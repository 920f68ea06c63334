//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use listify_core::export::ColorMode;
use listify_core::FilterType;

#[derive(Parser)]
#[command(
    name = "listify",
    version,
    about = "Shopping lists from the terminal",
    long_about = "Keep a live shopping list, save it as a named list, and load \
                  saved lists back in when it's time to shop again."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Database file (overrides the config file and LISTIFY_DB_PATH).
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Config file (default: platform config dir).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Show debug logs.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add an item to the live list.
    Add(AddArgs),

    /// Show live items.
    Items(ItemQueryArgs),

    /// Mark an item bought, or not bought again.
    Toggle {
        /// Item id.
        id: i64,
    },

    /// Delete an item.
    Remove {
        /// Item id.
        id: i64,
    },

    /// Save live items as a named list.
    Save(SaveArgs),

    /// Show saved lists.
    Lists,

    /// Copy a saved list into the live items and make it active.
    Load {
        /// List id.
        id: i64,
    },

    /// Remove an active list's items from the live items.
    Unload {
        /// List id.
        id: i64,
    },

    /// Rename a saved list.
    Rename {
        /// List id.
        id: i64,
        /// New name.
        name: String,
    },

    /// Delete a saved list (live items stay).
    DeleteList {
        /// List id.
        id: i64,
    },

    /// Print live items as shareable text.
    Share(ShareArgs),

    /// Lay out live items as export pages.
    Export(ExportArgs),

    /// Show bought/remaining counts.
    Summary,

    /// List, add or remove units.
    Units {
        #[command(subcommand)]
        action: Option<CatalogAction>,
    },

    /// List, add or remove custom categories.
    Categories {
        #[command(subcommand)]
        action: Option<CatalogAction>,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// Item name.
    pub name: String,

    #[arg(short, long, default_value = "1")]
    pub qty: String,

    #[arg(short, long, default_value = "pcs")]
    pub unit: String,

    #[arg(short, long, default_value = "")]
    pub category: String,
}

/// Which live items a command works on.
#[derive(Args)]
pub struct ItemQueryArgs {
    #[arg(short, long, value_enum, default_value = "all")]
    pub filter: FilterArg,

    /// Only this category (exact match).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Case-insensitive match on name or category.
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct SaveArgs {
    /// List name.
    pub name: String,

    /// Save only these item ids (repeatable). Default: every matching item.
    #[arg(long = "id", value_name = "ID")]
    pub ids: Vec<i64>,

    #[command(flatten)]
    pub query: ItemQueryArgs,
}

#[derive(Args)]
pub struct ShareArgs {
    #[command(flatten)]
    pub query: ItemQueryArgs,

    /// Heading text (default from config).
    #[arg(long)]
    pub heading: Option<String>,

    #[arg(long)]
    pub no_heading: bool,

    /// Use ✅/⬜ instead of ✓/• and strikethrough.
    #[arg(long)]
    pub checkboxes: bool,

    #[arg(long)]
    pub no_serial: bool,

    #[arg(long)]
    pub no_summary: bool,

    #[arg(long)]
    pub no_footer: bool,

    /// One flat list instead of category groups.
    #[arg(long)]
    pub flat: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub query: ItemQueryArgs,

    #[arg(short, long, value_enum, default_value = "color")]
    pub mode: ModeArg,
}

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Show every entry (the default).
    List,
    /// Add a custom entry.
    Add { entry: String },
    /// Remove a custom entry.
    Remove { entry: String },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FilterArg {
    All,
    ToBuy,
    Bought,
}

impl From<FilterArg> for FilterType {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => FilterType::All,
            FilterArg::ToBuy => FilterType::ToBuy,
            FilterArg::Bought => FilterType::Bought,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Color,
    Mono,
}

impl From<ModeArg> for ColorMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Color => ColorMode::Color,
            ModeArg::Mono => ColorMode::Mono,
        }
    }
}
