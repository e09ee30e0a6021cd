use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "careledger", bin_name = "careledger", version = get_version())]
#[command(about = "Healthcare facility directory and inventory ledger", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the ledger files (defaults to $CARELEDGER_DIR, then the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Use the per-user ledger instead of the current directory
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the facility directory
    #[command(alias = "f")]
    Facility {
        #[command(subcommand)]
        action: Option<FacilityAction>,
    },

    /// Manage the inventory ledger
    #[command(alias = "i")]
    Item {
        #[command(subcommand)]
        action: Option<ItemAction>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (facilities-file, inventory-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FacilityAction {
    /// Add a healthcare facility
    #[command(alias = "a")]
    Add {
        name: String,
        address: String,
        phone: String,
    },

    /// Search a facility by name (case-insensitive)
    #[command(alias = "s")]
    Find { name: String },

    /// Update a facility's information
    #[command(alias = "u")]
    Update {
        /// Current name of the facility
        #[arg(value_name = "NAME")]
        target: String,

        #[command(flatten)]
        fields: FacilityFields,
    },

    /// Delete a facility record
    #[command(alias = "rm")]
    Delete { name: String },

    /// List all facilities
    #[command(alias = "ls")]
    List,

    /// Reread the facilities file and report what was loaded
    Load,
}

#[derive(Args, Debug)]
pub struct FacilityFields {
    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New address
    #[arg(long)]
    pub address: Option<String>,

    /// New phone number
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ItemAction {
    /// Add a new item to the inventory
    #[command(alias = "a")]
    Add {
        item_id: String,
        name: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        /// Expiration date (free text, e.g. YYYY-MM-DD)
        expiration_date: String,
        /// Item type
        item_type: String,
    },

    /// Search an item by ID (case-insensitive)
    #[command(alias = "s")]
    Find { item_id: String },

    /// Update an inventory item
    #[command(alias = "u")]
    Update {
        /// Current ID of the item
        #[arg(value_name = "ITEM_ID")]
        target: String,

        #[command(flatten)]
        fields: ItemFields,
    },

    /// Delete an inventory item
    #[command(alias = "rm")]
    Delete { item_id: String },

    /// List all inventory items
    #[command(alias = "ls")]
    List,

    /// Reread the inventory file and report what was loaded
    Load,
}

#[derive(Args, Debug)]
pub struct ItemFields {
    /// New item ID
    #[arg(long = "id")]
    pub item_id: Option<String>,

    /// New item name
    #[arg(long)]
    pub name: Option<String>,

    /// New quantity
    #[arg(long, allow_negative_numbers = true)]
    pub quantity: Option<i64>,

    /// New expiration date
    #[arg(long = "expires")]
    pub expiration_date: Option<String>,

    /// New item type
    #[arg(long = "type")]
    pub item_type: Option<String>,
}
