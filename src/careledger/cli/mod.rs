//! Command dispatch and output for the binary. Not part of the library API.

mod print;

use crate::args::{Cli, Commands, FacilityAction, FacilityFields, ItemAction, ItemFields};
use careledger::api::{CmdResult, ConfigAction, LedgerApi};
use careledger::error::Result;
use careledger::model::{Facility, FacilityPatch, InventoryItem, ItemPatch, Record};
use careledger::store::fs::FileBacking;
use directories::ProjectDirs;
use print::{print_messages, print_records};
use std::path::PathBuf;

const DATA_DIR_ENV: &str = "CARELEDGER_DIR";

pub fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir.clone(), cli.global);
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");
    let mut api = LedgerApi::open(data_dir)?;

    match cli.command {
        Commands::Facility { action } => {
            handle_facility(&mut api, action.unwrap_or(FacilityAction::List))
        }
        Commands::Item { action } => handle_item(&mut api, action.unwrap_or(ItemAction::List)),
        Commands::Config { key, value } => handle_config(&api, key, value),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// `--data-dir`, then `$CARELEDGER_DIR`, then the per-user dir for
/// `--global`, then the current directory.
fn resolve_data_dir(explicit: Option<PathBuf>, global: bool) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    if global {
        if let Some(dirs) = ProjectDirs::from("com", "careledger", "careledger") {
            return dirs.data_dir().to_path_buf();
        }
        tracing::warn!("could not determine user data dir, using current directory");
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn handle_facility(api: &mut LedgerApi<FileBacking>, action: FacilityAction) -> Result<()> {
    let result = match action {
        FacilityAction::Add {
            name,
            address,
            phone,
        } => api.add_facility(Facility::new(name, address, phone))?,
        FacilityAction::Find { name } => api.find_facility(&name)?,
        FacilityAction::Update { target, fields } => {
            api.update_facility(&target, facility_patch(fields))?
        }
        FacilityAction::Delete { name } => api.delete_facility(&name)?,
        FacilityAction::List => api.list_facilities()?,
        FacilityAction::Load => api.load_facilities()?,
    };
    print_result(&result);
    Ok(())
}

fn handle_item(api: &mut LedgerApi<FileBacking>, action: ItemAction) -> Result<()> {
    let result = match action {
        ItemAction::Add {
            item_id,
            name,
            quantity,
            expiration_date,
            item_type,
        } => api.add_item(InventoryItem::new(
            item_id,
            name,
            quantity,
            expiration_date,
            item_type,
        ))?,
        ItemAction::Find { item_id } => api.find_item(&item_id)?,
        ItemAction::Update { target, fields } => api.update_item(&target, item_patch(fields))?,
        ItemAction::Delete { item_id } => api.delete_item(&item_id)?,
        ItemAction::List => api.list_items()?,
        ItemAction::Load => api.load_items()?,
    };
    print_result(&result);
    Ok(())
}

fn handle_config(
    api: &LedgerApi<FileBacking>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            for (key, value) in config.entries() {
                println!("{} = {}", key, value);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_result<R: Record>(result: &CmdResult<R>) {
    print_records(&result.listed);
    print_messages(&result.messages);
}

fn facility_patch(fields: FacilityFields) -> FacilityPatch {
    FacilityPatch {
        name: fields.name,
        address: fields.address,
        phone: fields.phone,
    }
}

fn item_patch(fields: ItemFields) -> ItemPatch {
    ItemPatch {
        item_id: fields.item_id,
        name: fields.name,
        quantity: fields.quantity,
        expiration_date: fields.expiration_date,
        item_type: fields.item_type,
    }
}
