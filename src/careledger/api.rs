//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every ledger operation, whatever UI drives it.
//!
//! `LedgerApi` owns both stores for the lifetime of the application. Callers
//! hold it and pass it by reference; there is no process-wide state.
//!
//! The facade:
//! - **Dispatches** to the matching command for the right store
//! - **Returns structured types** (`Result<CmdResult<R>>`)
//!
//! It never prints, prompts or formats tables.
//!
//! ## Generic Over Backing
//!
//! - Production: `LedgerApi<FileBacking>`
//! - Testing: `LedgerApi<MemBacking>`

use crate::commands::{self, LedgerPaths};
use crate::config::LedgerConfig;
use crate::error::Result;
use crate::model::{Facility, FacilityPatch, InventoryItem, ItemPatch};
use crate::store::fs::FileBacking;
use crate::store::{Backing, FacilityStore, InventoryStore, RecordStore};
use std::path::PathBuf;

pub struct LedgerApi<B: Backing> {
    facilities: FacilityStore<B>,
    inventory: InventoryStore<B>,
    paths: LedgerPaths,
}

impl LedgerApi<FileBacking> {
    /// Opens the ledger in `data_dir`, resolving file names from its config.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let config = LedgerConfig::load(&data_dir)?;
        tracing::debug!(data_dir = %data_dir.display(), ?config, "opening ledger");

        Ok(Self::new(
            FileBacking::new(config.facilities_path(&data_dir)),
            FileBacking::new(config.inventory_path(&data_dir)),
            LedgerPaths { data_dir },
        ))
    }
}

impl<B: Backing> LedgerApi<B> {
    pub fn new(facilities: B, inventory: B, paths: LedgerPaths) -> Self {
        Self {
            facilities: RecordStore::new(facilities),
            inventory: RecordStore::new(inventory),
            paths,
        }
    }

    pub fn facilities(&self) -> &FacilityStore<B> {
        &self.facilities
    }

    pub fn inventory(&self) -> &InventoryStore<B> {
        &self.inventory
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    // --- Facilities ---

    pub fn load_facilities(&mut self) -> Result<CmdResult<Facility>> {
        commands::load::run(&mut self.facilities)
    }

    pub fn add_facility(&mut self, facility: Facility) -> Result<CmdResult<Facility>> {
        commands::add::run(&mut self.facilities, facility)
    }

    pub fn find_facility(&mut self, name: &str) -> Result<CmdResult<Facility>> {
        commands::find::run(&mut self.facilities, name)
    }

    pub fn update_facility(
        &mut self,
        name: &str,
        patch: FacilityPatch,
    ) -> Result<CmdResult<Facility>> {
        commands::update::run(&mut self.facilities, name, patch)
    }

    pub fn delete_facility(&mut self, name: &str) -> Result<CmdResult<Facility>> {
        commands::delete::run(&mut self.facilities, name)
    }

    pub fn list_facilities(&mut self) -> Result<CmdResult<Facility>> {
        commands::list::run(&mut self.facilities)
    }

    // --- Inventory ---

    pub fn load_items(&mut self) -> Result<CmdResult<InventoryItem>> {
        commands::load::run(&mut self.inventory)
    }

    pub fn add_item(&mut self, item: InventoryItem) -> Result<CmdResult<InventoryItem>> {
        commands::add::run(&mut self.inventory, item)
    }

    pub fn find_item(&mut self, item_id: &str) -> Result<CmdResult<InventoryItem>> {
        commands::find::run(&mut self.inventory, item_id)
    }

    pub fn update_item(
        &mut self,
        item_id: &str,
        patch: ItemPatch,
    ) -> Result<CmdResult<InventoryItem>> {
        commands::update::run(&mut self.inventory, item_id, patch)
    }

    pub fn delete_item(&mut self, item_id: &str) -> Result<CmdResult<InventoryItem>> {
        commands::delete::run(&mut self.inventory, item_id)
    }

    pub fn list_items(&mut self) -> Result<CmdResult<InventoryItem>> {
        commands::list::run(&mut self.inventory)
    }

    // --- Config ---

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
