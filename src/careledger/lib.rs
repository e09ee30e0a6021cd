//! # Careledger Architecture
//!
//! Careledger keeps two flat collections for a small healthcare facility: a
//! directory of facilities and an inventory ledger. Each collection lives in
//! memory while the program runs and is mirrored to a plain text file.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, args.rs, wired by main.rs)                │
//! │  - Parses arguments, renders tables, prints messages        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns both stores, dispatches to commands                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per verb, generic over the record kind        │
//! │  - Returns `CmdResult` with records and messages            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore: ordered records + a Backing                 │
//! │  - FileBacking (production), MemBacking (testing)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Records
//!
//! Both record kinds implement [`model::Record`]: a key compared
//! case-insensitively, a fixed field order for the row format, and a patch
//! type for partial updates. See [`codec`] for the row format itself.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics go through `tracing`; the binary decides whether
//! and where to show them.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each verb
//! - [`store`]: Record store and backing implementations
//! - [`model`]: `Facility`, `InventoryItem` and the `Record` trait
//! - [`codec`]: Row encoding shared by both record kinds
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
