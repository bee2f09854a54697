//! # Tabvault Architecture
//!
//! Tabvault is the **UI-agnostic core** of a multi-tab plain-text/markdown editor: the
//! document store every tab lives in, and the backup/restore pipeline that moves the
//! whole store in and out of a portable JSON snapshot.
//!
//! Tab strips, menus, theming and previews are one possible client. The CLI in
//! `crates/tabvault-cli` is another. Neither owns any logic.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (CLI, web, desktop)                                 │
//! │  - Arguments, rendering, confirmations, exit codes          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Serializes export/import against one store               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)        Backup (backup/*.rs)  │
//! │  - Document operations, search       - validate / parse     │
//! │  - Structured CmdResult              - export / import      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DocumentStore trait                                      │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Backup Pipeline
//!
//! ```text
//! store ──export──▶ JSON bytes ──save_as──▶ text-editor-backup-YYYY-MM-DD.json
//!                                                     │
//! store ◀──import── Backup ◀──decode── JSON ◀──parse──┘
//! ```
//!
//! - [`backup::validate`]: positional, short-circuiting schema checks
//! - [`backup::parse`]: file type/size/emptiness guards, text decoding, JSON
//! - [`backup::export`]: versioned envelope written through a [`backup::SaveTarget`]
//! - [`backup::import`]: merge or replace, id stripping, per-record accounting
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; the client decides where they land.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`backup`]: Backup envelope, validator, parser, exporter, importer
//! - [`cancel`]: Cooperative cancellation for long reads and imports
//! - [`commands`]: Document operations returning structured results
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - [`init`]: Context construction for clients
//! - [`model`]: `Document`, `NewDocument`, `Attributes`
//! - [`search`]: Line-oriented search across documents
//! - [`store`]: Storage abstraction and implementations

pub mod api;
pub mod backup;
pub mod cancel;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod search;
pub mod store;
