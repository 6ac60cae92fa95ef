//! # Saga Spells Architecture
//!
//! Saga Spells is a **UI-agnostic spell catalog and spellbook library**. A rendering layer
//! (browser, terminal, PDF exporter) sits on top of it; nothing in here draws anything.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Spellbook mutations, browsing, export documents          │
//! │  - Operates on Rust types, returns CmdResult                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//! ┌──────────────────────────┐   ┌──────────────────────────────┐
//! │  Engines (pure)          │   │  Storage Layer (store/)      │
//! │  filter, grouping, tags  │   │  StorageBackend trait        │
//! │                          │   │  SpellbookStore write-through│
//! └──────────────────────────┘   └──────────────────────────────┘
//!              ▲
//!              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Catalog (catalog.rs, schema.rs)                            │
//! │  - Fetch JSON from a path or URL, validate, coerce          │
//! │  - Immutable Library snapshot for the session               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! raw JSON → [`schema::validate`] → [`catalog::Catalog`] → [`filter::apply_filters`]
//! (consulting [`tags::TagSet`]) → [`grouping::group_by`] → grouped view.
//!
//! Independently, [`store::SpellbookStore`] owns the persisted spellbooks and writes the
//! whole collection through to its backend on every mutation.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for spellbook operations
//! - [`commands`]: Business logic for each operation
//! - [`catalog`]: Dataset sources and the loaded [`catalog::Library`]
//! - [`schema`]: Validation and coercion of raw spell records
//! - [`tags`]: Tag dataset and display categories
//! - [`filter`]: Multi-predicate filtering
//! - [`grouping`]: Partitioning into named groups
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Spell`, `Spellbook`)
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context setup
//! - [`logging`]: Optional subscriber setup for host applications
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod grouping;
pub mod init;
pub mod logging;
pub mod model;
pub mod schema;
pub mod store;
pub mod tags;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
