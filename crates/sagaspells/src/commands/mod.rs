//! # Command Layer
//!
//! This module contains the **operations** of saga. Each command lives in its own
//! submodule and implements plain Rust functions over the store and the loaded library.
//!
//! ## Role and Responsibilities
//!
//! - Implement the logic of each user-facing operation
//! - Operate on `Spellbook`, `Spell`, `FilterSpec` and other domain types
//! - Return a structured [`CmdResult`] with affected spellbooks and messages
//! - Stay completely UI-agnostic: no printing, no prompts
//!
//! ## Change Notification
//!
//! The store is a plain read/write interface and does not notify anyone. Views learn
//! about changes from the [`CmdResult`] of the command that made them:
//! `affected_spellbooks` holds the post-operation state of every spellbook that changed,
//! and is empty when the command turned out to be a no-op.
//!
//! ## Command Modules
//!
//! - [`create`]: Create a spellbook
//! - [`get`]: Look up one spellbook or list them all
//! - [`update`]: Change name, character, description or the whole member list
//! - [`delete`]: Remove a spellbook
//! - [`members`]: Add or remove a single spell
//! - [`browse`]: Filter and group the catalog
//! - [`export`]: Build and write export documents

use serde::Serialize;
use std::path::PathBuf;

use crate::grouping::SpellGroup;
use crate::model::Spellbook;

pub mod browse;
pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod members;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    /// Spellbooks changed by the command, in their post-operation state.
    pub affected_spellbooks: Vec<Spellbook>,
    /// Spellbooks to display.
    pub listed_spellbooks: Vec<Spellbook>,
    /// Grouped spells to display.
    pub groups: Vec<SpellGroup>,
    /// Files written by the command.
    pub written_paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_spellbooks(mut self, books: Vec<Spellbook>) -> Self {
        self.affected_spellbooks = books;
        self
    }

    pub fn with_listed_spellbooks(mut self, books: Vec<Spellbook>) -> Self {
        self.listed_spellbooks = books;
        self
    }

    /// Whether the command changed any persisted state.
    pub fn changed(&self) -> bool {
        !self.affected_spellbooks.is_empty()
    }
}
