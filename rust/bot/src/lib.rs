//! Fateweaver service layer: validated chat commands in, replies out.
//!
//! The platform adapter (command parsing, permission checks, message
//! rendering) sits upstream of this crate and talks to it through
//! [`Command`]/[`Reply`] values plus a [`CommandContext`] identifying the
//! guild and user. This crate owns the registry, runs every command as one
//! synchronous state transition, and persists the registry to a JSON
//! snapshot on a timer and at shutdown.
//!
//! ```no_run
//! use std::time::Duration;
//! use fateweaver_bot::{Command, CommandContext, Fateweaver, JsonStore};
//! use fateweaver_engine::cards::Catalog;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::load("data/cards.json")?;
//! let store = JsonStore::new("data/fateweaver.json");
//! let service = Fateweaver::new(catalog, store, Duration::from_secs(30));
//! let handle = service.start();
//!
//! let ctx = CommandContext { guild_id: 100, user_id: 1, member_ids: vec![1] };
//! let reply = service.execute(&ctx, Command::Draw { count: 3 })?;
//! // ... render `reply` on the platform ...
//!
//! handle.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod errors;
pub mod logging;
pub mod service;
pub mod storage;

pub use commands::{
    handle, CardAction, CardView, Command, CommandContext, Reply, MAX_DRAW,
};
pub use config::{load as load_config, BotConfig, ConfigError};
pub use errors::{CommandError, SearchScope};
pub use logging::init_logging;
pub use service::{Fateweaver, ServiceError, ServiceHandle};
pub use storage::{JsonStore, StorageError};
