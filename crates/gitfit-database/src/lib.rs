//! # gitfit-database
//!
//! PostgreSQL persistence for the GitFit platform.
//!
//! ## Modules
//!
//! - `connection` — pooled connection management
//! - `migration` — embedded schema migrations
//! - `repositories` — the production `AccountStore` and activity sink
//! - `memory` — an ephemeral in-process store for tests and local runs

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryAccountStore;
pub use repositories::account::AccountRepository;
pub use repositories::activity::ActivityRepository;
