//! Converge Model
//!
//! A typed, read-only snapshot of the desired-state model for a set of
//! managed hosts. The snapshot is what the validation and task-synthesis
//! engines consume; it is never mutated by them.
//!
//! # Core types
//!
//! - [`Model`]: the snapshot root, with stable-order query methods
//! - [`Host`]: a management server or peer node with its child declarations
//! - [`Service`] / [`Package`] / [`Upgrade`]: per-host declarations
//! - [`ClusteredService`]: services owned by the external clustering subsystem
//! - [`ItemState`]: the lifecycle state of a declaration
//!
//! # Construction
//!
//! A [`Model`] can only be obtained through [`ModelBuilder::build`], which
//! enforces the structural invariants the engines rely on (non-empty
//! hostnames, unique child item ids per host). Once built, the snapshot is
//! immutable and `Send + Sync`.

pub mod builder;
pub mod cluster;
pub mod host;
pub mod item;
pub mod model;
pub mod state;
pub mod vpath;

pub use builder::{ModelBuilder, ModelError};
pub use cluster::{Application, ClusteredService};
pub use host::{Host, HostRole};
pub use item::{Package, Service, ServiceKind, Upgrade};
pub use model::Model;
pub use state::ItemState;
pub use vpath::Vpath;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
