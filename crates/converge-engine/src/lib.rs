//! Converge Engine
//!
//! Compiles a desired-state model snapshot into policy violations and an
//! ordered list of idempotent configuration tasks.
//!
//! # Components
//!
//! - [`Validator`]: inspects the snapshot and reports [`Violation`]s —
//!   duplicate service names, reserved names, clustering-subsystem
//!   ownership conflicts. No side effects.
//! - [`TaskSynthesizer`]: derives one [`ConfigTask`] per actionable
//!   service declaration, with explicit dependency edges for the
//!   downstream executor to order against.
//! - [`Plan`]: the gate that runs validation first and only synthesizes
//!   tasks when no violations are found.
//!
//! Both components are pure functions of the snapshot: no internal state,
//! no I/O, no mutation of the model.
//!
//! # Example
//!
//! ```rust
//! use converge_engine::{Plan, ValidationPolicy};
//! use converge_model::ModelBuilder;
//!
//! let model = ModelBuilder::new().build().expect("empty model is valid");
//! let tasks = Plan::with_policy(ValidationPolicy::default())
//!     .build(&model)
//!     .expect("no violations in an empty model");
//! assert!(tasks.is_empty());
//! ```

pub mod plan;
pub mod policy;
pub mod synthesizer;
pub mod task;
pub mod validator;

pub use plan::Plan;
pub use policy::ValidationPolicy;
pub use synthesizer::TaskSynthesizer;
pub use task::{ConfigTask, Dependency, Ensure, Provider, ServiceProperties};
pub use validator::{Validator, Violation};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the engine
    pub use crate::plan::Plan;
    pub use crate::policy::ValidationPolicy;
    pub use crate::synthesizer::TaskSynthesizer;
    pub use crate::task::{ConfigTask, Dependency, Ensure, ServiceProperties};
    pub use crate::validator::{Validator, Violation};
    pub use converge_model::{
        Host, HostRole, ItemState, Model, ModelBuilder, Package, Service, ServiceKind, Upgrade,
        Vpath,
    };
}
