//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the two
//! bootstrap phases: resolve configuration, generate the skeleton, hand off
//! to the foundry collaborator.

pub mod bootstrap;
pub mod config_resolver;
pub mod scaffold_walker;

pub use bootstrap::{BootstrapOrchestrator, BootstrapRequest, ExecutionPlan, Phase};
pub use config_resolver::ConfigResolver;
pub use scaffold_walker::ScaffoldWalker;
