//! Pod checks for podcheck
//!
//! This crate provides the namespace index, the checks that classify pods,
//! the output shapes a verdict can be rendered in, and the driver that runs a
//! check over a whole snapshot.

mod check;
mod driver;
mod index;
mod render;
mod userns;
mod verdict;

pub use check::{Check, CheckError};
pub use driver::{Evaluator, PodFailure, Summary};
pub use index::NamespaceIndex;
pub use render::OutputMode;
pub use userns::{RESTRICTED_LABEL, UsernsCheck};
pub use verdict::{Action, Reason, Verdict};

// Re-export types used in our public API
pub use podcheck_types::{ContainerInfo, NamespaceInfo, PodInfo, PodRef};
