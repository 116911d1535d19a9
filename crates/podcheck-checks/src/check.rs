use thiserror::Error;

use crate::verdict::Verdict;
use podcheck_types::{NamespaceInfo, PodInfo};

/// A check failed to classify a single pod
#[derive(Debug, Error)]
pub enum CheckError {
    /// Some pod field could not be interpreted
    #[error("invalid {field}: {message}")]
    InvalidField { field: String, message: String },
}

/// A named classification of pods against their namespace
///
/// Implementations must be pure: the same inputs always give the same verdict.
pub trait Check {
    /// Subcommand name of this check
    fn name(&self) -> &'static str;

    /// Classify one pod
    fn evaluate(&self, ns: &NamespaceInfo, pod: &PodInfo) -> Result<Verdict, CheckError>;
}
