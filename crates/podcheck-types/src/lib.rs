//! Shared types for podcheck
//!
//! This crate contains the data model the checks operate on. Kubernetes API
//! objects are converted into these types once, right after they are loaded.

use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Kubernetes Resource Types
// ============================================================================

/// Namespace information
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceInfo {
    pub name: String,
    pub labels: HashMap<String, String>,
}

impl NamespaceInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: HashMap::new(),
        }
    }

    /// Add a label (builder style, mostly for fixtures)
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Get a label value, treating an empty value as unset
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Pod information relevant to security checks
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PodInfo {
    pub name: String,
    pub namespace: String,

    /// `spec.hostUsers`; `None` when the field is not set
    pub host_users: Option<bool>,

    pub host_network: bool,
    pub host_pid: bool,
    pub host_ipc: bool,

    /// `spec.securityContext.runAsUser`
    pub run_as_user: Option<i64>,

    /// Regular containers, in declaration order
    pub containers: Vec<ContainerInfo>,
}

impl PodInfo {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    /// Identity of this pod for diagnostics
    pub fn pod_ref(&self) -> PodRef {
        PodRef::new(&self.namespace, &self.name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerInfo {
    pub name: String,
    pub run_as_user: Option<i64>,
    pub privileged: Option<bool>,
}

impl ContainerInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            run_as_user: None,
            privileged: None,
        }
    }
}

/// A pod's `(namespace, name)` identity
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PodRef {
    pub namespace: String,
    pub name: String,
}

impl PodRef {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for PodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
