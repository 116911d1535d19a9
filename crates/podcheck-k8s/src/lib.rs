//! Kubernetes object loading for podcheck
//!
//! This crate provides the object source: pods and namespaces are read either
//! from list documents on disk or from a live cluster, then converted into the
//! shared podcheck types.

mod client;
mod convert;
mod error;
mod list;
mod source;

#[cfg(test)]
mod testing;

pub use client::{ClusterConfig, KubeClient};
pub use convert::{namespace_to_info, pod_to_info};
pub use error::{Result, SourceError};
pub use list::decode_list;
pub use source::{ObjectSource, Origin, Snapshot, load_namespaces_file, load_pods_file};

// Re-export types that are used in our public API
pub use podcheck_types::{ContainerInfo, NamespaceInfo, PodInfo, PodRef};
