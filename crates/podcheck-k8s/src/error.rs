//! Error types for loading pods and namespaces

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort loading one of the object sources
#[derive(Debug, Error)]
pub enum SourceError {
    /// The list file could not be read
    #[error("failed to read file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The list file is not a usable list document, or an item has the wrong kind
    #[error("failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    /// Kubeconfig could not be loaded or the client could not be built
    #[error("failed to create kubernetes client")]
    Client(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// A list call against the cluster failed
    #[error("failed to list {resource}")]
    Api {
        resource: &'static str,
        #[source]
        source: kube::Error,
    },
}

impl SourceError {
    pub(crate) fn decode(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub(crate) fn client<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Client(Box::new(err))
    }
}

/// Result type alias for object loading
pub type Result<T> = std::result::Result<T, SourceError>;
