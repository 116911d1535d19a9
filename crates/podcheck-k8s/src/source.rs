//! Object source: where pods and namespaces come from
//!
//! Pods and namespaces are loaded independently, so one side can come from a
//! file while the other is fetched from the cluster.

use std::fs;
use std::path::{Path, PathBuf};

use k8s_openapi::api::core::v1::{Namespace, Pod};
use tracing::debug;

use crate::client::{ClusterConfig, KubeClient};
use crate::convert::{namespace_to_info, pod_to_info};
use crate::error::{Result, SourceError};
use crate::list::decode_list;
use podcheck_types::{NamespaceInfo, PodInfo};

/// Origin of one kind of object
#[derive(Clone)]
pub enum Origin {
    /// A list document on disk
    File(PathBuf),
    /// A live cluster query
    Cluster(KubeClient),
}

impl Origin {
    async fn namespaces(&self) -> Result<Vec<NamespaceInfo>> {
        match self {
            Self::File(path) => load_namespaces_file(path),
            Self::Cluster(client) => client.get_namespaces().await,
        }
    }

    async fn pods(&self) -> Result<Vec<PodInfo>> {
        match self {
            Self::File(path) => load_pods_file(path),
            Self::Cluster(client) => client.get_pods().await,
        }
    }
}

/// The loaded objects, in source order
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub namespaces: Vec<NamespaceInfo>,
    pub pods: Vec<PodInfo>,
}

/// Provides the pod and namespace collections for one run
pub struct ObjectSource {
    pods: Origin,
    namespaces: Origin,
}

impl ObjectSource {
    pub fn new(pods: Origin, namespaces: Origin) -> Self {
        Self { pods, namespaces }
    }

    /// Source both collections from files; never touches a cluster
    pub fn from_files(pods: impl Into<PathBuf>, namespaces: impl Into<PathBuf>) -> Self {
        Self::new(Origin::File(pods.into()), Origin::File(namespaces.into()))
    }

    /// Build a source from optional file paths
    ///
    /// A cluster client is only created when at least one path is missing, and
    /// is shared by both sides when both need it.
    pub async fn open(
        pods_file: Option<PathBuf>,
        namespaces_file: Option<PathBuf>,
        cluster: &ClusterConfig,
    ) -> Result<Self> {
        let client = if pods_file.is_none() || namespaces_file.is_none() {
            Some(KubeClient::connect(cluster).await?)
        } else {
            None
        };

        let origin = |file: Option<PathBuf>| match (file, &client) {
            (Some(path), _) => Ok(Origin::File(path)),
            (None, Some(client)) => Ok(Origin::Cluster(client.clone())),
            (None, None) => Err(SourceError::client(std::io::Error::other(
                "no cluster client available",
            ))),
        };

        Ok(Self::new(origin(pods_file)?, origin(namespaces_file)?))
    }

    /// Load namespaces, then pods
    pub async fn load(&self) -> Result<Snapshot> {
        let namespaces = self.namespaces.namespaces().await?;
        let pods = self.pods.pods().await?;

        debug!(
            namespaces = namespaces.len(),
            pods = pods.len(),
            "Loaded snapshot"
        );
        Ok(Snapshot { namespaces, pods })
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a PodList or List of pods from a YAML or JSON file
pub fn load_pods_file(path: &Path) -> Result<Vec<PodInfo>> {
    let data = read_file(path)?;
    let pods: Vec<Pod> = decode_list(path, &data)?;

    debug!(path = %path.display(), count = pods.len(), "Loaded pods from file");
    Ok(pods.into_iter().map(pod_to_info).collect())
}

/// Load a NamespaceList or List of namespaces from a YAML or JSON file
pub fn load_namespaces_file(path: &Path) -> Result<Vec<NamespaceInfo>> {
    let data = read_file(path)?;
    let namespaces: Vec<Namespace> = decode_list(path, &data)?;

    debug!(path = %path.display(), count = namespaces.len(), "Loaded namespaces from file");
    Ok(namespaces.into_iter().map(namespace_to_info).collect())
}
