//! Kubernetes client for podcheck

use std::fmt::Debug;
use std::path::PathBuf;

use k8s_openapi::api::core::v1::{Namespace, Pod};
use kube::Api;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::convert::{namespace_to_info, pod_to_info};
use crate::error::{Result, SourceError};
use podcheck_types::{NamespaceInfo, PodInfo};

/// Page size for paginated list requests
const PAGE_SIZE: u32 = 500;

/// Where the cluster client gets its credentials from
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusterConfig {
    /// Explicit kubeconfig file; the default location is used when unset
    pub kubeconfig: Option<PathBuf>,

    /// Context to use instead of the kubeconfig's current context
    pub context: Option<String>,
}

impl ClusterConfig {
    /// True when nothing was configured and the environment decides
    pub fn is_inferred(&self) -> bool {
        self.kubeconfig.is_none() && self.context.is_none()
    }
}

/// Kubernetes client wrapper
#[derive(Clone)]
pub struct KubeClient {
    client: kube::Client,
}

impl KubeClient {
    /// Build a client from the given cluster configuration
    ///
    /// Without an explicit kubeconfig or context the usual inference applies
    /// (`KUBECONFIG`, `~/.kube/config`, then in-cluster service account).
    pub async fn connect(cluster: &ClusterConfig) -> Result<Self> {
        let config = if cluster.is_inferred() {
            kube::Config::infer().await.map_err(SourceError::client)?
        } else {
            let kubeconfig = match &cluster.kubeconfig {
                Some(path) => Kubeconfig::read_from(path),
                None => Kubeconfig::read(),
            }
            .map_err(SourceError::client)?;

            kube::Config::from_custom_kubeconfig(
                kubeconfig,
                &KubeConfigOptions {
                    context: cluster.context.clone(),
                    ..Default::default()
                },
            )
            .await
            .map_err(SourceError::client)?
        };

        debug!(cluster_url = %config.cluster_url, "Connecting to cluster");
        let client = kube::Client::try_from(config).map_err(SourceError::client)?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn from_client(client: kube::Client) -> Self {
        Self { client }
    }

    /// Fetch all namespaces from the cluster
    pub async fn get_namespaces(&self) -> Result<Vec<NamespaceInfo>> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let items = Self::list_all(&namespaces, "namespaces").await?;

        Ok(items.into_iter().map(namespace_to_info).collect())
    }

    /// Fetch pods across all namespaces
    pub async fn get_pods(&self) -> Result<Vec<PodInfo>> {
        let pods: Api<Pod> = Api::all(self.client.clone());
        let items = Self::list_all(&pods, "pods").await?;

        Ok(items.into_iter().map(pod_to_info).collect())
    }

    /// List every object of a kind, following continue tokens
    async fn list_all<K>(api: &Api<K>, resource: &'static str) -> Result<Vec<K>>
    where
        K: Clone + DeserializeOwned + Debug,
    {
        let mut items = Vec::new();
        let mut continue_token: Option<String> = None;
        let mut page_count = 0u32;

        loop {
            let mut params = ListParams::default().limit(PAGE_SIZE);
            if let Some(token) = &continue_token {
                params = params.continue_token(token);
            }

            let list = api
                .list(&params)
                .await
                .map_err(|source| SourceError::Api { resource, source })?;

            items.extend(list.items);
            page_count += 1;

            match list.metadata.continue_ {
                Some(token) if !token.is_empty() => continue_token = Some(token),
                _ => break,
            }
        }

        debug!(
            resource,
            pages = page_count,
            total_items = items.len(),
            "Listed from cluster"
        );
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mock_client, respond};
    use http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_cluster_config_inference() {
        assert!(ClusterConfig::default().is_inferred());

        let cluster = ClusterConfig {
            context: Some("prod".to_string()),
            ..Default::default()
        };
        assert!(!cluster.is_inferred());
    }

    #[tokio::test]
    async fn test_missing_kubeconfig_is_client_error() {
        let cluster = ClusterConfig {
            kubeconfig: Some(PathBuf::from("/nonexistent/podcheck/kubeconfig")),
            context: None,
        };
        let err = KubeClient::connect(&cluster).await.err().unwrap();
        assert!(matches!(err, SourceError::Client(_)));
    }

    #[tokio::test]
    async fn test_namespaces_follow_continue_token() {
        let (client, mut handle) = mock_client();
        let server = tokio::spawn(async move {
            let first = respond(
                &mut handle,
                StatusCode::OK,
                json!({
                    "apiVersion": "v1",
                    "kind": "NamespaceList",
                    "metadata": { "continue": "page-2" },
                    "items": [
                        { "metadata": { "name": "ns1" } },
                        { "metadata": { "name": "ns2" } }
                    ]
                }),
            )
            .await;
            let second = respond(
                &mut handle,
                StatusCode::OK,
                json!({
                    "apiVersion": "v1",
                    "kind": "NamespaceList",
                    "metadata": {},
                    "items": [
                        { "metadata": { "name": "ns3", "labels": { "openshift.io/run-level": "0" } } }
                    ]
                }),
            )
            .await;
            (first, second)
        });

        let namespaces = client.get_namespaces().await.unwrap();
        let (first, second) = server.await.unwrap();

        assert_eq!(first.path(), "/api/v1/namespaces");
        let first_query = first.query().unwrap_or_default();
        assert!(first_query.contains("limit=500"), "{first_query}");
        assert!(!first_query.contains("continue="), "{first_query}");
        let second_query = second.query().unwrap_or_default();
        assert!(second_query.contains("limit=500"), "{second_query}");
        assert!(second_query.contains("continue=page-2"), "{second_query}");

        let names: Vec<_> = namespaces.iter().map(|ns| ns.name.as_str()).collect();
        assert_eq!(names, ["ns1", "ns2", "ns3"]);
        assert_eq!(namespaces[2].label("openshift.io/run-level"), Some("0"));
    }

    #[tokio::test]
    async fn test_forbidden_pod_list_is_api_error() {
        let (client, mut handle) = mock_client();
        let server = tokio::spawn(async move {
            respond(
                &mut handle,
                StatusCode::FORBIDDEN,
                json!({
                    "apiVersion": "v1",
                    "kind": "Status",
                    "metadata": {},
                    "status": "Failure",
                    "message": "pods is forbidden: User \"system:anonymous\" cannot list resource \"pods\"",
                    "reason": "Forbidden",
                    "code": 403
                }),
            )
            .await
        });

        let err = client.get_pods().await.unwrap_err();
        let uri = server.await.unwrap();

        assert_eq!(uri.path(), "/api/v1/pods");
        assert!(matches!(err, SourceError::Api { resource: "pods", .. }), "{err:?}");
        assert_eq!(err.to_string(), "failed to list pods");
    }
}
