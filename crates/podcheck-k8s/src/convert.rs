//! Conversion from Kubernetes API objects to podcheck types

use k8s_openapi::api::core::v1::{Container, Namespace, Pod};

use podcheck_types::{ContainerInfo, NamespaceInfo, PodInfo};

/// Convert a k8s Namespace to NamespaceInfo
pub fn namespace_to_info(ns: Namespace) -> NamespaceInfo {
    let mut info = NamespaceInfo::new(ns.metadata.name.unwrap_or_default());

    if let Some(labels) = ns.metadata.labels {
        info.labels = labels.into_iter().collect();
    }

    info
}

/// Convert a k8s Pod to PodInfo
///
/// Unset host flags read as `false`; unset optional fields stay `None`.
pub fn pod_to_info(pod: Pod) -> PodInfo {
    let name = pod.metadata.name.unwrap_or_default();
    let namespace = pod.metadata.namespace.unwrap_or_default();
    let mut info = PodInfo::new(name, namespace);

    if let Some(spec) = pod.spec {
        info.host_users = spec.host_users;
        info.host_network = spec.host_network.unwrap_or(false);
        info.host_pid = spec.host_pid.unwrap_or(false);
        info.host_ipc = spec.host_ipc.unwrap_or(false);
        info.run_as_user = spec.security_context.and_then(|sc| sc.run_as_user);
        info.containers = spec.containers.into_iter().map(container_to_info).collect();
    }

    info
}

fn container_to_info(container: Container) -> ContainerInfo {
    let mut info = ContainerInfo::new(container.name);

    if let Some(sc) = container.security_context {
        info.run_as_user = sc.run_as_user;
        info.privileged = sc.privileged;
    }

    info
}
