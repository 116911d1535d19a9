//! User namespace eligibility
//!
//! A pod can move to `hostUsers: false` unless it already opted out, shares a
//! host namespace, or runs something as root or privileged.

use crate::check::{Check, CheckError};
use crate::verdict::{Action, Reason, Verdict};
use podcheck_types::{NamespaceInfo, PodInfo};

/// Namespace label whose presence means SCC admission is not in charge
pub const RESTRICTED_LABEL: &str = "openshift.io/run-level";

/// Check for pods eligible to run with user namespaces
#[derive(Clone, Debug)]
pub struct UsernsCheck {
    restricted_label: String,
}

impl UsernsCheck {
    pub fn new() -> Self {
        Self::with_label(RESTRICTED_LABEL)
    }

    /// Use a different namespace label as the restrictive-policy marker
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            restricted_label: label.into(),
        }
    }

    pub fn restricted_label(&self) -> &str {
        &self.restricted_label
    }

    /// Run the decision tree; order decides which reason is reported
    pub fn classify(&self, ns: &NamespaceInfo, pod: &PodInfo) -> Verdict {
        match Self::disqualify(pod) {
            Some(reason) => Verdict::Suppressed(reason),
            None => Verdict::Eligible(self.action_for(ns)),
        }
    }

    fn disqualify(pod: &PodInfo) -> Option<Reason> {
        if pod.host_users == Some(false) {
            return Some(Reason::HostUsersOptOut);
        }

        if pod.host_network {
            return Some(Reason::HostNetwork);
        } else if pod.host_ipc {
            return Some(Reason::HostIpc);
        } else if pod.host_pid {
            return Some(Reason::HostPid);
        }

        if pod.run_as_user == Some(0) {
            return Some(Reason::PodRunAsRoot);
        }

        pod.containers.iter().find_map(|c| {
            if c.run_as_user == Some(0) {
                Some(Reason::ContainerRunAsRoot {
                    container: c.name.clone(),
                })
            } else if c.privileged == Some(true) {
                Some(Reason::PrivilegedContainer {
                    container: c.name.clone(),
                })
            } else {
                None
            }
        })
    }

    fn action_for(&self, ns: &NamespaceInfo) -> Action {
        match ns.label(&self.restricted_label) {
            None => Action::UseRestricted,
            Some(_) => Action::MimicRestricted,
        }
    }
}

impl Default for UsernsCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for UsernsCheck {
    fn name(&self) -> &'static str {
        "userns"
    }

    fn evaluate(&self, ns: &NamespaceInfo, pod: &PodInfo) -> Result<Verdict, CheckError> {
        Ok(self.classify(ns, pod))
    }
}
