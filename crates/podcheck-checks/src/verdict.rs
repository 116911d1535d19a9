use std::fmt;

/// Outcome of checking one pod
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The pod is not a candidate; carries the first disqualifying reason
    Suppressed(Reason),
    /// The pod can use user namespaces; carries the recommended action
    Eligible(Action),
}

impl Verdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible(_))
    }
}

/// Why a pod was left out
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reason {
    HostUsersOptOut,
    HostNetwork,
    HostIpc,
    HostPid,
    PodRunAsRoot,
    ContainerRunAsRoot { container: String },
    PrivilegedContainer { container: String },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HostUsersOptOut => write!(f, "opted out via hostUsers=false"),
            Self::HostNetwork => write!(f, "unavailable: hostNetwork=true"),
            Self::HostIpc => write!(f, "unavailable: hostIPC=true"),
            Self::HostPid => write!(f, "unavailable: hostPID=true"),
            Self::PodRunAsRoot => write!(f, "unavailable: runAsUser=0"),
            Self::ContainerRunAsRoot { container } => {
                write!(f, "unavailable: container {container} runAsUser=0")
            }
            Self::PrivilegedContainer { container } => {
                write!(f, "unavailable: container {container} privileged=true")
            }
        }
    }
}

/// What to do with an eligible pod
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Namespace has no restrictive policy label; the restricted SCC applies as is
    UseRestricted,
    /// Namespace enforces its own policy; replicate the restricted SCC by hand
    MimicRestricted,
}

impl Action {
    /// Display label for this action
    pub fn label(&self) -> &'static str {
        match self {
            Self::UseRestricted => "Use restricted-v3",
            Self::MimicRestricted => "Mimic restricted-v3",
        }
    }

    /// Whether the namespace is managed by SCC admission
    pub fn scc_enabled(&self) -> bool {
        matches!(self, Self::UseRestricted)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
