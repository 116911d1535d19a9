use crate::verdict::Verdict;
use podcheck_types::{NamespaceInfo, PodInfo};

/// Shape of the line emitted for each verdict
///
/// Lines are tab-separated: namespace, pod, then whatever the mode adds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Eligible pods only, no extra column
    Minimal,
    /// Eligible pods only, plus whether SCC admission manages the namespace
    #[default]
    SccEnabled,
    /// Eligible pods only, plus the recommended action
    Action,
    /// Every evaluated pod, plus the reason for its verdict
    Verbose,
}

impl OutputMode {
    /// Column headers for this mode
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Self::Minimal => &["NAMESPACE", "POD"],
            Self::SccEnabled => &["NAMESPACE", "POD", "SCC ENABLED"],
            Self::Action => &["NAMESPACE", "POD", "ACTION"],
            Self::Verbose => &["NAMESPACE", "POD", "REASON"],
        }
    }

    /// Header row, tab-separated
    pub fn header_line(&self) -> String {
        self.headers().join("\t")
    }

    /// Render a verdict; `None` means the pod produces no line
    pub fn render(&self, ns: &NamespaceInfo, pod: &PodInfo, verdict: &Verdict) -> Option<String> {
        let extra = match (self, verdict) {
            (Self::Verbose, Verdict::Suppressed(reason)) => Some(reason.to_string()),
            (Self::Verbose, Verdict::Eligible(action)) => Some(format!("eligible: {action}")),
            (_, Verdict::Suppressed(_)) => return None,
            (Self::Minimal, Verdict::Eligible(_)) => None,
            (Self::SccEnabled, Verdict::Eligible(action)) => Some(action.scc_enabled().to_string()),
            (Self::Action, Verdict::Eligible(action)) => Some(action.label().to_string()),
        };

        Some(match extra {
            Some(extra) => format!("{}\t{}\t{}", ns.name, pod.name, extra),
            None => format!("{}\t{}", ns.name, pod.name),
        })
    }
}
