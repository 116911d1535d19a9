//! Runs a check across every pod of a snapshot

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::check::Check;
use crate::index::NamespaceIndex;
use crate::render::OutputMode;
use podcheck_types::{PodInfo, PodRef};

/// A pod the check could not classify
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PodFailure {
    pub pod: PodRef,
    pub message: String,
}

/// Counts and diagnostics from one evaluation run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Pods the check was run on
    pub evaluated: usize,
    /// Lines written
    pub emitted: usize,
    /// Evaluated pods with a suppressed verdict, whether or not a line was written
    pub suppressed: usize,
    /// Pods skipped because their namespace was not loaded
    pub join_warnings: Vec<PodRef>,
    /// Pods skipped because the check failed on them
    pub errors: Vec<PodFailure>,
}

/// Evaluates pods with one check and one output shape
pub struct Evaluator<'a, C: Check + ?Sized> {
    check: &'a C,
    mode: OutputMode,
}

impl<'a, C: Check + ?Sized> Evaluator<'a, C> {
    pub fn new(check: &'a C, mode: OutputMode) -> Self {
        Self { check, mode }
    }

    /// Evaluate pods in order, writing each rendered line to `out` as it is produced
    ///
    /// Missing namespaces and per-pod check failures are logged and recorded in
    /// the summary; only a failing writer stops the run.
    pub fn run<W: Write>(
        &self,
        pods: &[PodInfo],
        index: &NamespaceIndex,
        out: &mut W,
    ) -> io::Result<Summary> {
        let mut summary = Summary::default();

        for pod in pods {
            let Some(ns) = index.get(&pod.namespace) else {
                warn!(
                    "namespace {} not found for pod {}",
                    pod.namespace, pod.name
                );
                summary.join_warnings.push(pod.pod_ref());
                continue;
            };

            let verdict = match self.check.evaluate(ns, pod) {
                Ok(verdict) => verdict,
                Err(e) => {
                    warn!("error checking pod {}: {}", pod.pod_ref(), e);
                    summary.errors.push(PodFailure {
                        pod: pod.pod_ref(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };
            summary.evaluated += 1;
            if !verdict.is_eligible() {
                summary.suppressed += 1;
            }

            if let Some(line) = self.mode.render(ns, pod, &verdict) {
                writeln!(out, "{line}")?;
                summary.emitted += 1;
            }
        }

        debug!(
            check = self.check.name(),
            evaluated = summary.evaluated,
            emitted = summary.emitted,
            suppressed = summary.suppressed,
            join_warnings = summary.join_warnings.len(),
            errors = summary.errors.len(),
            "Evaluation complete"
        );
        Ok(summary)
    }
}
