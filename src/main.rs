mod config;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use config::Settings;
use podcheck_checks::{Check, Evaluator, NamespaceIndex, OutputMode, UsernsCheck};
use podcheck_k8s::ObjectSource;

/// podcheck - check and filter Kubernetes pods
///
/// Each subcommand lists the pods matching one criterion. Pods and namespaces
/// are read from list files when given, otherwise fetched from the cluster.
#[derive(Parser, Debug)]
#[command(name = "podcheck")]
#[command(author, version, about, long_about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to YAML file containing PodList or List of pods
    #[arg(long, global = true, value_name = "PATH")]
    pods: Option<PathBuf>,

    /// Path to YAML file containing NamespaceList or List of namespaces
    #[arg(long, global = true, value_name = "PATH")]
    namespaces: Option<PathBuf>,

    /// Kubeconfig file used when fetching from the cluster
    #[arg(long, global = true, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context used when fetching from the cluster
    #[arg(long, global = true, value_name = "CONTEXT")]
    context: Option<String>,

    /// Settings file (default: ~/.podcheck/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print a header row before the results
    #[arg(long, global = true)]
    headers: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List pods that are eligible for using user namespaces
    Userns {
        /// Print a reason for every evaluated pod, eligible or not (overrides --output)
        #[arg(short, long)]
        verbose: bool,

        /// Extra column for eligible pods
        #[arg(short, long, value_enum, default_value = "scc")]
        output: UsernsOutput,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum UsernsOutput {
    /// Namespace and pod only
    Minimal,
    /// Whether SCC admission manages the namespace
    #[default]
    Scc,
    /// Recommended action
    Action,
}

impl UsernsOutput {
    fn mode(self, verbose: bool) -> OutputMode {
        if verbose {
            return OutputMode::Verbose;
        }
        match self {
            Self::Minimal => OutputMode::Minimal,
            Self::Scc => OutputMode::SccEnabled,
            Self::Action => OutputMode::Action,
        }
    }
}

impl Command {
    /// Build the check and output shape for this subcommand
    fn check(&self, settings: &Settings) -> Result<(Box<dyn Check>, OutputMode)> {
        match self {
            Self::Userns { verbose, output } => {
                let check: Box<dyn Check> =
                    Box::new(UsernsCheck::with_label(settings.restricted_label()?));
                Ok((check, output.mode(*verbose)))
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // Warnings and per-pod errors go to stderr, results to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    // Settings are validated before any file or cluster I/O
    let settings =
        Settings::load(args.config.as_deref())?.with_overrides(args.kubeconfig, args.context);
    let (check, mode) = args.command.check(&settings)?;

    let source = ObjectSource::open(args.pods, args.namespaces, &settings.cluster()).await?;
    let snapshot = source.load().await?;
    let index = NamespaceIndex::new(snapshot.namespaces);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.headers {
        writeln!(out, "{}", mode.header_line()).context("Failed to write output")?;
    }

    let summary = Evaluator::new(&*check, mode)
        .run(&snapshot.pods, &index, &mut out)
        .context("Failed to write output")?;
    out.flush().context("Failed to write output")?;

    debug!(
        check = check.name(),
        emitted = summary.emitted,
        skipped = summary.join_warnings.len() + summary.errors.len(),
        "Done"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_userns_defaults() {
        let args = Args::try_parse_from(["podcheck", "userns"]).unwrap();
        let Command::Userns { verbose, output } = args.command;
        assert!(!verbose);
        assert_eq!(output.mode(verbose), OutputMode::SccEnabled);
        assert!(args.pods.is_none());
        assert!(!args.headers);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "podcheck",
            "userns",
            "--pods",
            "pods.yaml",
            "--namespaces",
            "ns.yaml",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(args.pods, Some(PathBuf::from("pods.yaml")));
        assert_eq!(args.namespaces, Some(PathBuf::from("ns.yaml")));
        let Command::Userns { verbose, output } = args.command;
        assert_eq!(output.mode(verbose), OutputMode::Verbose);
    }

    #[test]
    fn test_output_choice() {
        let args = Args::try_parse_from(["podcheck", "userns", "--output", "action"]).unwrap();
        let Command::Userns { verbose, output } = args.command;
        assert_eq!(output.mode(verbose), OutputMode::Action);
    }

    #[test]
    fn test_unknown_check_rejected() {
        assert!(Args::try_parse_from(["podcheck", "seccomp"]).is_err());
        assert!(Args::try_parse_from(["podcheck"]).is_err());
    }

    #[test]
    fn test_empty_label_fails_before_io() {
        let settings = Settings {
            restricted_label: Some(String::new()),
            ..Default::default()
        };
        let command = Command::Userns {
            verbose: false,
            output: UsernsOutput::Scc,
        };
        assert!(command.check(&settings).is_err());
    }

    #[tokio::test]
    async fn test_run_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let pods = dir.path().join("pods.yaml");
        let namespaces = dir.path().join("namespaces.yaml");
        std::fs::write(
            &pods,
            "apiVersion: v1\nkind: PodList\nitems:\n- metadata:\n    name: p1\n    namespace: ns1\n  spec:\n    containers: []\n",
        )
        .unwrap();
        std::fs::write(
            &namespaces,
            "apiVersion: v1\nkind: NamespaceList\nitems:\n- metadata:\n    name: ns1\n",
        )
        .unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "").unwrap();

        let args = Args::try_parse_from([
            "podcheck",
            "userns",
            "--pods",
            pods.to_str().unwrap(),
            "--namespaces",
            namespaces.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .unwrap();
        run(args).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_with_unreadable_pods_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let namespaces = dir.path().join("namespaces.yaml");
        std::fs::write(&namespaces, "kind: NamespaceList\nitems: []\n").unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "").unwrap();

        let args = Args::try_parse_from([
            "podcheck",
            "userns",
            "--pods",
            dir.path().join("missing.yaml").to_str().unwrap(),
            "--namespaces",
            namespaces.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .unwrap();

        let err = run(args).await.unwrap_err();
        assert!(format!("{:#}", err).contains("missing.yaml"));
    }
}
