//! Protocol Check CLI
//!
//! Verifies the fault handlers of management protocol documents.
//!
//! # Usage
//!
//! ```bash
//! # Analyze protocols, fail the build on any issue
//! cargo run --bin protocol-check -- analyze web.yaml db.json --fail-on-issues
//!
//! # Machine-readable reports
//! cargo run --bin protocol-check -- analyze web.yaml --format json
//!
//! # Per-state operation tables and recovery rows
//! cargo run --bin protocol-check -- summary web.yaml
//! ```
//!
//! Exit codes: 0 success, 1 issues found (with `--fail-on-issues`),
//! 2 unreadable protocol or configuration.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use protocol_ir::features::fault_handling::domain::count_by_category;
use protocol_ir::features::node_assembly::{NameResolver, NodeAssembler, NodeSummary};
use protocol_ir::{
    AnalysisConfig, FaultHandlingAnalyzer, FaultHandlingReport, Issue, ProtocolFile,
    ProtocolModel, ProtocolSource,
};

#[derive(Parser)]
#[command(name = "protocol-check")]
#[command(about = "Management protocol fault-handling verifier", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Analysis configuration (YAML, `version: 1`)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze protocol documents
    Analyze {
        /// Protocol files (.yaml, .yml, .json)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Exit with code 1 when any issue is found
        #[arg(long)]
        fail_on_issues: bool,
    },

    /// Print the assembled node summary of one protocol
    Summary {
        /// Protocol file
        file: PathBuf,

        /// Capability / requirement name mapping (YAML)
        #[arg(long)]
        names: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            files,
            fail_on_issues,
        } => {
            let models = load_models(&files, &config)?;
            let reports = FaultHandlingAnalyzer::new()
                .with_config(config)
                .analyze_all(&models);

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
                OutputFormat::Text => {
                    for report in &reports {
                        print_report(report);
                    }
                }
            }

            let all: Vec<Issue> = reports.iter().flat_map(|r| r.issues.clone()).collect();
            let (wellformed, determinism, race) = count_by_category(&all);
            let total = all.len();
            tracing::info!(
                "{} protocols analyzed: {} well-formedness, {} determinism, {} race freedom issues",
                reports.len(),
                wellformed,
                determinism,
                race
            );

            if fail_on_issues && total > 0 {
                Ok(ExitCode::from(1))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Commands::Summary { file, names } => {
            let model = load_models(std::slice::from_ref(&file), &config)?
                .pop()
                .context("no protocol loaded")?;
            let resolver = match names {
                Some(path) => load_names(&path)?,
                None => NameResolver::identity(),
            };

            let report = FaultHandlingAnalyzer::new()
                .with_config(config)
                .analyze(&model);
            let (node, node_issues) = NodeAssembler::new()
                .with_resolver(resolver)
                .assemble(&model, &report);

            match cli.format {
                OutputFormat::Json => {
                    let doc = serde_json::json!({
                        "node": node,
                        "issues": report.issues.iter().chain(&node_issues).collect::<Vec<_>>(),
                    });
                    println!("{}", serde_json::to_string_pretty(&doc)?);
                }
                OutputFormat::Text => print_summary(&node, report.issues.iter().chain(&node_issues)),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::from_yaml(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

fn load_models(files: &[PathBuf], config: &AnalysisConfig) -> Result<Vec<ProtocolModel>> {
    files
        .iter()
        .map(|path| {
            let source = ProtocolFile::new(path).strict_vocabulary(config.strict_vocabulary);
            source
                .load()
                .with_context(|| format!("Failed to load protocol {}", source.origin()))
        })
        .collect()
}

fn load_names(path: &Path) -> Result<NameResolver> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read name mapping {}", path.display()))?;
    serde_yaml::from_str(&text)
        .with_context(|| format!("Invalid name mapping {}", path.display()))
}

fn print_report(report: &FaultHandlingReport) {
    println!("== {} ==", report.component);

    if report.issues.is_empty() {
        println!("issues: none");
    } else {
        println!("issues:");
        for issue in &report.issues {
            println!("  {}", issue);
        }
    }
    for defect in &report.internal_defects {
        println!("  internal: {}", defect);
    }

    println!("derived edges:");
    for edge in report.derived_edges.edges() {
        println!("  {} -> {}", edge.source, edge.target);
    }

    println!("handler map:");
    for (state, row) in report.handler_map.iter() {
        for (requirement, target) in row {
            println!("  {} [{}] -> {}", state, requirement, target);
        }
    }
    println!();
}

fn print_summary<'a>(node: &NodeSummary, issues: impl Iterator<Item = &'a Issue>) {
    println!("{} (initial: {})", node.type_name, node.initial_state);
    println!("  capabilities: {}", node.capabilities);
    println!("  requirements: {}", node.requirements);
    match &node.ready_state {
        Some(state) => println!("  ready in: {}", state),
        None => println!("  ready in: -"),
    }

    for (id, state) in &node.states {
        let marker = if state.is_alive { "" } else { " (initial)" };
        println!("  state {}{}", id, marker);
        println!("    caps {} reqs {}", state.capabilities, state.requirements);
        for (name, op) in &state.operations {
            let guards: Vec<String> = op
                .requirement_alternatives
                .iter()
                .map(|reqs| reqs.to_string())
                .collect();
            let marker = if op.is_enabled_by(&node.requirements) {
                ""
            } else {
                " (never enabled)"
            };
            println!(
                "    {} -> {} when {}{}",
                name,
                op.target,
                guards.join(" | "),
                marker
            );
        }
        for (requirement, target) in &state.handlers {
            println!("    on loss of {} -> {}", requirement, target);
        }
    }

    for issue in issues {
        println!("  {}", issue);
    }
}
