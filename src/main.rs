use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flow_resolve::cli::{self, OutputMode};
use flow_resolve::config::FlowresConfig;
use flow_resolve::logging;
use flow_resolve::template::KeyOrder;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flowres")]
#[command(about = "Resolve drawflow workflow edges, variables and selectors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project directory for .flowres/config.toml (defaults to current)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Output mode (overrides config)
    #[arg(long, value_enum, global = true)]
    output: Option<OutputMode>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress normal output
    #[arg(long, global = true)]
    quiet: bool,

    /// Also log to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Also log to the default log directory
    #[arg(long, global = true, conflicts_with = "log_file")]
    log: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the node adjacency map of a workflow
    Edges {
        /// Workflow JSON file, `-` for stdin
        file: PathBuf,

        /// Fail on a missing edge list or malformed edges
        #[arg(long)]
        strict: bool,
    },

    /// Print the execution order of a workflow
    Order {
        /// Workflow JSON file, `-` for stdin
        file: PathBuf,

        /// Fail on a missing edge list or malformed edges
        #[arg(long)]
        strict: bool,
    },

    /// Resolve variables in a template
    Resolve {
        /// Template text
        template: String,

        /// JSON object with variables
        #[arg(long)]
        vars: Option<PathBuf>,

        /// Substitute longer keys before shorter ones
        #[arg(long)]
        longest_first: bool,
    },

    /// Print the loop variable referenced by a template
    LoopVar {
        /// Template text
        template: String,
    },

    /// Translate a CSS selector to XPath
    Xpath {
        /// Selector text
        selector: String,
    },

    /// Remove line breaks and tabs from text
    CleanText {
        /// Text to clean
        text: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = FlowresConfig::load(cli.dir.as_deref()).context("loading configuration")?;

    let debug = cli.debug || config.logging.debug;
    let log_file = if cli.log {
        Some(logging::default_log_path()?)
    } else if cli.log_file.is_some() {
        cli.log_file.clone()
    } else {
        config.log_file()?
    };
    logging::init_logging(debug, cli.quiet, log_file)?;

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        cli.output.unwrap_or_else(|| config.output_mode())
    };
    let handler = cli::create_handler(mode, debug);

    tracing::debug!(?mode, "Starting flowres");

    let result = match cli.command {
        Commands::Edges { file, strict } => cli::show_edges(&file, strict, &*handler),
        Commands::Order { file, strict } => cli::show_order(&file, strict, &*handler),
        Commands::Resolve {
            template,
            vars,
            longest_first,
        } => {
            let mut resolver = config.resolver();
            if longest_first {
                resolver = resolver.with_key_order(KeyOrder::LongestFirst);
            }
            cli::resolve_template(&template, vars.as_deref(), &resolver, &*handler)
        }
        Commands::LoopVar { template } => Ok(cli::loop_variable(&template, &*handler)),
        Commands::Xpath { selector } => Ok(cli::xpath(&selector, &*handler)),
        Commands::CleanText { text } => Ok(cli::clean_text(&text, &*handler)),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            anyhow::bail!(e)
        }
    }
}
