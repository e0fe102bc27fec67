//! ledgerstat CLI - Main entry point

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ledgerstat_cli::{build_context, load_pages, ContextOverrides, StatementReport};

#[derive(Parser)]
#[command(name = "ledgerstat")]
#[command(about = "Ledger statement aggregation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate ledger API pages into a statement report (JSON on stdout)
    Aggregate {
        /// Envelope files; none or `-` reads stdin
        pages: Vec<PathBuf>,

        /// JSON file with a full statement context
        #[arg(long)]
        context: Option<PathBuf>,

        /// Viewer role: owner, agent or user
        #[arg(long, env = "LEDGERSTAT_ROLE")]
        role: Option<String>,

        /// Caller identity (used for the agent view)
        #[arg(long, env = "LEDGERSTAT_CURRENT_USER")]
        current_user: Option<String>,

        /// Prefix stripped from agent/owner names
        #[arg(long, env = "LEDGERSTAT_NAME_PREFIX")]
        name_prefix: Option<String>,

        /// Use agent discount rates instead of the bettor's own
        #[arg(long, env = "LEDGERSTAT_AGENT_DISCOUNT")]
        agent_discount: bool,

        /// Omit the grand-totals footer
        #[arg(long)]
        no_totals: bool,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> Result<()> {
    ledgerstat_observability::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Aggregate {
            pages,
            context,
            role,
            current_user,
            name_prefix,
            agent_discount,
            no_totals,
            compact,
        } => {
            let ctx = build_context(&ContextOverrides {
                context_file: context,
                role,
                current_user,
                name_prefix,
                agent_discount,
            })?;
            let pages = load_pages(&pages)?;
            let report = StatementReport::build(pages, ctx, !no_totals)?;

            let mut stdout = std::io::stdout().lock();
            if compact {
                serde_json::to_writer(&mut stdout, &report)?;
            } else {
                serde_json::to_writer_pretty(&mut stdout, &report)?;
            }
            writeln!(stdout).context("failed to write report")?;
        }
    }

    Ok(())
}
