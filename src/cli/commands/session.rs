//! `fabquote session` command - demo session lifecycle

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::quota_line;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::session::{QuotaState, SessionStore};

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Show the current demo session
    Show(ShowArgs),

    /// Start a new demo session (replaces the current one)
    Reset(ResetArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {}

#[derive(clap::Args, Debug)]
pub struct ResetArgs {}

pub fn run(cmd: SessionCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SessionCommands::Show(args) => run_show(args, global),
        SessionCommands::Reset(args) => run_reset(args, global),
    }
}

fn run_show(_args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = SessionStore::open().into_diagnostic()?;
    let session = store.load_or_start().into_diagnostic()?;

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&session).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&session).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => {
            let state = match session.quota.state() {
                QuotaState::Available => style("available").green(),
                QuotaState::Exhausted => style("exhausted").red(),
            };

            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {}",
                style("Session").bold(),
                style(session.id.to_string()).cyan()
            );
            println!(
                "{}: {}",
                style("Started").bold(),
                session.started.format("%Y-%m-%d %H:%M UTC")
            );
            println!(
                "{}: {} ({} of {} used)",
                style("Quota").bold(),
                state,
                session.quota.used(),
                session.quota.limit()
            );
            println!("{}", style("─".repeat(60)).dim());

            if !global.quiet {
                println!("{}", style(quota_line(&session.quota)).cyan());
                if session.quota.state() == QuotaState::Exhausted {
                    println!(
                        "{}",
                        style("Run `fabquote session reset` to start a new demo.").dim()
                    );
                }
                if global.verbose {
                    println!(
                        "{}",
                        style(format!("session file: {}", store.path().display())).dim()
                    );
                }
            }
        }
    }

    Ok(())
}

fn run_reset(_args: ResetArgs, global: &GlobalOpts) -> Result<()> {
    let store = SessionStore::open().into_diagnostic()?;
    let session = store.reset().into_diagnostic()?;

    println!(
        "{} Started new demo session {}",
        style("✓").green(),
        style(session.id.to_string()).cyan()
    );
    if !global.quiet {
        println!("   {}", style(quota_line(&session.quota)).dim());
    }

    Ok(())
}
