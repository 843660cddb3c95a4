//! `fabquote process` command - manufacturing process browsing

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::catalog::{Catalog, ProcessKind};
use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum ProcessCommands {
    /// List available processes
    List(ListArgs),

    /// Show a process's details and materials
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Process id (fdm, sla, cnc, laser)
    pub process: ProcessKind,
}

/// Row shape for structured list output
#[derive(Debug, Serialize)]
struct ProcessRow<'a> {
    id: ProcessKind,
    name: &'a str,
    description: &'a str,
    cost_multiplier: f64,
    hours_per_cm3: f64,
    materials: usize,
}

pub fn run(cmd: ProcessCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProcessCommands::List(args) => run_list(args, global),
        ProcessCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(_args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = Catalog::global().into_diagnostic()?;

    let rows: Vec<ProcessRow> = catalog
        .processes()
        .iter()
        .map(|p| ProcessRow {
            id: p.id,
            name: &p.name,
            description: &p.description,
            cost_multiplier: p.id.cost_multiplier(),
            hours_per_cm3: p.id.hours_per_cm3(),
            materials: catalog.materials(p.id).len(),
        })
        .collect();

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&rows).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            println!("id,name,description,cost_multiplier,hours_per_cm3,materials");
            for row in &rows {
                println!(
                    "{},{},{},{},{},{}",
                    row.id,
                    escape_csv(row.name),
                    escape_csv(row.description),
                    row.cost_multiplier,
                    row.hours_per_cm3,
                    row.materials
                );
            }
        }
        OutputFormat::Md => {
            println!("| ID | Name | Description | Multiplier | Hours/cm³ | Materials |");
            println!("|---|---|---|---|---|---|");
            for row in &rows {
                println!(
                    "| {} | {} | {} | {} | {} | {} |",
                    row.id,
                    row.name,
                    row.description,
                    row.cost_multiplier,
                    row.hours_per_cm3,
                    row.materials
                );
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{:<7} {:<18} {:<38} {:<6} {:<10} {:<9}",
                style("ID").bold(),
                style("NAME").bold(),
                style("DESCRIPTION").bold(),
                style("MULT").bold(),
                style("HRS/CM³").bold(),
                style("MATERIALS").bold()
            );
            println!("{}", "-".repeat(92));
            for row in &rows {
                println!(
                    "{:<7} {:<18} {:<38} {:<6} {:<10} {:<9}",
                    style(row.id.to_string()).cyan(),
                    truncate_str(row.name, 16),
                    truncate_str(row.description, 36),
                    row.cost_multiplier,
                    row.hours_per_cm3,
                    row.materials
                );
            }
            if !global.quiet {
                println!();
                println!(
                    "{} process(es). Use {} for rates.",
                    style(rows.len()).cyan(),
                    style("fabquote material list").cyan()
                );
            }
        }
    }

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = Catalog::global().into_diagnostic()?;
    let entry = catalog
        .process(args.process)
        .ok_or_else(|| miette::miette!("no catalog entry for process '{}'", args.process))?;

    match global.format {
        OutputFormat::Json => {
            let row = ProcessRow {
                id: entry.id,
                name: &entry.name,
                description: &entry.description,
                cost_multiplier: entry.id.cost_multiplier(),
                hours_per_cm3: entry.id.hours_per_cm3(),
                materials: catalog.materials(entry.id).len(),
            };
            let json = serde_json::to_string_pretty(&row).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(entry).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {}",
                style("Process").bold(),
                style(&entry.name).yellow()
            );
            println!("{}: {}", style("Id").bold(), style(entry.id).cyan());
            println!("{}: {}", style("About").bold(), entry.description);
            println!(
                "{}: {}x | {}: {} hours/cm³",
                style("Cost multiplier").bold(),
                entry.id.cost_multiplier(),
                style("Machine time").bold(),
                entry.id.hours_per_cm3()
            );
            println!("{}", style("─".repeat(60)).dim());
            println!();
            println!("{}", style("Materials (default first):").bold());
            for material in catalog.materials(entry.id) {
                println!(
                    "  {:<16} {:<22} {}",
                    style(&material.id).cyan(),
                    material.name,
                    style(format!("${}/cm³", material.price_per_cm3)).dim()
                );
            }
        }
    }

    Ok(())
}
