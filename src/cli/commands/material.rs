//! `fabquote material` command - material and rate browsing

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::catalog::{Catalog, ProcessKind};
use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum MaterialCommands {
    /// List materials, optionally for one process
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only show materials for this process
    #[arg(long, short = 'p', value_enum)]
    pub process: Option<ProcessKind>,
}

/// Row shape for structured list output
#[derive(Debug, Serialize)]
struct MaterialRow<'a> {
    process: ProcessKind,
    id: &'a str,
    name: &'a str,
    price_per_cm3: f64,
    default: bool,
}

pub fn run(cmd: MaterialCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        MaterialCommands::List(args) => run_list(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = Catalog::global().into_diagnostic()?;

    let kinds: Vec<ProcessKind> = match args.process {
        Some(kind) => vec![kind],
        None => ProcessKind::all().to_vec(),
    };

    let mut rows: Vec<MaterialRow> = Vec::new();
    for kind in &kinds {
        for (i, material) in catalog.materials(*kind).iter().enumerate() {
            rows.push(MaterialRow {
                process: *kind,
                id: &material.id,
                name: &material.name,
                price_per_cm3: material.price_per_cm3,
                default: i == 0,
            });
        }
    }

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
            println!("process,id,name,price_per_cm3,default");
            for row in &rows {
                println!(
                    "{},{},{},{},{}",
                    row.process,
                    row.id,
                    escape_csv(row.name),
                    row.price_per_cm3,
                    row.default
                );
            }
        }
        OutputFormat::Md => {
            println!("| Process | ID | Name | Price/cm³ | Default |");
            println!("|---|---|---|---|---|");
            for row in &rows {
                println!(
                    "| {} | {} | {} | {} | {} |",
                    row.process,
                    row.id,
                    row.name,
                    row.price_per_cm3,
                    if row.default { "yes" } else { "" }
                );
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{:<8} {:<16} {:<24} {:<10} {:<7}",
                style("PROCESS").bold(),
                style("ID").bold(),
                style("NAME").bold(),
                style("$/CM³").bold(),
                style("DEFAULT").bold()
            );
            println!("{}", "-".repeat(70));
            for row in &rows {
                println!(
                    "{:<8} {:<16} {:<24} {:<10} {:<7}",
                    style(row.process.to_string()).cyan(),
                    row.id,
                    truncate_str(row.name, 22),
                    row.price_per_cm3,
                    if row.default {
                        style("*").yellow().to_string()
                    } else {
                        String::new()
                    }
                );
            }
            if !global.quiet {
                println!();
                println!(
                    "{} material(s). {} marks each process's default.",
                    style(rows.len()).cyan(),
                    style("*").yellow()
                );
            }
        }
    }

    Ok(())
}
