//! `fabquote sample` command - sample project browsing

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::catalog::Catalog;
use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum SampleCommands {
    /// List sample projects
    List(ListArgs),

    /// Show one sample project
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Sample id (e.g. gear)
    pub id: String,
}

pub fn run(cmd: SampleCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SampleCommands::List(args) => run_list(args, global),
        SampleCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(_args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = Catalog::global().into_diagnostic()?;
    let samples = catalog.samples();

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(samples).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&samples).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            println!("id,name,process,material,dimensions,quantity");
            for sample in samples {
                println!(
                    "{},{},{},{},{},{}",
                    sample.id,
                    escape_csv(&sample.name),
                    sample.process,
                    sample.material,
                    sample.dimensions,
                    sample.quantity
                );
            }
        }
        OutputFormat::Md => {
            println!("| ID | Name | Process | Material | Size | Qty |");
            println!("|---|---|---|---|---|---|");
            for sample in samples {
                println!(
                    "| {} | {} | {} | {} | {} | {} |",
                    sample.id,
                    sample.name,
                    sample.process,
                    sample.material,
                    sample.dimensions,
                    sample.quantity
                );
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{:<11} {:<24} {:<8} {:<16} {:<14} {:<4}",
                style("ID").bold(),
                style("NAME").bold(),
                style("PROCESS").bold(),
                style("MATERIAL").bold(),
                style("SIZE").bold(),
                style("QTY").bold()
            );
            println!("{}", "-".repeat(82));
            for sample in samples {
                println!(
                    "{:<11} {:<24} {:<8} {:<16} {:<14} {:<4}",
                    style(&sample.id).cyan(),
                    truncate_str(&sample.name, 22),
                    sample.process,
                    sample.material,
                    sample.dimensions.to_string(),
                    sample.quantity
                );
            }
            if !global.quiet {
                println!();
                println!(
                    "{} sample(s). Try {}.",
                    style(samples.len()).cyan(),
                    style("fabquote quote --sample gear").cyan()
                );
            }
        }
    }

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = Catalog::global().into_diagnostic()?;
    let sample = catalog.sample(&args.id).ok_or_else(|| {
        miette::miette!("Unknown sample '{}'. See `fabquote sample list`", args.id)
    })?;

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(sample).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(sample).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!("{}: {}", style("Sample").bold(), style(&sample.name).yellow());
            println!("{}: {}", style("Id").bold(), style(&sample.id).cyan());
            println!("{}: {}", style("Process").bold(), sample.process);
            println!("{}: {}", style("Material").bold(), sample.material);
            println!(
                "{}: {} × {}",
                style("Size").bold(),
                sample.dimensions,
                sample.quantity
            );
            println!("{}", style("─".repeat(60)).dim());
            println!(
                "Quote it: {}",
                style(format!("fabquote quote --sample {}", sample.id)).cyan()
            );
        }
    }

    Ok(())
}
