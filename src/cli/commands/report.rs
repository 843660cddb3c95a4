//! `fabquote report` command - rate-card reports

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::catalog::Catalog;
use crate::cli::GlobalOpts;
use crate::pricing::model::{
    BULK_QTY_THRESHOLD, LABOR_RATE_BULK, LABOR_RATE_STANDARD, LABOR_SETUP_FEE,
    MACHINE_RATE_PER_CM3, SHIPPING_BUFFER_DAYS,
};

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Full rate card: processes, materials, and fees (markdown)
    Rates(RatesArgs),
}

#[derive(clap::Args, Debug)]
pub struct RatesArgs {}

pub fn run(cmd: ReportCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReportCommands::Rates(args) => run_rates(args, global),
    }
}

fn run_rates(_args: RatesArgs, _global: &GlobalOpts) -> Result<()> {
    let catalog = Catalog::global().into_diagnostic()?;

    let mut output = String::new();
    output.push_str("# Rate Card\n\n");

    // Process table
    output.push_str("## Processes\n\n");
    let mut builder = Builder::default();
    builder.push_record(["ID", "Process", "Cost Multiplier", "Hours/cm³"]);
    for process in catalog.processes() {
        builder.push_record([
            process.id.to_string(),
            process.name.clone(),
            format!("{}x", process.id.cost_multiplier()),
            process.id.hours_per_cm3().to_string(),
        ]);
    }
    output.push_str(&builder.build().with(Style::markdown()).to_string());
    output.push('\n');

    // Material tables, one per process
    output.push_str("\n## Materials\n");
    for process in catalog.processes() {
        output.push_str(&format!("\n### {} ({})\n\n", process.name, process.id));
        let mut builder = Builder::default();
        builder.push_record(["ID", "Material", "Price/cm³", "Default"]);
        for (i, material) in catalog.materials(process.id).iter().enumerate() {
            builder.push_record([
                material.id.clone(),
                material.name.clone(),
                material.price_per_cm3.to_string(),
                if i == 0 { "yes".to_string() } else { String::new() },
            ]);
        }
        output.push_str(&builder.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    // Flat fees and thresholds
    output.push_str("\n## Fees\n\n");
    output.push_str(&format!(
        "- **Machine time:** {}/cm³ per unit (before process multiplier)\n",
        MACHINE_RATE_PER_CM3
    ));
    output.push_str(&format!("- **Setup fee:** {} per order\n", LABOR_SETUP_FEE));
    output.push_str(&format!(
        "- **Labor:** {}/unit, {}/unit for orders above {} units\n",
        LABOR_RATE_STANDARD, LABOR_RATE_BULK, BULK_QTY_THRESHOLD
    ));
    output.push_str(&format!(
        "- **Shipping buffer:** {} days on every delivery estimate\n",
        SHIPPING_BUFFER_DAYS
    ));

    print!("{}", output);
    Ok(())
}
