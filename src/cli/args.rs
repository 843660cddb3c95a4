//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    checkout::CheckoutArgs,
    completions::CompletionsArgs,
    config::ConfigCommands,
    material::MaterialCommands,
    process::ProcessCommands,
    quote::QuoteArgs,
    report::ReportCommands,
    sample::SampleCommands,
    session::SessionCommands,
};

#[derive(Parser)]
#[command(name = "fabquote")]
#[command(author, version, about = "Instant quoting for digital fabrication")]
#[command(
    long_about = "Price FDM/SLA 3D printing, CNC machining, and laser cutting jobs from bounding-box dimensions. Demo sessions include a limited number of free quotes."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate an instant quote
    Quote(QuoteArgs),

    /// Browse manufacturing processes
    #[command(subcommand)]
    Process(ProcessCommands),

    /// Browse materials and rates
    #[command(subcommand)]
    Material(MaterialCommands),

    /// Browse sample projects
    #[command(subcommand)]
    Sample(SampleCommands),

    /// Inspect or restart the demo session
    #[command(subcommand)]
    Session(SessionCommands),

    /// Proceed to checkout (sign-up required)
    Checkout(CheckoutArgs),

    /// Generate rate-card reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (text for quotes, tsv for lists)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}
