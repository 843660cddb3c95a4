//! `fabquote quote` command - instant quote calculation

use chrono::{DateTime, Utc};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::catalog::{Catalog, ProcessKind};
use crate::cli::commands::utils::{print_upsell, quota_line, UpsellReason};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::{RecordId, RecordPrefix};
use crate::core::Config;
use crate::pricing::{self, Currency, Dimensions, Quote, QuoteRequest};
use crate::session::{QuotaState, SessionStore};

#[derive(clap::Args, Debug)]
pub struct QuoteArgs {
    /// Manufacturing process
    #[arg(long, short = 'p', value_enum)]
    pub process: Option<ProcessKind>,

    /// Material id (see `fabquote material list`)
    #[arg(long, short = 'm')]
    pub material: Option<String>,

    /// Bounding-box dimensions in mm, as WIDTHxDEPTHxHEIGHT (e.g. 50x50x50)
    #[arg(long, short = 'd')]
    pub dims: Option<Dimensions>,

    /// Order quantity (default 1)
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u32).range(1..))]
    pub quantity: Option<u32>,

    /// Display currency
    #[arg(long, short = 'c', value_enum)]
    pub currency: Option<Currency>,

    /// Start from a sample project (see `fabquote sample list`)
    #[arg(long, short = 's')]
    pub sample: Option<String>,

    /// Interactive mode (prompt for fields)
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

/// A produced quote, as displayed and serialized
#[derive(Debug, Serialize)]
struct QuoteRecord {
    id: RecordId,
    created: DateTime<Utc>,
    author: String,
    currency: Currency,
    request: QuoteRequest,
    material_name: String,
    quote: Quote,
}

/// Serialized shape of a quota refusal (for --format json/yaml)
#[derive(Debug, Serialize)]
struct Refusal {
    refused: bool,
    reason: &'static str,
    used: u32,
    limit: u32,
}

pub fn run(args: QuoteArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = Catalog::global().into_diagnostic()?;
    let config = Config::load();

    let request = build_request(&args, catalog)?;
    let currency = args.currency.unwrap_or_else(|| config.currency());

    // Surface the material fallback before pricing so the degradation is
    // visible even in quiet mode scripts that only read the quote
    let lookup = catalog
        .resolve_material(request.process, &request.material)
        .ok_or_else(|| miette::miette!("process '{}' has no materials", request.process))?;
    if lookup.fell_back && !global.quiet {
        eprintln!(
            "{} Unknown material '{}' for {}; using default '{}'",
            style("!").yellow(),
            request.material,
            request.process,
            lookup.material.id
        );
    }

    // Quota gate: the guard decides whether the calculation may run
    let store = SessionStore::open().into_diagnostic()?;
    let mut session = store.load_or_start().into_diagnostic()?;

    if let Err(refusal) = session.quota.try_consume() {
        match effective_format(global) {
            OutputFormat::Json => {
                let body = serde_json::to_string_pretty(&Refusal {
                    refused: true,
                    reason: "demo_limit_reached",
                    used: session.quota.used(),
                    limit: refusal.limit,
                })
                .into_diagnostic()?;
                println!("{}", body);
            }
            OutputFormat::Yaml => {
                let body = serde_yml::to_string(&Refusal {
                    refused: true,
                    reason: "demo_limit_reached",
                    used: session.quota.used(),
                    limit: refusal.limit,
                })
                .into_diagnostic()?;
                print!("{}", body);
            }
            _ => {
                println!(
                    "{} Demo limit reached: {} of {} quotes used in this session.",
                    style("!").yellow(),
                    session.quota.used(),
                    refusal.limit
                );
                print_upsell(UpsellReason::DemoComplete {
                    limit: refusal.limit,
                });
            }
        }
        return Ok(());
    }

    let quote = pricing::calculate(catalog, &request);
    store.save(&session).into_diagnostic()?;

    let record = QuoteRecord {
        id: RecordId::new(RecordPrefix::Quot),
        created: Utc::now(),
        author: config.author(),
        currency,
        material_name: lookup.material.name.clone(),
        request,
        quote,
    };

    match effective_format(global) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&record).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&record).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => print_pretty(&record, &session.quota, catalog, global, &store),
    }

    Ok(())
}

fn effective_format(global: &GlobalOpts) -> OutputFormat {
    match global.format {
        OutputFormat::Auto => OutputFormat::Tsv, // pretty text path
        f => f,
    }
}

/// Assemble the request from a sample, flags, or the wizard
fn build_request(args: &QuoteArgs, catalog: &Catalog) -> Result<QuoteRequest> {
    if args.interactive {
        return run_wizard(args, catalog);
    }

    if let Some(ref sample_id) = args.sample {
        let sample = catalog.sample(sample_id).ok_or_else(|| {
            miette::miette!(
                "Unknown sample '{}'. See `fabquote sample list`",
                sample_id
            )
        })?;

        let mut request = sample.to_request();
        // Explicit flags override individual sample fields
        if let Some(process) = args.process {
            request.process = process;
            if args.material.is_none() && request.process != sample.process {
                // Material belongs to the old process; fall back to the
                // new process's default rather than carrying a stale id
                if let Some(default) = catalog.default_material(process) {
                    request.material = default.id.clone();
                }
            }
        }
        if let Some(ref material) = args.material {
            request.material = material.clone();
        }
        if let Some(dims) = args.dims {
            request.dimensions = dims;
        }
        if let Some(quantity) = args.quantity {
            request.quantity = quantity;
        }
        return Ok(request);
    }

    let process = args
        .process
        .ok_or_else(|| miette::miette!("--process is required (or use --sample / -i)"))?;
    let dims = args
        .dims
        .ok_or_else(|| miette::miette!("--dims is required (or use --sample / -i)"))?;
    let material = match args.material {
        Some(ref m) => m.clone(),
        None => catalog
            .default_material(process)
            .map(|m| m.id.clone())
            .ok_or_else(|| miette::miette!("process '{}' has no materials", process))?,
    };

    Ok(QuoteRequest {
        process,
        material,
        dimensions: dims,
        quantity: args.quantity.unwrap_or(1),
    })
}

/// Prompt for each request field, pre-filling from any flags given
fn run_wizard(args: &QuoteArgs, catalog: &Catalog) -> Result<QuoteRequest> {
    let theme = ColorfulTheme::default();

    let process = match args.process {
        Some(p) => p,
        None => {
            let labels: Vec<String> = catalog
                .processes()
                .iter()
                .map(|p| format!("{} - {}", p.name, p.description))
                .collect();
            let idx = Select::with_theme(&theme)
                .with_prompt("Manufacturing process")
                .items(&labels)
                .default(0)
                .interact()
                .into_diagnostic()?;
            catalog.processes()[idx].id
        }
    };

    let material = match args.material {
        Some(ref m) => m.clone(),
        None => {
            let materials = catalog.materials(process);
            let labels: Vec<String> = materials
                .iter()
                .map(|m| format!("{} - {}/cm³", m.name, m.price_per_cm3))
                .collect();
            let idx = Select::with_theme(&theme)
                .with_prompt("Material")
                .items(&labels)
                .default(0)
                .interact()
                .into_diagnostic()?;
            materials[idx].id.clone()
        }
    };

    let dimensions = match args.dims {
        Some(d) => d,
        None => {
            let input: String = Input::with_theme(&theme)
                .with_prompt("Dimensions in mm (WxDxH)")
                .default("50x50x50".to_string())
                .validate_with(|s: &String| s.parse::<Dimensions>().map(|_| ()))
                .interact_text()
                .into_diagnostic()?;
            input
                .parse()
                .map_err(|e: String| miette::miette!("{}", e))?
        }
    };

    let quantity = match args.quantity {
        Some(q) => q,
        None => Input::with_theme(&theme)
            .with_prompt("Quantity")
            .default(1u32)
            .validate_with(|q: &u32| {
                if *q >= 1 {
                    Ok(())
                } else {
                    Err("quantity must be at least 1")
                }
            })
            .interact_text()
            .into_diagnostic()?,
    };

    Ok(QuoteRequest {
        process,
        material,
        dimensions,
        quantity,
    })
}

fn print_pretty(
    record: &QuoteRecord,
    quota: &crate::session::QuotaGuard,
    catalog: &Catalog,
    global: &GlobalOpts,
    store: &SessionStore,
) {
    let currency = record.currency;
    let quote = &record.quote;
    let request = &record.request;

    let process_name = catalog
        .process(request.process)
        .map_or_else(|| request.process.to_string(), |p| p.name.clone());
    let volume_cm3 = request.dimensions.volume_mm3() / 1000.0;

    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {}",
        style("ID").bold(),
        style(record.id.to_string()).cyan()
    );
    println!("{}: {}", style("Process").bold(), process_name);
    println!(
        "{}: {} ({}/cm³)",
        style("Material").bold(),
        record.material_name,
        pricing::format_amount(
            catalog
                .resolve_material(request.process, &request.material)
                .map_or(0.0, |l| l.material.price_per_cm3),
            currency
        )
    );
    println!(
        "{}: {} ({:.1} cm³) × {}",
        style("Size").bold(),
        request.dimensions,
        volume_cm3,
        request.quantity
    );
    println!("{}", style("─".repeat(60)).dim());

    println!(
        "{}: {}",
        style("Estimated Total").bold(),
        style(pricing::format_amount(quote.total_price, currency))
            .green()
            .bold()
    );
    println!(
        "{}: {} × {}",
        style("Per Unit").bold(),
        pricing::format_amount(quote.unit_price, currency),
        request.quantity
    );
    println!(
        "{}: ~{} hours | {}: ~{} days",
        style("Production").bold(),
        quote.estimated_hours,
        style("Delivery").bold(),
        quote.estimated_days
    );

    println!();
    println!("{}", style("Cost Breakdown").bold());
    println!(
        "  {:<14} {}",
        "Material",
        pricing::format_amount(quote.breakdown.material_cost, currency)
    );
    println!(
        "  {:<14} {}",
        "Machine Time",
        pricing::format_amount(quote.breakdown.machine_cost, currency)
    );
    println!(
        "  {:<14} {}",
        "Labor & Setup",
        pricing::format_amount(quote.breakdown.labor_cost, currency)
    );
    println!("{}", style("─".repeat(60)).dim());

    if !global.quiet {
        let hint = if quota.state() == QuotaState::Exhausted {
            "run `fabquote checkout` to order, or `fabquote session reset` for a new demo"
        } else {
            "run `fabquote checkout` to order"
        };
        println!("{} · {}", style(quota_line(quota)).cyan(), style(hint).dim());
        if global.verbose {
            println!("{}", style(format!("session: {}", store.path().display())).dim());
        }
    }
}
