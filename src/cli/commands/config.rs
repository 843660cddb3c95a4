//! `fabquote config` command - configuration management
//!
//! Provides commands to view and modify FabQuote configuration.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::collections::BTreeMap;
use std::fs;

use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show the path to the configuration file
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g. author, currency)
    pub key: String,

    /// Value to set
    pub value: String,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("author", "Author recorded on produced quotes"),
    ("currency", "Default display currency (MXN, USD, or EUR)"),
    (
        "default_format",
        "Default output format (yaml, json, tsv, etc.)",
    ),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, _global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Set(args) => run_set(args),
        ConfigCommands::Unset(args) => run_unset(args),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "author" => config.author.clone(),
        "currency" => config.currency.clone(),
        "default_format" => config.default_format.clone(),
        _ => None,
    }
}

fn is_valid_key(key: &str) -> bool {
    VALID_KEYS.iter().any(|(k, _)| *k == key)
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        if !is_valid_key(key) {
            return Err(miette::miette!(
                "Unknown key '{}'. See `fabquote config keys`",
                key
            ));
        }
        match get_config_value(&config, key) {
            Some(value) => println!("{}", value),
            None => return Err(miette::miette!("Key '{}' is not set", key)),
        }
        return Ok(());
    }

    for (key, _) in VALID_KEYS {
        let value = get_config_value(&config, key)
            .map_or_else(|| style("(unset)").dim().to_string(), |v| v);
        println!("{:<16} {}", style(key).bold(), value);
    }

    Ok(())
}

fn run_set(args: SetArgs) -> Result<()> {
    if !is_valid_key(&args.key) {
        return Err(miette::miette!(
            "Unknown key '{}'. See `fabquote config keys`",
            args.key
        ));
    }

    // Currency values are worth validating early; a typo here would
    // silently fall back to MXN at use time
    if args.key == "currency" {
        args.value
            .parse::<crate::pricing::Currency>()
            .map_err(|e| miette::miette!("{}", e))?;
    }

    let path = Config::config_path()
        .ok_or_else(|| miette::miette!("could not determine a config directory"))?;

    let mut values: BTreeMap<String, String> = if path.exists() {
        let contents = fs::read_to_string(&path).into_diagnostic()?;
        serde_yml::from_str(&contents).unwrap_or_default()
    } else {
        BTreeMap::new()
    };

    values.insert(args.key.clone(), args.value.clone());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    let yaml = serde_yml::to_string(&values).into_diagnostic()?;
    fs::write(&path, yaml).into_diagnostic()?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        style(&args.key).bold(),
        style(&args.value).cyan()
    );
    Ok(())
}

fn run_unset(args: UnsetArgs) -> Result<()> {
    if !is_valid_key(&args.key) {
        return Err(miette::miette!(
            "Unknown key '{}'. See `fabquote config keys`",
            args.key
        ));
    }

    let path = Config::config_path()
        .ok_or_else(|| miette::miette!("could not determine a config directory"))?;

    if !path.exists() {
        println!("Key '{}' was not set.", args.key);
        return Ok(());
    }

    let contents = fs::read_to_string(&path).into_diagnostic()?;
    let mut values: BTreeMap<String, String> =
        serde_yml::from_str(&contents).unwrap_or_default();

    if values.remove(&args.key).is_none() {
        println!("Key '{}' was not set.", args.key);
        return Ok(());
    }

    let yaml = serde_yml::to_string(&values).into_diagnostic()?;
    fs::write(&path, yaml).into_diagnostic()?;

    println!("{} Unset {}", style("✓").green(), style(&args.key).bold());
    Ok(())
}

fn run_path() -> Result<()> {
    let path = Config::config_path()
        .ok_or_else(|| miette::miette!("could not determine a config directory"))?;
    println!("{}", path.display());
    Ok(())
}

fn run_keys() -> Result<()> {
    for (key, description) in VALID_KEYS {
        println!("{:<16} {}", style(key).bold(), description);
    }
    Ok(())
}
