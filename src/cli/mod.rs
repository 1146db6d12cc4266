//! Command-line interface module.

mod args;

pub use args::{Cli, Commands};

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use minify_uri::config::STRICT;
use minify_uri::{
    Accumulator, Descriptor, Encoded, Minify, MinifyConfig, debug, key_from_value, log,
};
use serde_json::Value;

/// Run the selected subcommand.
pub fn run(cli: &Cli) -> Result<()> {
    let config = load_config(&cli.config)?;
    let minify = Minify::from_config(&config);
    if cli.no_strict {
        minify.set_option(STRICT, false)?;
    }

    match &cli.command {
        Commands::Build {
            base,
            groups,
            files,
        } => run_build(&minify, base.as_deref(), groups, files),
        Commands::Encode { input } => run_encode(&minify, input),
        Commands::Manifest { input } => run_manifest(&minify, input),
    }
}

/// Load `minify.toml` if present, otherwise fall back to defaults.
fn load_config(path: &Path) -> Result<MinifyConfig> {
    if !path.exists() {
        debug!("config"; "{} not found, using defaults", path.display());
        return Ok(MinifyConfig::default());
    }
    MinifyConfig::load(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Read a JSON document from a file, or stdin for `-`.
fn read_json(path: &Path) -> Result<Value> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn print_encoded(label: Option<&str>, encoded: &Encoded) {
    match (label, encoded) {
        (Some(label), Encoded::Uri(uri)) => println!("{label}\t{uri}"),
        (None, Encoded::Uri(uri)) => println!("{uri}"),
        (Some(label), Encoded::NoContent) => log!("minify"; "{}: nothing to encode", label),
        (None, Encoded::NoContent) => log!("minify"; "nothing to encode"),
    }
}

fn run_build(minify: &Minify, base: Option<&str>, groups: &[String], files: &[String]) -> Result<()> {
    let mut acc = Accumulator::new();
    acc.set_base(base);
    acc.add_groups(groups);
    acc.add_files(files);

    let encoded = acc.create_uri(minify.settings(), minify.validator())?;
    print_encoded(None, &encoded);
    Ok(())
}

fn run_encode(minify: &Minify, input: &Path) -> Result<()> {
    let descriptor = Descriptor::from_json(&read_json(input)?);
    let encoded = minify.encode(&descriptor)?;
    print_encoded(None, &encoded);
    Ok(())
}

/// Entries sharing a key merge into one accumulator.
fn run_manifest(minify: &Minify, input: &Path) -> Result<()> {
    let manifest = read_json(input)?;
    let Some(entries) = manifest.as_array() else {
        bail!("manifest must be a JSON array of entries");
    };

    let registry = minify.registry();
    for entry in entries {
        let key = key_from_value(entry.get("key").unwrap_or(&Value::Null))?;
        let descriptor = Descriptor::from_json(entry);
        if let Some(base) = descriptor.base() {
            registry.set_base(key, Some(base));
        }
        registry.add_groups(key, descriptor.groups());
        registry.add_files(key, descriptor.files());
        debug!("manifest"; "loaded entry '{}'", key);
    }

    for key in registry.keys() {
        let encoded = minify
            .create_uri(&key)
            .with_context(|| format!("failed to encode '{key}'"))?;
        print_encoded(Some(&key), &encoded);
    }
    Ok(())
}
