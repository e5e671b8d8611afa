use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;

use delta_diff::{object_to_object_dyn_with, CompareOptions, DiffDocument};
use delta_hash::{canonicalize, CanonicalHash, CanonicalHasher};
use delta_types::Record;

use crate::cli::*;
use crate::config::Config;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.output.format);
    match cli.command {
        Command::Hash(args) => cmd_hash(args, &config, format),
        Command::Verify(args) => cmd_verify(args, &config, format),
        Command::Canonical(args) => cmd_canonical(args, format),
        Command::Diff(args) => cmd_diff(args, &config, format),
        Command::Patch(args) => cmd_patch(args, &config, format),
    }
}

fn cmd_hash(args: HashArgs, config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let domain = args.domain.unwrap_or_else(|| config.hash.domain.clone());
    let hasher = CanonicalHasher::new(domain);
    let hash = hash_file(&hasher, &args.path)?;
    match format {
        OutputFormat::Text => println!("{}  {}", hash.to_hex().yellow(), args.path.display()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "path": args.path.display().to_string(),
                "domain": hasher.domain(),
                "hash": hash.to_hex(),
            })
        ),
    }
    Ok(())
}

fn cmd_verify(args: VerifyArgs, config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let domain = args.domain.unwrap_or_else(|| config.hash.domain.clone());
    let hasher = CanonicalHasher::new(domain);
    let actual = hash_file(&hasher, &args.path)?;
    let matches = actual == args.expected;
    match format {
        OutputFormat::Text if matches => {
            println!("{} {} matches {}", "✓".green().bold(), args.path.display(), actual.short_hex());
        }
        OutputFormat::Text => {}
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "path": args.path.display().to_string(),
                "domain": hasher.domain(),
                "hash": actual.to_hex(),
                "matches": matches,
            })
        ),
    }
    if !matches {
        bail!(
            "hash mismatch for {}: expected {}, found {}",
            args.path.display(),
            args.expected,
            actual
        );
    }
    Ok(())
}

fn cmd_canonical(args: CanonicalArgs, format: OutputFormat) -> anyhow::Result<()> {
    let canonical = canonical_file(&args.path)?;
    match format {
        OutputFormat::Text => println!("{canonical}"),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "path": args.path.display().to_string(),
                "canonical": canonical,
            })
        ),
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs, config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let schema = args.schema.unwrap_or_else(|| config.diff.schema.clone());
    let options = CompareOptions::new()
        .ignore_all(config.diff.ignore.iter().cloned())
        .ignore_all(args.ignore);
    let diff = diff_files(&schema, &args.left, &args.right, &options)?;
    println!("{}", render_diff(&diff, format)?);
    Ok(())
}

fn cmd_patch(args: PatchArgs, config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let schema = args.schema.unwrap_or_else(|| config.diff.schema.clone());
    let patched = patch_file(&schema, &args.target, &args.diff)?.into_value();
    match args.output {
        Some(path) => {
            let rendered = serde_json::to_string_pretty(&patched)?;
            fs::write(&path, rendered + "\n")
                .with_context(|| format!("writing {}", path.display()))?;
            match format {
                OutputFormat::Text => {
                    println!("{} Patched record written to {}", "✓".green().bold(), path.display())
                }
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({ "path": path.display().to_string() })
                ),
            }
        }
        None => println!("{}", render_record(&patched, format)?),
    }
    Ok(())
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn read_record(schema: &str, path: &Path) -> anyhow::Result<Record> {
    let text = read_file(path)?;
    Record::from_json(schema, &text).with_context(|| format!("loading record {}", path.display()))
}

pub fn hash_file(hasher: &CanonicalHasher, path: &Path) -> anyhow::Result<CanonicalHash> {
    let text = read_file(path)?;
    hasher
        .hash_text(&text)
        .with_context(|| format!("hashing {}", path.display()))
}

pub fn canonical_file(path: &Path) -> anyhow::Result<String> {
    let text = read_file(path)?;
    canonicalize(&text).with_context(|| format!("canonicalizing {}", path.display()))
}

pub fn diff_files(
    schema: &str,
    left: &Path,
    right: &Path,
    options: &CompareOptions,
) -> anyhow::Result<DiffDocument> {
    let left = read_record(schema, left)?;
    let right = read_record(schema, right)?;
    Ok(object_to_object_dyn_with(&left, &right, options)?)
}

pub fn patch_file(schema: &str, target: &Path, diff: &Path) -> anyhow::Result<Record> {
    let mut record = read_record(schema, target)?;
    let diff: DiffDocument = serde_json::from_str(&read_file(diff)?)
        .with_context(|| format!("parsing diff {}", diff.display()))?;
    diff.apply_to(&mut record)
        .with_context(|| format!("applying diff to {}", target.display()))?;
    Ok(record)
}

pub fn render_diff(diff: &DiffDocument, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(diff)?),
        OutputFormat::Text if diff.is_empty() => Ok("No changes.".to_string()),
        OutputFormat::Text => {
            let lines: Vec<String> = diff
                .iter()
                .map(|op| format!("  {} {} = {}", "set".cyan(), op.path().bold(), op.value()))
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

/// Patched records print pretty for people and compact for tools.
pub fn render_record(record: &serde_json::Value, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => serde_json::to_string_pretty(record)?,
        OutputFormat::Json => serde_json::to_string(record)?,
    })
}
