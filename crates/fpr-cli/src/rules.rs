//! # Rules Subcommand
//!
//! Prints the rule catalog grouped by handbook, in the order handbooks are
//! first declared.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fpr_core::{Rule, RuleRegistry};
use serde::Serialize;

use crate::input::load_registry;

/// Arguments for the `fpr rules` subcommand.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// YAML rule catalog. Defaults to the built-in FCA catalog.
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the rules subcommand. Returns exit code 0.
pub fn run_rules(args: &RulesArgs) -> Result<u8> {
    let registry = load_registry(args.rules.as_deref())?;
    let rendered = if args.json {
        render_json(&registry)?
    } else {
        render_text(&registry)
    };
    print!("{rendered}");
    Ok(0)
}

/// One line per handbook followed by its rules.
pub fn render_text(registry: &RuleRegistry) -> String {
    let mut out = String::new();
    for handbook in registry.handbooks_in_order() {
        let rules: Vec<&str> = registry
            .rules_for(handbook)
            .map(|r| r.name().as_str())
            .collect();
        out.push_str(&format!("{handbook} ({} rules)\n", rules.len()));
        for rule in rules {
            out.push_str(&format!("  - {rule}\n"));
        }
    }
    out.push_str(&format!(
        "\n{} rules across {} handbooks\n",
        registry.len(),
        registry.handbook_count()
    ));
    out
}

#[derive(Serialize)]
struct Listing<'a> {
    handbooks: Vec<HandbookListing<'a>>,
    rules: Vec<&'a Rule>,
}

#[derive(Serialize)]
struct HandbookListing<'a> {
    name: &'a str,
    rules: Vec<&'a str>,
}

pub fn render_json(registry: &RuleRegistry) -> Result<String> {
    let listing = Listing {
        handbooks: registry
            .handbooks_in_order()
            .iter()
            .map(|h| HandbookListing {
                name: h.as_str(),
                rules: registry.rules_for(h).map(|r| r.name().as_str()).collect(),
            })
            .collect(),
        rules: registry.rules().iter().map(|r| r.as_ref()).collect(),
    };
    let mut json = serde_json::to_string_pretty(&listing).context("failed to render rules")?;
    json.push('\n');
    Ok(json)
}
