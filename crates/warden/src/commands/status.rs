//! Extension status command

use crate::cli::StatusArgs;
use crate::output;
use crate::utils::{load_config, open_platform};
use anyhow::Result;
use camino::Utf8Path;
use serde_json::json;
use tabled::{Table, Tabled};
use warden_platform::ExtensionHost;

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Extension")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Installed")]
    installed: &'static str,
    #[tabled(rename = "Active")]
    active: &'static str,
}

/// Show desired-vs-installed extension state without mutating anything
pub fn run(args: StatusArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let platform = open_platform(&config)?;

    let mut rows = Vec::new();
    let mut converged = true;
    for ext in config.config.extensions.iter() {
        let installed = platform.find(&ext.id)?;
        let active = installed.as_ref().is_some_and(|e| e.active);
        if installed.is_none() || !active {
            converged = false;
        }
        rows.push(StatusRow {
            id: ext.id.clone(),
            name: ext.name.clone(),
            installed: if installed.is_some() { "yes" } else { "no" },
            active: if active { "yes" } else { "no" },
        });
    }

    if args.json {
        let entries: Vec<_> = rows
            .iter()
            .map(|r| {
                json!({
                    "id": r.id,
                    "name": r.name,
                    "installed": r.installed == "yes",
                    "active": r.active == "yes",
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "converged": converged,
                "extensions": entries,
            }))?
        );
        return Ok(());
    }

    println!("{}", Table::new(rows));
    if converged {
        output::success("Fleet extension state is converged");
    } else {
        output::info("Run `warden reconcile` to converge");
    }
    Ok(())
}
