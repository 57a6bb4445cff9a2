//! Capability policy command

use crate::cli::{PolicyCheckArgs, PolicyCommands};
use crate::output;
use anyhow::{anyhow, Result};
use warden_core::types::{Actor, Capability, Grant, Role};
use warden_fleet::{evaluate, restrict_extension_grants, Decision};

/// Main entry point for policy subcommands
pub fn run(cmd: PolicyCommands) -> Result<()> {
    match cmd {
        PolicyCommands::Check(args) => check(args),
    }
}

/// Evaluate one capability request
fn check(args: PolicyCheckArgs) -> Result<()> {
    let capability: Capability = args
        .capability
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let role: Role = args.role.parse().map_err(|e: String| anyhow!(e))?;
    let actor = Actor::new(0, role);

    let decision = evaluate(&actor, capability);
    let grants = restrict_extension_grants(capability, &actor, vec![Grant::Capability(capability)]);

    match decision {
        Decision::Allow => output::success(&format!("{capability}: allowed for {}", args.role)),
        Decision::Deny => output::warning(&format!("{capability}: denied for {}", args.role)),
    }
    output::kv("resolved grants", &format!("{grants:?}"));
    Ok(())
}
