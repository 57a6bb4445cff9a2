//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Warden - fleet reconciliation for multi-tenant platforms
#[derive(Parser, Debug)]
#[command(name = "warden")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to warden.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Tenant management
    #[command(subcommand)]
    Tenant(TenantCommands),

    /// Run one extension reconciliation pass
    Reconcile(ReconcileArgs),

    /// Sync canonical settings across the fleet
    Sync(SyncArgs),

    /// Show desired-vs-installed extension state
    Status(StatusArgs),

    /// Capability policy checks
    #[command(subcommand)]
    Policy(PolicyCommands),

    /// Run the trigger scheduler (activation pass + daily recurrence)
    Run(RunArgs),
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Config commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate the configuration
    Validate(ConfigValidateArgs),

    /// Show resolved configuration
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigValidateArgs {}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Tenant commands
#[derive(Subcommand, Debug)]
pub enum TenantCommands {
    /// List all tenants
    List(TenantListArgs),

    /// Create and provision a new tenant
    Provision(TenantProvisionArgs),
}

#[derive(Args, Debug)]
pub struct TenantListArgs {}

#[derive(Args, Debug)]
pub struct TenantProvisionArgs {
    /// Tenant id
    #[arg(long)]
    pub id: u64,

    /// Tenant domain
    #[arg(long)]
    pub domain: String,

    /// Path under the domain
    #[arg(long, default_value = "/")]
    pub path: String,
}

// Reconcile command
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Only run when the last pass is older than the admin threshold
    #[arg(long)]
    pub if_due: bool,
}

// Sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Also force comment defaults closed on every tenant
    #[arg(long)]
    pub init: bool,
}

// Status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Policy commands
#[derive(Subcommand, Debug)]
pub enum PolicyCommands {
    /// Evaluate a capability request for an actor role
    Check(PolicyCheckArgs),
}

#[derive(Args, Debug)]
pub struct PolicyCheckArgs {
    /// Capability to evaluate (e.g., install_extensions)
    pub capability: String,

    /// Actor role (super_admin, admin, member)
    #[arg(long, default_value = "member")]
    pub role: String,
}

// Run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run a single pass and exit instead of scheduling the recurrence
    #[arg(long)]
    pub once: bool,

    /// Recurring tick interval in hours
    #[arg(long, default_value_t = 24)]
    pub interval_hours: u64,
}
