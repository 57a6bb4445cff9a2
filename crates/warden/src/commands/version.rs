//! Version command

use crate::cli::VersionArgs;
use anyhow::Result;
use serde_json::json;

/// Show version information
pub fn run(args: VersionArgs) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    if args.json {
        println!("{}", json!({ "name": "warden", "version": version }));
    } else {
        println!("warden {version}");
    }
    Ok(())
}
