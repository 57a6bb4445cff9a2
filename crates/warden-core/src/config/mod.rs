//! Configuration file handling (warden.yaml)

mod loader;
mod types;

pub use loader::WardenConfig;
pub use types::{
    DesiredExtensionSet, FleetConfig, ImageSize, PageTemplate, PlatformConfig,
    ProvisioningConfig, RegistryConfig, WardenConfigFile, FRONT_PAGE_TITLE,
};
