pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;
pub use crate::config::{EnvConfig, TomlConfig};

pub use crate::adapters::RpcGovernanceContract;
pub use crate::app::build_router;
pub use crate::core::forwarder::RequestForwarder;
pub use crate::utils::error::{GatewayError, Result};
