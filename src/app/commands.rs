//! Inbound commands to the application service.
//!
//! These represent lookups requested by the outside world (command line,
//! tests) that the [`AppService`](super::service::AppService) runs.

use crate::config::AppConfig;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Look a user up by numeric id.
    FindUser(u32),

    /// Look a trail up by name.
    FindTrail(String),
}

impl AppCommand {
    /// Build commands from command-line arguments (program name first).
    ///
    /// Numeric arguments become user lookups and anything else a trail
    /// lookup.  With no arguments the stock scenario runs: the configured
    /// default trail, then users `5` and `1`.
    pub fn from_args(args: &[String], config: &AppConfig) -> Vec<Self> {
        let rest = args.get(1..).unwrap_or_default();
        if rest.is_empty() {
            return vec![
                Self::FindTrail(config.default_trail.clone()),
                Self::FindUser(5),
                Self::FindUser(1),
            ];
        }
        rest.iter()
            .map(|arg| match arg.parse::<u32>() {
                Ok(id) => Self::FindUser(id),
                Err(_) => Self::FindTrail(arg.clone()),
            })
            .collect()
    }
}
