//! # Purpose
//! Print what each configured role token may do on each resource, using the
//! same code path route guards use: raw token → [`Principal`] → table check.
//!
//! # Configuration
//! - `FICHAS_AUTHZ_ROLES`: comma-separated raw role tokens.
//! - `FICHAS_AUTHZ_RESOURCES`: comma-separated resource names.
//! - `FICHAS_AUTHZ_CONFIG`: optional YAML file overriding either list.
//! - `RUST_LOG`: log filter, `info` by default. Unknown role tokens are
//!   reported at `warn`.
mod config;

use anyhow::Result;
use config::MatrixConfig;
use fichas_authz::{PermissionLevel, Principal, Resource, get_role_permissions};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

fn level_flags(principal: &Principal, resource: &Resource) -> String {
    PermissionLevel::ALL
        .iter()
        .map(|level| {
            if principal.can(resource, *level) {
                level.as_str()[..1].to_ascii_uppercase()
            } else {
                "-".to_string()
            }
        })
        .collect()
}

fn render(config: &MatrixConfig) -> String {
    let mut out = String::new();
    for raw in &config.roles {
        let principal = Principal::new(Some(raw.clone()), None);
        let role = principal.role();
        let grants = get_role_permissions(role);
        out.push_str(&format!("{raw} -> {role} ({} grants)\n", grants.len()));
        for resource in &config.resources {
            out.push_str(&format!(
                "  {:<10} {}\n",
                resource.as_str(),
                level_flags(&principal, resource)
            ));
        }
    }
    out
}

fn main() -> Result<()> {
    init_logging();
    let config = MatrixConfig::from_env_or_yaml()?;
    tracing::info!(
        roles = config.roles.len(),
        resources = config.resources.len(),
        "rendering authorization matrix"
    );
    print!("{}", render(&config));
    Ok(())
}
