pub mod modules;
pub mod nets;

use crate::db::core::Layout;
use anyhow::{Context, Result};
use std::str::FromStr;

/// Reads both input files and builds a validated layout.
pub fn load(module_filename: &str, connection_filename: &str) -> Result<Layout> {
    let modules = modules::parse(module_filename)?;
    let nets = nets::parse(connection_filename, modules.len())?;
    log::info!(
        "Loaded {} modules and {} nets",
        modules.len(),
        nets.len()
    );
    Layout::new(modules, nets).context("Inconsistent layout input")
}

fn parse_token<T>(token: &str, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    token
        .parse()
        .with_context(|| format!("Invalid {}: '{}'", what, token))
}
