use super::parse_token;
use crate::db::core::{MAX_DIMENSION, Module};
use anyhow::{Context, Result, bail};

/// Module file: a count followed by that many `width height` pairs, separated
/// by any whitespace.
pub fn parse(filename: &str) -> Result<Vec<Module>> {
    log::info!("Parsing Modules: {}", filename);
    let text = std::fs::read_to_string(filename)
        .with_context(|| format!("Unable to open module file: {}", filename))?;
    from_str(&text).with_context(|| format!("Invalid module file '{}'", filename))
}

pub fn from_str(text: &str) -> Result<Vec<Module>> {
    let mut tokens = text.split_whitespace();

    let count: usize = match tokens.next() {
        Some(token) => parse_token(token, "module count")?,
        None => bail!("Missing module count"),
    };

    // The count is untrusted; a short file is reported below.
    let mut modules = Vec::new();
    for i in 1..=count {
        let (Some(w), Some(h)) = (tokens.next(), tokens.next()) else {
            bail!("Expected {} modules, found dimensions for {}", count, i - 1);
        };
        let width: i64 = parse_token(w, &format!("width of module {}", i))?;
        let height: i64 = parse_token(h, &format!("height of module {}", i))?;
        if !(1..=MAX_DIMENSION).contains(&width) || !(1..=MAX_DIMENSION).contains(&height) {
            bail!(
                "Module {} has invalid dimensions {}x{} (each must lie in 1..={})",
                i,
                width,
                height,
                MAX_DIMENSION
            );
        }
        modules.push(Module::new(width, height));
    }

    let trailing = tokens.count();
    if trailing > 0 {
        log::warn!(
            "Ignoring {} trailing tokens after {} modules",
            trailing,
            count
        );
    }

    Ok(modules)
}
