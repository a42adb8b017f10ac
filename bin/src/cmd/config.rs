//! Config command implementation.

use std::path::PathBuf;

use anyhow::Result;

use crate::data;

/// Print the effective configuration (the defaults unless a file is given).
pub(crate) fn show_config(path: Option<&PathBuf>) -> Result<()> {
    let config = data::load_config(path)?;
    println!("{}", config.to_json()?);
    Ok(())
}
