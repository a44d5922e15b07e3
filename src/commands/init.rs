use crate::config::{EvalConfig, CONFIG_FILENAME};
use crate::io::write_artifact;
use anyhow::{Context, Result};
use std::path::Path;

/// Write the default configuration into `dir`.
pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let body = toml::to_string_pretty(&EvalConfig::default())
        .context("Failed to render default configuration")?;
    let contents = format!("# untangle-eval configuration\n\n{body}");
    write_artifact(&config_path, &contents)?;
    println!("Created {} configuration file", CONFIG_FILENAME);

    Ok(())
}
