use std::path::Path;

use anyhow::{anyhow, Context, Result};

use salvage_core::config::{save_config, SalvageConfig};

/// Write a default config file at `path`.
pub fn init_config_command(path: &str, force: bool) -> Result<()> {
    let path = Path::new(path);
    if path.exists() && !force {
        return Err(anyhow!(
            "Config already exists at {}. Pass --force to overwrite.",
            path.display()
        ));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
    }

    save_config(path, &SalvageConfig::default())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
