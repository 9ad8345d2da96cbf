use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tcp_plot_abstract::{Settings, SettingsOverride};

/// Defaults, overlaid with the TOML file at `path` when one is given.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();
    if let Some(path) = path {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let overrides: SettingsOverride =
            toml::from_str(&content).context("Failed to parse settings file")?;
        overrides.apply_to(&mut settings);
    }
    Ok(settings)
}
