use serde::{Deserialize, Serialize};

/// Bounds of the shared time grid, in seconds. `stop` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            start: 0.0,
            stop: 200.31,
            step: 0.001,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Column limit for the configuration annotation
    pub wrap_width: usize,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            width: 3000,
            height: 1500,
            wrap_width: 48,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridSettings,
    pub plot: PlotSettings,
}

/// Partial settings as read from a TOML file; unset fields keep their defaults.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SettingsOverride {
    #[serde(default)]
    pub grid: GridOverride,
    #[serde(default)]
    pub plot: PlotOverride,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GridOverride {
    pub start: Option<f64>,
    pub stop: Option<f64>,
    pub step: Option<f64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PlotOverride {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub wrap_width: Option<usize>,
}

impl SettingsOverride {
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(v) = self.grid.start {
            settings.grid.start = v;
        }
        if let Some(v) = self.grid.stop {
            settings.grid.stop = v;
        }
        if let Some(v) = self.grid.step {
            settings.grid.step = v;
        }
        if let Some(v) = self.plot.width {
            settings.plot.width = v;
        }
        if let Some(v) = self.plot.height {
            settings.plot.height = v;
        }
        if let Some(v) = self.plot.wrap_width {
            settings.plot.wrap_width = v;
        }
    }
}
