use crate::events::AppEvent;
use crate::gui::style::HexColor;
use crate::gui::widget::ArcSlider;
use crate::slider::{DEFAULT_MAX, DEFAULT_MIN, MIN_STEP};
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgba;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub initial: f64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: MIN_STEP,
            initial: 20.0,
        }
    }
}

/// Optional style overrides; anything left out keeps the widget default.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct StyleConfig {
    pub width: Option<f64>,
    pub thumb_size: Option<f64>,
    pub stroke_width: Option<f64>,
    pub slider_colors: Option<Vec<HexColor>>,
    pub track_color: Option<HexColor>,
    pub thumb_color: Option<HexColor>,
    pub progress_text_color: Option<HexColor>,
    pub circle_background_colors: Option<Vec<HexColor>>,
    pub text: Option<String>,
    pub text_color: Option<HexColor>,
}

fn colors(list: &[HexColor]) -> Vec<Srgba<f64>> {
    list.iter().map(|c| c.0).collect()
}

impl StyleConfig {
    pub fn apply(&self, mut slider: ArcSlider) -> ArcSlider {
        if let Some(width) = self.width {
            slider = slider.width(width);
        }
        if let Some(size) = self.thumb_size {
            slider = slider.thumb_size(size);
        }
        if let Some(width) = self.stroke_width {
            slider = slider.stroke_width(width);
        }
        if let Some(list) = &self.slider_colors {
            slider = slider.slider_colors(colors(list));
        }
        if let Some(color) = self.track_color {
            slider = slider.track_color(color.0);
        }
        if let Some(color) = self.thumb_color {
            slider = slider.thumb_color(color.0);
        }
        if let Some(color) = self.progress_text_color {
            slider = slider.progress_text_color(color.0);
        }
        if let Some(list) = &self.circle_background_colors {
            slider = slider.circle_background_colors(colors(list));
        }
        if let Some(text) = &self.text {
            slider = slider.text(text.clone());
        }
        if let Some(color) = self.text_color {
            slider = slider.text_color(color.0);
        }
        slider
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub range: RangeConfig,
    pub style: StyleConfig,
}

impl Config {
    /// Unmounted slider for this configuration, without slots or callback.
    pub fn slider(&self) -> ArcSlider {
        let slider = ArcSlider::new(self.range.initial)
            .min_value(self.range.min)
            .max_value(self.range.max)
            .step(self.range.step);
        self.style.apply(slider)
    }
}

/// Values given on the command line; they win over the file on every (re)load.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeOverrides {
    pub initial: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl RangeOverrides {
    pub fn apply(&self, config: &mut Config) {
        let range = &mut config.range;
        range.initial = self.initial.unwrap_or(range.initial);
        range.min = self.min.unwrap_or(range.min);
        range.max = self.max.unwrap_or(range.max);
        range.step = self.step.unwrap_or(range.step);
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No home directory to keep the config file in")]
    ConfigDirNotFound,
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Cannot write config file: {0}")]
    Io(#[from] std::io::Error),
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("org", "arcslider", "arcslider")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::ConfigDirNotFound)
}

/// Reads the config file (if any) with `ARCSLIDER_*` environment overrides on top.
///
/// Nested keys use a double underscore, e.g. `ARCSLIDER_RANGE__MAX=40`.
pub fn load_config() -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(config_path()?).required(false))
        .add_source(
            config::Environment::with_prefix("ARCSLIDER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default(overrides: &RangeOverrides) -> Config {
    let mut config = load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    overrides.apply(&mut config);
    config
}

/// Writes [`DEFAULT_CONFIG`] to `path` unless a file is already there.
/// Returns whether anything was written.
pub fn write_default_config(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Sends [`AppEvent::ConfigReload`] whenever the config file is created, edited or removed.
///
/// The parent directory is watched so that editors replacing the file are still seen.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config reload disabled: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent() else {
        return;
    };
    if let Err(e) = fs_err::create_dir_all(config_dir) {
        log::error!("Config reload disabled: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )
    .and_then(|mut w| w.watch(config_dir, RecursiveMode::NonRecursive).map(|()| w));

    // Dropping the watcher stops the notifications.
    let _watcher = match watcher {
        Ok(w) => w,
        Err(e) => {
            log::error!("Config reload disabled, cannot watch {}: {}", config_dir.display(), e);
            return;
        }
    };
    log::debug!("Watching {} for changes", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if is_config_change(&event, &config_path) => {
                log::debug!("{:?} on {}", event.kind, config_path.display());
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Config watch error: {}", e),
        }
    }
}
