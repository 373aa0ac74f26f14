//! View-layer tunables, loadable from TOML.
//!
//! Every field has a default, so a partial file (or none at all) is valid:
//!
//! ```toml
//! user_lock_lag_ratio = 0.05
//! scroll_debounce_ms = 100
//!
//! [rsi_margins]
//! top = 0.1
//! bottom = 0.25
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Fractions of a pane's height kept free above and below the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMargins {
    pub top: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Right-edge lag, as a fraction of the full data span, beyond which a
    /// range change counts as the user scrolling away from live data.
    pub user_lock_lag_ratio: f64,
    /// A zoom that leaves less than this fraction of the previous width is a
    /// zoom-in.
    pub zoom_in_shrink_ratio: f64,
    /// A zoom-out that shows at least this fraction of the full span unlocks.
    pub zoom_out_restore_ratio: f64,
    /// Width factor of one zoom step.
    pub zoom_step: f64,
    pub scroll_debounce_ms: u64,
    /// Bucket size, in series time units, for folding ticks into candles.
    pub candle_granularity: i64,
    pub min_pane_height: f64,
    /// Preferred share of the container height for each indicator pane.
    pub pane_share: f64,
    pub rsi_margins: ScaleMargins,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            user_lock_lag_ratio: 0.05,
            zoom_in_shrink_ratio: 0.90,
            zoom_out_restore_ratio: 0.95,
            zoom_step: 1.25,
            scroll_debounce_ms: 100,
            candle_granularity: 60,
            min_pane_height: 80.0,
            pane_share: 0.25,
            rsi_margins: ScaleMargins {
                top: 0.10,
                bottom: 0.25,
            },
        }
    }
}

impl ViewConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = |name: &str, v: f64| {
            if v > 0.0 && v <= 1.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be in (0, 1], got {v}")))
            }
        };
        unit("user_lock_lag_ratio", self.user_lock_lag_ratio)?;
        unit("zoom_in_shrink_ratio", self.zoom_in_shrink_ratio)?;
        unit("zoom_out_restore_ratio", self.zoom_out_restore_ratio)?;
        unit("pane_share", self.pane_share)?;
        if self.zoom_step <= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "zoom_step must be > 1, got {}",
                self.zoom_step
            )));
        }
        if self.candle_granularity < 1 {
            return Err(ConfigError::Invalid("candle_granularity must be >= 1".into()));
        }
        if self.min_pane_height < 0.0 {
            return Err(ConfigError::Invalid("min_pane_height must be >= 0".into()));
        }
        let m = self.rsi_margins;
        if m.top < 0.0 || m.bottom < 0.0 || m.top + m.bottom >= 1.0 {
            return Err(ConfigError::Invalid(
                "rsi_margins must be non-negative and sum below 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ViewConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(ViewConfig::from_toml_str("").unwrap(), ViewConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let c = ViewConfig::from_toml_str(
            "scroll_debounce_ms = 250\n[rsi_margins]\ntop = 0.2\nbottom = 0.3\n",
        )
        .unwrap();
        assert_eq!(c.scroll_debounce_ms, 250);
        assert_eq!(c.rsi_margins, ScaleMargins { top: 0.2, bottom: 0.3 });
        assert_eq!(c.zoom_step, 1.25);
    }

    #[test]
    fn bad_ratio_rejected() {
        let err = ViewConfig::from_toml_str("user_lock_lag_ratio = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn bad_type_is_parse_error() {
        let err = ViewConfig::from_toml_str("zoom_step = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ViewConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
