use log::{Level, LevelFilter};
use serde::Deserialize;
use serde_json::json;

use crate::error::PageError;
use crate::telemetry::log_event;

pub const THEME_KEY: &str = "theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const PROGRESS_BAR_ID: &str = "progressBar";
pub const CONFIG_ELEMENT_ID: &str = "page-config";
pub const MOUNT_POINT_ID: &str = "app";

/// Markup contract shared by the director and the view.
pub mod selectors {
    pub const NAVBAR: &str = ".navbar";
    pub const HERO: &str = ".hero";
    pub const HERO_BACKGROUND: &str = ".hero-bg";
    pub const HERO_TITLE: &str = ".hero-title";
    pub const HERO_SUBTITLE: &str = ".hero-sub";
    pub const HERO_DESCRIPTION: &str = ".hero-desc";
    pub const HERO_CTA_LINKS: &str = ".hero-cta a";
    pub const SECTION: &str = ".section";
    pub const SECTION_CHILDREN: &str = ".card, .project-card, .skill";
    pub const METER_BAR: &str = ".meter div";
    pub const TIMELINE: &str = ".timeline";
    pub const TIMELINE_ITEM: &str = ".timeline-item";
    pub const MARQUEE_LEFT_TRACK: &str = "#marquee-left .tech-track";
    pub const MARQUEE_RIGHT_TRACK: &str = "#marquee-right .tech-track";
    pub const MARQUEE_WRAPPER: &str = ".tech-marquee-wrapper";
}

const DEFAULT_MARQUEE_DURATION_SECS: f64 = 20.0;
const DEFAULT_HOVER_TIME_SCALE: f64 = 0.1;
const DEFAULT_HOVER_RAMP_SECS: f64 = 0.5;
const DEFAULT_PARALLAX_DISTANCE_PX: f64 = 120.0;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const MARQUEE_DURATION_SECS_BOUNDS: (f64, f64) = (1.0, 600.0);
const HOVER_TIME_SCALE_BOUNDS: (f64, f64) = (0.01, 1.0);
const HOVER_RAMP_SECS_BOUNDS: (f64, f64) = (0.0, 5.0);
const PARALLAX_DISTANCE_PX_BOUNDS: (f64, f64) = (0.0, 1_000.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::Debug,
            Self::Info => LevelFilter::Info,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    pub marquee_duration_secs: f64,
    pub hover_time_scale: f64,
    pub hover_ramp_secs: f64,
    pub parallax_distance_px: f64,
    pub log_level: LogLevel,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            marquee_duration_secs: DEFAULT_MARQUEE_DURATION_SECS,
            hover_time_scale: DEFAULT_HOVER_TIME_SCALE,
            hover_ramp_secs: DEFAULT_HOVER_RAMP_SECS,
            parallax_distance_px: DEFAULT_PARALLAX_DISTANCE_PX,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PageConfigOverrides {
    marquee_duration_secs: Option<f64>,
    hover_time_scale: Option<f64>,
    hover_ramp_secs: Option<f64>,
    parallax_distance_px: Option<f64>,
    log_level: Option<String>,
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, PageError> {
        let overrides: PageConfigOverrides = serde_json::from_str(raw)?;
        Ok(Self::from_overrides(overrides))
    }

    /// Missing or blank source yields the defaults; a malformed one is logged
    /// and also yields the defaults.
    pub fn resolve(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Self::default();
        };

        match Self::from_json(raw) {
            Ok(config) => config,
            Err(error) => {
                log_event(
                    Level::Warn,
                    "page_config_invalid",
                    json!({ "error": error.to_string() }),
                );
                Self::default()
            }
        }
    }

    fn from_overrides(overrides: PageConfigOverrides) -> Self {
        Self {
            marquee_duration_secs: within_bounds(
                overrides.marquee_duration_secs,
                DEFAULT_MARQUEE_DURATION_SECS,
                MARQUEE_DURATION_SECS_BOUNDS,
            ),
            hover_time_scale: within_bounds(
                overrides.hover_time_scale,
                DEFAULT_HOVER_TIME_SCALE,
                HOVER_TIME_SCALE_BOUNDS,
            ),
            hover_ramp_secs: within_bounds(
                overrides.hover_ramp_secs,
                DEFAULT_HOVER_RAMP_SECS,
                HOVER_RAMP_SECS_BOUNDS,
            ),
            parallax_distance_px: within_bounds(
                overrides.parallax_distance_px,
                DEFAULT_PARALLAX_DISTANCE_PX,
                PARALLAX_DISTANCE_PX_BOUNDS,
            ),
            log_level: parse_log_level(overrides.log_level.as_deref(), DEFAULT_LOG_LEVEL),
        }
    }
}

fn within_bounds(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(value: Option<&str>, default: LogLevel) -> LogLevel {
    match value
        .map(|value| value.trim().to_ascii_lowercase())
        .as_deref()
    {
        Some("debug") => LogLevel::Debug,
        Some("info") => LogLevel::Info,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_uses_defaults() {
        assert_eq!(PageConfig::resolve(None), PageConfig::default());
        assert_eq!(PageConfig::resolve(Some("   ")), PageConfig::default());
    }

    #[test]
    fn overrides_within_bounds_are_applied() {
        let config = PageConfig::from_json(
            r#"{ "marqueeDurationSecs": 35, "hoverTimeScale": 0.25, "logLevel": "DEBUG" }"#,
        )
        .expect("valid config");

        assert_eq!(config.marquee_duration_secs, 35.0);
        assert_eq!(config.hover_time_scale, 0.25);
        assert_eq!(config.hover_ramp_secs, DEFAULT_HOVER_RAMP_SECS);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn out_of_bounds_values_fall_back_to_defaults() {
        let config = PageConfig::from_json(
            r#"{ "marqueeDurationSecs": 0.2, "hoverTimeScale": 4, "parallaxDistancePx": -10, "logLevel": "trace" }"#,
        )
        .expect("valid config");

        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn malformed_source_resolves_to_defaults() {
        assert!(PageConfig::from_json("{ not json").is_err());
        assert_eq!(PageConfig::resolve(Some("{ not json")), PageConfig::default());
    }

    #[test]
    fn log_level_maps_to_filter() {
        assert_eq!(LogLevel::Debug.to_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Info.as_str(), "info");
    }
}
