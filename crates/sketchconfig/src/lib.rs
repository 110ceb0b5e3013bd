use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "sketchbook.toml";

/// Longest accepted `gallery.debounce`.
pub const MAX_DEBOUNCE: Duration = Duration::from_secs(24 * 60 * 60);
/// Longest accepted `slideshow.interval`.
pub const MAX_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideshowMode {
    Continuous,
    Shuffle,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SketchConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub slideshow: Option<SlideshowConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub sidebar_width: u32,
    pub row_height: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryConfig {
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default = "default_debounce", deserialize_with = "deserialize_duration")]
    pub debounce: Duration,
    #[serde(default)]
    pub fps: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlideshowConfig {
    #[serde(default = "default_interval", deserialize_with = "deserialize_duration")]
    pub interval: Duration,
    #[serde(default = "default_mode")]
    pub mode: SlideshowMode,
    #[serde(default)]
    pub include_placeholders: bool,
}

fn default_version() -> u32 {
    1
}

fn default_debounce() -> Duration {
    Duration::from_millis(150)
}

fn default_interval() -> Duration {
    Duration::from_secs(30)
}

fn default_mode() -> SlideshowMode {
    SlideshowMode::Continuous
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            window: WindowConfig::default(),
            gallery: GalleryConfig::default(),
            slideshow: None,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            sidebar_width: 240,
            row_height: 36,
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            default: None,
            debounce: default_debounce(),
            fps: None,
        }
    }
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            mode: default_mode(),
            include_placeholders: false,
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Duration;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a duration as number of seconds or human-readable string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            humantime::parse_duration(v)
                .map_err(|err| E::custom(format!("invalid duration '{v}': {err}")))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Duration::from_secs(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Duration::from_secs(v as u64))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_nan() || v.is_sign_negative() {
                return Err(E::custom("duration must be non-negative"));
            }
            Duration::try_from_secs_f64(v)
                .map_err(|err| E::custom(format!("invalid duration {v}: {err}")))
        }
    }

    deserializer.deserialize_any(Visitor)
}

impl SketchConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: SketchConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads `path` when it exists; a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn default_artwork(&self) -> Option<&str> {
        self.gallery.default.as_deref()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected 1",
                self.version
            )));
        }

        let window = &self.window;
        for (name, value) in [
            ("width", window.width),
            ("height", window.height),
            ("sidebar_width", window.sidebar_width),
            ("row_height", window.row_height),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!(
                    "window.{name} must be greater than zero"
                )));
            }
        }
        if window.sidebar_width >= window.width {
            return Err(ConfigError::Invalid(
                "window.sidebar_width must be smaller than window.width".into(),
            ));
        }

        if let Some(default) = &self.gallery.default {
            if default.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "gallery.default may not be empty".into(),
                ));
            }
        }

        if let Some(fps) = self.gallery.fps {
            if !fps.is_finite() || fps < 0.0 {
                return Err(ConfigError::Invalid("gallery.fps must be >= 0".into()));
            }
        }

        if self.gallery.debounce > MAX_DEBOUNCE {
            return Err(ConfigError::Invalid(format!(
                "gallery.debounce must be at most {}",
                humantime::format_duration(MAX_DEBOUNCE)
            )));
        }

        if let Some(slideshow) = &self.slideshow {
            if slideshow.interval.is_zero() {
                return Err(ConfigError::Invalid(
                    "slideshow.interval must be greater than zero".into(),
                ));
            }
            if slideshow.interval > MAX_INTERVAL {
                return Err(ConfigError::Invalid(format!(
                    "slideshow.interval must be at most {}",
                    humantime::format_duration(MAX_INTERVAL)
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
version = 1

[window]
width = 1280
height = 800
sidebar_width = 240
row_height = 36

[gallery]
default = "circle"
debounce = "150ms"
fps = 60

[slideshow]
interval = "30s"
mode = "shuffle"
include_placeholders = false
"#;

    #[test]
    fn parses_sample_config() {
        let config = SketchConfig::from_toml_str(SAMPLE).expect("parse config");
        assert_eq!(config.default_artwork(), Some("circle"));
        assert_eq!(config.gallery.debounce, Duration::from_millis(150));
        assert_eq!(config.gallery.fps, Some(60.0));
        let slideshow = config.slideshow.expect("slideshow section");
        assert_eq!(slideshow.interval, Duration::from_secs(30));
        assert_eq!(slideshow.mode, SlideshowMode::Shuffle);
        assert!(!slideshow.include_placeholders);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = SketchConfig::from_toml_str("").unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.row_height, 36);
        assert_eq!(config.gallery.debounce, Duration::from_millis(150));
        assert!(config.slideshow.is_none());
    }

    #[test]
    fn durations_accept_plain_seconds() {
        let config = SketchConfig::from_toml_str(
            r#"
[gallery]
debounce = 0.25

[slideshow]
interval = 12
"#,
        )
        .unwrap();
        assert_eq!(config.gallery.debounce, Duration::from_millis(250));
        assert_eq!(config.slideshow.unwrap().interval, Duration::from_secs(12));
    }

    #[test]
    fn partial_window_section_keeps_other_defaults() {
        let config = SketchConfig::from_toml_str("[window]\nwidth = 1600\n").unwrap();
        assert_eq!(config.window.width, 1600);
        assert_eq!(config.window.sidebar_width, 240);
    }

    #[test]
    fn rejects_invalid_values() {
        for input in [
            "version = 2",
            "[window]\nrow_height = 0",
            "[window]\nwidth = 200\nsidebar_width = 240",
            "[gallery]\nfps = -1",
            "[gallery]\ndefault = \"  \"",
            "[slideshow]\ninterval = \"0s\"",
            "[gallery]\ndebounce = \"2days\"",
            "[gallery]\ndebounce = 9223372036854775807",
            "[slideshow]\ninterval = 9223372036854775807",
            "[slideshow]\ninterval = \"400days\"",
        ] {
            let err = SketchConfig::from_toml_str(input).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{input}: {err}");
        }
    }

    #[test]
    fn rejects_malformed_documents() {
        for input in [
            "[gallery]\ndebounce = \"soon\"",
            "[slideshow]\nmode = \"random\"",
            "[window]\ncolour = \"red\"",
            "[gallery]\ndebounce = 1e30",
            "[slideshow]\ninterval = -3",
        ] {
            let err = SketchConfig::from_toml_str(input).unwrap_err();
            assert!(matches!(err, ConfigError::Parse(_)), "{input}: {err}");
        }
    }

    #[test]
    fn upper_bounds_are_inclusive() {
        let config = SketchConfig::from_toml_str(
            "[gallery]\ndebounce = \"1day\"\n[slideshow]\ninterval = \"365days\"\n",
        )
        .unwrap();
        assert_eq!(config.gallery.debounce, MAX_DEBOUNCE);
        assert_eq!(config.slideshow.unwrap().interval, MAX_INTERVAL);
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = SketchConfig::load_or_default(&path).unwrap();
        assert!(config.default_artwork().is_none());

        std::fs::write(&path, "[gallery]\ndefault = \"wave\"\n").unwrap();
        let config = SketchConfig::load_or_default(&path).unwrap();
        assert_eq!(config.default_artwork(), Some("wave"));
    }
}
