use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use morphclock::{Easing, FractionPolicy, MorphError, MorphResult, MorphSettings, RelayoutPolicy};
use ratatui::style::Color;
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::app::Page;

// ─── Embedded Default ────────────────────────────────────────────────────
/// Baked into the binary at compile time, so a missing config file never
/// stops the app from starting.
const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

/// Longest accepted transition.
const MAX_DURATION_MS: u64 = 60_000;

/// Longest value the counter can show (`i64::MIN` has 19 digits).
const MAX_MINIMUM_DIGITS: usize = 19;

// ─── CLI Arguments (override layer) ─────────────────────────────────────
/// morphclock: hand-drawn digits that morph into each other
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "morphclock", version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (overrides config file)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Log file (overrides config file)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Target FPS for the render loop (overrides config file)
    #[arg(long)]
    pub fps: Option<u16>,

    /// Easing curve, e.g. "overshoot" or "bounce" (overrides config file)
    #[arg(short, long)]
    pub easing: Option<Easing>,

    /// Transition length in milliseconds (overrides config file)
    #[arg(short, long)]
    pub duration: Option<u64>,

    /// Print the default config to stdout and exit
    #[arg(long)]
    pub print_default_config: bool,
}

// ─── TOML Structs ───────────────────────────────────────────────────────

/// Root configuration, parsed from TOML and then overridden by CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
    /// Empty disables logging
    pub log_file: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    pub easing: Easing,
    pub fraction_policy: FractionPolicy,
    pub relayout: RelayoutPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub fps: u16,
    pub minimum_digits: usize,
    pub zero_padding: bool,
    pub start_page: Page,
    pub save_state: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub fg_dim: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub accent: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub digits: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub digits_moving: Color,
}

// ─── Defaults ───────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        // The embedded file is part of the build; a parse failure is a bug.
        toml::from_str(DEFAULT_CONFIG_TOML)
            .expect("BUG: embedded default_config.toml is invalid TOML")
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            log_file: String::new(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 500,
            easing: Easing::default(),
            fraction_policy: FractionPolicy::default(),
            relayout: RelayoutPolicy::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            minimum_digits: 1,
            zero_padding: true,
            start_page: Page::Stopwatch,
            save_state: true,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            fg: Color::White,
            fg_dim: Color::DarkGray,
            accent: Color::Cyan,
            border: Color::DarkGray,
            digits: Color::White,
            digits_moving: Color::LightCyan,
        }
    }
}

// ─── Color Deserializer ─────────────────────────────────────────────────

fn deserialize_color<'de, D>(deserializer: D) -> std::result::Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: \"{s}\"")))
}

/// Parse a color string into a ratatui Color.
/// Supports: named colors, "reset", "#RRGGBB" hex.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "reset" | "default" | "transparent" => Some(Color::Reset),
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" | "dark_gray" | "dark_grey" => Some(Color::DarkGray),
        "lightred" | "light_red" => Some(Color::LightRed),
        "lightgreen" | "light_green" => Some(Color::LightGreen),
        "lightyellow" | "light_yellow" => Some(Color::LightYellow),
        "lightblue" | "light_blue" => Some(Color::LightBlue),
        "lightmagenta" | "light_magenta" => Some(Color::LightMagenta),
        "lightcyan" | "light_cyan" => Some(Color::LightCyan),
        hex if hex.starts_with('#') && hex.len() == 7 => {
            let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
            let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
            let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

// ─── Path Resolution ────────────────────────────────────────────────────

impl Config {
    /// Standard config file path: ~/.config/morphclock/config.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("morphclock")
            .join("config.toml")
    }

    /// Data directory for logs and saved state: ~/.local/share/morphclock/
    pub fn data_dir() -> PathBuf {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("morphclock");
        std::fs::create_dir_all(&data_dir).ok();
        data_dir
    }

    /// Resolved log file, or `None` when logging is disabled.
    pub fn log_path(&self) -> Option<PathBuf> {
        let name = self.general.log_file.trim();
        if name.is_empty() {
            return None;
        }
        let path = PathBuf::from(name);
        Some(if path.is_absolute() {
            path
        } else {
            Self::data_dir().join(path)
        })
    }

    /// Frame interval from FPS
    pub fn tick_rate_ms(&self) -> u64 {
        let fps = self.display.fps.max(1);
        1000 / fps as u64
    }

    /// Digit timing and policies for the widgets
    pub fn morph_settings(&self) -> MorphSettings {
        MorphSettings {
            duration: Duration::from_millis(self.animation.duration_ms),
            easing: self.animation.easing,
            fraction_policy: self.animation.fraction_policy,
            relayout: self.animation.relayout,
        }
    }

    /// Reject values the widgets cannot honour.
    pub fn validate(&self) -> MorphResult<()> {
        if self.display.fps == 0 {
            return Err(MorphError::Config("display.fps must be at least 1".into()));
        }
        if self.animation.duration_ms > MAX_DURATION_MS {
            return Err(MorphError::Config(format!(
                "animation.duration_ms must be at most {MAX_DURATION_MS}"
            )));
        }
        if self.display.minimum_digits > MAX_MINIMUM_DIGITS {
            return Err(MorphError::Config(format!(
                "display.minimum_digits must be at most {MAX_MINIMUM_DIGITS}"
            )));
        }
        Ok(())
    }
}

// ─── Bootloader ─────────────────────────────────────────────────────────

/// The single entry point for configuration. Called exactly once at startup.
///
/// 1. Resolve config file path (CLI override or default)
/// 2. If the file doesn't exist, create the directory tree and write defaults
/// 3. Parse TOML from disk into Config
/// 4. Apply CLI overrides on top
/// 5. Validate
pub fn load(cli: &CliArgs) -> Result<Config> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    if !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&config_path, DEFAULT_CONFIG_TOML).wrap_err_with(|| {
            format!(
                "Failed to write default config to {}",
                config_path.display()
            )
        })?;
        info!("Created default config at {}", config_path.display());
    }

    let toml_str = std::fs::read_to_string(&config_path)
        .wrap_err_with(|| format!("Failed to read config from {}", config_path.display()))?;

    let mut config = parse(&toml_str).wrap_err_with(|| {
        format!(
            "Failed to parse config at {}.\n\
             Delete the file to regenerate defaults, or run:\n  \
             morphclock --print-default-config > {:?}",
            config_path.display(),
            config_path
        )
    })?;

    apply_overrides(&mut config, cli);
    config
        .validate()
        .wrap_err_with(|| format!("Invalid config at {}", config_path.display()))?;

    Ok(config)
}

fn parse(toml_str: &str) -> MorphResult<Config> {
    toml::from_str(toml_str).map_err(|e| MorphError::Config(e.to_string()))
}

fn apply_overrides(config: &mut Config, cli: &CliArgs) {
    if let Some(ref level) = cli.log_level {
        config.general.log_level = level.clone();
    }
    if let Some(ref path) = cli.log_file {
        config.general.log_file = path.display().to_string();
    }
    if let Some(fps) = cli.fps {
        config.display.fps = fps;
    }
    if let Some(easing) = cli.easing {
        config.animation.easing = easing;
    }
    if let Some(duration) = cli.duration {
        config.animation.duration_ms = duration;
    }
}

/// Returns the embedded default config TOML string.
pub fn default_config_toml() -> &'static str {
    DEFAULT_CONFIG_TOML
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn embedded_default_parses_and_validates() {
        let config = Config::default();
        assert_eq!(config.animation.duration_ms, 500);
        assert_eq!(config.animation.easing, Easing::AccelerateDecelerate);
        assert_eq!(config.display.start_page, Page::Stopwatch);
        assert_eq!(config.theme.digits_moving, Color::LightCyan);
        assert!(config.log_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = parse("[animation]\neasing = \"bounce\"\n").unwrap();
        assert_eq!(config.animation.easing, Easing::Bounce);
        assert_eq!(config.animation.duration_ms, 500);
        assert_eq!(config.display.fps, 30);
    }

    #[test]
    fn policies_use_kebab_case() {
        let config = parse(
            "[animation]\nfraction_policy = \"clamp\"\nrelayout = \"on-completion\"\n",
        )
        .unwrap();
        let settings = config.morph_settings();
        assert_eq!(settings.fraction_policy, FractionPolicy::Clamp);
        assert_eq!(settings.relayout, RelayoutPolicy::OnCompletion);
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(matches!(
            parse("[theme]\naccent = \"chartreuse\"\n"),
            Err(MorphError::Config(_))
        ));
        let config = parse("[display]\nfps = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(MorphError::Config(_))));
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = Config::default();
        let cli = CliArgs {
            fps: Some(60),
            easing: Some(Easing::Overshoot),
            duration: Some(250),
            log_file: Some(PathBuf::from("/tmp/morphclock.log")),
            ..CliArgs::default()
        };
        apply_overrides(&mut config, &cli);
        assert_eq!(config.tick_rate_ms(), 16);
        assert_eq!(config.morph_settings().duration, Duration::from_millis(250));
        assert_eq!(config.morph_settings().easing, Easing::Overshoot);
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/morphclock.log")));
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_color(" Dark_Gray "), Some(Color::DarkGray));
        assert_eq!(parse_color("#ff80"), None);
    }
}
