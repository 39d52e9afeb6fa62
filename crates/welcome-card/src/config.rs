use std::path::{Path, PathBuf};

use eyre::WrapErr;
use serde::Deserialize;

const MAX_FONT_SIZE: f32 = 1024.0;

/// Settings read from `config.json` once at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WelcomeConfig {
    pub welcome_background_image: PathBuf,
    pub avatar_size: [u32; 2],
    pub avatar_position: [i32; 2],
    pub font_path: PathBuf,
    pub font_size: f32,
    pub text_position: [i32; 2],
    pub text_color: [u8; 3],
    pub welcome_channel_name: String,
}

impl WelcomeConfig {
    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .wrap_err_with(|| format!("read config file {}", path.display()))?;
        Self::from_slice(&bytes).wrap_err_with(|| format!("load config file {}", path.display()))
    }

    pub fn from_slice(bytes: &[u8]) -> eyre::Result<Self> {
        let config: Self = serde_json::from_slice(bytes).wrap_err("parse config json")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> eyre::Result<()> {
        let [width, height] = self.avatar_size;
        if width == 0 || height == 0 {
            return Err(eyre::eyre!(
                "avatar_size must be non-zero, got [{width}, {height}]"
            ));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 || self.font_size > MAX_FONT_SIZE {
            return Err(eyre::eyre!(
                "font_size must be in (0, {}], got {}",
                MAX_FONT_SIZE,
                self.font_size
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::WelcomeConfig;

    const SAMPLE: &str = r#"{
        "welcome_background_image": "assets/background.png",
        "avatar_size": [200, 200],
        "avatar_position": [50, 50],
        "font_path": "assets/font.ttf",
        "font_size": 40,
        "text_position": [280, 120],
        "text_color": [255, 255, 255],
        "welcome_channel_name": "welcome"
    }"#;

    #[test]
    fn parses_every_field() {
        let config = WelcomeConfig::from_slice(SAMPLE.as_bytes()).unwrap();
        assert_eq!(config.avatar_size, [200, 200]);
        assert_eq!(config.avatar_position, [50, 50]);
        assert_eq!(config.text_position, [280, 120]);
        assert_eq!(config.text_color, [255, 255, 255]);
        assert_eq!(config.font_size, 40.0);
        assert_eq!(config.welcome_channel_name, "welcome");
    }

    #[test]
    fn positions_may_be_negative() {
        let json = SAMPLE.replace("\"avatar_position\": [50, 50]", "\"avatar_position\": [-20, -5]");
        let config = WelcomeConfig::from_slice(json.as_bytes()).unwrap();
        assert_eq!(config.avatar_position, [-20, -5]);
    }

    #[test]
    fn rejects_zero_avatar_size() {
        let json = SAMPLE.replace("[200, 200]", "[0, 200]");
        let err = WelcomeConfig::from_slice(json.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("avatar_size"));
    }

    #[test]
    fn rejects_non_positive_font_size() {
        let json = SAMPLE.replace("\"font_size\": 40", "\"font_size\": 0");
        assert!(WelcomeConfig::from_slice(json.as_bytes()).is_err());
    }

    #[test]
    fn rejects_oversized_font_size() {
        let json = SAMPLE.replace("\"font_size\": 40", "\"font_size\": 1e9");
        let err = WelcomeConfig::from_slice(json.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("font_size"));

        let json = SAMPLE.replace("\"font_size\": 40", "\"font_size\": 1024");
        assert!(WelcomeConfig::from_slice(json.as_bytes()).is_ok());
    }

    #[test]
    fn rejects_out_of_range_color() {
        let json = SAMPLE.replace("[255, 255, 255]", "[256, 0, 0]");
        assert!(WelcomeConfig::from_slice(json.as_bytes()).is_err());
    }
}
