//! # Config 模块
//!
//! 运行时配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use fx_runtime::{ColorScheme, DEFAULT_DURATION_MS, EasingFunction, EffectSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// 配色方案偏好
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SchemePreference {
    /// 跟随系统（窗口主题；无窗口时为浅色）
    #[default]
    System,
    Light,
    Dark,
}

impl SchemePreference {
    /// 解析出实际配色方案，`system_theme` 为平台报告的主题
    pub fn resolve(&self, system_theme: Option<ColorScheme>) -> ColorScheme {
        match self {
            SchemePreference::System => system_theme.unwrap_or_default(),
            SchemePreference::Light => ColorScheme::Light,
            SchemePreference::Dark => ColorScheme::Dark,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 动画配置
    #[serde(default)]
    pub animation: AnimationConfig,

    /// 外观配置
    #[serde(default)]
    pub appearance: AppearanceConfig,

    /// 无窗口运行配置
    #[serde(default)]
    pub headless: HeadlessConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度
    #[serde(default = "default_window_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_window_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_window_title")]
    pub title: String,
}

/// 动画配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// 补间时长（毫秒）
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,

    /// 缓动函数
    #[serde(default)]
    pub easing: EasingFunction,

    /// 为 true 时所有效果的隐藏都走补间
    #[serde(default)]
    pub unify_hide_policy: bool,
}

/// 外观配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default)]
    pub color_scheme: SchemePreference,
}

/// 无窗口运行配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessConfig {
    /// 采样帧率
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// 运行时长（秒）
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f32,

    /// 输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

// 默认值函数
fn default_window_width() -> u32 {
    420
}

fn default_window_height() -> u32 {
    960
}

fn default_window_title() -> String {
    "FX Showcase".to_string()
}

fn default_duration_ms() -> u32 {
    DEFAULT_DURATION_MS
}

fn default_fps() -> u32 {
    30
}

fn default_duration_secs() -> f32 {
    3.0
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("frames")
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            title: default_window_title(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            easing: EasingFunction::default(),
            unify_hide_policy: false,
        }
    }
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            duration_secs: default_duration_secs(),
            output_dir: default_output_dir(),
        }
    }
}

impl AnimationConfig {
    /// 转换为运行时的效果设置
    pub fn effect_settings(&self) -> EffectSettings {
        EffectSettings {
            duration_ms: self.duration_ms,
            easing: self.easing,
            unify_hide_policy: self.unify_hide_policy,
        }
    }
}

/// 命令行覆盖项，`None` 表示沿用配置文件
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub duration_secs: Option<f32>,
    pub fps: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub color_scheme: Option<SchemePreference>,
}

impl AppConfig {
    /// 应用命令行覆盖项
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(duration) = overrides.duration_secs {
            self.headless.duration_secs = duration;
        }
        if let Some(fps) = overrides.fps {
            self.headless.fps = fps;
        }
        if let Some(dir) = &overrides.output_dir {
            self.headless.output_dir = dir.clone();
        }
        if let Some(scheme) = overrides.color_scheme {
            self.appearance.color_scheme = scheme;
        }
    }

    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并打印警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(path = %path.display(), "配置文件加载成功");
                    config
                }
                Err(e) => {
                    warn!(error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::ValidationFailed(
                "窗口尺寸必须大于 0".to_string(),
            ));
        }

        if self.animation.duration_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "动画时长必须大于 0".to_string(),
            ));
        }

        if self.headless.fps == 0 {
            return Err(ConfigError::ValidationFailed("帧率必须大于 0".to_string()));
        }

        if !self.headless.duration_secs.is_finite() || self.headless.duration_secs < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "运行时长必须是非负有限值".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.animation.duration_ms, 1200);
        assert_eq!(config.animation.easing, EasingFunction::InOutEase);
        assert!(!config.animation.unify_hide_policy);
        assert_eq!(config.appearance.color_scheme, SchemePreference::System);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{ "animation": { "duration_ms": 600 }, "appearance": { "color_scheme": "dark" } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.animation.duration_ms, 600);
        assert_eq!(config.animation.easing, EasingFunction::InOutEase);
        assert_eq!(config.appearance.color_scheme, SchemePreference::Dark);
        assert_eq!(config.window.title, "FX Showcase");
        assert_eq!(config.headless.fps, 30);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();

        // 反序列化
        let loaded: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.window.width, config.window.width);
        assert_eq!(loaded.headless.output_dir, config.headless.output_dir);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.animation.duration_ms = 0;
        assert!(config.validate().is_err());
        config.animation.duration_ms = 1200;

        config.headless.fps = 0;
        assert!(config.validate().is_err());
        config.headless.fps = 60;

        config.window.width = 0;
        assert!(config.validate().is_err());
        config.window.width = 420;

        config.headless.duration_secs = f32::NAN;
        assert!(config.validate().is_err());
        config.headless.duration_secs = 1.0;

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_and_broken_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = AppConfig::load(dir.path().join("absent.json"));
        assert_eq!(missing.animation.duration_ms, 1200);

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        let loaded = AppConfig::load(&broken);
        assert_eq!(loaded.headless.fps, 30);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.animation.unify_hide_policy = true;
        config.animation.easing = EasingFunction::Linear;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path);
        assert!(loaded.animation.unify_hide_policy);
        assert_eq!(loaded.animation.easing, EasingFunction::Linear);
    }

    #[test]
    fn test_overrides_take_priority() {
        let mut config = AppConfig::default();
        config.apply_overrides(&ConfigOverrides {
            fps: Some(60),
            color_scheme: Some(SchemePreference::Dark),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.headless.fps, 60);
        assert_eq!(config.appearance.color_scheme, SchemePreference::Dark);
        // 未覆盖的保持原值
        assert_eq!(config.headless.duration_secs, 3.0);
        assert_eq!(config.headless.output_dir, PathBuf::from("frames"));
    }

    #[test]
    fn test_scheme_preference_resolve() {
        assert_eq!(SchemePreference::System.resolve(None), ColorScheme::Light);
        assert_eq!(
            SchemePreference::System.resolve(Some(ColorScheme::Dark)),
            ColorScheme::Dark
        );
        assert_eq!(
            SchemePreference::Light.resolve(Some(ColorScheme::Dark)),
            ColorScheme::Light
        );
    }
}
