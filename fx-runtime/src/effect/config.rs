//! # Effect 配置
//!
//! 四种效果共用一份参数化定义，差异全部体现在配置里。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::animation::{EasingFunction, TweenSpec};
use crate::error::ScheduleError;

/// 效果画布宽度
pub const VIEWPORT_WIDTH: f32 = 300.0;
/// 效果画布高度
pub const VIEWPORT_HEIGHT: f32 = 140.0;
/// 脉动圆的目标半径
pub const PULSE_RADIUS: f32 = 80.0;
/// 默认补间时长（毫秒）
pub const DEFAULT_DURATION_MS: u32 = 1200;

/// 效果种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// 裁剪路径宽度从 0 滑入
    ClipReveal,
    /// 亮度遮罩宽度从 0 滑入
    MaskReveal,
    /// 遮罩不透明度淡入
    Fade,
    /// 圆半径脉动
    PulsatingCircle,
}

impl EffectKind {
    /// 挂载顺序
    pub const ALL: [EffectKind; 4] = [
        EffectKind::ClipReveal,
        EffectKind::MaskReveal,
        EffectKind::Fade,
        EffectKind::PulsatingCircle,
    ];

    /// 命令行使用的短名
    pub fn key(&self) -> &'static str {
        match self {
            EffectKind::ClipReveal => "clip",
            EffectKind::MaskReveal => "mask",
            EffectKind::Fade => "fade",
            EffectKind::PulsatingCircle => "pulse",
        }
    }

    /// 面板标题
    pub fn title(&self) -> &'static str {
        match self {
            EffectKind::ClipReveal => "ClipPath sliding in",
            EffectKind::MaskReveal => "Mask sliding in",
            EffectKind::Fade => "Mask fading in",
            EffectKind::PulsatingCircle => "Pulsating Circle",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EffectKind {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clip" | "clip_reveal" | "clip-reveal" => Ok(EffectKind::ClipReveal),
            "mask" | "mask_reveal" | "mask-reveal" => Ok(EffectKind::MaskReveal),
            "fade" => Ok(EffectKind::Fade),
            "pulse" | "pulsating_circle" | "pulsating-circle" => Ok(EffectKind::PulsatingCircle),
            _ => Err(ScheduleError::UnknownEffect {
                name: s.to_string(),
            }),
        }
    }
}

/// 隐藏时的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HidePolicy {
    /// 立即回到静止值
    #[default]
    Snap,
    /// 以同样的时长与缓动补间回静止值
    Animate,
}

/// 单个效果的参数化定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectConfig {
    pub kind: EffectKind,
    /// 静止值（隐藏状态）
    pub rest: f32,
    /// 目标值（显示状态）
    pub target: f32,
    /// 补间时长（秒）
    pub duration: f32,
    pub easing: EasingFunction,
    pub hide: HidePolicy,
}

impl EffectConfig {
    /// 各效果的默认配置
    pub fn preset(kind: EffectKind) -> Self {
        let (target, hide) = match kind {
            EffectKind::ClipReveal | EffectKind::MaskReveal => (VIEWPORT_WIDTH, HidePolicy::Snap),
            EffectKind::Fade => (1.0, HidePolicy::Snap),
            EffectKind::PulsatingCircle => (PULSE_RADIUS, HidePolicy::Animate),
        };

        Self {
            kind,
            rest: 0.0,
            target,
            duration: DEFAULT_DURATION_MS as f32 / 1000.0,
            easing: EasingFunction::default(),
            hide,
        }
    }

    /// 设置时长（毫秒）
    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration = duration_ms as f32 / 1000.0;
        self
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_hide_policy(mut self, hide: HidePolicy) -> Self {
        self.hide = hide;
        self
    }

    /// 驱动到 `to` 的补间参数
    pub fn tween_to(&self, to: f32) -> TweenSpec {
        TweenSpec::new(to, self.duration, self.easing)
    }

    /// 把值限制在 `[rest, target]` 区间内
    pub fn clamp(&self, value: f32) -> f32 {
        let (lo, hi) = if self.rest <= self.target {
            (self.rest, self.target)
        } else {
            (self.target, self.rest)
        };
        value.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let clip = EffectConfig::preset(EffectKind::ClipReveal);
        assert_eq!(clip.target, 300.0);
        assert_eq!(clip.hide, HidePolicy::Snap);
        assert!((clip.duration - 1.2).abs() < 1e-6);

        let fade = EffectConfig::preset(EffectKind::Fade);
        assert_eq!(fade.target, 1.0);

        let pulse = EffectConfig::preset(EffectKind::PulsatingCircle);
        assert_eq!(pulse.target, 80.0);
        assert_eq!(pulse.hide, HidePolicy::Animate);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("clip".parse::<EffectKind>(), Ok(EffectKind::ClipReveal));
        assert_eq!(" Mask ".parse::<EffectKind>(), Ok(EffectKind::MaskReveal));
        assert_eq!(
            "pulsating-circle".parse::<EffectKind>(),
            Ok(EffectKind::PulsatingCircle)
        );
        assert!(matches!(
            "sparkle".parse::<EffectKind>(),
            Err(ScheduleError::UnknownEffect { .. })
        ));
    }

    #[test]
    fn test_kind_round_trips_through_key() {
        for kind in EffectKind::ALL {
            assert_eq!(kind.key().parse::<EffectKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_clamp() {
        let config = EffectConfig::preset(EffectKind::ClipReveal);
        assert_eq!(config.clamp(-1.0), 0.0);
        assert_eq!(config.clamp(400.0), 300.0);
        assert_eq!(config.clamp(120.0), 120.0);
    }
}
