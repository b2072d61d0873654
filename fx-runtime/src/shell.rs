//! # Shell 模块
//!
//! 根容器：按固定顺序挂载四个效果，并根据配色方案决定背景与状态栏样式。
//!
//! 配色方案在每次 `render` 时由调用方传入，Shell 自身不缓存。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::{AnimationEvent, AnimationSystem, Animator, EasingFunction};
use crate::effect::{
    DEFAULT_DURATION_MS, Effect, EffectConfig, EffectKind, HidePolicy, Transition,
};
use crate::error::{FxError, FxResult};
use crate::input::ShellInput;
use crate::scene::{Color, Scene};

/// 界面调色板
pub struct Palette;

impl Palette {
    pub const PRIMARY: Color = Color::rgb(0x12, 0x92, 0xb4);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const LIGHTER: Color = Color::rgb(0xf3, 0xf3, 0xf3);
    pub const DARKER: Color = Color::rgb(0x22, 0x22, 0x22);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
}

/// 平台配色方案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// 状态栏文字样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBarStyle {
    /// 浅色文字（用于深色背景）
    LightContent,
    /// 深色文字（用于浅色背景）
    DarkContent,
}

impl StatusBarStyle {
    /// 状态栏文字颜色
    pub fn content_color(&self) -> Color {
        match self {
            StatusBarStyle::LightContent => Palette::WHITE,
            StatusBarStyle::DarkContent => Palette::BLACK,
        }
    }
}

/// 由配色方案推导出的外观
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub background: Color,
    pub foreground: Color,
    pub status_bar: StatusBarStyle,
}

impl Appearance {
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self {
                background: Palette::LIGHTER,
                foreground: Palette::BLACK,
                status_bar: StatusBarStyle::DarkContent,
            },
            ColorScheme::Dark => Self {
                background: Palette::DARKER,
                foreground: Palette::WHITE,
                status_bar: StatusBarStyle::LightContent,
            },
        }
    }
}

/// 所有效果共享的补间设置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSettings {
    pub duration_ms: u32,
    pub easing: EasingFunction,
    /// 为 true 时所有效果隐藏都用补间；否则沿用各效果的默认策略
    pub unify_hide_policy: bool,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: EasingFunction::default(),
            unify_hide_policy: false,
        }
    }
}

impl EffectSettings {
    /// 生成某个效果的配置
    pub fn config_for(&self, kind: EffectKind) -> EffectConfig {
        let config = EffectConfig::preset(kind)
            .with_duration_ms(self.duration_ms)
            .with_easing(self.easing);
        if self.unify_hide_policy {
            config.with_hide_policy(HidePolicy::Animate)
        } else {
            config
        }
    }
}

/// 单个效果面板的渲染结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectPanel {
    pub kind: EffectKind,
    pub title: String,
    pub scene: Scene,
    pub button_label: String,
    pub visible: bool,
    pub value: f32,
    pub animating: bool,
}

/// 一帧完整的界面描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellFrame {
    pub scheme: ColorScheme,
    pub appearance: Appearance,
    pub panels: Vec<EffectPanel>,
}

/// 根容器
pub struct RootShell<A: Animator = AnimationSystem> {
    animator: A,
    effects: Vec<Effect>,
}

impl RootShell<AnimationSystem> {
    /// 使用默认动画系统创建
    pub fn new(settings: &EffectSettings) -> Self {
        Self::with_animator(AnimationSystem::new(), settings)
    }
}

impl<A: Animator> RootShell<A> {
    /// 使用给定的 animator 创建，按固定顺序挂载全部效果
    pub fn with_animator(mut animator: A, settings: &EffectSettings) -> Self {
        let effects = EffectKind::ALL
            .iter()
            .map(|&kind| Effect::mount(settings.config_for(kind), &mut animator))
            .collect();
        debug!(?settings, "挂载根容器");
        Self { animator, effects }
    }

    /// 卸载所有效果，交还 animator
    pub fn unmount(self) -> A {
        let Self {
            mut animator,
            effects,
        } = self;
        for effect in effects {
            effect.unmount(&mut animator);
        }
        animator
    }

    /// 处理一条输入
    pub fn handle_input(&mut self, input: &ShellInput) -> FxResult<Transition> {
        match *input {
            ShellInput::Toggle { effect } => self.toggle(effect),
        }
    }

    /// 切换某个效果
    pub fn toggle(&mut self, kind: EffectKind) -> FxResult<Transition> {
        let Self { animator, effects } = self;
        let effect = effects
            .iter_mut()
            .find(|effect| effect.kind() == kind)
            .ok_or(FxError::NotMounted { kind })?;
        Ok(effect.toggle(animator)?)
    }

    /// 推进所有动画
    pub fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        self.animator.update(dt)
    }

    /// 是否有任何效果仍在补间中（需要继续重绘）
    pub fn is_animating(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| effect.is_animating(&self.animator))
    }

    /// 渲染一帧
    pub fn render(&self, scheme: ColorScheme) -> ShellFrame {
        let panels = self
            .effects
            .iter()
            .map(|effect| EffectPanel {
                kind: effect.kind(),
                title: effect.kind().title().to_string(),
                scene: effect.render(&self.animator),
                button_label: effect.button_label().to_string(),
                visible: effect.is_visible(),
                value: effect.scalar(&self.animator),
                animating: effect.is_animating(&self.animator),
            })
            .collect();

        ShellFrame {
            scheme,
            appearance: Appearance::for_scheme(scheme),
            panels,
        }
    }

    pub fn effect(&self, kind: EffectKind) -> Option<&Effect> {
        self.effects.iter().find(|effect| effect.kind() == kind)
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }
}
