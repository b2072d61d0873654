//! # FX Runtime
//!
//! 矢量动画效果展示的核心运行时库。
//!
//! ## 架构概述
//!
//! `fx-runtime` 是纯逻辑核心，不依赖任何窗口、IO 或渲染引擎。
//! 宿主层（Host）通过 [`RootShell`] 驱动它：
//!
//! ```text
//! Host                          Runtime
//!   │                              │
//!   │──── ShellInput ────────────►│ handle_input()
//!   │──── dt ────────────────────►│ update()
//!   │◄─── ShellFrame ─────────────│ render(scheme)
//!   │                              │
//! ```
//!
//! `ShellFrame` 中每个面板带一个 [`Scene`]，宿主可用 [`render::scene_to_svg`]
//! 导出为 SVG，或用 [`DisplayList`] 展平后自行绘制。
//!
//! ## 核心类型
//!
//! - [`Animator`]：动画驱动接口，[`AnimationSystem`] 为默认实现
//! - [`Effect`]：单个效果（挂载、切换、渲染）
//! - [`RootShell`]：根容器，挂载全部效果并决定外观
//! - [`InputSchedule`]：按时间注入的输入计划
//!
//! ## 使用示例
//!
//! ```ignore
//! use fx_runtime::{ColorScheme, EffectKind, EffectSettings, RootShell};
//!
//! let mut shell = RootShell::new(&EffectSettings::default());
//! shell.toggle(EffectKind::ClipReveal)?;
//!
//! loop {
//!     shell.update(1.0 / 60.0);
//!     let frame = shell.render(ColorScheme::Light);
//!     host.present(&frame);
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`animation`]：补间、缓动与动画系统
//! - [`scene`]：矢量场景描述
//! - [`effect`]：四种效果的配置与场景生成
//! - [`shell`]：根容器与外观
//! - [`input`]：输入与输入计划
//! - [`render`]：SVG 与绘制列表后端
//! - [`error`]：错误类型定义

pub mod animation;
pub mod effect;
pub mod error;
pub mod input;
pub mod render;
pub mod scene;
pub mod shell;

// 重导出核心类型
pub use animation::{
    AnimationEvent, AnimationId, AnimationState, AnimationSystem, Animator, CubicBezier,
    EasingFunction, Tween, TweenSpec, ValueId,
};
pub use effect::{
    DEFAULT_DURATION_MS, Effect, EffectConfig, EffectKind, HidePolicy, PULSE_RADIUS, Transition,
    VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
};
pub use error::{AnimatorError, FxError, FxResult, ScheduleError};
pub use input::{InputSchedule, ScheduledInput, ShellInput};
pub use render::{DisplayList, frame_to_svg, scene_to_svg};
pub use scene::{Bounds, Circle, Color, Definition, Group, Node, Paint, Rect, Scene, Shape};
pub use shell::{
    Appearance, ColorScheme, EffectPanel, EffectSettings, Palette, RootShell, ShellFrame,
    StatusBarStyle,
};
