//! # Host 层
//!
//! 矢量动画效果展示的宿主层实现。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 配置加载与校验
//! - 无窗口运行（逐帧导出 SVG 与运行报告）
//! - 窗口与渲染（`gui` 特性：winit + wgpu + egui）
//! - 输入采集，把按钮点击转换为 [`fx_runtime::ShellInput`]
//!
//! Host 层不包含动画逻辑，只负责驱动 `fx-runtime` 的 [`fx_runtime::RootShell`]。

pub mod config;
pub mod error;
pub mod headless;

#[cfg(feature = "gui")]
pub mod app;
#[cfg(feature = "gui")]
pub mod renderer;
#[cfg(feature = "gui")]
pub mod ui;

pub use config::{
    AnimationConfig, AppConfig, AppearanceConfig, ConfigError, ConfigOverrides, HeadlessConfig,
    SchemePreference, WindowConfig,
};
pub use error::{HostError, HostResult};
pub use headless::{EffectSummary, EventCounts, HeadlessOptions, HeadlessReport, HeadlessRunner};
