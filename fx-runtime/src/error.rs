//! # Error 模块
//!
//! 定义 fx-runtime 中使用的错误类型。

use thiserror::Error;

use crate::effect::EffectKind;

/// 动画驱动错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimatorError {
    /// 标量未注册或已注销
    #[error("动画标量 {id} 未注册")]
    UnknownValue { id: u64 },
}

/// 输入计划解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// 缺少 `@` 分隔符
    #[error("无效的输入 '{spec}'：期望格式为 <effect>@<seconds>")]
    MissingSeparator { spec: String },

    /// 未知的效果名称
    #[error("未知的效果 '{name}'，可选值: clip, mask, fade, pulse")]
    UnknownEffect { name: String },

    /// 时间无效
    #[error("无效的时间 '{value}'：{message}")]
    InvalidTime { value: String, message: String },
}

/// fx-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxError {
    /// 动画驱动错误
    #[error("动画错误: {0}")]
    Animator(#[from] AnimatorError),

    /// 输入计划错误
    #[error("输入计划错误: {0}")]
    Schedule(#[from] ScheduleError),

    /// 效果未挂载
    #[error("效果 '{kind}' 未挂载")]
    NotMounted { kind: EffectKind },
}

/// Result 类型别名
pub type FxResult<T> = Result<T, FxError>;
