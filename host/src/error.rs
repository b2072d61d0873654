//! # Error 模块
//!
//! 宿主层错误类型。

use std::path::PathBuf;

use fx_runtime::{FxError, ScheduleError};
use thiserror::Error;

use crate::config::ConfigError;

/// 宿主层错误
#[derive(Error, Debug)]
pub enum HostError {
    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 输入计划解析错误
    #[error("输入计划错误: {0}")]
    Schedule(#[from] ScheduleError),

    /// 运行时错误
    #[error("运行时错误: {0}")]
    Runtime(#[from] FxError),

    /// 文件读写失败
    #[error("无法写入 {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 报告序列化失败
    #[error("报告序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),

    /// 窗口或图形设备初始化失败
    #[error("图形初始化失败: {0}")]
    Graphics(String),

    /// 未启用 gui 特性时请求窗口模式
    #[error("未启用 gui 特性，请使用 --headless 运行，或以 `--features gui` 重新构建")]
    GuiUnavailable,
}

impl HostError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result 类型别名
pub type HostResult<T> = Result<T, HostError>;
