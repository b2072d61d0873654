//! # Animation 模块
//!
//! 通用补间动画系统。
//!
//! ## 核心设计理念
//!
//! 动画系统只负责 **时间轴管理**：
//! - 知道某个值从 A 到 B 需要在 duration 内变化
//! - 维护当前值，通过 [`ValueId`] 查询
//! - **不假设值的用途**，效果组件自己决定如何把值绑定到图形
//!
//! ## 核心概念
//!
//! - [`Animator`]: 动画驱动能力（可替换的接口）
//! - [`AnimationSystem`]: 默认实现
//! - [`Tween`]: 单个补间实例
//! - [`EasingFunction`]: 缓动函数

mod animator;
mod easing;
mod system;
mod tween;

pub use animator::{Animator, ValueId};
pub use easing::{CubicBezier, EasingFunction};
pub use system::AnimationSystem;
pub use tween::{AnimationId, AnimationState, Tween, TweenSpec};

use serde::{Deserialize, Serialize};

/// 动画事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationEvent {
    /// 补间开始
    Started(AnimationId),
    /// 补间到达目标值
    Completed(AnimationId),
    /// 补间被新的补间或直接赋值取代
    Superseded(AnimationId),
}

impl AnimationEvent {
    /// 事件对应的动画 ID
    pub fn id(&self) -> AnimationId {
        match *self {
            AnimationEvent::Started(id)
            | AnimationEvent::Completed(id)
            | AnimationEvent::Superseded(id) => id,
        }
    }
}
