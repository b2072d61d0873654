//! # Animator 模块
//!
//! 动画驱动能力的抽象接口。
//!
//! 效果组件只通过 [`Animator`] 读写自己的标量值，
//! 不关心补间如何被调度、由谁推进时间。

use serde::{Deserialize, Serialize};

use super::{AnimationEvent, AnimationId, TweenSpec};
use crate::error::AnimatorError;

/// 动画标量的句柄
///
/// 由 `Animator::register` 分配，保证在同一个 Animator 内唯一。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueId(pub(crate) u64);

impl ValueId {
    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ValueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ValueId({})", self.0)
    }
}

/// 动画驱动接口
///
/// ## 语义
///
/// - `start` 从值的**当前位置**出发，取代同一个值上尚在进行的补间（后写者胜）
/// - `set_value` 立即赋值，同样会取代进行中的补间
/// - `update` 由宿主在每一帧调用，推进所有补间
pub trait Animator {
    /// 注册新的动画标量，返回其句柄
    fn register(&mut self, initial: f32) -> ValueId;

    /// 注销标量，丢弃其上进行中的补间
    fn unregister(&mut self, id: ValueId);

    /// 查询当前值
    fn value(&self, id: ValueId) -> Option<f32>;

    /// 立即设置值
    fn set_value(&mut self, id: ValueId, value: f32) -> Result<(), AnimatorError>;

    /// 启动补间
    fn start(&mut self, id: ValueId, spec: TweenSpec) -> Result<AnimationId, AnimatorError>;

    /// 该值上是否有进行中的补间
    fn is_animating(&self, id: ValueId) -> bool;

    /// 推进时间 `dt`（秒），返回本帧产生的事件
    fn update(&mut self, dt: f32) -> Vec<AnimationEvent>;
}
