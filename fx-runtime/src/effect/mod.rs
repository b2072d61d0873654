//! # Effect 模块
//!
//! 动画效果组件：一个动画标量 + 一个可见性标志 + 一个绑定到标量的场景。
//!
//! ## 状态转换
//!
//! ```text
//! Hidden ──toggle──► Shown     启动补间 rest -> target（从当前值出发）
//! Shown  ──toggle──► Hidden    HidePolicy::Snap    立即回到 rest
//!                              HidePolicy::Animate 补间回 rest
//! ```
//!
//! 新的补间总会取代同一标量上进行中的补间，因此连续快速切换后
//! 最终停留的状态只由最后一次切换决定。

mod config;
mod scenes;

pub use config::{
    DEFAULT_DURATION_MS, EffectConfig, EffectKind, HidePolicy, PULSE_RADIUS, VIEWPORT_HEIGHT,
    VIEWPORT_WIDTH,
};
pub use scenes::render;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::{AnimationId, Animator, ValueId};
use crate::error::AnimatorError;
use crate::scene::Scene;

/// 一次切换引起的标量变化
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    /// 启动了补间
    Tween { animation: AnimationId, to: f32 },
    /// 立即赋值
    Snap { to: f32 },
}

impl Transition {
    /// 最终会停留的值
    pub fn target(&self) -> f32 {
        match *self {
            Transition::Tween { to, .. } | Transition::Snap { to } => to,
        }
    }
}

/// 效果组件实例
///
/// 标量和可见性标志由实例私有，实例之间不共享任何状态。
#[derive(Debug)]
pub struct Effect {
    config: EffectConfig,
    value: ValueId,
    visible: bool,
}

impl Effect {
    /// 挂载：在 animator 中注册标量，初始为静止值、隐藏状态
    pub fn mount(config: EffectConfig, animator: &mut impl Animator) -> Self {
        let value = animator.register(config.rest);
        debug!(effect = %config.kind, %value, "挂载效果");
        Self {
            config,
            value,
            visible: false,
        }
    }

    /// 卸载：注销标量，丢弃进行中的补间
    pub fn unmount(self, animator: &mut impl Animator) {
        debug!(effect = %self.config.kind, "卸载效果");
        animator.unregister(self.value);
    }

    /// 切换可见性，并把标量驱动到新状态对应的端点
    pub fn toggle(&mut self, animator: &mut impl Animator) -> Result<Transition, AnimatorError> {
        self.visible = !self.visible;
        let transition = self.drive(animator)?;
        debug!(
            effect = %self.config.kind,
            visible = self.visible,
            ?transition,
            "切换效果"
        );
        Ok(transition)
    }

    fn drive(&self, animator: &mut impl Animator) -> Result<Transition, AnimatorError> {
        let config = &self.config;
        if self.visible {
            let animation = animator.start(self.value, config.tween_to(config.target))?;
            return Ok(Transition::Tween {
                animation,
                to: config.target,
            });
        }

        match config.hide {
            HidePolicy::Snap => {
                animator.set_value(self.value, config.rest)?;
                Ok(Transition::Snap { to: config.rest })
            }
            HidePolicy::Animate => {
                let animation = animator.start(self.value, config.tween_to(config.rest))?;
                Ok(Transition::Tween {
                    animation,
                    to: config.rest,
                })
            }
        }
    }

    /// 当前标量值（已限制在 `[rest, target]` 内）
    pub fn scalar(&self, animator: &impl Animator) -> f32 {
        let value = animator.value(self.value).unwrap_or(self.config.rest);
        self.config.clamp(value)
    }

    /// 按当前标量生成场景
    pub fn render(&self, animator: &impl Animator) -> Scene {
        scenes::render(&self.config, self.scalar(animator))
    }

    /// 切换按钮的文字：显示下一次切换会进入的状态
    pub fn button_label(&self) -> &'static str {
        if self.visible { "Hide" } else { "Show" }
    }

    /// 标量是否仍在补间中
    pub fn is_animating(&self, animator: &impl Animator) -> bool {
        animator.is_animating(self.value)
    }

    pub fn kind(&self) -> EffectKind {
        self.config.kind
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn value_id(&self) -> ValueId {
        self.value
    }
}
