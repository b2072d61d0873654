//! # System 模块
//!
//! 默认的 [`Animator`] 实现。
//!
//! ```rust,ignore
//! let mut system = AnimationSystem::new();
//! let width = system.register(0.0);
//! system.start(width, TweenSpec::new(300.0, 1.2, EasingFunction::InOutEase))?;
//! // 每帧
//! system.update(dt);
//! let w = system.value(width);
//! ```

use std::collections::HashMap;

use tracing::{debug, trace};

use super::animator::{Animator, ValueId};
use super::{AnimationEvent, AnimationId, Tween, TweenSpec};
use crate::error::AnimatorError;

/// 单个标量的存储槽
#[derive(Debug, Clone)]
struct ValueSlot {
    /// 当前值（没有补间时的静止值）
    value: f32,
    /// 进行中的补间
    tween: Option<Tween>,
}

impl ValueSlot {
    fn current(&self) -> f32 {
        match &self.tween {
            Some(tween) => tween.current_value(),
            None => self.value,
        }
    }
}

/// 动画系统
///
/// 管理所有动画标量与补间，提供统一的更新和查询接口。
///
/// ## 设计理念
///
/// 动画系统只负责：
/// 1. 管理时间轴：知道某个值从 A 到 B 需要在 duration 内变化
/// 2. 维护当前值，通过 `ValueId` 查询
/// 3. 不假设值的用途：由效果组件决定如何把值绑定到图形
pub struct AnimationSystem {
    /// 已注册的标量
    slots: HashMap<ValueId, ValueSlot>,
    /// 下一个动画 ID
    next_anim_id: u64,
    /// 下一个标量 ID
    next_value_id: u64,
    /// 待处理的事件队列
    events: Vec<AnimationEvent>,
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnimationSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSystem")
            .field("values", &self.slots.len())
            .field("active", &self.active_count())
            .finish()
    }
}

impl AnimationSystem {
    /// 创建新的动画系统
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            next_anim_id: 1,
            next_value_id: 1,
            events: Vec::new(),
        }
    }

    /// 生成下一个动画 ID
    fn next_animation_id(&mut self) -> AnimationId {
        let id = AnimationId::new(self.next_anim_id);
        self.next_anim_id += 1;
        id
    }

    fn slot_mut(&mut self, id: ValueId) -> Result<&mut ValueSlot, AnimatorError> {
        self.slots
            .get_mut(&id)
            .ok_or(AnimatorError::UnknownValue { id: id.value() })
    }

    /// 取消槽位上的补间，把当前插值固化为静止值
    fn cancel_tween(slot: &mut ValueSlot, events: &mut Vec<AnimationEvent>) {
        if let Some(mut tween) = slot.tween.take() {
            slot.value = tween.current_value();
            if tween.is_active() {
                tween.supersede();
                events.push(AnimationEvent::Superseded(tween.id));
            }
        }
    }

    /// 已注册标量数量
    pub fn registered_count(&self) -> usize {
        self.slots.len()
    }

    /// 进行中的补间数量
    pub fn active_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| slot.tween.as_ref().is_some_and(Tween::is_active))
            .count()
    }

    /// 是否有任何进行中的补间
    pub fn has_active_animations(&self) -> bool {
        self.active_count() > 0
    }

    /// 跳过所有补间，直接到达目标值
    pub fn skip_all(&mut self) {
        for slot in self.slots.values_mut() {
            if let Some(mut tween) = slot.tween.take() {
                tween.finish();
                slot.value = tween.current_value();
                self.events.push(AnimationEvent::Completed(tween.id));
            }
        }
    }
}

impl Animator for AnimationSystem {
    fn register(&mut self, initial: f32) -> ValueId {
        let id = ValueId(self.next_value_id);
        self.next_value_id += 1;
        self.slots.insert(
            id,
            ValueSlot {
                value: initial,
                tween: None,
            },
        );
        trace!(%id, initial, "注册动画标量");
        id
    }

    fn unregister(&mut self, id: ValueId) {
        if self.slots.remove(&id).is_some() {
            trace!(%id, "注销动画标量");
        }
    }

    fn value(&self, id: ValueId) -> Option<f32> {
        self.slots.get(&id).map(ValueSlot::current)
    }

    fn set_value(&mut self, id: ValueId, value: f32) -> Result<(), AnimatorError> {
        let mut events = std::mem::take(&mut self.events);
        let result = self.slot_mut(id).map(|slot| {
            Self::cancel_tween(slot, &mut events);
            slot.value = value;
        });
        self.events = events;
        result
    }

    fn start(&mut self, id: ValueId, spec: TweenSpec) -> Result<AnimationId, AnimatorError> {
        let anim_id = self.next_animation_id();
        let mut events = std::mem::take(&mut self.events);

        let result = self.slot_mut(id).map(|slot| {
            // 取消同一个值上的现有补间，从当前插值位置出发
            Self::cancel_tween(slot, &mut events);
            let tween = Tween::new(anim_id, slot.value, spec);
            debug!(
                %id,
                %anim_id,
                from = tween.from,
                to = tween.to,
                duration = tween.duration,
                "启动补间"
            );
            events.push(AnimationEvent::Started(anim_id));
            if tween.is_active() {
                slot.tween = Some(tween);
            } else {
                slot.value = tween.current_value();
                events.push(AnimationEvent::Completed(anim_id));
            }
            anim_id
        });

        self.events = events;
        result
    }

    fn is_animating(&self, id: ValueId) -> bool {
        self.slots
            .get(&id)
            .and_then(|slot| slot.tween.as_ref())
            .is_some_and(Tween::is_active)
    }

    fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        for slot in self.slots.values_mut() {
            let Some(tween) = slot.tween.as_mut() else {
                continue;
            };
            if !tween.update(dt) {
                // 补间结束：固化终值并发送完成事件
                slot.value = tween.current_value();
                self.events.push(AnimationEvent::Completed(tween.id));
                slot.tween = None;
            }
        }

        // 返回并清空事件队列
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::EasingFunction;

    fn linear(to: f32, duration: f32) -> TweenSpec {
        TweenSpec::new(to, duration, EasingFunction::Linear)
    }

    #[test]
    fn test_register_and_value() {
        let mut system = AnimationSystem::new();
        let a = system.register(0.0);
        let b = system.register(5.0);
        assert_ne!(a, b);
        assert_eq!(system.value(a), Some(0.0));
        assert_eq!(system.value(b), Some(5.0));
        assert_eq!(system.registered_count(), 2);
    }

    #[test]
    fn test_tween_runs_to_completion() {
        let mut system = AnimationSystem::new();
        let id = system.register(0.0);
        let anim = system.start(id, linear(300.0, 1.0)).unwrap();

        let events = system.update(0.5);
        assert_eq!(events, vec![AnimationEvent::Started(anim)]);
        assert!((system.value(id).unwrap() - 150.0).abs() < 1e-3);
        assert!(system.is_animating(id));

        let events = system.update(0.5);
        assert_eq!(events, vec![AnimationEvent::Completed(anim)]);
        assert_eq!(system.value(id), Some(300.0));
        assert!(!system.is_animating(id));
        assert!(!system.has_active_animations());
    }

    #[test]
    fn test_start_supersedes_from_current_value() {
        let mut system = AnimationSystem::new();
        let id = system.register(0.0);
        let first = system.start(id, linear(80.0, 1.0)).unwrap();
        system.update(0.25);
        let halfway = system.value(id).unwrap();
        assert!((halfway - 20.0).abs() < 1e-3);

        let second = system.start(id, linear(0.0, 1.0)).unwrap();
        let events = system.update(0.0);
        assert!(events.contains(&AnimationEvent::Superseded(first)));
        assert!(events.contains(&AnimationEvent::Started(second)));

        // 新补间从 20 出发，而不是从 80 或 0
        assert!((system.value(id).unwrap() - 20.0).abs() < 1e-3);
        system.update(1.0);
        assert_eq!(system.value(id), Some(0.0));
    }

    #[test]
    fn test_set_value_cancels_tween() {
        let mut system = AnimationSystem::new();
        let id = system.register(0.0);
        let anim = system.start(id, linear(300.0, 1.0)).unwrap();
        system.update(0.3);

        system.set_value(id, 0.0).unwrap();
        assert!(!system.is_animating(id));
        assert_eq!(system.value(id), Some(0.0));

        let events = system.update(1.0);
        assert_eq!(events, vec![AnimationEvent::Superseded(anim)]);
        assert_eq!(system.value(id), Some(0.0));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut system = AnimationSystem::new();
        let id = system.register(0.0);
        let anim = system.start(id, linear(1.0, 0.0)).unwrap();
        assert_eq!(system.value(id), Some(1.0));
        assert!(!system.is_animating(id));
        assert_eq!(
            system.update(0.0),
            vec![
                AnimationEvent::Started(anim),
                AnimationEvent::Completed(anim)
            ]
        );
    }

    #[test]
    fn test_unknown_value() {
        let mut system = AnimationSystem::new();
        let id = system.register(0.0);
        system.unregister(id);
        assert_eq!(system.value(id), None);
        assert_eq!(
            system.set_value(id, 1.0),
            Err(AnimatorError::UnknownValue { id: id.value() })
        );
        assert!(system.start(id, linear(1.0, 1.0)).is_err());
    }

    #[test]
    fn test_skip_all() {
        let mut system = AnimationSystem::new();
        let a = system.register(0.0);
        let b = system.register(80.0);
        system.start(a, linear(300.0, 1.2)).unwrap();
        system.start(b, linear(0.0, 1.2)).unwrap();
        system.skip_all();
        assert_eq!(system.value(a), Some(300.0));
        assert_eq!(system.value(b), Some(0.0));
        assert!(!system.has_active_animations());
    }

    #[test]
    fn test_values_are_independent() {
        let mut system = AnimationSystem::new();
        let a = system.register(0.0);
        let b = system.register(0.0);
        system.start(a, linear(1.0, 1.0)).unwrap();
        system.update(0.5);
        assert_eq!(system.value(b), Some(0.0));
        assert!(!system.is_animating(b));
    }
}
