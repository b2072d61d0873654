//! # Tween 模块
//!
//! 单个补间动画实例定义。
//!
//! 核心设计：补间只关注 f32 值的时间轴变化，不关心值被绑定到哪个图形属性。

use serde::{Deserialize, Serialize};

use super::EasingFunction;

/// 动画 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

impl AnimationId {
    /// 创建新的动画 ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AnimationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "anim#{}", self.0)
    }
}

/// 动画状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationState {
    /// 正在播放
    #[default]
    Playing,
    /// 已完成（到达目标值）
    Completed,
    /// 被新的补间或直接赋值取代
    Superseded,
}

impl AnimationState {
    /// 是否为活跃状态（需要更新）
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// 补间参数：从当前值出发驱动到 `to`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenSpec {
    /// 目标值
    pub to: f32,
    /// 时长（秒）
    pub duration: f32,
    /// 缓动函数
    pub easing: EasingFunction,
}

impl TweenSpec {
    pub fn new(to: f32, duration: f32, easing: EasingFunction) -> Self {
        Self {
            to,
            duration: duration.max(0.0),
            easing,
        }
    }
}

/// 补间动画实例
///
/// 管理单个 f32 值从 `from` 到 `to` 在 `duration` 时间内的变化。
#[derive(Debug, Clone)]
pub struct Tween {
    /// 动画 ID
    pub id: AnimationId,
    /// 起始值
    pub from: f32,
    /// 目标值
    pub to: f32,
    /// 动画时长（秒）
    pub duration: f32,
    /// 缓动函数
    pub easing: EasingFunction,
    /// 当前状态
    pub state: AnimationState,
    /// 当前进度（已应用缓动）
    pub progress: f32,
    /// 已经过的时间
    elapsed: f32,
}

impl Tween {
    /// 创建新的补间；时长为 0 时立即完成
    pub fn new(id: AnimationId, from: f32, spec: TweenSpec) -> Self {
        let mut tween = Self {
            id,
            from,
            to: spec.to,
            duration: spec.duration.max(0.0),
            easing: spec.easing,
            state: AnimationState::Playing,
            progress: 0.0,
            elapsed: 0.0,
        };
        if tween.duration <= 0.0 {
            tween.finish();
        }
        tween
    }

    /// 推进 `dt` 秒
    ///
    /// # 返回
    /// - `true`: 动画仍在进行中
    /// - `false`: 动画已结束
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.state.is_active() {
            return false;
        }

        self.elapsed += dt.max(0.0);
        let raw_progress = self.elapsed / self.duration;
        if raw_progress >= 1.0 {
            self.finish();
            false
        } else {
            self.progress = self.easing.apply(raw_progress);
            true
        }
    }

    /// 立即跳到终点
    pub fn finish(&mut self) {
        self.progress = 1.0;
        self.state = AnimationState::Completed;
    }

    /// 标记为被取代，保持当前进度
    pub fn supersede(&mut self) {
        if self.state.is_active() {
            self.state = AnimationState::Superseded;
        }
    }

    /// 获取当前值
    ///
    /// 有界缓动下结果被限制在 `[from, to]` 区间内，消除浮点误差导致的越界。
    pub fn current_value(&self) -> f32 {
        if self.progress >= 1.0 {
            return self.to;
        }
        let value = self.from + (self.to - self.from) * self.progress;
        if self.easing.is_bounded() {
            let (lo, hi) = if self.from <= self.to {
                (self.from, self.to)
            } else {
                (self.to, self.from)
            };
            value.clamp(lo, hi)
        } else {
            value
        }
    }

    /// 是否为活跃状态
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_tween() -> Tween {
        Tween::new(
            AnimationId::new(1),
            0.0,
            TweenSpec::new(1.0, 1.0, EasingFunction::Linear),
        )
    }

    #[test]
    fn test_tween_creation() {
        let tween = create_test_tween();
        assert_eq!(tween.state, AnimationState::Playing);
        assert_eq!(tween.progress, 0.0);
        assert_eq!(tween.current_value(), 0.0);
    }

    #[test]
    fn test_tween_update() {
        let mut tween = create_test_tween();

        assert!(tween.update(0.4));
        assert!((tween.current_value() - 0.4).abs() < 1e-6);

        // 完成
        assert!(!tween.update(0.6));
        assert_eq!(tween.state, AnimationState::Completed);
        assert_eq!(tween.current_value(), 1.0);

        // 结束后不再推进
        assert!(!tween.update(1.0));
        assert_eq!(tween.current_value(), 1.0);
    }

    #[test]
    fn test_reverse_tween_stays_in_range() {
        let mut tween = Tween::new(
            AnimationId::new(2),
            80.0,
            TweenSpec::new(0.0, 1.2, EasingFunction::InOutEase),
        );
        let mut prev = tween.current_value();
        while tween.update(1.0 / 60.0) {
            let v = tween.current_value();
            assert!((0.0..=80.0).contains(&v));
            assert!(v <= prev);
            prev = v;
        }
        assert_eq!(tween.current_value(), 0.0);
    }

    #[test]
    fn test_supersede_keeps_progress() {
        let mut tween = create_test_tween();
        tween.update(0.5);
        tween.supersede();
        assert_eq!(tween.state, AnimationState::Superseded);
        assert!((tween.current_value() - 0.5).abs() < 1e-6);
        assert!(!tween.update(0.1));
    }

    #[test]
    fn test_zero_duration() {
        let tween = Tween::new(
            AnimationId::new(1),
            0.0,
            TweenSpec::new(1.0, 0.0, EasingFunction::Linear),
        );
        assert_eq!(tween.state, AnimationState::Completed);
        assert_eq!(tween.current_value(), 1.0);
    }
}
