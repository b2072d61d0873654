//! # Easing 模块
//!
//! 缓动函数库，用于动画的时间插值。

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// 线性（匀速）
    Linear,
    /// 标准 ease 曲线：`cubic-bezier(0.42, 0, 1, 1)`
    Ease,
    /// ease 曲线的对称缓入缓出版本（前半段 ease，后半段镜像）
    #[default]
    InOutEase,
    /// 二次缓入
    EaseInQuad,
    /// 二次缓出
    EaseOutQuad,
    /// 二次缓入缓出
    EaseInOutQuad,
    /// 三次缓入
    EaseInCubic,
    /// 三次缓出
    EaseOutCubic,
    /// 三次缓入缓出
    EaseInOutCubic,
    /// 正弦缓入
    EaseInSine,
    /// 正弦缓出
    EaseOutSine,
    /// 正弦缓入缓出
    EaseInOutSine,
    /// 弹性缓出（会超出 1.0）
    EaseOutElastic,
    /// 弹跳缓出
    EaseOutBounce,
    /// 任意三次贝塞尔曲线
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl EasingFunction {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)
    ///
    /// # 返回
    /// - 缓动后的进度值；除 `EaseOutElastic` 与自定义贝塞尔外都落在 0.0 - 1.0
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            EasingFunction::Linear => t,
            EasingFunction::Ease => CubicBezier::EASE.solve(t),
            EasingFunction::InOutEase => in_out(t, |x| CubicBezier::EASE.solve(x)),
            EasingFunction::EaseInQuad => t * t,
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::EaseInCubic => t * t * t,
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            EasingFunction::EaseOutSine => (t * PI / 2.0).sin(),
            EasingFunction::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            EasingFunction::EaseOutElastic => ease_out_elastic(t),
            EasingFunction::EaseOutBounce => ease_out_bounce(t),
            EasingFunction::CubicBezier { x1, y1, x2, y2 } => {
                CubicBezier::new(x1, y1, x2, y2).solve(t)
            }
        }
    }

    /// 输出是否保证落在 [0, 1] 内（不会过冲）
    pub fn is_bounded(&self) -> bool {
        match *self {
            EasingFunction::EaseOutElastic => false,
            EasingFunction::CubicBezier { y1, y2, .. } => {
                (0.0..=1.0).contains(&y1) && (0.0..=1.0).contains(&y2)
            }
            _ => true,
        }
    }
}

/// 把一个缓入曲线组合成对称的缓入缓出曲线
fn in_out(t: f32, ease: impl Fn(f32) -> f32) -> f32 {
    if t < 0.5 {
        ease(t * 2.0) / 2.0
    } else {
        1.0 - ease((1.0 - t) * 2.0) / 2.0
    }
}

/// 三次贝塞尔缓动曲线
///
/// 端点固定为 (0,0) 与 (1,1)，控制点为 (x1,y1) 与 (x2,y2)。
/// x 分量必须在 [0,1] 内，才能保证曲线对时间单调。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    ax: f32,
    bx: f32,
    cx: f32,
    ay: f32,
    by: f32,
    cy: f32,
}

impl CubicBezier {
    /// 标准 ease 曲线
    pub const EASE: CubicBezier = CubicBezier::new(0.42, 0.0, 1.0, 1.0);

    const NEWTON_ITERATIONS: usize = 8;
    const EPSILON: f32 = 1e-6;

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    fn sample_x(&self, t: f32) -> f32 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f32) -> f32 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn slope_x(&self, t: f32) -> f32 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// 由时间进度 x 反解曲线参数 t
    fn solve_t(&self, x: f32) -> f32 {
        // 先用牛顿迭代，导数过小时退回二分
        let mut t = x;
        for _ in 0..Self::NEWTON_ITERATIONS {
            let err = self.sample_x(t) - x;
            if err.abs() < Self::EPSILON {
                return t;
            }
            let slope = self.slope_x(t);
            if slope.abs() < Self::EPSILON {
                break;
            }
            t -= err / slope;
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = x;
        while hi - lo > Self::EPSILON {
            let value = self.sample_x(t);
            if (value - x).abs() < Self::EPSILON {
                return t;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    /// 计算时间进度 x 对应的缓动值
    pub fn solve(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        self.sample_y(self.solve_t(x))
    }
}

/// 弹性缓出
fn ease_out_elastic(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        let c4 = (2.0 * PI) / 3.0;
        2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
    }
}

/// 弹跳缓出
fn ease_out_bounce(t: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        let easing = EasingFunction::Linear;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(0.5), 0.5);
        assert_eq!(easing.apply(1.0), 1.0);
    }

    #[test]
    fn test_in_out_ease_is_default() {
        assert_eq!(EasingFunction::default(), EasingFunction::InOutEase);
    }

    #[test]
    fn test_in_out_ease_symmetry() {
        let easing = EasingFunction::InOutEase;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
        // 中点应该是 0.5
        assert!((easing.apply(0.5) - 0.5).abs() < 1e-3);
        // 关于中点对称
        for i in 1..10 {
            let t = i as f32 / 20.0;
            let a = easing.apply(t);
            let b = easing.apply(1.0 - t);
            assert!((a + b - 1.0).abs() < 1e-3, "t={t}: {a} + {b}");
        }
    }

    #[test]
    fn test_ease_starts_slow() {
        // ease 曲线开头慢于线性
        let v = EasingFunction::Ease.apply(0.1);
        assert!(v < 0.1);
        assert!(v > 0.0);
    }

    #[test]
    fn test_bounded_curves_are_monotonic() {
        let curves = [
            EasingFunction::Linear,
            EasingFunction::Ease,
            EasingFunction::InOutEase,
            EasingFunction::EaseInOutQuad,
            EasingFunction::EaseInOutCubic,
            EasingFunction::EaseInOutSine,
        ];
        for easing in curves {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!((0.0..=1.0).contains(&v), "{easing:?} out of range: {v}");
                assert!(v + 1e-4 >= prev, "{easing:?} not monotonic at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_clamp() {
        let easing = EasingFunction::Linear;
        // 超出范围应该被限制
        assert_eq!(easing.apply(-0.5), 0.0);
        assert_eq!(easing.apply(1.5), 1.0);
    }

    #[test]
    fn test_cubic_bezier_linear_control_points() {
        let easing = EasingFunction::CubicBezier {
            x1: 0.25,
            y1: 0.25,
            x2: 0.75,
            y2: 0.75,
        };
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((easing.apply(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn test_boundedness() {
        assert!(EasingFunction::InOutEase.is_bounded());
        assert!(!EasingFunction::EaseOutElastic.is_bounded());
        let overshoot = EasingFunction::CubicBezier {
            x1: 0.3,
            y1: -0.5,
            x2: 0.7,
            y2: 1.5,
        };
        assert!(!overshoot.is_bounded());
    }

    #[test]
    fn test_ease_out_bounce() {
        let easing = EasingFunction::EaseOutBounce;
        assert_eq!(easing.apply(0.0), 0.0);
        assert!((easing.apply(1.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&EasingFunction::InOutEase).unwrap();
        assert_eq!(json, "\"in_out_ease\"");
        let parsed: EasingFunction = serde_json::from_str("\"ease_out_cubic\"").unwrap();
        assert_eq!(parsed, EasingFunction::EaseOutCubic);
    }
}
