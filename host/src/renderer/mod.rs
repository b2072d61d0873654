//! # Renderer 模块
//!
//! 把 [`DisplayList`] 转换为 egui 图形并绘制。
//!
//! egui 只支持矩形裁剪，每个绘制项都带一个覆盖区域，
//! 因此每个图形都配一个独立的裁剪矩形，并按覆盖区域的不透明度调整颜色。

use egui::{Color32, Pos2, Rect, Shape, Stroke, StrokeKind, Vec2};
use fx_runtime::render::{DrawItem, Primitive};
use fx_runtime::{Bounds, DisplayList};

use crate::ui::theme::to_color32;

/// 一次绘制操作：在 `clip` 内绘制 `shape`
#[derive(Debug, Clone, PartialEq)]
pub struct PaintOp {
    pub clip: Rect,
    pub shape: Shape,
}

fn to_rect(bounds: &Bounds, origin: Pos2) -> Rect {
    Rect::from_min_size(
        origin + Vec2::new(bounds.x, bounds.y),
        Vec2::new(bounds.width, bounds.height),
    )
}

fn faded(color: fx_runtime::Color, alpha: f32) -> Color32 {
    to_color32(color).gamma_multiply(alpha)
}

fn item_shapes(item: &DrawItem, origin: Pos2) -> Vec<Shape> {
    let alpha = item.alpha;
    match item.primitive {
        Primitive::Rect {
            bounds,
            fill,
            stroke,
        } => {
            let rect = to_rect(&bounds, origin);
            let mut shapes = vec![Shape::rect_filled(rect, 0.0, faded(fill, alpha))];
            if let Some(stroke) = stroke {
                shapes.push(Shape::rect_stroke(
                    rect,
                    0.0,
                    Stroke::new(stroke.width, faded(stroke.color, alpha)),
                    StrokeKind::Middle,
                ));
            }
            shapes
        }
        Primitive::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
        } => {
            let center = origin + Vec2::new(cx, cy);
            let mut shapes = vec![Shape::circle_filled(center, r, faded(fill, alpha))];
            if let Some(stroke) = stroke {
                shapes.push(Shape::circle_stroke(
                    center,
                    r,
                    Stroke::new(stroke.width, faded(stroke.color, alpha)),
                ));
            }
            shapes
        }
    }
}

/// 展开为绘制操作，`origin` 为场景左上角在屏幕上的位置
pub fn paint_ops(list: &DisplayList, origin: Pos2) -> Vec<PaintOp> {
    list.items
        .iter()
        .flat_map(|item| {
            let clip = to_rect(&item.region, origin);
            item_shapes(item, origin)
                .into_iter()
                .map(move |shape| PaintOp { clip, shape })
        })
        .collect()
}

/// 绘制场景，结果限制在 painter 当前的裁剪区域内
pub fn paint_display_list(painter: &egui::Painter, origin: Pos2, list: &DisplayList) {
    let outer = painter.clip_rect();
    for op in paint_ops(list, origin) {
        let clip = op.clip.intersect(outer);
        if clip.is_positive() {
            painter.with_clip_rect(clip).add(op.shape);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_runtime::effect::render;
    use fx_runtime::{EffectConfig, EffectKind};

    #[test]
    fn test_hidden_clip_reveal_paints_nothing() {
        let scene = render(&EffectConfig::preset(EffectKind::ClipReveal), 0.0);
        let ops = paint_ops(&DisplayList::from_scene(&scene), Pos2::ZERO);
        assert!(ops.is_empty());
    }

    #[test]
    fn test_clip_region_offset_by_origin() {
        let scene = render(&EffectConfig::preset(EffectKind::ClipReveal), 150.0);
        let ops = paint_ops(&DisplayList::from_scene(&scene), Pos2::new(10.0, 20.0));
        assert!(!ops.is_empty());
        for op in &ops {
            assert!(op.clip.min.x >= 10.0);
            assert!(op.clip.max.x <= 160.0 + 1e-3);
            assert!(op.clip.min.y >= 20.0);
        }
    }

    #[test]
    fn test_pulsating_circle_shapes() {
        let scene = render(&EffectConfig::preset(EffectKind::PulsatingCircle), 40.0);
        let ops = paint_ops(&DisplayList::from_scene(&scene), Pos2::ZERO);
        // 只填充，没有描边色
        assert_eq!(ops.len(), 1);
        match &ops[0].shape {
            Shape::Circle(circle) => {
                assert_eq!(circle.center, Pos2::new(80.0, 80.0));
                assert_eq!(circle.radius, 40.0);
                assert_eq!(circle.fill, Color32::from_rgb(0, 128, 0));
            }
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn test_fade_scales_alpha() {
        let scene = render(&EffectConfig::preset(EffectKind::Fade), 0.5);
        let ops = paint_ops(&DisplayList::from_scene(&scene), Pos2::ZERO);
        assert!(!ops.is_empty());
        for op in &ops {
            if let Shape::Rect(rect) = &op.shape
                && rect.fill != Color32::TRANSPARENT
            {
                assert!(rect.fill.a() < 255);
            }
        }
    }
}
