//! # Display List
//!
//! 把 [`Scene`] 展平为按绘制顺序排列的图元列表。
//!
//! 宿主绘制后端只支持矩形裁剪，因此裁剪路径与亮度遮罩在这里被解析为
//! 一组互不重叠的轴对齐覆盖区域（`CoverageRegion`），每个区域带一个不透明度。
//!
//! ## 解析方式
//!
//! 收集所有相关图形包围盒的边，把画布切成网格；在每个格子中心求值，
//! 再把同一行内值相同的相邻格子合并。对轴对齐矩形结果是精确的，
//! 圆形按包围盒参与计算。

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::scene::{Bounds, Color, Definition, Node, Scene, Shape};

const EPSILON: f32 = 1e-4;

/// 覆盖区域：区域内内容以 `alpha` 的不透明度可见
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageRegion {
    pub bounds: Bounds,
    pub alpha: f32,
}

/// 描边
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// 已解析颜色的图元
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Rect {
        bounds: Bounds,
        fill: Color,
        stroke: Option<Stroke>,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Color,
        stroke: Option<Stroke>,
    },
}

impl Primitive {
    fn from_shape(shape: &Shape, scene: &Scene) -> Option<Self> {
        let paint = shape.paint();
        let fill = scene.resolve_fill(paint);
        let stroke = paint.stroke.map(|color| Stroke {
            color,
            width: paint.stroke_width,
        });

        match shape {
            Shape::Rect(rect) => {
                let bounds = rect.bounds();
                (!bounds.is_empty()).then_some(Primitive::Rect {
                    bounds,
                    fill,
                    stroke,
                })
            }
            Shape::Circle(circle) => (circle.r > 0.0).then_some(Primitive::Circle {
                cx: circle.cx,
                cy: circle.cy,
                r: circle.r,
                fill,
                stroke,
            }),
        }
    }
}

/// 单个绘制项：图元只在 `region` 内以 `alpha` 可见
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    pub primitive: Primitive,
    pub region: Bounds,
    pub alpha: f32,
}

/// 展平后的绘制列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    pub width: f32,
    pub height: f32,
    pub items: Vec<DrawItem>,
}

impl DisplayList {
    /// 展平场景
    pub fn from_scene(scene: &Scene) -> Self {
        let root = vec![CoverageRegion {
            bounds: scene.viewport(),
            alpha: 1.0,
        }];
        let mut items = Vec::new();
        for node in &scene.children {
            visit(scene, node, &root, &mut items);
        }
        Self {
            width: scene.width,
            height: scene.height,
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn visit(scene: &Scene, node: &Node, coverage: &[CoverageRegion], out: &mut Vec<DrawItem>) {
    match node {
        Node::Shape(shape) => {
            let Some(primitive) = Primitive::from_shape(shape, scene) else {
                return;
            };
            let opacity = shape.paint().opacity;
            for region in coverage {
                let alpha = region.alpha * opacity;
                if alpha > 0.0 {
                    out.push(DrawItem {
                        primitive,
                        region: region.bounds,
                        alpha,
                    });
                }
            }
        }
        Node::Group(group) => {
            let mut coverage = coverage.to_vec();
            if let Some(id) = &group.clip_path {
                coverage = apply_reference(scene, id, coverage);
            }
            if let Some(id) = &group.mask {
                coverage = apply_reference(scene, id, coverage);
            }
            if coverage.is_empty() {
                return;
            }
            for child in &group.children {
                visit(scene, child, &coverage, out);
            }
        }
    }
}

fn apply_reference(scene: &Scene, id: &str, coverage: Vec<CoverageRegion>) -> Vec<CoverageRegion> {
    let resolved = match scene.definition(id) {
        Some(Definition::ClipPath { shapes, .. }) => resolve_clip(scene.viewport(), shapes),
        Some(Definition::Mask { shapes, .. }) => resolve_mask(scene, shapes),
        None => {
            warn!(id, "引用的定义不存在，忽略");
            return coverage;
        }
    };
    intersect(&coverage, &resolved)
}

/// 解析裁剪路径：图形并集内可见度为 1
pub fn resolve_clip(viewport: Bounds, shapes: &[Shape]) -> Vec<CoverageRegion> {
    let boxes: Vec<Bounds> = shapes
        .iter()
        .map(Shape::bounds)
        .filter(|b| !b.is_empty())
        .collect();

    decompose(viewport, &boxes, |x, y| {
        if boxes.iter().any(|b| b.contains(x, y)) {
            1.0
        } else {
            0.0
        }
    })
}

/// 解析亮度遮罩：可见度 = 遮罩内容合成后的亮度 × 不透明度
pub fn resolve_mask(scene: &Scene, shapes: &[Shape]) -> Vec<CoverageRegion> {
    let layers: Vec<(Bounds, f32, f32)> = shapes
        .iter()
        .filter_map(|shape| {
            let bounds = shape.bounds();
            if bounds.is_empty() {
                return None;
            }
            let paint = shape.paint();
            let fill = scene.resolve_fill(paint);
            let alpha = fill.alpha() * paint.opacity;
            Some((bounds, fill.luminance(), alpha))
        })
        .collect();
    let boxes: Vec<Bounds> = layers.iter().map(|(b, _, _)| *b).collect();

    decompose(scene.viewport(), &boxes, |x, y| {
        // 预乘亮度做 source-over 合成，初始为透明黑
        layers
            .iter()
            .filter(|(bounds, _, _)| bounds.contains(x, y))
            .fold(0.0, |acc, (_, luminance, alpha)| {
                luminance * alpha + acc * (1.0 - alpha)
            })
    })
}

/// 两组覆盖区域求交，不透明度相乘
pub fn intersect(a: &[CoverageRegion], b: &[CoverageRegion]) -> Vec<CoverageRegion> {
    let mut out = Vec::new();
    for ra in a {
        for rb in b {
            let alpha = ra.alpha * rb.alpha;
            if alpha <= 0.0 {
                continue;
            }
            if let Some(bounds) = ra.bounds.intersect(&rb.bounds) {
                out.push(CoverageRegion { bounds, alpha });
            }
        }
    }
    out
}

fn edges(lo: f32, hi: f32, extra: impl Iterator<Item = f32>) -> Vec<f32> {
    let mut edges: Vec<f32> = std::iter::once(lo)
        .chain(std::iter::once(hi))
        .chain(extra.map(|v| v.clamp(lo, hi)))
        .collect();
    edges.sort_by(f32::total_cmp);
    edges.dedup_by(|a, b| (*a - *b).abs() < EPSILON);
    edges
}

/// 网格分解：在每个格子中心求值，行内合并相同值
fn decompose(
    viewport: Bounds,
    boxes: &[Bounds],
    eval: impl Fn(f32, f32) -> f32,
) -> Vec<CoverageRegion> {
    let xs = edges(
        viewport.x,
        viewport.right(),
        boxes.iter().flat_map(|b| [b.x, b.right()]),
    );
    let ys = edges(
        viewport.y,
        viewport.bottom(),
        boxes.iter().flat_map(|b| [b.y, b.bottom()]),
    );

    let mut regions = Vec::new();
    for row in ys.windows(2) {
        let (top, bottom) = (row[0], row[1]);
        let cy = (top + bottom) / 2.0;

        let mut run: Option<(f32, f32, f32)> = None;
        for col in xs.windows(2) {
            let (left, right) = (col[0], col[1]);
            let value = eval((left + right) / 2.0, cy).clamp(0.0, 1.0);

            run = match run {
                Some((start, _, current)) if (current - value).abs() < EPSILON => {
                    Some((start, right, current))
                }
                Some(done) => {
                    push_run(&mut regions, done, top, bottom);
                    Some((left, right, value))
                }
                None => Some((left, right, value)),
            };
        }
        if let Some(done) = run {
            push_run(&mut regions, done, top, bottom);
        }
    }
    regions
}

fn push_run(regions: &mut Vec<CoverageRegion>, run: (f32, f32, f32), top: f32, bottom: f32) {
    let (left, right, alpha) = run;
    if alpha > 0.0 {
        regions.push(CoverageRegion {
            bounds: Bounds::new(left, top, right - left, bottom - top),
            alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{EffectConfig, EffectKind, render};
    use crate::scene::{Circle, Group, Rect};

    fn list(kind: EffectKind, scalar: f32) -> DisplayList {
        DisplayList::from_scene(&render(&EffectConfig::preset(kind), scalar))
    }

    #[test]
    fn test_clip_reveal_at_rest_draws_nothing() {
        assert!(list(EffectKind::ClipReveal, 0.0).is_empty());
    }

    #[test]
    fn test_clip_reveal_partial() {
        let display = list(EffectKind::ClipReveal, 150.0);
        assert_eq!(display.items.len(), 3);
        for item in &display.items {
            assert_eq!(item.region, Bounds::new(0.0, 0.0, 150.0, 140.0));
            assert_eq!(item.alpha, 1.0);
        }
        // 内容继承蓝色填充
        assert!(matches!(
            display.items[1].primitive,
            Primitive::Rect { fill: Color::BLUE, .. }
        ));
    }

    #[test]
    fn test_mask_reveal_matches_clip_reveal() {
        for width in [0.0, 75.0, 300.0] {
            let clip = list(EffectKind::ClipReveal, width);
            let mask = list(EffectKind::MaskReveal, width);
            assert_eq!(clip.items.len(), mask.items.len(), "width {width}");
            for (c, m) in clip.items.iter().zip(&mask.items) {
                assert_eq!(c.region, m.region);
                assert!((c.alpha - m.alpha).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_fade_uses_mask_opacity() {
        let display = list(EffectKind::Fade, 0.25);
        assert_eq!(display.items.len(), 3);
        for item in &display.items {
            assert_eq!(item.region, Bounds::new(0.0, 0.0, 300.0, 140.0));
            assert!((item.alpha - 0.25).abs() < 1e-4);
        }
        assert!(list(EffectKind::Fade, 0.0).is_empty());
    }

    #[test]
    fn test_pulsating_circle() {
        assert!(list(EffectKind::PulsatingCircle, 0.0).is_empty());
        let display = list(EffectKind::PulsatingCircle, 40.0);
        assert_eq!(display.items.len(), 1);
        assert!(matches!(
            display.items[0].primitive,
            Primitive::Circle {
                r,
                fill: Color::GREEN,
                stroke: None,
                ..
            } if r == 40.0
        ));
    }

    #[test]
    fn test_overlapping_clip_shapes_do_not_double_cover() {
        let viewport = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let shapes: Vec<Shape> = vec![
            Rect::new(0.0, 0.0, 60.0, 100.0).into(),
            Rect::new(40.0, 0.0, 60.0, 100.0).into(),
        ];
        let regions = resolve_clip(viewport, &shapes);
        // 同一行内相邻格子被合并为一个区域
        assert_eq!(
            regions,
            vec![CoverageRegion {
                bounds: viewport,
                alpha: 1.0
            }]
        );
    }

    #[test]
    fn test_missing_reference_is_ignored() {
        let scene = Scene::new(100.0, 100.0)
            .child(Group::new().mask("nope").child(Circle::new(50.0, 50.0, 10.0)));
        let display = DisplayList::from_scene(&scene);
        assert_eq!(display.items.len(), 1);
        assert_eq!(display.items[0].region, scene.viewport());
    }

    #[test]
    fn test_intersect_multiplies_alpha() {
        let a = [CoverageRegion {
            bounds: Bounds::new(0.0, 0.0, 10.0, 10.0),
            alpha: 0.5,
        }];
        let b = [CoverageRegion {
            bounds: Bounds::new(5.0, 0.0, 10.0, 10.0),
            alpha: 0.5,
        }];
        let out = intersect(&a, &b);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].bounds, Bounds::new(5.0, 0.0, 5.0, 10.0));
        assert_eq!(out[0].alpha, 0.25);
    }
}
