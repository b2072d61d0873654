//! # 效果场景
//!
//! `(配置, 标量) -> Scene` 的纯函数。

use super::config::{EffectConfig, EffectKind, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::scene::{Circle, Color, Definition, Group, Rect, Scene};

const CONTENT_STROKE_WIDTH: f32 = 3.0;

/// 裁剪路径 id，按效果区分：整帧 SVG 中多个场景共享同一个 id 空间
fn clip_id(kind: EffectKind) -> String {
    format!("{}-clip", kind.key())
}

/// 遮罩 id，规则同 [`clip_id`]
fn mask_id(kind: EffectKind) -> String {
    format!("{}-mask", kind.key())
}

/// 按效果种类生成场景
pub fn render(config: &EffectConfig, scalar: f32) -> Scene {
    let scalar = config.clamp(scalar);
    match config.kind {
        EffectKind::ClipReveal => clip_reveal(scalar),
        EffectKind::MaskReveal => mask_reveal(scalar),
        EffectKind::Fade => fade(scalar),
        EffectKind::PulsatingCircle => pulsating_circle(scalar),
    }
}

fn base_scene() -> Scene {
    Scene::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT).with_fill(Color::BLUE)
}

/// 被揭示的内容：两个描边圆夹着一个矩形，填充继承场景默认色
fn content(group: Group) -> Group {
    group
        .child(Circle::new(230.0, 50.0, 30.0).stroke(Color::GREEN, CONTENT_STROKE_WIDTH))
        .child(Rect::new(50.0, 30.0, 200.0, 100.0))
        .child(Circle::new(80.0, 50.0, 30.0).stroke(Color::RED, CONTENT_STROKE_WIDTH))
}

fn clip_reveal(width: f32) -> Scene {
    let id = clip_id(EffectKind::ClipReveal);
    base_scene()
        .define(Definition::ClipPath {
            id: id.clone(),
            shapes: vec![Rect::new(0.0, 0.0, width, VIEWPORT_HEIGHT).into()],
        })
        .child(content(Group::new().clip_path(id)))
}

fn mask_reveal(width: f32) -> Scene {
    let id = mask_id(EffectKind::MaskReveal);
    base_scene()
        .define(Definition::Mask {
            id: id.clone(),
            shapes: vec![
                Rect::new(0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
                    .fill(Color::BLACK)
                    .into(),
                Rect::new(0.0, 0.0, width, VIEWPORT_HEIGHT)
                    .fill(Color::WHITE)
                    .into(),
            ],
        })
        .child(content(Group::new().mask(id)))
}

fn fade(opacity: f32) -> Scene {
    let id = mask_id(EffectKind::Fade);
    base_scene()
        .define(Definition::Mask {
            id: id.clone(),
            shapes: vec![
                Rect::new(0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
                    .fill(Color::WHITE)
                    .opacity(opacity)
                    .into(),
            ],
        })
        .child(content(Group::new().mask(id)))
}

fn pulsating_circle(radius: f32) -> Scene {
    base_scene().child(
        Group::new().child(
            Circle::new(80.0, 80.0, radius)
                .fill(Color::GREEN)
                .stroke_width(CONTENT_STROKE_WIDTH),
        ),
    )
}
