//! # SVG 导出
//!
//! 把 [`Scene`] 与整帧 [`ShellFrame`] 序列化为 SVG 1.1 文本。
//! 裁剪路径与遮罩原样输出为 `<clipPath>` / `<mask>`，交给查看器光栅化。

use crate::scene::{Color, Definition, Group, Node, Paint, Scene, Shape};
use crate::shell::{Palette, ShellFrame};

/// 整帧布局参数
pub mod layout {
    /// 外边距
    pub const PADDING: f32 = 16.0;
    /// 状态栏高度
    pub const STATUS_BAR_HEIGHT: f32 = 24.0;
    /// 标题行高度
    pub const TITLE_HEIGHT: f32 = 22.0;
    /// 按钮高度
    pub const BUTTON_HEIGHT: f32 = 36.0;
    /// 面板之间的间距
    pub const PANEL_GAP: f32 = 12.0;
}

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// 格式化数值：整数不带小数点，其余最多保留三位小数
fn num(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let text = format!("{value:.3}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn paint_attrs(paint: &Paint) -> String {
    let mut attrs = String::new();
    if let Some(fill) = paint.fill {
        attrs.push_str(&format!(" fill=\"{}\"", fill.to_hex()));
        if fill.a < 255 {
            attrs.push_str(&format!(" fill-opacity=\"{}\"", num(fill.alpha())));
        }
    }
    if let Some(stroke) = paint.stroke {
        attrs.push_str(&format!(" stroke=\"{}\"", stroke.to_hex()));
    }
    if paint.stroke.is_some() || paint.stroke_width != 1.0 {
        attrs.push_str(&format!(" stroke-width=\"{}\"", num(paint.stroke_width)));
    }
    if paint.opacity < 1.0 {
        attrs.push_str(&format!(" opacity=\"{}\"", num(paint.opacity)));
    }
    attrs
}

fn write_shape(out: &mut String, shape: &Shape, indent: usize) {
    let pad = "  ".repeat(indent);
    match shape {
        Shape::Rect(rect) => out.push_str(&format!(
            "{pad}<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}/>\n",
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            paint_attrs(&rect.paint)
        )),
        Shape::Circle(circle) => out.push_str(&format!(
            "{pad}<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>\n",
            num(circle.cx),
            num(circle.cy),
            num(circle.r),
            paint_attrs(&circle.paint)
        )),
    }
}

fn write_group(out: &mut String, group: &Group, indent: usize) {
    let pad = "  ".repeat(indent);
    let mut attrs = String::new();
    if let Some(id) = &group.clip_path {
        attrs.push_str(&format!(" clip-path=\"url(#{})\"", escape(id)));
    }
    if let Some(id) = &group.mask {
        attrs.push_str(&format!(" mask=\"url(#{})\"", escape(id)));
    }
    out.push_str(&format!("{pad}<g{attrs}>\n"));
    for child in &group.children {
        write_node(out, child, indent + 1);
    }
    out.push_str(&format!("{pad}</g>\n"));
}

fn write_node(out: &mut String, node: &Node, indent: usize) {
    match node {
        Node::Shape(shape) => write_shape(out, shape, indent),
        Node::Group(group) => write_group(out, group, indent),
    }
}

fn write_defs(out: &mut String, defs: &[Definition], indent: usize) {
    if defs.is_empty() {
        return;
    }
    let pad = "  ".repeat(indent);
    out.push_str(&format!("{pad}<defs>\n"));
    for def in defs {
        let (tag, id, shapes) = match def {
            Definition::ClipPath { id, shapes } => ("clipPath", id, shapes),
            Definition::Mask { id, shapes } => ("mask", id, shapes),
        };
        out.push_str(&format!("{pad}  <{tag} id=\"{}\">\n", escape(id)));
        for shape in shapes {
            write_shape(out, shape, indent + 2);
        }
        out.push_str(&format!("{pad}  </{tag}>\n"));
    }
    out.push_str(&format!("{pad}</defs>\n"));
}

/// 写出场景本体（`<svg>` 元素），`origin` 为嵌套时的位置
fn write_scene(out: &mut String, scene: &Scene, origin: Option<(f32, f32)>, indent: usize) {
    let pad = "  ".repeat(indent);
    let (w, h) = (num(scene.width), num(scene.height));
    let position = match origin {
        Some((x, y)) => format!(" x=\"{}\" y=\"{}\"", num(x), num(y)),
        None => format!(" xmlns=\"{SVG_NS}\""),
    };
    out.push_str(&format!(
        "{pad}<svg{position} width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" fill=\"{}\">\n",
        scene.fill.to_hex()
    ));
    write_defs(out, &scene.defs, indent + 1);
    for node in &scene.children {
        write_node(out, node, indent + 1);
    }
    out.push_str(&format!("{pad}</svg>\n"));
}

/// 单个场景的独立 SVG 文档
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    write_scene(&mut out, scene, None, 0);
    out
}

fn text(out: &mut String, x: f32, y: f32, color: Color, size: f32, anchor: &str, content: &str) {
    out.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" fill=\"{}\" font-family=\"sans-serif\" font-size=\"{}\" text-anchor=\"{anchor}\">{}</text>\n",
        num(x),
        num(y),
        color.to_hex(),
        num(size),
        escape(content)
    ));
}

/// 整帧尺寸 `(宽, 高)`
pub fn frame_size(frame: &ShellFrame) -> (f32, f32) {
    use layout::*;

    let content_width = frame
        .panels
        .iter()
        .map(|panel| panel.scene.width)
        .fold(0.0, f32::max);
    let panels_height: f32 = frame
        .panels
        .iter()
        .map(|panel| TITLE_HEIGHT + panel.scene.height + BUTTON_HEIGHT + PANEL_GAP)
        .sum();
    (
        content_width + PADDING * 2.0,
        STATUS_BAR_HEIGHT + PADDING + panels_height,
    )
}

/// 整帧 SVG：状态栏、各面板标题、场景与切换按钮自上而下排列
pub fn frame_to_svg(frame: &ShellFrame) -> String {
    use layout::*;

    let (width, height) = frame_size(frame);
    let appearance = &frame.appearance;
    let mut out = String::new();

    out.push_str(&format!(
        "<svg xmlns=\"{SVG_NS}\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = num(width),
        h = num(height)
    ));
    out.push_str(&format!(
        "  <rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
        num(width),
        num(height),
        appearance.background.to_hex()
    ));

    // 状态栏与背景同色，只有文字颜色随样式变化
    text(
        &mut out,
        PADDING,
        STATUS_BAR_HEIGHT - 7.0,
        appearance.status_bar.content_color(),
        12.0,
        "start",
        "fx showcase",
    );

    let mut y = STATUS_BAR_HEIGHT + PADDING;
    for panel in &frame.panels {
        text(
            &mut out,
            PADDING,
            y + TITLE_HEIGHT - 6.0,
            appearance.foreground,
            14.0,
            "start",
            &panel.title,
        );
        y += TITLE_HEIGHT;

        write_scene(&mut out, &panel.scene, Some((PADDING, y)), 1);
        y += panel.scene.height;

        let button_width = panel.scene.width;
        out.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"2\" fill=\"{}\"/>\n",
            num(PADDING),
            num(y + 2.0),
            num(button_width),
            num(BUTTON_HEIGHT - 4.0),
            Palette::PRIMARY.to_hex()
        ));
        text(
            &mut out,
            PADDING + button_width / 2.0,
            y + BUTTON_HEIGHT / 2.0 + 5.0,
            Palette::WHITE,
            14.0,
            "middle",
            &panel.button_label.to_uppercase(),
        );
        y += BUTTON_HEIGHT + PANEL_GAP;
    }

    out.push_str("</svg>\n");
    out
}
