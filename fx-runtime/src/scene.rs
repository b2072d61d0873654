//! # Scene 模块
//!
//! 声明式矢量场景描述。
//!
//! 场景是纯数据：矩形、圆、分组、裁剪路径与遮罩定义。
//! 每次渲染都由效果组件重新生成，不做就地修改。
//!
//! ```text
//! Scene (viewport + 默认填充色)
//!   ├── defs: ClipPath / Mask 定义
//!   └── children: Node
//!         ├── Shape (Rect / Circle)
//!         └── Group (可引用 clip_path / mask)
//! ```

use serde::{Deserialize, Serialize};

/// RGBA 颜色（非预乘）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    /// SVG 关键字 `green`（#008000）
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 解析 `#rgb`、`#rrggbb` 或 `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();

        match digits.len() {
            3 => {
                let mut it = digits.chars().map(|c| c.to_digit(16).map(|v| (v * 17) as u8));
                Some(Self::rgb(it.next()??, it.next()??, it.next()??))
            }
            6 => Some(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            8 => Some(Self::rgba(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])?,
            )),
            _ => None,
        }
    }

    /// `#rrggbb` 形式（忽略 alpha）
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// alpha 通道（0.0 - 1.0）
    pub fn alpha(&self) -> f32 {
        self.a as f32 / 255.0
    }

    /// 亮度（0.0 - 1.0），用于亮度遮罩
    pub fn luminance(&self) -> f32 {
        (0.2125 * self.r as f32 + 0.7154 * self.g as f32 + 0.0721 * self.b as f32) / 255.0
    }
}

/// 轴对齐矩形区域
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// 点是否落在区域内（左闭右开）
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// 求交集；不相交时返回 `None`
    pub fn intersect(&self, other: &Bounds) -> Option<Bounds> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let bounds = Bounds::new(x, y, right - x, bottom - y);
        (!bounds.is_empty()).then_some(bounds)
    }
}

/// 填充与描边
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    /// 填充色；`None` 表示继承场景默认填充
    pub fill: Option<Color>,
    /// 描边色；`None` 表示不描边
    pub stroke: Option<Color>,
    /// 描边宽度
    pub stroke_width: f32,
    /// 不透明度（0.0 - 1.0）
    pub opacity: f32,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
        }
    }
}

/// 矩形
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub paint: Paint,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
            paint: Paint::default(),
        }
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.paint.fill = Some(color);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.paint.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

/// 圆
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
    pub paint: Paint,
}

impl Circle {
    pub fn new(cx: f32, cy: f32, r: f32) -> Self {
        Self {
            cx,
            cy,
            r: r.max(0.0),
            paint: Paint::default(),
        }
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.paint.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Color, width: f32) -> Self {
        self.paint.stroke = Some(color);
        self.paint.stroke_width = width;
        self
    }

    /// 只设置描边宽度，不设置描边色（此时不绘制描边）
    pub fn stroke_width(mut self, width: f32) -> Self {
        self.paint.stroke_width = width;
        self
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.cx - self.r, self.cy - self.r, self.r * 2.0, self.r * 2.0)
    }
}

/// 基本图形
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rect(Rect),
    Circle(Circle),
}

impl Shape {
    pub fn paint(&self) -> &Paint {
        match self {
            Shape::Rect(rect) => &rect.paint,
            Shape::Circle(circle) => &circle.paint,
        }
    }

    /// 几何包围盒（不含描边）
    pub fn bounds(&self) -> Bounds {
        match self {
            Shape::Rect(rect) => rect.bounds(),
            Shape::Circle(circle) => circle.bounds(),
        }
    }
}

impl From<Rect> for Shape {
    fn from(rect: Rect) -> Self {
        Shape::Rect(rect)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

/// 分组
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// 引用的裁剪路径 ID
    pub clip_path: Option<String>,
    /// 引用的遮罩 ID
    pub mask: Option<String>,
    pub children: Vec<Node>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clip_path(mut self, id: impl Into<String>) -> Self {
        self.clip_path = Some(id.into());
        self
    }

    pub fn mask(mut self, id: impl Into<String>) -> Self {
        self.mask = Some(id.into());
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }
}

/// 场景节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Shape(Shape),
    Group(Group),
}

impl From<Shape> for Node {
    fn from(shape: Shape) -> Self {
        Node::Shape(shape)
    }
}

impl From<Rect> for Node {
    fn from(rect: Rect) -> Self {
        Node::Shape(Shape::Rect(rect))
    }
}

impl From<Circle> for Node {
    fn from(circle: Circle) -> Self {
        Node::Shape(Shape::Circle(circle))
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

/// 可被分组引用的定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Definition {
    /// 裁剪路径：图形的并集决定可见区域
    ClipPath { id: String, shapes: Vec<Shape> },
    /// 亮度遮罩：图形的亮度 × 不透明度决定逐像素可见度
    Mask { id: String, shapes: Vec<Shape> },
}

impl Definition {
    pub fn id(&self) -> &str {
        match self {
            Definition::ClipPath { id, .. } | Definition::Mask { id, .. } => id,
        }
    }
}

/// 完整场景
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    /// 图形未指定填充时使用的默认填充色
    pub fill: Color,
    pub defs: Vec<Definition>,
    pub children: Vec<Node>,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            fill: Color::BLACK,
            defs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn define(mut self, definition: Definition) -> Self {
        self.defs.push(definition);
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn viewport(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }

    /// 按 ID 查找定义
    pub fn definition(&self, id: &str) -> Option<&Definition> {
        self.defs.iter().find(|def| def.id() == id)
    }

    /// 解析图形的实际填充色
    pub fn resolve_fill(&self, paint: &Paint) -> Color {
        paint.fill.unwrap_or(self.fill)
    }
}
