//! # Render 模块
//!
//! 场景的两种输出后端：
//!
//! - [`svg`]：序列化为 SVG 文本（无窗口运行、画廊导出）
//! - [`display_list`]：展平为带矩形覆盖区域的图元列表（窗口绘制）

pub mod display_list;
pub mod svg;

pub use display_list::{
    CoverageRegion, DisplayList, DrawItem, Primitive, Stroke, intersect, resolve_clip,
    resolve_mask,
};
pub use svg::{frame_size, frame_to_svg, scene_to_svg};
