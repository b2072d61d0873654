//! # UI 主题
//!
//! 由 [`Appearance`] 推导出 egui 使用的颜色、字号与间距。

use egui::Color32;
use fx_runtime::{Appearance, Color, ColorScheme, Palette};

/// 运行时颜色转为 egui 颜色
pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// UI 主题配置
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // ===== 颜色 =====
    /// 主背景色
    pub bg_primary: Color32,
    /// 主文字色
    pub text_primary: Color32,
    /// 状态栏文字色
    pub status_text: Color32,
    /// 按钮背景
    pub button_bg: Color32,
    /// 按钮文字
    pub button_text: Color32,

    // ===== 尺寸 =====
    /// 标题字号
    pub font_size_title: f32,
    /// 状态栏字号
    pub font_size_small: f32,
    /// 状态栏高度
    pub status_bar_height: f32,
    /// 按钮高度
    pub button_height: f32,
    /// 面板之间的间距
    pub spacing: f32,
    /// 内边距
    pub padding: f32,
}

impl Theme {
    pub fn for_appearance(appearance: &Appearance) -> Self {
        Self {
            bg_primary: to_color32(appearance.background),
            text_primary: to_color32(appearance.foreground),
            status_text: to_color32(appearance.status_bar.content_color()),
            button_bg: to_color32(Palette::PRIMARY),
            button_text: Color32::WHITE,

            font_size_title: 16.0,
            font_size_small: 12.0,
            status_bar_height: 24.0,
            button_height: 32.0,
            spacing: 12.0,
            padding: 16.0,
        }
    }

    /// 应用到 egui 上下文（面板底色与默认文字色）
    pub fn apply(&self, ctx: &egui::Context, scheme: ColorScheme) {
        let mut visuals = match scheme {
            ColorScheme::Light => egui::Visuals::light(),
            ColorScheme::Dark => egui::Visuals::dark(),
        };
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_primary;
        visuals.override_text_color = Some(self.text_primary);
        ctx.set_visuals(visuals);
    }
}
