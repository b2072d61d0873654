//! # UI 组件模块
//!
//! 用 egui 排布一帧：顶部状态栏，下方四个效果面板（标题、场景、切换按钮）。

pub mod theme;

pub use theme::Theme;

use egui::{Button, CentralPanel, Frame, RichText, ScrollArea, Sense, TopBottomPanel, Vec2};
use fx_runtime::{DisplayList, EffectKind, EffectPanel, ShellFrame};

use crate::renderer::paint_display_list;

/// 状态栏文字
const STATUS_TEXT: &str = "fx showcase";

/// 绘制整帧，返回本帧被按下的切换按钮
pub fn show_frame(ctx: &egui::Context, frame: &ShellFrame, theme: &Theme) -> Vec<EffectKind> {
    TopBottomPanel::top("status_bar")
        .exact_height(theme.status_bar_height)
        .frame(Frame::new().fill(theme.bg_primary).inner_margin(4.0))
        .show(ctx, |ui| {
            ui.label(
                RichText::new(STATUS_TEXT)
                    .size(theme.font_size_small)
                    .color(theme.status_text),
            );
        });

    let mut pressed = Vec::new();
    CentralPanel::default()
        .frame(Frame::new().fill(theme.bg_primary).inner_margin(theme.padding))
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                for panel in &frame.panels {
                    if effect_panel(ui, panel, theme) {
                        pressed.push(panel.kind);
                    }
                    ui.add_space(theme.spacing);
                }
            });
        });
    pressed
}

/// 单个效果面板，返回按钮是否被点击
fn effect_panel(ui: &mut egui::Ui, panel: &EffectPanel, theme: &Theme) -> bool {
    ui.label(
        RichText::new(&panel.title)
            .size(theme.font_size_title)
            .color(theme.text_primary),
    );

    let size = Vec2::new(panel.scene.width, panel.scene.height);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    paint_display_list(&painter, rect.min, &DisplayList::from_scene(&panel.scene));

    let label = RichText::new(panel.button_label.to_uppercase()).color(theme.button_text);
    ui.add_sized(
        [panel.scene.width, theme.button_height],
        Button::new(label).fill(theme.button_bg),
    )
    .clicked()
}
