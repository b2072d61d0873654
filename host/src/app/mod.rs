//! # App 模块
//!
//! 窗口模式主循环：winit 事件循环 + wgpu 表面 + egui 界面。
//!
//! 每次重绘：
//! 1. 按真实经过时间推进 [`RootShell`]
//! 2. 派发到期的计划输入
//! 3. egui 排布整帧并收集按钮点击
//! 4. 动画未结束时继续请求重绘

mod gpu;

use std::sync::Arc;
use std::time::Instant;

use fx_runtime::{ColorScheme, InputSchedule, RootShell, ShellInput};
use tracing::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Theme as WindowTheme, Window, WindowId};

use crate::config::{AppConfig, SchemePreference};
use crate::error::{HostError, HostResult};
use crate::ui::{Theme, show_frame};

use gpu::GpuContext;

/// 单帧最大时间步长，窗口被拖动或挂起后避免动画跳变
const MAX_FRAME_DT: f32 = 0.1;

fn scheme_from_window(theme: Option<WindowTheme>) -> Option<ColorScheme> {
    theme.map(|theme| match theme {
        WindowTheme::Light => ColorScheme::Light,
        WindowTheme::Dark => ColorScheme::Dark,
    })
}

/// 窗口相关的资源，在 `resumed` 时创建
struct WindowState {
    window: Arc<Window>,
    gpu: GpuContext,
    egui_state: egui_winit::State,
}

/// 应用状态
struct App {
    config: AppConfig,
    shell: RootShell,
    schedule: InputSchedule,
    egui_ctx: egui::Context,
    window: Option<WindowState>,
    scheme: ColorScheme,
    started: Instant,
    last_frame: Instant,
    error: Option<HostError>,
}

impl App {
    fn new(config: AppConfig, schedule: InputSchedule) -> Self {
        let shell = RootShell::new(&config.animation.effect_settings());
        let scheme = config.appearance.color_scheme.resolve(None);
        let now = Instant::now();
        Self {
            config,
            shell,
            schedule,
            egui_ctx: egui::Context::default(),
            window: None,
            scheme,
            started: now,
            last_frame: now,
            error: None,
        }
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> HostResult<WindowState> {
        let attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| HostError::Graphics(e.to_string()))?,
        );
        let gpu = GpuContext::new(window.clone())?;
        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &*window,
            Some(window.scale_factor() as f32),
            window.theme(),
            None,
        );
        Ok(WindowState {
            window,
            gpu,
            egui_state,
        })
    }

    fn update_scheme(&mut self, theme: Option<WindowTheme>) {
        let scheme = self
            .config
            .appearance
            .color_scheme
            .resolve(scheme_from_window(theme));
        if scheme != self.scheme {
            info!(?scheme, "配色方案变化");
            self.scheme = scheme;
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: HostError) {
        error!(error = %err, "窗口模式出错，退出");
        self.error = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self) -> HostResult<()> {
        let now = Instant::now();
        let dt = now
            .duration_since(self.last_frame)
            .as_secs_f32()
            .min(MAX_FRAME_DT);
        self.last_frame = now;

        self.shell.update(dt);
        let elapsed = now.duration_since(self.started).as_secs_f32();
        for input in self.schedule.drain_due(elapsed) {
            self.shell.handle_input(&input)?;
        }

        let Some(state) = self.window.as_mut() else {
            return Ok(());
        };

        let frame = self.shell.render(self.scheme);
        let theme = Theme::for_appearance(&frame.appearance);
        theme.apply(&self.egui_ctx, self.scheme);

        let raw_input = state.egui_state.take_egui_input(&state.window);
        let mut pressed = Vec::new();
        let output = self.egui_ctx.run(raw_input, |ctx| {
            pressed = show_frame(ctx, &frame, &theme);
        });
        state
            .egui_state
            .handle_platform_output(&state.window, output.platform_output.clone());
        state.gpu.present(&self.egui_ctx, output, theme.bg_primary)?;

        let toggled = !pressed.is_empty();
        for kind in pressed {
            let transition = self.shell.handle_input(&ShellInput::toggle(kind))?;
            debug!(%kind, ?transition, "按钮切换");
        }

        if toggled || self.shell.is_animating() || !self.schedule.is_exhausted() {
            state.window.request_redraw();
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match self.create_window(event_loop) {
            Ok(state) => {
                let theme = state.window.theme();
                state.window.request_redraw();
                self.window = Some(state);
                self.update_scheme(theme);
                self.last_frame = Instant::now();
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = self.window.as_mut() {
            let response = state.egui_state.on_window_event(&state.window, &event);
            if response.repaint {
                state.window.request_redraw();
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("窗口关闭");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(state) = self.window.as_mut() {
                    state.gpu.resize(size);
                    state.window.request_redraw();
                }
            }
            WindowEvent::ThemeChanged(theme) => {
                if self.config.appearance.color_scheme == SchemePreference::System {
                    self.update_scheme(Some(theme));
                }
                if let Some(state) = self.window.as_ref() {
                    state.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }
}

/// 打开窗口并运行直到关闭
pub fn run(config: AppConfig, schedule: InputSchedule) -> HostResult<()> {
    let event_loop = EventLoop::new().map_err(|e| HostError::Graphics(e.to_string()))?;
    let mut app = App::new(config, schedule);
    event_loop
        .run_app(&mut app)
        .map_err(|e| HostError::Graphics(e.to_string()))?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_from_window() {
        assert_eq!(scheme_from_window(None), None);
        assert_eq!(
            scheme_from_window(Some(WindowTheme::Dark)),
            Some(ColorScheme::Dark)
        );
        assert_eq!(
            SchemePreference::Light.resolve(scheme_from_window(Some(WindowTheme::Dark))),
            ColorScheme::Light
        );
    }
}
