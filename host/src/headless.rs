//! # Headless 模块
//!
//! 无窗口运行：以固定帧率驱动 [`RootShell`]，按输入计划注入切换，
//! 把每一帧写为 SVG，最后输出一份 JSON 报告。
//!
//! ## 输出
//!
//! ```text
//! <output_dir>/
//!   frame_0000.svg
//!   frame_0001.svg
//!   ...
//!   report.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use fx_runtime::{
    AnimationEvent, ColorScheme, EffectKind, EffectSettings, InputSchedule, RootShell,
    frame_to_svg,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::{HostError, HostResult};

/// 报告文件名
pub const REPORT_FILE: &str = "report.json";

/// 无窗口运行参数
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub fps: u32,
    pub duration_secs: f32,
    pub output_dir: PathBuf,
    pub scheme: ColorScheme,
    pub settings: EffectSettings,
    /// 为 false 时只生成报告，不写帧文件
    pub write_frames: bool,
}

impl HeadlessOptions {
    /// 从配置生成；无窗口时 `system` 方案按浅色处理
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            fps: config.headless.fps,
            duration_secs: config.headless.duration_secs,
            output_dir: config.headless.output_dir.clone(),
            scheme: config.appearance.color_scheme.resolve(None),
            settings: config.animation.effect_settings(),
            write_frames: true,
        }
    }

    /// 需要采样的帧数（含第 0 帧）
    pub fn frame_count(&self) -> u32 {
        (self.duration_secs * self.fps as f32).ceil() as u32 + 1
    }
}

/// 动画事件计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounts {
    pub started: usize,
    pub completed: usize,
    pub superseded: usize,
}

impl EventCounts {
    fn record(&mut self, events: &[AnimationEvent]) {
        for event in events {
            match event {
                AnimationEvent::Started(_) => self.started += 1,
                AnimationEvent::Completed(_) => self.completed += 1,
                AnimationEvent::Superseded(_) => self.superseded += 1,
            }
        }
    }
}

/// 单个效果的最终状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSummary {
    pub kind: EffectKind,
    pub visible: bool,
    pub value: f32,
    pub button_label: String,
    pub animating: bool,
}

/// 运行报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub frames: u32,
    pub fps: u32,
    pub duration_secs: f32,
    pub scheme: ColorScheme,
    pub inputs_applied: usize,
    pub events: EventCounts,
    pub effects: Vec<EffectSummary>,
}

impl HeadlessReport {
    /// 查找某个效果的最终状态
    pub fn effect(&self, kind: EffectKind) -> Option<&EffectSummary> {
        self.effects.iter().find(|summary| summary.kind == kind)
    }
}

/// 无窗口驱动器
pub struct HeadlessRunner {
    options: HeadlessOptions,
    schedule: InputSchedule,
    shell: RootShell,
}

impl HeadlessRunner {
    pub fn new(options: HeadlessOptions, schedule: InputSchedule) -> Self {
        let shell = RootShell::new(&options.settings);
        Self {
            options,
            schedule,
            shell,
        }
    }

    /// 运行到结束并返回报告
    pub fn run(mut self) -> HostResult<HeadlessReport> {
        let frames = self.options.frame_count();
        let fps = self.options.fps as f32;
        let dt = 1.0 / fps;

        if let Some(last) = self.schedule.last_time()
            && last > self.options.duration_secs
        {
            warn!(
                last,
                duration = self.options.duration_secs,
                "部分输入晚于运行时长，将被忽略"
            );
        }

        fs::create_dir_all(&self.options.output_dir)
            .map_err(|e| HostError::io(&self.options.output_dir, e))?;

        info!(
            frames,
            fps = self.options.fps,
            inputs = self.schedule.len(),
            "开始无窗口运行"
        );

        let mut events = EventCounts::default();
        let mut inputs_applied = 0;

        for index in 0..frames {
            // 按帧序号计算时间，避免累加误差
            let now = index as f32 / fps;
            if index > 0 {
                events.record(&self.shell.update(dt));
            }

            for input in self.schedule.drain_due(now) {
                let transition = self.shell.handle_input(&input)?;
                debug!(now, ?input, ?transition, "注入输入");
                inputs_applied += 1;
            }

            if self.options.write_frames {
                let frame = self.shell.render(self.options.scheme);
                let path = frame_path(&self.options.output_dir, index);
                fs::write(&path, frame_to_svg(&frame)).map_err(|e| HostError::io(&path, e))?;
            }
        }

        // 取出最后一帧之后仍在队列中的事件
        events.record(&self.shell.update(0.0));

        let report = self.report(frames, inputs_applied, events);
        let path = self.options.output_dir.join(REPORT_FILE);
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(&path, json).map_err(|e| HostError::io(&path, e))?;

        info!(path = %path.display(), "无窗口运行完成");
        Ok(report)
    }

    fn report(&self, frames: u32, inputs_applied: usize, events: EventCounts) -> HeadlessReport {
        let frame = self.shell.render(self.options.scheme);
        HeadlessReport {
            frames,
            fps: self.options.fps,
            duration_secs: self.options.duration_secs,
            scheme: self.options.scheme,
            inputs_applied,
            events,
            effects: frame
                .panels
                .into_iter()
                .map(|panel| EffectSummary {
                    kind: panel.kind,
                    visible: panel.visible,
                    value: panel.value,
                    button_label: panel.button_label,
                    animating: panel.animating,
                })
                .collect(),
        }
    }
}

/// 第 `index` 帧的文件路径
pub fn frame_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("frame_{index:04}.svg"))
}
