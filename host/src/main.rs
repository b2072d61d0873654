//! # FX Host
//!
//! 矢量动画效果展示程序入口。
//!
//! ## 用法
//!
//! ```bash
//! # 窗口模式（需要 gui 特性）
//! cargo run -p fx-host --features gui
//! cargo run -p fx-host --features gui -- --scheme dark --press pulse@0.5
//!
//! # 无窗口模式：逐帧导出 SVG 与 report.json
//! cargo run -p fx-host -- --headless
//! cargo run -p fx-host -- --headless --duration 2 --fps 10 --press clip@0 --press clip@1.5 --out frames
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fx_host::{
    AppConfig, ConfigOverrides, HeadlessOptions, HeadlessRunner, HostResult, SchemePreference,
};
use fx_runtime::InputSchedule;
use tracing::{Level, error, info};

#[derive(Parser)]
#[command(name = "fx-host")]
#[command(about = "矢量动画效果展示：裁剪揭示、遮罩揭示、淡入与脉动圆")]
#[command(version)]
struct Cli {
    /// 配置文件路径
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// 无窗口运行，逐帧导出 SVG
    #[arg(long)]
    headless: bool,

    /// 无窗口运行时长（秒）
    #[arg(long)]
    duration: Option<f32>,

    /// 无窗口采样帧率
    #[arg(long)]
    fps: Option<u32>,

    /// 在指定时间按下切换按钮，例如 `clip@0`、`pulse@500ms`（可重复）
    #[arg(long = "press", value_name = "EFFECT@TIME")]
    presses: Vec<String>,

    /// 输出目录
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// 配色方案
    #[arg(long, value_enum)]
    scheme: Option<SchemePreference>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            duration_secs: self.duration,
            fps: self.fps,
            output_dir: self.out.clone(),
            color_scheme: self.scheme,
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        error!("{e}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> HostResult<()> {
    let mut config = AppConfig::load(&cli.config);
    config.apply_overrides(&cli.overrides());
    config.validate()?;

    let schedule = InputSchedule::parse(cli.presses.iter().map(String::as_str))?;

    if cli.headless {
        let report = HeadlessRunner::new(HeadlessOptions::from_config(&config), schedule).run()?;
        info!(
            frames = report.frames,
            inputs = report.inputs_applied,
            out = %config.headless.output_dir.display(),
            "已导出"
        );
        return Ok(());
    }

    run_window(config, schedule)
}

#[cfg(feature = "gui")]
fn run_window(config: AppConfig, schedule: InputSchedule) -> HostResult<()> {
    fx_host::app::run(config, schedule)
}

#[cfg(not(feature = "gui"))]
fn run_window(_config: AppConfig, _schedule: InputSchedule) -> HostResult<()> {
    Err(fx_host::HostError::GuiUnavailable)
}
