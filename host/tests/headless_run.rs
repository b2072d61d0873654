//! # 无窗口运行集成测试
//!
//! 测试 配置 → 输入计划 → HeadlessRunner → 文件输出 的完整链路。
//! 这些测试不依赖窗口或图形设备。

use std::fs;

use fx_host::headless::{REPORT_FILE, frame_path};
use fx_host::{AppConfig, ConfigOverrides, HeadlessOptions, HeadlessReport, HeadlessRunner};
use fx_runtime::{ColorScheme, EffectKind, InputSchedule};

fn config_for(dir: &std::path::Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.apply_overrides(&ConfigOverrides {
        duration_secs: Some(1.5),
        fps: Some(10),
        output_dir: Some(dir.to_path_buf()),
        color_scheme: None,
    });
    config
}

/// 测试帧文件与报告都被写出
#[test]
fn test_writes_frames_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let schedule = InputSchedule::parse(["mask@0"]).unwrap();

    let report = HeadlessRunner::new(HeadlessOptions::from_config(&config), schedule)
        .run()
        .unwrap();

    assert_eq!(report.frames, 16);
    for index in 0..report.frames {
        assert!(frame_path(dir.path(), index).exists(), "missing frame {index}");
    }
    assert!(!frame_path(dir.path(), report.frames).exists());

    // 报告可以读回
    let json = fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap();
    let loaded: HeadlessReport = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, report);

    let mask = loaded.effect(EffectKind::MaskReveal).unwrap();
    assert!(mask.visible);
    assert!((mask.value - 300.0).abs() < 1e-3);
}

/// 测试帧内容随时间变化：首帧遮罩宽度为 0，末帧已完全展开
#[test]
fn test_frames_follow_animation() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let schedule = InputSchedule::parse(["clip@0"]).unwrap();

    HeadlessRunner::new(HeadlessOptions::from_config(&config), schedule)
        .run()
        .unwrap();

    let first = fs::read_to_string(frame_path(dir.path(), 0)).unwrap();
    assert!(first.contains("<rect x=\"0\" y=\"0\" width=\"0\" height=\"140\"/>"));
    assert!(first.contains(">HIDE<"));

    let last = fs::read_to_string(frame_path(dir.path(), 15)).unwrap();
    assert!(last.contains("<rect x=\"0\" y=\"0\" width=\"300\" height=\"140\"/>"));
}

/// 测试配色方案进入帧输出
#[test]
fn test_dark_scheme_background() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(dir.path());
    config.apply_overrides(&ConfigOverrides {
        color_scheme: Some(fx_host::SchemePreference::Dark),
        ..ConfigOverrides::default()
    });

    let options = HeadlessOptions::from_config(&config);
    assert_eq!(options.scheme, ColorScheme::Dark);
    let report = HeadlessRunner::new(options, InputSchedule::default())
        .run()
        .unwrap();
    assert_eq!(report.scheme, ColorScheme::Dark);

    let frame = fs::read_to_string(frame_path(dir.path(), 0)).unwrap();
    assert!(frame.contains("fill=\"#222222\""));
}

/// 测试快速连按：最后一次切换决定最终状态
#[test]
fn test_rapid_toggles_settle_on_last_press() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let schedule = InputSchedule::parse(["pulse@0", "pulse@0.2", "pulse@0.3"]).unwrap();

    let mut options = HeadlessOptions::from_config(&config);
    options.write_frames = false;
    let report = HeadlessRunner::new(options, schedule).run().unwrap();

    let pulse = report.effect(EffectKind::PulsatingCircle).unwrap();
    assert!(pulse.visible);
    assert!(!pulse.animating);
    assert!((pulse.value - 80.0).abs() < 1e-3);
    assert_eq!(report.events.superseded, 2);
}
