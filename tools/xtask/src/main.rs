//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-runtime`: 运行 fx-runtime 覆盖率
//! - `cov-workspace`: 运行 workspace 覆盖率
//! - `gallery`: 导出各效果在静止、中途、目标三个位置的 SVG

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use fx_runtime::{
    ColorScheme, EffectConfig, EffectKind, EffectSettings, RootShell, frame_to_svg, scene_to_svg,
};

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn ensure_cargo_llvm_cov_available() -> anyhow::Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(["llvm-cov", "--version"]);
    let status = cmd.status();
    match status {
        Ok(s) if s.success() => Ok(()),
        _ => anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        ),
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => {
            let mut fmt = Command::new("cargo");
            fmt.args(["fmt", "--all", "--", "--check"]);
            run("cargo fmt --all -- --check", &mut fmt)?;

            let mut clippy = Command::new("cargo");
            clippy.args(["clippy", "--workspace", "--all-targets", "--all-features"]);
            run(
                "cargo clippy --workspace --all-targets --all-features",
                &mut clippy,
            )?;

            let mut test = Command::new("cargo");
            test.args(["test", "--workspace"]);
            run("cargo test --workspace", &mut test)?;
        }
        "cov-runtime" => {
            ensure_cargo_llvm_cov_available()?;

            let mut cov = Command::new("cargo");
            cov.args(["llvm-cov", "-p", "fx-runtime", "--html"]);
            run("cargo llvm-cov -p fx-runtime --html", &mut cov)?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "cov-workspace" => {
            ensure_cargo_llvm_cov_available()?;

            // 排除 xtask，窗口代码依赖图形设备，不计入
            let mut cov = Command::new("cargo");
            cov.args(["llvm-cov", "--workspace", "--exclude", "xtask", "--html"]);
            run(
                "cargo llvm-cov --workspace --exclude xtask --html",
                &mut cov,
            )?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "gallery" => {
            let out = args
                .next()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("target/gallery"));
            gallery(&out)?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-runtime     运行 fx-runtime 覆盖率报告
  cov-workspace   运行 workspace 覆盖率报告
  gallery         导出效果 SVG 画廊

GALLERY:
  cargo xtask gallery [out]

  默认输出到 target/gallery/
  每个效果导出 0% / 50% / 100% 三个位置，另外导出浅色与深色整帧，
  并写出 index.json 列出所有文件。

ALIASES (in .cargo/config.toml):
  cargo check-all     -> cargo xtask check-all
  cargo cov-runtime   -> cargo xtask cov-runtime
  cargo cov-workspace -> cargo xtask cov-workspace
  cargo gallery       -> cargo xtask gallery
"#
    );
}

//=============================================================================
// gallery 命令实现
//=============================================================================

/// 采样位置（0.0 = 静止值，1.0 = 目标值）
const SAMPLES: [f32; 3] = [0.0, 0.5, 1.0];

fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content)
        .map_err(|e| anyhow::anyhow!("无法写入 {}: {e}", path.display()))
}

/// 导出画廊
fn gallery(out: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(out)?;
    let mut files = Vec::new();

    for kind in EffectKind::ALL {
        let config = EffectConfig::preset(kind);
        for sample in SAMPLES {
            let scalar = config.rest + (config.target - config.rest) * sample;
            let scene = fx_runtime::effect::render(&config, scalar);
            let name = format!("{}_{:03}.svg", kind.key(), (sample * 100.0).round() as u32);
            write_file(&out.join(&name), &scene_to_svg(&scene))?;
            files.push(serde_json::json!({
                "file": name,
                "effect": kind.key(),
                "title": kind.title(),
                "scalar": scalar,
            }));
        }
    }

    // 整帧：全部效果已展开
    let mut shell = RootShell::new(&EffectSettings::default());
    for kind in EffectKind::ALL {
        shell.toggle(kind)?;
    }
    shell.update(EffectConfig::preset(EffectKind::ClipReveal).duration * 2.0);

    for (scheme, name) in [
        (ColorScheme::Light, "shell_light.svg"),
        (ColorScheme::Dark, "shell_dark.svg"),
    ] {
        write_file(&out.join(name), &frame_to_svg(&shell.render(scheme)))?;
        files.push(serde_json::json!({ "file": name, "scheme": scheme }));
    }

    let index = serde_json::to_string_pretty(&serde_json::json!({ "files": files }))?;
    write_file(&out.join("index.json"), &index)?;

    eprintln!("✅ 已导出 {} 个文件到 {}", files.len(), out.display());
    Ok(())
}
