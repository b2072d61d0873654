//! # Input 模块
//!
//! 定义宿主向 Shell 传递的输入事件，以及按时间排好的输入计划。
//!
//! ## 设计说明
//!
//! - `ShellInput` 是宿主采集用户操作后传给 Shell 的语义化输入
//! - Shell 不直接处理鼠标/键盘事件
//! - `InputSchedule` 用于无窗口运行与测试：在指定时间点注入输入

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::effect::EffectKind;
use crate::error::ScheduleError;

/// 宿主向 Shell 传递的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShellInput {
    /// 按下某个效果的切换按钮
    Toggle { effect: EffectKind },
}

impl ShellInput {
    /// 创建切换输入
    pub fn toggle(effect: EffectKind) -> Self {
        Self::Toggle { effect }
    }
}

/// 在某个时间点注入的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledInput {
    /// 距离启动的秒数
    pub at: f32,
    pub input: ShellInput,
}

impl FromStr for ScheduledInput {
    type Err = ScheduleError;

    /// 解析 `<effect>@<time>`，时间支持 `0.5`、`0.5s`、`500ms`
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (name, time) = spec
            .split_once('@')
            .ok_or_else(|| ScheduleError::MissingSeparator {
                spec: spec.to_string(),
            })?;
        let effect = name.parse::<EffectKind>()?;
        let at = parse_time(time)?;
        Ok(Self {
            at,
            input: ShellInput::toggle(effect),
        })
    }
}

fn parse_time(value: &str) -> Result<f32, ScheduleError> {
    let trimmed = value.trim();
    let invalid = |message: &str| ScheduleError::InvalidTime {
        value: value.to_string(),
        message: message.to_string(),
    };

    let (number, scale) = if let Some(ms) = trimmed.strip_suffix("ms") {
        (ms, 0.001)
    } else if let Some(s) = trimmed.strip_suffix('s') {
        (s, 1.0)
    } else {
        (trimmed, 1.0)
    };

    let parsed: f32 = number.trim().parse().map_err(|_| invalid("不是数字"))?;
    if !parsed.is_finite() {
        return Err(invalid("必须是有限值"));
    }
    if parsed < 0.0 {
        return Err(invalid("不能为负数"));
    }
    Ok(parsed * scale)
}

/// 按时间排序的输入计划
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSchedule {
    entries: Vec<ScheduledInput>,
    /// 下一条未派发输入的下标
    #[serde(skip)]
    cursor: usize,
}

impl InputSchedule {
    pub fn new(mut entries: Vec<ScheduledInput>) -> Self {
        // 稳定排序：同一时间点的输入保持给定顺序
        entries.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { entries, cursor: 0 }
    }

    /// 从一组 `<effect>@<time>` 字符串解析
    pub fn parse<'a>(specs: impl IntoIterator<Item = &'a str>) -> Result<Self, ScheduleError> {
        let entries = specs
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<ScheduledInput>, _>>()?;
        Ok(Self::new(entries))
    }

    /// 取出所有时间已到（`at <= now`）且尚未派发的输入
    pub fn drain_due(&mut self, now: f32) -> Vec<ShellInput> {
        let start = self.cursor;
        while self.cursor < self.entries.len() && self.entries[self.cursor].at <= now {
            self.cursor += 1;
        }
        self.entries[start..self.cursor]
            .iter()
            .map(|entry| entry.input.clone())
            .collect()
    }

    /// 所有输入是否都已派发
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    /// 最后一条输入的时间
    pub fn last_time(&self) -> Option<f32> {
        self.entries.last().map(|entry| entry.at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ScheduledInput] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_press() {
        let press: ScheduledInput = "clip@0.5".parse().unwrap();
        assert_eq!(press.at, 0.5);
        assert_eq!(press.input, ShellInput::toggle(EffectKind::ClipReveal));

        let press: ScheduledInput = "pulse@250ms".parse().unwrap();
        assert!((press.at - 0.25).abs() < 1e-6);

        let press: ScheduledInput = "fade@2s".parse().unwrap();
        assert_eq!(press.at, 2.0);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "clip".parse::<ScheduledInput>(),
            Err(ScheduleError::MissingSeparator { .. })
        ));
        assert!(matches!(
            "glow@1".parse::<ScheduledInput>(),
            Err(ScheduleError::UnknownEffect { .. })
        ));
        assert!(matches!(
            "clip@-1".parse::<ScheduledInput>(),
            Err(ScheduleError::InvalidTime { .. })
        ));
        assert!(matches!(
            "clip@soon".parse::<ScheduledInput>(),
            Err(ScheduleError::InvalidTime { .. })
        ));
        assert!(matches!(
            "clip@inf".parse::<ScheduledInput>(),
            Err(ScheduleError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_schedule_drains_in_time_order() {
        let mut schedule = InputSchedule::parse(["pulse@1", "clip@0", "mask@1"]).unwrap();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.last_time(), Some(1.0));

        assert_eq!(
            schedule.drain_due(0.0),
            vec![ShellInput::toggle(EffectKind::ClipReveal)]
        );
        assert!(schedule.drain_due(0.5).is_empty());
        // 同一时间点保持给定顺序
        assert_eq!(
            schedule.drain_due(1.0),
            vec![
                ShellInput::toggle(EffectKind::PulsatingCircle),
                ShellInput::toggle(EffectKind::MaskReveal),
            ]
        );
        assert!(schedule.is_exhausted());
        assert!(schedule.drain_due(10.0).is_empty());
    }
}
