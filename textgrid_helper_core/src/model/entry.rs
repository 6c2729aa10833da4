use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

use crate::error::TextgridError;

/// 区间条目: 时间轴上一段带标签的范围, 不变式为 `start < end`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// 区间开始时间（秒）。
    pub start: f64,
    /// 区间结束时间（秒）。
    pub end: f64,
    /// 区间标签, 构造时去除首尾空白。
    pub label: String,
}

impl Interval {
    /// 构造一个区间条目。标签会被去除首尾空白。
    ///
    /// # Errors
    ///
    /// 当 `start >= end` 时返回 [`TextgridError::BadInterval`]。
    pub fn new(start: f64, end: f64, label: impl Into<String>) -> Result<Self, TextgridError> {
        let label = label.into().trim().to_string();
        if start >= end {
            return Err(TextgridError::BadInterval { start, end, label });
        }
        Ok(Self { start, end, label })
    }

    /// 区间的时长。
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// 按 (开始时间, 结束时间, 标签) 的自然元组顺序比较, 用于确定性排序。
    #[must_use]
    pub fn cmp_order(&self, other: &Self) -> Ordering {
        self.start
            .total_cmp(&other.start)
            .then_with(|| self.end.total_cmp(&other.end))
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, \"{}\")", self.start, self.end, self.label)
    }
}

/// 时间点条目: 时间轴上一个带标签的时刻。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// 时间点（秒）。
    pub time: f64,
    /// 标签, 构造时去除首尾空白。
    pub label: String,
}

impl Point {
    /// 构造一个时间点条目。标签会被去除首尾空白。
    #[must_use]
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        Self {
            time,
            label: label.into().trim().to_string(),
        }
    }

    /// 按 (时间, 标签) 的自然元组顺序比较, 用于确定性排序。
    #[must_use]
    pub fn cmp_order(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, \"{}\")", self.time, self.label)
    }
}

/// 条目: 区间或时间点, 两种层级共用的多态值类型。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entry {
    /// 区间条目。
    Interval(Interval),
    /// 时间点条目。
    Point(Point),
}

impl Entry {
    /// 条目的标签。
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Entry::Interval(interval) => &interval.label,
            Entry::Point(point) => &point.label,
        }
    }

    /// 条目的起始时间（区间为 `start`, 时间点为 `time`）。
    #[must_use]
    pub fn start(&self) -> f64 {
        match self {
            Entry::Interval(interval) => interval.start,
            Entry::Point(point) => point.time,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Interval(interval) => fmt::Display::fmt(interval, f),
            Entry::Point(point) => fmt::Display::fmt(point, f),
        }
    }
}

impl From<Interval> for Entry {
    fn from(interval: Interval) -> Self {
        Entry::Interval(interval)
    }
}

impl From<Point> for Entry {
    fn from(point: Point) -> Self {
        Entry::Point(point)
    }
}

/// 枚举: 层级的种类。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Serialize, Deserialize, Default,
)]
#[strum(ascii_case_insensitive)]
pub enum TierKind {
    /// 区间层。
    #[default]
    Interval,
    /// 时间点层。
    Point,
}

impl TierKind {
    /// 文件格式中使用的类别标记。
    #[must_use]
    pub const fn class_marker(self) -> &'static str {
        match self {
            TierKind::Interval => "IntervalTier",
            TierKind::Point => "TextTier",
        }
    }

    /// 从文件格式中的类别标记解析层级种类。
    #[must_use]
    pub fn from_class_marker(marker: &str) -> Option<Self> {
        match marker {
            "IntervalTier" => Some(TierKind::Interval),
            "TextTier" => Some(TierKind::Point),
            _ => None,
        }
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_marker())
    }
}

/// 插入条目与已有条目重叠时采用的解决策略。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize, Default,
)]
#[strum(ascii_case_insensitive)]
pub enum CollisionPolicy {
    /// 返回冲突错误, 不做任何修改。
    #[default]
    Error,
    /// 删除所有重叠条目, 然后插入新条目。
    Replace,
    /// 将所有重叠条目与新条目融合为一个条目。
    Merge,
}

/// 擦除区间与已有条目重叠时采用的解决策略。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize, Default,
)]
#[strum(ascii_case_insensitive)]
pub enum ErasePolicy {
    /// 存在重叠条目时返回前置条件错误。
    #[default]
    Error,
    /// 删除所有重叠条目, 但保留擦除范围两侧的剩余部分。
    Truncate,
    /// 完整删除所有重叠条目, 即使只有部分重叠。
    Categorical,
}

/// 裁剪窗口对部分重叠条目的处理方式。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize, Default,
)]
#[strum(ascii_case_insensitive)]
pub enum CropMode {
    /// 截断部分重叠的条目, 使其落在窗口内。
    #[default]
    Truncated,
    /// 只保留完全落在窗口内的条目。
    Strict,
    /// 窗口在概念上延伸到部分重叠条目的边界, 条目原样保留。
    Stretched,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_rejects_reversed_bounds() {
        let err = Interval::new(2.0, 1.0, "x").unwrap_err();
        assert!(matches!(err, TextgridError::BadInterval { .. }));
    }

    #[test]
    fn labels_are_trimmed() {
        let interval = Interval::new(0.0, 1.0, "  hello ").unwrap();
        assert_eq!(interval.label, "hello");
        let point = Point::new(0.5, " p\t");
        assert_eq!(point.label, "p");
    }

    #[test]
    fn policy_codes_parse_case_insensitively() {
        assert_eq!(
            "REPLACE".parse::<CollisionPolicy>().unwrap(),
            CollisionPolicy::Replace
        );
        assert_eq!(
            "truncate".parse::<ErasePolicy>().unwrap(),
            ErasePolicy::Truncate
        );
        assert!("garbage".parse::<CollisionPolicy>().is_err());
    }

    #[test]
    fn tier_kind_markers_round_trip() {
        assert_eq!(TierKind::from_class_marker("TextTier"), Some(TierKind::Point));
        assert_eq!(TierKind::Interval.class_marker(), "IntervalTier");
        assert_eq!(TierKind::from_class_marker("other"), None);
    }
}
