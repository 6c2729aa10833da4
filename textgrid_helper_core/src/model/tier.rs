use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::TextgridError;
use crate::model::entry::{
    CollisionPolicy, CropMode, Entry, ErasePolicy, Interval, Point, TierKind,
};
use crate::model::overlap::{OverlapCriteria, intervals_overlap};

/// 插入融合条目时使用的标签连接符。
const MERGE_LABEL_SEPARATOR: &str = "-";

/// 时间戳近似比较使用的相对容差。
const TIME_RELATIVE_TOLERANCE: f64 = 1e-14;

/// 两个时间戳在相对容差内是否相等。
pub(crate) fn times_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIME_RELATIVE_TOLERANCE * a.abs().max(b.abs())
}

/// 该标签是否表示静音或空白段。
fn is_silence(label: &str) -> bool {
    label.is_empty() || label == "sp"
}

/// 裁剪操作的信息损失统计, 供调用方报告, 裁剪本身不使用。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropReport {
    /// 第一个跨越窗口左边界的条目被截去的时长。
    pub cut_start: f64,
    /// 严格模式下因跨界而丢弃的条目所累计的窗口宽度。
    pub cut_within: f64,
    /// 最后一个跨越窗口右边界的条目被截去的时长。
    pub cut_end: f64,
    /// 第一个跨界条目被保留部分所占的比例。
    pub first_kept_fraction: f64,
    /// 最后一个跨界条目被保留部分所占的比例。
    pub last_kept_fraction: f64,
}

/// 区间层: 同一时间轴上按开始时间排序的区间条目序列。
///
/// 所有变换操作都返回新的层级, 不修改原层级。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalTier {
    name: String,
    entries: Vec<Interval>,
    min_time: f64,
    max_time: f64,
}

impl IntervalTier {
    /// 从名称和条目列表构造区间层。
    ///
    /// 显式给出的边界只会加宽条目隐含的边界, 不会收窄。
    ///
    /// # Errors
    ///
    /// 条目为空且未显式提供完整边界时返回 [`TextgridError::TimelessTier`]。
    pub fn new(
        name: impl Into<String>,
        entries: Vec<Interval>,
        min_time: Option<f64>,
        max_time: Option<f64>,
    ) -> Result<Self, TextgridError> {
        let name = name.into();
        if entries.is_empty() && (min_time.is_none() || max_time.is_none()) {
            return Err(TextgridError::TimelessTier(name));
        }
        Ok(Self::assemble(name, entries, min_time, max_time))
    }

    /// 内部构造: 排序条目并计算边界。调用方保证条目有效。
    fn assemble(
        name: String,
        mut entries: Vec<Interval>,
        min_time: Option<f64>,
        max_time: Option<f64>,
    ) -> Self {
        entries.sort_by(Interval::cmp_order);
        let mut min = min_time;
        let mut max = max_time;
        for entry in &entries {
            min = Some(min.map_or(entry.start, |m: f64| m.min(entry.start)));
            max = Some(max.map_or(entry.end, |m: f64| m.max(entry.end)));
        }
        Self {
            name,
            entries,
            min_time: min.unwrap_or(0.0),
            max_time: max.unwrap_or(0.0),
        }
    }

    /// 以新的条目列表派生层级, 边界继承自当前层级并按需加宽。
    fn with_entries(&self, entries: Vec<Interval>) -> Self {
        Self::assemble(
            self.name.clone(),
            entries,
            Some(self.min_time),
            Some(self.max_time),
        )
    }

    /// 层级名。
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 换一个名称的拷贝。
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        let mut tier = self.clone();
        tier.name = name.into();
        tier
    }

    /// 按开始时间排序的条目序列。
    #[must_use]
    pub fn entries(&self) -> &[Interval] {
        &self.entries
    }

    /// 层级的最小时间。
    #[must_use]
    pub fn min_time(&self) -> f64 {
        self.min_time
    }

    /// 层级的最大时间。
    #[must_use]
    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    /// 层级的总时长。
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.max_time - self.min_time
    }

    /// 每个条目的时长。
    #[must_use]
    pub fn durations(&self) -> Vec<f64> {
        self.entries.iter().map(Interval::duration).collect()
    }

    /// 与给定范围重叠的所有条目。
    #[must_use]
    pub fn entries_in_range(
        &self,
        start: f64,
        end: f64,
        criteria: OverlapCriteria,
    ) -> Vec<&Interval> {
        self.entries
            .iter()
            .filter(|entry| intervals_overlap((entry.start, entry.end), (start, end), criteria))
            .collect()
    }

    /// 裁剪出 `[start, end)` 窗口内的条目, 返回新层级和信息损失统计。
    ///
    /// 新层级的边界重置为 `[0, end - start]`, 条目保持绝对时间不变;
    /// 超出该范围的条目会按构造规则把边界重新撑宽。
    #[must_use]
    pub fn crop(&self, start: f64, end: f64, mode: CropMode) -> (Self, CropReport) {
        let mut kept: Vec<Interval> = Vec::new();
        let mut report = CropReport::default();

        for entry in &self.entries {
            // 完全落在窗口之外的条目直接丢弃, 不做统计
            if entry.end <= start || entry.start >= end {
                continue;
            }

            let matched = if entry.start >= start && entry.end <= end {
                // 完全落在窗口内
                Some(entry.clone())
            } else if mode == CropMode::Stretched && (entry.start >= start || entry.end <= end) {
                // 窗口延伸到跨界条目的边界, 条目原样保留
                Some(entry.clone())
            } else if entry.start >= start && entry.end > end {
                // 条目跨越窗口右边界
                report.cut_end = entry.end - end;
                report.last_kept_fraction = (end - entry.start) / entry.duration();
                if mode == CropMode::Strict {
                    report.cut_within += end - start;
                    None
                } else {
                    Some(Interval {
                        start: entry.start,
                        end,
                        label: entry.label.clone(),
                    })
                }
            } else if entry.start < start && entry.end <= end {
                // 条目跨越窗口左边界
                report.cut_start = start - entry.start;
                report.first_kept_fraction = (entry.end - start) / entry.duration();
                if mode == CropMode::Strict {
                    report.cut_within += end - start;
                    None
                } else {
                    Some(Interval {
                        start,
                        end: entry.end,
                        label: entry.label.clone(),
                    })
                }
            } else {
                // 条目完整包含了窗口
                if mode == CropMode::Strict {
                    report.cut_within += end - start;
                    None
                } else {
                    Some(Interval {
                        start,
                        end,
                        label: entry.label.clone(),
                    })
                }
            };

            if let Some(matched) = matched {
                kept.push(matched);
            }
        }

        let tier = Self::assemble(self.name.clone(), kept, Some(0.0), Some(end - start));
        (tier, report)
    }

    /// 插入一个条目, 按给定策略解决与已有条目的重叠。
    ///
    /// 成功时返回新层级和本次被解决掉的冲突条目列表,
    /// 供调用方决定如何向用户报告。
    ///
    /// # Errors
    ///
    /// 策略为 [`CollisionPolicy::Error`] 且存在重叠条目时返回
    /// [`TextgridError::Collision`], 原层级不变。
    pub fn insert(
        &self,
        entry: Interval,
        policy: CollisionPolicy,
    ) -> Result<(Self, Vec<Interval>), TextgridError> {
        let collisions: Vec<Interval> = self
            .entries_in_range(entry.start, entry.end, OverlapCriteria::default())
            .into_iter()
            .cloned()
            .collect();

        let mut entries = self.entries.clone();
        if collisions.is_empty() {
            entries.push(entry);
            return Ok((self.with_entries(entries), collisions));
        }

        match policy {
            CollisionPolicy::Replace => {
                entries.retain(|existing| !collisions.contains(existing));
                entries.push(entry);
            }
            CollisionPolicy::Merge => {
                entries.retain(|existing| !collisions.contains(existing));
                let mut fused = collisions.clone();
                fused.push(entry);
                fused.sort_by(Interval::cmp_order);
                let start = fused.iter().map(|e| e.start).fold(f64::INFINITY, f64::min);
                let end = fused
                    .iter()
                    .map(|e| e.end)
                    .fold(f64::NEG_INFINITY, f64::max);
                let label = fused
                    .iter()
                    .map(|e| e.label.as_str())
                    .collect::<Vec<_>>()
                    .join(MERGE_LABEL_SEPARATOR);
                entries.push(Interval { start, end, label });
            }
            CollisionPolicy::Error => {
                return Err(TextgridError::Collision {
                    tier_name: self.name.clone(),
                    entry: entry.into(),
                    collisions: collisions.into_iter().map(Entry::from).collect(),
                });
            }
        }

        warn!(
            tier = %self.name,
            resolved = collisions.len(),
            "插入条目时解决了与已有条目的重叠"
        );
        Ok((self.with_entries(entries), collisions))
    }

    /// 清空 `[start, end)` 范围, 按给定策略处理与之重叠的条目。
    ///
    /// 没有任何条目与该范围重叠时原样返回, 不论策略为何。
    ///
    /// # Errors
    ///
    /// 存在重叠条目且策略为 [`ErasePolicy::Error`] 时返回
    /// [`TextgridError::Precondition`]。
    pub fn erase_interval(
        &self,
        start: f64,
        end: f64,
        policy: ErasePolicy,
    ) -> Result<Self, TextgridError> {
        let matches: Vec<Interval> = self
            .entries_in_range(start, end, OverlapCriteria::default())
            .into_iter()
            .cloned()
            .collect();
        if matches.is_empty() {
            return Ok(self.clone());
        }

        let mut entries: Vec<Interval> = self
            .entries
            .iter()
            .filter(|entry| !matches.contains(entry))
            .cloned()
            .collect();

        match policy {
            ErasePolicy::Error => {
                return Err(TextgridError::Precondition(format!(
                    "擦除范围 [{start}, {end}) 与层级 \"{}\" 的 {} 个条目重叠, 需要明确的冲突策略",
                    self.name,
                    matches.len()
                )));
            }
            ErasePolicy::Categorical => {}
            ErasePolicy::Truncate => {
                // 第一个重叠条目在擦除范围左侧的剩余部分
                if let Some(first) = matches.first()
                    && first.start < start
                {
                    entries.push(Interval {
                        start: first.start,
                        end: start,
                        label: first.label.clone(),
                    });
                }
                // 最后一个重叠条目在擦除范围右侧的剩余部分
                if let Some(last) = matches.last()
                    && last.end > end
                {
                    entries.push(Interval {
                        start: end,
                        end: last.end,
                        label: last.label.clone(),
                    });
                }
            }
        }

        Ok(self.with_entries(entries))
    }

    /// 平移所有条目的时间戳, 开始和结束可以使用不同的偏移量。
    ///
    /// 平移后结束时间为负的条目被整体丢弃, 开始时间为负的条目被钳制到 0。
    /// 结果层级的边界至少覆盖原层级的边界。
    ///
    /// # Errors
    ///
    /// 未允许越界时, 任何条目移出原层级范围都会返回
    /// [`TextgridError::Precondition`]。
    pub fn edit_timestamps(
        &self,
        start_offset: f64,
        end_offset: f64,
        allow_overshoot: bool,
    ) -> Result<Self, TextgridError> {
        let mut entries = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let mut new_start = entry.start + start_offset;
            let new_end = entry.end + end_offset;
            if !allow_overshoot && (new_start < self.min_time || new_end > self.max_time) {
                return Err(TextgridError::Precondition(format!(
                    "条目 {entry} 平移后越出层级范围 [{}, {}]",
                    self.min_time, self.max_time
                )));
            }
            if new_end < 0.0 {
                continue;
            }
            if new_start < 0.0 {
                new_start = 0.0;
            }
            entries.push(Interval::new(new_start, new_end, entry.label.clone())?);
        }
        Ok(self.with_entries(entries))
    }

    /// 条目覆盖范围的补集: 条目之间、0 到第一个条目、最后一个条目到
    /// `max_time` 之间的空隙, 以空标签区间表示。零宽空隙被省略。
    #[must_use]
    pub fn get_non_entries(&self) -> Vec<Interval> {
        let Some(first) = self.entries.first() else {
            if self.max_time > self.min_time {
                return vec![Interval {
                    start: self.min_time,
                    end: self.max_time,
                    label: String::new(),
                }];
            }
            return Vec::new();
        };

        let mut gaps = Vec::new();
        if first.start > 0.0 {
            gaps.push(Interval {
                start: 0.0,
                end: first.start,
                label: String::new(),
            });
        }
        for pair in self.entries.windows(2) {
            if pair[0].end < pair[1].start {
                gaps.push(Interval {
                    start: pair[0].end,
                    end: pair[1].start,
                    label: String::new(),
                });
            }
        }
        if let Some(last) = self.entries.last()
            && last.end < self.max_time
        {
            gaps.push(Interval {
                start: last.end,
                end: self.max_time,
                label: String::new(),
            });
        }
        gaps
    }

    /// 用给定标签的条目填满 `[start, end]` 内的所有空隙,
    /// 使条目连续覆盖整个范围。范围默认取层级自身的边界。
    #[must_use]
    pub fn fill_gaps(&self, blank_label: &str, start: Option<f64>, end: Option<f64>) -> Self {
        let start = start.unwrap_or(self.min_time);
        let end = end.unwrap_or(self.max_time);
        let blank = |gap_start: f64, gap_end: f64| Interval {
            start: gap_start,
            end: gap_end,
            label: blank_label.trim().to_string(),
        };

        // 特例: 空层级整体补为一个空白条目
        if self.entries.is_empty() {
            if end <= start {
                return self.clone();
            }
            return Self::assemble(self.name.clone(), vec![blank(start, end)], None, None);
        }

        let mut filled: Vec<Interval> = Vec::with_capacity(self.entries.len() * 2);
        let mut prev_end: Option<f64> = None;
        for entry in &self.entries {
            if let Some(prev) = prev_end
                && prev < entry.start
            {
                filled.push(blank(prev, entry.start));
            }
            filled.push(entry.clone());
            prev_end = Some(entry.end);
        }

        if let Some(first) = self.entries.first()
            && first.start > start
        {
            filled.insert(0, blank(start, first.start));
        }
        if let Some(last) = self.entries.last()
            && last.end < end
        {
            filled.push(blank(last.end, end));
        }

        Self::assemble(self.name.clone(), filled, None, None)
    }

    /// 对每个条目用 `modify` 决定新的时间跨度, 然后从 0 开始把所有条目
    /// 按新时长首尾相接地重新铺排。
    ///
    /// 静音条目（空标签或 `"sp"`）和未通过 `filter` 的条目保留原时长。
    /// 条目顺序和标签不变, 结果层级没有空隙。
    #[must_use]
    pub fn manipulate<F, G>(&self, modify: F, filter: G) -> Self
    where
        F: Fn(f64, f64) -> (f64, f64),
        G: Fn(&str) -> bool,
    {
        self.relayout(self.entries.iter().map(|entry| {
            if is_silence(&entry.label) || !filter(&entry.label) {
                (entry.start, entry.end, entry.label.clone())
            } else {
                let (start, end) = modify(entry.start, entry.end);
                (start, end, entry.label.clone())
            }
        }))
    }

    /// 把本层级各条目的时长替换为 `target` 中对齐条目的时长,
    /// 再从 0 开始首尾相接地重新铺排。静音条目保留原时长。
    #[must_use]
    pub fn morph(&self, target: &Self) -> Self {
        self.relayout(
            self.entries
                .iter()
                .zip(target.entries.iter())
                .map(|(from, to)| {
                    if is_silence(&from.label) {
                        (from.start, from.end, from.label.clone())
                    } else {
                        (to.start, to.end, from.label.clone())
                    }
                }),
        )
    }

    /// 把一串 (开始, 结束, 标签) 决定按时长从 0 开始连续铺排。
    fn relayout<I>(&self, spans: I) -> Self
    where
        I: Iterator<Item = (f64, f64, String)>,
    {
        let mut cursor = 0.0;
        let mut entries = Vec::new();
        for (start, end, label) in spans {
            let duration = end - start;
            entries.push(Interval {
                start: cursor,
                end: cursor + duration,
                label,
            });
            cursor += duration;
        }
        Self::assemble(
            self.name.clone(),
            entries,
            Some(self.min_time),
            Some(self.max_time),
        )
    }

    /// 把另一个区间层接在本层级之后。
    ///
    /// `time_relative` 为真时, 被接入层级的条目整体平移到本层级的
    /// `max_time` 之后。
    pub fn append_tier(&self, other: &Self, time_relative: bool) -> Result<Self, TextgridError> {
        let appended = if time_relative {
            other.edit_timestamps(self.max_time, self.max_time, true)?
        } else {
            other.clone()
        };
        let mut entries = self.entries.clone();
        entries.extend(appended.entries.iter().cloned());
        Ok(self.with_entries(entries))
    }

    /// 查找标签匹配的条目, `substring_match` 决定精确匹配还是子串匹配。
    #[must_use]
    pub fn find(&self, label: &str, substring_match: bool) -> Vec<&Interval> {
        self.entries
            .iter()
            .filter(|entry| {
                if substring_match {
                    entry.label.contains(label)
                } else {
                    entry.label == label
                }
            })
            .collect()
    }

    /// 查找标签匹配给定正则表达式（不区分大小写）的条目。
    pub fn find_regex(&self, pattern: &str) -> Result<Vec<&Interval>, TextgridError> {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(self
            .entries
            .iter()
            .filter(|entry| re.is_match(&entry.label))
            .collect())
    }

    /// 对每个条目的标签应用 `edit`, 丢弃开始时间为负的条目。
    #[must_use]
    pub fn edit_labels<F>(&self, edit: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        let entries = self
            .entries
            .iter()
            .filter(|entry| entry.start >= 0.0)
            .map(|entry| Interval {
                start: entry.start,
                end: entry.end,
                label: edit(&entry.label).trim().to_string(),
            })
            .collect();
        self.with_entries(entries)
    }

    /// 两个层级在相对容差内是否相等（名称与标签精确比较）。
    #[must_use]
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.name == other.name
            && times_close(self.min_time, other.min_time)
            && times_close(self.max_time, other.max_time)
            && self.entries.len() == other.entries.len()
            && self.entries.iter().zip(&other.entries).all(|(a, b)| {
                times_close(a.start, b.start) && times_close(a.end, b.end) && a.label == b.label
            })
    }
}

/// 时间点层: 同一时间轴上按时间排序的时间点条目序列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointTier {
    name: String,
    entries: Vec<Point>,
    min_time: f64,
    max_time: f64,
}

impl PointTier {
    /// 从名称和条目列表构造时间点层。
    ///
    /// # Errors
    ///
    /// 条目为空且未显式提供完整边界时返回 [`TextgridError::TimelessTier`]。
    pub fn new(
        name: impl Into<String>,
        entries: Vec<Point>,
        min_time: Option<f64>,
        max_time: Option<f64>,
    ) -> Result<Self, TextgridError> {
        let name = name.into();
        if entries.is_empty() && (min_time.is_none() || max_time.is_none()) {
            return Err(TextgridError::TimelessTier(name));
        }
        Ok(Self::assemble(name, entries, min_time, max_time))
    }

    fn assemble(
        name: String,
        mut entries: Vec<Point>,
        min_time: Option<f64>,
        max_time: Option<f64>,
    ) -> Self {
        entries.sort_by(Point::cmp_order);
        let mut min = min_time;
        let mut max = max_time;
        for entry in &entries {
            min = Some(min.map_or(entry.time, |m: f64| m.min(entry.time)));
            max = Some(max.map_or(entry.time, |m: f64| m.max(entry.time)));
        }
        Self {
            name,
            entries,
            min_time: min.unwrap_or(0.0),
            max_time: max.unwrap_or(0.0),
        }
    }

    fn with_entries(&self, entries: Vec<Point>) -> Self {
        Self::assemble(
            self.name.clone(),
            entries,
            Some(self.min_time),
            Some(self.max_time),
        )
    }

    /// 层级名。
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 换一个名称的拷贝。
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        let mut tier = self.clone();
        tier.name = name.into();
        tier
    }

    /// 按时间排序的条目序列。
    #[must_use]
    pub fn entries(&self) -> &[Point] {
        &self.entries
    }

    /// 层级的最小时间。
    #[must_use]
    pub fn min_time(&self) -> f64 {
        self.min_time
    }

    /// 层级的最大时间。
    #[must_use]
    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    /// 层级的总时长。
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.max_time - self.min_time
    }

    /// 给定范围内的条目。`boundary_inclusive` 决定恰好落在边界上的
    /// 条目是否包含在内。
    #[must_use]
    pub fn entries_in_range(
        &self,
        start: f64,
        end: f64,
        boundary_inclusive: bool,
    ) -> Vec<&Point> {
        self.entries
            .iter()
            .filter(|point| {
                (boundary_inclusive && (point.time == start || point.time == end))
                    || (point.time > start && point.time < end)
            })
            .collect()
    }

    /// 裁剪出 `[start, end]` 内（含边界）的条目, 新层级边界为裁剪窗口。
    #[must_use]
    pub fn crop(&self, start: f64, end: f64) -> Self {
        let kept: Vec<Point> = self
            .entries
            .iter()
            .filter(|point| point.time >= start && point.time <= end)
            .cloned()
            .collect();
        Self::assemble(self.name.clone(), kept, Some(start), Some(end))
    }

    /// 插入一个时间点条目, 冲突判定为时间戳精确相等。
    ///
    /// # Errors
    ///
    /// 策略为 [`CollisionPolicy::Error`] 且存在同时间条目时返回
    /// [`TextgridError::Collision`]。
    pub fn insert(
        &self,
        entry: Point,
        policy: CollisionPolicy,
    ) -> Result<(Self, Vec<Point>), TextgridError> {
        let collisions: Vec<Point> = self
            .entries
            .iter()
            .find(|point| point.time == entry.time)
            .cloned()
            .into_iter()
            .collect();

        let mut entries = self.entries.clone();
        if collisions.is_empty() {
            entries.push(entry);
            return Ok((self.with_entries(entries), collisions));
        }

        match policy {
            CollisionPolicy::Replace => {
                entries.retain(|existing| !collisions.contains(existing));
                entries.push(entry);
            }
            CollisionPolicy::Merge => {
                entries.retain(|existing| !collisions.contains(existing));
                let labels: Vec<&str> = collisions
                    .iter()
                    .map(|point| point.label.as_str())
                    .chain(std::iter::once(entry.label.as_str()))
                    .collect();
                entries.push(Point {
                    time: entry.time,
                    label: labels.join(MERGE_LABEL_SEPARATOR),
                });
            }
            CollisionPolicy::Error => {
                return Err(TextgridError::Collision {
                    tier_name: self.name.clone(),
                    entry: entry.into(),
                    collisions: collisions.into_iter().map(Entry::from).collect(),
                });
            }
        }

        warn!(
            tier = %self.name,
            resolved = collisions.len(),
            "插入条目时解决了时间戳冲突"
        );
        Ok((self.with_entries(entries), collisions))
    }

    /// 平移所有条目的时间戳。平移后为负的条目被丢弃。
    ///
    /// # Errors
    ///
    /// 未允许越界时, 任何条目移出原层级范围都会返回
    /// [`TextgridError::Precondition`]。
    pub fn edit_timestamps(
        &self,
        offset: f64,
        allow_overshoot: bool,
    ) -> Result<Self, TextgridError> {
        let mut entries = Vec::with_capacity(self.entries.len());
        for point in &self.entries {
            let new_time = point.time + offset;
            if !allow_overshoot && (new_time <= self.min_time || new_time > self.max_time) {
                return Err(TextgridError::Precondition(format!(
                    "条目 {point} 平移后越出层级范围 ({}, {}]",
                    self.min_time, self.max_time
                )));
            }
            if new_time < 0.0 {
                continue;
            }
            entries.push(Point {
                time: new_time,
                label: point.label.clone(),
            });
        }
        Ok(self.with_entries(entries))
    }

    /// 把另一个时间点层接在本层级之后。
    pub fn append_tier(&self, other: &Self, time_relative: bool) -> Result<Self, TextgridError> {
        let appended = if time_relative {
            other.edit_timestamps(self.max_time, true)?
        } else {
            other.clone()
        };
        let mut entries = self.entries.clone();
        entries.extend(appended.entries.iter().cloned());
        Ok(self.with_entries(entries))
    }

    /// 查找标签匹配的条目。
    #[must_use]
    pub fn find(&self, label: &str, substring_match: bool) -> Vec<&Point> {
        self.entries
            .iter()
            .filter(|point| {
                if substring_match {
                    point.label.contains(label)
                } else {
                    point.label == label
                }
            })
            .collect()
    }

    /// 查找标签匹配给定正则表达式（不区分大小写）的条目。
    pub fn find_regex(&self, pattern: &str) -> Result<Vec<&Point>, TextgridError> {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(self
            .entries
            .iter()
            .filter(|point| re.is_match(&point.label))
            .collect())
    }

    /// 对每个条目的标签应用 `edit`, 丢弃时间为负的条目。
    #[must_use]
    pub fn edit_labels<F>(&self, edit: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        let entries = self
            .entries
            .iter()
            .filter(|point| point.time >= 0.0)
            .map(|point| Point {
                time: point.time,
                label: edit(&point.label).trim().to_string(),
            })
            .collect();
        self.with_entries(entries)
    }

    /// 两个层级在相对容差内是否相等（名称与标签精确比较）。
    #[must_use]
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.name == other.name
            && times_close(self.min_time, other.min_time)
            && times_close(self.max_time, other.max_time)
            && self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| times_close(a.time, b.time) && a.label == b.label)
    }
}

/// 层级: 区间层或时间点层的带标签联合, 调用处做穷尽匹配。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tier {
    /// 区间层。
    Interval(IntervalTier),
    /// 时间点层。
    Point(PointTier),
}

impl Tier {
    /// 层级名。
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Tier::Interval(tier) => tier.name(),
            Tier::Point(tier) => tier.name(),
        }
    }

    /// 层级的种类。
    #[must_use]
    pub const fn kind(&self) -> TierKind {
        match self {
            Tier::Interval(_) => TierKind::Interval,
            Tier::Point(_) => TierKind::Point,
        }
    }

    /// 层级的最小时间。
    #[must_use]
    pub fn min_time(&self) -> f64 {
        match self {
            Tier::Interval(tier) => tier.min_time(),
            Tier::Point(tier) => tier.min_time(),
        }
    }

    /// 层级的最大时间。
    #[must_use]
    pub fn max_time(&self) -> f64 {
        match self {
            Tier::Interval(tier) => tier.max_time(),
            Tier::Point(tier) => tier.max_time(),
        }
    }

    /// 条目数量。
    #[must_use]
    pub fn entry_count(&self) -> usize {
        match self {
            Tier::Interval(tier) => tier.entries().len(),
            Tier::Point(tier) => tier.entries().len(),
        }
    }

    /// 层级是否没有条目。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// 所有条目的多态视图, 按时间排序。
    #[must_use]
    pub fn entry_list(&self) -> Vec<Entry> {
        match self {
            Tier::Interval(tier) => tier.entries().iter().cloned().map(Entry::from).collect(),
            Tier::Point(tier) => tier.entries().iter().cloned().map(Entry::from).collect(),
        }
    }

    /// 换一个名称的拷贝。
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        match self {
            Tier::Interval(tier) => Tier::Interval(tier.with_name(name)),
            Tier::Point(tier) => Tier::Point(tier.with_name(name)),
        }
    }

    /// 裁剪到给定窗口。时间点层忽略裁剪模式。
    #[must_use]
    pub fn crop(&self, start: f64, end: f64, mode: CropMode) -> Self {
        match self {
            Tier::Interval(tier) => Tier::Interval(tier.crop(start, end, mode).0),
            Tier::Point(tier) => Tier::Point(tier.crop(start, end)),
        }
    }

    /// 去掉所有标签精确等于 `label` 的条目, 边界保持不变。
    #[must_use]
    pub fn without_label(&self, label: &str) -> Self {
        match self {
            Tier::Interval(tier) => {
                let entries = tier
                    .entries()
                    .iter()
                    .filter(|entry| entry.label != label)
                    .cloned()
                    .collect();
                Tier::Interval(tier.with_entries(entries))
            }
            Tier::Point(tier) => {
                let entries = tier
                    .entries()
                    .iter()
                    .filter(|point| point.label != label)
                    .cloned()
                    .collect();
                Tier::Point(tier.with_entries(entries))
            }
        }
    }

    /// 平移所有条目的时间戳。区间层使用前两个偏移量, 时间点层使用
    /// `point_offset`。
    pub fn edit_timestamps(
        &self,
        start_offset: f64,
        end_offset: f64,
        point_offset: f64,
        allow_overshoot: bool,
    ) -> Result<Self, TextgridError> {
        match self {
            Tier::Interval(tier) => Ok(Tier::Interval(tier.edit_timestamps(
                start_offset,
                end_offset,
                allow_overshoot,
            )?)),
            Tier::Point(tier) => Ok(Tier::Point(
                tier.edit_timestamps(point_offset, allow_overshoot)?,
            )),
        }
    }

    /// 把另一个同种类层级接在本层级之后。
    ///
    /// # Errors
    ///
    /// 两个层级种类不同时返回 [`TextgridError::Precondition`]。
    pub fn append_tier(&self, other: &Self, time_relative: bool) -> Result<Self, TextgridError> {
        match (self, other) {
            (Tier::Interval(a), Tier::Interval(b)) => {
                Ok(Tier::Interval(a.append_tier(b, time_relative)?))
            }
            (Tier::Point(a), Tier::Point(b)) => Ok(Tier::Point(a.append_tier(b, time_relative)?)),
            _ => Err(TextgridError::Precondition(format!(
                "无法把 {} 层级接到 {} 层级之后",
                other.kind(),
                self.kind()
            ))),
        }
    }

    /// 两个层级在相对容差内是否相等。种类不同时恒为假。
    #[must_use]
    pub fn approx_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Tier::Interval(a), Tier::Interval(b)) => a.approx_eq(b),
            (Tier::Point(a), Tier::Point(b)) => a.approx_eq(b),
            _ => false,
        }
    }
}

impl From<IntervalTier> for Tier {
    fn from(tier: IntervalTier) -> Self {
        Tier::Interval(tier)
    }
}

impl From<PointTier> for Tier {
    fn from(tier: PointTier) -> Self {
        Tier::Point(tier)
    }
}
