use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::TextgridError;
use crate::model::entry::{CropMode, Entry, Interval, Point};
use crate::model::overlap::{OverlapCriteria, intervals_overlap};
use crate::model::tier::{IntervalTier, PointTier, Tier, times_close};

/// 融合相邻重叠条目时使用的标签连接符。
const TIER_MERGE_LABEL_SEPARATOR: &str = " / ";

/// 合并产生的层级名使用的连接符。
const MERGE_TIER_NAME_SEPARATOR: &str = "/";

/// Textgrid: 共享一条时间轴、名称唯一且有序的层级集合。
///
/// 从空集合开始, 逐个添加层级; 聚合边界在每次添加时更新。
/// 跨层级的变换操作总是产生新的 Textgrid, 不与输入共享层级。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Textgrid {
    tier_order: Vec<String>,
    tiers: HashMap<String, Tier>,
    min_time: Option<f64>,
    max_time: Option<f64>,
}

impl Textgrid {
    /// 创建一个空的 Textgrid。
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 按添加顺序排列的层级名。
    #[must_use]
    pub fn tier_names(&self) -> &[String] {
        &self.tier_order
    }

    /// 按名称取层级。
    #[must_use]
    pub fn tier(&self, name: &str) -> Option<&Tier> {
        self.tiers.get(name)
    }

    /// 按添加顺序迭代所有层级。
    pub fn tiers(&self) -> impl Iterator<Item = &Tier> {
        self.tier_order.iter().filter_map(|name| self.tiers.get(name))
    }

    /// 层级数量。
    #[must_use]
    pub fn tier_count(&self) -> usize {
        self.tier_order.len()
    }

    /// 是否不含任何层级。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tier_order.is_empty()
    }

    /// 所有层级边界的最小值, 空 Textgrid 为 `None`。
    #[must_use]
    pub fn min_time(&self) -> Option<f64> {
        self.min_time
    }

    /// 所有层级边界的最大值, 空 Textgrid 为 `None`。
    #[must_use]
    pub fn max_time(&self) -> Option<f64> {
        self.max_time
    }

    fn expand_bounds(&mut self, tier: &Tier) {
        let tier_min = tier.min_time();
        self.min_time = Some(self.min_time.map_or(tier_min, |m| m.min(tier_min)));
        let tier_max = tier.max_time();
        self.max_time = Some(self.max_time.map_or(tier_max, |m| m.max(tier_max)));
    }

    /// 添加一个层级, `index` 缺省时追加到末尾。
    ///
    /// # Errors
    ///
    /// 同名层级已存在时返回 [`TextgridError::Precondition`]。
    pub fn add_tier(&mut self, tier: Tier, index: Option<usize>) -> Result<(), TextgridError> {
        if self.tiers.contains_key(tier.name()) {
            return Err(TextgridError::Precondition(format!(
                "层级名 \"{}\" 已存在",
                tier.name()
            )));
        }
        let index = index.unwrap_or(self.tier_order.len()).min(self.tier_order.len());
        self.tier_order.insert(index, tier.name().to_string());
        self.expand_bounds(&tier);
        self.tiers.insert(tier.name().to_string(), tier);
        Ok(())
    }

    /// 内部添加: 调用方保证名称唯一（来自同一 Textgrid 的层级名）。
    fn add_tier_unchecked(&mut self, tier: Tier) {
        debug_assert!(!self.tiers.contains_key(tier.name()));
        self.tier_order.push(tier.name().to_string());
        self.expand_bounds(&tier);
        self.tiers.insert(tier.name().to_string(), tier);
    }

    /// 移除并返回指定层级。
    ///
    /// # Errors
    ///
    /// 层级不存在时返回 [`TextgridError::Precondition`]。
    pub fn remove_tier(&mut self, name: &str) -> Result<Tier, TextgridError> {
        let index = self
            .tier_order
            .iter()
            .position(|existing| existing == name)
            .ok_or_else(|| {
                TextgridError::Precondition(format!("层级 \"{name}\" 不存在"))
            })?;
        self.tier_order.remove(index);
        self.tiers.remove(name).ok_or_else(|| {
            TextgridError::Precondition(format!("层级 \"{name}\" 不存在"))
        })
    }

    /// 重命名一个层级, 其余层级和相对顺序保持不变。
    ///
    /// # Errors
    ///
    /// 原名不存在或新名已被占用时返回 [`TextgridError::Precondition`]。
    pub fn rename_tier(&mut self, old_name: &str, new_name: &str) -> Result<(), TextgridError> {
        if old_name != new_name && self.tiers.contains_key(new_name) {
            return Err(TextgridError::Precondition(format!(
                "层级名 \"{new_name}\" 已存在"
            )));
        }
        let index = self
            .tier_order
            .iter()
            .position(|existing| existing == old_name)
            .ok_or_else(|| {
                TextgridError::Precondition(format!("层级 \"{old_name}\" 不存在"))
            })?;
        let tier = self.remove_tier(old_name)?;
        self.add_tier(tier.with_name(new_name), Some(index))
    }

    /// 用一个新层级替换同位置的旧层级。
    ///
    /// # Errors
    ///
    /// 旧层级不存在, 或新层级名与其它层级冲突时返回
    /// [`TextgridError::Precondition`]。
    pub fn replace_tier(&mut self, name: &str, tier: Tier) -> Result<(), TextgridError> {
        if tier.name() != name && self.tiers.contains_key(tier.name()) {
            return Err(TextgridError::Precondition(format!(
                "层级名 \"{}\" 已存在",
                tier.name()
            )));
        }
        let index = self
            .tier_order
            .iter()
            .position(|existing| existing == name)
            .ok_or_else(|| {
                TextgridError::Precondition(format!("层级 \"{name}\" 不存在"))
            })?;
        self.remove_tier(name)?;
        self.add_tier(tier, Some(index))
    }

    /// 用同一窗口裁剪每个层级, 窗口缺省取 Textgrid 自身的边界。
    /// 区间层的裁剪统计被丢弃。
    #[must_use]
    pub fn crop(&self, mode: CropMode, start: Option<f64>, end: Option<f64>) -> Self {
        let start = start.or(self.min_time).unwrap_or(0.0);
        let end = end.or(self.max_time).unwrap_or(0.0);

        let mut result = Self::new();
        for tier in self.tiers() {
            result.add_tier_unchecked(tier.crop(start, end, mode));
        }
        result
    }

    /// 平移每个层级的时间戳; 没有条目的层级原样保留。
    pub fn edit_timestamps(
        &self,
        start_offset: f64,
        end_offset: f64,
        point_offset: f64,
        allow_overshoot: bool,
    ) -> Result<Self, TextgridError> {
        let mut result = Self::new();
        for tier in self.tiers() {
            let shifted = if tier.is_empty() {
                tier.clone()
            } else {
                tier.edit_timestamps(start_offset, end_offset, point_offset, allow_overshoot)?
            };
            result.add_tier_unchecked(shifted);
        }
        Ok(result)
    }

    /// 把若干区间层合并为一个层级。
    ///
    /// 选中层级（缺省为全部）的条目汇总后先经 `include` 过滤
    /// （缺省丢弃空标签条目）, 排序, 再从左到右把相邻重叠的条目
    /// 融合为一个跨越两者的条目, 标签用 `" / "` 连接;
    /// 融合结果继续与后继条目比较。未参与合并的层级可以原样保留。
    ///
    /// # Errors
    ///
    /// 选中的层级不存在或不是区间层, 或融合后没有任何条目时返回错误。
    pub fn merge_tiers(
        &self,
        include: Option<&dyn Fn(&Interval) -> bool>,
        tier_names: Option<&[&str]>,
        preserve_others: bool,
    ) -> Result<Self, TextgridError> {
        let names: Vec<&str> = tier_names.map_or_else(
            || self.tier_order.iter().map(String::as_str).collect(),
            <[&str]>::to_vec,
        );
        let default_include = |entry: &Interval| !entry.label.is_empty();
        let include = include.unwrap_or(&default_include);

        let mut pooled: Vec<Interval> = Vec::new();
        for name in &names {
            let tier = self.tier(name).ok_or_else(|| {
                TextgridError::Precondition(format!("层级 \"{name}\" 不存在"))
            })?;
            match tier {
                Tier::Interval(interval_tier) => {
                    pooled.extend(interval_tier.entries().iter().cloned());
                }
                Tier::Point(_) => {
                    return Err(TextgridError::Precondition(format!(
                        "无法合并时间点层级 \"{name}\""
                    )));
                }
            }
        }
        pooled.retain(|entry| include(entry));
        pooled.sort_by(Interval::cmp_order);

        // 从左到右融合, 新融合出的条目继续参与与后继的比较
        let mut fused: Vec<Interval> = Vec::new();
        for entry in pooled {
            if let Some(last) = fused.last_mut()
                && intervals_overlap(
                    (last.start, last.end),
                    (entry.start, entry.end),
                    OverlapCriteria::default(),
                )
            {
                last.end = last.end.max(entry.end);
                last.label =
                    format!("{}{TIER_MERGE_LABEL_SEPARATOR}{}", last.label, entry.label);
                continue;
            }
            fused.push(entry);
        }

        let merged_name = names.join(MERGE_TIER_NAME_SEPARATOR);
        let merged_tier = IntervalTier::new(merged_name, fused, None, None)?;

        let mut result = Self::new();
        if preserve_others {
            for tier in self.tiers() {
                if !names.contains(&tier.name()) {
                    result.add_tier(tier.clone(), None)?;
                }
            }
        }
        result.add_tier(Tier::Interval(merged_tier), None)?;
        Ok(result)
    }

    /// 对父层级的每个条目, 给出其它每个层级中完全嵌套在该条目
    /// 时间跨度内的条目列表。
    ///
    /// 利用条目的有序性, 一旦某条目开始于父条目结束之后即提前结束
    /// 该层级的扫描; 这只是优化, 不改变结果。
    ///
    /// # Errors
    ///
    /// 父层级不存在或不是区间层时返回 [`TextgridError::Precondition`]。
    pub fn get_contained_labels(
        &self,
        super_tier: &str,
    ) -> Result<Vec<HashMap<String, Vec<Entry>>>, TextgridError> {
        let Some(Tier::Interval(super_entries)) = self.tier(super_tier) else {
            return Err(TextgridError::Precondition(format!(
                "父层级 \"{super_tier}\" 不存在或不是区间层"
            )));
        };

        let mut results = Vec::with_capacity(super_entries.entries().len());
        for super_entry in super_entries.entries() {
            let mut contained: HashMap<String, Vec<Entry>> = HashMap::new();
            for tier in self.tiers() {
                if tier.name() == super_tier {
                    continue;
                }
                let mut nested: Vec<Entry> = Vec::new();
                match tier {
                    Tier::Interval(interval_tier) => {
                        for entry in interval_tier.entries() {
                            if entry.start > super_entry.end {
                                break;
                            }
                            if super_entry.start <= entry.start && entry.end <= super_entry.end {
                                nested.push(entry.clone().into());
                            }
                        }
                    }
                    Tier::Point(point_tier) => {
                        for point in point_tier.entries() {
                            if point.time > super_entry.end {
                                break;
                            }
                            if super_entry.start <= point.time {
                                nested.push(point.clone().into());
                            }
                        }
                    }
                }
                contained.insert(tier.name().to_string(), nested);
            }
            results.push(contained);
        }
        Ok(results)
    }

    /// 围绕父层级中每个满足 `qualify` 的条目裁剪其余层级,
    /// 把收集到的条目按层级汇总成一个新的 Textgrid。
    ///
    /// `strict` 为真时只保留完全落在父条目内的条目,
    /// 否则跨界条目被截断到父条目的范围。父层级自身原样保留。
    ///
    /// # Errors
    ///
    /// 父层级不存在或不是区间层时返回 [`TextgridError::Precondition`]。
    pub fn get_subtextgrid(
        &self,
        super_tier: &str,
        qualify: &dyn Fn(&Interval) -> bool,
        strict: bool,
    ) -> Result<Self, TextgridError> {
        let Some(Tier::Interval(super_entries)) = self.tier(super_tier) else {
            return Err(TextgridError::Precondition(format!(
                "父层级 \"{super_tier}\" 不存在或不是区间层"
            )));
        };
        let mode = if strict {
            CropMode::Strict
        } else {
            CropMode::Truncated
        };

        let mut interval_pool: HashMap<String, Vec<Interval>> = HashMap::new();
        let mut point_pool: HashMap<String, Vec<Point>> = HashMap::new();
        for super_entry in super_entries.entries().iter().filter(|e| qualify(e)) {
            for tier in self.tiers() {
                if tier.name() == super_tier {
                    continue;
                }
                match tier {
                    Tier::Interval(interval_tier) => {
                        let (cropped, _) =
                            interval_tier.crop(super_entry.start, super_entry.end, mode);
                        interval_pool
                            .entry(tier.name().to_string())
                            .or_default()
                            .extend(cropped.entries().iter().cloned());
                    }
                    Tier::Point(point_tier) => {
                        let cropped = point_tier.crop(super_entry.start, super_entry.end);
                        point_pool
                            .entry(tier.name().to_string())
                            .or_default()
                            .extend(cropped.entries().iter().cloned());
                    }
                }
            }
        }

        let mut result = Self::new();
        for tier in self.tiers() {
            let rebuilt = if tier.name() == super_tier {
                tier.clone()
            } else {
                match tier {
                    Tier::Interval(interval_tier) => Tier::Interval(IntervalTier::new(
                        interval_tier.name(),
                        interval_pool.remove(interval_tier.name()).unwrap_or_default(),
                        Some(interval_tier.min_time()),
                        Some(interval_tier.max_time()),
                    )?),
                    Tier::Point(point_tier) => Tier::Point(PointTier::new(
                        point_tier.name(),
                        point_pool.remove(point_tier.name()).unwrap_or_default(),
                        Some(point_tier.min_time()),
                        Some(point_tier.max_time()),
                    )?),
                }
            };
            result.add_tier_unchecked(rebuilt);
        }
        Ok(result)
    }

    /// 从选中层级（缺省为全部）中去掉所有标签精确等于 `label` 的
    /// 条目, 其余层级原样保留。
    #[must_use]
    pub fn remove_labels(&self, label: &str, tier_names: Option<&[&str]>) -> Self {
        let mut result = Self::new();
        for tier in self.tiers() {
            let selected = tier_names.is_none_or(|names| names.contains(&tier.name()));
            let new_tier = if selected {
                tier.without_label(label)
            } else {
                tier.clone()
            };
            result.add_tier_unchecked(new_tier);
        }
        result
    }

    /// 把另一个 Textgrid 接在本 Textgrid 之后。
    ///
    /// 两边同名的层级按时间先后拼接; `only_matching_names` 为假时,
    /// 只出现在一边的层级也会被保留（另一边的层级整体平移到本
    /// Textgrid 的 `max_time` 之后）。
    pub fn append_textgrid(
        &self,
        other: &Self,
        only_matching_names: bool,
    ) -> Result<Self, TextgridError> {
        let shift = self.max_time.unwrap_or(0.0);

        let mut result = Self::new();
        for tier in self.tiers() {
            if let Some(other_tier) = other.tier(tier.name()) {
                result.add_tier(tier.append_tier(other_tier, true)?, None)?;
            } else if !only_matching_names {
                result.add_tier(tier.clone(), None)?;
            }
        }
        if !only_matching_names {
            for tier in other.tiers() {
                if !result.tiers.contains_key(tier.name()) {
                    let shifted = tier.edit_timestamps(shift, shift, shift, true)?;
                    result.add_tier(shifted, None)?;
                }
            }
        }
        Ok(result)
    }

    /// 两个 Textgrid 在相对容差内是否相等:
    /// 层级顺序与名称精确一致, 各层级两两近似相等。
    #[must_use]
    pub fn approx_eq(&self, other: &Self) -> bool {
        fn bounds_close(a: Option<f64>, b: Option<f64>) -> bool {
            match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => times_close(a, b),
                _ => false,
            }
        }

        self.tier_order == other.tier_order
            && bounds_close(self.min_time, other.min_time)
            && bounds_close(self.max_time, other.max_time)
            && self.tiers().zip(other.tiers()).all(|(a, b)| a.approx_eq(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::TierKind;

    fn interval(start: f64, end: f64, label: &str) -> Interval {
        Interval::new(start, end, label).unwrap()
    }

    fn interval_tier(name: &str, entries: Vec<Interval>) -> Tier {
        Tier::Interval(IntervalTier::new(name, entries, None, None).unwrap())
    }

    fn sample_grid() -> Textgrid {
        let mut tg = Textgrid::new();
        tg.add_tier(
            interval_tier(
                "words",
                vec![interval(0.0, 2.0, "hello"), interval(2.0, 4.0, "world")],
            ),
            None,
        )
        .unwrap();
        tg.add_tier(
            interval_tier(
                "phones",
                vec![
                    interval(0.0, 1.0, "h"),
                    interval(1.0, 2.0, "ə"),
                    interval(2.0, 3.0, "w"),
                    interval(3.0, 5.0, "d"),
                ],
            ),
            None,
        )
        .unwrap();
        tg
    }

    #[test]
    fn add_tier_rejects_duplicate_names_and_updates_bounds() {
        let mut tg = sample_grid();
        assert_eq!(tg.min_time(), Some(0.0));
        assert_eq!(tg.max_time(), Some(5.0));
        assert_eq!(tg.tier_names(), ["words", "phones"]);

        let err = tg
            .add_tier(interval_tier("words", vec![interval(0.0, 1.0, "x")]), None)
            .unwrap_err();
        assert!(matches!(err, TextgridError::Precondition(_)));
    }

    #[test]
    fn add_tier_at_index_preserves_order() {
        let mut tg = sample_grid();
        tg.add_tier(
            Tier::Point(
                PointTier::new("events", vec![Point::new(1.5, "click")], None, None).unwrap(),
            ),
            Some(1),
        )
        .unwrap();
        assert_eq!(tg.tier_names(), ["words", "events", "phones"]);
    }

    #[test]
    fn crop_defaults_to_own_bounds() {
        let tg = sample_grid();
        let cropped = tg.crop(CropMode::Truncated, Some(1.0), None);
        let Some(Tier::Interval(words)) = cropped.tier("words") else {
            panic!("缺少 words 层级");
        };
        assert_eq!(
            words.entries(),
            &[interval(1.0, 2.0, "hello"), interval(2.0, 4.0, "world")]
        );
        assert_eq!(cropped.tier_names(), ["words", "phones"]);
    }

    #[test]
    fn merge_tiers_fuses_chained_overlaps() {
        let mut tg = Textgrid::new();
        tg.add_tier(
            interval_tier("a", vec![interval(0.0, 2.0, "x"), interval(5.0, 6.0, "q")]),
            None,
        )
        .unwrap();
        tg.add_tier(
            interval_tier("b", vec![interval(1.0, 3.0, "y"), interval(2.5, 4.0, "z")]),
            None,
        )
        .unwrap();

        let merged = tg.merge_tiers(None, None, true).unwrap();
        assert_eq!(merged.tier_names(), ["a/b"]);
        let Some(Tier::Interval(tier)) = merged.tier("a/b") else {
            panic!("缺少合并层级");
        };
        assert_eq!(
            tier.entries(),
            &[interval(0.0, 4.0, "x / y / z"), interval(5.0, 6.0, "q")]
        );
    }

    #[test]
    fn merge_tiers_default_include_drops_empty_labels() {
        let mut tg = Textgrid::new();
        tg.add_tier(
            Tier::Interval(
                IntervalTier::new(
                    "a",
                    vec![
                        interval(0.0, 1.0, "x"),
                        Interval {
                            start: 1.0,
                            end: 2.0,
                            label: String::new(),
                        },
                    ],
                    None,
                    None,
                )
                .unwrap(),
            ),
            None,
        )
        .unwrap();
        let merged = tg.merge_tiers(None, None, false).unwrap();
        let Some(Tier::Interval(tier)) = merged.tier("a") else {
            panic!("缺少合并层级");
        };
        assert_eq!(tier.entries(), &[interval(0.0, 1.0, "x")]);
    }

    #[test]
    fn merge_tiers_preserves_unmerged_tiers() {
        let tg = sample_grid();
        let merged = tg.merge_tiers(None, Some(&["phones"]), true).unwrap();
        assert_eq!(merged.tier_names(), ["words", "phones"]);
        assert!(merged.tier("words").is_some());
    }

    #[test]
    fn contained_labels_collects_nested_entries_only() {
        let mut tg = Textgrid::new();
        tg.add_tier(interval_tier("super", vec![interval(4.0, 10.0, "S")]), None)
            .unwrap();
        // (5,20) 跨出父条目, (6,7) 仍然嵌套其中
        tg.add_tier(
            interval_tier("sub", vec![interval(5.0, 20.0, "out"), interval(6.0, 7.0, "in")]),
            None,
        )
        .unwrap();

        let contained = tg.get_contained_labels("super").unwrap();
        assert_eq!(contained.len(), 1);
        assert_eq!(
            contained[0]["sub"],
            vec![Entry::Interval(interval(6.0, 7.0, "in"))]
        );
    }

    #[test]
    fn contained_labels_requires_interval_super_tier() {
        let mut tg = Textgrid::new();
        tg.add_tier(
            Tier::Point(PointTier::new("p", vec![Point::new(1.0, "a")], None, None).unwrap()),
            None,
        )
        .unwrap();
        assert!(tg.get_contained_labels("p").is_err());
        assert!(tg.get_contained_labels("missing").is_err());
    }

    #[test]
    fn remove_labels_touches_only_selected_tiers() {
        let mut tg = sample_grid();
        tg.add_tier(
            Tier::Point(
                PointTier::new("marks", vec![Point::new(0.5, "hello")], None, None).unwrap(),
            ),
            None,
        )
        .unwrap();

        let stripped = tg.remove_labels("hello", Some(&["words"]));
        let Some(Tier::Interval(words)) = stripped.tier("words") else {
            panic!("缺少 words 层级");
        };
        assert_eq!(words.entries(), &[interval(2.0, 4.0, "world")]);
        let Some(Tier::Point(marks)) = stripped.tier("marks") else {
            panic!("缺少 marks 层级");
        };
        assert_eq!(marks.entries().len(), 1);
    }

    #[test]
    fn structural_edits_preserve_order() {
        let mut tg = sample_grid();
        tg.rename_tier("words", "tokens").unwrap();
        assert_eq!(tg.tier_names(), ["tokens", "phones"]);
        assert_eq!(tg.tier("tokens").unwrap().kind(), TierKind::Interval);

        tg.replace_tier(
            "phones",
            interval_tier("phones", vec![interval(0.0, 1.0, "p")]),
        )
        .unwrap();
        assert_eq!(tg.tier_names(), ["tokens", "phones"]);
        assert_eq!(tg.tier("phones").unwrap().entry_count(), 1);

        let removed = tg.remove_tier("tokens").unwrap();
        assert_eq!(removed.name(), "tokens");
        assert_eq!(tg.tier_names(), ["phones"]);
        assert!(tg.remove_tier("tokens").is_err());
    }

    #[test]
    fn rename_to_existing_name_fails_without_corruption() {
        let mut tg = sample_grid();
        assert!(tg.rename_tier("words", "phones").is_err());
        assert_eq!(tg.tier_names(), ["words", "phones"]);
    }

    #[test]
    fn append_textgrid_shifts_matching_tiers() {
        let mut left = Textgrid::new();
        left.add_tier(interval_tier("words", vec![interval(0.0, 2.0, "a")]), None)
            .unwrap();
        let mut right = Textgrid::new();
        right
            .add_tier(interval_tier("words", vec![interval(0.0, 1.0, "b")]), None)
            .unwrap();

        let joined = left.append_textgrid(&right, true).unwrap();
        let Some(Tier::Interval(words)) = joined.tier("words") else {
            panic!("缺少 words 层级");
        };
        assert_eq!(
            words.entries(),
            &[interval(0.0, 2.0, "a"), interval(2.0, 3.0, "b")]
        );
    }

    #[test]
    fn subtextgrid_collects_qualifying_regions() {
        let tg = sample_grid();
        let sub = tg
            .get_subtextgrid("words", &|entry| entry.label == "world", false)
            .unwrap();
        let Some(Tier::Interval(phones)) = sub.tier("phones") else {
            panic!("缺少 phones 层级");
        };
        // world 覆盖 [2,4): w 完整保留, d 被截断到 4.0
        assert_eq!(
            phones.entries(),
            &[interval(2.0, 3.0, "w"), interval(3.0, 4.0, "d")]
        );
    }

    #[test]
    fn textgrid_serializes_to_json_and_back() {
        let tg = sample_grid();
        let json = serde_json::to_string(&tg).unwrap();
        let parsed: Textgrid = serde_json::from_str(&json).unwrap();
        assert_eq!(tg, parsed);
    }

    #[test]
    fn approx_eq_requires_same_tier_order() {
        let tg = sample_grid();
        assert!(tg.approx_eq(&tg.clone()));

        let mut reordered = Textgrid::new();
        for name in ["phones", "words"] {
            reordered.add_tier(tg.tier(name).unwrap().clone(), None).unwrap();
        }
        assert!(!tg.approx_eq(&reordered));
    }
}
