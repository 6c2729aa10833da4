//! # 短方言扫描器
//!
//! 短方言没有层级块关键字, 只能靠两种层级类型标记在原文中的位置
//! 来划分层级块。块内的头部字段和条目全部按位置逐行消费,
//! 直到某一行不能按预期解析为止。

use textgrid_helper_core::{
    Interval, IntervalTier, Point, PointTier, Textgrid, TextgridError, Tier, TierKind,
};

use super::Dialect;
use super::utils::{fetch_row, find_all};

fn parse_error(context: impl Into<String>) -> TextgridError {
    TextgridError::parse(Dialect::Short.to_string(), context)
}

/// 解析短方言文本。
pub(crate) fn parse(data: &str) -> Result<Textgrid, TextgridError> {
    let mut markers: Vec<(usize, TierKind)> = Vec::new();
    for kind in [TierKind::Interval, TierKind::Point] {
        let quoted_marker = format!("\"{}\"", kind.class_marker());
        markers.extend(
            find_all(data, &quoted_marker)
                .into_iter()
                .map(|offset| (offset, kind)),
        );
    }
    markers.sort_by_key(|(offset, _)| *offset);

    let mut textgrid = Textgrid::new();
    for (index, (block_start, kind)) in markers.iter().enumerate() {
        let block_end = markers
            .get(index + 1)
            .map_or(data.len(), |(next_start, _)| *next_start);
        parse_tier_block(&data[*block_start..block_end], *kind, &mut textgrid)?;
    }
    Ok(textgrid)
}

fn parse_tier_block(
    block: &str,
    kind: TierKind,
    textgrid: &mut Textgrid,
) -> Result<(), TextgridError> {
    // 第一行是类型标记, 内容已知, 跳过
    let (_, cursor) =
        fetch_row(block, "", 0).ok_or_else(|| parse_error("层级块在类型标记处截断"))?;

    let (name, cursor) =
        fetch_row(block, "", cursor).ok_or_else(|| parse_error("找不到层级名"))?;
    let (min_text, cursor) =
        fetch_row(block, "", cursor).ok_or_else(|| parse_error("找不到层级的开始时间"))?;
    let (max_text, cursor) =
        fetch_row(block, "", cursor).ok_or_else(|| parse_error("找不到层级的结束时间"))?;
    // 条目数量行只定位, 不使用: 条目靠逐行解析自然终止
    let (_, mut cursor) =
        fetch_row(block, "", cursor).ok_or_else(|| parse_error("找不到条目数量"))?;

    let min_time = min_text.parse::<f64>()?;
    let max_time = max_text.parse::<f64>()?;

    let tier = match kind {
        TierKind::Interval => {
            let mut entries: Vec<Interval> = Vec::new();
            loop {
                let Some((start_text, after_start)) = fetch_row(block, "", cursor) else {
                    break;
                };
                let Some((end_text, after_end)) = fetch_row(block, "", after_start) else {
                    break;
                };
                let Some((label, after_label)) = fetch_row(block, "", after_end) else {
                    break;
                };
                let (Ok(start), Ok(end)) = (start_text.parse::<f64>(), end_text.parse::<f64>())
                else {
                    break;
                };
                cursor = after_label;

                if label.is_empty() {
                    continue;
                }
                entries.push(Interval::new(start, end, label)?);
            }
            Tier::Interval(IntervalTier::new(
                name,
                entries,
                Some(min_time),
                Some(max_time),
            )?)
        }
        TierKind::Point => {
            let mut entries: Vec<Point> = Vec::new();
            loop {
                let Some((time_text, after_time)) = fetch_row(block, "", cursor) else {
                    break;
                };
                let Some((label, after_label)) = fetch_row(block, "", after_time) else {
                    break;
                };
                let Ok(time) = time_text.parse::<f64>() else {
                    break;
                };
                cursor = after_label;

                if label.is_empty() {
                    continue;
                }
                entries.push(Point::new(time, label));
            }
            Tier::Point(PointTier::new(
                name,
                entries,
                Some(min_time),
                Some(max_time),
            )?)
        }
    };

    textgrid.add_tier(tier, None)
}
