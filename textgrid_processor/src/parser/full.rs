//! # 普通方言扫描器
//!
//! 普通方言是 `item []:` 嵌套的键值对形式。按层级块关键字切分文本,
//! 在每个块内先从键值行提取元信息, 再迭代提取条目三元组/二元组,
//! 直到提取失败为止（提取失败即一个块的自然结束）。

use textgrid_helper_core::{
    Interval, IntervalTier, Point, PointTier, Textgrid, TextgridError, Tier, TierKind,
};

use super::utils::fetch_row;
use super::{Dialect, TIER_ARRAY_KEYWORD};

/// 区间层的类别标记行。
const INTERVAL_CLASS_LINE: &str = "class = \"IntervalTier\"";

fn parse_error(context: impl Into<String>) -> TextgridError {
    TextgridError::parse(Dialect::Full.to_string(), context)
}

/// 解析普通方言文本。
pub(crate) fn parse(data: &str) -> Result<Textgrid, TextgridError> {
    // 丢弃文件头, 其后每个层级块关键字开启一个层级
    let (_, body) = data
        .split_once(TIER_ARRAY_KEYWORD)
        .ok_or_else(|| parse_error("找不到任何层级块"))?;

    let mut textgrid = Textgrid::new();
    for block in body.split(TIER_ARRAY_KEYWORD).skip(1) {
        parse_tier_block(block, &mut textgrid)?;
    }
    Ok(textgrid)
}

fn parse_tier_block(block: &str, textgrid: &mut Textgrid) -> Result<(), TextgridError> {
    let (kind, entries_keyword) = if block.contains(INTERVAL_CLASS_LINE) {
        (TierKind::Interval, "intervals")
    } else {
        (TierKind::Point, "points")
    };

    let (header, entry_data) = block.split_once(entries_keyword).ok_or_else(|| {
        parse_error(format!("层级块中找不到 \"{entries_keyword}\" 子块"))
    })?;

    let name = header_field(header, "name = ")
        .ok_or_else(|| parse_error("层级块中找不到 name 字段"))?;
    let min_time = header_number(header, "xmin = ")?;
    let max_time = header_number(header, "xmax = ")?;

    let tier = match kind {
        TierKind::Interval => {
            let mut entries: Vec<Interval> = Vec::new();
            let mut cursor = 0usize;
            loop {
                let Some((start_text, after_start)) = fetch_row(entry_data, "xmin = ", cursor)
                else {
                    break;
                };
                let Some((end_text, after_end)) = fetch_row(entry_data, "xmax = ", after_start)
                else {
                    break;
                };
                let Some((label, after_label)) = fetch_row(entry_data, "text =", after_end)
                else {
                    break;
                };
                cursor = after_label;

                let (Ok(start), Ok(end)) = (start_text.parse::<f64>(), end_text.parse::<f64>())
                else {
                    break;
                };
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
            let mut cursor = 0usize;
            loop {
                let Some((time_text, after_time)) = fetch_row(entry_data, "number = ", cursor)
                else {
                    break;
                };
                let Some((label, after_label)) = fetch_row(entry_data, "mark =", after_time)
                else {
                    break;
                };
                cursor = after_label;

                let Ok(time) = time_text.parse::<f64>() else {
                    break;
                };
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

/// 键值行中 `key` 之后到行尾的值, 去除空白和两端引号。
fn header_field(header: &str, key: &str) -> Option<String> {
    let (_, rest) = header.split_once(key)?;
    let mut value = rest.lines().next().unwrap_or("").trim();
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value = value[1..value.len() - 1].trim();
    }
    Some(value.to_string())
}

fn header_number(header: &str, key: &str) -> Result<f64, TextgridError> {
    let text = header_field(header, key)
        .ok_or_else(|| parse_error(format!("层级块中找不到 {key}字段")))?;
    Ok(text.parse::<f64>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"File type = "ooTextFile"
Object class = "TextGrid"

xmin = 0
xmax = 2.5
tiers? <exists>
size = 2
item []:
    item [1]:
        class = "IntervalTier"
        name = "words"
        xmin = 0
        xmax = 2.5
        intervals: size = 3
        intervals [1]:
            xmin = 0
            xmax = 1
            text = "hello"
        intervals [2]:
            xmin = 1
            xmax = 1.5
            text = ""
        intervals [3]:
            xmin = 1.5
            xmax = 2.5
            text = "world"
    item [2]:
        class = "TextTier"
        name = "events"
        xmin = 0
        xmax = 2.5
        points: size = 1
        points [1]:
            number = 2
            mark = "click"
"#;

    #[test]
    fn parses_both_tier_kinds() {
        let textgrid = parse(FIXTURE).unwrap();
        assert_eq!(textgrid.tier_names(), ["words", "events"]);

        let Some(Tier::Interval(words)) = textgrid.tier("words") else {
            panic!("缺少 words 层级");
        };
        assert_eq!(words.min_time(), 0.0);
        assert_eq!(words.max_time(), 2.5);
        // 空标签条目在解析时即被跳过
        let labels: Vec<&str> = words.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["hello", "world"]);

        let Some(Tier::Point(events)) = textgrid.tier("events") else {
            panic!("缺少 events 层级");
        };
        assert_eq!(events.entries().len(), 1);
        assert_eq!(events.entries()[0].time, 2.0);
        assert_eq!(events.entries()[0].label, "click");
    }

    #[test]
    fn missing_tier_blocks_is_an_error() {
        let err = parse("File type = \"ooTextFile\"\n").unwrap_err();
        assert!(matches!(err, TextgridError::Parse { .. }));
    }

    #[test]
    fn header_field_handles_quotes_and_bare_values() {
        assert_eq!(header_field("name = \"a b\"\n", "name = ").unwrap(), "a b");
        assert_eq!(header_field("xmin = 3.5\n", "xmin = ").unwrap(), "3.5");
        assert!(header_field("xmin = 3.5\n", "xmax = ").is_none());
    }
}
