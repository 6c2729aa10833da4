//! # TextGrid 生成器
//!
//! 只写出规范的短方言形式。写出前每个区间层都会按整个 Textgrid
//! 的时间范围补齐空白条目, 保证文件中的区间层连续覆盖
//! `[min_time, max_time]`。

use std::fmt::Write as FmtWrite;

use textgrid_helper_core::{Textgrid, TextgridError, Tier, TierKind};

/// 把 Textgrid 序列化为短方言文本。
///
/// 实数一律使用最短往返文本形式, 标签带引号写出。
///
/// # Errors
///
/// 仅在底层字符串格式化失败时返回 [`TextgridError::Format`]。
pub fn generate_textgrid(textgrid: &Textgrid) -> Result<String, TextgridError> {
    let min_time = textgrid.min_time().unwrap_or(0.0);
    let max_time = textgrid.max_time().unwrap_or(0.0);

    let mut output = String::new();
    writeln!(output, "File type = \"ooTextFile short\"")?;
    writeln!(output, "\"TextGrid\"")?;
    writeln!(output)?;
    writeln!(output, "{min_time}")?;
    writeln!(output, "{max_time}")?;
    writeln!(output, "<exists>")?;
    writeln!(output, "{}", textgrid.tier_count())?;

    for tier in textgrid.tiers() {
        match tier {
            Tier::Interval(interval_tier) => {
                let filled = interval_tier.fill_gaps("", Some(min_time), Some(max_time));
                write_tier_header(
                    &mut output,
                    TierKind::Interval,
                    filled.name(),
                    filled.min_time(),
                    filled.max_time(),
                    filled.entries().len(),
                )?;
                for entry in filled.entries() {
                    writeln!(output, "{}", entry.start)?;
                    writeln!(output, "{}", entry.end)?;
                    writeln!(output, "\"{}\"", entry.label)?;
                }
            }
            Tier::Point(point_tier) => {
                write_tier_header(
                    &mut output,
                    TierKind::Point,
                    point_tier.name(),
                    point_tier.min_time(),
                    point_tier.max_time(),
                    point_tier.entries().len(),
                )?;
                for point in point_tier.entries() {
                    writeln!(output, "{}", point.time)?;
                    writeln!(output, "\"{}\"", point.label)?;
                }
            }
        }
    }

    Ok(output)
}

fn write_tier_header(
    output: &mut String,
    kind: TierKind,
    name: &str,
    min_time: f64,
    max_time: f64,
    entry_count: usize,
) -> Result<(), TextgridError> {
    writeln!(output, "\"{}\"", kind.class_marker())?;
    writeln!(output, "\"{name}\"")?;
    writeln!(output, "{min_time}")?;
    writeln!(output, "{max_time}")?;
    writeln!(output, "{entry_count}")?;
    Ok(())
}
