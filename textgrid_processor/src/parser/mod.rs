//! # TextGrid 文本解析器
//!
//! 两种方言各由一个独立的扫描例程处理, 共享同一个按字节偏移提取
//! 字段的原语, 产出相同的 `Textgrid` 中间表示。

mod full;
mod short;
mod utils;

use std::fmt;

use tracing::debug;

use textgrid_helper_core::{Textgrid, TextgridError};

/// 短方言的文件头标记。
const SHORT_DIALECT_MARKER: &str = "ooTextFile short";

/// 普通方言中分隔层级块的关键字。
const TIER_ARRAY_KEYWORD: &str = "item";

/// TextGrid 文件的两种文本方言。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// 按位置排列字段的紧凑形式, 也是写出时使用的规范形式。
    Short,
    /// `item []:` 嵌套的键值对形式, 只读不写。
    Full,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Short => f.write_str("short"),
            Dialect::Full => f.write_str("full"),
        }
    }
}

/// 判断文本使用哪种方言。
///
/// 含有短方言文件头标记, 或完全不含层级块关键字的文本按短方言处理,
/// 其余按普通方言处理。
#[must_use]
pub fn detect_dialect(data: &str) -> Dialect {
    if data.contains(SHORT_DIALECT_MARKER) || !data.contains(TIER_ARRAY_KEYWORD) {
        Dialect::Short
    } else {
        Dialect::Full
    }
}

/// 解析 TextGrid 文本。
///
/// 自动检测方言, 统一行尾, 解析完成后剥离所有空标签条目
/// （空标签在解析中已被跳过, 这里再兜底一次, 覆盖标签去除
/// 空白后才变空的情况）。
///
/// # Errors
///
/// 无法在预期位置找到字段或分隔符时返回 [`TextgridError::Parse`]。
pub fn parse_textgrid(data: &str) -> Result<Textgrid, TextgridError> {
    let data = data.replace("\r\n", "\n");
    let dialect = detect_dialect(&data);
    debug!(%dialect, "解析 TextGrid 文本");
    let textgrid = match dialect {
        Dialect::Short => short::parse(&data)?,
        Dialect::Full => full::parse(&data)?,
    };
    Ok(textgrid.remove_labels("", None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_marker_wins() {
        assert_eq!(
            detect_dialect("File type = \"ooTextFile short\"\nitem\n"),
            Dialect::Short
        );
    }

    #[test]
    fn missing_tier_array_keyword_means_short() {
        assert_eq!(detect_dialect("\"IntervalTier\"\n"), Dialect::Short);
    }

    #[test]
    fn keyed_blocks_mean_full() {
        assert_eq!(detect_dialect("item []:\n    item [1]:\n"), Dialect::Full);
    }
}
