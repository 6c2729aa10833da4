//! 两种方言共用的字段提取原语。
//!
//! 所有字符串偏移运算都集中在这里, 两个扫描例程只在其上组合。

/// 从 `data` 的 `from` 偏移开始, 取 `search` 之后到行尾的字段。
///
/// 字段去除首尾空白; 两端都是引号时去除引号后再次去除空白。
/// 返回字段内容和下一行的起始偏移。找不到 `search`、该行没有
/// 换行符, 或字段完全为空（连引号都没有）时返回 `None`,
/// 这被调用方当作一段条目序列结束的信号。
pub(crate) fn fetch_row(data: &str, search: &str, from: usize) -> Option<(String, usize)> {
    let field_start = data.get(from..)?.find(search)? + from + search.len();
    let line_end = field_start + data.get(field_start..)?.find('\n')?;

    let mut word = data[field_start..line_end].trim();
    if word.is_empty() {
        return None;
    }
    if word.len() >= 2 && word.starts_with('"') && word.ends_with('"') {
        word = word[1..word.len() - 1].trim();
    }
    Some((word.to_string(), line_end + 1))
}

/// `needle` 在 `data` 中出现的所有字节偏移。
pub(crate) fn find_all(data: &str, needle: &str) -> Vec<usize> {
    data.match_indices(needle).map(|(offset, _)| offset).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_row_unquotes_and_trims() {
        let data = "xmin = 1.5\ntext = \" hi there \"\n";
        let (value, next) = fetch_row(data, "xmin = ", 0).unwrap();
        assert_eq!(value, "1.5");
        let (label, _) = fetch_row(data, "text =", next).unwrap();
        assert_eq!(label, "hi there");
    }

    #[test]
    fn fetch_row_accepts_quoted_empty_fields() {
        let (value, _) = fetch_row("\"\"\n", "", 0).unwrap();
        assert_eq!(value, "");
    }

    #[test]
    fn fetch_row_fails_on_blank_or_unterminated_lines() {
        assert!(fetch_row("\n", "", 0).is_none());
        assert!(fetch_row("no newline", "", 0).is_none());
        assert!(fetch_row("abc\n", "missing = ", 0).is_none());
    }

    #[test]
    fn find_all_returns_every_offset() {
        assert_eq!(find_all("ababa", "aba"), vec![0]);
        assert_eq!(find_all("x\"T\"y\"T\"", "\"T\""), vec![1, 5]);
        assert!(find_all("xyz", "q").is_empty());
    }
}
