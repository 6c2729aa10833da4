//! 整文件读写与编码回退。
//!
//! Praat 写出的 TextGrid 常用带 BOM 的 UTF-16 编码。读取时先按
//! BOM 判定并解码 UTF-16, 失败则回退为 UTF-8 一次; 这是唯一的
//! 内建重试。写出一律使用 UTF-8。

use std::{fs, path::Path};

use encoding_rs::{UTF_16BE, UTF_16LE};
use tracing::debug;

use textgrid_helper_core::{Textgrid, TextgridError};

use crate::generator::generate_textgrid;
use crate::parser::parse_textgrid;

/// 读取并解析一个 TextGrid 文件。
///
/// # Errors
///
/// 文件不可读、两种编码都无法解码, 或文本无法按任一方言解析时
/// 返回相应错误。
pub fn read_textgrid_file(path: impl AsRef<Path>) -> Result<Textgrid, TextgridError> {
    let bytes = fs::read(path)?;
    let text = decode_textgrid_bytes(&bytes)?;
    parse_textgrid(&text)
}

/// 序列化并写出一个 TextGrid 文件。
///
/// # Errors
///
/// 序列化或写盘失败时返回相应错误。
pub fn write_textgrid_file(
    path: impl AsRef<Path>,
    textgrid: &Textgrid,
) -> Result<(), TextgridError> {
    let text = generate_textgrid(textgrid)?;
    fs::write(path, text)?;
    Ok(())
}

/// 把原始字节解码为文本, UTF-16 优先, UTF-8 兜底。
fn decode_textgrid_bytes(bytes: &[u8]) -> Result<String, TextgridError> {
    if bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF]) {
        let encoding = if bytes.starts_with(&[0xFF, 0xFE]) {
            UTF_16LE
        } else {
            UTF_16BE
        };
        let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
        if had_errors {
            debug!("UTF-16 解码失败, 回退到 UTF-8");
        } else {
            return Ok(text.into_owned());
        }
    }

    let without_bom = bytes
        .strip_prefix(&[0xEF, 0xBB, 0xBF][..])
        .unwrap_or(bytes);
    String::from_utf8(without_bom.to_vec()).map_err(|_| TextgridError::Decode)
}
