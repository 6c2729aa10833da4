use std::{fmt, io, num};

use thiserror::Error;

use crate::model::entry::Entry;

/// 定义 TextGrid 读写和层级运算过程中可能发生的各种错误。
#[derive(Error, Debug)]
pub enum TextgridError {
    /// 区间的开始时间不早于结束时间。
    #[error("无效的区间: ({start}, {end}, \"{label}\")")]
    BadInterval {
        /// 区间开始时间。
        start: f64,
        /// 区间结束时间。
        end: f64,
        /// 区间标签。
        label: String,
    },
    /// 层级既没有条目, 也没有显式提供时间范围。
    #[error("层级 \"{0}\" 没有时间范围: 空层级必须显式提供 min/max")]
    TimelessTier(String),
    /// 插入的条目与已有条目重叠, 且未指定可以解决冲突的策略。
    #[error("无法向层级 \"{tier_name}\" 插入 {entry}: 与已有条目 {collisions:?} 重叠")]
    Collision {
        /// 发生冲突的层级名。
        tier_name: String,
        /// 尝试插入的条目。
        entry: Entry,
        /// 全部与之重叠的已有条目。
        collisions: Vec<Entry>,
    },
    /// 操作的前置条件不满足, 例如时间戳越界或层级名重复。
    #[error("前置条件不满足: {0}")]
    Precondition(String),
    /// 无法在预期位置找到字段或分隔符。
    #[error("解析 {dialect} 方言的 TextGrid 失败: {context}")]
    Parse {
        /// 解析时假定的方言。
        dialect: String,
        /// 有关提取失败位置的上下文信息。
        context: String,
    },
    /// 输入字节既不是 UTF-16 也不是有效的 UTF-8。
    #[error("文本解码失败: 既不是 UTF-16 也不是有效的 UTF-8")]
    Decode,
    /// 数值字段解析错误。
    #[error("数值解析错误: {0}")]
    ParseFloat(#[from] num::ParseFloatError),
    /// 正则表达式编译错误。
    #[error("正则表达式错误: {0}")]
    Regex(#[from] regex::Error),
    /// 字符串格式化错误。
    #[error("格式错误: {0}")]
    Format(#[from] fmt::Error),
    /// 文件读写等IO错误。
    #[error("IO 错误: {0}")]
    Io(#[from] io::Error),
}

impl From<TextgridError> for io::Error {
    fn from(err: TextgridError) -> Self {
        io::Error::other(err)
    }
}

impl TextgridError {
    /// 创建一个带有上下文的 `Parse` 错误。
    #[must_use]
    pub fn parse(dialect: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Parse {
            dialect: dialect.into(),
            context: context.into(),
        }
    }
}
