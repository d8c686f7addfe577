//! # 文本报告扫描器
//!
//! 将 FHI-aims 等程序的半结构化文本输出读入为行序列，
//! 通过锚点（固定字面量 + 行偏移）定位数据块，并按空白切分字段。
//!
//! ## 设计
//! - 锚点只做子串/前缀匹配，不使用正则
//! - 每个锚点只取第一个匹配行
//! - 偏移量是外部程序固定输出格式的一部分，必须原样保留
//!
//! ## 依赖关系
//! - 被 `parsers/aims_out.rs`, `parsers/geometry.rs` 使用
//! - 使用 `error.rs`

use crate::error::{AimsError, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// 锚点匹配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// 行内包含该字面量
    Contains,
    /// 去除行首空白后以该字面量开头
    StartsWith,
}

/// 锚点：匹配规则 + 行偏移
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub pattern: &'static str,
    pub kind: MatchKind,
    pub offset: isize,
}

impl Anchor {
    pub const fn contains(pattern: &'static str) -> Self {
        Anchor {
            pattern,
            kind: MatchKind::Contains,
            offset: 0,
        }
    }

    pub const fn starts_with(pattern: &'static str) -> Self {
        Anchor {
            pattern,
            kind: MatchKind::StartsWith,
            offset: 0,
        }
    }

    /// 设置相对匹配行的偏移
    pub const fn with_offset(self, offset: isize) -> Self {
        Anchor { offset, ..self }
    }

    /// 判断某一行是否匹配
    pub fn matches(&self, line: &str) -> bool {
        match self.kind {
            MatchKind::Contains => line.contains(self.pattern),
            MatchKind::StartsWith => line.trim_start().starts_with(self.pattern),
        }
    }
}

/// 闭区间行范围 `[start, end]`，`end < start` 表示空块
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl LineRange {
    pub fn len(&self) -> usize {
        match self.end {
            Some(end) if end >= self.start => end - self.start + 1,
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 区间内的行号（0 起）
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.len()
    }
}

/// 原始报告：只读的行序列
#[derive(Debug, Clone)]
pub struct RawReport {
    path: String,
    lines: Vec<String>,
}

impl RawReport {
    /// 读取整个文件
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| AimsError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::from_content(&path.display().to_string(), &content))
    }

    /// 从字符串内容构建（`name` 仅用于错误信息）
    pub fn from_content(name: &str, content: &str) -> Self {
        RawReport {
            path: name.to_string(),
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// 报告中是否存在匹配行
    pub fn contains(&self, anchor: &Anchor) -> bool {
        self.lines.iter().any(|l| anchor.matches(l))
    }

    /// 第一个匹配行的行号（未加偏移）
    pub fn find_line(&self, anchor: &Anchor) -> Result<usize> {
        self.find_line_from(anchor, 0)
    }

    /// 从 `from` 行开始查找第一个匹配行（未加偏移）
    pub fn find_line_from(&self, anchor: &Anchor, from: usize) -> Result<usize> {
        self.lines
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, l)| anchor.matches(l))
            .map(|(i, _)| i)
            .ok_or_else(|| self.anchor_not_found(anchor))
    }

    /// 所有匹配行的行号，按出现顺序
    pub fn find_all(&self, anchor: &Anchor) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, l)| anchor.matches(l))
            .map(|(i, _)| i)
            .collect()
    }

    /// 锚点位置：第一个匹配行 + 偏移
    pub fn find_anchor(&self, anchor: &Anchor) -> Result<usize> {
        let line = self.find_line(anchor)?;
        self.apply_offset(anchor, line)
    }

    /// 由起止锚点确定数据块，结束锚点从起始匹配行之后查找
    pub fn block(&self, start: &Anchor, end: &Anchor) -> Result<LineRange> {
        let start_line = self.find_line(start)?;
        let end_line = self.find_line_from(end, start_line + 1)?;

        let start_idx = self.apply_offset(start, start_line)?;
        let end_idx = end_line as isize + end.offset;
        let end_idx = if end_idx < 0 {
            None
        } else {
            Some((end_idx as usize).min(self.lines.len().saturating_sub(1)))
        };

        Ok(LineRange {
            start: start_idx,
            end: end_idx,
        })
    }

    /// 切分指定行
    pub fn tokens(&self, idx: usize) -> Result<Tokens<'_>> {
        let line = self
            .lines
            .get(idx)
            .ok_or_else(|| self.malformed(idx, "line index past end of report".to_string()))?;
        Ok(Tokens::new(&self.path, idx, line))
    }

    fn apply_offset(&self, anchor: &Anchor, line: usize) -> Result<usize> {
        let idx = line as isize + anchor.offset;
        if idx < 0 || idx as usize >= self.lines.len() {
            return Err(self.malformed(
                line,
                format!(
                    "offset {} from '{}' falls outside the report",
                    anchor.offset, anchor.pattern
                ),
            ));
        }
        Ok(idx as usize)
    }

    fn anchor_not_found(&self, anchor: &Anchor) -> AimsError {
        AimsError::AnchorNotFound {
            anchor: anchor.pattern.to_string(),
            path: self.path.clone(),
        }
    }

    fn malformed(&self, idx: usize, reason: String) -> AimsError {
        AimsError::MalformedLine {
            path: self.path.clone(),
            line: idx + 1,
            reason,
        }
    }
}

/// 单行的空白切分字段
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    path: &'a str,
    line_idx: usize,
    fields: Vec<&'a str>,
}

impl<'a> Tokens<'a> {
    pub fn new(path: &'a str, line_idx: usize, line: &'a str) -> Self {
        Tokens {
            path,
            line_idx,
            fields: line.split_whitespace().collect(),
        }
    }

    /// 取第 `i` 个字段（0 起）
    pub fn field(&self, i: usize) -> Result<&'a str> {
        self.fields.get(i).copied().ok_or_else(|| AimsError::MalformedLine {
            path: self.path.to_string(),
            line: self.line_idx + 1,
            reason: format!("expected at least {} fields, found {}", i + 1, self.fields.len()),
        })
    }

    /// 取第 `i` 个字段并转换为数值
    pub fn parse<T: FromStr>(&self, i: usize) -> Result<T> {
        let raw = self.field(i)?;
        raw.parse::<T>().map_err(|_| AimsError::MalformedLine {
            path: self.path.to_string(),
            line: self.line_idx + 1,
            reason: format!("field {} ('{}') is not a valid number", i + 1, raw),
        })
    }
}
