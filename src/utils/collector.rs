//! # 文件收集器
//!
//! 在目录中按文件名正则收集文件列表。
//!
//! ## 功能
//! - 只扫描目录第一层
//! - 正则匹配文件名
//! - 结果按文件名排序，保证求和顺序可复现
//!
//! ## 依赖关系
//! - 被 `commands/dos.rs` 调用
//! - 使用 `walkdir` 遍历目录, `regex` 匹配文件名

use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入目录
    dir: PathBuf,
    /// 文件名匹配模式（None 表示全部）
    pattern: Option<Regex>,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pattern: None,
        }
    }

    /// 设置文件名正则
    pub fn with_regex(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Vec<PathBuf> {
        if !self.dir.is_dir() {
            return vec![];
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    /// 检查文件名是否匹配
    fn matches(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        match &self.pattern {
            Some(re) => re.is_match(filename),
            None => true,
        }
    }
}

/// 文件名（非 UTF-8 时为空串）
pub fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_sorted_matches() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        for name in ["b0002.dat", "a0001.dat", "notes.txt"] {
            fs::write(dir.path().join(name), "1 2\n").unwrap();
        }
        fs::create_dir(dir.path().join("c0003.dat")).unwrap();

        let files = FileCollector::new(dir.path())
            .with_regex(Regex::new(r"\d{4}\.dat$").unwrap())
            .collect();
        let names: Vec<&str> = files.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["a0001.dat", "b0002.dat"]);
    }

    #[test]
    fn test_missing_directory() {
        let files = FileCollector::new("/nonexistent/aimsutil/dir").collect();
        assert!(files.is_empty());
    }
}
