//! # 路径解析器
//!
//! 将用户提供的单个路径（文件、目录或通配符目录）解析为
//! 有序的候选源文件列表。
//!
//! ## 功能
//! - 普通文件原样接受，不做模式过滤
//! - 目录按深度上限递归枚举，按文件名模式筛选
//! - `dir/*.veld` 形式为浅扫描指令：仅取直接子文件
//!
//! ## 依赖关系
//! - 被 `batch/collector.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::batch::SOURCE_EXT;
use crate::error::{Result, VeldCliError};
use crate::utils::paths;

/// 默认递归深度上限
pub const MAX_SCAN_DEPTH: usize = 10;
/// 浅扫描（通配符根）深度
pub const SHALLOW_SCAN_DEPTH: usize = 1;

/// 路径解析器
pub struct PathResolver {
    /// 文件名匹配模式
    pattern: glob::Pattern,
    /// 通配符根的展示形式，如 `*.veld`
    marker: String,
    /// 递归深度上限
    max_depth: usize,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PathResolver {
    /// 创建匹配源脚本扩展名的解析器
    pub fn new() -> Self {
        let marker = format!("*.{}", SOURCE_EXT);
        Self {
            pattern: glob::Pattern::new(&marker).unwrap(),
            marker,
            max_depth: MAX_SCAN_DEPTH,
        }
    }

    /// 覆盖文件名匹配模式
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.pattern = glob::Pattern::new(pattern).map_err(|e| {
            VeldCliError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
        })?;
        self.marker = pattern.to_string();
        Ok(self)
    }

    /// 覆盖递归深度上限
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 解析用户路径为有序源文件列表
    ///
    /// 路径先相对当前工作目录归一化再遍历；遍历顺序即目录列举顺序，
    /// 不做重排序。任一路径在检视时不存在或不可访问即失败。
    pub fn resolve(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let root = paths::normalize(&paths::relative_to_cwd(root));

        // 通配符后缀剥离后仅下探一层
        let (root, depth) = match self.strip_shallow_marker(&root) {
            Some(parent) => (parent, SHALLOW_SCAN_DEPTH),
            None => (root, self.max_depth),
        };

        let metadata = fs::metadata(&root).map_err(|_| VeldCliError::PathNotFound {
            path: root.display().to_string(),
        })?;

        // 显式文件路径原样接受，不做模式过滤
        if metadata.is_file() {
            return Ok(vec![root]);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&root).max_depth(depth) {
            let entry = entry.map_err(|e| VeldCliError::Traversal {
                path: e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string()),
                source: e,
            })?;

            if entry.file_type().is_file() && self.matches(entry.path()) {
                files.push(paths::normalize(entry.path()));
            }
        }

        Ok(files)
    }

    /// 识别 `dir/*.veld` 浅扫描指令，返回剥离后的目录
    fn strip_shallow_marker(&self, root: &Path) -> Option<PathBuf> {
        let name = root.file_name()?.to_str()?;
        if name == self.marker {
            Some(root.parent().unwrap_or_else(|| Path::new(".")).to_path_buf())
        } else {
            None
        }
    }

    /// 检查文件名是否匹配目标模式
    fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| self.pattern.matches(n))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_single_file_accepted_regardless_of_extension() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "not a script").unwrap();

        let resolver = PathResolver::new();
        let found = resolver.resolve(&file).unwrap();
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn test_directory_filters_by_pattern() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.veld"), "a").unwrap();
        fs::write(dir.path().join("b.js"), "b").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.veld"), "c").unwrap();

        let resolver = PathResolver::new();
        let found = resolver.resolve(dir.path()).unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.contains(&dir.path().join("a.veld")));
        assert!(found.contains(&dir.path().join("sub/c.veld")));
    }

    #[test]
    fn test_shallow_marker_takes_direct_children_only() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("top.veld"), "t").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/deep.veld"), "d").unwrap();

        let resolver = PathResolver::new();
        let found = resolver.resolve(&dir.path().join("*.veld")).unwrap();

        assert_eq!(found, vec![dir.path().join("top.veld")]);
    }

    #[test]
    fn test_depth_limit_excludes_deeper_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("d1/d2/d3")).unwrap();
        fs::write(dir.path().join("d1/near.veld"), "n").unwrap();
        fs::write(dir.path().join("d1/d2/d3/far.veld"), "f").unwrap();

        let resolver = PathResolver::new().with_max_depth(2);
        let found = resolver.resolve(dir.path()).unwrap();

        assert_eq!(found, vec![dir.path().join("d1/near.veld")]);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        let resolver = PathResolver::new();
        let err = resolver.resolve(&dir.path().join("ghost")).unwrap_err();
        assert!(matches!(err, VeldCliError::PathNotFound { .. }));
    }

    #[test]
    fn test_custom_pattern_override() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x.veld"), "x").unwrap();
        fs::write(dir.path().join("y.txt"), "y").unwrap();

        let resolver = PathResolver::new().with_pattern("*.txt").unwrap();
        let found = resolver.resolve(dir.path()).unwrap();
        assert_eq!(found, vec![dir.path().join("y.txt")]);
    }
}
