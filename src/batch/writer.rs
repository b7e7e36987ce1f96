//! # 产物写出器
//!
//! 为目标路径补齐缺失的父目录后写出产物文本，UTF-8 编码，覆盖已有文件。
//! 每个新建目录都会上报一行 `+ mkdir`。
//!
//! ## 边界
//! 存在性检查与创建之间不做竞态区分；批次内写出严格串行且
//! 目标路径互不相同，简单的先查后建即可满足约定。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `utils/output.rs` 上报目录创建

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::batch::{SOURCE_EXT, TARGET_EXT};
use crate::error::{Result, VeldCliError};
use crate::utils::{output, paths};

/// 产物写出器
pub struct OutputWriter;

impl OutputWriter {
    /// 自根向叶补齐目标路径缺失的前缀目录
    ///
    /// 跳过第一个成分（视为已有根）；带脚本或产物扩展名的成分
    /// 视为叶文件，不会被建成目录。
    pub fn ensure_dir_for(target: &Path) -> Result<()> {
        if target.exists() {
            return Ok(());
        }

        let normalized = paths::normalize(target);
        let mut prefix = PathBuf::new();
        for (index, component) in normalized.components().enumerate() {
            prefix.push(component);
            if index < 1 {
                continue;
            }
            if prefix.exists() {
                continue;
            }
            if is_leaf_component(&component) {
                continue;
            }
            fs::create_dir(&prefix).map_err(|e| VeldCliError::FileWrite {
                path: prefix.display().to_string(),
                source: e,
            })?;
            output::print_mkdir(&prefix);
        }
        Ok(())
    }

    /// 写出产物文本，必要时先补齐父目录
    pub fn write(target: &Path, artifact: &str) -> Result<()> {
        Self::ensure_dir_for(target)?;
        fs::write(target, artifact).map_err(|e| VeldCliError::FileWrite {
            path: target.display().to_string(),
            source: e,
        })
    }
}

/// 带脚本或产物扩展名的成分按叶文件处理
fn is_leaf_component(component: &Component) -> bool {
    match component {
        Component::Normal(name) => matches!(
            Path::new(name).extension().and_then(|e| e.to_str()),
            Some(SOURCE_EXT) | Some(TARGET_EXT)
        ),
        _ => false,
    }
}
