//! # 源单元收集器
//!
//! 将解析出的路径变为 SourceUnit 记录：读入源文本，
//! 按输出模式规则派生目标路径，按发现顺序追加到批次。
//!
//! ## 目标路径优先级
//! 1. 设置了输出目录：目录输入按相对父根的路径镜像，单文件取基名
//! 2. 既不打印也不读流：就地编译，目标即源路径
//! 3. 其余情况：不落盘
//!
//! 任何被赋值的目标路径都把 `.veld` 扩展名重写为 `.js`。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `batch/resolver.rs` 展开目录与通配符根

use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::resolver::PathResolver;
use crate::batch::runner::SourceUnit;
use crate::batch::{BatchOptions, SOURCE_EXT, TARGET_EXT};
use crate::error::{Result, VeldCliError};
use crate::utils::paths;

/// 源单元收集器
pub struct SourceCollector {
    resolver: PathResolver,
}

impl Default for SourceCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceCollector {
    /// 创建使用默认解析器的收集器
    pub fn new() -> Self {
        Self {
            resolver: PathResolver::new(),
        }
    }

    /// 收集一个根路径下的全部源单元
    ///
    /// 目录根对每个发现的文件以该目录的绝对路径为 `parent_root` 递归，
    /// 使目录内部结构在输出目录下得到镜像。
    pub fn collect(
        &self,
        root: &Path,
        batch: &mut Vec<SourceUnit>,
        options: &BatchOptions,
        parent_root: Option<&Path>,
    ) -> Result<()> {
        // 通配符根没有自己的 metadata，剥离标记后以其目录为镜像根
        if let Some(dir) = shallow_scan_dir(root) {
            let abs_dir = paths::absolutize(&dir);
            for file in self.resolver.resolve(root)? {
                self.collect(&file, batch, options, Some(&abs_dir))?;
            }
            return Ok(());
        }

        let abs = paths::absolutize(root);
        let metadata = fs::metadata(&abs).map_err(|_| VeldCliError::PathNotFound {
            path: abs.display().to_string(),
        })?;

        if metadata.is_dir() {
            for file in self.resolver.resolve(&abs)? {
                self.collect(&file, batch, options, Some(&abs))?;
            }
            return Ok(());
        }

        let filename = abs
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source_body = fs::read_to_string(&abs).map_err(|e| VeldCliError::FileRead {
            path: abs.display().to_string(),
            source: e,
        })?;

        let target_path = derive_target_path(&abs, &filename, parent_root, options);

        batch.push(SourceUnit {
            filename,
            source_path: Some(abs),
            source_body,
            target_path,
            result: None,
        });
        Ok(())
    }
}

/// 识别 `dir/*.veld` 浅扫描根，返回其目录部分
fn shallow_scan_dir(root: &Path) -> Option<PathBuf> {
    let name = root.file_name()?.to_str()?;
    if name == format!("*.{}", SOURCE_EXT) {
        Some(root.parent().unwrap_or_else(|| Path::new(".")).to_path_buf())
    } else {
        None
    }
}

/// 派生目标路径：(源路径, 父根, 选项) 的纯函数
fn derive_target_path(
    abs: &Path,
    filename: &str,
    parent_root: Option<&Path>,
    options: &BatchOptions,
) -> Option<PathBuf> {
    let mut target = if let Some(output) = &options.output {
        let rel: PathBuf = match parent_root {
            Some(root) => abs
                .strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| PathBuf::from(filename)),
            None => PathBuf::from(filename),
        };
        Some(output.join(rel))
    } else if !options.print && !options.stdio {
        // 就地编译
        Some(abs.to_path_buf())
    } else {
        None
    }?;

    if target.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXT) {
        target.set_extension(TARGET_EXT);
    }
    Some(target)
}
