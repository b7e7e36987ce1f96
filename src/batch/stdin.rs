//! # 标准输入摄取器
//!
//! 备选的源获取路径：把标准输入完整缓冲为单一合成源单元，
//! 再交给批处理执行器。流结束前不开始任何处理。

use std::io::{self, Read};

use crate::batch::runner::SourceUnit;
use crate::error::{Result, VeldCliError};

/// 流输入单元的合成名称
pub const STDIN_NAME: &str = "stdin";

/// 标准输入摄取器
pub struct StdinIngestor;

impl StdinIngestor {
    /// 缓冲整个标准输入为一个源单元
    pub fn ingest() -> Result<SourceUnit> {
        Self::ingest_from(io::stdin().lock())
    }

    /// 从任意读取器摄取
    pub fn ingest_from<R: Read>(mut reader: R) -> Result<SourceUnit> {
        let mut source_body = String::new();
        reader
            .read_to_string(&mut source_body)
            .map_err(|e| VeldCliError::FileRead {
                path: STDIN_NAME.to_string(),
                source: e,
            })?;

        Ok(SourceUnit {
            filename: STDIN_NAME.to_string(),
            source_path: None,
            source_body,
            target_path: None,
            result: None,
        })
    }
}
