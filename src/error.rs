//! # 统一错误处理模块
//!
//! 定义 veld-cli 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 文件系统错误：发现/遍历阶段的读失败，写出阶段的写失败
//! - 编译诊断：来自编译服务、可自渲染源码摘录的可恢复失败
//! - 不透明故障：无法识别形态的失败，按致命处理
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 持有 `compiler::Diagnostic` 作为可恢复诊断载体

use thiserror::Error;

use crate::compiler::{Diagnostic, ServiceFault};

/// veld-cli 统一错误类型
#[derive(Error, Debug)]
pub enum VeldCliError {
    // ─────────────────────────────────────────────────────────────
    // 文件系统错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("Failed to traverse: {path}")]
    Traversal {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 编译服务失败
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Diagnostic(#[from] Diagnostic),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceFault> for VeldCliError {
    fn from(fault: ServiceFault) -> Self {
        match fault {
            ServiceFault::Diagnostic(diagnostic) => VeldCliError::Diagnostic(diagnostic),
            ServiceFault::Opaque(cause) => VeldCliError::Internal(cause),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, VeldCliError>;
