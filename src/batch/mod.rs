//! # 批处理模块
//!
//! 提供从路径发现到产物写出的完整批处理能力。
//!
//! ## 功能
//! - 自动检测输入类型（文件/目录/通配符目录）
//! - 收集源单元批次，派生目标路径
//! - 按单一模式顺序驱动编译服务 (compile/analyze/tokenize)
//! - 产物写出与缺失目录补齐
//!
//! ## 依赖关系
//! - 被 `cli/` 与下游二进制使用
//! - 使用 `compiler` 的服务契约
//! - 使用 `walkdir` 遍历目录

pub mod collector;
pub mod resolver;
pub mod runner;
pub mod stdin;
pub mod writer;

pub use collector::SourceCollector;
pub use resolver::PathResolver;
pub use runner::{BatchRunner, SourceUnit, UnitResult};
pub use stdin::StdinIngestor;
pub use writer::OutputWriter;

use std::path::PathBuf;

/// 源脚本扩展名
pub const SOURCE_EXT: &str = "veld";
/// 产物扩展名
pub const TARGET_EXT: &str = "js";
/// 默认目标平台
pub const DEFAULT_TARGET: &str = "node";

/// 处理模式（互斥，compile 为默认）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// 打印脚本的作用域与变量分析
    Analyze,
    /// 打印词法器/重写器产生的 token
    Tokenize,
    /// 编译为 JavaScript
    #[default]
    Compile,
}

/// 一次批处理运行的配置
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// 输入路径（文件、目录或 dir/*.veld 通配形式）
    pub main: Vec<PathBuf>,
    /// 输出目录；目标路径计算前统一归一化为绝对路径
    pub output: Option<PathBuf>,
    /// 将产物打印到标准输出
    pub print: bool,
    /// 从标准输入读取单一源单元
    pub stdio: bool,
    /// 生成源映射并内联到产物
    pub source_map: bool,
    /// 目标平台标识
    pub target: String,
    /// 不包裹顶层函数
    pub bare: bool,
    /// 运行模式
    pub mode: Mode,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            main: Vec::new(),
            output: None,
            print: false,
            stdio: false,
            source_map: false,
            target: DEFAULT_TARGET.to_string(),
            bare: false,
            mode: Mode::Compile,
        }
    }
}
