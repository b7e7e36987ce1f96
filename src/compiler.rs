//! # 编译服务契约
//!
//! 批处理层与 Veld 编译核心（词法/语法/代码生成，位于兄弟 crate）之间的
//! 窄接口。本层只依赖这里声明的形态，不触及编译器内部。
//!
//! ## 功能
//! - `CompileService`: analyze / tokenize / compile 三个操作
//! - `ServiceConfig`: 继承批次选项、覆盖文件名的单元级配置视图
//! - `ServiceFault`: 失败形态二分——可渲染诊断或不透明故障
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - analyze/tokenize 结果按不透明 JSON 值传递（schema 由服务定义）

use colored::Colorize;
use serde_json::Value;
use thiserror::Error;

/// 单元级编译配置视图
///
/// 共享的批次选项在调用时与单元自身的文件名合并为此视图，
/// 绝不回写共享选项——兄弟单元之间互不可见。
#[derive(Debug, Clone, Copy)]
pub struct ServiceConfig<'a> {
    /// 本单元的展示文件名
    pub filename: &'a str,
    /// 目标平台标识 (node/web/webworker)
    pub target: &'a str,
    /// 不包裹顶层函数
    pub bare: bool,
    /// 请求生成源映射
    pub source_map: bool,
}

/// compile 操作的产物
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// 产物 JavaScript 文本
    pub js: String,
    /// 源映射数据，服务未生成时为 None
    pub source_map: Option<Value>,
}

/// 诊断摘录的渲染样式
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcerptStyle {
    /// 启用 ANSI 颜色
    pub colors: bool,
}

/// 带源码摘录的编译诊断
///
/// 服务对格式错误的输入返回此类型；它知道如何描述自己出错的源码片段。
#[derive(Debug, Clone, Error)]
#[error("{message} at {filename}:{line}:{column}")]
pub struct Diagnostic {
    /// 人类可读的错误说明
    pub message: String,
    /// 出错单元的文件名
    pub filename: String,
    /// 行号 (1 起)
    pub line: usize,
    /// 列号 (1 起)
    pub column: usize,
    /// 出错行的原文
    pub source_line: String,
    /// 出错片段长度（字符数）
    pub span: usize,
}

impl Diagnostic {
    /// 渲染源码摘录
    pub fn excerpt(&self, style: &ExcerptStyle) -> String {
        let header = format!(
            "{} at {}:{}:{}",
            self.message, self.filename, self.line, self.column
        );
        let gutter = format!("{:>4} | ", self.line);
        let padding = " ".repeat(gutter.len() + self.column.saturating_sub(1));
        let carets = "^".repeat(self.span.max(1));

        if style.colors {
            format!(
                "{}\n{}{}\n{}{}",
                header.red().bold(),
                gutter.dimmed(),
                self.source_line,
                padding,
                carets.red().bold()
            )
        } else {
            format!(
                "{}\n{}{}\n{}{}",
                header, gutter, self.source_line, padding, carets
            )
        }
    }
}

/// 编译服务的失败形态
///
/// Diagnostic 可就地呈现后恢复；Opaque 不可识别，按致命处理。
#[derive(Debug)]
pub enum ServiceFault {
    /// 可自渲染源码摘录的诊断
    Diagnostic(Diagnostic),
    /// 其余一切失败
    Opaque(anyhow::Error),
}

impl From<Diagnostic> for ServiceFault {
    fn from(diagnostic: Diagnostic) -> Self {
        ServiceFault::Diagnostic(diagnostic)
    }
}

impl From<anyhow::Error> for ServiceFault {
    fn from(cause: anyhow::Error) -> Self {
        ServiceFault::Opaque(cause)
    }
}

/// 编译服务契约
pub trait CompileService {
    /// 分析脚本的作用域与变量
    fn analyze(&self, source: &str, config: &ServiceConfig) -> Result<Value, ServiceFault>;

    /// 产出词法器/重写器的 token 序列
    fn tokenize(&self, source: &str, config: &ServiceConfig) -> Result<Value, ServiceFault>;

    /// 编译为 JavaScript
    fn compile(&self, source: &str, config: &ServiceConfig)
        -> Result<CompileOutput, ServiceFault>;
}
