//! # veld-cli - Veld 转译器批处理驱动层
//!
//! Veld 脚本 (.veld) 到 JavaScript (.js) 转译器的命令行批处理核心：
//! 发现输入脚本（单文件、目录或通配符目录），收集为处理批次，
//! 按单一模式（compile / analyze / tokenize）逐单元调用编译服务，
//! 把结果写盘或打印到标准输出，并补齐缺失的目标目录。
//!
//! 词法/语法/代码生成不在本 crate 内：它们通过 `compiler::CompileService`
//! 契约注入。下游 `veldc` 二进制只需把 `Cli::parse()` 与具体服务粘起来：
//!
//! ```ignore
//! fn main() {
//!     let cli = veld_cli::Cli::parse();
//!     if let Err(e) = veld_cli::run(cli, &VeldCompiler::default()) {
//!         veld_cli::utils::output::print_error(&format!("{}", e));
//!         std::process::exit(1);
//!     }
//! }
//! ```
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── batch/      (批处理核心)
//!   │     ├── resolver  (路径发现)
//!   │     ├── collector (源单元收集)
//!   │     ├── runner    (模式调度与故障边界)
//!   │     ├── writer    (产物写出)
//!   │     └── stdin     (流输入摄取)
//!   ├── compiler.rs (编译服务契约)
//!   ├── utils/      (输出与路径工具)
//!   └── error.rs    (错误处理)
//! ```

pub mod batch;
pub mod cli;
pub mod compiler;
pub mod error;
pub mod utils;

pub use batch::{BatchOptions, BatchRunner, Mode, SourceUnit, UnitResult};
pub use cli::Cli;
pub use compiler::{CompileOutput, CompileService, Diagnostic, ServiceConfig, ServiceFault};
pub use error::{Result, VeldCliError};

/// 以解析好的命令行参数驱动一次完整批处理运行
pub fn run<S: CompileService>(cli: Cli, service: &S) -> Result<()> {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let mut runner = BatchRunner::new(cli.into_options());
    runner.run(service)
}
