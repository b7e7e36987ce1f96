//! # 美化输出工具
//!
//! 提供统一的终端输出样式。进度类消息走标准输出；
//! 错误归属类消息走标准错误，与产物数据流分离。
//!
//! ## 依赖关系
//! - 被 `batch/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;
use std::path::Path;

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印目录创建消息
pub fn print_mkdir(dir: &Path) {
    println!("{}", format!("+ mkdir {}", dir.display()).green());
}

/// 打印编译完成消息
pub fn print_compile(src: &str, dst: &str) {
    println!("{} {} to {}", "compile".dimmed(), src.bold(), dst.bold());
}

/// 打印出错单元归属消息
pub fn print_unit_error(rel_path: &str) {
    eprintln!("{} {}", "ERROR in".red().bold(), rel_path.bold());
}
