//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。解析、别名、帮助与版本横幅
//! 全部交给 `clap`；本层只负责把参数转换为批处理选项。
//!
//! ## 依赖关系
//! - 被下游 `veldc` 二进制使用
//! - 转换结果交给 `batch/runner.rs`

use clap::Parser;
use std::path::PathBuf;

use crate::batch::{BatchOptions, Mode};

/// veldc - Veld 到 JavaScript 转译器
#[derive(Parser, Debug)]
#[command(name = "veldc")]
#[command(version)]
#[command(about = "Compile Veld scripts to JavaScript", long_about = None)]
pub struct Cli {
    /// Script files, directories, or dir/*.veld patterns to process
    #[arg(value_name = "PATH", required = true)]
    pub main: Vec<PathBuf>,

    /// Set the output directory for compiled JavaScript
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Explicitly compile for node/web/webworker
    #[arg(long, value_name = "TARGET", default_value = "node")]
    pub target: String,

    /// Print out the scopes and variables of your script
    #[arg(short, long, conflicts_with = "tokenize")]
    pub analyze: bool,

    /// Print out the tokens that the lexer/rewriter produce
    #[arg(short, long)]
    pub tokenize: bool,

    /// Compile without a top-level function wrapper
    #[arg(short, long)]
    pub bare: bool,

    /// Print out the compiled JavaScript
    #[arg(short, long)]
    pub print: bool,

    /// Listen for and compile scripts over stdio
    #[arg(short, long)]
    pub stdio: bool,

    /// Generate source map and add inline to .js files
    #[arg(short = 'm', long)]
    pub source_map: bool,
}

impl Cli {
    /// 转换为批处理选项
    pub fn into_options(self) -> BatchOptions {
        let mode = if self.analyze {
            Mode::Analyze
        } else if self.tokenize {
            Mode::Tokenize
        } else {
            Mode::Compile
        };

        BatchOptions {
            main: self.main,
            output: self.output,
            print: self.print,
            stdio: self.stdio,
            source_map: self.source_map,
            target: self.target,
            bare: self.bare,
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["veldc", "app.veld"]);
        let options = cli.into_options();

        assert_eq!(options.main, vec![PathBuf::from("app.veld")]);
        assert_eq!(options.target, "node");
        assert_eq!(options.mode, Mode::Compile);
        assert!(!options.print && !options.stdio && !options.source_map);
    }

    #[test]
    fn test_mode_selectors_are_exclusive() {
        let cli = Cli::parse_from(["veldc", "-t", "app.veld"]);
        assert_eq!(cli.into_options().mode, Mode::Tokenize);

        let err = Cli::try_parse_from(["veldc", "-a", "-t", "app.veld"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_paths_are_required() {
        assert!(Cli::try_parse_from(["veldc", "--print"]).is_err());
    }

    #[test]
    fn test_full_flag_set() {
        let cli = Cli::parse_from([
            "veldc", "-o", "dist", "--target", "web", "-m", "-b", "src",
        ]);
        let options = cli.into_options();

        assert_eq!(options.output, Some(PathBuf::from("dist")));
        assert_eq!(options.target, "web");
        assert!(options.source_map);
        assert!(options.bare);
    }
}
