//! # 批量执行器
//!
//! 持有源单元批次与运行选项，按单一模式顺序驱动编译服务，
//! 并把结果路由到文件写出或标准输出。
//!
//! ## 功能
//! - 每次运行恰好选择一种模式：analyze / tokenize / compile（默认）
//! - 单元级配置视图：继承批次选项、仅覆盖文件名，不回写共享选项
//! - compile 模式按需把源映射内联为产物末尾的单行引用
//! - 单一故障边界：首个失败单元终止批次，已写出的产物不回滚
//!
//! ## 依赖关系
//! - 被 `cli/` 与下游二进制使用
//! - 使用 `batch/collector.rs` 收集批次
//! - 使用 `batch/writer.rs` 落盘产物
//! - 使用 `compiler` 的服务契约

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::Value;

use crate::batch::collector::SourceCollector;
use crate::batch::stdin::StdinIngestor;
use crate::batch::writer::OutputWriter;
use crate::batch::{BatchOptions, Mode, DEFAULT_TARGET};
use crate::compiler::{CompileOutput, CompileService, ExcerptStyle, ServiceConfig};
use crate::error::{Result, VeldCliError};
use crate::utils::{output, paths};

/// 单元处理结果，由运行模式决定填充哪一种
#[derive(Debug, Clone)]
pub enum UnitResult {
    /// tokenize 模式的 token 序列
    Tokens(Value),
    /// analyze 模式的作用域/变量分析
    Analysis(Value),
    /// compile 模式的产物
    Compiled(CompileOutput),
}

/// 一个待处理的源单元
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// 日志中使用的短名（基名，流输入为合成名）
    pub filename: String,
    /// 绝对源路径；流输入为 None
    pub source_path: Option<PathBuf>,
    /// 喂给编译服务的完整源文本
    pub source_body: String,
    /// 产物落盘路径；None 表示不写盘。收集时一次算定，此后不再变更
    pub target_path: Option<PathBuf>,
    /// 处理结果，每单元至多填充一次
    pub result: Option<UnitResult>,
}

impl SourceUnit {
    /// 日志与错误归属使用的相对路径（流单元退化为名称）
    pub fn rel_display(&self) -> String {
        match &self.source_path {
            Some(path) => paths::relative_to_cwd(path).display().to_string(),
            None => self.filename.clone(),
        }
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 运行选项
    options: BatchOptions,
    /// 源单元批次，插入顺序即处理顺序
    units: Vec<SourceUnit>,
    /// 当前单元下标，用于错误归属
    current: Option<usize>,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(options: BatchOptions) -> Self {
        Self {
            options,
            units: Vec::new(),
            current: None,
        }
    }

    /// 供检查的批次视图
    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    /// 当前生效的运行选项
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// 执行一次完整批处理：发现、收集、摄取、处理
    pub fn run<S: CompileService>(&mut self, service: &S) -> Result<()> {
        if self.options.target.is_empty() {
            self.options.target = DEFAULT_TARGET.to_string();
        }
        // 输出目录先归一化为绝对路径，整个批次以稳定根计算相对路径
        if let Some(output_dir) = self.options.output.take() {
            self.options.output = Some(paths::absolutize(&output_dir));
        }

        let collector = SourceCollector::new();
        let roots = std::mem::take(&mut self.options.main);
        for root in &roots {
            collector.collect(root, &mut self.units, &self.options, None)?;
        }
        self.options.main = roots;

        // 流输入：读完整个流之后才追加单元，随后才开始处理
        if self.options.stdio {
            let unit = StdinIngestor::ingest()?;
            self.prepare_stream_input(unit);
        }

        self.finish(service)
    }

    /// 追加流输入单元；没有输出目录时流产物只能走标准输出
    fn prepare_stream_input(&mut self, unit: SourceUnit) {
        if self.options.output.is_none() {
            self.options.print = true;
        }
        self.units.push(unit);
    }

    /// 选定模式并处理整个批次，外加单一故障边界
    fn finish<S: CompileService>(&mut self, service: &S) -> Result<()> {
        let outcome = match self.options.mode {
            Mode::Analyze => {
                self.options.print = true;
                self.analyze(service)
            }
            Mode::Tokenize => {
                self.options.print = true;
                self.tokenize(service)
            }
            Mode::Compile => self.compile(service),
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(error) => self.intercept(error),
        }
    }

    /// 故障边界：诊断就地呈现后恢复，其余形态原样上抛
    fn intercept(&self, error: VeldCliError) -> Result<()> {
        if let Some(index) = self.current {
            output::print_unit_error(&self.units[index].rel_display());
        }
        match error {
            VeldCliError::Diagnostic(diagnostic) => {
                eprintln!("{}", diagnostic.excerpt(&ExcerptStyle { colors: true }));
                Ok(())
            }
            fatal => Err(fatal),
        }
    }

    /// compile 模式：逐单元编译、写盘、打印
    fn compile<S: CompileService>(&mut self, service: &S) -> Result<()> {
        for index in 0..self.units.len() {
            self.current = Some(index);

            let mut compiled = {
                let unit = &self.units[index];
                let config = self.unit_config(unit);
                service.compile(&unit.source_body, &config)?
            };

            // 请求了源映射且服务返回了数据时才内联尾行
            if self.options.source_map {
                if let Some(map) = &compiled.source_map {
                    append_source_map_trailer(&mut compiled.js, map);
                }
            }

            if let Some(target) = self.units[index].target_path.clone() {
                OutputWriter::write(&target, &compiled.js)?;
                if !self.options.print {
                    let src = self.units[index].rel_display();
                    let dst = paths::relative_to_cwd(&target).display().to_string();
                    output::print_compile(&src, &dst);
                }
            }

            self.present(&compiled.js);
            self.units[index].result = Some(UnitResult::Compiled(compiled));
        }
        Ok(())
    }

    /// analyze 模式：分析结果序列化为 JSON 后打印
    fn analyze<S: CompileService>(&mut self, service: &S) -> Result<()> {
        for index in 0..self.units.len() {
            self.current = Some(index);

            let analysis = {
                let unit = &self.units[index];
                let config = self.unit_config(unit);
                service.analyze(&unit.source_body, &config)?
            };

            self.present(&analysis.to_string());
            self.units[index].result = Some(UnitResult::Analysis(analysis));
        }
        Ok(())
    }

    /// tokenize 模式：token 序列序列化为 JSON 后打印
    fn tokenize<S: CompileService>(&mut self, service: &S) -> Result<()> {
        for index in 0..self.units.len() {
            self.current = Some(index);

            let tokens = {
                let unit = &self.units[index];
                let config = self.unit_config(unit);
                service.tokenize(&unit.source_body, &config)?
            };

            self.present(&tokens.to_string());
            self.units[index].result = Some(UnitResult::Tokens(tokens));
        }
        Ok(())
    }

    /// 构造继承批次选项并覆盖文件名的单元级配置视图
    fn unit_config<'a>(&'a self, unit: &'a SourceUnit) -> ServiceConfig<'a> {
        ServiceConfig {
            filename: &unit.filename,
            target: &self.options.target,
            bare: self.options.bare,
            source_map: self.options.source_map,
        }
    }

    /// 打印模式下向主输出通道转发文本结果
    fn present(&self, data: &str) {
        if self.options.print {
            print!("{}", data);
        }
    }
}

/// 把源映射编码为 data URI 尾行附加到产物末尾
fn append_source_map_trailer(js: &mut String, map: &Value) {
    let blob = BASE64.encode(map.to_string());
    js.push_str("\n//# sourceMappingURL=data:application/json;base64,");
    js.push_str(&blob);
}
