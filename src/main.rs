//! # mabscale - 糖蛋白 / 单抗质量计算器
//!
//! 由用户提供的糖链组成计算糖蛋白（如单克隆抗体）的完整质量与还原质量。
//! 元素 / 单糖质量和糖链定义来自可编辑的 CSV 配置表。
//!
//! ## 子命令
//! - `glycans`  - 按显示顺序列出糖链及质量
//! - `mass`     - 由链基础质量 + 糖链计算还原 / 完整质量
//! - `antibody` - 由 HC/LC 序列计算全部物种并导出报告
//! - `shell`    - 交互式计算
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── calc/      (质量计算、物种组装)
//!   │     ├── chemistry/ (分子式、残基、序列)
//!   │     ├── tables/    (配置表加载)
//!   │     ├── report/    (报告整理与导出)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod calc;
mod chemistry;
mod cli;
mod commands;
mod error;
mod models;
mod report;
mod tables;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command, &cli.tables) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
