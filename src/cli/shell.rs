//! # shell 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/shell.rs`

use clap::Args;
use std::path::PathBuf;

/// shell 子命令参数
#[derive(Args, Debug)]
pub struct ShellArgs {
    /// File to keep command history in
    #[arg(long)]
    pub history: Option<PathBuf>,
}
