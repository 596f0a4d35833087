//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `glycans`: 显示糖链表及质量
//! - `mass`: 由链基础质量 + 糖链计算还原 / 完整质量
//! - `antibody`: 由 HC/LC 序列生成完整报告
//! - `shell`: 交互式计算
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: glycans, mass, antibody, shell

pub mod antibody;
pub mod glycans;
pub mod mass;
pub mod shell;

use crate::tables::TableSources;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// mabscale - 糖蛋白 / 单抗质量计算器
#[derive(Parser)]
#[command(name = "mabscale")]
#[command(version)]
#[command(about = "Intact and reduced mass calculator for glycoproteins and monoclonal antibodies", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub tables: TableArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// List glycan definitions in display order with their masses
    Glycans(glycans::GlycansArgs),

    /// Compute reduced and intact mass from chain base masses and glycans
    Mass(mass::MassArgs),

    /// Compute reduced, intact and half-body species of an antibody from sequences
    Antibody(antibody::AntibodyArgs),

    /// Start an interactive calculation shell
    Shell(shell::ShellArgs),
}

// ─────────────────────────────────────────────────────────────
// 配置表位置（全局参数）
// ─────────────────────────────────────────────────────────────

/// 配置表参数
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Directory containing Element_Mass.csv and Glycans.csv (relative paths fall back to the executable's directory)
    #[arg(long = "tables", global = true, env = "MABSCALE_TABLES", default_value = "data")]
    pub dir: PathBuf,

    /// Mass table CSV (overrides <TABLES>/Element_Mass.csv)
    #[arg(long, global = true)]
    pub mass_table: Option<PathBuf>,

    /// Glycan table CSV (overrides <TABLES>/Glycans.csv)
    #[arg(long, global = true)]
    pub glycan_table: Option<PathBuf>,
}

impl TableArgs {
    /// 解析出两个表文件的路径
    pub fn sources(&self) -> TableSources {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let dir = resolve_table_dir(&self.dir, exe_dir.as_deref());
        let mut sources = TableSources::in_dir(&dir);
        if let Some(path) = &self.mass_table {
            sources.mass_table = path.clone();
        }
        if let Some(path) = &self.glycan_table {
            sources.glycan_table = path.clone();
        }
        sources
    }
}

/// 相对路径在当前目录下不存在时，改用可执行文件所在目录下的同名目录
pub fn resolve_table_dir(dir: &Path, exe_dir: Option<&Path>) -> PathBuf {
    if dir.is_absolute() || dir.is_dir() {
        return dir.to_path_buf();
    }
    match exe_dir.map(|base| base.join(dir)) {
        Some(candidate) if candidate.is_dir() => candidate,
        _ => dir.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_table_dir_falls_back_to_exe_dir() {
        let exe_dir = std::env::temp_dir().join(format!("mabscale-exe-{}", std::process::id()));
        let name = "mabscale-tables-next-to-exe";
        std::fs::create_dir_all(exe_dir.join(name)).unwrap();

        assert_eq!(
            resolve_table_dir(Path::new(name), Some(&exe_dir)),
            exe_dir.join(name)
        );
        // 都不存在时保持原路径，由加载时报告缺失
        assert_eq!(
            resolve_table_dir(Path::new("no-such-tables"), Some(&exe_dir)),
            PathBuf::from("no-such-tables")
        );
        assert_eq!(resolve_table_dir(Path::new(name), None), PathBuf::from(name));

        std::fs::remove_dir_all(&exe_dir).ok();
    }

    #[test]
    fn test_table_overrides() {
        let cli = Cli::parse_from([
            "mabscale",
            "--tables",
            "conf",
            "--glycan-table",
            "custom.csv",
            "glycans",
        ]);
        let sources = cli.tables.sources();
        assert_eq!(sources.mass_table, PathBuf::from("conf").join("Element_Mass.csv"));
        assert_eq!(sources.glycan_table, PathBuf::from("custom.csv"));
    }
}
