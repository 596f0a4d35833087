//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `calc/`, `tables/`, `report/`, `utils/`
//! - 子模块: glycans, mass, antibody, shell

pub mod antibody;
pub mod glycans;
pub mod mass;
pub mod shell;

use crate::cli::{Commands, TableArgs};
use crate::error::Result;
use crate::tables::TableStore;
use crate::utils::{output, progress};

/// 执行命令
pub fn run(cmd: Commands, tables: &TableArgs) -> Result<()> {
    match cmd {
        Commands::Glycans(args) => glycans::execute(args, tables),
        Commands::Mass(args) => mass::execute(args, tables),
        Commands::Antibody(args) => antibody::execute(args, tables),
        Commands::Shell(args) => shell::execute(args, tables),
    }
}

/// 加载配置表
pub fn open_store(tables: &TableArgs) -> Result<TableStore> {
    let sources = tables.sources();
    let spinner = progress::create_spinner("Loading tables...");
    let store = TableStore::open(sources);
    spinner.finish_and_clear();

    let store = store?;
    let snapshot = store.snapshot();
    output::print_info(&format!(
        "Loaded {} mass entries from '{}', {} glycans from '{}'",
        snapshot.masses.len(),
        store.sources().mass_table.display(),
        snapshot.glycans.len(),
        store.sources().glycan_table.display()
    ));
    Ok(store)
}
