//! # 配置表模块
//!
//! 从 CSV 加载质量表和糖链定义表，并提供可原子替换的存储。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `calc/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: mass_table, glycan_table, store

pub mod glycan_table;
pub mod mass_table;
pub mod store;

pub use glycan_table::load_glycan_table;
pub use mass_table::{load_mass_table, MassTable};
pub use store::{TableSet, TableSources, TableStore};
