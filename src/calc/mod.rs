//! # 计算模块
//!
//! ## 子模块
//! - `mass`: 糖链质量、还原质量、完整质量
//! - `display`: 糖链显示顺序
//! - `antibody`: 由序列计算链的还原组成
//! - `assembly`: 完整分子 / 半抗体 / 糖型组合
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `report/` 使用
//! - 使用 `chemistry/`, `models/`, `tables/`

pub mod antibody;
pub mod assembly;
pub mod display;
pub mod mass;

pub use antibody::{Antibody, AntibodyParams, ChainInput, PairInput};
pub use assembly::Species;
pub use display::{display_order, display_order_all, display_order_any};
pub use mass::{calculate, compute_glycan_mass, CalculationResult, ChainSelection, DisulfideCorrection};

/// 测试用元素质量表（含元素符号）
#[cfg(test)]
pub(crate) fn test_elements() -> crate::tables::MassTable {
    let mut table = crate::tables::MassTable::from_entries(&[
        ("Carbon", 12.0107359),
        ("Hydrogen", 1.00794075),
        ("Nitrogen", 14.00670321),
        ("Oxygen", 15.99940492),
        ("Sulfur", 32.06478741),
    ])
    .unwrap();
    for (name, symbol) in [
        ("Carbon", "C"),
        ("Hydrogen", "H"),
        ("Nitrogen", "N"),
        ("Oxygen", "O"),
        ("Sulfur", "S"),
    ] {
        table.insert_alias(name, symbol).unwrap();
    }
    table
}
