//! # 化学计算模块
//!
//! 提供分子式解析、残基分子式数据库和氨基酸序列组成计算。
//!
//! ## 子模块
//! - `formula`: 化学修饰分子式解析
//! - `residues`: 氨基酸 / 单糖残基分子式
//! - `sequence`: 序列校验与组成
//!
//! ## 依赖关系
//! - 被 `calc/` 和 `commands/` 使用
//! - 使用 `models/composition.rs`, `tables/mass_table.rs`

pub mod formula;
pub mod residues;
pub mod sequence;

pub use formula::Formula;

use crate::error::Result;
use crate::tables::MassTable;

/// 糖链组分质量表
///
/// 在质量表基础上补充单糖残基质量（由元素质量计算）。
/// 质量表中已直接给出的单糖名称保持原值；元素缺失而无法计算的单糖不补充。
pub fn component_table(masses: &MassTable) -> Result<MassTable> {
    let mut table = masses.clone();
    for mono in residues::MONOSACCHARIDES {
        if table.contains(mono) {
            continue;
        }
        if let Ok(mass) = residues::residue_composition(mono)?.mass(masses) {
            table.insert(mono, mass)?;
        }
    }
    Ok(table)
}
