//! # 糖链显示顺序
//!
//! 按显示标志过滤，并按 `ord_pos` 升序稳定排序（相同值保持表中顺序）。
//! 不影响任何质量计算。
//!
//! ## 依赖关系
//! - 被 `commands/`, `calc/assembly.rs` 使用

use crate::models::{ChainType, GlycanDefinition};

/// 给定链类型的显示列表
pub fn display_order(glycans: &[GlycanDefinition], chain: ChainType) -> Vec<&GlycanDefinition> {
    sorted(glycans.iter().filter(|g| g.is_shown(chain)).collect())
}

/// 在任一链类型中显示的糖链
pub fn display_order_any(glycans: &[GlycanDefinition]) -> Vec<&GlycanDefinition> {
    sorted(glycans.iter().filter(|g| g.is_shown_anywhere()).collect())
}

/// 全部糖链（含隐藏），按显示顺序
pub fn display_order_all(glycans: &[GlycanDefinition]) -> Vec<&GlycanDefinition> {
    sorted(glycans.iter().collect())
}

fn sorted(mut list: Vec<&GlycanDefinition>) -> Vec<&GlycanDefinition> {
    // sort_by_key 是稳定排序
    list.sort_by_key(|g| g.ord_pos);
    list
}
