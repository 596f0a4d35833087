//! # 多肽链数据模型
//!
//! 抗体由两条重链 (HC) 和两条轻链 (LC) 组成，按 HC/LC 对编号 1、2。
//!
//! ## 依赖关系
//! - 被 `calc/antibody.rs`, `calc/assembly.rs`, `report/` 使用

use serde::{Deserialize, Serialize};
use std::fmt;

/// 链类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainType {
    Heavy,
    Light,
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainType::Heavy => write!(f, "HC"),
            ChainType::Light => write!(f, "LC"),
        }
    }
}

/// 链编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChainId {
    Hc1,
    Hc2,
    Lc1,
    Lc2,
}

impl ChainId {
    /// 报告中的固定顺序
    pub const ALL: [ChainId; 4] = [ChainId::Hc1, ChainId::Hc2, ChainId::Lc1, ChainId::Lc2];

    pub fn chain_type(self) -> ChainType {
        match self {
            ChainId::Hc1 | ChainId::Hc2 => ChainType::Heavy,
            ChainId::Lc1 | ChainId::Lc2 => ChainType::Light,
        }
    }

    /// 在 `ALL` 中的位置
    pub fn index(self) -> usize {
        match self {
            ChainId::Hc1 => 0,
            ChainId::Hc2 => 1,
            ChainId::Lc1 => 2,
            ChainId::Lc2 => 3,
        }
    }

    /// HC/LC 对编号 (1 或 2)
    pub fn pair(self) -> usize {
        match self {
            ChainId::Hc1 | ChainId::Lc1 => 1,
            ChainId::Hc2 | ChainId::Lc2 => 2,
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.chain_type(), self.pair())
    }
}

/// 一条多肽链
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub id: ChainId,
    /// 单字母氨基酸序列（大写）
    pub sequence: String,
    /// 化学修饰分子式，如 "H2O" 或 "-H2O"，可为空
    pub chem_mod: String,
}

impl Chain {
    pub fn new(id: ChainId, sequence: impl Into<String>, chem_mod: impl Into<String>) -> Self {
        Chain {
            id,
            sequence: sequence.into(),
            chem_mod: chem_mod.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_labels() {
        let labels: Vec<String> = ChainId::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(labels, vec!["HC-1", "HC-2", "LC-1", "LC-2"]);
        assert_eq!(ChainId::Lc2.chain_type(), ChainType::Light);
        assert_eq!(ChainId::Hc2.pair(), 2);
        for (i, id) in ChainId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }
}
