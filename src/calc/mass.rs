//! # 质量计算器
//!
//! 由链基础质量和糖链选择计算还原质量与完整质量。
//!
//! ## 公式
//! - 糖链质量 = Σ countᵢ × M[componentᵢ]，按糖链组成的存储顺序累加
//! - 还原质量 = Σ (链基础质量 + 糖链质量)，按链的输入顺序累加
//! - 完整质量 = 还原质量 − 二硫键校正（键数 × 每键质量损失）
//!
//! ## 依赖关系
//! - 被 `commands/mass.rs`, `commands/shell.rs`, `report/` 使用
//! - 使用 `models/glycan.rs`, `tables/mass_table.rs`
//! - 无状态，纯函数

use crate::error::{MabError, Result};
use crate::models::GlycanDefinition;
use crate::tables::MassTable;

use serde::Serialize;

/// 质量表中氢的名称（全名或符号）
const HYDROGEN_NAMES: [&str; 2] = ["Hydrogen", "H"];

/// 二硫键校正
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisulfideCorrection {
    /// 形成的链间二硫键数
    pub bonds: u32,
    /// 每个二硫键的质量损失 (Da)
    pub loss_per_bond: f64,
}

impl DisulfideCorrection {
    pub fn new(bonds: u32, loss_per_bond: f64) -> Result<Self> {
        if !loss_per_bond.is_finite() || loss_per_bond < 0.0 {
            return Err(MabError::InvalidInput(format!(
                "disulfide mass loss must be a non-negative number, got {}",
                loss_per_bond
            )));
        }
        Ok(Self {
            bonds,
            loss_per_bond,
        })
    }

    /// 每键损失 2 个氢，氢的质量取自质量表
    pub fn from_hydrogen(bonds: u32, table: &MassTable) -> Result<Self> {
        let hydrogen = HYDROGEN_NAMES
            .iter()
            .find_map(|name| table.get(name))
            .ok_or_else(|| MabError::UnknownComponent {
                component: "Hydrogen".to_string(),
            })?;
        Self::new(bonds, 2.0 * hydrogen)
    }

    /// 总质量损失
    pub fn total(&self) -> f64 {
        self.bonds as f64 * self.loss_per_bond
    }
}

/// 一条链的输入：基础质量 + 可选糖链
#[derive(Debug, Clone, Copy)]
pub struct ChainSelection<'a> {
    pub base_mass: f64,
    pub glycan: Option<&'a GlycanDefinition>,
}

impl<'a> ChainSelection<'a> {
    /// 创建并校验基础质量
    pub fn new(base_mass: f64, glycan: Option<&'a GlycanDefinition>) -> Result<Self> {
        Ok(Self {
            base_mass: validate_base_mass(base_mass)?,
            glycan,
        })
    }
}

/// 校验基础质量：有限且非负
pub fn validate_base_mass(mass: f64) -> Result<f64> {
    if !mass.is_finite() || mass < 0.0 {
        return Err(MabError::InvalidInput(format!(
            "base mass must be a non-negative number, got {}",
            mass
        )));
    }
    Ok(mass)
}

/// 解析用户输入的基础质量
pub fn parse_base_mass(text: &str) -> Result<f64> {
    let mass: f64 = text
        .trim()
        .parse()
        .map_err(|_| MabError::InvalidInput(format!("'{}' is not a number", text.trim())))?;
    validate_base_mass(mass)
}

/// 糖链质量
pub fn compute_glycan_mass(glycan: &GlycanDefinition, table: &MassTable) -> Result<f64> {
    let mut mass = 0.0;
    for (component, count) in &glycan.composition {
        mass += *count as f64 * table.require(component)?;
    }
    Ok(mass)
}

fn chain_glycan_mass(chain: &ChainSelection<'_>, table: &MassTable) -> Result<f64> {
    validate_base_mass(chain.base_mass)?;
    match chain.glycan {
        Some(glycan) => compute_glycan_mass(glycan, table),
        None => Ok(0.0),
    }
}

/// 还原质量
pub fn compute_reduced_mass(chains: &[ChainSelection<'_>], table: &MassTable) -> Result<f64> {
    let mut mass = 0.0;
    for chain in chains {
        mass += chain.base_mass + chain_glycan_mass(chain, table)?;
    }
    Ok(mass)
}

/// 完整质量
pub fn compute_intact_mass(
    chains: &[ChainSelection<'_>],
    table: &MassTable,
    correction: &DisulfideCorrection,
) -> Result<f64> {
    Ok(compute_reduced_mass(chains, table)? - correction.total())
}

/// 单链贡献明细
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainContribution {
    /// 链序号（从 1 开始）
    pub index: usize,
    pub base_mass: f64,
    pub glycan: Option<String>,
    pub glycan_mass: f64,
}

impl ChainContribution {
    pub fn total(&self) -> f64 {
        self.base_mass + self.glycan_mass
    }
}

/// 计算结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub reduced_mass: f64,
    pub intact_mass: f64,
    pub disulfide_correction: f64,
    pub chains: Vec<ChainContribution>,
}

/// 计算还原质量、完整质量及每链明细
pub fn calculate(
    chains: &[ChainSelection<'_>],
    table: &MassTable,
    correction: &DisulfideCorrection,
) -> Result<CalculationResult> {
    let mut contributions = Vec::with_capacity(chains.len());

    for (i, chain) in chains.iter().enumerate() {
        let glycan_mass = chain_glycan_mass(chain, table)?;
        contributions.push(ChainContribution {
            index: i + 1,
            base_mass: chain.base_mass,
            glycan: chain.glycan.map(|g| g.name.clone()),
            glycan_mass,
        });
    }

    Ok(CalculationResult {
        reduced_mass: compute_reduced_mass(chains, table)?,
        intact_mass: compute_intact_mass(chains, table, correction)?,
        disulfide_correction: correction.total(),
        chains: contributions,
    })
}
