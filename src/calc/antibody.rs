//! # 抗体链组成
//!
//! 由 HC/LC 序列计算每条链的完全还原与部分还原组成。
//!
//! ## 功能
//! - 第二对 HC/LC 缺省时复制第一对
//! - 输入校验（序列、化学修饰、二硫键数）
//! - 重链 N 端环化 (pyro-Q / pyro-E) 与 C 端赖氨酸切除
//! - 部分还原：保留链内二硫键（每键 −2H）
//!
//! ## 依赖关系
//! - 被 `calc/assembly.rs`, `commands/antibody.rs`, `report/` 使用
//! - 使用 `chemistry/`, `models/`

use crate::chemistry::residues::{self, element};
use crate::chemistry::{sequence, Formula};
use crate::error::{MabError, Result};
use crate::models::{Chain, ChainId, ChainType, Composition};
use crate::tables::MassTable;

use serde::Serialize;

/// 二硫键数上限
pub const DISULFIDE_LIMIT: i64 = 100;

/// 单条链的输入
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChainInput {
    pub sequence: String,
    pub chem_mod: String,
}

impl ChainInput {
    pub fn new(sequence: impl Into<String>, chem_mod: impl Into<String>) -> Self {
        ChainInput {
            sequence: sequence.into(),
            chem_mod: chem_mod.into(),
        }
    }
}

/// 一对 HC/LC 的输入
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairInput {
    pub heavy: ChainInput,
    pub light: ChainInput,
    /// 重链 N 端环化
    pub cyclize: bool,
    /// 重链 C 端赖氨酸切除
    pub lys_clip: bool,
}

/// 抗体计算参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AntibodyParams {
    pub pairs: [PairInput; 2],
    /// 完整分子中的二硫键总数
    pub total_disulfides: i64,
    /// 部分还原后重链保留的二硫键数
    pub hc_disulfides: i64,
    /// 部分还原后轻链保留的二硫键数
    pub lc_disulfides: i64,
    /// 轻链是否糖基化
    pub lc_glycosylated: bool,
}

impl AntibodyParams {
    /// 规范化序列与修饰，并补全第二对
    pub fn normalized(mut self) -> Self {
        for pair in self.pairs.iter_mut() {
            for input in [&mut pair.heavy, &mut pair.light] {
                input.sequence = sequence::normalize(&input.sequence);
                input.chem_mod = input.chem_mod.trim().to_string();
            }
        }
        self.fill_second_pair();
        self
    }

    /// 第二对均为空时整体复制第一对；否则只补全空序列
    pub fn fill_second_pair(&mut self) {
        let first = self.pairs[0].clone();
        let second = &mut self.pairs[1];

        if second.heavy.sequence.is_empty() && second.light.sequence.is_empty() {
            *second = first;
            return;
        }
        if second.heavy.sequence.is_empty() {
            second.heavy.sequence = first.heavy.sequence;
        }
        if second.light.sequence.is_empty() {
            second.light.sequence = first.light.sequence;
        }
    }

    fn input(&self, id: ChainId) -> &ChainInput {
        let pair = &self.pairs[id.pair() - 1];
        match id.chain_type() {
            ChainType::Heavy => &pair.heavy,
            ChainType::Light => &pair.light,
        }
    }

    /// 链模型
    pub fn chain(&self, id: ChainId) -> Chain {
        let input = self.input(id);
        Chain::new(id, input.sequence.clone(), input.chem_mod.clone())
    }

    /// 校验全部参数，收集所有错误
    pub fn validate(&self, elements: &MassTable) -> Result<()> {
        let mut errors = Vec::new();

        for id in [ChainId::Hc1, ChainId::Lc1] {
            if self.input(id).sequence.is_empty() {
                errors.push(format!("\"{}\" sequence is required.", id));
            }
        }

        for id in ChainId::ALL {
            let seq = &self.input(id).sequence;
            if !sequence::is_valid_sequence(seq) {
                errors.push(format!(
                    "\"{}\" sequence contains invalid amino acid characters.",
                    id
                ));
            }
            if seq.len() > sequence::MAX_SEQUENCE_LENGTH {
                errors.push(format!(
                    "\"{}\" sequence length is over {} amino acids.",
                    id,
                    sequence::MAX_SEQUENCE_LENGTH
                ));
            }
        }

        for id in ChainId::ALL {
            let chem_mod = &self.input(id).chem_mod;
            if chem_mod.is_empty() {
                continue;
            }
            match Formula::parse(chem_mod) {
                Ok(formula) => {
                    let unknown = formula.unknown_symbols(elements);
                    if !unknown.is_empty() {
                        errors.push(format!(
                            "\"{}\" chemical modification contains invalid element symbol(s): {}.",
                            id,
                            unknown.join(",")
                        ));
                    }
                }
                Err(_) => errors.push(format!(
                    "\"{}\" chemical modification '{}' is not a valid formula.",
                    id, chem_mod
                )),
            }
        }

        for (label, value) in [
            ("Total Number of Disulfides", self.total_disulfides),
            ("Unreduced HC Disulfides", self.hc_disulfides),
            ("Unreduced LC Disulfides", self.lc_disulfides),
        ] {
            if !(0..=DISULFIDE_LIMIT).contains(&value) {
                errors.push(format!(
                    "\"{}\" is not within valid range (0 to {}).",
                    label, DISULFIDE_LIMIT
                ));
            } else if value % 2 != 0 {
                errors.push(format!("\"{}\" is not an even number.", label));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(MabError::InvalidInputs(errors))
        }
    }
}

/// 还原组成
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedComposition {
    /// 部分还原（仅链内二硫键保留）
    pub partial: Composition,
    /// 完全还原（无二硫键）
    pub full: Composition,
    /// 修饰说明
    pub note: String,
}

/// 二硫键形成时失去的氢
fn disulfide_hydrogens(bonds: i64) -> Composition {
    element("Hydrogen", 2 * bonds)
}

/// 重链还原组成
pub fn reduce_heavy_chain(
    sequence: &str,
    composition: &Composition,
    cyclize: bool,
    lys_clip: bool,
    disulfides: i64,
) -> Result<ReducedComposition> {
    let mut modified = composition.clone();

    let mut cyclize_msg = "None";
    if cyclize {
        match sequence.chars().next() {
            Some('Q') => {
                // 失去 NH3
                let ammonia = &element("Nitrogen", 1) + &element("Hydrogen", 3);
                modified = &modified - &ammonia;
                cyclize_msg = "Pyro Q";
            }
            Some('E') => {
                modified = &modified - &residues::water();
                cyclize_msg = "Pyro E";
            }
            _ => {}
        }
    }

    let mut lys_clip_msg = "No";
    if lys_clip && sequence.ends_with('K') {
        modified = &modified - &residues::residue_composition("Lys")?;
        lys_clip_msg = "Yes";
    }

    Ok(ReducedComposition {
        partial: &modified - &disulfide_hydrogens(disulfides),
        full: modified,
        note: format!(
            "N-Terminal Cyclization: {} | C-Terminal Lysine Clipping: {}",
            cyclize_msg, lys_clip_msg
        ),
    })
}

/// 轻链还原组成
pub fn reduce_light_chain(composition: &Composition, disulfides: i64) -> ReducedComposition {
    ReducedComposition {
        partial: composition - &disulfide_hydrogens(disulfides),
        full: composition.clone(),
        note: String::new(),
    }
}

/// 已计算还原组成的链
#[derive(Debug, Clone)]
pub struct ReducedChain {
    pub chain: Chain,
    pub reduced: ReducedComposition,
    pub chem_mod: Formula,
    /// 化学修饰质量（质量损失为负）
    pub chem_mod_mass: f64,
}

impl ReducedChain {
    pub fn id(&self) -> ChainId {
        self.chain.id
    }

    pub fn partial_mass(&self, elements: &MassTable) -> Result<f64> {
        Ok(self.reduced.partial.mass(elements)? + self.chem_mod_mass)
    }

    pub fn full_mass(&self, elements: &MassTable) -> Result<f64> {
        Ok(self.reduced.full.mass(elements)? + self.chem_mod_mass)
    }
}

/// 抗体：四条链及其还原组成
#[derive(Debug, Clone)]
pub struct Antibody {
    pub params: AntibodyParams,
    /// 按 `ChainId::ALL` 顺序
    pub chains: Vec<ReducedChain>,
    pub unique_heavy: Vec<ChainId>,
    pub unique_light: Vec<ChainId>,
}

impl Antibody {
    /// 规范化、校验并计算全部链组成
    pub fn build(params: AntibodyParams, elements: &MassTable) -> Result<Self> {
        let params = params.normalized();
        params.validate(elements)?;

        let mut chains = Vec::with_capacity(ChainId::ALL.len());
        for id in ChainId::ALL {
            let chain = params.chain(id);
            let composition = sequence::chain_composition(&chain.sequence)?;
            let pair = &params.pairs[id.pair() - 1];

            let reduced = match id.chain_type() {
                ChainType::Heavy => reduce_heavy_chain(
                    &chain.sequence,
                    &composition,
                    pair.cyclize,
                    pair.lys_clip,
                    params.hc_disulfides,
                )?,
                ChainType::Light => reduce_light_chain(&composition, params.lc_disulfides),
            };

            let chem_mod = Formula::parse(&chain.chem_mod)?;
            let chem_mod_mass = chem_mod.mass(elements)?;

            chains.push(ReducedChain {
                chain,
                reduced,
                chem_mod,
                chem_mod_mass,
            });
        }

        let mut unique_heavy = vec![ChainId::Hc1];
        if chains[ChainId::Hc2.index()].chain.sequence != chains[ChainId::Hc1.index()].chain.sequence {
            unique_heavy.push(ChainId::Hc2);
        }
        let mut unique_light = vec![ChainId::Lc1];
        if chains[ChainId::Lc2.index()].chain.sequence != chains[ChainId::Lc1.index()].chain.sequence {
            unique_light.push(ChainId::Lc2);
        }

        Ok(Antibody {
            params,
            chains,
            unique_heavy,
            unique_light,
        })
    }

    pub fn chain(&self, id: ChainId) -> &ReducedChain {
        &self.chains[id.index()]
    }

    /// 两对 HC 或 LC 序列不同
    pub fn is_heterodimer(&self) -> bool {
        self.unique_heavy.len() != 1 || self.unique_light.len() != 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::test_elements;

    fn params(hc: &str, lc: &str) -> AntibodyParams {
        let mut p = AntibodyParams::default();
        p.pairs[0].heavy = ChainInput::new(hc, "");
        p.pairs[0].light = ChainInput::new(lc, "");
        p
    }

    #[test]
    fn test_fill_second_pair_copies_everything() {
        let mut p = params("QVK", "DIQ");
        p.pairs[0].heavy.chem_mod = "H2O".to_string();
        p.pairs[0].cyclize = true;
        let p = p.normalized();
        assert_eq!(p.pairs[1], p.pairs[0]);
    }

    #[test]
    fn test_fill_second_pair_sequence_only() {
        let mut p = params("QVK", "DIQ");
        p.pairs[0].cyclize = true;
        p.pairs[1].heavy = ChainInput::new("EVK", "");
        let p = p.normalized();
        assert_eq!(p.pairs[1].heavy.sequence, "EVK");
        assert_eq!(p.pairs[1].light.sequence, "DIQ");
        assert!(!p.pairs[1].cyclize);
    }

    #[test]
    fn test_validate_collects_errors() {
        let mut p = params("", "DIXQ");
        p.pairs[0].light.chem_mod = "C2Xy".to_string();
        p.total_disulfides = 3;
        p.hc_disulfides = 102;
        let p = p.normalized();

        match p.validate(&test_elements()) {
            Err(MabError::InvalidInputs(errors)) => {
                assert!(errors.iter().any(|e| e.contains("HC-1") && e.contains("required")));
                assert!(errors.iter().any(|e| e.contains("LC-1") && e.contains("invalid amino")));
                assert!(errors.iter().any(|e| e.contains("Xy")));
                assert!(errors.iter().any(|e| e.contains("Total") && e.contains("even")));
                assert!(errors.iter().any(|e| e.contains("HC Disulfides") && e.contains("range")));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_sequence_length() {
        let long = "G".repeat(sequence::MAX_SEQUENCE_LENGTH + 1);
        let p = params(&long, "DIQ").normalized();
        assert!(p.validate(&test_elements()).is_err());
    }

    #[test]
    fn test_heavy_chain_pyro_q_and_lys_clip() {
        let comp = sequence::chain_composition("QVK").unwrap();
        assert_eq!(comp.report_counts(), [16, 31, 5, 5, 0]);

        let reduced = reduce_heavy_chain("QVK", &comp, true, true, 2).unwrap();
        // −NH3 −Lys
        assert_eq!(reduced.full.report_counts(), [10, 16, 2, 4, 0]);
        // 两个二硫键 −4H
        assert_eq!(reduced.partial.report_counts(), [10, 12, 2, 4, 0]);
        assert!(reduced.note.contains("Pyro Q"));
        assert!(reduced.note.contains("Clipping: Yes"));
    }

    #[test]
    fn test_heavy_chain_pyro_e() {
        let comp = sequence::chain_composition("EVG").unwrap();
        let reduced = reduce_heavy_chain("EVG", &comp, true, true, 0).unwrap();
        let expected = &comp - &residues::water();
        assert_eq!(reduced.full, expected);
        assert_eq!(reduced.partial, expected);
        assert!(reduced.note.contains("Pyro E"));
        assert!(reduced.note.contains("Clipping: No"));
    }

    #[test]
    fn test_heavy_chain_without_modifications() {
        let comp = sequence::chain_composition("QVK").unwrap();
        let reduced = reduce_heavy_chain("QVK", &comp, false, false, 0).unwrap();
        assert_eq!(reduced.full, comp);
        assert_eq!(
            reduced.note,
            "N-Terminal Cyclization: None | C-Terminal Lysine Clipping: No"
        );
    }

    #[test]
    fn test_light_chain_partial() {
        let comp = sequence::chain_composition("DIQ").unwrap();
        let reduced = reduce_light_chain(&comp, 2);
        assert_eq!(reduced.full.count("Hydrogen") - reduced.partial.count("Hydrogen"), 4);
    }

    #[test]
    fn test_build_homodimer() {
        let ab = Antibody::build(params("qvk", "diq"), &test_elements()).unwrap();
        assert_eq!(ab.chains.len(), 4);
        assert_eq!(ab.chain(ChainId::Hc2).chain.sequence, "QVK");
        assert_eq!(ab.unique_heavy, vec![ChainId::Hc1]);
        assert!(!ab.is_heterodimer());
    }

    #[test]
    fn test_build_heterodimer_with_chem_mod() {
        let mut p = params("QVK", "DIQ");
        p.pairs[1].heavy = ChainInput::new("EVK", "-H2O");
        let ab = Antibody::build(p, &test_elements()).unwrap();

        assert_eq!(ab.unique_heavy, vec![ChainId::Hc1, ChainId::Hc2]);
        assert_eq!(ab.unique_light, vec![ChainId::Lc1]);
        assert!(ab.is_heterodimer());

        let hc2 = ab.chain(ChainId::Hc2);
        assert!(hc2.chem_mod.negative);
        assert!((hc2.chem_mod_mass + 18.01528642).abs() < 1e-6);
    }
}
