//! # 抗体物种组装
//!
//! 由还原链组合出完整分子、半抗体以及它们的糖型。
//!
//! ## 组合规则
//! - 完整分子：唯一 HC 两两可重复组合 × 唯一 LC 两两可重复组合，
//!   组成 = Σ 完全还原组成 − 总二硫键数 × H2
//! - 半抗体（仅异二聚体）：唯一 HC × 唯一 LC，减去一半二硫键
//! - 还原糖型：部分还原链 + 单个糖链
//! - 完整 / 半抗体糖型：物种 + 可重复组合的 k 个糖链；
//!   完整分子取两种链显示列表的并集，半抗体只取重链列表
//!
//! ## 依赖关系
//! - 被 `commands/antibody.rs`, `report/` 使用
//! - 使用 `calc/antibody.rs`, `calc/display.rs`, `itertools`

use crate::calc::antibody::{Antibody, ReducedChain};
use crate::calc::display::{display_order, display_order_any};
use crate::chemistry::residues::{self, element};
use crate::error::Result;
use crate::models::{ChainId, ChainType, Composition, GlycanDefinition};
use crate::tables::MassTable;

use itertools::Itertools;

/// 组装出的物种（可带糖链）
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub label: String,
    pub chains: Vec<ChainId>,
    /// 附加的糖链名称，按组合顺序
    pub glycans: Vec<String>,
    pub composition: Composition,
    /// 各链化学修饰质量之和
    pub chem_mod_mass: f64,
}

impl Species {
    /// 质量 = 组成质量 + 化学修饰质量
    ///
    /// `table` 需同时包含元素与糖链组分（见 `chemistry::component_table`）。
    pub fn mass(&self, table: &MassTable) -> Result<f64> {
        Ok(self.composition.mass(table)? + self.chem_mod_mass)
    }
}

/// 糖链的组成：已知残基按元素展开，其余组分保留原名
pub fn glycan_composition(glycan: &GlycanDefinition) -> Composition {
    let mut comp = Composition::new();
    for (component, count) in &glycan.composition {
        let count = *count as i64;
        match residues::get_residue(component) {
            Some(residue) => comp = &comp + &residue.composition().scaled(count),
            None => comp.add_count(component, count),
        }
    }
    comp
}

/// 物种的链标签，如 "HC-1/HC-2:LC-1/LC-1"、"HC-1:LC-1"、"HC-1"
pub fn chain_label(chains: &[ChainId]) -> String {
    match chains {
        [hc_a, hc_b, lc_a, lc_b] => format!("{}/{}:{}/{}", hc_a, hc_b, lc_a, lc_b),
        [hc, lc] => format!("{}:{}", hc, lc),
        _ => chains.iter().map(|c| c.to_string()).join("/"),
    }
}

fn disulfide_loss(bonds: i64) -> Composition {
    element("Hydrogen", 2 * bonds)
}

fn combine(chains: &[&ReducedChain], bonds: i64) -> (Composition, f64) {
    let mut comp = Composition::new();
    let mut chem_mod_mass = 0.0;
    for chain in chains {
        comp = &comp + &chain.reduced.full;
        chem_mod_mass += chain.chem_mod_mass;
    }
    (&comp - &disulfide_loss(bonds), chem_mod_mass)
}

/// 完整分子
pub fn intact_species(antibody: &Antibody) -> Vec<Species> {
    let total = antibody.params.total_disulfides;

    let hc_pairs = antibody
        .unique_heavy
        .iter()
        .copied()
        .combinations_with_replacement(2);
    let lc_pairs: Vec<Vec<ChainId>> = antibody
        .unique_light
        .iter()
        .copied()
        .combinations_with_replacement(2)
        .collect();

    hc_pairs
        .cartesian_product(lc_pairs)
        .map(|(hc, lc)| {
            let ids = [hc[0], hc[1], lc[0], lc[1]];
            let chains: Vec<&ReducedChain> = ids.iter().map(|id| antibody.chain(*id)).collect();
            let (composition, chem_mod_mass) = combine(&chains, total);
            Species {
                label: chain_label(&ids),
                chains: ids.to_vec(),
                glycans: Vec::new(),
                composition,
                chem_mod_mass,
            }
        })
        .collect()
}

/// 半抗体，同二聚体返回空列表
pub fn half_body_species(antibody: &Antibody) -> Vec<Species> {
    if !antibody.is_heterodimer() {
        return Vec::new();
    }
    let bonds = antibody.params.total_disulfides / 2;

    antibody
        .unique_heavy
        .iter()
        .cartesian_product(antibody.unique_light.iter())
        .map(|(hc, lc)| {
            let chains = [antibody.chain(*hc), antibody.chain(*lc)];
            let (composition, chem_mod_mass) = combine(&chains, bonds);
            Species {
                label: chain_label(&[*hc, *lc]),
                chains: vec![*hc, *lc],
                glycans: Vec::new(),
                composition,
                chem_mod_mass,
            }
        })
        .collect()
}

/// 还原糖型
///
/// 重链使用重链显示列表；轻链仅在糖基化时参与，使用轻链显示列表。
pub fn reduced_glycoforms(antibody: &Antibody, glycans: &[GlycanDefinition]) -> Vec<Species> {
    let mut ids = antibody.unique_heavy.clone();
    if antibody.params.lc_glycosylated {
        ids.extend(antibody.unique_light.iter().copied());
    }

    let mut forms = Vec::new();
    for id in ids {
        let chain = antibody.chain(id);
        for glycan in display_order(glycans, id.chain_type()) {
            forms.push(Species {
                label: format!("{}_{}", id, glycan.name),
                chains: vec![id],
                glycans: vec![glycan.name.clone()],
                composition: &chain.reduced.partial + &glycan_composition(glycan),
                chem_mod_mass: chain.chem_mod_mass,
            });
        }
    }
    forms
}

/// 为每个物种附加 `count` 个糖链（可重复组合）
pub fn assembled_glycoforms(
    species: &[Species],
    glycans: &[&GlycanDefinition],
    count: usize,
) -> Vec<Species> {
    if count == 0 || glycans.is_empty() {
        return Vec::new();
    }

    let combos: Vec<Vec<&GlycanDefinition>> = glycans
        .iter()
        .copied()
        .combinations_with_replacement(count)
        .collect();

    let mut forms = Vec::with_capacity(species.len() * combos.len());
    for base in species {
        for combo in &combos {
            let names: Vec<String> = combo.iter().map(|g| g.name.clone()).collect();
            let mut composition = base.composition.clone();
            for glycan in combo {
                composition = &composition + &glycan_composition(glycan);
            }
            forms.push(Species {
                label: format!("{}|+ {}", base.label, names.join(" + ")),
                chains: base.chains.clone(),
                glycans: names,
                composition,
                chem_mod_mass: base.chem_mod_mass,
            });
        }
    }
    forms
}

/// 每个 HC（以及糖基化时每个 LC）各带一个糖链
fn glycan_sites(antibody: &Antibody, heavy_chains: usize, light_chains: usize) -> usize {
    if antibody.params.lc_glycosylated {
        heavy_chains + light_chains
    } else {
        heavy_chains
    }
}

/// 完整分子糖型，糖链取两种链显示列表的并集
pub fn intact_glycoforms(
    antibody: &Antibody,
    species: &[Species],
    glycans: &[GlycanDefinition],
) -> Vec<Species> {
    let shown = display_order_any(glycans);
    assembled_glycoforms(species, &shown, glycan_sites(antibody, 2, 2))
}

/// 半抗体糖型，糖链只取重链显示列表
pub fn half_body_glycoforms(
    antibody: &Antibody,
    species: &[Species],
    glycans: &[GlycanDefinition],
) -> Vec<Species> {
    let shown = display_order(glycans, ChainType::Heavy);
    assembled_glycoforms(species, &shown, glycan_sites(antibody, 1, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::antibody::{AntibodyParams, ChainInput};
    use crate::calc::mass::{compute_intact_mass, ChainSelection, DisulfideCorrection};
    use crate::calc::test_elements;
    use crate::chemistry::component_table;

    fn params(hc1: &str, lc1: &str, hc2: &str) -> AntibodyParams {
        let mut p = AntibodyParams::default();
        p.pairs[0].heavy = ChainInput::new(hc1, "");
        p.pairs[0].light = ChainInput::new(lc1, "");
        p.pairs[1].heavy = ChainInput::new(hc2, "");
        p.total_disulfides = 4;
        p.hc_disulfides = 2;
        p.lc_disulfides = 2;
        p
    }

    fn glycans() -> Vec<GlycanDefinition> {
        vec![
            GlycanDefinition::new("G1F", &[("HexNAc", 4), ("Hex", 4), ("dHex", 1)])
                .unwrap()
                .with_ord_pos(2),
            GlycanDefinition::new("G0F", &[("HexNAc", 4), ("Hex", 3), ("dHex", 1)])
                .unwrap()
                .with_ord_pos(1),
            GlycanDefinition::new("Man5", &[("HexNAc", 2), ("Hex", 5)])
                .unwrap()
                .with_chain_show(false, true)
                .with_ord_pos(3),
        ]
    }

    #[test]
    fn test_chain_label() {
        assert_eq!(
            chain_label(&[ChainId::Hc1, ChainId::Hc2, ChainId::Lc1, ChainId::Lc1]),
            "HC-1/HC-2:LC-1/LC-1"
        );
        assert_eq!(chain_label(&[ChainId::Hc2, ChainId::Lc1]), "HC-2:LC-1");
        assert_eq!(chain_label(&[ChainId::Lc2]), "LC-2");
    }

    #[test]
    fn test_glycan_composition_g0f() {
        let g0f = GlycanDefinition::new("G0F", &[("HexNAc", 4), ("Hex", 3), ("dHex", 1)]).unwrap();
        assert_eq!(glycan_composition(&g0f).report_counts(), [56, 92, 4, 39, 0]);

        let custom = GlycanDefinition::new("X", &[("Fuc", 2)]).unwrap();
        assert_eq!(glycan_composition(&custom).count("Fuc"), 2);
    }

    #[test]
    fn test_intact_homodimer_matches_calculator() {
        let elements = test_elements();
        let ab = Antibody::build(params("QVKCG", "DIQCK", ""), &elements).unwrap();

        let species = intact_species(&ab);
        assert_eq!(species.len(), 1);
        assert_eq!(species[0].label, "HC-1/HC-1:LC-1/LC-1");

        let full: Vec<f64> = [ChainId::Hc1, ChainId::Hc1, ChainId::Lc1, ChainId::Lc1]
            .iter()
            .map(|id| ab.chain(*id).full_mass(&elements).unwrap())
            .collect();
        let selections: Vec<ChainSelection> = full
            .iter()
            .map(|m| ChainSelection::new(*m, None).unwrap())
            .collect();
        let correction = DisulfideCorrection::from_hydrogen(4, &elements).unwrap();
        let expected = compute_intact_mass(&selections, &elements, &correction).unwrap();

        let mass = species[0].mass(&elements).unwrap();
        assert!((mass - expected).abs() < 1e-6);
        assert!(half_body_species(&ab).is_empty());
    }

    #[test]
    fn test_heterodimer_combinations() {
        let ab = Antibody::build(params("QVK", "DIQ", "EVK"), &test_elements()).unwrap();

        let labels: Vec<String> = intact_species(&ab).into_iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![
                "HC-1/HC-1:LC-1/LC-1",
                "HC-1/HC-2:LC-1/LC-1",
                "HC-2/HC-2:LC-1/LC-1",
            ]
        );

        let half = half_body_species(&ab);
        let labels: Vec<&str> = half.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["HC-1:LC-1", "HC-2:LC-1"]);

        // 半抗体减去一半二硫键
        let expected = &(&ab.chain(ChainId::Hc1).reduced.full
            + &ab.chain(ChainId::Lc1).reduced.full)
            - &element("Hydrogen", 4);
        assert_eq!(half[0].composition, expected);
    }

    #[test]
    fn test_reduced_glycoforms_respect_chain_lists() {
        let glycans = glycans();
        let mut p = params("QVK", "DIQ", "");
        let ab = Antibody::build(p.clone(), &test_elements()).unwrap();

        let labels: Vec<String> = reduced_glycoforms(&ab, &glycans)
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec!["HC-1_G0F", "HC-1_G1F"]);

        p.lc_glycosylated = true;
        let ab = Antibody::build(p, &test_elements()).unwrap();
        let forms = reduced_glycoforms(&ab, &glycans);
        let labels: Vec<&str> = forms.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["HC-1_G0F", "HC-1_G1F", "LC-1_G0F", "LC-1_G1F", "LC-1_Man5"]
        );

        let g0f = &forms[0];
        assert_eq!(
            g0f.composition,
            &ab.chain(ChainId::Hc1).reduced.partial + &glycan_composition(&glycans[1])
        );
    }

    #[test]
    fn test_intact_glycoforms() {
        let glycans = glycans();
        let elements = test_elements();
        let ab = Antibody::build(params("QVK", "DIQ", ""), &elements).unwrap();
        let species = intact_species(&ab);

        let forms = intact_glycoforms(&ab, &species, &glycans);
        // 3 个糖链取 2 的可重复组合
        assert_eq!(forms.len(), 6);
        assert_eq!(forms[0].label, "HC-1/HC-1:LC-1/LC-1|+ G0F + G0F");
        assert_eq!(forms[1].glycans, vec!["G0F", "G1F"]);

        let components = component_table(&elements).unwrap();
        let g0f = &glycans[1];
        let delta = forms[0].mass(&components).unwrap() - species[0].mass(&components).unwrap();
        let glycan_mass = crate::calc::mass::compute_glycan_mass(g0f, &components).unwrap();
        assert!((delta - 2.0 * glycan_mass).abs() < 1e-6);
    }

    #[test]
    fn test_half_body_glycoform_counts() {
        let glycans = glycans();
        let mut p = params("QVK", "DIQ", "EVK");
        p.lc_glycosylated = true;
        let ab = Antibody::build(p, &test_elements()).unwrap();
        let species = half_body_species(&ab);

        let forms = half_body_glycoforms(&ab, &species, &glycans);
        // 2 个物种 × 重链列表 (G0F, G1F) 取 2 的 3 种组合
        assert_eq!(forms.len(), 6);
        assert!(forms.iter().all(|f| f.glycans.len() == 2));
        assert!(forms.iter().all(|f| !f.glycans.contains(&"Man5".to_string())));
    }

    #[test]
    fn test_half_body_ignores_light_only_glycans() {
        let glycans = vec![
            GlycanDefinition::new("G0F", &[("HexNAc", 4), ("Hex", 3), ("dHex", 1)])
                .unwrap()
                .with_chain_show(true, false)
                .with_ord_pos(1),
            GlycanDefinition::new("G2FS1", &[("HexNAc", 4), ("Hex", 5), ("dHex", 1), ("NeuAc", 1)])
                .unwrap()
                .with_chain_show(false, true)
                .with_ord_pos(2),
        ];
        let ab = Antibody::build(params("QVK", "DIQ", "EVK"), &test_elements()).unwrap();
        assert!(!ab.params.lc_glycosylated);

        let half = half_body_species(&ab);
        let labels: Vec<String> = half_body_glycoforms(&ab, &half, &glycans)
            .into_iter()
            .map(|f| f.label)
            .collect();
        assert_eq!(labels, vec!["HC-1:LC-1|+ G0F", "HC-2:LC-1|+ G0F"]);

        // 完整分子仍使用并集
        let intact = intact_species(&ab);
        let forms = intact_glycoforms(&ab, &intact, &glycans);
        assert!(forms.iter().any(|f| f.glycans.contains(&"G2FS1".to_string())));
    }

    #[test]
    fn test_assembled_glycoforms_empty_inputs() {
        let species = vec![Species {
            label: "HC-1:LC-1".to_string(),
            chains: vec![ChainId::Hc1, ChainId::Lc1],
            glycans: Vec::new(),
            composition: Composition::new(),
            chem_mod_mass: 0.0,
        }];
        assert!(assembled_glycoforms(&species, &[], 2).is_empty());
        let g = glycans();
        let refs: Vec<&GlycanDefinition> = g.iter().collect();
        assert!(assembled_glycoforms(&species, &refs, 0).is_empty());
        assert_eq!(assembled_glycoforms(&species, &refs, 1).len(), 3);
    }
}
