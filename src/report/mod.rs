//! # 抗体报告
//!
//! 汇总一次抗体计算的全部物种，并整理为按节划分的表格。
//!
//! ## 报告节
//! - `user_input` / `element_masses` / `glycan_masses` / `chem_mod_masses`
//! - `reduced_masses` / `intact_masses` / `half_body_masses`（仅异二聚体）
//! - `reduced_glyco` / `intact_glyco` / `half_body_glyco`（仅异二聚体）
//!
//! 物种质量取整到整数 Da（.5 时取偶数）。
//!
//! ## 依赖关系
//! - 被 `commands/antibody.rs` 使用
//! - 使用 `calc/`, `chemistry/`, `tables/`
//! - 子模块: export

pub mod export;

use crate::calc::assembly::{self, chain_label};
use crate::calc::{compute_glycan_mass, display_order, Antibody, AntibodyParams, PairInput, Species};
use crate::chemistry::component_table;
use crate::error::Result;
use crate::models::{ChainId, ChainType, REPORT_ELEMENTS};
use crate::tables::{MassTable, TableSet};

use std::sync::Arc;

/// 报告中的一节
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,
    /// 导出文件名（不含扩展名）
    pub name: &'static str,
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Section {
    fn new(title: &'static str, name: &'static str, header: &[&'static str]) -> Self {
        Section {
            title,
            name,
            header: header.to_vec(),
            rows: Vec::new(),
        }
    }
}

const SPECIES_HEADER: [&str; 8] = [
    "Chain", "Chem Mod", "Carbon", "Hydrogen", "Nitrogen", "Oxygen", "Sulfur", "Mass (Da)",
];

const GLYCO_HEADER: [&str; 9] = [
    "Chain", "Glycan", "Chem Mod", "Carbon", "Hydrogen", "Nitrogen", "Oxygen", "Sulfur",
    "Mass (Da)",
];

/// 整数 Da，恰为 .5 时取偶数
pub fn round_mass(mass: f64) -> i64 {
    mass.round_ties_even() as i64
}

/// 一次抗体计算的完整结果
#[derive(Debug, Clone)]
pub struct AntibodyReport {
    pub antibody: Antibody,
    pub tables: Arc<TableSet>,
    /// 元素 + 单糖质量
    pub components: MassTable,
    pub intact: Vec<Species>,
    pub half_body: Vec<Species>,
    pub reduced_glyco: Vec<Species>,
    pub intact_glyco: Vec<Species>,
    pub half_body_glyco: Vec<Species>,
}

impl AntibodyReport {
    /// 计算全部物种与糖型
    pub fn build(params: AntibodyParams, tables: Arc<TableSet>) -> Result<Self> {
        let components = component_table(&tables.masses)?;
        let antibody = Antibody::build(params, &tables.masses)?;

        let intact = assembly::intact_species(&antibody);
        let half_body = assembly::half_body_species(&antibody);
        let reduced_glyco = assembly::reduced_glycoforms(&antibody, &tables.glycans);
        let intact_glyco = assembly::intact_glycoforms(&antibody, &intact, &tables.glycans);
        let half_body_glyco =
            assembly::half_body_glycoforms(&antibody, &half_body, &tables.glycans);

        Ok(AntibodyReport {
            antibody,
            tables,
            components,
            intact,
            half_body,
            reduced_glyco,
            intact_glyco,
            half_body_glyco,
        })
    }

    /// 链的化学修饰文本，多条链以 "; " 连接
    pub fn chem_mod_text(&self, chains: &[ChainId]) -> String {
        chains
            .iter()
            .map(|id| self.antibody.chain(*id).chain.chem_mod.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// 整数 Da
    pub fn rounded_mass(&self, species: &Species) -> Result<i64> {
        Ok(round_mass(species.mass(&self.components)?))
    }

    fn species_row(&self, species: &Species) -> Result<Vec<String>> {
        let mut row = vec![species.label.clone(), self.chem_mod_text(&species.chains)];
        row.extend(species.composition.report_counts().iter().map(|c| c.to_string()));
        row.push(self.rounded_mass(species)?.to_string());
        Ok(row)
    }

    fn glyco_row(&self, species: &Species, assembled: bool) -> Result<Vec<String>> {
        let glycan = if assembled {
            format!("+ {}", species.glycans.join(" + "))
        } else {
            species.glycans.join(" + ")
        };
        let mut row = vec![
            chain_label(&species.chains),
            glycan,
            self.chem_mod_text(&species.chains),
        ];
        row.extend(species.composition.report_counts().iter().map(|c| c.to_string()));
        row.push(self.rounded_mass(species)?.to_string());
        Ok(row)
    }

    /// 整理全部报告节
    pub fn sections(&self) -> Result<Vec<Section>> {
        let mut sections = vec![
            self.user_input(),
            self.element_masses()?,
            self.glycan_masses()?,
            self.chem_mod_masses(),
            self.reduced_masses()?,
        ];

        let heterodimer = self.antibody.is_heterodimer();

        let mut intact = Section::new("Intact Masses", "intact_masses", &SPECIES_HEADER);
        for species in &self.intact {
            intact.rows.push(self.species_row(species)?);
        }
        sections.push(intact);

        if heterodimer {
            let mut half = Section::new("Half-Body Masses", "half_body_masses", &SPECIES_HEADER);
            for species in &self.half_body {
                half.rows.push(self.species_row(species)?);
            }
            sections.push(half);
        }

        let mut reduced = Section::new("Reduced Glycoforms", "reduced_glyco", &GLYCO_HEADER);
        for species in &self.reduced_glyco {
            reduced.rows.push(self.glyco_row(species, false)?);
        }
        sections.push(reduced);

        let mut intact_glyco = Section::new("Intact Glycoforms", "intact_glyco", &GLYCO_HEADER);
        for species in &self.intact_glyco {
            intact_glyco.rows.push(self.glyco_row(species, true)?);
        }
        sections.push(intact_glyco);

        if heterodimer {
            let mut half = Section::new("Half-Body Glycoforms", "half_body_glyco", &GLYCO_HEADER);
            for species in &self.half_body_glyco {
                half.rows.push(self.glyco_row(species, true)?);
            }
            sections.push(half);
        }

        Ok(sections)
    }

    fn user_input(&self) -> Section {
        let mut section = Section::new("User Input", "user_input", &["Parameter", "Value"]);
        let params = &self.antibody.params;
        let mut push = |name: String, value: String| section.rows.push(vec![name, value]);

        for (i, pair) in params.pairs.iter().enumerate() {
            let PairInput {
                heavy,
                light,
                cyclize,
                lys_clip,
            } = pair;
            let n = i + 1;
            push(format!("Heavy Chain {} Sequence", n), heavy.sequence.clone());
            push(format!("Heavy Chain {} Chemical Mod", n), heavy.chem_mod.clone());
            push(format!("Light Chain {} Sequence", n), light.sequence.clone());
            push(format!("Light Chain {} Chemical Mod", n), light.chem_mod.clone());
            push(format!("N-Terminal Cyclization {}", n), cyclize.to_string());
            push(format!("C-Terminal Lysine Clipping {}", n), lys_clip.to_string());
        }

        push(
            "Total Number of Disulfides".to_string(),
            params.total_disulfides.to_string(),
        );
        push(
            "Unreduced HC Disulfides".to_string(),
            params.hc_disulfides.to_string(),
        );
        push(
            "Unreduced LC Disulfides".to_string(),
            params.lc_disulfides.to_string(),
        );
        push(
            "Light Chain is Glycosylated".to_string(),
            params.lc_glycosylated.to_string(),
        );
        section
    }

    fn element_masses(&self) -> Result<Section> {
        let mut section = Section::new(
            "Average Element Masses",
            "element_masses",
            &["Element", "Symbol", "Avg Mass (Da)"],
        );
        let masses = &self.tables.masses;
        for name in REPORT_ELEMENTS {
            let mass = masses.require(name)?;
            let symbol = masses.symbol_of(name).unwrap_or_default();
            section
                .rows
                .push(vec![name.to_string(), symbol.to_string(), mass.to_string()]);
        }
        Ok(section)
    }

    fn glycan_masses(&self) -> Result<Section> {
        let mut section = Section::new(
            "Glycan Masses",
            "glycan_masses",
            &["Chain", "Glycan Name", "Mass (Da)"],
        );

        for chain_type in [ChainType::Heavy, ChainType::Light] {
            for glycan in display_order(&self.tables.glycans, chain_type) {
                let mass = compute_glycan_mass(glycan, &self.components)?;
                section.rows.push(vec![
                    chain_type.to_string(),
                    glycan.name.clone(),
                    format!("{:.4}", mass),
                ]);
            }
        }
        Ok(section)
    }

    fn chem_mod_masses(&self) -> Section {
        let mut section = Section::new(
            "Chemical Modification Masses",
            "chem_mod_masses",
            &["Chain", "Formula", "Mass (Da)"],
        );
        for chain in &self.antibody.chains {
            section.rows.push(vec![
                chain.id().to_string(),
                chain.chem_mod.text.clone(),
                format!("{:.4}", chain.chem_mod_mass),
            ]);
        }
        section
    }

    fn reduced_masses(&self) -> Result<Section> {
        let mut section = Section::new(
            "Reduced Masses",
            "reduced_masses",
            &[
                "Chain", "Reduction", "Chem Mod", "Carbon", "Hydrogen", "Nitrogen", "Oxygen",
                "Sulfur", "Mass (Da)", "Note",
            ],
        );

        for chain in &self.antibody.chains {
            let reduced = &chain.reduced;
            for (kind, composition, mass, note) in [
                (
                    "Partial",
                    &reduced.partial,
                    chain.partial_mass(&self.components)?,
                    reduced.note.as_str(),
                ),
                ("Full", &reduced.full, chain.full_mass(&self.components)?, ""),
            ] {
                let mut row = vec![
                    chain.id().to_string(),
                    kind.to_string(),
                    chain.chem_mod.text.clone(),
                ];
                row.extend(composition.report_counts().iter().map(|c| c.to_string()));
                row.push(round_mass(mass).to_string());
                row.push(note.to_string());
                section.rows.push(row);
            }
        }
        Ok(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::antibody::ChainInput;
    use crate::calc::test_elements;
    use crate::models::GlycanDefinition;

    fn tables() -> Arc<TableSet> {
        let glycans = vec![
            GlycanDefinition::new("G0F", &[("HexNAc", 4), ("Hex", 3), ("dHex", 1)])
                .unwrap()
                .with_ord_pos(1),
            GlycanDefinition::new("G1F", &[("HexNAc", 4), ("Hex", 4), ("dHex", 1)])
                .unwrap()
                .with_ord_pos(2),
        ];
        Arc::new(TableSet {
            masses: test_elements(),
            glycans,
        })
    }

    fn params(hc2: &str) -> AntibodyParams {
        let mut p = AntibodyParams::default();
        p.pairs[0].heavy = ChainInput::new("QVKCG", "H2O");
        p.pairs[0].light = ChainInput::new("DIQCK", "");
        p.pairs[0].cyclize = true;
        p.pairs[1].heavy = ChainInput::new(hc2, "");
        p.total_disulfides = 4;
        p.hc_disulfides = 2;
        p.lc_disulfides = 2;
        p
    }

    fn names(sections: &[Section]) -> Vec<&'static str> {
        sections.iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_homodimer_sections() {
        let report = AntibodyReport::build(params(""), tables()).unwrap();
        let sections = report.sections().unwrap();
        assert_eq!(
            names(&sections),
            vec![
                "user_input",
                "element_masses",
                "glycan_masses",
                "chem_mod_masses",
                "reduced_masses",
                "intact_masses",
                "reduced_glyco",
                "intact_glyco",
            ]
        );

        let reduced = &sections[4];
        // 4 条链 × (Partial, Full)
        assert_eq!(reduced.rows.len(), 8);
        assert_eq!(reduced.rows[0][1], "Partial");
        assert!(reduced.rows[0][9].contains("Pyro Q"));
        assert_eq!(reduced.rows[1][9], "");

        let intact_glyco = &sections[7];
        // G0F/G0F, G0F/G1F, G1F/G1F
        assert_eq!(intact_glyco.rows.len(), 3);
        assert_eq!(intact_glyco.rows[0][0], "HC-1/HC-1:LC-1/LC-1");
        assert_eq!(intact_glyco.rows[0][1], "+ G0F + G0F");
        assert_eq!(intact_glyco.rows[0][2], "H2O; H2O; ; ");
    }

    #[test]
    fn test_glycan_masses_list_both_chains() {
        let report = AntibodyReport::build(params(""), tables()).unwrap();
        assert!(!report.antibody.params.lc_glycosylated);

        let sections = report.sections().unwrap();
        let glycans = sections.iter().find(|s| s.name == "glycan_masses").unwrap();
        let chains: Vec<&str> = glycans.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(chains, vec!["HC", "HC", "LC", "LC"]);
    }

    #[test]
    fn test_round_mass_ties_to_even() {
        assert_eq!(round_mass(148_000.5), 148_000);
        assert_eq!(round_mass(148_001.5), 148_002);
        assert_eq!(round_mass(148_000.49), 148_000);
        assert_eq!(round_mass(148_000.51), 148_001);
    }

    #[test]
    fn test_heterodimer_sections() {
        let report = AntibodyReport::build(params("EVKCG"), tables()).unwrap();
        let sections = report.sections().unwrap();
        let names = names(&sections);
        assert!(names.contains(&"half_body_masses"));
        assert!(names.contains(&"half_body_glyco"));
        assert_eq!(report.intact.len(), 3);
        assert_eq!(report.half_body.len(), 2);
    }

    #[test]
    fn test_masses_are_rounded() {
        let report = AntibodyReport::build(params(""), tables()).unwrap();
        let species = &report.intact[0];
        let exact = species.mass(&report.components).unwrap();
        assert_eq!(report.rounded_mass(species).unwrap(), exact.round_ties_even() as i64);

        let sections = report.sections().unwrap();
        let intact = sections.iter().find(|s| s.name == "intact_masses").unwrap();
        assert_eq!(intact.rows[0][7], (exact.round_ties_even() as i64).to_string());
        assert_eq!(intact.header.len(), intact.rows[0].len());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut p = params("");
        p.total_disulfides = 3;
        assert!(AntibodyReport::build(p, tables()).is_err());
    }
}
