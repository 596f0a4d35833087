//! # mass 子命令实现
//!
//! 由每条链的基础质量和可选糖链计算还原质量与完整质量。
//!
//! ## 依赖关系
//! - 使用 `cli/mass.rs` 定义的 MassArgs
//! - 使用 `calc/mass.rs`, `chemistry/mod.rs`

use crate::calc::{calculate, CalculationResult, ChainSelection, DisulfideCorrection};
use crate::chemistry::component_table;
use crate::cli::mass::{ChainSpec, MassArgs};
use crate::cli::TableArgs;
use crate::error::{MabError, Result};
use crate::models::find_glycan;
use crate::tables::TableSet;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 执行 mass 子命令
pub fn execute(args: MassArgs, tables: &TableArgs) -> Result<()> {
    let store = super::open_store(tables)?;
    let snapshot = store.snapshot();

    let result = compute(&snapshot, &args.chains, args.disulfides, args.bond_loss)?;
    print_result(&result, args.disulfides);
    Ok(())
}

/// 二硫键校正：显式给出每键损失，否则取 2 × 氢
pub fn disulfide_correction(
    tables: &TableSet,
    bonds: u32,
    bond_loss: Option<f64>,
) -> Result<DisulfideCorrection> {
    match bond_loss {
        Some(loss) => DisulfideCorrection::new(bonds, loss),
        None => DisulfideCorrection::from_hydrogen(bonds, &tables.masses).map_err(|_| {
            MabError::InvalidInput(
                "the mass table has no Hydrogen entry; pass --bond-loss explicitly".to_string(),
            )
        }),
    }
}

/// 解析糖链名并计算
pub fn compute(
    tables: &TableSet,
    chains: &[ChainSpec],
    bonds: u32,
    bond_loss: Option<f64>,
) -> Result<CalculationResult> {
    if chains.is_empty() {
        return Err(MabError::InvalidInput("at least one chain is required".to_string()));
    }

    let components = component_table(&tables.masses)?;
    let correction = disulfide_correction(tables, bonds, bond_loss)?;

    let mut selections = Vec::with_capacity(chains.len());
    for spec in chains {
        let glycan = match &spec.glycan {
            Some(name) => Some(find_glycan(&tables.glycans, name)?),
            None => None,
        };
        selections.push(ChainSelection::new(spec.base_mass, glycan)?);
    }

    calculate(&selections, &components, &correction)
}

#[derive(Tabled)]
struct ChainRow {
    #[tabled(rename = "Chain")]
    index: usize,
    #[tabled(rename = "Base (Da)")]
    base_mass: String,
    #[tabled(rename = "Glycan")]
    glycan: String,
    #[tabled(rename = "Glycan (Da)")]
    glycan_mass: String,
    #[tabled(rename = "Total (Da)")]
    total: String,
}

/// 打印计算结果
pub fn print_result(result: &CalculationResult, bonds: u32) {
    let rows: Vec<ChainRow> = result
        .chains
        .iter()
        .map(|c| ChainRow {
            index: c.index,
            base_mass: format!("{:.4}", c.base_mass),
            glycan: c.glycan.clone().unwrap_or_else(|| "-".to_string()),
            glycan_mass: format!("{:.4}", c.glycan_mass),
            total: format!("{:.4}", c.total()),
        })
        .collect();

    output::print_header("Mass Calculation");
    println!("{}", Table::new(rows));
    println!();
    output::print_mass("Reduced mass", result.reduced_mass);
    output::print_mass(
        &format!("S-S loss ({})", bonds),
        result.disulfide_correction,
    );
    output::print_mass("Intact mass", result.intact_mass);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GlycanDefinition;
    use crate::tables::MassTable;

    fn tables() -> TableSet {
        TableSet {
            masses: MassTable::from_entries(&[
                ("Hex", 162.0528),
                ("HexNAc", 203.0794),
                ("Fuc", 146.0579),
                ("Hydrogen", 1.00794075),
            ])
            .unwrap(),
            glycans: vec![
                GlycanDefinition::new("G0F", &[("HexNAc", 4), ("Hex", 3), ("Fuc", 1)]).unwrap(),
                GlycanDefinition::new("Hidden", &[("Hex", 1)])
                    .unwrap()
                    .with_show(false),
            ],
        }
    }

    fn spec(mass: f64, glycan: Option<&str>) -> ChainSpec {
        ChainSpec {
            base_mass: mass,
            glycan: glycan.map(|g| g.to_string()),
        }
    }

    #[test]
    fn test_compute_example() {
        let result = compute(&tables(), &[spec(25000.0, Some("G0F"))], 1, Some(2.0158)).unwrap();
        assert!((result.reduced_mass - 26144.5343).abs() < 1e-4);
        assert!((result.intact_mass - 26142.5185).abs() < 1e-4);
    }

    #[test]
    fn test_default_bond_loss_uses_hydrogen() {
        let result = compute(&tables(), &[spec(1000.0, None)], 2, None).unwrap();
        assert!((result.disulfide_correction - 4.0 * 1.00794075).abs() < 1e-9);

        let mut no_h = tables();
        no_h.masses = MassTable::from_entries(&[("Hex", 162.0528)]).unwrap();
        assert!(matches!(
            compute(&no_h, &[spec(1000.0, None)], 2, None),
            Err(MabError::InvalidInput(_))
        ));
        assert!(compute(&no_h, &[spec(1000.0, None)], 2, Some(2.0)).is_ok());
    }

    #[test]
    fn test_hidden_glycan_selectable_and_unknown_rejected() {
        assert!(compute(&tables(), &[spec(100.0, Some("Hidden"))], 0, None).is_ok());
        assert!(matches!(
            compute(&tables(), &[spec(100.0, Some("G2F"))], 0, None),
            Err(MabError::UnknownGlycan(_))
        ));
        assert!(compute(&tables(), &[], 0, None).is_err());
        assert!(compute(&tables(), &[spec(-5.0, None)], 0, None).is_err());
    }
}
