//! # antibody 子命令实现
//!
//! 由 HC/LC 序列计算还原链、完整分子、半抗体及其糖型，
//! 在终端打印摘要并导出 CSV 报告。
//!
//! ## 依赖关系
//! - 使用 `cli/antibody.rs` 定义的 AntibodyArgs
//! - 使用 `report/` 汇总与导出

use crate::calc::Species;
use crate::cli::antibody::AntibodyArgs;
use crate::cli::TableArgs;
use crate::error::Result;
use crate::report::{export, round_mass, AntibodyReport};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 执行 antibody 子命令
pub fn execute(args: AntibodyArgs, tables: &TableArgs) -> Result<()> {
    output::print_header("Antibody Mass Calculation");

    let store = super::open_store(tables)?;
    let report = AntibodyReport::build(args.to_params(), store.snapshot())?;

    if report.antibody.is_heterodimer() {
        output::print_info("Heterodimer: half-body species included");
    }

    print_reduced_table(&report)?;
    print_species_table("Intact Masses", &report, &report.intact)?;
    if !report.half_body.is_empty() {
        print_species_table("Half-Body Masses", &report, &report.half_body)?;
    }

    output::print_separator();
    output::print_info(&format!(
        "Glycoforms: {} reduced, {} intact, {} half-body",
        report.reduced_glyco.len(),
        report.intact_glyco.len(),
        report.half_body_glyco.len()
    ));

    if args.no_report {
        return Ok(());
    }

    let sections = report.sections()?;
    let written = export::write_report(&sections, &args.output)?;
    output::print_success(&format!(
        "Wrote {} report files to '{}'",
        written.len(),
        args.output.display()
    ));
    output::print_done("Antibody calculation complete");
    Ok(())
}

#[derive(Tabled)]
struct ReducedRow {
    #[tabled(rename = "Chain")]
    chain: String,
    #[tabled(rename = "Length")]
    length: usize,
    #[tabled(rename = "Chem Mod")]
    chem_mod: String,
    #[tabled(rename = "Partial (Da)")]
    partial: i64,
    #[tabled(rename = "Full (Da)")]
    full: i64,
    #[tabled(rename = "Note")]
    note: String,
}

fn print_reduced_table(report: &AntibodyReport) -> Result<()> {
    let mut rows = Vec::with_capacity(report.antibody.chains.len());
    for chain in &report.antibody.chains {
        rows.push(ReducedRow {
            chain: chain.id().to_string(),
            length: chain.chain.sequence.len(),
            chem_mod: chain.chem_mod.text.clone(),
            partial: round_mass(chain.partial_mass(&report.components)?),
            full: round_mass(chain.full_mass(&report.components)?),
            note: chain.reduced.note.clone(),
        });
    }

    output::print_header("Reduced Masses");
    println!("{}", Table::new(rows));
    Ok(())
}

#[derive(Tabled)]
struct SpeciesRow {
    #[tabled(rename = "Species")]
    label: String,
    #[tabled(rename = "Chem Mod")]
    chem_mod: String,
    #[tabled(rename = "Mass (Da)")]
    mass: i64,
}

fn print_species_table(
    title: &str,
    report: &AntibodyReport,
    species: &[Species],
) -> Result<()> {
    let mut rows = Vec::with_capacity(species.len());
    for s in species {
        rows.push(SpeciesRow {
            label: s.label.clone(),
            chem_mod: report.chem_mod_text(&s.chains),
            mass: report.rounded_mass(s)?,
        });
    }

    output::print_header(title);
    println!("{}", Table::new(rows));
    Ok(())
}
