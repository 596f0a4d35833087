//! # glycans 子命令实现
//!
//! 按显示顺序列出糖链定义及其质量。
//!
//! ## 依赖关系
//! - 使用 `cli/glycans.rs` 定义的 GlycansArgs
//! - 使用 `calc/display.rs`, `calc/mass.rs`

use crate::calc::{compute_glycan_mass, display_order, display_order_all, display_order_any};
use crate::chemistry::component_table;
use crate::cli::glycans::{ChainFilter, GlycansArgs};
use crate::cli::TableArgs;
use crate::error::Result;
use crate::models::GlycanDefinition;
use crate::tables::{MassTable, TableSet};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 执行 glycans 子命令
pub fn execute(args: GlycansArgs, tables: &TableArgs) -> Result<()> {
    let store = super::open_store(tables)?;
    let snapshot = store.snapshot();
    show_glycans(&snapshot, args.chain, args.all)
}

/// 选出要显示的糖链
pub fn select_glycans(
    glycans: &[GlycanDefinition],
    filter: ChainFilter,
    include_hidden: bool,
) -> Vec<&GlycanDefinition> {
    if include_hidden {
        return display_order_all(glycans);
    }
    match filter.chain_type() {
        Some(chain) => display_order(glycans, chain),
        None => display_order_any(glycans),
    }
}

/// 打印糖链表
pub fn show_glycans(tables: &TableSet, filter: ChainFilter, include_hidden: bool) -> Result<()> {
    let components = component_table(&tables.masses)?;
    let list = select_glycans(&tables.glycans, filter, include_hidden);

    if list.is_empty() {
        output::print_warning(&format!("No glycans shown for chain filter '{}'", filter));
        return Ok(());
    }

    output::print_header(&format!("Glycans ({})", filter));
    println!("{}", glycan_table(&list, &components)?);
    Ok(())
}

#[derive(Tabled)]
struct GlycanRow {
    #[tabled(rename = "Order")]
    ord_pos: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Composition")]
    composition: String,
    #[tabled(rename = "HC")]
    show_hc: String,
    #[tabled(rename = "LC")]
    show_lc: String,
    #[tabled(rename = "Mass (Da)")]
    mass: String,
}

fn flag(value: bool) -> String {
    let text = if value { "Y" } else { "N" };
    text.to_string()
}

fn glycan_table(list: &[&GlycanDefinition], components: &MassTable) -> Result<Table> {
    let mut rows = Vec::with_capacity(list.len());
    for glycan in list {
        rows.push(GlycanRow {
            ord_pos: glycan.ord_pos,
            name: glycan.name.clone(),
            composition: glycan.composition_string(),
            show_hc: flag(glycan.show_hc),
            show_lc: flag(glycan.show_lc),
            mass: format!("{:.4}", compute_glycan_mass(glycan, components)?),
        });
    }
    Ok(Table::new(rows))
}
