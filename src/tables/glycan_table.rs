//! # 糖链定义表
//!
//! 读取糖链定义 CSV。除保留列外，每一列都是一个单糖组分，
//! 列顺序即组成顺序（也是质量累加顺序）。
//!
//! ## CSV 格式
//! ```text
//! Glycan_Name,HexNAc,Hex,dHex,NeuAc,NeuGc,Show_HC,Show_LC,Ord_Pos
//! G0F,4,3,1,0,0,Y,N,2
//! ```
//! 保留列（不区分大小写）: `Glycan_Name`/`Name`, `Ord_Pos`,
//! `Show`, `Show_HC`, `Show_LC`。单一 `Show` 列同时作用于两种链。
//!
//! ## 依赖关系
//! - 被 `tables/store.rs` 使用
//! - 使用 `models/glycan.rs`
//! - 使用 `csv` 读取

use crate::error::{MabError, Result};
use crate::models::GlycanDefinition;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// 表头中各列的角色
#[derive(Debug, Clone, PartialEq, Eq)]
enum Column {
    Name,
    OrdPos,
    Show,
    ShowHc,
    ShowLc,
    Component(String),
}

impl Column {
    fn from_header(header: &str) -> Self {
        match header.to_lowercase().as_str() {
            "glycan_name" | "glycan" | "name" => Column::Name,
            "ord_pos" | "ordpos" | "order" => Column::OrdPos,
            "show" => Column::Show,
            "show_hc" => Column::ShowHc,
            "show_lc" => Column::ShowLc,
            _ => Column::Component(header.to_string()),
        }
    }
}

/// 从 CSV 文件加载糖链定义
pub fn load_glycan_table(path: &Path) -> Result<Vec<GlycanDefinition>> {
    let display = path.display().to_string();
    if !path.is_file() {
        return Err(MabError::config(&display, "file not found"));
    }

    let file = std::fs::File::open(path).map_err(|e| MabError::config(&display, e.to_string()))?;
    parse_glycan_table(file, &display)
}

/// 从任意读取器解析糖链定义 CSV
pub fn parse_glycan_table<R: Read>(reader: R, source: &str) -> Result<Vec<GlycanDefinition>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<Column> = rdr
        .headers()
        .map_err(|e| MabError::config(source, e.to_string()))?
        .iter()
        .map(Column::from_header)
        .collect();

    if !columns.contains(&Column::Name) {
        return Err(MabError::config(source, "missing 'Glycan_Name' column"));
    }
    if !columns.iter().any(|c| matches!(c, Column::Component(_))) {
        return Err(MabError::config(source, "no component columns"));
    }

    let mut glycans = Vec::new();
    let mut seen = HashSet::new();

    for (i, record) in rdr.records().enumerate() {
        let line = i + 2;
        let record = record.map_err(|e| MabError::config(source, format!("line {}: {}", line, e)))?;
        let at_line = |reason: String| MabError::config(source, format!("line {}: {}", line, reason));

        let mut name = String::new();
        let mut ord_pos: i64 = line as i64 - 1;
        let mut show: Option<bool> = None;
        let mut show_hc: Option<bool> = None;
        let mut show_lc: Option<bool> = None;
        let mut composition: Vec<(String, u32)> = Vec::new();

        for (column, field) in columns.iter().zip(record.iter()) {
            match column {
                Column::Name => name = field.to_string(),
                Column::OrdPos => {
                    if !field.is_empty() {
                        ord_pos = field
                            .parse()
                            .map_err(|_| at_line(format!("invalid Ord_Pos '{}'", field)))?;
                    }
                }
                Column::Show => show = Some(parse_flag(field).map_err(at_line)?),
                Column::ShowHc => show_hc = Some(parse_flag(field).map_err(at_line)?),
                Column::ShowLc => show_lc = Some(parse_flag(field).map_err(at_line)?),
                Column::Component(component) => {
                    let count: u32 = if field.is_empty() {
                        0
                    } else {
                        field.parse().map_err(|_| {
                            at_line(format!("invalid count '{}' for '{}'", field, component))
                        })?
                    };
                    composition.push((component.clone(), count));
                }
            }
        }

        if name.is_empty() {
            return Err(at_line("empty glycan name".to_string()));
        }
        if !seen.insert(name.clone()) {
            return Err(at_line(format!("duplicate glycan '{}'", name)));
        }

        let mut glycan = GlycanDefinition::new(name, &composition)
            .map_err(|e| at_line(e.to_string()))?
            .with_ord_pos(ord_pos);
        if let Some(show) = show {
            glycan = glycan.with_show(show);
        }
        // Show_HC / Show_LC 优先于 Show
        let (hc, lc) = (glycan.show_hc, glycan.show_lc);
        glycan = glycan.with_chain_show(show_hc.unwrap_or(hc), show_lc.unwrap_or(lc));

        glycans.push(glycan);
    }

    if glycans.is_empty() {
        return Err(MabError::config(source, "table contains no rows"));
    }

    Ok(glycans)
}

/// 解析 Y/N 标志
fn parse_flag(field: &str) -> std::result::Result<bool, String> {
    match field.to_uppercase().as_str() {
        "Y" | "YES" | "TRUE" | "1" => Ok(true),
        "N" | "NO" | "FALSE" | "0" | "" => Ok(false),
        _ => Err(format!("invalid show flag '{}'", field)),
    }
}
