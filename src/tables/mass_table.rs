//! # 质量表
//!
//! 组分名 → 摩尔质量 (Da) 的不可变映射，可附带元素符号别名。
//!
//! ## CSV 格式
//! ```text
//! Name,Symbol,Mass
//! Carbon,C,12.0107359
//! Hydrogen,H,1.00794075
//! ```
//! `Symbol` 列可选。
//!
//! ## 依赖关系
//! - 被 `tables/store.rs`, `calc/`, `models/composition.rs` 使用
//! - 使用 `csv` + `serde` 读取

use crate::error::{MabError, Result};

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// 质量表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MassTable {
    /// 按表中顺序保存的 (名称, 质量)
    entries: Vec<(String, f64)>,
    /// 名称 → entries 下标
    index: HashMap<String, usize>,
    /// 别名（元素符号）→ entries 下标
    aliases: HashMap<String, usize>,
    /// 名称 → 别名
    symbols: HashMap<String, String>,
}

impl MassTable {
    /// 从 (名称, 质量) 列表构建
    #[cfg(test)]
    pub fn from_entries<S: AsRef<str>>(entries: &[(S, f64)]) -> Result<Self> {
        let mut table = MassTable::default();
        for (name, mass) in entries {
            table.insert(name.as_ref(), *mass)?;
        }
        Ok(table)
    }

    /// 插入新组分，名称重复或质量非法时报错
    pub fn insert(&mut self, name: &str, mass: f64) -> Result<()> {
        if name.is_empty() {
            return Err(MabError::InvalidInput("component name is empty".to_string()));
        }
        if !mass.is_finite() || mass < 0.0 {
            return Err(MabError::InvalidInput(format!(
                "mass of '{}' must be a non-negative number, got {}",
                name, mass
            )));
        }
        if self.resolve(name).is_some() {
            return Err(MabError::InvalidInput(format!(
                "duplicate component '{}'",
                name
            )));
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), mass));
        Ok(())
    }

    /// 为已有组分添加别名（如元素符号）
    pub fn insert_alias(&mut self, name: &str, alias: &str) -> Result<()> {
        let idx = *self.index.get(name).ok_or_else(|| MabError::UnknownComponent {
            component: name.to_string(),
        })?;
        if self.resolve(alias).is_some() {
            return Err(MabError::InvalidInput(format!(
                "duplicate component '{}'",
                alias
            )));
        }
        self.aliases.insert(alias.to_string(), idx);
        self.symbols.insert(name.to_string(), alias.to_string());
        Ok(())
    }

    fn resolve(&self, name: &str) -> Option<usize> {
        self.index
            .get(name)
            .or_else(|| self.aliases.get(name))
            .copied()
    }

    /// 按名称或别名查询
    pub fn get(&self, name: &str) -> Option<f64> {
        self.resolve(name).map(|i| self.entries[i].1)
    }

    /// 按名称或别名查询，缺失时返回 `UnknownComponent`
    pub fn require(&self, name: &str) -> Result<f64> {
        self.get(name).ok_or_else(|| MabError::UnknownComponent {
            component: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// 是否为已登记的符号别名
    pub fn is_symbol(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    /// 组分的符号别名
    pub fn symbol_of(&self, name: &str) -> Option<&str> {
        self.symbols.get(name).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 质量表 CSV 行
#[derive(Debug, Deserialize)]
struct MassRow {
    #[serde(rename = "Name", alias = "name", alias = "Component")]
    name: String,
    #[serde(rename = "Symbol", alias = "symbol", default)]
    symbol: Option<String>,
    #[serde(rename = "Mass", alias = "mass")]
    mass: f64,
}

/// 从 CSV 文件加载质量表
pub fn load_mass_table(path: &Path) -> Result<MassTable> {
    let display = path.display().to_string();
    if !path.is_file() {
        return Err(MabError::config(&display, "file not found"));
    }

    let file = std::fs::File::open(path).map_err(|e| MabError::config(&display, e.to_string()))?;
    parse_mass_table(file, &display)
}

/// 从任意读取器解析质量表 CSV
pub fn parse_mass_table<R: Read>(reader: R, source: &str) -> Result<MassTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = MassTable::default();

    for (i, row) in rdr.deserialize::<MassRow>().enumerate() {
        // 表头占第 1 行
        let line = i + 2;
        let row = row.map_err(|e| MabError::config(source, format!("line {}: {}", line, e)))?;

        table
            .insert(&row.name, row.mass)
            .map_err(|e| MabError::config(source, format!("line {}: {}", line, e)))?;

        if let Some(symbol) = row.symbol.as_deref().filter(|s| !s.is_empty()) {
            table
                .insert_alias(&row.name, symbol)
                .map_err(|e| MabError::config(source, format!("line {}: {}", line, e)))?;
        }
    }

    if table.is_empty() {
        return Err(MabError::config(source, "table contains no rows"));
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_symbols() {
        let content = "Name,Symbol,Mass\nCarbon,C,12.0107359\nOxygen,O,15.99940492\n";
        let table = parse_mass_table(content.as_bytes(), "test").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Carbon"), Some(12.0107359));
        assert_eq!(table.get("O"), Some(15.99940492));
        assert_eq!(table.symbol_of("Carbon"), Some("C"));
        assert!(table.is_symbol("C"));
        assert!(!table.is_symbol("Carbon"));
    }

    #[test]
    fn test_parse_without_symbol_column() {
        let content = "Name,Mass\nHex,162.0528\nHexNAc,203.0794\n";
        let table = parse_mass_table(content.as_bytes(), "test").unwrap();
        assert_eq!(table.get("HexNAc"), Some(203.0794));
        assert_eq!(table.get("Fuc"), None);
    }

    #[test]
    fn test_parse_rejects_bad_rows() {
        let negative = "Name,Mass\nHex,-1.0\n";
        assert!(matches!(
            parse_mass_table(negative.as_bytes(), "test"),
            Err(MabError::ConfigLoad { .. })
        ));

        let non_numeric = "Name,Mass\nHex,heavy\n";
        assert!(parse_mass_table(non_numeric.as_bytes(), "test").is_err());

        let duplicate = "Name,Mass\nHex,1.0\nHex,2.0\n";
        assert!(parse_mass_table(duplicate.as_bytes(), "test").is_err());

        let empty = "Name,Mass\n";
        assert!(parse_mass_table(empty.as_bytes(), "test").is_err());
    }

    #[test]
    fn test_require_names_missing_component() {
        let table = MassTable::from_entries(&[("Hex", 162.0528)]).unwrap();
        match table.require("NeuGc") {
            Err(MabError::UnknownComponent { component }) => assert_eq!(component, "NeuGc"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_mass_table(Path::new("/nonexistent/Element_Mass.csv"));
        assert!(matches!(result, Err(MabError::ConfigLoad { .. })));
    }
}
