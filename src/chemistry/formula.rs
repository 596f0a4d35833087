//! # 分子式解析
//!
//! 解析化学修饰分子式，如 `H2O`、`C2H3NO`、`-H2O`。
//! 元素符号 = 大写字母 + 可选小写字母，计数省略时为 1。
//! 开头的 `-` 表示质量损失。
//!
//! ## 依赖关系
//! - 被 `calc/antibody.rs`, `commands/antibody.rs` 使用
//! - 使用 `regex`

use crate::error::{MabError, Result};
use crate::models::Composition;
use crate::tables::MassTable;

use regex::Regex;
use std::sync::LazyLock;

static ELEMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]?)(\d*)").unwrap());

/// 解析后的分子式
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    /// 原始文本
    pub text: String,
    /// 按元素符号计数
    pub composition: Composition,
    /// 是否为质量损失
    pub negative: bool,
}

impl Formula {
    /// 解析分子式；空字符串得到空分子式
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        let mut composition = Composition::new();
        let mut consumed = 0;

        for caps in ELEMENT_PATTERN.captures_iter(body) {
            let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
            if whole.start != consumed {
                return Err(MabError::InvalidFormula(text.to_string()));
            }
            consumed = whole.end;

            let symbol = &caps[1];
            let count: i64 = match &caps[2] {
                "" => 1,
                digits => digits
                    .parse()
                    .map_err(|_| MabError::InvalidFormula(text.to_string()))?,
            };
            composition.add_count(symbol, count);
        }

        if consumed != body.len() || (negative && body.is_empty()) {
            return Err(MabError::InvalidFormula(text.to_string()));
        }

        Ok(Formula {
            text: trimmed.to_string(),
            composition,
            negative,
        })
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.composition.is_empty()
    }

    /// 按元素符号计算质量，质量损失为负值
    pub fn mass(&self, table: &MassTable) -> Result<f64> {
        let mass = self.composition.mass(table)?;
        Ok(if self.negative { -mass } else { mass })
    }

    /// 质量表中没有登记为元素符号的符号，已排序
    pub fn unknown_symbols(&self, table: &MassTable) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .composition
            .iter()
            .filter(|(symbol, _)| !table.is_symbol(symbol))
            .map(|(symbol, _)| symbol.to_string())
            .collect();
        unknown.sort();
        unknown.dedup();
        unknown
    }
}
