//! # 糖链定义数据模型
//!
//! 一条糖链定义 = 名称 + 单糖组成 + 显示标志 + 显示顺序。
//!
//! ## 依赖关系
//! - 被 `tables/glycan_table.rs` 构建
//! - 被 `calc/` 使用

use crate::error::{MabError, Result};
use crate::models::ChainType;

use serde::{Deserialize, Serialize};

/// 糖链定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlycanDefinition {
    /// 唯一名称，如 "G0F"
    pub name: String,

    /// 单糖组成，保持表中的列顺序
    pub composition: Vec<(String, u32)>,

    /// 是否在重链列表中显示
    pub show_hc: bool,

    /// 是否在轻链列表中显示
    pub show_lc: bool,

    /// 显示顺序
    pub ord_pos: i64,
}

impl GlycanDefinition {
    /// 创建糖链定义，计数为 0 的组分被丢弃，总计数必须 > 0
    pub fn new<S: AsRef<str>>(name: impl Into<String>, composition: &[(S, u32)]) -> Result<Self> {
        let name = name.into();
        let composition: Vec<(String, u32)> = composition
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(component, count)| (component.as_ref().to_string(), *count))
            .collect();

        if composition.is_empty() {
            return Err(MabError::InvalidInput(format!(
                "glycan '{}' has an empty composition",
                name
            )));
        }

        Ok(GlycanDefinition {
            name,
            composition,
            show_hc: true,
            show_lc: true,
            ord_pos: 0,
        })
    }

    /// 设置两种链的显示标志
    pub fn with_show(mut self, show: bool) -> Self {
        self.show_hc = show;
        self.show_lc = show;
        self
    }

    pub fn with_chain_show(mut self, show_hc: bool, show_lc: bool) -> Self {
        self.show_hc = show_hc;
        self.show_lc = show_lc;
        self
    }

    pub fn with_ord_pos(mut self, ord_pos: i64) -> Self {
        self.ord_pos = ord_pos;
        self
    }

    /// 是否在给定链类型的列表中显示
    pub fn is_shown(&self, chain: ChainType) -> bool {
        match chain {
            ChainType::Heavy => self.show_hc,
            ChainType::Light => self.show_lc,
        }
    }

    /// 是否在任一列表中显示
    pub fn is_shown_anywhere(&self) -> bool {
        self.show_hc || self.show_lc
    }

    /// 组成字符串，如 "HexNAc4 Hex3 dHex1"
    pub fn composition_string(&self) -> String {
        self.composition
            .iter()
            .map(|(c, n)| format!("{}{}", c, n))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 按名称查找糖链（忽略显示标志）
pub fn find_glycan<'a>(glycans: &'a [GlycanDefinition], name: &str) -> Result<&'a GlycanDefinition> {
    glycans
        .iter()
        .find(|g| g.name == name)
        .ok_or_else(|| MabError::UnknownGlycan(name.to_string()))
}
