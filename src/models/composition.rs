//! # 元素组成数据模型
//!
//! 有序的 (组分名, 计数) 多重集，支持加、减、倍乘。
//! 减法结果的计数截断到 0。
//! 质量按存储顺序累加，保证浮点结果可复现。
//!
//! ## 依赖关系
//! - 被 `chemistry/`, `calc/` 使用
//! - 使用 `tables/mass_table.rs` 查询质量

use crate::error::Result;
use crate::tables::MassTable;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// 报告中固定输出的元素列
pub const REPORT_ELEMENTS: [&str; 5] = ["Carbon", "Hydrogen", "Nitrogen", "Oxygen", "Sulfur"];

/// 元素（或其他组分）组成
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    entries: Vec<(String, i64)>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 (名称, 计数) 列表构建，重复名称会合并
    pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, i64)]) -> Self {
        let mut comp = Self::new();
        for (name, count) in pairs {
            comp.add_count(name.as_ref(), *count);
        }
        comp
    }

    /// 单一组分
    pub fn single(name: &str, count: i64) -> Self {
        Self::from_pairs(&[(name, count)])
    }

    /// 累加某个组分的计数
    pub fn add_count(&mut self, name: &str, count: i64) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, c)) => *c += count,
            None => self.entries.push((name.to_string(), count)),
        }
    }

    /// 某组分的计数（不存在为 0）
    pub fn count(&self, name: &str) -> i64 {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// 按存储顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), *c))
    }

    /// 所有计数均为 0
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, c)| *c == 0)
    }

    /// 每个计数乘以 `factor`
    pub fn scaled(&self, factor: i64) -> Self {
        Composition {
            entries: self
                .entries
                .iter()
                .map(|(n, c)| (n.clone(), c * factor))
                .collect(),
        }
    }

    /// 报告用的 C/H/N/O/S 计数
    pub fn report_counts(&self) -> [i64; 5] {
        REPORT_ELEMENTS.map(|e| self.count(e))
    }

    /// 以 `table` 计算质量，按存储顺序累加
    pub fn mass(&self, table: &MassTable) -> Result<f64> {
        let mut mass = 0.0;
        for (name, count) in self.iter() {
            if count == 0 {
                continue;
            }
            mass += count as f64 * table.require(name)?;
        }
        Ok(mass)
    }
}

impl Add for &Composition {
    type Output = Composition;

    fn add(self, rhs: &Composition) -> Composition {
        let mut out = self.clone();
        for (name, count) in rhs.iter() {
            out.add_count(name, count);
        }
        out
    }
}

impl Sub for &Composition {
    type Output = Composition;

    /// 计数不低于 0
    fn sub(self, rhs: &Composition) -> Composition {
        let mut out = self.clone();
        for (name, count) in rhs.iter() {
            out.add_count(name, -count);
        }
        for (_, count) in out.entries.iter_mut() {
            *count = (*count).max(0);
        }
        out
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .filter(|(_, c)| *c != 0)
            .map(|(n, c)| format!("{}{}", n, c))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
