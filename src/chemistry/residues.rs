//! # 残基分子式数据库
//!
//! 氨基酸残基、单糖残基、水以及单个元素的元素组成。
//! 元素以全名 (Carbon, Hydrogen, ...) 表示，与质量表的 `Name` 列一致。
//!
//! ## 数据来源
//! 残基分子式 = 游离分子 − H2O（肽键 / 糖苷键缩合）。
//!
//! ## 依赖关系
//! - 被 `chemistry/sequence.rs`, `calc/` 使用
//! - 纯静态数据

use crate::error::{MabError, Result};
use crate::models::Composition;

use std::collections::HashMap;
use std::sync::LazyLock;

/// 残基的 C/H/N/O/S 计数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidueFormula {
    pub c: i64,
    pub h: i64,
    pub n: i64,
    pub o: i64,
    pub s: i64,
}

impl ResidueFormula {
    const fn new(c: i64, h: i64, n: i64, o: i64, s: i64) -> Self {
        Self { c, h, n, o, s }
    }

    /// 转换为元素组成
    pub fn composition(&self) -> Composition {
        Composition::from_pairs(&[
            ("Carbon", self.c),
            ("Hydrogen", self.h),
            ("Nitrogen", self.n),
            ("Oxygen", self.o),
            ("Sulfur", self.s),
        ])
    }
}

/// 单糖残基名称（糖链表的标准组分列）
pub const MONOSACCHARIDES: [&str; 5] = ["HexNAc", "Hex", "dHex", "NeuAc", "NeuGc"];

/// 分子式数据库
pub static RESIDUES: LazyLock<HashMap<&'static str, ResidueFormula>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // 元素
    m.insert("Carbon", ResidueFormula::new(1, 0, 0, 0, 0));
    m.insert("Hydrogen", ResidueFormula::new(0, 1, 0, 0, 0));
    m.insert("Nitrogen", ResidueFormula::new(0, 0, 1, 0, 0));
    m.insert("Oxygen", ResidueFormula::new(0, 0, 0, 1, 0));
    m.insert("Sulfur", ResidueFormula::new(0, 0, 0, 0, 1));

    m.insert("Water", ResidueFormula::new(0, 2, 0, 1, 0));

    // 氨基酸残基
    m.insert("Ala", ResidueFormula::new(3, 5, 1, 1, 0));
    m.insert("Arg", ResidueFormula::new(6, 12, 4, 1, 0));
    m.insert("Asn", ResidueFormula::new(4, 6, 2, 2, 0));
    m.insert("Asp", ResidueFormula::new(4, 5, 1, 3, 0));
    m.insert("Cys", ResidueFormula::new(3, 5, 1, 1, 1));
    m.insert("Glu", ResidueFormula::new(5, 7, 1, 3, 0));
    m.insert("Gln", ResidueFormula::new(5, 8, 2, 2, 0));
    m.insert("Gly", ResidueFormula::new(2, 3, 1, 1, 0));
    m.insert("His", ResidueFormula::new(6, 7, 3, 1, 0));
    m.insert("Ile", ResidueFormula::new(6, 11, 1, 1, 0));
    m.insert("Leu", ResidueFormula::new(6, 11, 1, 1, 0));
    m.insert("Lys", ResidueFormula::new(6, 12, 2, 1, 0));
    m.insert("Met", ResidueFormula::new(5, 9, 1, 1, 1));
    m.insert("Phe", ResidueFormula::new(9, 9, 1, 1, 0));
    m.insert("Pro", ResidueFormula::new(5, 7, 1, 1, 0));
    m.insert("Ser", ResidueFormula::new(3, 5, 1, 2, 0));
    m.insert("Thr", ResidueFormula::new(4, 7, 1, 2, 0));
    m.insert("Trp", ResidueFormula::new(11, 10, 2, 1, 0));
    m.insert("Tyr", ResidueFormula::new(9, 9, 1, 2, 0));
    m.insert("Val", ResidueFormula::new(5, 9, 1, 1, 0));

    // 单糖残基
    m.insert("HexNAc", ResidueFormula::new(8, 13, 1, 5, 0));
    m.insert("Hex", ResidueFormula::new(6, 10, 0, 5, 0));
    m.insert("dHex", ResidueFormula::new(6, 10, 0, 4, 0));
    m.insert("NeuAc", ResidueFormula::new(11, 17, 1, 8, 0));
    m.insert("NeuGc", ResidueFormula::new(11, 17, 1, 9, 0));

    m
});

/// 单字母 → 三字母氨基酸代码（20 种标准氨基酸）
pub fn three_letter_code(aa: char) -> Option<&'static str> {
    match aa.to_ascii_uppercase() {
        'A' => Some("Ala"),
        'R' => Some("Arg"),
        'N' => Some("Asn"),
        'D' => Some("Asp"),
        'C' => Some("Cys"),
        'Q' => Some("Gln"),
        'E' => Some("Glu"),
        'G' => Some("Gly"),
        'H' => Some("His"),
        'I' => Some("Ile"),
        'L' => Some("Leu"),
        'K' => Some("Lys"),
        'M' => Some("Met"),
        'F' => Some("Phe"),
        'P' => Some("Pro"),
        'S' => Some("Ser"),
        'T' => Some("Thr"),
        'W' => Some("Trp"),
        'Y' => Some("Tyr"),
        'V' => Some("Val"),
        _ => None,
    }
}

/// 查询残基分子式
pub fn get_residue(name: &str) -> Option<&'static ResidueFormula> {
    RESIDUES.get(name)
}

/// 残基的元素组成，未知残基返回 `UnknownComponent`
pub fn residue_composition(name: &str) -> Result<Composition> {
    get_residue(name)
        .map(|r| r.composition())
        .ok_or_else(|| MabError::UnknownComponent {
            component: name.to_string(),
        })
}

/// 单个元素的组成，如 `element("Hydrogen", 2)` = H2
pub fn element(name: &str, count: i64) -> Composition {
    Composition::single(name, count)
}

/// 水
pub fn water() -> Composition {
    RESIDUES["Water"].composition()
}
