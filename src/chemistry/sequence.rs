//! # 氨基酸序列
//!
//! 序列校验与元素组成计算。
//!
//! ## 依赖关系
//! - 被 `calc/antibody.rs` 使用
//! - 使用 `chemistry/residues.rs`

use crate::chemistry::residues::{self, three_letter_code};
use crate::error::{MabError, Result};
use crate::models::Composition;

/// 单链序列长度上限
pub const MAX_SEQUENCE_LENGTH: usize = 1_000;

/// 规范化序列：去除空白并转为大写
pub fn normalize(sequence: &str) -> String {
    sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// 序列中的所有字符是否均为标准氨基酸（不区分大小写）
pub fn is_valid_sequence(sequence: &str) -> bool {
    sequence.chars().all(|c| three_letter_code(c).is_some())
}

/// 残基组成之和（不含末端水）
pub fn residue_sum(sequence: &str) -> Result<Composition> {
    let mut comp = Composition::new();
    for aa in normalize(sequence).chars() {
        let code = three_letter_code(aa)
            .ok_or_else(|| MabError::InvalidInput(format!("invalid amino acid '{}'", aa)))?;
        comp = &comp + &residues::residue_composition(code)?;
    }
    Ok(comp)
}

/// 完整多肽链组成 = 残基之和 + H2O
pub fn chain_composition(sequence: &str) -> Result<Composition> {
    Ok(&residue_sum(sequence)? + &residues::water())
}
