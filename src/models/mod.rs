//! # 数据模型模块
//!
//! 定义元素组成、糖链定义和多肽链数据模型。
//!
//! ## 依赖关系
//! - 被 `tables/`, `chemistry/`, `calc/` 和 `commands/` 使用
//! - 子模块: composition, glycan, chain

pub mod chain;
pub mod composition;
pub mod glycan;

pub use chain::{Chain, ChainId, ChainType};
pub use composition::{Composition, REPORT_ELEMENTS};
pub use glycan::{find_glycan, GlycanDefinition};
