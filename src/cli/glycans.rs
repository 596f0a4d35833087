//! # glycans 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/glycans.rs`

use crate::models::ChainType;

use clap::{Args, ValueEnum};

/// 按链类型过滤显示列表
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum ChainFilter {
    /// Glycans shown for the heavy chain
    Hc,
    /// Glycans shown for the light chain
    Lc,
    /// Glycans shown for either chain
    #[default]
    All,
}

impl ChainFilter {
    pub fn chain_type(self) -> Option<ChainType> {
        match self {
            ChainFilter::Hc => Some(ChainType::Heavy),
            ChainFilter::Lc => Some(ChainType::Light),
            ChainFilter::All => None,
        }
    }
}

impl std::fmt::Display for ChainFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainFilter::Hc => write!(f, "hc"),
            ChainFilter::Lc => write!(f, "lc"),
            ChainFilter::All => write!(f, "all"),
        }
    }
}

/// glycans 子命令参数
#[derive(Args, Debug)]
pub struct GlycansArgs {
    /// Which chain's display list to show
    #[arg(long, value_enum, default_value_t = ChainFilter::All)]
    pub chain: ChainFilter,

    /// Include glycans whose show flags are off
    #[arg(long, default_value_t = false)]
    pub all: bool,
}
