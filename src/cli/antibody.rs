//! # antibody 子命令 CLI 定义
//!
//! 第二对 HC/LC 可省略：两者都省略时整体复制第一对，
//! 只省略其一时仅复制对应的序列。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/antibody.rs`

use crate::calc::{AntibodyParams, ChainInput, PairInput};

use clap::{ArgAction, Args};
use std::path::PathBuf;

/// antibody 子命令参数
#[derive(Args, Debug)]
pub struct AntibodyArgs {
    // ─────────────────────────────────────────────────────────────
    // 第一对
    // ─────────────────────────────────────────────────────────────
    /// Heavy chain 1 amino-acid sequence (one-letter codes)
    #[arg(long)]
    pub hc1: String,

    /// Light chain 1 amino-acid sequence (one-letter codes)
    #[arg(long)]
    pub lc1: String,

    /// Chemical modification of heavy chain 1 (e.g., H2O or -H2O)
    #[arg(long, default_value = "")]
    pub hc1_mod: String,

    /// Chemical modification of light chain 1
    #[arg(long, default_value = "")]
    pub lc1_mod: String,

    /// N-terminal cyclization of heavy chain 1 (pyro-Glu from Q or E)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub cyclize1: bool,

    /// C-terminal lysine clipping of heavy chain 1
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub lys_clip1: bool,

    // ─────────────────────────────────────────────────────────────
    // 第二对
    // ─────────────────────────────────────────────────────────────
    /// Heavy chain 2 sequence (defaults to heavy chain 1)
    #[arg(long, default_value = "")]
    pub hc2: String,

    /// Light chain 2 sequence (defaults to light chain 1)
    #[arg(long, default_value = "")]
    pub lc2: String,

    /// Chemical modification of heavy chain 2
    #[arg(long, default_value = "")]
    pub hc2_mod: String,

    /// Chemical modification of light chain 2
    #[arg(long, default_value = "")]
    pub lc2_mod: String,

    /// N-terminal cyclization of heavy chain 2
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub cyclize2: bool,

    /// C-terminal lysine clipping of heavy chain 2
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub lys_clip2: bool,

    // ─────────────────────────────────────────────────────────────
    // 二硫键与糖基化
    // ─────────────────────────────────────────────────────────────
    /// Total number of disulfides in the intact molecule (even, 0-100)
    #[arg(long, default_value_t = 0)]
    pub total_disulfides: i64,

    /// Disulfides left in each heavy chain after partial reduction (even, 0-100)
    #[arg(long, default_value_t = 0)]
    pub hc_disulfides: i64,

    /// Disulfides left in each light chain after partial reduction (even, 0-100)
    #[arg(long, default_value_t = 0)]
    pub lc_disulfides: i64,

    /// The light chains carry glycans
    #[arg(long, default_value_t = false)]
    pub lc_glyco: bool,

    // ─────────────────────────────────────────────────────────────
    // 输出
    // ─────────────────────────────────────────────────────────────
    /// Directory for the CSV report
    #[arg(short, long, default_value = "mabscale_report")]
    pub output: PathBuf,

    /// Print the summary only, do not write the report
    #[arg(long, default_value_t = false)]
    pub no_report: bool,
}

impl AntibodyArgs {
    /// 转换为计算参数
    pub fn to_params(&self) -> AntibodyParams {
        AntibodyParams {
            pairs: [
                PairInput {
                    heavy: ChainInput::new(&self.hc1, &self.hc1_mod),
                    light: ChainInput::new(&self.lc1, &self.lc1_mod),
                    cyclize: self.cyclize1,
                    lys_clip: self.lys_clip1,
                },
                PairInput {
                    heavy: ChainInput::new(&self.hc2, &self.hc2_mod),
                    light: ChainInput::new(&self.lc2, &self.lc2_mod),
                    cyclize: self.cyclize2,
                    lys_clip: self.lys_clip2,
                },
            ],
            total_disulfides: self.total_disulfides,
            hc_disulfides: self.hc_disulfides,
            lc_disulfides: self.lc_disulfides,
            lc_glycosylated: self.lc_glyco,
        }
    }
}
