//! # mass 子命令 CLI 定义
//!
//! 每条链写作 `<MASS>[:<GLYCAN>]`，如 `50123.4:G0F` 或 `23456.7`。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs`, `commands/shell.rs` 使用
//! - 参数传递给 `commands/mass.rs`

use crate::calc::mass::parse_base_mass;

use clap::Args;

/// 一条链：基础质量 + 可选糖链名
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSpec {
    pub base_mass: f64,
    pub glycan: Option<String>,
}

/// 解析 `<MASS>[:<GLYCAN>]`
pub fn parse_chain_spec(input: &str) -> Result<ChainSpec, String> {
    let (mass, glycan) = match input.split_once(':') {
        Some((mass, glycan)) => (mass, Some(glycan.trim())),
        None => (input, None),
    };

    let base_mass = parse_base_mass(mass).map_err(|e| {
        format!(
            "Invalid chain '{}': {}. Use <MASS> or <MASS>:<GLYCAN> (e.g., 50123.4:G0F)",
            input, e
        )
    })?;

    let glycan = match glycan {
        Some("") => return Err(format!("Missing glycan name after ':' in '{}'", input)),
        Some(name) => Some(name.to_string()),
        None => None,
    };

    Ok(ChainSpec { base_mass, glycan })
}

/// mass 子命令参数
#[derive(Args, Debug)]
pub struct MassArgs {
    /// Chain base mass with optional glycan, repeatable (e.g., --chain 50123.4:G0F)
    #[arg(long = "chain", required = true, value_parser = parse_chain_spec)]
    pub chains: Vec<ChainSpec>,

    /// Number of disulfide bonds formed on assembly
    #[arg(long, default_value_t = 0)]
    pub disulfides: u32,

    /// Mass lost per disulfide bond in Da (default: 2 x hydrogen from the mass table)
    #[arg(long)]
    pub bond_loss: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chain_spec() {
        assert_eq!(
            parse_chain_spec("50123.4:G0F").unwrap(),
            ChainSpec {
                base_mass: 50123.4,
                glycan: Some("G0F".to_string())
            }
        );
        assert_eq!(parse_chain_spec("23456.7").unwrap().glycan, None);
        assert!(parse_chain_spec("abc:G0F").is_err());
        assert!(parse_chain_spec("100:").is_err());
        assert!(parse_chain_spec("-100:G0F").is_err());
    }
}
