//! # shell 子命令实现
//!
//! 交互式计算循环（rustyline）。每条命令使用当前配置表的快照；
//! `reload` 从磁盘重新加载配置表，失败时旧表保持生效。
//! 命令出错时打印错误并继续。
//!
//! ## 命令
//! - `mass <MASS>[:<GLYCAN>]... [-d <N>] [--bond-loss <DA>]`
//! - `glycans [hc|lc|all] [--all]`
//! - `reload`, `help`, `quit`
//!
//! ## 依赖关系
//! - 使用 `cli/shell.rs` 定义的 ShellArgs
//! - 复用 `commands/mass.rs`, `commands/glycans.rs`
//! - 使用 `rustyline`

use crate::cli::glycans::ChainFilter;
use crate::cli::mass::{parse_chain_spec, ChainSpec};
use crate::cli::shell::ShellArgs;
use crate::cli::TableArgs;
use crate::error::{MabError, Result};
use crate::tables::TableStore;
use crate::utils::output;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = "mabscale> ";

const HELP: &str = "\
Commands:
  mass <MASS>[:<GLYCAN>]... [-d <N>] [--bond-loss <DA>]
                       reduced / intact mass of the given chains
  glycans [hc|lc|all] [--all]
                       list glycans in display order
  reload               reload the mass and glycan tables from disk
  help                 show this message
  quit                 leave the shell";

/// 一条 shell 命令
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Mass {
        chains: Vec<ChainSpec>,
        disulfides: u32,
        bond_loss: Option<f64>,
    },
    Glycans {
        filter: ChainFilter,
        include_hidden: bool,
    },
    Reload,
    Help,
    Quit,
    Empty,
}

fn flag_value<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    flag: &str,
) -> Result<&'a str> {
    tokens
        .next()
        .ok_or_else(|| MabError::InvalidInput(format!("'{}' needs a value", flag)))
}

/// 解析一行输入
pub fn parse_line(line: &str) -> Result<ShellCommand> {
    let mut tokens = line.split_whitespace();
    let Some(command) = tokens.next() else {
        return Ok(ShellCommand::Empty);
    };

    match command.to_lowercase().as_str() {
        "mass" | "m" => {
            let mut chains = Vec::new();
            let mut disulfides = 0;
            let mut bond_loss = None;

            while let Some(token) = tokens.next() {
                match token {
                    "-d" | "--disulfides" => {
                        let value = flag_value(&mut tokens, token)?;
                        disulfides = value.parse().map_err(|_| {
                            MabError::InvalidInput(format!(
                                "disulfide count must be a non-negative integer, got '{}'",
                                value
                            ))
                        })?;
                    }
                    "--bond-loss" => {
                        let value = flag_value(&mut tokens, token)?;
                        bond_loss = Some(value.parse().map_err(|_| {
                            MabError::InvalidInput(format!("'{}' is not a number", value))
                        })?);
                    }
                    spec => chains.push(parse_chain_spec(spec).map_err(MabError::InvalidInput)?),
                }
            }

            if chains.is_empty() {
                return Err(MabError::InvalidInput(
                    "usage: mass <MASS>[:<GLYCAN>]... [-d <N>] [--bond-loss <DA>]".to_string(),
                ));
            }
            Ok(ShellCommand::Mass {
                chains,
                disulfides,
                bond_loss,
            })
        }
        "glycans" | "g" => {
            let mut filter = ChainFilter::All;
            let mut include_hidden = false;
            for token in tokens {
                match token.to_lowercase().as_str() {
                    "hc" => filter = ChainFilter::Hc,
                    "lc" => filter = ChainFilter::Lc,
                    "all" => filter = ChainFilter::All,
                    "--all" => include_hidden = true,
                    other => {
                        return Err(MabError::InvalidInput(format!(
                            "unknown glycans option '{}'",
                            other
                        )))
                    }
                }
            }
            Ok(ShellCommand::Glycans {
                filter,
                include_hidden,
            })
        }
        "reload" => Ok(ShellCommand::Reload),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(MabError::InvalidInput(format!(
            "unknown command '{}' (type 'help')",
            other
        ))),
    }
}

/// 执行一条命令，返回是否继续
fn dispatch(store: &TableStore, command: ShellCommand) -> Result<bool> {
    match command {
        ShellCommand::Mass {
            chains,
            disulfides,
            bond_loss,
        } => {
            let snapshot = store.snapshot();
            let result = super::mass::compute(&snapshot, &chains, disulfides, bond_loss)?;
            super::mass::print_result(&result, disulfides);
        }
        ShellCommand::Glycans {
            filter,
            include_hidden,
        } => {
            let snapshot = store.snapshot();
            super::glycans::show_glycans(&snapshot, filter, include_hidden)?;
        }
        ShellCommand::Reload => {
            let tables = store.reload()?;
            output::print_success(&format!(
                "Reloaded {} mass entries and {} glycans",
                tables.masses.len(),
                tables.glycans.len()
            ));
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => return Ok(false),
        ShellCommand::Empty => {}
    }
    Ok(true)
}

/// 执行 shell 子命令
pub fn execute(args: ShellArgs, tables: &TableArgs) -> Result<()> {
    let store = super::open_store(tables)?;

    let mut rl = DefaultEditor::new()
        .map_err(|e| MabError::Other(format!("failed to start line editor: {}", e)))?;
    if let Some(history) = &args.history {
        // 首次运行时历史文件不存在
        let _ = rl.load_history(history);
    }

    output::print_info("Type 'help' for commands, 'quit' to exit");

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(MabError::Other(format!("readline failed: {}", e))),
        };
        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        let keep_going = match parse_line(&line).and_then(|cmd| dispatch(&store, cmd)) {
            Ok(keep_going) => keep_going,
            Err(e) => {
                output::print_error(&e.to_string());
                true
            }
        };
        if !keep_going {
            break;
        }
    }

    if let Some(history) = &args.history {
        if let Err(e) = rl.save_history(history) {
            output::print_warning(&format!(
                "Could not save history to '{}': {}",
                history.display(),
                e
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mass() {
        let cmd = parse_line("mass 50000:G0F 23000 -d 4 --bond-loss 2.0158").unwrap();
        assert_eq!(
            cmd,
            ShellCommand::Mass {
                chains: vec![
                    ChainSpec {
                        base_mass: 50000.0,
                        glycan: Some("G0F".to_string())
                    },
                    ChainSpec {
                        base_mass: 23000.0,
                        glycan: None
                    },
                ],
                disulfides: 4,
                bond_loss: Some(2.0158),
            }
        );
    }

    #[test]
    fn test_parse_mass_errors() {
        assert!(parse_line("mass").is_err());
        assert!(parse_line("mass 100 -d").is_err());
        assert!(parse_line("mass 100 -d -1").is_err());
        assert!(parse_line("mass abc").is_err());
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(
            parse_line("glycans lc --all").unwrap(),
            ShellCommand::Glycans {
                filter: ChainFilter::Lc,
                include_hidden: true
            }
        );
        assert_eq!(parse_line("  ").unwrap(), ShellCommand::Empty);
        assert_eq!(parse_line("RELOAD").unwrap(), ShellCommand::Reload);
        assert_eq!(parse_line("exit").unwrap(), ShellCommand::Quit);
        assert!(parse_line("frobnicate").is_err());
        assert!(parse_line("glycans xc").is_err());
    }
}
