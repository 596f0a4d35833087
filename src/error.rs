//! # 统一错误处理模块
//!
//! 定义 mabscale 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// mabscale 统一错误类型
#[derive(Error, Debug)]
pub enum MabError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 配置表错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to load table: {path}\nReason: {reason}")]
    ConfigLoad { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 计算错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown component '{component}' (not present in the mass table)")]
    UnknownComponent { component: String },

    #[error("Unknown glycan: {0}")]
    UnknownGlycan(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid input:\n  - {}", .0.join("\n  - "))]
    InvalidInputs(Vec<String>),

    #[error("Invalid formula: {0}")]
    InvalidFormula(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl MabError {
    /// 构造配置表加载错误
    pub fn config(path: impl Into<String>, reason: impl Into<String>) -> Self {
        MabError::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, MabError>;
