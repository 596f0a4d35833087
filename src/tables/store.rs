//! # 配置表存储
//!
//! 持有当前生效的质量表和糖链表，支持按需重新加载。
//! 重新加载先完整解析两个文件，成功后一次性替换 `Arc`；
//! 失败时旧表保持生效。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `tables/mass_table.rs`, `tables/glycan_table.rs`

use crate::error::{MabError, Result};
use crate::models::GlycanDefinition;
use crate::tables::{load_glycan_table, load_mass_table, MassTable};

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// 默认质量表文件名
pub const MASS_TABLE_FILE: &str = "Element_Mass.csv";
/// 默认糖链表文件名
pub const GLYCAN_TABLE_FILE: &str = "Glycans.csv";

/// 配置表文件位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSources {
    pub mass_table: PathBuf,
    pub glycan_table: PathBuf,
}

impl TableSources {
    /// 目录下的默认文件名
    pub fn in_dir(dir: &Path) -> Self {
        TableSources {
            mass_table: dir.join(MASS_TABLE_FILE),
            glycan_table: dir.join(GLYCAN_TABLE_FILE),
        }
    }
}

/// 一次完整加载得到的配置表
#[derive(Debug, Clone)]
pub struct TableSet {
    pub masses: MassTable,
    pub glycans: Vec<GlycanDefinition>,
}

impl TableSet {
    /// 从文件加载
    pub fn load(sources: &TableSources) -> Result<Self> {
        let masses = load_mass_table(&sources.mass_table)?;
        let glycans = load_glycan_table(&sources.glycan_table)?;
        Ok(TableSet { masses, glycans })
    }
}

/// 可重新加载的配置表存储
#[derive(Debug)]
pub struct TableStore {
    sources: TableSources,
    current: RwLock<Arc<TableSet>>,
}

impl TableStore {
    /// 加载并创建存储
    pub fn open(sources: TableSources) -> Result<Self> {
        let tables = TableSet::load(&sources)?;
        Ok(TableStore {
            sources,
            current: RwLock::new(Arc::new(tables)),
        })
    }

    pub fn sources(&self) -> &TableSources {
        &self.sources
    }

    /// 当前表的快照，计算期间持有
    pub fn snapshot(&self) -> Arc<TableSet> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// 从磁盘重新加载；失败时保留旧表
    pub fn reload(&self) -> Result<Arc<TableSet>> {
        let fresh = Arc::new(TableSet::load(&self.sources)?);
        let mut guard = self
            .current
            .write()
            .map_err(|_| MabError::Other("table store lock poisoned".to_string()))?;
        *guard = Arc::clone(&fresh);
        Ok(fresh)
    }
}
