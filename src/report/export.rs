//! # 报告导出
//!
//! 每个报告节写成输出目录中的一个 CSV 文件。
//!
//! ## 依赖关系
//! - 被 `commands/antibody.rs` 调用
//! - 使用 `csv` 写入，`utils/progress.rs` 显示进度

use crate::error::{MabError, Result};
use crate::report::Section;
use crate::utils::progress;

use std::fs;
use std::path::{Path, PathBuf};

/// 导出单个报告节
pub fn section_to_csv(section: &Section, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(&section.header)?;
    for row in &section.rows {
        wtr.write_record(row)?;
    }

    wtr.flush().map_err(|e| MabError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出全部报告节，返回写入的文件路径
pub fn write_report(sections: &[Section], output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|e| MabError::FileWriteError {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let pb = progress::create_progress_bar(sections.len() as u64, "Writing report");
    let mut written = Vec::with_capacity(sections.len());

    for section in sections {
        let path = output_dir.join(format!("{}.csv", section.name));
        pb.set_message(section.title);
        section_to_csv(section, &path)?;
        written.push(path);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(written)
}
