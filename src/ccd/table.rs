//! # CCD 表格
//!
//! 按序号把 dq 与能量对合并为行，写出 `dq,gs,ex` CSV 并生成终端表格。
//!
//! ## 依赖关系
//! - 被 `commands/ccd.rs` 调用
//! - 使用 `csv` + `serde` 写文件，`tabled` 渲染终端表格

use crate::error::{CcdError, Result};
use crate::models::ccd::{DQ_DECIMALS, ENERGY_DECIMALS};
use crate::models::{CcdRow, EnergyPair, Entry};

use std::fs::File;
use std::path::Path;
use tabled::{Table, Tabled};

/// 终端显示行
#[derive(Debug, Clone, Tabled)]
struct DisplayRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "dq (Å·amu^½)")]
    dq: String,
    #[tabled(rename = "gs (eV)")]
    gs: String,
    #[tabled(rename = "ex (eV)")]
    ex: String,
}

/// 按位置合并 dq 与能量，序号从 1 开始
pub fn build_rows(dq: &[Entry], energies: &[EnergyPair]) -> Vec<CcdRow> {
    dq.iter()
        .zip(energies.iter())
        .enumerate()
        .map(|(i, (dq, pair))| CcdRow {
            index: i + 1,
            dq: *dq,
            gs: pair.gs,
            ex: pair.ex,
        })
        .collect()
}

/// 写出 CSV（表头 `dq,gs,ex`）
pub fn write_csv(rows: &[CcdRow], output_path: &Path) -> Result<()> {
    let file = File::create(output_path).map_err(|e| CcdError::Write {
        path: output_path.display().to_string(),
        source: e,
    })?;
    let mut wtr = csv::Writer::from_writer(file);

    for row in rows {
        wtr.serialize(row.to_record())?;
    }

    wtr.flush().map_err(|e| CcdError::Write {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 渲染终端表格（MISSING / 空值原样显示）
pub fn render_table(rows: &[CcdRow]) -> String {
    let display: Vec<DisplayRow> = rows
        .iter()
        .map(|r| DisplayRow {
            index: r.index,
            dq: r.dq.render(DQ_DECIMALS),
            gs: r.gs.render(ENERGY_DECIMALS),
            ex: r.ex.render(ENERGY_DECIMALS),
        })
        .collect();

    Table::new(&display).to_string()
}
