//! # CCD 流水线模块
//!
//! 位形坐标图 (configuration coordinate diagram) 数据的生成与整理。
//!
//! ## 数据流
//! ```text
//! discover → displacement (dq) → energy (gs/ex) → table (CSV) → plot (可选)
//! interpolate: <prefix>_g/ste_<suffix>.inp → 13 个插值输入
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `parsers/`, `models/`, `batch/`
//! - 子模块: discover, displacement, energy, table, plot, interpolate

pub mod discover;
pub mod displacement;
pub mod energy;
pub mod interpolate;
pub mod plot;
pub mod table;

pub use discover::{discover, CcdLayout};
pub use displacement::{calc_dq_values, DqSeries};
pub use energy::{extract_energies, EnergySeries};

use std::fmt;
use std::path::{Path, PathBuf};

/// 某一序号处理时遇到的问题（不中止运行，仅用于提示）
#[derive(Debug, Clone)]
pub struct Issue {
    pub index: usize,
    pub path: PathBuf,
    pub reason: String,
}

impl Issue {
    pub fn new(index: usize, path: &Path, reason: impl Into<String>) -> Self {
        Issue {
            index,
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.index,
            self.path.display(),
            self.reason
        )
    }
}
