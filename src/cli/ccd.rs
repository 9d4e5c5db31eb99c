//! # ccd 子命令 CLI 定义
//!
//! 汇总单点计算结果为位形坐标图表格
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/ccd.rs`

use clap::Args;
use std::path::PathBuf;

/// ccd 子命令参数
#[derive(Args, Debug)]
pub struct CcdArgs {
    /// Working directory containing gs_sp/ex_sp (or gs-sp/ex-sp)
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Output CSV path (default: <dir>/<prefix>_CCD.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also render the diagram to this PNG file
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Do not print the result table
    #[arg(long, default_value_t = false)]
    pub no_table: bool,
}
