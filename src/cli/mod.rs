//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `ccd`: 汇总 dq 与相对能量，写出 `<prefix>_CCD.csv`
//! - `dq`: 计算两个结构之间的质量加权位移
//! - `ste-sp`: STE 插值、生成并提交单点计算脚本
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: ccd, dq, ste_sp

pub mod ccd;
pub mod dq;
pub mod ste_sp;

use clap::{Parser, Subcommand};

/// ccdkit - CP2K 位形坐标图工具箱
#[derive(Parser)]
#[command(name = "ccdkit")]
#[command(author = "Ning Ding")]
#[command(version)]
#[command(
    about = "CP2K configuration-coordinate-diagram toolkit (dq, relative energies, STE single points)",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Tabulate dq and relative gs/ex energies into <prefix>_CCD.csv
    Ccd(ccd::CcdArgs),

    /// Mass-weighted displacement between two CP2K structures
    Dq(dq::DqArgs),

    /// Interpolate STE images, write the sbatch script and submit it
    SteSp(ste_sp::SteSpArgs),
}
