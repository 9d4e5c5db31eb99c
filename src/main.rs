//! # ccdkit - CP2K 位形坐标图工具箱
//!
//! CCD 工作流的命令行工具：数据汇总、位移计算、STE 单点计算准备与提交。
//!
//! ## 子命令
//! - `ccd`    - 汇总 dq 与相对能量，写出 `<prefix>_CCD.csv`
//! - `dq`     - 两个结构之间的质量加权位移
//! - `ste-sp` - STE 插值、生成并提交单点计算
//!
//! ## 模块
//! ```text
//! cli/ ──▶ commands/ ──▶ ccd/ ──▶ parsers/ ──▶ models/
//!                │         └───▶ batch/
//!                └──▶ utils/  (输出、spinner、终端输入、sbatch 模板)
//! error.rs: 全局错误类型
//! ```

mod batch;
mod ccd;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match commands::run(cli::Cli::parse().command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            utils::output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
