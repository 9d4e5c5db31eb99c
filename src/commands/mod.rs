//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `ccd/`, `parsers/`, `utils/`
//! - 子模块: ccd, dq, ste_sp

pub mod ccd;
pub mod dq;
pub mod ste_sp;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Ccd(args) => ccd::execute(args),
        Commands::Dq(args) => dq::execute(args),
        Commands::SteSp(args) => ste_sp::execute(args),
    }
}
