//! # dq 子命令 CLI 定义
//!
//! 两个 CP2K 结构之间的质量加权位移；缺省的路径在终端中提示输入
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/dq.rs`

use clap::Args;
use std::path::PathBuf;

/// dq 子命令参数
#[derive(Args, Debug)]
pub struct DqArgs {
    /// Ground-state structure file (CP2K .inp / .restart)
    pub gs: Option<PathBuf>,

    /// Excited-state structure file (CP2K .inp / .restart)
    pub es: Option<PathBuf>,
}
