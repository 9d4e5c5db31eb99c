//! # ste-sp 子命令 CLI 定义
//!
//! STE 插值 + 单点计算批处理脚本生成与提交
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/ste_sp.rs`

use clap::Args;
use std::path::PathBuf;

/// ste-sp 子命令参数
#[derive(Args, Debug)]
pub struct SteSpArgs {
    /// Directory containing <prefix>_g_<suffix>.inp and <prefix>_ste_<suffix>.inp
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// User name for the job name (prompted when omitted)
    #[arg(short = 'n', long = "name", env = "CCDKIT_USER")]
    pub user_name: Option<String>,

    /// CP2K executable (default: cp2k.psmp for suffix 'gs', else cp2kSTE.psmp)
    #[arg(long)]
    pub exe: Option<String>,

    // ─────────────────────────────────────────────────────────────
    // Slurm options
    // ─────────────────────────────────────────────────────────────
    /// Slurm partition
    #[arg(long, default_value = "normal")]
    pub partition: String,

    /// Number of nodes
    #[arg(long, default_value_t = 1)]
    pub nodes: u32,

    /// Tasks per node
    #[arg(long, default_value_t = 128)]
    pub ntasks_per_node: u32,

    // ─────────────────────────────────────────────────────────────
    // CP2K runtime options
    // ─────────────────────────────────────────────────────────────
    /// CP2K installation root
    #[arg(long, env = "CP2K_ROOT", default_value = "/home/think/app/cp2k-2024.1")]
    pub cp2k_root: String,

    /// OMP_NUM_THREADS
    #[arg(long, default_value_t = 2)]
    pub omp_threads: u32,

    /// Number of MPI processes
    #[arg(long, default_value_t = 64)]
    pub np: u32,

    /// Extra mpirun arguments
    #[arg(long, default_value = "-map-by ppr:4:L3cache:pe=2", allow_hyphen_values = true)]
    pub mpi_args: String,

    // ─────────────────────────────────────────────────────────────
    // Execution control
    // ─────────────────────────────────────────────────────────────
    /// Only generate inputs and the script, do not submit
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
