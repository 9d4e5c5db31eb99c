//! # dq 命令实现
//!
//! 计算两个 CP2K 结构之间的质量加权位移，质量取激发态结构。
//!
//! ## 依赖关系
//! - 使用 `cli/dq.rs` 定义的参数
//! - 使用 `parsers/cp2k_inp.rs`
//! - 使用 `utils/output.rs`, `utils/prompt.rs`

use crate::cli::dq::DqArgs;
use crate::error::{CcdError, Result};
use crate::parsers::parse_cp2k_file;
use crate::utils::{output, prompt};

use std::path::PathBuf;

/// 执行 dq 命令
pub fn execute(args: DqArgs) -> Result<()> {
    let gs_path = resolve_path(args.gs, "Ground-state structure file: ")?;
    let es_path = resolve_path(args.es, "Excited-state structure file: ")?;

    let gs = parse_cp2k_file(&gs_path)?;
    let es = parse_cp2k_file(&es_path)?;

    let dq = es.mass_weighted_displacement(&gs)?;

    output::print_info(&format!(
        "{} ({} atoms) -> {}",
        gs_path.display(),
        gs.len(),
        es_path.display()
    ));
    println!("dq = {:.6} Å AMU^1/2", dq);

    Ok(())
}

/// 命令行给出则直接使用，否则提示输入
fn resolve_path(arg: Option<PathBuf>, message: &str) -> Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path);
    }

    prompt::read_non_empty(message, message)?
        .map(PathBuf::from)
        .ok_or_else(|| CcdError::InvalidArgument("structure file path not provided".to_string()))
}
