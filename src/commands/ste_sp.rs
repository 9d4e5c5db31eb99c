//! # ste-sp 命令实现
//!
//! STE 态插值与单点计算。
//!
//! ## 功能
//! - 识别 `<prefix>_g_<suffix>.inp` / `<prefix>_ste_<suffix>.inp`
//! - 生成 13 个插值输入
//! - 生成 sbatch 脚本 `<prefix>_<suffix>.sh`
//! - 提交到 Slurm（`--dry-run` 时跳过）
//!
//! ## 依赖关系
//! - 使用 `cli/ste_sp.rs` 定义的参数
//! - 使用 `ccd/interpolate.rs`, `utils/slurm.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`, `utils/prompt.rs`

use crate::ccd::interpolate::{self, SteSeed};
use crate::cli::ste_sp::SteSpArgs;
use crate::error::{CcdError, Result};
use crate::models::IMAGE_COUNT;
use crate::utils::slurm::{generate_sbatch_script, SlurmConfig};
use crate::utils::{output, progress, prompt};

use std::fs;
use std::io::ErrorKind;
use std::process::Command;

/// 执行 ste-sp 命令
pub fn execute(args: SteSpArgs) -> Result<()> {
    output::print_header("STE Interpolation & Single-Point Submission");
    output::print_info("Requires <prefix>_g_<suffix>.inp and <prefix>_ste_<suffix>.inp");

    if !args.dir.is_dir() {
        return Err(CcdError::NotADirectory {
            path: args.dir.display().to_string(),
        });
    }

    let seed = interpolate::detect_seed(&args.dir)?;
    output::print_field("prefix", &seed.prefix);
    output::print_field("suffix", &seed.suffix);

    let spinner = progress::create_spinner("Interpolating images");
    let written = interpolate::write_image_inputs(&args.dir, &seed);
    spinner.finish_and_clear();
    let written = written?;
    output::print_success(&format!(
        "Wrote {} inputs ({} .. {})",
        written.len(),
        seed.image_project(1),
        seed.image_project(IMAGE_COUNT)
    ));

    let exe = args
        .exe
        .clone()
        .unwrap_or_else(|| default_executable(&seed.suffix).to_string());
    let user_name = resolve_user_name(args.user_name.as_deref())?;

    let config = SlurmConfig {
        job_name: format!("{}-{}", user_name, seed.job_base()),
        partition: args.partition.clone(),
        nodes: args.nodes,
        ntasks_per_node: args.ntasks_per_node,
        log_base: seed.job_base(),
        cp2k_root: args.cp2k_root.clone(),
        omp_threads: args.omp_threads,
        mpi_np: args.np,
        mpi_args: args.mpi_args.clone(),
    };

    let script = generate_sbatch_script(&config, (&seed.prefix, &seed.suffix), IMAGE_COUNT, &exe);
    let script_name = format!("{}.sh", seed.job_base());
    let script_path = args.dir.join(&script_name);
    fs::write(&script_path, script).map_err(|e| CcdError::Write {
        path: script_path.display().to_string(),
        source: e,
    })?;
    output::print_success(&format!("Batch script: {}", script_path.display()));

    if args.dry_run {
        output::print_info(&format!("[DRY] Not submitted: {}", script_path.display()));
    } else {
        submit(&args, &seed, &script_name)?;
    }

    Ok(())
}

/// 后缀为 `gs` 时使用标准 CP2K，否则使用 STE 版本
fn default_executable(suffix: &str) -> &'static str {
    if suffix == "gs" {
        "cp2k.psmp"
    } else {
        "cp2kSTE.psmp"
    }
}

/// 规范化用户名：去除首尾空白，空格替换为下划线；空串返回 `None`
fn normalize_user_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.replace(' ', "_"))
    }
}

const USER_PROMPT: &str = "user name please: ";
const USER_RETRY_PROMPT: &str = "user name can not be empty, input again: ";

fn resolve_user_name(arg: Option<&str>) -> Result<String> {
    resolve_user_name_with(arg, || prompt::read_non_empty(USER_PROMPT, USER_RETRY_PROMPT))
}

/// 命令行/环境变量优先，否则调用 `ask` 交互获取
fn resolve_user_name_with<F>(arg: Option<&str>, ask: F) -> Result<String>
where
    F: FnOnce() -> Result<Option<String>>,
{
    if let Some(name) = arg.and_then(normalize_user_name) {
        return Ok(name);
    }

    ask()?
        .and_then(|name| normalize_user_name(&name))
        .ok_or_else(|| {
            CcdError::InvalidArgument("user name not provided, program exited.".to_string())
        })
}

/// 调用 sbatch 提交脚本
fn submit(args: &SteSpArgs, seed: &SteSeed, script_name: &str) -> Result<()> {
    let out = Command::new("sbatch")
        .arg(script_name)
        .current_dir(&args.dir)
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => CcdError::ExecutableNotFound {
                command: "sbatch".to_string(),
            },
            _ => CcdError::SubmitFailed {
                command: format!("sbatch {}", script_name),
                stderr: e.to_string(),
            },
        })?;

    if !out.status.success() {
        return Err(CcdError::SubmitFailed {
            command: format!("sbatch {}", script_name),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        });
    }

    output::print_done(&format!(
        "Submitted {}: {}",
        seed.job_base(),
        String::from_utf8_lossy(&out.stdout).trim()
    ));

    Ok(())
}
