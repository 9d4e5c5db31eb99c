//! # ccd 命令实现
//!
//! 识别目录 → 计算 dq → 提取相对能量 → 写出 `<prefix>_CCD.csv`。
//!
//! ## 功能
//! - 缺失的序号文件以 `MISSING` 占位，不中止运行
//! - 终端表格回显
//! - 可选 CCD 图
//!
//! ## 依赖关系
//! - 使用 `cli/ccd.rs` 定义的参数
//! - 使用 `ccd/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::ccd::{self, plot, table, Issue};
use crate::cli::ccd::CcdArgs;
use crate::error::{CcdError, Result};
use crate::utils::{output, progress};

/// 执行 ccd 命令
pub fn execute(args: CcdArgs) -> Result<()> {
    output::print_header("Configuration Coordinate Diagram");

    if !args.dir.is_dir() {
        return Err(CcdError::NotADirectory {
            path: args.dir.display().to_string(),
        });
    }

    let layout = ccd::discover(&args.dir)?;
    output::print_field("prefix", &layout.prefix);
    output::print_field("ground", &layout.gs_dir);
    output::print_field("excited", layout.ex_dir.as_deref().unwrap_or("none"));
    if layout.ex_dir.is_none() {
        output::print_warning("No excited-state folder found, 'ex' column will be MISSING");
    }

    let spinner = progress::create_spinner("Computing dq");
    let dq = ccd::calc_dq_values(&layout);
    spinner.set_message("Extracting energies");
    let energies = ccd::extract_energies(&layout);
    spinner.finish_and_clear();

    report_issues("dq", &dq.issues);
    report_issues("energy", &energies.issues);

    match energies.reference {
        Some(e) => output::print_info(&format!("Reference energy: {:.6} Ha", e)),
        None => output::print_warning("Reference energy unavailable, energy cells left empty"),
    }

    let rows = table::build_rows(&dq.entries, &energies.pairs);

    let csv_path = args.output.unwrap_or_else(|| layout.csv_path());
    table::write_csv(&rows, &csv_path)?;

    if !args.no_table {
        println!("{}", table::render_table(&rows));
    }

    if let Some(plot_path) = args.plot {
        match plot::generate_ccd_plot(&rows, &plot_path, &format!("{} CCD", layout.prefix)) {
            Ok(()) => output::print_success(&format!("Plot saved to '{}'", plot_path.display())),
            Err(e) => output::print_warning(&format!("Plot skipped: {}", e)),
        }
    }

    output::print_done(&format!("Results updated in {}", csv_path.display()));

    Ok(())
}

/// 打印不影响运行的问题
fn report_issues(stage: &str, issues: &[Issue]) {
    for issue in issues {
        output::print_skip(&format!("{} {}", stage, issue));
    }
}
