//! # 美化输出工具
//!
//! 统一的终端状态行：`[OK]` `[ERR]` `[WARN]` `[*]` `[SKIP]` `[DONE]`，
//! 以及标题栏和键值行。错误与警告写到 stderr，不混入表格输出。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块和 `main.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};

const RULE_WIDTH: usize = 64;

fn status(tag: ColoredString, msg: &str) {
    println!("{} {}", tag, msg);
}

fn status_err(tag: ColoredString, msg: &str) {
    eprintln!("{} {}", tag, msg);
}

pub fn print_success(msg: &str) {
    status("[OK]".green().bold(), msg);
}

pub fn print_error(msg: &str) {
    status_err("[ERR]".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    status_err("[WARN]".yellow().bold(), msg);
}

pub fn print_info(msg: &str) {
    status("[*]".blue().bold(), msg);
}

/// 不影响运行的问题（单个序号文件缺失、原子数不一致等），整行淡色
pub fn print_skip(msg: &str) {
    status("[SKIP]".dimmed(), &msg.dimmed().to_string());
}

pub fn print_done(msg: &str) {
    status("[DONE]".green().bold(), msg);
}

/// 缩进对齐的 `key: value` 行
pub fn print_field(key: &str, value: &str) {
    let key = format!("{}:", key);
    println!("    {} {}", format!("{:<12}", key).cyan(), value);
}

/// 上下带分隔线的标题栏
pub fn print_header(title: &str) {
    let rule = "─".repeat(RULE_WIDTH).dimmed();
    println!("\n{}\n  {}\n{}\n", rule, title.bold(), rule);
}
