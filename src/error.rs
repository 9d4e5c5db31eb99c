//! # 错误类型
//!
//! ccdkit 的错误枚举，使用 `thiserror` 派生。
//!
//! 单个序号的文件缺失不走这里：它在表格中记为 `MISSING` 并继续运行。
//! 这里的错误都会让当前子命令中止，由 `main.rs` 打印并以状态码 1 退出。
//!
//! ## 依赖关系
//! - 被所有其他模块使用

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CcdError {
    // ─────────────────────────────────────────────────────────────
    // 文件系统
    // ─────────────────────────────────────────────────────────────
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    // ─────────────────────────────────────────────────────────────
    // CCD 目录布局
    // ─────────────────────────────────────────────────────────────
    #[error("The .out files following naming rules not found in expected subfolders ({searched})")]
    NoMatchingOutput { searched: String },

    #[error("no <prefix>_g_<suffix>.inp found in '{dir}'")]
    NoSeedInput { dir: String },

    // ─────────────────────────────────────────────────────────────
    // 结构
    // ─────────────────────────────────────────────────────────────
    #[error("bad CP2K input '{path}': {reason}")]
    Cp2kInput { path: String, reason: String },

    #[error("cannot determine element of kind '{0}'")]
    UnknownElement(String),

    #[error("structures differ in atom count ({left} vs {right})")]
    AtomCountMismatch { left: usize, right: usize },

    // ─────────────────────────────────────────────────────────────
    // 提交
    // ─────────────────────────────────────────────────────────────
    #[error("'{command}' not found in PATH")]
    ExecutableNotFound { command: String },

    #[error("'{command}' failed: {stderr}")]
    SubmitFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 输入与输出
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    InvalidArgument(String),

    #[error("terminal input failed: {0}")]
    Terminal(#[source] std::io::Error),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("plot: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, CcdError>;
