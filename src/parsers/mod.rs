//! # 解析器模块
//!
//! CP2K 结构文件和输出日志的解析器。
//!
//! ## 依赖关系
//! - 被 `ccd/` 和 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: cp2k_inp, cp2k_out

pub mod cp2k_inp;
pub mod cp2k_out;

pub use cp2k_inp::parse_cp2k_file;
pub use cp2k_out::{read_total_energy, HARTREE_TO_EV};
