//! # 数据模型模块
//!
//! 定义结构、元素质量和 CCD 表格数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`ccd/` 和 `commands/` 使用
//! - 子模块: structure, elements, ccd

pub mod ccd;
pub mod elements;
pub mod structure;

pub use ccd::{CcdRow, EnergyPair, Entry, IMAGE_COUNT};
pub use structure::{Atom, Structure};
