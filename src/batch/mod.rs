//! # 文件批量收集模块
//!
//! 提供按模式收集目录文件的能力。
//!
//! ## 依赖关系
//! - 被 `ccd/` 模块使用
//! - 使用 `walkdir` 遍历目录

pub mod collector;

pub use collector::FileCollector;
