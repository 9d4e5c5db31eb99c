//! # CCD 表格数据模型
//!
//! 位移/能量表格的单元格与行。单元格区分四种结果：参考点、数值、文件缺失、
//! 文件存在但未匹配到能量。写出时分别渲染为 `0`、定点小数、`MISSING`、空串。
//!
//! ## 依赖关系
//! - 被 `ccd/` 各模块构造与消费
//! - 使用 `serde` 序列化 CSV 记录

use serde::Serialize;
use std::fmt;

/// 每个 CCD 扫描的图像数（序号 1..=13）
pub const IMAGE_COUNT: usize = 13;

/// 缺失哨兵值
pub const MISSING: &str = "MISSING";

/// dq 列小数位数
pub const DQ_DECIMALS: usize = 6;

/// 能量列小数位数
pub const ENERGY_DECIMALS: usize = 4;

/// 表格单元格
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry {
    /// 参考点（dq 第一行，定义为 0）
    Reference,
    /// 数值
    Value(f64),
    /// 输入文件缺失或不可读
    Missing,
    /// 文件存在，但未提取到能量（或没有参考能量）
    Unmatched,
}

impl Entry {
    /// 按指定小数位数渲染
    pub fn render(&self, decimals: usize) -> String {
        match self {
            Entry::Reference => "0".to_string(),
            Entry::Value(v) => format!("{:.*}", decimals, v),
            Entry::Missing => MISSING.to_string(),
            Entry::Unmatched => String::new(),
        }
    }

    /// 数值（参考点为 0）
    pub fn value(&self) -> Option<f64> {
        match self {
            Entry::Reference => Some(0.0),
            Entry::Value(v) => Some(*v),
            Entry::Missing | Entry::Unmatched => None,
        }
    }
}

/// 单个序号的基态/激发态能量 (eV，相对参考)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyPair {
    pub gs: Entry,
    pub ex: Entry,
}

/// 表格中的一行
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CcdRow {
    /// 图像序号 (从 1 开始)
    pub index: usize,
    pub dq: Entry,
    pub gs: Entry,
    pub ex: Entry,
}

impl CcdRow {
    pub fn to_record(&self) -> CcdRecord {
        CcdRecord {
            dq: self.dq.render(DQ_DECIMALS),
            gs: self.gs.render(ENERGY_DECIMALS),
            ex: self.ex.render(ENERGY_DECIMALS),
        }
    }
}

impl fmt::Display for CcdRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.to_record();
        write!(f, "{}: dq={} gs={} ex={}", self.index, r.dq, r.gs, r.ex)
    }
}

/// CSV 记录，字段顺序即表头 `dq,gs,ex`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CcdRecord {
    pub dq: String,
    pub gs: String,
    pub ex: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_render() {
        assert_eq!(Entry::Reference.render(DQ_DECIMALS), "0");
        assert_eq!(Entry::Value(1.23456789).render(DQ_DECIMALS), "1.234568");
        assert_eq!(Entry::Value(0.27211).render(ENERGY_DECIMALS), "0.2721");
        assert_eq!(Entry::Missing.render(ENERGY_DECIMALS), "MISSING");
        assert_eq!(Entry::Unmatched.render(ENERGY_DECIMALS), "");
    }

    #[test]
    fn test_row_to_record() {
        let row = CcdRow {
            index: 1,
            dq: Entry::Reference,
            gs: Entry::Value(0.0),
            ex: Entry::Missing,
        };
        assert_eq!(
            row.to_record(),
            CcdRecord {
                dq: "0".into(),
                gs: "0.0000".into(),
                ex: "MISSING".into(),
            }
        );
        assert_eq!(row.to_string(), "1: dq=0 gs=0.0000 ex=MISSING");
    }
}
