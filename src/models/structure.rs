//! # 分子/超胞结构数据模型
//!
//! 从 CP2K 输入/重启文件读取的结构：有序的 (kind 标签, 元素, 笛卡尔坐标, 质量) 列表。
//! 读入后不可变，插值时生成新的结构。
//!
//! ## 依赖关系
//! - 被 `parsers/cp2k_inp.rs` 构造
//! - 被 `ccd/` 使用
//! - 无外部模块依赖

use crate::error::{CcdError, Result};

/// 原子信息
#[derive(Debug, Clone)]
pub struct Atom {
    /// CP2K kind 标签（写回 &COORD 时使用，如 "Fe1"）
    pub kind: String,

    /// 元素符号
    pub element: String,

    /// 笛卡尔坐标 [x, y, z] (Å)
    pub position: [f64; 3],

    /// 原子质量 (amu)
    pub mass: f64,
}

impl Atom {
    pub fn new(
        kind: impl Into<String>,
        element: impl Into<String>,
        position: [f64; 3],
        mass: f64,
    ) -> Self {
        Atom {
            kind: kind.into(),
            element: element.into(),
            position,
            mass,
        }
    }
}

/// 结构
#[derive(Debug, Clone)]
pub struct Structure {
    /// 结构名称（通常为文件名）
    pub name: String,

    /// 原子列表
    pub atoms: Vec<Atom>,
}

impl Structure {
    pub fn new(name: impl Into<String>, atoms: Vec<Atom>) -> Self {
        Structure {
            name: name.into(),
            atoms,
        }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// 相对参考结构的质量加权位移 dq (Å·amu^½)
    ///
    /// dq = sqrt( Σ m_a |r_a - r_a(ref)|² )，质量取自 `self`。
    pub fn mass_weighted_displacement(&self, reference: &Structure) -> Result<f64> {
        if self.len() != reference.len() {
            return Err(CcdError::AtomCountMismatch {
                left: reference.len(),
                right: self.len(),
            });
        }

        let sum: f64 = self
            .atoms
            .iter()
            .zip(reference.atoms.iter())
            .map(|(a, r)| {
                let d2: f64 = (0..3)
                    .map(|k| (a.position[k] - r.position[k]).powi(2))
                    .sum();
                a.mass * d2
            })
            .sum();

        Ok(sum.sqrt())
    }

    /// 用新坐标生成结构副本（kind、元素、质量不变）
    pub fn with_positions(&self, name: impl Into<String>, positions: &[[f64; 3]]) -> Result<Self> {
        if positions.len() != self.len() {
            return Err(CcdError::AtomCountMismatch {
                left: self.len(),
                right: positions.len(),
            });
        }

        let atoms = self
            .atoms
            .iter()
            .zip(positions.iter())
            .map(|(a, p)| Atom {
                position: *p,
                ..a.clone()
            })
            .collect();

        Ok(Structure::new(name, atoms))
    }
}
