//! # CP2K 输入/重启文件结构解析器
//!
//! 从 CP2K `.inp` / `-1.restart` 文件中读取原子结构。
//!
//! ## 支持的节
//! ```text
//! &CELL
//!   A 10.0 0.0 0.0          (或 ABC a b c + ALPHA_BETA_GAMMA)
//!   B 0.0 10.0 0.0
//!   C 0.0 0.0 10.0
//! &END CELL
//! &COORD
//!   UNIT angstrom           (可选: angstrom / bohr / nm / pm)
//!   SCALED F                (可选: 分数坐标，需要 &CELL)
//!   Fe1  0.0 0.0 0.0
//!   O    1.9 0.0 0.0
//! &END COORD
//! &KIND Fe1
//!   ELEMENT Fe
//! &END KIND
//! ```
//!
//! 只读取第一个 `&COORD` 和 `&CELL`；嵌套子节 (如 `&CELL_REF`) 被跳过。
//! 质量一律取标准原子量。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`、`ccd/displacement.rs`、`ccd/interpolate.rs` 使用
//! - 使用 `models/structure.rs`, `models/elements.rs`

use crate::error::{CcdError, Result};
use crate::models::elements::{atomic_mass, canonical_symbol, element_from_label};
use crate::models::{Atom, Structure};

use std::collections::HashMap;
use std::fs;
use std::path::Path;

const BOHR_TO_ANGSTROM: f64 = 0.529177210903;

/// 节内容（不含嵌套子节）
struct Section<'a> {
    /// 节头参数，如 `&KIND Fe1` 中的 "Fe1"
    args: String,
    lines: Vec<&'a str>,
}

/// 解析 CP2K 结构文件
pub fn parse_cp2k_file(path: &Path) -> Result<Structure> {
    let content = fs::read_to_string(path).map_err(|e| CcdError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");

    parse_cp2k_content(&content, name)
}

/// 从字符串内容解析 CP2K 结构
pub fn parse_cp2k_content(content: &str, name: &str) -> Result<Structure> {
    let parse_err = |reason: String| CcdError::Cp2kInput {
        path: name.to_string(),
        reason,
    };

    let coord = collect_sections(content, "COORD")
        .into_iter()
        .next()
        .ok_or_else(|| parse_err("Missing &COORD section".to_string()))?;

    let cell = match collect_sections(content, "CELL").into_iter().next() {
        Some(section) => Some(parse_cell(&section).map_err(parse_err)?),
        None => None,
    };

    let kind_elements = parse_kind_elements(content);

    let mut scale = 1.0;
    let mut scaled = false;
    let mut atoms = Vec::new();

    for line in &coord.lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let keyword = tokens[0].to_ascii_uppercase();

        match keyword.as_str() {
            "UNIT" => {
                let unit = tokens.get(1).copied().unwrap_or("angstrom");
                scale = unit_scale(unit)
                    .ok_or_else(|| parse_err(format!("Unsupported COORD unit '{}'", unit)))?;
                continue;
            }
            "SCALED" => {
                scaled = tokens.get(1).map(|v| parse_logical(v)).unwrap_or(true);
                continue;
            }
            _ => {}
        }

        if tokens.len() < 4 {
            return Err(parse_err(format!("Malformed COORD line: '{}'", line)));
        }

        let kind = tokens[0];
        let mut xyz = [0.0; 3];
        for (k, value) in xyz.iter_mut().enumerate() {
            *value = tokens[k + 1]
                .parse()
                .map_err(|_| parse_err(format!("Invalid coordinate in line: '{}'", line)))?;
        }

        let element = kind_elements
            .get(&kind.to_ascii_uppercase())
            .copied()
            .or_else(|| element_from_label(kind))
            .ok_or_else(|| CcdError::UnknownElement(kind.to_string()))?;
        let mass = atomic_mass(element).ok_or_else(|| CcdError::UnknownElement(kind.to_string()))?;

        atoms.push(Atom::new(kind, element, xyz, mass));
    }

    if atoms.is_empty() {
        return Err(parse_err("Empty &COORD section".to_string()));
    }

    if scaled {
        let lattice =
            cell.ok_or_else(|| parse_err("SCALED coordinates require a &CELL section".to_string()))?;
        for atom in &mut atoms {
            atom.position = frac_to_cart(atom.position, &lattice);
        }
    } else if scale != 1.0 {
        for atom in &mut atoms {
            for v in atom.position.iter_mut() {
                *v *= scale;
            }
        }
    }

    Ok(Structure::new(name, atoms))
}

/// 收集所有名为 `name` 的节
fn collect_sections<'a>(content: &'a str, name: &str) -> Vec<Section<'a>> {
    let header = format!("&{}", name);
    let mut sections = Vec::new();
    let mut current: Option<Section<'a>> = None;
    let mut depth = 0usize;

    for raw in content.lines() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let head = tokens.next().unwrap_or("").to_ascii_uppercase();

        match current.take() {
            Some(mut section) => {
                if head.starts_with("&END") {
                    if depth == 0 {
                        sections.push(section);
                        continue;
                    }
                    depth -= 1;
                } else if head.starts_with('&') {
                    depth += 1;
                } else if depth == 0 {
                    section.lines.push(line);
                }
                current = Some(section);
            }
            None => {
                if head == header {
                    current = Some(Section {
                        args: tokens.collect::<Vec<_>>().join(" "),
                        lines: Vec::new(),
                    });
                    depth = 0;
                }
            }
        }
    }

    sections
}

/// 去掉行内注释
fn strip_comment(line: &str) -> &str {
    match line.find(['#', '!']) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// 解析 &KIND 节中的 ELEMENT 映射（键为大写 kind 名）
fn parse_kind_elements(content: &str) -> HashMap<String, &'static str> {
    let mut map = HashMap::new();

    for section in collect_sections(content, "KIND") {
        let kind = section.args.trim();
        if kind.is_empty() {
            continue;
        }
        for line in &section.lines {
            let mut tokens = line.split_whitespace();
            let keyword = tokens.next().unwrap_or("");
            if keyword.eq_ignore_ascii_case("ELEMENT") {
                if let Some(sym) = tokens.next().and_then(canonical_symbol) {
                    map.insert(kind.to_ascii_uppercase(), sym);
                }
            }
        }
    }

    map
}

/// 解析 &CELL 节，返回晶格矩阵（行向量 a, b, c，单位 Å）
fn parse_cell(section: &Section) -> std::result::Result<[[f64; 3]; 3], String> {
    let mut vectors: [Option<[f64; 3]>; 3] = [None, None, None];
    let mut abc: Option<[f64; 3]> = None;
    let mut angles = [90.0, 90.0, 90.0];

    for line in &section.lines {
        let keyword = line
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_uppercase();

        match keyword.as_str() {
            "A" => vectors[0] = Some(parse_triple(line)?),
            "B" => vectors[1] = Some(parse_triple(line)?),
            "C" => vectors[2] = Some(parse_triple(line)?),
            "ABC" => abc = Some(parse_triple(line)?),
            "ALPHA_BETA_GAMMA" => angles = parse_triple(line)?,
            _ => {}
        }
    }

    if let [Some(a), Some(b), Some(c)] = vectors {
        return Ok([a, b, c]);
    }
    if let Some([a, b, c]) = abc {
        return Ok(lattice_from_parameters(a, b, c, angles));
    }

    Err("Incomplete &CELL section (need A/B/C or ABC)".to_string())
}

/// 解析 "KEYWORD [unit] x y z" 中的三个数值，跳过 "[angstrom]" 之类的单位标注
fn parse_triple(line: &str) -> std::result::Result<[f64; 3], String> {
    let numbers: Vec<f64> = line
        .split_whitespace()
        .skip(1)
        .filter(|t| !t.starts_with('['))
        .take(3)
        .map(|t| t.parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| format!("Invalid number in CELL line: '{}'", line))?;

    if numbers.len() < 3 {
        return Err(format!("Expected three values in CELL line: '{}'", line));
    }
    Ok([numbers[0], numbers[1], numbers[2]])
}

/// 从晶格参数 (a, b, c, alpha, beta, gamma) 构造晶格矩阵，角度单位：度
fn lattice_from_parameters(a: f64, b: f64, c: f64, angles: [f64; 3]) -> [[f64; 3]; 3] {
    let [alpha, beta, gamma] = angles.map(f64::to_radians);

    let a_vec = [a, 0.0, 0.0];
    let b_vec = [b * gamma.cos(), b * gamma.sin(), 0.0];

    let c1 = c * beta.cos();
    let c2 = c * (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin();
    let c3 = (c * c - c1 * c1 - c2 * c2).sqrt();

    [a_vec, b_vec, [c1, c2, c3]]
}

fn frac_to_cart(frac: [f64; 3], lattice: &[[f64; 3]; 3]) -> [f64; 3] {
    let mut cart = [0.0; 3];
    for (k, value) in cart.iter_mut().enumerate() {
        *value = frac[0] * lattice[0][k] + frac[1] * lattice[1][k] + frac[2] * lattice[2][k];
    }
    cart
}

fn unit_scale(unit: &str) -> Option<f64> {
    match unit.to_ascii_lowercase().as_str() {
        "angstrom" | "ang" => Some(1.0),
        "bohr" => Some(BOHR_TO_ANGSTROM),
        "nm" => Some(10.0),
        "pm" => Some(0.01),
        _ => None,
    }
}

/// CP2K 逻辑值: T / TRUE / .TRUE. / YES / ON
fn parse_logical(value: &str) -> bool {
    matches!(
        value.to_ascii_uppercase().as_str(),
        "T" | "TRUE" | ".TRUE." | "YES" | "ON"
    )
}
