//! # STE 线性插值输入生成
//!
//! 在基态结构 `<prefix>_g_<suffix>.inp` 与自陷激子结构 `<prefix>_ste_<suffix>.inp`
//! 之间线性插值 7 个图像，并沿同一方向外推到共 13 个图像，
//! 以基态输入为模板写出 `<prefix>_<n>_<suffix>.inp` (n = 1..=13)。
//!
//! ## 模板改写规则
//! - `&COORD` 行保留，其后写入图像坐标，原坐标行丢弃直到 `&END COORD`
//! - `PROJECT <prefix>_g_<suffix>` → `<prefix>_<n>_<suffix>`
//! - `WFN_RESTART_FILE_NAME <prefix>_g_<suffix>-RESTART.wfn`：第一个图像保留，
//!   其余指向前一个图像的波函数 `<prefix>_<n-1>_<suffix>-RESTART.wfn`
//!
//! ## 依赖关系
//! - 被 `commands/ste_sp.rs` 调用
//! - 使用 `parsers/cp2k_inp.rs`, `batch/collector.rs`

use crate::batch::FileCollector;
use crate::error::{CcdError, Result};
use crate::models::{Atom, Structure, IMAGE_COUNT};
use crate::parsers::parse_cp2k_file;

use std::fs;
use std::path::{Path, PathBuf};

/// 基态与 STE 结构之间（含端点）的图像数
pub const INTERP_IMAGES: usize = 7;

/// 输入文件命名种子 `<prefix>_g_<suffix>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteSeed {
    pub prefix: String,
    pub suffix: String,
}

impl SteSeed {
    /// `<prefix>_g_<suffix>`
    pub fn ground_project(&self) -> String {
        format!("{}_g_{}", self.prefix, self.suffix)
    }

    pub fn ground_input(&self) -> String {
        format!("{}.inp", self.ground_project())
    }

    pub fn ste_input(&self) -> String {
        format!("{}_ste_{}.inp", self.prefix, self.suffix)
    }

    /// 第 n 个图像 (从 1 开始) 的项目名
    pub fn image_project(&self, n: usize) -> String {
        format!("{}_{}_{}", self.prefix, n, self.suffix)
    }

    /// 批处理脚本/日志的基础名 `<prefix>_<suffix>`
    pub fn job_base(&self) -> String {
        format!("{}_{}", self.prefix, self.suffix)
    }
}

/// 在目录中识别 `*_g_*.inp` 并拆分出前缀和后缀
pub fn detect_seed(root: &Path) -> Result<SteSeed> {
    let files = FileCollector::new(root).with_pattern("*_g_*.inp")?.collect();

    let first = files.first().ok_or_else(|| CcdError::NoSeedInput {
        dir: root.display().to_string(),
    })?;

    let stem = first
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let parts: Vec<&str> = stem.split("_g_").collect();
    if parts.len() != 2 {
        return Err(CcdError::InvalidArgument(format!(
            "The file name format is incorrect (*_g_*): {}",
            first.display()
        )));
    }

    Ok(SteSeed {
        prefix: parts[0].to_string(),
        suffix: parts[1].to_string(),
    })
}

/// 计算 13 个图像的坐标：`p0 + i * (p1 - p0) / (INTERP_IMAGES - 1)`
pub fn interpolate_positions(initial: &Structure, target: &Structure) -> Result<Vec<Vec<[f64; 3]>>> {
    if initial.len() != target.len() {
        return Err(CcdError::AtomCountMismatch {
            left: initial.len(),
            right: target.len(),
        });
    }

    let steps: Vec<[f64; 3]> = initial
        .atoms
        .iter()
        .zip(target.atoms.iter())
        .map(|(a, b)| {
            let mut d = [0.0; 3];
            for k in 0..3 {
                d[k] = (b.position[k] - a.position[k]) / (INTERP_IMAGES - 1) as f64;
            }
            d
        })
        .collect();

    let images = (0..IMAGE_COUNT)
        .map(|i| {
            initial
                .atoms
                .iter()
                .zip(steps.iter())
                .map(|(a, d)| {
                    let mut p = a.position;
                    for k in 0..3 {
                        p[k] += i as f64 * d[k];
                    }
                    p
                })
                .collect()
        })
        .collect();

    Ok(images)
}

/// 按模板改写第 `image` 个图像 (从 0 开始) 的输入
pub fn render_image_input(template: &str, seed: &SteSeed, image: usize, atoms: &[Atom]) -> String {
    let ground = seed.ground_project();
    let project_marker = format!("PROJECT {}", ground);
    let wfn_name = format!("{}-RESTART.wfn", ground);
    let wfn_marker = format!("WFN_RESTART_FILE_NAME {}", wfn_name);

    let mut out = String::with_capacity(template.len());
    let mut in_coord_block = false;

    for line in template.split_inclusive('\n') {
        if line.contains("&COORD") {
            out.push_str(line);
            if !line.ends_with('\n') {
                out.push('\n');
            }
            for atom in atoms {
                out.push_str(&format!(
                    "{} {:.10} {:.10} {:.10}\n",
                    atom.kind, atom.position[0], atom.position[1], atom.position[2]
                ));
            }
            in_coord_block = true;
        } else if in_coord_block {
            if line.contains("&END COORD") {
                out.push_str(line);
                in_coord_block = false;
            }
        } else if line.contains(&project_marker) {
            out.push_str(&line.replace(&ground, &seed.image_project(image + 1)));
        } else if line.contains(&wfn_marker) {
            if image == 0 {
                out.push_str(line);
            } else {
                let previous = format!("{}-RESTART.wfn", seed.image_project(image));
                out.push_str(&line.replace(&wfn_name, &previous));
            }
        } else {
            out.push_str(line);
        }
    }

    out
}

/// 读取端点结构并写出全部图像输入，返回写出的文件路径
pub fn write_image_inputs(root: &Path, seed: &SteSeed) -> Result<Vec<PathBuf>> {
    let ground_path = root.join(seed.ground_input());
    let initial = parse_cp2k_file(&ground_path)?;
    let target = parse_cp2k_file(&root.join(seed.ste_input()))?;

    let template = fs::read_to_string(&ground_path).map_err(|e| CcdError::Read {
        path: ground_path.display().to_string(),
        source: e,
    })?;

    let mut written = Vec::with_capacity(IMAGE_COUNT);

    for (i, positions) in interpolate_positions(&initial, &target)?.iter().enumerate() {
        let image = initial.with_positions(seed.image_project(i + 1), positions)?;
        let content = render_image_input(&template, seed, i, &image.atoms);

        let path = root.join(format!("{}.inp", seed.image_project(i + 1)));
        fs::write(&path, content).map_err(|e| CcdError::Write {
            path: path.display().to_string(),
            source: e,
        })?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "\
&GLOBAL
  PROJECT CsPbBr3_g_gs
  RUN_TYPE ENERGY
&END GLOBAL
&FORCE_EVAL
  &DFT
    WFN_RESTART_FILE_NAME CsPbBr3_g_gs-RESTART.wfn
  &END DFT
  &SUBSYS
    &COORD
      Cs 0.0 0.0 0.0
      Br 3.0 0.0 0.0
    &END COORD
  &END SUBSYS
&END FORCE_EVAL
";

    fn seed() -> SteSeed {
        SteSeed {
            prefix: "CsPbBr3".to_string(),
            suffix: "gs".to_string(),
        }
    }

    #[test]
    fn test_detect_seed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CsPbBr3_g_gs.inp"), "").unwrap();
        fs::write(dir.path().join("CsPbBr3_ste_gs.inp"), "").unwrap();

        assert_eq!(detect_seed(dir.path()).unwrap(), seed());
    }

    #[test]
    fn test_detect_seed_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            detect_seed(dir.path()),
            Err(CcdError::NoSeedInput { .. })
        ));

        fs::write(dir.path().join("a_g_b_g_c.inp"), "").unwrap();
        assert!(matches!(
            detect_seed(dir.path()),
            Err(CcdError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_interpolation_hits_endpoint_and_extrapolates() {
        let initial = Structure::new("g", vec![Atom::new("H", "H", [0.0, 0.0, 0.0], 1.008)]);
        let target = Structure::new("ste", vec![Atom::new("H", "H", [0.6, 0.0, -1.2], 1.008)]);

        let images = interpolate_positions(&initial, &target).unwrap();
        assert_eq!(images.len(), IMAGE_COUNT);
        assert_eq!(images[0][0], [0.0, 0.0, 0.0]);

        let end = images[INTERP_IMAGES - 1][0];
        assert!((end[0] - 0.6).abs() < 1e-12 && (end[2] + 1.2).abs() < 1e-12);

        let last = images[IMAGE_COUNT - 1][0];
        assert!((last[0] - 1.2).abs() < 1e-12 && (last[2] + 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_interpolation_atom_mismatch() {
        let initial = Structure::new("g", vec![Atom::new("H", "H", [0.0; 3], 1.008)]);
        let target = Structure::new("ste", vec![]);
        assert!(interpolate_positions(&initial, &target).is_err());
    }

    #[test]
    fn test_render_first_image_keeps_wfn() {
        let atoms = vec![
            Atom::new("Cs", "Cs", [0.0, 0.0, 0.0], 132.9),
            Atom::new("Br", "Br", [3.5, 0.0, 0.0], 79.9),
        ];
        let out = render_image_input(TEMPLATE, &seed(), 0, &atoms);

        assert!(out.contains("PROJECT CsPbBr3_1_gs\n"));
        assert!(out.contains("WFN_RESTART_FILE_NAME CsPbBr3_g_gs-RESTART.wfn"));
        assert!(out.contains("Br 3.5000000000 0.0000000000 0.0000000000\n"));
        assert!(!out.contains("Br 3.0 0.0 0.0"));
        assert!(out.contains("    &END COORD\n"));
        assert!(out.ends_with("&END FORCE_EVAL\n"));
    }

    #[test]
    fn test_render_later_image_chains_wfn() {
        let atoms = vec![Atom::new("Cs", "Cs", [0.0; 3], 132.9)];
        let out = render_image_input(TEMPLATE, &seed(), 4, &atoms);

        assert!(out.contains("PROJECT CsPbBr3_5_gs\n"));
        assert!(out.contains("WFN_RESTART_FILE_NAME CsPbBr3_4_gs-RESTART.wfn"));
    }

    #[test]
    fn test_write_image_inputs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CsPbBr3_g_gs.inp"), TEMPLATE).unwrap();
        fs::write(
            dir.path().join("CsPbBr3_ste_gs.inp"),
            TEMPLATE.replace("Br 3.0 0.0 0.0", "Br 3.6 0.0 0.0"),
        )
        .unwrap();

        let written = write_image_inputs(dir.path(), &seed()).unwrap();
        assert_eq!(written.len(), IMAGE_COUNT);

        let seventh = parse_cp2k_file(&dir.path().join("CsPbBr3_7_gs.inp")).unwrap();
        assert!((seventh.atoms[1].position[0] - 3.6).abs() < 1e-9);

        let second = fs::read_to_string(dir.path().join("CsPbBr3_2_gs.inp")).unwrap();
        assert!(second.contains("Br 3.1000000000"));
        assert!(second.contains("CsPbBr3_1_gs-RESTART.wfn"));
    }
}
