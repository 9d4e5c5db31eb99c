//! # 质量加权位移 (dq) 计算
//!
//! 以 `<prefix>_1_gs.inp` 为参考结构，计算 `<prefix>_<i>_gs.inp` (i = 2..=13) 的 dq。
//! 参考结构不可读时整列为 `MISSING`；单个序号失败只影响该行。
//!
//! ## 依赖关系
//! - 被 `commands/ccd.rs` 调用
//! - 使用 `parsers/cp2k_inp.rs`, `models/`

use super::discover::CcdLayout;
use super::Issue;
use crate::models::{Entry, IMAGE_COUNT};
use crate::parsers::parse_cp2k_file;

/// dq 计算结果
#[derive(Debug, Clone)]
pub struct DqSeries {
    /// 序号 1..=13 的 dq
    pub entries: Vec<Entry>,
    pub issues: Vec<Issue>,
}

/// 计算 dq 列
pub fn calc_dq_values(layout: &CcdLayout) -> DqSeries {
    let mut issues = Vec::new();

    let ref_path = layout.gs_file(1, "inp");
    let reference = match parse_cp2k_file(&ref_path) {
        Ok(s) => s,
        Err(e) => {
            issues.push(Issue::new(1, &ref_path, e.to_string()));
            return DqSeries {
                entries: vec![Entry::Missing; IMAGE_COUNT],
                issues,
            };
        }
    };

    let mut entries = Vec::with_capacity(IMAGE_COUNT);
    entries.push(Entry::Reference);

    for index in 2..=IMAGE_COUNT {
        let path = layout.gs_file(index, "inp");
        let dq = parse_cp2k_file(&path)
            .and_then(|image| image.mass_weighted_displacement(&reference));

        match dq {
            Ok(value) => entries.push(Entry::Value(value)),
            Err(e) => {
                issues.push(Issue::new(index, &path, e.to_string()));
                entries.push(Entry::Missing);
            }
        }
    }

    DqSeries { entries, issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_inp(root: &Path, index: usize, oz: f64) {
        let content = format!(
            "&COORD\n O 0.0 0.0 {}\n H 0.757 0.586 0.0\n H -0.757 0.586 0.0\n&END COORD\n",
            oz
        );
        fs::write(root.join("gs_sp").join(format!("h2o_{}_gs.inp", index)), content).unwrap();
    }

    fn layout(root: &Path) -> CcdLayout {
        fs::create_dir_all(root.join("gs_sp")).unwrap();
        CcdLayout {
            root: root.to_path_buf(),
            prefix: "h2o".to_string(),
            gs_dir: "gs_sp".to_string(),
            ex_dir: None,
        }
    }

    #[test]
    fn test_reference_missing_invalidates_series() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout(dir.path());
        write_inp(dir.path(), 2, 0.1);

        let series = calc_dq_values(&layout);
        assert_eq!(series.entries, vec![Entry::Missing; IMAGE_COUNT]);
        assert_eq!(series.issues.len(), 1);
    }

    #[test]
    fn test_dq_values_and_missing_images() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout(dir.path());
        write_inp(dir.path(), 1, 0.0);
        write_inp(dir.path(), 2, 0.1);
        write_inp(dir.path(), 3, 0.2);

        let series = calc_dq_values(&layout);
        assert_eq!(series.entries.len(), IMAGE_COUNT);
        assert_eq!(series.entries[0], Entry::Reference);
        assert_eq!(series.entries[0].render(6), "0");

        let dq2 = series.entries[1].value().unwrap();
        assert!((dq2 - (15.999f64 * 0.01).sqrt()).abs() < 1e-9);
        let dq3 = series.entries[2].value().unwrap();
        assert!((dq3 - 2.0 * dq2).abs() < 1e-9);

        assert!(series.entries[3..].iter().all(|e| *e == Entry::Missing));
        assert_eq!(series.issues.len(), IMAGE_COUNT - 3);
    }

    #[test]
    fn test_atom_count_mismatch_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout(dir.path());
        write_inp(dir.path(), 1, 0.0);
        fs::write(
            dir.path().join("gs_sp").join("h2o_2_gs.inp"),
            "&COORD\n O 0.0 0.0 0.0\n&END COORD\n",
        )
        .unwrap();

        let series = calc_dq_values(&layout);
        assert_eq!(series.entries[1], Entry::Missing);
    }
}
