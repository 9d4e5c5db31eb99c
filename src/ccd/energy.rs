//! # 相对能量提取
//!
//! 以 `<prefix>_1_gs.out` 的 QS 总能量为参考，提取每个序号的基态/激发态能量差 (eV)。
//!
//! ## 单元格规则
//! - 文件不存在或不可读 → `MISSING`
//! - 文件存在但没有能量行，或参考能量缺失 → 空串
//! - 否则 `(E_i - E_ref) * 27.2114`，保留 4 位小数
//! - 没有激发态目录时激发态列全部为 `MISSING`
//!
//! ## 依赖关系
//! - 被 `commands/ccd.rs` 调用
//! - 使用 `parsers/cp2k_out.rs`

use super::discover::CcdLayout;
use super::Issue;
use crate::error::CcdError;
use crate::models::{EnergyPair, Entry, IMAGE_COUNT};
use crate::parsers::{read_total_energy, HARTREE_TO_EV};

use std::io::ErrorKind;
use std::path::Path;

/// 能量提取结果
#[derive(Debug, Clone)]
pub struct EnergySeries {
    /// 参考总能量 (Hartree)
    pub reference: Option<f64>,
    /// 序号 1..=13 的能量对
    pub pairs: Vec<EnergyPair>,
    pub issues: Vec<Issue>,
}

/// 提取 gs/ex 能量列
pub fn extract_energies(layout: &CcdLayout) -> EnergySeries {
    let mut issues = Vec::new();

    let ref_path = layout.gs_file(1, "out");
    let reference = match read_total_energy(&ref_path) {
        Ok(Some(energy)) => Some(energy),
        Ok(None) => {
            issues.push(Issue::new(1, &ref_path, "reference energy line not found"));
            None
        }
        Err(e) => {
            issues.push(Issue::new(1, &ref_path, format!("reference unreadable: {}", e)));
            None
        }
    };

    let pairs = (1..=IMAGE_COUNT)
        .map(|index| {
            let gs = relative_energy(index, &layout.gs_file(index, "out"), reference, &mut issues);
            let ex = match layout.ex_file(index, "out") {
                Some(path) => relative_energy(index, &path, reference, &mut issues),
                None => Entry::Missing,
            };
            EnergyPair { gs, ex }
        })
        .collect();

    EnergySeries {
        reference,
        pairs,
        issues,
    }
}

/// 单个输出文件相对参考的能量 (eV)
fn relative_energy(
    index: usize,
    path: &Path,
    reference: Option<f64>,
    issues: &mut Vec<Issue>,
) -> Entry {
    match read_total_energy(path) {
        Ok(Some(energy)) => match reference {
            Some(reference) => Entry::Value((energy - reference) * HARTREE_TO_EV),
            None => Entry::Unmatched,
        },
        Ok(None) => Entry::Unmatched,
        // 缺失是常态（部分图像尚未计算），只记录其他读取错误
        Err(CcdError::Read { ref source, .. }) if source.kind() == ErrorKind::NotFound => {
            Entry::Missing
        }
        Err(e) => {
            issues.push(Issue::new(index, path, e.to_string()));
            Entry::Missing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn energy_line(e: f64) -> String {
        format!(
            " ENERGY| Total FORCE_EVAL ( QS ) energy [a.u.]:            {:.6}\n",
            e
        )
    }

    fn setup(root: &Path, with_ex: bool) -> CcdLayout {
        fs::create_dir_all(root.join("gs_sp")).unwrap();
        if with_ex {
            fs::create_dir_all(root.join("ex_sp")).unwrap();
        }
        CcdLayout {
            root: root.to_path_buf(),
            prefix: "mol".to_string(),
            gs_dir: "gs_sp".to_string(),
            ex_dir: with_ex.then(|| "ex_sp".to_string()),
        }
    }

    fn write(root: &Path, rel: &str, content: &str) {
        fs::write(root.join(rel), content).unwrap();
    }

    #[test]
    fn test_reference_example() {
        let dir = tempfile::tempdir().unwrap();
        let layout = setup(dir.path(), true);
        write(dir.path(), "gs_sp/mol_1_gs.out", &energy_line(-100.0));
        write(dir.path(), "gs_sp/mol_3_gs.out", &energy_line(-99.99));
        write(dir.path(), "ex_sp/mol_3_ex.out", "SCF run NOT converged\n");

        let series = extract_energies(&layout);
        assert_eq!(series.reference, Some(-100.0));
        assert_eq!(series.pairs.len(), IMAGE_COUNT);

        assert_eq!(series.pairs[0].gs.render(4), "0.0000");
        assert_eq!(series.pairs[2].gs.render(4), "0.2721");
        assert_eq!(series.pairs[2].ex, Entry::Unmatched);
        assert_eq!(series.pairs[1].gs, Entry::Missing);
        assert_eq!(series.pairs[0].ex, Entry::Missing);
        // NotFound 不算问题
        assert!(series.issues.is_empty());
    }

    #[test]
    fn test_shift_invariance() {
        let shifts = [0.0, 12.5, -300.0];
        let mut rendered = Vec::new();

        for shift in shifts {
            let dir = tempfile::tempdir().unwrap();
            let layout = setup(dir.path(), true);
            write(dir.path(), "gs_sp/mol_1_gs.out", &energy_line(-100.0 + shift));
            write(dir.path(), "gs_sp/mol_2_gs.out", &energy_line(-99.95 + shift));
            write(dir.path(), "ex_sp/mol_2_ex.out", &energy_line(-99.90 + shift));

            let series = extract_energies(&layout);
            rendered.push((series.pairs[1].gs.render(4), series.pairs[1].ex.render(4)));
        }

        assert!(rendered.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(rendered[0], ("1.3606".to_string(), "2.7211".to_string()));
    }

    #[test]
    fn test_missing_reference_gives_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let layout = setup(dir.path(), false);
        write(dir.path(), "gs_sp/mol_2_gs.out", &energy_line(-99.0));

        let series = extract_energies(&layout);
        assert_eq!(series.reference, None);
        assert_eq!(series.pairs[0].gs, Entry::Missing);
        assert_eq!(series.pairs[1].gs, Entry::Unmatched);
        assert!(series.pairs.iter().all(|p| p.ex == Entry::Missing));
        assert_eq!(series.issues.len(), 1);
    }
}
