//! # 目录/前缀识别
//!
//! 在工作目录下寻找基态/激发态单点计算子目录，并从 `.out` 文件名推断公共前缀。
//!
//! ## 命名规则
//! ```text
//! gs_sp/<prefix>_<index>_gs.out     ex_sp/<prefix>_<index>_ex.out
//! gs-sp/<prefix>_<index>_gs.out     ex-sp/<prefix>_<index>_ex.out
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/ccd.rs` 调用
//! - 使用 `batch/collector.rs` 列举文件

use crate::batch::FileCollector;
use crate::error::{CcdError, Result};

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// 候选 (基态, 激发态) 目录名，按优先级排列
pub const FOLDER_PAIRS: [(&str, &str); 2] = [("gs_sp", "ex_sp"), ("gs-sp", "ex-sp")];

static OUT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)_\d+_(.+?)\.out$").unwrap());

/// 识别出的计算目录布局
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CcdLayout {
    /// 工作目录
    pub root: PathBuf,
    /// 文件名公共前缀
    pub prefix: String,
    /// 基态目录名
    pub gs_dir: String,
    /// 激发态目录名（可能不存在）
    pub ex_dir: Option<String>,
}

impl CcdLayout {
    /// 基态目录下的 `<prefix>_<index>_gs.<ext>`
    pub fn gs_file(&self, index: usize, ext: &str) -> PathBuf {
        self.root
            .join(&self.gs_dir)
            .join(format!("{}_{}_gs.{}", self.prefix, index, ext))
    }

    /// 激发态目录下的 `<prefix>_<index>_ex.<ext>`
    pub fn ex_file(&self, index: usize, ext: &str) -> Option<PathBuf> {
        self.ex_dir.as_ref().map(|dir| {
            self.root
                .join(dir)
                .join(format!("{}_{}_ex.{}", self.prefix, index, ext))
        })
    }

    /// 输出表格路径 `<prefix>_CCD.csv`
    pub fn csv_path(&self) -> PathBuf {
        self.root.join(format!("{}_CCD.csv", self.prefix))
    }
}

/// 识别目录布局
///
/// 先查找基态/激发态目录都存在的候选对；再退而只要求基态目录存在，
/// 激发态目录取任一存在的候选，否则为 `None`。
pub fn discover(root: &Path) -> Result<CcdLayout> {
    for (gs_dir, ex_dir) in FOLDER_PAIRS {
        if root.join(gs_dir).is_dir() && root.join(ex_dir).is_dir() {
            if let Some(prefix) = first_prefix(&root.join(gs_dir))? {
                return Ok(CcdLayout {
                    root: root.to_path_buf(),
                    prefix,
                    gs_dir: gs_dir.to_string(),
                    ex_dir: Some(ex_dir.to_string()),
                });
            }
        }
    }

    for (gs_dir, _) in FOLDER_PAIRS {
        if !root.join(gs_dir).is_dir() {
            continue;
        }
        if let Some(prefix) = first_prefix(&root.join(gs_dir))? {
            let ex_dir = FOLDER_PAIRS
                .iter()
                .map(|(_, ex)| *ex)
                .find(|ex| root.join(ex).is_dir())
                .map(str::to_string);

            return Ok(CcdLayout {
                root: root.to_path_buf(),
                prefix,
                gs_dir: gs_dir.to_string(),
                ex_dir,
            });
        }
    }

    Err(CcdError::NoMatchingOutput {
        searched: FOLDER_PAIRS
            .iter()
            .map(|(gs, ex)| format!("{}/{}", gs, ex))
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// 目录中第一个符合命名规则的 `.out` 文件的前缀
fn first_prefix(dir: &Path) -> Result<Option<String>> {
    let files = FileCollector::new(dir).with_pattern("*.out")?.collect();

    Ok(files.iter().find_map(|path| {
        let name = path.file_name()?.to_str()?;
        OUT_NAME_RE
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_discover_underscore_pair() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "gs_sp/CsPbI3_1_gs.out");
        touch(dir.path(), "gs_sp/CsPbI3_2_gs.out");
        fs::create_dir(dir.path().join("ex_sp")).unwrap();

        let layout = discover(dir.path()).unwrap();
        assert_eq!(layout.prefix, "CsPbI3");
        assert_eq!(layout.gs_dir, "gs_sp");
        assert_eq!(layout.ex_dir.as_deref(), Some("ex_sp"));
        assert!(layout.gs_file(1, "out").exists());
        assert_eq!(
            layout.ex_file(3, "out").unwrap(),
            dir.path().join("ex_sp").join("CsPbI3_3_ex.out")
        );
        assert_eq!(layout.csv_path(), dir.path().join("CsPbI3_CCD.csv"));
    }

    #[test]
    fn test_discover_prefix_stops_at_first_index() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "gs-sp/Cs_Pb_I_2_scan_7_gs.out");
        fs::create_dir(dir.path().join("ex-sp")).unwrap();

        let layout = discover(dir.path()).unwrap();
        // 非贪婪匹配：第一个 "_<数字>_" 之前
        assert_eq!(layout.prefix, "Cs_Pb_I");
        assert_eq!(layout.gs_dir, "gs-sp");
    }

    #[test]
    fn test_discover_without_excited_folder() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "gs_sp/mol_1_gs.out");

        let layout = discover(dir.path()).unwrap();
        assert_eq!(layout.prefix, "mol");
        assert_eq!(layout.ex_dir, None);
        assert_eq!(layout.ex_file(1, "out"), None);
    }

    #[test]
    fn test_discover_mixed_naming_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "gs-sp/mol_1_gs.out");
        fs::create_dir(dir.path().join("ex_sp")).unwrap();

        let layout = discover(dir.path()).unwrap();
        assert_eq!(layout.gs_dir, "gs-sp");
        assert_eq!(layout.ex_dir.as_deref(), Some("ex_sp"));
    }

    #[test]
    fn test_discover_ignores_nonconforming_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "gs_sp/readme.out");
        touch(dir.path(), "gs_sp/mol_1_gs.inp");
        fs::create_dir(dir.path().join("ex_sp")).unwrap();

        let err = discover(dir.path()).unwrap_err();
        assert!(matches!(err, CcdError::NoMatchingOutput { .. }));
    }

    #[test]
    fn test_discover_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).is_err());
    }
}
