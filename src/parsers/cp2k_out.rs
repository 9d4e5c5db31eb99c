//! # CP2K 输出日志解析器
//!
//! 从 CP2K `.out` 日志中提取 QS 总能量。
//!
//! ## 匹配的日志行
//! ```text
//!  ENERGY| Total FORCE_EVAL ( QS ) energy [a.u.]:             -1234.567890123456
//!  ENERGY| Total FORCE_EVAL ( QS ) energy [hartree]            -1234.567890123456
//! ```
//! 取文件中的第一处匹配。
//!
//! ## 依赖关系
//! - 被 `ccd/energy.rs` 使用
//! - 使用 `regex`

use crate::error::{CcdError, Result};

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Hartree -> eV
pub const HARTREE_TO_EV: f64 = 27.2114;

static TOTAL_ENERGY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"ENERGY\| Total FORCE_EVAL \( QS \) energy \[(?:a\.u\.|hartree)\]\s*:?\s*(-?\d+\.\d+)",
    )
    .unwrap()
});

/// 从日志文本中提取总能量 (Hartree)
pub fn find_total_energy(text: &str) -> Option<f64> {
    TOTAL_ENERGY_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// 读取日志文件，非 UTF-8 字节按替换字符处理
fn read_log(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// 读取日志文件并提取总能量 (Hartree)
pub fn read_total_energy(path: &Path) -> Result<Option<f64>> {
    let text = read_log(path).map_err(|e| CcdError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(find_total_energy(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_total_energy_au() {
        let log = " ENERGY| Total FORCE_EVAL ( QS ) energy [a.u.]:           -1234.567890123456\n";
        assert_eq!(find_total_energy(log), Some(-1234.567890123456));
    }

    #[test]
    fn test_find_total_energy_hartree() {
        let log = " ENERGY| Total FORCE_EVAL ( QS ) energy [hartree]             -99.990000\n";
        assert_eq!(find_total_energy(log), Some(-99.99));
    }

    #[test]
    fn test_first_match_wins() {
        let log = "\
 ENERGY| Total FORCE_EVAL ( QS ) energy [a.u.]:   -10.500000
 ENERGY| Total FORCE_EVAL ( QS ) energy [a.u.]:   -11.500000
";
        assert_eq!(find_total_energy(log), Some(-10.5));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(find_total_energy("Total energy: -10.5\n"), None);
        // 需要小数点
        assert_eq!(
            find_total_energy(" ENERGY| Total FORCE_EVAL ( QS ) energy [a.u.]: -10\n"),
            None
        );
    }

    #[test]
    fn test_read_total_energy_missing_file() {
        let err = read_total_energy(Path::new("/nonexistent/dir/x_1_gs.out")).unwrap_err();
        assert!(matches!(err, CcdError::Read { .. }));
    }
}
