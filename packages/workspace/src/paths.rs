//! File naming inside the workspace.

use chrono::Local;
use scribe_editor::NATIVE_EXTENSION;
use std::path::{Path, PathBuf};

/// Base name used when a document has no backing file yet
pub const UNNAMED_BASE: &str = "document";

/// Keep letters, digits, space, `-` and `_`; spaces become `_`.
pub fn clean_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();

    let cleaned = kept.trim_end().replace(' ', "_");
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned
    }
}

/// File stem of `path`, or [`UNNAMED_BASE`]
pub fn base_name(path: Option<&Path>) -> String {
    path.and_then(Path::file_stem)
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| UNNAMED_BASE.to_string())
}

pub fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// `<dir>/<base>_<stamp>.sdoc`, then `_1`, `_2`, ... suffixed alternatives
pub fn candidates<'a>(dir: &'a Path, base: &'a str, stamp: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
    (0u32..).map(move |n| {
        let name = if n == 0 {
            format!("{}_{}.{}", base, stamp, NATIVE_EXTENSION)
        } else {
            format!("{}_{}_{}.{}", base, stamp, n, NATIVE_EXTENSION)
        };
        dir.join(name)
    })
}

pub fn export_path(dir: &Path, source: &Path, extension: &str) -> PathBuf {
    dir.join(format!("{}_export.{}", base_name(Some(source)), extension))
}

/// A bare file name: no separators, no parent references
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains(&['/', '\\'][..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("Quarterly Report"), "Quarterly_Report");
        assert_eq!(clean_title("年度 总结!"), "年度_总结");
        assert_eq!(clean_title("a/b\\c:d"), "abcd");
        assert_eq!(clean_title("  spaced  "), "__spaced");
        assert_eq!(clean_title("?!*"), "untitled");
        assert_eq!(clean_title(""), "untitled");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(Some(Path::new("ws/report_20240101_000000.sdoc"))), "report_20240101_000000");
        assert_eq!(base_name(None), "document");
    }

    #[test]
    fn test_candidates_suffix() {
        let dir = Path::new("ws");
        let names: Vec<_> = candidates(dir, "report", "20240102_030405").take(3).collect();
        assert_eq!(
            names,
            vec![
                dir.join("report_20240102_030405.sdoc"),
                dir.join("report_20240102_030405_1.sdoc"),
                dir.join("report_20240102_030405_2.sdoc"),
            ]
        );
    }

    #[test]
    fn test_timestamp_shape() {
        let stamp = timestamp();
        assert_eq!(stamp.len(), 15);
        assert_eq!(stamp.as_bytes()[8], b'_');
    }

    #[test]
    fn test_plain_file_names() {
        assert!(is_plain_file_name("report.sdoc"));
        assert!(!is_plain_file_name("../report.sdoc"));
        assert!(!is_plain_file_name("sub/report.sdoc"));
        assert!(!is_plain_file_name("sub\\report.sdoc"));
        assert!(!is_plain_file_name(""));
    }
}
