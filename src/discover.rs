//! 입력 파일 탐색 모듈
//!
//! 입력 폴더에서 패턴과 일치하는 플랫 파일을 수집합니다.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{FlatCsvError, Result};
use crate::pattern::PatternMatcher;

/// 입력 경로 유효성 검사
pub fn validate_input_dir(input: &Path) -> Result<()> {
    if !input.exists() {
        return Err(FlatCsvError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    if !input.is_dir() {
        return Err(FlatCsvError::NotADirectory {
            path: input.to_path_buf(),
        });
    }

    Ok(())
}

/// 패턴과 일치하는 입력 파일 수집
///
/// # Arguments
/// * `input` - 입력 폴더
/// * `matcher` - 파일 이름 패턴
/// * `max_depth` - 최대 탐색 깊이 (1이면 바로 아래 파일만)
///
/// # Returns
/// 경로 순으로 정렬된 파일 목록
pub fn collect_input_files(
    input: &Path,
    matcher: &PatternMatcher,
    max_depth: usize,
) -> Result<Vec<PathBuf>> {
    validate_input_dir(input)?;

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| matcher.matches(&e.file_name().to_string_lossy()))
        .map(|e| e.into_path())
        .collect();

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "1|a\n").unwrap();
    }

    #[test]
    fn test_collect_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "TRADE.txt");
        touch(temp_dir.path(), "ACCOUNT_PERMISSION.txt");
        touch(temp_dir.path(), "notes.md");

        let matcher = PatternMatcher::new("*.txt").unwrap();
        let files = collect_input_files(temp_dir.path(), &matcher, 1).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["ACCOUNT_PERMISSION.txt", "TRADE.txt"]);
    }

    #[test]
    fn test_max_depth() {
        let temp_dir = TempDir::new().unwrap();
        let sub_dir = temp_dir.path().join("sub");
        fs::create_dir(&sub_dir).unwrap();
        touch(temp_dir.path(), "ROOT.txt");
        touch(&sub_dir, "NESTED.txt");

        let matcher = PatternMatcher::new("*.txt").unwrap();
        assert_eq!(
            collect_input_files(temp_dir.path(), &matcher, 1).unwrap().len(),
            1
        );
        assert_eq!(
            collect_input_files(temp_dir.path(), &matcher, 2).unwrap().len(),
            2
        );
    }

    #[test]
    fn test_directory_matching_pattern_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("dir.txt")).unwrap();
        touch(temp_dir.path(), "A.txt");

        let matcher = PatternMatcher::new("*.txt").unwrap();
        let files = collect_input_files(temp_dir.path(), &matcher, 1).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_is_discovered() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let odd = temp_dir.path().join(OsStr::from_bytes(b"T\xff.txt"));
        fs::write(&odd, "1|a\n").unwrap();
        touch(temp_dir.path(), "OK.txt");

        let matcher = PatternMatcher::new("*.txt").unwrap();
        let files = collect_input_files(temp_dir.path(), &matcher, 1).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.contains(&odd));
    }

    #[test]
    fn test_missing_input_dir() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let matcher = PatternMatcher::new("*").unwrap();

        let result = collect_input_files(&missing, &matcher, 1);
        assert!(matches!(result, Err(FlatCsvError::InputNotFound { .. })));
    }

    #[test]
    fn test_input_is_file() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "A.txt");

        let result = validate_input_dir(&temp_dir.path().join("A.txt"));
        assert!(matches!(result, Err(FlatCsvError::NotADirectory { .. })));
    }
}
