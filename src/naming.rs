//! 테이블 이름 모듈
//!
//! 입력 파일 이름에서 테이블 이름과 출력 경로를 만듭니다.

use std::path::{Path, PathBuf};

use crate::error::{FlatCsvError, Result};

/// 출력 파일 확장자
pub const OUTPUT_EXTENSION: &str = "csv";

/// 입력 파일 이름에서 테이블 이름 생성
///
/// 파일 이름에서 `.{extension}` 접미사를 제거한 뒤 끝의 마침표를 모두 지웁니다.
/// 결과는 단일 경로 요소로 쓸 수 있어야 합니다.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use flatcsv::naming::derive_table_name;
///
/// let name = derive_table_name(Path::new("../TPC-E/flat_out/ACCOUNT_PERMISSION.txt"), "txt").unwrap();
/// assert_eq!(name, "ACCOUNT_PERMISSION");
/// ```
pub fn derive_table_name(path: &Path, extension: &str) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| FlatCsvError::InvalidTableName {
            file: path.to_path_buf(),
            name: path.to_string_lossy().into_owned(),
        })?;

    let suffix = format!(".{}", extension);
    let stem = if extension.is_empty() {
        file_name
    } else {
        file_name.strip_suffix(suffix.as_str()).unwrap_or(file_name)
    };
    let name = stem.trim_end_matches('.');

    if !is_path_segment(name) {
        return Err(FlatCsvError::InvalidTableName {
            file: path.to_path_buf(),
            name: name.to_string(),
        });
    }

    Ok(name.to_string())
}

/// 테이블 이름에 해당하는 출력 파일 경로
pub fn output_path(output_dir: &Path, table_name: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", table_name, OUTPUT_EXTENSION))
}

fn is_path_segment(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_from_original_layout() {
        let path = Path::new("../TPC-E/flat_out/ACCOUNT_PERMISSION.txt");
        let table = derive_table_name(path, "txt").unwrap();

        assert_eq!(table, "ACCOUNT_PERMISSION");
        assert_eq!(
            output_path(Path::new("../benchmark/csv_data"), &table),
            PathBuf::from("../benchmark/csv_data/ACCOUNT_PERMISSION.csv")
        );
    }

    #[test]
    fn test_trailing_periods_removed() {
        assert_eq!(
            derive_table_name(Path::new("dir/TRADE..txt"), "txt").unwrap(),
            "TRADE"
        );
        assert_eq!(
            derive_table_name(Path::new("dir/TRADE."), "txt").unwrap(),
            "TRADE"
        );
    }

    #[test]
    fn test_other_extension_kept() {
        assert_eq!(
            derive_table_name(Path::new("dir/TRADE.dat"), "txt").unwrap(),
            "TRADE.dat"
        );
        assert_eq!(
            derive_table_name(Path::new("dir/TRADE.dat"), "dat").unwrap(),
            "TRADE"
        );
    }

    #[test]
    fn test_lowercase_letters_not_stripped() {
        // 접미사 단위로만 제거
        assert_eq!(
            derive_table_name(Path::new("dir/text.txt"), "txt").unwrap(),
            "text"
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = derive_table_name(Path::new("dir/.txt"), "txt");
        assert!(matches!(result, Err(FlatCsvError::InvalidTableName { .. })));

        let result = derive_table_name(Path::new("dir/...txt"), "txt");
        assert!(matches!(result, Err(FlatCsvError::InvalidTableName { .. })));
    }
}
