//! 에러 타입 정의 모듈
//!
//! flatcsv에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// flatcsv에서 발생할 수 있는 에러 타입
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlatCsvError {
    /// 입력 폴더가 존재하지 않음
    #[error("입력 폴더를 찾을 수 없습니다: {path}")]
    InputNotFound { path: PathBuf },

    /// 입력이 폴더가 아님
    #[error("입력 경로가 폴더가 아닙니다: {path}")]
    NotADirectory { path: PathBuf },

    /// 출력 폴더 생성 실패
    #[error("출력 폴더를 준비할 수 없습니다 ({path}): {reason}")]
    OutputDirError { path: PathBuf, reason: String },

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },

    /// 파일 이름에서 경로로 쓸 수 있는 테이블 이름을 만들 수 없음
    #[error("테이블 이름을 만들 수 없습니다 ({file}): {name:?}")]
    InvalidTableName { file: PathBuf, name: String },

    /// 앞선 파일과 같은 테이블 이름
    #[error("테이블 이름 중복 ({file}): {table} 은(는) 이미 {first} 에서 사용 중입니다")]
    DuplicateTableName {
        file: PathBuf,
        table: String,
        first: PathBuf,
    },

    /// 입력 파일 열기 실패
    #[error("파일을 열 수 없습니다 ({file}): {reason}")]
    FileOpenError { file: PathBuf, reason: String },

    /// 입력 파일 읽기 실패
    #[error("파일 읽기 실패 ({file}): {reason}")]
    ReadError { file: PathBuf, reason: String },

    /// UTF-8 디코딩 실패
    #[error("텍스트 디코딩 실패 ({file}, {line}번째 줄)")]
    DecodeError { file: PathBuf, line: u64 },

    /// 출력 파일 쓰기 실패
    #[error("파일 쓰기 실패 ({file}): {reason}")]
    WriteError { file: PathBuf, reason: String },

    /// 출력 파일이 이미 존재 (Error 모드에서)
    #[error("출력 파일이 이미 존재합니다: {path}")]
    OutputExists { path: PathBuf },

    /// 스레드 풀 초기화 실패
    #[error("스레드 풀 초기화 실패: {reason}")]
    ThreadPoolError { reason: String },

    /// 리포트/로그 저장 실패
    #[error("리포트 저장 실패 ({path}): {reason}")]
    ReportError { path: PathBuf, reason: String },
}

impl FlatCsvError {
    /// 리포트에 기록되는 고정 에러 종류 이름
    pub fn kind(&self) -> &'static str {
        match self {
            FlatCsvError::InputNotFound { .. } => "input_not_found",
            FlatCsvError::NotADirectory { .. } => "not_a_directory",
            FlatCsvError::OutputDirError { .. } => "output_dir",
            FlatCsvError::InvalidPattern { .. } => "invalid_pattern",
            FlatCsvError::InvalidTableName { .. } => "invalid_table_name",
            FlatCsvError::DuplicateTableName { .. } => "duplicate_table_name",
            FlatCsvError::FileOpenError { .. } => "file_open",
            FlatCsvError::ReadError { .. } => "read",
            FlatCsvError::DecodeError { .. } => "decode",
            FlatCsvError::WriteError { .. } => "write",
            FlatCsvError::OutputExists { .. } => "output_exists",
            FlatCsvError::ThreadPoolError { .. } => "thread_pool",
            FlatCsvError::ReportError { .. } => "report",
        }
    }
}

/// flatcsv 결과 타입 별칭
pub type Result<T> = std::result::Result<T, FlatCsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let err = FlatCsvError::DecodeError {
            file: PathBuf::from("a.txt"),
            line: 3,
        };
        assert_eq!(err.kind(), "decode");
        assert!(err.to_string().contains("3번째 줄"));

        let err = FlatCsvError::OutputExists {
            path: PathBuf::from("out/A.csv"),
        };
        assert_eq!(err.kind(), "output_exists");
    }
}
