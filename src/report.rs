//! 리포트 모듈
//!
//! 일괄 변환 결과를 JSON 리포트와 텍스트 에러 로그로 저장합니다.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::cli::QuoteStyle;
use crate::error::{FlatCsvError, Result};
use crate::processor::{ConvertResult, ConvertStatus};
use crate::stats::Statistics;

/// 파일 하나의 리포트 항목
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub table_name: Option<String>,
    pub output: Option<PathBuf>,
    pub status: &'static str,
    pub error_kind: Option<&'static str>,
    pub error: Option<String>,
    pub lines: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
}

impl From<&ConvertResult> for FileReport {
    fn from(result: &ConvertResult) -> Self {
        let status = match result.status {
            ConvertStatus::Converted => "converted",
            ConvertStatus::Skipped => "skipped",
            ConvertStatus::Failed(_) => "failed",
        };

        Self {
            input: result.path.clone(),
            table_name: result.table_name.clone(),
            output: result.output_path.clone(),
            status,
            error_kind: result.error().map(|e| e.kind()),
            error: result.error().map(|e| e.to_string()),
            lines: result.lines,
            bytes_read: result.bytes_read,
            bytes_written: result.bytes_written,
        }
    }
}

/// 일괄 변환 리포트
#[derive(Debug, Serialize)]
pub struct BatchReport {
    /// 생성 시각 (Unix timestamp)
    pub generated_at: u64,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub quote_style: String,
    pub total: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub elapsed_secs: f64,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// 변환 결과와 통계로 리포트 생성
    pub fn new(
        input_dir: &Path,
        output_dir: &Path,
        quote_style: QuoteStyle,
        results: &[ConvertResult],
        stats: &Statistics,
    ) -> Self {
        Self {
            generated_at: unix_timestamp(),
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            quote_style: quote_style.to_string().to_lowercase(),
            total: results.len(),
            converted: stats.get_success_count(),
            skipped: stats.get_skipped_count(),
            failed: stats.get_error_count(),
            elapsed_secs: stats.elapsed().as_secs_f64(),
            files: results.iter().map(FileReport::from).collect(),
        }
    }

    /// JSON 파일로 저장
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let report_error = |reason: String| FlatCsvError::ReportError {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::create(path).map_err(|e| report_error(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| report_error(e.to_string()))?;
        writeln!(writer).map_err(|e| report_error(e.to_string()))?;
        writer.flush().map_err(|e| report_error(e.to_string()))?;

        Ok(())
    }
}

/// 에러 로그 파일 작성
pub fn write_error_log(log_path: &Path, failures: &[&ConvertResult]) -> Result<()> {
    let report_error = |e: std::io::Error| FlatCsvError::ReportError {
        path: log_path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut log_file = BufWriter::new(File::create(log_path).map_err(report_error)?);

    writeln!(log_file, "flatcsv 에러 로그").map_err(report_error)?;
    writeln!(log_file, "생성 시간: Unix timestamp: {}", unix_timestamp()).map_err(report_error)?;
    writeln!(log_file, "총 에러 수: {}", failures.len()).map_err(report_error)?;
    writeln!(log_file, "{}", "=".repeat(50)).map_err(report_error)?;

    for result in failures {
        writeln!(log_file, "\n파일: {:?}", result.path).map_err(report_error)?;
        if let Some(ref table) = result.table_name {
            writeln!(log_file, "테이블: {}", table).map_err(report_error)?;
        }
        if let Some(error) = result.error() {
            writeln!(log_file, "에러: {}", error).map_err(report_error)?;
        }
    }

    log_file.flush().map_err(report_error)?;
    Ok(())
}

/// 현재 Unix timestamp
fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_results() -> Vec<ConvertResult> {
        vec![
            ConvertResult {
                path: PathBuf::from("in/A.txt"),
                table_name: Some("A".to_string()),
                output_path: Some(PathBuf::from("out/A.csv")),
                status: ConvertStatus::Converted,
                lines: 3,
                bytes_read: 12,
                bytes_written: 24,
            },
            ConvertResult::failed(
                PathBuf::from("in/B.txt"),
                Some("B".to_string()),
                FlatCsvError::DecodeError {
                    file: PathBuf::from("in/B.txt"),
                    line: 2,
                },
            ),
        ]
    }

    #[test]
    fn test_file_report_from_failure() {
        let results = sample_results();
        let entry = FileReport::from(&results[1]);

        assert_eq!(entry.status, "failed");
        assert_eq!(entry.error_kind, Some("decode"));
        assert!(entry.output.is_none());
    }

    #[test]
    fn test_write_report_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        let results = sample_results();
        let stats = Statistics::new(results.len());
        for result in &results {
            stats.record(result);
        }

        let report = BatchReport::new(
            Path::new("in"),
            Path::new("out"),
            QuoteStyle::Legacy,
            &results,
            &stats,
        );
        report.write_to(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["quote_style"], "legacy");
        assert_eq!(value["total"], 2);
        assert_eq!(value["converted"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["files"][0]["table_name"], "A");
        assert_eq!(value["files"][1]["error_kind"], "decode");
    }

    #[test]
    fn test_write_error_log() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("errors.log");
        let results = sample_results();
        let failures: Vec<&ConvertResult> =
            results.iter().filter(|r| r.error().is_some()).collect();

        write_error_log(&path, &failures).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("총 에러 수: 1"));
        assert!(content.contains("테이블: B"));
        assert!(content.contains("2번째 줄"));
    }
}
