//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::processor::ConvertOptions;

/// 기존 출력 파일 처리 모드
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
pub enum WriteMode {
    /// 기존 파일이 있으면 덮어쓰기
    #[default]
    Overwrite,
    /// 기존 파일이 있으면 건너뛰기
    Skip,
    /// 기존 파일이 있으면 에러
    Error,
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::Overwrite => write!(f, "Overwrite"),
            WriteMode::Skip => write!(f, "Skip"),
            WriteMode::Error => write!(f, "Error"),
        }
    }
}

/// CSV 인용 방식
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
pub enum QuoteStyle {
    /// 구분자를 `","` 로 치환하고 줄 전체를 따옴표로 감싸기 (기존 출력과 동일)
    #[default]
    Legacy,
    /// 모든 필드를 각각 따옴표로 감싸는 표준 CSV
    Standard,
}

impl std::fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteStyle::Legacy => write!(f, "Legacy"),
            QuoteStyle::Standard => write!(f, "Standard"),
        }
    }
}

/// flatcsv CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "flatcsv",
    author = "YourName <your@email.com>",
    version,
    about = "FLAT FILE TO CSV CONVERTER - 파이프 구분 플랫 파일을 테이블별 CSV 파일로 변환하는 CLI 도구",
    long_about = r#"
FLAT FILE TO CSV CONVERTER
==========================

입력 폴더에서 패턴과 일치하는 플랫 파일(기본: *.txt)을 찾아
파일마다 <테이블 이름>.csv 파일을 출력 폴더에 생성합니다.

특징:
  • 제한된 스레드 풀에서 파일 단위 병렬 변환
  • 줄 단위 스트리밍 변환
  • 실패한 파일은 출력 파일을 만들거나 변경하지 않음
  • 진행률 표시, 상세 통계, JSON 리포트

예제:
  flatcsv
  flatcsv -i ../TPC-E/flat_out -o ../benchmark/csv_data
  flatcsv -i ./flat_out -o ./csv --quote-style standard
  flatcsv -i ./flat_out -o ./csv --mode skip --report report.json
  flatcsv -i ./flat_out --dry-run
"#
)]
pub struct Args {
    /// 플랫 파일들이 있는 입력 폴더 경로
    #[arg(short, long, default_value = "../TPC-E/flat_out")]
    pub input: PathBuf,

    /// CSV 파일이 생성될 출력 폴더 경로 (없으면 생성)
    #[arg(short, long, default_value = "../benchmark/csv_data")]
    pub output: PathBuf,

    /// 파일 이름 패턴 필터 (glob 형식, 예: "*.txt", "ACCOUNT*.txt")
    #[arg(short, long, default_value = "*.txt")]
    pub pattern: String,

    /// 테이블 이름을 만들 때 제거할 확장자
    #[arg(long, default_value = "txt")]
    pub extension: String,

    /// 입력 필드 구분자
    #[arg(short, long, default_value_t = '|')]
    pub delimiter: char,

    /// CSV 인용 방식
    #[arg(short, long, value_enum, default_value_t = QuoteStyle::Legacy)]
    pub quote_style: QuoteStyle,

    /// 기존 출력 파일 처리 모드
    #[arg(short, long, value_enum, default_value_t = WriteMode::Overwrite)]
    pub mode: WriteMode,

    /// 병렬 처리 스레드 수 (기본값: CPU 코어 수)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// 최대 폴더 탐색 깊이 (1 = 입력 폴더 바로 아래 파일만)
    #[arg(long, default_value_t = 1)]
    pub max_depth: usize,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 변환 없이 처리될 파일과 테이블 이름만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 에러 로그 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// JSON 리포트 파일 경로
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl Args {
    /// 파일 단위 변환 옵션 생성
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::new(self.output.clone())
            .with_extension(self.extension.trim_start_matches('.'))
            .with_delimiter(self.delimiter)
            .with_quote_style(self.quote_style)
            .with_write_mode(self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_layout() {
        let args = Args::parse_from(["flatcsv"]);

        assert_eq!(args.input, PathBuf::from("../TPC-E/flat_out"));
        assert_eq!(args.output, PathBuf::from("../benchmark/csv_data"));
        assert_eq!(args.pattern, "*.txt");
        assert_eq!(args.delimiter, '|');
        assert_eq!(args.quote_style, QuoteStyle::Legacy);
        assert_eq!(args.mode, WriteMode::Overwrite);
        assert_eq!(args.max_depth, 1);
        assert!(args.threads.is_none());
    }

    #[test]
    fn test_value_enums() {
        let args = Args::parse_from([
            "flatcsv",
            "--quote-style",
            "standard",
            "--mode",
            "skip",
            "-j",
            "4",
            "--extension",
            ".dat",
        ]);

        assert_eq!(args.quote_style, QuoteStyle::Standard);
        assert_eq!(args.mode, WriteMode::Skip);
        assert_eq!(args.threads, Some(4));

        let options = args.convert_options();
        assert_eq!(options.extension, "dat");
        assert_eq!(options.quote_style, QuoteStyle::Standard);
        assert_eq!(options.write_mode, WriteMode::Skip);
    }
}
