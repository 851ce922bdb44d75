//! flatcsv - FLAT FILE TO CSV CONVERTER
//!
//! 파이프(`|`)로 구분된 플랫 파일 폴더를 테이블별 CSV 파일로 변환하는 CLI 도구입니다.
//! 입력 파일 하나가 `<테이블 이름>.csv` 출력 파일 하나가 됩니다.
//!
//! # 주요 기능
//!
//! - 🚀 **병렬 처리**: Rayon 스레드 풀에서 파일 단위 독립 변환
//! - 🌊 **스트리밍**: 파일 전체를 메모리에 올리지 않고 줄 단위로 변환
//! - 🛡️ **안전한 출력**: 임시 파일에 쓴 뒤 교체하므로 실패한 파일은 출력을 남기지 않음
//! - 🔍 **패턴 필터링**: glob 형식의 파일 이름 필터링
//! - 📝 **출력 모드**: 덮어쓰기, 건너뛰기, 에러 모드 지원
//! - 🧪 **드라이런 모드**: 변환 없이 파일과 테이블 이름 목록 확인
//! - 📊 **리포트**: 통계 요약, 에러 로그, JSON 리포트
//!
//! # 예제
//!
//! ```bash
//! # 기본 경로 (../TPC-E/flat_out → ../benchmark/csv_data)
//! flatcsv
//!
//! # 경로 지정, 표준 CSV 인용
//! flatcsv -i ./flat_out -o ./csv --quote-style standard
//! ```

pub mod cli;
pub mod discover;
pub mod error;
pub mod naming;
pub mod pattern;
pub mod processor;
pub mod report;
pub mod runner;
pub mod stats;

// Re-exports for convenient access
pub use cli::{Args, QuoteStyle, WriteMode};
pub use discover::collect_input_files;
pub use error::{FlatCsvError, Result};
pub use naming::{derive_table_name, output_path};
pub use pattern::PatternMatcher;
pub use processor::{convert_file, quote_line, ConvertOptions, ConvertResult, ConvertStatus};
pub use report::BatchReport;
pub use runner::{plan_outputs, run_batch, BatchEvent};
pub use stats::{format_bytes, Statistics};
