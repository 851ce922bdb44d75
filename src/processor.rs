//! 플랫 파일 변환 모듈
//!
//! 개별 플랫 파일을 읽어 CSV 파일로 변환하는 작업 단위를 담당합니다.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::cli::{QuoteStyle, WriteMode};
use crate::error::{FlatCsvError, Result};
use crate::naming::{derive_table_name, output_path};

/// 파일 변환 상태
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertStatus {
    /// 변환 완료
    Converted,
    /// 기존 출력 파일이 있어 건너뜀 (Skip 모드)
    Skipped,
    /// 변환 실패
    Failed(FlatCsvError),
}

/// 파일 변환 결과
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// 입력 파일 경로
    pub path: PathBuf,
    /// 테이블 이름 (만들 수 있었던 경우)
    pub table_name: Option<String>,
    /// 출력 파일 경로 (테이블 이름이 있는 경우)
    pub output_path: Option<PathBuf>,
    /// 변환 상태
    pub status: ConvertStatus,
    /// 변환된 줄 수
    pub lines: u64,
    /// 입력 파일 크기
    pub bytes_read: u64,
    /// 출력 파일 크기
    pub bytes_written: u64,
}

impl ConvertResult {
    /// 실패 결과 생성
    pub fn failed(path: PathBuf, table_name: Option<String>, error: FlatCsvError) -> Self {
        Self {
            path,
            table_name,
            output_path: None,
            status: ConvertStatus::Failed(error),
            lines: 0,
            bytes_read: 0,
            bytes_written: 0,
        }
    }

    pub fn is_converted(&self) -> bool {
        self.status == ConvertStatus::Converted
    }

    /// 실패 시 에러 반환
    pub fn error(&self) -> Option<&FlatCsvError> {
        match &self.status {
            ConvertStatus::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// 변환 옵션
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// CSV 출력 폴더
    pub output_dir: PathBuf,
    /// 테이블 이름에서 제거할 확장자 (마침표 제외)
    pub extension: String,
    /// 입력 필드 구분자
    pub delimiter: char,
    /// 인용 방식
    pub quote_style: QuoteStyle,
    /// 기존 출력 파일 처리 모드
    pub write_mode: WriteMode,
}

impl ConvertOptions {
    /// 기본 옵션 생성
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: "txt".to_string(),
            delimiter: '|',
            quote_style: QuoteStyle::default(),
            write_mode: WriteMode::default(),
        }
    }

    /// 확장자 설정
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// 구분자 설정
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// 인용 방식 설정
    pub fn with_quote_style(mut self, quote_style: QuoteStyle) -> Self {
        self.quote_style = quote_style;
        self
    }

    /// 쓰기 모드 설정
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }
}

/// 한 줄을 기존 방식으로 인용
///
/// 모든 구분자를 `","` 로 바꾸고 앞뒤에 따옴표를 붙입니다. 줄바꿈은 레코드에
/// 남아 있으므로 닫는 따옴표는 줄바꿈 뒤에 붙습니다.
///
/// # Examples
/// ```
/// use flatcsv::processor::quote_line;
///
/// assert_eq!(quote_line("100|Alice|Boston\n", '|'), "\"100\",\"Alice\",\"Boston\n\"");
/// ```
pub fn quote_line(line: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    out.push('"');
    for c in line.chars() {
        if c == delimiter {
            out.push_str("\",\"");
        } else {
            out.push(c);
        }
    }
    out.push('"');
    out
}

/// 줄 끝의 `\n` 또는 `\r\n` 제거
fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

/// 인용 방식별 레코드 출력기
enum RecordSink<W: Write> {
    Legacy { out: W, delimiter: char },
    Standard { writer: csv::Writer<W>, delimiter: char },
}

impl<W: Write> RecordSink<W> {
    fn new(out: W, quote_style: QuoteStyle, delimiter: char) -> Self {
        match quote_style {
            QuoteStyle::Legacy => RecordSink::Legacy { out, delimiter },
            QuoteStyle::Standard => RecordSink::Standard {
                writer: csv::WriterBuilder::new()
                    .has_headers(false)
                    .flexible(true)
                    .quote_style(csv::QuoteStyle::Always)
                    .terminator(csv::Terminator::Any(b'\n'))
                    .from_writer(out),
                delimiter,
            },
        }
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            RecordSink::Legacy { out, delimiter } => {
                out.write_all(quote_line(line, *delimiter).as_bytes())
            }
            RecordSink::Standard { writer, delimiter } => writer
                .write_record(strip_line_ending(line).split(*delimiter))
                .map_err(io::Error::from),
        }
    }

    fn into_inner(self) -> io::Result<W> {
        match self {
            RecordSink::Legacy { out, .. } => Ok(out),
            RecordSink::Standard { writer, .. } => {
                writer.into_inner().map_err(|e| e.into_error())
            }
        }
    }
}

/// 단일 플랫 파일 변환
///
/// 실패는 모두 `ConvertResult`에 담겨 반환되며 패닉하거나 전파되지 않습니다.
/// 읽기나 쓰기 중 실패하면 기존 출력 파일은 변경되지 않습니다.
pub fn convert_file(path: PathBuf, options: &ConvertOptions) -> ConvertResult {
    let table_name = match derive_table_name(&path, &options.extension) {
        Ok(name) => name,
        Err(e) => return ConvertResult::failed(path, None, e),
    };
    let target = output_path(&options.output_dir, &table_name);

    if target.exists() {
        match options.write_mode {
            WriteMode::Overwrite => {}
            WriteMode::Skip => {
                return ConvertResult {
                    path,
                    table_name: Some(table_name),
                    output_path: Some(target),
                    status: ConvertStatus::Skipped,
                    lines: 0,
                    bytes_read: 0,
                    bytes_written: 0,
                }
            }
            WriteMode::Error => {
                let error = FlatCsvError::OutputExists { path: target };
                return ConvertResult::failed(path, Some(table_name), error);
            }
        }
    }

    match convert_internal(&path, &target, options) {
        Ok((lines, bytes_read, bytes_written)) => ConvertResult {
            path,
            table_name: Some(table_name),
            output_path: Some(target),
            status: ConvertStatus::Converted,
            lines,
            bytes_read,
            bytes_written,
        },
        Err(e) => ConvertResult::failed(path, Some(table_name), e),
    }
}

/// 출력 폴더에 임시 파일 생성
///
/// 기존 출력 파일이 있으면 그 권한을 그대로 쓰고, 없으면 umask가 적용된 기본 권한을 씁니다.
fn create_temp_output(output_dir: &Path, target: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".flatcsv-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let temp = builder.tempfile_in(output_dir)?;
    if let Ok(existing) = fs::metadata(target) {
        temp.as_file().set_permissions(existing.permissions())?;
    }
    Ok(temp)
}

/// 내부 변환 로직
///
/// 임시 파일에 쓴 뒤 출력 경로로 교체합니다. (줄 수, 읽은 바이트, 쓴 바이트)를 반환합니다.
fn convert_internal(
    path: &Path,
    target: &Path,
    options: &ConvertOptions,
) -> Result<(u64, u64, u64)> {
    let input = File::open(path).map_err(|e| FlatCsvError::FileOpenError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut reader = BufReader::new(input);

    let write_error = |e: io::Error| FlatCsvError::WriteError {
        file: target.to_path_buf(),
        reason: e.to_string(),
    };

    let temp = create_temp_output(&options.output_dir, target).map_err(write_error)?;
    let mut sink = RecordSink::new(
        BufWriter::new(temp),
        options.quote_style,
        options.delimiter,
    );

    let mut line = String::new();
    let mut lines: u64 = 0;
    let mut bytes_read: u64 = 0;

    loop {
        line.clear();
        let n = reader.read_line(&mut line).map_err(|e| {
            if e.kind() == io::ErrorKind::InvalidData {
                FlatCsvError::DecodeError {
                    file: path.to_path_buf(),
                    line: lines + 1,
                }
            } else {
                FlatCsvError::ReadError {
                    file: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;
        if n == 0 {
            break;
        }

        bytes_read += n as u64;
        lines += 1;
        sink.write_line(&line).map_err(write_error)?;
    }

    let buffered = sink.into_inner().map_err(write_error)?;
    let temp = buffered
        .into_inner()
        .map_err(|e| write_error(e.into_error()))?;
    let bytes_written = temp.as_file().metadata().map_err(write_error)?.len();
    temp.persist(target).map_err(|e| write_error(e.error))?;

    Ok((lines, bytes_read, bytes_written))
}
