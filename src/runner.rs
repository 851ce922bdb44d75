//! 병렬 변환 실행 모듈
//!
//! 파일마다 하나의 변환 작업을 제한된 스레드 풀에 분배하고 모두 끝날 때까지 기다립니다.

use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{FlatCsvError, Result};
use crate::naming::{derive_table_name, output_path};
use crate::processor::{convert_file, ConvertOptions, ConvertResult};

/// 앞선 파일과 테이블 이름이 겹치는 파일 찾기
///
/// 목록 순서상 먼저 나온 파일이 테이블 이름을 가져가고, 뒤의 파일은 중복 에러가 됩니다.
pub fn find_table_conflicts(files: &[PathBuf], extension: &str) -> HashMap<PathBuf, FlatCsvError> {
    let mut owners: HashMap<String, &PathBuf> = HashMap::new();
    let mut conflicts = HashMap::new();

    for file in files {
        let Ok(table) = derive_table_name(file, extension) else {
            continue;
        };

        match owners.get(&table) {
            Some(first) => {
                let error = FlatCsvError::DuplicateTableName {
                    file: file.clone(),
                    table,
                    first: (*first).clone(),
                };
                conflicts.insert(file.clone(), error);
            }
            None => {
                owners.insert(table, file);
            }
        }
    }

    conflicts
}

/// 작업 진행 이벤트
#[derive(Debug, Clone, Copy)]
pub enum BatchEvent<'a> {
    /// 파일 하나의 변환 시작
    Started(&'a Path),
    /// 파일 하나의 변환 종료 (성공, 건너뜀, 실패)
    Finished(&'a ConvertResult),
}

/// 변환 없이 각 파일의 출력 경로 계산 (드라이런)
///
/// 파일 시스템에는 아무것도 쓰지 않습니다. 테이블 이름을 만들 수 없거나 앞선 파일과
/// 겹치면 해당 에러를 돌려줍니다.
pub fn plan_outputs(
    files: &[PathBuf],
    options: &ConvertOptions,
) -> Vec<(PathBuf, Result<PathBuf>)> {
    let conflicts = find_table_conflicts(files, &options.extension);

    files
        .iter()
        .map(|path| {
            let planned = match conflicts.get(path) {
                Some(error) => Err(error.clone()),
                None => derive_table_name(path, &options.extension)
                    .map(|table| output_path(&options.output_dir, &table)),
            };
            (path.clone(), planned)
        })
        .collect()
}

/// 파일 목록 일괄 변환
///
/// # Arguments
/// * `files` - 변환할 입력 파일 목록
/// * `options` - 파일 단위 변환 옵션
/// * `threads` - 스레드 풀 크기 (None이면 CPU 코어 수)
/// * `on_event` - 각 작업의 시작과 끝에 호출되는 콜백
///
/// # Returns
/// 입력 순서와 같은 순서의 변환 결과 목록
pub fn run_batch<F>(
    files: Vec<PathBuf>,
    options: &ConvertOptions,
    threads: Option<usize>,
    on_event: F,
) -> Result<Vec<ConvertResult>>
where
    F: Fn(BatchEvent<'_>) + Sync + Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or(0))
        .build()
        .map_err(|e| FlatCsvError::ThreadPoolError {
            reason: e.to_string(),
        })?;

    let conflicts = find_table_conflicts(&files, &options.extension);

    let results = pool.install(|| {
        files
            .into_par_iter()
            .map(|path| {
                on_event(BatchEvent::Started(&path));
                let result = match conflicts.get(&path) {
                    Some(error) => {
                        let table = derive_table_name(&path, &options.extension).ok();
                        ConvertResult::failed(path, table, error.clone())
                    }
                    None => convert_file(path, options),
                };
                on_event(BatchEvent::Finished(&result));
                result
            })
            .collect()
    });

    Ok(results)
}
