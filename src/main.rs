//! flatcsv - FLAT FILE TO CSV CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

use flatcsv::{
    cli::Args,
    discover::collect_input_files,
    error::FlatCsvError,
    pattern::PatternMatcher,
    processor::{ConvertResult, ConvertStatus},
    report::{write_error_log, BatchReport},
    runner::{plan_outputs, run_batch, BatchEvent},
    stats::Statistics,
};

fn main() -> Result<()> {
    let args = Args::parse();

    // 헤더 출력
    print_header(&args);

    // 패턴 매처 초기화
    let pattern_matcher = PatternMatcher::new(&args.pattern)?;

    // 입력 파일 수집
    let files = collect_input_files(&args.input, &pattern_matcher, args.max_depth)
        .context("입력 파일 수집 실패")?;

    if files.is_empty() {
        println!("{}", "⚠️ 처리할 플랫 파일이 없습니다.".yellow());
        return Ok(());
    }

    println!(
        "  {} 발견된 파일 수: {}",
        "📋".bright_white(),
        files.len().to_string().bright_green()
    );

    // 드라이런 모드
    if args.dry_run {
        print_dry_run(&args, &files);
        return Ok(());
    }

    run_conversion_mode(&args, files)
}

/// 헤더 출력
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🚀 FLAT FILE TO CSV CONVERTER".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 폴더: {:?}", "📂".bright_cyan(), args.input);
    println!("  {} 출력 폴더: {:?}", "📄".bright_green(), args.output);
    println!("  {} 패턴 필터: {}", "🔍".bright_magenta(), args.pattern);
    println!("  {} 인용 방식: {}", "🎯".bright_cyan(), args.quote_style);
    println!("  {} 모드: {}", "⚙️".bright_yellow(), args.mode);

    if let Some(threads) = args.threads {
        println!("  {} 스레드 수: {}", "🧵".bright_white(), threads);
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
    println!("\n{}", "📁 파일 검색 중...".bright_cyan());
}

/// 드라이런 출력
fn print_dry_run(args: &Args, files: &[PathBuf]) {
    println!("\n{}", "📋 처리 예정 파일 목록:".bright_cyan());
    for (i, (path, planned)) in plan_outputs(files, &args.convert_options())
        .iter()
        .enumerate()
    {
        let file_name = path.file_name().unwrap_or_default();
        match planned {
            Ok(target) => println!("  {}. {:?} → {:?}", i + 1, file_name, target),
            Err(e) => println!("  {}. {:?} {}", i + 1, file_name, e.to_string().red()),
        }
    }
    println!(
        "\n{} 총 {} 개의 파일이 처리될 예정입니다.",
        "ℹ️".bright_blue(),
        files.len().to_string().bright_green()
    );
}

/// 변환 모드 실행
fn run_conversion_mode(args: &Args, files: Vec<PathBuf>) -> Result<()> {
    prepare_output_dir(args)?;

    let stats = Statistics::new(files.len());
    let pb = create_progress_bar(files.len());
    let options = args.convert_options();

    // 병렬 처리
    println!("\n{}", "⚡ 병렬 변환 중...".bright_cyan());

    let results = run_batch(files, &options, args.threads, |event| match event {
        BatchEvent::Started(path) => {
            pb.println(start_line(path));
        }
        BatchEvent::Finished(result) => {
            stats.record(result);
            pb.println(result_line(result, args.verbose));
            pb.inc(1);
        }
    })?;

    pb.finish_with_message("완료!");

    let failures: Vec<&ConvertResult> = results.iter().filter(|r| r.error().is_some()).collect();

    // 에러 출력
    print_errors(&failures, args.verbose);

    // 로그 파일 작성
    if let Some(ref log_path) = args.log {
        write_error_log(log_path, &failures)?;
        println!("\n{} 에러 로그 저장: {:?}", "📝".bright_cyan(), log_path);
    }

    // 리포트 작성
    if let Some(ref report_path) = args.report {
        BatchReport::new(&args.input, &args.output, args.quote_style, &results, &stats)
            .write_to(report_path)?;
        println!("\n{} 리포트 저장: {:?}", "📝".bright_cyan(), report_path);
    }

    // 통계 출력
    stats.print_summary();

    println!("\n{} 변환 완료: {:?}\n", "✅".bright_green(), args.output);

    Ok(())
}

/// 출력 폴더 준비
fn prepare_output_dir(args: &Args) -> Result<()> {
    fs::create_dir_all(&args.output).map_err(|e| FlatCsvError::OutputDirError {
        path: args.output.clone(),
        reason: e.to_string(),
    })?;
    Ok(())
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░"),
    );
    pb
}

/// 파일 하나의 변환 시작 한 줄
fn start_line(path: &Path) -> String {
    format!(
        "  {} {:?} 변환 시작",
        "▶".bright_blue(),
        path.file_name().unwrap_or_default()
    )
}

/// 파일 하나의 처리 결과 한 줄
fn result_line(result: &ConvertResult, verbose: bool) -> String {
    let file_name = result.path.file_name().unwrap_or_default();
    let table = result.table_name.as_deref().unwrap_or("?");

    match &result.status {
        ConvertStatus::Converted => format!(
            "  {} {:?} → {}.csv ({}줄)",
            "✓".green(),
            file_name,
            table,
            result.lines
        ),
        ConvertStatus::Skipped => format!(
            "  {} {:?} → {}.csv {}",
            "⏭".yellow(),
            file_name,
            table,
            "(기존 파일 유지)".dimmed()
        ),
        ConvertStatus::Failed(error) => {
            let mut line = format!("  {} {:?} [{}] 변환 실패", "✗".red(), file_name, table);
            if verbose {
                line.push_str(&format!("\n    {}", error.to_string().dimmed()));
            }
            line
        }
    }
}

/// 에러 목록 출력
fn print_errors(failures: &[&ConvertResult], verbose: bool) {
    if failures.is_empty() {
        return;
    }

    println!("\n{}", "❌ 오류 발생 파일:".bright_red());
    for result in failures {
        println!(
            "  {} {:?}",
            "•".red(),
            result.path.file_name().unwrap_or_default()
        );
        if let (true, Some(error)) = (verbose, result.error()) {
            println!("    {}", error.to_string().dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: ConvertStatus) -> ConvertResult {
        ConvertResult {
            path: PathBuf::from("flat_out/TRADE.txt"),
            table_name: Some("TRADE".to_string()),
            output_path: Some(PathBuf::from("csv_data/TRADE.csv")),
            status,
            lines: 42,
            bytes_read: 0,
            bytes_written: 0,
        }
    }

    #[test]
    fn test_result_line() {
        colored::control::set_override(false);

        let line = result_line(&sample(ConvertStatus::Converted), false);
        assert!(line.contains("TRADE.txt"));
        assert!(line.contains("TRADE.csv (42줄)"));

        let line = start_line(Path::new("flat_out/TRADE.txt"));
        assert!(line.contains("TRADE.txt"));
        assert!(line.contains("변환 시작"));

        let line = result_line(&sample(ConvertStatus::Skipped), false);
        assert!(line.contains("기존 파일 유지"));

        let error = FlatCsvError::OutputExists {
            path: PathBuf::from("csv_data/TRADE.csv"),
        };
        let failed = sample(ConvertStatus::Failed(error));
        assert!(!result_line(&failed, false).contains("이미 존재"));
        assert!(result_line(&failed, true).contains("이미 존재"));
    }
}
