//! cjconvert - CSV FOLDER TO JSON CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use walkdir::WalkDir;

use cjconvert::{
    cli::Args,
    converter::{ConvertOptions, FileConverter},
    error::ConvertError,
    pattern::PatternMatcher,
    stats::Statistics,
};

fn main() -> Result<()> {
    let args = Args::parse();

    // 구분자 확인
    let delimiter = args.delimiter_byte().ok_or_else(|| {
        anyhow::anyhow!("구분자는 단일 ASCII 문자여야 합니다: {:?}", args.delimiter)
    })?;

    // 입출력 디렉토리 준비
    setup_directories(&args)?;

    // 헤더 출력
    print_header(&args);

    // 패턴 매처 초기화
    let pattern_matcher =
        PatternMatcher::new(args.pattern.clone()).map_err(|e| anyhow::anyhow!("{}", e))?;

    // CSV 파일 수집
    let csv_files = collect_csv_files(&args, &pattern_matcher)?;

    if csv_files.is_empty() {
        println!("{}", "⚠️ 처리할 CSV 파일이 없습니다.".yellow());
        return Ok(());
    }

    println!(
        "  {} 발견된 파일 수: {}",
        "📋".bright_white(),
        csv_files.len().to_string().bright_green()
    );

    // 드라이런 모드
    if args.dry_run {
        print_dry_run(&csv_files);
        return Ok(());
    }

    // 통계 초기화
    let mut stats = Statistics::new(csv_files.len());

    run_conversion(&args, delimiter, csv_files, &mut stats)
}

/// 입출력 디렉토리 준비 (없으면 생성)
fn setup_directories(args: &Args) -> Result<()> {
    fs::create_dir_all(&args.input)
        .with_context(|| format!("입력 폴더 생성 실패: {:?}", args.input))?;
    fs::create_dir_all(&args.output)
        .with_context(|| format!("출력 폴더 생성 실패: {:?}", args.output))?;
    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🚀 CSV FOLDER TO JSON CONVERTER".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 폴더: {:?}", "📂".bright_cyan(), args.input);
    println!("  {} 출력 폴더: {:?}", "📄".bright_green(), args.output);

    if args.delimiter != ',' {
        println!("  {} 구분자: {:?}", "⚙️".bright_yellow(), args.delimiter);
    }

    if let Some(ref pattern) = args.pattern {
        println!("  {} 패턴 필터: {}", "🔍".bright_magenta(), pattern);
    }

    if let Some(depth) = args.max_depth {
        println!("  {} 최대 깊이: {}", "📏".bright_white(), depth);
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

/// CSV 파일 수집 (사전순 정렬)
fn collect_csv_files(args: &Args, pattern_matcher: &PatternMatcher) -> Result<Vec<PathBuf>> {
    let max_depth = args.max_depth.unwrap_or(1);

    let mut csv_files: Vec<PathBuf> = WalkDir::new(&args.input)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .map(|s| s.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .filter(|e| {
            e.path()
                .file_name()
                .and_then(|s| s.to_str())
                .map(|s| pattern_matcher.matches(s))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    csv_files.sort();

    Ok(csv_files)
}

/// 드라이런 출력
fn print_dry_run(csv_files: &[PathBuf]) {
    println!("\n{}", "📋 변환 예정 파일 목록:".bright_cyan());
    for (i, path) in csv_files.iter().enumerate() {
        println!("  {}. {:?}", i + 1, path.file_name().unwrap_or_default());
    }
    println!(
        "\n{} 총 {} 개의 파일이 변환될 예정입니다.",
        "ℹ️".bright_blue(),
        csv_files.len().to_string().bright_green()
    );
}

/// 변환 실행
///
/// 파일 하나의 실패는 기록만 하고 다음 파일로 넘어갑니다.
fn run_conversion(
    args: &Args,
    delimiter: u8,
    csv_files: Vec<PathBuf>,
    stats: &mut Statistics,
) -> Result<()> {
    let pb = create_progress_bar(csv_files.len());

    println!("\n{}", "⚡ 변환 중...".bright_cyan());

    let options = ConvertOptions::new(args.output.clone()).with_delimiter(delimiter);
    let mut converter = FileConverter::new(options);
    let mut errors: Vec<(PathBuf, ConvertError)> = Vec::new();

    for path in csv_files {
        let file_size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        match converter.process_file(&path) {
            Ok(entry) => {
                stats.increment_success();
                stats.add_records(entry.record_count);
                stats.add_bytes_read(file_size);

                let written = fs::metadata(&entry.output).map(|m| m.len()).unwrap_or(0);
                stats.add_bytes_written(written);

                if args.verbose {
                    println!(
                        "  {} {:?} ({} 레코드)",
                        "✓".green(),
                        path.file_name().unwrap_or_default(),
                        entry.record_count
                    );
                }
            }
            Err(e) => {
                stats.increment_error();
                errors.push((path, e));
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("완료!");

    // 에러 출력
    print_errors(&errors, args.verbose);

    // 로그 파일 작성
    if let Some(ref log_path) = args.log {
        write_error_log(log_path, &errors)?;
    }

    // 통계 출력
    stats.print_summary();

    println!(
        "\n{} 변환 완료: {} 개의 문서가 {:?} 에 저장되었습니다.\n",
        "✅".bright_green(),
        converter.ledger().len(),
        args.output
    );

    Ok(())
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("█▓▒░"),
    );
    pb
}

/// 에러 목록 출력
fn print_errors(errors: &[(PathBuf, ConvertError)], verbose: bool) {
    if errors.is_empty() {
        return;
    }

    println!("\n{}", "❌ 오류 발생 파일:".bright_red());
    for (path, error) in errors {
        println!("  {} {:?}", "•".red(), path.file_name().unwrap_or_default());
        if verbose {
            println!("    {}", error.to_string().dimmed());
        }
    }
}

/// 에러 로그 파일 작성
fn write_error_log(log_path: &PathBuf, errors: &[(PathBuf, ConvertError)]) -> Result<()> {
    let mut log_file = File::create(log_path)?;

    writeln!(log_file, "cjconvert 에러 로그")?;
    writeln!(
        log_file,
        "생성 시간: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(log_file, "총 에러 수: {}", errors.len())?;
    writeln!(log_file, "{}", "=".repeat(50))?;

    for (path, error) in errors {
        writeln!(log_file, "\n파일: {:?}", path)?;
        writeln!(log_file, "에러: {}", error)?;
    }

    println!("\n{} 에러 로그 저장: {:?}", "📝".bright_cyan(), log_path);

    Ok(())
}
