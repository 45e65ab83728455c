//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

/// cjconvert CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "cjconvert",
    author = "YourName <your@email.com>",
    version,
    about = "CSV FOLDER TO JSON CONVERTER - 폴더 내 CSV 파일들을 검증된 JSON 문서로 변환하는 CLI 도구",
    long_about = r#"
CSV FOLDER TO JSON CONVERTER
============================

지정된 폴더 내의 모든 CSV 파일을 탐색하여
파일마다 검증된 JSON 문서 하나를 생성합니다.

특징:
  • 레코드 단위 검증 (필수 필드, 이메일/ID 형식)
  • 인코딩 자동 감지 (UTF-8, Windows-1252)
  • 진행률 표시 및 상세 통계
  • 파일 단위 실패 격리 (한 파일의 오류가 전체를 멈추지 않음)
  • 상세한 오류 보고

예제:
  cjconvert
  cjconvert -i ./sample_data -o ./output
  cjconvert -i ./data -p "customers_*" --verbose
  cjconvert -i ./data -d ";" --dry-run
"#
)]
pub struct Args {
    /// CSV 파일들이 있는 입력 폴더 경로
    #[arg(short, long, default_value = "sample_data")]
    pub input: PathBuf,

    /// 변환된 JSON 문서를 기록할 출력 폴더 경로
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// 파일 이름 패턴 필터 (glob 형식, 예: "customers_*", "data?.csv")
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// CSV 필드 구분자 (단일 ASCII 문자)
    #[arg(short, long, default_value = ",")]
    pub delimiter: char,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 변환 없이 처리될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 최대 폴더 탐색 깊이 (기본값: 1, 하위 폴더 제외)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// 에러 로그 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,
}

impl Args {
    /// 구분자를 단일 바이트로 반환 (ASCII가 아니면 None)
    pub fn delimiter_byte(&self) -> Option<u8> {
        if self.delimiter.is_ascii() {
            Some(self.delimiter as u8)
        } else {
            None
        }
    }
}
