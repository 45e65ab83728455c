//! CSV 파일 변환 모듈
//!
//! 개별 CSV 파일의 읽기, 레코드 검증, JSON 문서 조립과 기록을 담당합니다.
//! 변환에 성공한 파일마다 장부에 항목 하나가 추가되며, 장부 길이는 기록된
//! 출력 문서 수와 항상 같습니다.

use chrono::Local;
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::encoding;
use crate::error::{ConvertError, Result};
use crate::validator::{CleanRecord, RawRecord, RecordValidator};

/// 파일 이름 정리 패턴 (영숫자, 점, 밑줄, 하이픈 외 전부 치환 대상)
static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]").unwrap());

/// 출력 문서의 메타데이터 블록
#[derive(Debug, Serialize)]
pub struct DocumentMetadata {
    /// 문서에 담긴 레코드 수
    pub record_count: usize,
    /// 변환 시각 (로컬, ISO-8601)
    pub processed_at: String,
}

/// 출력 JSON 문서
///
/// 직렬화 시 `metadata` 다음에 `data`가 오며, 각 레코드의 키 순서는
/// 원본 컬럼 순서를 따릅니다.
#[derive(Debug, Serialize)]
pub struct OutputDocument {
    pub metadata: DocumentMetadata,
    pub data: Vec<CleanRecord>,
}

/// 변환에 성공한 파일의 장부 항목
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    /// 원본 CSV 파일 경로
    pub input: PathBuf,
    /// 기록된 JSON 파일 경로
    pub output: PathBuf,
    /// 문서에 담긴 레코드 수
    pub record_count: usize,
    /// 처리 상태 표시
    pub status: String,
}

/// CSV 변환 옵션
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// 변환된 JSON 문서를 기록할 디렉토리
    pub output_dir: PathBuf,
    /// CSV 필드 구분자
    pub delimiter: u8,
}

impl ConvertOptions {
    /// 기본 옵션 생성 (구분자는 쉼표)
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            delimiter: b',',
        }
    }

    /// 필드 구분자 설정
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// CSV 파일 변환기
///
/// 파일 하나당 디코딩, 파싱, 검증, 문서 기록을 순서대로 수행합니다.
/// 인스턴스 하나가 실행 한 번의 장부를 소유합니다.
#[derive(Debug)]
pub struct FileConverter {
    options: ConvertOptions,
    validator: RecordValidator,
    ledger: Vec<LedgerEntry>,
}

impl FileConverter {
    /// 새 변환기 생성
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            validator: RecordValidator::new(),
            ledger: Vec::new(),
        }
    }

    /// 단일 CSV 파일을 JSON 문서로 변환
    ///
    /// 단계는 순서대로:
    /// 1. 인코딩 감지 + 전체 디코딩
    /// 2. CSV 파싱 (첫 행을 헤더로 사용)
    /// 3. 레코드별 검증 (실패한 레코드는 조용히 제외)
    /// 4. 생존 레코드가 없으면 `EmptyResult`로 실패
    /// 5. 문서 조립 후 보기 좋게 직렬화하여 기록
    ///
    /// 장부 항목은 기록까지 성공한 경우에만 추가됩니다.
    ///
    /// # Arguments
    /// * `input` - 변환할 CSV 파일 경로
    ///
    /// # Returns
    /// 추가된 장부 항목, 실패 시 단계별 원인을 담은 에러
    pub fn process_file(&mut self, input: &Path) -> Result<LedgerEntry> {
        let raw_records = self.read_csv_file(input)?;
        let clean_records = self.validate_records(&raw_records);

        if clean_records.is_empty() {
            return Err(ConvertError::EmptyResult {
                file: input.to_path_buf(),
            });
        }

        let document = build_document(clean_records);
        let output = self.output_path(input);
        write_json_file(&output, &document)?;

        let entry = LedgerEntry {
            input: input.to_path_buf(),
            output,
            record_count: document.metadata.record_count,
            status: "success".to_string(),
        };
        self.ledger.push(entry.clone());

        Ok(entry)
    }

    /// 지금까지 성공한 변환의 장부
    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    /// CSV 파일을 읽어 원시 레코드 목록으로 파싱
    ///
    /// 행 길이가 헤더와 다르거나 따옴표가 닫히지 않으면 파일 전체가
    /// `ParseError`로 실패합니다.
    fn read_csv_file(&self, input: &Path) -> Result<Vec<RawRecord>> {
        let content = encoding::decode_file(input)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| ConvertError::ParseError {
                file: input.to_path_buf(),
                reason: e.to_string(),
            })?
            .clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| ConvertError::ParseError {
                file: input.to_path_buf(),
                reason: e.to_string(),
            })?;

            let mut record = RawRecord::new();
            for (header, field) in headers.iter().zip(row.iter()) {
                record.insert(header.to_string(), Value::String(field.to_string()));
            }
            records.push(record);
        }

        Ok(records)
    }

    /// 레코드별 검증 수행, 실패한 레코드는 결과에서 제외
    fn validate_records(&self, records: &[RawRecord]) -> Vec<CleanRecord> {
        records
            .iter()
            .filter_map(|record| self.validator.validate_record(record).ok())
            .collect()
    }

    /// 입력 파일 이름에서 출력 경로 유도
    fn output_path(&self, input: &Path) -> PathBuf {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.options
            .output_dir
            .join(json_file_name(&sanitize_filename(&name)))
    }
}

/// 메타데이터를 붙여 출력 문서 조립
fn build_document(records: Vec<CleanRecord>) -> OutputDocument {
    OutputDocument {
        metadata: DocumentMetadata {
            record_count: records.len(),
            processed_at: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        },
        data: records,
    }
}

/// 문서를 보기 좋은 JSON으로 직렬화하여 기록
///
/// 들여쓰기 2칸, 비ASCII 문자는 이스케이프 없이 그대로 기록됩니다.
fn write_json_file(output: &Path, document: &OutputDocument) -> Result<()> {
    let json =
        serde_json::to_string_pretty(document).map_err(|e| ConvertError::SerializeError {
            file: output.to_path_buf(),
            reason: e.to_string(),
        })?;

    fs::write(output, json).map_err(|e| ConvertError::WriteError {
        file: output.to_path_buf(),
        reason: e.to_string(),
    })
}

/// 파일 이름에서 안전하지 않은 문자를 밑줄로 치환
pub fn sanitize_filename(name: &str) -> String {
    UNSAFE_CHARS.replace_all(name, "_").into_owned()
}

/// 꼬리의 `.csv`를 `.json`으로 교체 (대소문자 무시, 없으면 덧붙임)
fn json_file_name(name: &str) -> String {
    let len = name.len();
    let stem = if len >= 4
        && name.is_char_boundary(len - 4)
        && name[len - 4..].eq_ignore_ascii_case(".csv")
    {
        &name[..len - 4]
    } else {
        name
    };
    format!("{}.json", stem)
}
