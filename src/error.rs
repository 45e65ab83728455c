//! 에러 타입 정의 모듈
//!
//! cjconvert에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 레코드 수준 에러(필수 필드 누락, 이메일/ID 형식 오류)는 해당 레코드만
//! 탈락시키고, 파일 수준 에러(파싱/입출력/인코딩 실패, 유효 레코드 없음)는
//! 해당 파일의 변환 전체를 실패시킵니다. 실패 원인은 버리지 않고 태그된
//! 값으로 호출자에게 전달됩니다.

use std::path::PathBuf;
use thiserror::Error;

/// cjconvert에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 필수 필드가 없거나 공백뿐임 (레코드 수준)
    #[error("필수 필드가 없거나 비어 있습니다: {field}")]
    MissingField { field: String },

    /// 이메일 형식 불일치 (레코드 수준)
    #[error("이메일 형식이 올바르지 않습니다: {value}")]
    InvalidEmail { value: String },

    /// ID가 정수가 아님 (레코드 수준)
    #[error("ID 형식이 올바르지 않습니다: {value}")]
    InvalidId { value: String },

    /// 유효한 레코드가 하나도 남지 않음 (파일 수준)
    #[error("변환할 유효 레코드가 없습니다: {file:?}")]
    EmptyResult { file: PathBuf },

    /// CSV 구조 파싱 실패 (파일 수준)
    #[error("CSV 파싱 실패 ({file:?}): {reason}")]
    ParseError { file: PathBuf, reason: String },

    /// 입력 파일 읽기 실패 (파일 수준)
    #[error("파일을 읽을 수 없습니다 ({file:?}): {reason}")]
    ReadError { file: PathBuf, reason: String },

    /// 출력 파일 쓰기 실패 (파일 수준)
    #[error("파일 쓰기 실패 ({file:?}): {reason}")]
    WriteError { file: PathBuf, reason: String },

    /// 감지된 인코딩으로 본문 디코딩 실패 (파일 수준)
    #[error("디코딩 실패 ({file:?}): {encoding} 인코딩으로 읽을 수 없습니다")]
    EncodingError {
        file: PathBuf,
        encoding: &'static str,
    },

    /// JSON 직렬화 실패 (파일 수준)
    #[error("JSON 직렬화 실패 ({file:?}): {reason}")]
    SerializeError { file: PathBuf, reason: String },

    /// 유효하지 않은 파일 이름 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },
}

impl ConvertError {
    /// 레코드 수준 에러 여부 (레코드만 탈락, 파일은 계속 처리)
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            ConvertError::MissingField { .. }
                | ConvertError::InvalidEmail { .. }
                | ConvertError::InvalidId { .. }
        )
    }
}

/// cjconvert 결과 타입 별칭
pub type Result<T> = std::result::Result<T, ConvertError>;
