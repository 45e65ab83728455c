//! 레코드 검증 모듈
//!
//! 파싱된 원시 레코드 하나를 고정 스키마에 대해 검증하고, 통과한 레코드의
//! 키와 값을 정규화합니다. 검증은 첫 번째 위반에서 즉시 중단되며, 위반
//! 내용은 문제의 필드 이름 또는 원본 값과 함께 반환됩니다.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{ConvertError, Result};

/// 헤더 행의 컬럼 이름을 키로 하는, 파싱 직후의 원시 레코드
///
/// serde_json의 preserve_order 기능으로 키 순회 순서가 원본 컬럼 순서와
/// 같습니다. 필수 필드가 들어 있다는 보장은 없습니다.
pub type RawRecord = Map<String, Value>;

/// 검증을 통과하고 키/값이 정규화된 레코드
///
/// 모든 키는 소문자화 + 트리밍되고, 문자열 값은 트리밍됩니다. 키는
/// 추가되거나 제거되지 않으며 원본 컬럼 순서를 유지합니다.
pub type CleanRecord = Map<String, Value>;

/// 유효 레코드가 반드시 갖춰야 하는 필드 (검사 순서 고정)
pub const REQUIRED_FIELDS: &[&str] = &["id", "name", "email"];

/// 이메일 형식 패턴 (앞뒤 모두 고정된 전체 일치)
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// 레코드 검증기
///
/// 필수 필드 검사는 정규화 이전의 원본 키를 그대로 보므로, `id`, `name`,
/// `email` 키는 소문자로 존재해야 합니다.
///
/// # Examples
/// ```
/// use cjconvert::validator::RecordValidator;
/// use serde_json::json;
///
/// let validator = RecordValidator::new();
/// let record = json!({"id": "1", "name": " John ", "email": "john@example.com", "City": "Seoul"});
/// let clean = validator.validate_record(record.as_object().unwrap()).unwrap();
/// assert_eq!(clean["name"], json!("John"));
/// assert_eq!(clean["city"], json!("Seoul"));
/// ```
#[derive(Debug)]
pub struct RecordValidator {
    required_fields: &'static [&'static str],
}

impl RecordValidator {
    /// 고정 스키마를 사용하는 새 검증기 생성
    pub fn new() -> Self {
        Self {
            required_fields: REQUIRED_FIELDS,
        }
    }

    /// 레코드 하나를 검증하고 정규화된 사본을 반환
    ///
    /// 규칙은 순서대로 적용됩니다:
    /// 1. 필수 필드(id, name, email) 존재 + 공백 아님
    /// 2. email 형식 (원본 값 기준)
    /// 3. id 정수 파싱 (원본 값 기준, 부호/둘레 공백 허용)
    /// 4. 성공 시에만 키/값 정규화
    pub fn validate_record(&self, record: &RawRecord) -> Result<CleanRecord> {
        self.check_required_fields(record)?;
        check_email(text_value(record, "email"))?;
        check_id(text_value(record, "id"))?;

        Ok(clean_record(record))
    }

    /// 필수 필드가 모두 존재하고 공백이 아닌지 확인
    ///
    /// 문자열이 아닌 값은 누락으로 취급합니다.
    fn check_required_fields(&self, record: &RawRecord) -> Result<()> {
        for &field in self.required_fields {
            let present = record
                .get(field)
                .and_then(Value::as_str)
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false);

            if !present {
                return Err(ConvertError::MissingField {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// 레코드에서 문자열 값 꺼내기 (없거나 문자열이 아니면 빈 문자열)
fn text_value<'a>(record: &'a RawRecord, field: &str) -> &'a str {
    record.get(field).and_then(Value::as_str).unwrap_or("")
}

/// 이메일 형식 확인
fn check_email(email: &str) -> Result<()> {
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ConvertError::InvalidEmail {
            value: email.to_string(),
        });
    }
    Ok(())
}

/// ID가 정수로 파싱되는지 확인
fn check_id(id: &str) -> Result<()> {
    if id.trim().parse::<i64>().is_err() {
        return Err(ConvertError::InvalidId {
            value: id.to_string(),
        });
    }
    Ok(())
}

/// 키/값 정규화: 키는 소문자화 + 트리밍, 문자열 값은 트리밍
///
/// 문자열이 아닌 값은 그대로 통과시킵니다. 키 순서는 원본을 따릅니다.
fn clean_record(record: &RawRecord) -> CleanRecord {
    let mut cleaned = CleanRecord::new();
    for (key, value) in record {
        let clean_key = key.trim().to_lowercase();
        let clean_value = match value {
            Value::String(text) => Value::String(text.trim().to_string()),
            other => other.clone(),
        };
        cleaned.insert(clean_key, clean_value);
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_valid_record() {
        let validator = RecordValidator::new();
        let input = record(json!({
            "id": "1",
            "name": "John Doe",
            "email": "john@example.com"
        }));

        let clean = validator.validate_record(&input).unwrap();
        assert_eq!(clean["id"], json!("1"));
        assert_eq!(clean["name"], json!("John Doe"));
        assert_eq!(clean["email"], json!("john@example.com"));
    }

    #[test]
    fn test_missing_field_reports_first_in_fixed_order() {
        let validator = RecordValidator::new();
        // name도 없고 email 형식도 틀렸지만 순서상 name이 먼저 걸려야 함
        let input = record(json!({"id": "1", "email": "broken"}));

        let err = validator.validate_record(&input).unwrap_err();
        match err {
            ConvertError::MissingField { field } => assert_eq!(field, "name"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let validator = RecordValidator::new();
        let input = record(json!({
            "id": "1",
            "name": "   ",
            "email": "a@b.com"
        }));

        let err = validator.validate_record(&input).unwrap_err();
        assert!(matches!(err, ConvertError::MissingField { field } if field == "name"));
    }

    #[test]
    fn test_invalid_email() {
        let validator = RecordValidator::new();
        let input = record(json!({
            "id": "1",
            "name": "Bob Wilson",
            "email": "invalid-email"
        }));

        let err = validator.validate_record(&input).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidEmail { value } if value == "invalid-email"));
    }

    #[test]
    fn test_email_must_match_entire_value() {
        let validator = RecordValidator::new();
        let input = record(json!({
            "id": "1",
            "name": "Bob",
            "email": "x a@b.com y"
        }));

        assert!(validator.validate_record(&input).is_err());
    }

    #[test]
    fn test_invalid_id() {
        let validator = RecordValidator::new();
        let input = record(json!({
            "id": "ABC",
            "name": "Frank Miller",
            "email": "frank@example.com"
        }));

        let err = validator.validate_record(&input).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidId { value } if value == "ABC"));
    }

    #[test]
    fn test_id_accepts_padding_sign_and_leading_zeros() {
        let validator = RecordValidator::new();
        for id in ["007", "-5", " 42 "] {
            let input = record(json!({
                "id": id,
                "name": "Grace",
                "email": "grace@example.com"
            }));
            assert!(
                validator.validate_record(&input).is_ok(),
                "id {id:?} should be accepted"
            );
        }
    }

    #[test]
    fn test_keys_lowercased_and_values_trimmed() {
        let validator = RecordValidator::new();
        let input = record(json!({
            "id": " 1 ",
            "name": "  John Doe  ",
            "email": "john@example.com",
            " Notes ": "  keep me  "
        }));

        let clean = validator.validate_record(&input).unwrap();
        assert_eq!(clean["id"], json!("1"));
        assert_eq!(clean["name"], json!("John Doe"));
        assert_eq!(clean["email"], json!("john@example.com"));
        assert_eq!(clean["notes"], json!("keep me"));
    }

    #[test]
    fn test_required_key_lookup_is_case_sensitive() {
        let validator = RecordValidator::new();
        // 정규화 전의 원본 키를 보므로 대문자 헤더는 누락으로 취급
        let input = record(json!({
            "ID": "1",
            "name": "John",
            "email": "john@example.com"
        }));

        let err = validator.validate_record(&input).unwrap_err();
        assert!(matches!(err, ConvertError::MissingField { field } if field == "id"));
    }

    #[test]
    fn test_email_checked_on_raw_value() {
        let validator = RecordValidator::new();
        // 앞뒤 공백이 있으면 트리밍 전 값이 패턴에 걸리지 않음
        let input = record(json!({
            "id": "1",
            "name": "John",
            "email": " john@example.com "
        }));

        let err = validator.validate_record(&input).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidEmail { .. }));
    }

    #[test]
    fn test_extra_fields_kept_in_source_order() {
        let validator = RecordValidator::new();
        let input = record(json!({
            "id": "1",
            "name": "John",
            "email": "john@example.com",
            "zip": "12345",
            "age": "30"
        }));

        let clean = validator.validate_record(&input).unwrap();
        let keys: Vec<&str> = clean.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name", "email", "zip", "age"]);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let validator = RecordValidator::new();
        let input = record(json!({
            "id": " 7 ",
            "name": " Jane ",
            "email": "jane@example.com",
            "Team ": " QA "
        }));

        let once = validator.validate_record(&input).unwrap();
        let twice = validator.validate_record(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_string_required_value_is_missing() {
        let validator = RecordValidator::new();
        let input = record(json!({
            "id": 1,
            "name": "John",
            "email": "john@example.com"
        }));

        let err = validator.validate_record(&input).unwrap_err();
        assert!(matches!(err, ConvertError::MissingField { field } if field == "id"));
    }
}
