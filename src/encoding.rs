//! 인코딩 감지 모듈
//!
//! 파일 앞부분을 후보 인코딩 목록으로 시험 디코딩하여 텍스트 인코딩을
//! 추정하고, 추정된 인코딩으로 전체 본문을 디코딩합니다.

use std::fs;
use std::io::Read;
use std::path::Path;

use encoding_rs::{DecoderResult, Encoding, UTF_8, WINDOWS_1252};

use crate::error::{ConvertError, Result};

/// 시험 디코딩에 사용하는 접두부 길이 (바이트)
pub const SNIFF_LEN: usize = 1000;

/// 후보 인코딩 우선순위 목록
///
/// utf-8을 먼저 시도하고, 실패하면 windows-1252로 넘어갑니다.
/// latin-1, cp1252, iso-8859-1은 Encoding Standard에서 모두 windows-1252로
/// 해석되고 windows-1252는 모든 바이트를 받아들이므로 사실상의 폴백입니다.
pub fn candidate_encodings() -> [&'static Encoding; 2] {
    [UTF_8, WINDOWS_1252]
}

/// 파일의 텍스트 인코딩을 추정
///
/// 파일 앞 `SNIFF_LEN` 바이트를 후보 순서대로 시험 디코딩하여 처음으로
/// 깨끗하게 디코딩되는 인코딩을 반환합니다. 모든 후보가 실패하면 첫 번째
/// 후보로 폴백합니다. 이 추정은 접두부만 보므로, 이후 전체 읽기 단계에서
/// 디코딩이 실패할 수 있습니다.
pub fn detect_encoding(path: &Path) -> Result<&'static Encoding> {
    let file = fs::File::open(path).map_err(|e| ConvertError::ReadError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64)
        .read_to_end(&mut prefix)
        .map_err(|e| ConvertError::ReadError {
            file: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(sniff(&prefix))
}

/// 접두부 바이트열을 시험 디코딩하여 인코딩 선택
pub fn sniff(prefix: &[u8]) -> &'static Encoding {
    let candidates = candidate_encodings();
    for encoding in candidates {
        if decodes_cleanly(encoding, prefix) {
            return encoding;
        }
    }
    candidates[0]
}

/// 주어진 인코딩으로 접두부가 오류 없이 디코딩되는지 검사
///
/// last = false: 접두부 경계에서 잘린 멀티바이트 문자는 오류로 치지 않습니다.
fn decodes_cleanly(encoding: &'static Encoding, bytes: &[u8]) -> bool {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(bytes.len())
        .unwrap_or(bytes.len() * 3 + 4);
    let mut decoded = String::with_capacity(capacity);

    let (result, _read) =
        decoder.decode_to_string_without_replacement(bytes, &mut decoded, false);
    matches!(result, DecoderResult::InputEmpty)
}

/// 인코딩 감지를 거쳐 파일 전체를 문자열로 읽기
///
/// 본문 전체는 추정된 인코딩으로 엄격하게 디코딩합니다. 접두부는 깨끗했지만
/// 뒷부분에서 잘못된 바이트가 나오면 `EncodingError`를 반환합니다.
pub fn decode_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| ConvertError::ReadError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let encoding = sniff(&bytes[..bytes.len().min(SNIFF_LEN)]);
    match encoding.decode_without_bom_handling_and_without_replacement(&bytes) {
        Some(text) => Ok(text.into_owned()),
        None => Err(ConvertError::EncodingError {
            file: path.to_path_buf(),
            encoding: encoding.name(),
        }),
    }
}
