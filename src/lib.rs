//! cjconvert - CSV FOLDER TO JSON CONVERTER
//!
//! 폴더 내 CSV 파일들을 파일마다 하나의 검증된 JSON 문서로 변환하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - ✅ **레코드 검증**: 필수 필드(id, name, email), 이메일/ID 형식 검사
//! - 🧹 **데이터 정규화**: 키 소문자화, 값 트리밍 후 출력
//! - 🔤 **인코딩 감지**: UTF-8 / Windows-1252 자동 판별
//! - 📊 **진행률 표시**: 처리 진행 상황을 시각적으로 확인
//! - 📈 **상세 통계**: 성공/실패 파일 수, 변환 레코드 수, 입출력 용량 표시
//! - 🔍 **패턴 필터링**: glob 형식의 파일 이름 필터링
//! - 🧪 **드라이런 모드**: 실제 변환 없이 처리될 파일 목록 미리 확인
//! - 🛡️ **실패 격리**: 파일 하나의 오류가 전체 실행을 멈추지 않음
//! - 🎨 **컬러 출력**: 가독성 높은 컬러 터미널 출력
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법 (sample_data -> output)
//! cjconvert
//!
//! # 폴더 지정
//! cjconvert -i ./data -o ./converted
//!
//! # 패턴 필터 + 상세 출력
//! cjconvert -i ./data -p "customers_*" --verbose
//! ```

pub mod cli;
pub mod converter;
pub mod encoding;
pub mod error;
pub mod pattern;
pub mod stats;
pub mod validator;

// Re-exports for convenient access
pub use cli::Args;
pub use converter::{ConvertOptions, FileConverter, LedgerEntry, OutputDocument};
pub use error::{ConvertError, Result};
pub use pattern::PatternMatcher;
pub use stats::{format_bytes, Statistics};
pub use validator::{CleanRecord, RawRecord, RecordValidator};
