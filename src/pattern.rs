//! 패턴 매칭 모듈
//!
//! glob 패턴을 사용한 CSV 파일 이름 필터링을 담당합니다.

use glob::Pattern;

use crate::error::{ConvertError, Result};

/// 컴파일된 패턴 매처
#[derive(Default)]
pub struct PatternMatcher {
    pattern: Option<Pattern>,
}

impl PatternMatcher {
    /// 새 패턴 매처 생성
    ///
    /// # Arguments
    /// * `pattern` - 글로브 패턴 문자열 (None이면 모든 파일 매칭)
    ///
    /// # Returns
    /// 컴파일된 `PatternMatcher` 또는 에러
    ///
    /// # Examples
    /// ```
    /// use cjconvert::pattern::PatternMatcher;
    ///
    /// let matcher = PatternMatcher::new(Some("customers_*".to_string())).unwrap();
    /// assert!(matcher.matches("customers_east.csv"));
    /// assert!(!matcher.matches("orders.csv"));
    /// ```
    pub fn new(pattern: Option<String>) -> Result<Self> {
        let compiled = match pattern {
            Some(ref p) => Some(
                Pattern::new(p)
                    .map_err(|_| ConvertError::InvalidPattern { pattern: p.clone() })?,
            ),
            None => None,
        };

        Ok(Self { pattern: compiled })
    }

    /// 파일 이름이 패턴과 일치하는지 확인
    ///
    /// # Arguments
    /// * `file_name` - 검사할 파일 이름
    ///
    /// # Returns
    /// 패턴 일치 여부 (패턴이 없으면 항상 true)
    pub fn matches(&self, file_name: &str) -> bool {
        match &self.pattern {
            Some(p) => p.matches(file_name),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matcher_with_wildcard() {
        let matcher = PatternMatcher::new(Some("*_2024_*".to_string())).unwrap();
        assert!(matcher.matches("sales_2024_q1.csv"));
        assert!(matcher.matches("inventory_2024_full.csv"));
        assert!(!matcher.matches("sales_2023_q4.csv"));
        assert!(!matcher.matches("2024.csv"));
    }

    #[test]
    fn test_pattern_matcher_with_question_mark() {
        let matcher = PatternMatcher::new(Some("data?.csv".to_string())).unwrap();
        assert!(matcher.matches("data1.csv"));
        assert!(matcher.matches("dataA.csv"));
        assert!(!matcher.matches("data.csv"));
        assert!(!matcher.matches("data12.csv"));
    }

    #[test]
    fn test_pattern_matcher_with_brackets() {
        let matcher = PatternMatcher::new(Some("batch[0-9].csv".to_string())).unwrap();
        assert!(matcher.matches("batch1.csv"));
        assert!(matcher.matches("batch9.csv"));
        assert!(!matcher.matches("batchA.csv"));
    }

    #[test]
    fn test_pattern_matcher_none() {
        let matcher = PatternMatcher::new(None).unwrap();
        assert!(matcher.matches("anything.csv"));
        assert!(matcher.matches("customers_east.csv"));
    }

    #[test]
    fn test_pattern_matcher_invalid() {
        let result = PatternMatcher::new(Some("[invalid".to_string()));
        assert!(result.is_err());
    }
}
