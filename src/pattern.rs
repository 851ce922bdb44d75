//! 패턴 매칭 모듈
//!
//! glob 패턴을 사용한 입력 파일 이름 필터링을 담당합니다.

use glob::Pattern;

use crate::error::{FlatCsvError, Result};

/// 컴파일된 패턴 매처
pub struct PatternMatcher {
    pattern: Pattern,
}

impl PatternMatcher {
    /// 새 패턴 매처 생성
    ///
    /// # Arguments
    /// * `pattern` - 글로브 패턴 문자열
    ///
    /// # Examples
    /// ```
    /// use flatcsv::pattern::PatternMatcher;
    ///
    /// let matcher = PatternMatcher::new("*.txt").unwrap();
    /// assert!(matcher.matches("ACCOUNT_PERMISSION.txt"));
    /// assert!(!matcher.matches("ACCOUNT_PERMISSION.csv"));
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern).map_err(|_| FlatCsvError::InvalidPattern {
            pattern: pattern.to_string(),
        })?;

        Ok(Self { pattern })
    }

    /// 파일 이름이 패턴과 일치하는지 확인
    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.matches(file_name)
    }
}
