//! Literal term substitution, the last-resort fallback tier

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One `(pattern, replacement)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Substring to find
    pub pattern: String,
    /// Text to put in its place
    pub replacement: String,
}

impl Term {
    /// Create a term pair
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Apply every term in order as a plain substring replacement.
///
/// Later terms see the output of earlier ones, so a table must list longer
/// patterns before shorter patterns they contain. Returns the new text and
/// whether any pattern occurred. Empty patterns are skipped.
#[must_use]
pub fn apply_terms(text: &str, terms: &[Term]) -> (String, bool) {
    let mut out = text.to_string();
    let mut fired = false;
    for term in terms {
        if term.pattern.is_empty() || !out.contains(&term.pattern) {
            continue;
        }
        out = out.replace(&term.pattern, &term.replacement);
        fired = true;
    }
    (out, fired)
}

/// Ordered term table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermTable {
    terms: Vec<Term>,
}

impl TermTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term at the lowest priority
    pub fn push(&mut self, pattern: impl Into<String>, replacement: impl Into<String>) {
        self.terms.push(Term::new(pattern, replacement));
    }

    /// Terms in application order
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of terms
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Apply the table to `text`, see [`apply_terms`]
    #[must_use]
    pub fn apply(&self, text: &str) -> (String, bool) {
        apply_terms(text, &self.terms)
    }

    /// Load a term file.
    ///
    /// One term per line as `pattern<TAB>replacement` or `pattern = replacement`;
    /// blank lines and lines starting with `#` are skipped. File order is kept.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|(line, message)| Error::InvalidConfig {
            message: format!("{}:{line}: {message}", path.display()),
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, (usize, String)> {
        let mut table = Self::new();
        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some((pattern, replacement)) = line
                .split_once('\t')
                .or_else(|| line.split_once(" = "))
            else {
                return Err((i + 1, format!("expected 'pattern<TAB>replacement': {trimmed}")));
            };
            let pattern = pattern.trim();
            if pattern.is_empty() {
                return Err((i + 1, "empty pattern".to_string()));
            }
            table.push(pattern, replacement.trim());
        }
        Ok(table)
    }

    /// Built-in Korean → Simplified Chinese UI and system terms.
    ///
    /// Compound forms precede their shorter stems (특수공격 before 공격), so
    /// 특수공격 becomes 特攻. The older stem-first ordering of this table
    /// produced the half-translated 특수攻击 instead.
    #[must_use]
    pub fn korean_to_simplified_chinese() -> Self {
        const TERMS: &[(&str, &str)] = &[
            ("포켓몬", "宝可梦"),
            ("타입", "属性"),
            ("레벨", "等级"),
            ("HP", "HP"),
            ("MP", "MP"),
            ("특수공격", "特攻"),
            ("특수방어", "特防"),
            ("공격", "攻击"),
            ("방어", "防御"),
            ("특공", "特攻"),
            ("특방", "特防"),
            ("스피드", "速度"),
            ("상태", "状态"),
            ("기술", "招式"),
            ("이름", "名称"),
            ("메모", "备注"),
            ("라이선스", "许可证"),
            ("트레이너", "训练家"),
            ("박스", "盒子"),
            ("가방", "背包"),
            ("아이템", "道具"),
            ("없음", "无"),
            ("도감", "图鉴"),
            ("진화", "进化"),
            ("리본", "缎带"),
            ("경고", "警告"),
            ("에러", "错误"),
            ("설정", "设置"),
            ("선택", "选择"),
            ("확인", "确定"),
            ("취소", "取消"),
            ("저장", "保存"),
            ("불러오기", "载入"),
        ];
        TERMS.iter().fold(Self::new(), |mut table, (pattern, replacement)| {
            table.push(*pattern, *replacement);
            table
        })
    }
}

impl FromIterator<Term> for TermTable {
    fn from_iter<T: IntoIterator<Item = Term>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}
