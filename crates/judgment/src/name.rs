//! 判定名
//!
//! 判定名在构造时即完成规范化与校验，之后以廉价克隆的共享字符串形式
//! 在规则、注册表和报告之间传递。

use crate::error::{JudgmentError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// 规范化后的判定名（如 `publishable`）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JudgmentName(Arc<str>);

impl JudgmentName {
    /// 校验并规范化判定名
    ///
    /// 去掉首尾空白后，名称必须非空、不以数字开头，且只包含字母、数字和下划线。
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let raw = name.as_ref();
        let canonical = raw.trim();

        let reason = match canonical.chars().next() {
            None => Some("name must not be empty"),
            Some(c) if c.is_numeric() => Some("name must not start with a digit"),
            Some(_) if !canonical.chars().all(|c| c.is_alphanumeric() || c == '_') => {
                Some("name may only contain letters, digits and `_`")
            }
            Some(_) => None,
        };

        if let Some(reason) = reason {
            return Err(JudgmentError::InvalidName {
                name: raw.to_string(),
                reason,
            });
        }

        Ok(Self(Arc::from(canonical)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for JudgmentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JudgmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for JudgmentName {
    type Err = JudgmentError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for JudgmentName {
    type Error = JudgmentError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for JudgmentName {
    type Error = JudgmentError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<JudgmentName> for String {
    fn from(name: JudgmentName) -> Self {
        name.0.to_string()
    }
}
