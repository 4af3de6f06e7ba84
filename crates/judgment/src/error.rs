//! 判定错误类型
//!
//! 两类错误都属于调用方的编程错误，不可重试，也不会在内部被吞掉。

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JudgmentError {
    /// 查询了类型上从未声明过的判定名
    #[error("`{name}` is a name without registration")]
    UnknownJudgment { name: String },

    /// 谓词返回了 true / false / null 以外的值
    #[error("result of judgment is other than true, false, null, it can't be determined ({value})")]
    AmbiguousResult { judgment: String, value: Value },

    #[error("invalid judgment name `{name}`: {reason}")]
    InvalidName { name: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, JudgmentError>;

impl JudgmentError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownJudgment { .. } => "UNKNOWN_JUDGMENT",
            Self::AmbiguousResult { .. } => "AMBIGUOUS_RESULT",
            Self::InvalidName { .. } => "INVALID_JUDGMENT_NAME",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_judgment_message() {
        let err = JudgmentError::UnknownJudgment {
            name: "no_name".to_string(),
        };
        assert_eq!(err.to_string(), "`no_name` is a name without registration");
        assert_eq!(err.code(), "UNKNOWN_JUDGMENT");
    }

    #[test]
    fn test_ambiguous_result_message() {
        let err = JudgmentError::AmbiguousResult {
            judgment: "key".to_string(),
            value: json!(1),
        };
        assert_eq!(
            err.to_string(),
            "result of judgment is other than true, false, null, it can't be determined (1)"
        );
        assert_eq!(err.code(), "AMBIGUOUS_RESULT");
    }
}
