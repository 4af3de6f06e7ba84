//! 判定规则
//!
//! 一条规则由谓词、异议消息、取反标记和所属判定名组成，注册后不可变。

use crate::error::{JudgmentError, Result};
use crate::name::JudgmentName;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// 规则谓词：接收实例，返回原始结果
///
/// 原始结果必须是 `true`、`false` 或 `null`（缺失），其余取值无法判定。
pub type Predicate<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// 可作为谓词返回值的类型
///
/// `bool`、`Option<bool>` 和 `()` 对应三种可判定结果，`Value` 原样透传。
/// 数值与字符串保留原值，由规则报告为无法判定；非有限浮点数（NaN、±inf）
/// 以字符串形式保留，不会被当作缺失。
pub trait IntoJudgmentResult {
    fn into_judgment_result(self) -> Value;
}

impl IntoJudgmentResult for bool {
    fn into_judgment_result(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoJudgmentResult for Option<bool> {
    fn into_judgment_result(self) -> Value {
        self.map_or(Value::Null, Value::Bool)
    }
}

impl IntoJudgmentResult for () {
    fn into_judgment_result(self) -> Value {
        Value::Null
    }
}

impl IntoJudgmentResult for Value {
    fn into_judgment_result(self) -> Value {
        self
    }
}

impl IntoJudgmentResult for String {
    fn into_judgment_result(self) -> Value {
        Value::String(self)
    }
}

impl IntoJudgmentResult for &str {
    fn into_judgment_result(self) -> Value {
        Value::String(self.to_string())
    }
}

macro_rules! impl_integer_result {
    ($($ty:ty),*) => {
        $(
            impl IntoJudgmentResult for $ty {
                fn into_judgment_result(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

impl_integer_result!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl IntoJudgmentResult for f64 {
    fn into_judgment_result(self) -> Value {
        serde_json::Number::from_f64(self)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(self.to_string()))
    }
}

impl IntoJudgmentResult for f32 {
    fn into_judgment_result(self) -> Value {
        f64::from(self).into_judgment_result()
    }
}

/// 判定规则
pub struct Rule<T> {
    judgment: JudgmentName,
    predicate: Predicate<T>,
    objection: String,
    reversal: bool,
}

impl<T> Rule<T> {
    pub(crate) fn new(
        judgment: JudgmentName,
        predicate: Predicate<T>,
        objection: String,
        reversal: bool,
    ) -> Self {
        Self {
            judgment,
            predicate,
            objection,
            reversal,
        }
    }

    /// 所属判定名
    pub fn judgment(&self) -> &JudgmentName {
        &self.judgment
    }

    /// 规则不通过时的异议消息
    pub fn objection(&self) -> &str {
        &self.objection
    }

    /// 是否为取反规则（谓词为假或缺失时通过）
    pub fn reversal(&self) -> bool {
        self.reversal
    }

    /// 对实例执行规则，返回是否通过
    ///
    /// 缺失视同 false，再与取反标记做异或。
    pub fn passes(&self, instance: &T) -> Result<bool> {
        let raw = (self.predicate)(instance);
        let truthy = match raw {
            Value::Bool(b) => b,
            Value::Null => false,
            other => {
                tracing::warn!(
                    judgment = %self.judgment,
                    value = %other,
                    "Predicate returned an undeterminable value"
                );
                return Err(JudgmentError::AmbiguousResult {
                    judgment: self.judgment.to_string(),
                    value: other,
                });
            }
        };

        Ok(truthy != self.reversal)
    }

    /// 将规则投影到另一个类型上（子类型继承父类型规则时使用）
    pub(crate) fn project<C, F>(&self, projection: Arc<F>) -> Rule<C>
    where
        T: 'static,
        C: 'static,
        F: Fn(&C) -> &T + Send + Sync + 'static,
    {
        let predicate = Arc::clone(&self.predicate);
        Rule {
            judgment: self.judgment.clone(),
            predicate: Arc::new(move |child: &C| predicate(projection(child))),
            objection: self.objection.clone(),
            reversal: self.reversal,
        }
    }
}

impl<T> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Self {
            judgment: self.judgment.clone(),
            predicate: Arc::clone(&self.predicate),
            objection: self.objection.clone(),
            reversal: self.reversal,
        }
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("judgment", &self.judgment)
            .field("objection", &self.objection)
            .field("reversal", &self.reversal)
            .finish_non_exhaustive()
    }
}
