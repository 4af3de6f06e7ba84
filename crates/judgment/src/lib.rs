//! 声明式判定
//!
//! 为任意类型挂载具名的判定规则组，提供：
//! - 判定组声明 DSL（`declare_judgment` / `add_rule` / `add_negated_rule`）
//! - 类型级冻结注册表，支持子类型继承
//! - 短路布尔判定与完整异议收集
//! - 可选的逐条评估追踪与判定报告

pub mod error;
pub mod evaluator;
pub mod mixin;
pub mod name;
pub mod registry;
pub mod rule;

pub use error::{JudgmentError, Result};
pub use evaluator::{JudgmentEvaluator, JudgmentReport};
pub use mixin::Judgment;
pub use name::JudgmentName;
pub use registry::{JudgmentQuery, JudgmentScope, Registry, RegistryBuilder, RegistryStats};
pub use rule::{IntoJudgmentResult, Predicate, Rule};
