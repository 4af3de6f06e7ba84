//! 判定执行器
//!
//! 对实例执行某个判定组下的全部规则：布尔判定短路求值，异议收集则逐条执行。
//! 每次调用都重新执行谓词，结果不做任何缓存。

use crate::error::Result;
use crate::registry::Registry;
use crate::rule::Rule;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, instrument};

/// 判定报告
#[derive(Debug, Clone, Serialize)]
pub struct JudgmentReport {
    pub judgment: String,
    pub passed: bool,
    pub objections: Vec<String>,
    pub rules_evaluated: usize,
    pub evaluation_trace: Vec<String>,
    pub evaluation_time_us: u64,
    pub evaluated_at: DateTime<Utc>,
}

/// 判定执行器
#[derive(Debug, Clone, Copy, Default)]
pub struct JudgmentEvaluator {
    /// 是否记录逐条规则的评估追踪
    trace_enabled: bool,
}

impl JudgmentEvaluator {
    pub fn new() -> Self {
        Self {
            trace_enabled: false,
        }
    }

    /// 启用评估追踪
    pub fn with_trace(mut self) -> Self {
        self.trace_enabled = true;
        self
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace_enabled
    }

    /// 实例是否满足判定
    ///
    /// 所有规则通过才返回 true；遇到第一条不通过的规则立即返回 false，
    /// 之后的规则不会执行。没有规则的判定恒为 true。
    #[instrument(skip_all, fields(judgment = %name))]
    pub fn evaluate<T>(&self, registry: &Registry<T>, instance: &T, name: &str) -> Result<bool> {
        let rules = registry.rules_for(name)?;
        metrics::counter!("judgment_evaluations_total", "judgment" => name.trim().to_string())
            .increment(1);

        for (i, rule) in rules.iter().enumerate() {
            let passed = rule.passes(instance)?;
            if self.trace_enabled {
                debug!("{}", trace_line(i, rule, passed));
            }

            if !passed {
                debug!(rule = i, "Judgment short-circuited on failing rule");
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// 收集不通过规则的异议消息
    ///
    /// 所有规则都会执行，异议按注册顺序返回。全部通过时返回空列表。
    #[instrument(skip_all, fields(judgment = %name))]
    pub fn collect_objections<T>(
        &self,
        registry: &Registry<T>,
        instance: &T,
        name: &str,
    ) -> Result<Vec<String>> {
        let mut trace = Vec::new();
        let objections = self.run_all(registry, instance, name, &mut trace)?;

        for line in &trace {
            debug!("{}", line);
        }

        Ok(objections)
    }

    /// 执行判定并生成报告
    #[instrument(skip_all, fields(judgment = %name))]
    pub fn report<T>(
        &self,
        registry: &Registry<T>,
        instance: &T,
        name: &str,
    ) -> Result<JudgmentReport> {
        let start = Instant::now();
        let evaluated_at = Utc::now();

        let mut evaluation_trace = Vec::new();
        let objections = self.run_all(registry, instance, name, &mut evaluation_trace)?;
        let judgment = registry.resolve(name)?.to_string();
        let rules_evaluated = registry.rules_for(name)?.len();

        Ok(JudgmentReport {
            judgment,
            passed: objections.is_empty(),
            objections,
            rules_evaluated,
            evaluation_trace,
            evaluation_time_us: u64::try_from(start.elapsed().as_micros())
                .unwrap_or(u64::MAX),
            evaluated_at,
        })
    }

    /// 逐条执行规则，返回异议列表
    fn run_all<T>(
        &self,
        registry: &Registry<T>,
        instance: &T,
        name: &str,
        trace: &mut Vec<String>,
    ) -> Result<Vec<String>> {
        let rules = registry.rules_for(name)?;
        let judgment = name.trim().to_string();
        metrics::counter!("judgment_evaluations_total", "judgment" => judgment.clone()).increment(1);

        let mut objections = Vec::new();
        for (i, rule) in rules.iter().enumerate() {
            let passed = rule.passes(instance)?;
            if self.trace_enabled {
                trace.push(trace_line(i, rule, passed));
            }

            if !passed {
                objections.push(rule.objection().to_string());
            }
        }

        if !objections.is_empty() {
            metrics::counter!("judgment_objections_total", "judgment" => judgment)
                .increment(objections.len() as u64);
        }

        Ok(objections)
    }
}

fn trace_line<T>(index: usize, rule: &Rule<T>, passed: bool) -> String {
    format!(
        "rules[{}]: {} \"{}\" => {}",
        index,
        if rule.reversal() { "negated" } else { "plain" },
        rule.objection(),
        if passed { "PASSED" } else { "FAILED" }
    )
}
