//! 判定注册表
//!
//! `RegistryBuilder` 在类型定义期逐个声明判定组，`build()` 之后得到冻结的
//! `Registry`。冻结后的注册表没有任何可变接口，可在多线程间无锁共享读取。

use crate::error::{JudgmentError, Result};
use crate::evaluator::JudgmentEvaluator;
use crate::name::JudgmentName;
use crate::rule::{IntoJudgmentResult, Predicate, Rule};
use std::sync::Arc;
use tracing::debug;

/// 冻结的判定注册表
///
/// 规则按注册顺序保存，该顺序决定异议消息的输出顺序。
pub struct Registry<T> {
    rules: Vec<Rule<T>>,
    /// 已声明的判定名（按首次声明顺序，去重）
    names: Vec<JudgmentName>,
}

impl<T> Registry<T> {
    /// 创建注册表构建器
    pub fn builder() -> RegistryBuilder<T> {
        RegistryBuilder::new()
    }

    /// 规则总数
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 全部规则（注册顺序）
    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }

    /// 已声明的判定名
    pub fn judgment_names(&self) -> &[JudgmentName] {
        &self.names
    }

    /// 检查判定名是否已声明
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// 解析判定名，未声明时返回 `UnknownJudgment`
    pub fn resolve(&self, name: &str) -> Result<&JudgmentName> {
        let canonical = name.trim();
        self.names
            .iter()
            .find(|n| n.as_str() == canonical)
            .ok_or_else(|| JudgmentError::UnknownJudgment {
                name: canonical.to_string(),
            })
    }

    /// 获取某个判定组下的所有规则（注册顺序）
    ///
    /// 声明过但没有规则的判定返回空列表。
    pub fn rules_for(&self, name: &str) -> Result<Vec<&Rule<T>>> {
        let name = self.resolve(name)?;
        Ok(self
            .rules
            .iter()
            .filter(|rule| rule.judgment() == name)
            .collect())
    }

    /// 返回绑定到单个判定名的查询句柄
    pub fn query(&self, name: &str) -> Result<JudgmentQuery<'_, T>> {
        let name = self.resolve(name)?.clone();
        Ok(JudgmentQuery {
            registry: self,
            name,
        })
    }

    /// 实例是否满足判定（遇到第一条不通过的规则即返回 false）
    pub fn evaluate_judgment(&self, instance: &T, name: &str) -> Result<bool> {
        JudgmentEvaluator::new().evaluate(self, instance, name)
    }

    /// 收集实例在该判定下所有不通过规则的异议消息
    pub fn collect_objections(&self, instance: &T, name: &str) -> Result<Vec<String>> {
        JudgmentEvaluator::new().collect_objections(self, instance, name)
    }

    /// 获取注册表统计信息
    pub fn stats(&self) -> RegistryStats {
        let rules_per_judgment = self
            .names
            .iter()
            .map(|name| {
                let count = self.rules.iter().filter(|r| r.judgment() == name).count();
                (name.clone(), count)
            })
            .collect();

        RegistryStats {
            rules_count: self.rules.len(),
            judgments_count: self.names.len(),
            negated_rules_count: self.rules.iter().filter(|r| r.reversal()).count(),
            rules_per_judgment,
        }
    }
}

impl<T> std::fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("rules", &self.rules)
            .field("names", &self.names)
            .finish()
    }
}

/// 注册表统计信息
#[derive(Debug, Clone)]
pub struct RegistryStats {
    /// 规则总数
    pub rules_count: usize,
    /// 判定组数量
    pub judgments_count: usize,
    /// 取反规则数量
    pub negated_rules_count: usize,
    /// 每个判定组的规则数（声明顺序）
    pub rules_per_judgment: Vec<(JudgmentName, usize)>,
}

/// 绑定到单个判定名的查询句柄
pub struct JudgmentQuery<'a, T> {
    registry: &'a Registry<T>,
    name: JudgmentName,
}

impl<T> JudgmentQuery<'_, T> {
    pub fn name(&self) -> &JudgmentName {
        &self.name
    }

    pub fn check(&self, instance: &T) -> Result<bool> {
        self.registry.evaluate_judgment(instance, self.name.as_str())
    }

    pub fn objections(&self, instance: &T) -> Result<Vec<String>> {
        self.registry.collect_objections(instance, self.name.as_str())
    }
}

/// 注册表构建器
pub struct RegistryBuilder<T> {
    rules: Vec<Rule<T>>,
    names: Vec<JudgmentName>,
}

impl<T> RegistryBuilder<T> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            names: Vec::new(),
        }
    }

    /// 以父类型注册表为起点构建子类型注册表
    ///
    /// 继承的规则通过 `projection` 取得父类型视图后执行，排在子类型自己声明的规则之前。
    pub fn inherit<P, F>(parent: &Registry<P>, projection: F) -> Self
    where
        T: 'static,
        P: 'static,
        F: Fn(&T) -> &P + Send + Sync + 'static,
    {
        let projection = Arc::new(projection);
        let rules: Vec<Rule<T>> = parent
            .rules()
            .iter()
            .map(|rule| rule.project(Arc::clone(&projection)))
            .collect();

        debug!(
            inherited_rules = parent.len(),
            inherited_judgments = parent.judgment_names().len(),
            "Registry inherited from parent"
        );

        Self {
            rules,
            names: parent.judgment_names().to_vec(),
        }
    }

    /// 声明一个判定组
    ///
    /// `block` 中通过 `JudgmentScope` 注册的规则都归属于 `name`。
    /// 重复声明同一个名字会把新规则追加到已有判定组之后。
    pub fn declare_judgment<F>(mut self, name: impl AsRef<str>, block: F) -> Result<Self>
    where
        F: FnOnce(&mut JudgmentScope<'_, T>),
    {
        let name = JudgmentName::new(name)?;
        let before = self.rules.len();

        let mut scope = JudgmentScope {
            name: name.clone(),
            rules: &mut self.rules,
        };
        block(&mut scope);

        let added = self.rules.len() - before;
        if self.names.contains(&name) {
            debug!(judgment = %name, rules = added, "Judgment re-declared, rules appended");
        } else {
            debug!(judgment = %name, rules = added, "Judgment declared");
            self.names.push(name);
        }

        Ok(self)
    }

    /// 冻结注册表
    pub fn build(self) -> Registry<T> {
        Registry {
            rules: self.rules,
            names: self.names,
        }
    }
}

impl<T> Default for RegistryBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// 判定声明作用域
///
/// 只在 `declare_judgment` 的声明块内可用，因此规则不可能在声明块之外注册。
pub struct JudgmentScope<'a, T> {
    name: JudgmentName,
    rules: &'a mut Vec<Rule<T>>,
}

impl<T: 'static> JudgmentScope<'_, T> {
    /// 当前声明中的判定名
    pub fn name(&self) -> &JudgmentName {
        &self.name
    }

    /// 注册规则：谓词为 true 时通过
    pub fn add_rule<F, R>(&mut self, predicate: F, objection: impl Into<String>) -> &mut Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: IntoJudgmentResult,
    {
        self.push(predicate, objection.into(), false)
    }

    /// 注册取反规则：谓词为 false 或缺失时通过
    pub fn add_negated_rule<F, R>(&mut self, predicate: F, objection: impl Into<String>) -> &mut Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: IntoJudgmentResult,
    {
        self.push(predicate, objection.into(), true)
    }

    fn push<F, R>(&mut self, predicate: F, objection: String, reversal: bool) -> &mut Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: IntoJudgmentResult,
    {
        let predicate: Predicate<T> =
            Arc::new(move |instance: &T| predicate(instance).into_judgment_result());
        self.rules
            .push(Rule::new(self.name.clone(), predicate, objection, reversal));
        self
    }
}
