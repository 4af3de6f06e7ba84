//! 判定属性测试
//!
//! 使用 proptest 验证以下不变量：
//! - 布尔判定与异议收集结果一致
//! - 异议按注册顺序输出
//! - 取反与无法判定结果的处理

use judgment::{IntoJudgmentResult, JudgmentError, Registry};
use proptest::prelude::*;
use serde_json::{Value, json};

/// 单条规则的描述：谓词原始结果 + 是否取反
#[derive(Debug, Clone)]
struct RuleShape {
    raw: Option<bool>,
    reversal: bool,
}

impl RuleShape {
    fn passes(&self) -> bool {
        self.raw.unwrap_or(false) != self.reversal
    }
}

fn arb_rule_shape() -> impl Strategy<Value = RuleShape> {
    (prop::option::of(any::<bool>()), any::<bool>())
        .prop_map(|(raw, reversal)| RuleShape { raw, reversal })
}

fn arb_ambiguous_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(|n| json!(n)),
        prop::num::f64::ANY.prop_map(f64::into_judgment_result),
        "[a-z]{0,8}".prop_map(Value::String),
        Just(json!([])),
        Just(json!({"k": true})),
    ]
}

/// 按描述构建只有一个判定组 `key` 的注册表，异议为 `rule-<序号>`
fn build_registry(shapes: &[RuleShape]) -> Registry<()> {
    Registry::builder()
        .declare_judgment("key", |j| {
            for (i, shape) in shapes.iter().enumerate() {
                let raw = shape.raw;
                let objection = format!("rule-{}", i);
                if shape.reversal {
                    j.add_negated_rule(move |_: &()| raw, objection);
                } else {
                    j.add_rule(move |_: &()| raw, objection);
                }
            }
        })
        .unwrap()
        .build()
}

proptest! {
    #[test]
    fn evaluate_agrees_with_objections(shapes in prop::collection::vec(arb_rule_shape(), 0..16)) {
        let registry = build_registry(&shapes);

        let passed = registry.evaluate_judgment(&(), "key").unwrap();
        let objections = registry.collect_objections(&(), "key").unwrap();

        prop_assert_eq!(passed, shapes.iter().all(RuleShape::passes));
        prop_assert_eq!(passed, objections.is_empty());
    }

    #[test]
    fn objections_follow_registration_order(shapes in prop::collection::vec(arb_rule_shape(), 0..16)) {
        let registry = build_registry(&shapes);

        let expected: Vec<String> = shapes
            .iter()
            .enumerate()
            .filter(|(_, shape)| !shape.passes())
            .map(|(i, _)| format!("rule-{}", i))
            .collect();

        prop_assert_eq!(registry.collect_objections(&(), "key").unwrap(), expected);
    }

    #[test]
    fn negation_law(raw in prop::option::of(any::<bool>())) {
        let plain = build_registry(&[RuleShape { raw, reversal: false }]);
        let negated = build_registry(&[RuleShape { raw, reversal: true }]);

        prop_assert_eq!(plain.evaluate_judgment(&(), "key").unwrap(), raw == Some(true));
        prop_assert_eq!(negated.evaluate_judgment(&(), "key").unwrap(), raw != Some(true));
    }

    #[test]
    fn ambiguity_law(value in arb_ambiguous_value(), reversal in any::<bool>()) {
        let raw = value.clone();
        let registry = Registry::<()>::builder()
            .declare_judgment("key", move |j| {
                if reversal {
                    j.add_negated_rule(move |_: &()| raw.clone(), "ambiguous");
                } else {
                    j.add_rule(move |_: &()| raw.clone(), "ambiguous");
                }
            })
            .unwrap()
            .build();

        for result in [
            registry.evaluate_judgment(&(), "key").map(|_| ()),
            registry.collect_objections(&(), "key").map(|_| ()),
        ] {
            match result {
                Err(JudgmentError::AmbiguousResult { value: reported, .. }) => {
                    prop_assert_eq!(&reported, &value);
                }
                other => prop_assert!(false, "expected ambiguous result, got {:?}", other),
            }
        }
    }

    #[test]
    fn unknown_name_law(name in "[a-z_][a-z0-9_]{0,12}") {
        prop_assume!(name != "key");
        let registry = build_registry(&[RuleShape { raw: Some(true), reversal: false }]);

        let err = registry.evaluate_judgment(&(), &name).unwrap_err();
        prop_assert!(err.to_string().contains(&name));
        let err = registry.collect_objections(&(), &name).unwrap_err();
        prop_assert!(err.to_string().contains(&name));
    }
}
