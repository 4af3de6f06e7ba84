//! 判定能力接入
//!
//! 宿主类型实现 [`Judgment`] 即获得 `evaluate_judgment` / `collect_objections`。
//! 通常通过 [`judgments!`](crate::judgments) 宏一次性声明注册表和便捷查询方法。

use crate::error::Result;
use crate::evaluator::{JudgmentEvaluator, JudgmentReport};
use crate::registry::Registry;

/// 具备判定能力的宿主类型
pub trait Judgment: Sized + 'static {
    /// 该类型的冻结注册表
    fn judgments() -> &'static Registry<Self>;

    /// 是否满足判定 `name`
    fn evaluate_judgment(&self, name: &str) -> Result<bool> {
        Self::judgments().evaluate_judgment(self, name)
    }

    /// 判定 `name` 下所有不通过规则的异议消息
    fn collect_objections(&self, name: &str) -> Result<Vec<String>> {
        Self::judgments().collect_objections(self, name)
    }

    fn judgment_report(&self, name: &str, evaluator: &JudgmentEvaluator) -> Result<JudgmentReport> {
        evaluator.report(Self::judgments(), self, name)
    }
}

/// 为类型声明判定注册表，并生成每个判定的便捷查询方法
///
/// 每个判定写作 `判定名 { 规则; ... }`，规则为 `add_rule(谓词, 异议)` 或
/// `add_negated_rule(谓词, 异议)`。查询方法默认与判定名同名，
/// 写作 `判定名 as 方法名 { ... }` 可另取方法名。
///
/// ```
/// use judgment::{Judgment, judgments};
///
/// struct Listing {
///     status: i32,
///     price: Option<u32>,
/// }
///
/// judgments! {
///     Listing {
///         publishable {
///             add_rule(|l| l.status == 1, "status is not `1`");
///             add_negated_rule(|l| l.price.is_none(), "price is missing");
///         }
///         archivable as is_archivable {
///             add_negated_rule(|l| l.status == 1, "listing is still active");
///         }
///     }
/// }
///
/// let listing = Listing { status: 1, price: None };
/// assert!(!listing.publishable().unwrap());
/// assert!(!listing.is_archivable().unwrap());
/// assert_eq!(
///     listing.collect_objections("publishable").unwrap(),
///     vec!["price is missing".to_string()]
/// );
/// ```
#[macro_export]
macro_rules! judgments {
    (@query $name:ident) => {
        $crate::judgments!(@query $name $name);
    };
    (@query $name:ident $query:ident) => {
        pub fn $query(&self) -> $crate::Result<bool> {
            <Self as $crate::Judgment>::evaluate_judgment(self, stringify!($name))
        }
    };
    (
        $ty:ty {
            $(
                $name:ident $(as $query:ident)? {
                    $( $kind:ident ( $predicate:expr, $objection:expr $(,)? ) );* $(;)?
                }
            )*
        }
    ) => {
        impl $crate::Judgment for $ty {
            fn judgments() -> &'static $crate::Registry<Self> {
                static REGISTRY: ::std::sync::LazyLock<$crate::Registry<$ty>> =
                    ::std::sync::LazyLock::new(|| {
                        let build = || -> $crate::Result<$crate::Registry<$ty>> {
                            ::std::result::Result::Ok(
                                $crate::Registry::<$ty>::builder()
                                    $(
                                        .declare_judgment(stringify!($name), |_scope| {
                                            $( _scope.$kind($predicate, $objection); )*
                                        })?
                                    )*
                                    .build(),
                            )
                        };
                        build().unwrap_or_else(|err| {
                            panic!("invalid judgments for `{}`: {}", stringify!($ty), err)
                        })
                    });
                &REGISTRY
            }
        }

        impl $ty {
            $(
                $crate::judgments!(@query $name $($query)?);
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Subject {
        value: i64,
    }

    judgments! {
        Subject {
            key {
                add_rule(|s| s.value == 1, "value is not `1`");
            }
            not_key as is_not_key {
                add_negated_rule(|s| s.value == 1, "value is `1`");
            }
            empty_group {}
            undeterminable {
                add_rule(|_| json!(1), "1");
            }
        }
    }

    #[test]
    fn test_registry_installed_once() {
        let first = Subject::judgments() as *const Registry<Subject>;
        let second = Subject::judgments() as *const Registry<Subject>;
        assert_eq!(first, second);
        assert_eq!(Subject::judgments().len(), 3);
        assert_eq!(Subject::judgments().judgment_names().len(), 4);
    }

    #[test]
    fn test_queries_named_after_judgments() {
        let one = Subject { value: 1 };
        let two = Subject { value: 2 };

        assert!(one.key().unwrap());
        assert!(!two.key().unwrap());
        assert!(one.empty_group().unwrap());
        assert!(one.undeterminable().is_err());
    }

    #[test]
    fn test_renamed_query() {
        assert!(!Subject { value: 1 }.is_not_key().unwrap());
        assert!(Subject { value: 2 }.is_not_key().unwrap());
    }

    #[test]
    fn test_trait_methods() {
        let two = Subject { value: 2 };

        assert!(!two.evaluate_judgment("key").unwrap());
        assert_eq!(
            two.collect_objections("key").unwrap(),
            vec!["value is not `1`".to_string()]
        );
        assert!(two.evaluate_judgment("no_name").is_err());

        let report = two
            .judgment_report("key", &JudgmentEvaluator::new())
            .unwrap();
        assert!(!report.passed);
    }
}
