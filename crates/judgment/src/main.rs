//! 判定演示程序
//!
//! 加载配置、初始化可观测性，对示例房源执行 `publishable` 判定并输出 JSON 报告。

use anyhow::Result;
use judgment::{Judgment, JudgmentEvaluator, judgments};
use judgment_shared::config::AppConfig;
use judgment_shared::observability;
use tracing::info;

/// 示例房源
struct Listing {
    title: String,
    status: i32,
    price: Option<u32>,
}

judgments! {
    Listing {
        publishable {
            add_rule(|l| l.status == 1, "status is not `1`");
            add_negated_rule(|l| l.price.is_none(), "price is missing");
            add_rule(|l| (!l.title.is_empty()).then_some(true), "title is empty");
        }
        archivable {
            add_negated_rule(|l| l.status == 1, "listing is still active");
        }
    }
}

fn main() -> Result<()> {
    let config = AppConfig::load("judgment-demo").unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let guard = observability::init(&config.effective_observability())?;

    let evaluator = if config.evaluation.trace_enabled {
        JudgmentEvaluator::new().with_trace()
    } else {
        JudgmentEvaluator::new()
    };

    info!(
        environment = %config.environment,
        trace = evaluator.trace_enabled(),
        "Starting judgment demo..."
    );

    let stats = Listing::judgments().stats();
    info!(
        rules = stats.rules_count,
        judgments = stats.judgments_count,
        negated = stats.negated_rules_count,
        "Listing judgments registered"
    );

    let listings = [
        Listing {
            title: "Harbour view flat".to_string(),
            status: 1,
            price: Some(1200),
        },
        Listing {
            title: String::new(),
            status: 0,
            price: None,
        },
    ];

    for listing in &listings {
        let publishable = listing.publishable()?;
        let report = listing.judgment_report("publishable", &evaluator)?;
        info!(
            title = %listing.title,
            publishable,
            archivable = listing.archivable()?,
            objections = report.objections.len(),
            "Listing judged"
        );
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if let Some(snapshot) = guard.render_metrics() {
        println!("{}", snapshot);
    }

    info!("Judgment demo complete");
    Ok(())
}
