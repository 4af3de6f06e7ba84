//! Prometheus 指标模块
//!
//! 判定执行器通过 metrics crate 的宏记录指标；这里负责安装 recorder 并描述指标。
//! 未安装 recorder 时，这些宏都是空操作。

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use super::ObservabilityConfig;

/// Metrics 资源句柄
pub struct MetricsHandle {
    handle: PrometheusHandle,
}

impl MetricsHandle {
    /// 以 Prometheus 文本格式渲染指标快照
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// 安装 Prometheus recorder
pub fn init(config: &ObservabilityConfig) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new()
        .add_global_label("service", config.service_name.clone())
        .install_recorder()?;

    describe_judgment_metrics();

    Ok(MetricsHandle { handle })
}

/// 描述判定相关指标，出现在指标输出的 HELP 注释中
fn describe_judgment_metrics() {
    metrics::describe_counter!(
        "judgment_evaluations_total",
        "Total number of judgment evaluations"
    );
    metrics::describe_counter!(
        "judgment_objections_total",
        "Total number of objections raised by failing rules"
    );
}
