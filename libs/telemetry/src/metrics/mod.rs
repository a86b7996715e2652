mod traits;

use std::sync::Arc;

pub use traits::TelemetryMetrics;

#[derive(Clone)]
pub struct Telemetry<M: TelemetryMetrics> {
    metrics: Option<Arc<M>>,
}

impl<M: TelemetryMetrics> Telemetry<M> {
    pub fn new(metrics: Option<M>) -> Arc<Self> {
        Arc::new(Self {
            metrics: metrics.map(Arc::new),
        })
    }

    pub fn base_metrics(&self) -> Option<M> {
        self.metrics.clone().and_then(|m| m.metrics())
    }

    pub fn maybe_use_metrics<F>(&self, f: F)
    where
        F: Fn(&M),
    {
        if let Some(metrics) = &self.metrics {
            f(metrics);
        }
    }

    /// Service metrics followed by the default registry (process collector).
    pub fn get_metrics(&self) -> String {
        use prometheus::Encoder;

        let Some(metrics) = &self.metrics else {
            return "# EOF\n".to_string();
        };

        let mut result = metrics.gather_metrics();

        let mut buffer = Vec::new();
        if let Err(e) = prometheus::TextEncoder::new()
            .encode(&prometheus::gather(), &mut buffer)
        {
            tracing::error!("could not encode default prometheus metrics: {}", e);
        }
        match String::from_utf8(buffer) {
            Ok(default_metrics) => result.push_str(&default_metrics),
            Err(e) => tracing::error!(
                "prometheus metrics could not be from_utf8'd: {}",
                e
            ),
        }

        result.push_str("# EOF\n");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prometheus::{IntCounter, Registry};

    #[derive(Clone)]
    struct TestMetrics {
        registry: Registry,
        hits: IntCounter,
    }

    impl TestMetrics {
        fn new() -> Self {
            let registry = Registry::new();
            let hits = IntCounter::new("test_hits", "hits").unwrap();
            registry.register(Box::new(hits.clone())).unwrap();
            Self { registry, hits }
        }
    }

    impl TelemetryMetrics for TestMetrics {
        fn registry(&self) -> &Registry {
            &self.registry
        }
    }

    #[test]
    fn test_without_metrics_only_eof() {
        let telemetry = Telemetry::<TestMetrics>::new(None);
        assert_eq!(telemetry.get_metrics(), "# EOF\n");
        assert!(telemetry.base_metrics().is_none());
    }

    #[test]
    fn test_maybe_use_metrics_updates_registry() {
        let telemetry = Telemetry::new(Some(TestMetrics::new()));
        telemetry.maybe_use_metrics(|m| m.hits.inc());
        telemetry.maybe_use_metrics(|m| m.hits.inc());

        let output = telemetry.get_metrics();
        assert!(output.contains("test_hits 2"));
        assert!(output.ends_with("# EOF\n"));
    }
}
