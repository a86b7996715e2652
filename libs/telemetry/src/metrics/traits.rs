use prometheus::{Encoder, Registry, TextEncoder};

/// A bundle of metrics living in its own registry.
pub trait TelemetryMetrics: Clone + Send + Sync + 'static {
    fn registry(&self) -> &Registry;

    fn metrics(&self) -> Option<Self> {
        Some(self.clone())
    }

    /// Renders the registry in the Prometheus text exposition format.
    fn gather_metrics(&self) -> String {
        let mut buffer = Vec::new();
        if let Err(e) =
            TextEncoder::new().encode(&self.registry().gather(), &mut buffer)
        {
            tracing::error!("could not encode prometheus metrics: {}", e);
            return String::new();
        }

        String::from_utf8(buffer).unwrap_or_else(|e| {
            tracing::error!("prometheus metrics could not be from_utf8'd: {}", e);
            String::new()
        })
    }
}
