use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

pub const RESULT_SUCCESS: &str = "success";
pub const RESULT_VALIDATION_ERROR: &str = "validation_error";

/// Business metrics for the calculation endpoint, served at `/metrics`.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    calculations: IntCounterVec,
    duration: HistogramVec,
    drinks_recommended: Histogram,
    user_weight: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let calculations = IntCounterVec::new(
            Opts::new("calculations_total", "Total calculations performed"),
            &["gender", "result_type"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new("calculation_duration_seconds", "Time spent on calculations"),
            &["operation"],
        )?;
        let drinks_recommended = Histogram::with_opts(
            HistogramOpts::new("drinks_recommended", "Number of drinks recommended")
                .buckets(vec![0.0, 1.0, 2.0, 3.0, 5.0, 10.0, 15.0, 20.0]),
        )?;
        let user_weight = Histogram::with_opts(
            HistogramOpts::new("user_weight_kg", "User weights in kg")
                .buckets(vec![40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 120.0, 150.0]),
        )?;

        registry.register(Box::new(calculations.clone()))?;
        registry.register(Box::new(duration.clone()))?;
        registry.register(Box::new(drinks_recommended.clone()))?;
        registry.register(Box::new(user_weight.clone()))?;

        Ok(Self {
            registry,
            calculations,
            duration,
            drinks_recommended,
            user_weight,
        })
    }

    pub fn record_outcome(&self, gender: &str, result_type: &str) {
        self.calculations
            .with_label_values(&[gender, result_type])
            .inc();
    }

    pub fn observe_duration(&self, operation: &str, elapsed: Duration) {
        self.duration
            .with_label_values(&[operation])
            .observe(elapsed.as_secs_f64());
    }

    pub fn record_success(&self, weight_kg: f64, drinks: f64) {
        self.drinks_recommended.observe(drinks);
        self.user_weight.observe(weight_kg);
    }

    /// Prometheus text exposition of everything registered.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| prometheus::Error::Msg(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_recorded_series() {
        let metrics = Metrics::new().unwrap();
        metrics.record_outcome("female", RESULT_SUCCESS);
        metrics.observe_duration("drinks_to_target", Duration::from_millis(2));
        metrics.record_success(62.0, 3.4);

        let text = metrics.render().unwrap();
        assert!(text.contains(r#"calculations_total{gender="female",result_type="success"} 1"#));
        assert!(text.contains(r#"calculation_duration_seconds_count{operation="drinks_to_target"} 1"#));
        assert!(text.contains("drinks_recommended_count 1"));
        assert!(text.contains("user_weight_kg_count 1"));
    }
}
