use crate::config::{Config, Settings};
use crate::error::ConfigError;
use crate::rank::select_top;
use crate::report::{Report, render};
use crate::system::aggregator::Aggregator;

/// One full pass over the host: validate, collect, rank, render.
///
/// Invalid configuration is reported before any collector runs.
pub async fn run(config: &Config) -> Result<Report, ConfigError> {
    let settings = config.validate()?;
    let aggregator = Aggregator::system(settings.sample_interval, settings.collector_timeout);
    Ok(run_with(&aggregator, &settings).await)
}

pub async fn run_with(aggregator: &Aggregator, settings: &Settings) -> Report {
    let snapshot = aggregator.aggregate().await;

    let ranked = select_top(snapshot.processes.value(), settings.top, settings.rank_by);
    tracing::debug!(
        candidates = snapshot.processes.value().len(),
        selected = ranked.len(),
        key = %settings.rank_by,
        "ranked processes"
    );

    render(&snapshot, &ranked, &settings.render_options())
}
