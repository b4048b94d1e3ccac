//! Entrypoint of the customer city-count job.
//!
//! Connection parameters come from the environment (`KAFKA_BROKERS`,
//! `KAFKA_TOPIC`, `KAFKA_GROUP_ID`) with local-development defaults. The
//! job subscribes at the latest offset, so only records produced after
//! startup are counted. It runs until terminated externally.
use citycount::build_dataflow;
use citycount::config::JobConfig;
use citycount::sink::CityCountSink;
use freshet::runtime::{MicroBatchRuntime, StreamProvider};
use freshet_kafka::KafkaSource;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = JobConfig::from_env();
    info!(
        brokers = %config.brokers,
        topic = %config.topic,
        group_id = %config.group_id,
        "starting customer city-count job"
    );

    let runtime = MicroBatchRuntime::builder().build(move |provider: &mut dyn StreamProvider| {
        let source = KafkaSource::builder()
            .broker(&config.brokers)
            .topic(&config.topic)
            .group_id(&config.group_id)
            .auto_offset_reset("latest")
            .build();
        build_dataflow(provider, source, CityCountSink::stdout());
    });
    runtime.execute()?;
    Ok(())
}
