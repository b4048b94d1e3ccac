//! Job configuration read from the environment

use std::env;

/// Connection parameters for the customer event topic
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Comma-separated Kafka bootstrap servers
    pub brokers: String,
    /// Topic carrying the JSON customer events
    pub topic: String,
    /// Consumer group of this job
    pub group_id: String,
}

impl JobConfig {
    /// Read the config from `KAFKA_BROKERS`, `KAFKA_TOPIC` and
    /// `KAFKA_GROUP_ID`, falling back to local-development defaults
    pub fn from_env() -> Self {
        Self {
            brokers: env::var("KAFKA_BROKERS").unwrap_or_else(|_| "localhost:9092".to_owned()),
            topic: env::var("KAFKA_TOPIC").unwrap_or_else(|_| "customer_topic".to_owned()),
            group_id: env::var("KAFKA_GROUP_ID")
                .unwrap_or_else(|_| "customer_consumer_group".to_owned()),
        }
    }
}
