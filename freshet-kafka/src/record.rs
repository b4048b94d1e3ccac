use bon::Builder;
use rdkafka::{Message, message::BorrowedMessage};

/// A single record as received from Kafka
#[derive(Builder, Debug, Clone)]
#[builder(on(String, into))]
pub struct KafkaRecord {
    pub topic: String,
    pub partition: Option<i32>,
    pub payload: Vec<u8>,
    pub key: Option<Vec<u8>>,
    pub timestamp: Option<i64>,
}

impl KafkaRecord {
    pub(crate) fn from_message(msg: &BorrowedMessage<'_>) -> Option<Self> {
        let payload = msg.payload().map(|x| x.to_vec())?;
        Some(Self {
            topic: msg.topic().to_owned(),
            partition: Some(msg.partition()),
            payload,
            key: msg.key().map(|x| x.to_vec()),
            timestamp: msg.timestamp().to_millis(),
        })
    }
}
