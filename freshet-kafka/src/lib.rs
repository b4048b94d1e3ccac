mod record;
mod source;

pub use record::KafkaRecord;
pub use source::{KafkaSource, KafkaSourcePartition};
