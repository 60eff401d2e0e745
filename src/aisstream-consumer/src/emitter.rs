use aisstream_core::{CoreResult, Delta, IngestionSink, Normalized};
use chrono::Utc;

/// Stamps normalized reports and hands them to the ingestion sink.
pub struct Emitter<S> {
    sink: S,
}

impl<S: IngestionSink> Emitter<S> {
    pub fn new(sink: S) -> Emitter<S> {
        Emitter { sink }
    }

    pub async fn publish(&self, normalized: Normalized) -> CoreResult<()> {
        self.sink
            .handle_delta(Delta::new(normalized, Utc::now()))
            .await
    }
}
