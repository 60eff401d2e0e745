use aisstream_core::{
    CoreResult, Delta, IngestionSink,
    core_error::{SinkClosedSnafu, SinkFullSnafu},
};
use async_channel::{Receiver, Sender, TrySendError};
use async_trait::async_trait;
use snafu::ResultExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::instrument;

use crate::error::{
    Result,
    error::{EncodeDeltaSnafu, WriteDeltaSnafu},
};

/// Bounded channel in front of the delta writer.
#[derive(Clone)]
pub struct DeltaSink {
    sender: Sender<Delta>,
}

pub fn delta_channel(buffer_size: usize) -> (DeltaSink, Receiver<Delta>) {
    let (sender, receiver) = async_channel::bounded(buffer_size.max(1));
    (DeltaSink { sender }, receiver)
}

#[async_trait]
impl IngestionSink for DeltaSink {
    async fn handle_delta(&self, delta: Delta) -> CoreResult<()> {
        match self.sender.try_send(delta) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(delta)) => SinkFullSnafu {
                target: delta.context,
            }
            .fail(),
            Err(TrySendError::Closed(_)) => SinkClosedSnafu.fail(),
        }
    }
}

/// Writes every received delta as one line of JSON until all senders are gone.
#[instrument(skip_all)]
pub async fn write_loop(receiver: Receiver<Delta>, mut out: impl AsyncWrite + Unpin) -> Result<()> {
    while let Ok(delta) = receiver.recv().await {
        let mut line = serde_json::to_vec(&delta).context(EncodeDeltaSnafu)?;
        line.push(b'\n');
        out.write_all(&line).await.context(WriteDeltaSnafu)?;
        out.flush().await.context(WriteDeltaSnafu)?;
    }
    Ok(())
}
