use async_trait::async_trait;

use crate::{ConnectionId, CoreResult, Delta, TransportEventSender};

/// Opens streaming connections to the report source.
///
/// Opening never blocks, the connection reports its progress as [crate::TransportEvent]s tagged
/// with the given id.
pub trait AisTransport: Send + Sync {
    type Connection: TransportConnection;

    fn open(&self, id: ConnectionId, events: TransportEventSender) -> Self::Connection;
}

pub trait TransportConnection: Send {
    /// Queues a payload for sending, fails if the connection has already gone away.
    fn send(&self, payload: String) -> CoreResult<()>;
    /// Tears the connection down immediately.
    fn terminate(self);
}

#[async_trait]
pub trait IngestionSink: Send + Sync {
    async fn handle_delta(&self, delta: Delta) -> CoreResult<()>;
}
