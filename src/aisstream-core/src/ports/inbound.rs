use tokio::sync::mpsc::UnboundedSender;

/// Identifies one transport connection so events from a recycled connection can be told apart
/// from the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn first() -> ConnectionId {
        ConnectionId(0)
    }

    pub fn next(self) -> ConnectionId {
        ConnectionId(self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportEvent {
    pub connection: ConnectionId,
    pub kind: TransportEventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransportEventKind {
    /// The connection is established and ready to receive the subscription.
    Opened,
    Message(String),
    Error(String),
    /// The connection is gone, no further events follow for it.
    Closed,
}

pub type TransportEventSender = UnboundedSender<TransportEvent>;

impl TransportEvent {
    pub fn new(connection: ConnectionId, kind: TransportEventKind) -> TransportEvent {
        TransportEvent { connection, kind }
    }
}
