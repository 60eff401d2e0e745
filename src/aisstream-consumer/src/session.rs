use std::time::Duration;

use aisstream_core::{
    AisTransport, ConnectionId, RawReport, SubscriptionFilter, TransportConnection,
    TransportEvent, TransportEventKind, TransportEventSender,
};
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connecting,
    Active,
}

/// Deadline after which a connection without inbound traffic is torn down.
///
/// Cancelling clears the deadline, a cleared watchdog can never fire.
#[derive(Debug)]
struct Watchdog {
    period: Duration,
    deadline: Option<Instant>,
}

struct LiveConnection<C> {
    id: ConnectionId,
    handle: C,
}

/// Owns the single streaming connection to aisstream and its subscription.
pub struct SessionManager<T: AisTransport> {
    transport: T,
    events: TransportEventSender,
    connection: Option<LiveConnection<T::Connection>>,
    next_id: ConnectionId,
    state: SessionState,
    filter: Option<SubscriptionFilter>,
    watchdog: Watchdog,
}

impl Watchdog {
    fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.period);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl<T: AisTransport> SessionManager<T> {
    pub fn new(
        transport: T,
        events: TransportEventSender,
        watchdog_period: Duration,
    ) -> SessionManager<T> {
        SessionManager {
            transport,
            events,
            connection: None,
            next_id: ConnectionId::first(),
            state: SessionState::Idle,
            filter: None,
            watchdog: Watchdog {
                period: watchdog_period,
                deadline: None,
            },
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    pub fn filter(&self) -> Option<&SubscriptionFilter> {
        self.filter.as_ref()
    }

    pub fn watchdog_deadline(&self) -> Option<Instant> {
        self.watchdog.deadline
    }

    #[instrument(skip_all)]
    pub fn open(&mut self, filter: SubscriptionFilter) {
        if let Some(previous) = self.connection.take() {
            debug!(connection = ?previous.id, "replacing existing connection");
            previous.handle.terminate();
        }

        let id = self.next_id;
        self.next_id = id.next();

        info!(connection = ?id, "opening aisstream connection");
        let handle = self.transport.open(id, self.events.clone());

        self.connection = Some(LiveConnection { id, handle });
        self.filter = Some(filter);
        self.state = SessionState::Connecting;
        self.watchdog.arm();
    }

    pub fn update(&mut self, filter: SubscriptionFilter) {
        match self.state {
            SessionState::Idle => {
                debug!("no live connection, skipping subscription update");
            }
            SessionState::Connecting => {
                self.filter = Some(filter);
            }
            SessionState::Active => {
                self.filter = Some(filter);
                self.send_subscription();
            }
        }
    }

    pub fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            info!(connection = ?connection.id, "closing aisstream connection");
            connection.handle.terminate();
        }
        self.watchdog.cancel();
        self.state = SessionState::Idle;
    }

    pub fn on_watchdog_expired(&mut self) {
        if self.watchdog.deadline.is_none() {
            return;
        }
        warn!(
            "no message received for {:?}, closing connection",
            self.watchdog.period
        );
        self.close();
    }

    /// Applies a transport event, returning the decoded report for inbound messages.
    pub fn handle_event(&mut self, event: TransportEvent) -> Option<RawReport> {
        let TransportEvent { connection, kind } = event;

        if self.connection.as_ref().map(|c| c.id) != Some(connection) {
            debug!(connection = ?connection, "ignoring event from stale connection");
            return None;
        }

        match kind {
            TransportEventKind::Opened => {
                info!(connection = ?connection, "aisstream connection established");
                self.state = SessionState::Active;
                self.send_subscription();
                None
            }
            TransportEventKind::Message(payload) => self.on_message(&payload),
            TransportEventKind::Error(e) => {
                warn!(connection = ?connection, "aisstream connection failed: {e}");
                self.close();
                None
            }
            TransportEventKind::Closed => {
                warn!(connection = ?connection, "aisstream connection closed");
                self.close();
                None
            }
        }
    }

    fn on_message(&mut self, payload: &str) -> Option<RawReport> {
        let value: Value = match serde_json::from_str(payload) {
            Ok(v) => v,
            Err(e) => {
                warn!("received malformed json from aisstream: {e:?}");
                return None;
            }
        };

        self.watchdog.arm();

        match serde_json::from_value(value) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("failed to decode aisstream report: {e:?}");
                None
            }
        }
    }

    fn send_subscription(&self) {
        let (Some(connection), Some(filter)) = (&self.connection, &self.filter) else {
            return;
        };

        let payload = match filter.payload() {
            Ok(p) => p,
            Err(e) => {
                error!("failed to create subscription: {e:?}");
                return;
            }
        };

        if let Err(e) = connection.handle.send(payload) {
            warn!(connection = ?connection.id, "failed to send subscription: {e:?}");
        }
    }
}

/// Resolves when the given watchdog deadline passes, never if there is none.
pub async fn watchdog_expiry(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
