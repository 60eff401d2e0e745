use aisstream_core::{
    AisTransport, ConnectionId, CoreResult, TransportConnection, TransportEvent,
    TransportEventKind, TransportEventSender, core_error::ConnectionGoneSnafu,
};
use futures::{SinkExt, StreamExt};
use snafu::OptionExt;
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    task::JoinHandle,
};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, instrument};

/// Connects to the aisstream websocket endpoint.
pub struct WebSocketTransport {
    url: String,
}

/// Handle to a websocket running on its own task.
pub struct WebSocketConnection {
    outgoing: UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl WebSocketTransport {
    pub fn new(url: String) -> WebSocketTransport {
        WebSocketTransport { url }
    }
}

impl AisTransport for WebSocketTransport {
    type Connection = WebSocketConnection;

    fn open(&self, id: ConnectionId, events: TransportEventSender) -> WebSocketConnection {
        let (outgoing, outgoing_rx) = unbounded_channel();
        let task = tokio::spawn(run_connection(self.url.clone(), id, events, outgoing_rx));
        WebSocketConnection { outgoing, task }
    }
}

impl TransportConnection for WebSocketConnection {
    fn send(&self, payload: String) -> CoreResult<()> {
        self.outgoing.send(payload).ok().context(ConnectionGoneSnafu)
    }

    fn terminate(self) {
        self.task.abort();
    }
}

#[instrument(skip(url, events, outgoing))]
async fn run_connection(
    url: String,
    id: ConnectionId,
    events: TransportEventSender,
    mut outgoing: UnboundedReceiver<String>,
) {
    let emit = |kind| {
        // The receiving side only goes away on shutdown.
        let _ = events.send(TransportEvent::new(id, kind));
    };

    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _)) => stream,
        Err(e) => {
            emit(TransportEventKind::Error(e.to_string()));
            emit(TransportEventKind::Closed);
            return;
        }
    };

    emit(TransportEventKind::Opened);
    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            payload = outgoing.recv() => {
                let Some(payload) = payload else {
                    break;
                };
                if let Err(e) = write.send(Message::text(payload)).await {
                    emit(TransportEventKind::Error(e.to_string()));
                    break;
                }
            }
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    emit(TransportEventKind::Message(text.to_string()));
                }
                Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                    Ok(text) => emit(TransportEventKind::Message(text)),
                    Err(e) => debug!("dropping non utf-8 binary frame: {e:?}"),
                },
                Some(Ok(Message::Close(frame))) => {
                    debug!("server closed connection: {frame:?}");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    emit(TransportEventKind::Error(e.to_string()));
                    break;
                }
                None => break,
            }
        }
    }

    emit(TransportEventKind::Closed);
}
