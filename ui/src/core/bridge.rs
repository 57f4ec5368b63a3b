//! Mesh event-bus bridge.
//!
//! Mesh exposes its Vert.x event bus over a websocket. Frames are JSON
//! objects with a `type` discriminator: we `register` for the node addresses
//! we care about, keep the socket alive with `ping`, and turn every `rec`
//! frame into a [`ContentChanged`] published on the [`ContentEvents`] hub.
//!
//! The frame codec is plain Rust and works everywhere; the socket loop itself
//! only exists on `wasm32`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::events::ContentChanged;
#[cfg(target_arch = "wasm32")]
use super::events::ContentEvents;

/// Node lifecycle addresses that may change what a tour page shows.
pub const ADDRESSES: &[&str] = &[
    "mesh.node.updated",
    "mesh.node.published",
    "mesh.node.unpublished",
    "mesh.node.deleted",
    "mesh.node.content.created",
];

pub const PING_INTERVAL_MS: u32 = 5_000;
pub const RECONNECT_DELAY_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Frame {
    Register {
        address: String,
        #[serde(default)]
        headers: serde_json::Map<String, Value>,
    },
    Ping,
    Pong,
    Rec {
        address: String,
        #[serde(default)]
        body: Value,
    },
    Err {
        #[serde(default)]
        message: Option<String>,
    },
}

impl Frame {
    pub fn register(address: &str) -> Self {
        Frame::Register {
            address: address.to_string(),
            headers: serde_json::Map::new(),
        }
    }

    pub fn encode(&self) -> String {
        // Serializing a tagged enum of strings and JSON values cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Decode one incoming text frame.
///
/// Returns the notification for `rec` frames and `None` for everything else.
/// Malformed frames and bridge errors are logged and skipped.
pub fn decode(text: &str) -> Option<ContentChanged> {
    match serde_json::from_str::<Frame>(text) {
        Ok(Frame::Rec { address, body }) => Some(ContentChanged {
            address,
            uuid: string_field(&body, "uuid"),
            language: string_field(&body, "languageTag"),
        }),
        Ok(Frame::Err { message }) => {
            tracing::warn!(
                "event bus reported an error: {}",
                message.unwrap_or_default()
            );
            None
        }
        Ok(_) => None,
        Err(err) => {
            tracing::debug!("ignoring undecodable event bus frame: {err}");
            None
        }
    }
}

fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Keep a bridge connection open for as long as the returned future lives,
/// reconnecting after [`RECONNECT_DELAY_MS`] whenever the socket closes.
#[cfg(target_arch = "wasm32")]
pub async fn run(url: String, hub: ContentEvents) {
    loop {
        match socket::session(&url, &hub).await {
            Ok(()) => tracing::info!("event bus connection closed; reconnecting"),
            Err(err) => tracing::warn!("event bus connection failed: {err}"),
        }
        gloo_timers::future::TimeoutFuture::new(RECONNECT_DELAY_MS).await;
    }
}

#[cfg(target_arch = "wasm32")]
mod socket {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures_channel::oneshot;
    use futures_util::future::{self, Either};
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

    use super::{decode, Frame, ADDRESSES, PING_INTERVAL_MS};
    use crate::core::events::ContentEvents;

    /// Owns the socket and its JS callbacks. Dropping it detaches the
    /// callbacks before they are freed and closes the connection.
    struct Connection {
        socket: WebSocket,
        _on_open: Closure<dyn FnMut(Event)>,
        _on_message: Closure<dyn FnMut(MessageEvent)>,
        _on_close: Closure<dyn FnMut(CloseEvent)>,
    }

    impl Drop for Connection {
        fn drop(&mut self) {
            self.socket.set_onopen(None);
            self.socket.set_onmessage(None);
            self.socket.set_onclose(None);
            let _ = self.socket.close();
        }
    }

    pub(super) async fn session(url: &str, hub: &ContentEvents) -> Result<(), String> {
        let socket = WebSocket::new(url).map_err(describe)?;

        let on_open = {
            let socket = socket.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                tracing::info!("event bus connected");
                for address in ADDRESSES {
                    if let Err(err) = socket.send_with_str(&Frame::register(address).encode()) {
                        tracing::warn!("failed to register {address}: {}", describe(err));
                    }
                }
            })
        };
        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let on_message = {
            let hub = hub.clone();
            Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
                let Some(text) = event.data().as_string() else {
                    return;
                };
                if let Some(change) = decode(&text) {
                    let delivered = hub.publish(change);
                    tracing::debug!(delivered, "content change published");
                }
            })
        };
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let (closed_tx, mut closed_rx) = oneshot::channel::<()>();
        let closed_tx = Rc::new(RefCell::new(Some(closed_tx)));
        let on_close = Closure::<dyn FnMut(CloseEvent)>::new(move |_: CloseEvent| {
            if let Some(tx) = closed_tx.borrow_mut().take() {
                let _ = tx.send(());
            }
        });
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        let connection = Connection {
            socket,
            _on_open: on_open,
            _on_message: on_message,
            _on_close: on_close,
        };

        loop {
            let tick = Box::pin(TimeoutFuture::new(PING_INTERVAL_MS));
            match future::select(&mut closed_rx, tick).await {
                Either::Left(_) => break,
                Either::Right(_) => {
                    if connection.socket.ready_state() == WebSocket::OPEN {
                        if let Err(err) = connection.socket.send_with_str(&Frame::Ping.encode()) {
                            tracing::warn!("event bus ping failed: {}", describe(err));
                        }
                    }
                }
            }
        }

        drop(connection);
        Ok(())
    }

    fn describe(err: JsValue) -> String {
        err.as_string().unwrap_or_else(|| format!("{err:?}"))
    }
}
