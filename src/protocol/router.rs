//! # Router
//!
//! Tag-keyed handler registry and the dispatch path that turns decoded
//! request frames into response frames.
//!
//! The registry is insertion-ordered with first-match dispatch. It is
//! populated once before the server starts accepting and is read-only
//! afterward, so concurrent lookup needs no locking.
//!
//! Handler faults never tear down a connection: decode errors and
//! business-logic failures are caught here, logged, and answered with a
//! structured error frame.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::core::accumulator::FrameAccumulator;
use crate::core::buffer::ByteBuffer;
use crate::core::frame::{pack, Frame, Tag};
use crate::core::serialization::TagCodec;
use crate::error::{Result, WireError};
use crate::transport::OnMessage;

/// Business-logic unit bound to one tag.
///
/// `handle` consumes the request payload and appends zero or more packed
/// response frames to `out`.
pub trait Handler: Send + Sync {
    fn tag(&self) -> Tag;
    fn handle(&self, payload: &[u8], out: &mut ByteBuffer) -> Result<()>;
}

/// Handler over the binary-schema codec: decodes the payload with bincode,
/// runs the business function, and packs the encoded result as a
/// [`Tag::Binary`] response frame.
pub struct BinaryHandler<Req, Resp, F> {
    func: F,
    _marker: PhantomData<fn(Req) -> Resp>,
}

impl<Req, Resp, F> BinaryHandler<Req, Resp, F>
where
    Req: DeserializeOwned + Serialize,
    Resp: Serialize + DeserializeOwned,
    F: Fn(Req) -> Result<Resp> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            _marker: PhantomData,
        }
    }
}

impl<Req, Resp, F> Handler for BinaryHandler<Req, Resp, F>
where
    Req: DeserializeOwned + Serialize,
    Resp: Serialize + DeserializeOwned,
    F: Fn(Req) -> Result<Resp> + Send + Sync,
{
    fn tag(&self) -> Tag {
        Tag::Binary
    }

    fn handle(&self, payload: &[u8], out: &mut ByteBuffer) -> Result<()> {
        let request = Req::decode_payload(payload, Tag::Binary)?;
        let response = (self.func)(request)?;
        let encoded = response.encode_payload(Tag::Binary)?;
        out.append(&pack(Tag::Binary, &encoded));
        Ok(())
    }
}

/// Handler over the structured codec: same shape as [`BinaryHandler`],
/// operating on tree-shaped JSON values.
pub struct StructuredHandler<F> {
    func: F,
}

impl<F> StructuredHandler<F>
where
    F: Fn(serde_json::Value) -> Result<serde_json::Value> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Handler for StructuredHandler<F>
where
    F: Fn(serde_json::Value) -> Result<serde_json::Value> + Send + Sync,
{
    fn tag(&self) -> Tag {
        Tag::Structured
    }

    fn handle(&self, payload: &[u8], out: &mut ByteBuffer) -> Result<()> {
        let request: serde_json::Value = serde_json::from_slice(payload)
            .map_err(|e| WireError::DeserializeError(e.to_string()))?;
        let response = (self.func)(request)?;
        let encoded =
            serde_json::to_vec(&response).map_err(|e| WireError::SerializeError(e.to_string()))?;
        out.append(&pack(Tag::Structured, &encoded));
        Ok(())
    }
}

/// Insertion-ordered registry of tag-keyed handlers.
#[derive(Default)]
pub struct Router {
    handlers: Vec<Box<dyn Handler>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler. The first registration for a tag wins ties on
    /// dispatch.
    pub fn register<H: Handler + 'static>(&mut self, handler: H) {
        debug!(tag = %handler.tag(), "registered handler");
        self.handlers.push(Box::new(handler));
    }

    /// Register a binary-schema business function.
    pub fn register_binary<Req, Resp, F>(&mut self, func: F)
    where
        Req: DeserializeOwned + Serialize + 'static,
        Resp: Serialize + DeserializeOwned + 'static,
        F: Fn(Req) -> Result<Resp> + Send + Sync + 'static,
    {
        self.register(BinaryHandler::new(func));
    }

    /// Register a structured (JSON) business function.
    pub fn register_structured<F>(&mut self, func: F)
    where
        F: Fn(serde_json::Value) -> Result<serde_json::Value> + Send + Sync + 'static,
    {
        self.register(StructuredHandler::new(func));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The connection message callback body: move the received bytes into
    /// the connection's accumulator, drain every complete frame, and
    /// dispatch each one.
    ///
    /// A hard parse fault poisons the byte stream, so the accumulated bytes
    /// are discarded and answered with one error frame; the connection
    /// itself stays up.
    pub fn dispatch(&self, acc: &mut FrameAccumulator, recv: &mut ByteBuffer, out: &mut ByteBuffer) {
        let bytes = recv.read_all();
        acc.append(&bytes);

        loop {
            match acc.next_frame() {
                Ok(Some(frame)) => self.dispatch_frame(&frame, out),
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, discarded = acc.len(), "unparseable byte stream, discarding");
                    acc.clear();
                    append_error_frame(&e.to_string(), out);
                    break;
                }
            }
        }
    }

    /// Dispatch one frame to the first handler whose tag matches.
    fn dispatch_frame(&self, frame: &Frame, out: &mut ByteBuffer) {
        debug!(tag = %frame.tag, len = frame.payload.len(), "dispatching frame");

        match self.handlers.iter().find(|h| h.tag() == frame.tag) {
            Some(handler) => {
                if let Err(e) = handler.handle(&frame.payload, out) {
                    warn!(tag = %frame.tag, error = %e, "handler failed");
                    append_error_frame(&e.to_string(), out);
                }
            }
            None => {
                warn!(tag = %frame.tag, "no handler for tag");
                append_error_frame(&format!("no handler for tag {}", frame.tag), out);
            }
        }
    }

    /// Build a per-connection message callback owning a fresh accumulator.
    ///
    /// Framing state must never be shared between connections, so the
    /// listener calls this once per accepted socket.
    pub fn session_callback(self: &Arc<Self>) -> OnMessage {
        let router = Arc::clone(self);
        let mut acc = FrameAccumulator::new();
        Box::new(move |recv, out| router.dispatch(&mut acc, recv, out))
    }
}

/// Synthesize the structured error response frame:
/// `{"status":"error","message":...,"timestamp":...}`.
fn append_error_frame(message: &str, out: &mut ByteBuffer) {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let body = serde_json::json!({
        "status": "error",
        "message": message,
        "timestamp": timestamp,
    });
    // Serializing a json! literal cannot fail.
    let encoded = serde_json::to_vec(&body).unwrap_or_default();
    out.append(&pack(Tag::Structured, &encoded));
}
