//! Server-Sent Events streaming shared by the provider variants

use super::adapter::ProviderKind;
use super::error::{ProviderError, SamplerError, SamplerResult};
use eventsource_stream::{Event, EventStreamError, Eventsource};
use futures::stream::{self, Stream, StreamExt};
use std::pin::Pin;
use tracing::debug;
use uuid::Uuid;

/// Lazy sequence of text fragments from a streaming call.
///
/// The stream owns the HTTP response; dropping it closes the connection.
pub type TextStream = Pin<Box<dyn Stream<Item = SamplerResult<String>> + Send>>;

/// What a single SSE event means for the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFrame {
    /// A text fragment to yield
    Text(String),
    /// An event with nothing for the caller
    Skip,
    /// The vendor signalled the end of the message
    Done,
}

/// Vendor-specific decoding of one SSE event
pub(crate) type FrameDecoder = fn(&Event) -> Result<StreamFrame, ProviderError>;

type EventStream =
    Pin<Box<dyn Stream<Item = Result<Event, EventStreamError<reqwest::Error>>> + Send>>;

struct StreamState {
    events: EventStream,
    vendor: ProviderKind,
    decode: FrameDecoder,
    request_id: Uuid,
}

/// Turn a streaming HTTP response into a stream of text fragments.
///
/// Fragments come out in the order the vendor sent them. The first error
/// (transport failure or a vendor error event) is yielded once and ends the
/// stream; anything yielded before it stays valid.
pub(crate) fn fragment_stream(
    vendor: ProviderKind,
    response: reqwest::Response,
    decode: FrameDecoder,
    request_id: Uuid,
) -> TextStream {
    let state = StreamState {
        events: Box::pin(response.bytes_stream().eventsource()),
        vendor,
        decode,
        request_id,
    };

    Box::pin(stream::unfold(Some(state), |state| async move {
        let mut state = state?;
        loop {
            match state.events.next().await {
                None => {
                    debug!("Stream closed by {} [request_id: {}]", state.vendor, state.request_id);
                    return None;
                }
                Some(Ok(event)) => match (state.decode)(&event) {
                    Ok(StreamFrame::Text(text)) => return Some((Ok(text), Some(state))),
                    Ok(StreamFrame::Skip) => continue,
                    Ok(StreamFrame::Done) => {
                        debug!("Stream finished [request_id: {}]", state.request_id);
                        return None;
                    }
                    Err(e) => {
                        let err = SamplerError::provider(state.vendor, e);
                        return Some((Err(err), None));
                    }
                },
                Some(Err(e)) => {
                    let err = SamplerError::provider(
                        state.vendor,
                        ProviderError::Stream(format!(
                            "{} [request_id: {}]",
                            e, state.request_id
                        )),
                    );
                    return Some((Err(err), None));
                }
            }
        }
    }))
}
