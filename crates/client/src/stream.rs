//! Lazy, cancellable stream of search result records.
//!
//! A background task pages through `results_preview` and pushes each record
//! into a bounded channel; [`ResultStream`] is the receiving half.
//!
//! # Paging rules
//! - `offset` starts at 0 and advances by the number of records actually
//!   received, never by the page size.
//! - A page with no records that is not a preview ends the stream.
//! - After a preview page the producer waits the client's preview interval
//!   before asking again.
//! - A non-200 status, a decode failure or a transport failure ends the stream
//!   quietly. The reason is available from [`ResultStream::finish`].
//!
//! # Invariants
//! - The sending half is owned by the producer task alone, so the channel is
//!   closed exactly once on every exit path and the consumer always sees the end.
//! - Dropping the [`ResultStream`] aborts the producer.
//! - Records arrive in request order, and in server order within a page.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use splunk_search_config::constants::{RESULTS_BUFFER_PAGES, RESULTS_PAGE_SIZE};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cancellation::CancellationToken;
use crate::client::SplunkClient;
use crate::error::ClientError;
use crate::record::SearchResult;

/// Why a result stream stopped producing records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEnd {
    /// An empty, non-preview page was returned.
    Exhausted,
    /// The server answered with a status other than 200.
    NoContent { status: u16 },
    /// A page could not be decoded.
    DecodeFailed(String),
    /// The request failed before a response was received.
    TransportFailed(String),
    /// The cancellation token fired.
    Cancelled,
    /// The receiving side was closed or dropped.
    ConsumerGone,
}

impl StreamEnd {
    /// Metrics label for this reason.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exhausted => "exhausted",
            Self::NoContent { .. } => "no_content",
            Self::DecodeFailed(_) => "decode_failed",
            Self::TransportFailed(_) => "transport_failed",
            Self::Cancelled => "cancelled",
            Self::ConsumerGone => "consumer_gone",
        }
    }

    /// True when every record of the result set was delivered.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

impl fmt::Display for StreamEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "all results delivered"),
            Self::NoContent { status } => write!(f, "server returned HTTP {status}"),
            Self::DecodeFailed(msg) => write!(f, "results page could not be decoded: {msg}"),
            Self::TransportFailed(msg) => write!(f, "transport error: {msg}"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::ConsumerGone => write!(f, "consumer stopped reading"),
        }
    }
}

/// Records of one search job, produced by a background task.
///
/// ```rust,ignore
/// use futures::StreamExt;
///
/// let mut stream = client.stream_results(&sid, CancellationToken::new());
/// while let Some(record) = stream.next().await {
///     println!("{}", record.field_string("_raw"));
/// }
/// let end = stream.finish().await;
/// ```
#[derive(Debug)]
pub struct ResultStream {
    rx: mpsc::Receiver<SearchResult>,
    producer: Option<JoinHandle<StreamEnd>>,
}

impl ResultStream {
    /// Capacity of the buffer between producer and consumer, in records.
    pub const BUFFER_CAPACITY: usize = RESULTS_PAGE_SIZE * RESULTS_BUFFER_PAGES;

    pub(crate) fn spawn(client: SplunkClient, sid: String, cancel: CancellationToken) -> Self {
        let (tx, rx) = mpsc::channel(Self::BUFFER_CAPACITY);
        let producer = tokio::spawn(async move {
            let end = produce(&client, &sid, &cancel, tx).await;
            debug!(sid = %sid, reason = end.as_str(), "Result stream ended");
            if let Some(m) = client.metrics.as_ref() {
                m.record_stream_end(&end);
            }
            end
        });

        Self {
            rx,
            producer: Some(producer),
        }
    }

    /// Stop consuming and report why production ended.
    ///
    /// Records not yet read are discarded. If the producer was still running
    /// it stops at its next delivery or wait and reports
    /// [`StreamEnd::ConsumerGone`].
    pub async fn finish(mut self) -> StreamEnd {
        self.rx.close();
        let Some(producer) = self.producer.take() else {
            return StreamEnd::ConsumerGone;
        };
        match producer.await {
            Ok(end) => end,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => StreamEnd::ConsumerGone,
        }
    }
}

impl Stream for ResultStream {
    type Item = SearchResult;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl Drop for ResultStream {
    fn drop(&mut self) {
        if let Some(producer) = self.producer.take() {
            producer.abort();
        }
    }
}

/// The paging loop. Owns `tx`; returning drops it and closes the channel.
async fn produce(
    client: &SplunkClient,
    sid: &str,
    cancel: &CancellationToken,
    tx: mpsc::Sender<SearchResult>,
) -> StreamEnd {
    let page_size = RESULTS_PAGE_SIZE as u64;
    let mut offset: u64 = 0;

    loop {
        if cancel.is_cancelled() {
            return StreamEnd::Cancelled;
        }

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => return StreamEnd::Cancelled,
            _ = tx.closed() => return StreamEnd::ConsumerGone,
            page = client.get_results_preview(sid, page_size, offset) => page,
        };

        let page = match fetched {
            Ok(page) => page,
            Err(ClientError::ApiError { status, .. }) => {
                debug!(sid, status, offset, "No results available");
                return StreamEnd::NoContent { status };
            }
            Err(ClientError::InvalidResponse(msg)) => {
                warn!(sid, offset, error = %msg, "Failed to decode results page, ending stream");
                return StreamEnd::DecodeFailed(msg);
            }
            Err(e) => {
                warn!(sid, offset, error = %e, "Results request failed, ending stream");
                return StreamEnd::TransportFailed(e.to_string());
            }
        };

        if page.is_exhausted() {
            return StreamEnd::Exhausted;
        }

        let received = page.results.len() as u64;
        let preview = page.preview;
        if let Some(m) = client.metrics.as_ref() {
            m.record_page_streamed(preview, page.results.len());
        }
        debug!(sid, offset, received, preview, "Received results page");

        for record in page.results {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return StreamEnd::Cancelled,
                sent = tx.send(record) => {
                    if sent.is_err() {
                        return StreamEnd::ConsumerGone;
                    }
                }
            }
        }

        offset += received;

        if preview {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return StreamEnd::Cancelled,
                _ = tx.closed() => return StreamEnd::ConsumerGone,
                _ = tokio::time::sleep(client.preview_poll_interval) => {}
            }
        }
    }
}
