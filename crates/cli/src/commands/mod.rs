//! Subcommand implementations.
//!
//! Every handler takes an already-built, already-verified `SplunkClient`
//! except `url`, which never contacts the server.

pub mod concurrency;
pub mod control;
pub mod delete;
pub mod results;
pub mod status;
pub mod submit;
pub mod url;
pub mod wait;

use std::io::Write;

use anyhow::Result;
use futures::StreamExt;
use splunk_search_client::{CancellationToken, ClientError, SplunkClient, StreamEnd};
use tracing::debug;

use crate::error::CliError;
use crate::formatters::{OutputFormat, record_writer};

/// Stream every record of `sid` to `out` in `format`.
///
/// Returns the number of records written. A stream that ends because the
/// server had no more content is a success; one that ends on a decode or
/// transport failure is an error after the records already written.
pub(crate) async fn stream_records<W: Write>(
    client: &SplunkClient,
    sid: &str,
    format: OutputFormat,
    out: W,
    cancel: &CancellationToken,
) -> Result<usize> {
    let mut writer = record_writer(format, out);
    let mut stream = client.stream_results(sid, cancel.clone());
    let mut written = 0usize;

    while let Some(record) = stream.next().await {
        writer.write_record(&record)?;
        written += 1;
    }
    writer.finish()?;

    let end = stream.finish().await;
    debug!(sid, written, reason = end.as_str(), "Result stream finished");

    match end {
        StreamEnd::Exhausted | StreamEnd::NoContent { .. } | StreamEnd::ConsumerGone => {
            Ok(written)
        }
        StreamEnd::Cancelled => Err(ClientError::Cancelled.into()),
        reason @ (StreamEnd::DecodeFailed(_) | StreamEnd::TransportFailed(_)) => {
            Err(CliError::StreamIncomplete {
                sid: sid.to_string(),
                reason: reason.to_string(),
            }
            .into())
        }
    }
}
