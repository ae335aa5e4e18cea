//! Live metrics subscription over server-sent events.
//!
//! [`SseBuffer`] does the `text/event-stream` framing: network chunks go
//! in, complete `data:` payloads come out, independent of how the bytes
//! were split in transit. [`MetricsFeed`] drives the buffer from the
//! `/cv/metrics` response stream on a background task and publishes each
//! parsed snapshot into a watch channel - wholesale replacement,
//! last-write-wins. Malformed payloads are logged and dropped; the
//! previous snapshot stays. There is no reconnect logic: when the stream
//! ends, the task ends.

use fitform_protocol::MetricsSnapshot;
use futures_util::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use url::Url;

use crate::api::ApiClient;
use crate::error::Result;

/// Incremental parser for server-sent-event framing.
///
/// Buffers raw bytes and yields the `data:` payload of each complete
/// (blank-line-terminated) event. Multi-line data fields are joined with
/// newlines per the SSE spec; comment lines and non-data fields are
/// ignored. Splitting only ever happens on complete lines, so multi-byte
/// characters fragmented across network chunks reassemble correctly.
#[derive(Debug, Default)]
pub struct SseBuffer {
	buffer: Vec<u8>,
	data_lines: Vec<String>,
}

impl SseBuffer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a network chunk and returns the data payloads of every
	/// event completed by it.
	pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
		self.buffer.extend_from_slice(chunk);

		let mut payloads = Vec::new();
		while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
			let mut line: Vec<u8> = self.buffer.drain(..=newline).collect();
			line.pop();
			if line.last() == Some(&b'\r') {
				line.pop();
			}

			let Ok(line) = String::from_utf8(line) else {
				// Not decodable as text; drop the line, keep the stream.
				self.data_lines.clear();
				continue;
			};

			if line.is_empty() {
				if !self.data_lines.is_empty() {
					payloads.push(self.data_lines.join("\n"));
					self.data_lines.clear();
				}
			} else if let Some(data) = line.strip_prefix("data:") {
				self.data_lines.push(data.strip_prefix(' ').unwrap_or(data).to_string());
			}
			// "event:", "id:", "retry:" and ":" comments carry nothing we use.
		}
		payloads
	}
}

/// Handle to the one live metrics subscription of an active session.
///
/// Dropping the feed aborts the reader task, so releasing the stream is
/// deterministic on every exit path - session end, controller drop, or
/// abrupt teardown of the surrounding task.
#[derive(Debug)]
pub struct MetricsFeed {
	rx: watch::Receiver<MetricsSnapshot>,
	task: JoinHandle<()>,
}

impl MetricsFeed {
	/// Opens the `/cv/metrics` stream and starts applying snapshots.
	pub fn open(api: &ApiClient) -> Result<Self> {
		let url = api.metrics_url()?;
		let http = api.http().clone();
		let (tx, rx) = watch::channel(MetricsSnapshot::default());
		let task = tokio::spawn(run(http, url, tx));
		Ok(Self { rx, task })
	}

	/// A read handle for the rendering layer. Each read observes the most
	/// recently delivered snapshot.
	pub fn subscribe(&self) -> watch::Receiver<MetricsSnapshot> {
		self.rx.clone()
	}

	/// The most recently delivered snapshot.
	pub fn latest(&self) -> MetricsSnapshot {
		self.rx.borrow().clone()
	}
}

impl Drop for MetricsFeed {
	fn drop(&mut self) {
		self.task.abort();
	}
}

async fn run(http: reqwest::Client, url: Url, tx: watch::Sender<MetricsSnapshot>) {
	let response = match http.get(url).send().await {
		Ok(response) => response,
		Err(err) => {
			debug!(target = "fitform.metrics", error = %err, "metrics stream connect failed");
			return;
		}
	};

	let mut stream = response.bytes_stream();
	let mut buffer = SseBuffer::new();
	while let Some(chunk) = stream.next().await {
		let bytes = match chunk {
			Ok(bytes) => bytes,
			Err(err) => {
				debug!(target = "fitform.metrics", error = %err, "metrics stream ended");
				return;
			}
		};
		for payload in buffer.push(&bytes) {
			match serde_json::from_str::<MetricsSnapshot>(&payload) {
				Ok(snapshot) => {
					let _ = tx.send(snapshot);
				}
				Err(err) => {
					debug!(target = "fitform.metrics", error = %err, "dropping malformed stream message");
				}
			}
		}
	}
	debug!(target = "fitform.metrics", "metrics stream closed by server");
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn whole_event_in_one_chunk() {
		let mut buffer = SseBuffer::new();
		let payloads = buffer.push(b"data: {\"reps\": 1}\n\n");
		assert_eq!(payloads, vec!["{\"reps\": 1}".to_string()]);
	}

	#[test]
	fn event_split_across_chunks_reassembles() {
		let mut buffer = SseBuffer::new();
		assert!(buffer.push(b"data: {\"re").is_empty());
		assert!(buffer.push(b"ps\": 3}").is_empty());
		let payloads = buffer.push(b"\n\n");
		assert_eq!(payloads, vec!["{\"reps\": 3}".to_string()]);
	}

	#[test]
	fn multiple_events_in_one_chunk() {
		let mut buffer = SseBuffer::new();
		let payloads = buffer.push(b"data: a\n\ndata: b\n\ndata: c\n\n");
		assert_eq!(payloads, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
	}

	#[test]
	fn crlf_framing_and_comments_tolerated() {
		let mut buffer = SseBuffer::new();
		let payloads = buffer.push(b": keep-alive\r\ndata: {\"angle\": 90}\r\n\r\n");
		assert_eq!(payloads, vec!["{\"angle\": 90}".to_string()]);
	}

	#[test]
	fn multi_line_data_joins_with_newline() {
		let mut buffer = SseBuffer::new();
		let payloads = buffer.push(b"data: line one\ndata: line two\n\n");
		assert_eq!(payloads, vec!["line one\nline two".to_string()]);
	}

	#[test]
	fn non_data_fields_yield_nothing() {
		let mut buffer = SseBuffer::new();
		assert!(buffer.push(b"event: ping\nid: 7\n\n").is_empty());
	}
}
