//! Spoken announcements
//!
//! The speech engine itself lives outside this crate; sinks only hand text over.
//! [`Debouncer`] keeps at most one announcement pending so rapid navigation
//! never queues overlapping audio.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Where announcements go. Fire-and-forget: failures are logged, not returned.
#[async_trait]
pub trait AnnouncementSink: Send + Sync {
    async fn announce(&self, text: &str);
}

/// Keeps every spoken line in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    spoken: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn spoken(&self) -> Vec<String> {
        self.spoken.lock().await.clone()
    }

    pub async fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.spoken.lock().await)
    }
}

#[async_trait]
impl AnnouncementSink for RecordingSink {
    async fn announce(&self, text: &str) {
        self.spoken.lock().await.push(text.to_string());
    }
}

/// Runs an external text-to-speech program with the text as its last argument.
/// Aborting the announcement kills the program mid-sentence.
#[derive(Debug, Clone)]
pub struct CommandSink {
    program: String,
    args: Vec<String>,
}

impl CommandSink {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl AnnouncementSink for CommandSink {
    async fn announce(&self, text: &str) {
        let status = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .status()
            .await;

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => tracing::warn!("Speech command '{}' exited with {}", self.program, status),
            Err(e) => tracing::warn!("Failed to run speech command '{}': {}", self.program, e),
        }
    }
}

/// Sends several sinks the same text, e.g. speech plus a transcript
pub struct FanoutSink {
    sinks: Vec<Arc<dyn AnnouncementSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn AnnouncementSink>>) -> Self {
        Self { sinks }
    }
}

#[async_trait]
impl AnnouncementSink for FanoutSink {
    async fn announce(&self, text: &str) {
        for sink in &self.sinks {
            sink.announce(text).await;
        }
    }
}

/// Delays each announcement and drops it if a newer one arrives first.
/// Owned per navigator; nothing here is process-wide.
pub struct Debouncer {
    sink: Arc<dyn AnnouncementSink>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(sink: Arc<dyn AnnouncementSink>, delay: Duration) -> Self {
        Self {
            sink,
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Cancel whatever is pending and schedule `text`
    pub async fn schedule(&self, text: impl Into<String>) {
        let text = text.into();
        let mut pending = self.pending.lock().await;

        if let Some(previous) = pending.take()
            && !previous.is_finished()
        {
            tracing::debug!("Dropping superseded announcement");
            previous.abort();
        }

        let sink = Arc::clone(&self.sink);
        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            sink.announce(&text).await;
        }));
    }

    /// Drop the pending announcement, if any
    pub async fn cancel(&self) {
        if let Some(previous) = self.pending.lock().await.take() {
            previous.abort();
        }
    }

    pub async fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Wait until the pending announcement has been delivered
    pub async fn settle(&self) {
        let handle = self.pending.lock().await.take();
        if let Some(handle) = handle
            && let Err(e) = handle.await
            && !e.is_cancelled()
        {
            tracing::warn!("Announcement task failed: {}", e);
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}
