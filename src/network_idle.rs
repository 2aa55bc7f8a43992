//! Network-idle detection from Chrome page lifecycle events.
//!
//! Chrome emits `networkAlmostIdle` once a document has had at most two
//! in-flight requests for 500ms. A navigation starts with `init`, so an idle
//! signal only counts after the `init` of the document being waited on.

use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::EventLifecycleEvent;
use futures::{Stream, StreamExt};
use tracing::debug;

use crate::errors::{CaptureError, Result};

/// Lifecycle event that starts a new document
pub const INIT_EVENT: &str = "init";

/// Lifecycle event fired at two or fewer open connections
pub const NETWORK_ALMOST_IDLE_EVENT: &str = "networkAlmostIdle";

/// The parts of a lifecycle event the tracker looks at
pub trait LifecycleSignal {
    fn name(&self) -> &str;
    fn frame_id(&self) -> &str;
}

impl LifecycleSignal for Arc<EventLifecycleEvent> {
    fn name(&self) -> &str {
        &self.name
    }

    fn frame_id(&self) -> &str {
        self.frame_id.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdleState {
    AwaitingInit,
    Loading,
    Idle,
}

/// Tracks lifecycle events for one frame until the network goes idle
#[derive(Debug)]
pub struct IdleTracker {
    frame_id: Option<String>,
    state: IdleState,
}

impl IdleTracker {
    /// Track `frame_id`, or every frame when `None`
    pub fn new(frame_id: Option<String>) -> Self {
        Self {
            frame_id,
            state: IdleState::AwaitingInit,
        }
    }

    /// Feed one event; returns true once the frame is idle
    pub fn observe(&mut self, name: &str, frame_id: &str) -> bool {
        if let Some(expected) = &self.frame_id
            && expected != frame_id
        {
            return self.is_idle();
        }

        match name {
            INIT_EVENT => self.state = IdleState::Loading,
            NETWORK_ALMOST_IDLE_EVENT if self.state == IdleState::Loading => {
                self.state = IdleState::Idle
            }
            _ => {}
        }
        self.is_idle()
    }

    pub fn is_idle(&self) -> bool {
        self.state == IdleState::Idle
    }
}

/// Consume lifecycle events until the frame reports network idle
pub async fn wait_for_network_idle<S>(
    events: S,
    frame_id: Option<String>,
    timeout: Duration,
) -> Result<()>
where
    S: Stream + Unpin,
    S::Item: LifecycleSignal,
{
    let mut tracker = IdleTracker::new(frame_id);
    let mut events = events;

    let wait = async {
        while let Some(event) = events.next().await {
            debug!("Lifecycle event {} on frame {}", event.name(), event.frame_id());
            if tracker.observe(event.name(), event.frame_id()) {
                return Ok(());
            }
        }
        Err(CaptureError::Navigation {
            url: String::new(),
            message: "lifecycle event stream closed before network idle".to_string(),
        })
    };

    match tokio::time::timeout(timeout, wait).await {
        Ok(result) => result,
        Err(_) => Err(CaptureError::Timeout {
            what: "network idle".to_string(),
            after: timeout,
        }),
    }
}

#[cfg(test)]
#[path = "network_idle_test.rs"]
mod network_idle_test;
