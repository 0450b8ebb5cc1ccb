//! Frame viewer connection lifecycle, independent of the browser.
//!
//! The wasm client forwards WebSocket events into a [`FrameViewerCore`]
//! through the [`ConnectionObserver`] trait and hands it a [`FrameSink`]
//! for the output element and a [`Transport`] for the start action.

use crate::config::ViewerConfig;
use crate::{bail, Result};

/// Sent by the start action.
pub const START_TOKEN: &str = "start_game";

/// Lifecycle reactions raised by the transport.
pub trait ConnectionObserver {
    fn on_open(&mut self);
    /// Returns `true` if the payload was handed to the display.
    fn on_message(&mut self, text: &str) -> bool;
    fn on_error(&mut self, detail: &str);
    fn on_close(&mut self, code: u16, reason: &str);
}

/// Where received frames are displayed.
pub trait FrameSink {
    /// Replace the displayed content with `text`. Returns `false` when there
    /// is nothing to write to.
    fn show(&mut self, text: &str) -> bool;
}

/// Outbound half of the connection.
pub trait Transport {
    fn send_text(&self, text: &str) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

impl ConnectionState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Closed => "closed",
        }
    }
}

pub struct FrameViewerCore<S> {
    endpoint: String,
    state: ConnectionState,
    sink: S,
}

impl<S: FrameSink> FrameViewerCore<S> {
    pub fn new(config: &ViewerConfig, sink: S) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            state: ConnectionState::Connecting,
            sink,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Send the start token once. The caller is expected to invoke this from
    /// a user action; nothing waits for a reply.
    pub fn start(&self, transport: &impl Transport) -> Result<()> {
        if self.state != ConnectionState::Open {
            bail!(
                "cannot start game: connection to {} is {}",
                self.endpoint,
                self.state.as_str()
            );
        }
        log::info!("starting new game");
        transport.send_text(START_TOKEN)
    }
}

impl<S: FrameSink> ConnectionObserver for FrameViewerCore<S> {
    fn on_open(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        self.state = ConnectionState::Open;
        log::info!("connected to {}", self.endpoint);
    }

    fn on_message(&mut self, text: &str) -> bool {
        if self.state == ConnectionState::Closed {
            log::debug!("dropping frame received after close");
            return false;
        }
        log::debug!("received frame: {}", text);
        if !self.sink.show(text) {
            log::warn!("no element to display frame in");
            return false;
        }
        true
    }

    fn on_error(&mut self, detail: &str) {
        log::error!("websocket error on {}: {}", self.endpoint, detail);
    }

    fn on_close(&mut self, code: u16, reason: &str) {
        self.state = ConnectionState::Closed;
        log::info!(
            "websocket connection closed: code={}, reason={}",
            code,
            reason
        );
    }
}
