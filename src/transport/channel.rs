//! Crossbeam-backed transport.
//!
//! [`ChannelTransport`] is the UI half and [`DeviceLink`] the device half.
//! Frames flow device → UI, commands (also frames) flow UI → device.

use super::{Frame, Transport, EVENT_CONNECT, EVENT_DISCONNECT};
use crate::error::{Result, StormError};
use crate::types::ConnectionStatus;
use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender, TryRecvError, TrySendError};
use std::time::Duration;

/// Channel capacity for commands (UI → device).
const COMMAND_CHANNEL_CAPACITY: usize = 256;
/// Channel capacity for frames (device → UI).
/// 10,000 frames ≈ 5 minutes of sensor data at 30 Hz.
const FRAME_CHANNEL_CAPACITY: usize = 10_000;
/// How long a control frame may wait for room in a full frame queue.
const CONTROL_SEND_TIMEOUT: Duration = Duration::from_millis(500);

/// UI-side handle of the channel pair
pub struct ChannelTransport {
    inbound: Receiver<Frame>,
    outbound: Sender<Frame>,
    status: ConnectionStatus,
    hung_up: bool,
}

/// Device-side handle of the channel pair
#[derive(Clone)]
pub struct DeviceLink {
    frame_tx: Sender<Frame>,
    command_rx: Receiver<Frame>,
}

impl ChannelTransport {
    /// Create a connected pair: `(transport_for_ui, link_for_device)`.
    pub fn pair() -> (Self, DeviceLink) {
        let (frame_tx, frame_rx) = bounded(FRAME_CHANNEL_CAPACITY);
        let (command_tx, command_rx) = bounded(COMMAND_CHANNEL_CAPACITY);
        (
            Self {
                inbound: frame_rx,
                outbound: command_tx,
                status: ConnectionStatus::Disconnected,
                hung_up: false,
            },
            DeviceLink {
                frame_tx,
                command_rx,
            },
        )
    }

    /// Current connection status as observed from inbound frames
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Drain all pending frames
    pub fn drain(&mut self) -> Vec<Frame> {
        let mut frames = Vec::new();
        while let Some(frame) = self.poll() {
            frames.push(frame);
        }
        frames
    }

    fn observe(&mut self, frame: &Frame) {
        match frame.event.as_str() {
            EVENT_CONNECT => self.status = ConnectionStatus::Connected,
            EVENT_DISCONNECT => self.status = ConnectionStatus::Disconnected,
            _ => {}
        }
    }
}

impl Transport for ChannelTransport {
    fn poll(&mut self) -> Option<Frame> {
        match self.inbound.try_recv() {
            Ok(frame) => {
                self.observe(&frame);
                Some(frame)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if self.hung_up {
                    return None;
                }
                self.hung_up = true;
                tracing::info!("Device side hung up");
                // Report the loss once if the device never said goodbye
                if self.status == ConnectionStatus::Connected {
                    self.status = ConnectionStatus::Disconnected;
                    Some(Frame::bare(EVENT_DISCONNECT))
                } else {
                    None
                }
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    fn emit(&self, frame: Frame) -> Result<()> {
        self.outbound.try_send(frame).map_err(|e| match e {
            TrySendError::Full(f) => {
                StormError::Channel(format!("command queue full, dropped '{}'", f.event))
            }
            TrySendError::Disconnected(f) => {
                StormError::Channel(format!("device side closed, dropped '{}'", f.event))
            }
        })
    }
}

impl DeviceLink {
    /// Send a control frame (`connect`, `new_port`, `disconnect`) to the UI.
    ///
    /// Waits at most half a second for room in a full queue.
    pub fn send(&self, frame: Frame) -> Result<()> {
        self.frame_tx
            .send_timeout(frame, CONTROL_SEND_TIMEOUT)
            .map_err(|e| match e {
                SendTimeoutError::Timeout(f) => {
                    StormError::Channel(format!("UI not reading, dropped '{}'", f.event))
                }
                SendTimeoutError::Disconnected(f) => {
                    StormError::Channel(format!("UI side closed, dropped '{}'", f.event))
                }
            })
    }

    /// Queue a streaming frame without blocking.
    ///
    /// Returns `Ok(false)` when the queue is full and the frame was dropped,
    /// `Err` once the UI side has been dropped.
    pub fn try_stream(&self, frame: Frame) -> Result<bool> {
        match self.frame_tx.try_send(frame) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => Ok(false),
            Err(TrySendError::Disconnected(_)) => {
                Err(StormError::Channel("UI side closed".to_string()))
            }
        }
    }

    /// Take the next pending command without blocking.
    ///
    /// Returns `Err` once the UI side has been dropped.
    pub fn try_command(&self) -> Result<Option<Frame>> {
        match self.command_rx.try_recv() {
            Ok(frame) => Ok(Some(frame)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                Err(StormError::Channel("UI side closed".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{EVENT_NEW_PORT, EVENT_SELECT_PORT};

    #[test]
    fn test_connection_tracks_frames() {
        let (mut transport, link) = ChannelTransport::pair();
        assert!(!transport.is_connected());

        link.send(Frame::bare(EVENT_CONNECT)).unwrap();
        link.send(Frame::new(EVENT_NEW_PORT, serde_json::json!(["COM1"])))
            .unwrap();
        let frames = transport.drain();
        assert_eq!(frames.len(), 2);
        assert!(transport.is_connected());

        link.send(Frame::bare(EVENT_DISCONNECT)).unwrap();
        transport.drain();
        assert_eq!(transport.status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_hang_up_synthesizes_single_disconnect() {
        let (mut transport, link) = ChannelTransport::pair();
        link.send(Frame::bare(EVENT_CONNECT)).unwrap();
        drop(link);

        let frames = transport.drain();
        assert_eq!(
            frames,
            vec![Frame::bare(EVENT_CONNECT), Frame::bare(EVENT_DISCONNECT)]
        );
        assert!(!transport.is_connected());
        assert!(transport.poll().is_none());
    }

    #[test]
    fn test_hang_up_while_disconnected_is_silent() {
        let (mut transport, link) = ChannelTransport::pair();
        drop(link);
        assert!(transport.drain().is_empty());
    }

    #[test]
    fn test_emit_reaches_device() {
        let (transport, link) = ChannelTransport::pair();
        transport.emit(Frame::select_port("COM1")).unwrap();

        let cmd = link.try_command().unwrap().unwrap();
        assert_eq!(cmd.event, EVENT_SELECT_PORT);
        assert!(link.try_command().unwrap().is_none());
    }

    #[test]
    fn test_emit_after_device_dropped_fails() {
        let (transport, link) = ChannelTransport::pair();
        drop(link);
        let err = transport.emit(Frame::select_port("COM1")).unwrap_err();
        assert!(matches!(err, StormError::Channel(_)));
    }

    #[test]
    fn test_full_queue_drops_stream_frames_without_blocking() {
        let (mut transport, link) = ChannelTransport::pair();
        let mut queued = 0;
        while link.try_stream(Frame::bare(EVENT_NEW_PORT)).unwrap() {
            queued += 1;
        }
        assert_eq!(queued, FRAME_CHANNEL_CAPACITY);
        assert!(!link.try_stream(Frame::bare(EVENT_NEW_PORT)).unwrap());

        // Control frames give up after the timeout instead of waiting forever
        let err = link.send(Frame::bare(EVENT_DISCONNECT)).unwrap_err();
        assert!(matches!(err, StormError::Channel(_)));

        assert_eq!(transport.drain().len(), FRAME_CHANNEL_CAPACITY);
        assert!(link.try_stream(Frame::bare(EVENT_NEW_PORT)).unwrap());
    }

    #[test]
    fn test_device_sees_ui_drop() {
        let (transport, link) = ChannelTransport::pair();
        drop(transport);
        assert!(link.try_command().is_err());
        assert!(link.send(Frame::bare(EVENT_CONNECT)).is_err());
        assert!(link.try_stream(Frame::bare(EVENT_CONNECT)).is_err());
    }
}
