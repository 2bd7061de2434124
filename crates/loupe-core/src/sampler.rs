//! Sampling loop: state machine + worker thread.

use crate::{
    draw_center_marker, encode_png, CaptureResult, PixelColor, Sample, ScreenPoint, ScreenSource,
};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Sampler state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplerState {
    /// Ticking on the configured period.
    Running,
    /// No ticks fire; the last published sample stays current.
    Stopped,
}

impl Default for SamplerState {
    fn default() -> Self {
        Self::Running
    }
}

/// Commands sent to the sampler thread.
#[derive(Debug, Clone)]
pub enum SamplerCommand {
    /// Flip Running <-> Stopped.
    Toggle,
    /// Emit the current hex string for the clipboard collaborator.
    Copy,
    /// Make the last sampled position the origin for relative coordinates.
    SetOrigin,
    /// Reset the origin to (0, 0).
    ResetOrigin,
    /// Exit the worker thread.
    Shutdown,
}

/// Events published by the sampler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SamplerEvent {
    /// State changed.
    StateChanged { old: SamplerState, new: SamplerState },
    /// One tick's result. Position, color, and preview always arrive
    /// together in a single event; subscribers never see a partial update.
    Sample(Sample),
    /// Response to `Copy`: the hex string to hand to the clipboard.
    ClipboardText { text: String },
    /// A tick failed and was skipped.
    Error { message: String },
}

/// Configuration for the sampler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Tick period in milliseconds.
    pub interval_ms: u64,
    /// Preview capture width in pixels. Keep both dimensions even so the
    /// crosshair has a unique 2x2 center block.
    pub region_width: u32,
    /// Preview capture height in pixels.
    pub region_height: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            region_width: 16,
            region_height: 16,
        }
    }
}

/// Handle to control the sampler thread.
pub struct SamplerHandle {
    cmd_tx: Sender<SamplerCommand>,
    event_rx: Receiver<SamplerEvent>,
    state: Arc<Mutex<SamplerState>>,
    thread: Option<JoinHandle<()>>,
}

impl SamplerHandle {
    /// Send a command to the sampler.
    pub fn send(&self, cmd: SamplerCommand) {
        if let Err(e) = self.cmd_tx.send(cmd) {
            warn!("failed to send command to sampler: {}", e);
        }
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Option<SamplerEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Receive an event, waiting up to `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SamplerEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Drain all pending events.
    pub fn drain(&self) -> Vec<SamplerEvent> {
        let mut events = Vec::new();
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    /// Get current state.
    pub fn state(&self) -> SamplerState {
        *self.state.lock().unwrap()
    }

    /// Stop the worker thread and wait for it to finish.
    pub fn shutdown(mut self) {
        let _ = self.cmd_tx.send(SamplerCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Sampler: owns a [`ScreenSource`] on a worker thread, polls it while
/// Running, and publishes one [`Sample`] event per tick.
pub struct Sampler<S: ScreenSource> {
    source: S,
    config: SamplerConfig,
    state: Arc<Mutex<SamplerState>>,
    cmd_rx: Receiver<SamplerCommand>,
    event_tx: Sender<SamplerEvent>,
    origin: ScreenPoint,
    last_position: ScreenPoint,
    last_color: PixelColor,
}

impl<S: ScreenSource + 'static> Sampler<S> {
    /// Spawn the worker thread and return a handle to control it.
    /// Sampling starts immediately.
    pub fn spawn(source: S, config: SamplerConfig) -> SamplerHandle {
        let (cmd_tx, cmd_rx) = bounded(32);
        let (event_tx, event_rx) = bounded(256);
        let state = Arc::new(Mutex::new(SamplerState::Running));

        let sampler = Sampler {
            source,
            config,
            state: state.clone(),
            cmd_rx,
            event_tx,
            origin: ScreenPoint::ZERO,
            last_position: ScreenPoint::ZERO,
            // Reported until the first tick lands, so Copy always has a
            // value to hand out.
            last_color: PixelColor::WHITE,
        };

        let thread = thread::spawn(move || {
            sampler.run_loop();
        });

        SamplerHandle {
            cmd_tx,
            event_rx,
            state,
            thread: Some(thread),
        }
    }

    fn run_loop(mut self) {
        info!("sampler thread started");
        let period = Duration::from_millis(self.config.interval_ms);

        loop {
            let cmd = if self.get_state() == SamplerState::Running {
                match self.cmd_rx.recv_timeout(period) {
                    Ok(cmd) => cmd,
                    Err(RecvTimeoutError::Timeout) => {
                        self.tick();
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            } else {
                // Stopped: no timer, just wait for the next command.
                match self.cmd_rx.recv() {
                    Ok(cmd) => cmd,
                    Err(_) => break,
                }
            };

            if !self.handle_command(cmd) {
                break;
            }
        }

        info!("sampler thread exiting");
    }

    /// Handle a command. Returns false if the thread should exit.
    fn handle_command(&mut self, cmd: SamplerCommand) -> bool {
        debug!(?cmd, "handling command");

        match cmd {
            SamplerCommand::Toggle => {
                let new = match self.get_state() {
                    SamplerState::Running => SamplerState::Stopped,
                    SamplerState::Stopped => SamplerState::Running,
                };
                self.transition_state(new);
            }
            SamplerCommand::Copy => {
                self.emit(SamplerEvent::ClipboardText {
                    text: self.last_color.to_hex(),
                });
            }
            SamplerCommand::SetOrigin => {
                self.origin = self.last_position;
                debug!(x = self.origin.x, y = self.origin.y, "origin set");
            }
            SamplerCommand::ResetOrigin => {
                self.origin = ScreenPoint::ZERO;
                debug!("origin reset");
            }
            SamplerCommand::Shutdown => return false,
        }

        true
    }

    fn tick(&mut self) {
        match sample_once(
            &self.source,
            self.origin,
            self.config.region_width,
            self.config.region_height,
        ) {
            Ok(sample) => {
                self.last_position = sample.position;
                self.last_color = sample.color;
                self.emit(SamplerEvent::Sample(sample));
            }
            Err(e) => {
                // The previous sample stays current; the next firing gets a
                // fresh try.
                warn!(error = %e, "tick skipped");
                self.emit(SamplerEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    fn get_state(&self) -> SamplerState {
        *self.state.lock().unwrap()
    }

    fn transition_state(&self, new_state: SamplerState) {
        let old = {
            let mut guard = self.state.lock().unwrap();
            let old = *guard;
            if old != new_state {
                *guard = new_state;
                debug!(?old, ?new_state, "state transition");
                Some(old)
            } else {
                None
            }
        };

        if let Some(old) = old {
            self.emit(SamplerEvent::StateChanged {
                old,
                new: new_state,
            });
        }
    }

    fn emit(&self, event: SamplerEvent) {
        if let Err(e) = self.event_tx.try_send(event) {
            warn!("failed to emit event: {}", e);
        }
    }
}

/// Perform one full sample cycle against `source`: cursor query, point
/// sample, region capture, overlay, preview encoding.
///
/// An acquisition failure at any step aborts the whole cycle so a partial
/// result is never produced. A region that cannot be overlayed or encoded
/// only drops the preview; position and color still come back.
pub fn sample_once<S: ScreenSource>(
    source: &S,
    origin: ScreenPoint,
    width: u32,
    height: u32,
) -> CaptureResult<Sample> {
    let position = source.cursor_position()?;
    let color = source.sample_point(position)?;
    let mut region = source.capture_region(position, width, height)?;

    let image = match draw_center_marker(&mut region).and_then(|()| encode_png(&region)) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!(error = %e, "preview dropped for this tick");
            None
        }
    };

    Ok(Sample {
        position,
        relative: position.relative_to(origin),
        color,
        image,
    })
}
