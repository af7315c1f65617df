//! Terminal input pump.
//!
//! A background tokio task multiplexes crossterm input with two timers: a
//! coarse tick that drives toast expiry and throbber animation, and a fast
//! render tick that paces frame drawing. The main loop consumes the merged
//! stream from a single channel.

use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Timer cadence for the input pump.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    /// Animation and housekeeping tick interval.
    pub tick: Duration,
    /// Frame pacing interval.
    pub render: Duration,
}

impl Default for Cadence {
    /// 4 Hz tick, ~30 FPS render.
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(250),
            render: Duration::from_millis(33),
        }
    }
}

/// Events delivered to the main loop.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    /// Housekeeping tick.
    Tick,
    /// Time to draw a frame.
    Render,
}

/// Handle to the background input task.
pub struct EventPump {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventPump {
    pub fn spawn(cadence: Cadence) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(pump(tx, cadence, cancel.clone()));
        Self { rx, cancel }
    }

    /// Next merged event, or `None` once the pump has shut down.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventPump {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn paced(period: Duration) -> Interval {
    let mut timer = interval(period);
    // Skip missed ticks instead of bursting to catch up
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    timer
}

async fn pump(tx: mpsc::UnboundedSender<Event>, cadence: Cadence, cancel: CancellationToken) {
    let mut input = EventStream::new();
    let mut tick = paced(cadence.tick);
    let mut render = paced(cadence.render);

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => return,
            _ = tick.tick() => Event::Tick,
            _ = render.tick() => Event::Render,
            Some(Ok(term)) = input.next() => match translate(term) {
                Some(event) => event,
                None => continue,
            },
        };

        // A closed receiver means the app is shutting down.
        if tx.send(event).is_err() {
            return;
        }
    }
}

/// Key presses and resizes reach the app; release and repeat events, mouse
/// input, and focus changes are dropped here.
fn translate(event: TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        TermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}
