//! Sign sequence playback
//!
//! Plays a converted sign sequence one glyph at a time on a fixed-step
//! timer, advancing a cursor until the sequence is exhausted, then
//! auto-stopping. Restarting playback always cancels the in-flight
//! timer first and rewinds the cursor, so at most one timer is ever
//! live per player.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

/// Observable playback position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    /// Whether a playback timer is currently running
    pub playing: bool,
    /// Index of the sign currently shown
    pub cursor: usize,
    /// Length of the loaded sequence
    pub total: usize,
}

impl PlaybackState {
    fn idle() -> Self {
        Self {
            playing: false,
            cursor: 0,
            total: 0,
        }
    }
}

pub struct SignPlayer {
    /// Time each sign stays on screen
    step: Duration,

    /// The loaded sign sequence
    sequence: Mutex<Vec<String>>,

    /// Current playback position, observable via `subscribe`
    state_tx: Arc<watch::Sender<PlaybackState>>,

    /// Handle for the running playback timer
    playback_task: Mutex<Option<JoinHandle<()>>>,
}

impl SignPlayer {
    pub fn new(step: Duration) -> Self {
        let (state_tx, _) = watch::channel(PlaybackState::idle());

        Self {
            step,
            sequence: Mutex::new(Vec::new()),
            state_tx: Arc::new(state_tx),
            playback_task: Mutex::new(None),
        }
    }

    /// Load a new sequence, replacing any previous one. Cancels any
    /// running playback. Returns the sequence length.
    pub async fn load(&self, sequence: Vec<String>) -> usize {
        self.stop().await;

        let len = sequence.len();
        *self.sequence.lock().await = sequence;
        self.state_tx.send_replace(PlaybackState {
            playing: false,
            cursor: 0,
            total: len,
        });

        len
    }

    /// The currently loaded sequence.
    pub async fn sequence(&self) -> Vec<String> {
        self.sequence.lock().await.clone()
    }

    /// Start playback from the beginning.
    ///
    /// Any in-flight timer is cancelled first and the cursor rewinds to
    /// zero. An empty sequence leaves the player stopped.
    pub async fn play(&self) {
        // Hold the handle slot across abort, spawn, and store so two
        // concurrent calls cannot leave two timers running.
        let mut handle = self.playback_task.lock().await;
        if let Some(task) = handle.take() {
            debug!("Restarting playback; cancelling previous timer");
            task.abort();
            // Wait it out so a stale tick cannot advance the
            // rewound cursor.
            let _ = task.await;
        }

        let total = self.sequence.lock().await.len();
        if total == 0 {
            self.state_tx.send_replace(PlaybackState::idle());
            return;
        }

        self.state_tx.send_replace(PlaybackState {
            playing: true,
            cursor: 0,
            total,
        });

        let step = self.step;
        let state_tx = Arc::clone(&self.state_tx);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(step);
            // Skip the immediate tick: the first sign is already shown.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let done = {
                    let mut finished = false;
                    state_tx.send_modify(|state| {
                        if state.cursor + 1 < state.total {
                            state.cursor += 1;
                        } else {
                            state.playing = false;
                            finished = true;
                        }
                    });
                    finished
                };

                if done {
                    debug!("Playback finished");
                    break;
                }
            }
        });

        *handle = Some(task);
    }

    /// Cancel playback. Idempotent; the cursor stays where it was.
    pub async fn stop(&self) {
        let mut handle = self.playback_task.lock().await;
        if let Some(task) = handle.take() {
            task.abort();
            let _ = task.await;
            debug!("Playback cancelled");
        }

        self.state_tx.send_modify(|state| state.playing = false);
    }

    /// Current playback state snapshot.
    pub fn state(&self) -> PlaybackState {
        self.state_tx.borrow().clone()
    }

    /// Follow playback position changes.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state_tx.subscribe()
    }
}
