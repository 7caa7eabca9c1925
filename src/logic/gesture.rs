//! Gesture recognition
//!
//! Pure state machine turning pointer events on list rows into tap, swipe
//! and cancel outcomes. It knows nothing about terminals; the mouse handler
//! converts cells to pointer units before feeding events in.
//!
//! ```text
//! Idle --down--> Tracking --release--> Tap | SwipeEdit | SwipeDelete | Cancelled --> Idle
//! ```

use crate::model::AccountId;

/// Which pointer opened the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary mouse button: tap only (dragging reorders instead)
    Primary,
    /// Secondary mouse button: swipe trigger
    Secondary,
    /// Touch contact: tap or swipe
    Touch,
}

/// Input to the recognizer, in pointer units
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down {
        item: AccountId,
        x: f64,
        /// Width of the item under the pointer
        width: f64,
        button: PointerButton,
        /// Store generation the item id was read under
        generation: u64,
    },
    Move {
        x: f64,
        /// Whether the secondary button is still held (ignored for other buttons)
        secondary_held: bool,
    },
    Up {
        x: f64,
    },
    /// Pointer left the tracked surface
    Leave,
}

/// Committed result of one session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Tap,
    SwipeEdit,
    SwipeDelete,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureOutcome {
    pub kind: GestureKind,
    pub item: AccountId,
    pub generation: u64,
}

/// Which affordance a swipe is revealing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affordance {
    Edit,
    Delete,
}

/// Visual feedback for an in-progress swipe
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    pub item: AccountId,
    /// Horizontal offset of the row
    pub offset: f64,
    pub affordance: Affordance,
    /// Opacity of the revealed affordance, 0..=1
    pub amount: f64,
}

/// Recognizer thresholds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Movement beyond which a session counts as swiping
    pub movement_threshold: f64,
    /// Distance over which the affordance fades fully in
    pub reveal_distance: f64,
    /// Fraction of the item width a swipe must exceed to commit
    pub commit_ratio: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            movement_threshold: 5.0,
            reveal_distance: 60.0,
            commit_ratio: 0.5,
        }
    }
}

/// Transient per-interaction state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    pub item: AccountId,
    pub origin_x: f64,
    pub delta: f64,
    pub swiping: bool,
    pub button: PointerButton,
    pub width: f64,
    pub generation: u64,
}

/// Reveal value for a displacement: edit on the right, delete on the left
///
/// # Examples
/// ```
/// use authtui::logic::gesture::{reveal_amount, Affordance};
///
/// assert_eq!(reveal_amount(30.0, 60.0), (Affordance::Edit, 0.5));
/// assert_eq!(reveal_amount(-120.0, 60.0), (Affordance::Delete, 1.0));
/// ```
pub fn reveal_amount(delta: f64, reveal_distance: f64) -> (Affordance, f64) {
    let amount = (delta.abs() / reveal_distance).min(1.0);
    if delta > 0.0 {
        (Affordance::Edit, amount)
    } else {
        (Affordance::Delete, amount)
    }
}

/// Classify a released session
pub fn classify_release(session: &GestureSession, config: &GestureConfig) -> GestureKind {
    if !session.swiping {
        return match session.button {
            PointerButton::Secondary => GestureKind::Cancelled,
            PointerButton::Primary | PointerButton::Touch => GestureKind::Tap,
        };
    }

    let threshold = session.width * config.commit_ratio;
    if session.delta > threshold {
        GestureKind::SwipeEdit
    } else if session.delta < -threshold {
        GestureKind::SwipeDelete
    } else {
        GestureKind::Cancelled
    }
}

/// Single-session gesture recognizer
#[derive(Clone, Debug, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    session: Option<GestureSession>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Current swipe feedback, if the session is swiping
    pub fn reveal(&self) -> Option<Reveal> {
        let session = self.session.as_ref().filter(|s| s.swiping)?;
        let (affordance, amount) = reveal_amount(session.delta, self.config.reveal_distance);
        Some(Reveal {
            item: session.item,
            offset: session.delta,
            affordance,
            amount,
        })
    }

    /// Drop any open session without an outcome (re-render / teardown)
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Feed one event; returns an outcome when a session ends
    pub fn handle(&mut self, event: PointerEvent) -> Option<GestureOutcome> {
        match event {
            PointerEvent::Down {
                item,
                x,
                width,
                button,
                generation,
            } => {
                if self.session.is_some() {
                    return None;
                }
                self.session = Some(GestureSession {
                    item,
                    origin_x: x,
                    delta: 0.0,
                    swiping: false,
                    button,
                    width,
                    generation,
                });
                None
            }
            PointerEvent::Move { x, secondary_held } => {
                let session = self.session.as_mut()?;
                if session.button == PointerButton::Secondary && !secondary_held {
                    return self.finish();
                }
                session.delta = x - session.origin_x;
                if !session.swiping && session.delta.abs() > self.config.movement_threshold {
                    session.swiping = true;
                }
                None
            }
            PointerEvent::Up { x } => {
                let session = self.session.as_mut()?;
                session.delta = x - session.origin_x;
                if !session.swiping && session.delta.abs() > self.config.movement_threshold {
                    session.swiping = true;
                }
                self.finish()
            }
            PointerEvent::Leave => {
                let session = self.session.take()?;
                Some(GestureOutcome {
                    kind: GestureKind::Cancelled,
                    item: session.item,
                    generation: session.generation,
                })
            }
        }
    }

    fn finish(&mut self) -> Option<GestureOutcome> {
        let session = self.session.take()?;
        Some(GestureOutcome {
            kind: classify_release(&session, &self.config),
            item: session.item,
            generation: session.generation,
        })
    }
}

/// Lazily map a finite sequence of pointer events to committed outcomes
pub fn recognize<I>(events: I, config: GestureConfig) -> impl Iterator<Item = GestureOutcome>
where
    I: IntoIterator<Item = PointerEvent>,
{
    let mut recognizer = GestureRecognizer::new(config);
    events.into_iter().filter_map(move |event| recognizer.handle(event))
}
