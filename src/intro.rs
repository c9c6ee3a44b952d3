//! Intro overlay controller: one-time typewriter reveal of the site title,
//! then a Begin click that fades the overlay out and shows the main content.
//!
//! The controller is a plain state machine so the timing chain can be driven
//! by whatever scheduler the caller has: in the browser a self-rescheduling
//! `setTimeout` chain (see `page`), in tests a loop. Each `type_step` runs to
//! completion before the next is scheduled; nothing here runs concurrently.
//!
//! Phases:
//! - `Typing`: revealing the title one character at a time, each step
//!   followed by a random delay in [60, 140) ms.
//! - `AwaitBegin`: full title shown (title blinks, Begin control visible);
//!   waiting indefinitely for a click.
//! - `FadingOut`: Begin clicked, fade-out class applied; a single fixed
//!   900 ms deferred action completes the transition.
//! - `Done`: overlay hidden, main content visible, session flag set. Terminal
//!   until a new session clears the flag.

use crate::store::{KeyValueStore, StoreError};

/// sessionStorage key marking the intro as seen for this session.
pub const INTRO_SEEN_KEY: &str = "konnerverseIntro";
/// Sentinel value stored under [`INTRO_SEEN_KEY`].
pub const INTRO_SEEN_VALUE: &str = "true";

/// Bounds of the per-character delay, milliseconds.
pub const KEY_DELAY_MIN_MS: f64 = 60.0;
pub const KEY_DELAY_MAX_MS: f64 = 140.0;

/// Fixed delay between the Begin click and the overlay being hidden.
pub const FADE_OUT_MS: i32 = 900;

/// Map a uniform sample in [0, 1) to a key delay in [60, 140) ms.
pub fn key_delay_ms(unit: f64) -> f64 {
    unit * (KEY_DELAY_MAX_MS - KEY_DELAY_MIN_MS) + KEY_DELAY_MIN_MS
}

/// Character-by-character reveal of a string.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    revealed: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            revealed: 0,
        }
    }

    /// Reveal one more character and return the prefix now visible, or
    /// `None` once the whole string is out.
    pub fn step(&mut self) -> Option<String> {
        if self.revealed < self.chars.len() {
            self.revealed += 1;
            Some(self.chars[..self.revealed].iter().collect())
        } else {
            None
        }
    }

    pub fn finished(&self) -> bool {
        self.revealed == self.chars.len()
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroPhase {
    Typing,
    AwaitBegin,
    FadingOut,
    Done,
}

/// Result of one typewriter tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeEvent {
    /// Show this prefix, then schedule the next tick after a random delay.
    Reveal { text: String },
    /// Title fully revealed: apply the blink state and show Begin (once).
    Complete,
    /// Nothing to type (no title, or typing already over).
    Idle,
}

pub struct IntroController {
    phase: IntroPhase,
    typewriter: Option<Typewriter>,
    skipped: bool,
}

impl IntroController {
    /// Build from an already-read session flag. `title` is the text to
    /// animate; pages without a title element pass `None` and get no
    /// animation (the Begin click still works).
    pub fn new(seen: bool, title: Option<&str>) -> Self {
        if seen {
            Self {
                phase: IntroPhase::Done,
                typewriter: None,
                skipped: true,
            }
        } else {
            Self {
                phase: IntroPhase::Typing,
                typewriter: title.map(Typewriter::new),
                skipped: false,
            }
        }
    }

    /// Read the session flag from `store` and build accordingly.
    pub fn load(store: &impl KeyValueStore, title: Option<&str>) -> Self {
        Self::new(store.get(INTRO_SEEN_KEY).is_some(), title)
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// True when the intro was skipped at load (flag already set).
    pub fn skipped(&self) -> bool {
        self.skipped
    }

    /// Advance the typewriter by one character. Returns `Complete` exactly
    /// once, on the tick after the last character.
    pub fn type_step(&mut self) -> TypeEvent {
        if self.phase != IntroPhase::Typing {
            return TypeEvent::Idle;
        }
        let Some(tw) = self.typewriter.as_mut() else {
            return TypeEvent::Idle;
        };
        match tw.step() {
            Some(text) => TypeEvent::Reveal { text },
            None => {
                self.phase = IntroPhase::AwaitBegin;
                TypeEvent::Complete
            }
        }
    }

    /// Begin was clicked. Returns true when the fade-out should start; a
    /// click while already fading (or after Done) is ignored. Clicking
    /// mid-typing is allowed, matching the page's always-wired handler.
    pub fn begin_clicked(&mut self) -> bool {
        match self.phase {
            IntroPhase::Typing | IntroPhase::AwaitBegin => {
                self.phase = IntroPhase::FadingOut;
                true
            }
            IntroPhase::FadingOut | IntroPhase::Done => false,
        }
    }

    /// The 900 ms fade timer fired: enter `Done` and record the session flag.
    /// Returns `Ok(false)` when not fading (stale timer).
    pub fn fade_finished(&mut self, store: &mut impl KeyValueStore) -> Result<bool, StoreError> {
        if self.phase != IntroPhase::FadingOut {
            return Ok(false);
        }
        self.phase = IntroPhase::Done;
        store.set(INTRO_SEEN_KEY, INTRO_SEEN_VALUE)?;
        Ok(true)
    }
}
