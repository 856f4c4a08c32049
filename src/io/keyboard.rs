//! Computer keyboard as a one-and-a-bit octave piano.
//!
//! ```text
//!  |   | S |   | F | G |   | J | K | L |
//!  | Z | X | C | V | B | N | M | , | . |
//! ```
//!
//! The bottom letter row gives the white keys and the row above the black
//! keys, so the fifteen keys map onto semitone offsets 0..=14 from the
//! keyboard's base note.
//!
//! Terminals report presses, but only some report releases. When releases
//! are available they are tracked exactly. Otherwise a key counts as held for
//! a short window after its last press or auto-repeat event.

/// Physical keys in semitone order.
pub const KEYMAP: [char; 15] = [
    'z', 's', 'x', 'c', 'f', 'v', 'g', 'b', 'n', 'j', 'm', 'k', ',', 'l', '.',
];

/// How long a key stays down after its last event when releases are not reported.
pub const HOLD_WINDOW: f64 = 0.5;

/// Held/released state of every mapped key.
#[derive(Debug, Clone)]
pub struct KeyboardState {
    /// Last press or repeat time per key, in control-loop seconds
    last_seen: [Option<f64>; KEYMAP.len()],
    /// Terminal reports key releases
    release_events: bool,
    hold_window: f64,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            last_seen: [None; KEYMAP.len()],
            release_events: false,
            hold_window: HOLD_WINDOW,
        }
    }

    /// Trust explicit release events instead of the hold window.
    pub fn with_release_events(mut self, enabled: bool) -> Self {
        self.release_events = enabled;
        self
    }

    pub fn with_hold_window(mut self, seconds: f64) -> Self {
        self.hold_window = seconds.max(0.0);
        self
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    /// Semitone offset of `key`, if it is on the keymap.
    pub fn offset_of(key: char) -> Option<usize> {
        let key = key.to_ascii_lowercase();
        KEYMAP.iter().position(|&k| k == key)
    }

    /// Record a press or auto-repeat of `key` at `now`. Returns false for unmapped keys.
    pub fn press(&mut self, key: char, now: f64) -> bool {
        match Self::offset_of(key) {
            Some(offset) => {
                self.last_seen[offset] = Some(now);
                true
            }
            None => false,
        }
    }

    /// Record an explicit release of `key`.
    pub fn release(&mut self, key: char) -> bool {
        match Self::offset_of(key) {
            Some(offset) => {
                self.last_seen[offset] = None;
                true
            }
            None => false,
        }
    }

    /// Whether the key at semitone `offset` is down at `now`.
    pub fn is_held(&self, offset: usize, now: f64) -> bool {
        match self.last_seen.get(offset).copied().flatten() {
            Some(_) if self.release_events => true,
            Some(seen) => now - seen <= self.hold_window,
            None => false,
        }
    }

    /// Held/released state of every key in semitone order.
    pub fn poll(&self, now: f64) -> [bool; KEYMAP.len()] {
        std::array::from_fn(|offset| self.is_held(offset, now))
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}
