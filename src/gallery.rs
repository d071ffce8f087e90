//! Earth View image viewer state
//!
//! Navigation wraps in both directions. Playback is driven by [`Gallery::tick`]
//! with an explicit clock so it can be tested without sleeping.

use std::time::{Duration, Instant};

/// Delay between automatic advances during playback
pub const AUTO_ADVANCE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    len: usize,
    selected: Option<usize>,
    playing: bool,
    last_advance: Option<Instant>,
}

impl Gallery {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the image in the viewer, if it is open
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Updates the collection size after a reload; an empty collection closes the viewer
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        match self.selected {
            _ if len == 0 => self.close(),
            Some(i) if i >= len => self.selected = Some(len - 1),
            _ => {}
        }
    }

    /// Opens the viewer at `index`; returns false for an empty collection or a bad index
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Clears the selection and stops playback
    pub fn close(&mut self) {
        self.selected = None;
        self.playing = false;
        self.last_advance = None;
    }

    pub fn next(&mut self) {
        if let Some(i) = self.selected {
            self.selected = Some((i + 1) % self.len);
        }
    }

    pub fn previous(&mut self) {
        if let Some(i) = self.selected {
            self.selected = Some((i + self.len - 1) % self.len);
        }
    }

    /// Starts or stops playback; the first automatic advance comes [`AUTO_ADVANCE`] after `now`
    pub fn toggle_play(&mut self, now: Instant) {
        if !self.is_open() {
            return;
        }
        self.playing = !self.playing;
        self.last_advance = self.playing.then_some(now);
    }

    /// Advances once if playback is on and the delay has elapsed since the last advance
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_advance.filter(|_| self.playing) else {
            return false;
        };
        if now.duration_since(last) < AUTO_ADVANCE {
            return false;
        }
        self.next();
        self.last_advance = Some(now);
        true
    }
}
