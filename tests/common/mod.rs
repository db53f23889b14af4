//! Shared helpers for integration tests.
#![allow(dead_code)]

use dwellpad::geometry::Point;
use dwellpad::input::InputSink;
use dwellpad::keys::{KeyChord, MouseButton};

/// One call made on a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum Posted {
    Down(KeyChord),
    Up(KeyChord),
    Click(MouseButton, Point),
}

/// [`InputSink`] that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub posted: Vec<Posted>,
}

impl RecordingSink {
    pub fn downs(&self) -> Vec<KeyChord> {
        self.posted
            .iter()
            .filter_map(|p| match p {
                Posted::Down(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn ups(&self) -> Vec<KeyChord> {
        self.posted
            .iter()
            .filter_map(|p| match p {
                Posted::Up(c) => Some(*c),
                _ => None,
            })
            .collect()
    }
}

impl InputSink for RecordingSink {
    fn key_down(&mut self, chord: &KeyChord) {
        self.posted.push(Posted::Down(*chord));
    }

    fn key_up(&mut self, chord: &KeyChord) {
        self.posted.push(Posted::Up(*chord));
    }

    fn click(&mut self, button: MouseButton, at: Point) {
        self.posted.push(Posted::Click(button, at));
    }
}

pub fn chord(s: &str) -> KeyChord {
    KeyChord::parse(s).expect("valid chord")
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
