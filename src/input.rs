//! Host input collection
//!
//! Browsers (or any host) report key-downs and pointer movement whenever they
//! happen. They are buffered here and handed to the simulation once per
//! frame: key presses in arrival order, pointer position as "latest wins".

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Command, PointerSample, Steer, TickInput};

/// Axis-aligned screen rectangle in pixels, top-left origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// `[x, y, width, height]`
    pub const fn from_array([x, y, width, height]: [f32; 4]) -> Self {
        Self::new(x, y, width, height)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Space,
    Z,
    W,
    A,
    S,
    D,
    T,
}

impl Key {
    /// Parse a logical key name ("space", "w", ...), case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "space" | " " | "spacebar" => Some(Key::Space),
            "z" => Some(Key::Z),
            "w" => Some(Key::W),
            "a" => Some(Key::A),
            "s" => Some(Key::S),
            "d" => Some(Key::D),
            "t" => Some(Key::T),
            _ => None,
        }
    }

    pub fn command(&self) -> Command {
        match self {
            Key::Space => Command::TogglePause,
            Key::Z => Command::ToggleGrid,
            Key::T => Command::CycleDifficulty,
            Key::W => Command::Steer(Steer::PitchUp),
            Key::S => Command::Steer(Steer::PitchDown),
            Key::A => Command::Steer(Steer::YawLeft),
            Key::D => Command::Steer(Steer::YawRight),
        }
    }
}

/// Input gathered between two frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pending: Vec<Command>,
    pointer: PointerSample,
    viewport: Vec2,
    /// Idle/demo mode
    pub autopilot: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down by logical name. Returns false for keys the game ignores.
    pub fn key_down(&mut self, name: &str) -> bool {
        match Key::from_name(name) {
            Some(key) => {
                self.pending.push(key.command());
                true
            }
            None => {
                log::debug!("Ignoring key {:?}", name);
                false
            }
        }
    }

    pub fn press(&mut self, key: Key) {
        self.pending.push(key.command());
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer.position = Vec2::new(x, y);
    }

    pub fn pointer_button(&mut self, held: bool) {
        self.pointer.held = held;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(0.0), height.max(0.0));
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn pointer(&self) -> PointerSample {
        self.pointer
    }

    /// Build this frame's input, draining one-shot key presses
    pub fn take_tick_input(&mut self, dt: f32) -> TickInput {
        TickInput {
            dt,
            commands: std::mem::take(&mut self.pending),
            pointer: self.pointer,
            viewport: self.viewport,
            autopilot: self.autopilot,
        }
    }
}
