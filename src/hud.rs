//! Scoreboard text
//!
//! The HUD is a handful of labelled text fields. A [`HudReport`] is built
//! from the game state every frame and pushed into whatever [`HudSink`] the
//! host provides (DOM elements in the browser, a log line natively).

use serde::{Deserialize, Serialize};

use crate::render::PickHit;
use crate::sim::{GamePhase, GameState};

/// HUD text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HudField {
    Time,
    Size,
    Goal,
    Difficulty,
    Selected,
    EndGame,
    EndGameDescription,
}

impl HudField {
    pub const ALL: [HudField; 7] = [
        HudField::Time,
        HudField::Size,
        HudField::Goal,
        HudField::Difficulty,
        HudField::Selected,
        HudField::EndGame,
        HudField::EndGameDescription,
    ];

    /// DOM element id the field is written to
    pub fn element_id(&self) -> &'static str {
        match self {
            HudField::Time => "time",
            HudField::Size => "size",
            HudField::Goal => "goal",
            HudField::Difficulty => "difficulty",
            HudField::Selected => "selected",
            HudField::EndGame => "endGame",
            HudField::EndGameDescription => "endGameDescrip",
        }
    }
}

/// Receives HUD text. Write-only.
pub trait HudSink {
    fn set_text(&mut self, field: HudField, text: &str);
}

/// Text for every HUD field. Multi-line values use `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudReport {
    pub time: String,
    pub size: String,
    pub goal: String,
    pub difficulty: String,
    pub selected: String,
    pub end_game: String,
    pub end_game_description: String,
}

impl HudReport {
    pub fn from_state(state: &GameState) -> Self {
        let end_game = match state.phase {
            GamePhase::Ready => "Press Space to Start".to_string(),
            GamePhase::Running => String::new(),
            GamePhase::Paused => "Game Paused".to_string(),
            GamePhase::Over(_) => "Game Over!\nPress Space to Restart".to_string(),
        };
        let end_game_description = state
            .outcome()
            .map(|outcome| outcome.description().to_string())
            .unwrap_or_default();

        Self {
            time: format!("Time Remaining: {}", state.time_remaining),
            size: format!("Current Size: {}", state.player.radius.trunc() as i64),
            goal: format!("Goal: {}", state.goal().trunc() as i64),
            difficulty: format!("Difficulty: {}", state.difficulty.label()),
            selected: String::new(),
            end_game,
            end_game_description,
        }
    }

    /// Fill in the picked-object line
    pub fn with_selection(mut self, hit: Option<PickHit>) -> Self {
        self.selected = match hit {
            Some(hit) => format!("Selected Object Size: {}", hit.radius.trunc() as i64),
            None => "No Object Selected!".to_string(),
        };
        self
    }

    pub fn text(&self, field: HudField) -> &str {
        match field {
            HudField::Time => &self.time,
            HudField::Size => &self.size,
            HudField::Goal => &self.goal,
            HudField::Difficulty => &self.difficulty,
            HudField::Selected => &self.selected,
            HudField::EndGame => &self.end_game,
            HudField::EndGameDescription => &self.end_game_description,
        }
    }

    /// Push every field to the sink
    pub fn apply(&self, sink: &mut impl HudSink) {
        for field in HudField::ALL {
            sink.set_text(field, self.text(field));
        }
    }
}
