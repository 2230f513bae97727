//! Single-elimination tournament state

pub mod bracket;

use serde::{Deserialize, Serialize};

/// Bracket slot designator; winners feed forward into one of the two
/// slots of their next match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSlot {
    P1,
    P2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Pending,
    Ready,
    Active,
    Completed,
}

/// An entrant in the bracket; participant 0 is always the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentParticipant {
    pub id: String,
    pub name: String,
    pub is_player: bool,
    /// Display name for the creature an NPC fields
    pub monster_name: Option<String>,
}

impl TournamentParticipant {
    pub fn player() -> Self {
        Self {
            id: bracket::PLAYER_ID.into(),
            name: "You".into(),
            is_player: true,
            monster_name: None,
        }
    }
}

/// One node of the bracket tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentMatch {
    pub id: String,
    pub round: u32,
    /// Forward link: every match except the final has exactly one
    pub next_match_id: Option<String>,
    pub next_match_slot: Option<MatchSlot>,
    pub p1: Option<TournamentParticipant>,
    pub p2: Option<TournamentParticipant>,
    pub winner_id: Option<String>,
    pub status: MatchStatus,
}

impl TournamentMatch {
    pub fn slot_mut(&mut self, slot: MatchSlot) -> &mut Option<TournamentParticipant> {
        match slot {
            MatchSlot::P1 => &mut self.p1,
            MatchSlot::P2 => &mut self.p2,
        }
    }

    pub fn involves_player(&self) -> bool {
        self.p1.as_ref().is_some_and(|p| p.is_player)
            || self.p2.as_ref().is_some_and(|p| p.is_player)
    }

    /// The non-player side of this match, if any
    pub fn opponent_of_player(&self) -> Option<&TournamentParticipant> {
        [&self.p1, &self.p2]
            .into_iter()
            .filter_map(|p| p.as_ref())
            .find(|p| !p.is_player)
    }
}

/// The active bracket session; at most one exists, replaced wholesale by
/// the next tournament entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub is_active: bool,
    pub hex_id: Option<String>,
    pub total_rounds: u32,
    pub current_round: u32,
    pub matches: Vec<TournamentMatch>,
    pub participants: Vec<TournamentParticipant>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self {
            is_active: false,
            hex_id: None,
            total_rounds: 0,
            current_round: 0,
            matches: Vec::new(),
            participants: Vec::new(),
        }
    }
}

impl Tournament {
    pub fn match_index(&self, match_id: &str) -> Option<usize> {
        self.matches.iter().position(|m| m.id == match_id)
    }

    pub fn match_by_id(&self, match_id: &str) -> Option<&TournamentMatch> {
        self.matches.iter().find(|m| m.id == match_id)
    }
}
