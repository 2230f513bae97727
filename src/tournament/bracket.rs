//! Bracket construction and advancement
//!
//! The bracket is a binary tree built bottom-up from `2^rounds` leaf
//! participants. Non-player matches are never fought: when the player's
//! own match concludes, every other open match in that round is settled
//! by a coin flip and the winners propagate along the forward links.

use rand::Rng;

use crate::core::types::Element;
use crate::data::catalog;
use crate::tournament::{
    MatchSlot, MatchStatus, Tournament, TournamentMatch, TournamentParticipant,
};

/// Participant id reserved for the player.
pub const PLAYER_ID: &str = "player";

/// Build a fresh bracket of `2^rounds` participants.
///
/// Participant 0 is the player, so the player is always seeded into slot
/// p1 of the first round-1 match.
pub fn create_bracket<R: Rng>(
    rounds: u32,
    rng: &mut R,
) -> (Vec<TournamentMatch>, Vec<TournamentParticipant>) {
    let entrants = 2usize.pow(rounds);

    let mut participants = Vec::with_capacity(entrants);
    participants.push(TournamentParticipant::player());
    for i in 1..entrants {
        let rival = catalog::RIVAL_NAMES[rng.gen_range(0..catalog::RIVAL_NAMES.len())];
        let element = Element::ALL[rng.gen_range(0..Element::ALL.len())];
        participants.push(TournamentParticipant {
            id: format!("npc-{i}"),
            name: rival.to_string(),
            is_player: false,
            monster_name: Some(format!("{element} Specimen X-{}", rng.gen_range(0..900))),
        });
    }

    let mut matches = Vec::new();

    // Round 1: pair participants by index
    for i in 0..entrants / 2 {
        matches.push(TournamentMatch {
            id: format!("r1-m{i}"),
            round: 1,
            next_match_id: None,
            next_match_slot: None,
            p1: Some(participants[i * 2].clone()),
            p2: Some(participants[i * 2 + 1].clone()),
            winner_id: None,
            status: MatchStatus::Ready,
        });
    }

    // Rounds 2..=N: empty placeholders, linked back to their feeders
    let mut prev_round_start = 0;
    let mut prev_round_count = entrants / 2;
    for round in 2..=rounds {
        let matches_in_round = entrants / 2usize.pow(round);
        for i in 0..matches_in_round {
            let match_id = format!("r{round}-m{i}");

            matches[prev_round_start + i * 2].next_match_id = Some(match_id.clone());
            matches[prev_round_start + i * 2].next_match_slot = Some(MatchSlot::P1);
            matches[prev_round_start + i * 2 + 1].next_match_id = Some(match_id.clone());
            matches[prev_round_start + i * 2 + 1].next_match_slot = Some(MatchSlot::P2);

            matches.push(TournamentMatch {
                id: match_id,
                round,
                next_match_id: None,
                next_match_slot: None,
                p1: None,
                p2: None,
                winner_id: None,
                status: MatchStatus::Pending,
            });
        }
        prev_round_start += prev_round_count;
        prev_round_count = matches_in_round;
    }

    (matches, participants)
}

/// Send `winner` along a completed match's forward link, if there is one.
fn propagate_winner(
    tournament: &mut Tournament,
    from_index: usize,
    winner: TournamentParticipant,
) {
    let Some(next_id) = tournament.matches[from_index].next_match_id.clone() else {
        return;
    };
    let slot = tournament.matches[from_index]
        .next_match_slot
        .unwrap_or(MatchSlot::P1);
    if let Some(next_index) = tournament.match_index(&next_id) {
        *tournament.matches[next_index].slot_mut(slot) = Some(winner);
    }
}

/// Advance the bracket after the player wins `match_id`.
///
/// Returns true when the player has won the whole tournament (the match
/// had no forward link). Otherwise the remaining matches of the round are
/// coin-flipped, winners propagate, and the next round is marked ready.
pub fn advance_player_win<R: Rng>(
    tournament: &mut Tournament,
    match_id: &str,
    rng: &mut R,
) -> bool {
    let Some(index) = tournament.match_index(match_id) else {
        return false;
    };

    tournament.matches[index].winner_id = Some(PLAYER_ID.into());
    tournament.matches[index].status = MatchStatus::Completed;

    let grand_victory = tournament.matches[index].next_match_id.is_none();
    if !grand_victory {
        propagate_winner(tournament, index, TournamentParticipant::player());
    }

    // Settle every other open match in this round
    let round = tournament.matches[index].round;
    for i in 0..tournament.matches.len() {
        let m = &tournament.matches[i];
        if m.round != round || m.id == match_id || m.winner_id.is_some() {
            continue;
        }

        let pick = if rng.gen_bool(0.5) {
            m.p1.clone()
        } else {
            m.p2.clone()
        };
        // Fall back to whichever slot is non-null
        let winner = pick
            .or_else(|| m.p1.clone())
            .or_else(|| m.p2.clone())
            .unwrap_or(TournamentParticipant {
                id: "ghost".into(),
                name: "Unknown".into(),
                is_player: false,
                monster_name: None,
            });

        tournament.matches[i].winner_id = Some(winner.id.clone());
        tournament.matches[i].status = MatchStatus::Completed;
        propagate_winner(tournament, i, winner);
    }

    if grand_victory {
        tournament.is_active = false;
    } else {
        tournament.current_round += 1;
        let current = tournament.current_round;
        for m in &mut tournament.matches {
            if m.round == current {
                m.status = MatchStatus::Ready;
            }
        }
    }

    grand_victory
}

/// Advance the bracket after the player loses `match_id`.
///
/// The player is eliminated, so the tournament deactivates; the rest of
/// the bracket is intentionally left un-simulated.
pub fn advance_player_loss(tournament: &mut Tournament, match_id: &str) {
    let Some(index) = tournament.match_index(match_id) else {
        return;
    };

    let winner_id = tournament.matches[index]
        .opponent_of_player()
        .map_or_else(|| "npc".to_string(), |p| p.id.clone());
    tournament.matches[index].winner_id = Some(winner_id);
    tournament.matches[index].status = MatchStatus::Completed;
    tournament.is_active = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bracket_of(rounds: u32) -> Tournament {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let (matches, participants) = create_bracket(rounds, &mut rng);
        Tournament {
            is_active: true,
            hex_id: Some("1,1".into()),
            total_rounds: rounds,
            current_round: 1,
            matches,
            participants,
        }
    }

    #[test]
    fn test_bracket_shape_two_rounds() {
        let t = bracket_of(2);
        assert_eq!(t.participants.len(), 4);
        assert_eq!(t.matches.len(), 3);

        // Player seeded at slot p1 of the first match
        assert!(t.matches[0].p1.as_ref().unwrap().is_player);

        // Both round-1 matches feed the final
        assert_eq!(t.matches[0].next_match_id.as_deref(), Some("r2-m0"));
        assert_eq!(t.matches[0].next_match_slot, Some(MatchSlot::P1));
        assert_eq!(t.matches[1].next_match_id.as_deref(), Some("r2-m0"));
        assert_eq!(t.matches[1].next_match_slot, Some(MatchSlot::P2));

        // The final has no outgoing link and starts empty
        let last = t.matches.last().unwrap();
        assert_eq!(last.next_match_id, None);
        assert_eq!(last.status, MatchStatus::Pending);
        assert!(last.p1.is_none() && last.p2.is_none());
    }

    #[test]
    fn test_bracket_shape_three_rounds() {
        let t = bracket_of(3);
        assert_eq!(t.participants.len(), 8);
        assert_eq!(t.matches.len(), 7);

        // Every match but the final has exactly one outgoing link
        let without_link = t
            .matches
            .iter()
            .filter(|m| m.next_match_id.is_none())
            .count();
        assert_eq!(without_link, 1);

        // Semifinals feed the final
        assert_eq!(t.matches[4].next_match_id.as_deref(), Some("r3-m0"));
        assert_eq!(t.matches[5].next_match_id.as_deref(), Some("r3-m0"));
    }

    #[test]
    fn test_npc_participants_have_display_creatures() {
        let t = bracket_of(2);
        for p in &t.participants[1..] {
            assert!(!p.is_player);
            assert!(p.monster_name.as_ref().unwrap().contains("Specimen X-"));
        }
    }

    #[test]
    fn test_player_win_simulates_sibling_and_readies_next_round() {
        let mut t = bracket_of(2);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let grand = advance_player_win(&mut t, "r1-m0", &mut rng);
        assert!(!grand);
        assert!(t.is_active);
        assert_eq!(t.current_round, 2);

        // The sibling match was settled with exactly one of its entrants
        let sibling = t.match_by_id("r1-m1").unwrap();
        assert_eq!(sibling.status, MatchStatus::Completed);
        let winner_id = sibling.winner_id.clone().unwrap();
        assert!(
            sibling.p1.as_ref().unwrap().id == winner_id
                || sibling.p2.as_ref().unwrap().id == winner_id
        );

        // Final holds the player and the simulated winner, and is ready
        let last = t.match_by_id("r2-m0").unwrap();
        assert_eq!(last.status, MatchStatus::Ready);
        assert!(last.p1.as_ref().unwrap().is_player);
        assert_eq!(last.p2.as_ref().unwrap().id, winner_id);
    }

    #[test]
    fn test_final_win_is_grand_victory() {
        let mut t = bracket_of(2);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        advance_player_win(&mut t, "r1-m0", &mut rng);
        let grand = advance_player_win(&mut t, "r2-m0", &mut rng);

        assert!(grand);
        assert!(!t.is_active);
        assert_eq!(
            t.match_by_id("r2-m0").unwrap().winner_id.as_deref(),
            Some(PLAYER_ID)
        );
    }

    #[test]
    fn test_player_loss_deactivates_without_simulation() {
        let mut t = bracket_of(2);

        advance_player_loss(&mut t, "r1-m0");

        assert!(!t.is_active);
        let lost = t.match_by_id("r1-m0").unwrap();
        assert_eq!(lost.status, MatchStatus::Completed);
        assert_eq!(
            lost.winner_id.as_deref(),
            Some(lost.p2.as_ref().unwrap().id.as_str())
        );

        // Sibling is left untouched
        let sibling = t.match_by_id("r1-m1").unwrap();
        assert!(sibling.winner_id.is_none());
        assert_eq!(sibling.status, MatchStatus::Ready);
    }

    #[test]
    fn test_unknown_match_is_a_no_op() {
        let mut t = bracket_of(2);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let grand = advance_player_win(&mut t, "r9-m9", &mut rng);
        assert!(!grand);
        assert_eq!(t.current_round, 1);
    }
}
