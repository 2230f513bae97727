//! Creature constructors: hatchlings, wild specimens, tournament opponents
//!
//! Stat rolls live here so the reducer only ever folds in finished
//! `Monster` values.

use rand::Rng;

use crate::core::types::{Element, MonsterId, Stats};
use crate::data::catalog;
use crate::lore::CreatureLore;
use crate::monster::{Anatomy, Monster};

/// Roll a fresh stat line of `base + 0..10` per stat.
pub fn roll_base_stats<R: Rng>(base: f64, rng: &mut R) -> Stats {
    Stats::new(
        base + rng.gen_range(0..10) as f64,
        base + rng.gen_range(0..10) as f64,
        base + rng.gen_range(0..10) as f64,
        base + rng.gen_range(0..10) as f64,
    )
}

/// Elements favor their signature stat at synthesis time.
pub fn apply_element_affinity(stats: &mut Stats, element: Element) {
    if let Some(kind) = element.signature_stat() {
        *stats.get_mut(kind) += 10.0;
    }
}

/// Build a level-1 hatchling from rolled stats and gateway lore.
pub fn hatchling<R: Rng>(element: Element, stats: Stats, lore: CreatureLore, rng: &mut R) -> Monster {
    let max_hp = 50.0 + stats.defense * 2.0;
    Monster {
        id: MonsterId::new(),
        name: lore.name,
        description: lore.description,
        element,
        level: 1,
        experience: 0,
        stats,
        max_hp,
        current_hp: max_hp,
        dna_quality: rng.gen_range(0..100),
        traits: lore.traits,
        anatomy: lore.anatomy,
        active_buffs: Vec::new(),
    }
}

/// Build a wild specimen discovered during exploration. Wild stock rolls
/// slightly weaker stats but can spawn above level 1.
pub fn wild_specimen<R: Rng>(element: Element, stats: Stats, lore: CreatureLore, rng: &mut R) -> Monster {
    let max_hp = 40.0 + stats.defense * 2.0;
    let mut traits = vec!["Wild".to_string()];
    traits.extend(lore.traits);
    Monster {
        id: MonsterId::new(),
        name: lore.name,
        description: format!("Wild specimen. {}", lore.description),
        element,
        level: 1 + rng.gen_range(0..3),
        experience: 0,
        stats,
        max_hp,
        current_hp: max_hp,
        dna_quality: rng.gen_range(10..70),
        traits,
        anatomy: lore.anatomy,
        active_buffs: Vec::new(),
    }
}

/// Build a tournament challenger scaled to the player's roster.
///
/// Round 1 opponents sit one level below the roster average (min 1);
/// rounds 3 and up climb one level per round past the semifinal.
pub fn tournament_opponent<R: Rng>(
    name: &str,
    round: u32,
    avg_player_level: f64,
    rng: &mut R,
) -> Monster {
    let mut target_level = avg_player_level.floor() as i64;
    if round == 1 {
        target_level = (target_level - 1).max(1);
    } else if round >= 3 {
        target_level += i64::from(round) - 2;
    }
    let level = target_level.max(1) as u32;
    let scaled = f64::from(level) * 2.0;

    let element = Element::ALL[rng.gen_range(0..Element::ALL.len())];
    let max_hp = 60.0 + f64::from(level) * 10.0;

    Monster {
        id: MonsterId::new(),
        name: name.to_string(),
        description: "A tournament challenger.".into(),
        element,
        level,
        experience: 0,
        stats: Stats::new(15.0 + scaled, 15.0 + scaled, 15.0 + scaled, 10.0 + scaled),
        max_hp,
        current_hp: max_hp,
        dna_quality: 50,
        traits: vec!["Competitive".into()],
        anatomy: Anatomy {
            trunk: catalog::TRUNKS[rng.gen_range(0..catalog::TRUNKS.len())].into(),
            head: catalog::HEADS[rng.gen_range(0..catalog::HEADS.len())].into(),
            appendages: vec![
                catalog::APPENDAGES[rng.gen_range(0..catalog::APPENDAGES.len())].into()
            ],
        },
        active_buffs: Vec::new(),
    }
}
