//! Battle session integration tests: the full action-driven combat flow

use terra_chimera::core::types::{Element, Faction, MonsterId, Stats};
use terra_chimera::monster::{Anatomy, Monster};
use terra_chimera::state::{Action, BattlePhase, Store};

fn monster(name: &str, attack: f64, speed: f64, hp: f64) -> Monster {
    Monster {
        id: MonsterId::new(),
        name: name.into(),
        description: String::new(),
        element: Element::Geo,
        level: 2,
        experience: 0,
        stats: Stats::new(attack, 10.0, speed, 10.0),
        max_hp: hp,
        current_hp: hp,
        dna_quality: 50,
        traits: vec![],
        anatomy: Anatomy::new("Bestial", "Horned", &[]),
        active_buffs: vec![],
    }
}

fn store_with_fighter(attack: f64, speed: f64, hp: f64) -> (Store, MonsterId) {
    let mut store = Store::new(21);
    store.dispatch(Action::SelectFaction {
        faction: Faction::GeoForge,
    });
    let fighter = monster("Champion", attack, speed, hp);
    let id = fighter.id;
    store.state.monsters.push(fighter);
    (store, id)
}

#[test]
fn start_battle_opens_planning_at_round_one() {
    let (mut store, fighter_id) = store_with_fighter(40.0, 30.0, 500.0);

    store.dispatch(Action::StartBattle {
        player_monster_id: fighter_id,
        opponent: monster("Challenger", 40.0, 10.0, 500.0),
    });

    let battle = &store.state.battle;
    assert!(battle.is_active);
    assert_eq!(battle.round, 1);
    assert_eq!(battle.phase, BattlePhase::Planning);
    assert_eq!(battle.logs.len(), 1);
}

#[test]
fn first_strike_kill_leaves_player_untouched() {
    // Overwhelming attack, higher speed: guaranteed one-hit kill
    let (mut store, fighter_id) = store_with_fighter(10_000.0, 50.0, 300.0);

    store.dispatch(Action::StartBattle {
        player_monster_id: fighter_id,
        opponent: monster("Challenger", 10_000.0, 10.0, 100.0),
    });
    store.dispatch(Action::NextRound);

    let battle = &store.state.battle;
    assert_eq!(battle.phase, BattlePhase::Victory);
    assert_eq!(battle.opponent.as_ref().unwrap().current_hp, 0.0);
    // The counter-attack never happened
    assert_eq!(
        store.state.monster(fighter_id).unwrap().current_hp,
        300.0
    );
}

#[test]
fn surviving_round_returns_to_planning() {
    let (mut store, fighter_id) = store_with_fighter(40.0, 30.0, 500.0);

    store.dispatch(Action::StartBattle {
        player_monster_id: fighter_id,
        opponent: monster("Challenger", 40.0, 10.0, 500.0),
    });
    store.dispatch(Action::NextRound);

    let battle = &store.state.battle;
    assert_eq!(battle.phase, BattlePhase::Planning);
    assert_eq!(battle.round, 2);
    assert!(battle.opponent.as_ref().unwrap().current_hp < 500.0);
    assert!(store.state.monster(fighter_id).unwrap().current_hp < 500.0);
}

#[test]
fn battle_runs_to_a_kill_eventually() {
    let (mut store, fighter_id) = store_with_fighter(60.0, 30.0, 5_000.0);

    store.dispatch(Action::StartBattle {
        player_monster_id: fighter_id,
        opponent: monster("Challenger", 60.0, 10.0, 400.0),
    });

    let mut rounds = 0;
    while store.state.battle.phase == BattlePhase::Planning && rounds < 100 {
        store.dispatch(Action::NextRound);
        rounds += 1;
    }

    // Player outlasts by raw HP; around 28 damage per hit vs 400 HP
    assert_eq!(store.state.battle.phase, BattlePhase::Victory);
    assert!(rounds >= 2);
}

#[test]
fn end_battle_pays_reward_and_records_history() {
    let (mut store, fighter_id) = store_with_fighter(10_000.0, 50.0, 300.0);
    let credits_before = store.state.resources.credits;

    store.dispatch(Action::StartBattle {
        player_monster_id: fighter_id,
        opponent: monster("Challenger", 10.0, 10.0, 100.0),
    });
    store.dispatch(Action::NextRound);
    assert_eq!(store.state.battle.phase, BattlePhase::Victory);
    let round = store.state.battle.round;

    store.dispatch(Action::EndBattle { won: true });

    // 150 + round * 10, no tournament link so no grand prize
    assert_eq!(
        store.state.resources.credits,
        credits_before + 150.0 + f64::from(round) * 10.0
    );
    assert_eq!(store.state.battle_history.len(), 1);
    let record = &store.state.battle_history[0];
    assert!(record.won);
    assert_eq!(record.opponent_name, "Challenger");

    let stats = &store.state.faction_stats[&Faction::GeoForge];
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.score, 150.0);

    // Session is reset to idle
    assert!(!store.state.battle.is_active);
    assert!(store.state.battle.opponent.is_none());
    assert_eq!(store.state.battle.phase, BattlePhase::Planning);
}

#[test]
fn end_battle_clears_player_buffs() {
    let (mut store, fighter_id) = store_with_fighter(10_000.0, 50.0, 300.0);

    let rage = terra_chimera::data::catalog::spell_by_id("enrage").unwrap();
    store.dispatch(Action::CastSpell {
        spell: rage,
        target_id: Some(fighter_id),
    });
    assert_eq!(
        store.state.monster(fighter_id).unwrap().active_buffs.len(),
        1
    );

    store.dispatch(Action::StartBattle {
        player_monster_id: fighter_id,
        opponent: monster("Challenger", 10.0, 10.0, 100.0),
    });
    store.dispatch(Action::NextRound);
    store.dispatch(Action::EndBattle { won: true });

    assert!(store
        .state
        .monster(fighter_id)
        .unwrap()
        .active_buffs
        .is_empty());
}

#[test]
fn lost_battle_tallies_loss_and_pays_nothing() {
    let (mut store, fighter_id) = store_with_fighter(10.0, 10.0, 50.0);
    let credits_before = store.state.resources.credits;

    store.dispatch(Action::StartBattle {
        player_monster_id: fighter_id,
        opponent: monster("Challenger", 10_000.0, 50.0, 500.0),
    });
    store.dispatch(Action::NextRound);
    assert_eq!(store.state.battle.phase, BattlePhase::Defeat);

    store.dispatch(Action::EndBattle { won: false });

    assert_eq!(store.state.resources.credits, credits_before);
    let stats = &store.state.faction_stats[&Faction::GeoForge];
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.score, 105.0);
    let record = &store.state.battle_history[0];
    assert!(!record.won);
    assert_eq!(record.reward, "None");
}

#[test]
fn reset_battle_recovers_corrupted_session() {
    let (mut store, _) = store_with_fighter(40.0, 30.0, 500.0);

    // Corrupted: active with no combatants
    store.state.battle.is_active = true;
    store.state.battle.player_monster_id = None;
    store.state.battle.opponent = None;

    // NextRound on the corrupt session is a harmless no-op
    store.dispatch(Action::NextRound);
    assert!(store.state.battle.is_active);

    store.dispatch(Action::ResetBattle);
    assert!(!store.state.battle.is_active);
    assert_eq!(store.state.battle.phase, BattlePhase::Planning);
}
