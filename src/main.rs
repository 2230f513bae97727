//! Terra Chimera - Entry Point
//!
//! Thin interactive shell over the game-state core: it parses line
//! commands into intents, drives the tick scheduler, and prints state.
//! All rules live behind the action protocol; nothing here mutates state
//! directly.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use rand::Rng;
use tokio::runtime::Runtime;

use terra_chimera::command::CommandExecutor;
use terra_chimera::core::error::Result;
use terra_chimera::core::types::{Element, Faction, MonsterId, StaffRole, StatKind};
use terra_chimera::lore::LoreClient;
use terra_chimera::scheduler;
use terra_chimera::state::{save, Store};

#[derive(Parser)]
#[command(name = "terra-chimera")]
#[command(about = "Hex-grid creature strategy simulation")]
struct Cli {
    /// Seed for the deterministic random source
    #[arg(long)]
    seed: Option<u64>,

    /// Snapshot file to load on start and write on `save`
    #[arg(long, default_value = "terra-chimera-save.json")]
    save: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "terra_chimera=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    tracing::info!(seed, "terra chimera starting");

    // Async runtime for lore gateway calls
    let rt = Runtime::new()?;

    let mut store = if cli.save.exists() {
        Store::from_state(save::load(&cli.save)?, seed)
    } else {
        Store::new(seed)
    };

    let lore_client = LoreClient::from_env().ok();
    if lore_client.is_none() {
        tracing::warn!("LORE_API_KEY not set - running with deterministic fallback lore");
    }

    println!("\n=== TERRA CHIMERA ===");
    println!("Select your corporate sponsor for the planetary expedition.");
    print_help();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }
        if input == "help" || input == "h" {
            print_help();
            continue;
        }

        if let Err(message) = run_command(&mut store, lore_client.as_ref(), &rt, &cli.save, input) {
            println!("{message}");
        }

        print_status(&store);
        print_recent_logs(&store);
    }

    Ok(())
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  faction <geoforge|biogenesis|aether>  - found your company");
    println!("  status / s                - resources, roster, day");
    println!("  map                       - explored sectors");
    println!("  tick / t                  - advance one day");
    println!("  run <n>                   - advance n days");
    println!("  hatch <element>           - synthesize a creature (100 biomass)");
    println!("  explore <q,r>             - send an expedition");
    println!("  claim <q,r>               - claim territory");
    println!("  build <facility> <q,r>    - construct from the catalog");
    println!("  upgrade <n> / sell <n>    - manage facility n");
    println!("  forage <q,r>              - scavenge an explored sector");
    println!("  sabotage <q,r>            - neutralize a rival sector");
    println!("  capture <q,r>             - deploy a capture drone");
    println!("  train <n> <stat>          - train roster creature n");
    println!("  hire <role> / staff       - manage personnel");
    println!("  buy <n> / sellbio <n>     - trade biomass on the exchange");
    println!("  cast <spell> [n]          - cast a ritual, optionally on creature n");
    println!("  tournament <q,r>          - enter a tournament");
    println!("  bracket                   - show the bracket");
    println!("  fight <match>             - stage your bracket match");
    println!("  send <n>                  - commit creature n to the staged battle");
    println!("  round                     - resolve one battle round");
    println!("  conclude                  - end a finished battle");
    println!("  save / quit");
    println!();
}

fn run_command(
    store: &mut Store,
    lore: Option<&LoreClient>,
    rt: &Runtime,
    save_path: &PathBuf,
    input: &str,
) -> std::result::Result<(), String> {
    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match command {
        "faction" => {
            let faction = match args.first().copied() {
                Some("geoforge") => Faction::GeoForge,
                Some("biogenesis") => Faction::BioGenesis,
                Some("aether") => Faction::AetherVanguard,
                _ => return Err("Usage: faction <geoforge|biogenesis|aether>".into()),
            };
            CommandExecutor::new(store, lore).select_faction(faction);
        }
        "status" | "s" => print_detailed_status(store),
        "map" => print_map(store),
        "tick" | "t" => scheduler::run_tick(store),
        "run" => {
            let n: u32 = parse_arg(&args, 0, "Usage: run <n>")?;
            for _ in 0..n {
                scheduler::run_tick(store);
            }
            println!("Completed {n} ticks. Now at day {}.", store.state.day);
        }
        "hatch" => {
            let element = parse_element(args.first().copied())?;
            rt.block_on(CommandExecutor::new(store, lore).hatch(element));
        }
        "explore" => {
            let hex = arg_str(&args, 0, "Usage: explore <q,r>")?;
            rt.block_on(CommandExecutor::new(store, lore).explore(hex));
        }
        "claim" => {
            let hex = arg_str(&args, 0, "Usage: claim <q,r>")?;
            CommandExecutor::new(store, lore).claim(hex);
        }
        "build" => {
            let name = arg_str(&args, 0, "Usage: build <facility> <q,r>")?;
            let hex = arg_str(&args, 1, "Usage: build <facility> <q,r>")?;
            CommandExecutor::new(store, lore).build(name, hex);
        }
        "upgrade" => {
            let id = building_by_index(store, &args)?;
            CommandExecutor::new(store, lore).upgrade_building(id);
        }
        "sell" => {
            let id = building_by_index(store, &args)?;
            CommandExecutor::new(store, lore).sell_building(id);
        }
        "forage" => {
            let hex = arg_str(&args, 0, "Usage: forage <q,r>")?;
            CommandExecutor::new(store, lore).forage(hex);
        }
        "sabotage" => {
            let hex = arg_str(&args, 0, "Usage: sabotage <q,r>")?;
            CommandExecutor::new(store, lore).sabotage(hex);
        }
        "capture" => {
            let hex = arg_str(&args, 0, "Usage: capture <q,r>")?;
            CommandExecutor::new(store, lore).capture(hex);
        }
        "train" => {
            let id = monster_by_index(store, &args)?;
            let stat = parse_stat(args.get(1).copied())?;
            CommandExecutor::new(store, lore).train(id, stat);
        }
        "hire" => {
            let role = match args.first().copied() {
                Some("scientist") => StaffRole::Scientist,
                Some("trainer") => StaffRole::Trainer,
                Some("explorer") => StaffRole::Explorer,
                Some("beastmaster") => StaffRole::BeastMaster,
                _ => return Err("Usage: hire <scientist|trainer|explorer|beastmaster>".into()),
            };
            CommandExecutor::new(store, lore).hire(role);
        }
        "staff" => print_staff(store),
        "buy" => {
            let amount: f64 = parse_arg(&args, 0, "Usage: buy <amount>")?;
            CommandExecutor::new(store, lore).trade_buy_biomass(amount);
        }
        "sellbio" => {
            let amount: f64 = parse_arg(&args, 0, "Usage: sellbio <amount>")?;
            CommandExecutor::new(store, lore).trade_sell_biomass(amount);
        }
        "cast" => {
            let spell = arg_str(&args, 0, "Usage: cast <spell> [n]")?.to_string();
            let target = match args.get(1) {
                Some(_) => Some(monster_by_index(store, &args[1..])?),
                None => None,
            };
            CommandExecutor::new(store, lore).cast_spell(&spell, target);
        }
        "tournament" => {
            let hex = arg_str(&args, 0, "Usage: tournament <q,r>")?;
            CommandExecutor::new(store, lore).enter_tournament(hex);
        }
        "bracket" => print_bracket(store),
        "fight" => {
            let match_id = arg_str(&args, 0, "Usage: fight <match>")?;
            CommandExecutor::new(store, lore).start_match(match_id);
        }
        "send" => {
            let id = monster_by_index(store, &args)?;
            CommandExecutor::new(store, lore).start_battle(id);
        }
        "round" => CommandExecutor::new(store, lore).next_round(),
        "conclude" => CommandExecutor::new(store, lore).end_battle(),
        "resetbattle" => CommandExecutor::new(store, lore).reset_battle(),
        "save" => save::save(&store.state, save_path).map_err(|e| e.to_string())?,
        _ => return Err(format!("Unknown command: {command} (try `help`)")),
    }

    Ok(())
}

fn arg_str<'a>(args: &[&'a str], index: usize, usage: &str) -> std::result::Result<&'a str, String> {
    args.get(index).copied().ok_or_else(|| usage.to_string())
}

fn parse_arg<T: std::str::FromStr>(
    args: &[&str],
    index: usize,
    usage: &str,
) -> std::result::Result<T, String> {
    args.get(index)
        .and_then(|a| a.parse().ok())
        .ok_or_else(|| usage.to_string())
}

fn parse_element(arg: Option<&str>) -> std::result::Result<Element, String> {
    match arg {
        Some("pyro") => Ok(Element::Pyro),
        Some("hydro") => Ok(Element::Hydro),
        Some("geo") => Ok(Element::Geo),
        Some("aero") => Ok(Element::Aero),
        Some("chrono") => Ok(Element::Chrono),
        Some("bio") => Ok(Element::Bio),
        _ => Err("Usage: hatch <pyro|hydro|geo|aero|chrono|bio>".into()),
    }
}

fn parse_stat(arg: Option<&str>) -> std::result::Result<StatKind, String> {
    match arg {
        Some("attack") => Ok(StatKind::Attack),
        Some("defense") => Ok(StatKind::Defense),
        Some("speed") => Ok(StatKind::Speed),
        Some("intelligence") => Ok(StatKind::Intelligence),
        _ => Err("Usage: train <n> <attack|defense|speed|intelligence>".into()),
    }
}

fn monster_by_index(store: &Store, args: &[&str]) -> std::result::Result<MonsterId, String> {
    let index: usize = args
        .first()
        .and_then(|a| a.parse().ok())
        .ok_or("Expected a roster index")?;
    store
        .state
        .monsters
        .get(index)
        .map(|m| m.id)
        .ok_or_else(|| format!("No roster creature at index {index}"))
}

fn building_by_index(
    store: &Store,
    args: &[&str],
) -> std::result::Result<terra_chimera::core::types::BuildingId, String> {
    let index: usize = args
        .first()
        .and_then(|a| a.parse().ok())
        .ok_or("Expected a facility index")?;
    store
        .state
        .buildings
        .get(index)
        .map(|b| b.id)
        .ok_or_else(|| format!("No facility at index {index}"))
}

fn print_status(store: &Store) {
    let r = &store.state.resources;
    println!(
        "[Day {}] Cr {:.0} | Bio {:.0} | Mana {:.0} | Res {:.1} | Roster {} | Staff {}",
        store.state.day,
        r.credits,
        r.biomass,
        r.mana,
        r.research,
        store.state.monsters.len(),
        store.state.staff.len(),
    );
}

fn print_detailed_status(store: &Store) {
    let state = &store.state;
    match state.faction {
        Some(f) => println!("Faction: {f}"),
        None => println!("No faction founded yet."),
    }
    println!("Trophies: {}", state.trophies.len());

    println!("Roster:");
    for (i, m) in state.monsters.iter().enumerate() {
        println!(
            "  [{i}] {} ({}) Lv{} HP {:.0}/{:.0} ATK {:.0} DEF {:.0} SPD {:.0} INT {:.0}",
            m.name,
            m.element,
            m.level,
            m.current_hp,
            m.max_hp,
            m.stats.attack,
            m.stats.defense,
            m.stats.speed,
            m.stats.intelligence,
        );
    }

    println!("Facilities:");
    for (i, b) in state.buildings.iter().enumerate() {
        println!("  [{i}] {} Lv{} at [{}]", b.name, b.level, b.location);
    }

    if state.battle.is_active {
        let opponent = state
            .battle
            .opponent
            .as_ref()
            .map_or("?", |m| m.name.as_str());
        println!(
            "Battle: round {} vs {} ({:?})",
            state.battle.round, opponent, state.battle.phase
        );
        for entry in &state.battle.logs {
            let damage = entry
                .damage
                .map_or(String::new(), |d| format!(" (-{d:.0} HP)"));
            println!("    R{} {}{damage}", entry.round, entry.message);
        }
    }

    for (faction, stats) in &state.faction_stats {
        println!(
            "  {}: {}W/{}L score {:.0}",
            faction, stats.wins, stats.losses, stats.score
        );
    }
}

fn print_staff(store: &Store) {
    for (i, s) in store.state.staff.iter().enumerate() {
        println!("  [{i}] {} ({}) salary {:.0}/tick", s.name, s.role, s.salary);
    }
}

fn print_map(store: &Store) {
    let mut tiles: Vec<_> = store.state.map.values().collect();
    tiles.sort_by_key(|t| (t.r, t.q));
    for tile in tiles {
        if !tile.is_explored {
            continue;
        }
        let owner = tile.owner.map_or("-", |f| f.display_name());
        let biomes = tile
            .biomes
            .iter()
            .map(|b| b.label())
            .collect::<Vec<_>>()
            .join("/");
        let mut extras = String::new();
        if tile.building_id.is_some() {
            extras.push_str(" [built]");
        }
        if tile.wild_monster_id.is_some() {
            extras.push_str(" [wild]");
        }
        if tile.has_tournament {
            extras.push_str(" [tournament]");
        }
        println!("  [{}] {biomes} owner: {owner}{extras}", tile.id);
    }
}

fn print_bracket(store: &Store) {
    let t = &store.state.tournament;
    if t.matches.is_empty() {
        println!("No tournament in progress.");
        return;
    }
    println!(
        "Tournament round {}/{} (active: {})",
        t.current_round, t.total_rounds, t.is_active
    );
    for m in &t.matches {
        let name = |p: &Option<terra_chimera::tournament::TournamentParticipant>| {
            p.as_ref().map_or("?".to_string(), |p| p.name.clone())
        };
        println!(
            "  {} (r{}): {} vs {} [{:?}]{}",
            m.id,
            m.round,
            name(&m.p1),
            name(&m.p2),
            m.status,
            m.winner_id
                .as_ref()
                .map_or(String::new(), |w| format!(" winner: {w}")),
        );
    }
}

fn print_recent_logs(store: &Store) {
    for entry in store.state.logs.entries().iter().take(3) {
        println!("  ({:?}) {}", entry.kind, entry.message);
    }
}
