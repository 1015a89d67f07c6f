//! Emberwild Headless Simulation Harness
//!
//! Drives the game store for a simulated session and checks invariants.
//! Runs entirely in-process: no renderer, no input, no audio.
//!
//! Usage:
//!   cargo run -p emberwild-simtest
//!   cargo run -p emberwild-simtest -- --verbose --seconds 600 --config sim.json

use std::collections::BTreeMap;

use emberwild_core::persistence::MemoryStorage;
use emberwild_core::prelude::*;
use emberwild_logic::clock::WorldClock;
use emberwild_logic::recipes::recipes;
use log::{info, LevelFilter};
use serde::Serialize;

const FRAME: f32 = 1.0 / 60.0;
const DEFAULT_SECONDS: u32 = 300;
const DEFAULT_SEED: u64 = 0xE3BE;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Args {
    verbose: bool,
    seconds: u32,
    config: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args {
        verbose: false,
        seconds: DEFAULT_SECONDS,
        config: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" => args.verbose = true,
            "--seconds" => {
                if let Some(n) = iter.next().and_then(|v| v.parse().ok()) {
                    args.seconds = n;
                }
            }
            "--config" => args.config = iter.next(),
            other => eprintln!("ignoring unknown argument {other:?}"),
        }
    }
    args
}

fn main() {
    let args = parse_args();
    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    println!("=== Emberwild Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Configuration
    let config = match load_config(&args, &mut results) {
        Some(config) => config,
        None => {
            finish(&results, args.verbose);
            return;
        }
    };

    // 2. Static tables
    results.extend(validate_tables(args.verbose));

    // 3. World generation
    results.extend(validate_generation(&config, args.verbose));

    // 4. Clock
    results.extend(validate_clock(args.verbose));

    // 5. Full session
    results.extend(validate_session(&config, args.seconds, args.verbose));

    // 6. Save / load
    results.extend(validate_persistence(&config, args.verbose));

    finish(&results, args.verbose);
}

fn finish(results: &[TestResult], verbose: bool) {
    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn load_config(args: &Args, results: &mut Vec<TestResult>) -> Option<SimConfig> {
    println!("--- Configuration ---");
    let loaded = match &args.config {
        Some(path) => SimConfig::load(path),
        None => Ok(SimConfig::seeded(DEFAULT_SEED)),
    };
    match loaded {
        Ok(mut config) => {
            if config.seed.is_none() {
                config.seed = Some(DEFAULT_SEED);
            }
            results.push(TestResult {
                name: "config_valid".into(),
                passed: true,
                detail: format!(
                    "seed {:?}, {} animals, frame scale {}",
                    config.seed, config.initial_animals, config.frame_scale
                ),
            });
            Some(config)
        }
        Err(e) => {
            results.push(TestResult {
                name: "config_valid".into(),
                passed: false,
                detail: e.to_string(),
            });
            None
        }
    }
}

// ── 2. Static tables ────────────────────────────────────────────────────

fn validate_tables(verbose: bool) -> Vec<TestResult> {
    println!("--- Items & Recipes ---");
    let mut results = Vec::new();

    let unknown: Vec<&str> = recipes()
        .iter()
        .flat_map(|r| r.ingredients.iter().map(|i| i.item_id.as_str()))
        .filter(|id| emberwild_logic::items::item(id).is_none())
        .collect();
    results.push(TestResult {
        name: "recipes_known_ingredients".into(),
        passed: unknown.is_empty(),
        detail: if unknown.is_empty() {
            format!("{} recipes reference catalog items only", recipes().len())
        } else {
            format!("unknown ingredients: {}", unknown.join(", "))
        },
    });

    let empty: Vec<&str> = recipes()
        .iter()
        .filter(|r| r.ingredients.is_empty() || r.result_quantity == 0)
        .map(|r| r.id.as_str())
        .collect();
    results.push(TestResult {
        name: "recipes_non_trivial".into(),
        passed: empty.is_empty(),
        detail: format!("{} degenerate recipes", empty.len()),
    });

    let hotbar = Hotbar::default();
    let missing: Vec<&str> = hotbar
        .slots()
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|id| emberwild_logic::items::item(id).is_none())
        .collect();
    results.push(TestResult {
        name: "hotbar_layout_items".into(),
        passed: missing.is_empty(),
        detail: format!("{} slots, {} unknown", hotbar.slots().len(), missing.len()),
    });

    if verbose {
        for recipe in recipes() {
            let parts: Vec<String> = recipe
                .ingredients
                .iter()
                .map(|i| format!("{}×{}", i.item_id, i.quantity))
                .collect();
            println!(
                "    {:9} ← {}  (→ {}×{})",
                recipe.id,
                parts.join(" + "),
                recipe.result.id,
                recipe.result_quantity
            );
        }
    }

    results
}

// ── 3. World generation ────────────────────────────────────────────────

fn validate_generation(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- World Generation ---");
    let mut results = Vec::new();

    let store = match GameStore::new_world(config.clone()) {
        Ok(store) => store,
        Err(e) => {
            results.push(TestResult {
                name: "world_created".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let animals = store.animals();
    results.push(TestResult {
        name: "world_animal_count".into(),
        passed: animals.len() == config.initial_animals,
        detail: format!("{} / {} animals", animals.len(), config.initial_animals),
    });

    let too_close = animals
        .iter()
        .filter(|a| a.position.distance_xz(&Vec3::ZERO) < config.spawn_clearing)
        .count();
    results.push(TestResult {
        name: "world_spawn_clearing".into(),
        passed: too_close == 0,
        detail: format!("{} animals inside the {}u clearing", too_close, config.spawn_clearing),
    });

    let mut ids: Vec<AnimalId> = animals.iter().map(|a| a.id).collect();
    ids.dedup();
    results.push(TestResult {
        name: "world_unique_ids".into(),
        passed: ids.len() == animals.len(),
        detail: format!("{} distinct ids", ids.len()),
    });

    let nodes = store.nodes();
    let water = nodes.iter().filter(|n| n.kind == NodeKind::Water).count();
    let expected = config.trees + config.rocks + config.bushes + 2;
    results.push(TestResult {
        name: "world_resource_nodes".into(),
        passed: nodes.len() == expected && water == 2,
        detail: format!("{} nodes ({} water), expected {}", nodes.len(), water, expected),
    });

    if verbose {
        let mut by_kind: BTreeMap<String, usize> = BTreeMap::new();
        for animal in &animals {
            *by_kind.entry(format!("{:?}", animal.kind)).or_default() += 1;
        }
        println!("  Population: {by_kind:?}");
    }

    results
}

// ── 4. Clock ────────────────────────────────────────────────────────────

fn validate_clock(_verbose: bool) -> Vec<TestResult> {
    println!("--- World Clock ---");
    let mut results = Vec::new();

    let cases = [
        (0.1, TimeOfDay::Night),
        (0.25, TimeOfDay::Dawn),
        (0.5, TimeOfDay::Day),
        (0.8, TimeOfDay::Dusk),
        (0.9, TimeOfDay::Night),
    ];
    let wrong: Vec<String> = cases
        .iter()
        .filter(|(f, expected)| WorldClock::at(*f).time_of_day() != *expected)
        .map(|(f, _)| f.to_string())
        .collect();
    results.push(TestResult {
        name: "clock_phase_thresholds".into(),
        passed: wrong.is_empty(),
        detail: if wrong.is_empty() {
            "night > dawn > dusk precedence holds".into()
        } else {
            format!("wrong phase at {}", wrong.join(", "))
        },
    });

    // One full day at the default rate takes 100 s.
    let mut clock = WorldClock::at(0.0);
    let mut wrapped = false;
    for _ in 0..(101 * 60) {
        wrapped |= clock.tick(FRAME);
    }
    results.push(TestResult {
        name: "clock_full_cycle".into(),
        passed: wrapped && clock.days == 1 && clock.day_time() < 0.02,
        detail: format!("day {} at {:.3}", clock.days, clock.day_time()),
    });

    results
}

// ── 5. Session ──────────────────────────────────────────────────────────

/// Machine-readable run digest, printed as JSON in verbose mode.
#[derive(Debug, Default, Serialize)]
struct SessionSummary {
    seconds: u32,
    final_health: f32,
    final_hunger: f32,
    final_thirst: f32,
    final_temperature: f32,
    days: u32,
    animals_alive: usize,
    inventory: BTreeMap<String, u32>,
    events: BTreeMap<String, usize>,
}

fn validate_session(config: &SimConfig, seconds: u32, verbose: bool) -> Vec<TestResult> {
    println!("--- Session ({seconds}s) ---");
    let mut results = Vec::new();

    let mut store = match GameStore::new_world(config.clone()) {
        Ok(store) => store,
        Err(e) => {
            results.push(TestResult {
                name: "session_start".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };
    give(&mut store, "bow", 1);
    give(&mut store, "arrow", 20);
    give(&mut store, "water_bottle", 5);

    let mut events: BTreeMap<String, usize> = BTreeMap::new();
    let mut stat_violations = 0;
    let mut inventory_violations = 0;
    let mut bound_violations = 0;
    let mut population_violations = 0;
    let bounds = *store.bounds();

    for frame in 0..(seconds * 60) {
        // Walk a slow circle around the clearing.
        let angle = frame as f32 * FRAME * 0.05;
        store.set_player_transform(Vec3::new(25.0 * angle.cos(), 2.0, 25.0 * angle.sin()), angle);
        store.tick(FRAME);

        // Every ten seconds: forage, hunt, eat.
        if frame % 600 == 599 {
            act(&mut store);
        }

        for event in store.drain_events() {
            *events.entry(event.key().to_string()).or_default() += 1;
        }

        if !store.stats().in_bounds() {
            stat_violations += 1;
        }
        if !store.inventory().is_consistent() {
            inventory_violations += 1;
        }
        if store.animals().iter().any(|a| !bounds.contains(&a.position)) {
            bound_violations += 1;
        }
        if store.animal_count() + store.pending_respawns() != config.initial_animals {
            population_violations += 1;
        }
    }

    results.push(TestResult {
        name: "session_stats_bounded".into(),
        passed: stat_violations == 0,
        detail: format!("{stat_violations} frames with stats outside [0, 100]"),
    });
    results.push(TestResult {
        name: "session_inventory_consistent".into(),
        passed: inventory_violations == 0,
        detail: format!("{inventory_violations} frames with duplicate or empty stacks"),
    });
    results.push(TestResult {
        name: "session_animals_in_bounds".into(),
        passed: bound_violations == 0,
        detail: format!("{bound_violations} frames with an animal outside ±{}", bounds.half_extent),
    });
    results.push(TestResult {
        name: "session_population_held".into(),
        passed: population_violations == 0,
        detail: format!("{population_violations} frames where live + pending ≠ initial"),
    });
    results.push(TestResult {
        name: "session_day_time_range".into(),
        passed: (0.0..1.0).contains(&store.day_time()),
        detail: format!("day {} at {:.3}", store.clock().days, store.day_time()),
    });

    let deaths = events.get("player_died").copied().unwrap_or(0);
    results.push(TestResult {
        name: "session_single_death_event".into(),
        passed: deaths <= 1,
        detail: format!("{deaths} death events, health {:.1}", store.stats().health),
    });

    let summary = SessionSummary {
        seconds,
        final_health: store.stats().health,
        final_hunger: store.stats().hunger,
        final_thirst: store.stats().thirst,
        final_temperature: store.stats().temperature,
        days: store.clock().days,
        animals_alive: store.animals().iter().filter(|a| !a.is_dead()).count(),
        inventory: store
            .inventory()
            .items()
            .iter()
            .map(|i| (i.id.clone(), i.quantity))
            .collect(),
        events,
    };
    info!("session finished: {} event kinds", summary.events.len());
    if verbose {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => println!("  (summary unavailable: {e})"),
        }
    }

    results
}

/// One round of player behavior: gather the nearest node, shoot the nearest
/// living animal, then eat or drink when running low.
fn act(store: &mut GameStore) {
    if store.stats().is_dead() {
        return;
    }
    let here = store.player().position;

    if let Some(node) = store
        .nodes()
        .into_iter()
        .min_by(|a, b| a.position.distance_xz(&here).total_cmp(&b.position.distance_xz(&here)))
    {
        // Step next to it first.
        store.set_player_transform(Vec3::new(node.position.x, 2.0, node.position.z), 0.0);
        store.gather(node.id);
    }

    let here = store.player().position;
    if let Some(target) = store
        .animals()
        .into_iter()
        .filter(|a| !a.is_dead())
        .min_by(|a, b| a.position.distance_xz(&here).total_cmp(&b.position.distance_xz(&here)))
    {
        store.attack_animal(target.id, Weapon::Bow);
    }

    let stats = *store.stats();
    if stats.hunger < 60.0 {
        for food in ["cooked_meat", "meat", "apple", "berry"] {
            if store.get_item_count(food) > 0 {
                store.consume(food);
                break;
            }
        }
    }
    if stats.thirst < 60.0 && store.get_item_count("water_bottle") > 0 {
        store.consume("water_bottle");
    }
}

fn give(store: &mut GameStore, id: &str, quantity: u32) {
    match emberwild_logic::items::item(id) {
        Some(template) => store.add_item(&template, quantity),
        None => log::warn!("item {id:?} missing from the catalog"),
    }
}

// ── 6. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(config: &SimConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Save / Load ---");
    let mut results = Vec::new();

    let mut store = match GameStore::new(config.clone(), Box::new(MemoryStorage::new())) {
        Ok(store) => store,
        Err(e) => {
            results.push(TestResult {
                name: "persist_store".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    give(&mut store, "wood", 9);
    store.damage_player(27.5);
    store.set_weather(Weather::Snow);
    store.set_time_of_day(0.77);
    store.set_player_transform(Vec3::new(3.5, 2.0, -11.0), 2.0);
    let saved = store.snapshot();

    let save = store.save_game();
    results.push(TestResult {
        name: "persist_save".into(),
        passed: save.is_ok() && store.has_saved_game(),
        detail: match &save {
            Ok(()) => "saved".into(),
            Err(e) => e.to_string(),
        },
    });

    store.remove_item("wood", 9);
    store.heal_player(100.0);
    store.set_weather(Weather::Clear);
    store.set_time_of_day(0.1);

    let loaded = store.load_game();
    results.push(TestResult {
        name: "persist_roundtrip".into(),
        passed: loaded && store.snapshot() == saved,
        detail: "stats, inventory, clock, weather and transform restored".into(),
    });

    let deleted = store.delete_save().is_ok() && !store.has_saved_game();
    let before = store.snapshot();
    let reload = store.load_game();
    results.push(TestResult {
        name: "persist_missing_save".into(),
        passed: deleted && !reload && store.snapshot() == before,
        detail: "load without a save fails and leaves state alone".into(),
    });

    results
}
