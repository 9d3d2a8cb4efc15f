use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use waymark_core::{EntityId, LocalPlayer, TickOutcome};

use crate::app_state::{AppState, read_settings, report_reload};
use crate::scenario::load_scenario;

pub fn load(state: &mut AppState, path: &Path) -> Result<(), String> {
    let scenario = load_scenario(path)?;

    if let Some(player) = scenario.local_player {
        println!("local player: {} ({})", player.render_name, player.id);
        state.host().set_local_player(player);
    }

    let total = scenario.entities.len();
    let queued = scenario
        .entities
        .into_iter()
        .map(Arc::new)
        .filter(|entity| state.plugin.on_entity_added(Arc::clone(entity)))
        .count();
    println!("queued {queued}/{total} entities");
    Ok(())
}

pub fn tick(state: &mut AppState, count: u32) {
    let timer = Instant::now();
    for _ in 0..count {
        match state.plugin.tick() {
            TickOutcome::Inline(report) if report.taken > 0 => println!(
                "drain #{}: {} taken, {} attached, {} skipped, {} already attached, {} no icon, {} failed",
                report.seq,
                report.taken,
                report.attached,
                report.skipped,
                report.already_attached,
                report.unclassified,
                report.failed()
            ),
            TickOutcome::Offloaded { queued } => {
                println!("offloaded drain of {queued} entities")
            }
            TickOutcome::Busy => println!("drain still running"),
            TickOutcome::Disabled => {
                println!("icons disabled");
                break;
            }
            TickOutcome::Inline(_) | TickOutcome::Waiting => {}
        }
    }
    println!("{count} ticks in {}us", timer.elapsed().as_micros());
}

pub fn area_change(state: &mut AppState, name: Option<String>) {
    let name = name.unwrap_or_else(|| "unknown".to_string());
    let cleared = state.host().clear_icons();
    report_reload(&state.plugin.on_area_change(&name));
    println!("entered {name}, cleared {cleared} icons");
    state.area = Some(name);
}

pub fn remove(state: &mut AppState, id: u64) {
    let id = EntityId(id);
    state.host().remove_icon(id);
    if state.plugin.on_entity_removed(id) {
        println!("released {id}");
    } else {
        println!("{id} had no icon");
    }
}

pub fn set_local_player(state: &mut AppState, id: u64, name: String) {
    let player = LocalPlayer::new(EntityId(id), name);
    println!("local player: {} ({})", player.render_name, player.id);
    state.host().set_local_player(player);
}

pub fn show_icons(state: &AppState) {
    let icons = state.host().icons();
    if icons.is_empty() {
        println!("no icons");
        return;
    }
    for icon in icons {
        let size = icon
            .size
            .map(|s| format!("{}x{}", s.width, s.height))
            .unwrap_or_else(|| "default".to_string());
        println!("{:>12} {:<16} {:<8} {}", icon.id.to_string(), format!("{:?}", icon.variant), size, icon.path);
    }
}

pub fn show_stats(state: &AppState) {
    let stats = state.plugin.stats();
    let totals = stats.totals;
    println!("area: {}", state.area.as_deref().unwrap_or("-"));
    println!("state: {:?}, run counter {}", stats.state, stats.run_counter);
    println!(
        "queue: {} pending, high-water {}",
        stats.pending, stats.queue_high_water
    );
    println!(
        "drains: {} inline, {} offloaded",
        totals.drains_inline, totals.drains_offloaded
    );
    println!(
        "entities: {} attached ({} held now), {} skipped, {} no icon, {} failed",
        totals.attached, stats.attached_now, totals.skipped, totals.unclassified, totals.failed
    );
    println!("config generation: {}", stats.config_generation);
}

/// Re-read settings and both config files
pub fn reload(state: &mut AppState) -> Result<(), String> {
    let settings = read_settings(&state.config_dir)?;
    println!("settings: {}", state.settings_path().display());
    state.plugin.update_settings(settings);
    report_reload(&state.plugin.initialise());
    Ok(())
}
