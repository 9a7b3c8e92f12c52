use std::collections::BTreeMap;

use log::info;
use rand::Rng;

use crate::config::{BOT_NAMES, MAX_TOTAL_SNAKES, MIN_BOTS};
use crate::game::food::FoodField;
use crate::game::snake::Snake;

/// Per-tick decisions for every alive bot: occasionally wander toward a
/// new random heading, occasionally steer at a random food item, and
/// occasionally boost. Eligibility for the boost is the motion model's
/// problem, not the director's.
pub fn ai_step(snakes: &mut BTreeMap<String, Snake>, food: &FoodField, rng: &mut impl Rng) {
    for snake in snakes.values_mut() {
        if !snake.is_bot || !snake.alive {
            continue;
        }
        if rng.gen_bool(0.05) {
            snake.target_angle = rng.gen_range(0.0..std::f32::consts::TAU);
        }
        if !food.is_empty() && rng.gen_bool(0.10) {
            let target = &food.items()[rng.gen_range(0..food.len())];
            snake.target_angle = (target.pos.y - snake.pos.y).atan2(target.pos.x - snake.pos.x);
        }
        snake.boosting = rng.gen_bool(0.02);
    }
}

/// Top the arena up to the bot floor, never pushing the total population
/// past the ceiling. Runs at startup and after every tick, so connects
/// and disconnects are corrected within one tick.
pub fn maintain_population(
    snakes: &mut BTreeMap<String, Snake>,
    bot_counter: &mut u32,
    rng: &mut impl Rng,
) {
    let alive = snakes.values().filter(|s| s.alive).count();
    let deficit = MIN_BOTS.saturating_sub(alive);
    let to_spawn = deficit.min(MAX_TOTAL_SNAKES.saturating_sub(alive));

    for _ in 0..to_spawn {
        let id = format!("bot_{}", *bot_counter);
        *bot_counter += 1;
        let suffix = &id[id.len().saturating_sub(2)..];
        let name = format!("{}_{}", BOT_NAMES[rng.gen_range(0..BOT_NAMES.len())], suffix);
        info!("bot {} spawned", name);
        snakes.insert(id.clone(), Snake::spawn(id.clone(), name, true, rng));
    }
}
