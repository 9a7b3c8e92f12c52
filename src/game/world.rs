use std::collections::BTreeMap;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{
    DEATH_DROP_STRIDE, DISCONNECT_DROP_STRIDE, GAME_TICK_RATE_MS, MAX_FOOD_ITEMS,
};
use crate::game::food::FoodField;
use crate::game::snake::Snake;
use crate::game::{bots, collision};

/// Killer identity reported when a snake runs into the world boundary.
pub const VOID_KILLER_NAME: &str = "the void";

#[derive(Debug, Clone, PartialEq)]
pub struct DeathEvent {
    pub id: String,
    pub killer_id: Option<String>,
    pub killer_name: String,
    pub score: f32,
}

/// The authoritative world. The tick is the sole mutator; the transport
/// layer only reaches it through the hub's command queue.
///
/// Snakes live in an ordered map so every tick walks them in the same
/// deterministic order. Same-tick deaths gate later collision checks
/// through the `alive` flag, so the order is load-bearing.
pub struct World {
    snakes: BTreeMap<String, Snake>,
    food: FoodField,
    rng: StdRng,
    now_ms: f64,
    bot_counter: u32,
    events: Vec<DeathEvent>,
}

impl World {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            snakes: BTreeMap::new(),
            food: FoodField::new(),
            rng,
            now_ms: 0.0,
            bot_counter: 0,
            events: Vec::new(),
        }
    }

    /// Startup population: ambient food up to the cap, bots up to the floor.
    pub fn init(&mut self) {
        self.food.spawn_initial(MAX_FOOD_ITEMS, &mut self.rng);
        bots::maintain_population(&mut self.snakes, &mut self.bot_counter, &mut self.rng);
    }

    pub fn snakes(&self) -> &BTreeMap<String, Snake> {
        &self.snakes
    }

    pub fn snake(&self, id: &str) -> Option<&Snake> {
        self.snakes.get(id)
    }

    pub fn food(&self) -> &FoodField {
        &self.food
    }

    pub fn alive_count(&self) -> usize {
        self.snakes.values().filter(|s| s.alive).count()
    }

    /// New human snake for a fresh connection.
    pub fn connect(&mut self, id: &str, name: &str) -> &Snake {
        let snake = Snake::spawn(id, name, false, &mut self.rng);
        self.snakes.insert(id.to_owned(), snake);
        info!("{} connected as {}", id, name);
        &self.snakes[id]
    }

    /// Plain field writes consumed by the next tick. Silently dropped for
    /// absent or dead snakes.
    pub fn set_input(&mut self, id: &str, angle: f32, boosting: bool) {
        if let Some(snake) = self.snakes.get_mut(id) {
            if snake.alive {
                snake.target_angle = angle;
                snake.boosting = boosting;
            }
        }
    }

    /// Fresh identity-preserving snake for a dead or absent player.
    /// No-op while the snake is still alive.
    pub fn respawn(&mut self, id: &str, fallback_name: &str) -> Option<&Snake> {
        let name = match self.snakes.get(id) {
            Some(snake) if snake.alive => return None,
            Some(snake) => snake.name.clone(),
            None => fallback_name.to_owned(),
        };
        let snake = Snake::spawn(id, name, false, &mut self.rng);
        self.snakes.insert(id.to_owned(), snake);
        Some(&self.snakes[id])
    }

    /// Remove a snake on disconnect. A live snake donates part of its body
    /// as food on the way out.
    pub fn disconnect(&mut self, id: &str) {
        if let Some(snake) = self.snakes.remove(id) {
            if snake.alive {
                let mut k = 0;
                while k < snake.segments.len() {
                    self.food.drop_from_snake(&snake, k, &mut self.rng);
                    k += DISCONNECT_DROP_STRIDE;
                }
            }
            info!("{} removed from world", id);
        }
    }

    /// One fixed-rate simulation step: bot AI, then the motion/collision
    /// pass for every snake in map order, then bot maintenance.
    pub fn tick(&mut self) {
        self.now_ms += GAME_TICK_RATE_MS;

        bots::ai_step(&mut self.snakes, &self.food, &mut self.rng);

        let ids: Vec<String> = self.snakes.keys().cloned().collect();
        for id in ids {
            // The acting snake is taken out of the map for its pass, so the
            // collision scan below sees everyone else exactly as this tick
            // left them so far.
            let mut snake = match self.snakes.remove(&id) {
                Some(snake) => snake,
                None => continue,
            };
            if !snake.alive {
                self.snakes.insert(id, snake);
                continue;
            }

            snake.integrate_heading();
            let speed = snake.apply_boost(self.now_ms);
            snake.advance(speed);

            if collision::wall_hit(snake.pos, snake.collision_radius()) {
                self.kill(&mut snake, None, VOID_KILLER_NAME.to_owned());
                if !snake.is_bot {
                    self.snakes.insert(id, snake);
                }
                continue;
            }

            snake.update_chain();
            snake.recompute_growth();

            let gained = self
                .food
                .consume_at(snake.pos, snake.collision_radius(), &mut self.rng);
            if gained != 0 {
                snake.score += gained as f32;
            }

            let hit = collision::find_body_hit(snake.pos, self.snakes.values().filter(|o| o.alive))
                .map(|killer| (killer.id.clone(), killer.name.clone()));
            if let Some((killer_id, killer_name)) = hit {
                let award = (snake.score / 2.0).floor();
                self.kill(&mut snake, Some(killer_id.clone()), killer_name);
                if let Some(killer) = self.snakes.get_mut(&killer_id) {
                    killer.score += award;
                }
                if !snake.is_bot {
                    self.snakes.insert(id, snake);
                }
                continue;
            }

            self.snakes.insert(id, snake);
        }

        bots::maintain_population(&mut self.snakes, &mut self.bot_counter, &mut self.rng);
    }

    /// Death events since the last drain, in the order they happened.
    pub fn take_events(&mut self) -> Vec<DeathEvent> {
        std::mem::take(&mut self.events)
    }

    fn kill(&mut self, snake: &mut Snake, killer_id: Option<String>, killer_name: String) {
        snake.alive = false;
        let mut k = 0;
        while k < snake.segments.len() {
            self.food.drop_from_snake(snake, k, &mut self.rng);
            k += DEATH_DROP_STRIDE;
        }
        info!("{} died, killed by {}", snake.id, killer_name);
        self.events.push(DeathEvent {
            id: snake.id.clone(),
            killer_id,
            killer_name,
            score: snake.score,
        });
    }
}
