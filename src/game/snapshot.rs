use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::snake::Snake;
use crate::game::world::World;

/// Body segments go over the wire rounded to whole pixels; clients only
/// draw them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentView {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodView {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeView {
    pub id: String,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub segments: Vec<SegmentView>,
    pub color: String,
    pub body_image_index: u8,
    pub score: i32,
    pub size_multiplier: f32,
    pub angle: f32,
    pub is_bot: bool,
    pub boosting: bool,
}

/// Full per-tick view of the arena. Dead snakes are omitted entirely;
/// a dead player exists again only once it respawns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: BTreeMap<String, SnakeView>,
    pub food: Vec<FoodView>,
}

pub fn view_of(snake: &Snake) -> SnakeView {
    SnakeView {
        id: snake.id.clone(),
        name: snake.name.clone(),
        x: snake.pos.x,
        y: snake.pos.y,
        segments: snake
            .segments
            .iter()
            .map(|p| SegmentView {
                x: p.x.round() as i32,
                y: p.y.round() as i32,
            })
            .collect(),
        color: snake.color.clone(),
        body_image_index: snake.body_image_index,
        score: snake.score.floor() as i32,
        size_multiplier: snake.size_multiplier,
        angle: snake.angle,
        is_bot: snake.is_bot,
        boosting: snake.boosting,
    }
}

pub fn project(world: &World) -> GameSnapshot {
    let players = world
        .snakes()
        .iter()
        .filter(|(_, snake)| snake.alive)
        .map(|(id, snake)| (id.clone(), view_of(snake)))
        .collect();
    let food = world
        .food()
        .items()
        .iter()
        .map(|f| FoodView {
            id: f.id.clone(),
            x: f.pos.x,
            y: f.pos.y,
            size: f.size,
            color: f.color.clone(),
        })
        .collect();
    GameSnapshot { players, food }
}
