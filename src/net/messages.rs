use serde::{Deserialize, Serialize};

use crate::config::{
    FOOD_RADIUS_MAX, FOOD_RADIUS_MIN, GAME_WORLD_HEIGHT, GAME_WORLD_WIDTH, SNAKE_BASE_SIZE,
    SNAKE_BODY_IMAGE_COUNT, SNAKE_SEGMENT_DISTANCE,
};
use crate::game::snapshot::{GameSnapshot, SnakeView};

pub const PROTOCOL_VERSION: u8 = 1;

/// JSON text-frame envelope accepted from clients: the version field sits
/// beside the flattened tag/data pair. Binary frames use a bincode
/// (version, message) pair instead, since bincode cannot represent the
/// flattened map (see `net/codec.rs`).
#[derive(Debug, Deserialize)]
pub struct ClientEnvelope {
    pub v: u8,
    #[serde(flatten)]
    pub msg: ClientMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    Input { angle: f32, boosting: bool },
    Respawn,
    Leave,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        player_id: String,
        state: GameSnapshot,
        settings: GameSettings,
    },
    GameState {
        state: GameSnapshot,
    },
    PlayerJoined {
        snake: SnakeView,
    },
    PlayerRespawned {
        snake: SnakeView,
    },
    PlayerLeft {
        id: String,
    },
    PlayerDied {
        id: String,
        killer_id: Option<String>,
        killer_name: String,
        score: f32,
    },
}

/// Static arena parameters, sent once so clients can size their rendering
/// without hardcoding server tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub world_width: f32,
    pub world_height: f32,
    pub snake_base_size: f32,
    pub snake_segment_distance: f32,
    pub food_radius_min: f32,
    pub food_radius_max: f32,
    pub body_image_count: u8,
}

impl GameSettings {
    pub fn current() -> Self {
        Self {
            world_width: GAME_WORLD_WIDTH,
            world_height: GAME_WORLD_HEIGHT,
            snake_base_size: SNAKE_BASE_SIZE,
            snake_segment_distance: SNAKE_SEGMENT_DISTANCE,
            food_radius_min: FOOD_RADIUS_MIN,
            food_radius_max: FOOD_RADIUS_MAX,
            body_image_count: SNAKE_BODY_IMAGE_COUNT,
        }
    }
}
