// World bounds (bounded rectangular map, death on the edge)
pub const GAME_WORLD_WIDTH: f32 = 2000.0;
pub const GAME_WORLD_HEIGHT: f32 = 2000.0;

// Spawn padding: ambient food keeps off the walls, snakes spawn well inside
pub const FOOD_SPAWN_PADDING: f32 = 50.0;
pub const SNAKE_SPAWN_PADDING: f32 = 200.0;

// Movement
pub const PLAYER_INITIAL_SPEED: f32 = 6.0;
pub const PLAYER_BOOST_SPEED_MULTIPLIER: f32 = 2.0;
// Fraction of the remaining angular difference applied per tick
pub const SNAKE_TURN_RATE: f32 = 0.15;

// Body
pub const SNAKE_INITIAL_LENGTH: usize = 10;
pub const SNAKE_SEGMENT_DISTANCE: f32 = 8.0;
// Base diameter of a segment, scales with score via the size multiplier
pub const SNAKE_BASE_SIZE: f32 = 16.0;
pub const SNAKE_MIN_SEGMENTS: usize = 2;

// Score / growth
pub const SNAKE_MIN_SCORE: f32 = 200.0;
pub const SCORE_PER_SEGMENT: f32 = 50.0;

// Boost: eligibility floor, per-tick cost, and the feed-trail shed
pub const BOOST_MIN_SCORE: f32 = 250.0;
pub const BOOST_SCORE_COST: f32 = 0.5;
pub const BOOST_DROP_INTERVAL_MS: f64 = 200.0;
pub const BOOST_LENGTH_SHED: f32 = 0.2;

// Food
pub const FOOD_RADIUS_MIN: f32 = 5.0;
pub const FOOD_RADIUS_MAX: f32 = 10.0;
pub const MAX_FOOD_ITEMS: usize = 500;
pub const FOOD_DROP_JITTER: f32 = 10.0;

// Mass donation strides on death / disconnect
pub const DEATH_DROP_STRIDE: usize = 2;
pub const DISCONNECT_DROP_STRIDE: usize = 3;

// Loop
pub const GAME_TICK_RATE_MS: f64 = 1000.0 / 30.0;

// Bot population: floor if the arena is empty, hard ceiling on everyone
pub const MIN_BOTS: usize = 5;
pub const MAX_TOTAL_SNAKES: usize = 10;

pub const BOT_NAMES: [&str; 15] = [
    "Byte",
    "Pixel",
    "Vector",
    "Glitch",
    "Syntax",
    "Kernel",
    "Cipher",
    "Render",
    "Vertex",
    "Shader",
    "Algo",
    "Recursion",
    "Stack",
    "Heap",
    "Pointer",
];

// Cosmetic body styles the client can pick a sprite from
pub const SNAKE_BODY_IMAGE_COUNT: u8 = 13;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5555";
