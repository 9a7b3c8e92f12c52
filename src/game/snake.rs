use rand::Rng;

use crate::config::{
    BOOST_DROP_INTERVAL_MS, BOOST_LENGTH_SHED, BOOST_MIN_SCORE, BOOST_SCORE_COST,
    GAME_TICK_RATE_MS, GAME_WORLD_HEIGHT, GAME_WORLD_WIDTH, PLAYER_BOOST_SPEED_MULTIPLIER,
    PLAYER_INITIAL_SPEED, SCORE_PER_SEGMENT, SNAKE_BASE_SIZE, SNAKE_BODY_IMAGE_COUNT,
    SNAKE_INITIAL_LENGTH, SNAKE_MIN_SCORE, SNAKE_MIN_SEGMENTS, SNAKE_SEGMENT_DISTANCE,
    SNAKE_SPAWN_PADDING, SNAKE_TURN_RATE,
};
use crate::game::math::{shortest_angle_diff, Point};
use crate::game::random_color;

/// One player- or bot-controlled snake. Owned exclusively by the world;
/// the transport layer only ever refers to it by id.
#[derive(Debug, Clone)]
pub struct Snake {
    pub id: String,
    pub name: String,
    pub pos: Point,
    pub angle: f32,
    pub target_angle: f32,
    pub speed: f32,
    pub boosting: bool,
    pub score: f32,
    /// Head first; trailing points follow within SNAKE_SEGMENT_DISTANCE.
    pub segments: Vec<Point>,
    pub color: String,
    pub body_image_index: u8,
    pub alive: bool,
    pub is_bot: bool,
    pub size_multiplier: f32,
    pub target_length: f32,
    pub boost_cooldown: f64,
    pub last_boost_drop: f64,
}

impl Snake {
    pub fn spawn(id: impl Into<String>, name: impl Into<String>, is_bot: bool, rng: &mut impl Rng) -> Self {
        let x = rng.gen_range(SNAKE_SPAWN_PADDING..GAME_WORLD_WIDTH - SNAKE_SPAWN_PADDING);
        let y = rng.gen_range(SNAKE_SPAWN_PADDING..GAME_WORLD_HEIGHT - SNAKE_SPAWN_PADDING);
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);

        let mut segments = Vec::with_capacity(SNAKE_INITIAL_LENGTH);
        for i in 0..SNAKE_INITIAL_LENGTH {
            segments.push(Point::new(
                x - i as f32 * SNAKE_SEGMENT_DISTANCE * angle.cos(),
                y - i as f32 * SNAKE_SEGMENT_DISTANCE * angle.sin(),
            ));
        }

        Self {
            id: id.into(),
            name: name.into(),
            pos: Point::new(x, y),
            angle,
            target_angle: angle,
            speed: PLAYER_INITIAL_SPEED,
            boosting: false,
            score: SNAKE_MIN_SCORE,
            segments,
            color: random_color(rng),
            body_image_index: rng.gen_range(0..SNAKE_BODY_IMAGE_COUNT),
            alive: true,
            is_bot,
            size_multiplier: 1.0,
            target_length: SNAKE_INITIAL_LENGTH as f32,
            boost_cooldown: 0.0,
            last_boost_drop: -BOOST_DROP_INTERVAL_MS,
        }
    }

    /// Head radius used for every collision test this tick.
    pub fn collision_radius(&self) -> f32 {
        SNAKE_BASE_SIZE * self.size_multiplier / 2.0
    }

    /// Rotate the heading a fixed fraction of the wrapped difference
    /// toward the target; never an instantaneous snap.
    pub fn integrate_heading(&mut self) {
        let diff = shortest_angle_diff(self.target_angle, self.angle);
        self.angle += diff * SNAKE_TURN_RATE;
    }

    /// Resolve boost gating for this tick and return the effective speed.
    ///
    /// Boosting costs score (clamped at the minimum) and, at most once per
    /// BOOST_DROP_INTERVAL_MS, sheds a bit of target length so the chain
    /// update leaves a feed trail behind. If the snake is not eligible the
    /// boosting flag is force-cleared. The cooldown counts down regardless.
    pub fn apply_boost(&mut self, now_ms: f64) -> f32 {
        let mut speed = self.speed;
        if self.boosting && self.score > BOOST_MIN_SCORE && self.boost_cooldown <= 0.0 {
            speed *= PLAYER_BOOST_SPEED_MULTIPLIER;
            self.score = (self.score - BOOST_SCORE_COST).max(SNAKE_MIN_SCORE);

            let half_initial = SNAKE_INITIAL_LENGTH as f32 / 2.0;
            if now_ms - self.last_boost_drop > BOOST_DROP_INTERVAL_MS
                && self.segments.len() as f32 > half_initial
            {
                self.target_length = (self.target_length - BOOST_LENGTH_SHED).max(half_initial);
                self.last_boost_drop = now_ms;
            }
        } else {
            self.boosting = false;
        }

        if self.boost_cooldown > 0.0 {
            self.boost_cooldown -= GAME_TICK_RATE_MS;
        }
        speed
    }

    pub fn advance(&mut self, speed: f32) {
        self.pos.x += self.angle.cos() * speed;
        self.pos.y += self.angle.sin() * speed;
    }

    /// Push the new head position, trim the tail toward floor(target_length)
    /// (never below the minimum), then relax the chain.
    pub fn update_chain(&mut self) {
        self.segments.insert(0, self.pos);

        let desired = self.target_length.floor() as usize;
        while self.segments.len() > desired && self.segments.len() > SNAKE_MIN_SEGMENTS {
            self.segments.pop();
        }

        self.relax_chain();
    }

    /// Single front-to-back pass: pull each follower toward its leader by
    /// the excess beyond SNAKE_SEGMENT_DISTANCE. Approximates an
    /// inextensible chain without iterative solving; momentary overshoot
    /// settles on the next tick.
    fn relax_chain(&mut self) {
        for i in 1..self.segments.len() {
            let leader = self.segments[i - 1];
            let follower = self.segments[i];
            let dx = leader.x - follower.x;
            let dy = leader.y - follower.y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > SNAKE_SEGMENT_DISTANCE {
                let excess = dist - SNAKE_SEGMENT_DISTANCE;
                self.segments[i].x += dx / dist * excess;
                self.segments[i].y += dy / dist * excess;
            }
        }
    }

    /// Both growth quantities are pure functions of score, recomputed
    /// fresh every tick so there is no drift to accumulate.
    pub fn recompute_growth(&mut self) {
        self.target_length =
            SNAKE_INITIAL_LENGTH as f32 + (self.score / SCORE_PER_SEGMENT).floor();
        self.size_multiplier = 1.0 + (self.score / 1000.0).powf(1.0 / 5.0);
    }
}
