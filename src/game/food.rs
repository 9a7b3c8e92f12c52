use rand::Rng;

use crate::config::{
    FOOD_DROP_JITTER, FOOD_RADIUS_MAX, FOOD_RADIUS_MIN, FOOD_SPAWN_PADDING, GAME_WORLD_HEIGHT,
    GAME_WORLD_WIDTH, MAX_FOOD_ITEMS,
};
use crate::game::math::Point;
use crate::game::random_color;
use crate::game::snake::Snake;

#[derive(Debug, Clone)]
pub struct Food {
    pub id: String,
    pub pos: Point,
    pub size: f32,
    pub color: String,
    pub value: i32,
}

/// The bounded set of active food items. Ambient spawns respect the
/// population cap; drops from dying or boosting snakes do not.
pub struct FoodField {
    items: Vec<Food>,
    next_id: u64,
}

impl FoodField {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
        }
    }

    pub fn items(&self) -> &[Food] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn spawn_initial(&mut self, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            self.push_ambient(rng);
        }
    }

    /// One-for-one top-up after a consumption, gated by the cap.
    pub fn replenish(&mut self, rng: &mut impl Rng) {
        if self.items.len() < MAX_FOOD_ITEMS {
            self.push_ambient(rng);
        }
    }

    /// Convert one segment of a dying or boosting snake into food: placed
    /// at the segment with a small jitter, colored like the snake, worth a
    /// share of its score, and larger than ambient food.
    pub fn drop_from_snake(&mut self, snake: &Snake, segment_index: usize, rng: &mut impl Rng) {
        let segment = match snake.segments.get(segment_index) {
            Some(p) => *p,
            None => return,
        };

        let per_segment = snake.score / snake.segments.len() as f32 / 2.0;
        let value = (per_segment.floor() as i32).max(1);
        let size = FOOD_RADIUS_MAX + (value as f32 / 4.0).min(FOOD_RADIUS_MAX * 0.75);

        let pos = Point::new(
            segment.x + (rng.gen::<f32>() - 0.5) * FOOD_DROP_JITTER,
            segment.y + (rng.gen::<f32>() - 0.5) * FOOD_DROP_JITTER,
        );
        let id = self.fresh_id();
        self.items.push(Food {
            id,
            pos,
            size,
            color: snake.color.clone(),
            value,
        });
    }

    /// Remove every food item within reach of the head and return the total
    /// score gained. Each pickup replenishes the field individually.
    pub fn consume_at(&mut self, head: Point, head_radius: f32, rng: &mut impl Rng) -> i32 {
        let mut gained = 0;
        let mut i = self.items.len();
        while i > 0 {
            i -= 1;
            let threshold = head_radius + self.items[i].size;
            if head.distance(self.items[i].pos) < threshold {
                gained += self.items[i].value;
                self.items.remove(i);
                self.replenish(rng);
            }
        }
        gained
    }

    fn push_ambient(&mut self, rng: &mut impl Rng) {
        let pos = Point::new(
            rng.gen_range(FOOD_SPAWN_PADDING..GAME_WORLD_WIDTH - FOOD_SPAWN_PADDING),
            rng.gen_range(FOOD_SPAWN_PADDING..GAME_WORLD_HEIGHT - FOOD_SPAWN_PADDING),
        );
        // Radius and value share one draw on purpose: bigger pellets are
        // worth more, and existing balance leans on that.
        let roll = rng.gen_range(FOOD_RADIUS_MIN..FOOD_RADIUS_MAX);
        let id = self.fresh_id();
        self.items.push(Food {
            id,
            pos,
            size: roll,
            color: random_color(rng),
            value: roll.floor() as i32,
        });
    }

    fn fresh_id(&mut self) -> String {
        let id = format!("food_{}", self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn ambient_food_couples_value_to_radius() {
        let mut rng = rng();
        let mut field = FoodField::new();
        field.spawn_initial(50, &mut rng);
        for food in field.items() {
            assert!(food.size >= FOOD_RADIUS_MIN && food.size < FOOD_RADIUS_MAX);
            assert_eq!(food.value, food.size.floor() as i32);
            assert!(food.pos.x >= FOOD_SPAWN_PADDING);
            assert!(food.pos.x <= GAME_WORLD_WIDTH - FOOD_SPAWN_PADDING);
            assert!(food.pos.y >= FOOD_SPAWN_PADDING);
            assert!(food.pos.y <= GAME_WORLD_HEIGHT - FOOD_SPAWN_PADDING);
        }
    }

    #[test]
    fn replenish_respects_cap() {
        let mut rng = rng();
        let mut field = FoodField::new();
        field.spawn_initial(MAX_FOOD_ITEMS, &mut rng);
        field.replenish(&mut rng);
        assert_eq!(field.len(), MAX_FOOD_ITEMS);
    }

    #[test]
    fn pickup_grants_value_and_replenishes() {
        let mut rng = rng();
        let mut field = FoodField::new();
        field.items.push(Food {
            id: "food_t".to_owned(),
            pos: Point::new(105.0, 100.0),
            size: 5.0,
            color: "rgb(100,100,100)".to_owned(),
            value: 7,
        });

        // Head radius 10, distance 5 < 10 + 5.
        let gained = field.consume_at(Point::new(100.0, 100.0), 10.0, &mut rng);
        assert_eq!(gained, 7);
        // One-for-one replenishment while under the cap.
        assert_eq!(field.len(), 1);
        assert_ne!(field.items()[0].id, "food_t");
    }

    #[test]
    fn pickup_out_of_reach_is_ignored() {
        let mut rng = rng();
        let mut field = FoodField::new();
        field.items.push(Food {
            id: "food_t".to_owned(),
            pos: Point::new(200.0, 100.0),
            size: 5.0,
            color: "rgb(100,100,100)".to_owned(),
            value: 7,
        });
        let gained = field.consume_at(Point::new(100.0, 100.0), 10.0, &mut rng);
        assert_eq!(gained, 0);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn field_stays_at_cap_through_consumption() {
        let mut rng = rng();
        let mut field = FoodField::new();
        field.spawn_initial(MAX_FOOD_ITEMS, &mut rng);
        field.items[0] = Food {
            id: "food_t".to_owned(),
            pos: Point::new(105.0, 100.0),
            size: 5.0,
            color: "rgb(100,100,100)".to_owned(),
            value: 7,
        };

        let gained = field.consume_at(Point::new(100.0, 100.0), 10.0, &mut rng);
        assert!(gained >= 7);
        assert_eq!(field.len(), MAX_FOOD_ITEMS);
    }

    #[test]
    fn snake_drop_shares_score_and_outsizes_ambient() {
        let mut rng = rng();
        let mut field = FoodField::new();
        let mut snake = Snake::spawn("s1", "Tester", false, &mut rng);
        snake.score = 400.0;

        field.drop_from_snake(&snake, 0, &mut rng);
        assert_eq!(field.len(), 1);
        let dropped = &field.items()[0];
        // 400 / 10 segments / 2 = 20 per dropped item.
        assert_eq!(dropped.value, 20);
        assert!(dropped.size >= FOOD_RADIUS_MAX);
        assert!(dropped.size <= FOOD_RADIUS_MAX * 1.75);
        assert_eq!(dropped.color, snake.color);
        assert!(dropped.pos.distance(snake.segments[0]) <= FOOD_DROP_JITTER);
    }

    #[test]
    fn snake_drop_value_floors_at_one() {
        let mut rng = rng();
        let mut field = FoodField::new();
        let mut snake = Snake::spawn("s1", "Tester", false, &mut rng);
        snake.score = 1.0;
        field.drop_from_snake(&snake, 3, &mut rng);
        assert_eq!(field.items()[0].value, 1);
    }

    #[test]
    fn snake_drop_out_of_range_segment_is_noop() {
        let mut rng = rng();
        let mut field = FoodField::new();
        let snake = Snake::spawn("s1", "Tester", false, &mut rng);
        field.drop_from_snake(&snake, 99, &mut rng);
        assert!(field.is_empty());
    }
}
