pub mod bots;
pub mod collision;
pub mod food;
pub mod math;
pub mod snake;
pub mod snapshot;
pub mod world;

use rand::Rng;

/// Cosmetic color in the CSS form the client paints with. Channels stay
/// off pure black so entities read against the background.
pub fn random_color(rng: &mut impl Rng) -> String {
    let r = rng.gen_range(55..255);
    let g = rng.gen_range(55..255);
    let b = rng.gen_range(55..255);
    format!("rgb({},{},{})", r, g, b)
}
