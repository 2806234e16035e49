//! Example: answer a few globe clicks the way the host application does.
//!
//! Run with `RUST_LOG=debug` to see the index build events.

use globe_index::select::Selector;
use globe_index::{GlobeIndex, RawPoint};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct Animal {
    name: &'static str,
    fact: &'static str,
}

fn animal(lat: f64, lng: f64, region: &str, name: &'static str, fact: &'static str) -> RawPoint<Animal> {
    RawPoint::new(lat, lng, region, Animal { name, fact })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let index = GlobeIndex::build_index(vec![
        animal(-25.3, 133.8, "Australia", "Koala", "Sleeps up to 22 hours a day."),
        animal(-1.3, 36.8, "Kenya", "Lion", "Roars carry for 8 km."),
        animal(-2.0, 37.5, "Kenya", "Elephant", "Recognizes itself in a mirror."),
        animal(10.0, 170.0, "Pacific Ocean", "Sea turtle", "Navigates by magnetic fields."),
        animal(10.0, -170.0, "Pacific Ocean", "Manta ray", "Has the largest brain of any fish."),
        animal(64.1, -21.9, "Iceland", "Puffin", "Flaps its wings 400 times a minute."),
        animal(78.2, 15.6, "Norway", "Polar bear", "Has black skin under white fur."),
    ])
    .expect("dataset is valid");

    println!("=== Nearest to the antimeridian at (10, 179) ===");
    for (point, distance) in index.find_nearest_with_distance(10.0, 179.0, 3).unwrap() {
        println!("  {:>12} {:>9.1} km", point.payload.name, distance);
    }

    println!("\n=== Clicks ===");
    let selector = Selector::new(&index);
    let mut rng = StdRng::seed_from_u64(2024);
    let mut last_shown = None;
    let clicks = [
        (-1.0, 37.0, Some("Kenya")),
        (-1.0, 37.0, Some("Kenya")),
        (0.0, 160.0, Some("Pacific Ocean")),
        (-60.0, -30.0, None),
        (85.0, 40.0, Some("Arctic Ocean")),
    ];
    for (lat, lng, region) in clicks {
        let pick = selector
            .locate(lat, lng, region, last_shown, &mut rng)
            .unwrap()
            .expect("index is never empty");
        println!(
            "  ({lat:>6.1}, {lng:>6.1}) {:<14} -> {}: {}",
            region.unwrap_or("-"),
            pick.payload.name,
            pick.payload.fact
        );
        last_shown = Some(pick.id);
    }
}
