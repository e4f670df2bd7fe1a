//! End-to-end driver: feeds generated orders into a kitchen at a fixed rate,
//! schedules each pickup after a randomized delay, then drains the sinks.
//!
//! Run with: cargo run --example simulate

use std::sync::Arc;
use std::time::Duration;

use larder::{
    ActionSink, ConsoleSink, DeterministicRng, JsonFileSink, Kitchen, MultiSink, OrderRequest,
    TempClass,
};

const ORDER_COUNT: usize = 40;
const PLACE_RATE_MS: u64 = 50;
const PICKUP_DELAY_MS_MIN: usize = 200;
const PICKUP_DELAY_MS_MAX: usize = 2_000;
const RNG_SEED: u64 = 42;

fn generate_orders(rng: &mut DeterministicRng, count: usize) -> Vec<OrderRequest> {
    let temps = [TempClass::Room, TempClass::Hot, TempClass::Cold];
    let names = ["soup", "salad", "lasagna", "sushi", "pie", "stew", "gelato"];

    (0..count)
        .map(|i| {
            let temp = *rng.choose(&temps);
            let name = *rng.choose(&names);
            let freshness = rng.next_usize(2, 120) as u32;
            OrderRequest::new(format!("order-{i:03}"), name, temp, freshness)
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), larder::SinkError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let log_path = std::env::temp_dir().join("larder_actions.json");

    println!("Running simulation with the following parameters:");
    println!("orders: {ORDER_COUNT}");
    println!("place rate: {PLACE_RATE_MS}ms");
    println!("pickup delay: {PICKUP_DELAY_MS_MIN}..{PICKUP_DELAY_MS_MAX}ms");
    println!("action log: {}", log_path.display());

    let sink = MultiSink::new()
        .with_sink(ConsoleSink::new())
        .with_sink(JsonFileSink::create(&log_path));

    let kitchen = Arc::new(Kitchen::new(sink));
    kitchen.sink().run();

    let mut rng = DeterministicRng::new(RNG_SEED);
    let orders = generate_orders(&mut rng, ORDER_COUNT);

    // Place at a fixed rate; each order gets a pickup task scheduled for the
    // same delay the freshness estimate was computed with.
    let mut pickups = Vec::with_capacity(orders.len());
    for order in orders {
        let delay_ms = rng.next_usize(PICKUP_DELAY_MS_MIN, PICKUP_DELAY_MS_MAX) as u64;
        let id = order.id.clone();
        kitchen.place(order, delay_ms);

        let kitchen = Arc::clone(&kitchen);
        pickups.push(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            // A discarded order is legitimately gone by now.
            kitchen.pickup(&id).is_some()
        }));

        tokio::time::sleep(Duration::from_millis(PLACE_RATE_MS)).await;
    }

    let mut picked = 0usize;
    for pickup in pickups {
        if pickup.await.expect("pickup task panicked") {
            picked += 1;
        }
    }

    kitchen.shutdown().await?;
    println!("All orders processed: {picked}/{ORDER_COUNT} picked up, rest discarded.");
    println!("Action log file: {}", log_path.display());
    Ok(())
}
