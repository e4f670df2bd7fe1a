//! Event pipeline: every transaction's record must reach every composed
//! sink, in per-producer order, and survive a full drain on shutdown.

use larder::{
    ActionSink, ConsoleSink, JsonFileSink, Kitchen, MultiSink, OrderRequest, SimClock,
    StorageConfig, TempClass,
};

fn request(id: &str, temp: TempClass, freshness_secs: u32) -> OrderRequest {
    OrderRequest::new(id, "pipeline", temp, freshness_secs)
}

#[tokio::test]
async fn full_stream_reaches_the_json_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("actions.json");

    let clock = SimClock::at_ms(1_700_000_000_000);
    let sink = JsonFileSink::create(&path);
    let kitchen = Kitchen::new(sink).with_clock(larder::Clock::sim(clock.clone()));
    kitchen.sink().run();

    kitchen.place(request("a", TempClass::Hot, 60), 100);
    clock.advance_ms(10);
    kitchen.place(request("b", TempClass::Room, 30), 100);
    clock.advance_ms(10);
    kitchen.pickup("a").unwrap();

    kitchen.shutdown().await.unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let records = parsed.as_array().unwrap();

    assert_eq!(records.len(), 3);
    // Single producer: file order matches operation order.
    assert_eq!(records[0]["action"], "place");
    assert_eq!(records[0]["id"], "a");
    assert_eq!(records[0]["timestamp"], 1_700_000_000_000u64);
    assert_eq!(records[1]["action"], "place");
    assert_eq!(records[1]["id"], "b");
    assert_eq!(records[2]["action"], "pickup");
    assert_eq!(records[2]["id"], "a");
    assert_eq!(records[2]["timestamp"], 1_700_000_000_020u64);

    // Contract shape only: no extra fields leak into the persisted record.
    for record in records {
        assert_eq!(record.as_object().unwrap().len(), 3);
    }
}

#[tokio::test]
async fn composed_sinks_each_see_the_full_stream() {
    let dir = tempfile::tempdir().unwrap();
    let first_path = dir.path().join("first.json");
    let second_path = dir.path().join("second.json");

    let multi = MultiSink::new()
        .with_sink(JsonFileSink::create(&first_path))
        .with_sink(JsonFileSink::create(&second_path))
        .with_sink(ConsoleSink::new());

    let kitchen = Kitchen::with_config(
        multi,
        StorageConfig::new()
            .with_hot_capacity(1)
            .with_cold_capacity(1)
            .with_shelf_capacity(2),
    );
    kitchen.sink().run();

    // Drive a burst that includes a discard (tiny shelf).
    for i in 0..5 {
        kitchen.place(request(&format!("r{i}"), TempClass::Room, 10 + i), 0);
    }

    kitchen.shutdown().await.unwrap();

    let read = |path: &std::path::Path| -> Vec<serde_json::Value> {
        serde_json::from_str::<serde_json::Value>(&std::fs::read_to_string(path).unwrap())
            .unwrap()
            .as_array()
            .unwrap()
            .clone()
    };

    let first = read(&first_path);
    let second = read(&second_path);

    // 5 places + 3 discards (shelf capacity 2) on every sink, same order.
    assert_eq!(first.len(), 8);
    assert_eq!(first, second);
    assert_eq!(
        first.iter().filter(|r| r["action"] == "discard").count(),
        3
    );
}

#[tokio::test]
async fn finish_flushes_a_large_backlog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backlog.json");

    let kitchen = Kitchen::with_config(
        JsonFileSink::create(&path),
        StorageConfig::new()
            .with_hot_capacity(1_000)
            .with_cold_capacity(1_000)
            .with_shelf_capacity(1_000),
    );
    kitchen.sink().run();

    for i in 0..500 {
        kitchen.place(request(&format!("o{i}"), TempClass::Cold, 60), 0);
    }
    // finish must not return until all 500 are on disk.
    kitchen.shutdown().await.unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 500);
}
