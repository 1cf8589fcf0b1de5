use std::{error::Error, sync::Arc, thread};

use swrr::{Config, SelectorRegistry, WeightedSelector};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn registry_isolation() {
    let registry = SelectorRegistry::new();

    let mut first = WeightedSelector::new();
    first.add("a1", 2);
    first.add("a2", 1);
    let first = registry.insert("x", first);

    let mut second = WeightedSelector::new();
    second.add("b1", 1);
    second.add("b2", 1);
    let second = registry.insert("y", second);

    for _ in 0..5 {
        second.lock().next();
    }

    let stored = registry.get("x").unwrap();
    assert!(Arc::ptr_eq(&stored, &first));
    assert!(!Arc::ptr_eq(&stored, &second));

    let picks: Vec<_> = (0..3).map(|_| *stored.lock().next().unwrap()).collect();
    assert_eq!(picks, ["a1", "a1", "a2"]);
}

#[test]
fn concurrent_get_and_set() {
    let registry = SelectorRegistry::new();
    let keys: Vec<String> = (0..8).map(|i| format!("pool-{i}")).collect();

    thread::scope(|scope| {
        for key in &keys {
            let registry = &registry;
            scope.spawn(move || {
                let mut selector = WeightedSelector::new();
                selector.add(key.clone(), 1);
                registry.insert(key.as_str(), selector);
            });
        }

        for _ in 0..4 {
            let registry = &registry;
            let keys = &keys;
            scope.spawn(move || {
                for key in keys.iter().cycle().take(1_000) {
                    if let Some(selector) = registry.get(key) {
                        assert_eq!(selector.lock().next(), Some(key));
                    }
                }
            });
        }
    });

    assert_eq!(registry.len(), keys.len());
    for key in &keys {
        let selector = registry.get(key).unwrap();
        assert_eq!(selector.lock().next(), Some(key));
    }
}

#[test]
fn shared_selector_across_threads() {
    let registry = SelectorRegistry::<String>::new();
    registry.insert("api", "a=3,b=1".parse().unwrap());

    let picks: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let selector = registry.get("api").unwrap();
                    (0..100)
                        .map(|_| selector.lock().next().cloned().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(picks.len(), 400);
    assert_eq!(picks.iter().filter(|item| *item == "a").count(), 300);
    assert_eq!(picks.iter().filter(|item| *item == "b").count(), 100);
}

#[tokio::test]
async fn load_fixture_config() -> Result<(), Box<dyn Error>> {
    let source = tokio::fs::read_to_string(fixture("pools.toml")).await?;
    let config: Config = source.parse()?;
    assert_eq!(config.max_level(), tracing::Level::DEBUG);

    let registry = SelectorRegistry::from_config(&config)?;
    assert_eq!(registry.keys(), ["api", "db", "drained"]);

    let db = registry.get("db").unwrap();
    let mut db = db.lock();
    let picks: Vec<_> = (0..4).map(|_| db.next().cloned().unwrap()).collect();
    assert_eq!(
        picks,
        ["10.0.0.2:5432", "10.0.0.2:5432", "10.0.0.1:5432", "10.0.0.2:5432"]
    );

    let drained = registry.get("drained").unwrap();
    assert_eq!(drained.lock().next(), None);
    assert_eq!(drained.lock().source(), Some("old=0, older=-1"));

    Ok(())
}

#[test]
fn load_missing_file() {
    let err = Config::load(fixture("missing.toml")).unwrap_err();

    assert!(matches!(err, swrr::Error::Io(_)));
}

#[test]
fn load_from_path() {
    let config = Config::load(fixture("pools.toml")).unwrap();

    assert_eq!(config.pools.len(), 3);
}
