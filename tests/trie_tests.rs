use radix_mut::{Error, Trie};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init();
}

fn radixtree() -> Trie<&'static str> {
    let mut trie = Trie::new();
    for key in [
        "test",
        "slow",
        "water",
        "watsol",
        "tester",
        "testering",
        "rewater",
        "waterrat",
    ] {
        trie.insert(key, key).unwrap();
    }
    trie
}

#[test]
fn test_insert_keeps_tree_well_formed() {
    init_logging();
    let mut trie = Trie::new();
    assert!(trie.is_well_formed());
    assert_eq!(trie.len(), 0);

    for key in ["test", "slow", "water", "tester", "testering", "rewater", "waterrat"] {
        trie.insert(key, ()).unwrap();
        assert!(trie.is_well_formed(), "malformed after inserting {:?}\n{:?}", key, trie);
    }
    assert_eq!(trie.len(), 7);
}

#[test]
fn test_find_full_key() {
    init_logging();
    let trie = radixtree();

    let tester = trie.find("tester").unwrap();
    assert_eq!(trie.key(tester).unwrap(), b"tester");
    assert_eq!(trie.value(tester), Some(&"tester"));

    assert!(trie.find("tes").is_none());
    assert!(trie.find("testers").is_none());
    assert!(trie.find("wat").is_none());
}

#[test]
fn test_remove_twice() {
    init_logging();
    let mut trie = radixtree();

    assert_eq!(trie.remove("slow"), Some("slow"));
    assert_eq!(trie.remove("slow"), None);
    assert_eq!(trie.len(), 7);
    assert!(trie.is_well_formed());
}

#[test]
fn test_remove_returns_stored_value() {
    let mut trie = Trie::new();
    trie.insert("test", "aa").unwrap();
    trie.insert("slow", "bb").unwrap();

    assert_eq!(trie.remove("slow"), Some("bb"));
    assert_eq!(trie.remove("slow"), None);
}

#[test]
fn test_prefix_from_found_node() {
    init_logging();
    let mut trie = Trie::new();
    for key in ["tester", "testering", "te", "testeringandmore"] {
        trie.insert(key, ()).unwrap();
    }

    let tester = trie.node(trie.find("tester").unwrap()).unwrap();
    assert_eq!(
        tester.prefix("tester").unwrap(),
        vec![
            b"tester".to_vec(),
            b"testering".to_vec(),
            b"testeringandmore".to_vec()
        ]
    );

    // Walking the children from "tester" reaches the same keys
    fn collect(node: radix_mut::NodeRef<'_, ()>, out: &mut Vec<Vec<u8>>) {
        out.push(node.key());
        for (_, child) in node.children() {
            collect(child, out);
        }
    }
    let mut keys = Vec::new();
    collect(tester, &mut keys);
    assert_eq!(keys, tester.keys());
}

#[test]
fn test_remove_prefix_key_keeps_longer_keys() {
    init_logging();
    let mut trie = Trie::new();
    for key in ["test", "tester", "testering"] {
        trie.insert(key, "aa").unwrap();
    }

    assert_eq!(trie.remove("test"), Some("aa"));
    assert!(trie.is_well_formed());
    assert!(trie.find("test").is_none());

    let tester = trie.find("tester").unwrap();
    assert_eq!(trie.key(tester).unwrap(), b"tester");
    let testering = trie.find("testering").unwrap();
    assert_eq!(trie.key(testering).unwrap(), b"testering");

    // "test" merged into "tester"; only one edge leaves the root
    assert_eq!(trie.root().children().len(), 1);
    assert_eq!(trie.root().child(b't').unwrap().label(), b"tester");
}

#[test]
fn test_remove_round_trip_on_shared_prefix() {
    let mut trie = Trie::new();
    trie.insert("team", 1).unwrap();
    trie.insert("tea", 2).unwrap();
    trie.insert("tear", 3).unwrap();

    assert_eq!(trie.remove("tea"), Some(2));
    // The "tea" edge persists as a branch, but the key is gone
    assert!(trie.find("tea").is_none());
    assert_eq!(trie.get("team"), Some(&1));
    assert_eq!(trie.get("tear"), Some(&3));
    assert!(trie.is_well_formed());
}

#[test]
fn test_overwrite_keeps_count() {
    let mut trie = radixtree();
    let before = trie.len();
    trie.insert("water", "again").unwrap();

    assert_eq!(trie.len(), before);
    assert_eq!(trie.get("water"), Some(&"again"));
}

#[test]
fn test_invalid_key() {
    let mut trie: Trie<u8> = Trie::new();
    assert_eq!(trie.insert(b"", 0), Err(Error::InvalidKey));
    assert_eq!(Error::InvalidKey.to_string(), "invalid key: keys must be non-empty");
    assert!(trie.find(b"").is_none());
    assert!(trie.remove(b"").is_none());
}

#[test]
fn test_visit_counts_match_len() {
    let trie = radixtree();
    let mut nodes = 0;
    let mut values = 0;
    trie.visit(|value| {
        nodes += 1;
        if value.is_some() {
            values += 1;
        }
    });

    assert_eq!(values, trie.len());
    assert!(nodes > values);
}

#[test]
fn test_binary_keys() {
    let mut trie = Trie::new();
    trie.insert([0u8, 255, 1], 'a').unwrap();
    trie.insert([0u8, 255], 'b').unwrap();
    trie.insert([0u8, 0], 'c').unwrap();

    assert_eq!(trie.get([0u8, 255, 1]), Some(&'a'));
    assert_eq!(
        trie.keys(),
        vec![vec![0u8, 0], vec![0u8, 255], vec![0u8, 255, 1]]
    );
    assert!(trie.is_well_formed());
}
