//! Examples of using the radix trie
use radix_mut::Trie;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

fn main() -> Result<(), radix_mut::Error> {
    // RUST_LOG=radix_mut=trace shows every split and merge
    let _ = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .try_init();

    let mut trie = Trie::new();

    // Insert some values
    for key in ["test", "slow", "water", "watsol", "tester", "testering", "rewater", "waterrat"] {
        trie.insert(key, key.len())?;
    }

    // Check values
    assert_eq!(trie.get("water"), Some(&5));
    assert_eq!(trie.get("missing"), None);

    println!("tree shape:\n{:?}", trie);

    // Walk every key in byte order through successor links
    let mut at = trie.first();
    while let Some(id) = at {
        let node = trie.node(id).expect("successor handles are live");
        println!("{} -> {:?}", String::from_utf8_lossy(&node.key()), node.value());
        at = trie.next(id);
    }

    // Everything below "test"
    for key in trie.prefix_keys("test")? {
        println!("prefix match: {}", String::from_utf8_lossy(&key));
    }

    // Removing "test" folds it into "tester"
    trie.remove("test");
    println!("after removing \"test\":\n{:?}", trie);

    Ok(())
}
