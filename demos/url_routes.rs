//! Using URLs as keys in a radix trie
use radix_mut::Trie;
use url::Url;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut routes = Trie::new();

    // Create some example URLs
    let home = Url::parse("https://example.com/")?;
    let about = Url::parse("https://example.com/about")?;
    let contact = Url::parse("https://example.com/contact")?;
    let blog = Url::parse("https://example.com/blog")?;
    let blog_post = Url::parse("https://example.com/blog/first-post")?;

    // Url implements AsRef<str>; the trie stores its bytes
    routes.insert(home.as_str(), "Home page")?;
    routes.insert(about.as_str(), "About us")?;
    routes.insert(contact.as_str(), "Contact info")?;
    routes.insert(blog.as_str(), "Blog index")?;
    routes.insert(blog_post.as_str(), "First blog post")?;

    println!("Looking up URLs:");
    for url in [&home, &blog, &blog_post] {
        println!("  {} -> {:?}", url, routes.get(url.as_str()));
    }

    println!("\nBlog section pages:");
    let blog_view = routes.view_subtrie(blog.as_str());
    for (key, content) in &blog_view {
        println!("  {} -> {}", String::from_utf8_lossy(&key), content);
    }

    let unknown = Url::parse("https://example.com/unknown")?;
    println!("\nURL existence check:");
    println!("  {} exists: {}", home, routes.contains_key(home.as_str()));
    println!("  {} exists: {}", unknown, routes.contains_key(unknown.as_str()));

    Ok(())
}
