//! Example: accessibility audit of an HTML file
//!
//! Usage: `cargo run -p fos-a11y --example audit -- page.html [config.json]`

use anyhow::Context;
use fos_a11y::{A11yConfig, AccessibilityTree, AllowedAttrCheck, CheckContext, NameComputer};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().context("usage: audit <file.html> [config.json]")?;

    let config = match args.next() {
        Some(config_path) => {
            let json = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path))?;
            A11yConfig::from_json(&json)?
        }
        None => A11yConfig::default(),
    };
    let registry = config.registry();

    let html = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let doc = fos_html::HtmlParser::new().parse_with_url(&html, &path)?;
    let tree = doc.tree();

    let names = NameComputer::new(tree, &registry);
    let check = AllowedAttrCheck::new(&registry);
    let mut failures = 0;

    for node in AccessibilityTree::descendants(tree, tree.root()) {
        let Some(tag) = AccessibilityTree::tag_name(tree, node) else {
            continue;
        };

        if let Some(id) = AccessibilityTree::attribute(tree, node, "id") {
            println!("{}#{}: {:?}", tag, id, names.compute(node));
        }

        let mut ctx = CheckContext::new();
        if !check.evaluate(tree, node, None, &mut ctx) {
            failures += 1;
            println!("  {} disallowed: {}", tag, ctx.data().unwrap_or_default().join(", "));
        }
    }

    println!("{} element(s) with disallowed ARIA attributes", failures);
    Ok(())
}
