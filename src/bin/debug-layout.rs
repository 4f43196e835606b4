//! Diagnostic tool: run every technique over every revision and report
//! partition violations and layout metrics.
use anyhow::Context;
use dyntree_rs::layout::check::check_partition;
use dyntree_rs::layout::Technique;
use dyntree_rs::loader;
use dyntree_rs::metrics;
use dyntree_rs::treemap::{Treemap, TreemapConfig};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive("dyntree_rs=warn".parse()?))
        .init();

    let files: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if files.is_empty() {
        anyhow::bail!("usage: debug-layout FILE...");
    }

    println!("=== DIAGNOSTIC: Load → Layout → Check ===");
    let tree = loader::load_revisions(&files).context("Failed to load input")?;
    println!("\n[1] Loaded {} files: {} nodes", files.len(), tree.len());

    let root = tree.get(tree.root);
    println!("    Root weight per revision: {:?}", root.weights);

    println!("\n[2] Largest top-level entities (revision 0):");
    let mut top: Vec<_> = tree.children(tree.root).to_vec();
    top.sort_by(|&a, &b| tree.get(b).weight(0).total_cmp(&tree.get(a).weight(0)));
    for (i, &id) in top.iter().take(10).enumerate() {
        let entity = tree.get(id);
        println!(
            "    [{}] '{}' - weights {:?} ({} children)",
            i,
            entity.id,
            entity.weights,
            entity.children.len()
        );
    }

    let config = TreemapConfig::default();
    let mut failures = 0usize;

    println!("\n[3] Techniques:");
    for technique in Technique::ALL {
        let mut treemap = Treemap::new(tree.clone(), config.canvas(), technique);
        treemap.compute();

        let mut aspect_sum = 0.0;
        let mut displacement_sum = 0.0;
        let mut violations = 0usize;
        loop {
            let revision = treemap.revision();
            let found = check_partition(treemap.tree(), revision);
            for v in found.iter().take(5) {
                println!("    ! {} revision {}: {}", technique, revision, v);
            }
            violations += found.len();

            let m = metrics::revision_metrics(treemap.tree(), revision);
            aspect_sum += m.aspect_ratio.unwrap_or(0.0);
            displacement_sum += m.displacement.unwrap_or(0.0);

            if !treemap.advance_revision() {
                break;
            }
        }

        let revisions = treemap.tree().number_of_revisions().max(1) as f64;
        println!(
            "    {:<15} aspect {:.4}  displacement {:>9.3}  violations {}",
            technique,
            aspect_sum / revisions,
            displacement_sum / (revisions - 1.0).max(1.0),
            violations
        );
        failures += violations;
    }

    println!("\n[4] Total violations: {}", failures);
    Ok(())
}
