/// Giant component probe on Erdős-Rényi random graphs
///
/// Samples G(n, p) and tracks connectivity with a [`DisjointSetForest`], so the
/// edge probability needed to keep one giant component can be checked
/// empirically.
use anyhow::{bail, Result};
use rand::Rng;
use std::fmt;

use crate::forest::DisjointSetForest;

/// Largest graph [`sample_random_graph`] accepts; the pair loop is quadratic
pub const MAX_NODES: usize = 20_000;

/// Compute edge probability for Erdős-Rényi random graph giant component
///
/// For a random graph G(n,p) to maintain a single giant component with probability
/// `connectivity_prob`, we need: p = (log n - log(-log(connectivity_prob)))/n
///
/// This is based on the sharp threshold result:
/// If p = (log n + c)/n, then P_connected → e^(-e^(-c)) as n → ∞
///
/// # Arguments
/// * `n` - Number of nodes
/// * `connectivity_prob` - Desired probability that graph has giant component (0 < x < 1)
pub fn compute_connectivity_probability(n: usize, connectivity_prob: f64) -> f64 {
    if n <= 1 {
        return 1.0;
    }

    let x = connectivity_prob.clamp(0.001, 0.999);

    // The asymptotic bound is useless this small
    if n <= 10 {
        return match n {
            2 => 1.0,
            3 => 0.8,
            4 => 0.7,
            5 => 0.6,
            _ => 0.5,
        };
    }

    let n_f = n as f64;
    let c = -(-x.ln()).ln();
    let p = (n_f.ln() + c) / n_f;

    p.clamp(0.001, 1.0)
}

/// What one sampled graph looked like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GiantSummary {
    pub nodes: usize,
    pub edges: usize,
    pub components: usize,
    /// Size of the largest component
    pub largest: usize,
}

impl GiantSummary {
    /// Whether every node ended up in one component
    pub fn is_connected(&self) -> bool {
        self.components <= 1
    }
}

impl fmt::Display for GiantSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes\t{}", self.nodes)?;
        writeln!(f, "edges\t{}", self.edges)?;
        writeln!(f, "components\t{}", self.components)?;
        writeln!(f, "largest\t{}", self.largest)?;
        write!(f, "connected\t{}", self.is_connected())
    }
}

/// Sample G(n, edge_prob) and report its components.
///
/// Every unordered pair is drawn once, so the cost is quadratic in `n`;
/// graphs above [`MAX_NODES`] are rejected.
pub fn sample_random_graph<R: Rng>(
    n: usize,
    edge_prob: f64,
    rng: &mut R,
) -> Result<GiantSummary> {
    if n > MAX_NODES {
        bail!("{n} nodes exceeds the maximum of {MAX_NODES}");
    }

    let mut forest = DisjointSetForest::new(n);
    let mut edges = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen::<f64>() < edge_prob {
                edges += 1;
                forest.union(i, j)?;
            }
        }
    }

    log::debug!(
        "G({n}, {edge_prob:.4}): {edges} edges, {} components",
        forest.count()
    );

    Ok(GiantSummary {
        nodes: n,
        edges,
        components: forest.count(),
        largest: forest.largest_set_size(),
    })
}
