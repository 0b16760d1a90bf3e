//! Topology passes run on a [`RoadNetworkBuilder`] before it is built.
//!
//! # Simplification
//!
//! Map data digitises a curved street as a chain of many short segments.
//! [`simplify`] removes the interstitial nodes of such chains and replaces
//! each chain with a single edge whose length is the sum of its segments.
//! Connectivity between the remaining nodes is unchanged.
//!
//! A node is **interstitial** when it sits in the middle of an unbranched
//! chain, in one of two shapes:
//!
//! ```text
//! two-way:  p ⇄ n ⇄ q    exactly one edge n→p, n→q, p→n, q→n
//! one-way:  p → n → q    exactly one edge p→n and one edge n→q
//! ```
//!
//! with `p ≠ q` and neither equal to `n`.  Every other node is an
//! **endpoint** and survives.  A ring made only of interstitial nodes keeps
//! its lowest-numbered node as an endpoint.
//!
//! # Component retention
//!
//! [`largest_component`] keeps the largest weakly connected component and
//! drops islands (disconnected fragments created by truncating map data to
//! a bounding box).

use rt_core::NodeId;

use crate::network::{RawEdge, RoadNetworkBuilder};

// ── Largest component ─────────────────────────────────────────────────────────

/// Keep only the largest weakly connected component.
///
/// Ties between equally sized components go to the one containing the
/// lowest `NodeId`.  An empty builder is returned unchanged.
pub fn largest_component(builder: RoadNetworkBuilder) -> RoadNetworkBuilder {
    let n = builder.node_count();
    if n == 0 {
        return builder;
    }

    let mut parent: Vec<u32> = (0..n as u32).collect();
    for e in &builder.raw_edges {
        union(&mut parent, e.from.0, e.to.0);
    }

    let mut size = vec![0usize; n];
    let roots: Vec<u32> = (0..n as u32).map(|i| find(&mut parent, i)).collect();
    for &r in &roots {
        size[r as usize] += 1;
    }

    // First root in node order with the maximum size.
    let mut best = roots[0];
    for &r in &roots {
        if size[r as usize] > size[best as usize] {
            best = r;
        }
    }

    if size[best as usize] == n {
        return builder;
    }
    let keep: Vec<bool> = roots.iter().map(|&r| r == best).collect();
    builder.retain_nodes(&keep)
}

fn find(parent: &mut [u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        // Path halving.
        parent[x as usize] = parent[parent[x as usize] as usize];
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let (ra, rb) = (find(parent, a), find(parent, b));
    if ra != rb {
        // Smaller root wins so the result does not depend on edge order.
        let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[hi as usize] = lo;
    }
}

// ── Simplification ────────────────────────────────────────────────────────────

/// Merge chains of interstitial nodes into single edges.
///
/// Merged lengths are the sum of the segment lengths that are present; a
/// chain with no known length at all stays length-less.
pub fn simplify(builder: RoadNetworkBuilder) -> RoadNetworkBuilder {
    let n = builder.node_count();
    let edges = &builder.raw_edges;

    let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut in_edges:  Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, e) in edges.iter().enumerate() {
        out_edges[e.from.index()].push(i);
        in_edges[e.to.index()].push(i);
    }

    let mut endpoint: Vec<bool> = (0..n)
        .map(|v| !is_interstitial(v, edges, &out_edges, &in_edges))
        .collect();

    let mut merged: Vec<RawEdge> = Vec::with_capacity(edges.len());
    let mut visited = vec![false; n];

    // Chains hanging off real endpoints.
    for v in 0..n {
        if endpoint[v] {
            walk_chains_from(v, edges, &out_edges, &endpoint, &mut visited, &mut merged);
        }
    }

    // Whatever interstitial node was not reached lies on an isolated ring.
    for v in 0..n {
        if !endpoint[v] && !visited[v] {
            endpoint[v] = true;
            walk_chains_from(v, edges, &out_edges, &endpoint, &mut visited, &mut merged);
        }
    }

    let staged = RoadNetworkBuilder {
        nodes:      builder.nodes,
        source_ids: builder.source_ids,
        raw_edges:  merged,
    };
    if endpoint.iter().all(|e| *e) {
        return staged;
    }
    staged.retain_nodes(&endpoint)
}

fn is_interstitial(
    v: usize,
    edges: &[RawEdge],
    out_edges: &[Vec<usize>],
    in_edges: &[Vec<usize>],
) -> bool {
    let outs: Vec<usize> = out_edges[v].iter().map(|&e| edges[e].to.index()).collect();
    let ins:  Vec<usize> = in_edges[v].iter().map(|&e| edges[e].from.index()).collect();

    if outs.contains(&v) || ins.contains(&v) {
        return false;
    }

    match (ins.as_slice(), outs.as_slice()) {
        // One-way pass-through.
        ([p], [q]) => p != q,
        // Two-way pass-through.
        ([a, b], [c, d]) => {
            a != b && ((a == c && b == d) || (a == d && b == c))
        }
        _ => false,
    }
}

/// Follow every outgoing edge of endpoint `start` through interstitial nodes
/// until the next endpoint, emitting one merged edge per chain.
fn walk_chains_from(
    start: usize,
    edges: &[RawEdge],
    out_edges: &[Vec<usize>],
    endpoint: &[bool],
    visited: &mut [bool],
    merged: &mut Vec<RawEdge>,
) {
    visited[start] = true;

    for &first in &out_edges[start] {
        let mut length = edges[first].length_m;
        let mut prev = start;
        let mut cur = edges[first].to.index();
        // An interstitial chain cannot be longer than the node count.
        let mut steps = 0;

        while !endpoint[cur] && steps < endpoint.len() {
            visited[cur] = true;
            let next_edge = out_edges[cur]
                .iter()
                .copied()
                .find(|&e| edges[e].to.index() != prev)
                .or_else(|| out_edges[cur].first().copied());
            let Some(e) = next_edge else { break };

            length = add_lengths(length, edges[e].length_m);
            prev = cur;
            cur = edges[e].to.index();
            steps += 1;
        }

        merged.push(RawEdge {
            from:     NodeId(start as u32),
            to:       NodeId(cur as u32),
            length_m: length,
        });
    }
}

#[inline]
fn add_lengths(a: Option<f32>, b: Option<f32>) -> Option<f32> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x + y),
        (x, None) => x,
        (None, y) => y,
    }
}
