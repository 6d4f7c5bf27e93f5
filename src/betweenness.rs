//! A module for performing the multi-threaded computation of betweenness

use std::{collections::VecDeque, ops::Range, panic, thread};

use tracing::{instrument, trace};

use crate::graph::{MAX_NUM_THREADS, MIN_NUM_THREADS};

/// this is an implementation of Ulrik Brandes's
/// A Faster Algorithm for Betweenness Centrality
/// http://snap.stanford.edu/class/cs224w-readings/brandes01centrality.pdf
/// page 10, "Algorithm 1: Betweenness centrality in unweighted graphs"
///
/// Edges are followed in their direction only.
fn betweenness_for_node(index: usize, indices: &[Vec<usize>], betweenness_count: &mut [f64]) {
    let num_nodes = indices.len();
    let unvisited = num_nodes + 1;

    let mut sigma: Vec<f64> = vec![0.0; num_nodes];
    let mut distance: Vec<usize> = vec![unvisited; num_nodes];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
    let mut delta: Vec<f64> = vec![0.0; num_nodes];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut stack: Vec<usize> = Vec::new();

    sigma[index] = 1.0;
    distance[index] = 0;
    queue.push_back(index);

    while let Some(v) = queue.pop_front() {
        stack.push(v);

        for &w in &indices[v] {
            if distance[w] == unvisited {
                distance[w] = distance[v] + 1;
                queue.push_back(w);
            }
            if distance[w] == distance[v] + 1 {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    // The stack pops vertices farthest first.
    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != index {
            betweenness_count[w] += delta[w];
        }
    }
}

/// The thread task, accumulates the dependencies of every source in `sources`.
fn betweenness_task(sources: Range<usize>, indices: &[Vec<usize>]) -> Vec<f64> {
    trace!(?sources, "betweenness chunk");

    // each worker thread keeps its own cache of data
    // these are returned when the thread finishes
    // and then summed by the caller
    let mut betweenness_count: Vec<f64> = vec![0.0; indices.len()];

    for index in sources {
        betweenness_for_node(index, indices, &mut betweenness_count);
    }

    betweenness_count
}

/// This function is called by the graph method
/// betweenness_centrality. It does all
/// the heavy lifting with processing the data via
/// multiple threads
/// It is responsible for:
/// - splitting the sources into one contiguous chunk per thread
/// - spawning the threads
/// - adding the results together in chunk order, and returning them
/// No normalisation is applied.
#[instrument(skip(indices))]
pub fn compute_betweenness(indices: &[Vec<usize>], num_threads: usize) -> Vec<f64> {
    let num_threads = num_threads.clamp(MIN_NUM_THREADS, MAX_NUM_THREADS);
    let num_nodes = indices.len();

    if num_threads == 1 || num_nodes < 2 {
        return betweenness_task(0..num_nodes, indices);
    }

    let chunk_size = num_nodes.div_ceil(num_threads);

    let partials: Vec<Vec<f64>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..num_nodes)
            .step_by(chunk_size)
            .map(|start| {
                let end = (start + chunk_size).min(num_nodes);
                scope.spawn(move || betweenness_task(start..end, indices))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| panic::resume_unwind(payload))
            })
            .collect()
    });

    let mut betweenness_count: Vec<f64> = vec![0.0; num_nodes];
    for partial in partials {
        for (total, value) in betweenness_count.iter_mut().zip(partial) {
            *total += value;
        }
    }

    betweenness_count
}
