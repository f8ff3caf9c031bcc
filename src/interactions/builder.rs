//! Interaction matrix construction.
//!
//! Raw listening events are turned into a tracks x users sparse matrix in a
//! single grouped aggregation:
//!
//! 1. track ids and user ids are encoded independently with [`Categories`]
//!    (codes follow identifier sort order);
//! 2. events are split into contiguous shards, each shard sums its play
//!    counts per (track code, user code) pair in parallel;
//! 3. shard totals are merged by summation and materialized as a CSR matrix.
//!
//! Totals are accumulated as integers and only converted to `f64` when the
//! matrix is materialized, so the output does not depend on the shard count.

use super::{Categories, InteractionMatrix, ListeningEvent};
use rayon::prelude::*;
use sprs::TriMat;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};

type CellTotals = HashMap<(usize, usize), u64>;

/// Builds the interaction matrix using one shard per rayon worker thread.
pub fn build_interaction_matrix(events: &[ListeningEvent]) -> InteractionMatrix {
    build_interaction_matrix_with_shards(events, rayon::current_num_threads())
}

pub fn build_interaction_matrix_with_shards(
    events: &[ListeningEvent],
    shards: usize,
) -> InteractionMatrix {
    if events.is_empty() {
        info!("No listening events, building an empty interaction matrix");
        return InteractionMatrix::empty();
    }
    let start = Instant::now();

    let tracks = Categories::from_values(events.iter().map(|e| e.track_id.as_str()));
    let users = Categories::from_values(events.iter().map(|e| e.user_id.as_str()));
    info!(
        "Encoded {} distinct tracks and {} distinct users",
        tracks.len(),
        users.len()
    );

    let shard_len = events.len().div_ceil(shards.max(1));
    let totals = events
        .par_chunks(shard_len)
        .map(|shard| aggregate_shard(shard, &tracks, &users))
        .reduce(CellTotals::new, merge_totals);

    // Zero totals stay implicit.
    let mut cells: Vec<((usize, usize), u64)> =
        totals.into_iter().filter(|(_, playcount)| *playcount > 0).collect();
    cells.sort_unstable_by_key(|(cell, _)| *cell);

    let mut triplets = TriMat::with_capacity((tracks.len(), users.len()), cells.len());
    for ((track, user), playcount) in cells {
        triplets.add_triplet(track, user, playcount as f64);
    }
    let matrix = triplets.to_csr();

    info!(
        "Built {}x{} interaction matrix with {} cells from {} events in {}ms",
        matrix.rows(),
        matrix.cols(),
        matrix.nnz(),
        events.len(),
        start.elapsed().as_millis()
    );
    InteractionMatrix::from_parts(matrix, tracks.into_values())
}

fn aggregate_shard(
    shard: &[ListeningEvent],
    tracks: &Categories,
    users: &Categories,
) -> CellTotals {
    let mut totals = CellTotals::with_capacity(shard.len());
    for event in shard {
        if let (Some(track), Some(user)) = (tracks.code(&event.track_id), users.code(&event.user_id))
        {
            *totals.entry((track, user)).or_insert(0) += event.playcount;
        }
    }
    debug!(
        "Aggregated shard of {} events into {} cells",
        shard.len(),
        totals.len()
    );
    totals
}

fn merge_totals(a: CellTotals, b: CellTotals) -> CellTotals {
    let (mut into, from) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    for (cell, playcount) in from {
        *into.entry(cell).or_insert(0) += playcount;
    }
    into
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(user: &str, track: &str, playcount: u64) -> ListeningEvent {
        ListeningEvent::new(user, track, playcount)
    }

    #[test]
    fn sums_playcounts_per_track_and_user() {
        let events = vec![
            event("u1", "t1", 5),
            event("u1", "t1", 3),
            event("u2", "t1", 2),
            event("u1", "t2", 1),
        ];
        let interactions = build_interaction_matrix(&events);

        assert_eq!(interactions.track_ids(), &["t1".to_string(), "t2".to_string()]);
        assert_eq!(interactions.rows(), 2);
        assert_eq!(interactions.users(), 2);

        let t1 = interactions.row_of("t1").unwrap();
        let t2 = interactions.row_of("t2").unwrap();
        // users are coded u1 -> 0, u2 -> 1
        assert_eq!(interactions.playcount(t1, 0), 8.0);
        assert_eq!(interactions.playcount(t1, 1), 2.0);
        assert_eq!(interactions.playcount(t2, 0), 1.0);
        assert_eq!(interactions.playcount(t2, 1), 0.0);
        assert_eq!(interactions.nnz(), 3);
    }

    #[test]
    fn conserves_total_playcount() {
        let events: Vec<ListeningEvent> = (0..500u64)
            .map(|i| {
                event(
                    &format!("u{}", i % 37),
                    &format!("t{}", (i * 7) % 53),
                    i % 11,
                )
            })
            .collect();
        let expected: u64 = events.iter().map(|e| e.playcount).sum();

        let interactions = build_interaction_matrix(&events);
        assert_eq!(interactions.total_playcount(), expected as f64);
    }

    #[test]
    fn shape_matches_distinct_identifiers() {
        let events = vec![
            event("b", "x", 1),
            event("a", "y", 1),
            event("c", "x", 1),
            event("a", "z", 1),
        ];
        let interactions = build_interaction_matrix(&events);
        assert_eq!(interactions.rows(), 3);
        assert_eq!(interactions.users(), 3);
        assert_eq!(
            interactions.track_ids(),
            &["x".to_string(), "y".to_string(), "z".to_string()]
        );
    }

    #[test]
    fn shard_count_does_not_change_the_result() {
        let events: Vec<ListeningEvent> = (0..300u64)
            .map(|i| event(&format!("u{}", i % 13), &format!("t{}", i % 17), i % 5 + 1))
            .collect();

        let reference = build_interaction_matrix_with_shards(&events, 1);
        for shards in [2, 3, 8, 64, 1000] {
            let sharded = build_interaction_matrix_with_shards(&events, shards);
            assert_eq!(sharded.track_ids(), reference.track_ids());
            assert_eq!(sharded.matrix(), reference.matrix());
        }
    }

    #[test]
    fn rebuild_from_shuffled_events_is_identical() {
        let events = vec![
            event("u2", "t3", 4),
            event("u1", "t1", 2),
            event("u3", "t2", 9),
            event("u1", "t3", 1),
        ];
        let mut reversed = events.clone();
        reversed.reverse();

        let a = build_interaction_matrix(&events);
        let b = build_interaction_matrix(&reversed);
        assert_eq!(a.track_ids(), b.track_ids());
        assert_eq!(a.matrix(), b.matrix());
    }

    #[test]
    fn empty_events_build_empty_matrix() {
        let interactions = build_interaction_matrix(&[]);
        assert!(interactions.is_empty());
        assert!(interactions.track_ids().is_empty());
        assert_eq!(interactions.nnz(), 0);
    }

    #[test]
    fn zero_shards_is_treated_as_one() {
        let events = vec![event("u1", "t1", 2)];
        let interactions = build_interaction_matrix_with_shards(&events, 0);
        assert_eq!(interactions.playcount(0, 0), 2.0);
    }

    #[test]
    fn zero_playcounts_keep_track_without_storing_cell() {
        let events = vec![event("u1", "t1", 0), event("u2", "t2", 3)];
        let interactions = build_interaction_matrix(&events);
        assert_eq!(interactions.rows(), 2);
        assert_eq!(interactions.users(), 2);
        assert_eq!(interactions.nnz(), 1);
        assert_eq!(interactions.row_of("t1"), Some(0));
    }
}
