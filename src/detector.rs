//! Finds repeated motifs inside a chart's tile-angle sequence.
//!
//! The chart is first collapsed into a sequence of small symbol ids
//! (angles compare by exact value, markers by kind), then scanned one
//! candidate length at a time with a rolling hash: each pass groups
//! every window of that length by content in O(n) and keeps the groups
//! that occur at two or more non-overlapping starts. The length loop
//! stops at the first length with no qualifying repeat, so total work is
//! O(n * longest-repeat) rather than quadratic in the chart size.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Marker, TileAngle};

/// One repeated motif. `start`/`length` identify the first occurrence;
/// `occurrences` lists every start position in ascending order.
/// Serializable so a shell can hand results straight to its renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub start: usize,
    pub length: usize,
    pub occurrences: Vec<usize>,
}

/// Find every maximal repeated contiguous run of at least `min_length`
/// tiles. Results are ordered by descending length, then ascending start.
/// Never fails; charts with no qualifying repeats yield an empty vec.
pub fn find_repeats(tiles: &[TileAngle], min_length: usize) -> Vec<Match> {
    let n = tiles.len();
    let min_length = min_length.max(2);
    // two non-overlapping copies cannot fit otherwise
    if n < 2 || min_length > n / 2 {
        return Vec::new();
    }

    let symbols = symbolize(tiles);
    let hasher = WindowHasher::new(&symbols);

    let mut candidates: Vec<Match> = Vec::new();
    for length in min_length..=n / 2 {
        let mut buckets: HashMap<u64, Vec<usize>> = HashMap::new();
        for start in 0..=n - length {
            buckets
                .entry(hasher.window(start, length))
                .or_default()
                .push(start);
        }

        let mut found = false;
        for starts in buckets.values().filter(|s| s.len() > 1) {
            for group in split_by_content(&symbols, starts, length) {
                // starts are ascending, so the group qualifies exactly
                // when its first and last occurrence do not overlap
                if group.len() < 2 || group[group.len() - 1] - group[0] < length {
                    continue;
                }
                found = true;
                candidates.push(Match {
                    start: group[0],
                    length,
                    occurrences: group,
                });
            }
        }
        // a qualifying repeat of length L+1 always contains one of
        // length L, so the first empty pass ends the search
        if !found {
            break;
        }
    }

    select_maximal(candidates)
}

/// Map every tile onto a dense symbol id. Two tiles share an id iff they
/// are equal under the motif-equality rule: numeric angles bit-for-bit
/// (no tolerance), markers by kind.
fn symbolize(tiles: &[TileAngle]) -> Vec<u32> {
    #[derive(PartialEq, Eq, Hash)]
    enum Key {
        Angle(u64),
        Marker(Marker),
    }

    let mut ids: HashMap<Key, u32> = HashMap::new();
    tiles
        .iter()
        .map(|tile| {
            let key = match *tile {
                // fold -0.0 into 0.0 so the id relation matches f64 ==
                TileAngle::Numeric(deg) => {
                    let deg = if deg == 0.0 { 0.0 } else { deg };
                    Key::Angle(deg.to_bits())
                }
                TileAngle::Symbolic(marker) => Key::Marker(marker),
            };
            let next = ids.len() as u32;
            *ids.entry(key).or_insert(next)
        })
        .collect()
}

/// Polynomial rolling hash with precomputed prefixes: any window hash in
/// O(1). Collisions are possible and filtered out by `split_by_content`.
struct WindowHasher {
    prefix: Vec<u64>,
    pow: Vec<u64>,
}

const HASH_BASE: u64 = 0x100000001b3; // FNV-64 prime

impl WindowHasher {
    fn new(symbols: &[u32]) -> Self {
        let mut prefix = Vec::with_capacity(symbols.len() + 1);
        let mut pow = Vec::with_capacity(symbols.len() + 1);
        prefix.push(0u64);
        pow.push(1u64);
        for (i, &sym) in symbols.iter().enumerate() {
            prefix.push(
                prefix[i]
                    .wrapping_mul(HASH_BASE)
                    .wrapping_add(u64::from(sym) + 1),
            );
            pow.push(pow[i].wrapping_mul(HASH_BASE));
        }
        Self { prefix, pow }
    }

    fn window(&self, start: usize, length: usize) -> u64 {
        self.prefix[start + length].wrapping_sub(self.prefix[start].wrapping_mul(self.pow[length]))
    }
}

/// Split one hash bucket into groups of genuinely equal windows,
/// preserving the ascending start order.
fn split_by_content(symbols: &[u32], starts: &[usize], length: usize) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    'next: for &start in starts {
        for group in &mut groups {
            let rep = group[0];
            if symbols[rep..rep + length] == symbols[start..start + length] {
                group.push(start);
                continue 'next;
            }
        }
        groups.push(vec![start]);
    }
    groups
}

/// Keep only maximal matches: drop a candidate whose occurrence list is a
/// constant shift of a longer kept match's list (the shorter motif is
/// just a slice of the longer one everywhere it appears), and when two
/// maximal matches share a start, prefer the longer.
fn select_maximal(mut candidates: Vec<Match>) -> Vec<Match> {
    candidates.sort_by(|a, b| b.length.cmp(&a.length).then(a.start.cmp(&b.start)));

    let mut kept: Vec<Match> = Vec::new();
    'next: for candidate in candidates {
        for longer in &kept {
            if subsumes(longer, &candidate) || longer.start == candidate.start {
                continue 'next;
            }
        }
        kept.push(candidate);
    }
    kept
}

fn subsumes(longer: &Match, shorter: &Match) -> bool {
    if longer.length <= shorter.length || longer.occurrences.len() != shorter.occurrences.len() {
        return false;
    }
    let Some(shift) = shorter.occurrences[0].checked_sub(longer.occurrences[0]) else {
        return false;
    };
    if shift > longer.length - shorter.length {
        return false;
    }
    longer
        .occurrences
        .iter()
        .zip(&shorter.occurrences)
        .all(|(l, s)| l + shift == *s)
}
