//! "Did you mean?" ranking for operator names.
//!
//! Scores candidates by Levenshtein distance over their qualified names.
//! Only results within the cutoff matter, so the distance computation bails
//! out as soon as it can prove the cutoff is exceeded.

use opal_ir::Symbol;

/// Default cutoff for [`rank_similar`].
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// Levenshtein distance between `a` and `b`, bounded by `cutoff`.
///
/// Exact when the distance is at most `cutoff`; otherwise returns some value
/// greater than `cutoff`.
pub fn edit_distance_bounded(a: &str, b: &str, cutoff: usize) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.len().abs_diff(b.len()) > cutoff {
        return cutoff + 1;
    }
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b.len() + 1];

    for (i, &a_char) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        let mut row_min = curr_row[0];

        for (j, &b_char) in b.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1) // deletion
                .min(curr_row[j] + 1) // insertion
                .min(prev_row[j] + cost); // substitution
            row_min = row_min.min(curr_row[j + 1]);
        }

        // Row minima never decrease, so the final distance is at least this
        if row_min > cutoff {
            return cutoff + 1;
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// Rank `candidates` by distance to `target`, dropping any beyond `cutoff`.
///
/// Ties keep the order in which `candidates` yielded them.
pub fn rank_similar(
    target: Symbol,
    candidates: impl IntoIterator<Item = Symbol>,
    cutoff: usize,
) -> Vec<Symbol> {
    let target = target.qual_str();
    let mut ranked: Vec<(usize, Symbol)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance = edit_distance_bounded(target, candidate.qual_str(), cutoff);
            (distance <= cutoff).then_some((distance, candidate))
        })
        .collect();
    ranked.sort_by_key(|&(distance, _)| distance);
    ranked.into_iter().map(|(_, symbol)| symbol).collect()
}

#[cfg(test)]
mod tests;
