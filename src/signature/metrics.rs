//! Token-level edit metrics.

use super::alignment::lcs_len;
use super::token::Token;

/// Levenshtein distance over token sequences.
///
/// Insertion, deletion and substitution each cost one; a wildcard on either
/// side substitutes for free. Uses two rows sized to the shorter sequence.
pub fn distance(a: &[Token], b: &[Token]) -> usize {
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if inner.is_empty() {
        return outer.len();
    }

    let mut prev: Vec<usize> = (0..=inner.len()).collect();
    let mut curr = vec![0usize; inner.len() + 1];

    for (i, x) in outer.iter().enumerate() {
        curr[0] = i + 1;
        for (j, y) in inner.iter().enumerate() {
            let cost = usize::from(!x.matches(y));
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[inner.len()]
}

/// Insertions plus deletions needed to turn one sequence into the other,
/// with no substitution credit: `|a| + |b| - 2 * LCS(a, b)`.
pub fn differences_between(a: &[Token], b: &[Token]) -> usize {
    a.len() + b.len() - 2 * lcs_len(a, b)
}
