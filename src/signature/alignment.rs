//! Longest-common-subsequence alignment between token sequences.
//!
//! Refinement needs the actual pairing of positions. [`align`] recovers it
//! Hirschberg-style: it never materializes the suffix table, and instead
//! splits the rows in half, rebuilds the suffix row at the split from the row
//! below, and recurses on each half. Only one suffix row per recursion level
//! is alive, so memory is `O(min(|a|, |b|) · log max(|a|, |b|))`. Callers that
//! only need the length use [`lcs_len`], which keeps two rolling rows over the
//! shorter sequence.

use super::token::Token;

/// An order-preserving pairing of positions between two token sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// Paired `(left, right)` positions, increasing on both sides
    pairs: Vec<(usize, usize)>,
    left_len: usize,
    right_len: usize,
}

impl Alignment {
    /// Paired `(left, right)` positions in increasing order
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Number of paired positions (the LCS length)
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no positions were paired
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// For every left position, the right position it is paired with.
    pub fn left_partners(&self) -> Vec<Option<usize>> {
        let mut partners = vec![None; self.left_len];
        for &(left, right) in &self.pairs {
            partners[left] = Some(right);
        }
        partners
    }

    /// Left positions with no partner
    pub fn deletions(&self) -> Vec<usize> {
        let mut paired = vec![false; self.left_len];
        for &(left, _) in &self.pairs {
            paired[left] = true;
        }
        unpaired(&paired)
    }

    /// Right positions with no partner
    pub fn insertions(&self) -> Vec<usize> {
        let mut paired = vec![false; self.right_len];
        for &(_, right) in &self.pairs {
            paired[right] = true;
        }
        unpaired(&paired)
    }
}

fn unpaired(paired: &[bool]) -> Vec<usize> {
    paired
        .iter()
        .enumerate()
        .filter_map(|(index, &is_paired)| (!is_paired).then_some(index))
        .collect()
}

/// Compute a maximal alignment of `left` against `right`.
///
/// Ties are broken toward the earliest possible pairing: walking forward,
/// compatible tokens are paired as soon as they meet, and otherwise the left
/// side advances unless that would lose LCS length.
pub fn align(left: &[Token], right: &[Token]) -> Alignment {
    // Rows run over the longer sequence so each suffix row spans the shorter one.
    let transposed = right.len() > left.len();
    let (outer, inner) = if transposed {
        (right, left)
    } else {
        (left, right)
    };

    let mut walk = Walk {
        outer,
        inner,
        skip_outer_on_tie: !transposed,
        pairs: Vec::new(),
    };
    let last_row = vec![0usize; inner.len() + 1];
    walk.band(0, outer.len(), 0, &last_row);

    let mut pairs = walk.pairs;
    if transposed {
        for pair in &mut pairs {
            *pair = (pair.1, pair.0);
        }
    }

    Alignment {
        pairs,
        left_len: left.len(),
        right_len: right.len(),
    }
}

/// The forward walk over an implicit suffix LCS table.
///
/// `suffix[i][j]` is the LCS length of `outer[i..]` and `inner[j..]`. Rows
/// are only ever built for columns at or after the walk's current column,
/// since the walk never moves left.
struct Walk<'a> {
    outer: &'a [Token],
    inner: &'a [Token],
    /// Advance along `outer` when both skips keep the LCS length
    skip_outer_on_tie: bool,
    pairs: Vec<(usize, usize)>,
}

impl Walk<'_> {
    /// Walk rows `top..bottom`, entering row `top` at column `start`.
    ///
    /// `below` is `suffix[bottom][start..]`. Returns the column at which the
    /// walk enters row `bottom`.
    fn band(&mut self, top: usize, bottom: usize, start: usize, below: &[usize]) -> usize {
        if top == bottom || start == self.inner.len() {
            return start;
        }
        if bottom - top == 1 {
            return self.single_row(top, start, below);
        }

        let mid = top + (bottom - top) / 2;
        let mut row = below.to_vec();
        for r in (mid..bottom).rev() {
            row = self.row_above(r, start, &row);
        }

        let entry = self.band(top, mid, start, &row);
        drop(row);
        self.band(mid, bottom, entry, &below[entry - start..])
    }

    fn single_row(&mut self, row: usize, start: usize, below: &[usize]) -> usize {
        let (outer, inner) = (self.outer, self.inner);
        let current = self.row_above(row, start, below);
        let token = &outer[row];

        for (k, other) in inner[start..].iter().enumerate() {
            let column = start + k;
            if token.matches(other) {
                self.pairs.push((row, column));
                return column + 1;
            }
            let (down, right) = (below[k], current[k + 1]);
            if down > right || (down == right && self.skip_outer_on_tie) {
                return column;
            }
        }

        inner.len()
    }

    /// `suffix[row][start..]` from `suffix[row + 1][start..]`.
    fn row_above(&self, row: usize, start: usize, below: &[usize]) -> Vec<usize> {
        let token = &self.outer[row];
        let mut current = vec![0usize; below.len()];
        for k in (0..below.len() - 1).rev() {
            current[k] = if token.matches(&self.inner[start + k]) {
                below[k + 1] + 1
            } else {
                below[k].max(current[k + 1])
            };
        }
        current
    }
}

/// LCS length of two token sequences in `O(min(|a|, |b|))` space.
pub fn lcs_len(a: &[Token], b: &[Token]) -> usize {
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev = vec![0usize; inner.len() + 1];
    let mut curr = vec![0usize; inner.len() + 1];

    for x in outer {
        for (j, y) in inner.iter().enumerate() {
            curr[j + 1] = if x.matches(y) {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[inner.len()]
}
