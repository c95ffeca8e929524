//! Ratcliff/Obershelp string similarity
//!
//! Scoring parity with the established grading scale depends on this exact
//! algorithm: find the longest matching block, recurse on the pieces to the
//! left and to the right, and report 2*M/T where M is the total matched
//! character count and T the combined length of both strings. An edit
//! distance is not a substitute; it weighs transpositions differently and
//! would move diagnoses across tier boundaries.

use std::collections::HashMap;

/// Similarity ratio in [0, 1] between two strings.
///
/// Two empty strings are considered identical (ratio 1.0).
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matches = matching_chars(&a, &b);
    2.0 * matches as f64 / total as f64
}

/// Total characters covered by the recursive longest-block alignment
fn matching_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (i, j, size) = find_longest_match(a, b);
    if size == 0 {
        return 0;
    }

    size + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + size..], &b[j + size..])
}

/// Longest contiguous matching block between `a` and `b`.
///
/// Returns (start in a, start in b, length). Ties resolve to the block
/// starting earliest in `a`, then earliest in `b`.
fn find_longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b2j.entry(ch).or_default().push(j);
    }

    let mut besti = 0;
    let mut bestj = 0;
    let mut bestsize = 0;

    // j2len[j] = length of the matching run ending at a[i], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for (i, ch) in a.iter().enumerate() {
        let mut newj2len: HashMap<usize, usize> = HashMap::new();
        if let Some(js) = b2j.get(ch) {
            for &j in js {
                let k = if j == 0 {
                    1
                } else {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                };
                newj2len.insert(j, k);
                if k > bestsize {
                    besti = i + 1 - k;
                    bestj = j + 1 - k;
                    bestsize = k;
                }
            }
        }
        j2len = newj2len;
    }

    (besti, bestj, bestsize)
}
