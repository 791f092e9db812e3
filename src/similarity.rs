// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Bigram (Dice coefficient) string similarity.

use std::collections::HashMap;

/// Scores two strings in `[0, 1]` by shared character bigrams.
///
/// Whitespace is ignored. Identical strings score 1; a string too short to
/// contain a bigram scores 0 against anything else. Shared bigrams are counted
/// as a multiset, so `"aaaa"` vs `"aa"` shares one `aa`, not three.
pub fn compare_two_strings(first: &str, second: &str) -> f64 {
    let a: Vec<char> = first.chars().filter(|c| !c.is_whitespace()).collect();
    let b: Vec<char> = second.chars().filter(|c| !c.is_whitespace()).collect();

    if a == b {
        return 1.0;
    }
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut counts: HashMap<(char, char), usize> = HashMap::new();
    for w in a.windows(2) {
        *counts.entry((w[0], w[1])).or_insert(0) += 1;
    }

    let mut shared = 0usize;
    for w in b.windows(2) {
        if let Some(n) = counts.get_mut(&(w[0], w[1])) {
            if *n > 0 {
                *n -= 1;
                shared += 1;
            }
        }
    }

    (2 * shared) as f64 / ((a.len() - 1) + (b.len() - 1)) as f64
}
