//! Independent reference matchers used as test oracles

#![allow(dead_code)]

/// Check every window of the text against the pattern, symbol by symbol
pub fn brute_force(pattern: &[u8], wildcard: u8, text: &[u8]) -> Vec<usize> {
    if pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&s| {
            pattern
                .iter()
                .zip(&text[s..s + pattern.len()])
                .all(|(&p, &t)| p == wildcard || p == t)
        })
        .collect()
}

/// Prefix-function (KMP) search for a pattern without wildcards
pub fn prefix_function_search(pattern: &[u8], text: &[u8]) -> Vec<usize> {
    let mut prefix = vec![0usize; pattern.len()];
    for i in 1..pattern.len() {
        let mut k = prefix[i - 1];
        while k > 0 && pattern[i] != pattern[k] {
            k = prefix[k - 1];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        prefix[i] = k;
    }

    let mut found = Vec::new();
    let mut k = 0;
    for (i, &symbol) in text.iter().enumerate() {
        while k > 0 && (k == pattern.len() || symbol != pattern[k]) {
            k = prefix[k - 1];
        }
        if symbol == pattern[k] {
            k += 1;
        }
        if k == pattern.len() {
            found.push(i + 1 - pattern.len());
        }
    }
    found
}
