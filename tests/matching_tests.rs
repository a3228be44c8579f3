//! Integration tests for streaming wildcard matching correctness
//!
//! Results are checked against a brute-force sliding window and, for patterns
//! without wildcards, against prefix-function search.

mod common;

use common::{brute_force, prefix_function_search};
use proptest::prelude::*;
use std::io::Cursor;
use wildstream::input::Symbols;
use wildstream::{Alphabet, Automaton, AutomatonOptions, MatchMode, WildcardError};

fn find(pattern: &str, text: &str) -> Vec<usize> {
    Automaton::new(pattern)
        .unwrap()
        .find_all(text.as_bytes())
        .unwrap()
}

fn oracle(pattern: &str, text: &str) -> Vec<usize> {
    brute_force(pattern.as_bytes(), b'?', text.as_bytes())
}

#[test]
fn test_scenario_a_wildcard_b() {
    let automaton = Automaton::new("a?b").unwrap();
    let fragments: Vec<(&[u8], usize)> = automaton
        .pattern()
        .fragments()
        .iter()
        .map(|f| (f.text(), f.offset()))
        .collect();
    assert_eq!(fragments, vec![(&b"a"[..], 0), (&b"b"[..], 2)]);

    for text in ["xaybabz", "aab", "aabab", "ab", "axbxbab"] {
        assert_eq!(find("a?b", text), oracle("a?b", text), "text {:?}", text);
    }
}

#[test]
fn test_scenario_ab_wildcard_ba() {
    let automaton = Automaton::new("ab?ba").unwrap();
    let offsets: Vec<usize> = automaton
        .pattern()
        .fragments()
        .iter()
        .map(|f| f.offset())
        .collect();
    assert_eq!(offsets, vec![0, 3]);

    for text in ["ababba", "abxba", "abababababa", "ababbaabzbaab"] {
        assert_eq!(find("ab?ba", text), oracle("ab?ba", text), "text {:?}", text);
    }
}

#[test]
fn test_many_overlapping_fragments() {
    let pattern = "aa?a?aaa??a";
    let text = "aaaaaaaaaaaaaaaaaaaaaaaabaaaaaaaaaaaaaaaaaaaa";
    assert_eq!(find(pattern, text), oracle(pattern, text));
}

#[test]
fn test_task_format_sample() {
    // Pattern and text in the shape the command-line runner reads them
    let pattern = "ab??aba";
    let text = "ababacaba";
    assert_eq!(find(pattern, text), vec![2]);
    assert_eq!(oracle(pattern, text), vec![2]);
}

#[test]
fn test_stream_with_whitespace_skipped() {
    let automaton = Automaton::new("ab?c").unwrap();
    let symbols = Symbols::new(Cursor::new(b"xab\nzc ab yc\n".to_vec()), true);
    let found: Vec<usize> = automaton
        .matcher()
        .into_matches(symbols)
        .collect::<Result<_, _>>()
        .unwrap();
    // Positions count only non-whitespace symbols: "xabzcabyc"
    assert_eq!(found, vec![1, 5]);
}

#[test]
fn test_invalid_text_symbol_is_fatal_to_run_only() {
    let automaton = Automaton::new("ab").unwrap();
    let err = automaton.find_all(b"abAb").unwrap_err();
    assert_eq!(
        err,
        WildcardError::InvalidSymbol {
            symbol: b'A',
            position: 2
        }
    );
    // The automaton stays usable for the next run
    assert_eq!(automaton.find_all(b"abab").unwrap(), vec![0, 2]);
}

#[test]
fn test_case_insensitive_mode() {
    let options = AutomatonOptions::new().mode(MatchMode::CaseInsensitive);
    let automaton = Automaton::build(b"Ab?D", options).unwrap();
    assert_eq!(automaton.find_all(b"xABcdaBzd").unwrap(), vec![1, 5]);
}

#[test]
fn test_case_insensitive_uppercase_alphabet() {
    let options = AutomatonOptions::new()
        .alphabet("A-Z".parse::<Alphabet>().unwrap())
        .mode(MatchMode::CaseInsensitive);
    let automaton = Automaton::build(b"AB", options).unwrap();
    assert_eq!(automaton.find_all(b"xabZAbAB").unwrap(), vec![1, 4, 6]);
}

#[test]
fn test_custom_alphabet_and_wildcard() {
    let options = AutomatonOptions::new()
        .alphabet("0-9".parse::<Alphabet>().unwrap())
        .wildcard(b'*');
    let automaton = Automaton::build(b"1*3", options).unwrap();
    assert_eq!(automaton.find_all(b"1231331").unwrap(), vec![0, 3]);
    assert!(automaton.find_all(b"12a").is_err());
}

#[test]
fn test_shared_automaton_across_threads() {
    let automaton = Automaton::new("ab?a??b").unwrap();
    let texts: Vec<String> = (0..8)
        .map(|i| {
            (0..2000)
                .map(|j| if (i * 7 + j * 3 + j / 5) % 4 == 0 { 'b' } else { 'a' })
                .collect()
        })
        .collect();

    let results: Vec<Vec<usize>> = std::thread::scope(|scope| {
        let handles: Vec<_> = texts
            .iter()
            .map(|text| {
                let automaton = &automaton;
                scope.spawn(move || automaton.find_all(text.as_bytes()).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (text, found) in texts.iter().zip(results) {
        assert_eq!(found, oracle("ab?a??b", text));
    }
}

#[test]
fn test_long_stream_keeps_buffer_size() {
    let automaton = Automaton::new("ba?ab").unwrap();
    let mut matcher = automaton.matcher();
    let slots = matcher.buffer_len();
    assert_eq!(slots, 10);

    let text: Vec<u8> = (0..1_000_000usize)
        .map(|i| if i % 3 == 0 { b'a' } else { b'b' })
        .collect();
    let mut found = Vec::new();
    matcher.push_slice(&text, &mut found).unwrap();

    assert_eq!(matcher.buffer_len(), slots);
    assert_eq!(found, brute_force(b"ba?ab", b'?', &text));
}

fn pattern_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('a'), Just('b'), Just('?')], 1..10)
        .prop_map(|chars| chars.into_iter().collect())
}

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('a'), Just('b'), Just('c')], 0..200)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_matches_brute_force(pattern in pattern_strategy(), text in text_strategy()) {
        prop_assert_eq!(find(&pattern, &text), oracle(&pattern, &text));
    }

    #[test]
    fn prop_reported_offsets_are_sound(pattern in pattern_strategy(), text in text_strategy()) {
        let automaton = Automaton::new(&pattern).unwrap();
        let found = automaton.find_all(text.as_bytes()).unwrap();
        for window in found.windows(2) {
            prop_assert!(window[0] < window[1]);
        }
        for &s in &found {
            for fragment in automaton.pattern().fragments() {
                let at = s + fragment.offset();
                prop_assert_eq!(&text.as_bytes()[at..at + fragment.len()], fragment.text());
            }
            prop_assert!(automaton
                .pattern()
                .matches_window(&text.as_bytes()[s..s + pattern.len()], automaton.options()));
        }
    }

    #[test]
    fn prop_no_wildcard_equals_prefix_function(
        pattern in "[ab]{1,6}",
        text in "[abc]{0,200}",
    ) {
        prop_assert_eq!(
            find(&pattern, &text),
            prefix_function_search(pattern.as_bytes(), text.as_bytes())
        );
    }

    #[test]
    fn prop_all_wildcards_match_every_window(len in 1usize..12, text in "[a-z]{0,60}") {
        let pattern = "?".repeat(len);
        let expected: Vec<usize> = if text.len() >= len {
            (0..=text.len() - len).collect()
        } else {
            Vec::new()
        };
        prop_assert_eq!(find(&pattern, &text), expected);
    }

    #[test]
    fn prop_streaming_equals_batch(pattern in pattern_strategy(), text in text_strategy()) {
        let automaton = Automaton::new(&pattern).unwrap();
        let batch = automaton.find_all(text.as_bytes()).unwrap();

        let mut matcher = automaton.matcher();
        let mut streamed = Vec::new();
        for &symbol in text.as_bytes() {
            if let Some(s) = matcher.push(symbol).unwrap() {
                // Confirmed exactly when the window closes
                prop_assert_eq!(s + pattern.len(), matcher.position());
                streamed.push(s);
            }
        }
        prop_assert_eq!(streamed, batch);
    }
}
