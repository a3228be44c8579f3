use anyhow::{Context, Result};
use serde_json::json;
use wildstream::{Automaton, MatchMode};

use crate::cli_utils::{fragment_text, PatternArgs};

pub fn cmd_inspect(pattern: String, pattern_args: PatternArgs, json_output: bool) -> Result<()> {
    let options = pattern_args.options()?;
    let automaton = Automaton::build(pattern.as_bytes(), options)
        .with_context(|| format!("Invalid pattern: {}", pattern))?;
    let stats = automaton.stats();
    let fragments = automaton.pattern().fragments();

    if json_output {
        let output = json!({
            "pattern": pattern,
            "options": automaton.options(),
            "stats": stats,
            "fragments": fragments
                .iter()
                .map(|f| json!({ "text": fragment_text(f.text()), "offset": f.offset() }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mode = match automaton.mode() {
        MatchMode::CaseSensitive => "case-sensitive",
        MatchMode::CaseInsensitive => "case-insensitive",
    };

    println!("Pattern:      {}", pattern);
    println!("Length:       {}", stats.pattern_len);
    println!(
        "Fragments:    {} ({} distinct)",
        stats.fragment_count, stats.distinct_fragments
    );
    for fragment in fragments {
        println!(
            "  {:<12} @ {}",
            format!("\"{}\"", fragment_text(fragment.text())),
            fragment.offset()
        );
    }
    println!("Wildcards:    {}", stats.wildcard_count);
    if automaton.pattern().is_all_wildcards() {
        println!("              (every window of the pattern length matches)");
    }
    println!(
        "Trie nodes:   {} ({} terminal)",
        stats.node_count, stats.terminal_nodes
    );
    println!(
        "Alphabet:     {} ({} symbols), {}",
        automaton.alphabet(),
        stats.alphabet_len,
        mode
    );
    println!("Buffer slots: {}", automaton.matcher().buffer_len());

    Ok(())
}
