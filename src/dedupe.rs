use std::collections::HashSet;

/// Similarity above which two sentences count as near-duplicates.
const SIMILARITY_THRESHOLD: f64 = 0.70;
/// Fragments at or below this length are discarded as noise.
const MIN_FRAGMENT_LEN: usize = 10;
/// Tokens at or below this length are ignored when comparing sentences.
const MIN_TOKEN_LEN: usize = 2;

/// Normalizes free text and splits it into sentence fragments: lower-cased,
/// characters outside word/whitespace/`. , ! ?` replaced with spaces,
/// whitespace collapsed, split on sentence terminators, short fragments
/// dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || matches!(c, '.' | ',' | '!' | '?') {
                c
            } else {
                ' '
            }
        })
        .collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    collapsed
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|fragment| fragment.len() > MIN_FRAGMENT_LEN)
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity over token sets, ignoring tokens of 2 characters or
/// fewer.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<&str> = a
        .split_whitespace()
        .filter(|t| t.len() > MIN_TOKEN_LEN)
        .collect();
    let tokens_b: HashSet<&str> = b
        .split_whitespace()
        .filter(|t| t.len() > MIN_TOKEN_LEN)
        .collect();

    let union = tokens_a.union(&tokens_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = tokens_a.intersection(&tokens_b).count();
    intersection as f64 / union as f64
}

/// Order-preserving near-duplicate removal. A sentence is dropped when it is
/// identical to, or more than 70% token-similar to, any previously kept
/// sentence, so the first occurrence always survives. Quadratic in sentence
/// count, which stays small (reports per student per week).
pub fn dedupe(sentences: &[String]) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    for sentence in sentences {
        let duplicate = kept
            .iter()
            .any(|k| k == sentence || jaccard(k, sentence) > SIMILARITY_THRESHOLD);
        if !duplicate {
            kept.push(sentence.clone());
        }
    }
    kept
}

/// Joins sentences into readable prose: first letter capitalized, terminal
/// punctuation ensured.
pub fn to_prose(sentences: &[String]) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        let trimmed = sentence.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut chars = trimmed.chars();
        let mut prose = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => continue,
        };
        if !prose.ends_with(['.', '!', '?']) {
            prose.push('.');
        }
        parts.push(prose);
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn split_normalizes_and_drops_fragments() {
        let out = split_sentences("Fixed the printer! OK. Configured the DHCP-server; twice.");
        assert_eq!(
            out,
            vec![
                "fixed the printer".to_string(),
                "configured the dhcp server twice".to_string(),
            ]
        );
    }

    #[test]
    fn jaccard_ignores_short_tokens() {
        // "we" and "a" fall below the token length cutoff.
        let sim = jaccard("we built a database schema", "built the database schema");
        assert!(sim > 0.5, "similarity was {sim}");
    }

    #[test]
    fn jaccard_of_disjoint_sentences_is_zero() {
        assert_eq!(jaccard("installed network cables", "reviewed budget figures"), 0.0);
    }

    #[test]
    fn near_duplicates_collapse_to_first_occurrence() {
        let input = sentences(&[
            "learned how to configure the firewall today",
            "learned how to configure the firewall again today",
            "attended the weekly planning meeting",
        ]);
        let out = dedupe(&input);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], "learned how to configure the firewall today");
        assert_eq!(out[1], "attended the weekly planning meeting");
    }

    #[test]
    fn distinct_sentences_all_survive() {
        let input = sentences(&[
            "debugged the inventory module",
            "presented the sprint demo to the client",
        ]);
        assert_eq!(dedupe(&input), input);
    }

    #[test]
    fn dedupe_is_idempotent() {
        let input = sentences(&[
            "learned how to configure the firewall today",
            "learned how to configure the firewall again today",
            "attended the weekly planning meeting",
        ]);
        let once = dedupe(&input);
        let twice = dedupe(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn dedupe_never_grows_the_input() {
        let input = sentences(&[
            "wrote unit tests for the payroll service",
            "wrote unit tests for the payroll service",
        ]);
        assert!(dedupe(&input).len() <= input.len());
    }

    #[test]
    fn prose_capitalizes_and_terminates() {
        let input = sentences(&["learned sql basics", "shadowed the network admin"]);
        assert_eq!(
            to_prose(&input),
            "Learned sql basics. Shadowed the network admin."
        );
    }

    #[test]
    fn prose_leaves_existing_punctuation_alone() {
        let input = sentences(&["Learned testing."]);
        assert_eq!(to_prose(&input), "Learned testing.");
    }
}
