use crate::taxonomy::OutcomeCategory;

/// Triggers that fired for one category against one text blob. A trigger
/// counts at most once no matter how often it appears in the text.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub category_index: usize,
    pub hit_count: usize,
    pub matched_triggers: Vec<&'static str>,
}

/// Matches a category's trigger set against lower-cased text.
///
/// Per trigger, the first rule that fires wins:
/// 1. exact substring;
/// 2. multi-word trigger: any single word of it substring-matches. This is
///    deliberately permissive ("best practice" is satisfied by "practice"
///    alone) and is kept as-is;
/// 3. naive stem (longest trailing suffix of ing/ed/es/s stripped once)
///    substring-matches, if the stem is longer than 3 characters;
/// 4. inflection variants (trigger + s/ing/ed, trailing s stripped)
///    substring-match.
pub fn match_category(text: &str, index: usize, category: &OutcomeCategory) -> MatchResult {
    let mut matched: Vec<&'static str> = Vec::new();

    if !text.is_empty() {
        for &trigger in category.triggers {
            if trigger_fires(text, trigger) && !matched.contains(&trigger) {
                matched.push(trigger);
            }
        }
    }

    MatchResult {
        category_index: index,
        hit_count: matched.len(),
        matched_triggers: matched,
    }
}

fn trigger_fires(text: &str, trigger: &str) -> bool {
    if text.contains(trigger) {
        return true;
    }

    if trigger.contains(' ') {
        return trigger.split_whitespace().any(|word| text.contains(word));
    }

    if let Some(stem) = strip_suffix(trigger) {
        if stem.len() > 3 && text.contains(stem) {
            return true;
        }
    }

    variants(trigger).iter().any(|v| text.contains(v.as_str()))
}

/// Strips the longest applicable trailing suffix, once, not iteratively.
fn strip_suffix(word: &str) -> Option<&str> {
    for suffix in ["ing", "ed", "es", "s"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            return Some(stem);
        }
    }
    None
}

fn variants(trigger: &str) -> Vec<String> {
    let mut out = vec![
        format!("{trigger}s"),
        format!("{trigger}ing"),
        format!("{trigger}ed"),
    ];
    if let Some(stripped) = trigger.strip_suffix('s') {
        out.push(stripped.to_string());
    }
    out
}
