/// Default retention ratios, matching [`cw_core::TextLimits`].
const SENTENCE_MIN_RATIO: f64 = 0.2;
const WORD_MIN_RATIO: f64 = 0.8;

/// Shorten `text` to at most `max_len` characters (plus an ellipsis budget),
/// preferring sentence boundaries, then word boundaries, never mid-word
/// unless no boundary retains enough content.
pub fn truncate_gracefully(text: &str, max_len: usize) -> String {
    truncate_with_ratios(text, max_len, SENTENCE_MIN_RATIO, WORD_MIN_RATIO)
}

/// Boundary selection: a sentence close (`.`/`!`/`?` followed by whitespace)
/// wins if it keeps more than `sentence_min_ratio` of the budget and gets no
/// ellipsis, since a true sentence end is not a truncation artifact. A word
/// boundary must keep more than `word_min_ratio`; sacrificing over 20% of the
/// budget to land on a space is worse than a hard cut.
pub fn truncate_with_ratios(
    text: &str,
    max_len: usize,
    sentence_min_ratio: f64,
    word_min_ratio: f64,
) -> String {
    let chars: Vec<char> = text.chars().collect();
    if text.is_empty() || chars.len() <= max_len {
        return text.to_string();
    }
    let prefix = &chars[..max_len];

    let mut last_sentence_end = None;
    for i in 0..prefix.len().saturating_sub(1) {
        if matches!(prefix[i], '.' | '!' | '?') && prefix[i + 1].is_whitespace() {
            last_sentence_end = Some(i);
        }
    }
    if let Some(i) = last_sentence_end {
        if i as f64 > max_len as f64 * sentence_min_ratio {
            let kept: String = chars[..=i].iter().collect();
            return kept.trim().to_string();
        }
    }

    if let Some(i) = prefix.iter().rposition(|c| *c == ' ') {
        if i as f64 > max_len as f64 * word_min_ratio {
            let kept: String = prefix[..i].iter().collect();
            return format!("{}...", kept.trim());
        }
    }

    let kept: String = prefix.iter().collect();
    format!("{}...", kept.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_gracefully("short", 100), "short");
        assert_eq!(truncate_gracefully("", 10), "");
        let exact = "x".repeat(50);
        assert_eq!(truncate_gracefully(&exact, 50), exact);
    }

    #[test]
    fn test_sentence_boundary_no_ellipsis() {
        let text = format!("First sentence ends here. {}", "Word ".repeat(200));
        let out = truncate_gracefully(&text, 100);
        assert_eq!(out, "First sentence ends here.");
    }

    #[test]
    fn test_sentence_boundary_too_early_falls_through() {
        // Sentence ends at 10% of the budget, so the word boundary is used.
        let text = format!("Short one. {}", "word ".repeat(100));
        let out = truncate_gracefully(&text, 100);
        assert!(out.ends_with("..."));
        assert_ne!(out, "Short one.");
    }

    #[test]
    fn test_word_boundary_with_ellipsis() {
        let text = "word ".repeat(100);
        let out = truncate_gracefully(&text, 52);
        assert!(out.ends_with("..."));
        // Never cuts mid-word when a late space exists.
        assert!(out.trim_end_matches("...").ends_with("word"));
    }

    #[test]
    fn test_hard_truncation_when_no_boundary() {
        let text = "a".repeat(500);
        let out = truncate_gracefully(&text, 100);
        assert_eq!(out.chars().count(), 103);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_length_bound_holds() {
        let samples = [
            "a".repeat(500),
            "word ".repeat(200),
            format!("Sentence one is fine. {}", "filler ".repeat(100)),
            "ünïcödé çhärs ".repeat(50),
        ];
        for text in &samples {
            for max_len in [10, 50, 100, 300] {
                let out = truncate_gracefully(text, max_len);
                assert!(
                    out.chars().count() <= max_len + 3,
                    "bound violated for max_len={max_len}: {} chars",
                    out.chars().count()
                );
            }
        }
    }

    #[test]
    fn test_multibyte_safe() {
        let text = "émeute à Paris après une manifestation qui a dégénéré en violences urbaines hier soir".repeat(3);
        let out = truncate_gracefully(&text, 40);
        assert!(out.chars().count() <= 43);
    }
}
