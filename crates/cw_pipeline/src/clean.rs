use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Block removal runs before generic tag stripping so embedded code and
    // CSS text never leak into the output.
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script\b.*?</script>").unwrap();
    static ref STYLE_BLOCK: Regex = Regex::new(r"(?is)<style\b.*?</style>").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip markup from an HTML fragment and decode entities into plain text.
///
/// Tags are replaced with a space, not removed, so `<p>A</p><p>B</p>` becomes
/// `"A B"` rather than `"AB"`. Entity decoding covers named, decimal, and hex
/// forms; non-breaking spaces decode to regular spaces and are collapsed with
/// the rest of the whitespace. An unterminated trailing `<tag` with no closing
/// `>` is left as-is (best effort, accepted edge case).
pub fn clean_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let cleaned = SCRIPT_BLOCK.replace_all(html, " ");
    let cleaned = STYLE_BLOCK.replace_all(&cleaned, " ");
    let cleaned = TAG.replace_all(&cleaned, " ");
    let decoded = html_escape::decode_html_entities(cleaned.as_ref());
    let collapsed = WHITESPACE.replace_all(decoded.as_ref(), " ");
    collapsed.trim().to_string()
}
