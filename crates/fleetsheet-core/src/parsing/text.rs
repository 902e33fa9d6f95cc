/// Dash glyphs accepted as separators: hyphen, en dash, em dash.
pub const DASHES: [char; 3] = ['-', '–', '—'];

/// Space-padded separators between the lead line and the service title.
const PADDED_DASHES: [&str; 3] = [" - ", " – ", " — "];

pub fn has_parens(s: &str) -> bool {
    s.contains('(') && s.contains(')')
}

pub fn has_dash(s: &str) -> bool {
    s.chars().any(|c| DASHES.contains(&c))
}

/// Text strictly between the last `(` and the last `)`, provided the `)`
/// comes after the `(`. Empty otherwise.
pub fn last_paren_span(s: &str) -> &str {
    match (s.rfind('('), s.rfind(')')) {
        (Some(open), Some(close)) if close > open => &s[open + 1..close],
        _ => "",
    }
}

/// Trimmed text after the last dash glyph of any kind.
///
/// With no dash present the whole trimmed string is returned; callers
/// rely on that instead of an empty result.
pub fn after_last_dash(s: &str) -> &str {
    let cut = DASHES
        .iter()
        .filter_map(|dash| s.rfind(*dash).map(|idx| idx + dash.len_utf8()))
        .max();
    match cut {
        Some(cut) => s[cut..].trim(),
        None => s.trim(),
    }
}

/// Drop the final character (not byte) of `s`.
pub fn drop_last_char(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next_back();
    chars.as_str()
}

/// Derive the service code from a service description.
///
/// "LINE - TITLE (ALIAS - CODE)" takes the parenthesised part; when it
/// contains a dash the text after the dash is used minus its last
/// character. Without parentheses the text after the last dash is used.
pub fn service_name(desc: &str) -> String {
    if has_parens(desc) {
        let inner = last_paren_span(desc);
        if has_dash(inner) {
            drop_last_char(after_last_dash(inner)).to_string()
        } else {
            inner.to_string()
        }
    } else {
        after_last_dash(desc).to_string()
    }
}

/// The shipping line named before the padded dash of a service
/// description, cut at a " / " co-line separator.
///
/// Each dash variant is tried in turn and the last one found decides the
/// cut, so an em dash wins over a hyphen when both are present.
pub fn leading_sl_before_dash(desc: &str) -> String {
    let mut prefix = desc;
    for dash in PADDED_DASHES {
        if let Some(idx) = desc.find(dash) {
            prefix = &desc[..idx];
        }
    }
    match prefix.split_once(" / ") {
        Some((first, _)) => first.trim().to_string(),
        None => prefix.to_string(),
    }
}

/// Text strictly between the first `start` phrase and the first `end`
/// phrase, trimmed. Empty if either phrase is missing or they overlap.
pub fn between_phrases<'a>(s: &'a str, start: &str, end: &str) -> &'a str {
    let (Some(start_idx), Some(end_idx)) = (s.find(start), s.find(end)) else {
        return "";
    };
    let from = start_idx + start.len();
    if from > end_idx {
        return "";
    }
    s[from..end_idx].trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_parens_and_dash() {
        assert!(has_parens("A (B)"));
        assert!(!has_parens("A (B"));
        assert!(has_dash("a-b"));
        assert!(has_dash("a–b"));
        assert!(has_dash("a—b"));
        assert!(!has_dash("a b"));
    }

    #[test]
    fn test_last_paren_span() {
        assert_eq!(last_paren_span("X (one) Y (two)"), "two");
        assert_eq!(last_paren_span("no parens"), "");
        assert_eq!(last_paren_span("closed) then (open"), "");
    }

    #[test]
    fn test_after_last_dash_mixed_glyphs() {
        assert_eq!(after_last_dash("A - B – C"), "C");
        assert_eq!(after_last_dash("A — B - C"), "C");
        assert_eq!(after_last_dash("A – B — C "), "C");
    }

    #[test]
    fn test_after_last_dash_without_dash_returns_whole() {
        assert_eq!(after_last_dash("  ASIA EXPRESS "), "ASIA EXPRESS");
    }

    #[test]
    fn test_service_name_paren_with_dash_drops_last_char() {
        assert_eq!(service_name("ABC LINE - ASIA EXPRESS (XYZ - FOO)"), "FO");
    }

    #[test]
    fn test_service_name_paren_without_dash() {
        assert_eq!(service_name("ABC LINE - ASIA EXPRESS (AEX)"), "AEX");
    }

    #[test]
    fn test_service_name_without_parens() {
        assert_eq!(service_name("ABC LINE - ASIA EXPRESS"), "ASIA EXPRESS");
        assert_eq!(service_name("ABC LINE – JPX"), "JPX");
    }

    #[test]
    fn test_leading_sl() {
        assert_eq!(leading_sl_before_dash("ABC LINE - ASIA EXPRESS"), "ABC LINE");
        assert_eq!(
            leading_sl_before_dash("ABC LINE / DEF LINES - ASIA EXPRESS"),
            "ABC LINE"
        );
    }

    #[test]
    fn test_leading_sl_last_variant_found_wins() {
        // The em dash is tried last, so it decides the cut.
        assert_eq!(leading_sl_before_dash("A - B — C"), "A - B");
    }

    #[test]
    fn test_leading_sl_without_dash() {
        assert_eq!(leading_sl_before_dash("ABC LINE"), "ABC LINE");
    }

    #[test]
    fn test_between_phrases() {
        let text = "Intro. Manila called at north harbour. Comments - Service Chronology ...";
        assert_eq!(
            between_phrases(text, "Manila called at", "Comments - Service Chronology"),
            "north harbour."
        );
        assert_eq!(between_phrases(text, "Cebu called at", "Comments"), "");
        assert_eq!(between_phrases(text, "Manila called at", "Missing"), "");
        assert_eq!(between_phrases("END then START", "START", "END"), "");
    }

    #[test]
    fn test_drop_last_char_multibyte() {
        assert_eq!(drop_last_char("TEU–"), "TEU");
        assert_eq!(drop_last_char(""), "");
    }
}
