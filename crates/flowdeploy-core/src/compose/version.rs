use std::borrow::Cow;

const OPEN: &str = "<versionNumber>";
const CLOSE: &str = "</versionNumber>";

/// Increments the first `<versionNumber>N</versionNumber>` in `document`.
///
/// Only the digits change; every other byte is kept. A missing field, a
/// non-numeric value or an overflow leaves the document untouched.
pub fn bump_version_number(document: &str) -> Cow<'_, str> {
    let Some(open) = document.find(OPEN) else {
        return Cow::Borrowed(document);
    };
    let start = open + OPEN.len();
    let Some(len) = document[start..].find(CLOSE) else {
        return Cow::Borrowed(document);
    };

    let inner = &document[start..start + len];
    let digits = inner.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Cow::Borrowed(document);
    }
    let Some(next) = digits.parse::<u64>().ok().and_then(|n| n.checked_add(1)) else {
        return Cow::Borrowed(document);
    };

    let from = start + (inner.len() - inner.trim_start().len());
    let to = from + digits.len();

    let mut out = String::with_capacity(document.len() + 1);
    out.push_str(&document[..from]);
    out.push_str(&next.to_string());
    out.push_str(&document[to..]);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_by_one() {
        let doc = "<Flow><label>A</label><versionNumber>3</versionNumber><status>Active</status></Flow>";
        let bumped = bump_version_number(doc);
        assert_eq!(
            bumped,
            "<Flow><label>A</label><versionNumber>4</versionNumber><status>Active</status></Flow>"
        );
    }

    #[test]
    fn carries_into_new_digit() {
        assert_eq!(
            bump_version_number("<versionNumber>99</versionNumber>"),
            "<versionNumber>100</versionNumber>"
        );
    }

    #[test]
    fn keeps_surrounding_whitespace() {
        assert_eq!(
            bump_version_number("<versionNumber>\n  7\n</versionNumber>"),
            "<versionNumber>\n  8\n</versionNumber>"
        );
    }

    #[test]
    fn absent_field_is_passthrough() {
        let doc = "<Flow><label>A</label></Flow>";
        assert!(matches!(bump_version_number(doc), Cow::Borrowed(d) if d == doc));
    }

    #[test]
    fn malformed_values_are_passthrough() {
        for doc in [
            "<versionNumber>abc</versionNumber>",
            "<versionNumber></versionNumber>",
            "<versionNumber>-1</versionNumber>",
            "<versionNumber>+1</versionNumber>",
            "<versionNumber>18446744073709551615</versionNumber>",
            "<versionNumber>3",
        ] {
            assert_eq!(bump_version_number(doc), doc);
        }
    }

    #[test]
    fn only_first_occurrence_changes() {
        assert_eq!(
            bump_version_number("<versionNumber>1</versionNumber><versionNumber>1</versionNumber>"),
            "<versionNumber>2</versionNumber><versionNumber>1</versionNumber>"
        );
    }
}
