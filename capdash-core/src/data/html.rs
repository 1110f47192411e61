//! Low-level HTML string helpers for the ranking page.
//!
//! Deliberately naive, tailored to the fixed structure of the ranking table.
//! Tag and attribute matching is ASCII case-insensitive; there is no general
//! HTML parsing here, only the slicing the extractor needs.

/// Case-insensitive substring search from `from`, returning a byte index.
fn find_ci(s: &str, pat: &str, from: usize) -> Option<usize> {
    let lc = s.get(from..)?.to_ascii_lowercase();
    let pat_lc = pat.to_ascii_lowercase();
    lc.find(&pat_lc).map(|i| i + from)
}

/// The HTML between an opening tag prefix (e.g. `<tbody`) and its closing tag.
///
/// Returns the content strictly inside the tags. Does not handle nesting of
/// the same tag; the ranking page has a single `<tbody>`.
pub fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let open_idx = find_ci(s, open_pat, 0)?;
    let after_open = s[open_idx..].find('>')? + open_idx + 1;
    let close_idx = find_ci(s, close_pat, after_open)?;
    Some(&s[after_open..close_idx])
}

/// The next complete `<open ...> ... </close>` block at or after `from`.
///
/// Returns (start, end) byte offsets of the whole block including both tags.
pub fn next_tag_block_ci(
    s: &str,
    open_tag: &str,
    close_tag: &str,
    from: usize,
) -> Option<(usize, usize)> {
    let start = find_ci(s, open_tag, from)?;
    let open_end = s[start..].find('>')? + start + 1;
    let close_start = find_ci(s, close_tag, open_end)?;
    Some((start, close_start + close_tag.len()))
}

/// Text of the first element whose `class` attribute carries `class_name`
/// as a whole whitespace-separated token.
///
/// Scans opening tags in order, checks the `class` attribute only (other
/// attributes like `title` cannot match), and takes everything up to the
/// first matching closing tag. Nested markup is stripped and entities
/// decoded. Returns `None` when no such element exists or the element is
/// malformed.
pub fn class_cell_text(html: &str, class_name: &str) -> Option<String> {
    let mut search_from = 0;
    while let Some(tag_start) = html[search_from..].find('<').map(|i| i + search_from) {
        let tag_end = html[tag_start..].find('>')? + tag_start;
        let tag = &html[tag_start + 1..tag_end];
        search_from = tag_end + 1;

        // Tag name: letters/digits right after '<'. Empty for closing tags
        // and comments.
        let name: String = tag.chars().take_while(|c| c.is_ascii_alphanumeric()).collect();
        if name.is_empty() || !tag_has_class(tag, class_name) {
            continue;
        }

        let close_pat = format!("</{name}");
        let close_start = find_ci(html, &close_pat, tag_end + 1)?;
        let inner = &html[tag_end + 1..close_start];
        return Some(decode_entities(&strip_tags(inner)).trim().to_string());
    }
    None
}

/// Whether `tag` (the text between `<` and `>`) has a `class` attribute whose
/// value contains `class_name` as a whole whitespace-separated token.
fn tag_has_class(tag: &str, class_name: &str) -> bool {
    let mut from = 0;
    while let Some(idx) = find_ci(tag, "class", from) {
        from = idx + "class".len();

        // A real attribute name has whitespace before it and '=' after;
        // anything else ("data-class", a hit inside a value) is skipped.
        let ws_before = tag[..idx]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_whitespace());
        let rest = tag[from..].trim_start();
        if !ws_before || !rest.starts_with('=') {
            continue;
        }

        let value = rest[1..].trim_start();
        let value = match value.chars().next() {
            Some(quote @ ('"' | '\'')) => match value[1..].find(quote) {
                Some(end) => &value[1..1 + end],
                None => continue,
            },
            _ => value.split_ascii_whitespace().next().unwrap_or(""),
        };
        return value
            .split_ascii_whitespace()
            .any(|token| token.eq_ignore_ascii_case(class_name));
    }
    false
}

/// Drop everything between `<` and `>`, keeping text content.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Decode the handful of entities that appear in company names.
pub fn decode_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}
