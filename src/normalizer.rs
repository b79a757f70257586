//! Best-effort cleanup of hand-authored level text into strict JSON.
//!
//! Level files are frequently edited by hand, so they pick up authoring
//! habits strict JSON rejects: unquoted keys, trailing commas, comments,
//! a stray BOM, sloppy number literals. `normalize` repairs those and
//! nothing else. It never fails; whatever it cannot repair is passed
//! through unchanged for the parser to report with a position.
//!
//! Repairs, in order:
//!   1. drop a leading UTF-8 BOM
//!   2. strip `//` line and `/* */` block comments
//!   3. quote bare object keys, rewrite bare `NaN` / `Infinity` /
//!      `-Infinity` to `null`, patch `.5` / `1.` number literals
//!   4. remove trailing commas before `}` / `]`
//!
//! Every pass leaves string contents untouched, and every repair emits
//! already-valid JSON tokens, which is what makes `normalize` idempotent.

pub fn normalize(raw: &str) -> String {
    let text = strip_bom(raw);
    let text = strip_comments(text);
    let text = repair_words_and_numbers(&text);
    remove_trailing_commas(&text)
}

fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{FEFF}').unwrap_or(s)
}

/// Shared helper for the scanning passes: copies one string literal,
/// honoring backslash escapes, starting at the opening quote.
fn copy_string(src: &[char], mut i: usize, out: &mut String) -> usize {
    out.push('"');
    i += 1;
    while i < src.len() {
        let c = src[i];
        out.push(c);
        i += 1;
        if c == '\\' {
            if i < src.len() {
                out.push(src[i]);
                i += 1;
            }
        } else if c == '"' {
            break;
        }
    }
    i
}

fn strip_comments(text: &str) -> String {
    let src: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < src.len() {
        match src[i] {
            '"' => i = copy_string(&src, i, &mut out),
            '/' if src.get(i + 1) == Some(&'/') => {
                while i < src.len() && src[i] != '\n' {
                    i += 1;
                }
            }
            '/' if src.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < src.len() && !(src[i] == '*' && src.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i = (i + 2).min(src.len());
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// One pass over all bare words and number literals outside strings.
///
/// A word followed by `:` is an unquoted key and gets quoted, whatever it
/// is. Elsewhere `true` / `false` / `null` stay, the non-finite number
/// words collapse to `null` (the parser flags them tile-by-tile where
/// they matter), and anything unrecognised is left for the parser to
/// reject. Number literals missing a digit around the decimal point get
/// it filled in.
fn repair_words_and_numbers(text: &str) -> String {
    let src: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < src.len() {
        let c = src[i];
        if c == '"' {
            i = copy_string(&src, i, &mut out);
            continue;
        }
        if is_word_start(c) {
            let start = i;
            while i < src.len() && is_word(src[i]) {
                i += 1;
            }
            let word: String = src[start..i].iter().collect();

            let mut j = i;
            while j < src.len() && src[j].is_whitespace() {
                j += 1;
            }
            if src.get(j) == Some(&':') {
                // unquoted key
                out.push('"');
                out.push_str(&word);
                out.push('"');
            } else {
                match word.as_str() {
                    "true" | "false" | "null" => out.push_str(&word),
                    "NaN" | "Infinity" => {
                        // a sign in front of Infinity goes too
                        if out.ends_with('-') || out.ends_with('+') {
                            out.pop();
                        }
                        out.push_str("null");
                    }
                    _ => out.push_str(&word),
                }
            }
            continue;
        }
        if c == '.' {
            let prev = if i == 0 { None } else { Some(src[i - 1]) };
            let next = src.get(i + 1).copied();
            let prev_digit = prev.is_some_and(|p| p.is_ascii_digit());
            let next_digit = next.is_some_and(|n| n.is_ascii_digit());
            // only touch dots that sit at a number-token boundary, so a
            // second pass finds nothing left to do
            let opens_number =
                prev.map_or(true, |p| p.is_whitespace() || "[{,:+-".contains(p));
            let closes_number = next.map_or(true, |n| n.is_whitespace() || "]},".contains(n));
            if !prev_digit && next_digit && opens_number {
                out.push_str("0."); // ".5" style literal
            } else if prev_digit && !next_digit && closes_number {
                out.push_str(".0"); // "1." style literal
            } else {
                out.push('.');
            }
            i += 1;
            continue;
        }
        out.push(c);
        i += 1;
    }
    out
}

fn remove_trailing_commas(text: &str) -> String {
    let src: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < src.len() {
        match src[i] {
            '"' => i = copy_string(&src, i, &mut out),
            ',' => {
                // skip sibling commas too, so a whole trailing run like
                // ",," before a bracket goes in one pass
                let mut j = i + 1;
                while j < src.len() && (src[j].is_whitespace() || src[j] == ',') {
                    j += 1;
                }
                if matches!(src.get(j), Some('}') | Some(']')) {
                    i += 1; // drop the comma
                } else {
                    out.push(',');
                    i += 1;
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}
