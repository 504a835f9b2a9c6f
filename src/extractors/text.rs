// src/extractors/text.rs

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use scraper::ElementRef;

// --- Mojibake Repair ---
// Windows-1252 bytes 0x80..=0x9F. Undefined slots fall back to the C1 control,
// which is what a Latin-1 decoder produces for the same byte.
const CP1252_HIGH: [char; 32] = [
    '€', '\u{81}', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', '\u{8D}', 'Ž', '\u{8F}',
    '\u{90}', '‘', '’', '“', '”', '•', '–', '—', '˜', '™', 'š', '›', 'œ', '\u{9D}', 'ž', 'Ÿ',
];

// A UTF-8 lead byte followed by the right number of continuation bytes, all
// seen through a single-byte decoder.
static MOJIBAKE_RE: Lazy<Regex> = Lazy::new(|| {
    let cont = "[\\x{80}-\\x{BF}€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ]";
    let pattern = format!(
        "[\\x{{C2}}-\\x{{DF}}]{c}|[\\x{{E0}}-\\x{{EF}}]{c}{{2}}|[\\x{{F0}}-\\x{{F4}}]{c}{{3}}",
        c = cont
    );
    Regex::new(&pattern).expect("Failed to compile MOJIBAKE_RE")
});

// --- Whitespace Patterns ---
static SPACE_LIKE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{A0}\t\r\x0C]").expect("Failed to compile SPACE_LIKE_RE"));
static MULTI_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" {2,}").expect("Failed to compile MULTI_SPACE_RE"));
static NEWLINE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?: *\n)+").expect("Failed to compile NEWLINE_RUN_RE"));

/// Canonicalizes scraped text: repairs mojibake, turns space-like characters
/// into plain spaces, squeezes space and blank-line runs, trims.
/// Never fails; `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize<T: ToString + ?Sized>(raw: &T) -> String {
    let text = repair_mojibake(&raw.to_string());
    let text = SPACE_LIKE_RE.replace_all(&text, " ");
    let text = MULTI_SPACE_RE.replace_all(&text, " ");
    let text = NEWLINE_RUN_RE.replace_all(&text, "\n");
    text.trim().to_string()
}

/// Re-decodes UTF-8 sequences that were read as Windows-1252/Latin-1.
/// Repeats until nothing changes, so double-encoded text is unwound too.
fn repair_mojibake(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let mut changed = false;
        let repaired = MOJIBAKE_RE
            .replace_all(&current, |caps: &Captures| {
                let matched = &caps[0];
                match redecode(matched).filter(|fixed| is_plausible_repair(matched, fixed)) {
                    Some(fixed) => {
                        changed = true;
                        fixed
                    }
                    None => matched.to_string(),
                }
            })
            .into_owned();

        // Every repair shortens the string, so this terminates.
        if !changed {
            return current;
        }
        current = repaired;
    }
}

fn redecode(sequence: &str) -> Option<String> {
    let bytes = sequence.chars().map(cp1252_byte).collect::<Option<Vec<u8>>>()?;
    String::from_utf8(bytes).ok()
}

/// Accepts only the shapes real mojibake takes: `Â`/`Ã` + one byte for
/// Latin-1, `â` + two bytes for general punctuation, `ð` + three for emoji.
/// Correct text such as `ß“` or `é »` does not fit and is left alone.
fn is_plausible_repair(sequence: &str, fixed: &str) -> bool {
    let lead = sequence.chars().next();
    let decoded = fixed.chars().next().map(u32::from);
    matches!(
        (lead, decoded),
        (Some('Â' | 'Ã'), Some(0x80..=0xFF))
            | (Some('â'), Some(0x2000..=0x2BFF))
            | (Some('ð'), Some(0x1F000..=0x1FAFF))
    )
}

fn cp1252_byte(c: char) -> Option<u8> {
    match u32::from(c) {
        code @ 0x00..=0xFF => Some(code as u8),
        _ => CP1252_HIGH.iter().position(|&h| h == c).map(|i| 0x80 + i as u8),
    }
}

// --- DOM Text Helpers ---

/// Text nodes that are direct children of `element`, concatenated.
pub fn own_text(element: ElementRef) -> String {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|t| &t[..])
        .collect()
}

/// All descendant text of `element`, inline markup included.
pub fn full_text(element: ElementRef) -> String {
    element.text().collect()
}
