/// Punctuation the built-in PDF fonts cannot encode, with its ASCII stand-in.
pub const SUBSTITUTIONS: [(char, char); 8] = [
    ('\u{2013}', '-'),  // en dash
    ('\u{2014}', '-'),  // em dash
    ('\u{2018}', '\''), // left single quote
    ('\u{2019}', '\''), // right single quote
    ('\u{201C}', '"'),  // left double quote
    ('\u{201D}', '"'),  // right double quote
    ('\u{2022}', '*'),  // bullet
    ('\u{00A0}', ' '),  // no-break space
];

/// Replace typographic punctuation with plain ASCII before it reaches the
/// document writer. Anything not in the table passes through untouched.
pub fn sanitize(text: &str) -> String {
    text.chars().map(substitute).collect()
}

fn substitute(ch: char) -> char {
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == ch)
        .map(|(_, to)| *to)
        .unwrap_or(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_table_entry_to_its_ascii_replacement() {
        for (from, to) in SUBSTITUTIONS {
            assert_eq!(sanitize(&from.to_string()), to.to_string(), "U+{:04X}", from as u32);
        }
    }

    #[test]
    fn rewrites_a_typical_model_answer() {
        let input = "\u{201C}Cells\u{201D} \u{2014} the cell\u{2019}s parts:\n\u{2022}\u{00A0}nucleus";
        assert_eq!(sanitize(input), "\"Cells\" - the cell's parts:\n* nucleus");
    }

    #[test]
    fn is_idempotent() {
        let input = "It\u{2019}s 1990\u{2013}2000 \u{2022} caf\u{e9} \u{4e2d}\u{6587}";
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn leaves_characters_outside_the_table_alone() {
        assert_eq!(sanitize("na\u{ef}ve \u{4e2d}\u{6587} \u{2026}"), "na\u{ef}ve \u{4e2d}\u{6587} \u{2026}");
    }
}
