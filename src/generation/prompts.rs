pub const LECTURE_PREFIX: &str = "Teach me the following concept: ";

pub fn lecture_prompt(topic: &str) -> String {
    format!("{}{}", LECTURE_PREFIX, topic)
}

pub fn translation_prompt(text: &str, from: &str, to: &str) -> String {
    format!("Translate the following text from {} to {}:\n\n{}", from, to, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_both_prompts() {
        assert_eq!(lecture_prompt("entropy"), "Teach me the following concept: entropy");
        assert_eq!(
            translation_prompt("Hello", "English", "French"),
            "Translate the following text from English to French:\n\nHello"
        );
    }
}
