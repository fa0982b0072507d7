use unicode_segmentation::UnicodeSegmentation;

/// Tokenize text into word tokens using Unicode default word-boundary
/// segmentation. Segments containing anything but letters and digits
/// (whitespace, punctuation, symbols) are dropped and do not occupy a
/// position slot; the index of a token in this sequence is the position
/// recorded by the indexer.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_word_bounds()
        .filter(|seg| !seg.is_empty() && seg.chars().all(char::is_alphanumeric))
}

/// Collected form of `tokenize` for callers that need owned words.
pub fn words(text: &str) -> Vec<String> {
    tokenize(text).map(str::to_owned).collect()
}

/// Number of word tokens in the text.
pub fn count_words(text: &str) -> usize {
    tokenize(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_words() {
        assert_eq!(count_words("This data contains eight words in its entirety"), 8);
    }

    #[test]
    fn strips_punctuation() {
        let toks: Vec<&str> = tokenize("simple, for the time being.").collect();
        assert_eq!(toks, vec!["simple", "for", "the", "time", "being"]);
    }

    #[test]
    fn discards_symbol_only_segments() {
        let toks: Vec<&str> = tokenize("a -- b ... c!").collect();
        assert_eq!(toks, vec!["a", "b", "c"]);
    }

    #[test]
    fn keeps_digits() {
        let toks: Vec<&str> = tokenize("route 66 revisited").collect();
        assert_eq!(toks, vec!["route", "66", "revisited"]);
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words(" \t\n .,;"), 0);
    }
}
