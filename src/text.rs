//! Text helpers: fuzzy ingredient matching and the review profanity filter

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Largest edit distance at which a known word still counts as a match
pub const DEFAULT_MATCH_DISTANCE: usize = 3;

/// Edit distance between two strings, counted in chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // single rolling row of the DP table
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Nearest known word within `max_distance` edits. Ties go to the earliest
/// candidate.
pub fn closest_match<'a, S: AsRef<str>>(
    input: &str,
    known: &'a [S],
    max_distance: usize,
) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;
    for candidate in known {
        let candidate = candidate.as_ref();
        let distance = levenshtein(input, candidate);
        if distance > max_distance {
            continue;
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(word, _)| word)
}

const PROFANITY: &[&str] = &[
    // English
    r"fuck(?:ed|ing|er)?",
    r"shit(?:ty|ed)?",
    r"bitch",
    r"asshole",
    r"dick",
    r"cunt(?:s|ing)?",
    r"motherfucker(?:ed|ing|s)?",
    r"bastards?",
    r"damn(?:ed)?",
    r"crap",
    r"piss(?:ed|ing)?",
    r"slut(?:ty)?",
    r"douche(?:bag)?",
    r"fagg?ot",
    r"whore",
    r"bollocks",
    r"arsehole",
    r"twat",
    r"bugger",
    r"shag(?:ging)?",
    r"wanker",
    // Russian
    r"бляд(?:ь|ный|и)?",
    r"сука",
    r"хуй[а-я]*",
    r"пизда",
    r"еб(?:ать|ается|ался|ут|ют|ешь|ала)?",
    r"ёб(?:ать|ается|ался|ут|ют|ешь|ала)?",
    r"нахуй",
    r"мудило",
    r"говно",
    r"дерьмо",
    r"пиздец",
    r"залупа",
    r"пидор(?:а|ы|ов)?",
    r"хер[а-я]*",
    r"трах(?:аться|аюсь|ался|ались)?",
    r"сучка",
];

static PROFANITY_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let pattern = format!(r"(?i)\b(?:{})\b", PROFANITY.join("|"));
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!("Profanity filter disabled: {e}");
            None
        }
    }
});

/// Mask every profane word with `*`, one per char
pub fn censor(text: &str) -> String {
    censor_and_check(text).0
}

/// Censored text and whether anything was masked
pub fn censor_and_check(text: &str) -> (String, bool) {
    let Some(re) = PROFANITY_RE.as_ref() else {
        return (text.to_string(), false);
    };
    if !re.is_match(text) {
        return (text.to_string(), false);
    }
    let censored = re.replace_all(text, |caps: &Captures<'_>| "*".repeat(caps[0].chars().count()));
    (censored.into_owned(), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("tomato", "tomatoes"), 2);
        assert_eq!(levenshtein("сыр", "сыры"), 1);
    }

    #[test]
    fn test_closest_match() {
        let known = ["tomato", "potato", "onion", "garlic"];

        assert_eq!(closest_match("tomatos", &known, DEFAULT_MATCH_DISTANCE), Some("tomato"));
        assert_eq!(closest_match("onoin", &known, DEFAULT_MATCH_DISTANCE), Some("onion"));
        assert_eq!(closest_match("chocolate", &known, DEFAULT_MATCH_DISTANCE), None);
    }

    #[test]
    fn test_closest_match_prefers_first_on_tie() {
        let known = vec!["bat".to_string(), "cat".to_string()];
        assert_eq!(closest_match("hat", &known, 1), Some("bat"));
    }

    #[test]
    fn test_censor_whole_words_only() {
        assert_eq!(censor("This is crap"), "This is ****");
        assert_eq!(censor("Damned good SHIT"), "****** good ****");
        assert_eq!(censor("a scrappy dickens novel"), "a scrappy dickens novel");
    }

    #[test]
    fn test_censor_cyrillic() {
        assert_eq!(censor("Какое говно"), "Какое *****");
        assert_eq!(censor("СУКА!"), "****!");
    }

    #[test]
    fn test_censor_and_check() {
        assert_eq!(censor_and_check("lovely soup"), ("lovely soup".to_string(), false));
        assert_eq!(censor_and_check("bloody bugger"), ("bloody ******".to_string(), true));
    }
}
