//! Grammatical normalization of short noun phrases.
//!
//! Rightsholder names appear in the dative ("Обществу …", "Акционерному
//! обществу …"); the result wants them in the dictionary form with the
//! adjectives agreeing with their head noun.

pub mod suffix;

pub use suffix::SuffixAnalyzer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    Noun,
    Adjective,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammaticalNumber {
    Singular,
    Plural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

/// Analysis of one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordForm {
    pub pos: PartOfSpeech,
    /// Dictionary form, lower-case.
    pub normal_form: String,
    pub number: Option<GrammaticalNumber>,
    pub gender: Option<Gender>,
}

/// Morphological analysis service.
pub trait MorphAnalyzer: Send + Sync {
    /// Analyze a single word (letters only, any case).
    fn parse(&self, word: &str) -> WordForm;

    /// Nominative form of an adjective given its dictionary form, agreeing
    /// with `number` and `gender`. `None` when the lemma cannot be inflected.
    fn inflect(
        &self,
        lemma: &str,
        number: GrammaticalNumber,
        gender: Option<Gender>,
    ) -> Option<String>;
}

/// Bring an unquoted phrase to its dictionary form with adjective agreement.
///
/// Quoted spans (odd segments between `"`) pass through unchanged. A run
/// with more than one noun, or whose noun has no known number, is kept
/// verbatim; otherwise adjectives agree with the run's noun and every other
/// word becomes its dictionary form.
pub fn normalize_phrase(text: &str, analyzer: &dyn MorphAnalyzer) -> String {
    let normalized: Vec<String> = text
        .split('"')
        .enumerate()
        .map(|(i, run)| {
            if i % 2 == 1 {
                run.to_string()
            } else {
                normalize_run(run, analyzer)
            }
        })
        .collect();

    normalized.join("\"").trim().to_string()
}

fn normalize_run(run: &str, analyzer: &dyn MorphAnalyzer) -> String {
    let tokens: Vec<Token> = run.split_whitespace().map(|t| Token::new(t, analyzer)).collect();

    let mut nouns = tokens
        .iter()
        .filter_map(|t| t.form.as_ref())
        .filter(|f| f.pos == PartOfSpeech::Noun);
    let target = match (nouns.next(), nouns.next()) {
        (_, Some(_)) => return run.to_string(),
        (Some(noun), None) => match noun.number {
            Some(number) => Some((number, noun.gender)),
            None => return run.to_string(),
        },
        (None, None) => None,
    };

    let words: Vec<String> = tokens
        .iter()
        .map(|token| {
            let Some(form) = &token.form else {
                return token.raw.to_string();
            };
            let word = match (form.pos, target) {
                (PartOfSpeech::Adjective, Some((number, gender))) => analyzer
                    .inflect(&form.normal_form, number, gender)
                    .unwrap_or_else(|| form.normal_form.clone()),
                _ => form.normal_form.clone(),
            };
            format!("{}{}{}", token.prefix, word, token.suffix)
        })
        .collect();

    let leading = &run[..run.len() - run.trim_start().len()];
    let trailing = &run[run.trim_end().len()..];
    format!("{leading}{}{trailing}", words.join(" "))
}

/// A whitespace-separated token split into punctuation and the word it
/// wraps. Tokens without letters carry no analysis.
struct Token<'a> {
    raw: &'a str,
    prefix: &'a str,
    suffix: &'a str,
    form: Option<WordForm>,
}

impl<'a> Token<'a> {
    fn new(raw: &'a str, analyzer: &dyn MorphAnalyzer) -> Self {
        let core_start = raw.find(char::is_alphabetic);
        let core_end = raw
            .char_indices()
            .filter(|(_, c)| c.is_alphabetic())
            .last()
            .map(|(i, c)| i + c.len_utf8());

        match (core_start, core_end) {
            (Some(start), Some(end)) => Token {
                raw,
                prefix: &raw[..start],
                suffix: &raw[end..],
                form: Some(analyzer.parse(&raw[start..end])),
            },
            _ => Token {
                raw,
                prefix: "",
                suffix: "",
                form: None,
            },
        }
    }
}
