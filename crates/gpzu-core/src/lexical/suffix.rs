use std::collections::HashMap;
use std::sync::LazyLock;

use super::{Gender, GrammaticalNumber, MorphAnalyzer, PartOfSpeech, WordForm};

/// Prepositions and conjunctions found in organization names.
const FUNCTION_WORDS: &[&str] = &[
    "с", "в", "и", "на", "по", "от", "для", "о", "об", "к", "у", "за", "из",
];

/// Adjective case endings, longest first.
const ADJECTIVE_ENDINGS: &[&str] = &[
    "ыми", "ими", "ого", "его", "ому", "ему", "ый", "ий", "ой", "ая", "яя", "ое", "ее", "ые",
    "ие", "ую", "юю", "ых", "их", "ым", "им",
];

/// Endings that only soft-stem adjectives take.
const SOFT_ENDINGS: &[&str] = &["яя", "ее", "его", "ему", "юю"];

/// Nouns in -ние/-тие look like adjectives in -ие.
const VERBAL_NOUN_ENDINGS: &[&str] = &["ние", "тие"];

/// Shortest stem an adjective ending is split from.
const MIN_STEM_CHARS: usize = 3;

const VELARS: &[char] = &['к', 'г', 'х'];
const SIBILANTS: &[char] = &['ж', 'ш', 'ч', 'щ'];

/// Case endings of a declension: six singular, then six plural.
#[derive(Debug, Clone, Copy)]
struct Paradigm {
    singular: [&'static str; 6],
    plural: [&'static str; 6],
}

/// общество, товарищество, лицо
const NEUTER_HARD: Paradigm = Paradigm {
    singular: ["о", "а", "у", "о", "ом", "е"],
    plural: ["а", "", "ам", "а", "ами", "ах"],
};

/// предприятие, учреждение
const NEUTER_IE: Paradigm = Paradigm {
    singular: ["е", "я", "ю", "е", "ем", "и"],
    plural: ["я", "й", "ям", "я", "ями", "ях"],
};

/// департамент, отдел, фонд
const MASCULINE_HARD: Paradigm = Paradigm {
    singular: ["", "а", "у", "", "ом", "е"],
    plural: ["ы", "ов", "ам", "ы", "ами", "ах"],
};

/// предприниматель
const MASCULINE_SOFT: Paradigm = Paradigm {
    singular: ["ь", "я", "ю", "я", "ем", "е"],
    plural: ["и", "ей", "ям", "ей", "ями", "ях"],
};

/// организация, компания
const FEMININE_IA: Paradigm = Paradigm {
    singular: ["я", "и", "и", "ю", "ей", "и"],
    plural: ["и", "й", "ям", "и", "ями", "ях"],
};

/// ответственность
const FEMININE_SOFT_SIGN: Paradigm = Paradigm {
    singular: ["ь", "и", "и", "ь", "ью", "и"],
    plural: ["и", "ей", "ям", "и", "ями", "ях"],
};

/// гражданин
const CITIZEN: Paradigm = Paradigm {
    singular: ["ин", "ина", "ину", "ина", "ином", "ине"],
    plural: ["е", "", "ам", "", "ами", "ах"],
};

/// Stem, paradigm and gender of each lexicon noun. The lemma is the stem
/// plus the first singular ending.
const LEXICON: &[(&str, Paradigm, Gender)] = &[
    ("обществ", NEUTER_HARD, Gender::Neuter),
    ("товариществ", NEUTER_HARD, Gender::Neuter),
    ("партнерств", NEUTER_HARD, Gender::Neuter),
    ("имуществ", NEUTER_HARD, Gender::Neuter),
    ("лиц", NEUTER_HARD, Gender::Neuter),
    ("предприяти", NEUTER_IE, Gender::Neuter),
    ("учреждени", NEUTER_IE, Gender::Neuter),
    ("управлени", NEUTER_IE, Gender::Neuter),
    ("департамент", MASCULINE_HARD, Gender::Masculine),
    ("отдел", MASCULINE_HARD, Gender::Masculine),
    ("фонд", MASCULINE_HARD, Gender::Masculine),
    ("комитет", MASCULINE_HARD, Gender::Masculine),
    ("город", MASCULINE_HARD, Gender::Masculine),
    ("предпринимател", MASCULINE_SOFT, Gender::Masculine),
    ("организаци", FEMININE_IA, Gender::Feminine),
    ("корпораци", FEMININE_IA, Gender::Feminine),
    ("компани", FEMININE_IA, Gender::Feminine),
    ("ответственност", FEMININE_SOFT_SIGN, Gender::Feminine),
    ("граждан", CITIZEN, Gender::Masculine),
];

#[derive(Debug, Clone)]
struct NounEntry {
    lemma: String,
    number: GrammaticalNumber,
    gender: Gender,
}

/// Every inflected form of the lexicon nouns. A form shared by a singular
/// and a plural case reads as singular.
static NOUN_FORMS: LazyLock<HashMap<String, NounEntry>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    for &(stem, paradigm, gender) in LEXICON {
        let lemma = format!("{stem}{}", paradigm.singular[0]);
        let forms = paradigm
            .singular
            .iter()
            .map(|e| (e, GrammaticalNumber::Singular))
            .chain(paradigm.plural.iter().map(|e| (e, GrammaticalNumber::Plural)));
        for (ending, number) in forms {
            m.entry(format!("{stem}{ending}")).or_insert_with(|| NounEntry {
                lemma: lemma.clone(),
                number,
                gender,
            });
        }
    }

    m
});

/// Stem class of an adjective, deciding which vowel its endings take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StemClass {
    Hard,
    Velar,
    Sibilant,
    Soft,
}

fn stem_class(stem: &str, soft_ending: bool) -> StemClass {
    match stem.chars().last() {
        Some(c) if VELARS.contains(&c) => StemClass::Velar,
        Some(c) if SIBILANTS.contains(&c) => StemClass::Sibilant,
        _ if soft_ending => StemClass::Soft,
        _ => StemClass::Hard,
    }
}

/// Rule-based analyzer: a lexicon of the nouns organization names are built
/// from and adjective endings. Anything else is read as a noun of unknown
/// number and gender.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixAnalyzer;

impl SuffixAnalyzer {
    pub fn new() -> Self {
        SuffixAnalyzer
    }

    fn parse_adjective(word: &str) -> Option<WordForm> {
        if VERBAL_NOUN_ENDINGS.iter().any(|e| word.ends_with(e)) {
            return None;
        }

        let ending = ADJECTIVE_ENDINGS.iter().find(|e| word.ends_with(*e))?;
        let stem = &word[..word.len() - ending.len()];
        if stem.chars().count() < MIN_STEM_CHARS {
            return None;
        }

        let lemma_ending = match stem_class(stem, SOFT_ENDINGS.contains(ending)) {
            StemClass::Hard => "ый",
            StemClass::Velar | StemClass::Sibilant | StemClass::Soft => "ий",
        };

        Some(WordForm {
            pos: PartOfSpeech::Adjective,
            normal_form: format!("{stem}{lemma_ending}"),
            number: None,
            gender: None,
        })
    }
}

impl MorphAnalyzer for SuffixAnalyzer {
    fn parse(&self, word: &str) -> WordForm {
        let lower = word.to_lowercase();

        if FUNCTION_WORDS.contains(&lower.as_str()) {
            return WordForm {
                pos: PartOfSpeech::Other,
                normal_form: lower,
                number: None,
                gender: None,
            };
        }

        if let Some(entry) = NOUN_FORMS.get(&lower) {
            return WordForm {
                pos: PartOfSpeech::Noun,
                normal_form: entry.lemma.clone(),
                number: Some(entry.number),
                gender: Some(entry.gender),
            };
        }

        if let Some(adjective) = Self::parse_adjective(&lower) {
            return adjective;
        }

        // Names, abbreviations and nouns missing from the lexicon. Their
        // number and gender are unknown.
        WordForm {
            pos: PartOfSpeech::Noun,
            normal_form: lower,
            number: None,
            gender: None,
        }
    }

    fn inflect(
        &self,
        lemma: &str,
        number: GrammaticalNumber,
        gender: Option<Gender>,
    ) -> Option<String> {
        let lemma_ending = ["ый", "ий", "ой"].into_iter().find(|e| lemma.ends_with(e))?;
        let stem = &lemma[..lemma.len() - lemma_ending.len()];
        let class = stem_class(stem, lemma_ending == "ий");

        let ending = match (number, gender) {
            (GrammaticalNumber::Plural, _) => match class {
                StemClass::Hard => "ые",
                _ => "ие",
            },
            (GrammaticalNumber::Singular, Some(Gender::Feminine)) => match class {
                StemClass::Soft => "яя",
                _ => "ая",
            },
            (GrammaticalNumber::Singular, Some(Gender::Neuter)) => match class {
                StemClass::Soft | StemClass::Sibilant => "ее",
                _ => "ое",
            },
            (GrammaticalNumber::Singular, _) => lemma_ending,
        };

        Some(format!("{stem}{ending}"))
    }
}
