//! Rule-based polarity scoring in the VADER style.
//!
//! Each token gets its lexicon valence, adjusted by the up to three tokens in
//! front of it (boosters, dampeners, negations, fixed idioms), by all-caps
//! emphasis, and by a "but" contrast. The summed valence is squashed into
//! `[-1, 1]`.

use crate::lexicon::SentimentLexicon;
use sentiment_core::{NormalizedText, SentimentLabel, SentimentScores};

pub const B_INCR: f64 = 0.293;
pub const B_DECR: f64 = -0.293;
pub const C_INCR: f64 = 0.733;
pub const N_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;

const NEGATE: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't",
    "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt",
    "havent", "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't",
    "isn't", "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not",
    "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
    "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont",
    "wouldnt", "won't", "wouldn't", "rarely", "seldom", "despite",
];

const BOOSTERS_UP: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerable", "considerably",
    "decidedly", "deeply", "effing", "enormous", "enormously", "entirely", "especially",
    "exceptional", "exceptionally", "extreme", "extremely", "fabulously", "flipping",
    "flippin", "frackin", "fracking", "fricking", "frickin", "frigging", "friggin", "fully",
    "fuckin", "fucking", "fuggin", "fugging", "greatly", "hella", "highly", "hugely",
    "incredible", "incredibly", "intensely", "major", "majorly", "more", "most",
    "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
    "thoroughly", "total", "totally", "tremendous", "tremendously", "uber", "unbelievably",
    "unusually", "utter", "utterly", "very",
];

const BOOSTERS_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "kind of", "kinda", "kindof", "kind-of", "less", "little",
    "marginal", "marginally", "occasional", "occasionally", "partly", "scarce", "scarcely",
    "slight", "slightly", "somewhat", "sort of", "sorta", "sortof", "sort-of",
];

/// Multi-word phrases whose valence replaces that of the word they surround.
const SPECIAL_CASE_IDIOMS: &[(&str, f64)] = &[
    ("the shit", 3.0),
    ("the bomb", 3.0),
    ("bad ass", 1.5),
    ("badass", 1.5),
    ("yeah right", -2.0),
    ("kiss of death", -1.5),
    ("to die for", 3.0),
    ("beating heart", 3.1),
];

fn idiom_valence(phrase: &str) -> Option<f64> {
    SPECIAL_CASE_IDIOMS
        .iter()
        .find(|(idiom, _)| *idiom == phrase)
        .map(|&(_, valence)| valence)
}

fn booster_scalar(word: &str) -> Option<f64> {
    if BOOSTERS_UP.contains(&word) {
        Some(B_INCR)
    } else if BOOSTERS_DOWN.contains(&word) {
        Some(B_DECR)
    } else {
        None
    }
}

fn is_negation(word: &str) -> bool {
    NEGATE.contains(&word) || word.contains("n't")
}

/// Mirrors Python's `str.isupper`: at least one cased character and no
/// lowercase ones.
fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

/// True when some, but not all, tokens are shouted.
fn allcap_differential(words: &[&str]) -> bool {
    let shouted = words.iter().filter(|w| is_upper(w)).count();
    shouted > 0 && shouted < words.len()
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() > 2 {
                stripped
            } else {
                token
            }
        })
        .collect()
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64;
    let questions = text.matches('?').count();
    let question_amplifier = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations * 0.292 + question_amplifier
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Stateless apart from the lexicon it was built with.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: SentimentLexicon,
}

impl SentimentAnalyzer {
    pub fn new(lexicon: SentimentLexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &SentimentLexicon {
        &self.lexicon
    }

    pub fn classify(&self, text: &NormalizedText) -> SentimentLabel {
        self.polarity_scores(text.as_str()).label()
    }

    pub fn polarity_scores(&self, text: &str) -> SentimentScores {
        let words = tokenize(text);
        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let is_cap_diff = allcap_differential(&words);

        let mut sentiments = Vec::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            let word_lower = lower[i].as_str();
            let kind_of = word_lower == "kind" && lower.get(i + 1).map(String::as_str) == Some("of");

            if booster_scalar(word_lower).is_some() || kind_of {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.sentiment_valence(word, i, &words, &lower, is_cap_diff));
        }

        but_check(&lower, &mut sentiments);
        score_valence(&sentiments, text)
    }

    fn sentiment_valence(
        &self,
        word: &str,
        i: usize,
        words: &[&str],
        lower: &[String],
        is_cap_diff: bool,
    ) -> f64 {
        let word_lower = lower[i].as_str();
        let Some(base) = self.lexicon.valence(word_lower) else {
            return 0.0;
        };
        let mut valence = base;

        if word_lower == "no"
            && lower
                .get(i + 1)
                .is_some_and(|next| self.lexicon.contains(next))
        {
            // "no" in front of another lexicon word only flips that word
            valence = 0.0;
        }
        if (i > 0 && lower[i - 1] == "no")
            || (i > 1 && lower[i - 2] == "no")
            || (i > 2 && lower[i - 3] == "no" && matches!(lower[i - 1].as_str(), "or" | "nor"))
        {
            valence = base * N_SCALAR;
        }

        if is_upper(word) && is_cap_diff {
            if valence > 0.0 {
                valence += C_INCR;
            } else {
                valence -= C_INCR;
            }
        }

        for start_i in 0..3 {
            if i > start_i && !self.lexicon.contains(&lower[i - (start_i + 1)]) {
                let preceding = words[i - (start_i + 1)];
                let mut scalar = scalar_inc_dec(preceding, valence, is_cap_diff);
                if start_i == 1 && scalar != 0.0 {
                    scalar *= 0.95;
                }
                if start_i == 2 && scalar != 0.0 {
                    scalar *= 0.9;
                }
                valence += scalar;
                valence = negation_check(valence, lower, start_i, i);
                if start_i == 2 {
                    valence = idioms_check(valence, lower, i);
                }
            }
        }

        self.least_check(valence, lower, i)
    }

    fn least_check(&self, valence: f64, lower: &[String], i: usize) -> f64 {
        if i > 1 && !self.lexicon.contains(&lower[i - 1]) && lower[i - 1] == "least" {
            if lower[i - 2] != "at" && lower[i - 2] != "very" {
                return valence * N_SCALAR;
            }
        } else if i > 0 && !self.lexicon.contains(&lower[i - 1]) && lower[i - 1] == "least" {
            return valence * N_SCALAR;
        }
        valence
    }
}

fn scalar_inc_dec(word: &str, valence: f64, is_cap_diff: bool) -> f64 {
    let Some(mut scalar) = booster_scalar(&word.to_lowercase()) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if is_upper(word) && is_cap_diff {
        if valence > 0.0 {
            scalar += C_INCR;
        } else {
            scalar -= C_INCR;
        }
    }
    scalar
}

fn negation_check(valence: f64, lower: &[String], start_i: usize, i: usize) -> f64 {
    let at = |offset: usize| lower[i - offset].as_str();
    let so_or_this = |w: &str| w == "so" || w == "this";

    match start_i {
        0 if is_negation(at(1)) => valence * N_SCALAR,
        1 if at(2) == "never" && so_or_this(at(1)) => valence * 1.25,
        1 if at(2) == "without" && at(1) == "doubt" => valence,
        1 if is_negation(at(2)) => valence * N_SCALAR,
        2 if (at(3) == "never" && so_or_this(at(2))) || so_or_this(at(1)) => valence * 1.25,
        2 if at(3) == "without" && (at(2) == "doubt" || at(1) == "doubt") => valence,
        2 if is_negation(at(3)) => valence * N_SCALAR,
        _ => valence,
    }
}

/// Only called with `i >= 3`. The window spans three words back and two ahead.
fn idioms_check(mut valence: f64, lower: &[String], i: usize) -> f64 {
    let phrase = |range: std::ops::RangeInclusive<usize>| lower[range].join(" ");

    let behind = [
        phrase(i - 1..=i),
        phrase(i - 2..=i),
        phrase(i - 2..=i - 1),
        phrase(i - 3..=i - 1),
        phrase(i - 3..=i - 2),
    ];
    if let Some(idiom) = behind.iter().find_map(|p| idiom_valence(p)) {
        valence = idiom;
    }
    if i + 1 < lower.len() {
        if let Some(idiom) = idiom_valence(&phrase(i..=i + 1)) {
            valence = idiom;
        }
    }
    if i + 2 < lower.len() {
        if let Some(idiom) = idiom_valence(&phrase(i..=i + 2)) {
            valence = idiom;
        }
    }

    // Two-word dampeners such as "sort of" always pull down.
    let two_words = [&behind[4], &behind[2]];
    if two_words.iter().any(|p| booster_scalar(p).is_some()) {
        valence += B_DECR;
    }
    valence
}

/// Everything before "but" is damped, everything after is amplified.
fn but_check(lower: &[String], sentiments: &mut [f64]) {
    let Some(but_index) = lower.iter().position(|w| w == "but") else {
        return;
    };
    for (index, sentiment) in sentiments.iter_mut().enumerate() {
        if index < but_index {
            *sentiment *= 0.5;
        } else if index > but_index {
            *sentiment *= 1.5;
        }
    }
}

fn score_valence(sentiments: &[f64], text: &str) -> SentimentScores {
    if sentiments.is_empty() {
        return SentimentScores::default();
    }

    let punct_amplifier = punctuation_emphasis(text);
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += punct_amplifier;
    } else if sum < 0.0 {
        sum -= punct_amplifier;
    }
    let compound = normalize(sum);

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1.0;
        }
    }

    if pos_sum > neg_sum.abs() {
        pos_sum += punct_amplifier;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= punct_amplifier;
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    SentimentScores {
        neg: round_to((neg_sum / total).abs(), 3),
        neu: round_to((neu_count / total).abs(), 3),
        pos: round_to((pos_sum / total).abs(), 3),
        compound: round_to(compound, 4),
    }
}
