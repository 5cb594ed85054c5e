use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

lazy_static! {
    // Characters deleted outright, not replaced with a space. Commas, newlines
    // and the currency/degree signs are part of the fixed set.
    static ref SYMBOLS: Regex =
        Regex::new(r##"[!"#$%&()*+\-./:;<=>?@\[\]\\^_~`{}|,\n£°]"##).expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

fn strip_symbols(text: &str) -> String {
    SYMBOLS.replace_all(text, "").replace('\'', "")
}

/// Normalize raw text into the term sequence the index is built over:
/// lower-case, delete the symbol set and apostrophes, split on whitespace,
/// drop stop words, then stem. Stems are re-stripped afterwards; the pass is
/// idempotent, so feeding normalized output back in yields the same terms.
pub fn normalize(text: &str) -> Vec<String> {
    let stripped = strip_symbols(&text.to_lowercase());
    let mut terms = Vec::new();
    for token in stripped.split_whitespace() {
        if is_stopword(token) {
            continue;
        }
        let stem = strip_symbols(&STEMMER.stem(token));
        terms.push(stem);
    }
    terms
}
