//! Build script embedding the word lists
//!
//! Each data file becomes a generated module in `OUT_DIR` holding a `&[&str]`
//! const and its length. Every entry must be exactly five ASCII lowercase
//! letters and appear once per file; anything else fails the build with the
//! offending line number.

use std::collections::HashSet;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

const WORD_LENGTH: usize = 5;

struct WordFile {
    source: &'static str,
    generated: &'static str,
    const_name: &'static str,
    doc: &'static str,
}

const WORD_FILES: [WordFile; 2] = [
    WordFile {
        source: "data/answers.txt",
        generated: "answers.rs",
        const_name: "ANSWERS",
        doc: "Answer pool: words eligible to be picked as the target",
    },
    WordFile {
        source: "data/allowed.txt",
        generated: "allowed.rs",
        const_name: "ALLOWED",
        doc: "Additional accepted guesses that are never picked as the target",
    },
];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));

    for file in &WORD_FILES {
        println!("cargo:rerun-if-changed={}", file.source);
        embed(file, &out_dir.join(file.generated));
    }
}

fn embed(file: &WordFile, output_path: &Path) {
    let content = fs::read_to_string(file.source)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", file.source));

    let words = validated_words(file.source, &content);

    let mut source = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(source, "/// {}", file.doc);
    let _ = writeln!(source, "pub const {}: &[&str] = &[", file.const_name);
    for word in &words {
        let _ = writeln!(source, "    \"{word}\",");
    }
    let _ = writeln!(source, "];\n");
    let _ = writeln!(source, "/// Number of words in {}", file.const_name);
    let _ = writeln!(
        source,
        "pub const {}_COUNT: usize = {};",
        file.const_name,
        words.len()
    );

    fs::write(output_path, source)
        .unwrap_or_else(|e| panic!("Failed to write {}: {e}", output_path.display()));
}

/// Trimmed, non-blank lines; panics on a malformed or repeated word
fn validated_words<'a>(source: &str, content: &'a str) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        let line_number = index + 1;

        assert!(
            word.len() == WORD_LENGTH && word.bytes().all(|b| b.is_ascii_lowercase()),
            "{source}:{line_number}: '{word}' is not {WORD_LENGTH} lowercase ASCII letters"
        );
        assert!(
            seen.insert(word),
            "{source}:{line_number}: duplicate word '{word}'"
        );

        words.push(word);
    }

    assert!(!words.is_empty(), "{source} has no words");
    words
}
