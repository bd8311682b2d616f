//! Text classification with the word-count kernels
//!
//! A small in-memory corpus tokenizes documents by splitting on whitespace
//! and lowercasing, and keeps the statistics both kernels need.

use approx::assert_relative_eq;
use smosvm::api::SVM;
use smosvm::{
    Classifier, Corpus, Document, Kernel, Observation, TermFrequencyKernel, WordCountKernel,
    WordFrequency,
};
use std::collections::{BTreeMap, HashMap};

const DOCUMENTS: &[(&str, &str)] = &[
    ("Blah blah blah", "class1"),
    ("Blah blah blah", "class1"),
    ("Blah blah blah", "class1"),
    ("Blah blah blah", "class1"),
    ("Blah blah blah", "class1"),
    ("Blah blah blah", "class1"),
    ("Yada yada yada", "class2"),
    ("Yada yada yada", "class2"),
    ("Yada yada yada", "class2"),
    ("Yada yada yada", "class2"),
    ("Yada yada yada", "class2"),
    ("Yada yada yada", "class2"),
    ("Hmmm yada hmmm blah hmmm", "class3"),
    ("Hmmm hmmm blur hmmm", "class3"),
    ("Hmmm hmmm yada hmmm", "class3"),
    ("Hmmm blop hmmm hmmm", "class3"),
    ("Hmmm hmmm blip hmmm", "class3"),
    ("Hmmm hmmm blap hmmm", "class3"),
];

#[derive(Default)]
struct TestCorpus {
    word_ids: HashMap<String, u32>,
    document_frequencies: HashMap<u32, usize>,
    term_frequencies: HashMap<u32, usize>,
    total_terms: usize,
    documents: Vec<Observation<Document, &'static str>>,
}

impl TestCorpus {
    fn new(documents: &[(&str, &'static str)]) -> Self {
        let mut corpus = Self::default();
        for &(text, label) in documents {
            corpus.add(text, label);
        }
        corpus
    }

    fn add(&mut self, text: &str, label: &'static str) {
        let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
        for word in words(text) {
            let next_id = self.word_ids.len() as u32;
            let id = *self.word_ids.entry(word).or_insert(next_id);
            *counts.entry(id).or_insert(0) += 1;
        }

        for (&id, &frequency) in &counts {
            *self.document_frequencies.entry(id).or_insert(0) += 1;
            *self.term_frequencies.entry(id).or_insert(0) += frequency as usize;
            self.total_terms += frequency as usize;
        }

        let document = Document::new(counts.into_iter().map(|(id, f)| WordFrequency::new(id, f)));
        self.documents.push(Observation::new(document, label));
    }

    /// Count the known words of `text`; unknown words are dropped
    fn tokenize(&self, text: &str) -> Document {
        let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
        for id in words(text).filter_map(|w| self.word_ids.get(&w).copied()) {
            *counts.entry(id).or_insert(0) += 1;
        }
        Document::new(counts.into_iter().map(|(id, f)| WordFrequency::new(id, f)))
    }

    fn documents(&self) -> &[Observation<Document, &'static str>] {
        &self.documents
    }
}

impl Corpus for TestCorpus {
    fn document_frequency(&self, word_id: u32) -> usize {
        self.document_frequencies.get(&word_id).copied().unwrap_or(0)
    }

    fn corpus_size(&self) -> usize {
        self.documents.len()
    }

    fn term_frequency(&self, word_id: u32) -> usize {
        self.term_frequencies.get(&word_id).copied().unwrap_or(0)
    }

    fn total_terms(&self) -> usize {
        self.total_terms
    }
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(str::to_lowercase)
}

fn assert_classifies<M: Classifier<Document, Label = &'static str>>(model: &M, corpus: &TestCorpus) {
    assert_eq!(model.classify(&corpus.tokenize("yada")), "class2");
    assert_eq!(model.classify(&corpus.tokenize("blah blah yada hmmm")), "class1");
    assert_eq!(model.classify(&corpus.tokenize("hmmm")), "class3");
}

#[test]
fn test_corpus_statistics() {
    let corpus = TestCorpus::new(DOCUMENTS);

    assert_eq!(corpus.corpus_size(), 18);
    assert_eq!(corpus.total_terms(), 61);

    let blah = corpus.word_ids["blah"];
    assert_eq!(corpus.document_frequency(blah), 7);
    assert_eq!(corpus.term_frequency(blah), 19);
    assert_eq!(corpus.document_frequency(corpus.word_ids["blur"]), 1);

    let document = corpus.tokenize("Hmmm hmmm unknown");
    assert_eq!(document.words().len(), 1);
    assert_eq!(document.words()[0].frequency, 2);
}

#[test]
fn test_word_count_kernel_value() {
    let corpus = TestCorpus::new(DOCUMENTS);
    let kernel = WordCountKernel::new(&corpus);

    let a = corpus.tokenize("yada blah");
    let b = corpus.tokenize("blah yada");

    // blah occurs in 7 of 18 documents, yada in 8
    let expected = (18.0f64 / 8.0).ln().powi(2) + (18.0f64 / 9.0).ln().powi(2);
    assert_relative_eq!(kernel.compute(&a, &b), expected, epsilon = 1e-12);
    assert_eq!(kernel.compute(&a, &b), kernel.compute(&b, &a));
}

#[test]
fn test_term_frequency_kernel_value() {
    let corpus = TestCorpus::new(DOCUMENTS);
    let kernel = TermFrequencyKernel::new(&corpus);

    let a = corpus.tokenize("hmmm hmmm");
    let b = corpus.tokenize("hmmm");

    // hmmm occurs 18 times among 61 words
    let expected = 2.0 * (61.0f64 / 19.0).ln().powi(2);
    assert_relative_eq!(kernel.compute(&a, &b), expected, epsilon = 1e-12);
}

#[test]
fn test_classification_document_frequency() {
    let corpus = TestCorpus::new(DOCUMENTS);

    let model = SVM::with_kernel(WordCountKernel::new(&corpus))
        .train(corpus.documents())
        .expect("Training should succeed");

    assert_eq!(model.labels(), &["class1", "class2", "class3"]);
    assert_classifies(&model, &corpus);
}

#[test]
fn test_classification_term_frequency() {
    let corpus = TestCorpus::new(DOCUMENTS);

    let model = SVM::with_kernel(TermFrequencyKernel::new(&corpus))
        .train(corpus.documents())
        .expect("Training should succeed");

    assert_classifies(&model, &corpus);
}
