//! Kernels over word-count documents
//!
//! A [`Document`] is a bag of words: word ids with their occurrence counts,
//! sorted by id. Two documents are similar when they share words, and a shared
//! word counts for more the rarer it is in the corpus. How rarity is measured
//! is the only difference between the two kernels in this module:
//!
//! - [`WordCountKernel`] weighs a word by the number of *documents* that
//!   contain it: `w = ln(N / (df + 1))²`.
//! - [`TermFrequencyKernel`] weighs a word by its raw number of *occurrences*
//!   across the corpus: `w = ln(T / (tf + 1))²`.
//!
//! Both compute `Σ freq_a(w) * freq_b(w) * weight(w)` over the shared words.
//! Corpus statistics come from a caller-supplied [`Corpus`].

use crate::kernel::Kernel;

/// The occurrence count of one word in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordFrequency {
    pub word_id: u32,
    pub frequency: u32,
}

impl WordFrequency {
    pub fn new(word_id: u32, frequency: u32) -> Self {
        Self { word_id, frequency }
    }
}

/// A document reduced to its word counts, ordered by word id
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    words: Vec<WordFrequency>,
}

impl Document {
    /// Build a document; the words are sorted by id
    pub fn new(words: impl IntoIterator<Item = WordFrequency>) -> Self {
        let mut words: Vec<_> = words.into_iter().collect();
        words.sort_by_key(|w| w.word_id);
        Self { words }
    }

    /// Word occurrences ordered by id
    pub fn words(&self) -> &[WordFrequency] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Corpus-wide word statistics consulted by the word-count kernels
pub trait Corpus: Send + Sync {
    /// Number of documents containing the word
    fn document_frequency(&self, word_id: u32) -> usize;

    /// Number of documents in the corpus
    fn corpus_size(&self) -> usize;

    /// Number of occurrences of the word across all documents
    fn term_frequency(&self, word_id: u32) -> usize;

    /// Number of word occurrences across all documents
    fn total_terms(&self) -> usize;
}

impl<C: Corpus + ?Sized> Corpus for &C {
    fn document_frequency(&self, word_id: u32) -> usize {
        (**self).document_frequency(word_id)
    }

    fn corpus_size(&self) -> usize {
        (**self).corpus_size()
    }

    fn term_frequency(&self, word_id: u32) -> usize {
        (**self).term_frequency(word_id)
    }

    fn total_terms(&self) -> usize {
        (**self).total_terms()
    }
}

/// Word-count kernel with document-frequency (IDF-style) weighting
#[derive(Debug, Clone)]
pub struct WordCountKernel<C> {
    corpus: C,
}

impl<C: Corpus> WordCountKernel<C> {
    pub fn new(corpus: C) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    fn weight(&self, word_id: u32) -> f64 {
        let document_frequency = self.corpus.document_frequency(word_id) + 1;
        let inverse = (self.corpus.corpus_size() as f64 / document_frequency as f64).ln();
        inverse * inverse
    }
}

impl<C: Corpus> Kernel<Document> for WordCountKernel<C> {
    fn compute(&self, x: &Document, y: &Document) -> f64 {
        weighted_overlap(x, y, |id| self.weight(id))
    }
}

/// Word-count kernel with raw term-frequency weighting
#[derive(Debug, Clone)]
pub struct TermFrequencyKernel<C> {
    corpus: C,
}

impl<C: Corpus> TermFrequencyKernel<C> {
    pub fn new(corpus: C) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    fn weight(&self, word_id: u32) -> f64 {
        let term_frequency = self.corpus.term_frequency(word_id) + 1;
        let inverse = (self.corpus.total_terms() as f64 / term_frequency as f64).ln();
        inverse * inverse
    }
}

impl<C: Corpus> Kernel<Document> for TermFrequencyKernel<C> {
    fn compute(&self, x: &Document, y: &Document) -> f64 {
        weighted_overlap(x, y, |id| self.weight(id))
    }
}

/// Merge two id-sorted word lists, summing weighted products of shared counts
fn weighted_overlap(x: &Document, y: &Document, weight: impl Fn(u32) -> f64) -> f64 {
    let (a, b) = (x.words(), y.words());
    let mut result = 0.0;
    let mut i = 0;
    let mut j = 0;

    while i < a.len() && j < b.len() {
        let (wa, wb) = (a[i], b[j]);

        if wa.word_id == wb.word_id {
            result += f64::from(wa.frequency) * f64::from(wb.frequency) * weight(wa.word_id);
            i += 1;
            j += 1;
        } else if wa.word_id < wb.word_id {
            i += 1;
        } else {
            j += 1;
        }
    }

    result
}
