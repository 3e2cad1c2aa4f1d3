use crate::zob_hash::Hash;

/// Append-only record of the positions a game went through, used for repetition detection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepetitionLedger {
    hashes: Vec<Hash>,
}

impl RepetitionLedger {
    pub fn new() -> RepetitionLedger {
        RepetitionLedger { hashes: Vec::with_capacity(128) }
    }

    pub fn record(&mut self, hash: Hash) {
        self.hashes.push(hash)
    }

    /// How many times a position has been recorded
    pub fn occurrences(&self, hash: Hash) -> usize {
        self.hashes.iter().filter(|h| **h == hash).count()
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn hashes(&self) -> &[Hash] {
        &self.hashes
    }
}
