//! DNA samples and their comparison.
//!
//! A sample is any file whose *name* contains the sample marker (`.moura` by
//! default); the contents are taken verbatim as the genome, one character per
//! base. Similarity is the indel ratio: the share of characters the two
//! genomes have in common along a longest common subsequence,
//! `2 * lcs / (len(a) + len(b))`, which equals
//! `(len(a) + len(b) - indel_distance) / (len(a) + len(b))`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_SAMPLE_MARKER: &str = ".moura";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnaSample {
    genome: String,
    source: Option<PathBuf>,
}

impl DnaSample {
    /// Load a sample from disk. The marker check looks only at the file name,
    /// so the contents never make an unmarked file acceptable.
    pub fn load(path: &Path, marker: &str) -> Result<Self> {
        let has_marker = path
            .file_name()
            .map(|name| name.to_string_lossy().contains(marker))
            .unwrap_or(false);
        if !has_marker {
            return Err(Error::InvalidFormat {
                path: path.to_path_buf(),
                marker: marker.to_string(),
            });
        }

        let genome = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "Loaded sample {} ({} bases)",
            path.display(),
            genome.chars().count()
        );
        Ok(Self {
            genome,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn from_genome(genome: impl Into<String>) -> Self {
        Self {
            genome: genome.into(),
            source: None,
        }
    }

    pub fn genome(&self) -> &str {
        &self.genome
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Display name: the file name when loaded from disk.
    pub fn label(&self) -> String {
        self.source
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<inline>".to_string())
    }

    pub fn len(&self) -> usize {
        self.genome.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.genome.is_empty()
    }

    pub fn similarity(&self, other: &DnaSample) -> f64 {
        similarity(&self.genome, &other.genome)
    }
}

/// Normalized indel similarity in `[0.0, 1.0]`. Two empty strings are
/// identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let lcs = lcs_len(&a, &b);
    (2 * lcs) as f64 / total as f64
}

/// Insertions plus deletions needed to turn `a` into `b`.
pub fn indel_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    a.len() + b.len() - 2 * lcs_len(&a, &b)
}

/// Length of a longest common subsequence, bit-parallel over 64-bit words
/// (Allison-Dix / Hyyrö). The shorter input is encoded as one bitmask per
/// distinct character; each character of the longer input then updates the
/// whole row in `O(len / 64)` word operations. A zero bit in the row marks a
/// matched position.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0;
    }

    let words = short.len().div_ceil(64);
    let mut masks: HashMap<char, Vec<u64>> = HashMap::new();
    for (i, &c) in short.iter().enumerate() {
        masks.entry(c).or_insert_with(|| vec![0; words])[i / 64] |= 1 << (i % 64);
    }

    let mut row = vec![u64::MAX; words];
    for c in long {
        let Some(mask) = masks.get(c) else {
            continue;
        };
        let mut carry = false;
        for (word, &m) in row.iter_mut().zip(mask) {
            let matched = *word & m;
            let (sum, c1) = word.overflowing_add(matched);
            let (sum, c2) = sum.overflowing_add(u64::from(carry));
            carry = c1 || c2;
            *word = sum | (*word & !m);
        }
    }

    let tail_bits = short.len() % 64;
    row.iter()
        .enumerate()
        .map(|(i, &word)| {
            let valid = if i + 1 == words && tail_bits != 0 {
                (1u64 << tail_bits) - 1
            } else {
                u64::MAX
            };
            (!word & valid).count_ones() as usize
        })
        .sum()
}

pub const SLOT_COUNT: usize = 2;

/// The two sample boxes of the matcher screen.
#[derive(Debug, Clone, Default)]
pub struct SampleSlots {
    slots: [Option<DnaSample>; SLOT_COUNT],
}

impl SampleSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: usize) -> Option<&DnaSample> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Replace the sample in `slot`. Returns the previous one.
    pub fn set(&mut self, slot: usize, sample: DnaSample) -> Option<DnaSample> {
        let entry = self.slots.get_mut(slot)?;
        entry.replace(sample)
    }

    /// Load into `slot`; on error the slot keeps its previous sample.
    pub fn load(&mut self, slot: usize, path: &Path, marker: &str) -> Result<&DnaSample> {
        if slot >= SLOT_COUNT {
            return Err(Error::MissingSample { slot });
        }
        let sample = DnaSample::load(path, marker)?;
        let entry = &mut self.slots[slot];
        Ok(entry.insert(sample))
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Similarity of the two slots, or `MissingSample` for the first empty one.
    pub fn compare(&self) -> Result<f64> {
        let a = self.get(0).ok_or(Error::MissingSample { slot: 0 })?;
        let b = self.get(1).ok_or(Error::MissingSample { slot: 1 })?;
        let ratio = a.similarity(b);
        log::info!("Compared {} with {}: {:.4}", a.label(), b.label(), ratio);
        Ok(ratio)
    }
}
