use ahash::HashMap;
use eyre::{eyre, Result};
use itertools::Itertools;

use invrep_core_rs::num::PrimUInt;

use crate::repeats::RepeatKey;

/// Occurrence counts of inverted repeat motifs. Absent keys have a zero count.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CountMap<Cnts: PrimUInt> {
    counts: HashMap<RepeatKey, Cnts>,
}

impl<Cnts: PrimUInt> Default for CountMap<Cnts> {
    fn default() -> Self {
        Self {
            counts: HashMap::default(),
        }
    }
}

impl<Cnts: PrimUInt> CountMap<Cnts> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: RepeatKey) -> Result<()> {
        self.add(key, Cnts::one())
    }

    /// Add to the key's count. Fails if the sum doesn't fit into the count type, the stored
    /// count is left untouched in that case.
    pub fn add(&mut self, key: RepeatKey, count: Cnts) -> Result<()> {
        let entry = self.counts.entry(key).or_insert_with(Cnts::zero);
        match entry.checked_add(&count) {
            Some(sum) => {
                *entry = sum;
                Ok(())
            }
            None => Err(eyre!(
                "Count overflow: {} + {} exceeds the capacity of {}",
                *entry,
                count,
                std::any::type_name::<Cnts>()
            )),
        }
    }

    /// Sum counts of the other map into this one.
    pub fn merge(&mut self, other: CountMap<Cnts>) -> Result<()> {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return Ok(());
        }
        for (key, count) in other.counts {
            self.add(key, count)?;
        }
        Ok(())
    }

    pub fn get(&self, key: &RepeatKey) -> Cnts {
        self.counts.get(key).copied().unwrap_or_else(Cnts::zero)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> Cnts {
        self.counts.values().fold(Cnts::zero(), |acc, x| acc + *x)
    }

    /// Entries in the map iteration order, which is arbitrary.
    pub fn iter(&self) -> impl Iterator<Item = (&RepeatKey, &Cnts)> {
        self.counts.iter()
    }

    /// Entries ordered by the first arm, then by the second arm.
    pub fn sorted_by_key(&self) -> Vec<(&RepeatKey, &Cnts)> {
        self.counts.iter().sorted_unstable_by_key(|x| x.0).collect()
    }

    /// Entries ordered by the descending count, ties are ordered by key.
    pub fn sorted_by_count(&self) -> Vec<(&RepeatKey, &Cnts)> {
        self.counts
            .iter()
            .sorted_unstable_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
            .collect()
    }
}

/// Later entries replace earlier ones with the same key, as in [std::collections::HashMap].
impl<Cnts: PrimUInt> FromIterator<(RepeatKey, Cnts)> for CountMap<Cnts> {
    fn from_iter<T: IntoIterator<Item = (RepeatKey, Cnts)>>(iter: T) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

impl<Cnts: PrimUInt> IntoIterator for CountMap<Cnts> {
    type Item = (RepeatKey, Cnts);
    type IntoIter = std::collections::hash_map::IntoIter<RepeatKey, Cnts>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}
