use std::collections::BTreeSet;

use super::error::{Result, SpectrumError};
use super::grid::{self, Band};

pub type SlotId = u32;

// the usable slots of one fiber, immutable once the fiber is built
#[derive(Clone,Debug,Default,PartialEq,Eq)]
pub struct ValidSlotSet {
    ids:BTreeSet<SlotId>
}

impl ValidSlotSet {
    pub const fn new() -> Self {
        Self {ids:BTreeSet::new()}
    }

    /// Builds the set from inclusive `(start, end)` ranges; overlapping ranges are merged.
    pub fn from_ranges(ranges:&[(SlotId,SlotId)]) -> Result<Self> {
        let mut ids = BTreeSet::new();
        for &(start,end) in ranges {
            if end < start {
                return Err(SpectrumError::InvertedSlotRange{start,end})
            }
            ids.extend(start..=end);
        }
        Ok(Self {ids})
    }

    pub fn band(band:Band) -> Self {
        grid::slots_of(band).clone()
    }

    pub fn bands(bands:&[Band]) -> Self {
        let mut ids = BTreeSet::new();
        for band in bands {
            ids.extend(grid::slots_of(*band).iter());
        }
        Self {ids}
    }

    pub fn contains(&self,slot:SlotId) -> bool {
        self.ids.contains(&slot)
    }
    pub fn len(&self) -> usize {
        self.ids.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SlotId> {
        self.ids.iter()
    }
    pub fn as_set(&self) -> &BTreeSet<SlotId> {
        &self.ids
    }
}

impl FromIterator<SlotId> for ValidSlotSet {
    fn from_iter<T: IntoIterator<Item = SlotId>>(iter: T) -> Self {
        Self {ids:iter.into_iter().collect()}
    }
}

impl From<BTreeSet<SlotId>> for ValidSlotSet {
    fn from(value: BTreeSet<SlotId>) -> Self {
        Self {ids:value}
    }
}

#[cfg(test)]
mod tests {
    use super::ValidSlotSet;
    use crate::optical_network::error::SpectrumError;
    use crate::optical_network::grid::Band;

    #[test]
    fn test_from_ranges() {
        let set = ValidSlotSet::from_ranges(&[(1,10),(8,12),(20,20)]).unwrap();
        assert_eq!(set.len(),13);
        assert!(set.contains(12));
        assert!(set.contains(20));
        assert!(!set.contains(13));
        assert!(ValidSlotSet::from_ranges(&[]).unwrap().is_empty());
    }
    #[test]
    fn test_inverted_range() {
        let err = ValidSlotSet::from_ranges(&[(1,10),(5,4)]).unwrap_err();
        assert_eq!(err,SpectrumError::InvertedSlotRange{start:5,end:4});
    }
    #[test]
    fn test_bands() {
        let c = ValidSlotSet::band(Band::C);
        let cl = ValidSlotSet::bands(&[Band::C,Band::L]);
        assert_eq!(cl.len(),c.len() + ValidSlotSet::band(Band::L).len());
        assert!(c.iter().all(|id| cl.contains(*id)));
    }
}
