use std::collections::BTreeSet;
use std::ops::RangeInclusive;

// walks a sorted id set and yields maximal runs of consecutive ids
// {1,2,3,7,8,10} -> 1..=3, 7..=8, 10..=10
pub(crate) struct Runs<'a> {
    ids:std::collections::btree_set::Iter<'a,u32>,
    pending:Option<u32>,
}

impl<'a> Runs<'a> {
    pub(crate) fn new(ids:&'a BTreeSet<u32>) -> Self {
        let mut ids = ids.iter();
        let pending = ids.next().copied();
        Self {ids,pending}
    }
}

impl Iterator for Runs<'_> {
    type Item = RangeInclusive<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pending.take()?;
        let mut end = start;
        for &id in self.ids.by_ref() {
            // checked_add: u32::MAX has no successor, so it always ends a run
            if end.checked_add(1) == Some(id) {
                end = id;
            }else{
                self.pending = Some(id);
                break;
            }
        }
        Some(start..=end)
    }
}

pub(crate) fn run_len(run:&RangeInclusive<u32>) -> u64 {
    (*run.end() as u64) - (*run.start() as u64) + 1
}

// every start id s such that s..s+width lies inside one run, ascending
pub(crate) fn block_starts(ids:&BTreeSet<u32>,width:u32) -> impl Iterator<Item = u32> + '_ {
    Runs::new(ids).flat_map(move |run| {
        let fits = width > 0 && run_len(&run) >= width as u64;
        if fits {*run.start()..=*run.end() - (width - 1)} else {1..=0}
    })
}

// width must be non zero
pub(crate) fn block(start:u32,width:u32) -> BTreeSet<u32> {
    (start..=start + (width - 1)).collect()
}

pub(crate) fn longest_run(ids:&BTreeSet<u32>) -> u64 {
    Runs::new(ids).map(|run| run_len(&run)).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::Rng;

    use super::{block_starts, longest_run, Runs};

    #[test]
    fn test_runs() {
        let ids:BTreeSet<u32> = [1,2,3,7,8,10].into();
        let runs:Vec<_> = Runs::new(&ids).collect();
        assert_eq!(runs,vec![1..=3,7..=8,10..=10]);
        assert_eq!(longest_run(&ids),3);
        assert_eq!(Runs::new(&BTreeSet::new()).count(),0);
    }
    #[test]
    fn test_runs_at_upper_edge() {
        let ids:BTreeSet<u32> = [u32::MAX - 1,u32::MAX].into();
        let runs:Vec<_> = Runs::new(&ids).collect();
        assert_eq!(runs,vec![u32::MAX - 1..=u32::MAX]);
    }
    #[test]
    fn test_block_starts() {
        let ids:BTreeSet<u32> = [1,2,3,4,7,8,10].into();
        let starts:Vec<u32> = block_starts(&ids,2).collect();
        assert_eq!(starts,vec![1,2,3,7]);
        assert_eq!(block_starts(&ids,5).count(),0);
        assert_eq!(block_starts(&ids,0).count(),0);
    }
    #[test]
    fn test_block_starts_against_brute_force() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let ids:BTreeSet<u32> = (0..rng.random_range(0..60))
                .map(|_| rng.random_range(0..80)).collect();
            let width = rng.random_range(1..6);
            let expected:Vec<u32> = (0..80u32)
                .filter(|s| (*s..*s + width).all(|id| ids.contains(&id)))
                .collect();
            let found:Vec<u32> = block_starts(&ids,width).collect();
            assert_eq!(found,expected,"ids {ids:?} width {width}");
        }
    }
}
