use std::fmt::Display;

// opaque handles, the network model resolves them against its own objects
// both hash as a single u64 write, which is what nohash requires

#[derive(Clone,Copy,Debug,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct FiberId(pub u64);

#[derive(Clone,Copy,Debug,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct LightpathId(pub u64);

impl nohash::IsEnabled for FiberId {}
impl nohash::IsEnabled for LightpathId {}

impl Display for FiberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,"fiber#{}",self.0)
    }
}

impl Display for LightpathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,"lightpath#{}",self.0)
    }
}

impl From<u64> for FiberId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u64> for LightpathId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

pub(crate) type IdMap<K,V> = std::collections::HashMap<K,V,nohash::BuildNoHashHasher<K>>;
pub(crate) type IdSet<K> = std::collections::HashSet<K,nohash::BuildNoHashHasher<K>>;

pub(crate) fn id_map<K,V>() -> IdMap<K,V> {
    IdMap::with_hasher(nohash::BuildNoHashHasher::default())
}

pub(crate) fn id_set_with_capacity<K>(capacity:usize) -> IdSet<K> {
    IdSet::with_capacity_and_hasher(capacity,nohash::BuildNoHashHasher::default())
}

// first fiber that shows up twice in a route
pub(crate) fn repeated_fiber(route:&[FiberId]) -> Option<FiberId> {
    let mut seen = id_set_with_capacity(route.len());
    route.iter().copied().find(|fiber| !seen.insert(*fiber))
}

#[cfg(test)]
mod tests {
    use super::{id_map, repeated_fiber, FiberId, IdMap, LightpathId};

    #[test]
    fn test_ids_as_keys() {
        let mut map:IdMap<LightpathId,FiberId> = id_map();
        for i in 0..1000u64 {
            map.insert(LightpathId(i),FiberId(i*7));
        }
        assert_eq!(map.len(),1000);
        assert_eq!(map[&LightpathId(42)],FiberId(294));
        assert_eq!(FiberId(3).to_string(),"fiber#3");
    }
    #[test]
    fn test_repeated_fiber() {
        assert_eq!(repeated_fiber(&[FiberId(1),FiberId(2),FiberId(3)]),None);
        assert_eq!(repeated_fiber(&[FiberId(1),FiberId(2),FiberId(1)]),Some(FiberId(1)));
        assert_eq!(repeated_fiber(&[]),None);
    }
}
