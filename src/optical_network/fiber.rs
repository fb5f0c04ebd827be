use std::collections::BTreeSet;

use super::error::{Result, SpectrumError};
use super::grid::Band;
use super::ids::{id_map, FiberId, IdMap, LightpathId};
use super::regeneration::{regeneration_segments, FiberLength};
use super::slots::{SlotId, ValidSlotSet};

pub type DistanceKM = f64;

#[derive(Clone,Debug,PartialEq)]
pub struct Fiber {
    id:FiberId,
    valid_slots:ValidSlotSet,
    length_km:DistanceKM,
}

impl Fiber {
    pub fn new(id:FiberId,valid_slots:ValidSlotSet,length_km:DistanceKM) -> Result<Self> {
        if !length_km.is_finite() || length_km < 0.0 {
            return Err(SpectrumError::InvalidLength{fiber:id,length_km})
        }
        Ok(Self {id,valid_slots,length_km})
    }
    pub fn with_bands(id:FiberId,bands:&[Band],length_km:DistanceKM) -> Result<Self> {
        Self::new(id,ValidSlotSet::bands(bands),length_km)
    }
    pub fn id(&self) -> FiberId {
        self.id
    }
    pub fn valid_slot_ids(&self) -> &ValidSlotSet {
        &self.valid_slots
    }
    pub fn length_km(&self) -> DistanceKM {
        self.length_km
    }
}

impl FiberLength for Fiber {
    fn fiber_id(&self) -> FiberId {
        self.id
    }
    fn length_km(&self) -> DistanceKM {
        self.length_km
    }
}

impl FiberLength for &Fiber {
    fn fiber_id(&self) -> FiberId {
        self.id
    }
    fn length_km(&self) -> DistanceKM {
        self.length_km
    }
}

// an in-service lightpath as reported by the network model
// only used to bulk load a ledger
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Lightpath {
    pub id:LightpathId,
    pub route:Vec<FiberId>,
    pub slots:BTreeSet<SlotId>,
}

impl Lightpath {
    pub fn new(id:LightpathId,route:Vec<FiberId>,slots:impl IntoIterator<Item = SlotId>) -> Self {
        Self {id,route,slots:slots.into_iter().collect()}
    }
}

// resolves fiber handles, fibers never change once registered
#[derive(Clone,Debug,PartialEq)]
pub struct FiberRegistry {
    fibers:IdMap<FiberId,Fiber>
}

impl Default for FiberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FiberRegistry {
    pub fn new() -> Self {
        Self {fibers:id_map()}
    }
    pub fn register(&mut self,fiber:Fiber) -> Result<()> {
        if self.fibers.contains_key(&fiber.id) {
            return Err(SpectrumError::DuplicateFiber{fiber:fiber.id})
        }
        self.fibers.insert(fiber.id,fiber);
        Ok(())
    }
    pub fn get(&self,id:FiberId) -> Option<&Fiber> {
        self.fibers.get(&id)
    }
    pub fn contains(&self,id:FiberId) -> bool {
        self.fibers.contains_key(&id)
    }
    pub fn len(&self) -> usize {
        self.fibers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.fibers.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Fiber> {
        self.fibers.values()
    }

    fn resolve(&self,route:&[FiberId]) -> Result<Vec<&Fiber>> {
        route.iter().map(|id| {
            self.get(*id).ok_or(SpectrumError::UnknownFiber{fiber:*id})
        }).collect()
    }

    pub fn length_km(&self,route:&[FiberId]) -> Result<DistanceKM> {
        Ok(self.resolve(route)?.iter().map(|fiber| fiber.length_km).sum())
    }

    pub fn regeneration_segments(&self,route:&[FiberId],budget_km:DistanceKM) -> Result<Vec<Vec<FiberId>>> {
        let fibers = self.resolve(route)?;
        let segments = regeneration_segments(&fibers,budget_km)?;
        Ok(segments.into_iter()
            .map(|segment| segment.into_iter().map(|fiber| fiber.id).collect())
            .collect())
    }
}

impl FromIterator<Fiber> for FiberRegistry {
    // later duplicates replace earlier ones, use register to reject them
    fn from_iter<T: IntoIterator<Item = Fiber>>(iter: T) -> Self {
        let mut registry = Self::new();
        for fiber in iter {
            registry.fibers.insert(fiber.id,fiber);
        }
        registry
    }
}

#[derive(Clone,Debug,Default)]
pub struct NetworkSnapshot {
    pub fibers:Vec<Fiber>,
    pub lightpaths:Vec<Lightpath>,
}

#[cfg(test)]
mod tests {
    use super::{Fiber, FiberRegistry};
    use crate::optical_network::error::SpectrumError;
    use crate::optical_network::grid::Band;
    use crate::optical_network::ids::FiberId;
    use crate::optical_network::slots::ValidSlotSet;

    fn fiber(id:u64,km:f64) -> Fiber {
        Fiber::new(FiberId(id),ValidSlotSet::from_ranges(&[(1,10)]).unwrap(),km).unwrap()
    }

    #[test]
    fn test_invalid_length() {
        let slots = ValidSlotSet::new();
        assert!(matches!(Fiber::new(FiberId(1),slots.clone(),-1.0),Err(SpectrumError::InvalidLength{..})));
        assert!(matches!(Fiber::new(FiberId(1),slots.clone(),f64::NAN),Err(SpectrumError::InvalidLength{..})));
        assert!(Fiber::new(FiberId(1),slots,0.0).is_ok());
    }
    #[test]
    fn test_register() {
        let mut registry = FiberRegistry::new();
        registry.register(fiber(1,80.0)).unwrap();
        registry.register(fiber(2,40.0)).unwrap();
        assert_eq!(registry.register(fiber(1,10.0)),Err(SpectrumError::DuplicateFiber{fiber:FiberId(1)}));
        assert_eq!(registry.len(),2);
        assert_eq!(registry.get(FiberId(1)).unwrap().length_km(),80.0);
        assert_eq!(registry.length_km(&[FiberId(1),FiberId(2)]).unwrap(),120.0);
        assert_eq!(registry.length_km(&[FiberId(3)]),Err(SpectrumError::UnknownFiber{fiber:FiberId(3)}));
    }
    #[test]
    fn test_registry_segments() {
        let registry:FiberRegistry = (1..=4).map(|id| fiber(id,50.0)).collect();
        let route = [FiberId(1),FiberId(2),FiberId(3),FiberId(4)];
        let segments = registry.regeneration_segments(&route,120.0).unwrap();
        assert_eq!(segments,vec![vec![FiberId(1),FiberId(2)],vec![FiberId(3),FiberId(4)]]);
    }
    #[test]
    fn test_with_bands() {
        let c = Fiber::with_bands(FiberId(9),&[Band::C],100.0).unwrap();
        assert_eq!(c.valid_slot_ids(),&ValidSlotSet::band(Band::C));
    }
}
