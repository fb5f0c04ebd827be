use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::dsa::contiguous::longest_run;

use super::config::LedgerConfig;
use super::error::{Result, SpectrumError};
use super::fiber::{FiberRegistry, NetworkSnapshot};
use super::ids::{id_map, repeated_fiber, FiberId, IdMap, LightpathId};
use super::slots::{SlotId, ValidSlotSet};

pub type SlotOccupants = BTreeMap<SlotId,BTreeSet<LightpathId>>;
pub type LightpathResources = BTreeMap<FiberId,BTreeSet<SlotId>>;

static NO_OCCUPANTS:SlotOccupants = BTreeMap::new();
static NO_RESOURCES:LightpathResources = BTreeMap::new();
static NO_VALID_SLOTS:ValidSlotSet = ValidSlotSet::new();

/* two indices over the same (fiber,slot,lightpath) triples
lp in by_fiber[f][s] <=> s in by_lightpath[lp][f]
both are sparse: a fiber or lightpath key exists only while it holds something
only allocate and release touch them, each as one complete transaction */
#[derive(Clone,Debug,PartialEq)]
pub struct SpectrumLedger {
    config:LedgerConfig,
    fibers:FiberRegistry,
    by_fiber:IdMap<FiberId,SlotOccupants>,
    by_lightpath:IdMap<LightpathId,LightpathResources>,
}

impl SpectrumLedger {
    pub fn new(fibers:FiberRegistry) -> Self {
        Self::with_config(fibers,LedgerConfig::default())
    }

    pub fn with_config(fibers:FiberRegistry,config:LedgerConfig) -> Self {
        Self {config,fibers,by_fiber:id_map(),by_lightpath:id_map()}
    }

    /// Registers every fiber of the snapshot, then allocates its lightpaths in snapshot order.
    ///
    /// Returns the ledger together with the lightpaths whose allocation clashed.
    pub fn from_snapshot(snapshot:NetworkSnapshot,config:LedgerConfig) -> Result<(Self,Vec<LightpathId>)> {
        let mut fibers = FiberRegistry::new();
        for fiber in snapshot.fibers {
            fibers.register(fiber)?;
        }
        let mut ledger = Self::with_config(fibers,config);
        let mut clashed = Vec::new();
        for lightpath in snapshot.lightpaths.iter() {
            if ledger.allocate(lightpath.id,&lightpath.route,&lightpath.slots)? {
                clashed.push(lightpath.id);
            }
        }
        debug!(
            fibers = ledger.fibers.len(),
            lightpaths = ledger.by_lightpath.len(),
            clashed = clashed.len(),
            "loaded spectrum ledger from snapshot"
        );
        Ok((ledger,clashed))
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }
    pub fn fibers(&self) -> &FiberRegistry {
        &self.fibers
    }

    pub fn is_already_accounted(&self,lightpath:LightpathId) -> bool {
        self.by_lightpath.contains_key(&lightpath)
    }

    /// Records `lightpath` on every `(fiber, slot)` pair of `route × slots`.
    ///
    /// Returns `true` if any pair was already occupied. Clashes are recorded, not refused;
    /// [`SpectrumLedger::is_occupation_valid`] surfaces them later.
    pub fn allocate(&mut self,lightpath:LightpathId,route:&[FiberId],slots:&BTreeSet<SlotId>) -> Result<bool> {
        if self.is_already_accounted(lightpath) {
            return Err(SpectrumError::AlreadyAccounted{lightpath})
        }
        if route.is_empty() || slots.is_empty() {
            if self.config.reject_empty_requests {
                return Err(SpectrumError::EmptyRequest{lightpath})
            }
            debug!(%lightpath, "ignoring allocation without fibers or slots");
            return Ok(false)
        }
        if let Some(fiber) = repeated_fiber(route) {
            return Err(SpectrumError::RepeatedFiber{fiber})
        }

        let mut clashed = false;
        let mut resources = LightpathResources::new();
        for fiber in route {
            let occupation = self.by_fiber.entry(*fiber).or_default();
            for slot in slots {
                let occupants = occupation.entry(*slot).or_default();
                if !occupants.is_empty() {
                    clashed = true;
                }
                occupants.insert(lightpath);
            }
            resources.insert(*fiber,slots.clone());
        }
        self.by_lightpath.insert(lightpath,resources);

        if clashed {
            warn!(%lightpath, fibers = route.len(), slots = slots.len(), "allocation clashes with existing occupation");
        }else{
            debug!(%lightpath, fibers = route.len(), slots = slots.len(), "allocated lightpath");
        }

        if self.config.audit_bijection {
            self.assert_bijection();
        }
        Ok(clashed)
    }

    // no-op for lightpaths that are not accounted
    pub fn release(&mut self,lightpath:LightpathId) {
        let Some(resources) = self.by_lightpath.remove(&lightpath)
            else {return};

        for (fiber,slots) in resources.iter() {
            let Some(occupation) = self.by_fiber.get_mut(fiber)
                else {continue};
            for slot in slots {
                let Some(occupants) = occupation.get_mut(slot)
                    else {continue};
                occupants.remove(&lightpath);
                if occupants.is_empty() {
                    occupation.remove(slot);
                }
            }
            if occupation.is_empty() {
                self.by_fiber.remove(fiber);
            }
        }
        debug!(%lightpath, fibers = resources.len(), "released lightpath");

        if self.config.audit_bijection {
            self.assert_bijection();
        }
    }

    pub fn lightpath_resources(&self,lightpath:LightpathId) -> &LightpathResources {
        self.by_lightpath.get(&lightpath).unwrap_or(&NO_RESOURCES)
    }

    pub fn fiber_occupation(&self,fiber:FiberId) -> &SlotOccupants {
        self.by_fiber.get(&fiber).unwrap_or(&NO_OCCUPANTS)
    }

    // unregistered fibers have no valid slots
    pub fn valid_slot_ids(&self,fiber:FiberId) -> &ValidSlotSet {
        self.fibers.get(fiber).map(|f| f.valid_slot_ids()).unwrap_or(&NO_VALID_SLOTS)
    }

    pub fn occupied_slot_ids(&self,fiber:FiberId) -> BTreeSet<SlotId> {
        self.fiber_occupation(fiber).keys().copied().collect()
    }

    pub fn idle_slot_ids(&self,fiber:FiberId) -> BTreeSet<SlotId> {
        let occupation = self.fiber_occupation(fiber);
        self.valid_slot_ids(fiber).iter()
            .filter(|slot| !occupation.contains_key(*slot))
            .copied()
            .collect()
    }

    pub fn is_allocatable(&self,route:&[FiberId],slots:&BTreeSet<SlotId>) -> bool {
        if repeated_fiber(route).is_some() {
            return false;
        }
        route.iter().all(|fiber| {
            let valid = self.valid_slot_ids(*fiber);
            let occupation = self.fiber_occupation(*fiber);
            slots.iter().all(|slot| valid.contains(*slot) && !occupation.contains_key(slot))
        })
    }

    // slots idle on every fiber of the route
    pub fn available_slot_ids(&self,route:&[FiberId]) -> Result<BTreeSet<SlotId>> {
        let Some((first,rest)) = route.split_first()
            else {return Err(SpectrumError::EmptyRoute)};
        let mut available = self.idle_slot_ids(*first);
        for fiber in rest {
            if available.is_empty() {break}
            let occupation = self.fiber_occupation(*fiber);
            let valid = self.valid_slot_ids(*fiber);
            available.retain(|slot| valid.contains(*slot) && !occupation.contains_key(slot));
        }
        Ok(available)
    }

    pub fn lightpaths_on(&self,fiber:FiberId) -> BTreeSet<LightpathId> {
        self.fiber_occupation(fiber).values().flatten().copied().collect()
    }

    pub fn accounted_lightpaths(&self) -> BTreeSet<LightpathId> {
        self.by_lightpath.keys().copied().collect()
    }

    // fibers holding at least one occupied slot
    pub fn tracked_fibers(&self) -> BTreeSet<FiberId> {
        self.by_fiber.keys().copied().collect()
    }

    // share of the valid slots that are occupied, 0 for a fiber without capacity
    pub fn utilization(&self,fiber:FiberId) -> f64 {
        let valid = self.valid_slot_ids(fiber);
        if valid.is_empty() {return 0.0}
        let occupied = self.fiber_occupation(fiber).keys()
            .filter(|slot| valid.contains(**slot))
            .count();
        occupied as f64/valid.len() as f64
    }

    // 1 - largest idle block / idle slots
    // 0 when the idle spectrum is one block or there is none
    pub fn fragmentation(&self,fiber:FiberId) -> f64 {
        let idle = self.idle_slot_ids(fiber);
        if idle.is_empty() {return 0.0}
        1.0 - longest_run(&idle) as f64/idle.len() as f64
    }

    pub(crate) fn occupation(&self) -> impl Iterator<Item = (&FiberId,&SlotOccupants)> {
        self.by_fiber.iter()
    }

    pub(crate) fn bijection_holds(&self) -> bool {
        let forward = self.by_fiber.iter().all(|(fiber,occupation)| {
            !occupation.is_empty() && occupation.iter().all(|(slot,occupants)| {
                !occupants.is_empty() && occupants.iter().all(|lightpath| {
                    self.by_lightpath.get(lightpath)
                        .and_then(|resources| resources.get(fiber))
                        .is_some_and(|slots| slots.contains(slot))
                })
            })
        });
        let backward = self.by_lightpath.iter().all(|(lightpath,resources)| {
            !resources.is_empty() && resources.iter().all(|(fiber,slots)| {
                !slots.is_empty() && slots.iter().all(|slot| {
                    self.by_fiber.get(fiber)
                        .and_then(|occupation| occupation.get(slot))
                        .is_some_and(|occupants| occupants.contains(lightpath))
                })
            })
        });
        forward && backward
    }

    fn assert_bijection(&self) {
        if !self.bijection_holds() {
            panic!("fiber and lightpath occupation indices disagree")
        }
    }
}
