// first fit spectrum assignment over the ledger
// a lightpath needs the same contiguous block on every fiber it crosses
// (no wavelength conversion), so candidates are the slots idle on all of them

use std::collections::BTreeSet;

use tracing::trace;

use crate::dsa::contiguous::{block, block_starts};

use super::error::{Result, SpectrumError};
use super::ids::{repeated_fiber, FiberId, LightpathId};
use super::ledger::SpectrumLedger;
use super::slots::SlotId;

pub type SlotBlock = BTreeSet<SlotId>;

impl SpectrumLedger {
    /// Lowest contiguous block of `width` slots idle on every fiber of `route`.
    ///
    /// Ids below `min_start` are not considered. Returns `None` for an empty route,
    /// a route crossing the same fiber twice, or `width == 0`.
    pub fn first_fit(&self,route:&[FiberId],width:u32,min_start:Option<SlotId>) -> Option<SlotBlock> {
        if width == 0 || repeated_fiber(route).is_some() {
            return None;
        }
        let mut candidates = self.available_slot_ids(route).ok()?;
        if let Some(min_start) = min_start {
            candidates = candidates.split_off(&min_start);
        }
        if candidates.len() < width as usize {
            trace!(width, candidates = candidates.len(), "not enough idle slots for first fit");
            return None;
        }
        let start = block_starts(&candidates,width).next()?;
        trace!(start, width, "first fit block found");
        Some(block(start,width))
    }

    /// First fit for two routes at once, e.g. a working and a backup path.
    ///
    /// Fiber disjoint routes are searched independently and may get overlapping ids.
    /// Routes sharing a fiber get non overlapping blocks: the first `(start_a, start_b)`
    /// in a nested ascending scan with `|start_a - start_b| >= width`.
    pub fn first_fit_two_routes(&self,route_a:&[FiberId],route_b:&[FiberId],width:u32) -> Option<(SlotBlock,SlotBlock)> {
        if width == 0 || repeated_fiber(route_a).is_some() || repeated_fiber(route_b).is_some() {
            return None;
        }
        let shares_fiber = route_a.iter().any(|fiber| route_b.contains(fiber));
        if !shares_fiber {
            let block_a = self.first_fit(route_a,width,None)?;
            let block_b = self.first_fit(route_b,width,None)?;
            return Some((block_a,block_b));
        }

        // sharing a fiber means neither route is empty
        let valid_a = self.available_slot_ids(route_a).ok()?;
        let valid_b = self.available_slot_ids(route_b).ok()?;
        for start_a in block_starts(&valid_a,width) {
            let start_b = block_starts(&valid_b,width)
                .find(|start_b| start_a.abs_diff(*start_b) >= width);
            if let Some(start_b) = start_b {
                trace!(start_a, start_b, width, "two route first fit found");
                return Some((block(start_a,width),block(start_b,width)));
            }
        }
        None
    }

    /// Runs [`SpectrumLedger::first_fit`] and allocates the block it finds to `lightpath`.
    pub fn assign_first_fit(&mut self,lightpath:LightpathId,route:&[FiberId],width:u32,min_start:Option<SlotId>) -> Result<SlotBlock> {
        if self.is_already_accounted(lightpath) {
            return Err(SpectrumError::AlreadyAccounted{lightpath})
        }
        if route.is_empty() {
            return Err(SpectrumError::EmptyRoute)
        }
        if let Some(fiber) = repeated_fiber(route) {
            return Err(SpectrumError::RepeatedFiber{fiber})
        }
        let slots = self.first_fit(route,width,min_start)
            .ok_or(SpectrumError::NoSpectrum{lightpath,width})?;
        self.allocate(lightpath,route,&slots)?;
        Ok(slots)
    }
}
