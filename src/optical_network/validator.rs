use std::collections::BTreeSet;
use std::fmt::Write;

use tracing::warn;

use super::error::{Result, SpectrumError};
use super::ids::{FiberId, LightpathId};
use super::ledger::{SlotOccupants, SpectrumLedger};
use super::slots::{SlotId, ValidSlotSet};

// two or more lightpaths on the same slot of the same fiber
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Clash {
    pub fiber:FiberId,
    pub slot:SlotId,
    pub occupants:BTreeSet<LightpathId>,
}

// first problem on one fiber: slots outside the valid set, then multiple occupants
fn fiber_violation(valid:&ValidSlotSet,occupation:&SlotOccupants) -> Option<String> {
    for (slot,occupants) in occupation.iter() {
        if !valid.contains(*slot) {
            return Some(format!("slot {slot} is outside the valid slot set"))
        }
        if occupants.len() != 1 {
            return Some(format!("slot {slot} has {} occupants",occupants.len()))
        }
    }
    None
}

impl SpectrumLedger {
    // sorted so the first violation reported is reproducible
    fn sorted_occupation(&self) -> Vec<(FiberId,&SlotOccupants)> {
        let mut occupation:Vec<_> = self.occupation()
            .map(|(fiber,slots)| (*fiber,slots))
            .collect();
        occupation.sort_unstable_by_key(|(fiber,_)| *fiber);
        occupation
    }

    /// `true` iff every occupied slot is valid on its fiber and holds exactly one lightpath.
    pub fn is_occupation_valid(&self) -> bool {
        self.occupation().all(|(fiber,occupation)| {
            fiber_violation(self.valid_slot_ids(*fiber),occupation).is_none()
        })
    }

    pub fn assert_occupation_valid(&self) -> Result<()> {
        for (fiber,occupation) in self.sorted_occupation() {
            if let Some(reason) = fiber_violation(self.valid_slot_ids(fiber),occupation) {
                warn!(%fiber, %reason, "spectrum occupation is invalid");
                return Err(SpectrumError::ConsistencyViolation{fiber,reason})
            }
        }
        Ok(())
    }

    pub fn clashes(&self) -> Vec<Clash> {
        let mut clashes = Vec::new();
        for (fiber,occupation) in self.sorted_occupation() {
            for (slot,occupants) in occupation.iter() {
                if occupants.len() > 1 {
                    clashes.push(Clash {fiber,slot:*slot,occupants:occupants.clone()});
                }
            }
        }
        clashes
    }

    /// Human readable occupation summary, busiest fiber first. Not meant to be parsed.
    pub fn report(&self) -> String {
        let mut rows:Vec<_> = self.sorted_occupation().into_iter().map(|(fiber,occupation)| {
            let lightpaths = occupation.values().flatten().collect::<BTreeSet<_>>().len();
            let clashing = occupation.values().any(|occupants| occupants.len() > 1);
            (fiber,occupation.len(),self.valid_slot_ids(fiber).len(),lightpaths,clashing)
        }).collect();
        // stable sort keeps ascending fiber ids among equal counts
        rows.sort_by(|a,b| b.1.cmp(&a.1));

        let mut text = String::new();
        for (fiber,occupied,capacity,lightpaths,clashing) in rows {
            // writing into a String cannot fail
            let _ = writeln!(
                text,
                "{fiber}: {occupied}/{capacity} slots occupied, {lightpaths} lightpaths, clash: {}",
                if clashing {"yes"} else {"no"}
            );
        }
        text
    }
}
