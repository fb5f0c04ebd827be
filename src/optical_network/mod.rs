// spectrum occupancy of a wdm optical network
// tracks which frequency slots every lightpath holds on every fiber it crosses
// and searches free spectrum for new lightpaths with first fit

/* rules, suppose a lightpath takes slots 5..=8 and goes through fibers A->B->C
then A[5..=8] B[5..=8] C[5..=8] are all occupied by it
the same slot ids must be used on every traversed fiber (no wavelength conversion)
this is called the spectrum continuity constraint, and contiguous ids the contiguity constraint
two lightpaths on the same slot of the same fiber is a clash, tolerated until validated */

pub mod config;
pub mod error;
pub mod fiber;
pub mod first_fit;
pub mod grid;
pub mod ids;
pub mod ledger;
pub mod regeneration;
pub mod slots;
pub mod validator;

pub use config::LedgerConfig;
pub use error::{ErrorKind, Result, SpectrumError};
pub use fiber::{DistanceKM, Fiber, FiberRegistry, Lightpath, NetworkSnapshot};
pub use first_fit::SlotBlock;
pub use grid::Band;
pub use ids::{FiberId, LightpathId};
pub use ledger::{LightpathResources, SlotOccupants, SpectrumLedger};
pub use regeneration::{regeneration_segments, FiberLength};
pub use slots::{SlotId, ValidSlotSet};
pub use validator::Clash;
