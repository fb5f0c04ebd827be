use thiserror::Error;

use super::ids::{FiberId, LightpathId};
use super::slots::SlotId;

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum ErrorKind {
    // malformed input
    InvalidRequest,
    // structurally impossible request
    UnsatisfiableAllocation,
    // only raised when a caller explicitly validates the ledger
    ConsistencyViolation,
}

#[derive(Error,Debug,Clone,PartialEq)]
pub enum SpectrumError {
    #[error("{lightpath} is already accounted, release it before allocating again")]
    AlreadyAccounted{lightpath:LightpathId},
    #[error("at least one fiber is required")]
    EmptyRoute,
    #[error("allocation of {lightpath} has no fibers or no slots")]
    EmptyRequest{lightpath:LightpathId},
    #[error("slot range end {end} is below its start {start}")]
    InvertedSlotRange{start:SlotId,end:SlotId},
    #[error("{fiber} has length {length_km} km, lengths must be finite and non negative")]
    InvalidLength{fiber:FiberId,length_km:f64},
    #[error("reach budget {budget_km} km must be finite and non negative")]
    InvalidBudget{budget_km:f64},
    #[error("{fiber} is not registered")]
    UnknownFiber{fiber:FiberId},
    #[error("{fiber} is already registered")]
    DuplicateFiber{fiber:FiberId},
    #[error("{fiber} appears more than once in the same route")]
    RepeatedFiber{fiber:FiberId},
    #[error("{fiber} is {length_km} km long, beyond the {budget_km} km reach")]
    FiberExceedsReach{fiber:FiberId,length_km:f64,budget_km:f64},
    #[error("no contiguous block of {width} idle slots for {lightpath}")]
    NoSpectrum{lightpath:LightpathId,width:u32},
    #[error("occupation of {fiber} is invalid: {reason}")]
    ConsistencyViolation{fiber:FiberId,reason:String},
}

impl SpectrumError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyAccounted{..}
            | Self::EmptyRoute
            | Self::EmptyRequest{..}
            | Self::InvertedSlotRange{..}
            | Self::InvalidLength{..}
            | Self::InvalidBudget{..}
            | Self::UnknownFiber{..}
            | Self::DuplicateFiber{..} => ErrorKind::InvalidRequest,
            Self::RepeatedFiber{..}
            | Self::FiberExceedsReach{..}
            | Self::NoSpectrum{..} => ErrorKind::UnsatisfiableAllocation,
            Self::ConsistencyViolation{..} => ErrorKind::ConsistencyViolation,
        }
    }
}

pub type Result<T> = std::result::Result<T,SpectrumError>;
