//! Frequency slot bookkeeping for WDM optical networks.
//!
//! [`SpectrumLedger`] records which slots each lightpath occupies on each fiber,
//! reports clashes, and finds free spectrum with first fit.
//! [`regeneration_segments`] splits a route where optical reach runs out.

mod dsa;
pub mod optical_network;

pub use optical_network::*;
