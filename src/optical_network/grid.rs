use lazy_static::lazy_static;

use super::slots::{SlotId, ValidSlotSet};

// flexgrid over the S+C+L bands
// slot 0 sits at the low frequency edge of the L band, ids grow with frequency

//unit in m/s
const C_SPEED_OF_LIGHT:f64 = 299792458.0;

type LenNM = f64;
pub type FreqTHZ = f64;

const S_BAND_WAVELENGTH_RANGE:(LenNM,LenNM) = (1460.0,1530.0);
const C_BAND_WAVELENGTH_RANGE:(LenNM,LenNM) = (1530.0,1565.0);
const L_BAND_WAVELENGTH_RANGE:(LenNM,LenNM) = (1565.0,1625.0);

// 12.5 GHz, the ITU-T G.694.1 flexgrid granularity
pub const SLOT_WIDTH_THZ:FreqTHZ = 0.0125;

#[derive(Clone,Copy,Debug,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub enum Band {
    S,
    C,
    L,
}

impl Band {
    fn wavelength_range(self) -> (LenNM,LenNM) {
        match self {
            Band::S => S_BAND_WAVELENGTH_RANGE,
            Band::C => C_BAND_WAVELENGTH_RANGE,
            Band::L => L_BAND_WAVELENGTH_RANGE,
        }
    }
}

fn to_wavelength(freq:FreqTHZ) -> LenNM {
    C_SPEED_OF_LIGHT/freq/1e3
}

lazy_static! {
    static ref slot_center_freqs:Vec<FreqTHZ> = {
        let start_freq = C_SPEED_OF_LIGHT/(L_BAND_WAVELENGTH_RANGE.1)/1e3;
        let end_freq = C_SPEED_OF_LIGHT/(S_BAND_WAVELENGTH_RANGE.0)/1e3;
        let slot_len = ((end_freq - start_freq)/SLOT_WIDTH_THZ) as usize;

        let mut slots = Vec::with_capacity(slot_len);
        for i in 0..slot_len {
            slots.push(start_freq + SLOT_WIDTH_THZ/2.0 + SLOT_WIDTH_THZ*i as f64)
        }
        slots
    };

    // band_slots[0] is S, [1] is C, [2] is L
    static ref band_slots:[ValidSlotSet;3] = {
        let mut sets:[Vec<SlotId>;3] = Default::default();
        for (id,freq) in slot_center_freqs.iter().enumerate() {
            let Some(band) = classify(*freq) else {continue};
            sets[band_index(band)].push(id as SlotId);
        }
        sets.map(ValidSlotSet::from_iter)
    };
}

fn band_index(band:Band) -> usize {
    match band {
        Band::S => 0,
        Band::C => 1,
        Band::L => 2,
    }
}

fn classify(freq:FreqTHZ) -> Option<Band> {
    let lambda = to_wavelength(freq);
    [Band::S,Band::C,Band::L].into_iter().find(|band| {
        let (low,high) = band.wavelength_range();
        lambda >= low && lambda <= high
    })
}

pub fn slot_count() -> usize {
    slot_center_freqs.len()
}

pub fn center_frequency_thz(slot:SlotId) -> Option<FreqTHZ> {
    slot_center_freqs.get(slot as usize).copied()
}

pub fn band_of(slot:SlotId) -> Option<Band> {
    classify(center_frequency_thz(slot)?)
}

pub(crate) fn slots_of(band:Band) -> &'static ValidSlotSet {
    &band_slots[band_index(band)]
}
