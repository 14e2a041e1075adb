//! Device enumeration adapters

mod cpal_enumerator;

pub use cpal_enumerator::CpalDeviceEnumerator;
