//! Peripheral fault type
//!
//! Every hardware call made on behalf of the application can fail with an
//! [`IoFault`]. Faults are logged where they happen and never travel further
//! up than the mapper or the lifecycle code.

/// I/O fault from a peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoFault {
    /// GPIO line could not be driven or read
    Gpio,
    /// Bus error while talking to a device
    Bus,
    /// Device did not acknowledge
    Nack,
    /// Resource is missing, already taken or already released
    Unavailable,
}
