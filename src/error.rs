//! Error types for DMA sound operations.

/// Errors returned by the fallible conversions of this crate.
///
/// The emulation itself never fails: protocol anomalies are reported
/// through [`Diagnostics`](crate::Diagnostics) and clamped to a safe value.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundError {
    /// Register index that does not name an architectural register
    #[error("Unknown sound register {0}")]
    UnknownRegister(u8),
}
