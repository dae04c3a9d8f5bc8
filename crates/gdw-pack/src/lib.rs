//! Size-bounded packing of fragments into deliverable units.
//!
//! Greedy and order-preserving: fragments accumulate into the current unit
//! while they fit, and a fragment that would overflow the limit closes the
//! unit and opens the next one. Fragments are never split mid-content; a
//! single fragment larger than the limit is handled by the configured
//! [`OverflowPolicy`]. Packing is fully deterministic.

pub mod packer;
pub mod unit;

pub use packer::{Packer, OverflowPolicy, TRUNCATION_MARKER};
pub use unit::Unit;
