//! Top-level facade crate for gaugerelay.
//!
//! Re-exports the naming core and the reporter library so users can depend on a single crate.

pub mod core {
    pub use gaugerelay_core::*;
}

pub mod reporter {
    pub use gaugerelay_reporter::*;
}
