//! Top-level facade crate for faultline.
//!
//! Re-exports the policy core and the axum host integration so users can depend on a single crate.

pub mod core {
    pub use faultline_core::*;
}

pub mod web {
    pub use faultline_web::*;
}
