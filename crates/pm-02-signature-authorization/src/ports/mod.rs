//! # Ports Layer
//!
//! - **Inbound (Driving)**: the authorizer API the access controller calls

pub mod inbound;
