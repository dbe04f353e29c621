//! Wire types for the observation middleware.
//!
//! The prost/tonic stub is generated from `observer.proto` and checked in as
//! source so builds do not need protoc. Regenerate with `tonic-build` if the
//! schema changes.

pub mod observer {
    pub mod v1 {
        include!("observer.v1.rs");
    }
}

pub use observer::v1::{ObservationReply, ObservationRequest};
