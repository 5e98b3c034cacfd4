#![deny(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Infrastructure adapters crate.

pub mod infra;
pub use infra::*;

pub mod common {
    pub use livegrid_common::common::*;
}

pub mod domain {
    pub use livegrid_domain::domain::*;
}

pub mod usecases {
    pub use livegrid_usecases::usecases::*;
}
