#![deny(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod adapters;
mod app;

pub use app::Application;

pub(crate) mod common {
    pub use livegrid_common::common::*;
}

pub(crate) mod domain {
    pub use livegrid_domain::domain::*;
}

pub(crate) mod usecases {
    pub use livegrid_usecases::usecases::*;
}

pub(crate) mod infra {
    pub use livegrid_infra::infra::*;
}
