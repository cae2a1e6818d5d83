pub mod combinations;
pub mod error;
pub mod event;
pub mod model;
pub mod space;

pub use combinations::{Combinations, combination_count};
pub use error::EventError;
pub use event::{Event, INDEPENDENCE_TOLERANCE};
pub use model::{Outcome, ProbabilityModel};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "probspace"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
