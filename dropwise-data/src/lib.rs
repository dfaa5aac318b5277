//! Adapters connecting the dropwise core to external services.
//!
//! Responsibilities:
//! - Implement the core service traits over HTTP.
//! - Decode service wire formats into core types.
//!
//! Boundaries:
//! - Do not encode ranking or session rules (live in `dropwise-core`).
//! - Use async-capable clients only; never block an executor.
//!
//! Invariants:
//! - Services are `Send + Sync` and may be shared between sessions.
//! - No global mutable state.

pub mod routing;

pub use routing::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_USER_AGENT, OsrmRouteService, OsrmServiceConfig,
    OsrmTravelTimeService, ProviderBuildError,
};
