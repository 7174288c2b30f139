//! Application services for marketplace lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    ErrorKind, LifecycleError, LifecycleResult, MarketplaceService, PostTaskRequest,
    SubmitBidRequest,
};
