//! HTTP adapter for support endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, SubmitTurnRequest, TurnResponse, UserQuery};
pub use handlers::SupportAppState;
pub use routes::{support_router, support_routes};
