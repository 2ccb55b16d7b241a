//! HTTP adapter for counseling endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChatRequest, DefaultMessageResponse, ErrorResponse, StatusResponse, UtteranceResponse,
};
pub use handlers::CounselingHandlers;
pub use routes::counseling_routes;
