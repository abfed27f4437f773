//! HTTP API
//!
//! | Route | Method | Body |
//! |-------|--------|------|
//! | `/api/moderate` | POST | `{"thread_url": "..."}` → `ModerationResult` |
//! | `/api/history` | GET | `?thread_url=&limit=` → `{"items": [...]}` |
//! | `/health` | GET | service status |
//!
//! Every error is `{"detail": "..."}` with a 4xx status for bad input and
//! 500 for internal failures.

mod cors;
mod error;
mod handlers;
mod router;
mod state;

pub use error::ApiError;
pub use handlers::{HistoryQuery, HistoryResponse, ModerateRequest};
pub use router::{build_router, serve};
pub use state::{ApiOptions, AppState};
