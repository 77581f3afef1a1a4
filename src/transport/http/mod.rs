pub mod router;
pub mod types;
pub mod handlers {
    pub mod display;
    pub mod health;
    pub mod rsvp;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
