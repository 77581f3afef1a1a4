pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::submission::{SubmissionError, SubmissionResult, SubmissionService};
pub use domain::model::{
    DeviceClass, EventDetails, NewRsvp, PassReference, RsvpDisplay, RsvpRecord, RsvpResponse,
};
pub use domain::pass::{IssuanceError, PassIssuer, PassPayload};
pub use domain::verify::TokenVerifier;
pub use storage::memory::InMemoryRsvpStore;
pub use storage::postgres::PostgresRsvpStore;
pub use storage::store::{ResponseStore, StoreError};
