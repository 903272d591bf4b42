//! Product enrichment chat: transcript state, milestone progress and skip.

mod milestones;
mod session;
mod skip;

pub use milestones::{MilestoneParseError, Milestones, INITIAL_PROGRESS};
pub use session::{ChatSession, DeliveryStatus, TranscriptEntry, SEND_FAILURE_MESSAGE};
pub use skip::{
    failure_message as skip_failure_message, skip, SkipOutcome, SKIP_FALLBACK_MESSAGE,
    SKIP_NOT_FOUND_MESSAGE, SKIP_SUCCESS_MESSAGE, SKIP_TOO_EARLY_MESSAGE,
};
