//! Multi-step creation wizards.
//!
//! Both wizards are linear state machines over an explicit step enum. `next`
//! validates the current step and either advances, blocks with a visible
//! error, or on the last step hands back the request to submit. Submission is
//! guarded so a second request cannot start while one is in flight.

mod campaign;
mod product;

pub use campaign::{
    parse_keywords, CampaignStep, CampaignWizard, CAMPAIGN_FAILURE_MESSAGE,
    MISSING_PRODUCT_MESSAGE, NO_CHANNEL_MESSAGE, NO_LAUNCH_TYPE_MESSAGE, NO_TONE_MESSAGE,
};
pub use product::{ProductStep, ProductWizard, PRODUCT_FAILURE_MESSAGE, REQUIRED_FIELD_MESSAGE};

/// Result of pressing "next".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome<R> {
    /// Moved to the following step.
    Advanced,
    /// Validation failed; the message is also stored as the wizard's error.
    Blocked(String),
    /// Final step validated; send this request. The wizard is now submitting.
    Submit(R),
    /// A submission is already in flight.
    Busy,
}

impl<R> StepOutcome<R> {
    pub fn is_blocked(&self) -> bool {
        matches!(self, StepOutcome::Blocked(_))
    }
}

/// Duplicate-submission guard shared by the wizards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SubmitGuard {
    in_flight: bool,
}

impl SubmitGuard {
    /// Returns `false` if a submission is already running.
    pub(crate) fn begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub(crate) fn finish(&mut self) {
        self.in_flight = false;
    }

    pub(crate) fn in_flight(&self) -> bool {
        self.in_flight
    }
}
