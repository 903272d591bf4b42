use std::fmt;

use super::{StepOutcome, SubmitGuard};
use crate::core::models::{Channel, GenerateCampaignRequest, LaunchType, Tone};

pub const NO_CHANNEL_MESSAGE: &str = "Please select at least one channel.";
pub const NO_LAUNCH_TYPE_MESSAGE: &str = "Please select a launch type.";
pub const NO_TONE_MESSAGE: &str = "Please select a preferred tone.";
pub const MISSING_PRODUCT_MESSAGE: &str = "Product ID is missing. Start from one of your products.";
pub const CAMPAIGN_FAILURE_MESSAGE: &str = "Failed to generate campaign. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignStep {
    Channels,
    LaunchType,
    Tone,
    Keywords,
}

impl CampaignStep {
    pub const ALL: [CampaignStep; 4] = [
        CampaignStep::Channels,
        CampaignStep::LaunchType,
        CampaignStep::Tone,
        CampaignStep::Keywords,
    ];

    /// Number of segments in the progress bar.
    pub const SEGMENTS: usize = 3;

    pub fn next(self) -> Option<Self> {
        match self {
            CampaignStep::Channels => Some(CampaignStep::LaunchType),
            CampaignStep::LaunchType => Some(CampaignStep::Tone),
            CampaignStep::Tone => Some(CampaignStep::Keywords),
            CampaignStep::Keywords => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            CampaignStep::Channels => None,
            CampaignStep::LaunchType => Some(CampaignStep::Channels),
            CampaignStep::Tone => Some(CampaignStep::LaunchType),
            CampaignStep::Keywords => Some(CampaignStep::Tone),
        }
    }

    /// Progress segment lit up by this step. Tone and keywords share the last.
    pub fn segment(self) -> usize {
        match self {
            CampaignStep::Channels => 0,
            CampaignStep::LaunchType => 1,
            CampaignStep::Tone | CampaignStep::Keywords => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CampaignStep::Channels => "Select channels",
            CampaignStep::LaunchType => "Select launch type",
            CampaignStep::Tone => "Preferred tone",
            CampaignStep::Keywords => "Keywords",
        }
    }
}

impl fmt::Display for CampaignStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Split comma separated keywords, trimming and dropping empties.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// State of the campaign generation wizard.
#[derive(Debug, Clone)]
pub struct CampaignWizard {
    product_id: Option<String>,
    step: CampaignStep,
    channels: Vec<Channel>,
    launch_type: Option<LaunchType>,
    tone: Option<Tone>,
    keywords: String,
    error: Option<String>,
    guard: SubmitGuard,
}

impl CampaignWizard {
    /// `product_id` comes from the route and may be missing.
    pub fn new(product_id: Option<String>) -> Self {
        Self {
            product_id: product_id.filter(|id| !id.trim().is_empty()),
            step: CampaignStep::Channels,
            channels: Vec::new(),
            launch_type: None,
            tone: None,
            keywords: String::new(),
            error: None,
            guard: SubmitGuard::default(),
        }
    }

    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    pub fn step(&self) -> CampaignStep {
        self.step
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn is_selected(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }

    pub fn launch_type(&self) -> Option<LaunchType> {
        self.launch_type
    }

    pub fn tone(&self) -> Option<Tone> {
        self.tone
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.guard.in_flight()
    }

    /// Select or deselect a channel, keeping selection order.
    pub fn toggle_channel(&mut self, channel: Channel) {
        if let Some(pos) = self.channels.iter().position(|c| *c == channel) {
            self.channels.remove(pos);
        } else {
            self.channels.push(channel);
        }
        self.error = None;
    }

    pub fn select_launch_type(&mut self, launch_type: LaunchType) {
        self.launch_type = Some(launch_type);
        self.error = None;
    }

    pub fn select_tone(&mut self, tone: Tone) {
        self.tone = Some(tone);
        self.error = None;
    }

    pub fn set_keywords(&mut self, raw: impl Into<String>) {
        self.keywords = raw.into();
    }

    pub fn next(&mut self) -> StepOutcome<GenerateCampaignRequest> {
        if self.guard.in_flight() {
            return StepOutcome::Busy;
        }
        if let Err(message) = self.validate_current() {
            self.error = Some(message.to_string());
            return StepOutcome::Blocked(message.to_string());
        }
        self.error = None;

        if let Some(next) = self.step.next() {
            self.step = next;
            return StepOutcome::Advanced;
        }

        match self.to_request() {
            Some(request) => {
                self.guard.begin();
                StepOutcome::Submit(request)
            }
            None => {
                self.error = Some(MISSING_PRODUCT_MESSAGE.to_string());
                StepOutcome::Blocked(MISSING_PRODUCT_MESSAGE.to_string())
            }
        }
    }

    pub fn back(&mut self) -> bool {
        if self.guard.in_flight() {
            return false;
        }
        match self.step.previous() {
            Some(prev) => {
                self.step = prev;
                self.error = None;
                true
            }
            None => false,
        }
    }

    pub fn submit_succeeded(&mut self) {
        self.guard.finish();
    }

    pub fn submit_failed(&mut self) {
        self.guard.finish();
        self.error = Some(CAMPAIGN_FAILURE_MESSAGE.to_string());
    }

    fn validate_current(&self) -> Result<(), &'static str> {
        match self.step {
            CampaignStep::Channels if self.channels.is_empty() => Err(NO_CHANNEL_MESSAGE),
            CampaignStep::LaunchType if self.launch_type.is_none() => Err(NO_LAUNCH_TYPE_MESSAGE),
            CampaignStep::Tone if self.tone.is_none() => Err(NO_TONE_MESSAGE),
            CampaignStep::Keywords if self.product_id.is_none() => Err(MISSING_PRODUCT_MESSAGE),
            _ => Ok(()),
        }
    }

    fn to_request(&self) -> Option<GenerateCampaignRequest> {
        self.product_id.as_ref()?;
        Some(GenerateCampaignRequest {
            selected_channels: self.channels.clone(),
            launch_type: self.launch_type?,
            keywords: parse_keywords(&self.keywords),
            tone: self.tone,
        })
    }
}
