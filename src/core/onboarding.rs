//! Onboarding panel on the home view, derived from product and campaign counts.

use crate::core::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    AddProduct,
    PlanCampaign,
    Launch,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 3] = [
        OnboardingStep::AddProduct,
        OnboardingStep::PlanCampaign,
        OnboardingStep::Launch,
    ];

    /// 1-based position shown in the panel.
    pub fn number(self) -> u8 {
        match self {
            OnboardingStep::AddProduct => 1,
            OnboardingStep::PlanCampaign => 2,
            OnboardingStep::Launch => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            OnboardingStep::AddProduct => "Add your product",
            OnboardingStep::PlanCampaign => "Plan your Campaign",
            OnboardingStep::Launch => "Launch and start making mrr",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OnboardingStep::AddProduct => {
                "Drop in your product details (name, problem it solves, features). \
                 The more context you give, the smarter your launch campaigns will be."
            }
            OnboardingStep::PlanCampaign => {
                "Pick your campaign type, add must-use keywords, and let us craft \
                 scroll-stopping posts for you."
            }
            OnboardingStep::Launch => {
                "Copy, paste, and post. Watch your launch turn into paying users."
            }
        }
    }

    pub fn button_label(self) -> Option<&'static str> {
        match self {
            OnboardingStep::AddProduct => Some("Add Product"),
            OnboardingStep::PlanCampaign => Some("Plan Campaign"),
            OnboardingStep::Launch => None,
        }
    }

    pub fn time_estimate(self) -> Option<&'static str> {
        match self {
            OnboardingStep::AddProduct => Some("<5 mins"),
            OnboardingStep::PlanCampaign => Some("<2 mins"),
            OnboardingStep::Launch => None,
        }
    }
}

/// What the onboarding panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingState {
    pub step: OnboardingStep,
    pub visible: bool,
}

impl OnboardingState {
    /// Derive the panel from the current counts.
    pub fn derive(products: usize, campaigns: usize) -> Self {
        match (products, campaigns) {
            (0, 0) => Self {
                step: OnboardingStep::AddProduct,
                visible: true,
            },
            (_, 0) => Self {
                step: OnboardingStep::PlanCampaign,
                visible: true,
            },
            (0, _) => Self {
                step: OnboardingStep::AddProduct,
                visible: false,
            },
            _ => Self {
                step: OnboardingStep::Launch,
                visible: false,
            },
        }
    }

    pub fn is_done(&self, step: OnboardingStep) -> bool {
        step.number() < self.step.number()
    }
}

/// Where a step's button leads. Step 2 targets the first product.
pub fn step_route(step: OnboardingStep, first_product_id: Option<&str>) -> Option<Route> {
    match step {
        OnboardingStep::AddProduct => Some(Route::ProductForm),
        OnboardingStep::PlanCampaign => {
            Some(Route::CampaignCreate(first_product_id.map(str::to_string)))
        }
        OnboardingStep::Launch => None,
    }
}
