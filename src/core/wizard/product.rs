use std::fmt;

use super::{StepOutcome, SubmitGuard};
use crate::core::models::ProductInfo;

pub const REQUIRED_FIELD_MESSAGE: &str = "This field is required.";
pub const PRODUCT_FAILURE_MESSAGE: &str = "Failed to create product. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductStep {
    BrandName,
    Problem,
    Features,
    Audience,
}

impl ProductStep {
    pub const ALL: [ProductStep; 4] = [
        ProductStep::BrandName,
        ProductStep::Problem,
        ProductStep::Features,
        ProductStep::Audience,
    ];

    pub fn next(self) -> Option<Self> {
        match self {
            ProductStep::BrandName => Some(ProductStep::Problem),
            ProductStep::Problem => Some(ProductStep::Features),
            ProductStep::Features => Some(ProductStep::Audience),
            ProductStep::Audience => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            ProductStep::BrandName => None,
            ProductStep::Problem => Some(ProductStep::BrandName),
            ProductStep::Features => Some(ProductStep::Problem),
            ProductStep::Audience => Some(ProductStep::Features),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Question shown above the input.
    pub fn label(self) -> &'static str {
        match self {
            ProductStep::BrandName => "What's your brand/product name?",
            ProductStep::Problem => "What problem does it solve?",
            ProductStep::Features => "Top 3 features (one per line)",
            ProductStep::Audience => "Who is your target audience?",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ProductStep::BrandName => "e.g. LaunchBot",
            ProductStep::Problem => {
                "Crafting winning product launch campaigns without hours of research"
            }
            ProductStep::Features => {
                "e.g.\nAutomated social posts\nLaunch tracking\nCommunity engagement"
            }
            ProductStep::Audience => "e.g. SaaS founders",
        }
    }

    /// Multi-line steps take Enter as a newline.
    pub fn is_multiline(self) -> bool {
        matches!(self, ProductStep::Problem | ProductStep::Features)
    }
}

impl fmt::Display for ProductStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProductStep::BrandName => "brand name",
            ProductStep::Problem => "problem",
            ProductStep::Features => "features",
            ProductStep::Audience => "audience",
        };
        f.write_str(name)
    }
}

/// State of the product creation wizard.
#[derive(Debug, Clone, Default)]
pub struct ProductWizard {
    step_index: usize,
    answers: [String; 4],
    error: Option<String>,
    guard: SubmitGuard,
}

impl ProductWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> ProductStep {
        ProductStep::ALL[self.step_index]
    }

    pub fn answer(&self, step: ProductStep) -> &str {
        &self.answers[step.index()]
    }

    pub fn current_answer(&self) -> &str {
        self.answer(self.step())
    }

    /// Replace the current step's answer. Clears any visible error.
    pub fn set_answer(&mut self, value: impl Into<String>) {
        self.answers[self.step_index] = value.into();
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.guard.in_flight()
    }

    pub fn is_last_step(&self) -> bool {
        self.step().next().is_none()
    }

    pub fn next(&mut self) -> StepOutcome<ProductInfo> {
        if self.guard.in_flight() {
            return StepOutcome::Busy;
        }
        if self.current_answer().trim().is_empty() {
            self.error = Some(REQUIRED_FIELD_MESSAGE.to_string());
            return StepOutcome::Blocked(REQUIRED_FIELD_MESSAGE.to_string());
        }
        self.error = None;

        match self.step().next() {
            Some(next) => {
                self.step_index = next.index();
                StepOutcome::Advanced
            }
            None => {
                self.guard.begin();
                StepOutcome::Submit(self.to_info())
            }
        }
    }

    /// Returns `false` on the first step.
    pub fn back(&mut self) -> bool {
        if self.guard.in_flight() {
            return false;
        }
        match self.step().previous() {
            Some(prev) => {
                self.step_index = prev.index();
                self.error = None;
                true
            }
            None => false,
        }
    }

    pub fn submit_succeeded(&mut self) {
        self.guard.finish();
    }

    /// Stay on the last step with the generic failure message.
    pub fn submit_failed(&mut self) {
        self.guard.finish();
        self.error = Some(PRODUCT_FAILURE_MESSAGE.to_string());
    }

    fn to_info(&self) -> ProductInfo {
        ProductInfo {
            brand_name: self.answer(ProductStep::BrandName).trim().to_string(),
            problem_it_solves: self.answer(ProductStep::Problem).trim().to_string(),
            features: self.answer(ProductStep::Features).trim().to_string(),
            audience: self.answer(ProductStep::Audience).trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(wizard: &mut ProductWizard) -> StepOutcome<ProductInfo> {
        let answers = ["LaunchBot", "Slow launches", "Posts\nTracking", "Founders"];
        let mut outcome = StepOutcome::Advanced;
        for answer in answers {
            wizard.set_answer(answer);
            outcome = wizard.next();
        }
        outcome
    }

    #[test]
    fn test_step_order() {
        let mut step = ProductStep::BrandName;
        let mut seen = vec![step];
        while let Some(next) = step.next() {
            seen.push(next);
            step = next;
        }
        assert_eq!(seen, ProductStep::ALL.to_vec());
        assert_eq!(ProductStep::Audience.previous(), Some(ProductStep::Features));
        assert_eq!(ProductStep::BrandName.previous(), None);
    }

    #[test]
    fn test_whitespace_answer_blocks() {
        let mut wizard = ProductWizard::new();
        wizard.set_answer("   ");
        let outcome = wizard.next();
        assert_eq!(outcome, StepOutcome::Blocked(REQUIRED_FIELD_MESSAGE.to_string()));
        assert_eq!(wizard.step(), ProductStep::BrandName);
        assert_eq!(wizard.error(), Some(REQUIRED_FIELD_MESSAGE));

        wizard.set_answer("L");
        assert!(wizard.error().is_none());
    }

    #[test]
    fn test_back_clears_error() {
        let mut wizard = ProductWizard::new();
        wizard.set_answer("LaunchBot");
        wizard.next();
        wizard.next();
        assert!(wizard.error().is_some());
        assert!(wizard.back());
        assert_eq!(wizard.step(), ProductStep::BrandName);
        assert!(wizard.error().is_none());
        assert_eq!(wizard.current_answer(), "LaunchBot");
        assert!(!wizard.back());
    }

    #[test]
    fn test_final_step_submits_payload() {
        let mut wizard = ProductWizard::new();
        let outcome = fill(&mut wizard);
        let StepOutcome::Submit(info) = outcome else {
            panic!("expected submit, got {outcome:?}");
        };
        assert_eq!(info.brand_name, "LaunchBot");
        assert_eq!(info.features, "Posts\nTracking");
        assert!(wizard.is_submitting());
        assert_eq!(wizard.next(), StepOutcome::Busy);
    }

    #[test]
    fn test_failure_leaves_user_on_last_step() {
        let mut wizard = ProductWizard::new();
        fill(&mut wizard);
        wizard.submit_failed();
        assert_eq!(wizard.step(), ProductStep::Audience);
        assert_eq!(wizard.error(), Some(PRODUCT_FAILURE_MESSAGE));
        assert!(!wizard.is_submitting());
        assert!(matches!(wizard.next(), StepOutcome::Submit(_)));
    }
}
