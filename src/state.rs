use crate::classify::{classify, Classification};
use crate::client::CalcClient;
use crate::input::InputError;
use crate::models::{EmissionsResult, StateResponse, UsageForm};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::Mutex;

pub const SUCCESS_MESSAGE: &str = "Emissions calculated successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to calculate. Check server.";

#[derive(Clone)]
pub struct AppState {
    pub region: String,
    pub client: CalcClient,
    pub page: Arc<Mutex<PageState>>,
    tickets: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(region: impl Into<String>, client: CalcClient) -> Self {
        Self {
            region: region.into(),
            client,
            page: Arc::new(Mutex::new(PageState::default())),
            tickets: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Reserves the ordering slot for a submission that is about to start.
    pub fn next_ticket(&self) -> u64 {
        self.tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns false when a later submission has already been applied.
    pub async fn apply(&self, ticket: u64, outcome: Outcome) -> bool {
        let mut page = self.page.lock().await;
        if ticket < page.ticket {
            return false;
        }
        let mut next = page.with_outcome(outcome);
        next.ticket = ticket;
        *page = next;
        true
    }
}

/// How a single submission ended.
#[derive(Debug, Clone)]
pub enum Outcome {
    Rejected {
        inputs: UsageForm,
        error: InputError,
    },
    Calculated {
        inputs: UsageForm,
        result: EmissionsResult,
        calculated_at: String,
    },
    Failed {
        inputs: UsageForm,
    },
}

/// Everything the calculator page displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub inputs: UsageForm,
    pub result: Option<EmissionsResult>,
    pub calculated_at: Option<String>,
    pub message: Option<String>,
    ticket: u64,
}

impl PageState {
    /// Next state after `outcome`. Only a successful calculation replaces the
    /// displayed result.
    pub fn with_outcome(&self, outcome: Outcome) -> PageState {
        match outcome {
            Outcome::Rejected { inputs, error } => PageState {
                inputs,
                message: Some(error.to_string()),
                ..self.clone()
            },
            Outcome::Calculated {
                inputs,
                result,
                calculated_at,
            } => PageState {
                inputs,
                result: Some(result.rounded()),
                calculated_at: Some(calculated_at),
                message: Some(SUCCESS_MESSAGE.to_string()),
                ticket: self.ticket,
            },
            Outcome::Failed { inputs } => PageState {
                inputs,
                message: Some(FAILURE_MESSAGE.to_string()),
                ..self.clone()
            },
        }
    }

    pub fn classification(&self) -> Option<Classification> {
        self.result.map(|result| classify(result.scope1, result.scope2))
    }

    pub fn to_response(&self) -> StateResponse {
        StateResponse {
            message: self.message.clone(),
            inputs: self.inputs.clone(),
            result: self.result,
            calculated_at: self.calculated_at.clone(),
            classification: self.classification(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Tier;

    fn inputs(kwh: &str) -> UsageForm {
        UsageForm {
            kwh: kwh.to_string(),
            ..UsageForm::default()
        }
    }

    fn calculated(scope1: f64, scope2: f64) -> Outcome {
        Outcome::Calculated {
            inputs: inputs("100"),
            result: EmissionsResult { scope1, scope2 },
            calculated_at: "2026-01-05 10:00:00".to_string(),
        }
    }

    #[test]
    fn fresh_page_has_no_result() {
        let page = PageState::default();
        assert!(page.result.is_none());
        assert!(page.classification().is_none());
        assert!(page.message.is_none());
    }

    #[test]
    fn rejection_sets_message_only() {
        let page = PageState::default().with_outcome(Outcome::Rejected {
            inputs: UsageForm::default(),
            error: InputError::Missing,
        });
        assert_eq!(
            page.message.as_deref(),
            Some("Please fill in at least one field.")
        );
        assert!(page.result.is_none());
    }

    #[test]
    fn success_rounds_and_classifies() {
        let page = PageState::default().with_outcome(calculated(10_000.04, 4_999.96));
        let result = page.result.unwrap();
        assert_eq!(result.scope1, 10_000.0);
        assert_eq!(result.scope2, 5_000.0);
        assert_eq!(page.message.as_deref(), Some(SUCCESS_MESSAGE));

        let classification = page.classification().unwrap();
        assert_eq!(classification.total_tons, 15.0);
        assert_eq!(classification.tier, Tier::APlus);
    }

    #[test]
    fn failure_keeps_previous_result() {
        let page = PageState::default().with_outcome(calculated(40_000.0, 40_000.0));
        let failed = page.with_outcome(Outcome::Failed {
            inputs: inputs("999"),
        });
        assert_eq!(failed.result, page.result);
        assert_eq!(failed.calculated_at, page.calculated_at);
        assert_eq!(failed.inputs.kwh, "999");
        assert_eq!(failed.message.as_deref(), Some(FAILURE_MESSAGE));
    }

    #[test]
    fn rejection_keeps_previous_result() {
        let page = PageState::default().with_outcome(calculated(40_000.0, 40_000.0));
        let rejected = page.with_outcome(Outcome::Rejected {
            inputs: UsageForm::default(),
            error: InputError::Missing,
        });
        assert_eq!(rejected.result, page.result);
    }

    #[tokio::test]
    async fn stale_submission_is_dropped() {
        let config = crate::config::Config::default();
        let state = AppState::new("Washington", CalcClient::new(&config).unwrap());

        let first = state.next_ticket();
        let second = state.next_ticket();
        assert!(state.apply(second, calculated(90_000.0, 100_000.0)).await);
        assert!(!state.apply(first, calculated(1.0, 1.0)).await);

        let page = state.page.lock().await;
        assert_eq!(page.classification().unwrap().tier, Tier::D);
    }
}
