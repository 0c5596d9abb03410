//! Budget check run after every successful expense insert.
//!
//! When a limit is configured and the grand total is strictly above it, an
//! alert is dispatched. There is no cooldown: every insert while over budget
//! produces another attempt.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::database::Db;
use crate::error::ApiError;
use crate::notifier::{DispatchOutcome, EmailDispatcher};
use crate::spending::grand_total;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetCheck {
    Disabled,
    WithinLimit { total: f64, limit: f64 },
    Exceeded { total: f64, limit: f64 },
}

impl BudgetCheck {
    /// Strict comparison: a total equal to the limit is still within it.
    pub fn classify(total: f64, limit: f64) -> Self {
        if total > limit {
            BudgetCheck::Exceeded { total, limit }
        } else {
            BudgetCheck::WithinLimit { total, limit }
        }
    }
}

#[derive(Debug, Clone)]
pub struct BudgetGuard {
    limit: Option<f64>,
    dispatcher: Arc<EmailDispatcher>,
}

impl BudgetGuard {
    /// Limits that are not finite and positive disable checking.
    pub fn new(limit: Option<f64>, dispatcher: Arc<EmailDispatcher>) -> Self {
        let limit = limit.filter(|l| l.is_finite() && *l > 0.0);
        Self { limit, dispatcher }
    }

    pub fn limit(&self) -> Option<f64> {
        self.limit
    }

    pub fn is_enabled(&self) -> bool {
        self.limit.is_some()
    }

    pub async fn evaluate(&self, db: &Db) -> Result<BudgetCheck, ApiError> {
        let Some(limit) = self.limit else {
            return Ok(BudgetCheck::Disabled);
        };

        let total = grand_total(db).await?;
        Ok(BudgetCheck::classify(total, limit))
    }

    /// Evaluates the budget and, if exceeded, sends the alert.
    ///
    /// Returns `None` when no alert was attempted. Errors are logged here and
    /// never reach the caller.
    pub async fn check_and_notify(&self, db: &Db) -> Option<DispatchOutcome> {
        match self.evaluate(db).await {
            Ok(BudgetCheck::Disabled) => None,
            Ok(BudgetCheck::WithinLimit { total, limit }) => {
                tracing::debug!(total, limit, "current spending within budget");
                None
            }
            Ok(BudgetCheck::Exceeded { total, limit }) => {
                tracing::info!(total, limit, "budget exceeded, sending alert");
                Some(self.dispatcher.send_budget_alert(total, limit).await)
            }
            Err(err) => {
                tracing::error!("budget check failed: {err}");
                None
            }
        }
    }

    /// Runs [`check_and_notify`](Self::check_and_notify) on a detached task.
    ///
    /// Request handlers drop the handle; it is returned for callers that want
    /// to observe the outcome.
    pub fn spawn_check(&self, db: Db) -> Option<JoinHandle<Option<DispatchOutcome>>> {
        if !self.is_enabled() {
            return None;
        }

        let guard = self.clone();
        Some(tokio::spawn(async move { guard.check_and_notify(&db).await }))
    }
}
