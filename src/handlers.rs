use crate::errors::{ClientError, ViewError};
use crate::models::{ApiResult, NameQuery, RecordSubmission};
use crate::notice::Severity;
use crate::page::{Content, SHOW_CLASS, ids};
use crate::state::ViewController;
use tracing::{debug, error, info, warn};

/// How one trigger of an interaction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Validation failed; no request was sent.
    Rejected,
    Shown,
    Failed,
    /// A newer trigger of the same interaction took over.
    Superseded,
}

impl ViewController {
    pub async fn switch_tab(&self, tab: &str, trigger: &str) -> Result<(), ViewError> {
        self.page.lock().await.switch_tab(tab, trigger)
    }

    pub async fn set_value(&self, id: &str, value: &str) -> Result<(), ViewError> {
        self.page.lock().await.set_value(id, value)
    }

    pub async fn text_content(&self, id: &str) -> Result<String, ViewError> {
        Ok(self.page.lock().await.element(id)?.text_content())
    }

    pub async fn show_message(&self, id: &str, message: &str, severity: Severity) -> Result<(), ViewError> {
        self.page.lock().await.show_message(id, message, severity.as_class())
    }

    pub async fn clear_message(&self, id: &str) -> Result<(), ViewError> {
        self.page.lock().await.clear_message(id)
    }

    pub async fn save_record(&self) -> Result<Outcome, ViewError> {
        let ticket = self.save_guard.begin();
        let parsed = {
            let page = self.page.lock().await;
            RecordSubmission::from_fields(
                page.value(ids::SAVE_NAME)?,
                page.value(ids::SAVE_COURSE)?,
                page.value(ids::SAVE_SCORE)?,
            )
        };
        let record = match parsed {
            Ok(record) => record,
            Err(err) => {
                warn!("save rejected: {err}");
                self.save_notice.show(Severity::Error, &err.message).await?;
                return Ok(Outcome::Rejected);
            }
        };

        let result = self.api.save_record(&record).await;
        if !self.save_guard.is_current(ticket) {
            debug!("discarding superseded save response for {}", record.name);
            return Ok(Outcome::Superseded);
        }

        match result {
            Ok(ApiResult::Success(confirmation)) => {
                info!("saved {} / {} for {}", record.course, record.score, record.name);
                self.save_notice
                    .show(Severity::Success, &confirmation.message)
                    .await?;
                let mut page = self.page.lock().await;
                for field in [ids::SAVE_NAME, ids::SAVE_COURSE, ids::SAVE_SCORE] {
                    page.set_value(field, "")?;
                }
                Ok(Outcome::Shown)
            }
            Ok(ApiResult::Failure { message }) => {
                warn!("backend refused record for {}: {message}", record.name);
                self.save_notice.show(Severity::Error, &message).await?;
                Ok(Outcome::Failed)
            }
            Err(err) => {
                error!("save-record request failed: {err}");
                self.save_notice
                    .show(Severity::Error, &operational_message(&err))
                    .await?;
                Ok(Outcome::Failed)
            }
        }
    }

    pub async fn calculate_gpa(&self) -> Result<Outcome, ViewError> {
        let ticket = self.gpa_guard.begin();
        let parsed = {
            let page = self.page.lock().await;
            NameQuery::from_field(page.value(ids::GPA_NAME)?)
        };
        let query = match parsed {
            Ok(query) => query,
            Err(err) => {
                warn!("gpa rejected: {err}");
                self.gpa_notice.show(Severity::Error, &err.message).await?;
                return Ok(Outcome::Rejected);
            }
        };

        self.gpa_notice.clear().await?;
        self.page
            .lock()
            .await
            .element_mut(ids::GPA_RESULT)?
            .remove_class(SHOW_CLASS);

        let result = self.api.calculate_gpa(&query).await;
        if !self.gpa_guard.is_current(ticket) {
            debug!("discarding superseded gpa response for {}", query.name);
            return Ok(Outcome::Superseded);
        }

        match result {
            Ok(ApiResult::Success(summary)) => {
                info!("gpa for {} is {} over {} scores", query.name, summary.gpa, summary.score_count);
                let mut page = self.page.lock().await;
                page.set_content(
                    ids::GPA_RESULT,
                    Content::GpaResult {
                        name: query.name,
                        gpa: summary.gpa.to_string(),
                        score_count: summary.score_count,
                    },
                )?;
                page.element_mut(ids::GPA_RESULT)?.add_class(SHOW_CLASS);
                Ok(Outcome::Shown)
            }
            Ok(ApiResult::Failure { message }) => {
                warn!("backend refused gpa for {}: {message}", query.name);
                self.gpa_notice.show(Severity::Error, &message).await?;
                Ok(Outcome::Failed)
            }
            Err(err) => {
                error!("calculate-gpa request failed: {err}");
                self.gpa_notice
                    .show(Severity::Error, &operational_message(&err))
                    .await?;
                Ok(Outcome::Failed)
            }
        }
    }

    pub async fn show_chart(&self) -> Result<Outcome, ViewError> {
        let ticket = self.chart_guard.begin();
        let parsed = {
            let page = self.page.lock().await;
            NameQuery::from_field(page.value(ids::CHART_NAME)?)
        };
        let query = match parsed {
            Ok(query) => query,
            Err(err) => {
                warn!("chart rejected: {err}");
                self.chart_notice.show(Severity::Error, &err.message).await?;
                return Ok(Outcome::Rejected);
            }
        };

        self.chart_notice.clear().await?;
        {
            let mut page = self.page.lock().await;
            page.set_content(ids::CHART_CONTAINER, Content::Loading)?;
            page.element_mut(ids::CHART_CONTAINER)?.add_class(SHOW_CLASS);
        }

        let result = self.api.get_chart(&query).await;
        if !self.chart_guard.is_current(ticket) {
            debug!("discarding superseded chart response for {}", query.name);
            return Ok(Outcome::Superseded);
        }

        let (content, outcome) = match result.and_then(|result| match result {
            ApiResult::Success(data) => data.rows().map(|rows| ApiResult::Success((data.chart, rows))),
            ApiResult::Failure { message } => Ok(ApiResult::Failure { message }),
        }) {
            Ok(ApiResult::Success((chart, rows))) => {
                info!("chart for {} lists {} courses", query.name, rows.len());
                let content = Content::Chart {
                    name: query.name,
                    chart,
                    rows,
                };
                (content, Outcome::Shown)
            }
            Ok(ApiResult::Failure { message }) => {
                warn!("backend refused chart for {}: {message}", query.name);
                (Content::Error(message), Outcome::Failed)
            }
            Err(err) => {
                error!("get-chart request failed: {err}");
                (Content::Error(operational_message(&err)), Outcome::Failed)
            }
        };

        self.page
            .lock()
            .await
            .set_content(ids::CHART_CONTAINER, content)?;
        Ok(outcome)
    }
}

fn operational_message(err: &ClientError) -> String {
    format!("Error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PanelConfig, controller};

    #[tokio::test]
    async fn controller_messages_overwrite_and_clear() {
        let panel = controller(&PanelConfig::with_api_url("http://127.0.0.1:9").unwrap()).unwrap();
        panel
            .show_message(ids::GPA_MESSAGE, "No scores", Severity::Error)
            .await
            .unwrap();
        panel
            .show_message(ids::GPA_MESSAGE, "Done", Severity::Success)
            .await
            .unwrap();
        {
            let page = panel.page.lock().await;
            let message = page.element(ids::GPA_MESSAGE).unwrap();
            assert_eq!(message.text, "Done");
            assert!(message.has_class("success"));
            assert!(!message.has_class("error"));
        }

        panel.clear_message(ids::GPA_MESSAGE).await.unwrap();
        assert_eq!(panel.text_content(ids::GPA_MESSAGE).await.unwrap(), "");
        assert_eq!(
            panel.clear_message("gpa-box").await.unwrap_err(),
            ViewError::MissingElement("gpa-box".to_owned())
        );
    }
}
