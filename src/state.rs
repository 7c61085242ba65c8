use crate::api::ApiClient;
use crate::inflight::InFlight;
use crate::notice::{NoticeConfig, Notifier};
use crate::page::{Page, ids};
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;

/// Drives the grade tracker page. Clones share the same page and guards.
#[derive(Clone)]
pub struct ViewController {
    pub page: Arc<Mutex<Page>>,
    pub(crate) api: ApiClient,
    pub(crate) save_notice: Notifier,
    pub(crate) gpa_notice: Notifier,
    pub(crate) chart_notice: Notifier,
    pub(crate) save_guard: Arc<InFlight>,
    pub(crate) gpa_guard: Arc<InFlight>,
    pub(crate) chart_guard: Arc<InFlight>,
}

impl ViewController {
    pub fn new(page: Page, api: ApiClient, notice_timeout: Option<Duration>) -> Self {
        let page = Arc::new(Mutex::new(page));
        let notifier = |target: &str| {
            Notifier::new(
                Arc::clone(&page),
                NoticeConfig {
                    target: target.to_owned(),
                    autotimeout: notice_timeout,
                },
            )
        };

        Self {
            save_notice: notifier(ids::SAVE_MESSAGE),
            gpa_notice: notifier(ids::GPA_MESSAGE),
            chart_notice: notifier(ids::CHART_MESSAGE),
            page,
            api,
            save_guard: Arc::default(),
            gpa_guard: Arc::default(),
            chart_guard: Arc::default(),
        }
    }
}
