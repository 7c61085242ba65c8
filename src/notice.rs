use crate::errors::ViewError;
use crate::page::Page;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NoticeConfig {
    pub target: String,
    pub autotimeout: Option<Duration>,
}

/// Inline feedback for one message box.
#[derive(Clone)]
pub struct Notifier {
    page: Arc<Mutex<Page>>,
    config: NoticeConfig,
    shown: Arc<AtomicU64>,
}

impl Notifier {
    pub fn new(page: Arc<Mutex<Page>>, config: NoticeConfig) -> Self {
        Self {
            page,
            config,
            shown: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn show(&self, severity: Severity, message: &str) -> Result<(), ViewError> {
        let stamp = self.shown.fetch_add(1, Ordering::SeqCst) + 1;
        self.page
            .lock()
            .await
            .show_message(&self.config.target, message, severity.as_class())?;

        if let Some(delay) = self.config.autotimeout {
            let notifier = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                // a newer notice owns the box now
                if notifier.shown.load(Ordering::SeqCst) == stamp {
                    let _ = notifier.page.lock().await.clear_message(&notifier.config.target);
                }
            });
        }
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), ViewError> {
        self.shown.fetch_add(1, Ordering::SeqCst);
        self.page.lock().await.clear_message(&self.config.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ids;

    fn notifier(autotimeout: Option<Duration>) -> (Arc<Mutex<Page>>, Notifier) {
        let page = Arc::new(Mutex::new(Page::grade_tracker()));
        let notifier = Notifier::new(
            Arc::clone(&page),
            NoticeConfig {
                target: ids::SAVE_MESSAGE.to_owned(),
                autotimeout,
            },
        );
        (page, notifier)
    }

    async fn message_text(page: &Arc<Mutex<Page>>) -> String {
        page.lock().await.element(ids::SAVE_MESSAGE).unwrap().text.clone()
    }

    #[tokio::test]
    async fn notice_styles_target() {
        let (page, notifier) = notifier(None);
        notifier.show(Severity::Error, "boom").await.unwrap();

        let guard = page.lock().await;
        let element = guard.element(ids::SAVE_MESSAGE).unwrap();
        assert_eq!(element.text, "boom");
        assert!(element.has_class("error"));
    }

    #[tokio::test]
    async fn missing_target_is_reported() {
        let page = Arc::new(Mutex::new(Page::default()));
        let notifier = Notifier::new(
            page,
            NoticeConfig {
                target: "nowhere".to_owned(),
                autotimeout: None,
            },
        );
        let err = notifier.show(Severity::Success, "hi").await.unwrap_err();
        assert_eq!(err, ViewError::MissingElement("nowhere".to_owned()));
    }

    #[tokio::test(start_paused = true)]
    async fn autotimeout_clears_notice() {
        let (page, notifier) = notifier(Some(Duration::from_secs(5)));
        notifier.show(Severity::Success, "Record saved").await.unwrap();
        assert_eq!(message_text(&page).await, "Record saved");

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(message_text(&page).await, "");
    }

    #[tokio::test(start_paused = true)]
    async fn newer_notice_survives_older_timeout() {
        let (page, notifier) = notifier(Some(Duration::from_secs(5)));
        notifier.show(Severity::Error, "first").await.unwrap();

        tokio::time::sleep(Duration::from_secs(3)).await;
        notifier.show(Severity::Success, "second").await.unwrap();

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(message_text(&page).await, "second");

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(message_text(&page).await, "");
    }
}
