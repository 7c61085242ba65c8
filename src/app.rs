use crate::api::ApiClient;
use crate::config::PanelConfig;
use crate::errors::ClientError;
use crate::page::Page;
use crate::state::ViewController;

pub fn controller(config: &PanelConfig) -> Result<ViewController, ClientError> {
    let api = ApiClient::new(config)?;
    Ok(ViewController::new(
        Page::grade_tracker(),
        api,
        config.notice_timeout,
    ))
}
