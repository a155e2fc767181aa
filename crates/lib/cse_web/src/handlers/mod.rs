//! Request handlers.
//!
//! Every HTML page goes through [`render`], which wraps the handler's content
//! in the site layout with the navigation list, the caller's session and any
//! pending notice.

pub mod account;
pub mod home;
pub mod inventory;
pub mod search;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;
use cse_core::store::StoreError;
use tracing::{error, warn};

use crate::AppState;
use crate::error::AppError;
use crate::middleware::session::Session;
use crate::services::flash;
use crate::views;

/// Notice shown when storage cannot be reached.
pub const UNAVAILABLE_NOTICE: &str =
    "Sorry, the service is temporarily unavailable. Please try again shortly.";

/// Content of one page before it is wrapped in the layout.
#[derive(Debug)]
pub struct Page {
    pub status: StatusCode,
    pub title: String,
    pub content: String,
    pub notices: Vec<String>,
}

impl Page {
    pub fn new(title: impl Into<String>, content: String) -> Self {
        Self {
            status: StatusCode::OK,
            title: title.into(),
            content,
            notices: Vec::new(),
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn notice(mut self, notice: impl Into<String>) -> Self {
        self.notices.push(notice.into());
        self
    }
}

/// Wrap `page` in the layout and take the pending flash notice.
///
/// Navigation degrades to the home link alone if classifications cannot be
/// loaded, so an unreachable store never hides the page's own message.
pub async fn render(state: &AppState, session: &Session, jar: CookieJar, page: Page) -> Response {
    let classifications = match state.store.list_classifications().await {
        Ok(list) => list,
        Err(e) => {
            warn!(error = %e, "navigation unavailable");
            Vec::new()
        }
    };
    let (jar, pending) = flash::take(jar);
    let notices: Vec<String> = pending.into_iter().chain(page.notices).collect();
    let html = views::layout(
        &page.title,
        &views::nav(&classifications),
        session.identity(),
        &notices,
        &page.content,
    );
    (page.status, jar, Html(html)).into_response()
}

/// Log a failed write and pick the notice to show for it.
pub fn failure_notice(action: &str, e: &StoreError, fallback: &str) -> String {
    error!(action, error = %e, "store write failed");
    if e.is_unavailable() {
        UNAVAILABLE_NOTICE.to_string()
    } else {
        fallback.to_string()
    }
}

/// Status for a form re-rendered after a failed write.
pub fn failure_status(e: &StoreError) -> StatusCode {
    if e.is_unavailable() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Fallback for unmatched paths.
pub async fn not_found() -> AppError {
    AppError::NotFound("no route".into())
}
