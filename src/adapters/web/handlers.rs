//! HTTP request handlers for web adapter.

use askama::Template;
use axum::{
    Form, Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chrono::Local;
use std::sync::Arc;

use super::templates::{self, ChatTemplate, SUGGESTED_QUESTIONS};
use super::{AppState, WebError, is_htmx_request};

pub async fn chat_page(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let dataset = state.engine.dataset();
    let template = ChatTemplate {
        holdings: dataset.holdings().len(),
        trades: dataset.trades().len(),
        funds: dataset.funds().len(),
        suggestions: SUGGESTED_QUESTIONS,
    };
    let html = template
        .render()
        .map_err(|e| WebError::internal(e.to_string()))?;
    Ok(Html(html).into_response())
}

#[derive(Debug, serde::Deserialize)]
pub struct AskForm {
    pub question: String,
}

/// HTMX form endpoint: replies with a chat-log fragment.
pub async fn ask(State(state): State<Arc<AppState>>, Form(form): Form<AskForm>) -> Response {
    let today = Local::now().date_naive();
    let answer = state.engine.answer(&form.question, today);
    tracing::debug!(question = %form.question, "question answered");
    Html(templates::message_fragment(&form.question, &answer)).into_response()
}

#[derive(Debug, serde::Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, serde::Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// JSON endpoint: the question string in, the formatted answer out.
pub async fn api_ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Json<AskResponse> {
    let today = Local::now().date_naive();
    let answer = state.engine.answer(&request.question, today);
    Json(AskResponse { answer })
}

pub async fn not_found(headers: HeaderMap) -> Response {
    let template = templates::ErrorTemplate {
        message: "Page not found",
        status: StatusCode::NOT_FOUND.as_u16(),
    };
    let content = template.fragment();

    if is_htmx_request(&headers) {
        return (StatusCode::NOT_FOUND, Html(content)).into_response();
    }

    let page = templates::BasePage {
        title: "Error",
        content: &content,
    };
    match page.render() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, content).into_response(),
    }
}
