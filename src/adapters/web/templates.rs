//! HTML templates using Askama.

use askama::Template;

/// Questions offered as one-click chips on the chat page.
pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "Total number of holdings",
    "Which funds performed better?",
    "Trade types summary",
    "Total market value",
    "List all funds",
];

#[derive(Template)]
#[template(path = "chat.html")]
pub struct ChatTemplate<'a> {
    pub holdings: usize,
    pub trades: usize,
    pub funds: usize,
    pub suggestions: &'a [&'a str],
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

impl<'a> ErrorTemplate<'a> {
    pub fn fragment(&self) -> String {
        format!(
            "<div id=\"error\" class=\"error\"><h1>Error {}</h1><p>{}</p></div>",
            self.status,
            escape_html(self.message)
        )
    }
}

#[derive(Template)]
#[template(path = "base.html")]
pub struct BasePage<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// One question/answer exchange, appended into the chat log by HTMX.
pub fn message_fragment(question: &str, answer: &str) -> String {
    format!(
        "<div class=\"message user\">{}</div>\n<div class=\"message bot\">{}</div>",
        escape_html(question),
        escape_html(answer)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
