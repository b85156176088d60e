use serde::Serialize;

use crate::export::DocumentHandle;

pub const DOWNLOAD_LABEL: &str = "Download Lecture as PDF";

/// What the page renders after a user action.
#[derive(Debug, Clone, Serialize)]
pub struct Presentation {
    pub text: String,
    /// The text escaped and wrapped in the styled container.
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<DownloadAction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadAction {
    pub label: &'static str,
    pub url: String,
    pub file_name: String,
    pub mime: &'static str,
}

pub fn present_lecture(text: &str, document: Option<&DocumentHandle>) -> Presentation {
    Presentation {
        text: text.to_string(),
        html: lecture_box(text),
        download: document.map(download_action),
    }
}

pub fn present_translation(text: &str) -> Presentation {
    Presentation {
        text: text.to_string(),
        html: lecture_box(text),
        download: None,
    }
}

pub fn download_url(document: &DocumentHandle) -> String {
    format!("/api/documents/{}", document.id)
}

fn download_action(document: &DocumentHandle) -> DownloadAction {
    DownloadAction {
        label: DOWNLOAD_LABEL,
        url: download_url(document),
        file_name: document.file_name.clone(),
        mime: document.mime,
    }
}

fn lecture_box(text: &str) -> String {
    format!("<div class=\"lecture-box\">{}</div>", escape_html(text))
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

/// `Content-Disposition` value for a download. The quoted name is limited to
/// printable ASCII; anything else becomes `_`.
pub fn content_disposition(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("attachment; filename=\"{}\"", ascii)
}
