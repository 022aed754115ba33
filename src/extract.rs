use axum::body::to_bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;

use crate::api::models::SummarizeRequest;

/// Cap applied to input text before prompt construction.
pub const MAX_PROMPT_CHARS: usize = 4000;

/// Upper bound on request body size, matched by the router's body limit.
pub const MAX_BODY_BYTES: usize = 10_000_000;

/// Pulls text out of the request body according to its Content-Type.
/// Unrecognized or malformed bodies yield an empty string; the caller turns
/// empty text into the 400 path.
pub async fn extract_text(req: Request) -> String {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.contains("application/json") {
        let Ok(bytes) = to_bytes(req.into_body(), MAX_BODY_BYTES).await else {
            return String::new();
        };
        match serde_json::from_slice::<SummarizeRequest>(&bytes) {
            Ok(body) => body.text.unwrap_or_default(),
            Err(_) => String::new(),
        }
    } else if content_type.contains("text/plain") {
        match to_bytes(req.into_body(), MAX_BODY_BYTES).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) => String::new(),
        }
    } else if content_type.contains("multipart/form-data") {
        extract_file_part(req).await
    } else {
        String::new()
    }
}

/// Reads the contents of a part named `file`, skipping non-file parts with
/// the same name.
async fn extract_file_part(req: Request) -> String {
    let Ok(mut multipart) = Multipart::from_request(req, &()).await else {
        return String::new();
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") && field.file_name().is_some() {
            return field.text().await.unwrap_or_default();
        }
    }

    String::new()
}

/// Silently caps the text at the prompt budget. Counts characters, so a
/// multi-byte sequence is never split.
pub fn truncate(text: &str) -> &str {
    match text.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Builds the instruction prompt around the (already truncated) text. The
/// wording is part of the contract with the model; do not reword it.
pub fn build_prompt(text: &str) -> String {
    format!(
        "You are EdgeSummarizer, a helpful AI that summarizes documents.\n\
         \n\
         Summarize the following text into 3–6 concise bullet points.\n\
         Use plain language and focus on the main ideas.\n\
         \n\
         Text:\n\
         {text}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate("hello"), "hello");
    }

    #[test]
    fn long_text_is_cut_at_the_budget() {
        let text = "A".repeat(MAX_PROMPT_CHARS + 1000);
        let cut = truncate(&text);
        assert_eq!(cut.chars().count(), MAX_PROMPT_CHARS);
        // Idempotent: re-truncating the truncated text changes nothing.
        assert_eq!(truncate(cut), cut);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(MAX_PROMPT_CHARS + 1);
        let cut = truncate(&text);
        assert_eq!(cut.chars().count(), MAX_PROMPT_CHARS);
    }

    #[test]
    fn prompt_embeds_the_text() {
        let prompt = build_prompt("doc content");
        assert!(prompt.contains("3–6 concise bullet points"));
        assert!(prompt.ends_with("Text:\ndoc content\n"));
    }
}
