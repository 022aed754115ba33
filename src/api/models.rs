use serde::Deserialize;

/// JSON body accepted by `POST /summarize`. The field is optional so an
/// absent `text` falls through to the empty-input path instead of rejecting
/// the request outright.
#[derive(Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: Option<String>,
}
