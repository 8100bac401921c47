use serde::{Deserialize, Serialize};

use super::repo_types::Quote;

#[derive(Debug, Deserialize)]
pub struct CreateQuoteRequest {
    pub text: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuoteListResponse {
    pub quotes: Vec<Quote>,
}

#[derive(Debug, Serialize)]
pub struct SingleQuoteResponse {
    pub quote: Quote,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub message: String,
    pub quote: Quote,
}
