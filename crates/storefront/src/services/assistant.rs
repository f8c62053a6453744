//! Assistant bridge to the hosted LLM endpoint.
//!
//! Builds a fixed instructional preamble embedding the product's full
//! attribute set, appends the prior conversation turns and the new user
//! message, and forwards the sequence to the completion endpoint. A
//! failed call surfaces a fixed fallback message to the user and is not
//! retried.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loop_core::product::Product;

use crate::config::AssistantConfig;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Shown to the user whenever the assistant call fails for any reason.
pub const FALLBACK_MESSAGE: &str =
    "Sorry, I'm having trouble answering right now. Please try again in a moment.";

/// Errors from the assistant endpoint.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// The endpoint answered without any candidate text.
    #[error("empty completion")]
    EmptyCompletion,
}

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One prior turn of the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// Client for the hosted LLM completion endpoint.
#[derive(Clone)]
pub struct AssistantClient {
    inner: Arc<AssistantClientInner>,
}

struct AssistantClientInner {
    client: reqwest::Client,
    model: String,
    api_key: String,
}

impl AssistantClient {
    /// Create a new assistant client.
    #[must_use]
    pub fn new(config: &AssistantConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(AssistantClientInner {
                client,
                model: config.model.clone(),
                api_key: config.api_key.expose_secret().to_string(),
            }),
        }
    }

    /// Ask the assistant about a product.
    ///
    /// The request is the fixed preamble, the prior turns in order, and
    /// the new user message.
    ///
    /// # Errors
    ///
    /// Transport or API errors, or an empty completion. Callers surface
    /// [`FALLBACK_MESSAGE`] instead of the error detail.
    #[instrument(skip(self, product, history, message), fields(model = %self.inner.model, product_id = %product.id))]
    pub async fn chat(
        &self,
        product: &Product,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, AssistantError> {
        let mut contents = Vec::with_capacity(history.len() + 2);
        contents.push(Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: build_system_prompt(product),
            }],
        });
        for turn in history {
            contents.push(Content {
                role: match turn.role {
                    ChatRole::User => "user".to_string(),
                    ChatRole::Model => "model".to_string(),
                },
                parts: vec![Part {
                    text: turn.text.clone(),
                }],
            });
        }
        contents.push(Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: message.to_string(),
            }],
        });

        let url = format!(
            "{GEMINI_API_BASE}/{}:generateContent?key={}",
            self.inner.model, self.inner.api_key
        );
        let response = self
            .inner
            .client
            .post(url)
            .json(&GenerateContentRequest { contents })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(500)
                .collect();
            return Err(AssistantError::Api { status, message });
        }

        let body: GenerateContentResponse = response.json().await?;
        let text: String = body
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AssistantError::EmptyCompletion);
        }
        Ok(text)
    }
}

fn join_or_na(values: Option<&Vec<String>>, separator: &str) -> String {
    values.map_or_else(
        || "N/A".to_string(),
        |items| items.join(separator),
    )
}

/// The fixed instructional preamble for a product.
#[must_use]
pub fn build_system_prompt(product: &Product) -> String {
    let colors = product.colors.as_ref().map_or_else(
        || "N/A".to_string(),
        |colors| {
            colors
                .iter()
                .map(|c| c.name.clone())
                .collect::<Vec<_>>()
                .join(", ")
        },
    );
    let dimensions = product.dimensions.as_ref().map_or_else(
        || "N/A".to_string(),
        |d| format!("{}x{}x{}", d.width, d.height, d.depth),
    );

    format!(
        "You are LOOP AI, a dedicated sales expert for the specific product: \"{name}\".\n\n\
         STRICT RULES:\n\
         1. You must ONLY answer questions related to this product ({name}).\n\
         2. If the user asks about general topics (politics, history, weather, celebrities, other tech), politely REFUSE. Say: \"I can only answer questions about the {name}.\"\n\
         3. Do not answer questions about other products unless comparing them directly to this one.\n\
         4. Be helpful, concise, and professional.\n\n\
         PRODUCT DETAILS:\n\
         - Name: {name}\n\
         - Description: {description}\n\
         - Price: ${price}\n\
         - Stock: {stock} units\n\
         - Category: {category}\n\
         - Colors: {colors}\n\
         - Sizes: {sizes}\n\
         - Features: {features}\n\n\
         SPECIFICATIONS:\n\
         - Weight: {weight}\n\
         - Dimensions: {dimensions}\n\
         - Material: {material}\n\n\
         Use this information to answer.",
        name = product.name,
        description = product.description,
        price = product.price,
        stock = product.stock,
        category = product.category,
        colors = colors,
        sizes = join_or_na(product.sizes.as_ref(), ", "),
        features = join_or_na(product.features.as_ref(), "; "),
        weight = product.weight.as_deref().unwrap_or("N/A"),
        dimensions = dimensions,
        material = product.material.as_deref().unwrap_or("N/A"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use loop_core::product::{ColorOption, Dimensions};
    use rust_decimal::Decimal;

    fn sample_product() -> Product {
        Product {
            id: "1".to_string(),
            name: "Beats Solo Wireless".to_string(),
            description: "Wireless headphones".to_string(),
            price: Decimal::from(199),
            category: "earphones".to_string(),
            image: String::new(),
            is_best_seller: true,
            stock: 12,
            colors: Some(vec![
                ColorOption {
                    name: "Matte Black".to_string(),
                    hex: "#1a1a1a".to_string(),
                },
                ColorOption {
                    name: "Silver".to_string(),
                    hex: "#c0c0c0".to_string(),
                },
            ]),
            sizes: Some(vec!["One Size".to_string()]),
            weight: Some("215g".to_string()),
            dimensions: Some(Dimensions {
                width: "17.8cm".to_string(),
                height: "18.5cm".to_string(),
                depth: "7.6cm".to_string(),
            }),
            material: None,
            features: Some(vec![
                "40h battery".to_string(),
                "ANC".to_string(),
            ]),
            shape: None,
        }
    }

    #[test]
    fn test_prompt_embeds_full_attribute_set() {
        let prompt = build_system_prompt(&sample_product());
        assert!(prompt.contains("Beats Solo Wireless"));
        assert!(prompt.contains("Price: $199"));
        assert!(prompt.contains("Stock: 12 units"));
        assert!(prompt.contains("Colors: Matte Black, Silver"));
        assert!(prompt.contains("Features: 40h battery; ANC"));
        assert!(prompt.contains("Dimensions: 17.8cmx18.5cmx7.6cm"));
        // Absent attributes render as N/A
        assert!(prompt.contains("Material: N/A"));
    }

    #[test]
    fn test_prompt_refuses_off_topic_by_instruction() {
        let prompt = build_system_prompt(&sample_product());
        assert!(prompt.contains("politely REFUSE"));
        assert!(prompt.contains("I can only answer questions about the Beats Solo Wireless."));
    }

    #[test]
    fn test_chat_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ChatRole::Model).expect("serialize"),
            "\"model\""
        );
    }
}
