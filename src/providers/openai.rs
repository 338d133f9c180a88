use std::time::Duration;
use serde::{Deserialize, Serialize};
use log::{debug, trace, error};

use crate::providers::{CallShape, GenerationCall};

// ===== Message Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub max_tokens: u32
  , pub temperature: f32
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse
{   pub choices: Vec<ChatChoice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice
{   pub message: ChatMessage
  , #[serde(default)]
    pub finish_reason: Option<String>
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest
{   pub model: String
  , pub prompt: String
  , pub max_tokens: u32
  , pub temperature: f32
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse
{   pub choices: Vec<CompletionChoice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice
{   pub text: String
  , #[serde(default)]
    pub finish_reason: Option<String>
}

/// Chat body: system line, then the user prompt
pub fn chat_request(call: &GenerationCall) -> ChatRequest
{   ChatRequest
    {   model: call.model.id().to_string()
      , messages: vec![
          ChatMessage
          {   role: "system".to_string()
            , content: crate::prompt::SYSTEM_INSTRUCTION.to_string()
          }
        , ChatMessage
          {   role: "user".to_string()
            , content: call.prompt.clone()
          }
        ]
      , max_tokens: call.max_tokens
      , temperature: call.temperature
    }
}

/// Completion body: system line and prompt in one instruction
pub fn completion_request(call: &GenerationCall) -> CompletionRequest
{   CompletionRequest
    {   model: call.model.id().to_string()
      , prompt: crate::prompt::completion_instruction(&call.prompt)
      , max_tokens: call.max_tokens
      , temperature: call.temperature
    }
}

/// Turn a non-success status and body into an error
pub fn status_error(
  status: reqwest::StatusCode
, body: String
) -> crate::error::Error
{   match status.as_u16()
    {   401 => crate::error::Error::Unauthorized(body)
      , 429 => crate::error::Error::RateLimitExceeded
      , _ => crate::error::Error::ApiError(
          format!("{}: {}", status, body)
        )
    }
}

// ===== OpenAI Client =====

/// Client for OpenAI-style chat and completion endpoints
#[derive(Debug, Clone)]
pub struct OpenAiClient
{   api_base: String
  , timeout: Duration
  , http_client: reqwest::Client
}

impl OpenAiClient
{   pub fn new(
      config: &crate::config::ProviderConfig
    ) -> Result<Self, crate::error::Error>
    {   debug!("Creating OpenAiClient for {}", config.api_base);
        let timeout = Duration::from_secs(config.timeout_secs);
        let http_client = reqwest::Client::builder()
          .timeout(timeout)
          .build()
          .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            crate::error::Error::InvalidConfiguration(e.to_string())
          })?;
        Ok(OpenAiClient
        {   api_base: config.api_base.trim_end_matches('/').to_string()
          , timeout
          , http_client
        })
    }

    pub fn api_base(&self) -> &str
    {   &self.api_base
    }

    async fn post_json<B, R>(
      &self
    , path: &str
    , api_key: &str
    , body: &B
    ) -> Result<R, crate::error::Error>
    where B: Serialize + std::fmt::Debug
        , R: serde::de::DeserializeOwned
    {   trace!("OpenAI request to {}: {:?}", path, body);

        let response = self.http_client
          .post(format!("{}{}", self.api_base, path))
          .header("Authorization", format!("Bearer {}", api_key))
          .header("Content-Type", "application/json")
          .json(body)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            if e.is_timeout()
            {   crate::error::Error::Timeout
            } else
            {   crate::error::Error::HttpError(e.to_string())
            }
          })?;

        let status = response.status();
        trace!("OpenAI response status: {}", status);

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("OpenAI API error {}: {}", status, error_text);
            return Err(status_error(status, error_text));
        }

        response.json().await.map_err(|e| {
          error!("Parse error: {}", e);
          crate::error::Error::ParseError(e.to_string())
        })
    }

    async fn send_chat(
      &self
    , call: &GenerationCall
    ) -> Result<String, crate::error::Error>
    {   let response: ChatResponse = self
          .post_json("/chat/completions", &call.api_key, &chat_request(call))
          .await?;
        response.choices.first()
          .map(|c| c.message.content.trim().to_string())
          .ok_or_else(|| {
            error!("No choices in response");
            crate::error::Error::NoChoicesInResponse
          })
    }

    async fn send_completion(
      &self
    , call: &GenerationCall
    ) -> Result<String, crate::error::Error>
    {   let response: CompletionResponse = self
          .post_json("/completions", &call.api_key, &completion_request(call))
          .await?;
        response.choices.first()
          .map(|c| c.text.trim().to_string())
          .ok_or_else(|| {
            error!("No choices in response");
            crate::error::Error::NoChoicesInResponse
          })
    }
}

#[async_trait::async_trait]
impl crate::providers::TextGenerationProvider for OpenAiClient
{   async fn generate(
      &self
    , call: &GenerationCall
    ) -> Result<String, crate::error::Error>
    {   let shape = call.model.call_shape();
        debug!("Generating with {} ({:?})", call.model.id(), shape);

        let pending = async {
          match shape
          {   CallShape::Chat => self.send_chat(call).await
            , CallShape::Completion => self.send_completion(call).await
          }
        };

        match tokio::time::timeout(self.timeout, pending).await
        {   Ok(result) => result
          , Err(_) => {
              error!("Generation timed out after {:?}", self.timeout);
              Err(crate::error::Error::Timeout)
            }
        }
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::providers::Model;

    fn call(model: Model) -> GenerationCall
    {   GenerationCall
        {   prompt: "Write about tests.".into()
          , model
          , temperature: 0.3
          , max_tokens: 120
          , api_key: "sk-test".into()
        }
    }

    #[test]
    fn test_chat_body()
    {   let body = serde_json::to_value(chat_request(&call(Model::Gpt35Turbo)))
          .unwrap();
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(
          body["messages"][0]["content"],
          crate::prompt::SYSTEM_INSTRUCTION
        );
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Write about tests.");
        assert_eq!(body["max_tokens"], 120);
    }

    #[test]
    fn test_completion_body()
    {   let body = completion_request(&call(Model::TextDavinci003));
        assert_eq!(body.model, "text-davinci-003");
        assert_eq!(
          body.prompt,
          format!(
            "{}\nWrite about tests.",
            crate::prompt::SYSTEM_INSTRUCTION
          )
        );
    }

    #[test]
    fn test_status_mapping()
    {   assert_eq!(
          status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, "".into()),
          crate::error::Error::RateLimitExceeded
        );
        assert_eq!(
          status_error(reqwest::StatusCode::UNAUTHORIZED, "bad key".into()),
          crate::error::Error::Unauthorized("bad key".into())
        );
        assert!(matches!(
          status_error(reqwest::StatusCode::BAD_GATEWAY, "down".into()),
          crate::error::Error::ApiError(msg) if msg.contains("down")
        ));
    }

    #[test]
    fn test_client_trims_base()
    {   let client = OpenAiClient::new(&crate::config::ProviderConfig
        {   api_base: "http://localhost:9/v1/".into()
          , timeout_secs: 5
        }).unwrap();
        assert_eq!(client.api_base(), "http://localhost:9/v1");
    }
}
