//! Text generation providers

pub mod openai;

use std::fmt;
use serde::{Deserialize, Serialize};

// Re-export for convenience
pub use openai::OpenAiClient;

/// How a request is laid out on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape
{   /// System instruction + user instruction
    Chat
  , /// One concatenated instruction
    Completion
}

/// Models offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Hash, Default)]
pub enum Model
{   /// Recommended, low cost
    #[default]
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo
  , /// Long prompts
    #[serde(rename = "gpt-3.5-turbo-16k")]
    Gpt35Turbo16k
  , /// High cost, creative
    #[serde(rename = "text-davinci-003")]
    TextDavinci003
}

impl Model
{   pub const ALL: [Model; 3] = [
      Model::Gpt35Turbo
    , Model::Gpt35Turbo16k
    , Model::TextDavinci003
    ];

    pub fn id(&self) -> &'static str
    {   match self
        {   Model::Gpt35Turbo => "gpt-3.5-turbo"
          , Model::Gpt35Turbo16k => "gpt-3.5-turbo-16k"
          , Model::TextDavinci003 => "text-davinci-003"
        }
    }

    pub fn from_id(id: &str) -> Result<Self, crate::error::Error>
    {   Self::ALL.into_iter()
          .find(|m| m.id() == id.trim())
          .ok_or_else(|| {
            crate::error::Error::UnknownModel(id.to_string())
          })
    }

    pub fn call_shape(&self) -> CallShape
    {   match self
        {   Model::Gpt35Turbo | Model::Gpt35Turbo16k => CallShape::Chat
          , Model::TextDavinci003 => CallShape::Completion
        }
    }
}

impl CallShape
{   /// Shape for a model id; unknown ids are an error
    pub fn for_model_id(id: &str) -> Result<Self, crate::error::Error>
    {   Model::from_id(id).map(|m| m.call_shape())
    }
}

/// One outbound generation
#[derive(Clone, PartialEq)]
pub struct GenerationCall
{   pub prompt: String
  , pub model: Model
  , pub temperature: f32
  , pub max_tokens: u32
  , pub api_key: String
}

impl fmt::Debug for GenerationCall
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("GenerationCall")
          .field("prompt", &self.prompt)
          .field("model", &self.model)
          .field("temperature", &self.temperature)
          .field("max_tokens", &self.max_tokens)
          .field("api_key", &"<redacted>")
          .finish()
    }
}

/// Anything that turns a call into text. One attempt, no retry.
#[async_trait::async_trait]
pub trait TextGenerationProvider: Send + Sync
{   async fn generate(
      &self
    , call: &GenerationCall
    ) -> Result<String, crate::error::Error>;
}
