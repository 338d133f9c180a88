pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod prompt;
pub mod usage;
pub mod post;
pub mod session;
pub mod client;
use serde::{Deserialize, Serialize};

pub use client::PostBackend;
pub use config::{GeneratorConfig, ProviderConfig};
pub use error::{Error, ErrorKind};
pub use post::{GeneratedPost, PostDownload};
pub use providers::{
  CallShape, GenerationCall, Model, TextGenerationProvider
};
pub use request::GenerationRequest;
pub use session::{AttemptState, PostSession};
pub use usage::{GateDecision, UsageCounter};

/*

postgen: async library that writes LinkedIn posts with a hosted LLM.

  request.rs   -> what the user filled in
  prompt.rs    -> fields to one instruction string
  usage.rs     -> free-post gate, one counter per session
  providers/   -> OpenAI-style chat and completion calls
  session.rs   -> one attempt: validate, gate, submit
  client.rs    -> session behind a task + channels
  post.rs      -> generated text, word count, download payload

*/

/// POSTGEN API INTERFACE:

// ===== GeneratePost =====

pub type GeneratePostReply = Result<GeneratedPost, crate::error::Error>;
pub type GeneratePostReplySender
  = tokio::sync::mpsc::UnboundedSender<GeneratePostReply>;

pub struct GeneratePostArgs
{   pub request: GenerationRequest
  , pub reply: GeneratePostReplySender
}

// ===== SetCredential =====

pub type SetCredentialReply = Result<(), crate::error::Error>;
pub type SetCredentialReplySender
  = tokio::sync::mpsc::UnboundedSender<SetCredentialReply>;

pub struct SetCredentialArgs
{   pub key: Option<String>
  , pub reply: SetCredentialReplySender
}

// ===== GetUsage =====

pub type GetUsageReply = Result<UsageCounter, crate::error::Error>;
pub type GetUsageReplySender
  = tokio::sync::mpsc::UnboundedSender<GetUsageReply>;

pub struct GetUsageArgs
{   pub reply: GetUsageReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== PostHand (sender side) =====

pub struct PostHand
{   pub generate_post_tx
      : tokio::sync::mpsc::UnboundedSender<GeneratePostArgs>
  , pub set_credential_tx
      : tokio::sync::mpsc::UnboundedSender<SetCredentialArgs>
  , pub get_usage_tx
      : tokio::sync::mpsc::UnboundedSender<GetUsageArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== PostFoot (receiver side) =====

pub struct PostFoot
{   pub generate_post_rx
      : tokio::sync::mpsc::UnboundedReceiver<GeneratePostArgs>
  , pub set_credential_rx
      : tokio::sync::mpsc::UnboundedReceiver<SetCredentialArgs>
  , pub get_usage_rx
      : tokio::sync::mpsc::UnboundedReceiver<GetUsageArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}

/// POSTGEN STRUCTURES:

/// Tone picked from the fixed label list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Hash)]
pub enum ToneLabel
{   Professional
  , Inspirational
  , Casual
  , Funny
  , Motivational
}

impl ToneLabel
{   pub const ALL: [ToneLabel; 5] = [
      ToneLabel::Professional
    , ToneLabel::Inspirational
    , ToneLabel::Casual
    , ToneLabel::Funny
    , ToneLabel::Motivational
    ];

    pub fn label(&self) -> &'static str
    {   match self
        {   ToneLabel::Professional => "Professional"
          , ToneLabel::Inspirational => "Inspirational"
          , ToneLabel::Casual => "Casual"
          , ToneLabel::Funny => "Funny"
          , ToneLabel::Motivational => "Motivational"
        }
    }

    pub fn from_label(label: &str) -> Option<Self>
    {   Self::ALL.into_iter()
          .find(|t| t.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Tone of the post: a label, or a creativity value in [0, 1]
/// (0 = formal, 1 = creative) used directly as temperature
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub enum Tone
{   Label(ToneLabel)
  , Creativity(f32)
}

/// Temperature used when the tone carries no numeric value
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

impl Tone
{   pub fn temperature(&self) -> f32
    {   match self
        {   Tone::Label(_) => DEFAULT_TEMPERATURE
          , Tone::Creativity(value) => *value
        }
    }
}

impl Default for Tone
{   fn default() -> Self
    {   Tone::Creativity(DEFAULT_TEMPERATURE)
    }
}

/// Preset categories; anything but `None` replaces the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Hash, Default)]
pub enum Category
{   #[default]
    None
  , Leadership
  , Startups
  , CareerGrowth
  , Teamwork
  , Innovation
}

impl Category
{   pub const ALL: [Category; 6] = [
      Category::None
    , Category::Leadership
    , Category::Startups
    , Category::CareerGrowth
    , Category::Teamwork
    , Category::Innovation
    ];

    pub fn label(&self) -> &'static str
    {   match self
        {   Category::None => "None"
          , Category::Leadership => "Leadership"
          , Category::Startups => "Startups"
          , Category::CareerGrowth => "Career Growth"
          , Category::Teamwork => "Teamwork"
          , Category::Innovation => "Innovation"
        }
    }

    pub fn from_label(label: &str) -> Option<Self>
    {   Self::ALL.into_iter()
          .find(|c| c.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Fixed instruction for the category, `None` has none
    pub fn preset(&self) -> Option<&'static str>
    {   match self
        {   Category::None => None
          , Category::Leadership => Some(
              "Write a professional LinkedIn post about \
               leadership and inspiring teams."
            )
          , Category::Startups => Some(
              "Write an engaging LinkedIn post highlighting \
               startup culture and entrepreneurship."
            )
          , Category::CareerGrowth => Some(
              "Create a professional LinkedIn post about \
               career growth and personal development."
            )
          , Category::Teamwork => Some(
              "Write a LinkedIn post emphasizing teamwork \
               and collaboration."
            )
          , Category::Innovation => Some(
              "Create a LinkedIn post about innovation and \
               creative thinking in business."
            )
        }
    }
}

/// Editable templates, each with one `{topic}` placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Hash, Default)]
pub enum PromptTemplate
{   #[default]
    Inspiring
  , CareerGrowth
  , Creative
}

impl PromptTemplate
{   pub const ALL: [PromptTemplate; 3] = [
      PromptTemplate::Inspiring
    , PromptTemplate::CareerGrowth
    , PromptTemplate::Creative
    ];

    pub fn text(&self) -> &'static str
    {   match self
        {   PromptTemplate::Inspiring =>
              "Write an inspiring LinkedIn post about {topic}."
          , PromptTemplate::CareerGrowth =>
              "Create a professional post highlighting {topic} \
               for career growth."
          , PromptTemplate::Creative =>
              "Write a creative and engaging post about {topic} \
               for LinkedIn audience."
        }
    }

    pub fn from_text(text: &str) -> Option<Self>
    {   Self::ALL.into_iter().find(|t| t.text() == text)
    }
}

/// Output language; English is the default and is never wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Hash, Default)]
pub enum Language
{   #[default]
    English
  , Hindi
  , Spanish
  , French
  , German
  , Chinese
  , Tamil
  , Telugu
  , Malayalam
}

impl Language
{   pub const ALL: [Language; 9] = [
      Language::English
    , Language::Hindi
    , Language::Spanish
    , Language::French
    , Language::German
    , Language::Chinese
    , Language::Tamil
    , Language::Telugu
    , Language::Malayalam
    ];

    pub fn label(&self) -> &'static str
    {   match self
        {   Language::English => "English"
          , Language::Hindi => "Hindi"
          , Language::Spanish => "Spanish"
          , Language::French => "French"
          , Language::German => "German"
          , Language::Chinese => "Chinese"
          , Language::Tamil => "Tamil"
          , Language::Telugu => "Telugu"
          , Language::Malayalam => "Malayalam"
        }
    }

    pub fn from_label(label: &str) -> Option<Self>
    {   Self::ALL.into_iter()
          .find(|l| l.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn is_default(&self) -> bool
    {   *self == Language::default()
    }
}
