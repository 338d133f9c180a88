//! What the user filled in for one generation

use serde::{Deserialize, Serialize};

pub const MIN_MAX_TOKENS: u32 = 3;
pub const MAX_MAX_TOKENS: u32 = 800;
pub const DEFAULT_MAX_TOKENS: u32 = 400;

/// One generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest
{   /// Required, non-blank
    pub topic: String
  , pub tone: crate::Tone
  , pub audience: Option<String>
  , pub call_to_action: Option<String>
  , pub category: crate::Category
  , pub template: crate::PromptTemplate
  , pub language: crate::Language
  , pub model: crate::providers::Model
  , pub max_tokens: u32
  , /// User-edited prompt; replaces the built one when present
    pub custom_prompt: Option<String>
}

impl GenerationRequest
{   /// Request with every optional field at its default
    pub fn new(topic: impl Into<String>) -> Self
    {   GenerationRequest
        {   topic: topic.into()
          , tone: crate::Tone::default()
          , audience: None
          , call_to_action: None
          , category: crate::Category::default()
          , template: crate::PromptTemplate::default()
          , language: crate::Language::default()
          , model: crate::providers::Model::default()
          , max_tokens: DEFAULT_MAX_TOKENS
          , custom_prompt: None
        }
    }

    /// Reject anything that must not reach the gate
    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   if self.topic.trim().is_empty()
        {   return Err(crate::error::Error::MissingTopic);
        }
        if let Some(custom) = &self.custom_prompt
        {   if custom.trim().is_empty()
            {   return Err(crate::error::Error::MissingPrompt);
            }
        }
        if !(MIN_MAX_TOKENS..=MAX_MAX_TOKENS).contains(&self.max_tokens)
        {   return Err(crate::error::Error::InvalidParameter(format!(
              "max_tokens must be within {}..={}, got {}",
              MIN_MAX_TOKENS, MAX_MAX_TOKENS, self.max_tokens
            )));
        }
        if let crate::Tone::Creativity(value) = self.tone
        {   if !(0.0..=1.0).contains(&value)
            {   return Err(crate::error::Error::InvalidParameter(
                  format!("tone must be within 0.0..=1.0, got {}", value)
                ));
            }
        }
        Ok(())
    }

    /// Prompt that will be sent: custom prompt, then preset, then
    /// the tone-label prompt, then the template. Language wrapping
    /// comes last.
    pub fn resolve_prompt(&self) -> String
    {   let preset = self.category.preset();
        let base = match (&self.custom_prompt, preset, self.tone)
        {   (Some(custom), _, _) => custom.trim().to_string()
          , (None, Some(preset), _) => preset.to_string()
          , (None, None, crate::Tone::Label(label)) => {
              crate::prompt::build_brief_prompt(
                &self.topic,
                label,
                self.audience.as_deref(),
                self.call_to_action.as_deref()
              )
            }
          , (None, None, crate::Tone::Creativity(_)) => {
              return crate::prompt::build_prompt(
                &crate::prompt::PromptFields
                {   topic: &self.topic
                  , category: self.category
                  , template: self.template
                  , language: self.language
                }
              );
            }
        };
        crate::prompt::wrap_language(&base, self.language)
    }

    /// Outbound call for this request
    pub fn to_call(&self, api_key: String) -> crate::providers::GenerationCall
    {   crate::providers::GenerationCall
        {   prompt: self.resolve_prompt()
          , model: self.model
          , temperature: self.tone.temperature()
          , max_tokens: self.max_tokens
          , api_key
        }
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::{Category, Language, Tone, ToneLabel};

    #[test]
    fn test_blank_topic_rejected()
    {   assert_eq!(
          GenerationRequest::new("  ").validate(),
          Err(crate::error::Error::MissingTopic)
        );
    }

    #[test]
    fn test_blank_custom_prompt_rejected()
    {   let mut request = GenerationRequest::new("Hiring");
        request.custom_prompt = Some("\n".into());
        assert_eq!(
          request.validate(),
          Err(crate::error::Error::MissingPrompt)
        );
    }

    #[test]
    fn test_parameter_bounds()
    {   let mut request = GenerationRequest::new("Hiring");
        request.max_tokens = 0;
        assert!(request.validate().is_err());
        request.max_tokens = 801;
        assert!(request.validate().is_err());
        request.max_tokens = 3;
        assert!(request.validate().is_ok());
        request.tone = Tone::Creativity(1.5);
        assert!(request.validate().is_err());
        request.tone = Tone::Creativity(f32::NAN);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_default_request_resolves_template()
    {   let request = GenerationRequest::new("Teamwork in Startups");
        assert_eq!(
          request.resolve_prompt(),
          "Write an inspiring LinkedIn post about Teamwork in Startups."
        );
    }

    #[test]
    fn test_custom_prompt_wrapped_once()
    {   let mut request = GenerationRequest::new("Hiring");
        request.category = Category::Leadership;
        request.language = Language::German;
        request.custom_prompt = Some(" Tell a hiring story. ".into());
        assert_eq!(
          request.resolve_prompt(),
          "Write this LinkedIn post in German:\nTell a hiring story."
        );

        request.custom_prompt = Some(request.resolve_prompt());
        assert_eq!(
          request.resolve_prompt().matches("Write this LinkedIn post in")
            .count(),
          1
        );
    }

    #[test]
    fn test_label_with_audience_uses_brief_prompt()
    {   let mut request = GenerationRequest::new("Open source");
        request.tone = Tone::Label(ToneLabel::Professional);
        request.audience = Some("CTOs".into());
        let prompt = request.resolve_prompt();
        assert!(prompt.starts_with(
          "Write a professional LinkedIn post about 'Open source'."
        ));
        assert!(prompt.contains("Target audience: CTOs."));
    }

    #[test]
    fn test_preset_beats_tone_label_and_audience()
    {   let mut request = GenerationRequest::new("Remote work");
        request.category = Category::Leadership;
        request.tone = Tone::Label(ToneLabel::Casual);
        request.audience = Some("CTOs".into());
        request.call_to_action = Some("Comment below".into());
        assert_eq!(
          Some(request.resolve_prompt().as_str()),
          Category::Leadership.preset()
        );
    }

    #[test]
    fn test_label_alone_reaches_prompt_with_defaults()
    {   let mut request = GenerationRequest::new("Remote work");
        request.tone = Tone::Label(ToneLabel::Funny);
        request.audience = Some("  ".into());
        let prompt = request.resolve_prompt();
        assert!(prompt.starts_with(
          "Write a funny LinkedIn post about 'Remote work'."
        ));
        assert!(prompt.contains("Target audience: General."));
        assert!(prompt.contains(
          "Include a strong call-to-action: Encourage engagement."
        ));
    }

    #[test]
    fn test_call_carries_parameters()
    {   let mut request = GenerationRequest::new("Hiring");
        request.tone = Tone::Creativity(0.25);
        request.max_tokens = 150;
        let call = request.to_call("sk-x".into());
        assert_eq!(call.temperature, 0.25);
        assert_eq!(call.max_tokens, 150);
        assert_eq!(call.api_key, "sk-x");
        assert_eq!(call.prompt, request.resolve_prompt());
    }
}
