//! Prompt assembly: presets, templates and language wrapping

use log::trace;

/// Stand-in used when the topic is blank, so previews read naturally
pub const TOPIC_FALLBACK: &str = "your topic";

/// Placeholder replaced inside templates
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// System instruction sent with every generation
pub const SYSTEM_INSTRUCTION: &str
  = "You are a professional LinkedIn content creator.";

const LANGUAGE_PREFIX: &str = "Write this LinkedIn post in ";

/// Fields that shape the template/preset prompt
#[derive(Debug, Clone, Default)]
pub struct PromptFields<'a>
{   pub topic: &'a str
  , pub category: crate::Category
  , pub template: crate::PromptTemplate
  , pub language: crate::Language
}

/// Resolve the prompt for a set of fields. Never fails, never empty.
pub fn build_prompt(fields: &PromptFields<'_>) -> String
{   let resolved = match fields.category.preset()
    {   Some(preset) => preset.to_string()
      , None => fill_template(fields.template.text(), fields.topic)
    };
    let prompt = wrap_language(&resolved, fields.language);
    trace!("Built prompt: {:?}", prompt);
    prompt
}

/// Replace `{topic}` with the trimmed topic, or the fallback when blank
pub fn fill_template(template: &str, topic: &str) -> String
{   let topic = topic.trim();
    let topic = if topic.is_empty() { TOPIC_FALLBACK } else { topic };
    template.replace(TOPIC_PLACEHOLDER, topic)
}

/// Ask for the post in `language`. Default language and already
/// wrapped prompts come back unchanged.
pub fn wrap_language(
  prompt: &str
, language: crate::Language
) -> String
{   if language.is_default() || prompt.starts_with(LANGUAGE_PREFIX)
    {   return prompt.to_string();
    }
    format!("{}{}:\n{}", LANGUAGE_PREFIX, language.label(), prompt)
}

/// Tone/audience/call-to-action prompt
pub fn build_brief_prompt(
  topic: &str
, tone: crate::ToneLabel
, audience: Option<&str>
, call_to_action: Option<&str>
) -> String
{   let topic = topic.trim();
    let topic = if topic.is_empty() { TOPIC_FALLBACK } else { topic };
    let audience = non_blank(audience).unwrap_or("General");
    let cta = non_blank(call_to_action)
      .unwrap_or("Encourage engagement");

    format!(
      "Write a {} LinkedIn post about '{}'.\n\
       Target audience: {}.\n\
       Include a strong call-to-action: {}.\n\
       Keep it concise, engaging, and add hashtags.",
      tone.label().to_lowercase(),
      topic,
      audience,
      cta
    )
}

/// Instruction for the completion shape, system line first
pub fn completion_instruction(prompt: &str) -> String
{   format!("{}\n{}", SYSTEM_INSTRUCTION, prompt)
}

fn non_blank(value: Option<&str>) -> Option<&str>
{   value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::{Category, Language, PromptTemplate, ToneLabel};

    fn fields(topic: &str) -> PromptFields<'_>
    {   PromptFields
        {   topic
          , ..PromptFields::default()
        }
    }

    #[test]
    fn test_blank_topic_uses_fallback()
    {   for topic in ["", "   ", "\t\n"]
        {   for template in PromptTemplate::ALL
            {   let prompt = build_prompt(&PromptFields
                {   template
                  , ..fields(topic)
                });
                assert!(!prompt.is_empty());
                assert!(prompt.contains(TOPIC_FALLBACK));
            }
        }
    }

    #[test]
    fn test_preset_ignores_template_and_topic()
    {   for category in Category::ALL
        {   let Some(preset) = category.preset() else { continue };
            for template in PromptTemplate::ALL
            {   let prompt = build_prompt(&PromptFields
                {   topic: "Remote work"
                  , category
                  , template
                  , language: Language::English
                });
                assert_eq!(prompt, preset);
            }
        }
    }

    #[test]
    fn test_teamwork_in_startups()
    {   let prompt = build_prompt(&PromptFields
        {   topic: "Teamwork in Startups"
          , category: Category::from_label("None").unwrap()
          , template: PromptTemplate::from_text(
              "Write an inspiring LinkedIn post about {topic}."
            ).unwrap()
          , language: Language::from_label("English").unwrap()
        });
        assert_eq!(
          prompt,
          "Write an inspiring LinkedIn post about Teamwork in Startups."
        );
    }

    #[test]
    fn test_language_wrap_applied_once()
    {   let prompt = build_prompt(&PromptFields
        {   language: Language::Spanish
          , ..fields("Hiring")
        });
        assert_eq!(
          prompt,
          "Write this LinkedIn post in Spanish:\n\
           Write an inspiring LinkedIn post about Hiring."
        );
        assert_eq!(wrap_language(&prompt, Language::French), prompt);
    }

    #[test]
    fn test_brief_prompt_defaults()
    {   let prompt = build_brief_prompt(
          "AI in hiring",
          ToneLabel::Inspirational,
          Some("  "),
          None
        );
        assert!(prompt.starts_with(
          "Write a inspirational LinkedIn post about 'AI in hiring'."
        ));
        assert!(prompt.contains("Target audience: General."));
        assert!(prompt.contains(
          "Include a strong call-to-action: Encourage engagement."
        ));
    }

    #[test]
    fn test_brief_prompt_uses_audience_and_cta()
    {   let prompt = build_brief_prompt(
          "Mentoring",
          ToneLabel::Casual,
          Some("junior engineers"),
          Some("Share your first mentor")
        );
        assert!(prompt.contains("Target audience: junior engineers."));
        assert!(prompt.contains(
          "call-to-action: Share your first mentor."
        ));
    }

    #[test]
    fn test_completion_instruction_leads_with_system_line()
    {   assert_eq!(
          completion_instruction("Go"),
          format!("{}\nGo", SYSTEM_INSTRUCTION)
        );
    }
}
