//! One user session: credential, free-post counter and attempts

use log::{debug, error, info, trace, warn};

/// Where an attempt is, or where the last one ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState
{   Idle
  , Validating
  , /// Missing or invalid field
    Rejected
  , /// Free-post limit reached
    Gated
  , Submitting
  , Succeeded
  , /// Provider call failed
    Failed
}

/// Session state. `generate` takes `&mut self`, so one attempt at
/// a time; the gate always runs before the provider call.
pub struct PostSession<P>
{   config: crate::config::GeneratorConfig
  , provider: P
  , user_key: Option<String>
  , counter: crate::usage::UsageCounter
  , state: AttemptState
  , last_outcome: AttemptState
}

impl<P> PostSession<P>
where P: crate::providers::TextGenerationProvider
{   pub fn new(
      config: crate::config::GeneratorConfig
    , provider: P
    ) -> Self
    {   debug!("Starting session, limit {}", config.free_post_limit);
        let mut counter
          = crate::usage::UsageCounter::new(config.free_post_limit);
        counter.has_overriding_credential = config.unlimited_default;
        PostSession
        {   config
          , provider
          , user_key: None
          , counter
          , state: AttemptState::Idle
          , last_outcome: AttemptState::Idle
        }
    }

    /// Set or clear the user's key. A non-blank key lifts the limit.
    pub fn set_credential(&mut self, key: Option<String>)
    {   self.user_key = key
          .map(|k| k.trim().to_string())
          .filter(|k| !k.is_empty());
        self.counter.has_overriding_credential
          = self.user_key.is_some() || self.config.unlimited_default;
        debug!(
          "Credential {}",
          if self.user_key.is_some() { "set" } else { "cleared" }
        );
    }

    pub fn usage(&self) -> crate::usage::UsageCounter
    {   self.counter
    }

    pub fn state(&self) -> AttemptState
    {   self.state
    }

    /// Terminal state of the most recent attempt
    pub fn last_state(&self) -> AttemptState
    {   self.last_outcome
    }

    fn api_key(&self) -> Result<String, crate::error::Error>
    {   self.user_key.clone()
          .or_else(|| self.config.default_api_key.clone())
          .ok_or_else(|| {
            error!("No API key configured");
            crate::error::Error::MissingApiKey("OpenAI".to_string())
          })
    }

    fn finish(&mut self, outcome: AttemptState)
    {   self.last_outcome = outcome;
        self.state = AttemptState::Idle;
    }

    /// Run one attempt end to end
    pub async fn generate(
      &mut self
    , request: &crate::request::GenerationRequest
    ) -> Result<crate::post::GeneratedPost, crate::error::Error>
    {   self.state = AttemptState::Validating;

        if let Err(e) = request.validate()
        {   warn!("Rejected: {}", e);
            self.finish(AttemptState::Rejected);
            return Err(e);
        }

        let api_key = match self.api_key()
        {   Ok(key) => key
          , Err(e) => {
              self.finish(AttemptState::Rejected);
              return Err(e);
            }
        };

        let decision = self.counter.try_consume();
        if !decision.allowed
        {   warn!("Free post limit reached");
            self.finish(AttemptState::Gated);
            return Err(crate::error::Error::UsageLimitReached
            {   limit: self.counter.limit
            });
        }

        self.state = AttemptState::Submitting;
        let call = request.to_call(api_key);
        debug!("Submitting {}", call_summary(&call));
        trace!("Submitting {:?}", call);

        match self.provider.generate(&call).await
        {   Ok(text) => {
              let post = crate::post::GeneratedPost::new(text);
              info!("Generated post, {} words", post.word_count);
              self.finish(AttemptState::Succeeded);
              Ok(post)
            }
          , Err(e) => {
              error!("Generation failed: {}", e);
              self.finish(AttemptState::Failed);
              Err(e)
            }
        }
    }
}

/// Debug-level view of a call: no prompt, no key
fn call_summary(call: &crate::providers::GenerationCall) -> String
{   format!(
      "model={} temperature={} max_tokens={}",
      call.model.id(), call.temperature, call.max_tokens
    )
}
