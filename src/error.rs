use std::fmt;

/// Custom error type for post generation
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Topic is blank
    MissingTopic
  , /// Custom prompt was supplied but is blank
    MissingPrompt
  , /// A request parameter is out of range
    InvalidParameter(String)
  , /// Free post limit reached without a credential
    UsageLimitReached
    {   limit: u32
    }
  , /// No API key in any source
    MissingApiKey(String)
  , /// Model id is not in the capability table
    UnknownModel(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// HTTP request error
    HttpError(String)
  , /// API returned an error response
    ApiError(String)
  , /// API rejected the key
    Unauthorized(String)
  , /// Rate limit exceeded
    RateLimitExceeded
  , /// Failed to parse API response
    ParseError(String)
  , /// No choices in API response
    NoChoicesInResponse
  , /// Timeout error
    Timeout
  , /// Filesystem error while saving a post
    Io(String)
  , /// Generic error
    Other(String)
}

/// Coarse error classes, one per stage of an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind
{   Validation
  , Gate
  , Configuration
  , Provider
  , Io
}

impl Error
{   pub fn kind(&self) -> ErrorKind
    {   match self
        {   Error::MissingTopic
          | Error::MissingPrompt
          | Error::InvalidParameter(_) => ErrorKind::Validation
          , Error::UsageLimitReached { .. } => ErrorKind::Gate
          , Error::MissingApiKey(_)
          | Error::UnknownModel(_)
          | Error::InvalidConfiguration(_) => ErrorKind::Configuration
          , Error::Io(_) => ErrorKind::Io
          , Error::HttpError(_)
          | Error::ApiError(_)
          | Error::Unauthorized(_)
          | Error::RateLimitExceeded
          | Error::ParseError(_)
          | Error::NoChoicesInResponse
          | Error::Timeout
          | Error::Other(_) => ErrorKind::Provider
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingTopic => {
              write!(f, "Please enter a topic")
            }
          , Error::MissingPrompt => {
              write!(f, "Please enter a custom prompt")
            }
          , Error::InvalidParameter(msg) => {
              write!(f, "Invalid parameter: {}", msg)
            }
          , Error::UsageLimitReached { limit } => {
              write!(f,
                "Free post limit of {} reached. \
                 Enter your own API key for unlimited posts",
                limit
              )
            }
          , Error::MissingApiKey(source) => {
              write!(f, "Missing API key for: {}", source)
            }
          , Error::UnknownModel(model) => {
              write!(f, "Unknown model: {}", model)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ApiError(msg) => {
              write!(f, "API error: {}", msg)
            }
          , Error::Unauthorized(msg) => {
              write!(f, "Unauthorized: {}", msg)
            }
          , Error::RateLimitExceeded => {
              write!(f, "API rate limit exceeded")
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::NoChoicesInResponse => {
              write!(f, "API response contained no choices")
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::Io(msg) => {
              write!(f, "I/O error: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}

impl From<std::io::Error> for Error
{   fn from(e: std::io::Error) -> Self
    {   Error::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn test_kind_groups_by_stage()
    {   assert_eq!(Error::MissingTopic.kind(), ErrorKind::Validation);
        assert_eq!(
          Error::UsageLimitReached { limit: 3 }.kind(),
          ErrorKind::Gate
        );
        assert_eq!(
          Error::MissingApiKey("OpenAI".into()).kind(),
          ErrorKind::Configuration
        );
        assert_eq!(Error::Timeout.kind(), ErrorKind::Provider);
        assert_eq!(Error::Io("denied".into()).kind(), ErrorKind::Io);
    }

    #[test]
    fn test_api_error_message_is_verbatim()
    {   let e = Error::ApiError("quota exhausted".to_string());
        assert_eq!(e.to_string(), "API error: quota exhausted");
    }
}
