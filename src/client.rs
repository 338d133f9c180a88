use tokio::sync::mpsc;
use log::{debug, error, info};
use crate::PostFoot;

/// Public API for one session - owns the task
pub struct PostBackend
{   hand: crate::PostHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl PostBackend
{   /// Create and spawn a session backend
    /// Returns immediately - spawns background task
    pub fn new<P>(
      config: crate::config::GeneratorConfig
    , provider: P
    ) -> Self
    where P: crate::providers::TextGenerationProvider + 'static
    {   debug!("Creating PostBackend with task ownership");

        let (generate_post_tx, generate_post_rx)
          = mpsc::unbounded_channel();
        let (set_credential_tx, set_credential_rx)
          = mpsc::unbounded_channel();
        let (get_usage_tx, get_usage_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = crate::PostHand
        {   generate_post_tx
          , set_credential_tx
          , get_usage_tx
          , kill_process_tx
        };

        let foot = crate::PostFoot
        {   generate_post_rx
          , set_credential_rx
          , get_usage_rx
          , kill_process_rx
        };

        let session = crate::session::PostSession::new(config, provider);
        let _task_handle = tokio::spawn(async move {
          run_backend_loop(foot, session).await
        });

        PostBackend
        {   hand
          , _task_handle
        }
    }

    /// Backend talking to the configured OpenAI endpoint
    pub fn with_openai(
      config: crate::config::GeneratorConfig
    ) -> Result<Self, crate::error::Error>
    {   config.validate()?;
        let provider
          = crate::providers::OpenAiClient::new(&config.provider)?;
        Ok(PostBackend::new(config, provider))
    }

    /// Queue a generation - returns almost immediately
    pub async fn generate(
      &self
    , request: crate::request::GenerationRequest
    ) -> Result<
        mpsc::UnboundedReceiver<crate::GeneratePostReply>,
        crate::error::Error
      >
    {   debug!("generate queuing command for model: {}", request.model.id());
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::GeneratePostArgs
        {   request
          , reply: reply_tx
        };

        self.hand.generate_post_tx
          .send(cmd)
          .map_err(|_| disconnected())?;

        Ok(reply_rx)
    }

    /// Set or clear the user's key - returns almost immediately
    pub async fn set_credential(
      &self
    , key: Option<String>
    ) -> Result<
        mpsc::UnboundedReceiver<crate::SetCredentialReply>,
        crate::error::Error
      >
    {   debug!("set_credential queuing command");
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::SetCredentialArgs
        {   key
          , reply: reply_tx
        };

        self.hand.set_credential_tx
          .send(cmd)
          .map_err(|_| disconnected())?;

        Ok(reply_rx)
    }

    /// Read the usage counter - returns almost immediately
    pub async fn get_usage(
      &self
    ) -> Result<
        mpsc::UnboundedReceiver<crate::GetUsageReply>,
        crate::error::Error
      >
    {   debug!("get_usage queuing command");
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::GetUsageArgs
        {   reply: reply_tx
        };

        self.hand.get_usage_tx
          .send(cmd)
          .map_err(|_| disconnected())?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the backend
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down PostBackend");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::KillProcessArgs
        {   reply: reply_tx
        };

        self.hand.kill_process_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel already closed");
            crate::error::Error::Other(
              "Backend already shutdown".to_string()
            )
          })?;

        // Wait for shutdown confirmation
        if let Some(result) = reply_rx.recv().await
        {   debug!("Backend shutdown confirmed");
            result
        } else
        {   error!("Backend shutdown timeout");
            Err(crate::error::Error::Timeout)
        }
    }
}

fn disconnected() -> crate::error::Error
{   error!("Backend channel closed");
    crate::error::Error::Other(
      "Backend disconnected".to_string()
    )
}

/// Main backend event loop
///
/// Generations are awaited inside the loop, so the next command
/// is not read until the current attempt has resolved.
async fn run_backend_loop<P>(
  foot: crate::PostFoot
, mut session: crate::session::PostSession<P>
)
where P: crate::providers::TextGenerationProvider
{   debug!("Starting PostBackend event loop");
    let PostFoot
    {   mut generate_post_rx
      , mut set_credential_rx
      , mut get_usage_rx
      , mut kill_process_rx
    } = foot;

    loop
    { tokio::select!
      { Some(cmd) = generate_post_rx.recv() => {
          debug!("Received GeneratePost");
          let result = session.generate(&cmd.request).await;
          let _ = cmd.reply.send(result);
        }
      , Some(cmd) = set_credential_rx.recv() => {
          debug!("Received SetCredential");
          session.set_credential(cmd.key);
          let _ = cmd.reply.send(Ok(()));
        }
      , Some(cmd) = get_usage_rx.recv() => {
          debug!("Received GetUsage");
          let _ = cmd.reply.send(Ok(session.usage()));
        }
      , Some(cmd) = kill_process_rx.recv() => {
          debug!("Received KillProcess");
          let _ = cmd.reply.send(Ok(()));
          info!("PostBackend shutting down");
          break;
        }
      , else => {
          debug!("All command channels closed");
          break;
        }
      }
    }
}
