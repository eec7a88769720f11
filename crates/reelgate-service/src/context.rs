use tokio_util::sync::CancellationToken;

/// The authenticated user reference, resolved by the upstream auth
/// collaborator before a request reaches the orchestrator.
pub type UserId = i64;

/// Per-request state threaded into every orchestrator entry point.
///
/// Built fresh by the transport for each inbound call; identity and
/// cancellation are never cached or shared across requests.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    identity: Option<UserId>,
    cancel: CancellationToken,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(mut self, user_id: UserId) -> Self {
        self.identity = Some(user_id);
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn identity(&self) -> Option<UserId> {
        self.identity
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }
}
