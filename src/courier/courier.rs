use super::*;

/// Trait for the transport that carries commands to the dealer.
///
/// The controller is transport-agnostic: a courier may write to a socket,
/// an in-process channel, or a scripted dealer. Errors are the transport's
/// own and are passed through untouched.
#[async_trait::async_trait]
pub trait Courier: Send + Sync {
    async fn send(&self, command: Command) -> anyhow::Result<()>;
}
