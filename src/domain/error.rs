use crate::normalizer::NormalizeError;
use crate::registry::RegistryError;
use thiserror::Error;

/// Error returned by a logging call.
///
/// Both variants are raised before any sink is touched, so a failed call
/// never delivers partially. Sink failures are not errors of the call; they
/// are reported in the [`DispatchReport`](crate::DispatchReport).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
