//! Companion persistence trait definition.

use companion_types::companion::{Companion, CompanionFields, CompanionId};
use companion_types::error::TransportError;

/// Repository trait for companion persistence.
///
/// Implementations live in companion-infra (e.g., HttpCompanionClient).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait CompanionRepository: Send + Sync {
    /// Create a new companion. The store assigns its id.
    fn create_companion(
        &self,
        fields: &CompanionFields,
    ) -> impl std::future::Future<Output = Result<Companion, TransportError>> + Send;

    /// Replace the fields of the companion addressed by `id`.
    fn update_companion(
        &self,
        id: &CompanionId,
        fields: &CompanionFields,
    ) -> impl std::future::Future<Output = Result<Companion, TransportError>> + Send;

    /// Fetch a stored companion, or `None` if the store does not know it.
    fn get_companion(
        &self,
        id: &CompanionId,
    ) -> impl std::future::Future<Output = Result<Option<Companion>, TransportError>> + Send;
}
