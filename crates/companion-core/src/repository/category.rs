//! Category source trait definition.

use companion_types::category::Category;
use companion_types::error::TransportError;

/// Read-only source of the categories a companion may belong to.
pub trait CategorySource: Send + Sync {
    /// List categories in display order.
    fn list_categories(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Category>, TransportError>> + Send;
}
