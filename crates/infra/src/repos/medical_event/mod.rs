mod inmemory;
mod mongo;

pub use inmemory::InMemoryMedicalEventRepo;
use mediscan_domain::{MedicalEvent, TimelineFilter, ID};
pub use mongo::MongoMedicalEventRepo;

#[async_trait::async_trait]
pub trait IMedicalEventRepo: Send + Sync {
    async fn bulk_insert(&self, events: &[MedicalEvent]) -> anyhow::Result<()>;
    /// Events of the `User` matching the filter, in no particular order
    async fn find_by_user(
        &self,
        user_id: &ID,
        filter: &TimelineFilter,
    ) -> anyhow::Result<Vec<MedicalEvent>>;
}
