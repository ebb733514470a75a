use super::IMedicalEventRepo;
use crate::repos::shared::inmemory_repo::*;
use mediscan_domain::{MedicalEvent, TimelineFilter, ID};

pub struct InMemoryMedicalEventRepo {
    events: std::sync::Mutex<Vec<MedicalEvent>>,
}

impl InMemoryMedicalEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IMedicalEventRepo for InMemoryMedicalEventRepo {
    async fn bulk_insert(&self, events: &[MedicalEvent]) -> anyhow::Result<()> {
        bulk_insert(events, &self.events);
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        filter: &TimelineFilter,
    ) -> anyhow::Result<Vec<MedicalEvent>> {
        Ok(find_by(&self.events, |e| {
            e.user_id == *user_id && filter.matches(e)
        }))
    }
}
