use super::IMedicalEventRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use chrono::NaiveDate;
use mediscan_domain::{
    EventType, MedicalEvent, Medication, Severity, TimelineFilter, ID,
};
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson, Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoMedicalEventRepo {
    collection: Collection<Document>,
}

impl MongoMedicalEventRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("medical-events"),
        }
    }
}

#[async_trait::async_trait]
impl IMedicalEventRepo for MongoMedicalEventRepo {
    async fn bulk_insert(&self, events: &[MedicalEvent]) -> anyhow::Result<()> {
        mongo_repo::bulk_insert::<_, MedicalEventMongo>(&self.collection, events).await
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        filter: &TimelineFilter,
    ) -> anyhow::Result<Vec<MedicalEvent>> {
        let mut query = doc! {
            "user_id": user_id.inner()
        };
        // Dates are stored as YYYY-MM-DD strings which compare like the dates
        if let Some(range) = &filter.date_range {
            query.insert(
                "event_date",
                doc! {
                    "$gte": range.start.to_string(),
                    "$lte": range.end.to_string()
                },
            );
        }
        if let Some(event_type) = &filter.event_type {
            query.insert("event_type", to_bson(event_type)?);
        }
        if let Some(severity) = &filter.severity {
            query.insert("severity", to_bson(severity)?);
        }

        let mut events =
            mongo_repo::find_many_by::<_, MedicalEventMongo>(&self.collection, query).await?;
        // Hospital names are compared case insensitively
        events.retain(|e| filter.matches(e));
        Ok(events)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MedicalEventMongo {
    _id: ObjectId,
    user_id: ObjectId,
    file_id: ObjectId,
    hospital: String,
    event_date: NaiveDate,
    event_type: EventType,
    description: String,
    severity: Severity,
    related_conditions: Vec<String>,
    medications: Vec<Medication>,
    sequence: i64,
    created: i64,
}

impl MongoDocument<MedicalEvent> for MedicalEventMongo {
    fn to_domain(self) -> MedicalEvent {
        MedicalEvent {
            id: ID::from(self._id),
            user_id: ID::from(self.user_id),
            file_id: ID::from(self.file_id),
            hospital: self.hospital,
            event_date: self.event_date,
            event_type: self.event_type,
            description: self.description,
            severity: self.severity,
            related_conditions: self.related_conditions,
            medications: self.medications,
            sequence: self.sequence,
            created: self.created,
        }
    }

    fn from_domain(event: &MedicalEvent) -> Self {
        Self {
            _id: event.id.inner(),
            user_id: event.user_id.inner(),
            file_id: event.file_id.inner(),
            hospital: event.hospital.clone(),
            event_date: event.event_date,
            event_type: event.event_type,
            description: event.description.clone(),
            severity: event.severity,
            related_conditions: event.related_conditions.clone(),
            medications: event.medications.clone(),
            sequence: event.sequence,
            created: event.created,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": self._id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediscan_domain::extraction::extract;
    use mongodb::bson::{from_document, to_document};

    #[test]
    fn extracted_events_survive_document_round_trip() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let text = "EVENT: Patient diagnosed with Diabetes Mellitus on 2023-05-10, prescribed Metformin 500 mg\nEVENT: Treated for Lyme disease, severity high";
        let events = extract(text, today)
            .into_iter()
            .map(|c| c.into_event(ID::new(), ID::new(), "City Hospital", 1683707400000))
            .collect::<Vec<_>>();
        assert_eq!(events.len(), 2);

        for event in events {
            let doc = to_document(&MedicalEventMongo::from_domain(&event)).unwrap();
            // Stored as a string so that date ranges compare lexically
            assert_eq!(
                doc.get_str("event_date").unwrap(),
                event.event_date.format("%Y-%m-%d").to_string()
            );
            assert_eq!(doc.get_i64("sequence").unwrap(), event.sequence);

            let raw: MedicalEventMongo = from_document(doc).unwrap();
            assert_eq!(raw.to_domain(), event);
        }
    }
}
