use super::parse_timeline_filter;
use crate::shared::usecase::{execute, UseCase};
use crate::{error::MediscanError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use mediscan_api_structs::get_timeline::*;
use mediscan_domain::{
    timeline::{group_by_year_month, sort_events},
    GroupedTimeline, MedicalEvent, TimelineFilter, ID,
};
use mediscan_infra::MediscanContext;

pub async fn get_timeline_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<MediscanContext>,
) -> Result<HttpResponse, MediscanError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetTimelineUseCase {
        user_id: user.id,
        filter: parse_timeline_filter(&query_params)?,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.events, res.grouped)))
        .map_err(MediscanError::from)
}

#[derive(Debug)]
pub struct GetTimelineUseCase {
    pub user_id: ID,
    pub filter: TimelineFilter,
}

#[derive(Debug)]
pub struct UseCaseRes {
    /// Newest first
    pub events: Vec<MedicalEvent>,
    pub grouped: GroupedTimeline,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for MediscanError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTimelineUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GetTimeline";

    async fn execute(&mut self, ctx: &MediscanContext) -> Result<Self::Response, Self::Error> {
        let mut events = ctx
            .repos
            .medical_events
            .find_by_user(&self.user_id, &self.filter)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        sort_events(&mut events);
        let grouped = group_by_year_month(events.clone());

        Ok(UseCaseRes { events, grouped })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use mediscan_domain::{EventType, MedicalEventCandidate, Severity};

    fn event(user_id: ID, date: NaiveDate, created: i64, sequence: usize) -> MedicalEvent {
        MedicalEventCandidate {
            event_date: date,
            event_type: EventType::Test,
            description: format!("Event {}", sequence),
            severity: Severity::Low,
            related_conditions: vec![],
            medications: vec![],
            sequence,
        }
        .into_event(user_id, ID::new(), "City Hospital", created)
    }

    #[actix_web::main]
    #[test]
    async fn it_returns_sorted_and_grouped_timeline() {
        let ctx = MediscanContext::create_inmemory();
        let user_id = ID::new();
        let may = NaiveDate::from_ymd_opt(2023, 5, 10).unwrap();
        let january = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let events = vec![
            event(user_id, january, 1, 0),
            event(user_id, may, 1, 1),
            event(user_id, may, 1, 0),
            event(ID::new(), may, 1, 0),
        ];
        ctx.repos.medical_events.bulk_insert(&events).await.unwrap();

        let usecase = GetTimelineUseCase {
            user_id,
            filter: Default::default(),
        };
        let res = execute(usecase, &ctx).await.expect("To get timeline");
        let order = res
            .events
            .iter()
            .map(|e| (e.event_date, e.sequence))
            .collect::<Vec<_>>();
        assert_eq!(order, vec![(may, 0), (may, 1), (january, 0)]);

        assert_eq!(res.grouped[&2023][&4].len(), 2);
        assert_eq!(res.grouped[&2023][&0].len(), 1);
    }
}
