use crate::shared::usecase::{execute, UseCase};
use crate::{error::MediscanError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use mediscan_api_structs::extract_timeline_events::*;
use mediscan_domain::{date::date_of, extraction, MedicalEvent, ID};
use mediscan_infra::MediscanContext;
use tracing::info;

pub async fn extract_timeline_events_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<MediscanContext>,
) -> Result<HttpResponse, MediscanError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = ExtractTimelineEventsUseCase {
        user_id: user.id,
        file_id: body.file_id,
        hospital: body.hospital.unwrap_or_default(),
        text_content: body.text_content,
    };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Created().json(APIResponse::new(events)))
        .map_err(MediscanError::from)
}

/// Extracts medical events from the text of a document and stores them in
/// the timeline of the `User`
#[derive(Debug)]
pub struct ExtractTimelineEventsUseCase {
    pub user_id: ID,
    pub file_id: ID,
    pub hospital: String,
    pub text_content: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    InsufficientContent(usize),
}

impl From<UseCaseError> for MediscanError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::InsufficientContent(min_len) => Self::InsufficientContent(format!(
                "The document needs to contain at least {} characters of text",
                min_len
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ExtractTimelineEventsUseCase {
    type Response = Vec<MedicalEvent>;
    type Error = UseCaseError;

    const NAME: &'static str = "ExtractTimelineEvents";

    async fn execute(&mut self, ctx: &MediscanContext) -> Result<Self::Response, Self::Error> {
        let min_len = ctx.config.min_extraction_text_len;
        let text = self.text_content.trim();
        if text.chars().count() < min_len {
            return Err(UseCaseError::InsufficientContent(min_len));
        }

        let now = ctx.sys.get_timestamp_millis();
        let today = date_of(now, &ctx.config.reminder_timezone)
            .unwrap_or_else(|| Utc::now().date_naive());

        let events = extraction::extract(text, today)
            .into_iter()
            .map(|candidate| candidate.into_event(self.user_id, self.file_id, &self.hospital, now))
            .collect::<Vec<_>>();
        info!(
            "Extracted {} events from document {}",
            events.len(),
            self.file_id
        );

        ctx.repos
            .medical_events
            .bulk_insert(&events)
            .await
            .map(|_| events)
            .map_err(|_| UseCaseError::StorageError)
    }
}
