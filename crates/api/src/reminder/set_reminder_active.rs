use crate::shared::usecase::{execute, UseCase};
use crate::{error::MediscanError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use mediscan_api_structs::{pause_reminder, resume_reminder};
use mediscan_domain::{Reminder, ID};
use mediscan_infra::MediscanContext;

async fn set_reminder_active(
    http_req: HttpRequest,
    reminder_id: ID,
    active: bool,
    ctx: web::Data<MediscanContext>,
) -> Result<Reminder, MediscanError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = SetReminderActiveUseCase {
        reminder_id,
        user_id: user.id,
        active,
    };

    execute(usecase, &ctx).await.map_err(MediscanError::from)
}

pub async fn pause_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<pause_reminder::PathParams>,
    ctx: web::Data<MediscanContext>,
) -> Result<HttpResponse, MediscanError> {
    let reminder = set_reminder_active(http_req, path_params.reminder_id, false, ctx).await?;
    Ok(HttpResponse::Ok().json(pause_reminder::APIResponse::new(reminder)))
}

pub async fn resume_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<resume_reminder::PathParams>,
    ctx: web::Data<MediscanContext>,
) -> Result<HttpResponse, MediscanError> {
    let reminder = set_reminder_active(http_req, path_params.reminder_id, true, ctx).await?;
    Ok(HttpResponse::Ok().json(resume_reminder::APIResponse::new(reminder)))
}

/// Pauses or resumes a `Reminder`. Paused reminders are skipped by the dispatcher.
#[derive(Debug)]
pub struct SetReminderActiveUseCase {
    pub reminder_id: ID,
    pub user_id: ID,
    pub active: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    NotFound(ID),
}

impl From<UseCaseError> for MediscanError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetReminderActiveUseCase {
    type Response = Reminder;
    type Error = UseCaseError;

    const NAME: &'static str = "SetReminderActive";

    async fn execute(&mut self, ctx: &MediscanContext) -> Result<Self::Response, Self::Error> {
        match ctx
            .repos
            .reminders
            .set_active(&self.reminder_id, &self.user_id, self.active)
            .await
        {
            Ok(Some(reminder)) => Ok(reminder),
            Ok(None) => Err(UseCaseError::NotFound(self.reminder_id)),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
