use crate::shared::usecase::{execute, UseCase};
use crate::{error::MediscanError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use mediscan_api_structs::create_reminder::*;
use mediscan_domain::{Reminder, TimeSlot, ID};
use mediscan_infra::MediscanContext;
use tracing::warn;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<MediscanContext>,
) -> Result<HttpResponse, MediscanError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        user_id: user.id,
        medication: body.medication,
        times: body
            .times
            .into_iter()
            .map(|t| TimeSlot::new(t.time_of_day, &t.exact_time, t.food_instruction))
            .collect(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(MediscanError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: ID,
    pub medication: String,
    pub times: Vec<TimeSlot>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    MissingMedication,
    MissingTimes,
}

impl From<UseCaseError> for MediscanError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::MissingMedication => {
                Self::BadClientData("The medication name can not be empty".into())
            }
            UseCaseError::MissingTimes => {
                Self::BadClientData("A reminder needs at least one time".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &MediscanContext) -> Result<Self::Response, Self::Error> {
        if self.medication.trim().is_empty() {
            return Err(UseCaseError::MissingMedication);
        }
        if self.times.is_empty() {
            return Err(UseCaseError::MissingTimes);
        }
        // They are stored anyway, the dispatcher never fires them
        for slot in &self.times {
            if let Err(e) = slot.clock_time() {
                warn!("Reminder for {} has an unusable time: {}", self.medication, e);
            }
        }

        let now = ctx.sys.get_timestamp_millis();
        let reminder = Reminder::new(
            self.user_id,
            &self.medication,
            std::mem::take(&mut self.times),
            now,
        );

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map(|_| reminder)
            .map_err(|_| UseCaseError::StorageError)
    }
}
