use crate::shared::usecase::UseCase;
use mediscan_infra::MediscanContext;
use tracing::error;

pub const VITALS_REMINDER_SUBJECT: &str = "Time to update your health vitals";

/// E-mails every `User` whose latest vitals are missing or more than 30 days old
#[derive(Debug)]
pub struct SendVitalsRemindersUseCase {
    pub now: i64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VitalsReminderReport {
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendVitalsRemindersUseCase {
    type Response = VitalsReminderReport;
    type Error = UseCaseError;

    const NAME: &'static str = "SendVitalsReminders";

    async fn execute(&mut self, ctx: &MediscanContext) -> Result<Self::Response, Self::Error> {
        let users = ctx
            .repos
            .users
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut report = VitalsReminderReport::default();
        for user in users.iter().filter(|u| u.needs_vitals_reminder(self.now)) {
            let body = user.vitals_reminder_message();
            match ctx
                .notifier
                .send(&user.email, VITALS_REMINDER_SUBJECT, &body)
                .await
            {
                Ok(_) => report.sent += 1,
                Err(e) => {
                    error!("Unable to send vitals reminder to {}: {:?}", user.email, e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}
