use crate::shared::usecase::UseCase;
use mediscan_domain::Reminder;
use mediscan_infra::MediscanContext;
use tracing::{error, info, warn};

pub const REMINDER_SUBJECT: &str = "Medication Reminder";

/// Scans every active `Reminder` and notifies its owner about every time slot
/// scheduled for the current minute which has not been served yet.
///
/// A failed notification leaves the slot untouched so that the next scan
/// within the same minute retries it. Reminders whose owner no longer
/// exists are deactivated.
#[derive(Debug)]
pub struct DispatchRemindersUseCase {
    /// Timestamp in millis of this scan
    pub now: i64,
}

/// Outcome of one scan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Notifications delivered
    pub fired: usize,
    /// Notifications that could not be delivered
    pub failed: usize,
    /// Reminders deactivated because their owner is gone
    pub deactivated: usize,
    /// Reminders with at least one new send timestamp persisted
    pub saved: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl DispatchRemindersUseCase {
    async fn deactivate(&self, reminder: &Reminder, ctx: &MediscanContext) -> bool {
        match ctx.repos.reminders.deactivate(&reminder.id).await {
            Ok(_) => {
                info!(
                    "Deactivated reminder {} as its user {} does not exist",
                    reminder.id, reminder.user_id
                );
                true
            }
            Err(e) => {
                error!("Unable to deactivate reminder {}: {:?}", reminder.id, e);
                false
            }
        }
    }

    async fn dispatch(&self, reminder: Reminder, ctx: &MediscanContext, report: &mut DispatchReport) {
        let user = match ctx.repos.users.find(&reminder.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                if self.deactivate(&reminder, ctx).await {
                    report.deactivated += 1;
                }
                return;
            }
            Err(e) => {
                error!("Unable to find user of reminder {}: {:?}", reminder.id, e);
                return;
            }
        };

        let tz = ctx.config.reminder_timezone;
        let mut saved = false;

        // Only the send timestamp of a fired slot is written back, so changes
        // made to the reminder while notifying are kept
        for (index, slot) in reminder.times.iter().enumerate() {
            if let Err(e) = slot.clock_time() {
                warn!("Skipping time slot of reminder {}: {}", reminder.id, e);
                continue;
            }
            if !slot.should_fire(self.now, &tz) {
                continue;
            }

            let message = reminder.message(slot);
            if let Err(e) = ctx
                .notifier
                .send(&user.email, REMINDER_SUBJECT, &message)
                .await
            {
                error!(
                    "Unable to send reminder {} to {}: {:?}",
                    reminder.id, user.email, e
                );
                report.failed += 1;
                continue;
            }
            report.fired += 1;

            match ctx
                .repos
                .reminders
                .set_last_sent(&reminder.id, index, self.now)
                .await
            {
                Ok(_) => saved = true,
                Err(e) => error!("Unable to save reminder {}: {:?}", reminder.id, e),
            }
        }

        if saved {
            report.saved += 1;
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DispatchRemindersUseCase {
    type Response = DispatchReport;
    type Error = UseCaseError;

    const NAME: &'static str = "DispatchReminders";

    async fn execute(&mut self, ctx: &MediscanContext) -> Result<Self::Response, Self::Error> {
        let reminders = ctx
            .repos
            .reminders
            .find_active()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut report = DispatchReport::default();
        for reminder in reminders {
            self.dispatch(reminder, ctx, &mut report).await;
        }

        Ok(report)
    }
}
