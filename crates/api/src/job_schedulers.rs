use crate::{
    reminder::dispatch_reminders::{DispatchReport, DispatchRemindersUseCase},
    shared::usecase::execute,
    vitals::send_vitals_reminders::{SendVitalsRemindersUseCase, VitalsReminderReport},
};
use actix_web::rt::task::JoinHandle;
use mediscan_domain::date::{next_monthly_run, to_datetime};
use mediscan_infra::MediscanContext;
use std::time::Duration;
use tokio::{
    sync::watch,
    time::{interval, sleep, MissedTickBehavior},
};
use tracing::{error, info};

/// Vitals reminders go out at this hour on this day of every month
const VITALS_REMINDER_DAY: u32 = 1;
const VITALS_REMINDER_HOUR: u32 = 9;

/// Handle to a running job. The job stops when the handle is stopped or dropped.
pub struct JobHandle {
    stop_sender: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl JobHandle {
    /// Signals the job to stop and waits for the tick in progress to finish
    pub async fn stop(self) {
        let _ = self.stop_sender.send(true);
        if let Err(e) = self.handle.await {
            error!("Job did not shut down cleanly: {:?}", e);
        }
    }
}

/// Periodically delivers the medication reminders which are due.
///
/// Ticks never overlap: the next tick is only awaited once the scan of the
/// previous has completed, and ticks missed in the meantime are skipped.
pub struct ReminderDispatcher {
    ctx: MediscanContext,
    period: Duration,
}

impl ReminderDispatcher {
    pub fn new(ctx: MediscanContext) -> Self {
        let period = Duration::from_secs(ctx.config.reminder_tick_secs);
        Self { ctx, period }
    }

    pub async fn tick(&self) -> DispatchReport {
        let usecase = DispatchRemindersUseCase {
            now: self.ctx.sys.get_timestamp_millis(),
        };
        execute(usecase, &self.ctx).await.unwrap_or_default()
    }

    pub fn start(self) -> JobHandle {
        let (stop_sender, mut stop_receiver) = watch::channel(false);
        let handle = actix_web::rt::spawn(async move {
            let mut interval = interval(self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let report = self.tick().await;
                        if report != DispatchReport::default() {
                            info!("Reminder dispatch: {:?}", report);
                        }
                    }
                    _ = stop_receiver.changed() => break,
                }
            }
            info!("Reminder dispatcher stopped");
        });

        JobHandle {
            stop_sender,
            handle,
        }
    }
}

/// Reminds users to log their vitals at 09:00 on the first of every month
/// in the configured timezone
pub struct VitalsReminderJob {
    ctx: MediscanContext,
}

impl VitalsReminderJob {
    pub fn new(ctx: MediscanContext) -> Self {
        Self { ctx }
    }

    /// Millis until the next run, `None` if it can not be determined
    fn millis_to_next_run(&self) -> Option<i64> {
        let now = self.ctx.sys.get_timestamp_millis();
        let now_local = to_datetime(now, &self.ctx.config.reminder_timezone)?;
        let next = next_monthly_run(&now_local, VITALS_REMINDER_DAY, VITALS_REMINDER_HOUR)?;
        Some((next.timestamp_millis() - now).max(0))
    }

    pub async fn run(&self) -> VitalsReminderReport {
        let usecase = SendVitalsRemindersUseCase {
            now: self.ctx.sys.get_timestamp_millis(),
        };
        execute(usecase, &self.ctx).await.unwrap_or_default()
    }

    pub fn start(self) -> JobHandle {
        let (stop_sender, mut stop_receiver) = watch::channel(false);
        let handle = actix_web::rt::spawn(async move {
            loop {
                let delay = match self.millis_to_next_run() {
                    Some(delay) => delay,
                    None => {
                        error!("Unable to compute the next vitals reminder run");
                        break;
                    }
                };
                tokio::select! {
                    _ = sleep(Duration::from_millis(delay as u64)) => {
                        let report = self.run().await;
                        info!("Vitals reminders: {:?}", report);
                    }
                    _ = stop_receiver.changed() => break,
                }
            }
            info!("Vitals reminder job stopped");
        });

        JobHandle {
            stop_sender,
            handle,
        }
    }
}
