use crate::display::DisplayContent;
use crate::kiosk::Kiosk;
use chrono::{Local, NaiveDateTime, Timelike};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// The calendar is re-fetched when a tick lands exactly on 03:00:00 local time.
/// A tick that is skipped (suspended host, slow scheduler) is not made up for.
pub fn is_daily_refresh_instant(now: &NaiveDateTime) -> bool {
    now.hour() == 3 && now.minute() == 0 && now.second() == 0
}

/// Drives the once-per-second clock: logs period changes and fires the
/// daily calendar refresh.
pub fn spawn_ticker(kiosk: Kiosk) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_period: Option<String> = None;

        loop {
            ticker.tick().await;
            let now = Local::now().naive_local();

            if let DisplayContent::Period { status } = kiosk.snapshot(&now).content {
                if last_period.as_deref() != Some(status.period_name.as_str()) {
                    info!(
                        period = %status.period_name,
                        label = %status.display_label,
                        in_session = status.is_class_in_session,
                        "period changed"
                    );
                    last_period = Some(status.period_name);
                }
            }

            if is_daily_refresh_instant(&now) {
                debug!("daily calendar refresh");
                let kiosk = kiosk.clone();
                tokio::spawn(async move {
                    kiosk.refresh_calendar().await;
                });
            }
        }
    })
}
