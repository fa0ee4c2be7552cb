//! Live monitoring functionality for quitstat
//!
//! This module keeps the progress dashboard up to date. The display is
//! recomputed on a timer whose period follows the refresh cadence (every
//! second during the first hour, every minute afterwards) and immediately
//! whenever the profile file changes on disk.

use crate::{
    error::{QuitstatError, Result},
    profile_loader::{LoadedProfile, ProfileLoader},
};
use chrono::{DateTime, Utc};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use quitstat_core::refresh::refresh_interval;
use quitstat_core::snapshot::ProgressSnapshot;
use quitstat_core::timezone::TimezoneConfig;
use quitstat_terminal::dashboard::ProgressDashboard;
use quitstat_terminal::output::get_formatter;
use std::{
    ffi::OsString,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::{
    sync::mpsc,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::{debug, info, warn};

// Constants for watcher thread management
const WATCHER_POLL_INTERVAL: Duration = Duration::from_millis(100);
const WATCHER_SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(200); // 2x poll interval
const WRITE_SETTLE_DELAY: Duration = Duration::from_millis(250);

/// Live monitoring state
pub struct LiveMonitor {
    loader: ProfileLoader,
    timezone: TimezoneConfig,
    json_output: bool,
    /// Overrides the adaptive cadence when set
    fixed_interval: Option<Duration>,
    /// Clear the screen and draw the boxed dashboard
    interactive: bool,
}

impl LiveMonitor {
    /// Create a new live monitor
    pub fn new(
        loader: ProfileLoader,
        timezone: TimezoneConfig,
        json_output: bool,
        fixed_interval: Option<Duration>,
    ) -> Self {
        let interactive = !json_output && is_terminal::is_terminal(std::io::stdout());
        Self {
            loader,
            timezone,
            json_output,
            fixed_interval,
            interactive,
        }
    }

    /// Start the live monitoring loop
    pub async fn run(self) -> Result<()> {
        let mut profile = self.loader.load().await?;

        // Track if we should stop
        let should_stop = Arc::new(AtomicBool::new(false));
        let should_stop_watcher = should_stop.clone();

        // Set up file watching
        let (tx, mut rx) = mpsc::channel(10);
        let profile_path = self.loader.path().to_path_buf();

        let mut watcher_handle = tokio::task::spawn_blocking(move || -> Result<()> {
            let file_name: Option<OsString> = profile_path.file_name().map(|n| n.to_os_string());
            let watched_dir = profile_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| std::path::PathBuf::from("."));

            // Watch the directory so editors that replace the file are still seen
            let mut watcher = RecommendedWatcher::new(
                move |result: notify::Result<Event>| {
                    if let Ok(event) = result
                        && matches!(
                            event.kind,
                            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                        )
                        && event
                            .paths
                            .iter()
                            .any(|path| path.file_name() == file_name.as_deref())
                    {
                        let _ = tx.blocking_send(());
                    }
                },
                Config::default(),
            )
            .map_err(|e| {
                QuitstatError::Io(std::io::Error::other(format!(
                    "Failed to create file watcher: {e}"
                )))
            })?;

            watcher
                .watch(&watched_dir, RecursiveMode::NonRecursive)
                .map_err(|e| {
                    QuitstatError::Io(std::io::Error::other(format!(
                        "Failed to watch directory {}: {e}",
                        watched_dir.display()
                    )))
                })?;

            // Keep the watcher alive until we're told to stop
            while !should_stop_watcher.load(Ordering::Acquire) {
                std::thread::sleep(WATCHER_POLL_INTERVAL);
            }

            drop(watcher);
            Ok(())
        });

        // Initial display
        let mut period = self.refresh_display(&profile, Utc::now());
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Main monitoring loop
        loop {
            let next_period = tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_display(&profile, Utc::now())
                }
                Some(()) = rx.recv() => {
                    // Profile changed, wait a bit for writes to complete
                    tokio::time::sleep(WRITE_SETTLE_DELAY).await;
                    match self.loader.load().await {
                        Ok(reloaded) => {
                            info!("Reloaded profile from {}", reloaded.path.display());
                            profile = reloaded;
                        }
                        Err(e) => warn!("Keeping previous profile, reload failed: {}", e),
                    }
                    self.refresh_display(&profile, Utc::now())
                }
                _ = tokio::signal::ctrl_c() => {
                    // Graceful shutdown
                    println!("\nExiting live monitoring mode...");
                    break;
                }
            };

            if next_period != period {
                debug!("Refresh interval changed to {:?}", next_period);
                period = next_period;
                ticker = interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            }
        }

        // Signal the watcher thread to stop
        should_stop.store(true, Ordering::Release);

        // Wait for the watcher to finish with a timeout
        tokio::select! {
            res = &mut watcher_handle => {
                match res {
                    Ok(Ok(_)) => debug!("Watcher task exited gracefully"),
                    Ok(Err(e)) => warn!("Watcher task exited with an error: {}", e),
                    Err(e) if e.is_panic() => warn!("Watcher task panicked: {:?}", e),
                    Err(e) => warn!("Watcher task was cancelled: {}", e),
                }
            }
            _ = tokio::time::sleep(WATCHER_SHUTDOWN_TIMEOUT) => {
                watcher_handle.abort();
                // The aborted task still needs to be awaited to free resources
                if let Err(e) = watcher_handle.await
                    && e.is_panic()
                {
                    warn!("Watcher task panicked during forced shutdown: {:?}", e);
                }
                warn!("Watcher task was aborted because it did not shut down gracefully in time");
            }
        }

        Ok(())
    }

    /// Period until the next redraw for `profile` evaluated at `now`
    pub fn period_for(&self, profile: &LoadedProfile, now: DateTime<Utc>) -> Duration {
        self.fixed_interval.unwrap_or_else(|| {
            let elapsed = quitstat_core::elapsed::compute_elapsed_duration(
                profile.profile.quit_timestamp(),
                now,
            );
            refresh_interval(elapsed.as_ref())
        })
    }

    /// Render one frame of output
    pub fn render_frame(&self, profile: &LoadedProfile, now: DateTime<Utc>) -> String {
        let period = self.period_for(profile, now);
        let formatter = get_formatter(self.json_output);

        match ProgressSnapshot::compute(&profile.profile, &profile.usage, now, &self.timezone) {
            Some(snapshot) if self.json_output => {
                formatter.format_status(&snapshot, &self.timezone.tz)
            }
            Some(snapshot) => {
                let dashboard = if self.interactive {
                    ProgressDashboard::new(self.timezone.tz)
                } else {
                    ProgressDashboard::plain(self.timezone.tz, 80)
                };
                dashboard.render(&snapshot, period)
            }
            None => formatter.format_no_data(),
        }
    }

    /// Redraw and return the period until the next redraw
    fn refresh_display(&self, profile: &LoadedProfile, now: DateTime<Utc>) -> Duration {
        if self.interactive {
            print!("\x1B[2J\x1B[1;1H"); // Clear screen and move cursor to top-left
        }
        println!("{}", self.render_frame(profile, now));
        self.period_for(profile, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use quitstat_core::refresh::{FAST_REFRESH, SLOW_REFRESH};
    use quitstat_core::types::{HabitProfile, QuitTimestamp, UsageCounters};

    fn loaded(quit: Option<DateTime<Utc>>) -> LoadedProfile {
        LoadedProfile {
            profile: HabitProfile::new(quit.map(QuitTimestamp::new), 20.0, 20.0, 10.0),
            usage: UsageCounters::default(),
            path: "/tmp/profile.json".into(),
        }
    }

    fn monitor(json: bool, fixed: Option<Duration>) -> LiveMonitor {
        LiveMonitor {
            loader: ProfileLoader::at("/tmp/profile.json"),
            timezone: TimezoneConfig::utc(),
            json_output: json,
            fixed_interval: fixed,
            interactive: false,
        }
    }

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_watcher_constants() {
        assert!(WATCHER_SHUTDOWN_TIMEOUT > WATCHER_POLL_INTERVAL);
    }

    #[test]
    fn test_adaptive_period() {
        let monitor = monitor(false, None);
        let profile = loaded(Some(utc(8, 0)));

        assert_eq!(monitor.period_for(&profile, utc(8, 30)), FAST_REFRESH);
        assert_eq!(monitor.period_for(&profile, utc(9, 0)), SLOW_REFRESH);
        assert_eq!(monitor.period_for(&loaded(None), utc(9, 0)), SLOW_REFRESH);
    }

    #[test]
    fn test_fixed_period_overrides_cadence() {
        let monitor = monitor(false, Some(Duration::from_secs(5)));
        let profile = loaded(Some(utc(8, 0)));
        assert_eq!(
            monitor.period_for(&profile, utc(8, 30)),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_render_frame_dashboard() {
        let monitor = monitor(false, None);
        let frame = monitor.render_frame(&loaded(Some(utc(8, 0))), utc(8, 30));
        assert!(frame.contains("QUITSTAT - SMOKE-FREE PROGRESS"));
        assert!(frame.contains("Refreshing every 1s"));
    }

    #[test]
    fn test_render_frame_json() {
        let monitor = monitor(true, None);
        let frame = monitor.render_frame(&loaded(Some(utc(8, 0))), utc(9, 0));
        let parsed: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(parsed["elapsed"]["hours"], 1);
    }

    #[test]
    fn test_render_frame_without_quit_date() {
        let monitor = monitor(false, None);
        let frame = monitor.render_frame(&loaded(None), utc(9, 0));
        assert!(frame.contains("No quit date recorded"));
    }
}
