//! Real-time driver on tokio's clock.
//!
//! The navigator itself only knows virtual time. This driver sleeps
//! until each next deadline and advances the navigator by the time that
//! actually elapsed, so effects fire at wall-clock pace.

use crate::navigator::Navigator;
use tokio::time::Instant;

/// Drive `navigator` until no effect is pending.
pub async fn drive_until_idle(navigator: &mut Navigator) {
    let mut last = Instant::now();

    while let Some(deadline) = navigator.next_deadline() {
        let wait = deadline.saturating_sub(navigator.now());
        tokio::time::sleep(wait).await;

        let now = Instant::now();
        navigator.advance(now.duration_since(last));
        last = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenflow_interchange::{FlowRecord, InterfaceNode, ScreenSpec};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_drives_all_phases() {
        let mut nav = Navigator::default();
        nav.initialize_screen_network(&ScreenSpec::new(
            vec![
                InterfaceNode::new("home", ["open_settings"]),
                InterfaceNode::new("settings", Vec::<String>::new()),
            ],
            vec![FlowRecord::new("home", "settings", "open_settings")],
        ));

        let started = tokio::time::Instant::now();
        nav.navigate_to_screen("settings", "ui", "open_settings");
        drive_until_idle(&mut nav).await;

        assert!(nav.is_idle());
        assert_eq!(nav.state().current_screen, "settings");
        assert!(!nav.path_effect().is_lit());
        assert!(started.elapsed() >= Duration::from_millis(1300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_navigator_returns_immediately() {
        let mut nav = Navigator::default();
        drive_until_idle(&mut nav).await;
        assert_eq!(nav.now(), Duration::ZERO);
    }
}
