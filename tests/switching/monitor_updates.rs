//! Interaction with the active theme monitor setting.

use duskswitch::switcher::Theme;

use crate::support::{HarnessBuilder, LEGACY_BUILD};

#[test]
/// What: With monitoring off, an already applied variant is forced to refresh.
///
/// Inputs:
/// - Enabled, `monitor_active_theme = false`, dark applied.
///
/// Output:
/// - After `enforce_no_monitor_updates(Dark)` the tracker is empty and dark needs an update.
fn enforce_clears_tracker_without_monitor() {
    let h = HarnessBuilder::new(LEGACY_BUILD)
        .configure(|c| c.monitor_active_theme = false)
        .build();
    h.applier.apply_theme(Theme::Dark);
    assert!(!h.applier.needs_update(Theme::Dark, false));

    h.applier.enforce_no_monitor_updates(Theme::Dark);
    assert_eq!(h.applier.context().active_path(), None);
    assert!(h.applier.needs_update(Theme::Dark, false));
    assert!(h.monitor.pauses.lock().expect("pauses lock").is_empty());
}

#[test]
/// What: Enforcement is a no-op for the other variant and for other configurations.
///
/// Inputs:
/// - Monitoring off with target Light while dark is active; monitoring on; disabled.
///
/// Output:
/// - The tracker keeps the dark file in every case.
fn enforce_is_noop_otherwise() {
    let setups: [fn(&mut duskswitch::config::ThemeConfig); 3] = [
        |c| c.monitor_active_theme = false,
        |c| c.monitor_active_theme = true,
        |c| {
            c.enabled = false;
            c.monitor_active_theme = false;
        },
    ];
    for (i, setup) in setups.into_iter().enumerate() {
        let h = HarnessBuilder::new(LEGACY_BUILD).configure(setup).build();
        h.applier.apply_theme(Theme::Dark);
        let target = if i == 0 { Theme::Light } else { Theme::Dark };
        h.applier.enforce_no_monitor_updates(target);
        assert_eq!(
            h.applier.context().active_path().as_deref(),
            Some(h.applier.paths().for_theme(Theme::Dark)),
            "setup {i}"
        );
    }
}
