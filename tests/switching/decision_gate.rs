//! Precondition gate and idempotence through the public applier.

use duskswitch::switcher::Theme;

use crate::support::{HarnessBuilder, LEGACY_BUILD, MODERN_BUILD};

#[test]
/// What: A configuration missing either path never asks for an update.
///
/// Inputs:
/// - Configs without light, without dark, and without both.
///
/// Output:
/// - `needs_update` is false for both variants even with `skip_check`; no API call.
fn missing_paths_refuse_every_switch() {
    let configs: [fn(&mut duskswitch::config::ThemeConfig); 3] = [
        |c| c.light_theme_path = None,
        |c| c.dark_theme_path = None,
        |c| {
            c.light_theme_path = None;
            c.dark_theme_path = None;
        },
    ];
    for configure in configs {
        let h = HarnessBuilder::new(MODERN_BUILD).configure(configure).build();
        for theme in [Theme::Light, Theme::Dark] {
            assert!(!h.applier.needs_update(theme, false));
            assert!(!h.applier.needs_update(theme, true));
        }
        assert!(h.legacy.applied().is_empty());
        assert!(h.modern.calls().is_empty());
    }
}

#[test]
/// What: A light theme with the wrong extension is refused.
///
/// Inputs:
/// - Light path pointing at an existing `.txt` file.
///
/// Output:
/// - `needs_update` is false for both variants.
fn wrong_light_extension_is_refused() {
    let h = HarnessBuilder::new(LEGACY_BUILD)
        .configure(|c| {
            let light = c.light_theme_path.clone().expect("light configured");
            let txt = light.with_extension("txt");
            std::fs::copy(&light, &txt).expect("copy light");
            c.light_theme_path = Some(txt);
        })
        .build();
    assert!(!h.applier.needs_update(Theme::Light, true));
    assert!(!h.applier.needs_update(Theme::Dark, true));
}

#[test]
/// What: A configured file that does not exist is refused.
fn nonexistent_path_is_refused() {
    let h = HarnessBuilder::new(LEGACY_BUILD)
        .configure(|c| c.dark_theme_path = Some("/definitely/not/here.theme".into()))
        .build();
    assert!(!h.applier.needs_update(Theme::Dark, false));
}

#[test]
/// What: `skip_check` forces an update once the variant is already applied.
///
/// Inputs:
/// - Dark applied through the legacy path.
///
/// Output:
/// - Without `skip_check` false; with `skip_check` true; light still needs updating.
fn skip_check_overrides_idempotence() {
    let h = HarnessBuilder::new(LEGACY_BUILD).build();
    assert!(h.applier.needs_update(Theme::Dark, false));
    h.applier.apply_theme(Theme::Dark);

    assert!(!h.applier.needs_update(Theme::Dark, false));
    assert!(h.applier.needs_update(Theme::Dark, true));
    assert!(h.applier.needs_update(Theme::Light, false));
}

#[test]
/// What: Applying the same variant twice through the gate switches once.
///
/// Inputs:
/// - Two gated `apply_theme(Light)` requests.
///
/// Output:
/// - One legacy apply; tracker on the derived light file.
fn gated_apply_is_idempotent() {
    let h = HarnessBuilder::new(LEGACY_BUILD).build();
    for _ in 0..2 {
        if h.applier.needs_update(Theme::Light, false) {
            h.applier.apply_theme(Theme::Light);
        }
    }
    assert_eq!(h.legacy.applied().len(), 1);
    assert_eq!(
        h.applier.context().active_path().as_deref(),
        Some(h.applier.paths().for_theme(Theme::Light))
    );
}

#[test]
/// What: Ungated repeated applies converge on the same tracker value.
fn ungated_apply_converges() {
    let h = HarnessBuilder::new(LEGACY_BUILD).build();
    h.applier.apply_theme(Theme::Light);
    let first = h.applier.context().active_path();
    h.applier.apply_theme(Theme::Light);
    assert_eq!(h.applier.context().active_path(), first);
    assert_eq!(h.legacy.applied().len(), 2);
}

#[test]
/// What: `validate` reports the failing precondition as a crate error.
///
/// Inputs:
/// - A configuration without a dark path, then a complete one.
///
/// Output:
/// - `ThemeError::Precondition(MissingPath(Dark))` first, `Ok` second.
fn validate_reports_precondition_error() {
    use duskswitch::error::{PreconditionError, ThemeError};

    let h = HarnessBuilder::new(LEGACY_BUILD)
        .configure(|c| c.dark_theme_path = None)
        .build();
    assert!(matches!(
        h.applier.validate(),
        Err(ThemeError::Precondition(PreconditionError::MissingPath(
            Theme::Dark
        )))
    ));

    let ok = HarnessBuilder::new(LEGACY_BUILD).build();
    assert!(ok.applier.validate().is_ok());
}
