//! Builds with the modern, name-based API, including mitigation and learning.

use std::sync::atomic::Ordering;

use duskswitch::switcher::{MODERN_API_MIN_BUILD, Theme, UNMANAGED_LIGHT_NAME};

use crate::support::{
    HarnessBuilder, MODERN_BUILD, RecordingLegacy, RecordingModern, write_theme,
};

#[test]
/// What: The dispatcher switches API generation exactly at the threshold build.
fn threshold_selects_api_generation() {
    let below = HarnessBuilder::new(MODERN_API_MIN_BUILD - 1).build();
    let at = HarnessBuilder::new(MODERN_API_MIN_BUILD).build();
    assert!(!below.applier.dispatcher().uses_modern_api());
    assert!(at.applier.dispatcher().uses_modern_api());
    assert_eq!(at.applier.dispatcher().build(), MODERN_API_MIN_BUILD);
}

#[test]
/// What: A name the modern API resolves needs no fallback.
///
/// Inputs:
/// - Modern backend knowing the internal light name; `apply_theme(Light)`.
///
/// Output:
/// - One modern call with that name; legacy API untouched; tracker on the derived file.
fn resolved_name_skips_mitigation() {
    let h = HarnessBuilder::new(MODERN_BUILD)
        .modern(RecordingModern::knowing(&[UNMANAGED_LIGHT_NAME]))
        .build();
    h.applier.apply_theme(Theme::Light);

    assert_eq!(h.modern.calls(), vec![UNMANAGED_LIGHT_NAME.to_string()]);
    assert!(h.legacy.applied().is_empty());
    assert_eq!(h.legacy.name_queries.load(Ordering::SeqCst), 0);
    assert_eq!(
        h.applier.context().active_path().as_deref(),
        Some(h.applier.paths().for_theme(Theme::Light))
    );
    assert!(h.applier.context().learned_names().is_empty());
}

#[test]
/// What: An unresolved name falls back to the legacy API and learns the OS name.
///
/// Inputs:
/// - Managed file named "Foo"; OS reports "Foo (3)", later "Foo (4)".
///
/// Output:
/// - Legacy apply of the file; "Foo" -> "Foo (3)" learned, then overwritten with
///   "Foo (4)"; a single association remains.
fn unresolved_name_is_learned_then_overwritten() {
    let h = HarnessBuilder::new(MODERN_BUILD)
        .legacy(RecordingLegacy::reporting("Foo (3)"))
        .build();
    let foo = write_theme(h.dir.path(), "foo.theme", "Foo");

    h.applier.apply_managed_theme(&foo);
    assert_eq!(h.legacy.applied(), vec![foo.clone()]);
    assert_eq!(
        h.applier.context().learned_names(),
        vec![("Foo".to_string(), "Foo (3)".to_string())]
    );
    assert_eq!(h.applier.context().active_path(), Some(foo.clone()));

    h.legacy.set_os_name("Foo (4)");
    h.applier.apply_managed_theme(&foo);
    assert_eq!(
        h.applier.context().learned_names(),
        vec![("Foo".to_string(), "Foo (4)".to_string())]
    );
}

#[test]
/// What: A learned association is used for the next modern call.
///
/// Inputs:
/// - First apply learns "Foo" -> "Foo (3)"; the modern API then knows "Foo (3)".
///
/// Output:
/// - Second modern call asks for "Foo (3)" and needs no legacy fallback.
fn learned_name_is_used_next_time() {
    let h = HarnessBuilder::new(MODERN_BUILD)
        .legacy(RecordingLegacy::reporting("Foo (3)"))
        .build();
    let foo = write_theme(h.dir.path(), "foo.theme", "Foo");

    h.applier.apply_managed_theme(&foo);
    h.modern.learn_name("Foo (3)");
    h.applier.apply_managed_theme(&foo);

    assert_eq!(
        h.modern.calls(),
        vec!["Foo".to_string(), "Foo (3)".to_string()]
    );
    assert_eq!(h.legacy.applied().len(), 1);
}

#[test]
/// What: Learned associations survive a restart through the backing file.
fn learned_names_persist_to_disk() {
    let h = HarnessBuilder::new(MODERN_BUILD)
        .legacy(RecordingLegacy::reporting("Foo (2)"))
        .learned_file("learned.json")
        .build();
    let foo = write_theme(h.dir.path(), "foo.theme", "Foo");
    h.applier.apply_managed_theme(&foo);

    let reloaded =
        duskswitch::switcher::NameLearningStore::load(&h.dir.path().join("learned.json"));
    assert_eq!(reloaded.resolve("Foo"), Some("Foo (2)"));
}

#[test]
/// What: An empty OS-reported name is still recorded, but never used for lookup.
///
/// Inputs:
/// - OS reports "" after the fallback; the same file is applied twice.
///
/// Output:
/// - "Foo" -> "" is stored; the second modern call still asks for "Foo".
fn empty_os_name_is_recorded_but_not_used() {
    let h = HarnessBuilder::new(MODERN_BUILD)
        .legacy(RecordingLegacy::reporting(""))
        .build();
    let foo = write_theme(h.dir.path(), "foo.theme", "Foo");

    h.applier.apply_managed_theme(&foo);
    assert_eq!(h.legacy.applied().len(), 1);
    assert_eq!(
        h.applier.context().learned_names(),
        vec![("Foo".to_string(), String::new())]
    );

    h.applier.apply_managed_theme(&foo);
    assert_eq!(h.modern.calls(), vec!["Foo".to_string(), "Foo".to_string()]);
    assert_eq!(h.applier.context().learned_names().len(), 1);
}

#[test]
/// What: A file without a display name is rejected without calling the modern API.
///
/// Inputs:
/// - Managed file lacking `[Theme] DisplayName`.
///
/// Output:
/// - No modern or legacy call; store untouched; tracker still set to the file.
fn extraction_failure_rejects_but_sets_tracker() {
    let h = HarnessBuilder::new(MODERN_BUILD).build();
    let nameless = h.dir.path().join("nameless.theme");
    std::fs::write(&nameless, "[Control Panel\\Colors]\r\nBackground=0 0 0\r\n")
        .expect("write nameless");

    h.applier.apply_managed_theme(&nameless);
    assert!(h.modern.calls().is_empty());
    assert!(h.legacy.applied().is_empty());
    assert!(h.applier.context().learned_names().is_empty());
    assert_eq!(h.applier.context().active_path(), Some(nameless));
}

#[test]
/// What: A failing modern call is rejected without mitigation.
///
/// Output:
/// - No legacy apply, nothing learned, tracker set to the derived file.
fn modern_failure_is_rejected() {
    let h = HarnessBuilder::new(MODERN_BUILD)
        .modern(RecordingModern {
            fail: true,
            ..RecordingModern::default()
        })
        .build();
    h.applier.apply_theme(Theme::Dark);
    assert_eq!(h.modern.calls().len(), 1);
    assert!(h.legacy.applied().is_empty());
    assert!(h.applier.context().learned_names().is_empty());
    assert_eq!(
        h.applier.context().active_path().as_deref(),
        Some(h.applier.paths().for_theme(Theme::Dark))
    );
}

#[test]
/// What: Concurrent applies for both variants serialize and leave a consistent state.
///
/// Inputs:
/// - Four threads alternating light and dark on a modern build with mitigation.
///
/// Output:
/// - Every apply reached the modern API; tracker names one of the derived files;
///   one association per internal name.
fn concurrent_applies_serialize() {
    let h = HarnessBuilder::new(MODERN_BUILD)
        .legacy(RecordingLegacy::reporting("Assigned"))
        .build();
    std::thread::scope(|s| {
        for i in 0..4 {
            let applier = &h.applier;
            s.spawn(move || {
                let theme = if i % 2 == 0 { Theme::Light } else { Theme::Dark };
                applier.apply_theme(theme);
            });
        }
    });
    assert_eq!(h.modern.calls().len(), 4);
    let active = h.applier.context().active_path().expect("tracker set");
    assert!(
        active == h.applier.paths().light || active == h.applier.paths().dark,
        "unexpected active path {}",
        active.display()
    );
    assert_eq!(h.applier.context().learned_names().len(), 2);
}
