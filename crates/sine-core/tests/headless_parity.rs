//! A privileged relaunch must rebuild exactly the run the user chose.

mod common;

use std::fs;
use std::sync::Arc;

use common::{RecordingArchives, StubPlatform};
use sine_core::{
    AdvanceOutcome, InstallFlags, InstallerConfig, LegacyInstall, Wizard, WizardPhase,
    detect_legacy_install,
};

struct Layout {
    root: tempfile::TempDir,
}

impl Layout {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let layout = Self { root };
        fs::create_dir_all(layout.browser().join("browser")).unwrap();
        fs::create_dir_all(layout.downloads()).unwrap();
        let profile = layout.profile_root().join("abc.default-release");
        fs::create_dir_all(profile.join("chrome").join("JS")).unwrap();
        fs::create_dir_all(profile.join("chrome").join("sine-mods")).unwrap();
        fs::write(profile.join("prefs.js"), "user_pref(\"sine.version\", \"2.2\");\n").unwrap();
        layout
    }

    fn home(&self) -> std::path::PathBuf {
        self.root.path().join("home")
    }

    fn browser(&self) -> std::path::PathBuf {
        self.root.path().join("apps").join("waterfox")
    }

    fn downloads(&self) -> std::path::PathBuf {
        self.root.path().join("downloads")
    }

    fn profile_root(&self) -> std::path::PathBuf {
        self.home().join(".waterfox")
    }

    fn platform(&self) -> Arc<StubPlatform> {
        Arc::new(StubPlatform::new(&self.home(), &self.downloads()))
    }
}

fn interactive(layout: &Layout, flags: InstallFlags) -> Wizard {
    let mut wizard = Wizard::new(
        layout.platform(),
        Arc::new(RecordingArchives::default()),
        InstallerConfig::default(),
        InstallFlags::default(),
    );
    let waterfox = wizard.browsers().iter().position(|b| *b == "Waterfox").unwrap();
    wizard.select_browser(waterfox);
    assert_eq!(wizard.advance().unwrap(), WizardPhase::ConfirmPaths);
    wizard.set_browser_path(layout.browser());
    wizard.set_profile_root(layout.profile_root());
    assert_eq!(wizard.advance().unwrap(), WizardPhase::SelectProfile);
    assert_eq!(wizard.advance().unwrap(), WizardPhase::LegacyOptions);
    assert!(wizard.legacy().has_mods());
    wizard.set_uninstall(flags.uninstall);
    wizard.set_save_data(flags.save_data);
    wizard.set_reinstall_boot(flags.reinstall_boot);
    assert_eq!(wizard.advance().unwrap(), WizardPhase::Execute);
    wizard
}

fn headless(layout: &Layout, flags: InstallFlags) -> Wizard {
    Wizard::headless(
        layout.platform(),
        Arc::new(RecordingArchives::default()),
        InstallerConfig::default(),
        layout.browser(),
        &layout.profile_root().join("abc.default-release"),
        flags,
    )
}

#[test]
fn uninstall_plan_matches_interactive_choice() {
    let layout = Layout::new();
    let flags = InstallFlags {
        uninstall: true,
        ..InstallFlags::default()
    };

    let chosen = interactive(&layout, flags);
    let chosen = chosen.executor().unwrap();
    let request = chosen.elevation_request();
    assert!(request.flags.uninstall);

    let resumed = headless(&layout, request.flags);
    let resumed = resumed.executor().unwrap();

    assert_eq!(resumed.plan(), chosen.plan());
    assert_eq!(resumed.flags(), chosen.flags());
    assert_eq!(resumed.context().browser_path, chosen.context().browser_path);
    assert_eq!(resumed.context().profile_path, chosen.context().profile_path);
}

#[test]
fn reinstall_keeping_mods_matches_interactive_choice() {
    let layout = Layout::new();
    let flags = InstallFlags {
        save_data: true,
        reinstall_boot: false,
        ..InstallFlags::default()
    };

    let chosen = interactive(&layout, flags);
    let resumed = headless(&layout, chosen.executor().unwrap().elevation_request().flags);

    let (chosen, resumed) = (chosen.executor().unwrap(), resumed.executor().unwrap());
    assert_eq!(resumed.plan(), chosen.plan());
    assert_eq!(chosen.plan().len(), 9);
    assert!(resumed.flags().save_data);
}

#[test]
fn headless_uninstall_runs_to_completion() {
    let layout = Layout::new();
    let mut wizard = headless(
        &layout,
        InstallFlags {
            uninstall: true,
            ..InstallFlags::default()
        },
    );

    let executor = wizard.executor_mut().unwrap();
    let outcomes = tokio_test::block_on(async {
        let mut ran = 0;
        loop {
            match executor.advance().await {
                AdvanceOutcome::Ran { .. } => ran += 1,
                AdvanceOutcome::Completed => break ran,
                other => panic!("unexpected {other:?}"),
            }
        }
    });
    assert_eq!(outcomes, 4);
    assert!(!layout.profile_root().join("abc.default-release/chrome/sine-mods").exists());
    assert_eq!(wizard.advance().unwrap(), WizardPhase::Finished);
}

#[test]
fn uninstalled_profile_is_no_longer_detected() {
    let layout = Layout::new();
    let profile = layout.profile_root().join("abc.default-release");
    assert!(detect_legacy_install(&profile).is_present());

    let mut wizard = headless(
        &layout,
        InstallFlags {
            uninstall: true,
            ..InstallFlags::default()
        },
    );
    let executor = wizard.executor_mut().unwrap();
    tokio_test::block_on(async {
        loop {
            match executor.advance().await {
                AdvanceOutcome::Ran { .. } => {}
                AdvanceOutcome::Completed => break,
                other => panic!("unexpected {other:?}"),
            }
        }
    });

    // prefs.js still carries sine.version after the run
    assert!(fs::read_to_string(profile.join("prefs.js")).unwrap().contains("sine.version"));
    assert_eq!(detect_legacy_install(&profile), LegacyInstall::Absent);
}
