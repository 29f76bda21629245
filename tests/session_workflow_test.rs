//! Session Workflow Integration Tests
//!
//! Drives the interactive menu end to end with scripted input:
//! - Manual segments and presets
//! - History view and clearing
//! - Exporting to text files
//! - Editing presets and the sampling rate, and persisting them

mod common;

use common::{TestFixture, output, small_settings};
use wave2text::{Preset, PulseTrain, get_settings};

// =============================================================================
// Building Waveforms
// =============================================================================

#[test]
fn test_manual_segment_uses_loaded_pulse() {
    let fixture = TestFixture::with_files(&small_settings(), "1\r\n1\r\n");

    // 2 Hz for 1 s, filler 0, confirm, then exit
    let session = fixture.run("1\n2\n1\n0\ny\n8\ny\n");

    assert_eq!(session.pulse(), &[1.0, 1.0]);
    assert_eq!(
        session.waveform().samples(),
        &[1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0]
    );
    assert_eq!(session.waveform().history()[0].name, "Manual");
}

#[test]
fn test_presets_are_appended_in_selection_order() {
    let mut settings = small_settings();
    settings.filler = 0.5;
    settings.presets = vec![
        PulseTrain::new(1.0, 0.5, 0.0).into(),
        Preset {
            pulse_frequency_hz: 0.0,
            duration_sec: 0.2,
            filler: None,
        },
    ];
    let fixture = TestFixture::with_files(&settings, "9");

    let session = fixture.run("2\n1 0 1\n8\ny\n");

    let names: Vec<&str> = session
        .waveform()
        .history()
        .iter()
        .map(|h| h.name.as_str())
        .collect();
    assert_eq!(names, ["Preset 1", "Preset 0", "Preset 1"]);
    assert_eq!(
        session.waveform().samples(),
        &[0.5, 0.5, 9.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.5]
    );
}

#[test]
fn test_preset_selection_reprompts_on_bad_index() {
    let mut settings = small_settings();
    settings.presets = vec![PulseTrain::new(1.0, 1.0, 0.0).into()];
    let fixture = TestFixture::with_files(&settings, "1");

    let session = fixture.run("2\n5\n0\n8\ny\n");

    assert_eq!(session.waveform().history().len(), 1);
    let out = output(session);
    assert!(out.contains("error: 5 is not a valid choice"));
    assert!(out.contains("Pulse frequency: 1 Hz"));
}

// =============================================================================
// History and Clearing
// =============================================================================

#[test]
fn test_view_history_on_empty_waveform() {
    let fixture = TestFixture::with_files(&small_settings(), "1");
    let session = fixture.run("3\n8\ny\n");
    assert!(output(session).contains("Waveform is empty. Returning to menu..."));
}

#[test]
fn test_view_history_lists_segments() {
    let fixture = TestFixture::with_files(&small_settings(), "1");
    let session = fixture.run("1\n0\n1\n0\ny\n3\n\n8\ny\n");

    let out = output(session);
    assert!(out.contains(
        "Manual\n    Sampling rate:   10 Hz\n    Pulse frequency: 0 Hz\n    Duration:        1 s\n    Filler:          0\n"
    ));
    assert!(out.contains("Total: 10 samples (1 s at 10 Hz)"));
}

#[test]
fn test_clear_waveform_needs_confirmation() {
    let fixture = TestFixture::with_files(&small_settings(), "1");

    let kept = fixture.run("1\n0\n1\n0\ny\n4\nn\n8\ny\n");
    assert_eq!(kept.waveform().len(), 10);

    let cleared = fixture.run("1\n0\n1\n0\ny\n4\ny\n8\ny\n");
    assert!(cleared.waveform().is_empty());
    assert!(output(cleared).contains("Waveform cleared."));
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn test_export_writes_samples_and_history() {
    let fixture = TestFixture::with_files(&small_settings(), "-1\n1");

    // 5 Hz for 0.4 s, export as "trial", keep waveform, exit
    let session = fixture.run("1\n5\n0.4\n0\ny\n5\ntrial\nn\n8\ny\n");
    assert_eq!(session.waveform().len(), 4);

    assert_eq!(fixture.read_saved("trial.txt"), "-1\n1\n-1\n1");
    let history = fixture.read_saved("trial_history.txt");
    assert!(history.starts_with("Manual\n"));
    assert!(history.contains("Duration:        0.4 s"));
    assert!(history.ends_with("Filler:          0"));

    let out = output(session);
    assert!(out.contains("Waveform saved."));
    assert!(out.contains("Waveform history saved."));
}

#[test]
fn test_export_then_clear() {
    let fixture = TestFixture::with_files(&small_settings(), "1");
    let session = fixture.run("1\n0\n0.5\n2\ny\n5\nrun\ny\n8\ny\n");

    assert!(session.waveform().is_empty());
    assert_eq!(fixture.read_saved("run.txt"), "2\n2\n2\n2\n2");
}

#[test]
fn test_export_reprompts_on_invalid_name() {
    let fixture = TestFixture::with_files(&small_settings(), "1");
    let session = fixture.run("1\n0\n0.1\n0\ny\n5\n../escape\nok\nn\n8\ny\n");

    assert!(output(session).contains("Invalid file name '../escape'"));
    assert!(fixture.saved_dir().join("ok.txt").exists());
    assert!(!fixture.config_dir().join("escape.txt").exists());
}

#[test]
fn test_export_blank_name_uses_timestamp() {
    let fixture = TestFixture::with_files(&small_settings(), "1");
    fixture.run("1\n0\n0.1\n0\ny\n5\n\nn\n8\ny\n");

    let names: Vec<String> = std::fs::read_dir(fixture.saved_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.iter().all(|n| n.starts_with("waveform_")));
}

// =============================================================================
// Presets and Sampling Rate
// =============================================================================

#[test]
fn test_add_and_save_preset() {
    let fixture = TestFixture::with_files(&small_settings(), "1");

    // preset menu: add 4 Hz / 2 s / filler 0, save, return; then exit
    let session = fixture.run("6\n1\n4\n2\n0\ny\n3\n4\n8\ny\n");
    assert_eq!(session.settings().presets.len(), 1);

    let saved = get_settings(fixture.settings_path()).unwrap();
    assert_eq!(saved.presets, vec![Preset::from(PulseTrain::new(4.0, 2.0, 0.0))]);
}

#[test]
fn test_remove_presets() {
    let mut settings = small_settings();
    settings.presets = vec![
        PulseTrain::new(1.0, 1.0, 0.0).into(),
        PulseTrain::new(2.0, 1.0, 0.0).into(),
        PulseTrain::new(3.0, 1.0, 0.0).into(),
    ];
    let fixture = TestFixture::with_files(&settings, "1");

    let session = fixture.run("6\n2\n2 0 2\n4\n8\ny\n");

    let remaining = &session.settings().presets;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].pulse_frequency_hz, 2.0);

    // not saved, so the file still has all three
    assert_eq!(get_settings(fixture.settings_path()).unwrap().presets.len(), 3);
}

#[test]
fn test_edit_sample_rate_for_session_only() {
    let fixture = TestFixture::with_files(&small_settings(), "1");
    let session = fixture.run("7\n0\n20\nn\n1\n0\n1\n0\ny\n8\ny\n");

    assert_eq!(session.sample_rate_hz(), 20.0);
    assert_eq!(session.waveform().len(), 20);
    assert_eq!(get_settings(fixture.settings_path()).unwrap().sample_rate_hz, 10.0);
    assert!(output(session).contains("[7]. Edit sampling rate (20 Hz)."));
}

#[test]
fn test_edit_sample_rate_and_save() {
    let fixture = TestFixture::with_files(&small_settings(), "1");
    fixture.run("7\n250\ny\n8\ny\n");

    assert_eq!(get_settings(fixture.settings_path()).unwrap().sample_rate_hz, 250.0);
}

#[test]
fn test_oversized_sample_rate_is_reprompted() {
    let fixture = TestFixture::with_files(&small_settings(), "1");
    let session = fixture.run("7\n1e19\n20\nn\n8\ny\n");

    assert_eq!(session.sample_rate_hz(), 20.0);
    assert!(output(session).contains("error: Value must be at most 10000000"));
}

// =============================================================================
// Rejected Segments
// =============================================================================

#[test]
fn test_frequency_above_sample_rate_is_rejected() {
    let fixture = TestFixture::with_files(&small_settings(), "1");

    // 1e15 Hz at 10 Hz, then a valid 2 Hz segment
    let session = fixture.run("1\n1e15\n1\n0\ny\n1\n2\n1\n0\ny\n8\ny\n");

    assert_eq!(session.waveform().history().len(), 1);
    assert_eq!(session.waveform().len(), 10);
    assert!(output(session).contains(
        "error: Invalid pulse frequency: Value must be at most the sampling rate (10 Hz)"
    ));
}

#[test]
fn test_oversized_segment_is_rejected() {
    let fixture = TestFixture::with_files(&small_settings(), "1");
    let session = fixture.run("1\n0\n1e300\n0\ny\n8\ny\n");

    assert!(session.waveform().is_empty());
    assert!(output(session).contains("error: Invalid duration: Segment would hold"));
}
