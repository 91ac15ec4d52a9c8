
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use console_doc::{
    ColorMode, Document, DocumentError, Header, LiveRegionRenderer, Panel, ProgressBar,
    ProgressState, Separator, StaticProgress,
};
use harness::{strip_sgr, HarnessTerminal};
use pretty_assertions::assert_eq;

fn renderer(terminal: &HarnessTerminal) -> LiveRegionRenderer {
    LiveRegionRenderer::new(Box::new(terminal.clone()), ColorMode::Legacy)
}

#[test]
fn width_outside_bounds_is_rejected() {
    let err = Document::new(49, true).expect_err("49 is too narrow");
    assert!(matches!(err, DocumentError::InvalidWidth { width: 49 }));
    assert_eq!(err.to_string(), "document width 49 is outside [50, 200]");
    assert!(Document::new(201, true).is_err());
}

#[test]
fn static_document_writes_every_line_in_order() {
    let terminal = HarnessTerminal::new(100, 30);
    let renderer = renderer(&terminal);

    let mut doc = Document::new(60, false).expect("width");
    doc.push(Header::new("Report"))
        .push(Separator::with_text("Section"))
        .push(Panel::new("Notes", "first line of the notes"));
    doc.render(&renderer).expect("render");

    let expected: Vec<String> = doc
        .render_lines()
        .iter()
        .map(|line| line.plain_text())
        .collect();
    let output = strip_sgr(&terminal.take_writes());
    let written: Vec<&str> = output
        .split("\r\n")
        .filter(|row| !row.is_empty())
        .map(|row| row.trim_start_matches('\r'))
        .collect();

    assert_eq!(written.len(), expected.len());
    for (row, line) in written.iter().zip(&expected) {
        assert_eq!(row.trim_end(), line.trim_end());
    }
    assert!(!renderer.is_running());
    assert_eq!(renderer.participant_count(), 0);
}

#[test]
fn narrow_terminal_clips_static_rows() {
    let terminal = HarnessTerminal::new(40, 30);
    let renderer = renderer(&terminal);

    let mut doc = Document::new(80, false).expect("width");
    doc.push(Header::new("Clipped"));
    doc.render(&renderer).expect("render");

    let output = strip_sgr(&terminal.take_writes());
    for row in output.split("\r\n").filter(|row| !row.is_empty()) {
        let row = row.trim_start_matches('\r');
        assert!(row.chars().count() <= 40, "row too wide: {row:?}");
    }
}

#[test]
fn live_document_repaints_until_work_completes() {
    let terminal = HarnessTerminal::new(100, 30);
    let renderer = renderer(&terminal);

    let copied = Arc::new(AtomicI64::new(2));
    let done = Arc::new(AtomicBool::new(false));
    let source = {
        let copied = Arc::clone(&copied);
        move || ProgressState::new(copied.load(Ordering::SeqCst), 10, "copying")
    };

    let mut doc = Document::new(60, false)
        .expect("width")
        .with_refresh_interval(Duration::from_millis(10));
    doc.push(Header::new("Backup"))
        .push(ProgressBar::new("Copy", source, Arc::clone(&done)));
    doc.render(&renderer).expect("render");

    assert_eq!(renderer.participant_count(), 1);
    std::thread::sleep(Duration::from_millis(40));

    copied.store(10, Ordering::SeqCst);
    done.store(true, Ordering::SeqCst);
    renderer.wait().expect("wait");

    let output = strip_sgr(&terminal.take_writes());
    assert!(output.contains("Backup"));
    assert!(output.contains(" 20%"));
    assert!(output.contains("100%"));
    assert!(output.contains("\x1b[?25l"));
    assert!(output.ends_with("\r\n"));
    assert!(output.contains("\x1b[?25h"));
    assert!(!renderer.is_running());
    assert_eq!(renderer.participant_count(), 0);
}

#[test]
fn stopping_twice_writes_nothing_the_second_time() {
    let terminal = HarnessTerminal::new(100, 30);
    let renderer = renderer(&terminal);

    let mut doc = Document::new(60, false)
        .expect("width")
        .with_refresh_interval(Duration::from_millis(10));
    doc.push(ProgressBar::new(
        "Forever",
        StaticProgress(ProgressState::new(1, 4, "waiting")),
        Arc::new(AtomicBool::new(false)),
    ));
    doc.render(&renderer).expect("render");
    assert!(renderer.is_running());

    renderer.stop().expect("first stop");
    assert!(!renderer.is_running());
    terminal.take_writes();

    renderer.stop().expect("second stop");
    assert_eq!(terminal.take_writes(), "");
}

#[test]
fn zero_total_renders_zero_percent_and_an_empty_track() {
    let mut doc = Document::new(60, true).expect("width");
    doc.push(ProgressBar::new(
        "Idle",
        StaticProgress(ProgressState::new(0, 0, "nothing to do")),
        Arc::new(AtomicBool::new(false)),
    ));
    let lines: Vec<String> = doc
        .render_lines()
        .iter()
        .map(|line| line.plain_text())
        .collect();
    let bar = lines
        .iter()
        .find(|line| line.contains('['))
        .expect("bar row");
    assert!(bar.contains("   0%"));
    assert!(!bar.contains('■'));
    assert!(lines.iter().any(|line| line.contains("nothing to do")));
}

#[test]
fn fixed_progress_is_drawn_complete() {
    let mut doc = Document::new(60, true).expect("width");
    doc.push(ProgressBar::fixed(
        "Done",
        ProgressState::new(3, 4, "finished"),
    ));
    let lines: Vec<String> = doc
        .render_lines()
        .iter()
        .map(|line| line.plain_text())
        .collect();
    assert!(lines.iter().any(|line| line.contains("100%")));
}
