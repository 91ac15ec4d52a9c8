//! Renders a small report with two live progress bars.
//!
//! Run with `--full-screen` to browse the same document in the scrollable view
//! (Escape exits). `RUST_LOG=console_doc=debug` logs to stderr.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use console_doc::{
    BarGraph, CancelSignal, DividedBarGraph, Document, Footer, GraphSegment, Header,
    LiveRegionRenderer, Node, Outline, Panel, ProcessTerminal, ProgressBar, ProgressState,
    Separator, Table, TreeDiagram, WorkHandle,
};

const TOTAL: i64 = 40;

fn counting_job(counter: Arc<AtomicI64>, step: Duration) -> WorkHandle<()> {
    WorkHandle::spawn(move || {
        for _ in 0..TOTAL {
            thread::sleep(step);
            counter.fetch_add(1, Ordering::SeqCst);
        }
    })
}

fn progress(title: &str, step: Duration) -> ProgressBar {
    let counter = Arc::new(AtomicI64::new(0));
    let work = counting_job(Arc::clone(&counter), step);
    let source = move || {
        let done = counter.load(Ordering::SeqCst);
        ProgressState::new(done, TOTAL, format!("{done} of {TOTAL} files"))
    };
    ProgressBar::new(title, source, work)
}

fn build_document() -> console_doc::Result<Document> {
    let mut doc = Document::new(90, true)?;
    doc.push(Header::new("Nightly maintenance"))
        .push(Panel::new(
            "Summary",
            "Backups run against every region. Indexes are rebuilt afterwards.",
        ))
        .push(Outline::new(
            "Steps",
            vec![
                Node::with_children("Backup", vec![Node::new("east"), Node::new("west")]),
                Node::new("Reindex"),
            ],
        ))
        .push(TreeDiagram::new(
            "Topology",
            Node::new("primary")
                .child(Node::new("replica-a"))
                .child(Node::new("replica-b")),
        ))
        .push(BarGraph::new(
            "Rows per region",
            vec![
                GraphSegment::new("east", 1_240),
                GraphSegment::new("west", 860),
                GraphSegment::new("south", 310),
            ],
        ))
        .push(DividedBarGraph::new(
            "Storage",
            vec![
                GraphSegment::new("data", 62),
                GraphSegment::new("index", 23),
                GraphSegment::new("free", 15),
            ],
        ))
        .push(Table::from_rows(
            "Schedule",
            ["Region", "Job", "Window"],
            [
                ["east", "backup", "01:00"],
                ["east", "reindex", "03:00"],
                ["west", "backup", "02:00"],
            ],
        )?)
        .push(Separator::with_text("Progress"))
        .push(progress("Backup east", Duration::from_millis(60)))
        .push(progress("Backup west", Duration::from_millis(90)).with_description(
            "Snapshots are streamed to cold storage once the copy finishes.",
        ))
        .push(Footer::new("done"));
    Ok(doc)
}

fn main() -> console_doc::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let doc = build_document()?;
    if std::env::args().any(|arg| arg == "--full-screen") {
        let mut terminal = ProcessTerminal::new();
        return doc.render_full_screen(&mut terminal, doc.refresh_interval(), &CancelSignal::new());
    }

    let renderer = LiveRegionRenderer::process();
    doc.render(renderer)?;
    renderer.wait()?;
    Ok(())
}
