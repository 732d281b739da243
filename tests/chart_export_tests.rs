mod support;

use std::cell::RefCell;
use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use numlab::core::Viewport;
use numlab::export::{
    ChartExporter, DEFAULT_FILE_NAME, DirectorySink, DownloadSink, ExportOutcome, SVG_MIME,
    StagedFile, render_svg_document,
};
use numlab::{NumlabError, NumlabResult};
use support::{FAKE_PNG, FakeSurface, ScratchDir, capture_events};
use tracing::Level;

#[derive(Default)]
struct RecordingSink {
    deliveries: RefCell<Vec<(String, String, Vec<u8>)>>,
}

impl DownloadSink for RecordingSink {
    fn deliver(&self, file_name: &str, mime: &str, contents: &[u8]) -> NumlabResult<PathBuf> {
        self.deliveries
            .borrow_mut()
            .push((file_name.to_owned(), mime.to_owned(), contents.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}

fn attribute<'a>(svg: &'a str, element: &str, name: &str) -> Option<&'a str> {
    let start = svg.find(&format!("<{element} "))?;
    let tag = &svg[start..];
    let tag = &tag[..tag.find('>')?];
    let needle = format!(" {name}=\"");
    let value_start = tag.find(&needle)? + needle.len();
    let value = &tag[value_start..];
    Some(&value[..value.find('"')?])
}

#[test]
fn missing_surface_logs_and_writes_nothing() {
    let sink = RecordingSink::default();
    let exporter = ChartExporter::new(&sink);

    let (result, events) =
        capture_events(|| exporter.export_as_image(None::<&FakeSurface>, "chart.svg"));

    assert_eq!(result.expect("no error is raised"), ExportOutcome::MissingSurface);
    assert!(sink.deliveries.borrow().is_empty());
    assert_eq!(events.count(Level::ERROR), 1);
    assert_eq!(events.messages(Level::ERROR), ["chart element not found"]);
}

#[test]
fn svg_declares_surface_size_and_one_image() {
    let sink = RecordingSink::default();
    let exporter = ChartExporter::new(&sink);
    let surface = FakeSurface::new(640, 360);

    let outcome = exporter
        .export_as_image(Some(&surface), "roots.svg")
        .expect("export");

    let deliveries = sink.deliveries.borrow();
    assert_eq!(deliveries.len(), 1);
    let (file_name, mime, contents) = &deliveries[0];
    assert_eq!(file_name, "roots.svg");
    assert_eq!(mime, SVG_MIME);

    let svg = std::str::from_utf8(contents).expect("utf8");
    assert_eq!(attribute(svg, "svg", "width"), Some("640"));
    assert_eq!(attribute(svg, "svg", "height"), Some("360"));
    assert_eq!(attribute(svg, "image", "width"), Some("640"));
    assert_eq!(attribute(svg, "image", "height"), Some("360"));
    assert_eq!(svg.matches("<image").count(), 1);

    let href = attribute(svg, "image", "xlink:href").expect("href");
    let encoded = href
        .strip_prefix("data:image/png;base64,")
        .expect("png data url");
    assert_eq!(STANDARD.decode(encoded).expect("base64"), FAKE_PNG);

    assert_eq!(
        outcome,
        ExportOutcome::Saved {
            path: PathBuf::from("roots.svg"),
            viewport: Viewport::new(640, 360),
            bytes: contents.len(),
        }
    );
}

#[test]
fn default_file_name_is_chart_svg() {
    let sink = RecordingSink::default();
    let exporter = ChartExporter::new(&sink);
    exporter
        .export_with_default_name(Some(&FakeSurface::new(10, 10)))
        .expect("export");
    assert_eq!(sink.deliveries.borrow()[0].0, DEFAULT_FILE_NAME);
    assert_eq!(DEFAULT_FILE_NAME, "chart.svg");
}

#[test]
fn unavailable_context_fails_loudly() {
    let sink = RecordingSink::default();
    let exporter = ChartExporter::new(&sink);
    let surface = FakeSurface::without_context(100, 50);

    let err = exporter
        .export_as_image(Some(&surface), "chart.svg")
        .expect_err("context failure must surface");
    assert!(matches!(err, NumlabError::ContextUnavailable(_)));
    assert!(sink.deliveries.borrow().is_empty());
}

#[test]
fn path_like_file_names_are_rejected() {
    let exporter = ChartExporter::new(RecordingSink::default());
    let surface = FakeSurface::new(10, 10);
    for name in ["", "..", "../chart.svg", "nested/chart.svg", "c:\\chart.svg"] {
        let err = exporter
            .export_as_image(Some(&surface), name)
            .expect_err("not a plain name");
        assert!(matches!(err, NumlabError::InvalidData(_)), "name `{name}`");
    }
    assert!(exporter.sink().deliveries.borrow().is_empty());
}

#[test]
fn directory_sink_writes_file_and_leaves_no_staging_files() {
    let scratch = ScratchDir::new("export-dir");
    let exporter = ChartExporter::new(DirectorySink::new(scratch.path()));
    let surface = FakeSurface::new(32, 16);

    for _ in 0..3 {
        let outcome = exporter
            .export_as_image(Some(&surface), "chart.svg")
            .expect("export");
        assert_eq!(outcome.path(), Some(&scratch.path().join("chart.svg")));
    }

    assert_eq!(scratch.entries(), ["chart.svg"]);
    let written = std::fs::read_to_string(scratch.path().join("chart.svg")).expect("read");
    assert_eq!(written, render_svg_document(&surface).expect("svg"));
}

#[test]
fn failed_delivery_releases_its_staging_file() {
    let scratch = ScratchDir::new("export-fail");
    // The target name is taken by a non-empty directory, so the final rename fails.
    std::fs::create_dir(scratch.path().join("chart.svg")).expect("blocker dir");
    std::fs::write(scratch.path().join("chart.svg").join("keep"), b"x").expect("blocker file");

    let exporter = ChartExporter::new(DirectorySink::new(scratch.path()));
    let err = exporter
        .export_as_image(Some(&FakeSurface::new(8, 8)), "chart.svg")
        .expect_err("rename onto a directory fails");
    assert!(matches!(err, NumlabError::Io { .. }));
    assert_eq!(scratch.entries(), ["chart.svg"]);
}

#[test]
fn dropped_staged_file_is_removed() {
    let scratch = ScratchDir::new("staged-drop");
    let staged_path = {
        let mut staged = StagedFile::create(scratch.path(), "chart.svg").expect("stage");
        staged.write_all(b"<svg/>").expect("write");
        assert!(staged.path().exists());
        staged.path().to_path_buf()
    };
    assert!(!staged_path.exists());
    assert!(scratch.entries().is_empty());
}
