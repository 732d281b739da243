#![allow(dead_code)]

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use numlab::api::Transport;
use numlab::core::Viewport;
use numlab::export::{DrawingSurface, RasterSnapshot};
use numlab::{NumlabError, NumlabResult};
use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Debug, Clone, Default)]
pub struct CapturedEvents(Arc<Mutex<Vec<(Level, String)>>>);

impl CapturedEvents {
    pub fn count(&self, level: Level) -> usize {
        self.0
            .lock()
            .expect("events lock")
            .iter()
            .filter(|(event_level, _)| *event_level == level)
            .count()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.0
            .lock()
            .expect("events lock")
            .iter()
            .filter(|(event_level, _)| *event_level == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

struct CaptureLayer(CapturedEvents);

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        (self.0)
            .0
            .lock()
            .expect("events lock")
            .push((*event.metadata().level(), visitor.0));
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

/// Runs `f` under a thread-local subscriber that records every event.
pub fn capture_events<R>(f: impl FnOnce() -> R) -> (R, CapturedEvents) {
    let events = CapturedEvents::default();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer(events.clone()));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, events)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub resource: String,
    pub url: String,
    pub body: Value,
}

type Reply = Box<dyn Fn(&str) -> NumlabResult<Value> + Send + Sync>;

/// In-memory transport answering every call through `reply`.
pub struct FakeTransport {
    reply: Reply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn replying(reply: impl Fn(&str) -> NumlabResult<Value> + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn echoing(body: Value) -> Self {
        Self::replying(move |_| Ok(body.clone()))
    }

    pub fn failing_with_status(status: u16) -> Self {
        Self::replying(move |resource| {
            Err(NumlabError::HttpStatus {
                resource: resource.to_owned(),
                status,
                body: "{\"detail\":\"boom\"}".to_owned(),
            })
        })
    }

    pub fn unreachable() -> Self {
        Self::replying(|resource| {
            Err(NumlabError::Transport {
                resource: resource.to_owned(),
                message: "connection refused".to_owned(),
            })
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl Transport for FakeTransport {
    fn post_json(&self, resource: &str, url: &str, body: &Value) -> NumlabResult<Value> {
        self.calls.lock().expect("calls lock").push(RecordedCall {
            resource: resource.to_owned(),
            url: url.to_owned(),
            body: body.clone(),
        });
        (self.reply)(resource)
    }
}

/// Surface with fixed dimensions and a fake PNG payload.
pub struct FakeSurface {
    pub viewport: Viewport,
    pub has_context: bool,
}

impl FakeSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            has_context: true,
        }
    }

    pub fn without_context(width: u32, height: u32) -> Self {
        Self {
            has_context: false,
            ..Self::new(width, height)
        }
    }
}

pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-pixels";

impl DrawingSurface for FakeSurface {
    fn snapshot(&self) -> NumlabResult<RasterSnapshot> {
        if !self.has_context {
            return Err(NumlabError::ContextUnavailable(
                "could not get 2D context from canvas".to_owned(),
            ));
        }
        RasterSnapshot::new(self.viewport, FAKE_PNG.to_vec())
    }
}

/// Fresh, empty scratch directory removed on drop.
pub struct ScratchDir(PathBuf);

impl ScratchDir {
    pub fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "numlab-{label}-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).expect("create scratch dir");
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.0)
            .expect("read scratch dir")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}
