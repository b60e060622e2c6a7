//! Tracing tests: user-visible milestones are logged under `folio.*` targets
//! and effect execution is wrapped in `folio.effect` spans.

use std::sync::{Arc, Mutex};

use folio_core::event::{Event, KeyCode, Target};
use folio_core::key_sequence::KONAMI;
use folio_runtime::simulator::PageSimulator;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct Captured {
    target: String,
    message: String,
}

#[derive(Clone, Default)]
struct EventCapture {
    events: Arc<Mutex<Vec<Captured>>>,
    spans: Arc<Mutex<Vec<String>>>,
}

struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(Captured {
            target: event.metadata().target().to_string(),
            message: visitor.0,
        });
    }

    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }
}

fn with_capture<F: FnOnce()>(f: F) -> EventCapture {
    let capture = EventCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

fn has_event(capture: &EventCapture, target: &str, message: &str) -> bool {
    capture
        .events
        .lock()
        .unwrap()
        .iter()
        .any(|e| e.target == target && e.message == message)
}

#[test]
fn secret_code_match_is_logged() {
    let capture = with_capture(|| {
        let mut sim = PageSimulator::sample();
        sim.mount();
        for code in KONAMI {
            sim.send(Event::key(code));
        }
    });
    assert!(has_event(&capture, "folio.page", "mounted"));
    assert!(has_event(&capture, "folio.secret_code", "secret code matched"));
}

#[test]
fn interactive_mode_transitions_are_logged() {
    let capture = with_capture(|| {
        let mut sim = PageSimulator::sample();
        sim.mount();
        sim.send(Event::Click(Target::Terminal));
        sim.send(Event::key(KeyCode::Escape));
        sim.unmount();
    });
    assert!(has_event(&capture, "folio.terminal", "interactive mode on"));
    assert!(has_event(&capture, "folio.terminal", "interactive mode off"));
    assert!(has_event(&capture, "folio.page", "unmounted"));
}

#[test]
fn dropped_sound_is_logged_and_effects_are_spanned() {
    let capture = with_capture(|| {
        let mut sim = PageSimulator::sample();
        sim.host_mut().set_fail_sounds(true);
        sim.mount();
        sim.send(Event::Click(Target::Name));
    });
    assert!(has_event(&capture, "folio.effect", "sound dropped"));
    assert!(
        capture
            .spans
            .lock()
            .unwrap()
            .iter()
            .any(|name| name == "folio.effect")
    );
}
