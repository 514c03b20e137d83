mod common;

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use adsql::{stmt::Expr, Engine, Query, Settings};
use common::at;
use tracing::{
    field::{Field, Visit},
    Event, Subscriber,
};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    Layer, Registry,
};

/// Records the message of every event.
#[derive(Clone, Default)]
struct Messages(Arc<Mutex<Vec<String>>>);

impl<S: Subscriber> Layer<S> for Messages {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = Message(None);
        event.record(&mut message);

        if let Some(message) = message.0 {
            self.0.lock().unwrap().push(message);
        }
    }
}

struct Message(Option<String>);

impl Visit for Message {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

fn messages_while(f: impl FnOnce()) -> Vec<String> {
    let messages = Messages::default();
    let subscriber = Registry::default().with(messages.clone());

    tracing::subscriber::with_default(subscriber, f);

    let recorded = messages.0.lock().unwrap().clone();
    recorded
}

#[test]
fn composite_passes_emit_trace_events() {
    let engine = Engine::new(common::schema());

    let query = Query::new(engine.schema(), "Event")
        .unwrap()
        .filter(|e| Ok(Expr::gt(e.member("Start")?, at(2023, 1, 1, 12, 0))))
        .unwrap()
        .select(|e| e.member("Start"))
        .unwrap()
        .into_expr();

    let messages = messages_while(|| {
        engine.translate(&query).unwrap();
    });

    assert!(
        messages.iter().any(|m| m == "rewriting composite comparison"),
        "{messages:?}"
    );
    assert!(
        messages.iter().any(|m| m == "expanding composite member"),
        "{messages:?}"
    );
    assert!(messages.iter().any(|m| m == "translated query"), "{messages:?}");
}

#[test]
fn association_expansion_emits_a_trace_event() {
    let engine = Engine::new(common::schema());

    let query = Query::new(engine.schema(), "Order")
        .unwrap()
        .filter(|o| Ok(Expr::eq(o.navigate("Customer")?.member("City")?, "London")))
        .unwrap()
        .into_expr();

    let messages = messages_while(|| {
        engine.translate(&query).unwrap();
    });

    assert!(
        messages.iter().any(|m| m == "resolved association"),
        "{messages:?}"
    );
}

#[test]
fn timing_is_logged_only_when_enabled() {
    let query = |engine: &Engine| {
        Query::new(engine.schema(), "Customer")
            .unwrap()
            .into_expr()
    };

    let quiet = Engine::new(common::schema());
    let messages = messages_while(|| {
        quiet.translate(&query(&quiet)).unwrap();
    });
    assert!(!messages.iter().any(|m| m == "translation finished"), "{messages:?}");

    let timed = Engine::new(common::schema()).with_settings(Settings {
        log_timing: true,
        ..Settings::default()
    });
    let messages = messages_while(|| {
        timed.translate(&query(&timed)).unwrap();
    });
    assert!(messages.iter().any(|m| m == "translation finished"), "{messages:?}");
}
