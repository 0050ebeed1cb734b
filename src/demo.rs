//! Scripted walk through an application session.
//!
//! Drives the well-known module loggers the way the desktop shell does on
//! startup (environment check, service status polling, a page switch, a
//! failing AI call) while a [`LogView`] watches the store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use applog_core::{log_args, modules, LogContext, LogLevel};
use applog_view::{LevelCounts, LogView};

/// What the watching view saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSummary {
    /// Entries held by the store (and the view) at the end.
    pub retained: usize,
    /// Last id issued by the store.
    pub last_id: u64,
    /// Subscriber notifications received.
    pub notifications: usize,
    pub counts: LevelCounts,
    pub modules: Vec<String>,
}

/// Run the session against `ctx`, then emit `filler` extra debug lines from
/// the Testing module.
pub fn run(ctx: &LogContext, filler: usize) -> DemoSummary {
    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = notifications.clone();
    let subscription = ctx.store().subscribe(move || {
        counter.fetch_add(1, Ordering::Relaxed);
    });
    let mut view = LogView::attach(ctx.store().clone());

    let app = ctx.logger(modules::APP);
    let service = ctx.logger(modules::SERVICE);
    let ai = ctx.logger(modules::AI);
    let channel = ctx.logger(modules::CHANNEL);
    let testing = ctx.logger(modules::TESTING);

    app.info("🦞 App mounted", &[]);
    app.info("checking system environment...", &[]);
    app.info("environment check complete", &log_args!["node: ok", "openclaw: installed"]);

    service.api_call("get_service_status", &[]);
    service.api_response("get_service_status", ("running", 18789u16));
    service.state("service status", "running");

    app.action("page switch", &log_args![("dashboard", "logs")]);

    ai.api_call("test_ai_connection", &log_args!["anthropic"]);
    ai.api_error("test_ai_connection", "401 unauthorized");
    channel.warn("channel token missing", &log_args!["telegram"]);

    for i in 0..filler {
        testing.log(LogLevel::Debug, format!("filler line {i}"), &[]);
    }

    view.refresh();
    subscription.unsubscribe();

    let summary = DemoSummary {
        retained: view.entries().len(),
        last_id: ctx.store().last_id(),
        notifications: notifications.load(Ordering::Relaxed),
        counts: view.counts(),
        modules: view.modules().into_iter().map(str::to_string).collect(),
    };
    tracing::debug!(?summary, "demo session finished");
    summary
}
