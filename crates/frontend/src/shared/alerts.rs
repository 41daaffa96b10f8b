//! Page-level alert banner.
//!
//! At most one banner is visible: a new alert replaces the current one.
//! Info and success alerts close themselves after [`ALERT_AUTO_DISMISS_MS`];
//! warnings and errors stay until dismissed or replaced.

use crate::shared::config::ALERT_AUTO_DISMISS_MS;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Error,
}

impl AlertKind {
    pub fn auto_dismiss_ms(&self) -> Option<u32> {
        match self {
            AlertKind::Success | AlertKind::Info => Some(ALERT_AUTO_DISMISS_MS),
            AlertKind::Warning | AlertKind::Error => None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            AlertKind::Success => "alert alert--success",
            AlertKind::Info => "alert alert--info",
            AlertKind::Warning => "alert alert--warning",
            AlertKind::Error => "alert alert--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct Alerts {
    current: Option<Alert>,
    next_id: u64,
}

impl Alerts {
    /// Shows an alert, replacing any visible one; returns its id
    pub fn show(&mut self, kind: AlertKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.current = Some(Alert {
            id: self.next_id,
            kind,
            message: message.into(),
        });
        self.next_id
    }

    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Closes the alert only if it is still the one with `id`
    pub fn dismiss_if(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|a| a.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

/// Shows an alert and schedules its auto-dismiss when the kind has one
pub fn notify(alerts: RwSignal<Alerts>, kind: AlertKind, message: impl Into<String>) {
    let message = message.into();
    match kind {
        AlertKind::Error => log::error!("{}", message),
        AlertKind::Warning => log::warn!("{}", message),
        _ => log::info!("{}", message),
    }

    let Some(id) = alerts.try_update(|a| a.show(kind, message)) else {
        return;
    };
    if let Some(ms) = kind.auto_dismiss_ms() {
        Timeout::new(ms, move || {
            alerts.try_update(|a| a.dismiss_if(id));
        })
        .forget();
    }
}

#[component]
pub fn AlertBanner(alerts: RwSignal<Alerts>) -> impl IntoView {
    move || {
        alerts.with(|a| a.current().cloned()).map(|alert| {
            view! {
                <div class=alert.kind.css_class() role="alert">
                    <span class="alert__message">{alert.message}</span>
                    <button
                        class="alert__close"
                        title="Fechar"
                        on:click=move |_| alerts.update(|a| a.dismiss())
                    >
                        {crate::shared::icons::icon("x")}
                    </button>
                </div>
            }
        })
    }
}
