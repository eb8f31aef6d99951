use gloo_timers::future::TimeoutFuture;
use leptos::ev::SubmitEvent;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use crate::api::{self, ApiError};
use crate::config::AppConfig;
use crate::countdown::Countdown;
use crate::model::{AssignmentRequest, AssignmentResult, SummaryRow};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Resolved once; the view receives it explicitly rather than reading
    // ambient state.
    let config = AppConfig::from_env();

    view! {
        <Stylesheet id="leptos" href="/pkg/intercambio-2025.css" />

        <Title text="Gift Exchange 2025" />

        <Router>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route
                        path=path!("/")
                        view=move || view! { <AssignmentView config=config.clone() /> }
                    />
                </Routes>
            </main>
        </Router>
    }
}

/// The whole interaction surface: participant form, reveal countdown,
/// organizer gate, and summary table.
#[component]
pub fn AssignmentView(config: AppConfig) -> impl IntoView {
    let require_pin = config.require_pin;
    let config = StoredValue::new(config);

    // Participant form state. A result and an error are mutually exclusive:
    // every code path that sets one clears the other.
    let name = RwSignal::new(String::new());
    let pin = RwSignal::new(String::new());
    let result = RwSignal::new(None::<AssignmentResult>);
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let countdown = RwSignal::new(Countdown::Idle);

    // Organizer gate state.
    let is_admin = RwSignal::new(false);
    let show_admin_pin = RwSignal::new(false);
    let admin_pin = RwSignal::new(String::new());
    let admin_pin_error = RwSignal::new(None::<String>);

    // Summary panel state.
    let summary = RwSignal::new(Vec::<SummaryRow>::new());
    let summary_loading = RwSignal::new(false);
    let summary_error = RwSignal::new(None::<String>);

    // A handler for the participant form. Validates locally, submits the
    // entry, and arms the reveal countdown for every submission outcome so
    // the result (or error) only stays on screen for a bounded window.
    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let request = match validate_entry(&name.get(), &pin.get(), require_pin) {
            Ok(request) => request,
            Err(message) => {
                error.set(Some(message.to_string()));
                result.set(None);
                return;
            }
        };
        loading.set(true);
        error.set(None);
        result.set(None);
        let endpoint = config.with_value(|c| c.endpoint.clone());
        spawn_local(async move {
            match api::submit_assignment(&endpoint, &request).await {
                Ok(outcome) => result.set(Some(outcome)),
                Err(ApiError::Rejected(message)) => error.set(Some(message)),
                Err(ApiError::Transport) => {
                    error.set(Some("Could not reach the server.".to_string()))
                }
            }
            start_reveal_countdown(countdown);
            loading.set(false);
        });
    };

    // Fetches the summary, replacing the displayed rows wholesale. Used for
    // both the automatic load on unlock and the manual reload button.
    let load_summary = move || {
        summary_loading.set(true);
        summary_error.set(None);
        let endpoint = config.with_value(|c| c.endpoint.clone());
        spawn_local(async move {
            match api::fetch_summary(&endpoint).await {
                Ok(rows) => summary.set(rows),
                Err(ApiError::Rejected(_)) => {
                    summary_error.set(Some("Could not load the summary.".to_string()))
                }
                Err(ApiError::Transport) => summary_error
                    .set(Some("Connection error while loading the summary.".to_string())),
            }
            summary_loading.set(false);
        });
    };

    // A handler for the organizer PIN form. The comparison is a verbatim,
    // untrimmed string equality against the configured PIN; this gates the
    // summary UI and is not an authentication mechanism.
    let confirm_admin = move |ev: SubmitEvent| {
        ev.prevent_default();
        admin_pin_error.set(None);
        if admin_pin.get() == config.with_value(|c| c.admin_pin.clone()) {
            is_admin.set(true);
            show_admin_pin.set(false);
            admin_pin.set(String::new());
            load_summary();
        } else {
            admin_pin_error.set(Some("Incorrect organizer PIN.".to_string()));
        }
    };

    view! {
        <div class="page">
            <div class="card card-wide">
                <h1>"Gift Exchange 2025"</h1>
                <p class="subtitle">
                    {if require_pin {
                        "Enter your name exactly as it was registered, plus your personal PIN."
                    } else {
                        "Enter your name exactly as it was registered."
                    }}
                </p>

                <form class="form" on:submit=submit>
                    <label>
                        "Your name: "
                        <input
                            type="text"
                            placeholder="e.g. Alejandro"
                            autocomplete="off"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </label>

                    {require_pin
                        .then(|| {
                            view! {
                                <label>
                                    "Your personal PIN: "
                                    <input
                                        type="password"
                                        placeholder="The PIN the organizer gave you"
                                        autocomplete="off"
                                        prop:value=move || pin.get()
                                        on:input=move |ev| pin.set(event_target_value(&ev))
                                    />
                                </label>
                            }
                        })}

                    <button type="submit" prop:disabled=move || loading.get()>
                        {move || if loading.get() { "Searching..." } else { "See who you got" }}
                    </button>
                </form>

                {move || {
                    error.get().map(|message| view! { <div class="alert error">{message}</div> })
                }}

                {move || {
                    result
                        .get()
                        .map(|outcome| {
                            let recipient = outcome
                                .assigned_to
                                .as_ref()
                                .map(|a| a.name.clone())
                                .filter(|n| !n.is_empty())
                                .unwrap_or_else(|| "Unknown".to_string());
                            let group = outcome.assigned_to.as_ref().and_then(|a| a.group.clone());
                            view! {
                                <div class="alert success">
                                    <p>{outcome.message.clone()}</p>
                                    <p>
                                        "You give to: " <strong>{recipient}</strong>
                                        {group
                                            .map(|g| {
                                                view! { <span>" (group: " {g} ")"</span> }
                                            })}
                                    </p>
                                </div>
                            }
                        })
                }}

                {move || {
                    countdown
                        .get()
                        .seconds_left()
                        .map(|seconds| {
                            view! {
                                <p class="counter">
                                    "The page will reload in " <strong>{seconds}</strong>
                                    " seconds..."
                                </p>
                            }
                        })
                }}

                <div class="admin-section">
                    {move || {
                        (!is_admin.get() && !show_admin_pin.get())
                            .then(|| {
                                view! {
                                    <button
                                        type="button"
                                        class="admin-toggle"
                                        on:click=move |_| show_admin_pin.set(true)
                                    >
                                        "I'm the organizer"
                                    </button>
                                }
                            })
                    }}

                    {move || {
                        (show_admin_pin.get() && !is_admin.get())
                            .then(|| {
                                view! {
                                    <form class="pin-form" on:submit=confirm_admin>
                                        <label>
                                            "Organizer PIN (only you should have it): "
                                            <input
                                                type="password"
                                                prop:value=move || admin_pin.get()
                                                on:input=move |ev| {
                                                    admin_pin.set(event_target_value(&ev))
                                                }
                                            />
                                        </label>
                                        <button type="submit">"Enter"</button>
                                        {move || {
                                            admin_pin_error
                                                .get()
                                                .map(|message| {
                                                    view! { <div class="alert error">{message}</div> }
                                                })
                                        }}
                                    </form>
                                }
                            })
                    }}

                    {move || {
                        is_admin
                            .get()
                            .then(|| {
                                view! {
                                    <div class="admin-panel">
                                        <div class="admin-header">
                                            <h2>"Assignment summary"</h2>
                                            <button type="button" on:click=move |_| load_summary()>
                                                "Reload"
                                            </button>
                                        </div>
                                        <p class="subtitle">
                                            "Only visible to the organizer: who gives to whom, and everyone's PIN."
                                        </p>

                                        {move || {
                                            summary_loading
                                                .get()
                                                .then(|| view! { <p>"Loading summary..."</p> })
                                        }}
                                        {move || {
                                            summary_error
                                                .get()
                                                .map(|message| {
                                                    view! { <div class="alert error">{message}</div> }
                                                })
                                        }}

                                        {move || {
                                            (!summary_loading.get() && summary_error.get().is_none()
                                                && summary.get().is_empty())
                                                .then(|| view! { <p>"No data to show."</p> })
                                        }}

                                        {move || {
                                            (!summary_loading.get() && !summary.get().is_empty())
                                                .then(|| {
                                                    view! {
                                                        <div class="table-container">
                                                            <table>
                                                                <thead>
                                                                    <tr>
                                                                        <th>"#"</th>
                                                                        <th>"Person"</th>
                                                                        <th>"Group"</th>
                                                                        <th>"PIN"</th>
                                                                        <th>"Gives to"</th>
                                                                        <th>"Target group"</th>
                                                                    </tr>
                                                                </thead>
                                                                <tbody>
                                                                    {summary
                                                                        .get()
                                                                        .iter()
                                                                        .enumerate()
                                                                        .map(|(idx, row)| summary_table_row(idx, row))
                                                                        .collect_view()}
                                                                </tbody>
                                                            </table>
                                                        </div>
                                                    }
                                                })
                                        }}
                                    </div>
                                }
                            })
                    }}
                </div>
            </div>
        </div>
    }
}

fn summary_table_row(idx: usize, row: &SummaryRow) -> impl IntoView {
    let recipient = row
        .assigned_to
        .as_ref()
        .map(|target| target.name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Unassigned".to_string());
    let recipient_group = row
        .assigned_to
        .as_ref()
        .and_then(|target| target.group.clone())
        .unwrap_or_else(|| "-".to_string());
    view! {
        <tr>
            <td>{idx + 1}</td>
            <td>{row.name.clone()}</td>
            <td>{row.group.clone().unwrap_or_default()}</td>
            <td>{row.pin.clone().unwrap_or_default()}</td>
            <td>{recipient}</td>
            <td>{recipient_group}</td>
        </tr>
    }
}

/// Arms the reveal countdown and spawns the single ticking task that drives
/// it to zero and then reloads the page. If a countdown is already running
/// this does nothing: the running one is neither cancelled nor restarted,
/// and no second task is spawned.
fn start_reveal_countdown(countdown: RwSignal<Countdown>) {
    if countdown.get_untracked() != Countdown::Idle {
        return;
    }
    countdown.set(countdown.get_untracked().arm());
    spawn_local(async move {
        while countdown.get_untracked().is_counting() {
            TimeoutFuture::new(1_000).await;
            let next = countdown.get_untracked().tick();
            countdown.set(next);
            if next == Countdown::Expired {
                reload_page();
            }
        }
    });
}

/// A full document reload, discarding all view state.
fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            log!("Failed to reload the page: {:?}", e);
        }
    }
}

/// Trims the entered fields and builds the request, or reports which inputs
/// are missing. No network call happens for invalid entries.
fn validate_entry(
    name: &str,
    pin: &str,
    require_pin: bool,
) -> Result<AssignmentRequest, &'static str> {
    let name = name.trim();
    let pin = pin.trim();
    if require_pin {
        if name.is_empty() || pin.is_empty() {
            return Err("Enter your name and PIN.");
        }
        Ok(AssignmentRequest {
            name: name.to_string(),
            pin: Some(pin.to_string()),
        })
    } else {
        if name.is_empty() {
            return Err("Enter your name.");
        }
        Ok(AssignmentRequest {
            name: name.to_string(),
            pin: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_entry_trims_fields() {
        let request = validate_entry("  Alejandro ", " 0420 ", true).unwrap();
        assert_eq!(request.name, "Alejandro");
        assert_eq!(request.pin.as_deref(), Some("0420"));

        let request = validate_entry("Maru", "", false).unwrap();
        assert_eq!(request.name, "Maru");
        assert_eq!(request.pin, None);
    }

    #[test]
    fn test_validate_entry_rejects_blank_fields() {
        // Whitespace-only input counts as empty.
        assert_eq!(
            validate_entry("   ", "0420", true),
            Err("Enter your name and PIN.")
        );
        assert_eq!(
            validate_entry("Alejandro", "  ", true),
            Err("Enter your name and PIN.")
        );
        assert_eq!(validate_entry("", "", true), Err("Enter your name and PIN."));
        assert_eq!(validate_entry("   ", "", false), Err("Enter your name."));
    }

    #[test]
    fn test_validate_entry_ignores_pin_when_not_required() {
        // The PIN-less variant drops whatever is in the PIN box.
        let request = validate_entry("Maru", "9999", false).unwrap();
        assert_eq!(request.pin, None);
    }
}
