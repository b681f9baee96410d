//! Login page component.

use leptos::ev;
use leptos::prelude::*;

use crate::session::Session;

/// Login page: email/password form.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        if email_val.is_empty() || password_val.is_empty() {
            set_error.set(Some("Email and password are required".into()));
            return;
        }

        set_submitting.set(true);
        set_error.set(None);
        leptos::task::spawn_local(async move {
            if let Err(e) = session.login(&email_val, &password_val).await {
                set_error.set(Some(e));
                set_submitting.set(false);
            }
            // On success the navigation controller has already moved us
            // to the dashboard and this component unmounts.
        });
    };

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-100">
            <div class="card bg-base-200 border border-base-300 w-full max-w-sm">
                <div class="card-body">
                    <h1 class="text-2xl font-bold text-center">"Welcome back"</h1>
                    <p class="text-center text-sm text-base-content/60 mb-4">
                        "Secure your financial platform with AegisX"
                    </p>

                    {move || error.get().map(|e| view! {
                        <div class="alert alert-error text-sm mb-4">{e}</div>
                    })}

                    <form on:submit=on_submit>
                        <fieldset class="fieldset">
                            <label class="fieldset-label" for="email">"Company email"</label>
                            <input
                                id="email"
                                class="input input-bordered w-full"
                                type="email"
                                placeholder="enterprise@company.com"
                                prop:value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                        </fieldset>
                        <fieldset class="fieldset">
                            <label class="fieldset-label" for="password">"Password"</label>
                            <input
                                id="password"
                                class="input input-bordered w-full"
                                type="password"
                                placeholder="••••••••"
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                            />
                        </fieldset>
                        <button
                            class="btn btn-primary w-full mt-4"
                            type="submit"
                            disabled=move || submitting.get()
                        >
                            {move || if submitting.get() { "Signing in…" } else { "Sign in" }}
                        </button>
                    </form>

                    <div class="text-center text-sm mt-4">
                        <a class="link" on:click=move |_| session.go("/signup")>
                            "Need an account? Request access"
                        </a>
                    </div>
                    <div class="text-center text-sm">
                        <a class="link link-hover" on:click=move |_| session.go("/")>
                            "Back to overview"
                        </a>
                    </div>
                </div>
            </div>
        </div>
    }
}
