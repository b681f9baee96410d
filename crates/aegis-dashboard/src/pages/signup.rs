//! Signup page component.

use leptos::ev;
use leptos::prelude::*;

use crate::session::Session;
use crate::types::RegisterRequest;

/// Client-side validation mirroring what the transport enforces.
fn validate(company: &str, email: &str, password: &str, confirm: &str) -> Result<(), String> {
    if company.trim().is_empty() {
        return Err("Company name is required".into());
    }
    if !email.contains('@') || !email.contains('.') {
        return Err("Valid email is required".into());
    }
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".into());
    }
    if password != confirm {
        return Err("Passwords do not match".into());
    }
    Ok(())
}

/// Signup page: company/email/password form.
#[component]
pub fn SignupPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let (company, set_company) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let company_val = company.get_untracked();
        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let confirm_val = confirm.get_untracked();

        if let Err(e) = validate(&company_val, &email_val, &password_val, &confirm_val) {
            set_error.set(Some(e));
            return;
        }

        set_submitting.set(true);
        set_error.set(None);
        leptos::task::spawn_local(async move {
            let body = RegisterRequest {
                company_name: company_val,
                email: email_val,
                password: password_val,
            };
            if let Err(e) = session.register(&body).await {
                set_error.set(Some(e));
                set_submitting.set(false);
            }
        });
    };

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-100">
            <div class="card bg-base-200 border border-base-300 w-full max-w-sm">
                <div class="card-body">
                    <h1 class="text-2xl font-bold text-center">"Request access"</h1>
                    <p class="text-center text-sm text-base-content/60 mb-4">
                        "Protect your platform in minutes"
                    </p>

                    {move || error.get().map(|e| view! {
                        <div class="alert alert-error text-sm mb-4">{e}</div>
                    })}

                    <form on:submit=on_submit>
                        <fieldset class="fieldset">
                            <label class="fieldset-label" for="company">"Company name"</label>
                            <input
                                id="company"
                                class="input input-bordered w-full"
                                type="text"
                                placeholder="Acme Fintech"
                                prop:value=move || company.get()
                                on:input=move |ev| set_company.set(event_target_value(&ev))
                            />
                        </fieldset>
                        <fieldset class="fieldset">
                            <label class="fieldset-label" for="email">"Company email"</label>
                            <input
                                id="email"
                                class="input input-bordered w-full"
                                type="email"
                                placeholder="contact@company.com"
                                prop:value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                        </fieldset>
                        <fieldset class="fieldset">
                            <label class="fieldset-label" for="password">"Create password"</label>
                            <input
                                id="password"
                                class="input input-bordered w-full"
                                type="password"
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                            />
                        </fieldset>
                        <fieldset class="fieldset">
                            <label class="fieldset-label" for="confirm">"Confirm password"</label>
                            <input
                                id="confirm"
                                class="input input-bordered w-full"
                                type="password"
                                prop:value=move || confirm.get()
                                on:input=move |ev| set_confirm.set(event_target_value(&ev))
                            />
                        </fieldset>
                        <button
                            class="btn btn-primary w-full mt-4"
                            type="submit"
                            disabled=move || submitting.get()
                        >
                            {move || if submitting.get() { "Submitting…" } else { "Create account" }}
                        </button>
                    </form>

                    <div class="text-center text-sm mt-4">
                        <a class="link" on:click=move |_| session.go("/login")>
                            "Already protected? Sign in"
                        </a>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::validate;

    #[test]
    fn validation_catches_each_field() {
        assert!(validate("", "a@b.com", "longenough", "longenough").is_err());
        assert!(validate("Acme", "not-an-email", "longenough", "longenough").is_err());
        assert!(validate("Acme", "a@b.com", "short", "short").is_err());
        assert!(validate("Acme", "a@b.com", "longenough", "different!").is_err());
        assert!(validate("Acme", "a@b.com", "longenough", "longenough").is_ok());
    }
}
