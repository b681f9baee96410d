//! Landing page: marketing hero with calls to action.

use leptos::prelude::*;

use crate::session::Session;

/// Public landing page for unauthenticated visitors.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<Session>();

    view! {
        <section class="hero min-h-screen bg-base-100">
            <div class="hero-content text-center">
                <div class="max-w-2xl">
                    <h1 class="text-5xl font-bold">"AegisX"</h1>
                    <p class="py-2 text-xl text-base-content/70">
                        "Fraud prevention for fintech platforms"
                    </p>
                    <p class="py-4">
                        "Real-time payment fraud detection, KYC enforcement, and a "
                        "blockchain-backed audit trail for every flagged transaction."
                    </p>
                    <ul class="text-left list-disc list-inside py-4 text-base-content/80">
                        <li>"Behavioral transaction scoring with sub-second verdicts"</li>
                        <li>"PCI, GDPR, SOX, and AML compliance monitoring"</li>
                        <li>"Tamper-evident transaction logging on-chain"</li>
                    </ul>
                    <div class="flex gap-4 justify-center mt-4">
                        <button
                            class="btn btn-primary"
                            on:click=move |_| session.go("/login")
                        >
                            "Sign in"
                        </button>
                        <button
                            class="btn btn-outline"
                            on:click=move |_| session.go("/signup")
                        >
                            "Request access"
                        </button>
                    </div>
                </div>
            </div>
        </section>
    }
}
