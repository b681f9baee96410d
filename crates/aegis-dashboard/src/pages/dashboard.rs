//! Security dashboard page.
//!
//! Token-gated view: the navigation controller only ever resolves
//! `/dashboard` for an authenticated session, and a mount-time check
//! covers the token expiring while the page is open. The metrics shown
//! are demo fixtures; the blockchain card talks to the pluggable chain
//! service with every call bracketed by the global loading pair.

use std::rc::Rc;

use leptos::prelude::*;

use crate::chain::{ChainService, ConnectionStatus, MockChain, TxReceipt};
use crate::session::Session;

struct Threat {
    kind: &'static str,
    severity: &'static str,
    time: &'static str,
    status: &'static str,
    source: &'static str,
}

// Demo fixtures for the fraud-monitoring cards.
const RECENT_THREATS: &[Threat] = &[
    Threat { kind: "Payment Fraud Attempt", severity: "Critical", time: "10 min ago", status: "Blocked", source: "193.27.14.92" },
    Threat { kind: "Suspicious API Integration", severity: "High", time: "23 min ago", status: "Investigating", source: "Payment Gateway" },
    Threat { kind: "KYC Verification Bypass", severity: "Critical", time: "1 hour ago", status: "Blocked", source: "Mobile App" },
    Threat { kind: "Account Takeover Attempt", severity: "High", time: "2 hours ago", status: "Quarantined", source: "User Login System" },
    Threat { kind: "Abnormal Transaction Pattern", severity: "Medium", time: "3 hours ago", status: "Flagged", source: "Credit Card Processing" },
];

const SECURITY_SCORE: u32 = 87;
const SCAN_STATUS: &str = "Last scan completed: Today at 14:32";
const COMPLIANCE: &[(&str, u32)] = &[("PCI", 92), ("GDPR", 97), ("SOX", 86), ("AML", 95)];

fn severity_class(severity: &str) -> &'static str {
    match severity {
        "Critical" => "badge badge-error",
        "High" => "badge badge-warning",
        _ => "badge badge-info",
    }
}

/// Security dashboard for an authenticated session.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<Session>();

    // The gate already protects this path; this covers a token that
    // expired while the page was open.
    Effect::new(move || {
        if !session.is_authenticated() {
            session.go("/login");
        }
    });

    let user = session.current_user();
    let initials = user.as_ref().map(|u| u.initials()).unwrap_or_else(|| "?".into());
    let display_name = user
        .as_ref()
        .map(|u| format!("{} {}", u.first_name, u.last_name))
        .unwrap_or_else(|| "Unknown user".into());

    let (logging_out, set_logging_out) = signal(false);
    let on_logout = move |_| {
        if logging_out.get_untracked() {
            return;
        }
        set_logging_out.set(true);
        leptos::task::spawn_local(async move {
            session.logout().await;
        });
    };

    view! {
        <div class="min-h-screen bg-base-100">
            <header class="navbar bg-base-200 border-b border-base-300 px-6">
                <div class="flex-1">
                    <h1 class="text-xl font-bold">"AegisX Security Center"</h1>
                </div>
                <div class="flex items-center gap-3">
                    <div class="avatar placeholder">
                        <div class="bg-primary text-primary-content rounded-full w-10">
                            <span>{initials}</span>
                        </div>
                    </div>
                    <span class="text-sm">{display_name}</span>
                    <button
                        class="btn btn-ghost btn-sm"
                        on:click=on_logout
                        disabled=move || logging_out.get()
                    >
                        {move || if logging_out.get() { "Signing out…" } else { "Logout" }}
                    </button>
                </div>
            </header>

            <main class="p-6 grid gap-6 lg:grid-cols-3">
                <div class="card bg-base-200 border border-base-300">
                    <div class="card-body">
                        <h2 class="card-title">"Security score"</h2>
                        <p class="text-5xl font-bold">{SECURITY_SCORE}</p>
                        <p class="text-sm text-base-content/60">{SCAN_STATUS}</p>
                    </div>
                </div>

                <div class="card bg-base-200 border border-base-300">
                    <div class="card-body">
                        <h2 class="card-title">"Compliance"</h2>
                        <ul>
                            {COMPLIANCE
                                .iter()
                                .map(|(name, pct)| view! {
                                    <li class="flex justify-between py-1">
                                        <span>{*name}</span>
                                        <span class="font-mono">{*pct}"%"</span>
                                    </li>
                                })
                                .collect_view()}
                        </ul>
                    </div>
                </div>

                <BlockchainCard />

                <div class="card bg-base-200 border border-base-300 lg:col-span-3">
                    <div class="card-body">
                        <h2 class="card-title">"Recent threats"</h2>
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Type"</th>
                                    <th>"Severity"</th>
                                    <th>"Detected"</th>
                                    <th>"Status"</th>
                                    <th>"Source"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {RECENT_THREATS
                                    .iter()
                                    .map(|t| view! {
                                        <tr>
                                            <td>{t.kind}</td>
                                            <td><span class=severity_class(t.severity)>{t.severity}</span></td>
                                            <td>{t.time}</td>
                                            <td>{t.status}</td>
                                            <td class="font-mono text-xs">{t.source}</td>
                                        </tr>
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    </div>
                </div>
            </main>
        </div>
    }
}

/// Blockchain audit-trail card: connection controls plus the receipts of
/// transactions logged this session.
#[component]
fn BlockchainCard() -> impl IntoView {
    let session = expect_context::<Session>();
    let chain = expect_context::<StoredValue<Rc<MockChain>, LocalStorage>>();

    let (status, set_status) = signal(chain.with_value(|c| c.connection_status()));
    let (receipts, set_receipts) = signal(Vec::<TxReceipt>::new());
    let (chain_error, set_chain_error) = signal(Option::<String>::None);

    let on_connect = move |_| {
        let chain = chain.with_value(Rc::clone);
        let loading = session.loading();
        leptos::task::spawn_local(async move {
            loading.start();
            chain.connect_wallet("metamask").await;
            set_status.set(chain.connection_status());
            loading.end();
        });
    };

    let on_log = move |_| {
        let chain = chain.with_value(Rc::clone);
        let loading = session.loading();
        leptos::task::spawn_local(async move {
            loading.start();
            let sample_id = format!("txn_{}", receipts.get_untracked().len() + 1);
            match chain.log_transaction(&sample_id, 82, true).await {
                Ok(receipt) => {
                    set_chain_error.set(None);
                    set_receipts.update(|r| r.push(receipt));
                }
                Err(e) => set_chain_error.set(Some(e)),
            }
            loading.end();
        });
    };

    view! {
        <div class="card bg-base-200 border border-base-300">
            <div class="card-body">
                <h2 class="card-title">"Blockchain audit trail"</h2>
                {move || {
                    let ConnectionStatus { connected, has_wallet } = status.get();
                    view! {
                        <p class="text-sm">
                            {if connected { "Chain: connected" } else { "Chain: offline" }}
                            " · "
                            {if has_wallet { "Wallet: linked" } else { "Wallet: none" }}
                        </p>
                    }
                }}

                {move || chain_error.get().map(|e| view! {
                    <div class="alert alert-warning text-sm">{e}</div>
                })}

                <div class="flex gap-2">
                    <button class="btn btn-sm" on:click=on_connect>"Connect wallet"</button>
                    <button class="btn btn-sm btn-outline" on:click=on_log>
                        "Log flagged transaction"
                    </button>
                </div>

                <ul class="text-xs font-mono mt-2">
                    {move || receipts
                        .get()
                        .iter()
                        .map(|r| view! {
                            <li>{format!("#{} {}", r.block_number, r.transaction_hash)}</li>
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}
