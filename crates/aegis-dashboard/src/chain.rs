//! Capability-abstracted blockchain audit service.
//!
//! The dashboard logs flagged transactions to a ledger for tamper-evident
//! audit. Only the interface matters here: the demo ships a
//! deterministic mock whose connection state survives reloads the same
//! way the session does. The session core's sole involvement is that
//! every call into the service is bracketed by a loading start/end pair.

use std::cell::{Cell, RefCell};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use aegis_session::auth::SessionStorage;
use serde::{Deserialize, Serialize};

/// Storage key for the persisted connection state.
const CHAIN_STATE_KEY: &str = "blockchainConnectionState";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    pub connected: bool,
    pub has_wallet: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub success: bool,
    pub transaction_hash: String,
    pub block_number: u64,
}

/// Interface to whatever ledger backs the audit trail.
#[allow(async_fn_in_trait)]
pub trait ChainService {
    async fn initialize(&self) -> bool;
    async fn connect_wallet(&self, provider: &str) -> bool;
    fn connection_status(&self) -> ConnectionStatus;
    async fn log_transaction(
        &self,
        transaction_id: &str,
        risk_score: u8,
        flagged: bool,
    ) -> Result<TxReceipt, String>;
    async fn verify_transaction(&self, tx_hash: &str) -> bool;
}

/// Demo double. Hashes and block numbers derive from a counter instead
/// of randomness, so the UI and tests always see the same sequence.
pub struct MockChain {
    storage: Rc<dyn SessionStorage>,
    status: RefCell<ConnectionStatus>,
    sequence: Cell<u64>,
}

/// Mock chain height the first logged transaction lands on.
const BASE_BLOCK: u64 = 19_000_000;

impl MockChain {
    pub fn new(storage: Rc<dyn SessionStorage>) -> Self {
        let status = storage
            .get(CHAIN_STATE_KEY)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self {
            storage,
            status: RefCell::new(status),
            sequence: Cell::new(0),
        }
    }

    fn persist(&self) {
        match serde_json::to_string(&*self.status.borrow()) {
            Ok(json) => self.storage.set(CHAIN_STATE_KEY, &json),
            Err(e) => log::error!("failed to persist chain connection state: {e}"),
        }
    }

    fn next_sequence(&self) -> u64 {
        let n = self.sequence.get() + 1;
        self.sequence.set(n);
        n
    }
}

fn mock_tx_hash(transaction_id: &str, sequence: u64) -> String {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    transaction_id.hash(&mut hasher);
    sequence.hash(&mut hasher);
    format!("0x{:016x}{:016x}", hasher.finish(), sequence)
}

impl ChainService for MockChain {
    async fn initialize(&self) -> bool {
        self.status.borrow_mut().connected = true;
        self.persist();
        log::info!("mock chain connection established");
        true
    }

    async fn connect_wallet(&self, provider: &str) -> bool {
        if !self.status.borrow().connected {
            self.initialize().await;
        }
        self.status.borrow_mut().has_wallet = true;
        self.persist();
        log::info!("wallet provider {provider} connected (mock)");
        true
    }

    fn connection_status(&self) -> ConnectionStatus {
        self.status.borrow().clone()
    }

    async fn log_transaction(
        &self,
        transaction_id: &str,
        risk_score: u8,
        flagged: bool,
    ) -> Result<TxReceipt, String> {
        if !self.status.borrow().has_wallet {
            return Err("Wallet not connected. Please connect wallet first.".to_string());
        }
        let sequence = self.next_sequence();
        log::debug!(
            "logging transaction {transaction_id} (risk {risk_score}, flagged {flagged}) at seq {sequence}"
        );
        Ok(TxReceipt {
            success: true,
            transaction_hash: mock_tx_hash(transaction_id, sequence),
            block_number: BASE_BLOCK + sequence,
        })
    }

    async fn verify_transaction(&self, tx_hash: &str) -> bool {
        // The mock vouches for anything shaped like a hash it issued.
        self.status.borrow().connected && tx_hash.starts_with("0x") && tx_hash.len() == 34
    }
}
