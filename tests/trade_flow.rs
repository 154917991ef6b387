//! Integration tests for the trade confirmation flow against a mock trading API.
//!
//! The wallet is an in-memory `WalletSigner` that counts sign requests, and
//! the trading API is a `wiremock` server that verifies request counts on drop.

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ark_sdk::prelude::*;

const WALLET_ADDRESS: &str = "0xF00D000000000000000000000000000000000001";
const TRADE_PATH: &str = "/nft/trade/0xABC/42";

// ─── Test wallet ─────────────────────────────────────────────────────────────

struct MockWallet {
    outcome: Result<WalletSignature, WalletError>,
    calls: AtomicUsize,
    last_message: Mutex<Option<Vec<u8>>>,
}

impl MockWallet {
    fn signing() -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(WalletSignature {
                signature: "sig-abc".to_string(),
                public_key: "pk-123".to_string(),
            }),
            calls: AtomicUsize::new(0),
            last_message: Mutex::new(None),
        })
    }

    fn declining(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(WalletError::Rejected(reason.to_string())),
            calls: AtomicUsize::new(0),
            last_message: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_message(&self) -> Option<String> {
        self.last_message
            .lock()
            .unwrap()
            .clone()
            .map(|m| String::from_utf8(m).unwrap())
    }
}

#[async_trait]
impl WalletSigner for MockWallet {
    fn address(&self) -> Address {
        Address::new(WALLET_ADDRESS)
    }

    async fn sign(&self, message: &[u8]) -> Result<WalletSignature, WalletError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_message.lock().unwrap() = Some(message.to_vec());
        self.outcome.clone()
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn client_for(server: &MockServer) -> ArkClient {
    ArkClient::builder()
        .network(Network::Testnet)
        .base_url(&server.uri())
        .build()
        .unwrap()
}

fn terms() -> TradeTerms {
    TradeTerms::new(Price::zil(dec("10000")), dec("250"))
        .expiry(100)
        .nonce(0)
}

fn route() -> RouteParams {
    RouteParams::new("0xABC", "42")
}

fn expected_payload(side: &str) -> serde_json::Value {
    json!({
        "publicKey": "pk-123",
        "signature": "sig-abc",
        "address": WALLET_ADDRESS.to_lowercase(),
        "collectionAddress": "0xABC",
        "tokenId": "42",
        "side": side,
        "price": { "amount": "10000", "address": ZIL_HASH },
        "feeAmount": "250",
        "expiry": 100,
        "nonce": 0
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_buy_submits_signed_payload_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRADE_PATH))
        .and(body_json(expected_payload("Buy")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "result": { "id": "trade-1" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let wallet = MockWallet::signing();
    let ctx = WalletContext::connected(wallet.clone(), Network::Testnet);

    let result = client_for(&server)
        .trades()
        .confirm(Side::Buy, &route(), &ctx, &terms())
        .await
        .unwrap();

    assert_eq!(result.status.as_deref(), Some("success"));
    assert_eq!(result.data["result"]["id"], "trade-1");
    assert_eq!(wallet.calls(), 1);

    let order = TradeOrder::builder()
        .buy()
        .collection("0xABC")
        .token_id("42")
        .price(Price::zil(dec("10000")))
        .fee_amount(dec("250"))
        .expiry(100)
        .nonce(0)
        .build()
        .unwrap();
    let expected_message = cheque_message(
        MessageKind::Execute,
        &cheque_hash(Network::Testnet.broker_tag(), &order),
    );
    assert_eq!(wallet.last_message().as_deref(), Some(expected_message.as_str()));
}

#[tokio::test]
async fn test_sell_uses_sell_side() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRADE_PATH))
        .and(body_json(expected_payload("Sell")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let wallet = MockWallet::signing();
    let ctx = WalletContext::connected(wallet.clone(), Network::Testnet);

    let result = client_for(&server)
        .trades()
        .confirm(Side::Sell, &route(), &ctx, &terms())
        .await
        .unwrap();
    assert_eq!(result.status.as_deref(), Some("success"));
}

#[tokio::test]
async fn test_declined_signature_never_submits() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let wallet = MockWallet::declining("User declined");
    let ctx = WalletContext::connected(wallet.clone(), Network::Testnet);

    let (attempt, result) = client_for(&server)
        .trades()
        .confirm_tracked(Side::Buy, &route(), &ctx, &terms())
        .await;

    match result.unwrap_err() {
        TradeError::SigningRejected(cause) => {
            assert_eq!(cause, WalletError::Rejected("User declined".to_string()));
            assert_eq!(cause.to_string(), "User declined");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(wallet.calls(), 1);
    assert_eq!(attempt.phase(), AttemptPhase::Failed);
    assert_eq!(attempt.failed_in(), Some(AttemptPhase::Signing));
}

#[tokio::test]
async fn test_missing_wallet_fails_before_signing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = WalletContext::disconnected(Network::Testnet);
    let err = client_for(&server)
        .trades()
        .confirm(Side::Buy, &route(), &ctx, &terms())
        .await
        .unwrap_err();

    assert!(matches!(err, TradeError::WalletNotConnected));
    assert_eq!(err.phase(), AttemptPhase::Signing);
}

#[tokio::test]
async fn test_missing_route_params_fail_without_side_effects() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let wallet = MockWallet::signing();
    let ctx = WalletContext::connected(wallet.clone(), Network::Testnet);
    let client = client_for(&server);

    for route in [
        RouteParams::new("", "42"),
        RouteParams::new("0xABC", ""),
        RouteParams::default(),
    ] {
        let (attempt, result) = client
            .trades()
            .confirm_tracked(Side::Buy, &route, &ctx, &terms())
            .await;
        assert!(matches!(result, Err(TradeError::InvalidOrderInput(_))));
        assert_eq!(attempt.failed_in(), Some(AttemptPhase::Building));
    }
    assert_eq!(wallet.calls(), 0);
}

#[tokio::test]
async fn test_network_mismatch_is_invalid_input() {
    let server = MockServer::start().await;
    let wallet = MockWallet::signing();
    let ctx = WalletContext::connected(wallet.clone(), Network::Mainnet);

    let err = client_for(&server)
        .trades()
        .confirm(Side::Buy, &route(), &ctx, &terms())
        .await
        .unwrap_err();

    assert!(matches!(err, TradeError::InvalidOrderInput(ref m) if m.contains("mainnet")));
    assert_eq!(wallet.calls(), 0);
}

#[tokio::test]
async fn test_server_rejection_carries_message_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRADE_PATH))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "nonce already used" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ctx = WalletContext::connected(MockWallet::signing(), Network::Testnet);
    let (attempt, result) = client_for(&server)
        .trades()
        .confirm_tracked(Side::Buy, &route(), &ctx, &terms())
        .await;

    match result.unwrap_err() {
        TradeError::SubmissionFailed { status, message } => {
            assert_eq!(status, Some(400));
            assert_eq!(message, "nonce already used");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(attempt.failed_in(), Some(AttemptPhase::Submitting));
}

#[tokio::test]
async fn test_submission_is_not_retried_on_503() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRADE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = WalletContext::connected(MockWallet::signing(), Network::Testnet);
    let err = client_for(&server)
        .trades()
        .confirm(Side::Buy, &route(), &ctx, &terms())
        .await
        .unwrap_err();

    match err {
        TradeError::SubmissionFailed { status, message } => {
            assert_eq!(status, Some(503));
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_in_ok_body_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRADE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "error", "message": "cheque expired" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ctx = WalletContext::connected(MockWallet::signing(), Network::Testnet);
    let err = client_for(&server)
        .trades()
        .confirm(Side::Sell, &route(), &ctx, &terms())
        .await
        .unwrap_err();

    assert!(
        matches!(err, TradeError::SubmissionFailed { status: None, ref message } if message == "cheque expired")
    );
}

#[tokio::test]
async fn test_auth_token_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRADE_PATH))
        .and(header("authorization", "Bearer session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_auth_token("session-token").await;

    let ctx = WalletContext::connected(MockWallet::signing(), Network::Testnet);
    let result = client
        .trades()
        .confirm(Side::Buy, &route(), &ctx, &terms())
        .await
        .unwrap();
    assert_eq!(result.status.as_deref(), Some("success"));
}

#[tokio::test]
async fn test_concurrent_attempts_are_independent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRADE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(2)
        .mount(&server)
        .await;

    let wallet = MockWallet::signing();
    let ctx = WalletContext::connected(wallet.clone(), Network::Testnet);
    let client = client_for(&server);

    let first_terms = terms();
    let second_terms = terms().nonce(1);
    let trades_a = client.trades();
    let trades_b = client.trades();
    let route_a = route();
    let route_b = route();
    let (a, b) = tokio::join!(
        trades_a.confirm(Side::Buy, &route_a, &ctx, &first_terms),
        trades_b.confirm(Side::Buy, &route_b, &ctx, &second_terms),
    );
    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(wallet.calls(), 2);
}

#[tokio::test]
async fn test_list_retries_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TRADE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TRADE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trades": [{
                "id": "t-9",
                "side": "Sell",
                "collectionAddress": "0xABC",
                "tokenId": "42",
                "address": WALLET_ADDRESS,
                "price": { "amount": "10000", "address": ZIL_HASH },
                "expiry": 100,
                "nonce": 0,
                "status": "open"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let trades = client_for(&server)
        .trades()
        .list("0xABC", "42")
        .await
        .unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].side, Side::Sell);
    assert_eq!(trades[0].price.amount, dec("10000"));
    assert_eq!(trades[0].status.as_deref(), Some("open"));
}

#[tokio::test]
async fn test_disconnected_wallet_on_other_network_is_not_connected() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = WalletContext::disconnected(Network::Mainnet);
    let (attempt, result) = client_for(&server)
        .trades()
        .confirm_tracked(Side::Buy, &route(), &ctx, &terms())
        .await;

    assert!(matches!(result, Err(TradeError::WalletNotConnected)));
    assert_eq!(attempt.failed_in(), Some(AttemptPhase::Signing));
}

#[tokio::test]
async fn test_auth_and_rate_limit_rejections_carry_server_message() {
    for (status, message) in [
        (401u16, "session expired, log in again"),
        (403, "collection is not tradable"),
        (429, "too many trades, slow down"),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TRADE_PATH))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({ "message": message })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let ctx = WalletContext::connected(MockWallet::signing(), Network::Testnet);
        let err = client_for(&server)
            .trades()
            .confirm(Side::Buy, &route(), &ctx, &terms())
            .await
            .unwrap_err();

        match err {
            TradeError::SubmissionFailed {
                status: got,
                message: text,
            } => {
                assert_eq!(got, Some(status));
                assert_eq!(text, message);
            }
            other => panic!("unexpected error for {status}: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_huge_retry_after_on_submission_fails_cleanly() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRADE_PATH))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "18446744073709551615")
                .set_body_string("rate limited"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ctx = WalletContext::connected(MockWallet::signing(), Network::Testnet);
    let err = client_for(&server)
        .trades()
        .confirm(Side::Buy, &route(), &ctx, &terms())
        .await
        .unwrap_err();

    assert!(
        matches!(err, TradeError::SubmissionFailed { status: Some(429), ref message } if message == "rate limited")
    );
}
