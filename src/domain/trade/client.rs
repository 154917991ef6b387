//! Trades sub-client — sign, submit and confirm trades; list a token's trades.

use crate::cheque;
use crate::client::ArkClient;
use crate::domain::trade::wire::{PostTradeRequest, PostTradeResponse, TradesResponse};
use crate::domain::trade::{
    AttemptPhase, OrderBuilder, RouteParams, SignedSubmission, Trade, TradeAttempt, TradeOrder,
    TradeResult, TradeTerms,
};
use crate::error::{SdkError, TradeError};
use crate::http::RetryPolicy;
use crate::shared::{Address, Side, TokenId};
use crate::wallet::{WalletContext, WalletSigner};

pub struct Trades<'a> {
    pub(crate) client: &'a ArkClient,
}

impl<'a> Trades<'a> {
    fn trade_url(&self, collection: &Address, token_id: &TokenId) -> String {
        format!(
            "{}/nft/trade/{}/{}",
            self.client.http.base_url(),
            urlencoding::encode(collection.as_str().trim()),
            urlencoding::encode(token_id.as_str().trim())
        )
    }

    /// Ask `wallet` to sign the `Execute` cheque for `order`.
    ///
    /// Fails with [`TradeError::WalletNotConnected`] before any message is
    /// derived when no wallet is given.
    pub async fn sign(
        &self,
        order: &TradeOrder,
        wallet: Option<&dyn WalletSigner>,
    ) -> Result<SignedSubmission, TradeError> {
        order.validate()?;
        let wallet = wallet.ok_or(TradeError::WalletNotConnected)?;

        let message = cheque::execute_message(self.client.network.broker_tag(), order);
        let signed = wallet
            .sign(&message)
            .await
            .map_err(TradeError::SigningRejected)?;

        Ok(SignedSubmission {
            order: order.clone(),
            address: wallet.address(),
            public_key: signed.public_key,
            signature: signed.signature,
        })
    }

    /// Submit a signed order. One request, never retried.
    pub async fn submit(&self, signed: &SignedSubmission) -> Result<TradeResult, TradeError> {
        let url = self.trade_url(
            &signed.order.token.collection_address,
            &signed.order.token.token_id,
        );
        let body = PostTradeRequest::from(signed);
        let resp: PostTradeResponse = self.client.http.post(&url, &body, RetryPolicy::None).await?;
        TradeResult::try_from(resp)
    }

    /// Build, sign and submit a trade for the NFT named by `route`.
    ///
    /// This is the whole per-click flow. Each call is an independent attempt;
    /// disabling the triggering control while it runs is the caller's job.
    pub async fn confirm(
        &self,
        side: Side,
        route: &RouteParams,
        ctx: &WalletContext,
        terms: &TradeTerms,
    ) -> Result<TradeResult, TradeError> {
        self.confirm_tracked(side, route, ctx, terms).await.1
    }

    /// [`confirm`](Self::confirm), also returning the phases the attempt passed through.
    pub async fn confirm_tracked(
        &self,
        side: Side,
        route: &RouteParams,
        ctx: &WalletContext,
        terms: &TradeTerms,
    ) -> (TradeAttempt, Result<TradeResult, TradeError>) {
        let mut attempt = TradeAttempt::new();
        let result = self.run_attempt(&mut attempt, side, route, ctx, terms).await;

        match &result {
            Ok(res) => {
                tracing::debug!(%side, status = ?res.status, "trade submitted");
                advance(&mut attempt, AttemptPhase::Succeeded);
            }
            Err(e) => {
                tracing::warn!(%side, phase = %e.phase(), error = %e, "trade attempt failed");
                advance(&mut attempt, AttemptPhase::Failed);
            }
        }
        (attempt, result)
    }

    async fn run_attempt(
        &self,
        attempt: &mut TradeAttempt,
        side: Side,
        route: &RouteParams,
        ctx: &WalletContext,
        terms: &TradeTerms,
    ) -> Result<TradeResult, TradeError> {
        advance(attempt, AttemptPhase::Building);
        // A disconnected context's network is meaningless; that case fails in Signing.
        if ctx.is_connected() && ctx.network != self.client.network {
            return Err(TradeError::InvalidOrderInput(format!(
                "wallet is on {} but client targets {}",
                ctx.network, self.client.network
            )));
        }
        let order = OrderBuilder::from_route(side, route, terms).build()?;
        tracing::debug!(
            %side,
            collection = %order.token.collection_address,
            token_id = %order.token.token_id,
            nonce = order.nonce,
            "trade order built"
        );

        advance(attempt, AttemptPhase::Signing);
        let signed = self.sign(&order, ctx.wallet()).await?;

        advance(attempt, AttemptPhase::Submitting);
        self.submit(&signed).await
    }

    /// Recent trades and listings for one NFT.
    pub async fn list(
        &self,
        collection: impl Into<Address>,
        token_id: impl Into<TokenId>,
    ) -> Result<Vec<Trade>, SdkError> {
        let url = self.trade_url(&collection.into(), &token_id.into());
        let resp: TradesResponse = self
            .client
            .http
            .get(&url, RetryPolicy::Idempotent)
            .await?;
        Ok(resp.trades.into_iter().map(Trade::from).collect())
    }
}

fn advance(attempt: &mut TradeAttempt, next: AttemptPhase) {
    // The flow above only issues legal transitions.
    if let Err(e) = attempt.advance(next) {
        tracing::error!(error = %e, "trade attempt state out of sync");
    }
}
