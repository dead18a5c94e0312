//! Propose/confirm swap flow
//!
//! `propose` resolves the chains and asks for confirmation. `confirm`
//! classifies the user's reply and, on yes, quotes and executes. Neither
//! returns an error: every failure becomes a [`SwapOutcome`] with
//! `success == false` and a user-facing message.

use std::sync::Arc;

use alloy::primitives::U256;
use handlebars::{RenderError, TemplateError};
use nitro_constants::EVM_ADDRESS_SETTING;
use nitro_protocols::address::effective_recipient;
use nitro_protocols::amount::scale_amount;
use nitro_protocols::{
    ChainRegistry, ChainRegistryResolver, EvmExecutorFactory, ExecutionPlan, ExecutorFactory,
    NitroConfig, ProtocolError, QuoteClient, SwapExecutor, TokenResolver,
};
use nitro_sdk::{ApiError, NitroApi, NitroClient};
use nitro_types::{
    ConfirmationReply, Quote, ResolvedSwap, SwapOutcome, SwapProposal, SwapRequest, SwapStage,
    TokenConfig,
};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::messages::{
    failure_message, missing_params_message, propose_error_message, quote_message,
    MessageRenderer, SuccessContext, CANCELLED_MESSAGE, REPROMPT_MESSAGE,
};

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("Unable to render message: {0}")]
    Render(#[from] RenderError),
    #[error("Unable to load message templates: {0}")]
    Template(#[from] TemplateError),
    #[error("Unable to create API client: {0}")]
    Client(#[from] ApiError),
}

impl FlowError {
    fn user_message(&self) -> String {
        match self {
            FlowError::Protocol(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Tokens, scaled amount and quote for one resolved request
struct QuotedSwap {
    resolved: ResolvedSwap,
    from_token: TokenConfig,
    amount_in: U256,
    quote: Quote,
}

pub struct SwapFlow {
    chains: ChainRegistryResolver,
    tokens: TokenResolver,
    quotes: QuoteClient,
    executors: Arc<dyn ExecutorFactory>,
    default_recipient: Option<String>,
    messages: MessageRenderer,
}

impl SwapFlow {
    pub fn new(
        api: Arc<dyn NitroApi>,
        executors: Arc<dyn ExecutorFactory>,
        config: &NitroConfig,
    ) -> Result<Self, FlowError> {
        let request_timeout = config.api.timeout;
        Ok(Self {
            chains: ChainRegistryResolver::new(api.clone(), config.cache_ttl, request_timeout),
            tokens: TokenResolver::new(
                api.clone(),
                config.symbol_cases.clone(),
                config.cache_capacity,
                config.cache_ttl,
            ),
            quotes: QuoteClient::new(api, config.partner_id, request_timeout),
            executors,
            default_recipient: config.default_recipient.clone(),
            messages: MessageRenderer::new()?,
        })
    }

    /// HTTP client and alloy executors built from `config`.
    pub fn from_config(config: NitroConfig) -> Result<Self, FlowError> {
        let api: Arc<dyn NitroApi> = Arc::new(NitroClient::new(config.api.clone())?);
        let quotes = QuoteClient::new(api.clone(), config.partner_id, config.api.timeout);
        let config = Arc::new(config);
        let executors = Arc::new(EvmExecutorFactory::new(config.clone(), quotes));
        Self::new(api, executors, &config)
    }

    /// Current registry snapshot.
    pub async fn chains(&self) -> Result<Arc<ChainRegistry>, ProtocolError> {
        self.chains.snapshot().await
    }

    /// Resolves the request and asks the user to confirm it.
    #[instrument(skip(self, request), fields(
        from_chain = %request.from_chain,
        to_chain = %request.to_chain,
        amount = %request.amount
    ))]
    pub async fn propose(&self, request: SwapRequest) -> SwapOutcome {
        let missing = request.missing_params();
        if !missing.is_empty() {
            let message = missing_params_message(&missing);
            info!("{}", message);
            return SwapOutcome::failed(message);
        }

        match self.try_propose(request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("Error during swap proposal: {}", err);
                SwapOutcome::failed(propose_error_message(&err.user_message()))
            }
        }
    }

    async fn try_propose(&self, mut request: SwapRequest) -> Result<SwapOutcome, FlowError> {
        let resolved = self
            .chains
            .process_chain_swap(&request.from_chain, &request.to_chain)
            .await?;
        request.to_address = self.recipient_for(&request, &resolved);

        let message = self.messages.confirmation(&request)?;
        info!(
            "Awaiting confirmation for {} {} from chain {} to chain {}",
            request.amount, request.from_token, resolved.from_chain_id, resolved.to_chain_id
        );
        Ok(SwapOutcome::at_stage(SwapStage::Proposed, false, message)
            .with_proposal(SwapProposal::new(request, resolved)))
    }

    /// Applies the user's reply to a stored proposal.
    #[instrument(skip(self, proposal), fields(session_id = %proposal.session_id))]
    pub async fn confirm(&self, proposal: &SwapProposal, reply: &str) -> SwapOutcome {
        match ConfirmationReply::parse(reply) {
            ConfirmationReply::Decline => {
                info!("Swap declined");
                SwapOutcome::at_stage(SwapStage::Proposed, false, CANCELLED_MESSAGE)
            }
            ConfirmationReply::Unclear => {
                info!("Reply {:?} is neither yes nor no", reply);
                SwapOutcome::at_stage(SwapStage::Proposed, false, REPROMPT_MESSAGE)
                    .with_proposal(proposal.clone())
            }
            ConfirmationReply::Confirm => self.execute(proposal).await,
        }
    }

    /// Resolution and quote only. Nothing is signed.
    #[instrument(skip(self, request), fields(
        from_chain = %request.from_chain,
        to_chain = %request.to_chain,
        amount = %request.amount
    ))]
    pub async fn quote(&self, request: &SwapRequest) -> SwapOutcome {
        let missing = request.missing_params();
        if !missing.is_empty() {
            return SwapOutcome::failed(missing_params_message(&missing));
        }

        match self.quote_request(request).await {
            Ok(quoted) => {
                let amount_out = quoted.quote.normalized_amount_out();
                let mut outcome = SwapOutcome::at_stage(
                    SwapStage::Quoted,
                    true,
                    quote_message(amount_out, quoted.quote.destination_symbol()),
                );
                outcome.amount_out = Some(amount_out);
                outcome
            }
            Err(err) => {
                error!("Quote failed: {}", err);
                SwapOutcome::failed(failure_message(&err.user_message()))
            }
        }
    }

    async fn execute(&self, proposal: &SwapProposal) -> SwapOutcome {
        let mut transcript = Vec::new();
        match self.try_execute(proposal, &mut transcript).await {
            Ok(mut outcome) => {
                transcript.push(outcome.message);
                outcome.message = transcript.join("\n");
                outcome
            }
            Err(err) => {
                error!("Error in swap confirmation: {}", err);
                transcript.push(failure_message(&err.user_message()));
                SwapOutcome::failed(transcript.join("\n"))
            }
        }
    }

    async fn try_execute(
        &self,
        proposal: &SwapProposal,
        transcript: &mut Vec<String>,
    ) -> Result<SwapOutcome, FlowError> {
        let request = &proposal.request;
        let quoted = self.quote_request(request).await?;

        let amount_out = quoted.quote.normalized_amount_out();
        transcript.push(quote_message(amount_out, quoted.quote.destination_symbol()));

        let recipient = self
            .recipient_for(request, &quoted.resolved)
            .ok_or_else(|| ProtocolError::Config(format!("{EVM_ADDRESS_SETTING} is required")))?;

        let executor = self
            .executors
            .executor_for(&quoted.resolved.source_family(), &quoted.resolved.from_chain_id)
            .await?;

        info!("Executing swap to {}", recipient);
        let plan = ExecutionPlan {
            source_chain_id: quoted.resolved.from_chain_id.clone(),
            from_token: quoted.from_token,
            amount_in: quoted.amount_in,
            quote: quoted.quote,
            recipient,
        };
        let receipt = executor.execute(&plan).await?;

        let message = self.messages.success(&SuccessContext {
            request,
            amount_out,
            tx_hash: &receipt.tx_hash,
            explorer_url: receipt.explorer_url.as_deref(),
        })?;
        info!("{}", message);

        let mut outcome = SwapOutcome::at_stage(SwapStage::Succeeded, true, message)
            .with_proposal(proposal.clone());
        outcome.tx_hash = Some(receipt.tx_hash);
        outcome.explorer_url = receipt.explorer_url;
        outcome.amount_out = Some(amount_out);
        Ok(outcome)
    }

    async fn quote_request(&self, request: &SwapRequest) -> Result<QuotedSwap, FlowError> {
        let resolved = self
            .chains
            .process_chain_swap(&request.from_chain, &request.to_chain)
            .await?;

        let from_token = self
            .tokens
            .resolve(&resolved.from_chain_id, &request.from_token)
            .await?;
        let to_token = self
            .tokens
            .resolve(&resolved.to_chain_id, &request.to_token)
            .await?;

        let amount_in = scale_amount(&request.amount, from_token.decimals)?;
        let quote = self
            .quotes
            .quote(
                &from_token,
                &to_token,
                amount_in,
                &resolved.from_chain_id,
                &resolved.to_chain_id,
            )
            .await?;

        Ok(QuotedSwap {
            resolved,
            from_token,
            amount_in,
            quote,
        })
    }

    /// Requested address when valid on the destination chain, else the
    /// configured default.
    fn recipient_for(&self, request: &SwapRequest, resolved: &ResolvedSwap) -> Option<String> {
        let recipient = effective_recipient(
            &resolved.destination_family(),
            request.to_address.as_deref(),
            self.default_recipient.as_deref(),
        );
        if let Some(requested) = request.to_address.as_deref() {
            if recipient.as_deref() != Some(requested.trim()) {
                warn!(
                    "Recipient {:?} is not a valid {} address, using the default",
                    requested,
                    resolved.destination_family()
                );
            }
        }
        recipient
    }
}
