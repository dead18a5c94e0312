//! User-facing message rendering
//!
//! Multi-line replies are handlebars templates compiled in from
//! `src/templates`. One-line replies are plain `format!` helpers.

use handlebars::{Handlebars, RenderError, TemplateError};
use nitro_types::SwapRequest;
use serde::Serialize;
use tracing::debug;

const CONFIRMATION_TEMPLATE: &str = "confirmation";
const SUCCESS_TEMPLATE: &str = "success";

/// Shown when neither the request nor the settings carry a recipient
const DEFAULT_WALLET_LABEL: &str = "Default wallet";

pub const CANCELLED_MESSAGE: &str = "Swap cancelled. Provide the prompt again";
pub const REPROMPT_MESSAGE: &str = "Please reply Yes to execute the swap or No to cancel it.";

#[derive(Debug, Serialize)]
struct ConfirmationContext<'a> {
    from_chain: &'a str,
    to_chain: &'a str,
    from_token: &'a str,
    to_token: &'a str,
    amount: &'a str,
    to_address: &'a str,
}

/// Values for the completed-swap message
#[derive(Debug)]
pub struct SuccessContext<'a> {
    pub request: &'a SwapRequest,
    pub amount_out: f64,
    pub tx_hash: &'a str,
    pub explorer_url: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SuccessView<'a> {
    from_chain: &'a str,
    to_chain: &'a str,
    from_token: &'a str,
    to_token: &'a str,
    amount: &'a str,
    amount_out: String,
    tx_hash: &'a str,
    explorer_url: Option<&'a str>,
}

pub struct MessageRenderer {
    handlebars: Handlebars<'static>,
}

impl MessageRenderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_template_string(
            CONFIRMATION_TEMPLATE,
            include_str!("templates/confirmation.hbs"),
        )?;
        handlebars.register_template_string(SUCCESS_TEMPLATE, include_str!("templates/success.hbs"))?;

        debug!("Message templates registered");
        Ok(Self { handlebars })
    }

    /// Swap summary ending in the Yes/No prompt.
    pub fn confirmation(&self, request: &SwapRequest) -> Result<String, RenderError> {
        let context = ConfirmationContext {
            from_chain: &request.from_chain,
            to_chain: &request.to_chain,
            from_token: &request.from_token,
            to_token: &request.to_token,
            amount: &request.amount,
            to_address: request.to_address.as_deref().unwrap_or(DEFAULT_WALLET_LABEL),
        };
        self.render(CONFIRMATION_TEMPLATE, &context)
    }

    pub fn success(&self, context: &SuccessContext<'_>) -> Result<String, RenderError> {
        let view = SuccessView {
            from_chain: &context.request.from_chain,
            to_chain: &context.request.to_chain,
            from_token: &context.request.from_token,
            to_token: &context.request.to_token,
            amount: &context.request.amount,
            amount_out: format_amount(context.amount_out),
            tx_hash: context.tx_hash,
            explorer_url: context.explorer_url,
        };
        self.render(SUCCESS_TEMPLATE, &view)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        let rendered = self.handlebars.render(name, data)?;
        Ok(rendered.trim_end().to_string())
    }
}

/// `100` rather than `100.0`, `99.8` stays `99.8`.
pub fn format_amount(amount: f64) -> String {
    amount.to_string()
}

pub fn missing_params_message(missing: &[&str]) -> String {
    format!(
        "Missing specific swap parameters: {} Please provide the entire prompt.",
        missing.join(", ")
    )
}

pub fn quote_message(amount_out: f64, symbol: &str) -> String {
    format!("Quote: {} {}", format_amount(amount_out), symbol)
}

pub fn propose_error_message(reason: &str) -> String {
    format!("Error during swap: {reason}")
}

pub fn failure_message(reason: &str) -> String {
    format!("Failed: {reason}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SwapRequest {
        SwapRequest::new("Polygon", "Arbitrum", "USDC", "USDC", "100")
    }

    #[test]
    fn test_confirmation_lists_details_and_prompt() {
        let renderer = MessageRenderer::new().unwrap();
        let message = renderer
            .confirmation(&request().with_to_address("0xCCa8009f5e09F8C5dB63cb0031052F9CB635Af62"))
            .unwrap();

        assert!(message.starts_with("Swap Details:\n- From: USDC on Polygon\n"));
        assert!(message.contains("- To: USDC on Arbitrum"));
        assert!(message.contains("- Amount In: 100 USDC"));
        assert!(message.contains("- Destination Address: 0xCCa8009f5e09F8C5dB63cb0031052F9CB635Af62"));
        assert!(message.contains("cannot be cancelled"));
        assert!(message.ends_with("Confirm swap? (Yes/No)"));
    }

    #[test]
    fn test_confirmation_without_recipient() {
        let renderer = MessageRenderer::new().unwrap();
        let message = renderer.confirmation(&request()).unwrap();
        assert!(message.contains("- Destination Address: Default wallet"));
    }

    #[test]
    fn test_success_with_and_without_explorer() {
        let renderer = MessageRenderer::new().unwrap();
        let request = request();

        let with_explorer = renderer
            .success(&SuccessContext {
                request: &request,
                amount_out: 99.8,
                tx_hash: "0xabc",
                explorer_url: Some("https://polygonscan.com/tx/0xabc"),
            })
            .unwrap();
        assert_eq!(
            with_explorer,
            "Swap completed successfully!\n\
             Sent 100 USDC from Polygon to USDC on Arbitrum\n\
             Received approximately 99.8 USDC\n\
             Transaction Hash: 0xabc\n\
             Explorer: https://polygonscan.com/tx/0xabc"
        );

        let without = renderer
            .success(&SuccessContext {
                request: &request,
                amount_out: 100.0,
                tx_hash: "0xabc",
                explorer_url: None,
            })
            .unwrap();
        assert!(without.contains("Received approximately 100 USDC"));
        assert!(without.ends_with("Transaction Hash: 0xabc"));
    }

    #[test]
    fn test_one_line_messages() {
        assert_eq!(
            missing_params_message(&["toChain", "amount"]),
            "Missing specific swap parameters: toChain, amount Please provide the entire prompt."
        );
        assert_eq!(quote_message(99.8, "USDC"), "Quote: 99.8 USDC");
        assert_eq!(quote_message(1.0, "ETH"), "Quote: 1 ETH");
    }
}
