//! Quote request messages and outbound WhatsApp/Messenger links.
//!
//! # Responsibility
//! - Render cart lines into the pre-filled message texts.
//! - Build `wa.me` / `m.me` links with `encodeURIComponent` escaping.
//!
//! # Invariants
//! - Lines appear in cart order as `<name> (Qty: <n>)`.
//! - No link is produced for an empty cart.

use crate::model::cart::CartItem;
use crate::model::validation::ValidationError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Characters JavaScript's `encodeURIComponent` leaves untouched, besides
/// ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const DEFAULT_BUSINESS_NAME: &str = "Dolphine Wood Machineries";
pub const DEFAULT_WHATSAPP_NUMBER: &str = "1234567890";
pub const DEFAULT_MESSENGER_PAGE: &str = "your-page";

const WHATSAPP_BASE_URL: &str = "https://wa.me";
const MESSENGER_BASE_URL: &str = "https://m.me";

const DETAILED_QUOTE_CHECKLIST: &str = "Please provide me with a detailed quote including:
- Individual item pricing
- Bulk discount pricing (if applicable)
- Delivery timeline
- Installation services
- Training programs
- Warranty details

Thank you!";
const BRIEF_QUOTE_CLOSING: &str = "Please provide me with a detailed quote. Thank you!";

/// Where quote links point. Passed in by the caller; the core never reads
/// configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSettings {
    pub business_name: String,
    /// Digits only, as `wa.me` expects.
    pub whatsapp_number: String,
    pub messenger_page: String,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            messenger_page: DEFAULT_MESSENGER_PAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteChannel {
    #[default]
    WhatsApp,
    Messenger,
}

impl QuoteChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WhatsApp => "whatsapp",
            Self::Messenger => "messenger",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "whatsapp" | "wa" => Ok(Self::WhatsApp),
            "messenger" | "fb" => Ok(Self::Messenger),
            _ => Err(ValidationError::UnknownValue {
                field: "channel",
                value: value.to_string(),
            }),
        }
    }
}

impl Display for QuoteChannel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full cart page wording, or the shorter cart slide-out wording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Detailed,
    Brief,
}

/// Ready-to-open quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLink {
    pub channel: QuoteChannel,
    pub style: QuoteStyle,
    /// Unencoded message text.
    pub message: String,
    pub url: String,
}

/// WhatsApp message in the given style.
pub fn whatsapp_message(items: &[CartItem], business_name: &str, style: QuoteStyle) -> String {
    let lines = items
        .iter()
        .map(|item| format!("• {}", line_label(item)))
        .collect::<Vec<_>>()
        .join("\n");
    let closing = match style {
        QuoteStyle::Detailed => DETAILED_QUOTE_CHECKLIST,
        QuoteStyle::Brief => BRIEF_QUOTE_CLOSING,
    };
    format!(
        "Hello! I'm interested in the following machinery from {business_name}:\n\n{lines}\n\n{closing}"
    )
}

/// Messenger message in the given style; lines are comma-joined on one row.
pub fn messenger_message(items: &[CartItem], style: QuoteStyle) -> String {
    let lines = items
        .iter()
        .map(line_label)
        .collect::<Vec<_>>()
        .join(", ");
    match style {
        QuoteStyle::Detailed => format!(
            "Interested in quote for: {lines}. Please provide detailed pricing and delivery information."
        ),
        QuoteStyle::Brief => format!("Interested in: {lines}. Please provide quote."),
    }
}

/// Percent-encodes like JavaScript's `encodeURIComponent`.
pub fn encode_uri_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!(
        "{WHATSAPP_BASE_URL}/{}?text={}",
        number.trim(),
        encode_uri_component(message)
    )
}

pub fn messenger_link(page: &str, message: &str) -> String {
    format!(
        "{MESSENGER_BASE_URL}/{}?text={}",
        page.trim(),
        encode_uri_component(message)
    )
}

/// Builds the quote link for `items`, or `None` when there is nothing to quote.
pub fn build_quote_link(
    items: &[CartItem],
    settings: &QuoteSettings,
    channel: QuoteChannel,
    style: QuoteStyle,
) -> Option<QuoteLink> {
    if items.is_empty() {
        return None;
    }

    let (message, url) = match channel {
        QuoteChannel::WhatsApp => {
            let message = whatsapp_message(items, &settings.business_name, style);
            let url = whatsapp_link(&settings.whatsapp_number, &message);
            (message, url)
        }
        QuoteChannel::Messenger => {
            let message = messenger_message(items, style);
            let url = messenger_link(&settings.messenger_page, &message);
            (message, url)
        }
    };
    Some(QuoteLink {
        channel,
        style,
        message,
        url,
    })
}

fn line_label(item: &CartItem) -> String {
    format!("{} (Qty: {})", item.name, item.quantity)
}
