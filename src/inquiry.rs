//! Outbound contact links: WhatsApp deep links and mailto compose links.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;

use crate::models::{CatalogItem, ContactChannels};
use crate::parsers::{clean_text, CurrencyFormatter};

/// Characters left as-is inside link query values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    WhatsApp,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryLink {
    pub channel: Channel,
    pub url: String,
}

/// Where inquiries are sent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InquiryTarget {
    pub whatsapp_digits: Option<String>,
    pub email: Option<String>,
}

impl InquiryTarget {
    pub fn new(contact: &ContactChannels, email: &str) -> Self {
        let email = email.trim();
        Self {
            whatsapp_digits: contact.whatsapp_digits(),
            email: (!email.is_empty()).then(|| email.to_string()),
        }
    }

    pub fn whatsapp_link(&self, message: &str) -> Option<String> {
        self.whatsapp_digits.as_ref().map(|digits| {
            format!(
                "https://wa.me/{}?text={}",
                digits,
                utf8_percent_encode(message, QUERY_VALUE)
            )
        })
    }

    pub fn email_link(&self, subject: &str, body: &str) -> Option<String> {
        self.email.as_ref().map(|email| {
            format!(
                "mailto:{}?subject={}&body={}",
                email,
                utf8_percent_encode(subject, QUERY_VALUE),
                utf8_percent_encode(body, QUERY_VALUE)
            )
        })
    }
}

/// A prepared inquiry about one catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    pub subject: String,
    pub message: String,
    whatsapp: Option<String>,
    email: Option<String>,
}

impl Inquiry {
    pub fn for_item(item: &CatalogItem, fmt: &CurrencyFormatter, target: &InquiryTarget) -> Self {
        let title = item.title();
        let mut details = Vec::new();
        if let Some(brand) = &item.brand {
            details.push(format!("Brand: {}", brand));
        }
        if let Some(category) = &item.category {
            details.push(format!("Category: {}", category));
        }
        if let Some(year) = item.year {
            details.push(format!("Year: {}", year));
        }
        if let Some(price) = item.market_price {
            details.push(format!("Price: {}", fmt.format(price)));
        } else if let Some(raw) = &item.market_price_raw {
            details.push(format!("Price: {}", raw));
        }

        let mut message = format!("Hello CARJU, I'm interested in the {}.", title);
        if !details.is_empty() {
            message.push_str(&format!(" {}.", details.join(", ")));
        }
        message.push_str(" Please send me more details.");

        let subject = format!("Vehicle inquiry: {}", title);
        Self {
            whatsapp: target.whatsapp_link(&message),
            email: target.email_link(&subject, &message),
            subject,
            message,
        }
    }

    pub fn whatsapp_link(&self) -> Option<&str> {
        self.whatsapp.as_deref()
    }

    pub fn email_link(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// The user's answer to "Contact us on WhatsApp?": yes opens WhatsApp, no opens e-mail.
    /// Falls back to whichever channel exists.
    pub fn choose(&self, prefer_whatsapp: bool) -> Option<InquiryLink> {
        let whatsapp = self.whatsapp.clone().map(|url| InquiryLink {
            channel: Channel::WhatsApp,
            url,
        });
        let email = self.email.clone().map(|url| InquiryLink {
            channel: Channel::Email,
            url,
        });
        if prefer_whatsapp {
            whatsapp.or(email)
        } else {
            email.or(whatsapp)
        }
    }
}

/// "Call me back" form submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CallbackRequest {
    pub name: String,
    pub phone: String,
    pub note: String,
}

impl CallbackRequest {
    /// Decode an `application/x-www-form-urlencoded` body.
    pub fn from_form(body: &str) -> Result<Self, serde_urlencoded::de::Error> {
        serde_urlencoded::from_str(body)
    }

    /// Message to send, or `None` when the phone number has no digits.
    pub fn message(&self) -> Option<String> {
        if !self.phone.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }
        let name = clean_text(&self.name);
        let mut message = format!(
            "Callback request from {}: {}.",
            if name.is_empty() { "a visitor" } else { name.as_str() },
            clean_text(&self.phone)
        );
        let note = clean_text(&self.note);
        if !note.is_empty() {
            message.push_str(&format!(" Note: {}", note));
        }
        Some(message)
    }

    pub fn link(&self, target: &InquiryTarget) -> Option<InquiryLink> {
        let message = self.message()?;
        if let Some(url) = target.whatsapp_link(&message) {
            return Some(InquiryLink {
                channel: Channel::WhatsApp,
                url,
            });
        }
        target
            .email_link("Callback request", &message)
            .map(|url| InquiryLink {
                channel: Channel::Email,
                url,
            })
    }
}
