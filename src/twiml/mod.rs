//! TwiML response rendering
//!
//! Minimal builder for the Twilio messaging response XML returned to the
//! webhook caller: a `<Response>` element holding zero or more `<Message>`
//! elements, each with a `<Body>` and an optional `<Media>` URL.

/// A single outbound message element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub body: String,
    pub media_url: Option<String>,
}

/// Builder for a TwiML messaging response
#[derive(Debug, Clone, Default)]
pub struct MessagingResponse {
    messages: Vec<Message>,
}

impl MessagingResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text-only message
    pub fn message(mut self, body: impl Into<String>) -> Self {
        self.messages.push(Message { body: body.into(), media_url: None });
        self
    }

    /// Append a message with an optional media attachment
    pub fn message_with_media(
        mut self,
        body: impl Into<String>,
        media_url: Option<String>,
    ) -> Self {
        self.messages.push(Message { body: body.into(), media_url });
        self
    }

    /// Render the response document
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#);
        for message in &self.messages {
            xml.push_str("<Message><Body>");
            xml.push_str(&escape_xml(&message.body));
            xml.push_str("</Body>");
            if let Some(media_url) = &message.media_url {
                xml.push_str("<Media>");
                xml.push_str(&escape_xml(media_url));
                xml.push_str("</Media>");
            }
            xml.push_str("</Message>");
        }
        xml.push_str("</Response>");
        xml
    }
}

/// Escape XML text content
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
