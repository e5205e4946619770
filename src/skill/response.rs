use serde::{Deserialize, Serialize};

use super::event::Intent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(default)]
    pub session_attributes: serde_json::Map<String, serde_json::Value>,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
    PlainText { text: String },
}

impl OutputSpeech {
    pub fn ssml(text: &str) -> Self {
        OutputSpeech::Ssml {
            ssml: format!("<speak> {} </speak>", escape_ssml(text)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Dialog directives understood by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "Dialog.Delegate")]
    Delegate {
        #[serde(rename = "updatedIntent", default, skip_serializing_if = "Option::is_none")]
        updated_intent: Option<Intent>,
    },
    #[serde(rename = "Dialog.ElicitSlot")]
    ElicitSlot {
        #[serde(rename = "slotToElicit")]
        slot_to_elicit: String,
        #[serde(rename = "updatedIntent", default, skip_serializing_if = "Option::is_none")]
        updated_intent: Option<Intent>,
    },
}

fn escape_ssml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Accumulates one turn's response.
///
/// `speak` alone closes the session; `listen` or any dialog directive keeps it open.
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    body: ResponseBody,
    session_attributes: serde_json::Map<String, serde_json::Value>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speak(mut self, text: &str) -> Self {
        self.body.output_speech = Some(OutputSpeech::ssml(text));
        if self.body.should_end_session.is_none() {
            self.body.should_end_session = Some(true);
        }
        self
    }

    pub fn listen(mut self, reprompt: &str) -> Self {
        self.body.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::ssml(reprompt),
        });
        self.body.should_end_session = Some(false);
        self
    }

    pub fn directive(mut self, directive: Directive) -> Self {
        self.body.directives.push(directive);
        self.body.should_end_session = Some(false);
        self
    }

    pub fn session_attributes(
        mut self,
        attributes: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.session_attributes = attributes;
        self
    }

    pub fn build(self) -> ResponseEnvelope {
        ResponseEnvelope {
            version: "1.0".to_string(),
            session_attributes: self.session_attributes,
            response: self.body,
        }
    }
}

impl ResponseEnvelope {
    /// Plain text of the spoken output with the SSML wrapper removed.
    pub fn speech_text(&self) -> Option<&str> {
        match self.response.output_speech.as_ref()? {
            OutputSpeech::Ssml { ssml } => Some(
                ssml.trim_start_matches("<speak>")
                    .trim_end_matches("</speak>")
                    .trim(),
            ),
            OutputSpeech::PlainText { text } => Some(text.as_str()),
        }
    }
}
