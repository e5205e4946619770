use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use super::event::{IntentRequest, Request, RequestEnvelope, SessionEndedRequest};
use super::response::{Directive, ResponseBuilder, ResponseEnvelope};
use crate::advisor::Answers;
use crate::config::SkillConfig;
use crate::error::SkillError;
use crate::kernel::dialog::controller::{DialogController, DialogDirective, DialogOutcome};
use crate::kernel::dialog::disambiguator::Disambiguator;
use crate::kernel::dialog::slots::slot_values;
use crate::kernel::telemetry::event::{RequestKind, TelemetryEvent};
use crate::outputs::realizer;

pub const LOWER_DIV_INTENT: &str = "LowerDivIntent";
pub const UPPER_DIV_INTENT: &str = "UpperDivIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const RECOMMEND_INTENT: &str = "AMAZON.RecommendIntent";

/// Result of one turn: the response for the host plus content-free telemetry
/// for the driver to record.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub response: ResponseEnvelope,
    pub telemetry: Vec<TelemetryEvent>,
}

pub struct SkillHandler {
    config: SkillConfig,
    controller: DialogController,
}

impl SkillHandler {
    pub fn new(config: SkillConfig) -> Self {
        let controller = DialogController::new(Disambiguator::new(), config.prefill.clone());
        Self { config, controller }
    }

    /// Decodes one raw request envelope and handles it.
    pub fn handle_json(&self, raw: &str) -> Result<TurnOutcome, SkillError> {
        let envelope: RequestEnvelope = serde_json::from_str(raw)?;
        Ok(self.handle(&envelope))
    }

    /// Pure turn step: request in, response out. No state survives the call.
    pub fn handle(&self, envelope: &RequestEnvelope) -> TurnOutcome {
        let request_id = envelope
            .request
            .request_id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let span = info_span!("turn", request_id = %request_id);
        let _guard = span.enter();

        let mut telemetry = vec![TelemetryEvent::RequestReceived {
            kind: RequestKind::from(&envelope.request),
        }];

        let builder = match &envelope.request {
            Request::LaunchRequest(_) => {
                info!("in LaunchRequest");
                self.on_launch()
            }
            Request::IntentRequest(req) => self.on_intent(req, &mut telemetry),
            Request::SessionEndedRequest(req) => self.on_session_ended(req, &mut telemetry),
            Request::Unknown => self.unhandled(),
        };

        let attributes = envelope
            .session
            .as_ref()
            .map(|s| s.attributes.clone())
            .unwrap_or_default();

        TurnOutcome {
            response: builder.session_attributes(attributes).build(),
            telemetry,
        }
    }

    /// Response used when a request could not even be decoded.
    pub fn fallback_response(&self) -> ResponseEnvelope {
        self.unhandled().build()
    }

    fn on_launch(&self) -> ResponseBuilder {
        ResponseBuilder::new()
            .speak(&realizer::welcome(&self.config.skill_name))
            .listen(realizer::DIVISION_QUESTION)
    }

    fn on_intent(&self, req: &IntentRequest, telemetry: &mut Vec<TelemetryEvent>) -> ResponseBuilder {
        info!(intent = %req.intent.name, "Routing intent");
        match req.intent.name.as_str() {
            LOWER_DIV_INTENT => ResponseBuilder::new().speak(realizer::LOWER_DIVISION),
            UPPER_DIV_INTENT => self.on_upper_division(req, telemetry),
            STOP_INTENT | CANCEL_INTENT => ResponseBuilder::new().speak(realizer::BYE),
            HELP_INTENT => ResponseBuilder::new()
                .speak(&realizer::help(&self.config.skill_name))
                .listen(realizer::HELP_REPROMPT),
            RECOMMEND_INTENT => ResponseBuilder::new()
                .speak(realizer::DIVISION_QUESTION)
                .listen(realizer::DIVISION_QUESTION),
            _ => self.unhandled(),
        }
    }

    fn on_upper_division(
        &self,
        req: &IntentRequest,
        telemetry: &mut Vec<TelemetryEvent>,
    ) -> ResponseBuilder {
        let filled = match self
            .controller
            .delegate_slot_collection(&req.intent, req.dialog_state)
        {
            DialogOutcome::Continue(DialogDirective::Delegate { updated_intent }) => {
                telemetry.push(TelemetryEvent::DialogDelegated { state: req.dialog_state });
                return ResponseBuilder::new().directive(Directive::Delegate {
                    updated_intent: Some(updated_intent),
                });
            }
            DialogOutcome::Continue(DialogDirective::ElicitSlot {
                clarification,
                updated_intent,
            }) => {
                telemetry.push(TelemetryEvent::ClarificationRequested {
                    slot: clarification.slot.clone(),
                    reason: clarification.reason,
                });
                return ResponseBuilder::new()
                    .speak(&clarification.prompt)
                    .listen(&clarification.reprompt)
                    .directive(Directive::ElicitSlot {
                        slot_to_elicit: clarification.slot,
                        updated_intent: Some(updated_intent),
                    });
            }
            DialogOutcome::Completed(slots) => slots,
        };

        let values = slot_values(&filled);
        debug!(?values, "Slot values");
        for slot in values.unvalidated() {
            telemetry.push(TelemetryEvent::SlotUnvalidated { slot: slot.to_string() });
        }

        let speech = match Answers::from_slot_values(&values) {
            Ok(answers) => {
                let entry = answers.recommend();
                match entry {
                    Some(e) => {
                        info!(course_index = e.index, "Recommendation found");
                        telemetry.push(TelemetryEvent::RecommendationServed { course_index: e.index });
                    }
                    None => {
                        warn!(key = %answers.key(), "No course for composite key");
                        telemetry.push(TelemetryEvent::LookupMiss);
                    }
                }
                realizer::recommendation(&answers, entry)
            }
            Err(e) => {
                warn!("{}", e);
                telemetry.push(TelemetryEvent::LookupMiss);
                realizer::no_recommendation()
            }
        };

        debug!(speech = %speech, "Speech output");
        ResponseBuilder::new().speak(&speech)
    }

    fn on_session_ended(
        &self,
        req: &SessionEndedRequest,
        telemetry: &mut Vec<TelemetryEvent>,
    ) -> ResponseBuilder {
        info!(reason = ?req.reason, "Session ended");
        telemetry.push(TelemetryEvent::SessionEnded);
        ResponseBuilder::new()
    }

    fn unhandled(&self) -> ResponseBuilder {
        ResponseBuilder::new().speak(&realizer::unhandled(&self.config.skill_name))
    }
}
