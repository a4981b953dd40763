//! Per-message orchestration of the echo pipeline.
//!
//! Scans the questions of one incoming message in order and accumulates
//! synthesized records. The scan is a small state machine: it either runs to
//! completion (answer or fall through, depending on whether anything was
//! accumulated), or an address template queried at AAAA aborts it early and
//! the whole message resolves to a single negative response.

use crate::ports::UpstreamResolver;
use crate::services::synthesize;
use echo_dns_domain::config::EchoConfig;
use echo_dns_domain::{decode_template, DnsQuestion, TemplateMatch};
use hickory_proto::rr::Record;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::debug;

/// Terminal state of one scan.
#[derive(Debug)]
pub enum EchoResponse {
    /// Authoritative success reply carrying the accumulated records.
    Answer {
        records: Vec<Record>,
        truncated: bool,
    },
    /// NXDOMAIN with a fabricated SOA for `zone`; any records accumulated
    /// before the abort are discarded.
    NameError { zone: String },
    /// Nothing was produced; the caller hands the query to the next handler.
    Unhandled,
}

#[derive(Default)]
struct AnswerAccumulator {
    records: Vec<Record>,
    truncated: bool,
}

impl AnswerAccumulator {
    fn into_response(self) -> EchoResponse {
        if self.records.is_empty() {
            EchoResponse::Unhandled
        } else {
            EchoResponse::Answer {
                records: self.records,
                truncated: self.truncated,
            }
        }
    }
}

pub struct HandleEchoQueryUseCase {
    config: EchoConfig,
    upstream: Option<Arc<dyn UpstreamResolver>>,
}

impl HandleEchoQueryUseCase {
    pub fn new(config: EchoConfig) -> Self {
        Self {
            config,
            upstream: None,
        }
    }

    pub fn with_upstream(mut self, upstream: Arc<dyn UpstreamResolver>) -> Self {
        self.upstream = Some(upstream);
        self
    }

    pub async fn execute(&self, questions: &[DnsQuestion]) -> EchoResponse {
        if questions.is_empty() {
            return EchoResponse::Unhandled;
        }

        let mut answer = AnswerAccumulator::default();

        for question in questions {
            match self.scan_question(question, &mut answer).await {
                ControlFlow::Continue(()) => {}
                // Abandon the remaining questions and the accumulator.
                ControlFlow::Break(zone) => return EchoResponse::NameError { zone },
            }
        }

        if self.config.debug {
            debug!(
                records = answer.records.len(),
                "echo scan complete"
            );
        }

        answer.into_response()
    }

    /// Process one question. `Break` carries the zone of a negative exit.
    async fn scan_question(
        &self,
        question: &DnsQuestion,
        answer: &mut AnswerAccumulator,
    ) -> ControlFlow<String> {
        if !question.class.is_internet() || !question.record_type.is_address_type() {
            return ControlFlow::Continue(());
        }

        let template = decode_template(&question.name, &self.config.zones);
        if template == TemplateMatch::NoMatch {
            if self.config.debug {
                debug!(name = %question.name, "no template decoded, skipping question");
            }
            return ControlFlow::Continue(());
        }

        let synthesis = synthesize(
            &question.name,
            &template,
            question.record_type,
            self.config.ttl,
        );

        if synthesis.terminate {
            if let TemplateMatch::Address { zone, .. } | TemplateMatch::Alias { zone, .. } =
                template
            {
                return ControlFlow::Break(zone);
            }
            return ControlFlow::Continue(());
        }

        answer.records.extend(synthesis.records);

        if let (Some(target), Some(upstream)) = (synthesis.delegate, &self.upstream) {
            debug!(target = %target, "chasing alias target upstream");
            match upstream.lookup(&target, question.record_type).await {
                Ok(delegated) => {
                    // Once latched, truncation stays set for the reply.
                    answer.truncated |= delegated.truncated;
                    answer.records.extend(delegated.records);
                }
                Err(e) => {
                    debug!(
                        target = %target,
                        error = %e,
                        "alias delegation failed, answering with the alias record only"
                    );
                }
            }
        }

        ControlFlow::Continue(())
    }
}
