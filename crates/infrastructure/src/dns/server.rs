//! hickory-server request handlers.
//!
//! `EchoHandler` sits in front of another handler, chain-of-responsibility
//! style: queries whose leftmost label decodes to a template are answered
//! authoritatively here, everything else is passed on untouched.
//! `ForwardHandler` is the terminal chain member that relays a query to the
//! configured upstream resolver.

use crate::dns::forwarding::{DnsForwarder, RecordTypeMapper};
use echo_dns_application::services::negative_soa;
use echo_dns_application::use_cases::{EchoResponse, HandleEchoQueryUseCase};
use echo_dns_domain::config::UpstreamConfig;
use echo_dns_domain::DnsQuestion;
use hickory_proto::op::{Header, ResponseCode};
use hickory_proto::rr::Record;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Chain head: answers template queries, hands everything else to `next`.
pub struct EchoHandler<N> {
    use_case: Arc<HandleEchoQueryUseCase>,
    next: N,
}

impl<N: RequestHandler> EchoHandler<N> {
    pub fn new(use_case: Arc<HandleEchoQueryUseCase>, next: N) -> Self {
        Self { use_case, next }
    }

    /// Map the message's questions into domain questions. Query types the
    /// pipeline has no mapping for are dropped here and never reach the
    /// orchestrator.
    fn questions(request: &Request) -> Vec<DnsQuestion> {
        request
            .queries()
            .iter()
            .filter_map(|query| {
                let record_type = RecordTypeMapper::from_hickory(query.query_type())?;
                let class = RecordTypeMapper::class_from_hickory(query.query_class());
                Some(DnsQuestion::new(
                    query.original().name().to_utf8(),
                    record_type,
                    class,
                ))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl<N: RequestHandler> RequestHandler for EchoHandler<N> {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let questions = Self::questions(request);
        debug!(
            questions = questions.len(),
            client = %request.src().ip(),
            "DNS request received"
        );

        match self.use_case.execute(&questions).await {
            EchoResponse::Answer { records, truncated } => {
                info!(records = records.len(), "answering template query");

                let builder = MessageResponseBuilder::from_message_request(request);
                let mut header = Header::response_from_request(request.header());
                header.set_authoritative(true);
                header.set_truncated(truncated);
                header.set_response_code(ResponseCode::NoError);
                let response = builder.build(
                    header,
                    records.iter(),
                    &[] as &[Record],
                    &[] as &[Record],
                    &[] as &[Record],
                );

                match response_handle.send_response(response).await {
                    Ok(response_info) => response_info,
                    Err(e) => {
                        error!(error = %e, "Failed to send response");
                        ResponseInfo::from(*request.header())
                    }
                }
            }
            EchoResponse::NameError { zone } => {
                info!(zone = %zone, "negative answer for unsupported address family");

                let Some(soa) = negative_soa(&zone) else {
                    error!(zone = %zone, "failed to build SOA for negative answer");
                    return send_error_response(request, &mut response_handle, ResponseCode::ServFail)
                        .await;
                };

                let builder = MessageResponseBuilder::from_message_request(request);
                let mut header = Header::response_from_request(request.header());
                header.set_response_code(ResponseCode::NXDomain);
                let response = builder.build(
                    header,
                    &[] as &[Record],
                    &[] as &[Record],
                    std::iter::once(&soa),
                    &[] as &[Record],
                );

                match response_handle.send_response(response).await {
                    Ok(response_info) => response_info,
                    Err(e) => {
                        error!(error = %e, "Failed to send negative response");
                        ResponseInfo::from(*request.header())
                    }
                }
            }
            EchoResponse::Unhandled => self.next.handle_request(request, response_handle).await,
        }
    }
}

/// Terminal chain member: one UDP round trip to the configured upstream,
/// relaying answers, authority, rcode and the truncation bit.
pub struct ForwardHandler {
    forwarder: DnsForwarder,
    server: String,
    timeout_ms: u64,
}

impl ForwardHandler {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            forwarder: DnsForwarder::new(),
            server: config.server.clone(),
            timeout_ms: config.timeout_ms,
        }
    }
}

#[async_trait::async_trait]
impl RequestHandler for ForwardHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = &request_info.query;
        let domain = query.original().name().to_utf8();

        let Some(record_type) = RecordTypeMapper::from_hickory(query.query_type()) else {
            warn!(record_type = ?query.query_type(), "Unsupported record type");
            return send_error_response(request, &mut response_handle, ResponseCode::NotImp).await;
        };

        debug!(domain = %domain, record_type = %record_type, server = %self.server, "forwarding query upstream");

        let upstream = match self
            .forwarder
            .query(&self.server, &domain, &record_type, self.timeout_ms)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(domain = %domain, error = %e, "Upstream forwarding failed");
                return send_error_response(request, &mut response_handle, ResponseCode::ServFail)
                    .await;
            }
        };

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = Header::response_from_request(request.header());
        header.set_recursion_available(true);
        header.set_response_code(upstream.rcode);
        header.set_truncated(upstream.truncated);
        let response = builder.build(
            header,
            upstream.answers.iter(),
            upstream.authority.iter(),
            &[] as &[Record],
            &[] as &[Record],
        );

        match response_handle.send_response(response).await {
            Ok(response_info) => response_info,
            Err(e) => {
                error!(error = %e, "Failed to send forwarded response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(code);
    let response = builder.build(
        header,
        &[] as &[Record],
        &[] as &[Record],
        &[] as &[Record],
        &[] as &[Record],
    );

    match response_handle.send_response(response).await {
        Ok(response_info) => response_info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}
