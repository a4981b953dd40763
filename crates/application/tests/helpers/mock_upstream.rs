use async_trait::async_trait;
use echo_dns_application::ports::{UpstreamAnswers, UpstreamResolver};
use echo_dns_domain::{DomainError, RecordType};
use std::collections::HashMap;
use std::sync::Mutex;

/// Upstream resolver fake keyed by looked-up name. Unconfigured names fail,
/// which exercises the silent-failure path.
pub struct MockUpstreamResolver {
    responses: Mutex<HashMap<String, UpstreamAnswers>>,
    errors: Mutex<HashMap<String, DomainError>>,
    calls: Mutex<Vec<(String, RecordType)>>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            errors: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_answers(&self, name: &str, answers: UpstreamAnswers) {
        self.responses
            .lock()
            .unwrap()
            .insert(name.to_string(), answers);
    }

    pub fn set_error(&self, name: &str, error: DomainError) {
        self.errors.lock().unwrap().insert(name.to_string(), error);
    }

    pub fn calls(&self) -> Vec<(String, RecordType)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockUpstreamResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn lookup(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<UpstreamAnswers, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), record_type));

        if let Some(error) = self.errors.lock().unwrap().get(name).cloned() {
            return Err(error);
        }

        self.responses
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::UpstreamFailure(format!("No mock answers for {}", name)))
    }
}
