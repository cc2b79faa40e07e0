use crate::archive;
use crate::config::Config;
use crate::envelope::build_envelope;
use crate::errors::{AppError, ResultExt};
use crate::models::{Credentials, Environment, Outcome, SubmissionFields};
use crate::record::CreditContract;
use crate::response::interpret;
use crate::transport::{HttpTransport, Transport};
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

/// Client for the credit bureau data pump `UploadZippedData2` operation.
///
/// Holds only immutable settings; every submission threads its own values
/// through the pipeline, so one client can serve concurrent calls.
#[derive(Clone)]
pub struct DataPumpClient<T = HttpTransport> {
    credentials: Credentials,
    environment: Environment,
    endpoint: Url,
    transport: T,
}

impl DataPumpClient<HttpTransport> {
    /// Creates a client posting over HTTP(S) to the configured endpoint.
    ///
    /// # Arguments
    ///
    /// * `config` - Credentials, environment and TLS settings.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        config.validate()?;
        let transport = HttpTransport::new(config.accept_invalid_certs)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> DataPumpClient<T> {
    /// Creates a client that delivers envelopes through `transport`.
    pub fn with_transport(config: &Config, transport: T) -> Result<Self, AppError> {
        let endpoint = config.endpoint()?;
        tracing::info!(
            "Data pump client initialized: {} ({})",
            endpoint,
            config.environment
        );

        Ok(Self {
            credentials: config.credentials.clone(),
            environment: config.environment,
            endpoint,
            transport,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Submits one credit contract.
    ///
    /// Validation failures return before any network I/O. SOAP faults and
    /// empty responses are reported as `Outcome::Failure`; archive, XML and
    /// transport failures are returned as errors.
    ///
    /// # Returns
    ///
    /// * `Result<Outcome, AppError>` - The service outcome.
    pub async fn submit(&self, fields: &SubmissionFields) -> Result<Outcome, AppError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("submit", %request_id);
        self.run(fields).instrument(span).await
    }

    async fn run(&self, fields: &SubmissionFields) -> Result<Outcome, AppError> {
        let contract = match CreditContract::from_fields(fields) {
            Ok(contract) => contract,
            Err(failure) => {
                tracing::info!("Submission rejected locally: {}", failure);
                return Ok(Outcome::failure(failure));
            }
        };
        tracing::info!(
            "Submitting contract {} (operation {})",
            contract.general.contract_number,
            contract.operation
        );

        let document = contract.to_xml().context("Building credit record")?;
        let zipped = archive::pack(&document).with_context(|| {
            format!(
                "Packaging credit record for contract {}",
                contract.general.contract_number
            )
        })?;
        let envelope =
            build_envelope(&self.credentials, &zipped).context("Building SOAP envelope")?;

        let body = self.transport.post_xml(&self.endpoint, envelope).await?;
        tracing::debug!("Received {} byte response", body.len());

        let outcome = interpret(&body).context("Interpreting data pump response")?;
        if outcome.is_success() {
            tracing::info!("✓ Contract {} accepted", contract.general.contract_number);
        }
        Ok(outcome)
    }
}
