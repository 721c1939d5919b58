// Data request pipeline
// Credential guard → request builder → transport → response validator →
// field extractor → result encoder, strictly in that order.

use crate::config::{RequestConfig, Settings};
use crate::credential::check_credential;
use crate::encoding::{EncodedResult, ResultEncoder};
use crate::errors::ExecutionError;
use crate::executor::HttpTransport;
use crate::extract::{extract_value, FieldPath};
use crate::models::{Credential, DataRequest, JobReport, PipelineStage};
use crate::request::build_request;
use crate::response::validate_response;
use crate::telemetry;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Executes one data request end-to-end
pub struct DataRequestJob {
    request: RequestConfig,
    field_path: FieldPath,
    encoder: ResultEncoder,
    placeholders: Vec<String>,
    transport: Arc<dyn HttpTransport>,
}

impl DataRequestJob {
    pub fn new(
        request: RequestConfig,
        field_path: FieldPath,
        encoder: ResultEncoder,
        placeholders: Vec<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            request,
            field_path,
            encoder,
            placeholders,
            transport,
        }
    }

    /// Build a job from validated settings
    pub fn from_settings(
        settings: &Settings,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ExecutionError> {
        settings
            .validate()
            .map_err(ExecutionError::InvalidConfiguration)?;

        let field_path = FieldPath::parse(&settings.extraction.field_path)
            .map_err(ExecutionError::InvalidConfiguration)?;
        let encoder =
            ResultEncoder::new(settings.encoding.width_bytes, settings.encoding.byte_order)?;

        Ok(Self::new(
            settings.request.clone(),
            field_path,
            encoder,
            settings.credentials.placeholders.clone(),
            transport,
        ))
    }

    /// Run the pipeline and return the encoded result or the first error
    pub async fn execute(
        &self,
        request: &DataRequest,
        credential: &Credential,
    ) -> Result<EncodedResult, ExecutionError> {
        let mut stage = PipelineStage::Start;
        self.execute_tracked(request, credential, &mut stage).await
    }

    /// Run the pipeline and record the outcome, timing and last stage reached
    #[tracing::instrument(skip_all, fields(execution_id))]
    pub async fn run(&self, request: &DataRequest, credential: &Credential) -> JobReport {
        let execution_id = Uuid::new_v4();
        tracing::Span::current().record("execution_id", tracing::field::display(execution_id));

        let started_at = Utc::now();
        let mut stage = PipelineStage::Start;
        let result = self.execute_tracked(request, credential, &mut stage).await;
        let completed_at = Utc::now();

        let report = JobReport {
            execution_id,
            stage,
            result,
            started_at,
            completed_at,
        };

        telemetry::record_request_duration(report.duration_seconds());
        match &report.result {
            Ok(encoded) => {
                telemetry::record_request_success();
                tracing::info!(
                    width = encoded.width(),
                    duration_seconds = report.duration_seconds(),
                    "Data request completed"
                );
            }
            Err(e) => {
                telemetry::record_request_failure(e.kind());
                tracing::error!(
                    error = %e,
                    reason = e.kind(),
                    last_stage = %report.stage,
                    "Data request failed"
                );
            }
        }

        report
    }

    async fn execute_tracked(
        &self,
        request: &DataRequest,
        credential: &Credential,
        stage: &mut PipelineStage,
    ) -> Result<EncodedResult, ExecutionError> {
        check_credential(credential, &self.placeholders)?;
        advance(stage, PipelineStage::CredentialChecked);

        let argument = request.primary_argument()?;

        let http_request = build_request(&self.request, argument, credential);
        let outcome = self.transport.send(&http_request).await;
        advance(stage, PipelineStage::RequestSent);

        let body = validate_response(outcome)?;
        advance(stage, PipelineStage::ResponseValidated);

        let value = extract_value(&body, &self.field_path)?;
        advance(stage, PipelineStage::ValueExtracted);

        let encoded = self.encoder.encode(&value)?;
        advance(stage, PipelineStage::Encoded);

        Ok(encoded)
    }
}

fn advance(stage: &mut PipelineStage, to: PipelineStage) {
    debug_assert_eq!(stage.next(), Some(to));
    tracing::debug!(from = %stage, to = %to, "Pipeline stage completed");
    *stage = to;
}
