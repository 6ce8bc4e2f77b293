//! The pipeline entry point.

use tracing::{info, warn};
use vgist_gemini::{build_request, parse_analysis, GeminiClient, GeminiError};
use vgist_media::{sample_frames, MediaSource, VideoHandle};
use vgist_models::{AnalysisResult, EncodedFrame, DEFAULT_FRAME_COUNT};

use crate::error::AnalyzeResult;

/// Tunables for one analysis invocation.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Target number of evenly spaced frames to sample
    pub frame_count: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            frame_count: DEFAULT_FRAME_COUNT,
        }
    }
}

/// Analyze a video: sample evenly spaced frames, send them to the generation
/// service, and decode the structured result.
///
/// One logical thread of control; the decoder resource is released before the
/// remote call on every path, and dropping the returned future mid-flight
/// releases it as well. Concurrent invocations on different sources are
/// independent.
pub async fn analyze(
    source: MediaSource,
    client: &GeminiClient,
    options: &AnalyzeOptions,
) -> AnalyzeResult<AnalysisResult> {
    let mut handle = VideoHandle::open(source)?;
    let meta = handle.await_metadata().await?;
    info!(
        duration = meta.duration_seconds,
        width = meta.width,
        height = meta.height,
        frame_count = options.frame_count,
        "starting frame sampling"
    );

    let frames = sample_frames(&mut handle, options.frame_count).await;
    handle.close();
    let frames = frames?;

    request_analysis(&frames, client).await
}

/// Build the multimodal request, perform the exchange, decode the record.
async fn request_analysis(
    frames: &[EncodedFrame],
    client: &GeminiClient,
) -> AnalyzeResult<AnalysisResult> {
    let request = build_request(frames)?;
    let raw = client.generate(&request).await?;

    match parse_analysis(&raw) {
        Ok(result) => {
            info!(
                topics = result.topicos_chave.len(),
                "analysis record decoded"
            );
            Ok(result)
        }
        Err(err) => {
            if let GeminiError::MalformedResponse { reason, raw } = &err {
                // Raw text stays in the log, never in user-facing messages
                warn!(reason = %reason, raw = %raw, "discarding malformed analysis response");
            }
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzeError;
    use async_trait::async_trait;
    use vgist_media::{FrameCapture, MediaError, MediaResult, RawFrame};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    /// Capture double whose outcome is scripted per attempt index.
    struct ScriptedCapture {
        duration: f64,
        fail_indices: Vec<usize>,
        attempts: usize,
    }

    #[async_trait]
    impl FrameCapture for ScriptedCapture {
        fn duration_seconds(&self) -> f64 {
            self.duration
        }

        async fn seek_and_capture(&mut self, timestamp_seconds: f64) -> MediaResult<RawFrame> {
            let index = self.attempts;
            self.attempts += 1;
            if self.fail_indices.contains(&index) {
                return Err(MediaError::capture_failed(timestamp_seconds, "seek failed"));
            }
            Ok(RawFrame {
                width: 4,
                height: 4,
                data: vec![0u8; 4 * 4 * 3],
            })
        }
    }

    /// Mirror of the pipeline tail, driven by a capture double instead of a
    /// real decoder.
    async fn run_pipeline(
        capture: &mut ScriptedCapture,
        client: &GeminiClient,
        frame_count: usize,
    ) -> AnalyzeResult<AnalysisResult> {
        let frames = sample_frames(capture, frame_count).await?;
        request_analysis(&frames, client).await
    }

    fn analysis_body() -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": r#"{
                    "assuntoPrincipal": "Natureza",
                    "resumo": "Paisagens variadas.",
                    "transcricaoVisual": "Cena 1: floresta.",
                    "topicosChave": ["floresta", "rio"]
                }"# }] }
            }]
        })
    }

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new("test-key")
            .unwrap()
            .with_base_url(server.uri())
    }

    fn image_part_count(request: &Request) -> usize {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert!(parts[0]["text"].is_string());
        parts[1..]
            .iter()
            .filter(|p| p["inlineData"]["mimeType"] == "image/jpeg")
            .count()
    }

    #[tokio::test]
    async fn total_capture_failure_sends_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
            .expect(0)
            .mount(&server)
            .await;

        let mut capture = ScriptedCapture {
            duration: 10.0,
            fail_indices: vec![0, 1, 2, 3],
            attempts: 0,
        };
        let err = run_pipeline(&mut capture, &client_for(&server), 4)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::EmptyFrameSet));
    }

    #[tokio::test]
    async fn partial_capture_failure_shrinks_the_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
            .expect(1)
            .mount(&server)
            .await;

        let mut capture = ScriptedCapture {
            duration: 10.0,
            fail_indices: vec![1, 3],
            attempts: 0,
        };
        let result = run_pipeline(&mut capture, &client_for(&server), 4)
            .await
            .unwrap();
        assert_eq!(result.assunto_principal, "Natureza");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        // 1 text part followed by one image part per surviving frame
        assert_eq!(image_part_count(&requests[0]), 2);
    }

    #[tokio::test]
    async fn full_batch_round_trips_the_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
            .expect(1)
            .mount(&server)
            .await;

        let mut capture = ScriptedCapture {
            duration: 10.0,
            fail_indices: vec![],
            attempts: 0,
        };
        let result = run_pipeline(&mut capture, &client_for(&server), 4)
            .await
            .unwrap();
        assert_eq!(result.topicos_chave, vec!["floresta", "rio"]);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(image_part_count(&requests[0]), 4);
    }

    #[tokio::test]
    async fn malformed_service_payload_maps_to_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "not json at all" }] }
                }]
            })))
            .mount(&server)
            .await;

        let mut capture = ScriptedCapture {
            duration: 10.0,
            fail_indices: vec![],
            attempts: 0,
        };
        let err = run_pipeline(&mut capture, &client_for(&server), 2)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn invalid_input_short_circuits_before_sampling() {
        let client = GeminiClient::new("test-key").unwrap();
        let err = analyze(
            MediaSource::path("/nonexistent/clip.mp4"),
            &client,
            &AnalyzeOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AnalyzeError::InvalidInput(_)));
    }
}
