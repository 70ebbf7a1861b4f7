use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    vision::{
        entities::{AnalyzeImageInput, ImageAnalysis, ParsedDetections},
        parser,
        ports::{ImagePayload, LlmClient, VisionService},
        prompt,
    },
};

impl<L> VisionService for Service<L>
where
    L: LlmClient,
{
    async fn analyze_image(&self, input: AnalyzeImageInput) -> Result<ImageAnalysis, CoreError> {
        let prompt = prompt::detection_prompt(input.custom_prompt.as_deref());
        let payload = ImagePayload {
            data: input.image_data.clone(),
            mime_type: input.mime_type,
        };

        let detections = self.detect(&prompt, payload).await?;

        // Decode/draw/encode is CPU-bound; keep it off the I/O path.
        let annotator = self.annotator.clone();
        let image_data = input.image_data;
        let to_draw = detections.clone();
        let labeled_image =
            tokio::task::spawn_blocking(move || annotator.annotate(&image_data, &to_draw))
                .await
                .map_err(|err| {
                    tracing::error!("annotation task panicked: {err}");
                    CoreError::InternalServerError
                })?;

        Ok(ImageAnalysis {
            detections,
            labeled_image,
        })
    }
}

impl<L> Service<L>
where
    L: LlmClient,
{
    /// Invocation strategy: quality-first. The fallback model is tried once
    /// when the primary call errors or parses to zero items; there is no
    /// further retry. Two genuine errors surface as one aggregated failure.
    async fn detect(
        &self,
        prompt: &str,
        payload: ImagePayload,
    ) -> Result<ParsedDetections, CoreError> {
        let primary = &self.llm_config.primary_model;
        let fallback = &self.llm_config.fallback_model;

        let primary_reply = self
            .llm_client
            .generate_with_image(primary.clone(), prompt.to_string(), payload.clone())
            .await;

        match primary_reply {
            Ok(reply) => {
                let parsed = parser::parse_detections(&reply);
                if !parsed.is_empty() {
                    return Ok(parsed);
                }
                tracing::info!("model {primary} returned no detections, retrying with {fallback}");
                match self
                    .llm_client
                    .generate_with_image(fallback.clone(), prompt.to_string(), payload)
                    .await
                {
                    Ok(reply) => Ok(parser::parse_detections(&reply)),
                    Err(err) => {
                        // An empty result is legitimate; the failed retry only
                        // costs us the second opinion.
                        tracing::warn!("fallback model {fallback} failed after empty result: {err}");
                        Ok(parsed)
                    }
                }
            }
            Err(primary_err) => {
                tracing::warn!("model {primary} failed: {primary_err}, retrying with {fallback}");
                match self
                    .llm_client
                    .generate_with_image(fallback.clone(), prompt.to_string(), payload)
                    .await
                {
                    Ok(reply) => Ok(parser::parse_detections(&reply)),
                    Err(fallback_err) => Err(CoreError::AllModelsFailed {
                        primary: primary_err.to_string(),
                        fallback: fallback_err.to_string(),
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::{AnnotatorConfig, LlmConfig},
        vision::{annotator::Annotator, ports::MockLlmClient},
    };

    const PRIMARY: &str = "gemini-1.5-pro";
    const FALLBACK: &str = "gemini-1.5-flash";

    fn service(mock: MockLlmClient) -> Service<MockLlmClient> {
        Service::new(
            mock,
            LlmConfig {
                gemini_api_key: "test-key".into(),
                primary_model: PRIMARY.into(),
                fallback_model: FALLBACK.into(),
                request_timeout_secs: 5,
            },
            Annotator::new(&AnnotatorConfig { font_path: None }),
        )
    }

    fn png_fixture() -> Vec<u8> {
        use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
        let mut encoded = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, Rgb([10, 10, 10])))
            .write_to(&mut std::io::Cursor::new(&mut encoded), ImageFormat::Png)
            .unwrap();
        encoded
    }

    fn input() -> AnalyzeImageInput {
        AnalyzeImageInput {
            image_data: png_fixture(),
            mime_type: "image/png".into(),
            custom_prompt: None,
        }
    }

    #[tokio::test]
    async fn primary_success_skips_the_fallback() {
        let mut mock = MockLlmClient::new();
        mock.expect_generate_with_image()
            .withf(|model, _, _| model.as_str() == PRIMARY)
            .times(1)
            .returning(|_, _, _| Box::pin(std::future::ready(Ok(r#"{"apple": [0.1, 0.1, 0.4, 0.4]}"#.to_string()))));

        let analysis = service(mock).analyze_image(input()).await.unwrap();
        assert_eq!(analysis.detections.names, vec!["apple"]);
        assert!(!analysis.labeled_image.is_empty());
    }

    #[tokio::test]
    async fn primary_error_falls_back_once() {
        let mut mock = MockLlmClient::new();
        mock.expect_generate_with_image()
            .withf(|model, _, _| model.as_str() == PRIMARY)
            .times(1)
            .returning(|_, _, _| Box::pin(std::future::ready(Err(CoreError::ExternalServiceError("quota".into())))));
        mock.expect_generate_with_image()
            .withf(|model, _, _| model.as_str() == FALLBACK)
            .times(1)
            .returning(|_, _, _| Box::pin(std::future::ready(Ok(r#"{"soup": [0.2, 0.2, 0.6, 0.6]}"#.to_string()))));

        let analysis = service(mock).analyze_image(input()).await.unwrap();
        assert_eq!(analysis.detections.names, vec!["soup"]);
    }

    #[tokio::test]
    async fn empty_primary_result_triggers_the_fallback() {
        let mut mock = MockLlmClient::new();
        mock.expect_generate_with_image()
            .withf(|model, _, _| model.as_str() == PRIMARY)
            .times(1)
            .returning(|_, _, _| Box::pin(std::future::ready(Ok("I could not find any food.".to_string()))));
        mock.expect_generate_with_image()
            .withf(|model, _, _| model.as_str() == FALLBACK)
            .times(1)
            .returning(|_, _, _| Box::pin(std::future::ready(Ok(r#"{"bread": [0.1, 0.1, 0.3, 0.3]}"#.to_string()))));

        let analysis = service(mock).analyze_image(input()).await.unwrap();
        assert_eq!(analysis.detections.names, vec!["bread"]);
    }

    #[tokio::test]
    async fn empty_result_plus_fallback_error_is_still_a_valid_empty_result() {
        let mut mock = MockLlmClient::new();
        mock.expect_generate_with_image()
            .withf(|model, _, _| model.as_str() == PRIMARY)
            .times(1)
            .returning(|_, _, _| Box::pin(std::future::ready(Ok("nothing".to_string()))));
        mock.expect_generate_with_image()
            .withf(|model, _, _| model.as_str() == FALLBACK)
            .times(1)
            .returning(|_, _, _| Box::pin(std::future::ready(Err(CoreError::ExternalServiceError("down".into())))));

        let analysis = service(mock).analyze_image(input()).await.unwrap();
        assert!(analysis.detections.is_empty());
        assert!(!analysis.labeled_image.is_empty());
    }

    #[tokio::test]
    async fn two_errors_aggregate_both_messages() {
        let mut mock = MockLlmClient::new();
        mock.expect_generate_with_image()
            .withf(|model, _, _| model.as_str() == PRIMARY)
            .times(1)
            .returning(|_, _, _| Box::pin(std::future::ready(Err(CoreError::ExternalServiceError("quota exceeded".into())))));
        mock.expect_generate_with_image()
            .withf(|model, _, _| model.as_str() == FALLBACK)
            .times(1)
            .returning(|_, _, _| Box::pin(std::future::ready(Err(CoreError::ExternalServiceError("model overloaded".into())))));

        let err = service(mock).analyze_image(input()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("quota exceeded"));
        assert!(message.contains("model overloaded"));
    }

    #[tokio::test]
    async fn custom_prompt_reaches_the_model() {
        let mut mock = MockLlmClient::new();
        mock.expect_generate_with_image()
            .withf(|_, prompt, _| prompt.contains("only the desserts"))
            .times(1)
            .returning(|_, _, _| Box::pin(std::future::ready(Ok(r#"{"cake": [0.1, 0.1, 0.4, 0.4]}"#.to_string()))));

        let analysis = service(mock)
            .analyze_image(AnalyzeImageInput {
                custom_prompt: Some("only the desserts".into()),
                ..input()
            })
            .await
            .unwrap();
        assert_eq!(analysis.detections.names, vec!["cake"]);
    }
}
