// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use portpicker::pick_unused_port;
    use reqwest::StatusCode;
    use tokio::spawn;

    use crate::cmd::study::server::ServerConfig;
    use crate::cmd::study::server::start_server;
    use crate::helper::SAMPLE_QUIZ;
    use crate::helper::TestResult;
    use crate::helper::create_tmp_pack;
    use crate::utils::wait_for_server;

    const TEST_HOST: &str = "127.0.0.1";

    const SINGLE_QUIZ: &str =
        r#"[{"question": "What is 2 + 2?", "options": ["3", "4", "5", "22"], "answer": 1}]"#;

    /// Start a server over a fresh pack with the given quiz payload and
    /// return its base URL.
    async fn serve(quiz: &str) -> TestResult<String> {
        let port = pick_unused_port().unwrap();
        let directory = create_tmp_pack(quiz)?;
        let config = ServerConfig {
            directory: Some(directory),
            host: TEST_HOST.to_string(),
            port,
            seed: Some(7),
        };
        spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await?;
        Ok(format!("http://{TEST_HOST}:{port}"))
    }

    async fn quiz_action(base: &str, form: &[(&str, &str)]) -> TestResult<String> {
        let response = reqwest::Client::new()
            .post(format!("{base}/quiz"))
            .form(form)
            .send()
            .await?;
        assert!(response.status().is_success());
        Ok(response.text().await?)
    }

    #[tokio::test]
    async fn test_start_server_on_non_existent_directory() -> TestResult {
        let port = pick_unused_port().unwrap();
        let config = ServerConfig {
            directory: Some("./derpherp".to_string()),
            host: TEST_HOST.to_string(),
            port,
            seed: None,
        };
        let result = start_server(config).await;
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
        Ok(())
    }

    #[tokio::test]
    async fn test_static_endpoints() -> TestResult {
        let base = serve(SAMPLE_QUIZ).await?;

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("{base}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the not found endpoint.
        let response = reqwest::get(format!("{base}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_text_tabs() -> TestResult {
        let base = serve(SAMPLE_QUIZ).await?;

        let response = reqwest::get(format!("{base}/")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await?;
        assert!(html.contains(r#"<h3 class="heading">Photosynthesis</h3>"#));
        assert!(html.contains(r#"<h3 class="heading">Key terms</h3>"#));
        assert!(html.contains("<p>Chlorophyll absorbs light</p>"));
        assert!(html.contains(r#"<h4 class="subheading">Light reactions</h4>"#));
        assert!(!html.contains("**"));

        let html = reqwest::get(format!("{base}/?tab=explanation")).await?.text().await?;
        assert!(html.contains("Plants turn light into chemical energy."));

        let html = reqwest::get(format!("{base}/?tab=examples")).await?.text().await?;
        assert!(html.contains(r#"<p class="paragraph">A leaf in sunlight</p>"#));

        // Unknown tabs fall back to the notes.
        let html = reqwest::get(format!("{base}/?tab=bogus")).await?.text().await?;
        assert!(html.contains("Chlorophyll absorbs light"));
        Ok(())
    }

    #[tokio::test]
    async fn test_quiz_tab() -> TestResult {
        let base = serve(SAMPLE_QUIZ).await?;
        let html = reqwest::get(format!("{base}/?tab=quiz")).await?.text().await?;
        assert!(html.contains("1 / 2"));
        assert!(!html.contains("Next Question"));

        // Answer whatever comes first, twice over.
        let html = quiz_action(&base, &[("action", "Answer"), ("option", "0")]).await?;
        assert!(html.contains("Next Question"));
        let html = quiz_action(&base, &[("action", "Next")]).await?;
        assert!(html.contains("2 / 2"));
        let html = quiz_action(&base, &[("action", "Answer"), ("option", "0")]).await?;
        assert!(html.contains("See Results"));
        let html = quiz_action(&base, &[("action", "Next")]).await?;
        assert!(html.contains("Quiz Complete"));
        assert!(html.contains("Try Again (Shuffled)"));

        let html = quiz_action(&base, &[("action", "Restart")]).await?;
        assert!(html.contains("1 / 2"));
        Ok(())
    }

    #[tokio::test]
    async fn test_correct_answer() -> TestResult {
        let base = serve(SINGLE_QUIZ).await?;
        let html = quiz_action(&base, &[("action", "Answer"), ("option", "1")]).await?;
        assert!(html.contains(r#"class="option correct""#));
        let html = quiz_action(&base, &[("action", "Next")]).await?;
        assert!(html.contains("100%"));
        assert!(html.contains("You scored 1 out of 1 questions correctly"));
        Ok(())
    }

    #[tokio::test]
    async fn test_double_answer_keeps_the_first() -> TestResult {
        let base = serve(SINGLE_QUIZ).await?;
        quiz_action(&base, &[("action", "Answer"), ("option", "0")]).await?;
        let html = quiz_action(&base, &[("action", "Answer"), ("option", "1")]).await?;
        assert!(html.contains(r#"class="option incorrect""#));
        let html = quiz_action(&base, &[("action", "Next")]).await?;
        assert!(html.contains("0%"));
        assert!(html.contains("You scored 0 out of 1 questions correctly"));
        Ok(())
    }

    #[tokio::test]
    async fn test_next_before_answer() -> TestResult {
        let base = serve(SINGLE_QUIZ).await?;
        let html = quiz_action(&base, &[("action", "Next")]).await?;
        assert!(html.contains("1 / 1"));
        assert!(!html.contains("Quiz Complete"));
        Ok(())
    }

    #[tokio::test]
    async fn test_question_without_options() -> TestResult {
        let base = serve(r#"[{"question": "Anything?", "options": [], "answer": 0}]"#).await?;
        let html = reqwest::get(format!("{base}/?tab=quiz")).await?.text().await?;
        assert!(html.contains("Skip Question"));
        let html = quiz_action(&base, &[("action", "Answer"), ("option", "0")]).await?;
        assert!(html.contains("See Results"));
        let html = quiz_action(&base, &[("action", "Next")]).await?;
        assert!(html.contains("You scored 0 out of 1 questions correctly"));
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_quiz() -> TestResult {
        let base = serve("Here are some questions!").await?;
        let html = reqwest::get(format!("{base}/?tab=quiz")).await?.text().await?;
        assert!(html.contains("No quiz questions are available for this topic."));

        // The text tabs are unaffected.
        let html = reqwest::get(format!("{base}/")).await?.text().await?;
        assert!(html.contains("Chlorophyll absorbs light"));
        Ok(())
    }

    #[tokio::test]
    async fn test_export() -> TestResult {
        let base = serve(SAMPLE_QUIZ).await?;
        let response = reqwest::get(format!("{base}/export/notes")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-disposition").unwrap(),
            "attachment; filename=\"photosynthesis-notes.txt\""
        );
        let text = response.text().await?;
        assert!(text.starts_with("Notes\nPhotosynthesis\n\n"));

        let response = reqwest::get(format!("{base}/export/quiz")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = reqwest::get(format!("{base}/export/nothing")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }
}
