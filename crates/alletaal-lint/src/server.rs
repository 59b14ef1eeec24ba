//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes LiNT scoring over the MCP protocol, making it
//! available to AI assistants (Claude Code, Cursor, etc.) via stdio
//! transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer — it wraps the same core library
//! that the CLI commands use. Each `#[tool]` method delegates to the shared
//! [`Scorer`]; markdown is stripped before scoring, so documents can be sent
//! as-is. Annotator failures surface per request; the server itself starts
//! without a working annotator.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use alletaal_lint_core::markdown;
use alletaal_lint_core::scoring::Scorer;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the scoring tools.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct TextParams {
    /// The Dutch text to score. Markdown formatting is stripped first.
    pub text: String,
}

/// MCP server exposing LiNT scoring to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct LintServer {
    scorer: Arc<Scorer>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

#[tool_router]
impl LintServer {
    /// Create a new MCP server instance around a shared scorer.
    pub fn new(scorer: Arc<Scorer>) -> Self {
        Self {
            scorer,
            tool_router: Self::tool_router(),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        #[allow(unused_variables)] Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Score one sentence for readability.
    #[tool(
        description = "Score a Dutch sentence for readability. Returns the LiNT score (0-100, higher = easier) and difficulty level (1-4)."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn score_sentence(
        &self,
        #[allow(unused_variables)] Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "score_sentence", "executing MCP tool");

        let prose = markdown::strip_to_prose(&params.text);
        let scored = self
            .scorer
            .score_sentence(&prose)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let json = serde_json::to_string_pretty(&scored)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "score_sentence",
            score = scored.lint_score,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Score a document for readability.
    #[tool(
        description = "Score a Dutch document for readability. Returns the average LiNT score (0-100, higher = easier) and overall difficulty level (1-4)."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn score_document(
        &self,
        #[allow(unused_variables)] Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "score_document", "executing MCP tool");

        let prose = markdown::strip_to_prose(&params.text);
        let score = self
            .scorer
            .score_document(&prose)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let json = serde_json::to_string_pretty(&score)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "score_document",
            score = score.lint_score,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Run detailed document analysis.
    #[tool(
        description = "Analyze a Dutch document per sentence: LiNT scores, difficulty levels, and the linguistic features behind them."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_document(
        &self,
        #[allow(unused_variables)] Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_document", "executing MCP tool");

        let prose = markdown::strip_to_prose(&params.text);
        let analysis = self
            .scorer
            .analyze_document(&prose)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let json = serde_json::to_string_pretty(&analysis)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "analyze_document",
            sentences = analysis.sentence_count,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for LintServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Scores Dutch text for readability using the LiNT methodology.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alletaal_lint_core::annotator::Annotator;
    use alletaal_lint_core::error::AnnotateResult;
    use alletaal_lint_core::frequency::ZipfTable;
    use alletaal_lint_core::token::AnnotatedSentence;
    use alletaal_lint_core::{AnnotateError, conllu};
    use rmcp::model::RawContent;

    /// Annotator answering every request with the same annotated sentence.
    struct FixtureAnnotator;

    impl Annotator for FixtureAnnotator {
        fn annotate(&self, _text: &str) -> AnnotateResult<Vec<AnnotatedSentence>> {
            conllu::parse(
                "# text = De kat zit.\n\
                 1\tDe\tde\tDET\tLID|bep\tDefinite=Def\t2\tdet\t_\t_\n\
                 2\tkat\tkat\tNOUN\tN|soort|ev\tNumber=Sing\t3\tnsubj\t_\t_\n\
                 3\tzit\tzitten\tVERB\tWW|pv|tgw\tNumber=Sing\t0\troot\t_\tSpaceAfter=No\n\
                 4\t.\t.\tPUNCT\tLET\t_\t3\tpunct\t_\t_\n",
            )
        }
    }

    /// Annotator standing in for a parser that is down.
    struct BrokenAnnotator;

    impl Annotator for BrokenAnnotator {
        fn annotate(&self, _text: &str) -> AnnotateResult<Vec<AnnotatedSentence>> {
            Err(AnnotateError::NotConfigured)
        }
    }

    fn server() -> LintServer {
        let scorer = Scorer::new(Box::new(FixtureAnnotator), Box::new(ZipfTable::new()));
        LintServer::new(Arc::new(scorer))
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    #[test]
    fn server_info_has_correct_name() {
        let info = ServerHandler::get_info(&server());

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn server_has_tools_capability() {
        let info = ServerHandler::get_info(&server());
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let result = server()
            .get_info(Parameters(GetInfoParams {
                format: "json".to_string(),
            }))
            .expect("get_info should succeed");

        assert!(!result.is_error.unwrap_or(false));

        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value =
            serde_json::from_str(text).expect("output should be valid JSON");

        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn score_sentence_tool_works() {
        let result = server()
            .score_sentence(Parameters(TextParams {
                text: "De kat zit.".to_string(),
            }))
            .expect("score_sentence should succeed");
        assert!(!result.is_error.unwrap_or(false));

        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");
        let score = json["lint_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
        let level = json["difficulty_level"].as_u64().unwrap();
        assert!((1..=4).contains(&level));
    }

    #[test]
    fn score_document_tool_works() {
        let result = server()
            .score_document(Parameters(TextParams {
                text: "De kat zit.".to_string(),
            }))
            .expect("score_document should succeed");
        assert!(!result.is_error.unwrap_or(false));

        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");
        assert!(json["lint_score"].as_f64().is_some());
        assert!(json["difficulty_level"].as_u64().is_some());
    }

    #[test]
    fn analyze_document_tool_reports_features() {
        let result = server()
            .analyze_document(Parameters(TextParams {
                text: "De kat zit.".to_string(),
            }))
            .expect("analyze_document should succeed");
        assert!(!result.is_error.unwrap_or(false));

        let text = extract_text(&result).expect("should have text content");
        let json: serde_json::Value = serde_json::from_str(text).expect("valid JSON");
        assert_eq!(json["sentence_count"], 1);
        assert!(json["sentences"][0]["word_frequency_log"].is_number());
        assert!(json["sentences"][0]["max_dependency_length"].is_number());
    }

    #[test]
    fn annotator_failure_surfaces_as_tool_error() {
        let scorer = Scorer::new(Box::new(BrokenAnnotator), Box::new(ZipfTable::new()));
        let server = LintServer::new(Arc::new(scorer));

        let result = server.score_document(Parameters(TextParams {
            text: "De kat zit.".to_string(),
        }));
        assert!(result.is_err());
    }
}
