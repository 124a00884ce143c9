//! The agent handed to the hosting runtime: who it is, which model it is
//! meant for, what it is told, and which tools it can call.

use std::sync::Arc;

use crate::mcp::types::{CallToolResult, ToolDefinition};
use crate::tools::extract_pdf_text_tool::{
    ExtractPdfTextTool, EXTRACT_PDF_TEXT_TOOL_DEFINITION, EXTRACT_PDF_TEXT_TOOL_NAME,
};
use crate::tools::simple_info_tool::{
    SimpleInfoTool, SIMPLE_INFO_TOOL_DEFINITION, SIMPLE_INFO_TOOL_NAME,
};
use crate::utils::pdf::PdfEngine;

pub const AGENT_NAME: &str = "simple_pdf_extractor";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const AGENT_DESCRIPTION: &str = "Simple PDF text extractor";
pub const AGENT_INSTRUCTION: &str = "\
You extract text from PDF files.

Tools:
- extract_pdf_text(file_path): Extract text from PDF
- get_simple_info(file_path): Get basic file information

Just extract text and return it. No analysis or processing.
";

/// A callable capability registered on the agent.
pub enum ToolBinding {
    ExtractPdfText(ExtractPdfTextTool),
    SimpleInfo(SimpleInfoTool),
}

impl ToolBinding {
    pub fn name(&self) -> &'static str {
        match self {
            ToolBinding::ExtractPdfText(_) => EXTRACT_PDF_TEXT_TOOL_NAME,
            ToolBinding::SimpleInfo(_) => SIMPLE_INFO_TOOL_NAME,
        }
    }

    pub fn definition(&self) -> &'static ToolDefinition {
        match self {
            ToolBinding::ExtractPdfText(_) => &EXTRACT_PDF_TEXT_TOOL_DEFINITION,
            ToolBinding::SimpleInfo(_) => &SIMPLE_INFO_TOOL_DEFINITION,
        }
    }

    pub async fn call(&self, arguments: Option<serde_json::Value>) -> CallToolResult {
        match self {
            ToolBinding::ExtractPdfText(tool) => tool.execute(arguments).await,
            ToolBinding::SimpleInfo(tool) => tool.execute(arguments).await,
        }
    }
}

/// Built once at startup and never changed afterwards.
pub struct AgentDescriptor {
    name: String,
    model: String,
    description: String,
    instruction: String,
    tools: Vec<ToolBinding>,
}

impl AgentDescriptor {
    pub fn new(model: impl Into<String>, engine: Arc<dyn PdfEngine>) -> Self {
        Self {
            name: AGENT_NAME.to_string(),
            model: model.into(),
            description: AGENT_DESCRIPTION.to_string(),
            instruction: AGENT_INSTRUCTION.to_string(),
            tools: vec![
                ToolBinding::ExtractPdfText(ExtractPdfTextTool::new(engine)),
                ToolBinding::SimpleInfo(SimpleInfoTool::new()),
            ],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn tools(&self) -> &[ToolBinding] {
        &self.tools
    }

    pub fn tool(&self, name: &str) -> Option<&ToolBinding> {
        self.tools().iter().find(|tool| tool.name() == name)
    }

    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools()
            .iter()
            .map(|tool| tool.definition().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::pdf::LopdfEngine;

    fn agent() -> AgentDescriptor {
        AgentDescriptor::new(DEFAULT_MODEL, Arc::new(LopdfEngine))
    }

    #[test]
    fn binds_both_tools_in_order() {
        let agent = agent();
        let names: Vec<_> = agent.tools().iter().map(ToolBinding::name).collect();
        assert_eq!(names, vec!["extract_pdf_text", "get_simple_info"]);
        assert!(agent.tool("get_simple_info").is_some());
        assert!(agent.tool("summarize_pdf").is_none());
    }

    #[test]
    fn definitions_match_bindings() {
        let agent = agent();
        for (tool, definition) in agent.tools().iter().zip(agent.tool_definitions()) {
            assert_eq!(tool.name(), definition.name);
        }
    }

    #[test]
    fn instruction_forbids_analysis() {
        let agent = agent();
        assert_eq!(agent.name(), "simple_pdf_extractor");
        assert_eq!(agent.model(), "gemini-2.0-flash");
        assert!(agent.instruction().contains("extract_pdf_text(file_path)"));
        assert!(agent.instruction().contains("get_simple_info(file_path)"));
        assert!(agent.instruction().contains("No analysis or processing."));
    }

    #[test]
    fn model_is_configurable() {
        let agent = AgentDescriptor::new("local-model", Arc::new(LopdfEngine));
        assert_eq!(agent.model(), "local-model");
        assert_eq!(agent.description(), "Simple PDF text extractor");
    }
}
