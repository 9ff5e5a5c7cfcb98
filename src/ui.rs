use crate::error::{ErrorKind, SolveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Camera and upload as tabs above the question box.
    Tabs,
    /// Inputs on the left, solution on the right.
    Columns,
    /// Everything in one column with step-by-step instructions.
    Stacked,
}

impl Layout {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "tabs" => Some(Layout::Tabs),
            "columns" => Some(Layout::Columns),
            "stacked" => Some(Layout::Stacked),
            _ => None,
        }
    }
}

/// Text and layout for the solver page. The three page variants share
/// everything here except `layout` and `instructions`.
#[derive(Debug, Clone)]
pub struct Page {
    pub layout: Layout,
    pub title: String,
    pub camera_label: String,
    pub upload_label: String,
    pub prompt_placeholder: String,
    pub submit_label: String,
    pub retake_label: String,
    pub processing_label: String,
    pub done_label: String,
    pub instructions: Option<String>,
    pub api_key_var: String,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            layout: Layout::Tabs,
            title: "📱 Math Solver".to_string(),
            camera_label: "📷 Camera".to_string(),
            upload_label: "📁 Upload".to_string(),
            prompt_placeholder: "Ask about the math problem...".to_string(),
            submit_label: "Solve 🔍".to_string(),
            retake_label: "↺ Retake".to_string(),
            processing_label: "Processing...".to_string(),
            done_label: "✓".to_string(),
            instructions: None,
            api_key_var: crate::config::DEFAULT_API_KEY_VAR.to_string(),
        }
    }
}

impl Page {
    pub fn new(layout: Layout) -> Self {
        let instructions = match layout {
            Layout::Stacked => Some(
                "1. Take a photo or upload an image of the problem\n\
                 2. Ask a question about it\n\
                 3. Press Solve"
                    .to_string(),
            ),
            _ => None,
        };

        Self {
            layout,
            instructions,
            ..Self::default()
        }
    }

    pub fn with_api_key_var(mut self, var: impl Into<String>) -> Self {
        self.api_key_var = var.into();
        self
    }

    pub fn render_header(&self) -> String {
        let mut out = format!("# {}\n", self.title);
        if let Some(instructions) = &self.instructions {
            out.push_str(instructions);
            out.push('\n');
        }
        match self.layout {
            Layout::Tabs => out.push_str(&format!(
                "[{}] [{}]\n",
                self.camera_label, self.upload_label
            )),
            Layout::Columns => out.push_str(&format!(
                "{} | {}\n",
                self.camera_label, self.upload_label
            )),
            Layout::Stacked => {
                out.push_str(&format!("{}\n{}\n", self.camera_label, self.upload_label))
            }
        }
        out
    }

    pub fn render_solution(&self, text: &str) -> String {
        format!("### Solution\n{}", text)
    }

    pub fn render_error(&self, err: &SolveError) -> String {
        match err.kind() {
            ErrorKind::MissingCredential => format!(
                "{}. Set {} in your environment or .env file.",
                err, self.api_key_var
            ),
            ErrorKind::RequestFailed => err.to_string(),
        }
    }
}
