use scraper::{Html, Node};
use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to start renderer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed with error: {stderr}")]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("renderer I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One node of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralNode {
    Element {
        tag: String,
        classes: Vec<String>,
        attrs: Vec<(String, String)>,
    },
    Comment(String),
}

impl StructuralNode {
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Comment(_) => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        match self {
            Self::Element { classes, .. } => classes.iter().any(|c| c == class),
            Self::Comment(_) => false,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            Self::Comment(_) => None,
        }
    }
}

/// Rendered document flattened into document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralTree {
    pub nodes: Vec<StructuralNode>,
}

impl StructuralTree {
    pub fn new(nodes: Vec<StructuralNode>) -> Self {
        Self { nodes }
    }

    /// Parse an HTML document. Elements and comments are kept, text and
    /// doctype nodes are dropped.
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        let nodes = document
            .tree
            .root()
            .descendants()
            .filter_map(|node| match node.value() {
                Node::Element(el) => Some(StructuralNode::Element {
                    tag: el.name().to_string(),
                    classes: el.classes().map(str::to_string).collect(),
                    attrs: el
                        .attrs()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                }),
                Node::Comment(comment) => {
                    let text: &str = comment;
                    Some(StructuralNode::Comment(text.to_owned()))
                }
                _ => None,
            })
            .collect();
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Turns document text into a structural tree.
pub trait Renderer {
    /// # Errors
    /// Returns a `RenderError` when the document cannot be rendered.
    fn render(&self, text: &str) -> Result<StructuralTree, RenderError>;
}

/// Renders through an external program that reads the document on stdin
/// and writes HTML to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRenderer {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for CommandRenderer {
    fn default() -> Self {
        Self::asciidoctor()
    }
}

impl CommandRenderer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `asciidoctor -o - -`
    pub fn asciidoctor() -> Self {
        Self::new("asciidoctor", vec!["-o".into(), "-".into(), "-".into()])
    }

    /// Run the program and return its stdout. Blocks until it exits.
    ///
    /// # Errors
    /// `Spawn` if it cannot start, `Failed` on a non-zero exit.
    pub fn run(&self, text: &str) -> Result<String, RenderError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Feed stdin from a separate thread so a large document cannot
        // deadlock against a full stdout pipe.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = text.to_owned();
            std::thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(RenderError::Failed {
                program: self.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if let Some(handle) = writer {
            match handle.join() {
                Ok(Err(e)) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e.into()),
                Ok(_) => {}
                Err(_) => {
                    return Err(RenderError::Io(std::io::Error::other(
                        "stdin writer thread panicked",
                    )));
                }
            }
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Renderer for CommandRenderer {
    fn render(&self, text: &str) -> Result<StructuralTree, RenderError> {
        let html = self.run(text)?;
        Ok(StructuralTree::from_html(&html))
    }
}
