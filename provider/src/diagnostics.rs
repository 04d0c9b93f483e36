use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathStep {
    Attribute(String),
    ElementIndex(usize),
    ElementKey(String),
}

/// Location of a value inside a configuration, e.g. `spec.exporters[0].type`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    pub fn root() -> Self {
        AttributePath::default()
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of attribute names in the path; element steps do not count.
    pub fn depth(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, PathStep::Attribute(_)))
            .count()
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn at_name(&self, name: &str) -> Self {
        self.with_step(PathStep::Attribute(name.to_string()))
    }

    pub fn at_index(&self, index: usize) -> Self {
        self.with_step(PathStep::ElementIndex(index))
    }

    pub fn at_key(&self, key: &str) -> Self {
        self.with_step(PathStep::ElementKey(key.to_string()))
    }

    fn with_step(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        AttributePath { steps }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Attribute(name) if i == 0 => write!(f, "{}", name)?,
                PathStep::Attribute(name) => write!(f, ".{}", name)?,
                PathStep::ElementIndex(index) => write!(f, "[{}]", index)?,
                PathStep::ElementKey(key) => write!(f, "[\"{}\"]", key)?,
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub path: Option<AttributePath>,
}

impl Diagnostic {
    pub fn error(summary: &str, detail: &str) -> Self {
        Diagnostic {
            severity: Severity::Error,
            summary: summary.to_string(),
            detail: detail.to_string(),
            path: None,
        }
    }

    pub fn warning(summary: &str, detail: &str) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Diagnostic::error(summary, detail)
        }
    }

    pub fn with_path(mut self, path: &AttributePath) -> Self {
        self.path = Some(path.clone());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        };
        write!(f, "{}: {}", severity, self.summary)?;
        if let Some(path) = self.path.as_ref().filter(|p| !p.is_root()) {
            write!(f, " (at {})", path)?;
        }
        if !self.detail.is_empty() {
            write!(f, "\n  {}", self.detail)?;
        }
        Ok(())
    }
}

/// Ordered diagnostics collected while handling one request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn add_error(&mut self, summary: &str, detail: &str) {
        self.push(Diagnostic::error(summary, detail));
    }

    pub fn add_warning(&mut self, summary: &str, detail: &str) {
        self.push(Diagnostic::warning(summary, detail));
    }

    pub fn add_attribute_error(&mut self, path: &AttributePath, summary: &str, detail: &str) {
        self.push(Diagnostic::error(summary, detail).with_path(path));
    }

    pub fn add_attribute_warning(&mut self, path: &AttributePath, summary: &str, detail: &str) {
        self.push(Diagnostic::warning(summary, detail).with_path(path));
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}
