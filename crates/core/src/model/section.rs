use thiserror::Error;

use crate::code::display_text;
use crate::model::{SectionId, TutorialStack};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SectionError {
    #[error("section title must not be empty")]
    EmptyTitle,
    #[error("duplicate section id: {0}")]
    DuplicateId(SectionId),
    #[error("quiz answer index {index} is out of range for {len} options")]
    InvalidAnswer { index: usize, len: usize },
}

/// Code sample attached to a section.
///
/// Sources are plain code unless built with [`CodeSample::from_markup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSample {
    language: String,
    source: String,
    markup: bool,
}

impl CodeSample {
    #[must_use]
    pub fn new(language: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            language: language.into().trim().to_ascii_lowercase(),
            source: source.into(),
            markup: false,
        }
    }

    /// A sample whose source is wrapped in formatting markup (spans, `<br>`,
    /// escaped entities) and must be flattened before display.
    #[must_use]
    pub fn from_markup(language: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            markup: true,
            ..Self::new(language, source)
        }
    }

    /// Lowercased language tag (e.g. `yaml`, `bash`).
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Source as authored, possibly still wrapped in formatting markup.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn is_markup(&self) -> bool {
        self.markup
    }

    /// Text shown and copied to the clipboard.
    #[must_use]
    pub fn text(&self) -> String {
        display_text(&self.source, self.markup)
    }
}


/// Interactive element embedded in a section.
///
/// Both variants signal completion of the section that hosts them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveElement {
    /// A self-check the reader confirms explicitly.
    Checkpoint { prompt: String, confirm_label: String },
    /// A single-choice question; picking the right option completes the section.
    Quiz {
        question: String,
        options: Vec<String>,
        answer: usize,
    },
}

impl InteractiveElement {
    #[must_use]
    pub fn checkpoint(prompt: impl Into<String>, confirm_label: impl Into<String>) -> Self {
        Self::Checkpoint {
            prompt: prompt.into(),
            confirm_label: confirm_label.into(),
        }
    }

    /// Build a quiz, validating the answer index.
    ///
    /// # Errors
    ///
    /// Returns `SectionError::InvalidAnswer` if `answer` is not a valid option index.
    pub fn quiz(
        question: impl Into<String>,
        options: Vec<String>,
        answer: usize,
    ) -> Result<Self, SectionError> {
        if answer >= options.len() {
            return Err(SectionError::InvalidAnswer {
                index: answer,
                len: options.len(),
            });
        }
        Ok(Self::Quiz {
            question: question.into(),
            options,
            answer,
        })
    }

    /// Returns true when the given choice completes the hosting section.
    #[must_use]
    pub fn accepts(&self, choice: Option<usize>) -> bool {
        match self {
            InteractiveElement::Checkpoint { .. } => true,
            InteractiveElement::Quiz { answer, .. } => choice == Some(*answer),
        }
    }
}

/// One titled block of instructional content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialSection {
    id: SectionId,
    title: String,
    description: String,
    bullets: Vec<String>,
    code: Option<CodeSample>,
    interactive: Option<InteractiveElement>,
}

impl TutorialSection {
    /// Create a section with the required fields.
    ///
    /// # Errors
    ///
    /// Returns `SectionError::EmptyTitle` if the title is blank.
    pub fn new(
        id: SectionId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, SectionError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(SectionError::EmptyTitle);
        }
        Ok(Self {
            id,
            title,
            description: description.into(),
            bullets: Vec::new(),
            code: None,
            interactive: None,
        })
    }

    #[must_use]
    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets = bullets.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: CodeSample) -> Self {
        self.code = Some(code);
        self
    }

    #[must_use]
    pub fn with_interactive(mut self, element: InteractiveElement) -> Self {
        self.interactive = Some(element);
        self
    }

    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn bullets(&self) -> &[String] {
        &self.bullets
    }

    #[must_use]
    pub fn code(&self) -> Option<&CodeSample> {
        self.code.as_ref()
    }

    #[must_use]
    pub fn interactive(&self) -> Option<&InteractiveElement> {
        self.interactive.as_ref()
    }
}

/// Entry of the side navigation outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub id: SectionId,
    pub label: String,
}

/// Full content set for one stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialContent {
    stack: TutorialStack,
    title: String,
    summary: String,
    sections: Vec<TutorialSection>,
}

impl TutorialContent {
    /// Assemble a stack's content, rejecting duplicate section ids.
    ///
    /// # Errors
    ///
    /// Returns `SectionError::DuplicateId` when two sections share an id.
    pub fn new(
        stack: TutorialStack,
        title: impl Into<String>,
        summary: impl Into<String>,
        sections: Vec<TutorialSection>,
    ) -> Result<Self, SectionError> {
        for (pos, section) in sections.iter().enumerate() {
            if sections[..pos].iter().any(|prev| prev.id == section.id) {
                return Err(SectionError::DuplicateId(section.id.clone()));
            }
        }
        Ok(Self {
            stack,
            title: title.into(),
            summary: summary.into(),
            sections,
        })
    }

    #[must_use]
    pub fn stack(&self) -> TutorialStack {
        self.stack
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn sections(&self) -> &[TutorialSection] {
        &self.sections
    }

    /// Section ids in document order.
    #[must_use]
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    #[must_use]
    pub fn nav_entries(&self) -> Vec<NavEntry> {
        self.sections
            .iter()
            .map(|s| NavEntry {
                id: s.id.clone(),
                label: s.title.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &'static str) -> TutorialSection {
        TutorialSection::new(SectionId::from_static(id), id, "text").unwrap()
    }

    #[test]
    fn rejects_blank_title() {
        let err = TutorialSection::new(SectionId::from_static("a"), "  ", "").unwrap_err();
        assert_eq!(err, SectionError::EmptyTitle);
    }

    #[test]
    fn content_rejects_duplicate_ids() {
        let err = TutorialContent::new(
            TutorialStack::Docker,
            "Docker",
            "",
            vec![section("intro"), section("setup"), section("intro")],
        )
        .unwrap_err();
        assert_eq!(err, SectionError::DuplicateId(SectionId::from_static("intro")));
    }

    #[test]
    fn nav_entries_follow_document_order() {
        let content = TutorialContent::new(
            TutorialStack::Docker,
            "Docker",
            "",
            vec![section("intro"), section("setup"), section("compose")],
        )
        .unwrap();
        let labels: Vec<_> = content.nav_entries().into_iter().map(|e| e.label).collect();
        assert_eq!(labels, ["intro", "setup", "compose"]);
    }

    #[test]
    fn quiz_accepts_only_the_right_option() {
        let quiz = InteractiveElement::quiz("?", vec!["a".into(), "b".into()], 1).unwrap();
        assert!(quiz.accepts(Some(1)));
        assert!(!quiz.accepts(Some(0)));
        assert!(!quiz.accepts(None));
        assert!(InteractiveElement::quiz("?", vec![], 0).is_err());
    }

    #[test]
    fn code_sample_normalizes_language() {
        let code = CodeSample::new(" YAML ", "a: 1");
        assert_eq!(code.language(), "yaml");
        assert!(!code.is_markup());
    }

    #[test]
    fn plain_samples_are_shown_verbatim() {
        let express = "app.get('/', (req, res) => res.send('<div>Hello</div>'));";
        assert_eq!(CodeSample::new("javascript", express).text(), express);

        let shell = "echo '&amp;' > out.html";
        assert_eq!(CodeSample::new("bash", shell).text(), shell);
    }

    #[test]
    fn markup_samples_are_flattened() {
        let code = CodeSample::from_markup("bash", "<span>ls &amp;&amp; pwd</span><br>whoami");
        assert!(code.is_markup());
        assert_eq!(code.text(), "ls && pwd\nwhoami");
    }
}
