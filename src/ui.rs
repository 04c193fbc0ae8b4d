//! Page handlers for the keyword tool: the navigation menu toggle and the keyword form.
//!
//! Handlers never look elements up themselves. Callers hand them the element
//! handles they act on, so they run the same against a live page binding or the
//! in-memory [`Element`] used by the CLI and the tests.

use tracing::{debug, info};

use crate::keywords::{KeywordExtractor, KeywordSet};

pub const ACTIVE_CLASS: &str = "active";
pub const TITLE_ID: &str = "title";
pub const DESCRIPTION_ID: &str = "description";
pub const KEYWORD_BOX_ID: &str = "keyword-box";
pub const RESULT_CONTAINER_ID: &str = "result-container";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Block,
    None,
}

impl DisplayMode {
    pub fn as_css(&self) -> &'static str {
        match self {
            DisplayMode::Block => "block",
            DisplayMode::None => "none",
        }
    }
}

pub trait ClassList {
    fn contains_class(&self, class: &str) -> bool;

    /// Adds the class if missing, removes it otherwise. Returns whether it is now present.
    fn toggle_class(&mut self, class: &str) -> bool;
}

pub trait TextInput {
    fn value(&self) -> &str;
}

/// Receives plain text. Implementations must not interpret it as markup.
pub trait TextOutput {
    fn set_text_content(&mut self, text: &str);
}

pub trait Visibility {
    fn set_display(&mut self, mode: DisplayMode);
}

/// Blocking user notification, the page's `alert`.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// In-memory page element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    id: String,
    classes: Vec<String>,
    value: String,
    text_content: String,
    display: Option<DisplayMode>,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.contains_class(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_display(mut self, mode: DisplayMode) -> Self {
        self.display = Some(mode);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn text_content(&self) -> &str {
        &self.text_content
    }

    /// `None` while no inline display style has been set.
    pub fn display(&self) -> Option<DisplayMode> {
        self.display
    }

    /// Inline `style` attribute value, empty while nothing has been set.
    pub fn style(&self) -> String {
        self.display
            .map(|mode| format!("display: {};", mode.as_css()))
            .unwrap_or_default()
    }
}

impl ClassList for Element {
    fn contains_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn toggle_class(&mut self, class: &str) -> bool {
        if let Some(idx) = self.classes.iter().position(|c| c == class) {
            self.classes.remove(idx);
            false
        } else {
            self.classes.push(class.to_string());
            true
        }
    }
}

impl TextInput for Element {
    fn value(&self) -> &str {
        &self.value
    }
}

impl TextOutput for Element {
    fn set_text_content(&mut self, text: &str) {
        self.text_content = text.to_string();
    }
}

impl Visibility for Element {
    fn set_display(&mut self, mode: DisplayMode) {
        self.display = Some(mode);
    }
}

/// Writes alerts to stderr, for terminal use.
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Keeps every alert it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub messages: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Flips the `active` class on the navigation links element.
pub fn toggle_menu<N: ClassList + ?Sized>(nav: &mut N) {
    let active = nav.toggle_class(ACTIVE_CLASS);
    debug!(active, "navigation menu toggled");
}

/// Element handles the keyword form handler works with.
pub struct KeywordForm<'a> {
    pub title: &'a dyn TextInput,
    pub description: &'a dyn TextInput,
    pub keyword_box: &'a mut dyn TextOutput,
    pub result_container: &'a mut dyn Visibility,
}

impl KeywordForm<'_> {
    /// Reads the form, shows the keywords and reveals the result container.
    /// A missing title alerts the user and leaves both outputs untouched.
    pub fn generate(
        &mut self,
        extractor: &KeywordExtractor,
        notifier: &mut dyn Notifier,
    ) -> Option<KeywordSet> {
        match extractor.extract(self.title.value(), self.description.value()) {
            Ok(keywords) => {
                self.keyword_box.set_text_content(&keywords.to_string());
                self.result_container.set_display(DisplayMode::Block);
                info!(count = keywords.len(), "keywords generated");
                Some(keywords)
            }
            Err(err) => {
                debug!(error = %err, "keyword form rejected");
                notifier.alert(&err.to_string());
                None
            }
        }
    }
}

/// Runs the keyword form with the default extractor.
pub fn generate_keywords(
    form: &mut KeywordForm<'_>,
    notifier: &mut dyn Notifier,
) -> Option<KeywordSet> {
    form.generate(&KeywordExtractor::default(), notifier)
}
