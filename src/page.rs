//! In-memory document model the controller renders into.
//!
//! Elements are addressed by id and carry a class list, a text body, an input
//! value and optional rendered content, which is all the grade tracker page
//! ever touches.

use crate::errors::ViewError;
use crate::models::CourseScore;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub const TAB_PANEL_CLASS: &str = "tab-content";
pub const TAB_BUTTON_CLASS: &str = "tab-btn";
pub const ACTIVE_CLASS: &str = "active";
pub const SHOW_CLASS: &str = "show";
pub const MESSAGE_CLASS: &str = "message";

pub mod ids {
    pub const SAVE_PANEL: &str = "save";
    pub const GPA_PANEL: &str = "gpa";
    pub const CHART_PANEL: &str = "chart";

    pub const SAVE_NAME: &str = "save-name";
    pub const SAVE_COURSE: &str = "save-course";
    pub const SAVE_SCORE: &str = "save-score";
    pub const SAVE_MESSAGE: &str = "save-message";

    pub const GPA_NAME: &str = "gpa-name";
    pub const GPA_MESSAGE: &str = "gpa-message";
    pub const GPA_RESULT: &str = "gpa-result";

    pub const CHART_NAME: &str = "chart-name";
    pub const CHART_MESSAGE: &str = "chart-message";
    pub const CHART_CONTAINER: &str = "chart-container";

    /// Id of the tab button that opens `panel`.
    pub fn tab_button(panel: &str) -> String {
        format!("btn-{panel}")
    }
}

/// Markup injected into a region in place of its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Loading,
    GpaResult {
        name: String,
        gpa: String,
        score_count: u64,
    },
    Chart {
        name: String,
        chart: String,
        rows: Vec<CourseScore>,
    },
    Error(String),
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("Loading chart..."),
            Self::GpaResult {
                name,
                gpa,
                score_count,
            } => write!(
                f,
                "GPA Calculation Result\nStudent: {name}\n{gpa}\nTotal Scores Recorded: {score_count}"
            ),
            Self::Chart { name, rows, .. } => {
                write!(f, "Grade Summary for {name}")?;
                for row in rows {
                    write!(f, "\n{row}")?;
                }
                Ok(())
            }
            Self::Error(message) => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub classes: BTreeSet<String>,
    pub text: String,
    pub value: String,
    pub content: Option<Content>,
}

impl Element {
    pub fn with_classes(classes: &[&str]) -> Self {
        Self {
            classes: classes.iter().map(|class| class.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_owned());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Text a reader sees: rendered content wins over the plain text body.
    pub fn text_content(&self) -> String {
        match &self.content {
            Some(content) => content.to_string(),
            None => self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    elements: BTreeMap<String, Element>,
}

impl Page {
    pub fn grade_tracker() -> Self {
        let mut page = Self::default();

        for panel in [ids::SAVE_PANEL, ids::GPA_PANEL, ids::CHART_PANEL] {
            page.insert(panel, Element::with_classes(&[TAB_PANEL_CLASS]));
            page.insert(&ids::tab_button(panel), Element::with_classes(&[TAB_BUTTON_CLASS]));
        }
        for input in [
            ids::SAVE_NAME,
            ids::SAVE_COURSE,
            ids::SAVE_SCORE,
            ids::GPA_NAME,
            ids::CHART_NAME,
        ] {
            page.insert(input, Element::default());
        }
        for message in [ids::SAVE_MESSAGE, ids::GPA_MESSAGE, ids::CHART_MESSAGE] {
            page.insert(message, Element::with_classes(&[MESSAGE_CLASS]));
        }
        page.insert(ids::GPA_RESULT, Element::with_classes(&["result-box"]));
        page.insert(ids::CHART_CONTAINER, Element::with_classes(&["chart-container"]));

        if let Some(panel) = page.elements.get_mut(ids::SAVE_PANEL) {
            panel.add_class(ACTIVE_CLASS);
        }
        if let Some(button) = page.elements.get_mut(&ids::tab_button(ids::SAVE_PANEL)) {
            button.add_class(ACTIVE_CLASS);
        }
        page
    }

    pub fn insert(&mut self, id: &str, element: Element) {
        self.elements.insert(id.to_owned(), element);
    }

    pub fn element(&self, id: &str) -> Result<&Element, ViewError> {
        self.elements
            .get(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_owned()))
    }

    pub fn element_mut(&mut self, id: &str) -> Result<&mut Element, ViewError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_owned()))
    }

    pub fn elements(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.elements.iter().map(|(id, element)| (id.as_str(), element))
    }

    pub fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|(_, element)| element.has_class(class))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn value(&self, id: &str) -> Result<&str, ViewError> {
        Ok(self.element(id)?.value.as_str())
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> Result<(), ViewError> {
        self.element_mut(id)?.value = value.into();
        Ok(())
    }

    pub fn set_content(&mut self, id: &str, content: Content) -> Result<(), ViewError> {
        self.element_mut(id)?.content = Some(content);
        Ok(())
    }

    /// Shows the panel `tab` and marks `trigger` as the active tab button.
    /// Nothing changes when either id is missing.
    pub fn switch_tab(&mut self, tab: &str, trigger: &str) -> Result<(), ViewError> {
        self.element(tab)?;
        self.element(trigger)?;

        for element in self.elements.values_mut() {
            if element.has_class(TAB_PANEL_CLASS) || element.has_class(TAB_BUTTON_CLASS) {
                element.remove_class(ACTIVE_CLASS);
            }
        }
        self.element_mut(tab)?.add_class(ACTIVE_CLASS);
        self.element_mut(trigger)?.add_class(ACTIVE_CLASS);
        Ok(())
    }

    pub fn active_panels(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter(|(_, element)| element.has_class(TAB_PANEL_CLASS) && element.has_class(ACTIVE_CLASS))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn show_message(&mut self, id: &str, message: &str, severity_class: &str) -> Result<(), ViewError> {
        let element = self.element_mut(id)?;
        element.text = message.to_owned();
        element.classes = [MESSAGE_CLASS, severity_class]
            .into_iter()
            .map(str::to_owned)
            .collect();
        Ok(())
    }

    pub fn clear_message(&mut self, id: &str) -> Result<(), ViewError> {
        let element = self.element_mut(id)?;
        element.remove_class("success");
        element.remove_class("error");
        element.text.clear();
        Ok(())
    }
}
