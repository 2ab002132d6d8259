//! Free-text query terms and the fields each kind exposes to them.

use crate::model::event::Event;
use crate::model::goal::Goal;
use crate::model::note::Note;
use crate::model::task::Task;

/// Text fields a record offers to free-text search.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

impl Searchable for Note {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.content.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

impl Searchable for Goal {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        fields.extend(self.milestones.iter().map(String::as_str));
        fields
    }
}

impl Searchable for Event {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

/// Lower-cased, whitespace-separated query terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextQuery {
    terms: Vec<String>,
}

impl TextQuery {
    pub fn parse(query: &str) -> Self {
        Self {
            terms: query
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// True when every term is a substring of at least one field.
    pub fn matches<R: Searchable + ?Sized>(&self, record: &R) -> bool {
        if self.terms.is_empty() {
            return true;
        }
        let haystacks: Vec<String> = record
            .search_fields()
            .into_iter()
            .map(str::to_lowercase)
            .collect();
        self.terms
            .iter()
            .all(|term| haystacks.iter().any(|field| field.contains(term.as_str())))
    }
}
