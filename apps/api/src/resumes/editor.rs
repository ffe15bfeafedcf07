//! Index-based editing of resume sections.
//!
//! Each section is an ordered list; an edit appends, removes at an index, or
//! replaces at an index. An index outside the list is reported, never clamped.

use serde::Deserialize;
use thiserror::Error;

use crate::models::resume::{Education, Experience, ResumeSections, Skill};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub enum EditOp<T> {
    /// Omitting `item` appends a blank entry for the form to fill in.
    Append {
        #[serde(default)]
        item: T,
    },
    Remove {
        index: usize,
    },
    Replace {
        index: usize,
        item: T,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "section", content = "edit", rename_all = "snake_case")]
pub enum SectionEdit {
    Experience(EditOp<Experience>),
    Education(EditOp<Education>),
    Skills(EditOp<Skill>),
}

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("{section} index {index} is out of range (section has {len} entries)")]
    IndexOutOfRange {
        section: &'static str,
        index: usize,
        len: usize,
    },
}

pub fn apply_op<T>(section: &'static str, items: &mut Vec<T>, op: EditOp<T>) -> Result<(), EditError> {
    let out_of_range = |index: usize, len: usize| EditError::IndexOutOfRange {
        section,
        index,
        len,
    };

    match op {
        EditOp::Append { item } => items.push(item),
        EditOp::Remove { index } => {
            if index >= items.len() {
                return Err(out_of_range(index, items.len()));
            }
            items.remove(index);
        }
        EditOp::Replace { index, item } => {
            let len = items.len();
            let slot = items.get_mut(index).ok_or_else(|| out_of_range(index, len))?;
            *slot = item;
        }
    }
    Ok(())
}

impl ResumeSections {
    pub fn apply(&mut self, edit: SectionEdit) -> Result<(), EditError> {
        match edit {
            SectionEdit::Experience(op) => apply_op("experience", &mut self.experience, op),
            SectionEdit::Education(op) => apply_op("education", &mut self.education, op),
            SectionEdit::Skills(op) => apply_op("skills", &mut self.skills, op),
        }
    }
}
