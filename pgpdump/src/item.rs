use std::io;

use serde::Serialize;

use crate::Result;

/// A decoded field.
///
/// Every packet is decoded into a tree of `Item`s.  An item has a
/// name, and optionally a value, a note, and a hex dump of the raw
/// data.  The order of the children reflects the order of the fields
/// on the wire.
///
/// Items are built bottom-up: a child is completed before it is
/// attached to its parent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dump: Option<String>,
    #[serde(rename = "Item", skip_serializing_if = "Vec::is_empty")]
    children: Vec<Item>,
}

impl Item {
    /// Creates a new item.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Item {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the value.
    pub fn value<S: Into<String>>(mut self, value: S) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the note.
    pub fn note<S: Into<String>>(mut self, note: S) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Sets the hex dump.
    pub fn dump<S: Into<String>>(mut self, dump: S) -> Self {
        self.dump = Some(dump.into());
        self
    }

    /// Sets the hex dump if `show` is true.
    pub(crate) fn dump_if<S: Into<String>>(self, show: bool, dump: S) -> Self {
        if show {
            self.dump(dump)
        } else {
            self
        }
    }

    /// Replaces the value.
    pub(crate) fn set_value<S: Into<String>>(&mut self, value: S) {
        self.value = Some(value.into());
    }

    /// Replaces the note.
    pub(crate) fn set_note<S: Into<String>>(&mut self, note: S) {
        self.note = Some(note.into());
    }

    /// Replaces the hex dump.
    pub(crate) fn set_dump<S: Into<String>>(&mut self, dump: S) {
        self.dump = Some(dump.into());
    }

    /// Appends a child.
    pub fn push(&mut self, child: Item) {
        self.children.push(child);
    }

    /// Builds a child using `f` and appends it.
    ///
    /// The child is appended even if `f` fails, so that whatever was
    /// decoded before the error is retained.  The result of `f` is
    /// returned.
    pub(crate) fn push_with<T, F>(&mut self, child: Item, f: F) -> Result<T>
        where F: FnOnce(&mut Item) -> Result<T>
    {
        let mut child = child;
        let r = f(&mut child);
        self.children.push(child);
        r
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value, if any.
    pub fn get_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the note, if any.
    pub fn get_note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the hex dump, if any.
    pub fn get_dump(&self) -> Option<&str> {
        self.dump.as_deref()
    }

    /// Returns the children.
    pub fn children(&self) -> &[Item] {
        &self.children
    }

    /// Returns the first child with the given name.
    pub fn child(&self, name: &str) -> Option<&Item> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Writes the item and its children as a text tree.
    pub fn write_text(&self, output: &mut dyn io::Write) -> io::Result<()> {
        self.write_tree(output, "", "")
    }

    fn write_tree(&self, output: &mut dyn io::Write,
                  first: &str, indent: &str) -> io::Result<()> {
        write!(output, "{}{}", first, self.name)?;
        if let Some(value) = &self.value {
            write!(output, ": {}", value)?;
        }
        if let Some(note) = &self.note {
            write!(output, " ({})", note)?;
        }
        writeln!(output)?;

        let continuation = format!("{}{}", indent,
                                   if self.children.is_empty() { " " }
                                   else { "│" });
        if let Some(dump) = &self.dump {
            writeln!(output, "{}   {}", continuation, dump)?;
        }

        let last = self.children.len().saturating_sub(1);
        for (i, child) in self.children.iter().enumerate() {
            let is_last = i == last;
            let first = format!("{}{}── ", indent,
                                if is_last { "└" } else { "├" });
            let indent_child = format!("{}{}   ", indent,
                                       if is_last { " " } else { "│" });
            child.write_tree(output, &first, &indent_child)?;
        }
        Ok(())
    }
}
