//! Edit-modal state: a buffer per mutable field with pure text-editing
//! transitions, testable without a terminal.

use crate::model::{RowId, Submission, SubmissionPatch};

/// The four editable fields, in modal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    /// Display name (required by the store).
    Name,
    /// Email address (required by the store).
    Email,
    /// Phone number.
    Phone,
    /// Message body.
    Message,
}

impl EditField {
    /// Field label for the modal.
    pub fn label(self) -> &'static str {
        match self {
            EditField::Name => "Name",
            EditField::Email => "Email",
            EditField::Phone => "Phone",
            EditField::Message => "Message",
        }
    }

    /// Next field in Tab order (wraps).
    pub fn next(self) -> Self {
        match self {
            EditField::Name => EditField::Email,
            EditField::Email => EditField::Phone,
            EditField::Phone => EditField::Message,
            EditField::Message => EditField::Name,
        }
    }

    /// Previous field in Tab order (wraps).
    pub fn prev(self) -> Self {
        match self {
            EditField::Name => EditField::Message,
            EditField::Email => EditField::Name,
            EditField::Phone => EditField::Email,
            EditField::Message => EditField::Phone,
        }
    }

    /// All fields in modal order.
    pub fn all() -> [EditField; 4] {
        [
            EditField::Name,
            EditField::Email,
            EditField::Phone,
            EditField::Message,
        ]
    }
}

/// In-progress edit of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    id: RowId,
    name: String,
    email: String,
    phone: String,
    message: String,
    active: EditField,
    /// Byte offset into the active field's buffer, always on a char
    /// boundary.
    cursor: usize,
}

impl EditForm {
    /// Start editing a submission, cursor at the end of the name field.
    pub fn for_submission(submission: &Submission) -> Self {
        let name = submission.name().to_string();
        let cursor = name.len();
        Self {
            id: submission.id(),
            name,
            email: submission.email().to_string(),
            phone: submission.phone().to_string(),
            message: submission.message().to_string(),
            active: EditField::Name,
            cursor,
        }
    }

    /// The row being edited.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Currently focused field.
    pub fn active(&self) -> EditField {
        self.active
    }

    /// Cursor byte offset within the active field.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Buffer contents for a field.
    pub fn value(&self, field: EditField) -> &str {
        match field {
            EditField::Name => &self.name,
            EditField::Email => &self.email,
            EditField::Phone => &self.phone,
            EditField::Message => &self.message,
        }
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self.active {
            EditField::Name => &mut self.name,
            EditField::Email => &mut self.email,
            EditField::Phone => &mut self.phone,
            EditField::Message => &mut self.message,
        }
    }

    /// Insert a character at the cursor and advance past it.
    pub fn insert_char(&mut self, ch: char) {
        let cursor = self.cursor;
        self.buffer_mut().insert(cursor, ch);
        self.cursor = cursor + ch.len_utf8();
    }

    /// Delete the character before the cursor, if any.
    pub fn backspace(&mut self) {
        let cursor = self.cursor;
        let Some(prev) = self.value(self.active)[..cursor].chars().next_back() else {
            return;
        };
        let start = cursor - prev.len_utf8();
        self.buffer_mut().remove(start);
        self.cursor = start;
    }

    /// Move the cursor one character left (saturates at 0).
    pub fn cursor_left(&mut self) {
        if let Some(prev) = self.value(self.active)[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    /// Move the cursor one character right (saturates at the end).
    pub fn cursor_right(&mut self) {
        if let Some(next) = self.value(self.active)[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    /// Focus the next field; cursor moves to that field's end.
    pub fn next_field(&mut self) {
        self.active = self.active.next();
        self.cursor = self.value(self.active).len();
    }

    /// Focus the previous field; cursor moves to that field's end.
    pub fn prev_field(&mut self) {
        self.active = self.active.prev();
        self.cursor = self.value(self.active).len();
    }

    /// The patch this form would submit.
    pub fn to_patch(&self) -> SubmissionPatch {
        SubmissionPatch {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: self.message.clone(),
        }
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Timestamp;

    fn form() -> EditForm {
        let submission = Submission::new(
            RowId::new(4).expect("valid row id"),
            "Ada",
            "ada@example.com",
            "123",
            "hello",
            Timestamp::new("2025-01-01"),
        );
        EditForm::for_submission(&submission)
    }

    #[test]
    fn starts_on_name_with_cursor_at_end() {
        let form = form();
        assert_eq!(form.active(), EditField::Name);
        assert_eq!(form.cursor(), "Ada".len());
        assert_eq!(form.value(EditField::Name), "Ada");
    }

    #[test]
    fn insert_appends_at_end() {
        let mut form = form();
        form.insert_char('!');
        assert_eq!(form.value(EditField::Name), "Ada!");
        assert_eq!(form.cursor(), 4);
    }

    #[test]
    fn insert_mid_buffer() {
        let mut form = form();
        form.cursor_left();
        form.insert_char('x');
        assert_eq!(form.value(EditField::Name), "Adxa");
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let mut form = form();
        form.backspace();
        assert_eq!(form.value(EditField::Name), "Ad");
        assert_eq!(form.cursor(), 2);
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut form = form();
        for _ in 0..10 {
            form.cursor_left();
        }
        form.backspace();
        assert_eq!(form.value(EditField::Name), "Ada");
        assert_eq!(form.cursor(), 0);
    }

    #[test]
    fn cursor_moves_respect_multibyte_chars() {
        let mut form = form();
        form.insert_char('é');
        assert_eq!(form.value(EditField::Name), "Adaé");
        form.cursor_left();
        assert_eq!(form.cursor(), 3);
        form.backspace(); // removes 'a'
        assert_eq!(form.value(EditField::Name), "Adé");
        form.cursor_right();
        assert_eq!(form.cursor(), form.value(EditField::Name).len());
    }

    #[test]
    fn field_cycle_wraps_both_ways() {
        let mut form = form();
        form.next_field();
        assert_eq!(form.active(), EditField::Email);
        assert_eq!(form.cursor(), "ada@example.com".len());

        form.next_field();
        form.next_field();
        form.next_field();
        assert_eq!(form.active(), EditField::Name, "wraps forward");

        form.prev_field();
        assert_eq!(form.active(), EditField::Message, "wraps backward");
    }

    #[test]
    fn edits_in_each_field_land_in_the_patch() {
        let mut form = form();
        form.insert_char('m');
        form.next_field(); // email
        form.backspace();
        form.next_field(); // phone
        form.insert_char('4');
        form.next_field(); // message
        form.insert_char('!');

        let patch = form.to_patch();
        assert_eq!(patch.name, "Adam");
        assert_eq!(patch.email, "ada@example.co");
        assert_eq!(patch.phone, "1234");
        assert_eq!(patch.message, "hello!");
    }

    #[test]
    fn id_is_carried_through() {
        assert_eq!(form().id().as_u32(), 4);
    }
}
