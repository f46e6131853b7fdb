//! Single-line text field with a cursor.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Text with an underscore at the cursor while focused.
    pub fn display(&self, focused: bool, placeholder: &str) -> String {
        if !focused {
            return if self.value.is_empty() {
                placeholder.to_string()
            } else {
                self.value.clone()
            };
        }
        let at = self.byte_index(self.cursor);
        format!("{}_{}", &self.value[..at], &self.value[at..])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str, focused: bool, placeholder: &str) {
        let border = if focused { Color::Yellow } else { Color::DarkGray };
        let text_color = if focused || !self.value.is_empty() {
            Color::White
        } else {
            Color::DarkGray
        };
        let widget = Paragraph::new(self.display(focused, placeholder))
            .style(Style::default().fg(text_color))
            .block(
                Block::default()
                    .title(format!(" {} ", title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
        frame.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_at_cursor() {
        let mut input = TextInput::with_value("Zzima");
        for _ in 0..4 {
            input.move_left();
        }
        input.insert('e');
        assert_eq!(input.value(), "Zezima");
        input.backspace();
        assert_eq!(input.value(), "Zzima");
    }

    #[test]
    fn test_display_marks_cursor() {
        let mut input = TextInput::with_value("ab");
        input.move_left();
        assert_eq!(input.display(true, ""), "a_b");
        assert_eq!(input.display(false, ""), "ab");
        assert_eq!(TextInput::new().display(false, "Points"), "Points");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut input = TextInput::new();
        input.insert('é');
        input.insert('x');
        input.backspace();
        input.backspace();
        assert!(input.value().is_empty());
        input.backspace();
        assert!(input.is_blank());
    }
}
