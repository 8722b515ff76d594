use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Widget},
};

/// A text input with cursor handling, used by every form field.
///
/// Features:
/// - Basic text editing (insert, delete, backspace)
/// - Cursor movement (left/right/home/end, up/down across lines)
/// - Multi-line content with soft wrapping when rendered
/// - Horizontal scrolling for single-line fields
///
/// The cursor is a character index, so multi-byte text edits safely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputBox {
    /// The text content of the input box
    content: String,
    /// Current cursor position (character index)
    cursor_position: usize,
}

impl InputBox {
    /// Create a new empty InputBox
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an InputBox holding `content` with the cursor at the end.
    pub fn with_content(content: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_content(content.into());
        input
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the current cursor position
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor_position);
        self.content.insert(at, c);
        self.cursor_position += 1;
    }

    /// Insert a string at the cursor (used for pastes).
    pub fn insert_str(&mut self, text: &str) {
        let at = self.byte_index(self.cursor_position);
        self.content.insert_str(at, text);
        self.cursor_position += text.chars().count();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character at the current cursor position (like Delete key)
    pub fn delete_char(&mut self) {
        if self.cursor_position < self.char_count() {
            let at = self.byte_index(self.cursor_position);
            self.content.remove(at);
        }
    }

    /// Delete the character before the cursor (like Backspace key)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_index(self.cursor_position);
            self.content.remove(at);
        }
    }

    /// Move cursor one position to the left
    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    /// Move cursor one position to the right
    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_count() {
            self.cursor_position += 1;
        }
    }

    /// Move cursor to the start of the current line
    pub fn move_cursor_home(&mut self) {
        let (row, _) = self.cursor_row_col();
        self.cursor_position = self.line_start(row);
    }

    /// Move cursor to the end of the current line
    pub fn move_cursor_end(&mut self) {
        let (row, _) = self.cursor_row_col();
        let len = self.lines().nth(row).map(|l| l.chars().count()).unwrap_or(0);
        self.cursor_position = self.line_start(row) + len;
    }

    /// Move to the same column on the previous line.
    pub fn move_cursor_up(&mut self) {
        let (row, col) = self.cursor_row_col();
        if row > 0 {
            self.move_to(row - 1, col);
        }
    }

    /// Move to the same column on the next line.
    pub fn move_cursor_down(&mut self) {
        let (row, col) = self.cursor_row_col();
        if row + 1 < self.lines().count() {
            self.move_to(row + 1, col);
        }
    }

    fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }

    /// Character index where logical line `row` starts.
    fn line_start(&self, row: usize) -> usize {
        self.lines().take(row).map(|l| l.chars().count() + 1).sum()
    }

    fn move_to(&mut self, row: usize, col: usize) {
        let len = self.lines().nth(row).map(|l| l.chars().count()).unwrap_or(0);
        self.cursor_position = self.line_start(row) + col.min(len);
    }

    /// Logical (line, column) of the cursor.
    pub fn cursor_row_col(&self) -> (usize, usize) {
        let before: String = self.content.chars().take(self.cursor_position).collect();
        let row = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map(|l| l.chars().count())
            .unwrap_or(0);
        (row, col)
    }

    /// Get the current text content
    pub fn get_content(&self) -> &str {
        &self.content
    }

    /// Get the current cursor position
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Set the text content and reset cursor to end
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.cursor_position = self.char_count();
    }

    /// Clear all content and reset cursor
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor_position = 0;
    }

    /// Check if the input box is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Content with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.content.trim()
    }

    /// Soft-wrapped rows for `width` columns plus the cursor's (row, column).
    pub fn visual_rows(&self, width: usize) -> (Vec<String>, (usize, usize)) {
        let width = width.max(1);
        let (cursor_line, cursor_col) = self.cursor_row_col();
        let mut rows = Vec::new();
        let mut cursor = (0, 0);

        for (line_index, line) in self.lines().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            let first_row = rows.len();
            if chars.is_empty() {
                rows.push(String::new());
            } else {
                for chunk in chars.chunks(width) {
                    rows.push(chunk.iter().collect());
                }
            }
            if line_index == cursor_line {
                let mut row = first_row + cursor_col / width;
                let mut col = cursor_col % width;
                // A cursor just past a full row sits at the end of that row.
                if col == 0 && cursor_col > 0 && row >= rows.len() {
                    row -= 1;
                    col = width;
                }
                cursor = (row, col);
            }
        }

        (rows, cursor)
    }

    /// Render inside a rounded block titled `title`.
    ///
    /// Single-line content scrolls horizontally; multi-line content wraps
    /// and scrolls vertically to keep the cursor visible.
    pub fn render_with_title(&self, area: Rect, buf: &mut Buffer, title: &str, focused: bool) {
        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(title.to_string());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let width = inner.width as usize;
        let height = inner.height as usize;
        let text_style = Style::default().fg(Color::White);
        let cursor_style = Style::default().fg(Color::Black).bg(Color::Cyan);

        if height == 1 {
            let (row, col) = self.cursor_row_col();
            let line = self.lines().nth(row).unwrap_or("");
            let scroll = if col >= width { col + 1 - width } else { 0 };
            let visible: String = line.chars().skip(scroll).take(width).collect();
            buf.set_string(inner.x, inner.y, &visible, text_style);
            if focused {
                let x = (col - scroll) as u16;
                let ch = line.chars().nth(col).unwrap_or(' ');
                buf.set_string(inner.x + x, inner.y, ch.to_string(), cursor_style);
            }
            return;
        }

        let (rows, (cursor_row, cursor_col)) = self.visual_rows(width.saturating_sub(1).max(1));
        let scroll = if cursor_row >= height {
            cursor_row + 1 - height
        } else {
            0
        };
        for (i, row) in rows.iter().skip(scroll).take(height).enumerate() {
            buf.set_string(inner.x, inner.y + i as u16, row, text_style);
        }
        if focused {
            let y = (cursor_row - scroll) as u16;
            let ch = rows
                .get(cursor_row)
                .and_then(|r| r.chars().nth(cursor_col))
                .unwrap_or(' ');
            buf.set_string(inner.x + cursor_col as u16, inner.y + y, ch.to_string(), cursor_style);
        }
    }
}

/// A renderable wrapper for InputBox that implements the Widget trait
pub struct InputBoxWidget<'a> {
    input_box: &'a InputBox,
    title: &'a str,
    focused: bool,
}

impl<'a> InputBoxWidget<'a> {
    pub fn new(input_box: &'a InputBox, title: &'a str, focused: bool) -> Self {
        Self {
            input_box,
            title,
            focused,
        }
    }
}

impl Widget for InputBoxWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.input_box
            .render_with_title(area, buf, self.title, self.focused);
    }
}
