use std::ops::Range;

use ropey::Rope;

/// Maximum number of undo snapshots kept per buffer.
const HISTORY_LIMIT: usize = 200;

/// Single chars ropey treats as line breaks (CRLF is handled separately).
const LINE_BREAKS: [char; 7] = [
    '\n', '\r', '\u{000B}', '\u{000C}', '\u{0085}', '\u{2028}', '\u{2029}',
];

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    /// Update column and reset column memory to match.
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditKind {
    Insert,
    Delete,
    Other,
}

#[derive(Clone)]
struct Snapshot {
    rope: Rope,
    cursor: Cursor,
}

/// A text buffer backed by a rope data structure.
///
/// Provides efficient insertion, deletion, and line-based operations
/// for editing text files. The cursor tracks the current editing position,
/// and an optional anchor marks the other end of the selection.
///
/// Offsets handed out by [`selection_range`](Self::selection_range) and
/// accepted by [`set_selection`](Self::set_selection) are char indices.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    anchor: Option<usize>,
    dirty: bool,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    last_edit: Option<EditKind>,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            anchor: None,
            dirty: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            last_edit: None,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total number of chars in the buffer.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        let content = s
            .strip_suffix("\r\n")
            .or_else(|| s.strip_suffix(&LINE_BREAKS[..]))
            .unwrap_or(s.as_str());
        Some(content.to_string())
    }

    /// Char range of the line break ending `line_idx` (empty on the last line).
    fn line_break_range(&self, line_idx: usize) -> Range<usize> {
        let content = self.line_at(line_idx).map_or(0, |s| s.chars().count());
        let start = self.line_start_char(line_idx) + content;
        let end = if line_idx + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line_idx + 1)
        } else {
            self.rope.len_chars()
        };
        start..end.max(start)
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// Char index of the first char on a line.
    pub fn line_start_char(&self, line_idx: usize) -> usize {
        self.rope
            .line_to_char(line_idx.min(self.rope.len_lines().saturating_sub(1)))
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Char index of the cursor.
    pub fn cursor_char(&self) -> usize {
        self.cursor_char_idx()
    }

    // --- Selection ---

    /// Ordered char range of the current selection, or `None` when nothing is selected.
    pub fn selection_range(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        let head = self.cursor_char_idx();
        match anchor.cmp(&head) {
            std::cmp::Ordering::Less => Some(anchor..head),
            std::cmp::Ordering::Greater => Some(head..anchor),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Whether a non-empty selection exists.
    pub fn has_selection(&self) -> bool {
        self.selection_range().is_some()
    }

    /// The selected text, if any.
    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection_range()?;
        Some(self.rope.slice(range).to_string())
    }

    /// Select the whole buffer, leaving the cursor at the end.
    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.set_cursor_char(self.rope.len_chars());
        self.last_edit = None;
    }

    /// Select an arbitrary char range; the cursor lands on `range.end`.
    pub fn set_selection(&mut self, range: Range<usize>) {
        let len = self.rope.len_chars();
        self.anchor = Some(range.start.min(len));
        self.set_cursor_char(range.end.min(len));
        self.last_edit = None;
    }

    /// Prepare for a cursor movement: `extend` keeps (or starts) the selection,
    /// otherwise any selection is dropped.
    pub fn set_selecting(&mut self, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor_char_idx());
            }
        } else {
            self.anchor = None;
        }
    }

    /// Delete the selected text. Returns `true` if anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection_range() else {
            self.anchor = None;
            return false;
        };
        self.checkpoint(EditKind::Other);
        self.remove_range(range);
        true
    }

    // --- Editing ---

    /// Insert a character at the cursor position, replacing any selection.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(range) = self.selection_range() {
            self.checkpoint(EditKind::Other);
            self.remove_range(range);
        } else {
            self.checkpoint(EditKind::Insert);
        }
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
        self.dirty = true;
    }

    /// Insert a string at the cursor position, replacing any selection.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.checkpoint(EditKind::Other);
        if let Some(range) = self.selection_range() {
            self.remove_range(range);
        }
        let char_idx = self.cursor_char_idx();
        self.rope.insert(char_idx, s);

        // Move cursor to end of inserted text
        let lines: Vec<&str> = s.split('\n').collect();
        if lines.len() > 1 {
            self.cursor.line += lines.len() - 1;
            self.cursor.set_col(lines.last().map_or(0, |l| l.len()));
        } else {
            self.cursor.set_col(self.cursor.col + s.len());
        }
        self.dirty = true;
        self.last_edit = None;
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        if let Some(range) = self.selection_range() {
            self.checkpoint(EditKind::Other);
            self.remove_range(range);
        } else {
            self.checkpoint(EditKind::Insert);
        }
        self.insert_newline();
    }

    /// Delete the character before the cursor (Backspace), or the selection.
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        self.anchor = None;
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }
        self.checkpoint(EditKind::Delete);

        if self.cursor.col == 0 {
            // Join with previous line, dropping its whole break (CRLF included)
            let prev_line_len = self.line_len(self.cursor.line - 1);
            self.rope.remove(self.line_break_range(self.cursor.line - 1));
            self.cursor.line -= 1;
            self.cursor.set_col(prev_line_len);
        } else {
            // Delete character before cursor
            let char_idx = self.cursor_char_idx();
            let line = self.rope.line(self.cursor.line);
            let line_str = line.to_string();
            let before = &line_str[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        }
        self.dirty = true;
        true
    }

    /// Delete the character at the cursor (Delete key), or the selection.
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        self.anchor = None;
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len && self.cursor.line + 1 >= self.line_count() {
            return false;
        }
        self.checkpoint(EditKind::Delete);

        if self.cursor.col >= line_len {
            self.cursor.set_col(line_len);
            self.rope.remove(self.line_break_range(self.cursor.line));
        } else {
            let char_idx = self.cursor_char_idx();
            self.rope.remove(char_idx..=char_idx);
        }
        self.dirty = true;
        true
    }

    /// Replace the whole content in one undoable step.
    ///
    /// The cursor returns to the start and the selection is dropped.
    pub fn replace_all_text(&mut self, text: &str) {
        self.checkpoint(EditKind::Other);
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::new();
        self.anchor = None;
        self.dirty = true;
        self.last_edit = None;
    }

    // --- History ---

    /// Whether there is an edit to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether there is an undone edit to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Restore the state before the most recent edit group.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(self.snapshot());
        self.restore(snapshot);
        true
    }

    /// Re-apply the most recently undone edit group.
    ///
    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(self.snapshot());
        self.restore(snapshot);
        true
    }

    // --- Movement ---

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        self.last_edit = None;
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.last_edit = None;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        self.last_edit = None;
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        self.last_edit = None;
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let before = &line[..self.cursor.col];
        let trimmed = before.trim_end();

        if trimmed.is_empty() {
            self.cursor.set_col(0);
            return;
        }

        // Find start of previous word
        let pos = trimmed
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + 1);
        self.cursor.set_col(pos);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        self.last_edit = None;
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = &line[self.cursor.col..];

        // Skip current word characters
        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());

        // Skip whitespace/punctuation after word
        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());

        self.cursor.set_col(self.cursor.col + word_end + space_end);
    }

    /// Move cursor to a specific line and column.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.last_edit = None;
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let max_col = self.line_len(self.cursor.line);
        self.cursor.set_col(col.min(max_col));
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.last_edit = None;
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        self.last_edit = None;
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    /// Convert a char index into a (line, byte column) pair.
    pub fn char_to_line_col(&self, char_idx: usize) -> (usize, usize) {
        let char_idx = char_idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        let col = self.rope.slice(line_start..char_idx).len_bytes();
        (line, col)
    }

    /// Convert a (line, byte column) pair into a char index.
    pub fn line_col_to_char(&self, line: usize, col: usize) -> usize {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        let line_start = self.rope.line_to_char(line);
        let line_str = self.rope.line(line).to_string();
        let byte_col = col.min(line_str.len());
        let char_offset = line_str
            .get(..byte_col)
            .map_or_else(|| line_str.chars().count(), |s| s.chars().count());
        line_start + char_offset
    }

    // --- Private helpers ---

    /// Convert cursor position to a ropey char index.
    fn cursor_char_idx(&self) -> usize {
        self.line_col_to_char(self.cursor.line, self.cursor.col)
    }

    fn set_cursor_char(&mut self, char_idx: usize) {
        let (line, col) = self.char_to_line_col(char_idx);
        self.cursor.line = line;
        self.cursor.set_col(col);
    }

    fn insert_newline(&mut self) {
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
        self.dirty = true;
    }

    fn remove_range(&mut self, range: Range<usize>) {
        let start = range.start;
        self.rope.remove(range);
        self.anchor = None;
        self.set_cursor_char(start);
        self.dirty = true;
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            rope: self.rope.clone(),
            cursor: self.cursor,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.rope = snapshot.rope;
        self.cursor = snapshot.cursor;
        self.anchor = None;
        self.dirty = true;
        self.last_edit = None;
    }

    /// Record an undo point unless this edit continues the previous group.
    fn checkpoint(&mut self, kind: EditKind) {
        let continues_group = kind != EditKind::Other && self.last_edit == Some(kind);
        if !continues_group {
            if self.undo_stack.len() == HISTORY_LIMIT {
                self.undo_stack.remove(0);
            }
            self.undo_stack.push(self.snapshot());
        }
        self.redo_stack.clear();
        self.last_edit = Some(kind);
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .field("dirty", &self.dirty)
            .field("undo_depth", &self.undo_stack.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = EditorBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some("world".to_string()));
    }

    #[test]
    fn test_line_at_out_of_bounds_returns_none() {
        let buf = EditorBuffer::from_text("hello");
        assert_eq!(buf.line_at(1), None);
    }

    #[test]
    fn test_text_roundtrip_keeps_trailing_newline() {
        let content = "line one\nline two\n";
        let buf = EditorBuffer::from_text(content);
        assert_eq!(buf.text(), content);
    }

    // --- Dirty tracking ---

    #[test]
    fn test_new_buffer_is_clean() {
        let buf = EditorBuffer::from_text("hello");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_mark_clean_resets_dirty() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.insert_char('!');
        assert!(buf.is_dirty());
        buf.mark_clean();
        assert!(!buf.is_dirty());
    }

    // --- Insertion ---

    #[test]
    fn test_insert_char_in_middle() {
        let mut buf = EditorBuffer::from_text("hllo");
        buf.move_cursor(Direction::Right);
        buf.insert_char('e');
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        buf.insert_char('é');
        assert_eq!(buf.line_at(0), Some("helloé".to_string()));
        assert_eq!(buf.cursor().col, 7);
    }

    #[test]
    fn test_insert_str_multiline_moves_cursor() {
        let mut buf = EditorBuffer::from_text("ad");
        buf.move_cursor(Direction::Right);
        buf.insert_str("b\nc");
        assert_eq!(buf.text(), "ab\ncd");
        assert_eq!(buf.cursor(), Cursor::at(1, 1));
    }

    #[test]
    fn test_split_line_in_middle() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(" world".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    // --- Deletion ---

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "hello");
        assert!(!buf.can_undo());
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        buf.delete_back();
        assert_eq!(buf.line_at(0), Some("helloworld".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut buf = EditorBuffer::from_text("café");
        buf.move_end();
        buf.delete_back();
        assert_eq!(buf.line_at(0), Some("caf".to_string()));
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(0, 5);
        buf.delete_forward();
        assert_eq!(buf.line_at(0), Some("helloworld".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_back_joins_crlf_lines() {
        let mut buf = EditorBuffer::from_text("ab\r\ncd");
        assert_eq!(buf.line_at(0), Some("ab".to_string()));
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_delete_forward_joins_crlf_lines() {
        let mut buf = EditorBuffer::from_text("ab\r\ncd");
        buf.move_to(0, 2);
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_unicode_line_separator_ends_line() {
        let mut buf = EditorBuffer::from_text("ab\u{2028}cd");
        assert_eq!(buf.line_at(0), Some("ab".to_string()));
        buf.move_end();
        buf.insert_char('X');
        assert_eq!(buf.text(), "abX\u{2028}cd");

        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abXcd");
    }

    // --- Movement ---

    #[test]
    fn test_column_memory_across_short_line() {
        let mut buf = EditorBuffer::from_text("hello\nhi\nworld");
        buf.move_to(0, 4);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor(), Cursor::at(2, 4));
    }

    #[test]
    fn test_move_word_right_from_start() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 6);
    }

    #[test]
    fn test_move_word_left_at_start_of_line_wraps() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        buf.move_word_left();
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(100, 100);
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    // --- Offsets ---

    #[test]
    fn test_char_line_col_conversion_with_multibyte() {
        let buf = EditorBuffer::from_text("héllo\nwörld");
        assert_eq!(buf.char_to_line_col(2), (0, 3));
        assert_eq!(buf.char_to_line_col(6), (1, 0));
        assert_eq!(buf.char_to_line_col(8), (1, 3));
        assert_eq!(buf.line_col_to_char(1, 3), 8);
        assert_eq!(buf.line_col_to_char(0, 3), 2);
    }

    // --- Selection ---

    #[test]
    fn test_select_all_covers_whole_buffer() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.select_all();
        assert_eq!(buf.selection_range(), Some(0..5));
        assert_eq!(buf.selected_text().as_deref(), Some("ab\ncd"));
        assert!(!buf.is_dirty(), "selecting must not mutate");
    }

    #[test]
    fn test_select_all_on_empty_buffer_selects_nothing() {
        let mut buf = EditorBuffer::empty();
        buf.select_all();
        assert_eq!(buf.selection_range(), None);
    }

    #[test]
    fn test_shift_movement_extends_selection() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(0, 1);
        buf.set_selecting(true);
        buf.move_cursor(Direction::Right);
        buf.set_selecting(true);
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.selected_text().as_deref(), Some("el"));

        buf.set_selecting(false);
        buf.move_cursor(Direction::Right);
        assert!(!buf.has_selection());
    }

    #[test]
    fn test_backward_selection_is_ordered() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        buf.set_selecting(true);
        buf.move_word_left();
        assert_eq!(buf.selection_range(), Some(0..5));
    }

    #[test]
    fn test_insert_char_replaces_selection() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.set_selection(0..5);
        buf.insert_char('J');
        assert_eq!(buf.text(), "J world");
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_delete_selection_across_lines() {
        let mut buf = EditorBuffer::from_text("one\ntwo\nthree");
        buf.set_selection(2..9);
        assert_eq!(buf.selected_text().as_deref(), Some("e\ntwo\nt"));
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "onhree");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    // --- History ---

    #[test]
    fn test_typing_is_undone_as_one_group() {
        let mut buf = EditorBuffer::from_text("");
        buf.insert_char('a');
        buf.insert_char('b');
        buf.insert_char('c');
        assert!(buf.undo());
        assert_eq!(buf.text(), "");
        assert!(!buf.can_undo());
    }

    #[test]
    fn test_movement_breaks_undo_group() {
        let mut buf = EditorBuffer::from_text("");
        buf.insert_char('a');
        buf.move_home();
        buf.insert_char('b');
        assert_eq!(buf.text(), "ba");
        buf.undo();
        assert_eq!(buf.text(), "a");
        buf.undo();
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_redo_reapplies_and_new_edit_clears_redo() {
        let mut buf = EditorBuffer::from_text("x");
        buf.replace_all_text("y");
        buf.undo();
        assert_eq!(buf.text(), "x");
        assert!(buf.redo());
        assert_eq!(buf.text(), "y");

        buf.undo();
        buf.insert_char('z');
        assert!(!buf.can_redo());
    }

    #[test]
    fn test_undo_on_fresh_buffer_is_noop() {
        let mut buf = EditorBuffer::from_text("keep");
        assert!(!buf.undo());
        assert_eq!(buf.text(), "keep");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_history_is_capped() {
        let mut buf = EditorBuffer::empty();
        for _ in 0..(HISTORY_LIMIT + 20) {
            buf.replace_all_text("x");
        }
        let mut undone = 0;
        while buf.undo() {
            undone += 1;
        }
        assert_eq!(undone, HISTORY_LIMIT);
    }

    #[test]
    fn test_replace_all_text_resets_cursor() {
        let mut buf = EditorBuffer::from_text("abc\ndef");
        buf.move_to_end();
        buf.replace_all_text("new");
        assert_eq!(buf.text(), "new");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
        assert!(buf.is_dirty());
    }
}
