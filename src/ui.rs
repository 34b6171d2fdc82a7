//! Drawing - turns a RenderState into a frame

use ratatui::{prelude::*, widgets::*};

use crate::app::editor::EditorDialog;
use crate::constants::{APP_NAME, APP_VERSION};
use crate::messages::ui_events::EditorField;
use crate::messages::{DialogView, RenderState};
use crate::models::{Book, EditorTarget};

pub fn draw(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, chunks[0]);
    draw_table(f, state, chunks[1]);
    draw_status_bar(f, state, chunks[2]);

    match &state.dialog {
        DialogView::None => {}
        DialogView::Detail(book) => draw_detail_popup(f, book, area),
        DialogView::Editor(editor) => draw_editor_popup(f, editor, area),
    }

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::styled(format!(" {}", state.base_url), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_table(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if matches!(state.dialog, DialogView::None) {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        })
        .title(format!(" Books ({}) ", state.books.len()));

    if state.books.is_empty() {
        let message = if state.is_loading {
            "Loading..."
        } else {
            "No books yet. Press 'a' to add one."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["ID", "Title", "Body"])
        .style(Style::default().fg(Color::Yellow).bold());

    let rows: Vec<Row> = state
        .books
        .iter()
        .map(|book| {
            Row::new(vec![
                Cell::from(book.id.to_string()),
                Cell::from(book.title.clone()),
                Cell::from(first_line(&book.body).to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(35),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .highlight_symbol("> ");

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected));

    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let keys = match state.dialog {
        DialogView::None => " a:add | e:edit | v:show | d:delete | r:reload | ?:help | q:quit ",
        DialogView::Editor(_) => " Tab:next field | Ctrl+S:save | Esc:cancel ",
        DialogView::Detail(_) => " Esc:close ",
    };

    let sync = if state.is_loading {
        String::from("Loading... ")
    } else {
        state
            .last_synced
            .map(|t| format!("synced {} ", t.format("%H:%M:%S")))
            .unwrap_or_default()
    };

    let line = Line::from(vec![
        Span::styled(keys, Style::default().fg(Color::DarkGray)),
        Span::styled(sync, Style::default().fg(Color::Green)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_detail_popup(f: &mut Frame, book: &Book, area: Rect) {
    let popup_area = centered_rect(60, 50, area);

    let label = Style::default().fg(Color::Cyan).bold();
    let mut lines = vec![
        Line::from(vec![Span::styled("ID: ", label), Span::raw(book.id.to_string())]),
        Line::from(vec![Span::styled("Title: ", label), Span::raw(book.title.clone())]),
        Line::from(Span::styled("Body: ", label)),
    ];
    lines.extend(book.body.lines().map(|l| Line::from(format!("  {}", l))));
    lines.push(Line::from(vec![
        Span::styled("CreatedAt: ", label),
        Span::raw(book.created_at.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("UpdatedAt: ", label),
        Span::raw(book.updated_at.clone()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Book ")
        .title_bottom(Line::from(" Esc: close ").right_aligned())
        .style(Style::default().bg(Color::Black));

    let detail = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(detail, popup_area);
}

fn draw_editor_popup(f: &mut Frame, editor: &EditorDialog, area: Rect) {
    let popup_area = centered_rect(70, 60, area);

    let title = match editor.target {
        EditorTarget::Draft => String::from(" New Book "),
        EditorTarget::Existing(id) => format!(" Edit Book #{} ", id),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title field
            Constraint::Min(3),    // Body field
            Constraint::Length(1), // Error
            Constraint::Length(1), // Save / cancel
        ])
        .split(inner);

    let field_style = |field: EditorField| {
        if editor.field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    // Only the focused field follows the cursor
    let (line, col) = editor.cursor_line_col();
    let (title_scroll, body_scroll, cursor) = match editor.field {
        EditorField::Title => {
            let (scroll, cursor) = field_viewport(chunks[0], line, col);
            (scroll, (0, 0), cursor)
        }
        EditorField::Body => {
            let (scroll, cursor) = field_viewport(chunks[1], line, col);
            ((0, 0), scroll, cursor)
        }
    };

    let title_input = Paragraph::new(editor.title.as_str()).scroll(title_scroll).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(field_style(EditorField::Title))
            .title(" Title "),
    );
    f.render_widget(title_input, chunks[0]);

    let body_input = Paragraph::new(editor.body.as_str()).scroll(body_scroll).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(field_style(EditorField::Body))
            .title(" Body "),
    );
    f.render_widget(body_input, chunks[1]);

    if let Some(error) = &editor.error {
        let error_line = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(error_line, chunks[2]);
    }

    let footer = if editor.is_saving() {
        Line::from(Span::styled(" Saving... ", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(vec![
            Span::styled(" Ctrl+S ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Save  "),
            Span::styled(" Esc ", Style::default().fg(Color::Black).bg(Color::Magenta)),
            Span::raw(" Cancel"),
        ])
    };
    f.render_widget(Paragraph::new(footer), chunks[3]);

    f.set_cursor_position(cursor);
}

/// Scroll offset `(y, x)` for a bordered field and the cursor cell inside it
fn field_viewport(area: Rect, line: usize, col: usize) -> ((u16, u16), Position) {
    let dx = scroll_offset(col, area.width.saturating_sub(2));
    let dy = scroll_offset(line, area.height.saturating_sub(2));

    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    let max_y = area.y.saturating_add(area.height.saturating_sub(2));
    let x = area.x.saturating_add(1).saturating_add(to_u16(col - dx)).min(max_x);
    let y = area.y.saturating_add(1).saturating_add(to_u16(line - dy)).min(max_y);

    ((to_u16(dy), to_u16(dx)), Position::new(x, y))
}

/// First visible cell so that `pos` fits in `len` cells
fn scroll_offset(pos: usize, len: u16) -> usize {
    pos.saturating_sub(usize::from(len.saturating_sub(1)))
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 BOOK LIST - Keyboard Shortcuts

 LIST
   ↑ / ↓  (k / j)     Select row
   Home / End         First / last row
   a                  Add a new book
   e / Enter          Edit selected book
   v / Space          Show selected book
   d / Delete         Delete selected book
   r                  Reload from server

 EDITOR
   Tab / Shift+Tab    Switch field
   Enter              Next field / new line in body
   Ctrl+S             Save
   Esc                Cancel

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Help - v{} ", APP_VERSION))
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SAVE_FAILED_MESSAGE;
    use ratatui::backend::TestBackend;

    fn book(id: i64, title: &str, body: &str) -> Book {
        Book {
            id,
            title: title.into(),
            body: body.into(),
            created_at: "2024-01-01".into(),
            updated_at: "2024-01-02".into(),
        }
    }

    fn draw_to_backend(state: &RenderState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();
        terminal
    }

    fn render(state: &RenderState) -> String {
        draw_to_backend(state)
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn loaded(books: Vec<Book>) -> RenderState {
        RenderState {
            books,
            is_loading: false,
            ..RenderState::default()
        }
    }

    #[test]
    fn test_rows_show_title_and_first_body_line() {
        let screen = render(&loaded(vec![
            book(1, "Dune", "Spice\nmust flow"),
            book(2, "Emma", "Matchmaking"),
        ]));
        assert!(screen.contains("Dune"));
        assert!(screen.contains("Spice"));
        assert!(!screen.contains("must flow"));
        assert!(screen.contains("Emma"));
        assert!(screen.contains("Books (2)"));
    }

    #[test]
    fn test_empty_and_loading_placeholders() {
        assert!(render(&RenderState::default()).contains("Loading..."));
        assert!(render(&loaded(vec![])).contains("No books yet"));
    }

    #[test]
    fn test_detail_popup_shows_all_fields() {
        let mut state = loaded(vec![book(5, "Dune", "Spice")]);
        state.dialog = DialogView::Detail(book(5, "Dune", "Spice"));
        let screen = render(&state);
        assert!(screen.contains("ID: 5"));
        assert!(screen.contains("Title: Dune"));
        assert!(screen.contains("CreatedAt: 2024-01-01"));
        assert!(screen.contains("UpdatedAt: 2024-01-02"));
    }

    #[test]
    fn test_editor_popup_shows_error_and_saving() {
        let mut editor = EditorDialog::open(EditorTarget::Existing(5), &book(5, "Dune", "Spice"));
        editor.error = Some(SAVE_FAILED_MESSAGE.to_string());

        let mut state = loaded(vec![book(5, "Dune", "Spice")]);
        state.dialog = DialogView::Editor(editor.clone());
        let screen = render(&state);
        assert!(screen.contains("Edit Book #5"));
        assert!(screen.contains(SAVE_FAILED_MESSAGE));
        assert!(screen.contains("Save"));

        editor.begin_save(1);
        state.dialog = DialogView::Editor(editor);
        assert!(render(&state).contains("Saving..."));
    }

    /// Symbol in the cell just left of the cursor
    fn char_before_cursor(terminal: &mut Terminal<TestBackend>) -> String {
        let cursor = terminal.get_cursor_position().unwrap();
        terminal.backend().buffer()[(cursor.x - 1, cursor.y)].symbol().to_string()
    }

    #[test]
    fn test_very_long_title_scrolls_to_cursor() {
        let title = format!("{}END", "x".repeat(65_531));
        let editor = EditorDialog::open(EditorTarget::Draft, &book(0, &title, ""));
        let mut state = loaded(vec![]);
        state.dialog = DialogView::Editor(editor);

        let mut terminal = draw_to_backend(&state);
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("xxEND"));

        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 100 && cursor.y < 30);
        assert_eq!(char_before_cursor(&mut terminal), "D");
    }

    #[test]
    fn test_body_scrolls_to_last_line() {
        let body: Vec<String> = (0..40).map(|i| format!("line {i}")).collect();
        let mut editor = EditorDialog::open(EditorTarget::Existing(5), &book(5, "Dune", &body.join("\n")));
        editor.next_field();
        let mut state = loaded(vec![]);
        state.dialog = DialogView::Editor(editor);

        let screen = render(&state);
        assert!(screen.contains("line 39"));
        assert!(!screen.contains("line 5"));
        assert_eq!(char_before_cursor(&mut draw_to_backend(&state)), "9");
    }

    #[test]
    fn test_field_viewport_stays_inside_field() {
        let area = Rect::new(10, 5, 20, 3);
        let (scroll, cursor) = field_viewport(area, 0, 4);
        assert_eq!(scroll, (0, 0));
        assert_eq!(cursor, Position::new(15, 6));

        let (scroll, cursor) = field_viewport(area, 0, usize::MAX);
        assert_eq!(scroll, (0, u16::MAX));
        assert_eq!(cursor, Position::new(28, 6));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert!(popup.x >= 20 && popup.right() <= 80);
        assert!(popup.y >= 10 && popup.bottom() <= 30);
    }
}
