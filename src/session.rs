use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    DefaultTerminal, Frame,
};

use crate::categories::{self, CATEGORIES};
use crate::error::Result;
use crate::fmt::{money, today_string};
use crate::ledger::{AddError, Ledger};
use crate::tui::{self, FOOTER_STYLE, FRESH_STYLE, HEADER_STYLE, SELECTED_STYLE};
use crate::xlsx;

const PAGE_SIZE: usize = 20;
const CURSOR: char = '\u{2588}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Amount,
    Description,
    Category,
    Date,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Amount => FormField::Description,
            FormField::Description => FormField::Category,
            FormField::Category => FormField::Date,
            FormField::Date => FormField::Amount,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Amount => FormField::Date,
            FormField::Description => FormField::Amount,
            FormField::Category => FormField::Description,
            FormField::Date => FormField::Category,
        }
    }

    /// The field to send the cursor back to after a rejected submission.
    fn for_error(reason: AddError) -> Self {
        match reason {
            AddError::MissingAmount | AddError::InvalidAmount => FormField::Amount,
            AddError::MissingDescription => FormField::Description,
            AddError::MissingCategory => FormField::Category,
        }
    }
}

/// Entry form state. A fresh form starts on the amount field with the date
/// pre-filled to today; it is rebuilt from scratch after every successful
/// add, which is what resets the fields to their defaults.
struct AddForm {
    field: FormField,
    amount: String,
    description: String,
    category_query: String,
    category_choice: Option<usize>,
    category_selection: usize,
    date: String,
}

impl AddForm {
    fn new() -> Self {
        Self {
            field: FormField::Amount,
            amount: String::new(),
            description: String::new(),
            category_query: String::new(),
            category_choice: None,
            category_selection: 0,
            date: today_string(),
        }
    }

    fn matches(&self) -> Vec<(usize, &'static str)> {
        categories::filter(&self.category_query)
    }

    fn category_name(&self) -> &'static str {
        self.category_choice.map(|i| CATEGORIES[i]).unwrap_or("")
    }

    fn push_char(&mut self, c: char) {
        match self.field {
            FormField::Amount => self.amount.push(c),
            FormField::Description => self.description.push(c),
            FormField::Category => {
                self.category_query.push(c);
                self.category_selection = 0;
                self.category_choice = None;
            }
            FormField::Date => self.date.push(c),
        }
    }

    fn backspace(&mut self) {
        match self.field {
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::Category => {
                self.category_query.pop();
                self.category_selection = 0;
                self.category_choice = None;
            }
            FormField::Date => {
                self.date.pop();
            }
        }
    }
}

enum SessionMode {
    Normal,
    AddForm(AddForm),
}

pub enum SessionAction {
    Continue,
    Close,
}

/// Full-screen session view: summary line, expense table (newest first),
/// entry form, status and key hints. Owns the ledger for the lifetime of
/// the session.
pub struct SessionView {
    ledger: Ledger,
    export_dir: PathBuf,
    mode: SessionMode,
    selected: usize,
    offset: usize,
    visible_count: usize,
    status: Option<String>,
    fresh_id: Option<String>,
}

impl SessionView {
    pub fn new(ledger: Ledger, export_dir: PathBuf) -> Self {
        Self {
            ledger,
            export_dir,
            mode: SessionMode::Normal,
            selected: 0,
            offset: 0,
            visible_count: PAGE_SIZE,
            status: None,
            fresh_id: None,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn run(&mut self) -> Result<()> {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            ratatui::restore();
            hook(info);
        }));

        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        return Ok(());
                    }
                    if let SessionAction::Close = self.handle_key(key.code) {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> SessionAction {
        // Both are one-keypress transients.
        self.fresh_id = None;
        self.status = None;

        if matches!(self.mode, SessionMode::Normal) {
            self.handle_normal_key(code)
        } else {
            self.handle_form_key(code);
            SessionAction::Continue
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> SessionAction {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return SessionAction::Close,
            KeyCode::Char('a') => self.mode = SessionMode::AddForm(AddForm::new()),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            _ => {}
        }
        SessionAction::Continue
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let SessionMode::AddForm(form) = &mut self.mode else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.mode = SessionMode::Normal;
                self.status = Some("Add cancelled.".to_string());
            }
            KeyCode::Tab => form.field = form.field.next(),
            KeyCode::BackTab => form.field = form.field.prev(),
            KeyCode::Enter => match form.field {
                FormField::Amount => form.field = FormField::Description,
                FormField::Description => form.field = FormField::Category,
                FormField::Category => {
                    if let Some(&(idx, _)) = form.matches().get(form.category_selection) {
                        form.category_choice = Some(idx);
                        form.field = FormField::Date;
                    } else {
                        self.status = Some("No matching category.".to_string());
                    }
                }
                FormField::Date => {
                    match self.ledger.add(
                        &form.amount,
                        &form.description,
                        form.category_name(),
                        &form.date,
                    ) {
                        Ok(expense) => {
                            self.status = Some(format!(
                                "Added {} {}",
                                expense.description,
                                money(expense.amount)
                            ));
                            self.fresh_id = Some(expense.id);
                            self.selected = 0;
                            self.offset = 0;
                            self.mode = SessionMode::Normal;
                        }
                        Err(reason) => {
                            form.field = FormField::for_error(reason);
                            self.status = Some(format!("Not added: {reason}"));
                        }
                    }
                }
            },
            KeyCode::Up => {
                if form.field == FormField::Category {
                    form.category_selection = form.category_selection.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if form.field == FormField::Category {
                    let last = form.matches().len().saturating_sub(1);
                    form.category_selection = (form.category_selection + 1).min(last);
                }
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.push_char(c),
            _ => {}
        }
    }

    /// Map a view row (0 = newest) back to its record. Records are stored
    /// in entry order; the table displays them newest first.
    fn row_record(&self, view_idx: usize) -> Option<&crate::models::Expense> {
        let records = self.ledger.records();
        let n = records.len();
        if view_idx < n {
            Some(&records[n - 1 - view_idx])
        } else {
            None
        }
    }

    fn move_selection(&mut self, delta: i64) {
        let n = self.ledger.count();
        if n == 0 {
            return;
        }
        self.selected = (self.selected as i64 + delta).clamp(0, n as i64 - 1) as usize;
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.visible_count {
            self.offset = self.selected + 1 - self.visible_count;
        }
    }

    fn delete_selected(&mut self) {
        let Some(record) = self.row_record(self.selected) else {
            self.status = Some("Nothing to delete.".to_string());
            return;
        };
        let (id, description) = (record.id.clone(), record.description.clone());
        self.ledger.delete(&id);
        self.status = Some(format!("Deleted {description}"));
        self.selected = self.selected.min(self.ledger.count().saturating_sub(1));
        if self.ledger.is_empty() {
            self.offset = 0;
        }
    }

    /// Export the current snapshot. The empty-ledger guard lives here in
    /// the view, not in the exporter: an empty workbook is valid, there is
    /// just no point writing one.
    fn export(&mut self) {
        if self.ledger.is_empty() {
            self.status = Some("Nothing to export, add an expense first.".to_string());
            return;
        }
        let snapshot = self.ledger.snapshot();
        match xlsx::export(&snapshot, &self.export_dir) {
            Ok(path) => self.status = Some(format!("Wrote {}", path.display())),
            Err(e) => self.status = Some(format!("Export failed: {e}")),
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let form_height: u16 = match &self.mode {
            SessionMode::AddForm(form) => {
                let matches = if form.field == FormField::Category {
                    form.matches().len().min(9)
                } else {
                    0
                };
                5 + matches as u16
            }
            SessionMode::Normal => 0,
        };

        let [title_area, summary_area, table_area, form_area, status_area, keys_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(form_height),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new("quid \u{00b7} expense session").style(HEADER_STYLE),
            title_area,
        );
        self.draw_summary(frame, summary_area);
        self.draw_table(frame, table_area);
        if let SessionMode::AddForm(form) = &self.mode {
            draw_form(form, frame, form_area);
        }

        frame.render_widget(
            Paragraph::new(self.status.as_deref().unwrap_or(""))
                .style(Style::new().fg(Color::Yellow)),
            status_area,
        );

        let hints = match self.mode {
            SessionMode::Normal => "a add \u{00b7} d delete \u{00b7} e export \u{00b7} \u{2191}/\u{2193} move \u{00b7} q quit",
            SessionMode::AddForm(_) => "Enter next/save \u{00b7} Tab next \u{00b7} Shift-Tab back \u{00b7} Esc cancel",
        };
        frame.render_widget(Paragraph::new(hints).style(FOOTER_STYLE), keys_area);
    }

    fn draw_summary(&self, frame: &mut Frame, area: Rect) {
        let n = self.ledger.count();
        let noun = if n == 1 { "expense" } else { "expenses" };
        let line = Line::from(vec![
            Span::raw(format!("{n} {noun} \u{00b7} ")),
            Span::styled(
                money(self.ledger.total()),
                Style::new().add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_table(&mut self, frame: &mut Frame, area: Rect) {
        if self.ledger.is_empty() {
            frame.render_widget(
                Paragraph::new("No expenses recorded yet. Press a to add one.")
                    .style(FOOTER_STYLE),
                area,
            );
            return;
        }

        // Date + category + amount columns are fixed; description takes the
        // rest and wraps.
        let desc_width = area.width.saturating_sub(43).max(10) as usize;
        let available_height = area.height.saturating_sub(2) as usize;

        let records = self.ledger.records();
        let n = records.len();
        let mut rows: Vec<Row> = Vec::new();
        let mut used = 0usize;
        let mut vis = 0usize;

        for view_idx in self.offset..n {
            let rec = &records[n - 1 - view_idx];
            let (wrapped, line_count) = tui::wrap_text(&rec.description, desc_width);
            let h = line_count as usize;
            if used + h > available_height && vis > 0 {
                break;
            }

            let style = if self.fresh_id.as_deref() == Some(rec.id.as_str()) {
                FRESH_STYLE
            } else if view_idx == self.selected {
                SELECTED_STYLE
            } else {
                Style::new()
            };

            rows.push(
                Row::new(vec![
                    Cell::from(rec.date.clone()),
                    Cell::from(wrapped),
                    Cell::from(rec.category.clone()),
                    Cell::from(tui::money_span(rec.amount)),
                ])
                .height(line_count)
                .style(style),
            );
            used += h;
            vis += 1;
        }
        self.visible_count = vis.max(1);

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Fill(1),
                Constraint::Length(18),
                Constraint::Length(12),
            ],
        )
        .header(
            Row::new(vec!["Date", "Description", "Category", "Amount"])
                .style(HEADER_STYLE)
                .bottom_margin(1),
        )
        .column_spacing(1);
        frame.render_widget(table, area);
    }
}

fn draw_form(form: &AddForm, frame: &mut Frame, area: Rect) {
    let field_line = |label: &str, value: &str, active: bool| {
        if active {
            Line::from(format!("  {label} {value}{CURSOR}"))
        } else {
            Line::from(format!("  {label} {value}"))
        }
    };

    let category_shown = if form.category_choice.is_some() {
        form.category_name()
    } else {
        form.category_query.as_str()
    };

    let mut lines: Vec<Line> = vec![
        Line::styled("Add expense", HEADER_STYLE),
        field_line("Amount:     ", &form.amount, form.field == FormField::Amount),
        field_line(
            "Description:",
            &form.description,
            form.field == FormField::Description,
        ),
        field_line(
            "Category:   ",
            category_shown,
            form.field == FormField::Category,
        ),
        field_line("Date:       ", &form.date, form.field == FormField::Date),
    ];

    if form.field == FormField::Category {
        for (pos, (_, name)) in form.matches().into_iter().take(9).enumerate() {
            let (marker, style) = if pos == form.category_selection {
                ('\u{25b8}', SELECTED_STYLE)
            } else {
                (' ', FOOTER_STYLE)
            };
            lines.push(Line::styled(format!("    {marker} {name}"), style));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_view() -> (tempfile::TempDir, SessionView) {
        let dir = tempfile::tempdir().unwrap();
        let view = SessionView::new(Ledger::new(), dir.path().to_path_buf());
        (dir, view)
    }

    fn seeded_view() -> (tempfile::TempDir, SessionView) {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = Ledger::new();
        ledger
            .add("12.50", "Coffee", "Food & Dining", "2024-01-15")
            .unwrap();
        ledger
            .add("40.00", "Gas", "Transportation", "2024-01-16")
            .unwrap();
        let view = SessionView::new(ledger, dir.path().to_path_buf());
        (dir, view)
    }

    fn type_text(view: &mut SessionView, text: &str) {
        for c in text.chars() {
            view.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn table_displays_newest_first() {
        let (_dir, view) = seeded_view();
        assert_eq!(view.row_record(0).unwrap().description, "Gas");
        assert_eq!(view.row_record(1).unwrap().description, "Coffee");
        assert!(view.row_record(2).is_none());
    }

    #[test]
    fn form_flow_adds_expense_and_resets() {
        let (_dir, mut view) = test_view();
        view.handle_key(KeyCode::Char('a'));
        type_text(&mut view, "7.25");
        view.handle_key(KeyCode::Enter);
        type_text(&mut view, "Bus ticket");
        view.handle_key(KeyCode::Enter);
        type_text(&mut view, "transp");
        view.handle_key(KeyCode::Enter); // picks Transportation
        view.handle_key(KeyCode::Enter); // date pre-filled with today, submit

        assert_eq!(view.ledger().count(), 1);
        let rec = &view.ledger().records()[0];
        assert_eq!(rec.description, "Bus ticket");
        assert_eq!(rec.category, "Transportation");
        assert_eq!(rec.date, today_string());
        assert!(matches!(view.mode, SessionMode::Normal));
        assert_eq!(view.fresh_id.as_deref(), Some(rec.id.as_str()));
        assert!(view.status.as_deref().unwrap().starts_with("Added"));
    }

    #[test]
    fn rejected_submission_keeps_ledger_and_form() {
        let (_dir, mut view) = test_view();
        view.handle_key(KeyCode::Char('a'));
        view.handle_key(KeyCode::Enter); // empty amount, advance anyway
        type_text(&mut view, "Lunch");
        view.handle_key(KeyCode::Enter);
        type_text(&mut view, "food");
        view.handle_key(KeyCode::Enter);
        view.handle_key(KeyCode::Enter); // submit

        assert_eq!(view.ledger().count(), 0);
        assert_eq!(
            view.status.as_deref(),
            Some("Not added: amount is required")
        );
        // Cursor jumps back to the offending field; entered values survive.
        let SessionMode::AddForm(form) = &view.mode else {
            panic!("form should stay open");
        };
        assert_eq!(form.field, FormField::Amount);
        assert_eq!(form.description, "Lunch");
    }

    #[test]
    fn category_step_requires_a_match() {
        let (_dir, mut view) = test_view();
        view.handle_key(KeyCode::Char('a'));
        view.handle_key(KeyCode::Tab);
        view.handle_key(KeyCode::Tab); // on Category
        type_text(&mut view, "zzz");
        view.handle_key(KeyCode::Enter);
        assert_eq!(view.status.as_deref(), Some("No matching category."));
        let SessionMode::AddForm(form) = &view.mode else {
            panic!("form should stay open");
        };
        assert_eq!(form.field, FormField::Category);
    }

    #[test]
    fn delete_clamps_selection() {
        let (_dir, mut view) = seeded_view();
        view.selected = 1;
        view.handle_key(KeyCode::Char('d'));
        assert_eq!(view.ledger().count(), 1);
        assert_eq!(view.selected, 0);
        assert_eq!(view.ledger().records()[0].description, "Gas");
    }

    #[test]
    fn export_empty_is_a_guarded_noop() {
        let (dir, mut view) = test_view();
        view.handle_key(KeyCode::Char('e'));
        assert!(view
            .status
            .as_deref()
            .unwrap()
            .starts_with("Nothing to export"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn export_writes_workbook() {
        let (dir, mut view) = seeded_view();
        view.handle_key(KeyCode::Char('e'));
        assert!(view.status.as_deref().unwrap().starts_with("Wrote"));
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(entries, vec![xlsx::export_filename()]);
    }

    #[test]
    fn fresh_highlight_clears_on_next_key() {
        let (_dir, mut view) = test_view();
        view.handle_key(KeyCode::Char('a'));
        type_text(&mut view, "5");
        view.handle_key(KeyCode::Enter);
        type_text(&mut view, "Snack");
        view.handle_key(KeyCode::Enter);
        view.handle_key(KeyCode::Enter); // empty query matches all, picks first
        view.handle_key(KeyCode::Enter);
        assert!(view.fresh_id.is_some());
        view.handle_key(KeyCode::Down);
        assert!(view.fresh_id.is_none());
    }
}
