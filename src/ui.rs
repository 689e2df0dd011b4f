use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table},
};

use crate::domain::HELP_TEXT;
use crate::model::Model;
use crate::page::ElementId;

pub const BUTTON_ROW_HEIGHT: u16 = 1;
pub const WIDGET_ROW_HEIGHT: u16 = 1;
pub const FORM_HEIGHT: u16 = 6;
pub const CONSOLE_HEIGHT: u16 = 8;
pub const STATUSLINE_HEIGHT: u16 = 1;

// Label prefixes rendered in front of editable values, the cursor offset
// depends on them.
const FIELD_LABEL_WIDTH: u16 = 9;
const INPUT1_LABEL_WIDTH: u16 = 8;

const BUTTONS: [ElementId; 5] = [
    ElementId::Btn1,
    ElementId::Btn2,
    ElementId::Btn3,
    ElementId::Btn4,
    ElementId::Btn5,
];

pub struct RosterUI;

impl RosterUI {
    pub fn new() -> Self {
        Self
    }

    pub fn draw(&self, model: &Model, frame: &mut Frame) {
        let title = Line::from(" roster ".bold());
        let instructions = Line::from(vec![
            " Focus ".into(),
            "<Tab>".blue().bold(),
            " Activate ".into(),
            "<Enter>".blue().bold(),
            " Copy ".into(),
            "<Y>".blue().bold(),
            " Help ".into(),
            "<H>".blue().bold(),
            " Quit ".into(),
            "<Q> ".blue().bold(),
        ]);
        let outer = Block::bordered()
            .title(title.centered())
            .title_bottom(instructions.centered())
            .border_set(border::THICK);
        let inner = outer.inner(frame.area());
        frame.render_widget(outer, frame.area());

        let [buttons, widgets, form, table, console, status] = Layout::vertical([
            Constraint::Length(BUTTON_ROW_HEIGHT),
            Constraint::Length(WIDGET_ROW_HEIGHT),
            Constraint::Length(FORM_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(CONSOLE_HEIGHT),
            Constraint::Length(STATUSLINE_HEIGHT),
        ])
        .areas(inner);

        self.draw_buttons(model, frame, buttons);
        self.draw_widgets(model, frame, widgets);
        self.draw_form(model, frame, form);
        self.draw_table(model, frame, table);
        self.draw_console(model, frame, console);
        self.draw_status(model, frame, status);

        if model.show_help() {
            self.draw_help(frame);
        }
    }

    fn draw_buttons(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();
        for id in BUTTONS {
            spans.push(Self::element_span(format!("[ {id} ]"), model.focused() == id));
            spans.push("  ".into());
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_widgets(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let page = model.page();
        let [input_area, check_area, drop_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(14),
            Constraint::Length(24),
        ])
        .areas(area);

        let input_focused = model.focused() == ElementId::Input1;
        let input_line = Line::from(vec![
            "input1: ".into(),
            Self::element_span(page.input1.value.clone(), input_focused),
        ]);
        frame.render_widget(Paragraph::new(input_line), input_area);
        if input_focused {
            self.place_cursor(model, frame, input_area, INPUT1_LABEL_WIDTH);
        }

        let check = format!("[{}] check1", if page.check1.checked { "x" } else { " " });
        frame.render_widget(
            Paragraph::new(Self::element_span(check, model.focused() == ElementId::Check1)),
            check_area,
        );

        let drop = format!("drop1: < {} >", page.drop1.value());
        frame.render_widget(
            Paragraph::new(Self::element_span(drop, model.focused() == ElementId::Drop1)),
            drop_area,
        );
    }

    fn draw_form(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let page = model.page();
        let block = Block::bordered().title(" nameForm ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let fields = [
            (ElementId::FieldFirst, &page.first),
            (ElementId::FieldMiddle, &page.middle),
            (ElementId::FieldLast, &page.last),
        ];
        let mut lines: Vec<Line> = Vec::new();
        for (id, field) in fields {
            let focused = model.focused() == id;
            lines.push(Line::from(vec![
                format!("{:>7}: ", id.as_str()).into(),
                Self::element_span(field.value.clone(), focused),
            ]));
        }
        lines.push(Line::from(Self::element_span(
            "[ Submit ]".to_string(),
            model.focused() == ElementId::SubmitBtn,
        )));
        frame.render_widget(Paragraph::new(lines), inner);

        let field_index = fields
            .iter()
            .position(|(id, _)| model.focused() == *id);
        if let Some(idx) = field_index {
            let line_area = Rect {
                y: inner.y + idx as u16,
                height: 1,
                ..inner
            };
            self.place_cursor(model, frame, line_area, FIELD_LABEL_WIDTH);
        }
    }

    fn draw_table(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let page = model.page();
        let header =
            Row::new(["first", "middle", "last"]).style(Style::new().bold());
        let rows = page.table.rows().iter().map(|row| {
            Row::new(row.cells().iter().map(|cell| Cell::from(cell.as_str())))
        });
        let widths = [
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::bordered().title(" table "));
        frame.render_widget(table, area);
    }

    fn draw_console(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().title(" console ");
        let inner_height = block.inner(area).height as usize;
        let mut lines: Vec<Line> = model
            .page()
            .console
            .lines()
            .rev()
            .take(inner_height)
            .map(Line::from)
            .collect();
        lines.reverse();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_status(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let message = if model.status_message_age().as_secs() > 5 {
            model.status_message().dim()
        } else {
            model.status_message().yellow()
        };
        let line = Line::from(vec![
            message,
            format!("  |  rows: {}", model.page().table.nrows()).into(),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_help(&self, frame: &mut Frame) {
        let area = Self::popup_area(frame.area(), 60, 70);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(HELP_TEXT).block(Block::bordered().title(" help ")),
            area,
        );
    }

    fn place_cursor(&self, model: &Model, frame: &mut Frame, line_area: Rect, label_width: u16) {
        let curser_pos = model.input_state().curser_pos as u16;
        let x = (line_area.x + label_width + curser_pos).min(line_area.right().saturating_sub(1));
        frame.set_cursor_position(Position { x, y: line_area.y });
    }

    fn element_span(label: String, focused: bool) -> Span<'static> {
        if focused { label.reversed() } else { label.into() }
    }

    fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
        let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
            .flex(Flex::Center)
            .areas(area);
        area
    }
}

impl Default for RosterUI {
    fn default() -> Self {
        Self::new()
    }
}
