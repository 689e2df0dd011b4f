use std::collections::VecDeque;
use std::fmt;

/// Identity of a page element. Handlers receive the triggering element
/// through this id instead of an ambient binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Btn1,
    Btn2,
    Btn3,
    Btn4,
    Btn5,
    Input1,
    Check1,
    Drop1,
    NameForm,
    FieldFirst,
    FieldMiddle,
    FieldLast,
    SubmitBtn,
}

impl ElementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::Btn1 => "btn1",
            ElementId::Btn2 => "btn2",
            ElementId::Btn3 => "btn3",
            ElementId::Btn4 => "btn4",
            ElementId::Btn5 => "btn5",
            ElementId::Input1 => "input1",
            ElementId::Check1 => "check1",
            ElementId::Drop1 => "drop1",
            ElementId::NameForm => "nameForm",
            ElementId::FieldFirst => "first",
            ElementId::FieldMiddle => "middle",
            ElementId::FieldLast => "last",
            ElementId::SubmitBtn => "submit",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buttons sharing one handler, registered in a loop.
pub const BUTTON_GROUP: [ElementId; 2] = [ElementId::Btn3, ElementId::Btn4];

#[derive(Debug, Default, Clone)]
pub struct TextField {
    pub value: String,
}

#[derive(Debug, Default, Clone)]
pub struct Checkbox {
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub struct Dropdown {
    options: Vec<String>,
    selected: usize,
}

impl Dropdown {
    pub fn new(options: &[&str]) -> Self {
        Self {
            options: options.iter().map(|s| s.to_string()).collect(),
            selected: 0,
        }
    }

    pub fn value(&self) -> &str {
        &self.options[self.selected]
    }

    pub fn cycle(&mut self) {
        self.selected = (self.selected + 1) % self.options.len();
    }
}

/// One table row under construction. Cells hold plain text verbatim,
/// markup-like input included.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn push_cell(&mut self, text: impl Into<String>) {
        self.cells.push(text.into());
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// Append-only table surface. Rows have no identity and cannot be removed,
/// short of the page-wide reset.
#[derive(Debug, Default)]
pub struct TableSurface {
    rows: Vec<Row>,
}

impl TableSurface {
    pub fn append_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    fn clear(&mut self) {
        self.rows.clear();
    }
}

/// Bounded scrollback for the demonstration output lines.
#[derive(Debug)]
pub struct Console {
    lines: VecDeque<String>,
    limit: usize,
}

impl Console {
    pub fn new(limit: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            limit,
        }
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > self.limit {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Every element the demo binds to, assembled once at startup and passed
/// around explicitly. Tests substitute their own instance.
#[derive(Debug)]
pub struct Page {
    pub input1: TextField,
    pub check1: Checkbox,
    pub drop1: Dropdown,
    pub first: TextField,
    pub middle: TextField,
    pub last: TextField,
    pub table: TableSurface,
    pub console: Console,
}

impl Page {
    pub fn new(console_limit: usize) -> Self {
        Self {
            input1: TextField::default(),
            check1: Checkbox::default(),
            drop1: Dropdown::new(&["dogs", "cats", "birds"]),
            first: TextField::default(),
            middle: TextField::default(),
            last: TextField::default(),
            table: TableSurface::default(),
            console: Console::new(console_limit),
        }
    }

    pub fn field(&self, id: ElementId) -> Option<&TextField> {
        match id {
            ElementId::Input1 => Some(&self.input1),
            ElementId::FieldFirst => Some(&self.first),
            ElementId::FieldMiddle => Some(&self.middle),
            ElementId::FieldLast => Some(&self.last),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, id: ElementId) -> Option<&mut TextField> {
        match id {
            ElementId::Input1 => Some(&mut self.input1),
            ElementId::FieldFirst => Some(&mut self.first),
            ElementId::FieldMiddle => Some(&mut self.middle),
            ElementId::FieldLast => Some(&mut self.last),
            _ => None,
        }
    }

    /// The environment's default reaction to a form submission: discard all
    /// page state, as a navigation would.
    pub fn reset(&mut self) {
        self.input1.value.clear();
        self.check1.checked = false;
        self.drop1.selected = 0;
        self.first.value.clear();
        self.middle.value.clear();
        self.last.value.clear();
        self.table.clear();
        self.console.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_cell_order() {
        let mut row = Row::default();
        row.push_cell("a");
        row.push_cell("");
        row.push_cell("c");
        assert_eq!(row.cells(), ["a", "", "c"]);
    }

    #[test]
    fn table_appends_after_existing_rows() {
        let mut table = TableSurface::default();
        let mut first = Row::default();
        first.push_cell("one");
        let mut second = Row::default();
        second.push_cell("two");
        table.append_row(first.clone());
        table.append_row(second.clone());
        assert_eq!(table.nrows(), 2);
        assert_eq!(table.rows(), [first, second]);
    }

    #[test]
    fn console_drops_oldest_lines_beyond_limit() {
        let mut console = Console::new(2);
        console.log("one");
        console.log("two");
        console.log("three");
        let lines: Vec<&str> = console.lines().collect();
        assert_eq!(lines, ["two", "three"]);
        assert_eq!(console.last(), Some("three"));
    }

    #[test]
    fn dropdown_cycles_through_all_options_and_wraps() {
        let mut drop = Dropdown::new(&["a", "b", "c"]);
        assert_eq!(drop.value(), "a");
        drop.cycle();
        assert_eq!(drop.value(), "b");
        drop.cycle();
        drop.cycle();
        assert_eq!(drop.value(), "a");
    }

    #[test]
    fn reset_discards_all_page_state() {
        let mut page = Page::new(10);
        page.input1.value = "typed".to_string();
        page.check1.checked = true;
        page.drop1.cycle();
        page.first.value = "Ada".to_string();
        let mut row = Row::default();
        row.push_cell("Ada");
        page.table.append_row(row);
        page.console.log("hello");

        page.reset();

        assert!(page.input1.value.is_empty());
        assert!(!page.check1.checked);
        assert_eq!(page.drop1.value(), "dogs");
        assert!(page.first.value.is_empty());
        assert_eq!(page.table.nrows(), 0);
        assert_eq!(page.console.last(), None);
    }
}
