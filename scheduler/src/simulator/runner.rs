use super::display::DisplayTerminal;
use crate::scheduler::Comparison;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    Quit,
    Next,
    Previous,
    Select(usize),
    None,
}

/// Which run the viewer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    selected: usize,
    count: usize,
}

impl Selection {
    pub fn new(count: usize) -> Self {
        Self { selected: 0, count }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    // Returns false if the viewer should quit
    pub fn apply(&mut self, event: ViewerEvent) -> bool {
        match event {
            ViewerEvent::Quit => return false,
            ViewerEvent::Next if self.count > 0 => {
                self.selected = (self.selected + 1) % self.count;
            }
            ViewerEvent::Previous if self.count > 0 => {
                self.selected = (self.selected + self.count - 1) % self.count;
            }
            ViewerEvent::Select(index) if index < self.count => self.selected = index,
            _ => {}
        }
        true
    }
}

pub struct ResultViewer {
    terminal: DisplayTerminal,
    comparison: Comparison,
    selection: Selection,
}

impl ResultViewer {
    pub fn new(comparison: Comparison) -> Result<Self> {
        let terminal = DisplayTerminal::new()?;
        let selection = Selection::new(comparison.results.len());

        Ok(Self {
            terminal,
            comparison,
            selection,
        })
    }

    // Returns false if the viewer should quit
    pub fn run(&mut self) -> Result<bool> {
        self.terminal
            .draw(&self.comparison, self.selection.selected())?;
        let event = self.terminal.get_input();
        Ok(self.selection.apply(event))
    }
}
