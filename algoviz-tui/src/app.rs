use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::{debug, info};

use algoviz_core::SortAlgorithm;

use crate::config::AppConfig;
use crate::controls::{self, Action, Button, ControlBar};
use crate::event::{AppEvent, EventBus};
use crate::panels::{GraphPanel, SortPanel};

/// Upper bound on how long the loop waits for input
const FRAME: Duration = Duration::from_millis(50);
/// How long a status message stays up
const MESSAGE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Sorting,
    Graph,
}

impl Panel {
    pub const ALL: [Panel; 2] = [Panel::Sorting, Panel::Graph];

    pub fn title(&self) -> &'static str {
        match self {
            Panel::Sorting => "Sorting",
            Panel::Graph => "Graph Traversal",
        }
    }

    fn next(&self) -> Self {
        match self {
            Panel::Sorting => Panel::Graph,
            Panel::Graph => Panel::Sorting,
        }
    }
}

/// Screen regions from the last draw, used for mouse hit testing
#[derive(Debug, Clone, Copy, Default)]
struct Regions {
    tabs: Rect,
    body: Rect,
    controls: Rect,
    status: Rect,
}

impl Regions {
    fn split(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Panel selector
                Constraint::Min(5),    // Canvas
                Constraint::Length(1), // Buttons
                Constraint::Length(1), // Status line
            ])
            .split(area);
        Self {
            tabs: chunks[0],
            body: chunks[1],
            controls: chunks[2],
            status: chunks[3],
        }
    }
}

/// Map a key press to an action for the visible panel
pub fn map_key(panel: Panel, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Tab => {
            let next = panel.next();
            return Panel::ALL.iter().position(|p| *p == next).map(Action::SelectPanel);
        }
        _ => {}
    }

    match (panel, key.code) {
        (Panel::Sorting, KeyCode::Char('+') | KeyCode::Char('=')) => Some(Action::NextSize),
        (Panel::Sorting, KeyCode::Char('-')) => Some(Action::PrevSize),
        (Panel::Sorting, KeyCode::Char('b')) => Some(Action::Sort(SortAlgorithm::Bubble)),
        (Panel::Sorting, KeyCode::Char('s')) => Some(Action::Sort(SortAlgorithm::Selection)),
        (Panel::Sorting, KeyCode::Char('i')) => Some(Action::Sort(SortAlgorithm::Insertion)),
        (Panel::Sorting, KeyCode::Char('m')) => Some(Action::Sort(SortAlgorithm::Merge)),
        (Panel::Sorting, KeyCode::Char('k')) => Some(Action::Sort(SortAlgorithm::Quick)),
        (Panel::Sorting, KeyCode::Char('x')) => Some(Action::StopSort),
        (Panel::Sorting, KeyCode::Char('r')) => Some(Action::ResetArray),
        (Panel::Graph, KeyCode::Char('t')) => Some(Action::ToggleMethod),
        (Panel::Graph, KeyCode::Enter) => Some(Action::StartTraversal),
        (Panel::Graph, KeyCode::Char('u')) => Some(Action::ReuseGraph),
        (Panel::Graph, KeyCode::Char('r')) => Some(Action::ResetGraph),
        _ => None,
    }
}

/// Main TUI application
pub struct App {
    sort: SortPanel,
    graph: GraphPanel,
    bus: EventBus,
    panel: Panel,
    regions: Regions,
    message: Option<(String, Instant)>,
    dirty: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let bus = EventBus::new();
        Ok(Self {
            sort: SortPanel::new(config, bus.sender())?,
            graph: GraphPanel::new(config, bus.sender()),
            bus,
            panel: Panel::Sorting,
            regions: Regions::default(),
            message: None,
            dirty: true,
            should_quit: false,
        })
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the application until the user quits
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("tui started");
        while !self.should_quit {
            if self.dirty {
                terminal.draw(|f| self.draw(f))?;
                self.dirty = false;
            }

            let timeout = self
                .graph
                .time_until_tick()
                .map_or(FRAME, |due| due.min(FRAME));
            if event::poll(timeout)? {
                self.handle_event(event::read()?)?;
            }
            self.update();
        }
        info!("tui stopped");
        Ok(())
    }

    /// Timers, background events and message expiry
    pub fn update(&mut self) {
        if self.graph.tick() {
            self.dirty = true;
        }
        self.sort.poll();
        for event in self.bus.drain() {
            match event {
                AppEvent::Redraw => {}
                AppEvent::Status(text) => self.message = Some((text, Instant::now())),
            }
            self.dirty = true;
        }
        if self
            .message
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() >= MESSAGE_TIMEOUT)
        {
            self.message = None;
            self.dirty = true;
        }
    }

    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                if let Some(action) = map_key(self.panel, key) {
                    self.apply(action)?;
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse)?,
            Event::Resize(..) => self.dirty = true,
            _ => {}
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(());
        }
        let (column, row) = (mouse.column, mouse.row);
        let clicked = controls::hit_test(self.regions.tabs, &self.tab_buttons(), column, row)
            .or_else(|| controls::hit_test(self.regions.controls, &self.buttons(), column, row));
        if let Some(action) = clicked {
            return self.apply(action);
        }
        if self.panel == Panel::Graph && self.graph.click(column, row) {
            self.dirty = true;
        }
        Ok(())
    }

    fn apply(&mut self, action: Action) -> Result<()> {
        debug!(?action, panel = ?self.panel, "action");
        self.dirty = true;
        match action {
            Action::Quit => self.should_quit = true,
            Action::SelectPanel(index) => {
                if let Some(panel) = Panel::ALL.get(index) {
                    self.panel = *panel;
                }
            }
            other => {
                if !self.sort.handle(other)? {
                    self.graph.handle(other);
                }
            }
        }
        Ok(())
    }

    fn tab_buttons(&self) -> Vec<Button> {
        Panel::ALL
            .iter()
            .enumerate()
            .map(|(i, panel)| {
                Button::new(panel.title(), Action::SelectPanel(i)).active(*panel == self.panel)
            })
            .collect()
    }

    fn buttons(&self) -> Vec<Button> {
        match self.panel {
            Panel::Sorting => self.sort.buttons(),
            Panel::Graph => self.graph.buttons(),
        }
    }

    fn status_line(&self) -> String {
        let base = match self.panel {
            Panel::Sorting => self.sort.status(),
            Panel::Graph => self.graph.status(),
        };
        match &self.message {
            Some((text, _)) => format!(" {base} | {text} "),
            None => format!(" {base} | Tab: switch panel, q: quit "),
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, frame: &mut Frame) {
        self.regions = Regions::split(frame.area());

        frame.render_widget(ControlBar::new(&self.tab_buttons()), self.regions.tabs);
        match self.panel {
            Panel::Sorting => self.sort.draw(frame, self.regions.body),
            Panel::Graph => self.graph.draw(frame, self.regions.body),
        }
        frame.render_widget(ControlBar::new(&self.buttons()), self.regions.controls);
        frame.render_widget(
            Paragraph::new(self.status_line())
                .style(Style::default().bg(Color::DarkGray).fg(Color::White)),
            self.regions.status,
        );
    }
}

/// Setup terminal
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("failed to create terminal")
}

/// Restore terminal
pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI application
pub fn run_tui(config: &AppConfig) -> Result<()> {
    let app = App::new(config)?;
    let mut terminal = setup_terminal()?;
    let res = app.run(&mut terminal);
    restore_terminal(&mut terminal)?;
    res
}
