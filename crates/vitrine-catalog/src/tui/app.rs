//! Main application state and event loop

use super::input::TextInput;
use super::loader::{spawn_loader, LoadEvent};
use super::ui;
use crate::browser::Browser;
use crate::config::VitrineConfig;
use crate::detail::{Navigator, SystemNavigator};
use crate::model::ProductId;
use crate::render::{ListChange, RenderUpdate};
use crate::source::CatalogSource;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Position, Rect},
    widgets::ListState,
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

/// Toast notification state
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
    pub is_error: bool,
}

impl Toast {
    pub fn new(message: String, duration: Duration) -> Self {
        Self {
            message,
            expires_at: Instant::now() + duration,
            is_error: false,
        }
    }

    pub fn error(message: String, duration: Duration) -> Self {
        Self {
            message,
            expires_at: Instant::now() + duration,
            is_error: true,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Catalog load state
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading { started_at: Instant },
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Cards,
}

/// Clickable regions recorded during the last render
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    pub search: Option<Rect>,
    pub search_button: Option<Rect>,
    pub clear: Option<Rect>,
    pub cards: Vec<(Rect, usize)>,
    pub load_more: Option<Rect>,
    pub modal: Option<Rect>,
    pub modal_close: Option<Rect>,
    pub modal_action: Option<Rect>,
}

fn hit(rect: Option<Rect>, pos: Position) -> bool {
    rect.is_some_and(|r| r.contains(pos))
}

/// Application state
pub struct App {
    pub browser: Browser,
    /// Search input
    pub input: TextInput,
    pub focus: Focus,
    /// Card list selection + scroll
    pub list_state: ListState,
    pub load_state: LoadState,
    pub toast: Option<Toast>,
    pub should_quit: bool,
    pub hits: HitMap,
    /// Shown in the status bar
    pub source_label: String,
    navigator: Box<dyn Navigator>,
    load_rx: Receiver<LoadEvent>,
}

impl App {
    pub fn new(
        browser: Browser,
        navigator: Box<dyn Navigator>,
        load_rx: Receiver<LoadEvent>,
        source_label: String,
    ) -> Self {
        Self {
            browser,
            input: TextInput::new(),
            focus: Focus::Search,
            list_state: ListState::default(),
            load_state: LoadState::Loading {
                started_at: Instant::now(),
            },
            toast: None,
            should_quit: false,
            hits: HitMap::default(),
            source_label,
            navigator,
            load_rx,
        }
    }

    /// Poll the loader thread (non-blocking)
    pub fn poll_loader(&mut self) {
        while let Ok(event) = self.load_rx.try_recv() {
            match event {
                LoadEvent::Loaded { catalog, report } => {
                    if let Some(update) = self.browser.load_catalog(catalog) {
                        self.on_list_update(&update);
                    }
                    self.load_state = LoadState::Ready;
                    if !report.is_clean() {
                        self.toast = Some(Toast::error(
                            format!(
                                "Loaded {} products, skipped {} malformed records",
                                report.accepted,
                                report.rejected.len()
                            ),
                            Duration::from_secs(5),
                        ));
                    }
                }
                LoadEvent::Failed(e) => {
                    self.toast = Some(Toast::error(
                        format!("Failed to load catalog: {}", e),
                        Duration::from_secs(8),
                    ));
                    self.load_state = LoadState::Failed(e);
                }
            }
        }
    }

    /// Run the debounced search once its window has elapsed
    pub fn tick(&mut self, now: Instant) {
        if let Some(update) = self.browser.tick(now) {
            self.on_list_update(&update);
        }
    }

    fn on_list_update(&mut self, update: &RenderUpdate) {
        match update.change {
            ListChange::Replace(_) => self.list_state.select(Some(0)),
            ListChange::NoResults(_) => self.list_state.select(None),
            ListChange::Append(_) => {}
        }
    }

    /// Clear expired toast
    fn update_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn selected_id(&self) -> Option<ProductId> {
        let index = self.list_state.selected()?;
        self.browser.list().cards().get(index).map(|c| c.id)
    }

    fn select_prev(&mut self) {
        let current = self.list_state.selected().unwrap_or(0);
        if current > 0 {
            self.list_state.select(Some(current - 1));
        }
    }

    fn select_next(&mut self) {
        let len = self.browser.list().cards().len();
        let current = self.list_state.selected().unwrap_or(0);
        if len > 0 && current + 1 < len {
            self.list_state.select(Some(current + 1));
        }
    }

    fn search_now(&mut self) {
        if let Some(update) = self.browser.search() {
            self.on_list_update(&update);
        }
    }

    fn clear_search(&mut self) {
        self.input.clear();
        if let Some(update) = self.browser.clear() {
            self.on_list_update(&update);
        }
        self.focus = Focus::Search;
    }

    fn load_more(&mut self) {
        let before = self.browser.list().cards().len();
        if self.browser.load_more().is_some() {
            self.list_state.select(Some(before));
        }
    }

    fn view_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.view_more(id);
        }
    }

    fn view_more(&mut self, id: ProductId) {
        if let Err(e) = self.browser.view_more(id) {
            self.toast = Some(Toast::error(e.to_string(), Duration::from_secs(3)));
        }
    }

    fn download(&mut self) {
        match self.browser.trigger_download(self.navigator.as_ref()) {
            Ok(true) => {
                self.toast = Some(Toast::new(
                    self.browser.labels().downloading.clone(),
                    Duration::from_secs(2),
                ));
            }
            Ok(false) => {}
            Err(e) => {
                self.toast = Some(Toast::error(e.to_string(), Duration::from_secs(5)));
            }
        }
    }

    /// Handle input event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.browser.detail().is_open() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('x') => self.browser.close_detail(),
                KeyCode::Enter | KeyCode::Char('d') => self.download(),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.should_quit = true
                }
                _ => {}
            }
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => self.should_quit = true,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.should_quit = true,
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => self.clear_search(),
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => {
                self.focus = match self.focus {
                    Focus::Search => Focus::Cards,
                    Focus::Cards => Focus::Search,
                };
            }
            (KeyCode::Up, _) => self.select_prev(),
            (KeyCode::Down, _) => self.select_next(),
            _ => match self.focus {
                Focus::Search => self.handle_search_key(key),
                Focus::Cards => self.handle_cards_key(key),
            },
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.search_now();
            return;
        }
        let before = self.input.text.clone();
        if self.input.handle_key(key.code, key.modifiers) && self.input.text != before {
            self.browser.input(self.input.text.clone(), Instant::now());
        }
    }

    fn handle_cards_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.view_selected(),
            KeyCode::Char('m') => self.load_more(),
            KeyCode::Char('c') if self.browser.clear_visible() => self.clear_search(),
            KeyCode::Char('/') => self.focus = Focus::Search,
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let pos = Position::new(mouse.column, mouse.row);

        if self.browser.detail().is_open() {
            if hit(self.hits.modal_close, pos) {
                self.browser.close_detail();
            } else if hit(self.hits.modal_action, pos) {
                self.download();
            } else if !hit(self.hits.modal, pos) {
                self.browser.close_detail();
            }
            return;
        }

        if hit(self.hits.clear, pos) {
            self.clear_search();
        } else if hit(self.hits.search_button, pos) {
            self.search_now();
        } else if hit(self.hits.search, pos) {
            self.focus = Focus::Search;
        } else if hit(self.hits.load_more, pos) {
            self.load_more();
        } else if let Some(&(_, index)) = self.hits.cards.iter().find(|(r, _)| r.contains(pos)) {
            self.focus = Focus::Cards;
            self.list_state.select(Some(index));
            self.view_selected();
        }
    }
}

/// Run the TUI application
pub fn run(config: &VitrineConfig, source: CatalogSource) -> Result<()> {
    let browser = Browser::new(config)?;
    let (load_tx, load_rx) = mpsc::channel();
    let source_label = source.to_string();
    spawn_loader(source, load_tx);

    let mut app = App::new(browser, Box::new(SystemNavigator), load_rx, source_label);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.update_toast();

        app.poll_loader();

        app.tick(Instant::now());

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(16))? {
            let event = event::read()?;
            app.handle_event(event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::detail::RecordingNavigator;
    use crate::model::product;
    use std::rc::Rc;

    struct SharedNavigator(Rc<RecordingNavigator>);

    impl Navigator for SharedNavigator {
        fn navigate(&self, link: &str) -> crate::error::Result<()> {
            self.0.navigate(link)
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn loaded_app(n: i64) -> (App, Rc<RecordingNavigator>) {
        let nav = Rc::new(RecordingNavigator::new());
        let (tx, rx) = mpsc::channel();
        let browser = Browser::new(&VitrineConfig::default()).unwrap();
        let mut app = App::new(
            browser,
            Box::new(SharedNavigator(nav.clone())),
            rx,
            "test.json".to_string(),
        );
        let catalog = Catalog::from_products((1..=n).map(|i| product(i, &format!("Item {i}"), None)));
        tx.send(LoadEvent::Loaded {
            catalog,
            report: Default::default(),
        })
        .unwrap();
        app.poll_loader();
        (app, nav)
    }

    #[test]
    fn test_load_selects_first_card() {
        let (app, _) = loaded_app(3);
        assert!(matches!(app.load_state, LoadState::Ready));
        assert_eq!(app.selected_id(), Some(1));
    }

    #[test]
    fn test_load_failure_shows_error() {
        let (tx, rx) = mpsc::channel();
        let browser = Browser::new(&VitrineConfig::default()).unwrap();
        let mut app = App::new(browser, Box::new(RecordingNavigator::new()), rx, String::new());
        tx.send(LoadEvent::Failed("boom".to_string())).unwrap();
        app.poll_loader();
        assert!(matches!(app.load_state, LoadState::Failed(_)));
        assert!(app.toast.as_ref().is_some_and(|t| t.is_error));
        assert!(app.browser.list().is_loading());
    }

    #[test]
    fn test_typing_is_debounced() {
        let (mut app, _) = loaded_app(3);
        for c in "Item 2".chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
        assert_eq!(app.browser.query(), "Item 2");
        assert_eq!(app.browser.list().cards().len(), 3);
        app.tick(Instant::now() + Duration::from_secs(1));
        assert_eq!(app.browser.list().cards().len(), 1);
    }

    #[test]
    fn test_enter_searches_immediately() {
        let (mut app, _) = loaded_app(3);
        for c in "zzz".chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
        app.handle_event(key(KeyCode::Enter));
        assert!(app.browser.list().placeholder().is_some());
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn test_view_and_download_with_keys() {
        let (mut app, nav) = loaded_app(8);
        app.handle_event(key(KeyCode::Tab));
        app.handle_event(key(KeyCode::Down));
        app.handle_event(key(KeyCode::Enter));
        assert!(app.browser.detail().is_open());

        app.handle_event(key(KeyCode::Char('d')));
        assert_eq!(nav.visited(), vec!["https://example.com/2.zip"]);
        assert!(app.browser.detail().action().pending);

        app.handle_event(key(KeyCode::Esc));
        assert!(!app.browser.detail().is_open());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_load_more_key() {
        let (mut app, _) = loaded_app(8);
        app.focus = Focus::Cards;
        app.handle_event(key(KeyCode::Char('m')));
        assert_eq!(app.browser.list().cards().len(), 8);
        assert_eq!(app.selected_id(), Some(7));
    }
}
