use crate::catalog_api::CatalogApi;
use crate::event::{AppEvent, RequestToken};
use crate::podcast::{PodcastDetail, PodcastId, PodcastSummary};
use crate::ui::format_description;
use crate::widgets::scrollable_paragraph::ScrollableParagraphState;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, warn};
use ratatui::{Terminal, backend::Backend};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Lifecycle of the one-shot catalog fetch. `Loaded` and `Failed` are both
/// terminal; there is no retry control.
#[derive(Debug)]
pub enum CatalogState {
    Idle,
    Loading,
    Loaded(Vec<PodcastSummary>),
    Failed(String),
}

/// What the body of the screen should show, in priority order: loading wins
/// over everything, an error wins over emptiness.
#[derive(Debug, PartialEq)]
pub enum ViewMode<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Grid(&'a [PodcastSummary]),
}

pub struct App {
    pub should_quit: bool,
    catalog: CatalogState,
    cursor: Option<usize>,
    selected_detail: Option<PodcastDetail>,
    // Token of the most recently issued detail request. A completion whose
    // token differs is stale and must be discarded (last request wins).
    pending_detail: Option<RequestToken>,
    next_token: RequestToken,
    // Column count of the last rendered grid; set by the layout pass so
    // Up/Down can move by whole rows.
    pub grid_columns: usize,
    pub overlay_state: ScrollableParagraphState,
    api: Arc<dyn CatalogApi>,
    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(api: Arc<dyn CatalogApi>, events: UnboundedSender<AppEvent>) -> App {
        App {
            should_quit: false,
            catalog: CatalogState::Idle,
            cursor: None,
            selected_detail: None,
            pending_detail: None,
            next_token: 0,
            grid_columns: 1,
            overlay_state: ScrollableParagraphState::default(),
            api,
            events,
        }
    }

    // ================================ Catalog lifecycle ================================

    /// Kicks off the catalog fetch. Called once on mount; there is no control
    /// that can trigger it a second time.
    pub fn start_catalog_load(&mut self) {
        self.catalog = CatalogState::Loading;
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.fetch_catalog().await;
            // The receiver only closes on shutdown, so a send failure is moot.
            let _ = events.send(AppEvent::CatalogLoaded(result));
        });
    }

    pub fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::CatalogLoaded(result) => self.on_catalog_loaded(result),
            AppEvent::DetailLoaded { token, result } => self.on_detail_loaded(token, result),
        }
    }

    fn on_catalog_loaded(&mut self, result: Result<Vec<PodcastSummary>, crate::errors::ApiError>) {
        match result {
            Ok(catalog) => {
                self.cursor = if catalog.is_empty() { None } else { Some(0) };
                self.catalog = CatalogState::Loaded(catalog);
            }
            Err(e) => {
                warn!("catalog load failed: {}", e);
                self.cursor = None;
                // Failed holds no data: stale entries never survive a failure.
                self.catalog = CatalogState::Failed(e.user_message());
            }
        }
    }

    pub fn view_mode(&self) -> ViewMode<'_> {
        match &self.catalog {
            CatalogState::Idle | CatalogState::Loading => ViewMode::Loading,
            CatalogState::Failed(message) => ViewMode::Failed(message),
            CatalogState::Loaded(catalog) if catalog.is_empty() => ViewMode::Empty,
            CatalogState::Loaded(catalog) => ViewMode::Grid(catalog),
        }
    }

    pub fn catalog(&self) -> &[PodcastSummary] {
        match &self.catalog {
            CatalogState::Loaded(catalog) => catalog,
            _ => &[],
        }
    }

    // ================================ Detail selection =================================

    /// Issues a fresh token for a detail request, superseding any request
    /// still in flight.
    fn issue_detail_token(&mut self) -> RequestToken {
        self.next_token += 1;
        self.pending_detail = Some(self.next_token);
        self.next_token
    }

    /// Fires the on-demand detail fetch for one catalog entry. The previous
    /// overlay content (if any) stays visible until the response lands.
    pub fn request_detail(&mut self, id: PodcastId) -> RequestToken {
        let token = self.issue_detail_token();
        debug!("requesting detail for {} (token {})", id, token);
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.fetch_detail(&id).await;
            let _ = events.send(AppEvent::DetailLoaded { token, result });
        });
        token
    }

    fn on_detail_loaded(
        &mut self,
        token: RequestToken,
        result: Result<PodcastDetail, crate::errors::ApiError>,
    ) {
        if self.pending_detail != Some(token) {
            debug!("discarding stale detail response (token {})", token);
            return;
        }
        self.pending_detail = None;
        match result {
            Ok(detail) => {
                self.overlay_state.set_content(format_description(detail.description()));
                self.selected_detail = Some(detail);
            }
            // Detail is supplementary: log and keep whatever was on screen.
            Err(e) => warn!("detail load failed: {}", e),
        }
    }

    /// Closes the overlay. Also invalidates the pending token so a late
    /// response cannot reopen it.
    pub fn deselect(&mut self) {
        self.selected_detail = None;
        self.pending_detail = None;
    }

    pub fn selected_detail(&self) -> Option<&PodcastDetail> {
        self.selected_detail.as_ref()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    // =============================== Grid cursor movement ==============================

    fn move_cursor(&mut self, delta: isize) {
        let len = self.catalog().len();
        if len == 0 {
            self.cursor = None;
            return;
        }
        let current = self.cursor.unwrap_or(0) as isize;
        let next = current + delta;
        if (0..len as isize).contains(&next) {
            self.cursor = Some(next as usize);
        }
    }

    pub fn cursor_left(&mut self) {
        self.move_cursor(-1);
    }

    pub fn cursor_right(&mut self) {
        self.move_cursor(1);
    }

    pub fn cursor_up(&mut self) {
        self.move_cursor(-(self.grid_columns.max(1) as isize));
    }

    pub fn cursor_down(&mut self) {
        self.move_cursor(self.grid_columns.max(1) as isize);
    }

    fn select_under_cursor(&mut self) {
        let Some(id) = self.cursor.and_then(|i| self.catalog().get(i)).map(|s| s.id().clone())
        else {
            return;
        };
        self.request_detail(id);
    }

    // --- Key Handler ---
    pub fn on_key(&mut self, key: KeyCode) {
        // Handle global quit first
        if key == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if self.selected_detail.is_some() {
            // Overlay captures navigation for description scrolling.
            match key {
                KeyCode::Esc | KeyCode::Char('x') => self.deselect(),
                KeyCode::Down => self.overlay_state.scroll_down(1),
                KeyCode::Up => self.overlay_state.scroll_up(1),
                KeyCode::PageDown => self.overlay_state.scroll_down(5),
                KeyCode::PageUp => self.overlay_state.scroll_up(5),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Up => self.cursor_up(),
            KeyCode::Down => self.cursor_down(),
            KeyCode::Enter => self.select_under_cursor(),
            _ => {}
        }
    }
}

pub async fn start_ui(mut app: App, mut events: UnboundedReceiver<AppEvent>) -> Result<()> {
    // Set up the terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app_loop(&mut terminal, &mut app, &mut events).await;

    // Restore the terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

pub async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut UnboundedReceiver<AppEvent>,
) -> Result<()> {
    while !app.should_quit {
        // Apply any fetch completions before drawing, so a frame never shows
        // a state the controller has already left.
        while let Ok(event) = events.try_recv() {
            app.on_event(event);
        }

        let frame_size = terminal.get_frame().size(); // Fetch once before drawing
        crate::ui::prepare_layout(app, frame_size);
        terminal.draw(|f| crate::ui::ui(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            // Poll with timeout
            if let Event::Key(key_event) = event::read()? {
                app.on_key(key_event.code);
            }
        }

        // Yield so spawned fetch tasks get a turn on this runtime.
        tokio::task::yield_now().await;
    }

    Ok(())
}
