//! TUI application state.
//!
//! Two screens: pick a directory, then browse its catalog and look up
//! identifiers. The open [`Session`] is owned here and replaced whenever a
//! new directory is opened.

use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::FilenameSource;
use crate::session::Session;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Directory path input
    Directory,
    /// Catalog list with identifier lookup
    Catalog,
}

/// Tone of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// Status line shown under the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Info, text: text.into() }
    }

    fn success(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Success, text: text.into() }
    }

    fn error(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Error, text: text.into() }
    }
}

/// Application state
pub struct App {
    /// Cleared to leave the main loop
    pub running: bool,
    pub screen: Screen,
    /// Directory path being typed on the first screen
    pub dir_input: String,
    /// Identifier being typed on the catalog screen
    pub query_input: String,
    pub message: Option<Message>,
    /// Highlighted catalog row
    pub selected: usize,
    session: Option<Session>,
    source: Arc<dyn FilenameSource>,
}

impl App {
    /// Create the app on the directory screen, prefilled with `directory`
    pub fn new(source: Arc<dyn FilenameSource>, directory: Option<PathBuf>) -> Self {
        Self {
            running: true,
            screen: Screen::Directory,
            dir_input: directory
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
            query_input: String::new(),
            message: None,
            selected: 0,
            session: None,
            source,
        }
    }

    /// The open session, if any
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        match self.screen {
            Screen::Directory => self.handle_directory_key(key).await,
            Screen::Catalog => self.handle_catalog_key(key),
        }
    }

    async fn handle_directory_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Char('q') if self.dir_input.is_empty() => self.running = false,
            KeyCode::Char(c) => self.dir_input.push(c),
            KeyCode::Backspace => {
                self.dir_input.pop();
            }
            KeyCode::Enter => self.open_directory().await,
            _ => {}
        }
    }

    fn handle_catalog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Directory;
                self.query_input.clear();
                self.message = None;
            }
            KeyCode::Char(c) => self.query_input.push(c),
            KeyCode::Backspace => {
                self.query_input.pop();
            }
            KeyCode::Enter => self.run_lookup(),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-10),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.move_selection(isize::MAX),
            _ => {}
        }
    }

    /// Open the typed directory and switch to the catalog screen
    async fn open_directory(&mut self) {
        let input = self.dir_input.trim();
        if input.is_empty() {
            self.message = Some(Message::error("Enter a directory path"));
            return;
        }
        let directory = PathBuf::from(input);

        match Session::open(self.source.as_ref(), &directory).await {
            Ok(session) if session.is_empty() => {
                self.message = Some(Message::info(format!(
                    "No files with an identifier in {}",
                    directory.display()
                )));
            }
            Ok(session) => {
                self.message = Some(Message::info(format!(
                    "{} files cataloged",
                    session.catalog().len()
                )));
                self.session = Some(session);
                self.screen = Screen::Catalog;
                self.selected = 0;
                self.query_input.clear();
            }
            Err(e) => {
                self.message = Some(Message::error(e.to_string()));
            }
        }
    }

    /// Look up the typed identifier and highlight the match
    fn run_lookup(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let query = self.query_input.trim();
        if query.is_empty() {
            return;
        }

        match session.lookup(query) {
            Some(filename) => {
                if let Some(pos) = session
                    .catalog()
                    .iter()
                    .position(|e| e.filename == filename)
                {
                    self.selected = pos;
                }
                self.message = Some(Message::success(format!("Found: {}", filename)));
            }
            None => {
                self.message = Some(Message::error(format!(
                    "No file matches identifier: {}",
                    query
                )));
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.session.as_ref().map(|s| s.catalog().len()).unwrap_or(0);
        if len == 0 {
            self.selected = 0;
            return;
        }
        let max = len - 1;
        self.selected = if delta < 0 {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            self.selected.saturating_add(delta as usize).min(max)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use async_trait::async_trait;

    use crate::catalog::ListingError;

    struct FixedSource(Vec<&'static str>);

    #[async_trait]
    impl FilenameSource for FixedSource {
        async fn filenames(&self, dir: &Path) -> Result<Vec<String>, ListingError> {
            if dir == Path::new("/missing") {
                return Err(ListingError::NotFound(dir.to_path_buf()));
            }
            if dir == Path::new("/empty") {
                return Ok(vec!["readme.md".to_string()]);
            }
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    fn new_app(dir: Option<&str>) -> App {
        let source = Arc::new(FixedSource(vec![
            "XYZ 789.doc",
            "abc456.txt",
            "readme.md",
            "ABC-123.pdf",
        ]));
        App::new(source, dir.map(PathBuf::from))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await;
        }
    }

    #[tokio::test]
    async fn test_open_directory_switches_screen() {
        let mut app = new_app(Some("/scans"));
        assert_eq!(app.screen, Screen::Directory);
        assert_eq!(app.dir_input, "/scans");

        app.handle_key(key(KeyCode::Enter)).await;

        assert_eq!(app.screen, Screen::Catalog);
        assert_eq!(app.session().unwrap().catalog().len(), 3);
        assert_eq!(app.message.as_ref().unwrap().kind, MessageKind::Info);
    }

    #[tokio::test]
    async fn test_lookup_highlights_match() {
        let mut app = new_app(Some("/scans"));
        app.handle_key(key(KeyCode::Enter)).await;

        type_text(&mut app, "xyz-789").await;
        app.handle_key(key(KeyCode::Enter)).await;

        assert_eq!(app.selected, 2);
        assert_eq!(
            app.message,
            Some(Message::success("Found: XYZ 789.doc"))
        );

        for _ in 0.."xyz-789".len() {
            app.handle_key(key(KeyCode::Backspace)).await;
        }
        type_text(&mut app, "ABC999").await;
        app.handle_key(key(KeyCode::Enter)).await;
        assert_eq!(app.message.as_ref().unwrap().kind, MessageKind::Error);
        // Selection is left alone on a miss
        assert_eq!(app.selected, 2);
    }

    #[tokio::test]
    async fn test_invalid_directory_stays_on_first_screen() {
        let mut app = new_app(Some("/missing"));
        app.handle_key(key(KeyCode::Enter)).await;

        assert_eq!(app.screen, Screen::Directory);
        let message = app.message.clone().unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert!(message.text.contains("/missing"));
    }

    #[tokio::test]
    async fn test_empty_catalog_stays_on_first_screen() {
        let mut app = new_app(Some("/empty"));
        app.handle_key(key(KeyCode::Enter)).await;

        assert_eq!(app.screen, Screen::Directory);
        assert!(app.session().is_none());
        assert!(app.message.unwrap().text.contains("No files with an identifier"));
    }

    #[tokio::test]
    async fn test_escape_returns_to_directory_screen() {
        let mut app = new_app(Some("/scans"));
        app.handle_key(key(KeyCode::Enter)).await;
        type_text(&mut app, "abc").await;

        app.handle_key(key(KeyCode::Esc)).await;
        assert_eq!(app.screen, Screen::Directory);
        assert!(app.query_input.is_empty());
        assert!(app.running);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = new_app(None);
        app.handle_key(key(KeyCode::Char('q'))).await;
        assert!(!app.running);

        // 'q' is text once something has been typed
        let mut app = new_app(None);
        type_text(&mut app, "/q").await;
        assert!(app.running);
        assert_eq!(app.dir_input, "/q");

        let mut app = new_app(Some("/scans"));
        app.handle_key(key(KeyCode::Enter)).await;
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .await;
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_selection_is_clamped() {
        let mut app = new_app(Some("/scans"));
        app.handle_key(key(KeyCode::Enter)).await;

        app.handle_key(key(KeyCode::Up)).await;
        assert_eq!(app.selected, 0);
        app.handle_key(key(KeyCode::PageDown)).await;
        assert_eq!(app.selected, 2);
        app.handle_key(key(KeyCode::Home)).await;
        assert_eq!(app.selected, 0);
        app.handle_key(key(KeyCode::End)).await;
        assert_eq!(app.selected, 2);
    }
}
