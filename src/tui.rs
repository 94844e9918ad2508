use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::{Stream, StreamExt};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Merges terminal input and a periodic tick into one channel. The tick
/// drives the loading animation and keeps the main loop polling the
/// in-flight inference task.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        spawn_reader(event::EventStream::new(), tx.clone());

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_millis(250));
            loop {
                interval.tick().await;
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Forward terminal events into the channel. Errored reads are skipped
/// rather than ending the task; the terminal stays responsive across
/// transient read failures.
fn spawn_reader<S>(mut reader: S, tx: mpsc::UnboundedSender<AppEvent>)
where
    S: Stream<Item = std::io::Result<Event>> + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            match reader.next().await {
                Some(Ok(evt)) => {
                    if let Some(event) = translate(evt) {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                }
                Some(Err(_)) => continue,
                None => break,
            }
        }
    });
}

/// Key press only (ignore release/repeat) plus resizes.
fn translate(evt: Event) -> Option<AppEvent> {
    match evt {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(_, _) => Some(AppEvent::Resize),
        _ => None,
    }
}

pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    Ok(Terminal::new(backend)?)
}

pub fn restore() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Restore the terminal before the default panic output, so the message
/// is readable instead of being painted into the alternate screen.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};
    use futures_util::stream;

    #[test]
    fn translate_keeps_presses_and_resizes_only() {
        let press = KeyEvent::new(KeyCode::Char('q'), crossterm::event::KeyModifiers::NONE);
        assert!(matches!(
            translate(Event::Key(press)),
            Some(AppEvent::Key(_))
        ));
        assert!(matches!(
            translate(Event::Resize(80, 24)),
            Some(AppEvent::Resize)
        ));
        assert!(translate(Event::FocusGained).is_none());

        let mut release = press;
        release.kind = KeyEventKind::Release;
        assert!(translate(Event::Key(release)).is_none());
    }

    #[tokio::test]
    async fn reader_survives_a_transient_read_error() {
        let press = KeyEvent::new(KeyCode::Char('x'), crossterm::event::KeyModifiers::NONE);
        let events = stream::iter(vec![
            Err(std::io::Error::other("transient")),
            Ok(Event::Key(press)),
        ]);

        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_reader(events, tx);

        // The key after the errored read must still come through.
        match rx.recv().await {
            Some(AppEvent::Key(key)) => assert_eq!(key.code, KeyCode::Char('x')),
            other => panic!("expected key event, got {other:?}"),
        }
        // Stream end closes the channel.
        assert!(rx.recv().await.is_none());
    }
}
