use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor::{MoveToColumn, MoveUp, RestorePosition, SavePosition},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Text(String),
    Eof,
    Interrupted,
}

/// Reads one line, without its terminator.
///
/// Ctrl-C while waiting yields `Line::Interrupted` instead of killing the
/// process, so the caller gets a chance to persist.
pub async fn read_line<R: AsyncBufRead + Unpin>(input: &mut R) -> io::Result<Line> {
    let mut buf = String::new();

    let read = tokio::select! {
        read = input.read_line(&mut buf) => Some(read),
        _ = tokio::signal::ctrl_c() => None,
    };

    let Some(read) = read else {
        return Ok(Line::Interrupted);
    };
    if read? == 0 {
        return Ok(Line::Eof);
    }

    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(Line::Text(buf))
}

/// Advisory countdown drawn on the line above the answer prompt of `sink`.
///
/// It never interrupts input. `stop` cancels it and waits for the task, so
/// nothing is drawn after the caller moves on.
pub struct Countdown {
    cancel: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl Countdown {
    /// Starts the countdown, or returns `None` for a zero budget.
    pub fn start<T>(budget: Duration, sink: T) -> Option<Self>
    where
        T: Write + Send + 'static,
    {
        if budget.is_zero() {
            return None;
        }

        let (cancel, cancelled) = oneshot::channel();
        let task = tokio::spawn(run_countdown(budget, sink, cancelled));
        Some(Self { cancel, task })
    }

    pub async fn stop(self) {
        // Err means the countdown already finished on its own.
        let _ = self.cancel.send(());
        if let Err(err) = self.task.await {
            log::debug!("countdown task failed: {}", err);
        }
    }
}

async fn run_countdown<T: Write>(
    budget: Duration,
    mut sink: T,
    mut cancelled: oneshot::Receiver<()>,
) {
    let mut remaining = budget.as_secs().max(1);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = &mut cancelled => return,
            _ = ticker.tick() => {
                let text = if remaining == 0 {
                    "Time's up! Answer when ready.".to_string()
                } else {
                    format!("Time remaining: {} seconds", remaining)
                };
                if let Err(err) = draw_timer_line(&mut sink, &text) {
                    log::debug!("countdown draw failed: {}", err);
                    return;
                }
                if remaining == 0 {
                    return;
                }
                remaining -= 1;
            }
        }
    }
}

fn draw_timer_line<T: Write>(sink: &mut T, text: &str) -> io::Result<()> {
    queue!(
        sink,
        SavePosition,
        MoveUp(1),
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(text),
        RestorePosition
    )?;
    sink.flush()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Writer the countdown task can own while the test still reads it.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_read_line_strips_terminators() {
        let mut input: &[u8] = b"Paris\r\n  spaced  \n\nlast";
        let expected = [
            Line::Text("Paris".to_string()),
            Line::Text("  spaced  ".to_string()),
            Line::Text(String::new()),
            Line::Text("last".to_string()),
            Line::Eof,
        ];
        for line in expected {
            assert_eq!(read_line(&mut input).await.unwrap(), line);
        }
    }

    #[tokio::test]
    async fn test_zero_budget_has_no_countdown() {
        let sink = SharedBuf::default();
        assert!(Countdown::start(Duration::ZERO, sink.clone()).is_none());
        assert!(sink.text().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_then_times_up() {
        let sink = SharedBuf::default();
        let countdown = Countdown::start(Duration::from_secs(3), sink.clone()).unwrap();
        tokio::time::sleep(Duration::from_millis(5500)).await;

        let text = sink.text();
        let three = text.find("Time remaining: 3 seconds").unwrap();
        let two = text.find("Time remaining: 2 seconds").unwrap();
        let one = text.find("Time remaining: 1 seconds").unwrap();
        let up = text.find("Time's up! Answer when ready.").unwrap();
        assert!(three < two && two < one && one < up);
        assert_eq!(text.matches("Time's up!").count(), 1);

        countdown.stop().await;
        assert_eq!(sink.text(), text);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_drawn_after_stop() {
        let sink = SharedBuf::default();
        let countdown = Countdown::start(Duration::from_secs(60), sink.clone()).unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        countdown.stop().await;

        let drawn = sink.text();
        assert!(drawn.contains("Time remaining: 60 seconds"));
        assert!(drawn.contains("Time remaining: 58 seconds"));
        assert!(!drawn.contains("Time remaining: 57 seconds"));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(sink.text(), drawn);
        assert!(!drawn.contains("Time's up!"));
    }
}
