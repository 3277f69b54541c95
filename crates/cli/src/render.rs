//! Terminal renderer - draws frames as a true-color bar.

use async_trait::async_trait;
use ratehue_core::{Color, GradientOverlay, Point};
use ratehue_progress::RateSnapshot;
use ratehue_session::{Frame, FrameRenderer, SessionError};
use tokio::io::{AsyncWrite, AsyncWriteExt};

const RESET: &str = "\x1b[0m";

/// Redraws one line per frame: a colored bar followed by the figures.
pub struct TerminalRenderer<W> {
    out: W,
    width: u16,
}

impl<W: AsyncWrite + Unpin + Send> TerminalRenderer<W> {
    /// Render into `out` with a bar `width` cells wide.
    pub fn new(out: W, width: u16) -> Self {
        Self { out, width: width.max(1) }
    }

    /// Consume the renderer and return the writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> FrameRenderer for TerminalRenderer<W> {
    async fn render(&mut self, frame: &Frame) -> Result<(), SessionError> {
        let line = format!(
            "\r{} {}\x1b[K",
            bar(&frame.color, frame.overlay.as_ref(), self.width),
            status_line(&frame.snapshot, &frame.color)
        );
        self.out.write_all(line.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }
}

/// A row of `width` cells filled with `color`, with the overlay composited.
pub fn bar(color: &Color, overlay: Option<&GradientOverlay>, width: u16) -> String {
    let mut out = String::new();
    for cell in 0..width {
        let point = Point::new((cell as f64 + 0.5) / width as f64, 0.5);
        let shown = match overlay {
            Some(overlay) => overlay.apply(&on_black(color), point),
            None => on_black(color),
        };
        out.push_str(&swatch(&shown));
    }
    out.push_str(RESET);
    out
}

/// One background-colored cell.
pub fn swatch(color: &Color) -> String {
    let (r, g, b) = on_black(color).to_rgb8();
    format!("\x1b[48;2;{};{};{}m ", r, g, b)
}

/// `hh:mm:ss  completed/goal  percent  #hex`
pub fn status_line(snapshot: &RateSnapshot, color: &Color) -> String {
    let elapsed = snapshot.elapsed_seconds;
    format!(
        "{:02}:{:02}:{:02}  {}/{:.1}  {:>5.1}%  {}",
        elapsed / 3600,
        (elapsed / 60) % 60,
        elapsed % 60,
        snapshot.completed,
        snapshot.goal_at_this_instant,
        snapshot.progress_percent(),
        color
    )
}

// Terminals have no alpha; composite translucent colors over black.
fn on_black(color: &Color) -> Color {
    if color.is_opaque() {
        *color
    } else {
        Color::BLACK.mix(color, color.alpha())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratehue_progress::RateTracker;

    fn snapshot(seconds: u64, completed: i64) -> RateSnapshot {
        let mut tracker = RateTracker::new(80);
        tracker.advance(seconds);
        tracker.add_completed(completed);
        tracker.snapshot()
    }

    #[test]
    fn test_status_line() {
        let line = status_line(&snapshot(3725, 40), &Color::RED);
        assert_eq!(line, "01:02:05  40/82.8   48.3%  #ff0000");
    }

    #[test]
    fn test_swatch_escape() {
        assert_eq!(swatch(&Color::GREEN), "\x1b[48;2;0;255;0m ");
        assert_eq!(swatch(&Color::CLEAR), "\x1b[48;2;0;0;0m ");
    }

    #[test]
    fn test_bar_width_and_overlay() {
        let plain = bar(&Color::RED, None, 4);
        assert_eq!(plain.matches("48;2;255;0;0m").count(), 4);
        assert!(plain.ends_with(RESET));

        // Horizontal overlay: solid gray on the left, red showing on the right.
        let overlay = GradientOverlay::new(Color::GRAY, Point::new(1.0, 0.5), vec![0.2, 0.5]).unwrap();
        let layered = bar(&Color::RED, Some(&overlay), 4);
        assert!(layered.starts_with("\x1b[48;2;128;128;128m "));
        assert!(layered.contains("48;2;255;0;0m"));
    }

    #[tokio::test]
    async fn test_render_writes_line() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 3);
        let frame = Frame {
            color: Color::GREEN,
            overlay: None,
            snapshot: snapshot(10, 0),
        };
        renderer.render(&frame).await.unwrap();

        let written = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(written.starts_with('\r'));
        assert!(written.contains("48;2;0;255;0m"));
        assert!(written.contains("00:00:10  0/0.2"));
    }
}
