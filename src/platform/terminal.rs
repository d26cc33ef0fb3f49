//! Terminal version of the prompt
//!
//! Same controller as the page: "no" teleports the No to a new cell and grows
//! the YES banner, "yes" celebrates and ends the session.

use std::io::{self, BufRead, Write};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::backend::BackendResolver;
use crate::geometry::{Point, Region};
use crate::interaction::{DeclineInput, PromptController, PromptView};
use crate::settings::Settings;
use crate::sim::Effect;

pub const QUESTION: &str = "Will you be my Valentine? (yes/no)";
pub const REPROMPT: &str = "Please type yes or no.";

/// Character grid the No teleports across
pub const GRID: Region = Region {
    width: 80.0,
    height: 24.0,
};
/// Cells kept clear of the grid edge
pub const GRID_PADDING: f64 = 2.0;
/// Tallest the YES banner gets
pub const MAX_BANNER_LINES: u32 = 5;

/// A typed answer (trimmed, case-insensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Other,
}

impl Answer {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "yes" | "y" => Answer::Yes,
            "no" | "n" => Answer::No,
            _ => Answer::Other,
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Accepted { declines: u32 },
    /// Input ran out before a yes
    Abandoned { declines: u32 },
}

/// Buffers what the controller wants shown until the session writes it out
#[derive(Debug, Default)]
struct TerminalView {
    pending: Vec<String>,
}

impl TerminalView {
    fn flush_to(&mut self, out: &mut impl Write) -> io::Result<()> {
        for line in self.pending.drain(..) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

impl PromptView for TerminalView {
    fn decline_region(&self) -> Region {
        GRID
    }

    fn trigger_center(&self) -> Point {
        GRID.center()
    }

    // The banner shows the growth
    fn scale_accept(&mut self, _scale: f64) {}

    fn move_decline(&mut self, to: Point) {
        self.pending.push(format!(
            "No teleported to column {}, row {}!",
            to.x.round() as i64,
            to.y.round() as i64
        ));
    }

    fn end_relocation(&mut self) {}

    fn reveal_celebration(&mut self) {}

    // Lines are appended, there is nothing to clear
    fn clear_announcement(&mut self) {}

    fn write_announcement(&mut self, message: &str) {
        self.pending.push(message.to_string());
    }

    fn launch(&mut self, _effect: Effect) -> bool {
        false
    }
}

fn write_banner(out: &mut impl Write, declines: u32) -> io::Result<()> {
    let lines = (1 + declines).min(MAX_BANNER_LINES);
    for _ in 0..lines {
        writeln!(out, "  ***   Y E S   ***")?;
    }
    Ok(())
}

/// Run the prompt with an OS-seeded RNG
pub fn run_session(
    input: impl BufRead,
    out: &mut impl Write,
    settings: Settings,
) -> io::Result<SessionOutcome> {
    run_session_with(input, out, settings, Pcg32::from_rng(&mut rand::rng()))
}

/// Run the prompt until "yes" or end of input
pub fn run_session_with(
    input: impl BufRead,
    out: &mut impl Write,
    mut settings: Settings,
    rng: Pcg32,
) -> io::Result<SessionOutcome> {
    // No particles in a terminal, and pixel padding means nothing on the grid
    settings.reduced_motion = true;
    settings.teleport_padding = GRID_PADDING;

    let resolver = BackendResolver::new(settings.teleport_padding, rng);
    let mut controller = PromptController::new(settings, resolver);
    let mut view = TerminalView::default();

    writeln!(out, "{}", QUESTION)?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match Answer::parse(&line) {
            Answer::Yes => {
                controller.accept(&mut view);
                writeln!(out)?;
                write_banner(out, controller.state().declines())?;
                writeln!(out)?;
                view.flush_to(out)?;
                out.flush()?;
                return Ok(SessionOutcome::Accepted {
                    declines: controller.state().declines(),
                });
            }
            Answer::No => {
                controller.decline(&mut view, DeclineInput::keyboard());
                // Nothing animates here, so the relocation ends at once
                controller.finish_relocation(&mut view);
                view.flush_to(out)?;
                write_banner(out, controller.state().declines())?;
                writeln!(out)?;
                writeln!(out, "{}", QUESTION)?;
            }
            Answer::Other => writeln!(out, "{}", REPROMPT)?,
        }
        out.flush()?;
    }

    log::info!("Input closed without an answer");
    Ok(SessionOutcome::Abandoned {
        declines: controller.state().declines(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> (SessionOutcome, String) {
        let mut out = Vec::new();
        let outcome = run_session_with(
            Cursor::new(input.to_string()),
            &mut out,
            Settings::default(),
            Pcg32::seed_from_u64(5),
        )
        .unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    fn banner_lines(text: &str) -> usize {
        text.lines().filter(|l| l.contains("Y E S")).count()
    }

    #[test]
    fn test_answer_parsing() {
        assert_eq!(Answer::parse("  YES \n"), Answer::Yes);
        assert_eq!(Answer::parse("y"), Answer::Yes);
        assert_eq!(Answer::parse("No"), Answer::No);
        assert_eq!(Answer::parse("n"), Answer::No);
        assert_eq!(Answer::parse("maybe"), Answer::Other);
        assert_eq!(Answer::parse(""), Answer::Other);
    }

    #[test]
    fn test_immediate_yes() {
        let (outcome, text) = session("yes\n");
        assert_eq!(outcome, SessionOutcome::Accepted { declines: 0 });
        assert!(text.starts_with(QUESTION));
        assert_eq!(banner_lines(&text), 1);
        assert!(text.contains("Yay! You said yes!"));
    }

    #[test]
    fn test_declines_grow_banner_then_accept() {
        let (outcome, text) = session("no\nn\nyes\n");
        assert_eq!(outcome, SessionOutcome::Accepted { declines: 2 });
        // 2 + 3 after the declines, 3 on accept
        assert_eq!(banner_lines(&text), 2 + 3 + 3);
        assert_eq!(text.matches("No button moved. Try Yes!").count(), 2);
        assert_eq!(text.matches("No teleported to column").count(), 2);
    }

    #[test]
    fn test_banner_is_capped() {
        let (outcome, text) = session("no\nno\nno\nno\nno\nno\ny\n");
        assert_eq!(outcome, SessionOutcome::Accepted { declines: 6 });
        let accept_part = text.rsplit(QUESTION).next().unwrap();
        assert_eq!(banner_lines(accept_part), MAX_BANNER_LINES as usize);
    }

    #[test]
    fn test_teleport_stays_on_grid() {
        let (_, text) = session("no\nno\nno\nno\n");
        for line in text.lines().filter(|l| l.starts_with("No teleported")) {
            let nums: Vec<i64> = line
                .split(|c: char| !c.is_ascii_digit())
                .filter(|s| !s.is_empty())
                .map(|s| s.parse().unwrap())
                .collect();
            let (col, row) = (nums[0], nums[1]);
            assert!((2..=78).contains(&col), "column {col}");
            assert!((2..=22).contains(&row), "row {row}");
        }
    }

    #[test]
    fn test_unknown_answer_reprompts() {
        let (outcome, text) = session("perhaps\n");
        assert_eq!(outcome, SessionOutcome::Abandoned { declines: 0 });
        assert!(text.contains(REPROMPT));
    }

    #[test]
    fn test_end_of_input_abandons() {
        let (outcome, _) = session("no\n");
        assert_eq!(outcome, SessionOutcome::Abandoned { declines: 1 });
    }
}
