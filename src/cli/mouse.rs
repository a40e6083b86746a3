//! `mouse` command group

use super::Reporter;
use crate::automation::Automation;
use crate::error::Result;
use crate::keys::{MouseButton, ScrollDirection, ToggleState};
use clap::Subcommand;
use serde_json::json;
use std::io::Write;

#[derive(Subcommand, Debug, Clone)]
pub enum MouseCommand {
    /// Move the mouse to specified coordinates
    Move {
        /// X coordinate
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        x: i32,
        /// Y coordinate
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        y: i32,
    },
    /// Click a mouse button
    Click {
        /// Mouse button (left, middle, right, wheelUp, wheelDown, wheelLeft, wheelRight)
        #[arg(long, default_value = "left")]
        button: MouseButton,
        /// Double click
        #[arg(long)]
        double: bool,
    },
    /// Scroll the mouse in a direction
    Scroll {
        /// Scroll direction: up, down, left, right
        #[arg(long, default_value = "up")]
        direction: ScrollDirection,
        /// Number of steps to scroll
        #[arg(long, default_value_t = 10)]
        steps: u32,
    },
    /// Toggle mouse button state (down/up)
    Toggle {
        /// Mouse button to toggle
        #[arg(long, default_value = "left")]
        button: MouseButton,
        /// State: down or up
        #[arg(long, default_value = "down")]
        state: ToggleState,
    },
    /// Print the current pointer position
    Position,
}

pub fn run<W: Write>(cmd: MouseCommand, desk: &mut dyn Automation, out: &mut Reporter<W>) -> Result<()> {
    match cmd {
        MouseCommand::Move { x, y } => {
            desk.mouse_move(x, y)?;
            out.emit(
                format!("Moved mouse to ({}, {})", x, y),
                json!({"moved": {"x": x, "y": y}}),
            )
        }
        MouseCommand::Click { button, double } => {
            desk.mouse_click(button, double)?;
            out.emit(
                format!("Clicked {} button (double={})", button, double),
                json!({"clicked": button, "double": double}),
            )
        }
        MouseCommand::Scroll { direction, steps } => {
            desk.mouse_scroll(direction, steps)?;
            out.emit(
                format!("Scrolled {} for {} steps", direction, steps),
                json!({"direction": direction, "steps": steps}),
            )
        }
        MouseCommand::Toggle { button, state } => {
            desk.mouse_toggle(button, state)?;
            out.emit(
                format!("Toggled {} button to state {}", button, state),
                json!({"button": button, "state": state}),
            )
        }
        MouseCommand::Position => {
            let (x, y) = desk.mouse_location()?;
            out.emit(
                format!("Mouse position: ({}, {})", x, y),
                json!({"x": x, "y": y}),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support::*;
    use crate::error::{Error, ErrorCode};
    use crate::testing::{Call, FakeDesktop};

    #[test]
    fn move_forwards_coordinates() {
        let mut desk = FakeDesktop::new();
        let mut out = text_reporter();
        run(MouseCommand::Move { x: -40, y: 300 }, &mut desk, &mut out).unwrap();
        assert_eq!(desk.calls, vec![Call::MouseMove(-40, 300)]);
        assert_eq!(printed(out), "Moved mouse to (-40, 300)\n");
    }

    #[test]
    fn click_reports_button_and_double() {
        let mut desk = FakeDesktop::new();
        let mut out = text_reporter();
        let cmd = MouseCommand::Click { button: MouseButton::WheelRight, double: true };
        run(cmd, &mut desk, &mut out).unwrap();
        assert_eq!(desk.calls, vec![Call::MouseClick(MouseButton::WheelRight, true)]);
        assert_eq!(printed(out), "Clicked wheelRight button (double=true)\n");
    }

    #[test]
    fn scroll_and_toggle() {
        let mut desk = FakeDesktop::new();
        let mut out = text_reporter();
        run(
            MouseCommand::Scroll { direction: ScrollDirection::Left, steps: 3 },
            &mut desk,
            &mut out,
        )
        .unwrap();
        run(
            MouseCommand::Toggle { button: MouseButton::Right, state: ToggleState::Up },
            &mut desk,
            &mut out,
        )
        .unwrap();
        assert_eq!(
            desk.calls,
            vec![
                Call::MouseScroll(ScrollDirection::Left, 3),
                Call::MouseToggle(MouseButton::Right, ToggleState::Up),
            ]
        );
        assert_eq!(
            printed(out),
            "Scrolled left for 3 steps\nToggled right button to state up\n"
        );
    }

    #[test]
    fn position_in_json() {
        let mut desk = FakeDesktop { location: (12, 34), ..FakeDesktop::new() };
        let mut out = json_reporter();
        run(MouseCommand::Position, &mut desk, &mut out).unwrap();
        let value = printed_json(out);
        assert_eq!(value["data"]["x"], 12);
        assert_eq!(value["data"]["y"], 34);
    }

    #[test]
    fn backend_failure_propagates_without_output() {
        let mut desk = FakeDesktop::failing(Error::action_failed("move", "no display"));
        let mut out = text_reporter();
        let err = run(MouseCommand::Move { x: 1, y: 1 }, &mut desk, &mut out).unwrap_err();
        assert_eq!(err.code, ErrorCode::ActionFailed);
        assert!(printed(out).is_empty());
    }
}
