//! `keyboard` command group

use super::Reporter;
use crate::automation::Automation;
use crate::error::Result;
use crate::keys::{parse_modifiers, KeyCode, ToggleState};
use clap::Subcommand;
use serde_json::json;
use std::io::Write;

#[derive(Subcommand, Debug, Clone)]
pub enum KeyboardCommand {
    /// Type a string using the keyboard
    Type {
        /// Text to type
        #[arg(long)]
        text: String,
    },
    /// Tap a key with optional modifiers
    Tap {
        /// Key to tap
        #[arg(long)]
        key: KeyCode,
        /// Comma-separated list of modifiers (e.g., ctrl,shift)
        #[arg(long, default_value = "")]
        mods: String,
    },
    /// Toggle a key state (down/up)
    Toggle {
        /// Key to toggle
        #[arg(long)]
        key: KeyCode,
        /// State: down or up
        #[arg(long, default_value = "down")]
        state: ToggleState,
    },
}

pub fn run<W: Write>(cmd: KeyboardCommand, desk: &mut dyn Automation, out: &mut Reporter<W>) -> Result<()> {
    match cmd {
        KeyboardCommand::Type { text } => {
            desk.type_text(&text)?;
            out.emit(format!("Typed string: {}", text), json!({"typed": text}))
        }
        KeyboardCommand::Tap { key, mods } => {
            let modifiers = parse_modifiers(&mods)?;
            desk.key_tap(key, &modifiers)?;
            let listed: Vec<String> = modifiers.iter().map(|m| m.to_string()).collect();
            out.emit(
                format!("Tapped key: {} with modifiers: [{}]", key, listed.join(" ")),
                json!({"key": key, "modifiers": listed}),
            )
        }
        KeyboardCommand::Toggle { key, state } => {
            desk.key_toggle(key, state)?;
            out.emit(
                format!("Toggled key {} to state {}", key, state),
                json!({"key": key, "state": state}),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support::*;
    use crate::error::ErrorCode;
    use crate::testing::{Call, FakeDesktop};

    #[test]
    fn type_forwards_text_verbatim() {
        let mut desk = FakeDesktop::new();
        let mut out = text_reporter();
        let cmd = KeyboardCommand::Type { text: "héllo \"world\"".to_string() };
        run(cmd, &mut desk, &mut out).unwrap();
        assert_eq!(desk.calls, vec![Call::TypeText("héllo \"world\"".to_string())]);
        assert_eq!(printed(out), "Typed string: héllo \"world\"\n");
    }

    #[test]
    fn tap_with_modifiers_keeps_order() {
        let mut desk = FakeDesktop::new();
        let mut out = text_reporter();
        let cmd = KeyboardCommand::Tap { key: KeyCode::Char('c'), mods: "ctrl,shift".to_string() };
        run(cmd, &mut desk, &mut out).unwrap();
        assert_eq!(
            desk.calls,
            vec![Call::KeyTap(KeyCode::Char('c'), vec![KeyCode::Ctrl, KeyCode::Shift])]
        );
        assert_eq!(printed(out), "Tapped key: c with modifiers: [ctrl shift]\n");
    }

    #[test]
    fn capital_letter_keeps_its_case() {
        let mut desk = FakeDesktop::new();
        let mut out = text_reporter();
        let key: KeyCode = "A".parse().unwrap();
        run(KeyboardCommand::Tap { key, mods: String::new() }, &mut desk, &mut out).unwrap();
        assert_eq!(desk.calls, vec![Call::KeyTap(KeyCode::Char('A'), vec![])]);
        assert_eq!(printed(out), "Tapped key: A with modifiers: []\n");
    }

    #[test]
    fn tap_without_modifiers() {
        let mut desk = FakeDesktop::new();
        let mut out = json_reporter();
        let cmd = KeyboardCommand::Tap { key: KeyCode::Enter, mods: String::new() };
        run(cmd, &mut desk, &mut out).unwrap();
        assert_eq!(desk.calls, vec![Call::KeyTap(KeyCode::Enter, vec![])]);
        let value = printed_json(out);
        assert_eq!(value["data"]["key"], "enter");
        assert_eq!(value["data"]["modifiers"], json!([]));
    }

    #[test]
    fn bad_modifier_is_rejected_before_any_input() {
        let mut desk = FakeDesktop::new();
        let mut out = text_reporter();
        let cmd = KeyboardCommand::Tap { key: KeyCode::Tab, mods: "ctrl,banana".to_string() };
        let err = run(cmd, &mut desk, &mut out).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownKey);
        assert!(desk.calls.is_empty());
    }

    #[test]
    fn toggle_reports_state() {
        let mut desk = FakeDesktop::new();
        let mut out = text_reporter();
        let cmd = KeyboardCommand::Toggle { key: KeyCode::Shift, state: ToggleState::Down };
        run(cmd, &mut desk, &mut out).unwrap();
        assert_eq!(desk.calls, vec![Call::KeyToggle(KeyCode::Shift, ToggleState::Down)]);
        assert_eq!(printed(out), "Toggled key shift to state down\n");
    }
}
