use std::path::PathBuf;

use super::ReplCommand;

/// Parse REPL input string into a command
///
/// Supports:
/// - plain text → SetText (the line as typed, minus the line ending)
/// - `:text <text>` → SetText, for text that itself starts with `:`
/// - `:font`, `:size`, `:format`, `:bg` → control changes
/// - `:frame on|off|<style>`, `:frame-color`, `:frame-width` → frame controls
/// - `:export [dir]`, `:export --data-url`, `:preview <path>` → output actions
/// - `:q` or `:quit` → Quit, `:h` or `:help` → Help
pub fn parse_repl_input(input: &str) -> ReplCommand {
    let line = input.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return ReplCommand::Empty;
    }

    let Some(body) = trimmed.strip_prefix(':') else {
        return ReplCommand::SetText(line.to_string());
    };

    let (name, arg) = match body.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (body, ""),
    };

    let unknown = || ReplCommand::Unknown(trimmed.to_string());

    match name {
        "q" | "quit" => ReplCommand::Quit,
        "h" | "help" => ReplCommand::Help,
        "text" => {
            // Keep inner spacing; only the separator after the command goes
            let text = body["text".len()..].strip_prefix(char::is_whitespace).unwrap_or("");
            ReplCommand::SetText(text.to_string())
        }
        "font" => ReplCommand::Font(arg.to_string()),
        "size" => arg.parse().map(ReplCommand::Size).unwrap_or_else(|_| unknown()),
        "format" => arg.parse().map(ReplCommand::Format).unwrap_or_else(|_| unknown()),
        "bg" if !arg.is_empty() => ReplCommand::Background(arg.to_string()),
        "frame" => match arg {
            "on" => ReplCommand::FrameToggle(true),
            "off" => ReplCommand::FrameToggle(false),
            style => style.parse().map(ReplCommand::FrameStyle).unwrap_or_else(|_| unknown()),
        },
        "frame-color" if !arg.is_empty() => ReplCommand::FrameColor(arg.to_string()),
        "frame-width" => arg.parse().map(ReplCommand::FrameWidth).unwrap_or_else(|_| unknown()),
        "export" if arg.is_empty() => ReplCommand::Export(None),
        "export" if arg == "--data-url" => ReplCommand::ExportDataUrl,
        "export" => ReplCommand::Export(Some(PathBuf::from(arg))),
        "preview" if !arg.is_empty() => ReplCommand::Preview(PathBuf::from(arg)),
        _ => unknown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{FrameStyle, OutputFormat};

    #[test]
    fn test_parse_quit_variants() {
        assert_eq!(parse_repl_input(":q"), ReplCommand::Quit);
        assert_eq!(parse_repl_input(":quit"), ReplCommand::Quit);
    }

    #[test]
    fn test_parse_help_variants() {
        assert_eq!(parse_repl_input(":h"), ReplCommand::Help);
        assert_eq!(parse_repl_input(":help"), ReplCommand::Help);
    }

    #[test]
    fn test_parse_plain_text_keeps_spacing() {
        assert_eq!(
            parse_repl_input("  Hello   World \n"),
            ReplCommand::SetText("  Hello   World ".to_string())
        );
    }

    #[test]
    fn test_parse_text_command() {
        assert_eq!(
            parse_repl_input(":text :-) hi"),
            ReplCommand::SetText(":-) hi".to_string())
        );
        assert_eq!(parse_repl_input(":text"), ReplCommand::SetText(String::new()));
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_repl_input(""), ReplCommand::Empty);
        assert_eq!(parse_repl_input("   \n"), ReplCommand::Empty);
    }

    #[test]
    fn test_parse_controls() {
        assert_eq!(parse_repl_input(":size 48"), ReplCommand::Size(48));
        assert_eq!(parse_repl_input(":format jpg"), ReplCommand::Format(OutputFormat::Jpeg));
        assert_eq!(parse_repl_input(":bg #000"), ReplCommand::Background("#000".to_string()));
        assert_eq!(parse_repl_input(":font DejaVu Sans"), ReplCommand::Font("DejaVu Sans".to_string()));
        assert_eq!(parse_repl_input(":font"), ReplCommand::Font(String::new()));
    }

    #[test]
    fn test_parse_frame_commands() {
        assert_eq!(parse_repl_input(":frame on"), ReplCommand::FrameToggle(true));
        assert_eq!(parse_repl_input(":frame off"), ReplCommand::FrameToggle(false));
        assert_eq!(parse_repl_input(":frame Galaxy"), ReplCommand::FrameStyle(FrameStyle::Galaxy));
        assert_eq!(parse_repl_input(":frame-width 9"), ReplCommand::FrameWidth(9));
        assert_eq!(
            parse_repl_input(":frame-color #ff0000"),
            ReplCommand::FrameColor("#ff0000".to_string())
        );
    }

    #[test]
    fn test_parse_output_actions() {
        assert_eq!(parse_repl_input(":export"), ReplCommand::Export(None));
        assert_eq!(
            parse_repl_input(":export out/cards"),
            ReplCommand::Export(Some(PathBuf::from("out/cards")))
        );
        assert_eq!(parse_repl_input(":export --data-url"), ReplCommand::ExportDataUrl);
        assert_eq!(
            parse_repl_input(":preview p.png"),
            ReplCommand::Preview(PathBuf::from("p.png"))
        );
    }

    #[test]
    fn test_parse_invalid_command() {
        assert!(matches!(parse_repl_input(":nope"), ReplCommand::Unknown(_)));
        assert!(matches!(parse_repl_input(":size big"), ReplCommand::Unknown(_)));
        assert!(matches!(parse_repl_input(":frame sparkly"), ReplCommand::Unknown(_)));
        assert!(matches!(parse_repl_input(":preview"), ReplCommand::Unknown(_)));
    }
}
