use std::io::{self, BufRead, Write};

use textcard::app::{App, AppEvent, AppMode, Notification, PreviewState};
use textcard::engine::Config;
use textcard::repl::{command_to_app_event, parse_repl_input};

fn print_preview(state: &PreviewState) {
    println!("┌ preview {}x{}", state.pixel_size.0, state.pixel_size.1);
    for line in &state.lines {
        println!("│ {}", line);
    }
    let frame = if state.show_frame_options {
        format!("frame {}", state.frame_width_label)
    } else {
        "no frame".to_string()
    };
    let ink = state.ink.map(|ink| ink.to_hex()).unwrap_or_default();
    println!(
        "└ size {} · ink {} · {}{}",
        state.font_size_label,
        ink,
        frame,
        if state.export_enabled { "" } else { " · export disabled" }
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut app = App::new(Config::from_env())?;
    if let Some(dir) = std::env::args().nth(1) {
        app = app.with_export_dir(dir);
    }

    println!("textcard: type text to preview it, :help for commands");
    print_preview(&app.preview_state());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    while app.mode() != AppMode::Quit {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let event = command_to_app_event(parse_repl_input(&line?));
        let shows_preview = !matches!(event, AppEvent::Help | AppEvent::Quit | AppEvent::None);
        app.handle_event(event);

        for note in app.take_notifications() {
            match note {
                Notification::Error(msg) => eprintln!("error: {}", msg),
                other => println!("{}", other.message()),
            }
        }
        if shows_preview && app.mode() == AppMode::Editing {
            print_preview(&app.preview_state());
        }
    }

    Ok(())
}
