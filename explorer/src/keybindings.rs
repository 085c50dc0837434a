use egui::{Context, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fit,
    Relayout,
    Reset,
    ClearSelection,
    FocusSearch,
}

/// Shortcuts pressed this frame. Nothing fires while a text field has focus.
pub fn dispatch(ctx: &Context) -> Vec<Command> {
    let mut cmds = Vec::new();
    if ctx.wants_keyboard_input() {
        return cmds;
    }

    ctx.input(|i| {
        let mut slash = false;

        for ev in &i.events {
            match ev {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => match key {
                    // F: fit to visible nodes
                    Key::F if !modifiers.any() => cmds.push(Command::Fit),
                    // L: animated re-layout
                    Key::L if !modifiers.any() => cmds.push(Command::Relayout),
                    // Backspace: reset filters and selection
                    Key::Backspace if !modifiers.any() => cmds.push(Command::Reset),
                    Key::Escape => cmds.push(Command::ClearSelection),
                    Key::Slash if !modifiers.shift => slash = true,
                    _ => {}
                },
                egui::Event::Text(t) if t == "/" => slash = true,
                _ => {}
            }
        }

        if slash {
            cmds.push(Command::FocusSearch);
        }
    });

    cmds
}
