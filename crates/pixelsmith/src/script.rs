//! Line based editing scripts
//!
//! One command per line, `#` starts a comment. A failing line is reported
//! with its number and the script carries on with the next one, the same
//! way an interactive user would see an error and keep working.
//!
//! ```text
//! color #ff0000
//! brush 3 circle
//! draw 2 2
//! save-component dot
//! clear
//! place dot 5 5
//! print
//! ```

use std::{io::Write, path::PathBuf};

use anyhow::{Context, anyhow, bail};
use pixelsmith_engine::{
    BrushShape, Color, ComponentId, EditorSession, Position, ResizeAnchor, SessionState, Tool, UndoState,
};

use crate::ascii::render_session;

#[derive(Clone, Debug, PartialEq)]
pub enum ScriptCommand {
    Color(Color),
    Brush { size: u32, shape: BrushShape },
    Tool(Tool),
    Draw(Position),
    Erase(Position),
    Fill(Position),
    /// Pointer down on the first point, moves through the rest, up on the last
    Stroke(Vec<Position>),
    Click(Position),
    Resize { width: i32, height: i32, anchor: ResizeAnchor },
    DragResize { anchor: ResizeAnchor, dx: f64, dy: f64 },
    Undo,
    Redo,
    Clear,
    ClearAll,
    SaveComponent { name: String, overwrite: bool },
    SaveComposition { name: String, overwrite: bool },
    LoadComposition(String),
    DeleteComponent(String),
    Place { name: String, at: Position },
    Placing(String),
    Stamping(String),
    ExitMode,
    Move { id: u64, to: Position },
    Remove(u64),
    Stamp { name: String, at: Position },
    Guides(bool),
    Baseline(i32),
    Vertical(i32),
    FontCreate(String),
    FontEdit { font: String, character: char },
    FontSave,
    FontExit,
    Type { font: String, at: Position, text: String },
    Print,
    SaveSession(PathBuf),
    LoadSession(PathBuf),
}

/// A script line that could not be parsed or executed
#[derive(Debug)]
pub struct ScriptError {
    pub line: usize,
    pub error: anyhow::Error,
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {:#}", self.line, self.error)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Parsing
// ═══════════════════════════════════════════════════════════════════════════

struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line.trim() }
    }

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.split_once(char::is_whitespace) {
            Some((token, rest)) => {
                self.rest = rest.trim_start();
                Some(token)
            }
            None => Some(std::mem::take(&mut self.rest)),
        }
    }

    fn word(&mut self, what: &str) -> anyhow::Result<&'a str> {
        self.next().ok_or_else(|| anyhow!("missing {what}"))
    }

    fn number<T: std::str::FromStr>(&mut self, what: &str) -> anyhow::Result<T>
    where
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let token = self.word(what)?;
        token.parse().with_context(|| format!("invalid {what} '{token}'"))
    }

    fn position(&mut self) -> anyhow::Result<Position> {
        Ok(Position::new(self.number("x")?, self.number("y")?))
    }

    /// Everything that is left, verbatim
    fn remainder(&mut self) -> &'a str {
        std::mem::take(&mut self.rest)
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        match self.next() {
            Some(extra) => bail!("unexpected argument '{extra}'"),
            None => Ok(()),
        }
    }
}

fn overwrite_flag(tokens: &mut Tokens) -> anyhow::Result<bool> {
    match tokens.next() {
        None => Ok(false),
        Some("overwrite") => Ok(true),
        Some(other) => bail!("expected 'overwrite', got '{other}'"),
    }
}

fn on_off(token: &str) -> anyhow::Result<bool> {
    match token {
        "on" | "show" | "true" => Ok(true),
        "off" | "hide" | "false" => Ok(false),
        _ => bail!("expected on or off, got '{token}'"),
    }
}

/// Cuts a trailing comment. A `#` directly followed by text is a hex color,
/// not a comment, unless it starts the line.
fn strip_comment(line: &str) -> &str {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return "";
    }
    let bytes = trimmed.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'#' && bytes.get(i + 1).map_or(true, |next| next.is_ascii_whitespace()) {
            return &trimmed[..i];
        }
    }
    trimmed
}

/// Parses one script line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<ScriptCommand>> {
    let mut tokens = Tokens::new(strip_comment(line));
    let Some(keyword) = tokens.next() else {
        return Ok(None);
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "color" => {
            let color = tokens.word("color")?.parse::<Color>()?;
            ScriptCommand::Color(color)
        }
        "brush" => {
            let size = tokens.number("brush size")?;
            let shape = match tokens.next() {
                Some(shape) => shape.parse::<BrushShape>()?,
                None => BrushShape::Square,
            };
            ScriptCommand::Brush { size, shape }
        }
        "tool" => ScriptCommand::Tool(tokens.word("tool")?.parse::<Tool>()?),
        "draw" => ScriptCommand::Draw(tokens.position()?),
        "erase" => ScriptCommand::Erase(tokens.position()?),
        "fill" => ScriptCommand::Fill(tokens.position()?),
        "stroke" => {
            let mut points = vec![tokens.position()?];
            while !tokens.rest.is_empty() {
                points.push(tokens.position()?);
            }
            ScriptCommand::Stroke(points)
        }
        "click" => ScriptCommand::Click(tokens.position()?),
        "resize" => {
            let width = tokens.number("width")?;
            let height = tokens.number("height")?;
            let anchor = match tokens.next() {
                Some(anchor) => anchor.parse::<ResizeAnchor>()?,
                None => ResizeAnchor::BottomRight,
            };
            ScriptCommand::Resize { width, height, anchor }
        }
        "drag-resize" => ScriptCommand::DragResize {
            anchor: tokens.word("anchor")?.parse::<ResizeAnchor>()?,
            dx: tokens.number("dx")?,
            dy: tokens.number("dy")?,
        },
        "undo" => ScriptCommand::Undo,
        "redo" => ScriptCommand::Redo,
        "clear" => ScriptCommand::Clear,
        "clear-all" => ScriptCommand::ClearAll,
        "save-component" => ScriptCommand::SaveComponent {
            name: tokens.word("name")?.to_string(),
            overwrite: overwrite_flag(&mut tokens)?,
        },
        "save-composition" => ScriptCommand::SaveComposition {
            name: tokens.word("name")?.to_string(),
            overwrite: overwrite_flag(&mut tokens)?,
        },
        "load-composition" => ScriptCommand::LoadComposition(tokens.word("name")?.to_string()),
        "delete-component" => ScriptCommand::DeleteComponent(tokens.word("name")?.to_string()),
        "place" => ScriptCommand::Place {
            name: tokens.word("name")?.to_string(),
            at: tokens.position()?,
        },
        "placing" => ScriptCommand::Placing(tokens.word("name")?.to_string()),
        "stamping" => ScriptCommand::Stamping(tokens.word("name")?.to_string()),
        "exit-mode" => ScriptCommand::ExitMode,
        "move" => ScriptCommand::Move {
            id: tokens.number("component id")?,
            to: tokens.position()?,
        },
        "remove" => ScriptCommand::Remove(tokens.number("component id")?),
        "stamp" => ScriptCommand::Stamp {
            name: tokens.word("name")?.to_string(),
            at: tokens.position()?,
        },
        "guides" => ScriptCommand::Guides(on_off(tokens.word("on/off")?)?),
        "baseline" => ScriptCommand::Baseline(tokens.number("row")?),
        "vertical" => ScriptCommand::Vertical(tokens.number("column")?),
        "font-create" => ScriptCommand::FontCreate(tokens.word("font name")?.to_string()),
        "font-edit" => {
            let font = tokens.word("font name")?.to_string();
            let character = tokens.word("character")?;
            let mut chars = character.chars();
            let (Some(character), None) = (chars.next(), chars.next()) else {
                bail!("expected a single character, got '{character}'");
            };
            ScriptCommand::FontEdit { font, character }
        }
        "font-save" => ScriptCommand::FontSave,
        "font-exit" => ScriptCommand::FontExit,
        "type" => {
            let font = tokens.word("font name")?.to_string();
            let at = tokens.position()?;
            let text = tokens.remainder();
            if text.is_empty() {
                bail!("missing text");
            }
            return Ok(Some(ScriptCommand::Type {
                font,
                at,
                text: text.to_string(),
            }));
        }
        "print" => ScriptCommand::Print,
        "save-session" => ScriptCommand::SaveSession(PathBuf::from(tokens.word("path")?)),
        "load-session" => ScriptCommand::LoadSession(PathBuf::from(tokens.word("path")?)),
        other => bail!("unknown command '{other}'"),
    };
    tokens.finish()?;
    Ok(Some(command))
}

// ═══════════════════════════════════════════════════════════════════════════
// Execution
// ═══════════════════════════════════════════════════════════════════════════

pub fn execute(session: &mut EditorSession, command: ScriptCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        ScriptCommand::Color(color) => session.set_color(color),
        ScriptCommand::Brush { size, shape } => session.set_brush(size, shape),
        ScriptCommand::Tool(tool) => session.set_tool(tool),
        ScriptCommand::Draw(p) => {
            session.draw_at(p.x, p.y);
        }
        ScriptCommand::Erase(p) => {
            session.erase_at(p.x, p.y);
        }
        ScriptCommand::Fill(p) => {
            session.fill_at(p.x, p.y);
        }
        ScriptCommand::Stroke(points) => {
            let (Some(first), Some(last)) = (points.first(), points.last()) else {
                return Ok(());
            };
            session.pointer_down(*first);
            for p in &points[1..] {
                session.pointer_move(*p);
            }
            session.pointer_up(*last);
        }
        ScriptCommand::Click(p) => {
            session.pointer_move(p);
            session.pointer_click(p);
        }
        ScriptCommand::Resize { width, height, anchor } => session.resize_from(anchor, width, height)?,
        ScriptCommand::DragResize { anchor, dx, dy } => {
            let size = session.drag_resize(anchor, dx, dy);
            writeln!(out, "canvas is {size}")?;
        }
        ScriptCommand::Undo => {
            if !session.undo()? {
                writeln!(out, "nothing to undo")?;
            }
        }
        ScriptCommand::Redo => {
            if !session.redo()? {
                writeln!(out, "nothing to redo")?;
            }
        }
        ScriptCommand::Clear => session.clear(),
        ScriptCommand::ClearAll => session.clear_all(),
        ScriptCommand::SaveComponent { name, overwrite } => session.save_as_component(&name, overwrite)?,
        ScriptCommand::SaveComposition { name, overwrite } => session.save_as_composition(&name, overwrite)?,
        ScriptCommand::LoadComposition(name) => session.load_composition(&name)?,
        ScriptCommand::DeleteComponent(name) => session.delete_component(&name)?,
        ScriptCommand::Place { name, at } => {
            let id = session.place_component(&name, at.x, at.y)?;
            writeln!(out, "placed {name} as #{id}")?;
        }
        ScriptCommand::Placing(name) => session.enter_placing(&name)?,
        ScriptCommand::Stamping(name) => session.enter_brush_stamping(&name)?,
        ScriptCommand::ExitMode => session.exit_component_mode(),
        ScriptCommand::Move { id, to } => session.move_component(ComponentId(id), to.x, to.y)?,
        ScriptCommand::Remove(id) => session.remove_component(ComponentId(id))?,
        ScriptCommand::Stamp { name, at } => session.stamp_component(&name, at.x, at.y)?,
        ScriptCommand::Guides(visible) => session.set_reference_lines_visible(visible),
        ScriptCommand::Baseline(y) => session.set_baseline(y),
        ScriptCommand::Vertical(x) => session.set_vertical(x),
        ScriptCommand::FontCreate(name) => session.create_font(&name)?,
        ScriptCommand::FontEdit { font, character } => session.enter_font_edit(&font, character)?,
        ScriptCommand::FontSave => session.save_character()?,
        ScriptCommand::FontExit => session.exit_font_edit(),
        ScriptCommand::Type { font, at, text } => {
            session.type_text(&font, &text, at.x, at.y)?;
        }
        ScriptCommand::Print => {
            writeln!(out, "{}", session.dimensions())?;
            write!(out, "{}", render_session(session))?;
        }
        ScriptCommand::SaveSession(path) => session
            .session_state()
            .save(&path)
            .with_context(|| format!("saving session to {}", path.display()))?,
        ScriptCommand::LoadSession(path) => {
            let state = SessionState::load(&path).with_context(|| format!("loading session from {}", path.display()))?;
            session.restore_session(state);
        }
    }
    Ok(())
}

/// Runs every line of `script`. Returns the lines that failed.
pub fn run_script(session: &mut EditorSession, script: &str, out: &mut dyn Write) -> Vec<ScriptError> {
    let mut errors = Vec::new();
    for (index, text) in script.lines().enumerate() {
        let line = index + 1;
        let result = parse_line(text).and_then(|command| match command {
            Some(command) => execute(session, command, out),
            None => Ok(()),
        });
        if let Err(error) = result {
            let error = ScriptError { line, error };
            log::warn!("{error}");
            errors.push(error);
        }
    }
    errors
}
