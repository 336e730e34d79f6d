//! Tool selection and component interaction modes
//!
//! The base tool and the component sub-mode live in one controller. The
//! component sub-mode is a single enum, so placing, brush stamping and moving
//! can never be active at the same time. While a sub-mode is active it takes
//! priority over the base tool for pointer routing.

use serde::{Deserialize, Serialize};

use crate::{Position, components::Component, components::PlacedComponent};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    None,
    Draw,
    Erase,
    Fill,
    Move,
    Type,
}

impl std::str::FromStr for Tool {
    type Err = crate::EngineError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Tool::None),
            "draw" => Ok(Tool::Draw),
            "erase" => Ok(Tool::Erase),
            "fill" => Ok(Tool::Fill),
            "move" => Ok(Tool::Move),
            "type" => Ok(Tool::Type),
            _ => Err(crate::EngineError::generic(format!("Unknown tool: {s}"))),
        }
    }
}

/// A component lifted off the canvas and following the pointer
#[derive(Clone, Debug, PartialEq)]
pub struct MoveGesture {
    pub component: PlacedComponent,
    /// Pointer cell minus component origin at pick-up time
    pub grab_offset: Position,
    /// Candidate top-left corner under the pointer
    pub hover: Option<Position>,
}

impl MoveGesture {
    pub fn origin(&self) -> Position {
        self.component.position
    }

    pub fn target_for(&self, pointer: Position) -> Position {
        pointer - self.grab_offset
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ComponentMode {
    #[default]
    Idle,
    Placing {
        template: Component,
        hover: Option<Position>,
    },
    BrushStamping {
        template: Component,
    },
    Moving(MoveGesture),
}

impl ComponentMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, ComponentMode::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComponentMode::Idle => "idle",
            ComponentMode::Placing { .. } => "placing",
            ComponentMode::BrushStamping { .. } => "brush stamping",
            ComponentMode::Moving(_) => "moving",
        }
    }
}

/// Where pointer events go
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerRoute {
    Placing,
    BrushStamping,
    Moving,
    Tool(Tool),
}

#[derive(Clone, Debug, Default)]
pub struct ModeController {
    tool: Tool,
    component_mode: ComponentMode,
    text_cursor: Option<Position>,
}

impl ModeController {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn component_mode(&self) -> &ComponentMode {
        &self.component_mode
    }

    pub(crate) fn component_mode_mut(&mut self) -> &mut ComponentMode {
        &mut self.component_mode
    }

    pub fn text_cursor(&self) -> Option<Position> {
        self.text_cursor
    }

    pub fn set_text_cursor(&mut self, cursor: Option<Position>) {
        self.text_cursor = cursor;
    }

    /// Switches the base tool.
    ///
    /// Any active component sub-mode is exited first and handed back so the
    /// caller can finish it (a lifted component must be put down again).
    /// Leaving `Type` drops the text cursor.
    pub fn select_tool(&mut self, tool: Tool) -> ComponentMode {
        let exited = self.exit_component_mode();
        if self.tool == Tool::Type && tool != Tool::Type {
            self.text_cursor = None;
        }
        if self.tool != tool {
            log::debug!("tool {:?} -> {:?}", self.tool, tool);
        }
        self.tool = tool;
        exited
    }

    /// Enters a component sub-mode, returning the one it replaces
    pub fn enter_component_mode(&mut self, mode: ComponentMode) -> ComponentMode {
        log::debug!("component mode {} -> {}", self.component_mode.name(), mode.name());
        std::mem::replace(&mut self.component_mode, mode)
    }

    pub fn exit_component_mode(&mut self) -> ComponentMode {
        std::mem::take(&mut self.component_mode)
    }

    pub fn route(&self) -> PointerRoute {
        match self.component_mode {
            ComponentMode::Idle => PointerRoute::Tool(self.tool),
            ComponentMode::Placing { .. } => PointerRoute::Placing,
            ComponentMode::BrushStamping { .. } => PointerRoute::BrushStamping,
            ComponentMode::Moving(_) => PointerRoute::Moving,
        }
    }
}
