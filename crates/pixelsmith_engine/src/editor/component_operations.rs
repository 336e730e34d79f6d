use crate::{
    Color, EngineError, PixelBuffer, Position, Result, Size,
    components::{Component, ComponentId},
    mode::{ComponentMode, MoveGesture},
    render::{PreviewCell, stamp_preview},
    resize::clamp_dimension,
};

use super::{ContentChange, EditorSession, StrokeKind};

impl EditorSession {
    // ═══════════════════════════════════════════════════════════════════════
    // Library
    // ═══════════════════════════════════════════════════════════════════════

    /// The composited canvas as a new component, rejecting a blank canvas.
    ///
    /// With `crop` the result is cut down to the painted cells.
    fn canvas_as_component(&self, name: &str, crop: bool) -> Result<Component> {
        if name.trim().is_empty() {
            return Err(EngineError::EmptyName);
        }
        let canvas = PixelBuffer::from_flat(self.width(), self.height(), self.composite())?;
        let Some((origin, size)) = canvas.content_bounds() else {
            return Err(EngineError::EmptyCanvasSave);
        };
        if crop {
            Component::new(name.trim(), size.width, size.height, canvas.copy_region(origin, size))
        } else {
            Ok(Component::from_buffer(name.trim(), &canvas))
        }
    }

    /// Saves the painted part of the canvas as a reusable component
    pub fn save_as_component(&mut self, name: &str, overwrite: bool) -> Result<()> {
        let component = self.canvas_as_component(name, true)?;
        let replaced = self.library.insert_component(component, overwrite)?;
        log::info!("saved component '{}'{}", name.trim(), if replaced { " (replaced)" } else { "" });
        Ok(())
    }

    /// Saves the whole canvas as a composition
    pub fn save_as_composition(&mut self, name: &str, overwrite: bool) -> Result<()> {
        let composition = self.canvas_as_component(name, false)?;
        let replaced = self.library.insert_composition(composition, overwrite)?;
        log::info!("saved composition '{}'{}", name.trim(), if replaced { " (replaced)" } else { "" });
        Ok(())
    }

    pub fn delete_component(&mut self, name: &str) -> Result<()> {
        self.library.remove_component(name)?;
        log::info!("deleted component '{name}'");
        Ok(())
    }

    /// Replaces the canvas with a stored composition as one edit
    pub fn load_composition(&mut self, name: &str) -> Result<()> {
        let composition = self.library.composition(name)?.clone();
        let buffer = PixelBuffer::from_flat(composition.width, composition.height, composition.data)?;
        self.settle_gestures();
        self.replace_canvas_internal(buffer);
        self.commit(format!("Load composition {name}"));
        Ok(())
    }

    /// Loads flat data, clamping the dimensions into `[1, 480]` first
    pub fn load_canvas(&mut self, data: &[Color], width: i32, height: i32) -> Result<()> {
        let width = clamp_dimension(width);
        let height = clamp_dimension(height);
        let mut buffer = PixelBuffer::new(width, height);
        buffer.load_flat(data)?;
        self.settle_gestures();
        self.replace_canvas_internal(buffer);
        self.commit("Load canvas");
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Placement
    // ═══════════════════════════════════════════════════════════════════════

    /// Places the stored component `name` with its top-left corner at `(x, y)`
    pub fn place_component(&mut self, name: &str, x: i32, y: i32) -> Result<ComponentId> {
        let template = self.library.component(name)?.clone();
        self.place_template(&template, Position::new(x, y))
    }

    pub fn place_template(&mut self, template: &Component, pos: Position) -> Result<ComponentId> {
        self.settle_gestures();
        let id = self.layer.place(&mut self.buffer, template, pos)?;
        log::debug!("placed '{}' as #{id} at {pos}", template.name);
        self.notify(ContentChange::Components);
        self.commit(format!("Place {}", template.name));
        Ok(id)
    }

    /// Arms placement: the next click commits the component at the hovered cell
    pub fn enter_placing(&mut self, name: &str) -> Result<()> {
        let template = self.library.component(name)?.clone();
        self.settle_gestures();
        let hover = self.hover;
        let previous = self.modes.enter_component_mode(ComponentMode::Placing { template, hover });
        self.finish_component_mode(previous);
        Ok(())
    }

    /// Places the armed component at `pos` and leaves placement mode.
    ///
    /// On failure the mode stays armed so the user can try another cell.
    pub fn commit_placement(&mut self, pos: Position) -> Result<ComponentId> {
        let ComponentMode::Placing { template, .. } = self.modes.component_mode() else {
            return Err(EngineError::generic("Not placing a component"));
        };
        let template = template.clone();
        let id = self.place_template(&template, pos)?;
        self.modes.exit_component_mode();
        Ok(id)
    }

    /// Arms brush stamping: dragging paints the component without tracking it
    pub fn enter_brush_stamping(&mut self, name: &str) -> Result<()> {
        let template = self.library.component(name)?.clone();
        self.settle_gestures();
        let previous = self.modes.enter_component_mode(ComponentMode::BrushStamping { template });
        self.finish_component_mode(previous);
        Ok(())
    }

    pub fn exit_component_mode(&mut self) {
        self.end_stroke();
        let previous = self.modes.exit_component_mode();
        self.finish_component_mode(previous);
    }

    /// Paints the component at `(x, y)` as one destructive edit
    pub fn stamp_component(&mut self, name: &str, x: i32, y: i32) -> Result<()> {
        let template = self.library.component(name)?.clone();
        let pos = Position::new(x, y);
        if !self.dimensions().contains_rect(pos, template.size()) {
            return Err(EngineError::OutOfBoundsPlacement {
                x,
                y,
                width: template.width,
                height: template.height,
            });
        }
        self.settle_gestures();
        if template.stamp_onto(&mut self.buffer, pos) {
            self.notify(ContentChange::Pixels);
            self.commit(StrokeKind::Stamp.description());
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Move & remove
    // ═══════════════════════════════════════════════════════════════════════

    /// Lifts a placed component so it follows the pointer.
    ///
    /// The background under it is restored immediately.
    pub fn begin_move(&mut self, id: ComponentId, pointer: Position) -> Result<()> {
        self.settle_gestures();
        self.layer.collect_orphans();
        let lifted = self.layer.lift(&mut self.buffer, id)?;
        let gesture = MoveGesture {
            grab_offset: pointer - lifted.position,
            hover: Some(lifted.position),
            component: lifted,
        };
        let previous = self.modes.enter_component_mode(ComponentMode::Moving(gesture));
        self.finish_component_mode(previous);
        self.notify(ContentChange::Components);
        Ok(())
    }

    pub fn update_move(&mut self, pointer: Position) {
        if let ComponentMode::Moving(gesture) = self.modes.component_mode_mut() {
            gesture.hover = Some(gesture.target_for(pointer));
        }
    }

    /// Drops the lifted component for the pointer at `pointer`.
    ///
    /// A destination outside the canvas puts it back at its old position and
    /// reports `OutOfBoundsPlacement`.
    pub fn commit_move(&mut self, pointer: Position) -> Result<Position> {
        let ComponentMode::Moving(gesture) = self.modes.exit_component_mode() else {
            return Err(EngineError::generic("No component is being moved"));
        };
        let target = gesture.target_for(pointer);
        let size = gesture.component.size();
        let final_pos = self.layer.drop_at(&mut self.buffer, gesture.component, target)?;
        self.layer.collect_orphans();
        self.notify(ContentChange::Components);
        self.commit("Move component");
        if final_pos != target {
            return Err(EngineError::OutOfBoundsPlacement {
                x: target.x,
                y: target.y,
                width: size.width,
                height: size.height,
            });
        }
        Ok(final_pos)
    }

    /// Moves a placed component so its top-left corner lands on `(x, y)`
    pub fn move_component(&mut self, id: ComponentId, x: i32, y: i32) -> Result<()> {
        let origin = self.layer.get(id).map(|p| p.position).ok_or(EngineError::UnknownComponent { id: id.0 })?;
        self.begin_move(id, origin)?;
        self.commit_move(Position::new(x, y)).map(|_| ())
    }

    /// Removes a placed component and restores the background it covered
    pub fn remove_component(&mut self, id: ComponentId) -> Result<()> {
        self.settle_gestures();
        self.layer.remove(&mut self.buffer, id)?;
        self.layer.collect_orphans();
        self.notify(ContentChange::Components);
        self.commit("Remove component");
        Ok(())
    }

    /// Topmost placed component under `pos`
    pub fn hit_test(&self, pos: Position) -> Option<ComponentId> {
        self.layer.hit_test(pos)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Clear
    // ═══════════════════════════════════════════════════════════════════════

    /// Clears pixels and placed components, keeping the guides
    pub fn clear(&mut self) {
        self.settle_gestures();
        let blank = PixelBuffer::new(self.width(), self.height());
        self.replace_canvas_internal(blank);
        self.commit("Clear");
    }

    /// Like [`Self::clear`] but also hides the guides
    pub fn clear_all(&mut self) {
        self.clear();
        if self.reference_lines.is_visible() {
            self.reference_lines.set_visible(false);
            self.notify(ContentChange::ReferenceLines);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Preview
    // ═══════════════════════════════════════════════════════════════════════

    /// Two-tone preview for placement or move at the hovered cell
    pub fn stamp_preview(&self) -> Vec<PreviewCell> {
        let canvas: Size = self.dimensions();
        match self.modes.component_mode() {
            ComponentMode::Placing {
                template,
                hover: Some(at),
            } => stamp_preview(template, *at, canvas),
            ComponentMode::Moving(MoveGesture {
                component,
                hover: Some(at),
                ..
            }) => stamp_preview(&component.component, *at, canvas),
            ComponentMode::BrushStamping { template } => match self.hover {
                Some(at) => stamp_preview(template, at, canvas),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }
}
