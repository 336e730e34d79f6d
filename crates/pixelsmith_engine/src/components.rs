//! Reusable components (stamps) and the layer of placed components
//!
//! Placing a component paints its non-background pixels straight into the
//! canvas buffer and keeps a copy of the background it covered. That copy is
//! replayed when the component is removed or picked up again, so the canvas
//! returns to exactly what it was before the placement.
//!
//! Readers never look at the raw buffer; they call
//! [`ComponentLayer::composite`] which overlays every placed component, in
//! placement order, on top of the buffer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Color, EngineError, PixelBuffer, Position, Result, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(pub u64);

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named rectangular sub-image
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub data: Vec<Color>,
    pub timestamp: DateTime<Utc>,
}

impl Component {
    pub fn new(name: impl Into<String>, width: i32, height: i32, data: Vec<Color>) -> Result<Self> {
        let expected = (width.max(0) * height.max(0)) as usize;
        if data.len() != expected {
            return Err(EngineError::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            width,
            height,
            data,
            timestamp: Utc::now(),
        })
    }

    pub fn from_buffer(name: impl Into<String>, buffer: &PixelBuffer) -> Self {
        Self {
            name: name.into(),
            width: buffer.width(),
            height: buffer.height(),
            data: buffer.to_flat(),
            timestamp: Utc::now(),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Color {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Color::BACKGROUND;
        }
        self.data.get((y * self.width + x) as usize).copied().unwrap_or(Color::BACKGROUND)
    }

    pub fn is_blank(&self) -> bool {
        self.data.iter().all(Color::is_background)
    }

    /// Non-background cells as offsets from the component's top-left corner
    pub fn design_cells(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_background())
            .map(move |(i, c)| (Position::new(i as i32 % width, i as i32 / width), *c))
    }

    /// Paints the non-background cells at `pos`, clipping at the buffer edges
    pub fn stamp_onto(&self, buffer: &mut PixelBuffer, pos: Position) -> bool {
        buffer.overlay_region(pos, self.size(), &self.data)
    }
}

/// A component instance on the canvas
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedComponent {
    pub id: ComponentId,
    pub position: Position,
    pub component: Component,
}

impl PlacedComponent {
    pub fn size(&self) -> Size {
        self.component.size()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.position.x
            && pos.y >= self.position.y
            && pos.x < self.position.x + self.component.width
            && pos.y < self.position.y + self.component.height
    }
}

/// The canvas content a placed component covered when it was placed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundPatch {
    pub position: Position,
    pub size: Size,
    pub pixels: Vec<Color>,
}

impl BackgroundPatch {
    pub fn capture(buffer: &PixelBuffer, position: Position, size: Size) -> Self {
        Self {
            position,
            size,
            pixels: buffer.copy_region(position, size),
        }
    }

    pub fn restore(&self, buffer: &mut PixelBuffer) -> bool {
        buffer.write_region(self.position, self.size, &self.pixels)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let local = pos - self.position;
        if !self.size.contains(local) {
            return None;
        }
        Some((local.y * self.size.width + local.x) as usize)
    }

    /// The saved background at canvas position `pos`
    pub fn color_at(&self, pos: Position) -> Option<Color> {
        self.index(pos).and_then(|i| self.pixels.get(i).copied())
    }

    pub fn set(&mut self, pos: Position, color: Color) -> bool {
        match self.index(pos).and_then(|i| self.pixels.get_mut(i)) {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        }
    }
}

/// Placed components plus the background patch each one owns
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentLayer {
    placed: Vec<PlacedComponent>,
    patches: BTreeMap<ComponentId, BackgroundPatch>,
    next_id: u64,
}

impl ComponentLayer {
    pub fn placed(&self) -> &[PlacedComponent] {
        &self.placed
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn get(&self, id: ComponentId) -> Option<&PlacedComponent> {
        self.placed.iter().find(|p| p.id == id)
    }

    pub fn patch(&self, id: ComponentId) -> Option<&BackgroundPatch> {
        self.patches.get(&id)
    }

    pub fn patch_count(&self) -> usize {
        self.patches.len()
    }

    fn allocate_id(&mut self) -> ComponentId {
        self.next_id += 1;
        ComponentId(self.next_id)
    }

    /// Places `template` with its top-left corner at `pos`.
    ///
    /// Fails with `OutOfBoundsPlacement` and touches nothing if the component
    /// does not fit entirely inside the buffer.
    pub fn place(&mut self, buffer: &mut PixelBuffer, template: &Component, pos: Position) -> Result<ComponentId> {
        let id = self.allocate_id();
        self.place_with_id(buffer, id, template.clone(), pos)?;
        Ok(id)
    }

    pub(crate) fn place_with_id(&mut self, buffer: &mut PixelBuffer, id: ComponentId, component: Component, pos: Position) -> Result<()> {
        let size = component.size();
        if !buffer.size().contains_rect(pos, size) {
            return Err(EngineError::OutOfBoundsPlacement {
                x: pos.x,
                y: pos.y,
                width: size.width,
                height: size.height,
            });
        }
        self.patches.insert(id, BackgroundPatch::capture(buffer, pos, size));
        component.stamp_onto(buffer, pos);
        self.placed.push(PlacedComponent { id, position: pos, component });
        Ok(())
    }

    /// Takes a component off the canvas and restores the background under it.
    ///
    /// The canvas looks as if the component had never been placed. Components
    /// placed later saw the lifted one in their background patch; inside the
    /// lifted rectangle they are unwound, their patches are recaptured without
    /// it and they are stamped again.
    pub fn lift(&mut self, buffer: &mut PixelBuffer, id: ComponentId) -> Result<PlacedComponent> {
        let index = self
            .placed
            .iter()
            .position(|p| p.id == id)
            .ok_or(EngineError::UnknownComponent { id: id.0 })?;
        let origin = self.placed[index].position;
        let area = self.placed[index].size();
        let cells: Vec<Position> = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| origin + Position::new(x, y)))
            .collect();

        for later in self.placed[index + 1..].iter().rev() {
            if let Some(patch) = self.patches.get(&later.id) {
                for pos in &cells {
                    if let Some(color) = patch.color_at(*pos) {
                        buffer.set(pos.x, pos.y, color);
                    }
                }
            }
        }

        let placed = self.placed.remove(index);
        if let Some(patch) = self.patches.remove(&id) {
            patch.restore(buffer);
        }

        for later in &self.placed[index..] {
            if let Some(patch) = self.patches.get_mut(&later.id) {
                for pos in &cells {
                    if let Some(color) = buffer.get(pos.x, pos.y) {
                        patch.set(*pos, color);
                    }
                }
            }
            for (offset, color) in later.component.design_cells() {
                let pos = later.position + offset;
                if placed.contains(pos) {
                    buffer.set(pos.x, pos.y, color);
                }
            }
        }
        Ok(placed)
    }

    pub fn remove(&mut self, buffer: &mut PixelBuffer, id: ComponentId) -> Result<()> {
        self.lift(buffer, id).map(|_| ())
    }

    /// Puts a lifted component down at `pos`, or back at its old position if
    /// `pos` does not fit. Returns the position it ended up at.
    pub fn drop_at(&mut self, buffer: &mut PixelBuffer, lifted: PlacedComponent, pos: Position) -> Result<Position> {
        if buffer.size().contains_rect(pos, lifted.size()) {
            self.place_with_id(buffer, lifted.id, lifted.component, pos)?;
            return Ok(pos);
        }
        log::warn!("component {} does not fit at {pos}, reverting to {}", lifted.id, lifted.position);
        let origin = lifted.position;
        self.place_with_id(buffer, lifted.id, lifted.component, origin)?;
        Ok(origin)
    }

    /// Topmost placed component covering `pos`
    pub fn hit_test(&self, pos: Position) -> Option<ComponentId> {
        self.placed.iter().rev().find(|p| p.contains(pos)).map(|p| p.id)
    }

    /// Buffer content with every placed component overlaid in placement order
    pub fn composite(&self, buffer: &PixelBuffer) -> Vec<Color> {
        let mut result = buffer.clone();
        for placed in &self.placed {
            placed.component.stamp_onto(&mut result, placed.position);
        }
        result.to_flat()
    }

    /// Composited color of one cell, the topmost non-background component pixel wins
    pub fn composite_at(&self, buffer: &PixelBuffer, pos: Position) -> Color {
        self.placed
            .iter()
            .rev()
            .filter(|p| p.contains(pos))
            .map(|p| p.component.pixel(pos.x - p.position.x, pos.y - p.position.y))
            .find(|c| !c.is_background())
            .unwrap_or_else(|| buffer.color_at(pos.x, pos.y))
    }

    /// Drops background patches whose component no longer exists
    pub fn collect_orphans(&mut self) -> usize {
        let before = self.patches.len();
        let placed = &self.placed;
        self.patches.retain(|id, _| placed.iter().any(|p| p.id == *id));
        let removed = before - self.patches.len();
        if removed > 0 {
            log::debug!("collected {removed} orphaned background patches");
        }
        removed
    }

    /// Moves every component by `offset` after a canvas resize.
    ///
    /// Components that no longer fit into `new_size` are deleted together
    /// with their patch. Returns the ids of the deleted components.
    pub fn translate(&mut self, offset: Position, new_size: Size) -> Vec<ComponentId> {
        let mut removed = Vec::new();
        for placed in &mut self.placed {
            placed.position += offset;
        }
        for patch in self.patches.values_mut() {
            patch.position += offset;
        }
        self.placed.retain(|p| {
            let fits = new_size.contains_rect(p.position, p.size());
            if !fits {
                removed.push(p.id);
            }
            fits
        });
        for id in &removed {
            self.patches.remove(id);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.placed.clear();
        self.patches.clear();
    }
}
