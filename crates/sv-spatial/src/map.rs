//! The static world: walls, vision modifier, targets, towers, markers.
//!
//! `Map`/`MapBuilder` follow a builder-then-freeze shape, backed by a
//! flattened row-major grid (`Vec<bool>` walls, `Vec<f32>` vision
//! modifiers).

use sv_core::Position;

/// The different types of markers used for indirect communication.
///
/// Reserved for strategy use; the core only stores and enumerates these.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerType {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
}

/// A marker dropped on the map by an agent.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    pub kind: MarkerType,
    pub location: Position,
}

/// Reserved entity for doors/windows. No core predicate reads this; it is
/// carried only as inert storage.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gate;

/// Immutable static world: size, walls, vision modifier, targets, towers,
/// markers, and reserved gates.
///
/// Construct via [`MapBuilder`]; a `Map` never mutates once built (the
/// editor, out of scope for this core, is the only thing that would rebuild
/// one mid-run).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Map {
    width: u32,
    height: u32,
    walls: Vec<bool>,
    vision_modifier: Vec<f32>,
    pub targets: Vec<Position>,
    pub towers: Vec<Position>,
    pub markers: Vec<Marker>,
    pub gates: Vec<Gate>,
}

impl Map {
    #[inline]
    fn idx(&self, x: i32, y: i32) -> usize {
        (x as u32 * self.height + y as u32) as usize
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Out-of-bounds queries return `true` — an agent can never path or see
    /// through the edge of the world.
    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.walls[self.idx(x, y)]
    }

    pub fn set_wall(&mut self, x: i32, y: i32, value: bool) {
        if self.in_bounds(x, y) {
            let i = self.idx(x, y);
            self.walls[i] = value;
        }
    }

    /// Fills only the rectangle's four edges, matching
    /// `environment.py::Map.set_wall_rectangle`.
    pub fn set_wall_rectangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, value: bool) {
        let (x0, x1) = if x0 > x1 { (x1, x0) } else { (x0, x1) };
        let (y0, y1) = if y0 > y1 { (y1, y0) } else { (y0, y1) };
        for x in x0..=x1 {
            self.set_wall(x, y0, value);
            self.set_wall(x, y1, value);
        }
        for y in y0..=y1 {
            self.set_wall(x0, y, value);
            self.set_wall(x1, y, value);
        }
    }

    #[inline]
    pub fn vision_modifier(&self, x: i32, y: i32) -> f32 {
        if !self.in_bounds(x, y) {
            return 1.0;
        }
        self.vision_modifier[self.idx(x, y)]
    }

    pub fn set_vision(&mut self, x: i32, y: i32, value: f32) {
        if self.in_bounds(x, y) {
            let i = self.idx(x, y);
            self.vision_modifier[i] = value.clamp(0.0, 1.0);
        }
    }

    pub fn set_vision_area(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, value: f32) {
        let (x0, x1) = if x0 > x1 { (x1, x0) } else { (x0, x1) };
        let (y0, y1) = if y0 > y1 { (y1, y0) } else { (y0, y1) };
        let clamped = value.clamp(0.0, 1.0);
        for x in x0..=x1 {
            for y in y0..=y1 {
                self.set_vision(x, y, clamped);
            }
        }
    }

    pub fn add_target(&mut self, x: i32, y: i32) {
        self.targets.push(Position::new(x as f32, y as f32));
    }

    /// Removes the first target within Manhattan distance 2 of `(x, y)`.
    pub fn remove_target(&mut self, x: i32, y: i32) {
        remove_nearest(&mut self.targets, x, y);
    }

    pub fn add_tower(&mut self, x: i32, y: i32) {
        self.towers.push(Position::new(x as f32, y as f32));
    }

    /// Removes the first tower within Manhattan distance 2 of `(x, y)`.
    pub fn remove_tower(&mut self, x: i32, y: i32) {
        remove_nearest(&mut self.towers, x, y);
    }
}

fn remove_nearest(points: &mut Vec<Position>, x: i32, y: i32) {
    let target = Position::new(x as f32, y as f32);
    if let Some(i) = points.iter().position(|p| p.manhattan_to(target) <= 2.0) {
        points.remove(i);
    }
}

/// Builder-then-freeze constructor for [`Map`].
pub struct MapBuilder {
    width: u32,
    height: u32,
    walls: Vec<bool>,
    vision_modifier: Vec<f32>,
    targets: Vec<Position>,
    towers: Vec<Position>,
    markers: Vec<Marker>,
    gates: Vec<Gate>,
}

impl MapBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        let n = (width * height) as usize;
        Self {
            width,
            height,
            walls: vec![false; n],
            vision_modifier: vec![1.0; n],
            targets: Vec::new(),
            towers: Vec::new(),
            markers: Vec::new(),
            gates: Vec::new(),
        }
    }

    pub fn target(mut self, x: i32, y: i32) -> Self {
        self.targets.push(Position::new(x as f32, y as f32));
        self
    }

    pub fn tower(mut self, x: i32, y: i32) -> Self {
        self.towers.push(Position::new(x as f32, y as f32));
        self
    }

    pub fn marker(mut self, kind: MarkerType, location: Position) -> Self {
        self.markers.push(Marker { kind, location });
        self
    }

    /// Consume the builder and produce an immutable [`Map`].
    pub fn build(self) -> Map {
        Map {
            width: self.width,
            height: self.height,
            walls: self.walls,
            vision_modifier: self.vision_modifier,
            targets: self.targets,
            towers: self.towers,
            markers: self.markers,
            gates: self.gates,
        }
    }
}
