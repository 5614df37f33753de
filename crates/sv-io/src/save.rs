//! `MapFile`/`AgentsFile` JSON schema and conversion to/from the live
//! [`Map`] type.
//!
//! An explicit wire-format record is deserialized first, then converted
//! into the domain type in a second pass that can reject a malformed file
//! with a typed error, rather than deriving `Serialize`/`Deserialize`
//! directly on `Map` (whose field layout — a flat row-major `Vec<bool>` and
//! private `width`/`height` — is an implementation detail, not the
//! save-file contract).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use sv_core::{SvError, SvResult};
use sv_spatial::{Map, MapBuilder, MarkerType};

/// Top-level map save file: `{ "map": { ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapFile {
    pub map: MapBody,
}

/// One marker entry in a [`MapFile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub kind: MarkerType,
    pub location: [f32; 2],
}

/// The body of a [`MapFile`].
///
/// `walls` and `vision_modifier` are `size[0]` outer arrays of `size[1]`
/// inner arrays (column-major: `walls[x][y]`), matching `Map`'s own
/// `x * height + y` indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapBody {
    pub size: [u32; 2],
    pub targets: Vec<[f32; 2]>,
    pub towers: Vec<[f32; 2]>,
    /// Reserved entries; carried as an opaque count, never interpreted.
    pub gates: Vec<()>,
    pub markers: Vec<MarkerRecord>,
    pub walls: Vec<Vec<bool>>,
    pub vision_modifier: Vec<Vec<f32>>,
}

/// Agents save file: `{ "agents": [<strategy-tag-string>, ...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsFile {
    pub agents: Vec<String>,
}

/// Flattens a live `Map` into its wire representation.
pub fn map_to_file(map: &Map) -> MapFile {
    let (width, height) = (map.width(), map.height());

    let mut walls = Vec::with_capacity(width as usize);
    let mut vision_modifier = Vec::with_capacity(width as usize);
    for x in 0..width as i32 {
        let mut wall_col = Vec::with_capacity(height as usize);
        let mut vision_col = Vec::with_capacity(height as usize);
        for y in 0..height as i32 {
            wall_col.push(map.is_wall(x, y));
            vision_col.push(map.vision_modifier(x, y));
        }
        walls.push(wall_col);
        vision_modifier.push(vision_col);
    }

    MapFile {
        map: MapBody {
            size: [width, height],
            targets: map.targets.iter().map(|p| [p.x, p.y]).collect(),
            towers: map.towers.iter().map(|p| [p.x, p.y]).collect(),
            gates: map.gates.iter().map(|_| ()).collect(),
            markers: map
                .markers
                .iter()
                .map(|m| MarkerRecord {
                    kind: m.kind,
                    location: [m.location.x, m.location.y],
                })
                .collect(),
            walls,
            vision_modifier,
        },
    }
}

/// Rebuilds a `Map` from a parsed [`MapFile`].
///
/// Returns [`SvError::SaveFile`] if the `walls`/`vision_modifier` grids do
/// not match `size`.
pub fn map_from_file(file: &MapFile) -> SvResult<Map> {
    let [width, height] = file.map.size;
    let body = &file.map;

    if body.walls.len() != width as usize || body.vision_modifier.len() != width as usize {
        return Err(SvError::SaveFile(format!(
            "map grid width {} does not match declared size width {}",
            body.walls.len().max(body.vision_modifier.len()),
            width
        )));
    }
    for (x, (wall_col, vision_col)) in body.walls.iter().zip(body.vision_modifier.iter()).enumerate() {
        if wall_col.len() != height as usize || vision_col.len() != height as usize {
            return Err(SvError::SaveFile(format!(
                "map grid column {x} height does not match declared size height {height}"
            )));
        }
    }

    let mut builder = MapBuilder::new(width, height);
    for t in &body.targets {
        builder = builder.target(t[0] as i32, t[1] as i32);
    }
    for t in &body.towers {
        builder = builder.tower(t[0] as i32, t[1] as i32);
    }
    for m in &body.markers {
        builder = builder.marker(m.kind, sv_core::Position::new(m.location[0], m.location[1]));
    }
    let mut map = builder.build();

    for (x, (wall_col, vision_col)) in body.walls.iter().zip(body.vision_modifier.iter()).enumerate() {
        for (y, (&is_wall, &vision)) in wall_col.iter().zip(vision_col.iter()).enumerate() {
            map.set_wall(x as i32, y as i32, is_wall);
            map.set_vision(x as i32, y as i32, vision);
        }
    }

    Ok(map)
}

/// Loads a [`Map`] from a JSON map save file on disk.
pub fn load_map_file(path: &Path) -> SvResult<Map> {
    let text = fs::read_to_string(path)?;
    let file: MapFile =
        serde_json::from_str(&text).map_err(|e| SvError::SaveFile(format!("malformed map file: {e}")))?;
    map_from_file(&file)
}

/// Writes a `Map` to a JSON map save file on disk.
pub fn save_map_file(path: &Path, map: &Map) -> SvResult<()> {
    let file = map_to_file(map);
    let text = serde_json::to_string_pretty(&file)
        .map_err(|e| SvError::SaveFile(format!("failed to serialize map file: {e}")))?;
    fs::write(path, text)?;
    Ok(())
}

/// Loads a list of strategy tags from a JSON agents save file.
pub fn load_agents_file(path: &Path) -> SvResult<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let file: AgentsFile =
        serde_json::from_str(&text).map_err(|e| SvError::SaveFile(format!("malformed agents file: {e}")))?;
    Ok(file.agents)
}

/// Writes a list of strategy tags to a JSON agents save file.
pub fn save_agents_file(path: &Path, tags: &[String]) -> SvResult<()> {
    let file = AgentsFile { agents: tags.to_vec() };
    let text = serde_json::to_string_pretty(&file)
        .map_err(|e| SvError::SaveFile(format!("failed to serialize agents file: {e}")))?;
    fs::write(path, text)?;
    Ok(())
}
