//! # Display Management
//!
//! A plain-text frame of the current game, used by the command line shell and
//! by tests.

use crate::game::{GameState, Position, TileGrid, TileType, TurnEngine};
use crate::DelveResult;
use std::fmt;

/// Snapshot of everything a presenter draws, as text.
///
/// Tiles in view show as `#` (wall) and `.` (floor). Remembered tiles that
/// are out of view show as `▒` and `·`; unexplored tiles are blank. Entities
/// are only drawn on tiles in view, actors over items over corpses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiFrame {
    /// One string per map row
    pub rows: Vec<String>,
    pub hp: i32,
    pub max_hp: i32,
    pub state: GameState,
    /// Newest log lines, oldest first
    pub messages: Vec<String>,
}

impl AsciiFrame {
    /// Captures the engine's state with up to `message_lines` log lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{AsciiFrame, GameConfig, TurnEngine};
    ///
    /// let engine = TurnEngine::new(GameConfig::for_testing(3)).unwrap();
    /// let frame = AsciiFrame::capture(&engine, 5).unwrap();
    ///
    /// let start = engine.player().unwrap().position;
    /// assert_eq!(frame.glyph_at(start), Some('@'));
    /// assert_eq!(frame.hud(), "HP: 30/30");
    /// ```
    pub fn capture(engine: &TurnEngine, message_lines: usize) -> DelveResult<Self> {
        let grid = &engine.map().grid;
        let mut cells: Vec<Vec<char>> = (0..grid.height as i32)
            .map(|y| (0..grid.width as i32).map(|x| tile_glyph(grid, Position::new(x, y))).collect())
            .collect();

        for (_, entity) in engine.entities().render_list() {
            if !grid.is_visible(entity.position) {
                continue;
            }
            let cell = cells
                .get_mut(entity.position.y as usize)
                .and_then(|row| row.get_mut(entity.position.x as usize));
            if let Some(cell) = cell {
                *cell = entity.glyph;
            }
        }

        let (hp, max_hp) = engine.player_hp()?;
        Ok(Self {
            rows: cells.into_iter().map(|row| row.into_iter().collect()).collect(),
            hp,
            max_hp,
            state: engine.state(),
            messages: engine
                .message_log()
                .tail(message_lines)
                .map(|message| message.text.clone())
                .collect(),
        })
    }

    /// Character drawn at `pos`, if it is on the map.
    pub fn glyph_at(&self, pos: Position) -> Option<char> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.rows.get(pos.y as usize)?.chars().nth(pos.x as usize)
    }

    pub fn hud(&self) -> String {
        format!("HP: {}/{}", self.hp, self.max_hp)
    }
}

fn tile_glyph(grid: &TileGrid, pos: Position) -> char {
    let Some(tile) = grid.get_tile(pos) else {
        return ' ';
    };
    match (tile.tile_type, tile.visible, tile.explored) {
        (TileType::Wall, true, _) => '#',
        (TileType::Floor, true, _) => '.',
        (TileType::Wall, false, true) => '▒',
        (TileType::Floor, false, true) => '·',
        (_, false, false) => ' ',
    }
}

impl fmt::Display for AsciiFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row.trim_end())?;
        }
        writeln!(f, "{}  [{}]", self.hud(), self.state)?;
        for message in &self.messages {
            writeln!(f, "{message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Color, Direction, Entity, Fighter, GameConfig, GameMap, Intent, RenderOrder};
    use crate::generation::{ItemKind, MonsterKind};

    fn corridor_engine() -> TurnEngine {
        // Two rooms joined by a door-width gap in a dividing wall.
        let mut map = GameMap::new(30, 9);
        for x in 1..29 {
            for y in 1..8 {
                if x != 15 || y == 4 {
                    map.grid.carve(Position::new(x, y));
                }
            }
        }
        let player = Entity::player(Position::new(3, 4), Fighter::new(30, 2, 5), 26);
        let mut corpse = MonsterKind::Orc.spawn(Position::new(4, 4));
        corpse.convert_to_corpse();
        let entities = vec![
            ItemKind::HealingPotion.spawn(Position::new(5, 4)),
            corpse,
            Entity::new("Statue", Position::new(26, 6), 'S', Color::WHITE, true, RenderOrder::Actor),
        ];
        let mut config = GameConfig::for_testing(1);
        config.fov.radius = 4;
        TurnEngine::from_parts(map, player, entities, config).unwrap()
    }

    #[test]
    fn test_visible_entities_are_drawn() {
        let frame = AsciiFrame::capture(&corridor_engine(), 3).unwrap();

        assert_eq!(frame.glyph_at(Position::new(3, 4)), Some('@'));
        assert_eq!(frame.glyph_at(Position::new(5, 4)), Some('!'));
        assert_eq!(frame.glyph_at(Position::new(4, 4)), Some('%'));
        assert_eq!(frame.glyph_at(Position::new(3, 0)), Some('#'));
        assert_eq!(frame.glyph_at(Position::new(6, 5)), Some('.'));
    }

    #[test]
    fn test_out_of_sight_is_blank() {
        let frame = AsciiFrame::capture(&corridor_engine(), 3).unwrap();
        // Beyond the dividing wall and the sight radius.
        assert_eq!(frame.glyph_at(Position::new(26, 6)), Some(' '));
        assert_eq!(frame.glyph_at(Position::new(40, 0)), None);
    }

    #[test]
    fn test_remembered_tiles_are_dimmed() {
        let mut engine = corridor_engine();
        for _ in 0..3 {
            engine.handle_intent(&Intent::movement(Direction::East)).unwrap();
        }
        let frame = AsciiFrame::capture(&engine, 3).unwrap();

        assert_eq!(frame.glyph_at(Position::new(6, 4)), Some('@'));
        // Seen from the start, now beyond the radius of 4.
        assert_eq!(frame.glyph_at(Position::new(0, 4)), Some('▒'));
        assert_eq!(frame.glyph_at(Position::new(1, 4)), Some('·'));
    }

    #[test]
    fn test_display_includes_hud_and_messages() {
        let mut engine = corridor_engine();
        engine.handle_intent(&Intent::pickup()).unwrap();
        let text = AsciiFrame::capture(&engine, 3).unwrap().to_string();

        assert!(text.contains("HP: 30/30  [Player's turn]"));
        assert!(text.ends_with("There is nothing here to pick up.\n"));
    }
}
