//! Room arena and directional connectivity.
//!
//! Rooms live in a flat arena and refer to their neighbours by [`RoomId`], so
//! the graph may contain loops without any ownership cycles.

use super::{Room, RoomError};

/// Handle of a room inside a [`Dungeon`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RoomId(pub usize);

impl core::fmt::Display for RoomId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Compass direction of an exit. Parses English and French names and initials.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[strum(to_string = "north", serialize = "n", serialize = "nord")]
    North,
    #[strum(to_string = "south", serialize = "s", serialize = "sud")]
    South,
    #[strum(to_string = "east", serialize = "e", serialize = "est")]
    East,
    #[strum(to_string = "west", serialize = "w", serialize = "ouest", serialize = "o")]
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }
}

/// Exits of one room, indexed by direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Exits([Option<RoomId>; 4]);

impl Exits {
    pub fn get(&self, direction: Direction) -> Option<RoomId> {
        self.0[direction.slot()]
    }

    pub(crate) fn set(&mut self, direction: Direction, room: RoomId) {
        self.0[direction.slot()] = Some(room);
    }

    /// Open directions in compass order.
    pub fn directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|dir| self.get(*dir).is_some())
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dungeon {
    rooms: Vec<Room>,
    start: Option<RoomId>,
}

impl Dungeon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room. The first room added becomes the start unless changed.
    pub fn add_room(&mut self, room: Room) -> RoomId {
        let id = RoomId(self.rooms.len());
        self.rooms.push(room);
        self.start.get_or_insert(id);
        id
    }

    pub fn set_start(&mut self, id: RoomId) -> Result<(), RoomError> {
        self.check(id)?;
        self.start = Some(id);
        Ok(())
    }

    pub fn start(&self) -> Option<RoomId> {
        self.start
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.0)
    }

    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter().enumerate().map(|(i, room)| (RoomId(i), room))
    }

    /// Finds a room by exact name.
    pub fn find(&self, name: &str) -> Option<RoomId> {
        self.rooms
            .iter()
            .position(|room| room.name() == name)
            .map(RoomId)
    }

    pub fn neighbor(&self, id: RoomId, direction: Direction) -> Option<RoomId> {
        self.room(id)?.exits().get(direction)
    }

    /// One-way link `from --direction--> to`.
    pub fn connect(&mut self, from: RoomId, direction: Direction, to: RoomId) -> Result<(), RoomError> {
        self.check(to)?;
        let room = self
            .rooms
            .get_mut(from.0)
            .ok_or(RoomError::UnknownRoom(from))?;
        room.exits_mut().set(direction, to);
        Ok(())
    }

    /// Links both ways: `a --direction--> b` and `b --opposite--> a`.
    pub fn connect_bidirectional(
        &mut self,
        a: RoomId,
        direction: Direction,
        b: RoomId,
    ) -> Result<(), RoomError> {
        self.check(a)?;
        self.check(b)?;
        self.connect(a, direction, b)?;
        self.connect(b, direction.opposite(), a)
    }

    /// True once every room that ever held creatures is cleared.
    ///
    /// A dungeon without any creatures is never complete.
    pub fn is_complete(&self) -> bool {
        let mut guarded = self
            .rooms
            .iter()
            .filter(|room| !room.creatures().is_empty())
            .peekable();
        guarded.peek().is_some() && guarded.all(Room::is_cleared)
    }

    fn check(&self, id: RoomId) -> Result<(), RoomError> {
        if id.0 < self.rooms.len() {
            Ok(())
        } else {
            Err(RoomError::UnknownRoom(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_parse_aliases() {
        assert_eq!("N".parse::<Direction>().unwrap(), Direction::North);
        assert_eq!("ouest".parse::<Direction>().unwrap(), Direction::West);
        assert_eq!("Sud".parse::<Direction>().unwrap(), Direction::South);
        assert_eq!(Direction::East.to_string(), "east");
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn bidirectional_connection_mirrors() {
        let mut dungeon = Dungeon::new();
        let a = dungeon.add_room(Room::combat("A", ""));
        let b = dungeon.add_room(Room::combat("B", ""));

        dungeon.connect_bidirectional(a, Direction::North, b).unwrap();
        assert_eq!(dungeon.neighbor(a, Direction::North), Some(b));
        assert_eq!(dungeon.neighbor(b, Direction::South), Some(a));
        assert_eq!(dungeon.neighbor(a, Direction::East), None);
        assert_eq!(dungeon.start(), Some(a));
    }

    #[test]
    fn loops_are_allowed() {
        let mut dungeon = Dungeon::new();
        let a = dungeon.add_room(Room::combat("A", ""));
        let b = dungeon.add_room(Room::combat("B", ""));
        let c = dungeon.add_room(Room::combat("C", ""));

        dungeon.connect_bidirectional(a, Direction::East, b).unwrap();
        dungeon.connect_bidirectional(b, Direction::North, c).unwrap();
        dungeon.connect_bidirectional(c, Direction::West, a).unwrap();
        assert_eq!(dungeon.neighbor(a, Direction::East), Some(b));
        assert_eq!(dungeon.neighbor(a, Direction::West), Some(c));
    }

    #[test]
    fn unknown_rooms_are_rejected() {
        let mut dungeon = Dungeon::new();
        let a = dungeon.add_room(Room::combat("A", ""));
        assert_eq!(
            dungeon.connect(a, Direction::North, RoomId(7)),
            Err(RoomError::UnknownRoom(RoomId(7)))
        );
        assert_eq!(dungeon.neighbor(a, Direction::North), None);
    }

    #[test]
    fn empty_dungeon_is_never_complete() {
        let mut dungeon = Dungeon::new();
        dungeon.add_room(Room::resting("Camp", "", 10, 0));
        assert!(!dungeon.is_complete());
    }
}
