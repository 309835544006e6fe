//! Tile registry
//!
//! The closed set of terrain kinds a grid cell can hold. Kinds are compared
//! by identity (enum discriminant), never by attribute values: the lit check
//! and the bonus tally both rely on two light colors with otherwise equal
//! attributes staying distinct.

/// Stat a lit light tile contributes to at level clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusKind {
    Damage,
    Health,
    Shield,
}

/// One terrain kind. Every cell of the world holds exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    StoneFloor,
    StoneWall,
    RedLight,
    GreenLight,
    BlueLight,
    Exit,
}

impl Tile {
    /// The three light colors, in texture order.
    pub const LIGHTS: [Tile; 3] = [Tile::RedLight, Tile::GreenLight, Tile::BlueLight];

    /// Which horizontal strip of the atlas this kind's subtiles live in.
    pub fn texture_index(self) -> i32 {
        match self {
            Tile::StoneFloor => 0,
            Tile::StoneWall => 1,
            Tile::RedLight => 2,
            Tile::GreenLight => 3,
            Tile::BlueLight => 4,
            Tile::Exit => 5,
        }
    }

    pub fn walkable(self) -> bool {
        !matches!(self, Tile::StoneWall)
    }

    pub fn is_light(self) -> bool {
        matches!(self, Tile::RedLight | Tile::GreenLight | Tile::BlueLight)
    }

    pub fn is_exit(self) -> bool {
        matches!(self, Tile::Exit)
    }

    /// Bonus stat awarded by this light color, `None` for non-lights.
    pub fn bonus(self) -> Option<BonusKind> {
        match self {
            Tile::RedLight => Some(BonusKind::Damage),
            Tile::GreenLight => Some(BonusKind::Health),
            Tile::BlueLight => Some(BonusKind::Shield),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_kinds_stay_distinct() {
        // Same walkable/light attributes, different identity.
        assert!(Tile::RedLight.is_light() && Tile::GreenLight.is_light());
        assert!(Tile::RedLight.walkable() && Tile::GreenLight.walkable());
        assert_ne!(Tile::RedLight, Tile::GreenLight);
    }

    #[test]
    fn test_bonus_mapping() {
        assert_eq!(Tile::RedLight.bonus(), Some(BonusKind::Damage));
        assert_eq!(Tile::GreenLight.bonus(), Some(BonusKind::Health));
        assert_eq!(Tile::BlueLight.bonus(), Some(BonusKind::Shield));
        assert_eq!(Tile::StoneFloor.bonus(), None);
        assert_eq!(Tile::Exit.bonus(), None);
    }

    #[test]
    fn test_walkability() {
        assert!(!Tile::StoneWall.walkable());
        assert!(Tile::StoneFloor.walkable());
        assert!(Tile::Exit.walkable());
    }
}
