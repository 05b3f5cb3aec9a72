use strum::{Display, EnumString, IntoStaticStr, VariantArray};

/// Furniture or features that can appear in a cell.
///
/// Names are snake_case in puzzle files and are matched case-insensitively.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Display, EnumString, IntoStaticStr, VariantArray)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ObjectKind {
    /// Can be stood at.
    Window,
    /// Can be stood (or lain) on.
    Bed,
    /// Covers the floor; can be stood on.
    Carpet,
    /// Blocks its cell.
    Plant,
    /// Blocks its cell.
    Table,
    /// Can be sat on.
    Chair,
    /// Blocks its cell.
    Tv,
    /// Blocks its cell.
    Bookshelf,
    /// Can be stood at.
    CashRegister,
    /// Blocks its cell.
    Rubbish,
    /// Blocks its cell.
    Rock,
    /// Blocks its cell.
    Computer,
    /// Can be stood on.
    Gift,
    /// Blocks its cell.
    Box,
}

impl ObjectKind {
    /// Whether a person may not stand on a cell holding this object.
    pub const fn blocks(self) -> bool {
        match self {
            Self::Plant
            | Self::Table
            | Self::Tv
            | Self::Bookshelf
            | Self::Rubbish
            | Self::Rock
            | Self::Computer
            | Self::Box => true,
            Self::Window | Self::Bed | Self::Carpet | Self::Chair | Self::CashRegister | Self::Gift => false,
        }
    }

    /// Every recognised object name, for error messages.
    pub fn names() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|kind| kind.into()).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn blocking_table() {
        assert!(ObjectKind::Table.blocks());
        assert!(ObjectKind::Plant.blocks());
        assert!(!ObjectKind::Window.blocks());
        assert!(!ObjectKind::Bed.blocks());
        assert!(!ObjectKind::Carpet.blocks());
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(ObjectKind::from_str("WINDOW").unwrap(), ObjectKind::Window);
        assert_eq!(ObjectKind::from_str("cash_register").unwrap(), ObjectKind::CashRegister);
        assert!(ObjectKind::from_str("sofa").is_err());
    }

    #[test]
    fn displays_snake_case() {
        assert_eq!(ObjectKind::CashRegister.to_string(), "cash_register");
        assert!(ObjectKind::names().contains(&"tv"));
        assert_eq!(ObjectKind::names().len(), ObjectKind::VARIANTS.len());
    }
}
