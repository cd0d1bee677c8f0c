use core::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidSymbol;
use crate::genome::TeId;

/// The marker stored at one position of a genome.
///
/// Every position is either free (`Empty`) or belongs to exactly one TE, in
/// which case the tag records both the owner and whether that TE is still
/// active. The rendered form of a genome is the concatenation of
/// [`Symbol::to_char`] over its positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Symbol {
    #[default]
    Empty,
    Active(TeId),
    Inactive(TeId),
}

impl Symbol {
    pub const EMPTY_CHAR: char = '-';
    pub const ACTIVE_CHAR: char = 'A';
    pub const INACTIVE_CHAR: char = 'x';

    /// Character used when rendering this position.
    #[inline(always)]
    pub const fn to_char(self) -> char {
        self.class().to_char()
    }

    /// The TE owning this position, if any.
    #[inline]
    pub const fn te(self) -> Option<TeId> {
        match self {
            Self::Empty => None,
            Self::Active(id) | Self::Inactive(id) => Some(id),
        }
    }

    #[inline]
    pub const fn class(self) -> SymbolClass {
        match self {
            Self::Empty => SymbolClass::Empty,
            Self::Active(_) => SymbolClass::Active,
            Self::Inactive(_) => SymbolClass::Inactive,
        }
    }

    #[inline(always)]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Flip an active tag to inactive. Other symbols are returned unchanged.
    #[inline]
    pub const fn deactivated(self) -> Self {
        match self {
            Self::Active(id) => Self::Inactive(id),
            other => other,
        }
    }
}

impl From<Symbol> for char {
    #[inline(always)]
    fn from(symbol: Symbol) -> char {
        symbol.to_char()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// What a rendered character says about a position: its tag without the
/// owning TE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolClass {
    Empty,
    Active,
    Inactive,
}

impl SymbolClass {
    #[inline(always)]
    pub const fn to_char(self) -> char {
        match self {
            Self::Empty => Symbol::EMPTY_CHAR,
            Self::Active => Symbol::ACTIVE_CHAR,
            Self::Inactive => Symbol::INACTIVE_CHAR,
        }
    }

    /// Parse one rendered character.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            Symbol::EMPTY_CHAR => Some(Self::Empty),
            Symbol::ACTIVE_CHAR => Some(Self::Active),
            Symbol::INACTIVE_CHAR => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl From<Symbol> for SymbolClass {
    #[inline(always)]
    fn from(symbol: Symbol) -> Self {
        symbol.class()
    }
}

impl TryFrom<char> for SymbolClass {
    type Error = InvalidSymbol;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or(InvalidSymbol(c))
    }
}

impl From<SymbolClass> for char {
    #[inline(always)]
    fn from(class: SymbolClass) -> char {
        class.to_char()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_to_char() {
        assert_eq!(Symbol::Empty.to_char(), '-');
        assert_eq!(Symbol::Active(TeId::new(1)).to_char(), 'A');
        assert_eq!(Symbol::Inactive(TeId::new(1)).to_char(), 'x');
    }

    #[test]
    fn test_symbol_te() {
        assert_eq!(Symbol::Empty.te(), None);
        assert_eq!(Symbol::Active(TeId::new(3)).te(), Some(TeId::new(3)));
        assert_eq!(Symbol::Inactive(TeId::new(7)).te(), Some(TeId::new(7)));
    }

    #[test]
    fn test_symbol_deactivated() {
        let id = TeId::new(2);
        assert_eq!(Symbol::Active(id).deactivated(), Symbol::Inactive(id));
        assert_eq!(Symbol::Inactive(id).deactivated(), Symbol::Inactive(id));
        assert_eq!(Symbol::Empty.deactivated(), Symbol::Empty);
    }

    #[test]
    fn test_symbol_default_is_empty() {
        assert_eq!(Symbol::default(), Symbol::Empty);
        assert!(!Symbol::default().is_active());
    }

    #[test]
    fn test_symbol_display() {
        let rendered: String = [
            Symbol::Empty,
            Symbol::Active(TeId::new(1)),
            Symbol::Inactive(TeId::new(1)),
        ]
        .iter()
        .map(|s| format!("{s}"))
        .collect();
        assert_eq!(rendered, "-Ax");
    }

    #[test]
    fn test_class_round_trips_through_char() {
        let id = TeId::new(4);
        for symbol in [Symbol::Empty, Symbol::Active(id), Symbol::Inactive(id)] {
            let class = SymbolClass::try_from(symbol.to_char()).unwrap();
            assert_eq!(class, symbol.class());
            assert_eq!(char::from(class), symbol.to_char());
        }
    }

    #[test]
    fn test_invalid_symbol_char() {
        assert_eq!(SymbolClass::try_from('a'), Err(InvalidSymbol('a')));
        assert_eq!(SymbolClass::from_char('X'), None);
        assert_eq!(
            SymbolClass::try_from('?').unwrap_err().to_string(),
            "Invalid genome symbol: '?'"
        );
    }
}
