//! Genomes are fixed-length sequences of moves, read front to back as a path through a
//! [Maze](crate::Maze).

use crate::error::GenomeError;
use core::{
    fmt::{self, Write},
    str::FromStr,
};
use rand::{Rng, RngCore};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A single step in one of the four grid directions. Up moves toward higher row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// the alphabet genomes are drawn from
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub const fn symbol(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    /// the move that undoes this one
    pub const fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn random(rng: &mut impl RngCore) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl TryFrom<char> for Move {
    type Error = char;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|m| m.symbol() == symbol)
            .ok_or(symbol)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}

/// An ordered path of moves. Its length is set when it is created; mutation and crossover only
/// ever rearrange or recombine its contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Genome(Vec<Move>);

impl Genome {
    pub fn new(moves: Vec<Move>) -> Self {
        Self(moves)
    }

    /// `len` moves, each drawn uniformly from [Move::ALL]
    pub fn random(len: usize, rng: &mut impl RngCore) -> Self {
        (0..len).map(|_| Move::random(rng)).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mutable access to the moves. Handing out a slice keeps the length fixed.
    #[inline]
    pub fn moves_mut(&mut self) -> &mut [Move] {
        &mut self.0
    }
}

impl AsRef<[Move]> for Genome {
    fn as_ref(&self) -> &[Move] {
        &self.0
    }
}

impl FromIterator<Move> for Genome {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|m| f.write_char(m.symbol()))
    }
}

impl FromStr for Genome {
    type Err = GenomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(index, symbol)| {
                Move::try_from(symbol).map_err(|symbol| GenomeError::UnknownMove { symbol, index })
            })
            .collect()
    }
}

// genomes travel as their move string, which is also how they are printed
impl Serialize for Genome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Genome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}

/// Single point crossover. The first child is `left`'s head followed by `right`'s tail, the
/// second is `right`'s head followed by `left`'s tail. `split` is clamped to each parent's
/// length, so parents of unequal length never panic.
pub fn crossover(left: &Genome, right: &Genome, split: usize) -> (Genome, Genome) {
    let (l_head, l_tail) = left.0.split_at(split.min(left.len()));
    let (r_head, r_tail) = right.0.split_at(split.min(right.len()));
    (
        l_head.iter().chain(r_tail).copied().collect(),
        r_head.iter().chain(l_tail).copied().collect(),
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::random::WyRng;
    use proptest::prelude::*;

    fn genome(s: &str) -> Genome {
        s.parse().unwrap()
    }

    #[test]
    fn test_move_reverse() {
        for m in Move::ALL {
            assert_ne!(m, m.reverse());
            assert_eq!(m, m.reverse().reverse());
        }
    }

    #[test]
    fn test_move_symbols() {
        assert_eq!("UDLR", Move::ALL.iter().map(|m| m.symbol()).collect::<String>());
        assert_eq!(Ok(Move::Left), Move::try_from('L'));
        assert_eq!(Err('x'), Move::try_from('x'));
    }

    #[test]
    fn test_genome_parse() {
        let g = genome("UUDLR");
        assert_eq!(5, g.len());
        assert_eq!(
            &[Move::Up, Move::Up, Move::Down, Move::Left, Move::Right],
            g.as_ref()
        );
        assert_eq!("UUDLR", g.to_string());
        assert_eq!(
            g,
            Genome::new(vec![Move::Up, Move::Up, Move::Down, Move::Left, Move::Right])
        );
        assert_eq!(
            Err(GenomeError::UnknownMove {
                symbol: 'u',
                index: 2
            }),
            "UUuR".parse::<Genome>()
        );
        assert!(genome("").is_empty());
    }

    #[test]
    fn test_genome_random() {
        let mut rng = WyRng::seeded(3);
        let g = Genome::random(400, &mut rng);
        assert_eq!(400, g.len());
        // every move shows up in a long enough uniform draw
        for m in Move::ALL {
            assert!(g.as_ref().contains(&m), "{m:?} never drawn");
        }
        assert_eq!(g, Genome::random(400, &mut WyRng::seeded(3)));
    }

    #[test]
    fn test_genome_serde_as_string() {
        let g = genome("LRUD");
        assert_eq!("\"LRUD\"", serde_json::to_string(&g).unwrap());
        assert_eq!(g, serde_json::from_str::<Genome>("\"LRUD\"").unwrap());
        assert!(serde_json::from_str::<Genome>("\"LRQD\"").is_err());
    }

    #[test]
    fn test_crossover() {
        let (a, b) = crossover(&genome("UUUUUU"), &genome("DDDDDD"), 2);
        assert_eq!("UUDDDD", a.to_string());
        assert_eq!("DDUUUU", b.to_string());
    }

    #[test]
    fn test_crossover_uneven() {
        let (a, b) = crossover(&genome("UUUUUU"), &genome("DD"), 4);
        assert_eq!("UUUU", a.to_string());
        assert_eq!("DDUU", b.to_string());
    }

    fn equal_parents() -> impl Strategy<Value = (Genome, Genome, usize)> {
        (2usize..64).prop_flat_map(|len| {
            (
                prop::collection::vec(0usize..4, len),
                prop::collection::vec(0usize..4, len),
                1..len,
            )
                .prop_map(|(l, r, split)| {
                    (
                        l.into_iter().map(|i| Move::ALL[i]).collect::<Genome>(),
                        r.into_iter().map(|i| Move::ALL[i]).collect::<Genome>(),
                        split,
                    )
                })
        })
    }

    proptest! {
        /// laying the children end to end at the split point rebuilds both parents
        #[test]
        fn prop_crossover_swaps_tails((left, right, split) in equal_parents()) {
            let (a, b) = crossover(&left, &right, split);
            prop_assert_eq!(left.len(), a.len());
            prop_assert_eq!(right.len(), b.len());

            let rebuilt_left: Genome = a.as_ref()[..split].iter().chain(&b.as_ref()[split..]).copied().collect();
            let rebuilt_right: Genome = b.as_ref()[..split].iter().chain(&a.as_ref()[split..]).copied().collect();
            prop_assert_eq!(left, rebuilt_left);
            prop_assert_eq!(right, rebuilt_right);
        }
    }
}
