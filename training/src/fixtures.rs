use arena::{Fixture, StrategyKind};
use itertools::Itertools;

/// Every pairing of distinct strategies, repeated `rounds` times.
///
/// Ordered pairings schedule both `(a, b)` and `(b, a)`; unordered pairings schedule each pair once.
/// A strategy listed twice pairs with itself and yields a void fixture, which the runner skips.
pub fn enumerate_fixtures(strategies: &[StrategyKind], rounds: usize, ordered: bool) -> Vec<Fixture> {
    let round: Vec<Fixture> = if ordered {
        strategies
            .iter()
            .permutations(2)
            .map(|pair| Fixture::new(*pair[0], *pair[1]))
            .collect()
    } else {
        strategies
            .iter()
            .tuple_combinations()
            .map(|(a, b)| Fixture::new(*a, *b))
            .collect()
    };

    std::iter::repeat(round).take(rounds).flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [StrategyKind; 3] = [
        StrategyKind::Random,
        StrategyKind::Maximize,
        StrategyKind::QLearning,
    ];

    #[test]
    fn test_ordered_fixtures() {
        let fixtures = enumerate_fixtures(&STRATEGIES, 1, true);

        assert_eq!(fixtures.len(), 6);
        assert!(fixtures.contains(&Fixture::new(StrategyKind::Random, StrategyKind::QLearning)));
        assert!(fixtures.contains(&Fixture::new(StrategyKind::QLearning, StrategyKind::Random)));
        assert!(fixtures.iter().all(|f| !f.is_void()));
    }

    #[test]
    fn test_unordered_fixtures() {
        let fixtures = enumerate_fixtures(&STRATEGIES, 1, false);

        assert_eq!(
            fixtures,
            vec![
                Fixture::new(StrategyKind::Random, StrategyKind::Maximize),
                Fixture::new(StrategyKind::Random, StrategyKind::QLearning),
                Fixture::new(StrategyKind::Maximize, StrategyKind::QLearning),
            ]
        );
    }

    #[test]
    fn test_rounds_repeat_in_order() {
        let one = enumerate_fixtures(&STRATEGIES, 1, true);
        let three = enumerate_fixtures(&STRATEGIES, 3, true);

        assert_eq!(three.len(), 18);
        assert_eq!(&three[12..], &one[..]);
    }

    #[test]
    fn test_duplicate_strategy_yields_void_fixture() {
        let fixtures = enumerate_fixtures(&[StrategyKind::Random, StrategyKind::Random], 1, false);

        assert_eq!(fixtures.len(), 1);
        assert!(fixtures[0].is_void());
    }

    #[test]
    fn test_zero_rounds() {
        assert!(enumerate_fixtures(&STRATEGIES, 0, true).is_empty());
    }
}
